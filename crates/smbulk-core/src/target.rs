//! Target selection: which devices the patch is applied to.
//!
//! The operator picks a target kind (device pack or device group), pages
//! through the matching listing 20 entries at a time and types the ID of
//! the entry to use.

use strum::Display;
use tracing::{debug, info};

use smbulk_api::{DeviceFilter, DeviceGroup, DevicePack, SecurityManagerClient};

use crate::console::{self, Console};
use crate::error::CoreError;
use crate::pagination::Pager;

/// Entries per listing page.
pub const LIST_PAGE_SIZE: u32 = 20;

// ── Types ───────────────────────────────────────────────────────────

/// The two ways of addressing a set of devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TargetKind {
    #[strum(serialize = "Device Packs")]
    DevicePack,
    #[strum(serialize = "Device Groups")]
    DeviceGroup,
}

impl TargetKind {
    /// Lower-case plural used in progress and error messages.
    pub fn plural(self) -> &'static str {
        match self {
            Self::DevicePack => "device packs",
            Self::DeviceGroup => "device groups",
        }
    }

    /// Lower-case singular used in prompts.
    pub fn singular(self) -> &'static str {
        match self {
            Self::DevicePack => "device pack",
            Self::DeviceGroup => "device group",
        }
    }

    /// Parse the answer to the target-kind menu.
    pub fn from_menu_choice(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::DevicePack),
            "2" => Some(Self::DeviceGroup),
            _ => None,
        }
    }
}

/// A pack or group ID as typed by the operator: one or more ASCII digits.
///
/// The ID is not checked against the listing; any digit string the
/// server later rejects simply matches no devices.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetId(String);

impl TargetId {
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(input.to_owned()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TargetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The selected device set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    DevicePack { id: TargetId },
    DeviceGroup { id: TargetId },
}

impl Target {
    pub fn new(kind: TargetKind, id: TargetId) -> Self {
        match kind {
            TargetKind::DevicePack => Self::DevicePack { id },
            TargetKind::DeviceGroup => Self::DeviceGroup { id },
        }
    }

    pub fn kind(&self) -> TargetKind {
        match self {
            Self::DevicePack { .. } => TargetKind::DevicePack,
            Self::DeviceGroup { .. } => TargetKind::DeviceGroup,
        }
    }

    pub fn id(&self) -> &TargetId {
        match self {
            Self::DevicePack { id } | Self::DeviceGroup { id } => id,
        }
    }

    /// Group search results are partial records that must be re-fetched.
    pub fn needs_full_fetch(&self) -> bool {
        matches!(self, Self::DeviceGroup { .. })
    }

    /// The API-level device filter for this target.
    pub fn filter(&self) -> DeviceFilter {
        match self {
            Self::DevicePack { id } => DeviceFilter::DevicePack(id.as_str().to_owned()),
            Self::DeviceGroup { id } => DeviceFilter::DeviceGroup(id.as_str().to_owned()),
        }
    }
}

// ── Listing entries ─────────────────────────────────────────────────

/// One selectable row of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub id: i64,
    pub label: String,
}

impl ListingEntry {
    pub fn cell(&self) -> String {
        format!("{} (ID: {})", self.label, self.id)
    }
}

impl From<&DevicePack> for ListingEntry {
    fn from(pack: &DevicePack) -> Self {
        Self {
            id: pack.id,
            label: format!(
                "{} - {}",
                pack.vendor.as_deref().unwrap_or("Unknown Vendor"),
                pack.device_name.as_deref().unwrap_or("Unknown Device Pack"),
            ),
        }
    }
}

impl From<&DeviceGroup> for ListingEntry {
    fn from(group: &DeviceGroup) -> Self {
        Self {
            id: group.id,
            label: group.name.as_deref().unwrap_or("Unknown Group").to_owned(),
        }
    }
}

// ── Navigation input ────────────────────────────────────────────────

/// What the operator asked for at the listing prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Next,
    Previous,
    Select(TargetId),
    Invalid,
}

impl Navigation {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.eq_ignore_ascii_case("n") {
            Self::Next
        } else if input.eq_ignore_ascii_case("p") {
            Self::Previous
        } else if let Some(id) = TargetId::parse(input) {
            Self::Select(id)
        } else {
            Self::Invalid
        }
    }
}

// ── Interactive stages ──────────────────────────────────────────────

/// Show the target-kind menu and read the choice.
pub fn choose_kind<C: Console>(console: &mut C) -> Result<TargetKind, CoreError> {
    console.say("");
    console.say(&console::rule());
    console.say("Select target type:");
    console.say(&format!("1. {}", TargetKind::DevicePack));
    console.say(&format!("2. {}", TargetKind::DeviceGroup));
    console.say(&console::rule());

    let input = console.prompt("Enter your choice (1 or 2)")?;
    let kind = TargetKind::from_menu_choice(&input).ok_or_else(|| CoreError::InvalidChoice {
        input: input.trim().to_owned(),
    })?;

    console.say("");
    console.say(&format!("You selected: {kind}"));
    Ok(kind)
}

/// Fetch one listing page as display entries plus the reported total.
async fn fetch_listing(
    client: &SecurityManagerClient,
    kind: TargetKind,
    pager: &Pager,
) -> Result<(Vec<ListingEntry>, u64), CoreError> {
    let base = client.base_url().as_str();
    match kind {
        TargetKind::DevicePack => {
            let page = client
                .list_device_packs(pager.page(), pager.page_size())
                .await
                .map_err(|e| CoreError::listing(kind.plural(), base, e))?;
            Ok((page.results.iter().map(ListingEntry::from).collect(), page.total))
        }
        TargetKind::DeviceGroup => {
            let page = client
                .list_device_groups(pager.page(), pager.page_size())
                .await
                .map_err(|e| CoreError::listing(kind.plural(), base, e))?;
            Ok((page.results.iter().map(ListingEntry::from).collect(), page.total))
        }
    }
}

/// Page through the listing for `kind` until the operator types an ID.
///
/// The page is re-fetched after every answer that does not select, so a
/// clamped `n`/`p` or an invalid answer redisplays the same page.
pub async fn select_target<C: Console>(
    client: &SecurityManagerClient,
    console: &mut C,
    kind: TargetKind,
) -> Result<Target, CoreError> {
    let mut pager = Pager::new(LIST_PAGE_SIZE);

    loop {
        console.say("");
        console.say(&format!(
            "Fetching {} (Page {})...",
            kind.plural(),
            pager.page() + 1
        ));

        let (entries, total) = fetch_listing(client, kind, &pager).await?;
        if entries.is_empty() {
            return Err(CoreError::NothingToSelect {
                what: kind.plural().to_owned(),
            });
        }
        pager.set_total(total);
        debug!(page = pager.page(), total, shown = entries.len(), "listing page");

        console.say("");
        console.say(&format!("Available {} (Page {}):", kind, pager.page() + 1));
        let cells: Vec<String> = entries.iter().map(ListingEntry::cell).collect();
        for line in console::two_columns(&cells) {
            console.say(&line);
        }

        console.say("");
        let input = console.prompt(&format!(
            "Select a {} by entering its ID, or type 'n' for next page, 'p' for previous page",
            kind.singular()
        ))?;

        match Navigation::parse(&input) {
            Navigation::Next => {
                if !pager.next() {
                    console.warn("You are already on the last page.");
                }
            }
            Navigation::Previous => {
                if !pager.prev() {
                    console.warn("You are already on the first page.");
                }
            }
            Navigation::Select(id) => {
                let label = match kind {
                    TargetKind::DevicePack => "Device Pack",
                    TargetKind::DeviceGroup => "Device Group",
                };
                console.say(&format!("Selected {label} ID: {id}"));
                info!(kind = kind.singular(), id = id.as_str(), "target selected");
                return Ok(Target::new(kind, id));
            }
            Navigation::Invalid => {
                console.warn(&format!(
                    "Invalid input. Please enter a valid {} ID or 'n'/'p' for navigation.",
                    kind.singular()
                ));
            }
        }
    }
}
