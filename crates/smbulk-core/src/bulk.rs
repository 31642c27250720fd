//! Bulk applier: push a patch to every device of a target.
//!
//! The run is strictly sequential. Per-device failures are reported to
//! the console and counted; only the up-front device count is fatal.

use std::fmt;

use tracing::{debug, info, warn};

use smbulk_api::{Device, SecurityManagerClient};

use crate::console::Console;
use crate::error::CoreError;
use crate::patch::PatchMap;
use crate::target::Target;

/// Devices fetched per page during the bulk run.
pub const DEVICE_PAGE_SIZE: u32 = 1000;

/// Number of device pages to walk for `total` devices.
///
/// Always at least one, and one more than strictly needed when `total` is
/// an exact multiple of the page size. The extra page comes back empty.
pub fn page_iterations(total: u64) -> u64 {
    total / u64::from(DEVICE_PAGE_SIZE) + 1
}

/// Counts collected over one bulk run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkReport {
    /// Device total reported by the count query.
    pub total: u64,
    /// Pages walked.
    pub pages: u64,
    pub updated: u64,
    pub failed: u64,
    /// Devices never sent: failed re-fetch or unusable settings.
    pub skipped: u64,
}

impl fmt::Display for BulkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Updated {} of {} devices ({} failed, {} skipped)",
            self.updated, self.total, self.failed, self.skipped
        )
    }
}

/// Ask the server how many devices the target matches.
pub async fn count(client: &SecurityManagerClient, target: &Target) -> Result<u64, CoreError> {
    client
        .count_devices(&target.filter())
        .await
        .map_err(|e| CoreError::listing("devices", client.base_url().as_str(), e))
}

/// Announce the device count and ask for the go-ahead.
///
/// Only the exact answer `y` proceeds.
pub fn confirm<C: Console>(console: &mut C, total: u64) -> Result<bool, CoreError> {
    console.say("");
    console.say(&format!(
        "There are a total of {total} devices that will be updated."
    ));
    let answer = console.prompt("Enter y to continue")?;
    Ok(answer == "y")
}

enum Outcome {
    Updated,
    Failed,
    Skipped,
}

/// Walk every device page of `target` and PUT the patched records.
pub async fn apply<C: Console>(
    client: &SecurityManagerClient,
    console: &mut C,
    target: &Target,
    patch: &PatchMap,
    total: u64,
) -> BulkReport {
    let filter = target.filter();
    let pages = page_iterations(total);
    let mut report = BulkReport {
        total,
        pages,
        ..BulkReport::default()
    };
    info!(total, pages, fields = patch.len(), "starting bulk update");

    for page in 0..pages {
        console.say(&format!(
            "Running update script against page {} of {pages}",
            page + 1
        ));

        let Ok(page_index) = u32::try_from(page) else {
            break;
        };
        let devices = match client.list_devices(&filter, page_index, DEVICE_PAGE_SIZE).await {
            Ok(listing) => listing.results,
            Err(err) => {
                warn!(page = page + 1, %err, "device page fetch failed");
                console.failure(&format!(
                    "Failed to fetch page {} of {pages} - {err}",
                    page + 1
                ));
                continue;
            }
        };
        debug!(page = page + 1, count = devices.len(), "device page fetched");

        for device in devices {
            match update_one(client, console, target, patch, device).await {
                Outcome::Updated => report.updated += 1,
                Outcome::Failed => report.failed += 1,
                Outcome::Skipped => report.skipped += 1,
            }
        }
    }

    info!(
        updated = report.updated,
        failed = report.failed,
        skipped = report.skipped,
        "bulk update finished"
    );
    report
}

async fn update_one<C: Console>(
    client: &SecurityManagerClient,
    console: &mut C,
    target: &Target,
    patch: &PatchMap,
    listed: Device,
) -> Outcome {
    let id = listed.id;
    let name = listed.display_name().to_owned();

    let mut device = if target.needs_full_fetch() {
        match client.get_device(id).await {
            Ok(full) => full,
            Err(err) => {
                warn!(id, %err, "device re-fetch failed");
                console.failure(&match err.status() {
                    Some(status) => format!(
                        "Failed to fetch details for {name} (ID: {id}) - Status code: {status}"
                    ),
                    None => format!("Failed to fetch details for {name} (ID: {id}) - {err}"),
                });
                return Outcome::Skipped;
            }
        }
    } else {
        listed
    };

    if let Err(err) = patch.apply_to(&mut device) {
        warn!(id, %err, "device settings not patchable");
        console.warn(&format!("Skipping {name} (ID: {id}) - {err}"));
        return Outcome::Skipped;
    }

    match client.update_device(&device).await {
        Ok(status) => {
            console.success(&format!(
                "Successfully updated settings for {name} (ID: {id}) - Status code: {}",
                status.as_u16()
            ));
            Outcome::Updated
        }
        Err(err) => {
            warn!(id, %err, "device update failed");
            match err.status() {
                Some(status) => {
                    console.failure(&format!(
                        "Failed to update {name} (ID: {id}) - Status code: {status}"
                    ));
                    if let Some(body) = err.body() {
                        console.failure(&format!("  Error details: {body}"));
                    }
                }
                None => console.failure(&format!("Failed to update {name} (ID: {id}) - {err}")),
            }
            Outcome::Failed
        }
    }
}
