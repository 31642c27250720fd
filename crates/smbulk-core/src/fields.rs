//! Catalog of device settings the editor can change.
//!
//! Each entry names a key inside a device's `extendedSettingsJson` and
//! the type its value must have. Hints are shown to the operator as
//! guidance only; values are never checked against them.

use serde::Serialize;
use strum::{Display, EnumIter};

/// Value type of a catalog field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    #[strum(serialize = "string")]
    String,
    #[strum(serialize = "true/false")]
    Boolean,
    #[strum(serialize = "integer")]
    Integer,
    #[strum(serialize = "array")]
    StringArray,
}

/// Advisory guidance shown before a value prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldHint {
    /// Heading printed before the suggested values.
    pub label: &'static str,
    /// Suggested values.
    pub options: &'static [&'static str],
    /// Sample input, for list fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<&'static str>,
}

/// One configurable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<FieldHint>,
}

impl FieldSpec {
    const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            hint: None,
        }
    }

    const fn with_options(mut self, options: &'static [&'static str]) -> Self {
        self.hint = Some(FieldHint {
            label: "Options",
            options,
            example: None,
        });
        self
    }

    const fn with_example(
        mut self,
        example: &'static str,
        label: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        self.hint = Some(FieldHint {
            label,
            options,
            example: Some(example),
        });
        self
    }

    /// Menu label: `name (kind)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.kind)
    }
}

const fn string(name: &'static str) -> FieldSpec {
    FieldSpec::new(name, FieldKind::String)
}

const fn boolean(name: &'static str) -> FieldSpec {
    FieldSpec::new(name, FieldKind::Boolean)
}

const fn integer(name: &'static str) -> FieldSpec {
    FieldSpec::new(name, FieldKind::Integer)
}

/// AWS regions accepted by cloud device packs for `limitRegions`.
pub const AWS_REGIONS: &[&str] = &[
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
    "af-south-1",
    "ap-east-1",
    "ap-south-1",
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-northeast-3",
    "ap-southeast-1",
    "ap-southeast-2",
    "ca-central-1",
    "eu-central-1",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "eu-south-1",
    "eu-north-1",
    "me-south-1",
    "sa-east-1",
    "cn-north-1",
    "cn-northwest-1",
    "us-gov-east-1",
    "us-gov-west-1",
];

/// Every field the editor offers, in menu order. Menu numbers are the
/// 1-based positions in this table.
pub const CATALOG: &[FieldSpec] = &[
    string("access_key"),
    string("aws_account_id"),
    boolean("batchConfigRetrieval"),
    boolean("changeMonitoringEnabled"),
    integer("checkForChange.intervalInMinutes"),
    boolean("checkForChangeEnabled"),
    boolean("checkForChangeOnChangeDetection"),
    string("client_id"),
    boolean("commitAdminChange"),
    string("default_region"),
    boolean("deprecatedCA"),
    boolean("disableVDOMCheck"),
    boolean("doNotGenerateComments"),
    boolean("fallbackAuthentication"),
    boolean("flattenConfigFile"),
    integer("flowLogSearchWindow"),
    boolean("granularChange"),
    integer("hitCounterRetrievalInterval"),
    string("key_id"),
    boolean("layerTwoEnforcementInterfaces"),
    FieldSpec::new("limitRegions", FieldKind::StringArray).with_example(
        "us-east-1,us-east-2,us-west-1,us-west-2",
        "Available regions",
        AWS_REGIONS,
    ),
    string("loggingPlugin"),
    boolean("logMonitoringEnabled"),
    string("logMonitoringMethod").with_options(&["syslog", "hitcounter", "Hit counters"]),
    string("monitoringPlugin"),
    boolean("noPasswordDevice"),
    boolean("normalizeApplicationDerivedServices"),
    string("ntpServer"),
    boolean("processNoInterfacePolicies"),
    boolean("recommendChangesViaTheManager"),
    boolean("resetSSHKeyValue"),
    integer("retrievalCallTimeOut"),
    string("retrievalMethod").with_options(&["FromDevice", "FromServer"]),
    string("retrievalPlugin"),
    boolean("retrieveRoutesViaApi"),
    boolean("retrieveSetSyntaxConfig"),
    boolean("routesFromConfig"),
    boolean("scheduledRetrievalEnabled"),
    string("secret"),
    integer("serverAliveInterval"),
    string("serverCertSecurity").with_options(&[
        "VERIFY_NONE",
        "VERIFY_HOSTNAME",
        "VERIFY_ALL",
    ]),
    boolean("skipApplicationFile"),
    boolean("skipDynamicBlockListRetrieval"),
    boolean("skipRoute"),
    boolean("skipUserFileRetrieval"),
    boolean("supportsFQDN"),
    boolean("suppressFQDNCapabilities"),
    string("tenant"),
    boolean("trackUsageUsingHitCounters"),
    boolean("useCLICommandGeneration"),
    boolean("use_default_region_only"),
    boolean("use_role"),
    boolean("usePrivateConfig"),
    boolean("useSpecialAccessList"),
    boolean("versionSshFallback"),
];

/// Look up a field by its 1-based menu number.
pub fn by_number(number: usize) -> Option<&'static FieldSpec> {
    number.checked_sub(1).and_then(|idx| CATALOG.get(idx))
}

/// Look up a field by its settings key.
pub fn by_name(name: &str) -> Option<&'static FieldSpec> {
    CATALOG.iter().find(|spec| spec.name == name)
}
