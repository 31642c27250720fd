// API response types
//
// Models for the Security Manager JSON API. Listing endpoints share the
// `{ results: [...], total: N }` page shape. Records keep every field the
// server sent in `extra` so a device can be PUT back unchanged apart from
// the settings being patched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ── Page envelope ────────────────────────────────────────────────────

/// One page of a paginated listing.
///
/// ```json
/// { "total": 42, "results": [ ... ] }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total: u64,
}

// ── Device pack ──────────────────────────────────────────────────────

/// A device pack (vendor/product plugin) from `plugin/list/DEVICE_PACK.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevicePack {
    pub id: i64,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default, rename = "deviceName")]
    pub device_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Device group ─────────────────────────────────────────────────────

/// A device group from the SIQL `devicegroup/paged-search` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceGroup {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Device ───────────────────────────────────────────────────────────

/// A managed device.
///
/// Only `id` and `extendedSettingsJson` are modelled; the rest of the
/// (large, firmware-dependent) record, `name` included, round-trips through
/// `extra` untouched. SIQL search results are a partial projection of this
/// record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: i64,
    #[serde(
        default,
        rename = "extendedSettingsJson",
        skip_serializing_if = "Option::is_none"
    )]
    pub extended_settings: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Device {
    /// Display name, falling back to an empty string when the record has
    /// no string `name`.
    pub fn display_name(&self) -> &str {
        self.extra
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn page_defaults_when_fields_missing() {
        let page: Page<DeviceGroup> = serde_json::from_value(json!({})).unwrap();
        assert!(page.results.is_empty());
        assert_eq!(page.total, 0);
    }

    #[test]
    fn device_round_trips_unknown_fields() {
        let raw = json!({
            "id": 7,
            "name": "edge-fw-1",
            "managementIp": "10.1.1.1",
            "devicePack": { "artifactId": "paloalto_firewall" },
            "extendedSettingsJson": { "retrievalMethod": "FromServer" }
        });
        let device: Device = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(device.id, 7);
        assert_eq!(device.display_name(), "edge-fw-1");
        assert_eq!(device.extra["managementIp"], "10.1.1.1");

        let back = serde_json::to_value(&device).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn null_name_survives_round_trip() {
        let raw = json!({
            "id": 5,
            "name": null,
            "extendedSettingsJson": { "k": 1 }
        });
        let device: Device = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(device.display_name(), "");

        let back = serde_json::to_value(&device).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn null_extended_settings_reads_as_absent() {
        let device: Device = serde_json::from_value(json!({
            "id": 1,
            "extendedSettingsJson": null
        }))
        .unwrap();
        assert!(device.extended_settings.is_none());
    }
}
