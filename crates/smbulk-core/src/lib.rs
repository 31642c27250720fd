// smbulk-core: Interactive selection and bulk patching of Security Manager devices.

pub mod bulk;
pub mod config;
pub mod console;
pub mod editor;
pub mod error;
pub mod fields;
pub mod pagination;
pub mod patch;
pub mod session;
pub mod target;
pub mod workflow;

// ── Primary re-exports ──────────────────────────────────────────────
pub use bulk::{BulkReport, DEVICE_PAGE_SIZE, page_iterations};
pub use config::{SessionConfig, TlsVerification};
pub use console::Console;
pub use error::CoreError;
pub use fields::{CATALOG, FieldHint, FieldKind, FieldSpec};
pub use pagination::Pager;
pub use patch::{FieldValue, PatchMap};
pub use session::Session;
pub use target::{Target, TargetId, TargetKind};
pub use workflow::{RunOutcome, Workflow};
