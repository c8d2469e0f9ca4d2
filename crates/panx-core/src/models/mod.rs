//! Data models and configuration.

pub mod config;
pub mod record;

pub use config::{LayoutConfig, LayoutMode, LineConfig, PanxConfig, TokenConfig};
pub use record::{DateOfBirth, IdType, IdentityRecord, RecordTable, COLUMNS};
