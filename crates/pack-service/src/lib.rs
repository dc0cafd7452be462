//! # Pack Service
//!
//! 記錄庫存取、報表產生、裁切與出貨登錄、報表輸出

pub mod config;
pub mod cut;
pub mod render;
pub mod report;
pub mod shipment;
pub mod store;

// Re-export 主要類型
pub use config::ServiceConfig;
pub use cut::CutService;
pub use render::{CsvRenderer, DocumentRenderer};
pub use report::ReportService;
pub use shipment::{ShipmentForm, ShipmentService};
pub use store::{decode_records, EntityKind, MemoryRecordStore, RecordStore};
