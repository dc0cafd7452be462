//! # Pack Core
//!
//! 包裝廠核心資料模型與類型定義

pub mod config;
pub mod numeric;
pub mod period;
pub mod record;
pub mod report;
pub mod sheet;
pub mod size;
pub mod stock;

// Re-export 主要類型
pub use config::ReportConfig;
pub use period::{validate_date, DateRange};
pub use record::{
    ConsumptionRecord, CutProductRecord, DatedRecord, ProductionRecord, RawMaterial,
    ShipmentKind, ShipmentRecord,
};
pub use report::{ReportDocument, ReportSection, SectionBody, SectionKind, SummaryEntry, Truncation};
pub use sheet::{CutRequest, SheetColor, SourceSheetSpec};
pub use size::SizeDescriptor;
pub use stock::{StockItem, StockSnapshot};

/// 包裝廠錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum PackError {
    #[error("無效的日期: {0}")]
    InvalidDate(String),

    #[error("無效的期間: {start} ~ {end}")]
    InvalidRange { start: String, end: String },

    #[error("無效的顏色: {0}")]
    InvalidColor(String),

    #[error("記錄解析錯誤 ({entity}): {message}")]
    Decode { entity: String, message: String },

    #[error("記錄庫錯誤: {0}")]
    Store(String),

    #[error("裁切無法計算，請確認所有尺寸")]
    CutNotFeasible,

    #[error("出貨尺寸或數量不完整")]
    IncompleteShipment,

    #[error("報表無法產生: {0}")]
    ReportFailed(String),

    #[error("報表輸出錯誤: {0}")]
    Render(String),

    #[error("配置錯誤: {0}")]
    Config(String),

    #[error("其他錯誤: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PackError>;
