//! # SAR Pack
//!
//! 包裝廠生產核心：裁切產出計算與期間報表彙總
//!
//! - `pack_core`：資料模型、錯誤類型、配置
//! - `pack_calc`：裁切產出計算、出貨面積、期間報表彙總
//! - `pack_service`：記錄庫介面、報表產生、裁切與出貨登錄、CSV 輸出

pub mod logging;

pub use pack_calc::{
    build_report, compute_yield, AreaCalculator, PeriodAggregates, RecordSet, ReportAggregator,
    ShipmentArea, YieldCalculator, YieldResult,
};
pub use pack_core::{
    CutRequest, DateRange, PackError, ReportConfig, ReportDocument, Result, SheetColor,
    SourceSheetSpec,
};
pub use pack_service::{
    CsvRenderer, CutService, DocumentRenderer, EntityKind, MemoryRecordStore, RecordStore,
    ReportService, ServiceConfig, ShipmentForm, ShipmentService,
};
