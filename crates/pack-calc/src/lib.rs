//! # Pack Calculation Engine
//!
//! 裁切產出計算與期間報表彙總

pub mod aggregator;
pub mod area;
pub mod filtering;
pub mod grouping;
pub mod materials;
pub mod stock;
pub mod yield_calc;

// Re-export 主要類型
pub use aggregator::{build_report, labels, RecordSet, ReportAggregator};
pub use area::{AreaCalculator, ShipmentArea};
pub use filtering::PeriodFilter;
pub use grouping::{GroupTotal, GroupingCalculator};
pub use materials::{MaterialCalculator, MaterialTotal, MaterialTotals};
pub use stock::{StockBalance, StockCalculator};
pub use yield_calc::{compute_yield, YieldCalculator, YieldResult};

use pack_core::DateRange;
use rust_decimal::Decimal;

/// 期間彙總結果（未格式化的數值）
#[derive(Debug, Clone)]
pub struct PeriodAggregates {
    /// 報表期間
    pub range: DateRange,

    /// 期間內生產記錄筆數
    pub production_count: usize,

    /// 生產總數量
    pub production_quantity: i64,

    /// 生產總面積
    pub production_area: Decimal,

    /// 期間內出貨記錄筆數
    pub shipment_count: usize,

    /// 出貨總數量
    pub shipment_quantity: i64,

    /// 出貨總面積
    pub shipment_area: Decimal,

    /// 原料耗用合計
    pub materials: MaterialTotals,

    /// 各機台生產
    pub production_by_machine: Vec<GroupTotal>,

    /// 各客戶出貨
    pub shipment_by_customer: Vec<GroupTotal>,

    /// 庫存結餘
    pub stock: StockBalance,
}

impl PeriodAggregates {
    /// 查詢機台分組
    pub fn machine(&self, label: &str) -> Option<&GroupTotal> {
        self.production_by_machine.iter().find(|g| g.label == label)
    }

    /// 查詢客戶分組
    pub fn customer(&self, label: &str) -> Option<&GroupTotal> {
        self.shipment_by_customer.iter().find(|g| g.label == label)
    }
}
