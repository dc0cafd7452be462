//! 庫存結餘計算

use pack_core::numeric::{saturating_sum_decimal, saturating_sum_integer};
use pack_core::{ProductionRecord, ShipmentRecord, StockSnapshot};
use rust_decimal::Decimal;

/// 期間庫存結餘
///
/// 結餘 = 生產 - 出貨，不做負值歸零：負數表示期間內出貨超過已記錄的生產。
/// 加總與相減溢出時停在上下限。
#[derive(Debug, Clone, PartialEq)]
pub struct StockBalance {
    pub produced_quantity: i64,
    pub shipped_quantity: i64,
    pub remaining_quantity: i64,

    pub produced_area: Decimal,
    pub shipped_area: Decimal,
    pub remaining_area: Decimal,

    /// 快照現有數量（有提供快照時）
    pub on_hand_quantity: Option<i64>,

    /// 快照現有面積
    pub on_hand_area: Option<Decimal>,
}

/// 庫存結餘計算器
pub struct StockCalculator;

impl StockCalculator {
    /// 計算期間結餘
    pub fn calculate(
        productions: &[&ProductionRecord],
        shipments: &[&ShipmentRecord],
        snapshot: &StockSnapshot,
    ) -> StockBalance {
        let produced_quantity = saturating_sum_integer(productions.iter().map(|r| r.quantity));
        let produced_area = saturating_sum_decimal(productions.iter().map(|r| r.m2));
        let shipped_quantity = saturating_sum_integer(shipments.iter().map(|r| r.quantity));
        let shipped_area = saturating_sum_decimal(shipments.iter().map(|r| r.m2));

        let (on_hand_quantity, on_hand_area) = if snapshot.is_empty() {
            (None, None)
        } else {
            (Some(snapshot.total_quantity()), Some(snapshot.total_area()))
        };

        StockBalance {
            produced_quantity,
            shipped_quantity,
            remaining_quantity: produced_quantity.saturating_sub(shipped_quantity),
            produced_area,
            shipped_area,
            remaining_area: produced_area.saturating_sub(shipped_area),
            on_hand_quantity,
            on_hand_area,
        }
    }
}
