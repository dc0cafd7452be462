//! 出貨面積計算

use pack_core::numeric::{parse_decimal, parse_integer};
use pack_core::SizeDescriptor;
use rust_decimal::{Decimal, RoundingStrategy};

/// 出貨面積計算結果
#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentArea {
    /// 尺寸
    pub size: SizeDescriptor,

    /// 單片面積（m²）
    pub area_per_piece: Decimal,

    /// 總面積（m²，兩位小數）
    pub total_area: Decimal,
}

/// 面積計算器
pub struct AreaCalculator;

impl AreaCalculator {
    /// 計算出貨面積：寬(cm) × 長(m) / 100 × 數量
    ///
    /// 任一輸入不大於 0 時回傳 None（表單保留原值）。
    pub fn shipment(
        thickness_mm: Option<Decimal>,
        width_cm: Decimal,
        length_m: Decimal,
        quantity: i64,
    ) -> Option<ShipmentArea> {
        if width_cm <= Decimal::ZERO || length_m <= Decimal::ZERO || quantity <= 0 {
            return None;
        }

        let size = SizeDescriptor::new(thickness_mm, width_cm, length_m);
        let area_per_piece = size.area_per_piece();
        let total_area = area_per_piece
            .checked_mul(Decimal::from(quantity))?
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        Some(ShipmentArea {
            size,
            area_per_piece,
            total_area,
        })
    }

    /// 從表單文字計算（厚度空白時尺寸省略厚度）
    pub fn shipment_from_form(
        thickness: &str,
        width: &str,
        length: &str,
        quantity: &str,
    ) -> Option<ShipmentArea> {
        let thickness_mm = Some(parse_decimal(thickness)).filter(|t| !t.is_zero());
        Self::shipment(
            thickness_mm,
            parse_decimal(width),
            parse_decimal(length),
            parse_integer(quantity),
        )
    }
}
