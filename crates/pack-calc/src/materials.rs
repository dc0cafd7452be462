//! 原料耗用合計

use pack_core::numeric::saturating_sum_decimal;
use pack_core::{ConsumptionRecord, RawMaterial};
use rust_decimal::Decimal;

/// 單一原料合計
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialTotal {
    pub material: RawMaterial,

    /// 期間總耗用（kg）
    pub total: Decimal,

    /// 日平均耗用（kg）
    pub daily_average: Decimal,
}

/// 原料耗用合計結果
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialTotals {
    /// 耗用記錄天數（期間內的耗用記錄筆數）
    pub days: usize,

    /// 各原料合計，順序同 `RawMaterial::ALL`
    pub totals: Vec<MaterialTotal>,
}

impl MaterialTotals {
    /// 取得原料合計
    pub fn total_for(&self, material: RawMaterial) -> Decimal {
        self.totals
            .iter()
            .find(|t| t.material == material)
            .map(|t| t.total)
            .unwrap_or(Decimal::ZERO)
    }

    /// 取得原料日平均
    pub fn average_for(&self, material: RawMaterial) -> Decimal {
        self.totals
            .iter()
            .find(|t| t.material == material)
            .map(|t| t.daily_average)
            .unwrap_or(Decimal::ZERO)
    }

    /// 全部原料總耗用
    pub fn grand_total(&self) -> Decimal {
        saturating_sum_decimal(self.totals.iter().map(|t| t.total))
    }

    /// 全部原料日平均合計
    pub fn grand_average(&self) -> Decimal {
        average(self.grand_total(), self.days)
    }
}

/// 原料耗用計算器
pub struct MaterialCalculator;

impl MaterialCalculator {
    /// 計算各原料合計與日平均（沒有記錄時平均為 0）
    pub fn calculate(records: &[&ConsumptionRecord]) -> MaterialTotals {
        let days = records.len();

        let totals = RawMaterial::ALL
            .iter()
            .map(|&material| {
                let total = saturating_sum_decimal(records.iter().map(|r| r.amount(material)));

                MaterialTotal {
                    material,
                    total,
                    daily_average: average(total, days),
                }
            })
            .collect();

        MaterialTotals { days, totals }
    }
}

fn average(total: Decimal, days: usize) -> Decimal {
    if days == 0 {
        return Decimal::ZERO;
    }
    total
        .checked_div(Decimal::from(days))
        .unwrap_or(Decimal::ZERO)
}
