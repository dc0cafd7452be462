//! 裁切產出計算
//!
//! 給定原料板材與目標裁切尺寸，計算每片原料可裁出幾片成品，
//! 以及滿足需求數量所需的原料片數。原料片數一律無條件進位，
//! 所以產出數量永遠不少於需求數量。

use pack_core::{CutRequest, SourceSheetSpec};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 裁切產出結果
///
/// 全部為 0 表示「資料不足」或「裁切尺寸放不進原料」，呼叫端據此停用提交。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct YieldResult {
    /// 寬度方向可裁片數
    pub pieces_per_width: u64,

    /// 長度方向可裁片數
    pub pieces_per_length: u64,

    /// 每片原料可裁片數
    pub pieces_per_source_unit: u64,

    /// 所需原料片數
    pub required_source_units: u64,

    /// 實際裁出總片數
    pub total_cut_pieces: u64,
}

impl YieldResult {
    /// 全零結果
    pub fn zero() -> Self {
        Self::default()
    }

    /// 是否可提交
    pub fn is_feasible(&self) -> bool {
        self.required_source_units > 0
    }

    /// 超出需求的片數
    pub fn surplus(&self, requested_quantity: u64) -> u64 {
        self.total_cut_pieces.saturating_sub(requested_quantity)
    }
}

/// 裁切產出計算器
pub struct YieldCalculator;

impl YieldCalculator {
    /// 計算裁切產出
    ///
    /// 原料長度（m）先換算為 cm 再與裁切長度比較。
    /// 任一尺寸或需求數量為 0（或負數），或裁切尺寸放不進原料時回傳全零結果。
    pub fn compute(source: &SourceSheetSpec, cut: &CutRequest) -> YieldResult {
        match Self::try_compute(source, cut) {
            Some(result) => result,
            None => {
                tracing::trace!("裁切資料不足或尺寸不符，回傳全零結果");
                YieldResult::zero()
            }
        }
    }

    fn try_compute(source: &SourceSheetSpec, cut: &CutRequest) -> Option<YieldResult> {
        let source_width = positive(source.width_cm)?;
        let source_length = positive(source.length_cm()?)?;
        let cut_width = positive(cut.width_cm)?;
        let cut_length = positive(cut.length_cm)?;
        if cut.quantity == 0 {
            return None;
        }

        let pieces_per_width = fit_count(source_width, cut_width)?;
        let pieces_per_length = fit_count(source_length, cut_length)?;
        let per_unit = pieces_per_width.checked_mul(pieces_per_length)?;
        if per_unit == 0 {
            return None;
        }

        let required_source_units = cut.quantity.div_ceil(per_unit);
        let total_cut_pieces = required_source_units.checked_mul(per_unit)?;

        Some(YieldResult {
            pieces_per_width,
            pieces_per_length,
            pieces_per_source_unit: per_unit,
            required_source_units,
            total_cut_pieces,
        })
    }
}

/// 計算裁切產出（便捷函數）
pub fn compute_yield(source: &SourceSheetSpec, cut: &CutRequest) -> YieldResult {
    YieldCalculator::compute(source, cut)
}

fn positive(value: Decimal) -> Option<Decimal> {
    (value > Decimal::ZERO).then_some(value)
}

/// floor(total / piece)
fn fit_count(total: Decimal, piece: Decimal) -> Option<u64> {
    total.checked_div(piece)?.floor().to_u64()
}
