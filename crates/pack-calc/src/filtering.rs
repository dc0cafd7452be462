//! 期間篩選

use pack_core::{DatedRecord, DateRange};

/// 期間篩選器
pub struct PeriodFilter;

impl PeriodFilter {
    /// 保留日期落在期間內（含頭含尾）的記錄，維持原始順序
    pub fn filter<'a, R: DatedRecord>(records: &'a [R], range: &DateRange) -> Vec<&'a R> {
        records
            .iter()
            .filter(|record| range.contains(record.date()))
            .collect()
    }
}
