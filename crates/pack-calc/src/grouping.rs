//! 分組彙總（機台、客戶）

use pack_core::{ProductionRecord, ShipmentRecord};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// 分組合計
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTotal {
    /// 分組標籤
    pub label: String,

    /// 記錄筆數
    pub record_count: usize,

    /// 數量合計
    pub quantity: i64,

    /// 面積合計（m²）
    pub area: Decimal,
}

impl GroupTotal {
    fn new(label: String) -> Self {
        Self {
            label,
            record_count: 0,
            quantity: 0,
            area: Decimal::ZERO,
        }
    }

    /// 累加一筆記錄（數量/面積溢出時停在上限）
    fn add(&mut self, quantity: i64, area: Decimal) {
        self.record_count += 1;
        self.quantity = self.quantity.saturating_add(quantity);
        self.area = self.area.saturating_add(area);
    }
}

/// 分組計算器
pub struct GroupingCalculator;

impl GroupingCalculator {
    /// 依鍵值分組，缺少或空白鍵值歸入 `unknown_label`
    ///
    /// 組內記錄維持輸入順序。
    pub fn group_by<'a, R, F>(
        records: &[&'a R],
        key: F,
        unknown_label: &str,
    ) -> BTreeMap<String, Vec<&'a R>>
    where
        F: Fn(&R) -> Option<&str>,
    {
        let mut grouped: BTreeMap<String, Vec<&'a R>> = BTreeMap::new();
        for &record in records {
            let label = key(record)
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .unwrap_or(unknown_label);
            grouped.entry(label.to_string()).or_default().push(record);
        }
        grouped
    }

    /// 各機台生產合計
    pub fn production_by_machine(
        records: &[&ProductionRecord],
        unknown_label: &str,
    ) -> Vec<GroupTotal> {
        Self::group_by(records, |r| r.machine.as_deref(), unknown_label)
            .into_iter()
            .map(|(label, members)| {
                let mut total = GroupTotal::new(label);
                for record in members {
                    total.add(record.quantity, record.m2);
                }
                total
            })
            .collect()
    }

    /// 各客戶出貨合計
    pub fn shipment_by_customer(
        records: &[&ShipmentRecord],
        unknown_label: &str,
    ) -> Vec<GroupTotal> {
        Self::group_by(records, |r| r.customer.as_deref(), unknown_label)
            .into_iter()
            .map(|(label, members)| {
                let mut total = GroupTotal::new(label);
                for record in members {
                    total.add(record.quantity, record.m2);
                }
                total
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_by_machine() {
        let records = vec![
            ProductionRecord::new("2025-01-01", Some("EXT-1"), 10, Decimal::from(100)),
            ProductionRecord::new("2025-01-02", Some("EXT-2"), 5, Decimal::from(50)),
            ProductionRecord::new("2025-01-03", Some("EXT-1"), 7, Decimal::new(705, 1)),
        ];
        let refs: Vec<&ProductionRecord> = records.iter().collect();

        let groups = GroupingCalculator::production_by_machine(&refs, "Unknown");

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "EXT-1");
        assert_eq!(groups[0].record_count, 2);
        assert_eq!(groups[0].quantity, 17);
        assert_eq!(groups[0].area, Decimal::new(1705, 1));
        assert_eq!(groups[1].label, "EXT-2");
    }

    #[test]
    fn test_missing_keys_grouped_as_unknown() {
        let records = vec![
            ShipmentRecord::new("2025-01-01", None, 1, Decimal::ONE),
            ShipmentRecord::new("2025-01-02", Some(""), 2, Decimal::ONE),
            ShipmentRecord::new("2025-01-03", Some("   "), 3, Decimal::ONE),
            ShipmentRecord::new("2025-01-04", Some("Acme"), 4, Decimal::ONE),
        ];
        let refs: Vec<&ShipmentRecord> = records.iter().collect();

        let groups = GroupingCalculator::shipment_by_customer(&refs, "Unknown");
        let unknown = groups.iter().find(|g| g.label == "Unknown").unwrap();

        assert_eq!(unknown.record_count, 3);
        assert_eq!(unknown.quantity, 6);
    }

    #[test]
    fn test_group_totals_saturate() {
        let records = vec![
            ShipmentRecord::new("2025-01-01", Some("A"), i64::MAX, Decimal::MAX),
            ShipmentRecord::new("2025-01-02", Some("A"), 1, Decimal::ONE),
        ];
        let refs: Vec<&ShipmentRecord> = records.iter().collect();

        let groups = GroupingCalculator::shipment_by_customer(&refs, "Unknown");

        assert_eq!(groups[0].record_count, 2);
        assert_eq!(groups[0].quantity, i64::MAX);
        assert_eq!(groups[0].area, Decimal::MAX);
    }

    #[test]
    fn test_group_members_keep_order() {
        let records = vec![
            ProductionRecord::new("2025-01-05", Some("A"), 3, Decimal::ONE),
            ProductionRecord::new("2025-01-01", Some("A"), 1, Decimal::ONE),
            ProductionRecord::new("2025-01-03", Some("A"), 2, Decimal::ONE),
        ];
        let refs: Vec<&ProductionRecord> = records.iter().collect();

        let grouped = GroupingCalculator::group_by(&refs, |r| r.machine.as_deref(), "Unknown");
        let quantities: Vec<i64> = grouped["A"].iter().map(|r| r.quantity).collect();

        assert_eq!(quantities, vec![3, 1, 2]);
    }
}
