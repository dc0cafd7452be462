//! 生產、耗用、出貨與裁切記錄模型
//!
//! 記錄由外部記錄庫擁有，這裡只以唯讀快照的形式讀取。
//! 數值欄位一律寬鬆解析，缺少或無法解析時為 0。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::numeric::{lenient_decimal, lenient_integer, lenient_label, lenient_text};
use crate::sheet::{CutRequest, SourceSheetSpec};
use crate::size::SizeDescriptor;

/// 帶日期的記錄
pub trait DatedRecord {
    /// 記錄日期（ISO-8601 字串）
    fn date(&self) -> &str;
}

/// 原料（耗用記錄的固定欄位）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RawMaterial {
    Petkim,
    Estol,
    Talk,
    Gaz,
    Fire,
}

impl RawMaterial {
    pub const ALL: [RawMaterial; 5] = [
        RawMaterial::Petkim,
        RawMaterial::Estol,
        RawMaterial::Talk,
        RawMaterial::Gaz,
        RawMaterial::Fire,
    ];

    /// 記錄欄位名稱
    pub fn key(&self) -> &'static str {
        match self {
            RawMaterial::Petkim => "petkim",
            RawMaterial::Estol => "estol",
            RawMaterial::Talk => "talk",
            RawMaterial::Gaz => "gaz",
            RawMaterial::Fire => "fire",
        }
    }

    /// 報表顯示名稱
    pub fn label(&self) -> &'static str {
        match self {
            RawMaterial::Petkim => "PETKIM",
            RawMaterial::Estol => "ESTOL",
            RawMaterial::Talk => "TALK",
            RawMaterial::Gaz => "GAZ",
            RawMaterial::Fire => "FIRE",
        }
    }
}

/// 生產記錄
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionRecord {
    #[serde(default)]
    pub id: Option<String>,

    /// 生產日期
    #[serde(default)]
    pub date: String,

    /// 機台
    #[serde(default, deserialize_with = "lenient_label")]
    pub machine: Option<String>,

    /// 厚度（mm）
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub thickness: Decimal,

    /// 寬度（cm）
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub width: Decimal,

    /// 長度（m）
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub length: Decimal,

    /// 數量
    #[serde(default, deserialize_with = "lenient_integer")]
    pub quantity: i64,

    /// 面積（m²）
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub m2: Decimal,

    #[serde(default, deserialize_with = "lenient_label")]
    pub color: Option<String>,
}

impl ProductionRecord {
    /// 創建新的生產記錄
    pub fn new(date: impl Into<String>, machine: Option<&str>, quantity: i64, m2: Decimal) -> Self {
        Self {
            date: date.into(),
            machine: machine.map(str::to_string),
            quantity,
            m2,
            ..Default::default()
        }
    }

    /// 尺寸描述（未填寬度/長度時為空字串）
    pub fn size_label(&self) -> String {
        if self.width.is_zero() && self.length.is_zero() {
            return String::new();
        }
        SizeDescriptor::new(Some(self.thickness), self.width, self.length).to_string()
    }
}

impl DatedRecord for ProductionRecord {
    fn date(&self) -> &str {
        &self.date
    }
}

/// 每日原料耗用記錄
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsumptionRecord {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub date: String,

    #[serde(default, alias = "PETKIM", deserialize_with = "lenient_decimal")]
    pub petkim: Decimal,

    #[serde(default, alias = "ESTOL", deserialize_with = "lenient_decimal")]
    pub estol: Decimal,

    #[serde(default, alias = "TALK", deserialize_with = "lenient_decimal")]
    pub talk: Decimal,

    #[serde(default, alias = "GAZ", deserialize_with = "lenient_decimal")]
    pub gaz: Decimal,

    #[serde(default, alias = "FIRE", deserialize_with = "lenient_decimal")]
    pub fire: Decimal,
}

impl ConsumptionRecord {
    /// 創建空的耗用記錄
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            ..Default::default()
        }
    }

    /// 建構器模式：設置原料耗用量
    pub fn with_amount(mut self, material: RawMaterial, amount: Decimal) -> Self {
        match material {
            RawMaterial::Petkim => self.petkim = amount,
            RawMaterial::Estol => self.estol = amount,
            RawMaterial::Talk => self.talk = amount,
            RawMaterial::Gaz => self.gaz = amount,
            RawMaterial::Fire => self.fire = amount,
        }
        self
    }

    /// 取得原料耗用量
    pub fn amount(&self, material: RawMaterial) -> Decimal {
        match material {
            RawMaterial::Petkim => self.petkim,
            RawMaterial::Estol => self.estol,
            RawMaterial::Talk => self.talk,
            RawMaterial::Gaz => self.gaz,
            RawMaterial::Fire => self.fire,
        }
    }
}

impl DatedRecord for ConsumptionRecord {
    fn date(&self) -> &str {
        &self.date
    }
}

/// 出貨類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShipmentKind {
    /// 一般產品
    #[default]
    Normal,
    /// 裁切產品
    #[serde(rename = "Kesilmiş")]
    Cut,
    #[serde(other)]
    Other,
}

impl ShipmentKind {
    pub fn label(&self) -> &'static str {
        match self {
            ShipmentKind::Normal => "Normal",
            ShipmentKind::Cut => "Kesilmiş",
            ShipmentKind::Other => "-",
        }
    }
}

/// 出貨記錄
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub date: String,

    /// 客戶
    #[serde(default, deserialize_with = "lenient_label")]
    pub customer: Option<String>,

    #[serde(default, rename = "type")]
    pub kind: ShipmentKind,

    /// 尺寸描述
    #[serde(default)]
    pub size: String,

    /// 面積（m²）
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub m2: Decimal,

    #[serde(default, deserialize_with = "lenient_integer")]
    pub quantity: i64,

    #[serde(default, deserialize_with = "lenient_label")]
    pub color: Option<String>,

    /// 出貨單號
    #[serde(default, deserialize_with = "lenient_label")]
    pub waybill: Option<String>,

    /// 車牌
    #[serde(default, deserialize_with = "lenient_label")]
    pub vehicle: Option<String>,

    #[serde(default, deserialize_with = "lenient_label")]
    pub driver: Option<String>,

    /// 出廠時間
    #[serde(default, deserialize_with = "lenient_label")]
    pub exit_time: Option<String>,
}

impl ShipmentRecord {
    /// 創建新的出貨記錄
    pub fn new(date: impl Into<String>, customer: Option<&str>, quantity: i64, m2: Decimal) -> Self {
        Self {
            date: date.into(),
            customer: customer.map(str::to_string),
            quantity,
            m2,
            ..Default::default()
        }
    }

    /// 解析尺寸字串
    pub fn size_descriptor(&self) -> Option<SizeDescriptor> {
        SizeDescriptor::parse(&self.size)
    }
}

impl DatedRecord for ShipmentRecord {
    fn date(&self) -> &str {
        &self.date
    }
}

/// 裁切單位名稱（記錄庫沿用的「片」字樣）
pub const SOURCE_UNIT_SUFFIX: &str = "adet";

/// 已提交的裁切記錄
///
/// 記錄庫內的舊資料可能缺欄位，解碼時缺少或 null 的欄位一律取空值。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CutProductRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub date: String,

    /// 原料描述
    #[serde(default, deserialize_with = "lenient_text")]
    pub material: String,

    /// 裁切尺寸描述
    #[serde(default, deserialize_with = "lenient_text")]
    pub cut_size: String,

    /// 裁切產出數量
    #[serde(default, deserialize_with = "lenient_integer")]
    pub quantity: i64,

    /// 耗用原料描述
    #[serde(default, deserialize_with = "lenient_text")]
    pub used_material: String,

    #[serde(default, deserialize_with = "lenient_text")]
    pub color: String,

    #[serde(default, deserialize_with = "lenient_text")]
    pub color_category: String,
}

impl CutProductRecord {
    /// 由原料、裁切需求與計算結果組成提交記錄
    pub fn committed(
        date: impl Into<String>,
        source: &SourceSheetSpec,
        cut: &CutRequest,
        required_source_units: u64,
        total_cut_pieces: u64,
    ) -> Self {
        let color = source.color.label().to_string();
        Self {
            id: None,
            date: date.into(),
            material: source.description(),
            cut_size: cut.description(),
            quantity: i64::try_from(total_cut_pieces).unwrap_or(i64::MAX),
            used_material: format!("{} {}", required_source_units, SOURCE_UNIT_SUFFIX),
            color: color.clone(),
            color_category: color,
        }
    }
}

impl DatedRecord for CutProductRecord {
    fn date(&self) -> &str {
        &self.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::SheetColor;
    use serde_json::json;

    #[test]
    fn test_decode_production_leniently() {
        let record: ProductionRecord = serde_json::from_value(json!({
            "id": "p-1",
            "date": "2025-01-05",
            "machine": "  ",
            "width": "100",
            "length": 300,
            "quantity": "12.0",
            "m2": "3600.5"
        }))
        .unwrap();

        assert_eq!(record.machine, None);
        assert_eq!(record.quantity, 12);
        assert_eq!(record.m2, Decimal::new(36005, 1));
        assert_eq!(record.size_label(), "100cm x 300m");
    }

    #[test]
    fn test_decode_consumption_aliases() {
        let record: ConsumptionRecord = serde_json::from_value(json!({
            "date": "2025-01-05",
            "PETKIM": 1200,
            "estol": "150.5",
            "talk": null,
            "fire": "x"
        }))
        .unwrap();

        assert_eq!(record.amount(RawMaterial::Petkim), Decimal::from(1200));
        assert_eq!(record.amount(RawMaterial::Estol), Decimal::new(1505, 1));
        assert_eq!(record.amount(RawMaterial::Talk), Decimal::ZERO);
        assert_eq!(record.amount(RawMaterial::Gaz), Decimal::ZERO);
        assert_eq!(record.amount(RawMaterial::Fire), Decimal::ZERO);
    }

    #[test]
    fn test_decode_shipment() {
        let record: ShipmentRecord = serde_json::from_value(json!({
            "date": "2025-01-07",
            "customer": "Acme",
            "type": "Kesilmiş",
            "size": "2mm x 100cm x 300m",
            "m2": 600,
            "quantity": "2",
            "waybill": "OZI2025000000001",
            "exitTime": "08:30"
        }))
        .unwrap();

        assert_eq!(record.kind, ShipmentKind::Cut);
        assert_eq!(record.quantity, 2);
        assert_eq!(record.exit_time.as_deref(), Some("08:30"));
        assert_eq!(
            record.size_descriptor().unwrap().area_per_piece(),
            Decimal::from(300)
        );

        let unknown: ShipmentRecord =
            serde_json::from_value(json!({ "date": "2025-01-07", "type": "Özel" })).unwrap();
        assert_eq!(unknown.kind, ShipmentKind::Other);
        assert_eq!(unknown.customer, None);
    }

    #[test]
    fn test_committed_cut_record() {
        let source = SourceSheetSpec::parse("1.8", "100", "3", SheetColor::Black);
        let cut = CutRequest::parse("1.8", "50", "150", "5");

        let record = CutProductRecord::committed("2025-01-05", &source, &cut, 2, 8);

        assert_eq!(record.material, "1.8mm x 100cm x 3m");
        assert_eq!(record.cut_size, "1.8mm x 50cm x 150cm");
        assert_eq!(record.quantity, 8);
        assert_eq!(record.used_material, "2 adet");
        assert_eq!(record.color, "Siyah");
        assert_eq!(record.color_category, "Siyah");

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["cutSize"], "1.8mm x 50cm x 150cm");
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_decode_cut_product_missing_fields() {
        let record: CutProductRecord = serde_json::from_value(json!({
            "id": "c-1",
            "date": "2025-01-08",
            "material": "2mm x 100cm x 300m",
            "cutSize": 50,
            "color": null
        }))
        .unwrap();

        assert_eq!(record.id.as_deref(), Some("c-1"));
        assert_eq!(record.cut_size, "50");
        assert_eq!(record.quantity, 0);
        assert_eq!(record.used_material, "");
        assert_eq!(record.color, "");
        assert_eq!(record.color_category, "");

        let empty: CutProductRecord = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty, CutProductRecord::default());
    }

    #[test]
    fn test_material_with_amount() {
        let record = ConsumptionRecord::new("2025-01-01")
            .with_amount(RawMaterial::Gaz, Decimal::from(40));
        assert_eq!(record.amount(RawMaterial::Gaz), Decimal::from(40));
        assert_eq!(RawMaterial::Gaz.key(), "gaz");
        assert_eq!(RawMaterial::ALL.len(), 5);
    }
}
