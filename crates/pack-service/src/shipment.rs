//! 出貨登錄服務
//!
//! 表單欄位保留使用者輸入的文字，提交時才換算面積並組成出貨記錄；
//! 編輯時把已保存的尺寸字串拆回厚度/寬度/長度。

use pack_calc::AreaCalculator;
use pack_core::numeric::{format_plain, parse_integer};
use pack_core::{
    validate_date, PackError, Result, SheetColor, ShipmentKind, ShipmentRecord, SizeDescriptor,
};
use std::sync::Arc;

use crate::store::{decode_records, EntityKind, RecordStore};

/// 出貨表單
#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentForm {
    pub date: String,
    pub customer: String,
    pub kind: ShipmentKind,

    /// 厚度（mm，可空白）
    pub thickness: String,

    /// 寬度（cm）
    pub width: String,

    /// 長度（m）
    pub length: String,

    pub quantity: String,
    pub color: String,

    /// 出貨單號
    pub waybill: String,

    /// 車牌
    pub vehicle: String,
    pub driver: String,

    /// 出廠時間
    pub exit_time: String,
}

impl ShipmentForm {
    /// 空白表單（顏色預設為本色）
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            customer: String::new(),
            kind: ShipmentKind::Normal,
            thickness: String::new(),
            width: String::new(),
            length: String::new(),
            quantity: String::new(),
            color: SheetColor::Natural.label().to_string(),
            waybill: String::new(),
            vehicle: String::new(),
            driver: String::new(),
            exit_time: String::new(),
        }
    }

    /// 由已保存的記錄載入編輯表單
    ///
    /// 無法辨識的尺寸字串讓厚度/寬度/長度留白，數量為 0 時留白。
    pub fn from_record(record: &ShipmentRecord) -> Self {
        let (thickness, width, length) = match record.size_descriptor() {
            Some(SizeDescriptor {
                thickness_mm,
                width_cm,
                length_m,
            }) => (
                thickness_mm.map(format_plain).unwrap_or_default(),
                format_plain(width_cm),
                format_plain(length_m),
            ),
            None => (String::new(), String::new(), String::new()),
        };

        let text = |value: &Option<String>| value.clone().unwrap_or_default();

        Self {
            date: record.date.clone(),
            customer: text(&record.customer),
            kind: record.kind,
            thickness,
            width,
            length,
            quantity: if record.quantity == 0 {
                String::new()
            } else {
                record.quantity.to_string()
            },
            color: record
                .color
                .clone()
                .unwrap_or_else(|| SheetColor::Natural.label().to_string()),
            waybill: text(&record.waybill),
            vehicle: text(&record.vehicle),
            driver: text(&record.driver),
            exit_time: text(&record.exit_time),
        }
    }

    /// 目前輸入的面積（尺寸或數量不完整時為 None）
    pub fn area(&self) -> Option<pack_calc::ShipmentArea> {
        AreaCalculator::shipment_from_form(&self.thickness, &self.width, &self.length, &self.quantity)
    }

    /// 組成出貨記錄（不含 id）
    pub fn to_record(&self) -> Result<ShipmentRecord> {
        validate_date(&self.date)?;
        let area = self.area().ok_or(PackError::IncompleteShipment)?;

        Ok(ShipmentRecord {
            id: None,
            date: self.date.clone(),
            customer: non_blank(&self.customer),
            kind: self.kind,
            size: area.size.to_string(),
            m2: area.total_area,
            quantity: parse_integer(&self.quantity),
            color: non_blank(&self.color),
            waybill: non_blank(&self.waybill),
            vehicle: non_blank(&self.vehicle),
            driver: non_blank(&self.driver),
            exit_time: non_blank(&self.exit_time),
        })
    }
}

fn non_blank(text: &str) -> Option<String> {
    Some(text.trim())
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// 出貨登錄服務
pub struct ShipmentService {
    store: Arc<dyn RecordStore>,
}

impl ShipmentService {
    /// 創建新的出貨服務
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// 提交出貨表單
    ///
    /// `editing` 有值時更新該筆記錄，否則新增。
    pub async fn submit(&self, form: &ShipmentForm, editing: Option<&str>) -> Result<ShipmentRecord> {
        let record = form.to_record()?;
        let value = serde_json::to_value(&record).map_err(|e| PackError::Decode {
            entity: EntityKind::Shipment.path().to_string(),
            message: e.to_string(),
        })?;

        let saved = match editing {
            Some(id) => self.store.update(EntityKind::Shipment, id, value).await?,
            None => self.store.create(EntityKind::Shipment, value).await?,
        };
        let saved = decode_records::<ShipmentRecord>(EntityKind::Shipment, vec![saved])?
            .pop()
            .ok_or_else(|| PackError::Store("記錄庫未回傳出貨記錄".to_string()))?;

        tracing::info!(
            "出貨記錄已{}：{} {}，{} 片，{} m²",
            if editing.is_some() { "更新" } else { "新增" },
            saved.date,
            saved.size,
            saved.quantity,
            saved.m2
        );

        Ok(saved)
    }

    /// 載入既有記錄的編輯表單
    pub async fn edit_form(&self, id: &str) -> Result<ShipmentForm> {
        self.list()
            .await?
            .iter()
            .find(|record| record.id.as_deref() == Some(id))
            .map(ShipmentForm::from_record)
            .ok_or_else(|| PackError::Store(format!("{} 記錄不存在: {}", EntityKind::Shipment, id)))
    }

    /// 列出出貨記錄
    pub async fn list(&self) -> Result<Vec<ShipmentRecord>> {
        let values = self.store.list(EntityKind::Shipment).await?;
        decode_records(EntityKind::Shipment, values)
    }

    /// 刪除出貨記錄
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store.delete(EntityKind::Shipment, id).await?;
        tracing::info!("出貨記錄已刪除: {}", id);
        Ok(())
    }
}
