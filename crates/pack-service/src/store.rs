//! 記錄庫介面
//!
//! 記錄庫是外部 REST 服務，這裡只定義存取介面與測試/示範用的記憶體實作。
//! 記錄以 JSON 值傳遞，解碼交給 `decode_records`。

use async_trait::async_trait;
use pack_core::{PackError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use tokio::sync::RwLock;

/// 記錄類型（對應記錄庫的資源路徑）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Production,
    Consumption,
    Shipment,
    Stock,
    CutProduct,
}

impl EntityKind {
    /// 資源路徑
    pub fn path(&self) -> &'static str {
        match self {
            EntityKind::Production => "production",
            EntityKind::Consumption => "consumption",
            EntityKind::Shipment => "shipments",
            EntityKind::Stock => "stock",
            EntityKind::CutProduct => "cutProducts",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// 記錄庫存取介面
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// 列出全部記錄
    async fn list(&self, kind: EntityKind) -> Result<Vec<Value>>;

    /// 新增記錄，回傳含 id 的記錄
    async fn create(&self, kind: EntityKind, record: Value) -> Result<Value>;

    /// 更新記錄
    async fn update(&self, kind: EntityKind, id: &str, record: Value) -> Result<Value>;

    /// 刪除記錄
    async fn delete(&self, kind: EntityKind, id: &str) -> Result<()>;
}

/// 解碼記錄列表
pub fn decode_records<T: DeserializeOwned>(kind: EntityKind, values: Vec<Value>) -> Result<Vec<T>> {
    values
        .into_iter()
        .map(|value| {
            serde_json::from_value(value).map_err(|e| PackError::Decode {
                entity: kind.path().to_string(),
                message: e.to_string(),
            })
        })
        .collect()
}

fn record_id(record: &Value) -> Option<String> {
    match record.get("id")? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// 記憶體記錄庫
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: RwLock<HashMap<EntityKind, Vec<Value>>>,
}

impl MemoryRecordStore {
    /// 創建空的記錄庫
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：預先放入記錄
    pub fn with_records(mut self, kind: EntityKind, records: Vec<Value>) -> Self {
        self.records.get_mut().entry(kind).or_default().extend(records);
        self
    }

    /// 記錄筆數
    pub async fn count(&self, kind: EntityKind) -> usize {
        self.records.read().await.get(&kind).map_or(0, Vec::len)
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn list(&self, kind: EntityKind) -> Result<Vec<Value>> {
        Ok(self.records.read().await.get(&kind).cloned().unwrap_or_default())
    }

    async fn create(&self, kind: EntityKind, mut record: Value) -> Result<Value> {
        let Value::Object(fields) = &mut record else {
            return Err(PackError::Store(format!("{}: 記錄必須是物件", kind)));
        };
        if fields.get("id").map_or(true, Value::is_null) {
            fields.insert(
                "id".to_string(),
                Value::String(uuid::Uuid::new_v4().to_string()),
            );
        }

        self.records
            .write()
            .await
            .entry(kind)
            .or_default()
            .push(record.clone());

        tracing::debug!("新增 {} 記錄", kind);
        Ok(record)
    }

    async fn update(&self, kind: EntityKind, id: &str, mut record: Value) -> Result<Value> {
        let Value::Object(fields) = &mut record else {
            return Err(PackError::Store(format!("{}: 記錄必須是物件", kind)));
        };
        fields.insert("id".to_string(), Value::String(id.to_string()));

        let mut records = self.records.write().await;
        let slot = records
            .get_mut(&kind)
            .and_then(|list| list.iter_mut().find(|r| record_id(r).as_deref() == Some(id)))
            .ok_or_else(|| PackError::Store(format!("{} 記錄不存在: {}", kind, id)))?;
        *slot = record.clone();

        Ok(record)
    }

    async fn delete(&self, kind: EntityKind, id: &str) -> Result<()> {
        let mut records = self.records.write().await;
        let list = records
            .get_mut(&kind)
            .ok_or_else(|| PackError::Store(format!("{} 記錄不存在: {}", kind, id)))?;

        let before = list.len();
        list.retain(|r| record_id(r).as_deref() != Some(id));
        if list.len() == before {
            return Err(PackError::Store(format!("{} 記錄不存在: {}", kind, id)));
        }

        tracing::debug!("刪除 {} 記錄 {}", kind, id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pack_core::ProductionRecord;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_assigns_id() {
        let store = MemoryRecordStore::new();

        let created = store
            .create(EntityKind::Shipment, json!({ "date": "2025-01-01" }))
            .await
            .unwrap();

        assert!(record_id(&created).is_some());
        assert_eq!(store.count(EntityKind::Shipment).await, 1);
    }

    #[tokio::test]
    async fn test_create_replaces_null_id() {
        let store = MemoryRecordStore::new();

        let created = store
            .create(EntityKind::Shipment, json!({ "id": null, "date": "2025-01-01" }))
            .await
            .unwrap();

        assert!(record_id(&created).is_some());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = MemoryRecordStore::new().with_records(
            EntityKind::Production,
            vec![json!({ "id": 7, "date": "2025-01-01", "quantity": 1 })],
        );

        store
            .update(EntityKind::Production, "7", json!({ "date": "2025-01-02", "quantity": 3 }))
            .await
            .unwrap();
        let listed = store.list(EntityKind::Production).await.unwrap();
        assert_eq!(listed[0]["quantity"], 3);

        store.delete(EntityKind::Production, "7").await.unwrap();
        assert_eq!(store.count(EntityKind::Production).await, 0);

        assert!(matches!(
            store.delete(EntityKind::Production, "7").await,
            Err(PackError::Store(_))
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_non_object() {
        let store = MemoryRecordStore::new();
        let result = store.create(EntityKind::Stock, json!([1, 2, 3])).await;
        assert!(matches!(result, Err(PackError::Store(_))));
    }

    #[test]
    fn test_decode_records() {
        let values = vec![
            json!({ "date": "2025-01-01", "machine": "EXT-1", "quantity": "4", "m2": "12.5" }),
            json!({ "date": "2025-01-02", "quantity": null }),
        ];

        let records: Vec<ProductionRecord> =
            decode_records(EntityKind::Production, values).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].quantity, 4);
        assert_eq!(records[1].quantity, 0);
        assert_eq!(records[1].machine, None);
    }

    #[test]
    fn test_decode_error_names_entity() {
        let result: Result<Vec<ProductionRecord>> =
            decode_records(EntityKind::Production, vec![json!("not a record")]);

        match result {
            Err(PackError::Decode { entity, .. }) => assert_eq!(entity, "production"),
            other => panic!("unexpected result: {:?}", other.map(|r| r.len())),
        }
    }
}
