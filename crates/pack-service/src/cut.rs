//! 裁切提交服務

use pack_calc::YieldCalculator;
use pack_core::{
    validate_date, CutProductRecord, CutRequest, PackError, Result, SourceSheetSpec,
};
use std::sync::Arc;

use crate::store::{decode_records, EntityKind, RecordStore};

/// 裁切提交服務
pub struct CutService {
    store: Arc<dyn RecordStore>,
}

impl CutService {
    /// 創建新的裁切服務
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// 計算並提交裁切記錄
    ///
    /// 所需原料片數為 0 時拒絕提交。
    pub async fn submit(
        &self,
        date: &str,
        source: &SourceSheetSpec,
        cut: &CutRequest,
    ) -> Result<CutProductRecord> {
        validate_date(date)?;

        let result = YieldCalculator::compute(source, cut);
        if !result.is_feasible() {
            tracing::warn!(
                "裁切無法計算：原料 {}，裁切 {}",
                source.description(),
                cut.description()
            );
            return Err(PackError::CutNotFeasible);
        }

        let record = CutProductRecord::committed(
            date,
            source,
            cut,
            result.required_source_units,
            result.total_cut_pieces,
        );
        let value = serde_json::to_value(&record).map_err(|e| PackError::Decode {
            entity: EntityKind::CutProduct.path().to_string(),
            message: e.to_string(),
        })?;

        let created = self.store.create(EntityKind::CutProduct, value).await?;
        let mut committed = decode_records::<CutProductRecord>(EntityKind::CutProduct, vec![created])?;
        let committed = committed
            .pop()
            .ok_or_else(|| PackError::Store("記錄庫未回傳裁切記錄".to_string()))?;

        tracing::info!(
            "裁切記錄已提交：{} -> {}，產出 {} 片，耗用 {}",
            committed.material,
            committed.cut_size,
            committed.quantity,
            committed.used_material
        );

        Ok(committed)
    }

    /// 列出裁切記錄
    pub async fn list(&self) -> Result<Vec<CutProductRecord>> {
        let values = self.store.list(EntityKind::CutProduct).await?;
        decode_records(EntityKind::CutProduct, values)
    }

    /// 刪除裁切記錄
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store.delete(EntityKind::CutProduct, id).await?;
        tracing::info!("裁切記錄已刪除: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryRecordStore;
    use pack_core::SheetColor;

    fn source() -> SourceSheetSpec {
        SourceSheetSpec::parse("1.8", "100", "3", SheetColor::Black)
    }

    #[tokio::test]
    async fn test_submit_cut() {
        let store = Arc::new(MemoryRecordStore::new());
        let service = CutService::new(store.clone());
        let cut = CutRequest::parse("1.8", "50", "150", "5");

        let record = service.submit("2025-01-15", &source(), &cut).await.unwrap();

        assert!(record.id.is_some());
        assert_eq!(record.material, "1.8mm x 100cm x 3m");
        assert_eq!(record.cut_size, "1.8mm x 50cm x 150cm");
        assert_eq!(record.quantity, 8);
        assert_eq!(record.used_material, "2 adet");
        assert_eq!(record.color, "Siyah");
        assert_eq!(record.color_category, "Siyah");
        assert_eq!(store.count(EntityKind::CutProduct).await, 1);
    }

    #[tokio::test]
    async fn test_infeasible_cut_is_refused() {
        let store = Arc::new(MemoryRecordStore::new());
        let service = CutService::new(store.clone());
        let cut = CutRequest::parse("1.8", "120", "150", "5");

        let result = service.submit("2025-01-15", &source(), &cut).await;

        assert!(matches!(result, Err(PackError::CutNotFeasible)));
        assert_eq!(store.count(EntityKind::CutProduct).await, 0);
    }

    #[tokio::test]
    async fn test_invalid_date_is_refused() {
        let service = CutService::new(Arc::new(MemoryRecordStore::new()));
        let cut = CutRequest::parse("1.8", "50", "150", "5");

        let result = service.submit("15.01.2025", &source(), &cut).await;

        assert!(matches!(result, Err(PackError::InvalidDate(_))));
    }

    #[tokio::test]
    async fn test_list_tolerates_incomplete_records() {
        let store = MemoryRecordStore::new().with_records(
            EntityKind::CutProduct,
            vec![serde_json::json!({
                "id": "c-1",
                "date": "2025-01-08",
                "material": "2mm x 100cm x 300m",
                "cutSize": "2mm x 50cm x 150cm",
                "usedMaterial": "1 adet",
                "color": "Beyaz"
            })],
        );
        let service = CutService::new(Arc::new(store));

        let records = service.list().await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].quantity, 0);
        assert_eq!(records[0].color, "Beyaz");
        assert_eq!(records[0].color_category, "");
    }

    #[tokio::test]
    async fn test_delete_cut() {
        let service = CutService::new(Arc::new(MemoryRecordStore::new()));
        let cut = CutRequest::parse("1.8", "50", "150", "4");
        let record = service.submit("2025-01-15", &source(), &cut).await.unwrap();

        let id = record.id.unwrap();
        service.delete(&id).await.unwrap();

        assert!(service.list().await.unwrap().is_empty());
        assert!(service.delete(&id).await.is_err());
    }
}
