//! 報表產生服務
//!
//! 同時取得生產、耗用、出貨與庫存四份列表，全部成功後才進行彙總。
//! 任何一份取得失敗，整份報表失敗，不輸出部分報表。

use pack_calc::{RecordSet, ReportAggregator};
use pack_core::{
    ConsumptionRecord, CutProductRecord, DateRange, PackError, ProductionRecord, ReportDocument,
    ReportSection, Result, ShipmentRecord, StockItem, StockSnapshot,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::store::{decode_records, EntityKind, RecordStore};

/// 報表產生服務
pub struct ReportService {
    store: Arc<dyn RecordStore>,
    config: ServiceConfig,
    aggregator: ReportAggregator,
}

impl ReportService {
    /// 創建新的報表服務
    pub fn new(store: Arc<dyn RecordStore>, config: ServiceConfig) -> Self {
        let aggregator = ReportAggregator::new(config.report.clone());
        Self {
            store,
            config,
            aggregator,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// 產生期間報表
    pub async fn generate(&self, range: &DateRange) -> Result<ReportDocument> {
        tracing::info!("開始產生報表 {}", range);
        let start_time = std::time::Instant::now();

        let records = self.fetch_all().await.map_err(|e| {
            tracing::error!("報表產生失敗 {}: {}", range, e);
            PackError::ReportFailed(e.to_string())
        })?;

        let document = self.aggregator.build(&records, range);

        tracing::info!("報表產生完成 {}，耗時 {:?}", range, start_time.elapsed());
        Ok(document)
    }

    /// 同時取得四份列表
    async fn fetch_all(&self) -> Result<RecordSet> {
        let (productions, consumptions, shipments, stock) = futures::try_join!(
            self.fetch::<ProductionRecord>(EntityKind::Production),
            self.fetch::<ConsumptionRecord>(EntityKind::Consumption),
            self.fetch::<ShipmentRecord>(EntityKind::Shipment),
            self.fetch::<StockItem>(EntityKind::Stock),
        )?;

        Ok(RecordSet::new()
            .with_productions(productions)
            .with_consumptions(consumptions)
            .with_shipments(shipments)
            .with_stock(StockSnapshot::new(stock)))
    }

    /// 裁切產品清單匯出區段
    pub async fn export_cut_products(&self) -> Result<ReportSection> {
        let records = self.fetch::<CutProductRecord>(EntityKind::CutProduct).await?;
        Ok(self.aggregator.cut_product_export(&records))
    }

    /// 出貨清單匯出區段
    pub async fn export_shipments(&self) -> Result<ReportSection> {
        let records = self.fetch::<ShipmentRecord>(EntityKind::Shipment).await?;
        Ok(self.aggregator.shipment_export(&records))
    }

    async fn fetch<T: DeserializeOwned>(&self, kind: EntityKind) -> Result<Vec<T>> {
        let values = self.list_with_retry(kind).await?;
        tracing::debug!("取得 {} 記錄 {} 筆", kind, values.len());
        decode_records(kind, values)
    }

    /// 取得列表，失敗時依配置重試（解碼錯誤不重試）
    async fn list_with_retry(&self, kind: EntityKind) -> Result<Vec<Value>> {
        let mut attempt = 0;
        loop {
            match self.store.list(kind).await {
                Ok(values) => return Ok(values),
                Err(e) if attempt < self.config.fetch_retries => {
                    attempt += 1;
                    tracing::warn!(
                        "取得 {} 記錄失敗，第 {}/{} 次重試: {}",
                        kind,
                        attempt,
                        self.config.fetch_retries,
                        e
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryRecordStore;
    use async_trait::async_trait;
    use pack_core::SectionKind;
    use serde_json::json;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn seeded_store() -> MemoryRecordStore {
        MemoryRecordStore::new()
            .with_records(
                EntityKind::Production,
                vec![
                    json!({ "date": "2025-01-05", "machine": "EXT-1", "quantity": 10, "m2": "300" }),
                    json!({ "date": "2025-02-01", "machine": "EXT-1", "quantity": 99, "m2": "999" }),
                ],
            )
            .with_records(
                EntityKind::Consumption,
                vec![json!({ "date": "2025-01-05", "petkim": 800, "TALK": "25.5" })],
            )
            .with_records(
                EntityKind::Shipment,
                vec![json!({ "date": "2025-01-06", "customer": "Acme", "type": "Normal", "quantity": 4, "m2": 120 })],
            )
            .with_records(
                EntityKind::Stock,
                vec![json!({ "size": "100cm x 300m", "quantity": 6, "m2": 1800 })],
            )
    }

    fn january() -> DateRange {
        DateRange::new("2025-01-01", "2025-01-31").unwrap()
    }

    /// 前幾次取得失敗的記錄庫
    struct FlakyStore {
        inner: MemoryRecordStore,
        failing_kind: EntityKind,
        failures_left: AtomicU32,
    }

    #[async_trait]
    impl RecordStore for FlakyStore {
        async fn list(&self, kind: EntityKind) -> Result<Vec<Value>> {
            if kind == self.failing_kind
                && self
                    .failures_left
                    .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                    .is_ok()
            {
                return Err(PackError::Store("connection reset".to_string()));
            }
            self.inner.list(kind).await
        }

        async fn create(&self, kind: EntityKind, record: Value) -> Result<Value> {
            self.inner.create(kind, record).await
        }

        async fn update(&self, kind: EntityKind, id: &str, record: Value) -> Result<Value> {
            self.inner.update(kind, id, record).await
        }

        async fn delete(&self, kind: EntityKind, id: &str) -> Result<()> {
            self.inner.delete(kind, id).await
        }
    }

    fn flaky(failures: u32) -> Arc<FlakyStore> {
        Arc::new(FlakyStore {
            inner: seeded_store(),
            failing_kind: EntityKind::Shipment,
            failures_left: AtomicU32::new(failures),
        })
    }

    #[tokio::test]
    async fn test_generate_report() {
        let service = ReportService::new(Arc::new(seeded_store()), ServiceConfig::default());

        let document = service.generate(&january()).await.unwrap();

        assert_eq!(document.sections.len(), 7);
        let summary = document.section(SectionKind::Summary).unwrap();
        assert_eq!(summary.entry("Production quantity"), Some("10"));
        assert_eq!(summary.entry("Raw material used (kg)"), Some("825.50"));

        let stock = document.section(SectionKind::StockSummary).unwrap();
        assert_eq!(stock.entry("Remaining quantity"), Some("6"));
        assert_eq!(stock.entry("On-hand quantity"), Some("6"));
    }

    #[tokio::test]
    async fn test_failed_fetch_fails_whole_report() {
        let service = ReportService::new(flaky(1), ServiceConfig::default());

        let result = service.generate(&january()).await;

        assert!(matches!(result, Err(PackError::ReportFailed(_))));
    }

    #[tokio::test]
    async fn test_retry_recovers_fetch() {
        let service =
            ReportService::new(flaky(2), ServiceConfig::default().with_fetch_retries(2));

        let document = service.generate(&january()).await.unwrap();

        let summary = document.section(SectionKind::Summary).unwrap();
        assert_eq!(summary.entry("Shipment quantity"), Some("4"));
    }

    #[tokio::test]
    async fn test_retries_exhausted() {
        let service =
            ReportService::new(flaky(3), ServiceConfig::default().with_fetch_retries(2));

        assert!(service.generate(&january()).await.is_err());
    }

    #[tokio::test]
    async fn test_undecodable_record_fails_report() {
        let store = seeded_store().with_records(EntityKind::Consumption, vec![json!(42)]);
        let service = ReportService::new(Arc::new(store), ServiceConfig::default());

        let result = service.generate(&january()).await;

        match result {
            Err(PackError::ReportFailed(message)) => assert!(message.contains("consumption")),
            other => panic!("unexpected result: {:?}", other.map(|d| d.sections.len())),
        }
    }

    #[tokio::test]
    async fn test_export_shipments() {
        let service = ReportService::new(Arc::new(seeded_store()), ServiceConfig::default());

        let section = service.export_shipments().await.unwrap();

        assert_eq!(section.kind, SectionKind::Export);
        assert_eq!(section.rows().len(), 1);
        assert_eq!(section.rows()[0][1], "Acme");
    }
}
