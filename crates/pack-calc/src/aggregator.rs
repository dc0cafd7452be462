//! 期間報表彙總器
//!
//! 將已取得的生產、耗用、出貨記錄與庫存快照依期間篩選後，
//! 彙總成有序區段的報表文件。彙總器不做任何 I/O，也不負責排版。

use pack_core::numeric::{format_fixed, saturating_sum_decimal, saturating_sum_integer};
use pack_core::{
    ConsumptionRecord, CutProductRecord, DateRange, ProductionRecord, ReportConfig,
    ReportDocument, ReportSection, SectionKind, ShipmentRecord, StockSnapshot, Truncation,
};
use rust_decimal::Decimal;

use crate::filtering::PeriodFilter;
use crate::grouping::{GroupTotal, GroupingCalculator};
use crate::materials::MaterialCalculator;
use crate::stock::StockCalculator;
use crate::PeriodAggregates;

/// 報表區段標題與欄位名稱
pub mod labels {
    pub const SUMMARY: &str = "Summary";
    pub const MATERIAL_TOTALS: &str = "Raw Material Consumption";
    pub const PRODUCTION_BY_MACHINE: &str = "Production by Machine";
    pub const PRODUCTION_DETAIL: &str = "Production Detail";
    pub const SHIPMENT_BY_CUSTOMER: &str = "Shipments by Customer";
    pub const SHIPMENT_DETAIL: &str = "Shipment Detail";
    pub const STOCK_SUMMARY: &str = "Stock Summary";
    pub const CUT_PRODUCT_EXPORT: &str = "Cut Products";
    pub const SHIPMENT_EXPORT: &str = "Shipments";

    /// 合計列標籤
    pub const TOTAL: &str = "TOTAL";

    pub const PERIOD: &str = "Period";
    pub const PRODUCTION_RECORDS: &str = "Production records";
    pub const PRODUCTION_QUANTITY: &str = "Production quantity";
    pub const PRODUCTION_AREA: &str = "Production area (m²)";
    pub const CONSUMPTION_DAYS: &str = "Consumption days";
    pub const CONSUMPTION_TOTAL: &str = "Raw material used (kg)";
    pub const SHIPMENT_RECORDS: &str = "Shipment records";
    pub const SHIPMENT_QUANTITY: &str = "Shipment quantity";
    pub const SHIPMENT_AREA: &str = "Shipment area (m²)";

    pub const PRODUCED_QUANTITY: &str = "Produced quantity";
    pub const SHIPPED_QUANTITY: &str = "Shipped quantity";
    pub const REMAINING_QUANTITY: &str = "Remaining quantity";
    pub const PRODUCED_AREA: &str = "Produced area (m²)";
    pub const SHIPPED_AREA: &str = "Shipped area (m²)";
    pub const REMAINING_AREA: &str = "Remaining area (m²)";
    pub const ON_HAND_QUANTITY: &str = "On-hand quantity";
    pub const ON_HAND_AREA: &str = "On-hand area (m²)";

    pub const DATE: &str = "Date";
    pub const MACHINE: &str = "Machine";
    pub const CUSTOMER: &str = "Customer";
    pub const MATERIAL: &str = "Material";
    pub const RECORDS: &str = "Records";
    pub const QUANTITY: &str = "Quantity";
    pub const AREA: &str = "Area (m²)";
    pub const SIZE: &str = "Size";
    pub const COLOR: &str = "Color";
    pub const TYPE: &str = "Type";
    pub const WAYBILL: &str = "Waybill";
    pub const TOTAL_KG: &str = "Total (kg)";
    pub const DAILY_AVERAGE_KG: &str = "Daily average (kg)";
    pub const SOURCE_MATERIAL: &str = "Source material";
    pub const CUT_SIZE: &str = "Cut size";
    pub const CUT_QUANTITY: &str = "Cut quantity";
    pub const USED_MATERIAL: &str = "Used material";
}

/// 報表輸入記錄
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    pub productions: Vec<ProductionRecord>,
    pub consumptions: Vec<ConsumptionRecord>,
    pub shipments: Vec<ShipmentRecord>,

    /// 庫存快照（不依期間篩選）
    pub stock: StockSnapshot,
}

impl RecordSet {
    /// 創建空的記錄集
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置生產記錄
    pub fn with_productions(mut self, productions: Vec<ProductionRecord>) -> Self {
        self.productions = productions;
        self
    }

    /// 建構器模式：設置耗用記錄
    pub fn with_consumptions(mut self, consumptions: Vec<ConsumptionRecord>) -> Self {
        self.consumptions = consumptions;
        self
    }

    /// 建構器模式：設置出貨記錄
    pub fn with_shipments(mut self, shipments: Vec<ShipmentRecord>) -> Self {
        self.shipments = shipments;
        self
    }

    /// 建構器模式：設置庫存快照
    pub fn with_stock(mut self, stock: StockSnapshot) -> Self {
        self.stock = stock;
        self
    }
}

/// 期間內的記錄（借用自 RecordSet，維持原始順序）
struct PeriodRecords<'a> {
    productions: Vec<&'a ProductionRecord>,
    consumptions: Vec<&'a ConsumptionRecord>,
    shipments: Vec<&'a ShipmentRecord>,
}

impl<'a> PeriodRecords<'a> {
    fn select(records: &'a RecordSet, range: &DateRange) -> Self {
        Self {
            productions: PeriodFilter::filter(&records.productions, range),
            consumptions: PeriodFilter::filter(&records.consumptions, range),
            shipments: PeriodFilter::filter(&records.shipments, range),
        }
    }
}

/// 期間報表彙總器
#[derive(Debug, Clone, Default)]
pub struct ReportAggregator {
    config: ReportConfig,
}

impl ReportAggregator {
    /// 創建新的彙總器
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// 計算期間彙總數值（不產生文件）
    pub fn aggregate(&self, records: &RecordSet, range: &DateRange) -> PeriodAggregates {
        let period = PeriodRecords::select(records, range);
        self.aggregate_period(&period, &records.stock, range)
    }

    fn aggregate_period(
        &self,
        period: &PeriodRecords<'_>,
        stock: &StockSnapshot,
        range: &DateRange,
    ) -> PeriodAggregates {
        let unknown = self.config.unknown_label.as_str();

        tracing::debug!("Step 2: 原料耗用合計");
        let materials = MaterialCalculator::calculate(&period.consumptions);

        tracing::debug!("Step 3: 機台/客戶分組");
        let production_by_machine =
            GroupingCalculator::production_by_machine(&period.productions, unknown);
        let shipment_by_customer =
            GroupingCalculator::shipment_by_customer(&period.shipments, unknown);
        tracing::debug!(
            "機台數量: {}，客戶數量: {}",
            production_by_machine.len(),
            shipment_by_customer.len()
        );

        tracing::debug!("Step 4: 庫存結餘");
        let stock = StockCalculator::calculate(&period.productions, &period.shipments, stock);

        PeriodAggregates {
            range: range.clone(),
            production_count: period.productions.len(),
            production_quantity: stock.produced_quantity,
            production_area: stock.produced_area,
            shipment_count: period.shipments.len(),
            shipment_quantity: stock.shipped_quantity,
            shipment_area: stock.shipped_area,
            materials,
            production_by_machine,
            shipment_by_customer,
            stock,
        }
    }

    /// 產生期間報表文件
    ///
    /// 區段順序固定：摘要、原料耗用、機台生產、生產明細、客戶出貨、出貨明細、庫存摘要。
    pub fn build(&self, records: &RecordSet, range: &DateRange) -> ReportDocument {
        tracing::info!(
            "開始彙總報表 {}：生產 {} 筆，耗用 {} 筆，出貨 {} 筆，庫存 {} 項",
            range,
            records.productions.len(),
            records.consumptions.len(),
            records.shipments.len(),
            records.stock.items.len()
        );

        let start_time = std::time::Instant::now();

        // Step 1: 依期間篩選
        tracing::debug!("Step 1: 篩選期間記錄");
        let period = PeriodRecords::select(records, range);
        tracing::debug!(
            "期間內記錄：生產 {} 筆，耗用 {} 筆，出貨 {} 筆",
            period.productions.len(),
            period.consumptions.len(),
            period.shipments.len()
        );

        let aggregates = self.aggregate_period(&period, &records.stock, range);

        // Step 5: 組合區段
        tracing::debug!("Step 5: 組合報表區段");
        let mut document =
            ReportDocument::new(&self.config.title, &self.config.company_name, range.clone());
        document.add_section(self.summary_section(&aggregates));
        document.add_section(self.material_section(&aggregates));
        document.add_section(self.group_section(
            SectionKind::ProductionByMachine,
            labels::PRODUCTION_BY_MACHINE,
            labels::MACHINE,
            &aggregates.production_by_machine,
        ));
        document.add_section(self.production_detail_section(&period.productions));
        document.add_section(self.group_section(
            SectionKind::ShipmentByCustomer,
            labels::SHIPMENT_BY_CUSTOMER,
            labels::CUSTOMER,
            &aggregates.shipment_by_customer,
        ));
        document.add_section(self.shipment_detail_section(&period.shipments));
        document.add_section(self.stock_section(&aggregates));

        tracing::info!(
            "報表彙總完成，區段 {} 個，耗時 {:?}",
            document.sections.len(),
            start_time.elapsed()
        );

        document
    }

    /// 裁切產品清單匯出（不篩選、不截斷）
    pub fn cut_product_export(&self, records: &[CutProductRecord]) -> ReportSection {
        let mut section = ReportSection::table(
            SectionKind::Export,
            labels::CUT_PRODUCT_EXPORT,
            [
                labels::DATE,
                labels::SOURCE_MATERIAL,
                labels::CUT_SIZE,
                labels::CUT_QUANTITY,
                labels::USED_MATERIAL,
                labels::COLOR,
            ],
        );
        for record in records {
            section.push_row(vec![
                record.date.clone(),
                record.material.clone(),
                record.cut_size.clone(),
                record.quantity.to_string(),
                record.used_material.clone(),
                record.color.clone(),
            ]);
        }
        section
    }

    /// 出貨清單匯出（不篩選、不截斷）
    pub fn shipment_export(&self, records: &[ShipmentRecord]) -> ReportSection {
        let mut section = ReportSection::table(
            SectionKind::Export,
            labels::SHIPMENT_EXPORT,
            [
                labels::DATE,
                labels::CUSTOMER,
                labels::TYPE,
                labels::SIZE,
                labels::AREA,
                labels::QUANTITY,
                labels::COLOR,
                labels::WAYBILL,
            ],
        );
        for record in records {
            section.push_row(vec![
                record.date.clone(),
                text_or_dash(record.customer.as_deref()),
                record.kind.label().to_string(),
                record.size.clone(),
                self.fixed(record.m2),
                record.quantity.to_string(),
                text_or_dash(record.color.as_deref()),
                text_or_dash(record.waybill.as_deref()),
            ]);
        }
        section
    }

    fn summary_section(&self, aggregates: &PeriodAggregates) -> ReportSection {
        ReportSection::summary(SectionKind::Summary, labels::SUMMARY)
            .with_entry(labels::PERIOD, aggregates.range.to_string())
            .with_entry(labels::PRODUCTION_RECORDS, aggregates.production_count.to_string())
            .with_entry(labels::PRODUCTION_QUANTITY, aggregates.production_quantity.to_string())
            .with_entry(labels::PRODUCTION_AREA, self.fixed(aggregates.production_area))
            .with_entry(labels::CONSUMPTION_DAYS, aggregates.materials.days.to_string())
            .with_entry(labels::CONSUMPTION_TOTAL, self.fixed(aggregates.materials.grand_total()))
            .with_entry(labels::SHIPMENT_RECORDS, aggregates.shipment_count.to_string())
            .with_entry(labels::SHIPMENT_QUANTITY, aggregates.shipment_quantity.to_string())
            .with_entry(labels::SHIPMENT_AREA, self.fixed(aggregates.shipment_area))
    }

    fn material_section(&self, aggregates: &PeriodAggregates) -> ReportSection {
        let mut section = ReportSection::table(
            SectionKind::MaterialTotals,
            labels::MATERIAL_TOTALS,
            [labels::MATERIAL, labels::TOTAL_KG, labels::DAILY_AVERAGE_KG],
        );

        for total in &aggregates.materials.totals {
            section.push_row(vec![
                total.material.label().to_string(),
                self.fixed(total.total),
                self.fixed(total.daily_average),
            ]);
        }
        section.push_row(vec![
            labels::TOTAL.to_string(),
            self.fixed(aggregates.materials.grand_total()),
            self.fixed(aggregates.materials.grand_average()),
        ]);

        section
    }

    fn group_section(
        &self,
        kind: SectionKind,
        title: &str,
        key_column: &str,
        groups: &[GroupTotal],
    ) -> ReportSection {
        let mut section = ReportSection::table(
            kind,
            title,
            [key_column, labels::RECORDS, labels::QUANTITY, labels::AREA],
        );

        for group in groups {
            section.push_row(vec![
                group.label.clone(),
                group.record_count.to_string(),
                group.quantity.to_string(),
                self.fixed(group.area),
            ]);
        }

        let records: usize = groups.iter().map(|g| g.record_count).sum();
        let quantity = saturating_sum_integer(groups.iter().map(|g| g.quantity));
        let area = saturating_sum_decimal(groups.iter().map(|g| g.area));
        section.push_row(vec![
            labels::TOTAL.to_string(),
            records.to_string(),
            quantity.to_string(),
            self.fixed(area),
        ]);

        section
    }

    fn production_detail_section(&self, productions: &[&ProductionRecord]) -> ReportSection {
        let (shown, truncation) = self.cap(productions);
        let mut section = ReportSection::table(
            SectionKind::ProductionDetail,
            detail_title(labels::PRODUCTION_DETAIL, truncation),
            [
                labels::DATE,
                labels::MACHINE,
                labels::SIZE,
                labels::COLOR,
                labels::QUANTITY,
                labels::AREA,
            ],
        )
        .with_truncation(truncation);

        for record in shown {
            section.push_row(vec![
                record.date.clone(),
                self.label_or_unknown(record.machine.as_deref()),
                record.size_label(),
                text_or_dash(record.color.as_deref()),
                record.quantity.to_string(),
                self.fixed(record.m2),
            ]);
        }

        section
    }

    fn shipment_detail_section(&self, shipments: &[&ShipmentRecord]) -> ReportSection {
        let (shown, truncation) = self.cap(shipments);
        let mut section = ReportSection::table(
            SectionKind::ShipmentDetail,
            detail_title(labels::SHIPMENT_DETAIL, truncation),
            [
                labels::DATE,
                labels::CUSTOMER,
                labels::TYPE,
                labels::SIZE,
                labels::QUANTITY,
                labels::AREA,
                labels::WAYBILL,
            ],
        )
        .with_truncation(truncation);

        for record in shown {
            section.push_row(vec![
                record.date.clone(),
                self.label_or_unknown(record.customer.as_deref()),
                record.kind.label().to_string(),
                record.size.clone(),
                record.quantity.to_string(),
                self.fixed(record.m2),
                text_or_dash(record.waybill.as_deref()),
            ]);
        }

        section
    }

    fn stock_section(&self, aggregates: &PeriodAggregates) -> ReportSection {
        let stock = &aggregates.stock;
        let mut section = ReportSection::summary(SectionKind::StockSummary, labels::STOCK_SUMMARY)
            .with_entry(labels::PRODUCED_QUANTITY, stock.produced_quantity.to_string())
            .with_entry(labels::SHIPPED_QUANTITY, stock.shipped_quantity.to_string())
            .with_entry(labels::REMAINING_QUANTITY, stock.remaining_quantity.to_string())
            .with_entry(labels::PRODUCED_AREA, self.fixed(stock.produced_area))
            .with_entry(labels::SHIPPED_AREA, self.fixed(stock.shipped_area))
            .with_entry(labels::REMAINING_AREA, self.fixed(stock.remaining_area));

        if let Some(quantity) = stock.on_hand_quantity {
            section.push_entry(labels::ON_HAND_QUANTITY, quantity.to_string());
        }
        if let Some(area) = stock.on_hand_area {
            section.push_entry(labels::ON_HAND_AREA, self.fixed(area));
        }

        section
    }

    /// 明細列數上限
    fn cap<'r, T>(&self, rows: &'r [T]) -> (&'r [T], Option<Truncation>) {
        match self.config.detail_row_cap {
            Some(cap) if rows.len() > cap => (
                &rows[..cap],
                Some(Truncation {
                    shown: cap,
                    total: rows.len(),
                }),
            ),
            _ => (rows, None),
        }
    }

    fn fixed(&self, value: Decimal) -> String {
        format_fixed(value, self.config.decimal_places)
    }

    fn label_or_unknown(&self, label: Option<&str>) -> String {
        label
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .unwrap_or(self.config.unknown_label.as_str())
            .to_string()
    }
}

fn detail_title(title: &str, truncation: Option<Truncation>) -> String {
    match truncation {
        Some(t) => format!("{} (first {} of {})", title, t.shown, t.total),
        None => title.to_string(),
    }
}

fn text_or_dash(text: Option<&str>) -> String {
    text.unwrap_or("-").to_string()
}

/// 以預設配置產生期間報表
pub fn build_report(records: &RecordSet, range: &DateRange) -> ReportDocument {
    ReportAggregator::default().build(records, range)
}
