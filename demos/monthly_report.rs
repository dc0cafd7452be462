//! 月報示範
//!
//! 以記憶體記錄庫產生本月報表並輸出 CSV：
//!
//! ```text
//! RUST_LOG=debug cargo run --example monthly_report
//! ```

use anyhow::Context;
use chrono::{Datelike, Local};
use sar_pack::*;
use serde_json::json;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let today = Local::now().date_naive();
    let range = DateRange::current_month(today)?;
    let day = |d: u32| format!("{}-{:02}-{:02}", today.year(), today.month(), d);

    let store = Arc::new(
        MemoryRecordStore::new()
            .with_records(
                EntityKind::Production,
                vec![
                    json!({ "date": day(1), "machine": "EXT-1", "thickness": 2, "width": 100, "length": 300, "quantity": 12, "m2": 3600 }),
                    json!({ "date": day(2), "machine": "EXT-2", "thickness": 1.8, "width": 120, "length": 250, "quantity": 8, "m2": 2400 }),
                    json!({ "date": day(3), "quantity": 2, "m2": 600 }),
                ],
            )
            .with_records(
                EntityKind::Consumption,
                vec![
                    json!({ "date": day(1), "petkim": 1500, "estol": 60, "talk": 30, "gaz": 12, "fire": 4.5 }),
                    json!({ "date": day(2), "petkim": 1100, "estol": 40, "talk": 25, "gaz": 9, "fire": 3 }),
                ],
            )
            .with_records(
                EntityKind::Shipment,
                vec![json!({ "date": day(3), "customer": "Acme Packaging", "type": "Normal", "size": "2mm x 100cm x 300m", "quantity": 5, "m2": 1500, "waybill": "IRS-0042" })],
            ),
    );

    // 裁切一批：100cm x 300m 原料裁成 50cm x 137.5cm
    let cuts = CutService::new(store.clone());
    let source = SourceSheetSpec::parse("1.8", "100", "300", SheetColor::Natural);
    let request = CutRequest::parse("1.8", "50", "137.5", "1000");
    let preview = compute_yield(&source, &request);
    println!(
        "Yield: {} per roll, {} rolls, {} pieces ({} surplus)",
        preview.pieces_per_source_unit,
        preview.required_source_units,
        preview.total_cut_pieces,
        preview.surplus(request.quantity)
    );
    cuts.submit(&day(4), &source, &request).await?;

    let service = ReportService::new(store, ServiceConfig::default().with_fetch_retries(1));
    let document = service
        .generate(&range)
        .await
        .context("monthly report could not be generated")?;

    let renderer = CsvRenderer::new();
    let csv = renderer.render(&document)?;
    println!("--- {} ---", renderer.file_name(&document));
    println!("{}", String::from_utf8(csv)?);

    let export = service.export_cut_products().await?;
    println!("{}", String::from_utf8(renderer.render_section(&export)?)?);

    Ok(())
}
