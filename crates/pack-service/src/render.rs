//! 報表輸出
//!
//! 報表文件的排版交給輸出端；CSV 輸出可直接匯入試算表。

use csv::WriterBuilder;
use pack_core::{PackError, ReportDocument, ReportSection, Result, SectionBody};

/// 報表輸出介面
pub trait DocumentRenderer {
    /// 副檔名
    fn file_extension(&self) -> &'static str;

    /// 輸出整份報表
    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>>;

    /// 輸出單一區段（清單匯出）
    fn render_section(&self, section: &ReportSection) -> Result<Vec<u8>>;

    /// 建議檔名
    fn file_name(&self, document: &ReportDocument) -> String {
        format!("{}.{}", document.file_stem(), self.file_extension())
    }
}

/// CSV 輸出
///
/// 每個區段依序輸出標題列、欄位列（表格）與資料列，區段之間以空白列分隔。
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvRenderer;

impl CsvRenderer {
    pub fn new() -> Self {
        Self
    }

    fn write_section<W: std::io::Write>(
        writer: &mut csv::Writer<W>,
        section: &ReportSection,
    ) -> Result<()> {
        writer.write_record([section.title.as_str()]).map_err(render_error)?;

        match &section.body {
            SectionBody::Summary(entries) => {
                for entry in entries {
                    writer
                        .write_record([entry.label.as_str(), entry.value.as_str()])
                        .map_err(render_error)?;
                }
            }
            SectionBody::Table { columns, rows } => {
                writer.write_record(columns).map_err(render_error)?;
                for row in rows {
                    writer.write_record(row).map_err(render_error)?;
                }
            }
        }

        if let Some(truncation) = section.truncation {
            let note = format!(
                "Showing first {} of {} rows",
                truncation.shown, truncation.total
            );
            writer.write_record([note.as_str()]).map_err(render_error)?;
        }

        Ok(())
    }

    fn finish(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
        writer
            .into_inner()
            .map_err(|e| PackError::Render(e.to_string()))
    }
}

impl DocumentRenderer for CsvRenderer {
    fn file_extension(&self) -> &'static str {
        "csv"
    }

    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>> {
        let mut writer = WriterBuilder::new().flexible(true).from_writer(Vec::new());

        writer
            .write_record([document.company.as_str(), document.title.as_str()])
            .map_err(render_error)?;
        writer
            .write_record(["Period", document.range.to_string().as_str()])
            .map_err(render_error)?;

        for section in &document.sections {
            writer.write_record([""]).map_err(render_error)?;
            Self::write_section(&mut writer, section)?;
        }

        tracing::debug!("CSV 輸出完成，區段 {} 個", document.sections.len());
        Self::finish(writer)
    }

    fn render_section(&self, section: &ReportSection) -> Result<Vec<u8>> {
        let mut writer = WriterBuilder::new().flexible(true).from_writer(Vec::new());
        Self::write_section(&mut writer, section)?;
        Self::finish(writer)
    }
}

fn render_error(error: csv::Error) -> PackError {
    PackError::Render(error.to_string())
}
