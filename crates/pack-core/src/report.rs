//! 報表文件模型
//!
//! 報表由有序的區段組成，每個區段是鍵值摘要或表格。
//! 所有儲存格都已格式化為字串，輸出端不再做四捨五入。

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::period::DateRange;

/// 區段類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKind {
    /// 期間摘要
    Summary,
    /// 原料耗用合計
    MaterialTotals,
    /// 各機台生產
    ProductionByMachine,
    /// 生產明細
    ProductionDetail,
    /// 各客戶出貨
    ShipmentByCustomer,
    /// 出貨明細
    ShipmentDetail,
    /// 庫存摘要
    StockSummary,
    /// 清單匯出
    Export,
}

/// 摘要項目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub label: String,
    pub value: String,
}

/// 區段內容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionBody {
    /// 鍵值摘要
    Summary(Vec<SummaryEntry>),
    /// 表格
    Table {
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

/// 明細截斷資訊
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Truncation {
    /// 顯示列數
    pub shown: usize,
    /// 原始列數
    pub total: usize,
}

/// 報表區段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSection {
    pub kind: SectionKind,
    pub title: String,
    pub body: SectionBody,

    /// 明細被截斷時記錄顯示/原始列數
    pub truncation: Option<Truncation>,
}

impl ReportSection {
    /// 創建鍵值摘要區段
    pub fn summary(kind: SectionKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            body: SectionBody::Summary(Vec::new()),
            truncation: None,
        }
    }

    /// 創建表格區段
    pub fn table<S: Into<String>>(
        kind: SectionKind,
        title: impl Into<String>,
        columns: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            body: SectionBody::Table {
                columns: columns.into_iter().map(Into::into).collect(),
                rows: Vec::new(),
            },
            truncation: None,
        }
    }

    /// 建構器模式：添加摘要項目
    pub fn with_entry(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_entry(label, value);
        self
    }

    /// 添加摘要項目（表格區段忽略）
    pub fn push_entry(&mut self, label: impl Into<String>, value: impl Into<String>) {
        if let SectionBody::Summary(entries) = &mut self.body {
            entries.push(SummaryEntry {
                label: label.into(),
                value: value.into(),
            });
        }
    }

    /// 添加表格列（摘要區段忽略）
    pub fn push_row(&mut self, row: Vec<String>) {
        if let SectionBody::Table { rows, .. } = &mut self.body {
            rows.push(row);
        }
    }

    /// 建構器模式：設置截斷資訊
    pub fn with_truncation(mut self, truncation: Option<Truncation>) -> Self {
        self.truncation = truncation;
        self
    }

    /// 查詢摘要值
    pub fn entry(&self, label: &str) -> Option<&str> {
        match &self.body {
            SectionBody::Summary(entries) => entries
                .iter()
                .find(|e| e.label == label)
                .map(|e| e.value.as_str()),
            SectionBody::Table { .. } => None,
        }
    }

    /// 表格列（摘要區段為空）
    pub fn rows(&self) -> &[Vec<String>] {
        match &self.body {
            SectionBody::Table { rows, .. } => rows.as_slice(),
            SectionBody::Summary(_) => &[],
        }
    }

    /// 表格欄位（摘要區段為空）
    pub fn columns(&self) -> &[String] {
        match &self.body {
            SectionBody::Table { columns, .. } => columns.as_slice(),
            SectionBody::Summary(_) => &[],
        }
    }

    pub fn is_truncated(&self) -> bool {
        self.truncation.is_some()
    }
}

/// 報表文件
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDocument {
    /// 文件ID
    pub id: Uuid,

    /// 標題
    pub title: String,

    /// 公司名稱
    pub company: String,

    /// 報表期間
    pub range: DateRange,

    /// 有序區段
    pub sections: Vec<ReportSection>,
}

impl ReportDocument {
    /// 創建新的報表文件
    pub fn new(title: impl Into<String>, company: impl Into<String>, range: DateRange) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            company: company.into(),
            range,
            sections: Vec::new(),
        }
    }

    /// 添加區段
    pub fn add_section(&mut self, section: ReportSection) {
        self.sections.push(section);
    }

    /// 依類型查找第一個區段
    pub fn section(&self, kind: SectionKind) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// 建議檔名（不含副檔名）
    pub fn file_stem(&self) -> String {
        format!("report-{}_{}", self.range.start(), self.range.end())
    }
}
