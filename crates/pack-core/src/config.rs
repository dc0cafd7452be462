//! 報表配置模型

use serde::{Deserialize, Serialize};

use crate::{PackError, Result};

/// 報表產生參數配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// 報表標題
    pub title: String,

    /// 公司名稱
    pub company_name: String,

    /// 缺少機台/客戶時的分組標籤
    pub unknown_label: String,

    /// 明細表最大列數（None 表示不截斷）
    ///
    /// 只影響明細表，合計數字永遠以完整篩選結果計算。
    pub detail_row_cap: Option<usize>,

    /// 面積/重量的小數位數
    pub decimal_places: u32,
}

impl ReportConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self {
            title: "Factory Report".to_string(),
            company_name: "SAR AMBALAJ".to_string(),
            unknown_label: "Unknown".to_string(),
            detail_row_cap: Some(50),
            decimal_places: 2,
        }
    }

    /// 從 JSON 字串載入（缺少的欄位使用預設值）
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| PackError::Config(e.to_string()))
    }

    /// 建構器模式：設置標題
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// 建構器模式：設置公司名稱
    pub fn with_company_name(mut self, name: impl Into<String>) -> Self {
        self.company_name = name.into();
        self
    }

    /// 建構器模式：設置未知分組標籤
    pub fn with_unknown_label(mut self, label: impl Into<String>) -> Self {
        self.unknown_label = label.into();
        self
    }

    /// 建構器模式：設置明細表最大列數
    pub fn with_detail_row_cap(mut self, cap: Option<usize>) -> Self {
        self.detail_row_cap = cap;
        self
    }

    /// 建構器模式：設置小數位數
    pub fn with_decimal_places(mut self, places: u32) -> Self {
        self.decimal_places = places;
        self
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self::new()
    }
}
