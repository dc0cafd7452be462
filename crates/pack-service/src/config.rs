//! 服務配置

use pack_core::{PackError, ReportConfig, Result};
use serde::{Deserialize, Serialize};

/// 報表服務配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// 單一記錄列表取得失敗時的重試次數
    ///
    /// 重試只針對個別取得；任何一項最終失敗，整份報表仍然失敗。
    pub fetch_retries: u32,

    /// 報表配置
    pub report: ReportConfig,
}

impl ServiceConfig {
    /// 創建預設配置（不重試）
    pub fn new() -> Self {
        Self {
            fetch_retries: 0,
            report: ReportConfig::default(),
        }
    }

    /// 從 JSON 字串載入
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| PackError::Config(e.to_string()))
    }

    /// 建構器模式：設置重試次數
    pub fn with_fetch_retries(mut self, retries: u32) -> Self {
        self.fetch_retries = retries;
        self
    }

    /// 建構器模式：設置報表配置
    pub fn with_report_config(mut self, report: ReportConfig) -> Self {
        self.report = report;
        self
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new()
    }
}
