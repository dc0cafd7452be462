//! 報表期間模型

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{PackError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// 報表期間（含頭含尾）
///
/// 日期以 `YYYY-MM-DD` 字串保存，比較採字串字典序；
/// 格式固定寬度且補零，所以字典序與日期先後一致。
/// 反序列化與 [`DateRange::new`] 走同樣的驗證。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawDateRange")]
pub struct DateRange {
    /// 起始日期
    pub start_date: String,

    /// 結束日期
    pub end_date: String,
}

impl DateRange {
    /// 從日期字串創建期間
    pub fn new(start_date: impl Into<String>, end_date: impl Into<String>) -> Result<Self> {
        let start_date = start_date.into();
        let end_date = end_date.into();

        validate_date(&start_date)?;
        validate_date(&end_date)?;

        if start_date > end_date {
            return Err(PackError::InvalidRange {
                start: start_date,
                end: end_date,
            });
        }

        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// 從日期創建期間
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        Self::new(
            start.format(DATE_FORMAT).to_string(),
            end.format(DATE_FORMAT).to_string(),
        )
    }

    /// 本月（當月第一天到最後一天）
    pub fn current_month(today: NaiveDate) -> Result<Self> {
        let (first, last) = month_bounds(today.year(), today.month())?;
        Self::from_dates(first, last)
    }

    /// 上個月
    pub fn previous_month(today: NaiveDate) -> Result<Self> {
        let (year, month) = if today.month() == 1 {
            (today.year() - 1, 12)
        } else {
            (today.year(), today.month() - 1)
        };
        let (first, last) = month_bounds(year, month)?;
        Self::from_dates(first, last)
    }

    /// 檢查日期是否落在期間內
    ///
    /// 只比較前 10 個字元，帶時間的記錄（`2025-01-31T08:00`）歸入當天。
    pub fn contains(&self, date: &str) -> bool {
        let key = date_key(date);
        key >= self.start_date.as_str() && key <= self.end_date.as_str()
    }

    /// 起始日期
    pub fn start(&self) -> &str {
        &self.start_date
    }

    /// 結束日期
    pub fn end(&self) -> &str {
        &self.end_date
    }
}

/// 未驗證的期間（反序列化用）
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDateRange {
    start_date: String,
    end_date: String,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = PackError;

    fn try_from(raw: RawDateRange) -> Result<Self> {
        Self::new(raw.start_date, raw.end_date)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ~ {}", self.start_date, self.end_date)
    }
}

fn date_key(date: &str) -> &str {
    let trimmed = date.trim();
    match trimmed.get(..10) {
        Some(prefix) => prefix,
        None => trimmed,
    }
}

/// 驗證 `YYYY-MM-DD` 日期字串
pub fn validate_date(date: &str) -> Result<()> {
    if date.len() != 10 {
        return Err(PackError::InvalidDate(date.to_string()));
    }
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map(|_| ())
        .map_err(|_| PackError::InvalidDate(date.to_string()))
}

fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| PackError::InvalidDate(format!("{}-{:02}", year, month)))?;

    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| PackError::InvalidDate(format!("{}-{:02}", year, month)))?;

    Ok((first, last))
}
