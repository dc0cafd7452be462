//! 原料板材與裁切需求模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::numeric::{format_plain, parse_decimal, parse_integer};
use crate::PackError;

/// 板材顏色（序列化值沿用記錄庫的標籤）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SheetColor {
    /// 本色
    #[default]
    #[serde(rename = "Doğal")]
    Natural,
    /// 黃色
    #[serde(rename = "Sarı")]
    Yellow,
    /// 黑色
    #[serde(rename = "Siyah")]
    Black,
    /// 藍色
    #[serde(rename = "Mavi")]
    Blue,
}

impl SheetColor {
    pub const ALL: [SheetColor; 4] = [
        SheetColor::Natural,
        SheetColor::Yellow,
        SheetColor::Black,
        SheetColor::Blue,
    ];

    /// 記錄庫使用的標籤
    pub fn label(&self) -> &'static str {
        match self {
            SheetColor::Natural => "Doğal",
            SheetColor::Yellow => "Sarı",
            SheetColor::Black => "Siyah",
            SheetColor::Blue => "Mavi",
        }
    }

    fn english_name(&self) -> &'static str {
        match self {
            SheetColor::Natural => "natural",
            SheetColor::Yellow => "yellow",
            SheetColor::Black => "black",
            SheetColor::Blue => "blue",
        }
    }
}

impl fmt::Display for SheetColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SheetColor {
    type Err = PackError;

    /// 接受記錄庫標籤或英文名稱（不分大小寫）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|color| {
                color.label() == trimmed || color.english_name().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| PackError::InvalidColor(trimmed.to_string()))
    }
}

/// 原料板材/捲材規格
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSheetSpec {
    /// 厚度（mm）
    pub thickness_mm: Decimal,

    /// 寬度（cm）
    pub width_cm: Decimal,

    /// 長度（m）
    pub length_m: Decimal,

    /// 顏色
    pub color: SheetColor,
}

impl SourceSheetSpec {
    /// 創建新的原料規格
    pub fn new(thickness_mm: Decimal, width_cm: Decimal, length_m: Decimal, color: SheetColor) -> Self {
        Self {
            thickness_mm,
            width_cm,
            length_m,
            color,
        }
    }

    /// 從表單文字解析（無法解析的欄位為 0）
    pub fn parse(thickness: &str, width: &str, length: &str, color: SheetColor) -> Self {
        Self::new(
            parse_decimal(thickness),
            parse_decimal(width),
            parse_decimal(length),
            color,
        )
    }

    /// 長度換算為公分（溢出時為 None）
    pub fn length_cm(&self) -> Option<Decimal> {
        self.length_m.checked_mul(Decimal::ONE_HUNDRED)
    }

    /// 原料描述，例如 `1.8mm x 100cm x 300m`
    ///
    /// 數值去除尾端零（`1.80` → `1.8`），空白厚度寫成 `0mm`。
    pub fn description(&self) -> String {
        format!(
            "{}mm x {}cm x {}m",
            format_plain(self.thickness_mm),
            format_plain(self.width_cm),
            format_plain(self.length_m)
        )
    }
}

/// 裁切需求（注意：長度單位為 cm，與原料的 m 不同）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutRequest {
    /// 厚度（mm）
    pub thickness_mm: Decimal,

    /// 寬度（cm）
    pub width_cm: Decimal,

    /// 長度（cm）
    pub length_cm: Decimal,

    /// 需求數量
    pub quantity: u64,
}

impl CutRequest {
    /// 創建新的裁切需求
    pub fn new(thickness_mm: Decimal, width_cm: Decimal, length_cm: Decimal, quantity: u64) -> Self {
        Self {
            thickness_mm,
            width_cm,
            length_cm,
            quantity,
        }
    }

    /// 從表單文字解析（負數量視為 0）
    pub fn parse(thickness: &str, width: &str, length: &str, quantity: &str) -> Self {
        let quantity = u64::try_from(parse_integer(quantity)).unwrap_or(0);
        Self::new(
            parse_decimal(thickness),
            parse_decimal(width),
            parse_decimal(length),
            quantity,
        )
    }

    /// 裁切尺寸描述，例如 `1.8mm x 50cm x 137.5cm`
    pub fn description(&self) -> String {
        format!(
            "{}mm x {}cm x {}cm",
            format_plain(self.thickness_mm),
            format_plain(self.width_cm),
            format_plain(self.length_cm)
        )
    }
}
