//! 尺寸描述字串
//!
//! 出貨與庫存記錄以 `2mm x 100cm x 300m`（或省略厚度的 `100cm x 300m`）保存尺寸。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::numeric::{format_plain, parse_decimal};

/// 產品尺寸（寬 cm × 長 m，厚度可省略）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeDescriptor {
    /// 厚度（mm）
    pub thickness_mm: Option<Decimal>,

    /// 寬度（cm）
    pub width_cm: Decimal,

    /// 長度（m）
    pub length_m: Decimal,
}

impl SizeDescriptor {
    /// 創建新的尺寸
    pub fn new(thickness_mm: Option<Decimal>, width_cm: Decimal, length_m: Decimal) -> Self {
        Self {
            thickness_mm,
            width_cm,
            length_m,
        }
    }

    /// 解析尺寸字串
    ///
    /// 三段以上取前三段為厚度/寬度/長度（多餘段落忽略），兩段為寬度/長度，
    /// 其他格式回傳 None。
    pub fn parse(text: &str) -> Option<Self> {
        let parts: Vec<&str> = text.split(" x ").map(str::trim).collect();

        match parts.as_slice() {
            [thickness, width, length, ..] => Some(Self::new(
                Some(parse_decimal(strip_unit(thickness, "mm"))),
                parse_decimal(strip_unit(width, "cm")),
                parse_decimal(strip_unit(length, "m")),
            )),
            [width, length] => Some(Self::new(
                None,
                parse_decimal(strip_unit(width, "cm")),
                parse_decimal(strip_unit(length, "m")),
            )),
            _ => None,
        }
    }

    /// 單片面積（m²）= 寬(cm) × 長(m) / 100
    pub fn area_per_piece(&self) -> Decimal {
        self.width_cm
            .checked_mul(self.length_m)
            .map(|product| product / Decimal::ONE_HUNDRED)
            .unwrap_or(Decimal::ZERO)
    }
}

fn strip_unit<'a>(part: &'a str, unit: &str) -> &'a str {
    part.strip_suffix(unit).unwrap_or(part).trim()
}

impl fmt::Display for SizeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.thickness_mm {
            Some(thickness) if !thickness.is_zero() => write!(
                f,
                "{}mm x {}cm x {}m",
                format_plain(thickness),
                format_plain(self.width_cm),
                format_plain(self.length_m)
            ),
            _ => write!(
                f,
                "{}cm x {}m",
                format_plain(self.width_cm),
                format_plain(self.length_m)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2mm x 100cm x 300m", Some(Decimal::from(2)), Decimal::from(100), Decimal::from(300))]
    #[case("100cm x 300m", None, Decimal::from(100), Decimal::from(300))]
    #[case("1.8mm x 137.5cm x 2.5m", Some(Decimal::new(18, 1)), Decimal::new(1375, 1), Decimal::new(25, 1))]
    fn test_parse(
        #[case] text: &str,
        #[case] thickness: Option<Decimal>,
        #[case] width: Decimal,
        #[case] length: Decimal,
    ) {
        let size = SizeDescriptor::parse(text).unwrap();
        assert_eq!(size.thickness_mm, thickness);
        assert_eq!(size.width_cm, width);
        assert_eq!(size.length_m, length);
    }

    #[test]
    fn test_parse_unrecognised() {
        assert!(SizeDescriptor::parse("").is_none());
        assert!(SizeDescriptor::parse("A4").is_none());
    }

    #[test]
    fn test_parse_extra_parts_ignored() {
        let size = SizeDescriptor::parse("1mm x 2cm x 3m x 4").unwrap();
        assert_eq!(size.thickness_mm, Some(Decimal::ONE));
        assert_eq!(size.width_cm, Decimal::from(2));
        assert_eq!(size.length_m, Decimal::from(3));
    }

    #[test]
    fn test_display_round_trip_text() {
        let size = SizeDescriptor::new(None, Decimal::from(100), Decimal::new(25, 1));
        assert_eq!(size.to_string(), "100cm x 2.5m");

        let size = SizeDescriptor::new(Some(Decimal::from(2)), Decimal::from(100), Decimal::from(300));
        assert_eq!(size.to_string(), "2mm x 100cm x 300m");
    }

    #[test]
    fn test_area_per_piece() {
        // 100cm × 300m = 300 m²
        let size = SizeDescriptor::parse("100cm x 300m").unwrap();
        assert_eq!(size.area_per_piece(), Decimal::from(300));
    }
}
