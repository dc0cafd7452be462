//! 寬鬆數值解析
//!
//! 表單欄位與記錄庫回傳的數值都可能是自由文字。無法解析的內容一律視為 0，
//! 只取字串開頭的數值部分（`"12.5cm"` → 12.5，`"abc"` → 0）。

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// 解析小數（取開頭數值，失敗為 0）
pub fn parse_decimal(input: &str) -> Decimal {
    let s = input.trim();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let int_len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    let int_part = &rest[..int_len];
    let frac_part = rest[int_len..]
        .strip_prefix('.')
        .map(|tail| {
            let len = tail.bytes().take_while(|b| b.is_ascii_digit()).count();
            &tail[..len]
        })
        .unwrap_or("");

    if int_part.is_empty() && frac_part.is_empty() {
        return Decimal::ZERO;
    }

    let literal = format!(
        "{}{}.{}",
        if negative { "-" } else { "" },
        if int_part.is_empty() { "0" } else { int_part },
        if frac_part.is_empty() { "0" } else { frac_part },
    );

    Decimal::from_str(&literal).unwrap_or(Decimal::ZERO)
}

/// 解析整數（取開頭整數部分，小數部分捨去，失敗為 0）
pub fn parse_integer(input: &str) -> i64 {
    let s = input.trim();
    let sign_len = usize::from(s.starts_with(|c: char| c == '+' || c == '-'));
    let digits = s[sign_len..]
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();

    if digits == 0 {
        return 0;
    }

    s[..sign_len + digits].parse().unwrap_or(0)
}

/// JSON 值轉小數
pub fn decimal_from_value(value: &Value) -> Decimal {
    match value {
        Value::Number(number) => {
            if let Some(i) = number.as_i64() {
                Decimal::from(i)
            } else if let Some(u) = number.as_u64() {
                Decimal::from(u)
            } else {
                let text = number.to_string();
                Decimal::from_str(&text)
                    .or_else(|_| Decimal::from_scientific(&text))
                    .unwrap_or(Decimal::ZERO)
            }
        }
        Value::String(text) => parse_decimal(text),
        _ => Decimal::ZERO,
    }
}

/// JSON 值轉整數
pub fn integer_from_value(value: &Value) -> i64 {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(text) => parse_integer(text),
        _ => 0,
    }
}

/// serde：寬鬆小數欄位（缺少、null、無法解析皆為 0）
pub fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(decimal_from_value).unwrap_or(Decimal::ZERO))
}

/// serde：寬鬆整數欄位
pub fn lenient_integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(integer_from_value).unwrap_or(0))
}

/// serde：寬鬆標籤欄位（空白字串視為缺少，數字轉為文字）
pub fn lenient_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let label = match value {
        Some(Value::String(text)) => Some(text.trim().to_string()),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    };
    Ok(label.filter(|text| !text.is_empty()))
}

/// serde：寬鬆文字欄位（缺少、null 為空字串，數字轉為文字）
pub fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => text,
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        _ => String::new(),
    })
}

/// 小數加總（溢出時停在上下限，不會 panic）
pub fn saturating_sum_decimal<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .fold(Decimal::ZERO, |total, value| total.saturating_add(value))
}

/// 整數加總（溢出時停在 i64 上下限）
pub fn saturating_sum_integer<I>(values: I) -> i64
where
    I: IntoIterator<Item = i64>,
{
    values
        .into_iter()
        .fold(0i64, |total, value| total.saturating_add(value))
}

/// 固定小數位格式化（四捨五入，遠離零）
pub fn format_fixed(value: Decimal, decimal_places: u32) -> String {
    let mut rounded =
        value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.rescale(decimal_places);
    rounded.to_string()
}

/// 去除尾端零的格式化（`1.80` → `1.8`）
pub fn format_plain(value: Decimal) -> String {
    value.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("100", "100")]
    #[case(" 137.5 ", "137.5")]
    #[case("1.8mm", "1.8")]
    #[case(".5", "0.5")]
    #[case("5.", "5")]
    #[case("-3", "-3")]
    #[case("", "0")]
    #[case("abc", "0")]
    #[case("-", "0")]
    #[case("1,5", "1")]
    fn test_parse_decimal(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(parse_decimal(input), Decimal::from_str(expected).unwrap());
    }

    #[rstest]
    #[case("1744", 1744)]
    #[case("12.7", 12)]
    #[case("+5", 5)]
    #[case("-4", -4)]
    #[case("  9 adet", 9)]
    #[case("", 0)]
    #[case("x1", 0)]
    #[case("99999999999999999999999", 0)]
    fn test_parse_integer(#[case] input: &str, #[case] expected: i64) {
        assert_eq!(parse_integer(input), expected);
    }

    #[test]
    fn test_value_conversion() {
        assert_eq!(decimal_from_value(&json!(12.5)), Decimal::new(125, 1));
        assert_eq!(decimal_from_value(&json!(7)), Decimal::from(7));
        assert_eq!(decimal_from_value(&json!("3.25")), Decimal::new(325, 2));
        assert_eq!(decimal_from_value(&json!(null)), Decimal::ZERO);
        assert_eq!(decimal_from_value(&json!([1])), Decimal::ZERO);

        assert_eq!(integer_from_value(&json!(40)), 40);
        assert_eq!(integer_from_value(&json!(40.9)), 40);
        assert_eq!(integer_from_value(&json!("15")), 15);
        assert_eq!(integer_from_value(&json!(true)), 0);
    }

    #[rstest]
    #[case("1.005", 2, "1.01")]
    #[case("2.5", 2, "2.50")]
    #[case("10", 2, "10.00")]
    #[case("-0.001", 2, "0.00")]
    #[case("-12.345", 2, "-12.35")]
    #[case("7.4", 0, "7")]
    fn test_format_fixed(#[case] input: &str, #[case] dp: u32, #[case] expected: &str) {
        assert_eq!(format_fixed(Decimal::from_str(input).unwrap(), dp), expected);
    }

    #[test]
    fn test_saturating_sums() {
        assert_eq!(saturating_sum_integer([1, 2, 3]), 6);
        assert_eq!(saturating_sum_integer([i64::MAX, 1]), i64::MAX);
        assert_eq!(saturating_sum_integer([i64::MIN, -1]), i64::MIN);

        assert_eq!(
            saturating_sum_decimal([Decimal::new(125, 1), Decimal::new(75, 1)]),
            Decimal::from(20)
        );
        assert_eq!(saturating_sum_decimal([Decimal::MAX, Decimal::MAX]), Decimal::MAX);
        assert_eq!(saturating_sum_decimal(Vec::new()), Decimal::ZERO);
    }

    #[test]
    fn test_format_plain() {
        assert_eq!(format_plain(Decimal::from_str("1.80").unwrap()), "1.8");
        assert_eq!(format_plain(Decimal::from_str("300.0").unwrap()), "300");
    }
}
