//! 庫存快照模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::numeric::{
    lenient_decimal, lenient_integer, lenient_label, saturating_sum_decimal,
    saturating_sum_integer,
};

/// 庫存品項
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockItem {
    /// 尺寸描述
    #[serde(default)]
    pub size: String,

    #[serde(default, deserialize_with = "lenient_label")]
    pub color: Option<String>,

    /// 現有數量
    #[serde(default, deserialize_with = "lenient_integer")]
    pub quantity: i64,

    /// 現有面積（m²）
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub m2: Decimal,
}

impl StockItem {
    /// 創建新的庫存品項
    pub fn new(size: impl Into<String>, quantity: i64, m2: Decimal) -> Self {
        Self {
            size: size.into(),
            color: None,
            quantity,
            m2,
        }
    }
}

/// 庫存快照（當下狀態，不按期間篩選）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockSnapshot {
    pub items: Vec<StockItem>,
}

impl StockSnapshot {
    /// 創建新的快照
    pub fn new(items: Vec<StockItem>) -> Self {
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 總數量
    pub fn total_quantity(&self) -> i64 {
        saturating_sum_integer(self.items.iter().map(|item| item.quantity))
    }

    /// 總面積
    pub fn total_area(&self) -> Decimal {
        saturating_sum_decimal(self.items.iter().map(|item| item.m2))
    }
}
