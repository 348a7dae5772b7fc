//! 领域模型定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 运费记录
///
/// 业务键是 (seller_id, sku)，同一业务键在存活记录中全局唯一。
/// `id` 由存储后端在创建时分配，之后不可变；审计字段由后端写入时
/// 盖戳，调用方不可设置。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frete {
    pub id: String,
    pub seller_id: String,
    pub sku: String,
    pub valor: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

/// 创建运费的输入
#[derive(Debug, Clone)]
pub struct NewFrete {
    pub seller_id: String,
    pub sku: String,
    pub valor: i64,
}

/// 局部更新的输入：缺省字段保持原值
#[derive(Debug, Clone, Default)]
pub struct FreteUpdate {
    pub seller_id: Option<String>,
    pub sku: Option<String>,
    pub valor: Option<i64>,
}

/// 整体替换的输入：覆盖全部业务字段
#[derive(Debug, Clone)]
pub struct FreteReplace {
    pub seller_id: String,
    pub sku: String,
    pub valor: i64,
}

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// 分页/排序描述符
///
/// 把 page/page_size/排序表达式翻译为仓储层的 limit/offset/排序键序列。
/// 排序键按给定顺序生效，后面的键在前面的键相等时决定次序。
#[derive(Debug, Clone)]
pub struct Paginator {
    pub limit: i64,
    pub offset: u64,
    sort: Vec<(String, SortDirection)>,
}

impl Paginator {
    /// 从页码（从 1 开始）和页大小构建
    pub fn new(page: u64, page_size: i64, sort_expr: &str) -> Self {
        let offset = page.saturating_sub(1) * page_size.max(0) as u64;
        Self {
            limit: page_size,
            offset,
            sort: parse_sort_expr(sort_expr),
        }
    }

    /// 直接给定 limit/offset/排序键
    pub fn from_parts(limit: i64, offset: u64, sort: Vec<(String, SortDirection)>) -> Self {
        Self {
            limit,
            offset,
            sort,
        }
    }

    pub fn sort_order(&self) -> &[(String, SortDirection)] {
        &self.sort
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            limit: 10,
            offset: 0,
            sort: Vec::new(),
        }
    }
}

/// 解析排序表达式，如 `"-valor,created_at"`
///
/// 前缀 `-` 表示降序；键两侧的空白会被去掉；空段被忽略。
pub fn parse_sort_expr(raw: &str) -> Vec<(String, SortDirection)> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| match part.strip_prefix('-') {
            Some(field) => (field.trim().to_string(), SortDirection::Descending),
            None => (part.to_string(), SortDirection::Ascending),
        })
        .collect()
}

/// 仓储层过滤条件，各字段以 AND 组合，未设置的字段不施加约束
#[derive(Debug, Clone, Default)]
pub struct FreteFilters {
    pub seller_id: Option<String>,
    pub sku: Option<String>,
    pub valor_gte: Option<i64>,
    pub valor_lte: Option<i64>,
}

impl FreteFilters {
    pub fn by_key(seller_id: &str, sku: &str) -> Self {
        Self {
            seller_id: Some(seller_id.to_string()),
            sku: Some(sku.to_string()),
            ..Self::default()
        }
    }

    pub fn matches(&self, frete: &Frete) -> bool {
        if let Some(seller_id) = &self.seller_id {
            if &frete.seller_id != seller_id {
                return false;
            }
        }
        if let Some(sku) = &self.sku {
            if &frete.sku != sku {
                return false;
            }
        }
        if let Some(min) = self.valor_gte {
            if frete.valor < min {
                return false;
            }
        }
        if let Some(max) = self.valor_lte {
            if frete.valor > max {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginator_translates_page_into_offset() {
        let paginator = Paginator::new(3, 10, "");
        assert_eq!(paginator.limit, 10);
        assert_eq!(paginator.offset, 20);
        assert!(paginator.sort_order().is_empty());

        // 页码从 1 开始，0 与 1 等价
        let first = Paginator::new(0, 10, "");
        assert_eq!(first.offset, 0);
    }

    #[test]
    fn sort_expr_parses_direction_and_order() {
        let sort = parse_sort_expr("-valor,created_at");
        assert_eq!(
            sort,
            vec![
                ("valor".to_string(), SortDirection::Descending),
                ("created_at".to_string(), SortDirection::Ascending),
            ]
        );
    }

    #[test]
    fn sort_expr_trims_keys_and_skips_empty_segments() {
        let sort = parse_sort_expr(" valor , - sku ,,");
        assert_eq!(
            sort,
            vec![
                ("valor".to_string(), SortDirection::Ascending),
                ("sku".to_string(), SortDirection::Descending),
            ]
        );
    }

    #[test]
    fn filters_combine_with_and() {
        let frete = Frete {
            id: "f-1".to_string(),
            seller_id: "S1".to_string(),
            sku: "SKU1".to_string(),
            valor: 100,
            created_at: None,
            updated_at: None,
            created_by: None,
            updated_by: None,
        };

        let mut filters = FreteFilters {
            seller_id: Some("S1".to_string()),
            valor_gte: Some(80),
            valor_lte: Some(120),
            ..FreteFilters::default()
        };
        assert!(filters.matches(&frete));

        filters.valor_lte = Some(99);
        assert!(!filters.matches(&frete));

        let unconstrained = FreteFilters::default();
        assert!(unconstrained.matches(&frete));
    }
}
