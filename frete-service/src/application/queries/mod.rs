//! 查询结构体定义（Query DTO）

/// 分页/过滤列表查询
///
/// `sort` 是形如 `"-valor,created_at"` 的排序表达式；过滤字段名沿用
/// 调用方的查询参数名。
#[derive(Debug, Clone)]
pub struct FindFretesQuery {
    pub page: u64,
    pub page_size: i64,
    pub sort: String,
    pub seller_id: Option<String>,
    pub preco_greater_than: Option<i64>,
    pub preco_less_than: Option<i64>,
}

impl Default for FindFretesQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            sort: String::new(),
            seller_id: None,
            preco_greater_than: None,
            preco_less_than: None,
        }
    }
}

/// 按业务键获取单条运费
#[derive(Debug, Clone)]
pub struct GetFreteQuery {
    pub seller_id: String,
    pub sku: String,
}
