//! 命令结构体定义（Command DTO）

/// 创建运费
#[derive(Debug, Clone)]
pub struct CreateFreteCommand {
    pub seller_id: String,
    pub sku: String,
    pub valor: i64,
}

/// 局部更新运费：缺省字段保持原值
#[derive(Debug, Clone, Default)]
pub struct UpdateFreteValueCommand {
    pub seller_id: String,
    pub sku: String,
    pub new_seller_id: Option<String>,
    pub new_sku: Option<String>,
    pub valor: Option<i64>,
}

/// 整体替换运费：覆盖全部业务字段
#[derive(Debug, Clone)]
pub struct ReplaceFreteCommand {
    pub seller_id: String,
    pub sku: String,
    pub new_seller_id: String,
    pub new_sku: String,
    pub valor: i64,
}

/// 按业务键删除运费
#[derive(Debug, Clone)]
pub struct DeleteFreteCommand {
    pub seller_id: String,
    pub sku: String,
}
