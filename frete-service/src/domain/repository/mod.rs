//! 仓储接口定义（Port）

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::model::{Frete, FreteFilters, NewFrete, SortDirection};

/// 运费仓储接口
///
/// 内存实现与 MongoDB 实现行为等价。接口只负责持久化，不做业务
/// 校验；"未找到"以 `None`/`false` 表达，不是错误。
#[async_trait]
pub trait FreteRepository: Send + Sync {
    /// 持久化一条新记录，由后端分配 id 并盖创建侧审计戳，返回存储后的形态
    async fn create(&self, new: NewFrete) -> Result<Frete>;

    /// 按过滤条件查询，按 `sort` 排序后取 `[offset, offset+limit)` 切片
    ///
    /// MongoDB 实现必须把过滤/排序/分页下推到存储端；内存实现可以在
    /// 全集上过滤排序（受测试/开发规模约束）。
    async fn find(
        &self,
        filters: &FreteFilters,
        limit: i64,
        offset: u64,
        sort: &[(String, SortDirection)],
    ) -> Result<Vec<Frete>>;

    /// 按内部 id 查询；非法 id 等同于不存在
    async fn find_by_id(&self, id: &str) -> Result<Option<Frete>>;

    /// 按业务键 (seller_id, sku) 查询单条记录
    async fn find_one_by_key(&self, seller_id: &str, sku: &str) -> Result<Option<Frete>>;

    /// 按内部 id 整体覆盖业务字段并盖更新侧审计戳，返回更新后的记录
    ///
    /// id 未命中时返回 `None`，由调用方决定是否视为未找到（上游的
    /// 存在性检查可能已经过期）。
    async fn update(&self, id: &str, frete: &Frete) -> Result<Option<Frete>>;

    /// 按业务键删除，返回是否确实删除了记录
    async fn delete_by_key(&self, seller_id: &str, sku: &str) -> Result<bool>;
}
