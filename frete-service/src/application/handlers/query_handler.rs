//! 查询处理器（查询侧）
//!
//! 列表查询仍经过领域服务：过滤参数的归一化是业务规则的一部分，
//! 不在本层展开。

use std::sync::Arc;

use tracing::instrument;

use crate::application::queries::{FindFretesQuery, GetFreteQuery};
use crate::domain::model::{Frete, Paginator};
use crate::domain::service::{FreteDomainService, FreteListFilter};
use crate::error::FreteResult;

/// 运费查询处理器（查询侧）
pub struct FreteQueryHandler {
    domain_service: Arc<FreteDomainService>,
}

impl FreteQueryHandler {
    pub fn new(domain_service: Arc<FreteDomainService>) -> Self {
        Self { domain_service }
    }

    /// 分页/过滤列表查询
    #[instrument(skip(self, query), fields(page = query.page, page_size = query.page_size))]
    pub async fn handle_find_fretes(&self, query: FindFretesQuery) -> FreteResult<Vec<Frete>> {
        let paginator = Paginator::new(query.page, query.page_size, &query.sort);
        let filter = FreteListFilter {
            seller_id: query.seller_id,
            preco_greater_than: query.preco_greater_than,
            preco_less_than: query.preco_less_than,
        };

        self.domain_service.find_all(&paginator, &filter).await
    }

    /// 按业务键获取单条运费
    #[instrument(skip(self, query), fields(seller_id = %query.seller_id, sku = %query.sku))]
    pub async fn handle_get_frete(&self, query: GetFreteQuery) -> FreteResult<Frete> {
        self.domain_service
            .find_by_seller_id_and_sku(&query.seller_id, &query.sku)
            .await
    }
}
