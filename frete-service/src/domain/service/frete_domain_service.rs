//! 运费领域服务 - 包含所有业务规则实现

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::model::{Frete, FreteFilters, FreteReplace, FreteUpdate, NewFrete, Paginator};
use crate::domain::repository::FreteRepository;
use crate::error::{FreteError, FreteResult};

/// 领域服务配置（值对象，不依赖基础设施层）
#[derive(Debug, Clone)]
pub struct FreteDomainConfig {
    pub max_page_size: i64,
}

impl Default for FreteDomainConfig {
    fn default() -> Self {
        Self { max_page_size: 100 }
    }
}

/// `find_all` 的调用方过滤条件
///
/// 字段名沿用调用方的查询参数名，由服务归一化为仓储层的过滤条件。
#[derive(Debug, Clone, Default)]
pub struct FreteListFilter {
    pub seller_id: Option<String>,
    pub preco_greater_than: Option<i64>,
    pub preco_less_than: Option<i64>,
}

/// 运费领域服务 - 唯一承载业务规则的地方
///
/// 仓储被信任是正确的，但不知道业务策略：唯一性、取值范围和
/// 校验顺序都在这里裁决。
pub struct FreteDomainService {
    repository: Arc<dyn FreteRepository>,
    config: FreteDomainConfig,
}

impl FreteDomainService {
    pub fn new(repository: Arc<dyn FreteRepository>, config: FreteDomainConfig) -> Self {
        Self { repository, config }
    }

    /// 分页/过滤列表查询
    ///
    /// 把调用方的过滤参数归一化为仓储过滤条件后原样转发，
    /// 本层不再追加业务过滤。
    #[instrument(skip(self, paginator, filter))]
    pub async fn find_all(
        &self,
        paginator: &Paginator,
        filter: &FreteListFilter,
    ) -> FreteResult<Vec<Frete>> {
        let limit = paginator.limit.clamp(1, self.config.max_page_size);

        let filters = FreteFilters {
            seller_id: filter.seller_id.clone(),
            sku: None,
            valor_gte: filter.preco_greater_than,
            valor_lte: filter.preco_less_than,
        };

        let fretes = self
            .repository
            .find(&filters, limit, paginator.offset, paginator.sort_order())
            .await?;

        Ok(fretes)
    }

    /// 按业务键查询单条运费
    #[instrument(skip(self), fields(seller_id = %seller_id, sku = %sku))]
    pub async fn find_by_seller_id_and_sku(
        &self,
        seller_id: &str,
        sku: &str,
    ) -> FreteResult<Frete> {
        self.repository
            .find_one_by_key(seller_id, sku)
            .await?
            .ok_or_else(|| FreteError::not_found(seller_id, sku))
    }

    /// 创建运费记录
    ///
    /// 校验顺序固定：先唯一性检查，后取值校验。唯一性检查与写入
    /// 之间没有跨调用的原子性保证，并发创建同一业务键要靠存储端
    /// 的唯一索引兜底。
    #[instrument(skip(self, new), fields(seller_id = %new.seller_id, sku = %new.sku))]
    pub async fn create_frete(&self, new: NewFrete) -> FreteResult<Frete> {
        self.ensure_key_is_free(&new.seller_id, &new.sku).await?;
        self.validate_valor(new.valor)?;

        let created = self.repository.create(new).await?;

        debug!(
            id = %created.id,
            seller_id = %created.seller_id,
            sku = %created.sku,
            "Created frete record"
        );

        Ok(created)
    }

    /// 局部更新运费记录
    ///
    /// 校验顺序固定：先存在性检查，后取值校验。只有在入参中出现的
    /// 字段会被合并，缺省字段保持原值。
    #[instrument(skip(self, update), fields(seller_id = %seller_id, sku = %sku))]
    pub async fn update_frete_value(
        &self,
        seller_id: &str,
        sku: &str,
        update: FreteUpdate,
    ) -> FreteResult<Frete> {
        let mut existing = self.require_existing(seller_id, sku).await?;

        if let Some(valor) = update.valor {
            self.validate_valor(valor)?;
        }

        if let Some(new_seller_id) = update.seller_id {
            existing.seller_id = new_seller_id;
        }
        if let Some(new_sku) = update.sku {
            existing.sku = new_sku;
        }
        if let Some(valor) = update.valor {
            existing.valor = valor;
        }

        let id = existing.id.clone();
        // 存在性检查可能已经过期，id 未命中时仍按未找到处理
        self.repository
            .update(&id, &existing)
            .await?
            .ok_or_else(|| FreteError::not_found(seller_id, sku))
    }

    /// 整体替换运费记录
    ///
    /// 覆盖全部业务字段。业务键可以被替换成新值，内部 id 保持不变。
    #[instrument(skip(self, replacement), fields(seller_id = %seller_id, sku = %sku))]
    pub async fn replace_frete(
        &self,
        seller_id: &str,
        sku: &str,
        replacement: FreteReplace,
    ) -> FreteResult<Frete> {
        let mut existing = self.require_existing(seller_id, sku).await?;

        self.validate_valor(replacement.valor)?;

        existing.seller_id = replacement.seller_id;
        existing.sku = replacement.sku;
        existing.valor = replacement.valor;

        let id = existing.id.clone();
        self.repository
            .update(&id, &existing)
            .await?
            .ok_or_else(|| FreteError::not_found(seller_id, sku))
    }

    /// 按业务键删除运费记录
    ///
    /// 删除不是幂等的：对同一业务键的第二次删除返回未找到。
    #[instrument(skip(self), fields(seller_id = %seller_id, sku = %sku))]
    pub async fn delete_by_seller_id_and_sku(
        &self,
        seller_id: &str,
        sku: &str,
    ) -> FreteResult<()> {
        self.require_existing(seller_id, sku).await?;

        let removed = self.repository.delete_by_key(seller_id, sku).await?;
        if !removed {
            return Err(FreteError::not_found(seller_id, sku));
        }

        debug!(seller_id = %seller_id, sku = %sku, "Deleted frete record");

        Ok(())
    }

    fn validate_valor(&self, valor: i64) -> FreteResult<()> {
        if valor < 0 {
            return Err(FreteError::InvalidValue(format!(
                "valor must be greater than or equal to zero, got {valor}"
            )));
        }
        Ok(())
    }

    async fn require_existing(&self, seller_id: &str, sku: &str) -> FreteResult<Frete> {
        self.repository
            .find_one_by_key(seller_id, sku)
            .await?
            .ok_or_else(|| FreteError::not_found(seller_id, sku))
    }

    async fn ensure_key_is_free(&self, seller_id: &str, sku: &str) -> FreteResult<()> {
        let existing = self.repository.find_one_by_key(seller_id, sku).await?;
        if existing.is_some() {
            return Err(FreteError::already_exists(seller_id, sku));
        }
        Ok(())
    }
}
