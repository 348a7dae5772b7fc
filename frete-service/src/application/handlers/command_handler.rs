//! 命令处理器（写侧）- 所有变更经过领域服务执行业务规则

use std::sync::Arc;

use tracing::instrument;

use crate::application::commands::{
    CreateFreteCommand, DeleteFreteCommand, ReplaceFreteCommand, UpdateFreteValueCommand,
};
use crate::domain::model::{Frete, FreteReplace, FreteUpdate, NewFrete};
use crate::domain::service::FreteDomainService;
use crate::error::FreteResult;

/// 运费命令处理器（写侧）
pub struct FreteCommandHandler {
    domain_service: Arc<FreteDomainService>,
}

impl FreteCommandHandler {
    pub fn new(domain_service: Arc<FreteDomainService>) -> Self {
        Self { domain_service }
    }

    /// 创建运费
    #[instrument(skip(self, command), fields(seller_id = %command.seller_id, sku = %command.sku))]
    pub async fn handle_create_frete(&self, command: CreateFreteCommand) -> FreteResult<Frete> {
        self.domain_service
            .create_frete(NewFrete {
                seller_id: command.seller_id,
                sku: command.sku,
                valor: command.valor,
            })
            .await
    }

    /// 局部更新运费
    #[instrument(skip(self, command), fields(seller_id = %command.seller_id, sku = %command.sku))]
    pub async fn handle_update_frete_value(
        &self,
        command: UpdateFreteValueCommand,
    ) -> FreteResult<Frete> {
        let update = FreteUpdate {
            seller_id: command.new_seller_id,
            sku: command.new_sku,
            valor: command.valor,
        };

        self.domain_service
            .update_frete_value(&command.seller_id, &command.sku, update)
            .await
    }

    /// 整体替换运费
    #[instrument(skip(self, command), fields(seller_id = %command.seller_id, sku = %command.sku))]
    pub async fn handle_replace_frete(&self, command: ReplaceFreteCommand) -> FreteResult<Frete> {
        let replacement = FreteReplace {
            seller_id: command.new_seller_id,
            sku: command.new_sku,
            valor: command.valor,
        };

        self.domain_service
            .replace_frete(&command.seller_id, &command.sku, replacement)
            .await
    }

    /// 按业务键删除运费
    #[instrument(skip(self, command), fields(seller_id = %command.seller_id, sku = %command.sku))]
    pub async fn handle_delete_frete(&self, command: DeleteFreteCommand) -> FreteResult<()> {
        self.domain_service
            .delete_by_seller_id_and_sku(&command.seller_id, &command.sku)
            .await
    }
}
