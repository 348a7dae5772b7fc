//! Wire 风格的依赖注入模块
//!
//! 按照依赖顺序构建仓储、领域服务与处理器。

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::application::handlers::{FreteCommandHandler, FreteQueryHandler};
use crate::config::FreteServiceConfig;
use crate::domain::repository::FreteRepository;
use crate::domain::service::{FreteDomainConfig, FreteDomainService};
use crate::infrastructure::persistence::{MemoryFreteRepository, MongoFreteRepository};

/// 应用上下文 - 包含所有已初始化的处理器
pub struct ApplicationContext {
    pub command_handler: Arc<FreteCommandHandler>,
    pub query_handler: Arc<FreteQueryHandler>,
}

/// 构建应用上下文
///
/// Mongo 连接在这里一次性建立，之后被所有并发请求共享借用；
/// 连接的生命周期由嵌入方的启动/停止流程负责。
pub async fn initialize(config: &FreteServiceConfig) -> Result<ApplicationContext> {
    // 1. 创建仓储实例（优先 MongoDB，未配置时回退到内存实现）
    let repository: Arc<dyn FreteRepository> = match MongoFreteRepository::new(config)
        .await
        .context("Failed to create MongoDB frete repository")?
    {
        Some(mongo) => {
            info!(
                database = %config.mongo_database,
                collection = %config.mongo_collection,
                "Using MongoDB frete repository"
            );
            Arc::new(mongo)
        }
        None => {
            warn!("FRETE_MONGO_URL not configured, falling back to in-memory repository");
            Arc::new(MemoryFreteRepository::new())
        }
    };

    // 2. 构建领域配置
    let domain_config = FreteDomainConfig {
        max_page_size: config.max_page_size,
    };

    // 3. 构建领域服务
    let domain_service = Arc::new(FreteDomainService::new(repository, domain_config));

    // 4. 构建命令/查询处理器
    let command_handler = Arc::new(FreteCommandHandler::new(domain_service.clone()));
    let query_handler = Arc::new(FreteQueryHandler::new(domain_service));

    Ok(ApplicationContext {
        command_handler,
        query_handler,
    })
}
