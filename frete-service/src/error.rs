//! 运费服务错误类型定义

use thiserror::Error;

/// 运费服务错误类型
#[derive(Debug, Error)]
pub enum FreteError {
    /// 运费记录未找到
    #[error("Frete not found for seller {seller_id} and sku {sku}")]
    NotFound { seller_id: String, sku: String },

    /// (seller_id, sku) 业务键已存在
    #[error("Frete already exists for seller {seller_id} and sku {sku}")]
    AlreadyExists { seller_id: String, sku: String },

    /// 非法的运费取值
    #[error("Invalid frete value: {0}")]
    InvalidValue(String),

    /// 存储层错误（连接、协议等），对当前请求而言是致命的
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl FreteError {
    pub fn not_found(seller_id: &str, sku: &str) -> Self {
        FreteError::NotFound {
            seller_id: seller_id.to_string(),
            sku: sku.to_string(),
        }
    }

    pub fn already_exists(seller_id: &str, sku: &str) -> Self {
        FreteError::AlreadyExists {
            seller_id: seller_id.to_string(),
            sku: sku.to_string(),
        }
    }
}

/// 运费服务结果类型
pub type FreteResult<T> = Result<T, FreteError>;
