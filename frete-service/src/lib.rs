//! 运费（Frete）持久化核心
//!
//! 以 (seller_id, sku) 业务键管理运费记录：创建、查询、局部更新、
//! 整体替换、删除以及分页/过滤列表。仓储接口支持内存实现（测试/开发）
//! 与 MongoDB 实现（生产）两种后端，业务规则全部集中在领域服务中。

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod service;

pub use config::FreteServiceConfig;
pub use error::{FreteError, FreteResult};
