//! 领域服务

pub mod frete_domain_service;

pub use frete_domain_service::*;
