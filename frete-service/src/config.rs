use std::env;

/// 运费服务配置
///
/// `mongo_url` 缺省时回退到内存仓储，仅用于开发和测试环境。
#[derive(Clone, Debug)]
pub struct FreteServiceConfig {
    pub mongo_url: Option<String>,
    pub mongo_database: String,
    pub mongo_collection: String,
    pub max_page_size: i64,
}

impl FreteServiceConfig {
    /// 从环境变量加载
    pub fn from_env() -> Self {
        let mongo_url = env::var("FRETE_MONGO_URL").ok();

        let mongo_database =
            env::var("FRETE_MONGO_DATABASE").unwrap_or_else(|_| "pc-frete".to_string());

        let mongo_collection =
            env::var("FRETE_MONGO_COLLECTION").unwrap_or_else(|_| "fretes".to_string());

        let max_page_size = env::var("FRETE_MAX_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(100);

        Self {
            mongo_url,
            mongo_database,
            mongo_collection,
            max_page_size,
        }
    }
}

impl Default for FreteServiceConfig {
    fn default() -> Self {
        Self {
            mongo_url: None,
            mongo_database: "pc-frete".to_string(),
            mongo_collection: "fretes".to_string(),
            max_page_size: 100,
        }
    }
}
