//! MongoDB 版运费仓储实现
//!
//! 过滤/排序/分页全部下推到存储端；更新走原子的 find-and-modify，
//! 返回修改后的文档。

use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, DateTime as BsonDateTime, Document, doc};
use mongodb::options::{
    FindOneAndUpdateOptions, FindOptions, IndexOptions, ReturnDocument,
};
use mongodb::{Client, Collection, IndexModel};

use crate::config::FreteServiceConfig;
use crate::domain::model::{Frete, FreteFilters, NewFrete, SortDirection};
use crate::domain::repository::FreteRepository;

const AUDIT_ACTOR: &str = "system";

pub struct MongoFreteRepository {
    collection: Collection<Document>,
    _client: Arc<Client>,
}

impl MongoFreteRepository {
    /// 未配置 Mongo URL 时返回 `Ok(None)`，由装配层回退到内存实现
    pub async fn new(config: &FreteServiceConfig) -> Result<Option<Self>> {
        let uri = match &config.mongo_url {
            Some(url) => url,
            None => return Ok(None),
        };

        let options = mongodb::options::ClientOptions::parse(uri)
            .await
            .context("Failed to parse MongoDB connection string")?;
        let client = Arc::new(Client::with_options(options)?);
        let database = client.database(&config.mongo_database);
        let collection = database.collection::<Document>(&config.mongo_collection);

        ensure_indexes(&collection).await?;

        Ok(Some(Self {
            collection,
            _client: client,
        }))
    }
}

async fn ensure_indexes(collection: &Collection<Document>) -> Result<()> {
    // (seller_id, sku) 唯一索引是业务键唯一性的权威保证，
    // 服务层的存在性检查只是快速路径
    let key_index = IndexModel::builder()
        .keys(doc! {"seller_id": 1, "sku": 1})
        .options(
            IndexOptions::builder()
                .unique(true)
                .name(Some("uid_seller_sku".to_string()))
                .build(),
        )
        .build();
    collection
        .create_index(key_index, None::<mongodb::options::CreateIndexOptions>)
        .await
        .context("Failed to create unique index on (seller_id, sku)")?;

    Ok(())
}

fn filters_to_document(filters: &FreteFilters) -> Document {
    let mut filter = Document::new();
    if let Some(seller_id) = &filters.seller_id {
        filter.insert("seller_id", seller_id);
    }
    if let Some(sku) = &filters.sku {
        filter.insert("sku", sku);
    }

    let mut valor = Document::new();
    if let Some(min) = filters.valor_gte {
        valor.insert("$gte", min);
    }
    if let Some(max) = filters.valor_lte {
        valor.insert("$lte", max);
    }
    if !valor.is_empty() {
        filter.insert("valor", valor);
    }

    filter
}

fn sort_to_document(sort: &[(String, SortDirection)]) -> Document {
    let mut document = Document::new();
    for (field, direction) in sort {
        let order: i32 = match direction {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        };
        document.insert(field, order);
    }
    document
}

/// 排序键缺失的文档要排除在结果之外，与内存实现保持同一可观测行为
fn require_sort_fields(filter: &mut Document, sort: &[(String, SortDirection)]) {
    for (field, _) in sort {
        match filter.get_mut(field) {
            None => {
                filter.insert(field.clone(), doc! {"$exists": true});
            }
            Some(Bson::Document(constraint)) => {
                constraint.insert("$exists", true);
            }
            // 等值条件已隐含字段存在
            Some(_) => {}
        }
    }
}

fn read_i64(document: &Document, key: &str) -> Result<i64> {
    match document.get(key) {
        Some(Bson::Int64(value)) => Ok(*value),
        Some(Bson::Int32(value)) => Ok(i64::from(*value)),
        Some(other) => Err(anyhow!(
            "Unexpected BSON type for field {key}: {other:?}"
        )),
        None => Err(anyhow!("Frete document is missing field {key}")),
    }
}

fn from_document(document: &Document) -> Result<Frete> {
    let id = document
        .get_object_id("_id")
        .context("Frete document is missing _id")?
        .to_hex();

    Ok(Frete {
        id,
        seller_id: document
            .get_str("seller_id")
            .context("Frete document is missing seller_id")?
            .to_string(),
        sku: document
            .get_str("sku")
            .context("Frete document is missing sku")?
            .to_string(),
        valor: read_i64(document, "valor")?,
        created_at: document
            .get_datetime("created_at")
            .ok()
            .map(|at| at.to_chrono()),
        updated_at: document
            .get_datetime("updated_at")
            .ok()
            .map(|at| at.to_chrono()),
        created_by: document.get_str("created_by").ok().map(str::to_string),
        updated_by: document.get_str("updated_by").ok().map(str::to_string),
    })
}

#[async_trait]
impl FreteRepository for MongoFreteRepository {
    async fn create(&self, new: NewFrete) -> Result<Frete> {
        let id = ObjectId::new();
        let now = Utc::now();

        let document = doc! {
            "_id": id,
            "seller_id": &new.seller_id,
            "sku": &new.sku,
            "valor": new.valor,
            "created_at": BsonDateTime::from_chrono(now),
            "created_by": AUDIT_ACTOR,
        };

        self.collection
            .insert_one(document, None)
            .await
            .context("Failed to insert frete document")?;

        Ok(Frete {
            id: id.to_hex(),
            seller_id: new.seller_id,
            sku: new.sku,
            valor: new.valor,
            created_at: Some(now),
            updated_at: None,
            created_by: Some(AUDIT_ACTOR.to_string()),
            updated_by: None,
        })
    }

    async fn find(
        &self,
        filters: &FreteFilters,
        limit: i64,
        offset: u64,
        sort: &[(String, SortDirection)],
    ) -> Result<Vec<Frete>> {
        let mut filter = filters_to_document(filters);
        require_sort_fields(&mut filter, sort);

        let mut options = FindOptions::builder().skip(offset).limit(limit).build();
        let sort_document = sort_to_document(sort);
        if !sort_document.is_empty() {
            options.sort = Some(sort_document);
        }

        let mut cursor = self
            .collection
            .find(filter, options)
            .await
            .context("Failed to query frete documents")?;

        let mut fretes = Vec::new();
        while let Some(document) = cursor
            .try_next()
            .await
            .context("Failed to read frete cursor")?
        {
            fretes.push(from_document(&document)?);
        }

        Ok(fretes)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Frete>> {
        // 非法 id 等同于不存在
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        let document = self
            .collection
            .find_one(doc! {"_id": oid}, None)
            .await
            .context("Failed to query frete document by id")?;

        document.as_ref().map(from_document).transpose()
    }

    async fn find_one_by_key(&self, seller_id: &str, sku: &str) -> Result<Option<Frete>> {
        let document = self
            .collection
            .find_one(doc! {"seller_id": seller_id, "sku": sku}, None)
            .await
            .context("Failed to query frete document by key")?;

        document.as_ref().map(from_document).transpose()
    }

    async fn update(&self, id: &str, frete: &Frete) -> Result<Option<Frete>> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        let update = doc! {
            "$set": {
                "seller_id": &frete.seller_id,
                "sku": &frete.sku,
                "valor": frete.valor,
                "updated_at": BsonDateTime::from_chrono(Utc::now()),
                "updated_by": AUDIT_ACTOR,
            }
        };
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .collection
            .find_one_and_update(doc! {"_id": oid}, update, options)
            .await
            .context("Failed to update frete document")?;

        updated.as_ref().map(from_document).transpose()
    }

    async fn delete_by_key(&self, seller_id: &str, sku: &str) -> Result<bool> {
        let result = self
            .collection
            .delete_one(doc! {"seller_id": seller_id, "sku": sku}, None)
            .await
            .context("Failed to delete frete document")?;

        Ok(result.deleted_count > 0)
    }
}
