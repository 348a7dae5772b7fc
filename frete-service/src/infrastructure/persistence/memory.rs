//! 内存版运费仓储实现
//!
//! 记录保存在进程内的顺序列表中，仅用于开发和测试环境，
//! 生产部署使用 MongoDB 实现。

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::model::{Frete, FreteFilters, NewFrete, SortDirection};
use crate::domain::repository::FreteRepository;

const AUDIT_ACTOR: &str = "system";

#[derive(Default)]
pub struct MemoryFreteRepository {
    records: RwLock<Vec<Frete>>,
}

impl MemoryFreteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// 排序键取值；字段缺失时为 `None`，对应记录被排除出排序结果
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortValue {
    Text(String),
    Number(i64),
    Time(i64),
}

fn sort_value(frete: &Frete, field: &str) -> Option<SortValue> {
    match field {
        "seller_id" => Some(SortValue::Text(frete.seller_id.clone())),
        "sku" => Some(SortValue::Text(frete.sku.clone())),
        "valor" => Some(SortValue::Number(frete.valor)),
        "created_at" => frete
            .created_at
            .map(|at| SortValue::Time(at.timestamp_millis())),
        "updated_at" => frete
            .updated_at
            .map(|at| SortValue::Time(at.timestamp_millis())),
        // 未知字段视为所有记录都缺失
        _ => None,
    }
}

/// 从最后一个排序键向前逐键稳定排序，后面的键在前面的键相等时决定次序；
/// 缺失当前排序键的记录被排除
fn apply_sort(results: &mut Vec<Frete>, sort: &[(String, SortDirection)]) {
    for (field, direction) in sort.iter().rev() {
        results.retain(|frete| sort_value(frete, field).is_some());
        results.sort_by(|a, b| {
            let ordering = sort_value(a, field).cmp(&sort_value(b, field));
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }
}

#[async_trait]
impl FreteRepository for MemoryFreteRepository {
    async fn create(&self, new: NewFrete) -> Result<Frete> {
        let frete = Frete {
            id: Uuid::new_v4().to_string(),
            seller_id: new.seller_id,
            sku: new.sku,
            valor: new.valor,
            created_at: Some(Utc::now()),
            updated_at: None,
            created_by: Some(AUDIT_ACTOR.to_string()),
            updated_by: None,
        };

        let mut records = self.records.write().await;
        records.push(frete.clone());

        Ok(frete)
    }

    async fn find(
        &self,
        filters: &FreteFilters,
        limit: i64,
        offset: u64,
        sort: &[(String, SortDirection)],
    ) -> Result<Vec<Frete>> {
        let records = self.records.read().await;

        let mut results: Vec<Frete> = records
            .iter()
            .filter(|frete| filters.matches(frete))
            .cloned()
            .collect();

        apply_sort(&mut results, sort);

        Ok(results
            .into_iter()
            .skip(offset as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Frete>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|frete| frete.id == id).cloned())
    }

    async fn find_one_by_key(&self, seller_id: &str, sku: &str) -> Result<Option<Frete>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|frete| frete.seller_id == seller_id && frete.sku == sku)
            .cloned())
    }

    async fn update(&self, id: &str, frete: &Frete) -> Result<Option<Frete>> {
        let mut records = self.records.write().await;

        let Some(record) = records.iter_mut().find(|record| record.id == id) else {
            // id 未命中不是错误
            return Ok(None);
        };

        record.seller_id = frete.seller_id.clone();
        record.sku = frete.sku.clone();
        record.valor = frete.valor;
        record.updated_at = Some(Utc::now());
        record.updated_by = Some(AUDIT_ACTOR.to_string());

        Ok(Some(record.clone()))
    }

    async fn delete_by_key(&self, seller_id: &str, sku: &str) -> Result<bool> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|frete| !(frete.seller_id == seller_id && frete.sku == sku));
        Ok(records.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_frete(seller_id: &str, sku: &str, valor: i64) -> NewFrete {
        NewFrete {
            seller_id: seller_id.to_string(),
            sku: sku.to_string(),
            valor,
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_create_side_audit_fields() {
        let repository = MemoryFreteRepository::new();

        let created = repository.create(new_frete("S1", "SKU1", 100)).await.unwrap();

        assert!(!created.id.is_empty());
        assert!(created.created_at.is_some());
        assert_eq!(created.created_by.as_deref(), Some("system"));
        assert!(created.updated_at.is_none());
        assert!(created.updated_by.is_none());
    }

    #[tokio::test]
    async fn find_applies_filter_sort_and_slice() {
        let repository = MemoryFreteRepository::new();
        repository.create(new_frete("S1", "SKU1", 300)).await.unwrap();
        repository.create(new_frete("S1", "SKU2", 100)).await.unwrap();
        repository.create(new_frete("S1", "SKU3", 200)).await.unwrap();
        repository.create(new_frete("S2", "SKU1", 50)).await.unwrap();

        let filters = FreteFilters {
            seller_id: Some("S1".to_string()),
            ..FreteFilters::default()
        };
        let sort = vec![("valor".to_string(), SortDirection::Ascending)];

        let page = repository.find(&filters, 2, 1, &sort).await.unwrap();

        assert_eq!(page.len(), 2);
        assert_eq!(page[0].valor, 200);
        assert_eq!(page[1].valor, 300);
    }

    #[tokio::test]
    async fn later_sort_keys_break_ties_of_earlier_ones() {
        let repository = MemoryFreteRepository::new();
        repository.create(new_frete("S1", "SKU2", 100)).await.unwrap();
        repository.create(new_frete("S1", "SKU1", 100)).await.unwrap();
        repository.create(new_frete("S1", "SKU3", 50)).await.unwrap();

        let sort = vec![
            ("valor".to_string(), SortDirection::Ascending),
            ("sku".to_string(), SortDirection::Ascending),
        ];

        let results = repository
            .find(&FreteFilters::default(), 10, 0, &sort)
            .await
            .unwrap();

        let skus: Vec<&str> = results.iter().map(|frete| frete.sku.as_str()).collect();
        assert_eq!(skus, vec!["SKU3", "SKU1", "SKU2"]);
    }

    #[tokio::test]
    async fn records_missing_a_sort_field_are_excluded() {
        let repository = MemoryFreteRepository::new();
        let first = repository.create(new_frete("S1", "SKU1", 100)).await.unwrap();
        repository.create(new_frete("S1", "SKU2", 200)).await.unwrap();

        // 只有更新过的记录才有 updated_at
        let mut touched = first.clone();
        touched.valor = 150;
        repository.update(&first.id, &touched).await.unwrap();

        let sort = vec![("updated_at".to_string(), SortDirection::Ascending)];
        let results = repository
            .find(&FreteFilters::default(), 10, 0, &sort)
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].sku, "SKU1");
    }

    #[tokio::test]
    async fn unknown_sort_field_empties_the_result() {
        let repository = MemoryFreteRepository::new();
        repository.create(new_frete("S1", "SKU1", 100)).await.unwrap();

        let sort = vec![("no_such_field".to_string(), SortDirection::Ascending)];
        let results = repository
            .find(&FreteFilters::default(), 10, 0, &sort)
            .await
            .unwrap();

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn update_overwrites_fields_and_stamps_update_audit() {
        let repository = MemoryFreteRepository::new();
        let created = repository.create(new_frete("S1", "SKU1", 100)).await.unwrap();

        let mut changed = created.clone();
        changed.valor = 250;

        let updated = repository.update(&created.id, &changed).await.unwrap().unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.valor, 250);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at.is_some());
        assert_eq!(updated.updated_by.as_deref(), Some("system"));
    }

    #[tokio::test]
    async fn find_by_id_resolves_assigned_ids_only() {
        let repository = MemoryFreteRepository::new();
        let created = repository.create(new_frete("S1", "SKU1", 100)).await.unwrap();

        let found = repository.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(found.sku, "SKU1");

        assert!(repository.find_by_id("missing-id").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_with_unknown_id_returns_none() {
        let repository = MemoryFreteRepository::new();
        let created = repository.create(new_frete("S1", "SKU1", 100)).await.unwrap();

        let result = repository.update("missing-id", &created).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_by_key_reports_whether_a_record_was_removed() {
        let repository = MemoryFreteRepository::new();
        repository.create(new_frete("S1", "SKU1", 100)).await.unwrap();

        assert!(repository.delete_by_key("S1", "SKU1").await.unwrap());
        assert!(!repository.delete_by_key("S1", "SKU1").await.unwrap());
        assert!(repository
            .find_one_by_key("S1", "SKU1")
            .await
            .unwrap()
            .is_none());
    }
}
