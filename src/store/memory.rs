//! In-memory record store.
//!
//! Default backend when no database is configured, and the store behind the
//! unit and integration tests. Records are kept in id order, which is also
//! the list order.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::PscError;
use crate::models::{DeltaAt, PscDocument};
use crate::ports::{RecordStore, Result};

#[derive(Clone, Default)]
pub struct MemoryRecordStore {
    records: Arc<RwLock<BTreeMap<String, PscDocument>>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn page<'a>(
        records: impl Iterator<Item = &'a PscDocument>,
        start_index: u32,
        page_size: u32,
    ) -> Vec<PscDocument> {
        records
            .skip(start_index as usize)
            .take(page_size as usize)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<PscDocument>> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn find_by_company_and_id(
        &self,
        company_number: &str,
        id: &str,
    ) -> Result<Option<PscDocument>> {
        let records = self.records.read().await;
        Ok(records
            .get(id)
            .filter(|doc| doc.company_number == company_number)
            .cloned())
    }

    async fn find_newer_or_equal(&self, id: &str, delta_at: &DeltaAt) -> Result<bool> {
        let records = self.records.read().await;
        Ok(records.get(id).is_some_and(|doc| doc.delta_at >= *delta_at))
    }

    async fn save(&self, document: &PscDocument) -> Result<()> {
        if document.id.trim().is_empty() || document.company_number.trim().is_empty() {
            return Err(PscError::BadRequest(
                "record requires an id and a company number".into(),
            ));
        }
        self.records
            .write()
            .await
            .insert(document.id.clone(), document.clone());
        Ok(())
    }

    async fn delete(&self, document: &PscDocument) -> Result<()> {
        self.records.write().await.remove(&document.id);
        Ok(())
    }

    async fn list_page(
        &self,
        company_number: &str,
        start_index: u32,
        page_size: u32,
    ) -> Result<Vec<PscDocument>> {
        let records = self.records.read().await;
        Ok(Self::page(
            records
                .values()
                .filter(|doc| doc.company_number == company_number),
            start_index,
            page_size,
        ))
    }

    async fn list_page_since(
        &self,
        company_number: &str,
        start_index: u32,
        page_size: u32,
        cutoff: NaiveDate,
    ) -> Result<Vec<PscDocument>> {
        let records = self.records.read().await;
        Ok(Self::page(
            records.values().filter(|doc| {
                doc.company_number == company_number
                    && doc.ceased_on().is_none_or(|ceased_on| ceased_on > cutoff)
            }),
            start_index,
            page_size,
        ))
    }
}
