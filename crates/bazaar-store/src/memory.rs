// SPDX-License-Identifier: Apache-2.0

use crate::error::StoreError;
use crate::filter::DocumentFilter;
use crate::gateway::{Collection, DocumentGateway};
use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{Bson, Document};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

/// In-memory gateway used by tests. Documents are held in insertion
/// order, which is also the primary-id order the Mongo backend
/// produces, since ids are generated monotonically within a process.
#[derive(Default)]
pub struct MemoryGateway {
    products: Mutex<Vec<Document>>,
    orders: Mutex<Vec<Document>>,
    unavailable: AtomicBool,
}

impl MemoryGateway {
    /// Makes every subsequent operation fail as if the store
    /// connection was never established.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::Relaxed);
    }

    fn shelf(&self, collection: Collection) -> &Mutex<Vec<Document>> {
        match collection {
            Collection::Products => &self.products,
            Collection::Orders => &self.orders,
        }
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::Relaxed) {
            return Err(StoreError::unavailable(
                "document store connection was never established",
            ));
        }
        Ok(())
    }
}

/// Walks a dotted field path (`sizes.0.quantity`) to the referenced
/// value, traversing arrays by numeric segment.
fn resolve_path<'a>(document: &'a mut Document, path: &str) -> Option<&'a mut Bson> {
    let mut segments = path.split('.');
    let mut current = document.get_mut(segments.next()?)?;
    for segment in segments {
        current = match current {
            Bson::Document(nested) => nested.get_mut(segment)?,
            Bson::Array(items) => items.get_mut(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

fn has_id(document: &Document, id: ObjectId) -> bool {
    document.get_object_id("_id").is_ok_and(|found| found == id)
}

#[async_trait]
impl DocumentGateway for MemoryGateway {
    async fn insert(
        &self,
        collection: Collection,
        mut document: Document,
    ) -> Result<ObjectId, StoreError> {
        self.check_available()?;
        let id = ObjectId::new();
        document.insert("_id", id);
        self.shelf(collection).lock().await.push(document);
        Ok(id)
    }

    async fn find_one(
        &self,
        collection: Collection,
        id: ObjectId,
    ) -> Result<Option<Document>, StoreError> {
        self.check_available()?;
        let shelf = self.shelf(collection).lock().await;
        Ok(shelf.iter().find(|document| has_id(document, id)).cloned())
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &DocumentFilter,
        skip: u64,
        limit: i64,
    ) -> Result<Vec<Document>, StoreError> {
        self.check_available()?;
        let shelf = self.shelf(collection).lock().await;
        Ok(shelf
            .iter()
            .filter(|document| filter.matches(document))
            .skip(skip as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn count(
        &self,
        collection: Collection,
        filter: &DocumentFilter,
    ) -> Result<u64, StoreError> {
        self.check_available()?;
        let shelf = self.shelf(collection).lock().await;
        Ok(shelf.iter().filter(|document| filter.matches(document)).count() as u64)
    }

    async fn decrement_checked(
        &self,
        collection: Collection,
        id: ObjectId,
        field_path: &str,
        amount: i64,
    ) -> Result<bool, StoreError> {
        self.check_available()?;
        let mut shelf = self.shelf(collection).lock().await;
        let Some(document) = shelf.iter_mut().find(|document| has_id(document, id)) else {
            return Ok(false);
        };
        let Some(slot) = resolve_path(document, field_path) else {
            return Ok(false);
        };
        match slot {
            Bson::Int64(value) if *value >= amount => {
                *value -= amount;
                Ok(true)
            }
            Bson::Int32(value) if i64::from(*value) >= amount => {
                *value -= amount as i32;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}
