// SPDX-License-Identifier: Apache-2.0

use crate::error::StoreError;
use crate::filter::DocumentFilter;
use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Products,
    Orders,
}

impl Collection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Orders => "orders",
        }
    }
}

/// Collection-level access to the document store. `find` returns
/// documents in primary-id (insertion) order; it is the only ordering
/// the services use, so the contract pins it.
#[async_trait]
pub trait DocumentGateway: Send + Sync {
    async fn insert(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<ObjectId, StoreError>;

    async fn find_one(
        &self,
        collection: Collection,
        id: ObjectId,
    ) -> Result<Option<Document>, StoreError>;

    async fn find(
        &self,
        collection: Collection,
        filter: &DocumentFilter,
        skip: u64,
        limit: i64,
    ) -> Result<Vec<Document>, StoreError>;

    async fn count(&self, collection: Collection, filter: &DocumentFilter)
        -> Result<u64, StoreError>;

    /// Atomically subtracts `amount` from the numeric field at the
    /// dotted `field_path`, only if its current value is at least
    /// `amount`. Returns whether the decrement applied, so a raced
    /// caller can re-read and try again instead of overdrawing.
    async fn decrement_checked(
        &self,
        collection: Collection,
        id: ObjectId,
        field_path: &str,
        amount: i64,
    ) -> Result<bool, StoreError>;

    /// Health probe against the underlying connection.
    async fn ping(&self) -> Result<(), StoreError>;
}
