// SPDX-License-Identifier: Apache-2.0

use crate::error::StoreError;
use crate::filter::{DocumentFilter, FilterClause};
use crate::gateway::{Collection, DocumentGateway};
use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Bson, Document};
use futures_util::TryStreamExt;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use std::time::Duration;
use tracing::{info, warn};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Gateway over a MongoDB database. Connected once at process start;
/// a failed initial connection leaves the gateway in an unavailable
/// mode where every operation short-circuits with
/// [`StoreErrorCode::Unavailable`](crate::StoreErrorCode::Unavailable).
pub struct MongoGateway {
    database: Option<Database>,
}

impl MongoGateway {
    pub async fn connect(url: &str, database_name: &str) -> Self {
        match Self::try_connect(url, database_name).await {
            Ok(database) => {
                info!(database = database_name, "connected to document store");
                Self {
                    database: Some(database),
                }
            }
            Err(err) => {
                warn!(error = %err, "document store unreachable, store-backed endpoints will report unavailable");
                Self { database: None }
            }
        }
    }

    async fn try_connect(url: &str, database_name: &str) -> Result<Database, StoreError> {
        let mut options = ClientOptions::parse(url).await.map_err(driver_error)?;
        options.server_selection_timeout = Some(CONNECT_TIMEOUT);
        options.connect_timeout = Some(CONNECT_TIMEOUT);
        let client = Client::with_options(options).map_err(driver_error)?;
        let database = client.database(database_name);
        database
            .run_command(doc! {"ping": 1})
            .await
            .map_err(driver_error)?;
        Ok(database)
    }

    fn collection(&self, collection: Collection) -> Result<mongodb::Collection<Document>, StoreError> {
        let database = self.database.as_ref().ok_or_else(|| {
            StoreError::unavailable("document store connection was never established")
        })?;
        Ok(database.collection::<Document>(collection.as_str()))
    }
}

fn driver_error(err: mongodb::error::Error) -> StoreError {
    StoreError::internal(err.to_string())
}

fn filter_document(filter: &DocumentFilter) -> Document {
    let mut query = Document::new();
    for clause in filter.clauses() {
        match clause {
            FilterClause::NameContains(needle) => {
                query.insert(
                    "name",
                    doc! {"$regex": regex::escape(needle), "$options": "i"},
                );
            }
            FilterClause::SizeIs(size) => {
                query.insert(
                    "$or",
                    vec![doc! {"sizes.size": size.as_str()}, doc! {"size": size.as_str()}],
                );
            }
            FilterClause::UserIdIs(user_id) => {
                query.insert("user_address.user_id", user_id.as_str());
            }
        }
    }
    query
}

#[async_trait]
impl DocumentGateway for MongoGateway {
    async fn insert(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<ObjectId, StoreError> {
        let result = self
            .collection(collection)?
            .insert_one(document)
            .await
            .map_err(driver_error)?;
        match result.inserted_id {
            Bson::ObjectId(id) => Ok(id),
            other => Err(StoreError::internal(format!(
                "store assigned a non-object id: {other}"
            ))),
        }
    }

    async fn find_one(
        &self,
        collection: Collection,
        id: ObjectId,
    ) -> Result<Option<Document>, StoreError> {
        self.collection(collection)?
            .find_one(doc! {"_id": id})
            .await
            .map_err(driver_error)
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &DocumentFilter,
        skip: u64,
        limit: i64,
    ) -> Result<Vec<Document>, StoreError> {
        let cursor = self
            .collection(collection)?
            .find(filter_document(filter))
            .sort(doc! {"_id": 1})
            .skip(skip)
            .limit(limit)
            .await
            .map_err(driver_error)?;
        cursor.try_collect().await.map_err(driver_error)
    }

    async fn count(
        &self,
        collection: Collection,
        filter: &DocumentFilter,
    ) -> Result<u64, StoreError> {
        self.collection(collection)?
            .count_documents(filter_document(filter))
            .await
            .map_err(driver_error)
    }

    async fn decrement_checked(
        &self,
        collection: Collection,
        id: ObjectId,
        field_path: &str,
        amount: i64,
    ) -> Result<bool, StoreError> {
        let mut query = doc! {"_id": id};
        query.insert(field_path, doc! {"$gte": amount});
        let mut delta = Document::new();
        delta.insert(field_path, -amount);
        let result = self
            .collection(collection)?
            .update_one(query, doc! {"$inc": delta})
            .await
            .map_err(driver_error)?;
        Ok(result.modified_count > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let database = self.database.as_ref().ok_or_else(|| {
            StoreError::unavailable("document store connection was never established")
        })?;
        database
            .run_command(doc! {"ping": 1})
            .await
            .map_err(driver_error)?;
        Ok(())
    }
}
