// SPDX-License-Identifier: Apache-2.0

//! Persistence gateway for the bazaar backend. One long-lived
//! [`MongoGateway`] is constructed at startup and shared by reference
//! across requests; if the store is unreachable at startup the gateway
//! degrades to an unavailable mode in which every operation
//! short-circuits instead of touching the driver. [`MemoryGateway`]
//! implements the same contract in memory for tests.

#![forbid(unsafe_code)]

mod error;
mod filter;
mod gateway;
mod memory;
mod mongo;
mod normalize;

pub use error::{StoreError, StoreErrorCode};
pub use filter::{DocumentFilter, FilterClause};
pub use gateway::{Collection, DocumentGateway};
pub use memory::MemoryGateway;
pub use mongo::MongoGateway;
pub use normalize::normalize;
