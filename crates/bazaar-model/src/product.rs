// SPDX-License-Identifier: Apache-2.0

use crate::ValidationError;
use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Store-assigned product identifier. Constructed from its canonical
/// 24-hex string form; malformed input is rejected before any store
/// operation sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProductId(ObjectId);

impl ProductId {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        ObjectId::parse_str(input)
            .map(Self)
            .map_err(|_| ValidationError::MalformedId(input.to_string()))
    }

    #[must_use]
    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl From<ObjectId> for ProductId {
    fn from(id: ObjectId) -> Self {
        Self(id)
    }
}

/// Inventory for one size variant of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SizeBucket {
    pub size: String,
    pub quantity: i64,
}

/// Product creation payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub sizes: Vec<SizeBucket>,
}

impl NewProduct {
    /// Semantic validation, enforced before any store write.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.price.is_finite() {
            return Err(ValidationError::NotFinite("price"));
        }
        if self.price < 0.0 {
            return Err(ValidationError::Negative("price"));
        }
        if self.sizes.is_empty() {
            return Err(ValidationError::Empty("sizes"));
        }
        for bucket in &self.sizes {
            if bucket.quantity < 0 {
                return Err(ValidationError::Negative("sizes.quantity"));
            }
        }
        Ok(())
    }
}

/// A product as it comes back from the normalizer. Historical
/// documents carry a single `size` plus `inventory_count` instead of
/// the `sizes` array; the union is resolved once, on read, and the
/// rest of the system only ever sees [`Product`].
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProductShape {
    Current {
        id: String,
        name: String,
        price: f64,
        sizes: Vec<SizeBucket>,
        #[serde(default)]
        created_at: Option<String>,
    },
    Legacy {
        id: String,
        name: String,
        price: f64,
        size: String,
        #[serde(default)]
        inventory_count: i64,
        #[serde(default)]
        created_at: Option<String>,
    },
}

impl ProductShape {
    /// Resolves the union into the unified public shape. Legacy-only
    /// fields (`description`, `category`) do not survive this step.
    #[must_use]
    pub fn into_product(self) -> Product {
        match self {
            Self::Current {
                id,
                name,
                price,
                sizes,
                created_at,
            } => Product {
                id,
                name,
                price,
                sizes,
                created_at,
            },
            Self::Legacy {
                id,
                name,
                price,
                size,
                inventory_count,
                created_at,
            } => Product {
                id,
                name,
                price,
                sizes: vec![SizeBucket {
                    size,
                    quantity: inventory_count,
                }],
                created_at,
            },
        }
    }
}

/// Public product shape returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub sizes: Vec<SizeBucket>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}
