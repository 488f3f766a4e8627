// SPDX-License-Identifier: Apache-2.0

use crate::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One order line: a product reference and the requested quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderItem {
    pub productid: String,
    pub qty: i64,
}

/// Order creation payload. `total_amount` is caller-supplied and
/// accepted as-is; `user_address` is an open map whose only required
/// key is `user_id`, everything else passes through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    pub user_address: Map<String, Value>,
}

impl NewOrder {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for item in &self.items {
            if item.qty < 1 {
                return Err(ValidationError::NonPositive("items.qty"));
            }
        }
        if !self.user_address.contains_key("user_id") {
            return Err(ValidationError::MissingKey("user_address.user_id"));
        }
        Ok(())
    }
}
