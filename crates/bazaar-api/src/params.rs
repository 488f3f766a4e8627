// SPDX-License-Identifier: Apache-2.0

use crate::errors::ApiError;
use std::collections::BTreeMap;

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub limit: i64,
    pub offset: u64,
}

/// Strict limit/offset parsing. Out-of-range values are reported to
/// the caller, never clamped.
pub fn parse_page_params(query: &BTreeMap<String, String>) -> Result<PageParams, ApiError> {
    let limit = match query.get("limit") {
        Some(raw) => {
            let value = raw
                .parse::<i64>()
                .map_err(|_| ApiError::invalid_param("limit", raw))?;
            if !(1..=MAX_LIMIT).contains(&value) {
                return Err(ApiError::invalid_param("limit", raw));
            }
            value
        }
        None => DEFAULT_LIMIT,
    };

    let offset = match query.get("offset") {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|_| ApiError::invalid_param("offset", raw))?,
        None => 0,
    };

    Ok(PageParams { limit, offset })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductListParams {
    pub name: Option<String>,
    pub size: Option<String>,
    pub page: PageParams,
}

pub fn parse_product_list_params(
    query: &BTreeMap<String, String>,
) -> Result<ProductListParams, ApiError> {
    Ok(ProductListParams {
        name: query.get("name").cloned(),
        size: query.get("size").cloned(),
        page: parse_page_params(query)?,
    })
}
