// SPDX-License-Identifier: Apache-2.0

//! Public wire surface of the bazaar backend: the error payload and
//! its HTTP status mapping, strict query-parameter parsing, and the
//! pagination envelope shared by both listing endpoints.

#![forbid(unsafe_code)]

mod dto;
mod error_mapping;
mod errors;
mod params;

pub use dto::{CreatedResponse, ListResponse, PageInfo};
pub use error_mapping::status_for;
pub use errors::{ApiError, ApiErrorCode};
pub use params::{
    parse_page_params, parse_product_list_params, PageParams, ProductListParams, DEFAULT_LIMIT,
    MAX_LIMIT,
};
