// SPDX-License-Identifier: Apache-2.0

use crate::{ApiError, ApiErrorCode};

/// HTTP status for an error payload. Insufficient inventory is a 400
/// like the other client errors, not a 409.
#[must_use]
pub fn status_for(error: &ApiError) -> u16 {
    match error.code {
        ApiErrorCode::ValidationFailed
        | ApiErrorCode::InvalidQueryParameter
        | ApiErrorCode::InsufficientInventory => 400,
        ApiErrorCode::ProductNotFound => 404,
        ApiErrorCode::StoreUnavailable => 503,
        ApiErrorCode::Internal => 500,
    }
}
