// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Pagination envelope entry. `next` and `previous` are offsets into
/// the full result set and are absent (not null) at the edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<u64>,
    pub limit: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<u64>,
}

impl PageInfo {
    /// `next = offset + limit` iff more results exist beyond the
    /// window; `previous = max(0, offset - limit)` iff `offset > 0`.
    #[must_use]
    pub fn for_window(offset: u64, limit: i64, total: u64) -> Self {
        let span = limit.max(0) as u64;
        let next = if offset + span < total {
            Some(offset + span)
        } else {
            None
        };
        let previous = if offset > 0 {
            Some(offset.saturating_sub(span))
        } else {
            None
        };
        Self {
            next,
            limit,
            previous,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub page: PageInfo,
}

impl<T> ListResponse<T> {
    #[must_use]
    pub fn for_window(data: Vec<T>, offset: u64, limit: i64, total: u64) -> Self {
        Self {
            data,
            page: PageInfo::for_window(offset, limit, total),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatedResponse {
    pub id: String,
}
