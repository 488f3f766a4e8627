// SPDX-License-Identifier: Apache-2.0

use bson::Document;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterClause {
    /// Case-insensitive substring match on `name`, not anchored.
    NameContains(String),
    /// Any `sizes[].size` equals the value, or the top-level `size`
    /// field does (legacy shape).
    SizeIs(String),
    /// `user_address.user_id` equals the value exactly.
    UserIdIs(String),
}

/// Conjunction of filter clauses. The Mongo backend translates the
/// clauses into a query document; [`DocumentFilter::matches`] is the
/// reference semantics, used directly by the in-memory backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFilter {
    clauses: Vec<FilterClause>,
}

impl DocumentFilter {
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, clause: FilterClause) -> Self {
        self.clauses.push(clause);
        self
    }

    #[must_use]
    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    #[must_use]
    pub fn matches(&self, document: &Document) -> bool {
        self.clauses
            .iter()
            .all(|clause| clause_matches(clause, document))
    }
}

fn clause_matches(clause: &FilterClause, document: &Document) -> bool {
    match clause {
        FilterClause::NameContains(needle) => document
            .get_str("name")
            .is_ok_and(|name| name.to_lowercase().contains(&needle.to_lowercase())),
        FilterClause::SizeIs(wanted) => {
            let in_buckets = document.get_array("sizes").is_ok_and(|sizes| {
                sizes.iter().any(|entry| {
                    entry
                        .as_document()
                        .and_then(|bucket| bucket.get_str("size").ok())
                        .is_some_and(|size| size == wanted)
                })
            });
            in_buckets || document.get_str("size").is_ok_and(|size| size == wanted)
        }
        FilterClause::UserIdIs(user_id) => document
            .get_document("user_address")
            .ok()
            .and_then(|address| address.get_str("user_id").ok())
            .is_some_and(|value| value == user_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn name_filter_is_case_insensitive_and_unanchored() {
        let product = doc! {"name": "Samsung Galaxy S24"};
        let filter = DocumentFilter::all().with(FilterClause::NameContains("galaxy".to_string()));
        assert!(filter.matches(&product));

        let miss = DocumentFilter::all().with(FilterClause::NameContains("pixel".to_string()));
        assert!(!miss.matches(&product));
    }

    #[test]
    fn size_filter_scans_buckets_and_legacy_field() {
        let current = doc! {"sizes": [{"size": "medium", "quantity": 30}, {"size": "large", "quantity": 20}]};
        let legacy = doc! {"size": "medium", "inventory_count": 5};

        let medium = DocumentFilter::all().with(FilterClause::SizeIs("medium".to_string()));
        assert!(medium.matches(&current));
        assert!(medium.matches(&legacy));

        let small = DocumentFilter::all().with(FilterClause::SizeIs("small".to_string()));
        assert!(!small.matches(&current));
        assert!(!small.matches(&legacy));
    }

    #[test]
    fn user_filter_requires_exact_match() {
        let order = doc! {"user_address": {"user_id": "user123", "city": "New York"}};

        let exact = DocumentFilter::all().with(FilterClause::UserIdIs("user123".to_string()));
        assert!(exact.matches(&order));

        let prefix = DocumentFilter::all().with(FilterClause::UserIdIs("user12".to_string()));
        assert!(!prefix.matches(&order));
    }

    #[test]
    fn clauses_combine_with_and() {
        let product = doc! {"name": "Galaxy S24", "sizes": [{"size": "large", "quantity": 1}]};
        let both = DocumentFilter::all()
            .with(FilterClause::NameContains("galaxy".to_string()))
            .with(FilterClause::SizeIs("large".to_string()));
        assert!(both.matches(&product));

        let wrong_size = DocumentFilter::all()
            .with(FilterClause::NameContains("galaxy".to_string()))
            .with(FilterClause::SizeIs("small".to_string()));
        assert!(!wrong_size.matches(&product));
    }
}
