//! DTOs exchanged by the trainer search services.

use serde::{Deserialize, Serialize};

use crate::domain::trainer::PublicTrainer;

/// Search input as received from the caller, before normalization.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub search_term: String,
    pub specialty_filter: String,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// One page of approved trainers together with the paging metadata.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub trainers: Vec<PublicTrainer>,
    /// Number of matches over all pages.
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    /// Page links to render; `null` marks a gap.
    pub pages: Vec<Option<usize>>,
    pub search_term: String,
    pub specialty_filter: String,
}
