//! Wiki page type.

use serde::Serialize;

/// Wiki page as returned by [`WikiClient::get_page`](crate::WikiClient::get_page).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Page ID (as requested by the caller).
    pub id: i64,
    /// Page title.
    pub title: String,
    /// Body in storage format. Empty unless content was requested.
    pub content: String,
}
