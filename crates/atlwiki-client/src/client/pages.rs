//! Page operations for the wiki API.

use std::time::Instant;

use serde::Deserialize;
use tracing::info;

use super::WikiClient;
use crate::error::WikiError;
use crate::types::Page;

/// Page detail as returned by `/rest/api/content/{id}`.
///
/// Missing and `null` fields both decode as empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PageDetail {
    title: Option<String>,
    body: Option<PageBody>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PageBody {
    storage: Option<Storage>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Storage {
    value: Option<String>,
}

impl PageBody {
    fn into_storage_value(self) -> Option<String> {
        self.storage.and_then(|storage| storage.value)
    }
}

/// Relative path of the page detail endpoint.
fn page_path(id: i64, with_content: bool) -> String {
    let mut path = format!("/rest/api/content/{id}");
    if with_content {
        path.push_str("?expand=body.storage");
    }
    path
}

impl WikiClient {
    /// Get page by ID, optionally with its storage-format body.
    ///
    /// The returned page carries the requested `id`. `content` is empty
    /// unless `with_content` is set.
    pub fn get_page(&self, id: i64, with_content: bool) -> Result<Page, WikiError> {
        self.get_page_with_deadline(id, with_content, None)
    }

    /// Same as [`get_page`](Self::get_page), failing with
    /// [`WikiError::DeadlineExceeded`] if `deadline` has already passed and
    /// bounding the request by the time left otherwise.
    pub fn get_page_with_deadline(
        &self,
        id: i64,
        with_content: bool,
        deadline: Option<Instant>,
    ) -> Result<Page, WikiError> {
        info!("Getting page {}", id);

        let raw = self.get(&page_path(id, with_content), deadline)?;
        let PageDetail { title, body } = serde_json::from_slice(&raw)?;

        let content = if with_content {
            body.and_then(PageBody::into_storage_value)
                .unwrap_or_default()
        } else {
            String::new()
        };

        Ok(Page {
            id,
            title: title.unwrap_or_default(),
            content,
        })
    }
}
