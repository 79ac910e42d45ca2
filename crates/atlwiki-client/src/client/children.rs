//! Child page operations for the wiki API.
//!
//! Child listing is only available through the v2 endpoint family, which
//! returns IDs as strings.

use std::time::Instant;

use serde::Deserialize;
use tracing::{debug, info};

use super::WikiClient;
use crate::error::WikiError;

/// Children listing as returned by `/api/v2/pages/{id}/children`.
///
/// Missing or `null` results mean no children. A child without an ID keeps
/// an empty one, which then fails conversion.
#[derive(Debug, Deserialize)]
struct ChildrenResponse {
    #[serde(default)]
    results: Option<Vec<Option<ChildRef>>>,
    #[serde(rename = "_links", default)]
    links: Option<ChildrenLinks>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChildRef {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChildrenLinks {
    #[serde(default)]
    next: Option<String>,
}

impl WikiClient {
    /// Get IDs of the direct children of a page, in server order.
    ///
    /// Only the first page of results is read; a `next` cursor is not followed.
    pub fn get_children_ids(&self, id: i64) -> Result<Vec<i64>, WikiError> {
        self.get_children_ids_with_deadline(id, None)
    }

    /// Same as [`get_children_ids`](Self::get_children_ids), bounded by `deadline`.
    pub fn get_children_ids_with_deadline(
        &self,
        id: i64,
        deadline: Option<Instant>,
    ) -> Result<Vec<i64>, WikiError> {
        info!("Getting children of page {}", id);

        let body = self.get(&format!("/api/v2/pages/{id}/children"), deadline)?;
        let response: ChildrenResponse = serde_json::from_slice(&body)?;

        if let Some(next) = response.links.and_then(|links| links.next) {
            debug!("Page {} has more children than returned (next: {})", id, next);
        }

        let ids = response
            .results
            .unwrap_or_default()
            .into_iter()
            .map(|child| {
                let raw = child.and_then(|c| c.id).unwrap_or_default();
                raw.parse::<i64>()
                    .map_err(|source| WikiError::Conversion { id: raw, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!("Found {} children of page {}", ids.len(), id);
        Ok(ids)
    }
}
