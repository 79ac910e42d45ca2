//! Atlassian wiki (Confluence Cloud) client for atlwiki.
//!
//! This crate provides read access to a hosted wiki:
//! - [`WikiClient::get_page`]: page title and optional storage-format body
//! - [`WikiClient::get_children_ids`]: identifiers of a page's direct children
//!
//! Requests are authenticated with basic credentials (account username and
//! API token) against `https://{company}.atlassian.net/wiki`.
//!
//! ```ignore
//! use atlwiki_client::WikiClient;
//!
//! let client = WikiClient::new("acme", "jane@acme.com", "api-token");
//!
//! let page = client.get_page(123, true)?;
//! println!("Page title: {}", page.title);
//!
//! for child in client.get_children_ids(123)? {
//!     println!("child: {child}");
//! }
//! ```

// API client
mod client;
pub use client::{WikiClient, cloud_base_url};

// Domain types
mod types;
pub use types::Page;

// Errors
pub mod error;
pub use error::{ErrorKind, WikiError};
