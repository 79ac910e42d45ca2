//! Wiki domain types.

mod page;

pub use page::Page;
