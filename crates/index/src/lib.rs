//! Document repository and search for the praise deck catalog.
//!
//! The repository is an in-memory ordered collection of [`DocumentRecord`]s
//! backed by a single JSON file; the search engine scores and ranks records
//! against a query and a [`SearchMode`].
//!
//! [`DocumentRecord`]: praise_core::DocumentRecord

pub mod search;
pub mod store;

pub use search::{search, SearchMode};
pub use store::DocumentStore;
