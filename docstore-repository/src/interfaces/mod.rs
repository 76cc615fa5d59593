//! Interface definitions for the document store.
//!
//! This module defines the abstract `DocumentStoreProvider` trait that allows
//! for dependency injection and swappable backend implementations.

mod document_store_provider;

pub use document_store_provider::DocumentStoreProvider;
