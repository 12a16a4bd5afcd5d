//! Port definitions (hexagonal architecture interfaces)
//!
//! This module defines the port traits that form the boundaries of the
//! hexagonal architecture. Ports are interfaces that the sync engine
//! depends on, but whose implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`ObjectStore`] - Remote key/value object storage (S3, test doubles)
//! - [`FileSource`] - Reading local file contents
//! - [`ContentHasher`] - Digesting local file contents
//! - [`TreeWalker`] - Enumerating the files of a local tree

pub mod file_source;
pub mod object_store;

pub use file_source::{ContentHasher, FileSource, TreeWalker};
pub use object_store::{ObjectStore, StoreError};
