//! s3mirror Core - Domain logic and port definitions
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain types** - `Sourcefile`, `Index` (the content index and its
//!   durable YAML form)
//! - **Port definitions** - Traits for adapters: `ObjectStore`, `FileSource`,
//!   `ContentHasher`, `TreeWalker`
//! - **Configuration** - Typed config with loading, defaults and validation
//!
//! # Architecture
//!
//! This crate follows the hexagonal (ports & adapters) architecture pattern.
//! The domain module contains pure business logic with no I/O dependencies.
//! Ports define trait interfaces that adapter crates implement; the sync
//! engine in `s3mirror-sync` orchestrates domain types through those ports.

pub mod config;
pub mod domain;
pub mod ports;
