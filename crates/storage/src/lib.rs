//! S3-compatible object storage: presigned playback URLs for audio objects.
//!
//! Presigning is a local computation over static credentials, so handing out
//! a URL never touches the network; only the eventual GET does.

pub mod client;
pub mod config;

pub use client::{StorageClient, StorageError};
pub use config::StorageConfig;
