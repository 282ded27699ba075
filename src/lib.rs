//! Songbook - a personal song catalog kept in a plain text file
//!
//! This library provides the catalog itself, the line-oriented storage format it is
//! persisted in, and a shuffle playback session over its songs.

/// Catalog, storage and playback
pub mod library;
