/// In-memory song catalog with write-through persistence
pub mod catalog;
/// Text line format for songs and whole catalogs
pub mod codec;
/// Song record
pub mod entities;
/// Error types and result aliases
pub mod errors;
/// File and in-memory storage backends
pub mod local_storage;
/// Shuffle playback state machine
pub mod playback;

pub use catalog::Catalog;
pub use entities::Song;
pub use local_storage::{FileStorage, MemoryStorage, Storage};
pub use playback::{PlaybackEvent, PlaybackPace, PlaybackSession, PlaybackState};
