use log::{debug, error, info, warn};

use crate::library::{
    codec,
    entities::Song,
    local_storage::{FileStorage, Storage},
};

/// Ordered song collection that writes itself back to storage after every change.
///
/// Insertion order is the listing order. Titles are not unique; removal always takes the first
/// match. If a save fails the in-memory catalog stays authoritative for the rest of the session.
pub struct Catalog<S: Storage = FileStorage> {
    songs: Vec<Song>,
    storage: S,
}

impl<S: Storage> Catalog<S> {
    /// Hydrate a catalog from its storage
    pub fn open(storage: S) -> Self {
        let songs = storage.load();
        info!("Opened catalog with {} songs", songs.len());
        Catalog { songs, storage }
    }

    /// Append a song and persist the catalog. Counts are stored as given; keeping them
    /// non-negative is up to the caller.
    pub fn add(
        &mut self,
        artist: impl Into<String>,
        title: impl Into<String>,
        play_count: i32,
        duration_seconds: i32,
    ) -> Song {
        let song = Song::new(artist, title, play_count, duration_seconds);
        if !codec::is_encodable(&song) {
            warn!("{song} contains a comma or line break and will not load back correctly");
        }
        self.songs.push(song.clone());
        self.persist();
        song
    }

    /// Remove the first song whose title matches, ignoring case.
    /// Returns false and leaves storage untouched when nothing matches.
    pub fn remove(&mut self, title: &str) -> bool {
        let Some(index) = self.songs.iter().position(|s| s.title_matches(title)) else {
            debug!("No song titled {title:?} to remove");
            return false;
        };
        let song = self.songs.remove(index);
        debug!("Removed {song}");
        self.persist();
        true
    }

    /// Snapshot of every song in insertion order
    pub fn list_all(&self) -> Vec<Song> {
        self.songs.clone()
    }

    /// Snapshot of the songs played strictly more than `threshold` times, in insertion order
    pub fn list_above(&self, threshold: i64) -> Vec<Song> {
        self.songs
            .iter()
            .filter(|s| i64::from(s.play_count) > threshold)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&mut self) {
        if let Err(e) = self.storage.save(&self.songs) {
            error!(
                "Error saving songs: {e}. Keeping {} songs in memory only.",
                self.songs.len()
            );
        }
    }
}
