use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::library::{codec, entities::Song, errors::Result};

/// File name the catalog has always been stored under
pub const DEFAULT_FILE_NAME: &str = "Song Storage.txt";

/// Where a catalog is loaded from and written back to
pub trait Storage {
    /// Load every stored song in order. Missing or unreadable storage yields an empty list.
    fn load(&self) -> Vec<Song>;

    /// Replace the stored content with exactly `songs`
    fn save(&mut self, songs: &[Song]) -> Result<()>;
}

/// Songs stored one per line in a text file
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Storage at an explicit path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStorage { path: path.into() }
    }

    /// Storage file in the user's local data directory, or the working directory if there is none
    pub fn default_location() -> Self {
        let path = match dirs::data_local_dir() {
            Some(dir) => dir.join("songbook").join(DEFAULT_FILE_NAME),
            None => PathBuf::from(DEFAULT_FILE_NAME),
        };
        FileStorage::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for FileStorage {
    fn load(&self) -> Vec<Song> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(
                    "No existing song storage found at {:?}. Starting with an empty list.",
                    self.path
                );
                return vec![];
            }
            Err(e) => {
                warn!("Could not open song storage at {:?}: {e}", self.path);
                return vec![];
            }
        };

        let songs = codec::read_all(BufReader::new(file));
        debug!("Loaded {} songs from {:?}", songs.len(), self.path);
        songs
    }

    fn save(&mut self, songs: &[Song]) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.path)?;
        codec::write_all(BufWriter::new(file), songs)?;

        debug!("Saved {} songs to {:?}", songs.len(), self.path);
        Ok(())
    }
}

/// Keeps the encoded catalog in memory, for tests and dry runs
#[derive(Default)]
pub struct MemoryStorage {
    contents: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    /// Start from existing file content
    pub fn with_contents(contents: impl Into<String>) -> Self {
        MemoryStorage {
            contents: Some(contents.into()),
        }
    }

    /// What a file backend would now hold, `None` until the first save
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Vec<Song> {
        match &self.contents {
            Some(contents) => codec::read_all(contents.as_bytes()),
            None => vec![],
        }
    }

    fn save(&mut self, songs: &[Song]) -> Result<()> {
        let mut buffer = vec![];
        codec::write_all(&mut buffer, songs)?;
        self.contents = Some(String::from_utf8_lossy(&buffer).into_owned());
        Ok(())
    }
}
