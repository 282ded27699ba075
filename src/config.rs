use std::env::VarError;
use std::path::PathBuf;
use std::time::Duration;

use log::debug;
use songbook::library::{
    FileStorage, PlaybackPace,
    errors::{Error, Result},
};

pub const FILE_ENV: &str = "SONGBOOK_FILE";
pub const PLAY_SECONDS_ENV: &str = "SONGBOOK_PLAY_SECONDS";

// Configuration for a songbook run
pub struct Config {
    pub storage: FileStorage,
    pub pace: PlaybackPace,
}

// Explicit settings win over the environment, which wins over defaults
#[derive(Default)]
pub struct ConfigBuilder {
    storage_path: Option<PathBuf>,
    play_seconds: Option<u64>,
    real_time: bool,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn storage_path(mut self, path: Option<PathBuf>) -> Self {
        self.storage_path = path;
        self
    }

    pub fn play_seconds(mut self, seconds: Option<u64>) -> Self {
        self.play_seconds = seconds;
        self
    }

    pub fn real_time(mut self, real_time: bool) -> Self {
        self.real_time = real_time;
        self
    }

    pub fn build(self) -> Result<Config> {
        let storage = match self.storage_path {
            Some(path) => FileStorage::new(path),
            None => match env_var(FILE_ENV)? {
                Some(path) => FileStorage::new(path),
                None => FileStorage::default_location(),
            },
        };

        let pace = if self.real_time {
            PlaybackPace::TrackLength
        } else {
            let seconds = match self.play_seconds {
                Some(s) => Some(s),
                None => env_var(PLAY_SECONDS_ENV)?
                    .map(|v| parse_seconds(&v))
                    .transpose()?,
            };
            seconds.map_or_else(PlaybackPace::default, |s| {
                PlaybackPace::Simulated(Duration::from_secs(s))
            })
        };

        debug!("Storage file {:?}, playback pace {pace:?}", storage.path());
        Ok(Config { storage, pace })
    }
}

// Unset or empty is not an error, unreadable is
fn env_var(name: &str) -> Result<Option<String>> {
    match std::env::var(name) {
        Ok(value) if value.is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn parse_seconds(value: &str) -> Result<u64> {
    value.trim().parse().map_err(|_| {
        Error::ConfigurationError(format!(
            "{PLAY_SECONDS_ENV} must be a whole number of seconds, got {value:?}"
        ))
    })
}
