//! Shuffle playback over a catalog snapshot, driven by discrete events.
//!
//! A session starts `Idle`. `start` picks a song uniformly at random and moves to `Playing`.
//! While playing, `Skip` and `DurationExpired` report `Skipped`/`Finished` for the current song
//! and immediately pick the next one; `Stop` ends the session for good. Nothing here sleeps:
//! whoever drives the session decides when a song's time is up.

use std::time::Duration;

use log::debug;
use rand::Rng;

use crate::library::{
    entities::Song,
    errors::{Error, Result},
};

/// Play time used when songs are only simulated
pub const SIMULATED_PLAY_TIME: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing(Song),
    Skipped(Song),
    Finished(Song),
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    Skip,
    Stop,
    DurationExpired,
}

/// How long a song plays before `DurationExpired` is due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPace {
    /// Every song plays for the same fixed time
    Simulated(Duration),
    /// Every song plays for its own duration
    TrackLength,
}

impl Default for PlaybackPace {
    fn default() -> Self {
        PlaybackPace::Simulated(SIMULATED_PLAY_TIME)
    }
}

impl PlaybackPace {
    pub fn wait_for(&self, song: &Song) -> Duration {
        match self {
            PlaybackPace::Simulated(duration) => *duration,
            PlaybackPace::TrackLength => {
                Duration::from_secs(u64::try_from(song.duration_seconds).unwrap_or(0))
            }
        }
    }
}

pub struct PlaybackSession<R> {
    songs: Vec<Song>,
    rng: R,
    state: PlaybackState,
}

impl<R: Rng> PlaybackSession<R> {
    /// New idle session over a read-only snapshot of the catalog
    pub fn new(songs: Vec<Song>, rng: R) -> Self {
        PlaybackSession {
            songs,
            rng,
            state: PlaybackState::Idle,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn now_playing(&self) -> Option<&Song> {
        match &self.state {
            PlaybackState::Playing(song) => Some(song),
            _ => None,
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.state == PlaybackState::Stopped
    }

    /// Pick the first song. Refused when there is nothing to play or the session was stopped;
    /// a session that is already playing keeps its current song.
    pub fn start(&mut self) -> Result<&Song> {
        match self.state {
            PlaybackState::Idle => {
                if self.songs.is_empty() {
                    return Err(Error::EmptyCatalog);
                }
                self.play_next();
            }
            PlaybackState::Stopped => return Err(Error::SessionStopped),
            _ => {}
        }
        self.now_playing().ok_or(Error::EmptyCatalog)
    }

    /// Apply an event and return the state it produced.
    ///
    /// `Skipped` and `Finished` are reported for the song that was playing; by the time this
    /// returns the session is already playing the next pick.
    pub fn handle(&mut self, event: PlaybackEvent) -> PlaybackState {
        let previous = std::mem::replace(&mut self.state, PlaybackState::Stopped);
        let outcome = match (previous, event) {
            (PlaybackState::Playing(song), PlaybackEvent::Skip) => PlaybackState::Skipped(song),
            (PlaybackState::Playing(song), PlaybackEvent::DurationExpired) => {
                PlaybackState::Finished(song)
            }
            (PlaybackState::Playing(_) | PlaybackState::Idle, PlaybackEvent::Stop) => {
                PlaybackState::Stopped
            }
            // Nothing playing to skip or finish, or the session is over
            (state, _) => {
                self.state = state;
                return self.state.clone();
            }
        };
        debug!("{event:?} -> {outcome:?}");

        if matches!(
            outcome,
            PlaybackState::Skipped(_) | PlaybackState::Finished(_)
        ) {
            self.play_next();
        }
        outcome
    }

    fn play_next(&mut self) {
        let index = self.rng.random_range(0..self.songs.len());
        let song = self.songs[index].clone();
        debug!("Now playing {song}");
        self.state = PlaybackState::Playing(song);
    }
}
