use std::fmt;

use serde::{Deserialize, Serialize};

/// A single catalog entry. Never modified after construction; an edit is a remove followed by an add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Performing artist
    pub artist: String,
    /// Song title, the lookup key for removal
    pub title: String,
    /// Number of times the song has been played. Signed so that negative values already on
    /// disk load and save back unchanged; new songs are expected to be non-negative.
    pub play_count: i32,
    /// Length of the song in seconds
    pub duration_seconds: i32,
}

impl Song {
    /// Build a song from its four fields
    pub fn new(
        artist: impl Into<String>,
        title: impl Into<String>,
        play_count: i32,
        duration_seconds: i32,
    ) -> Self {
        Song {
            artist: artist.into(),
            title: title.into(),
            play_count,
            duration_seconds,
        }
    }

    /// Case-insensitive title comparison, char by char.
    ///
    /// Two chars match when their uppercase or their lowercase forms agree, so `Σ`, `σ` and the
    /// final `ς` all match each other.
    pub fn title_matches(&self, title: &str) -> bool {
        let mut ours = self.title.chars();
        let mut theirs = title.chars();
        loop {
            match (ours.next(), theirs.next()) {
                (None, None) => return true,
                (Some(a), Some(b)) if chars_match(a, b) => {}
                _ => return false,
            }
        }
    }
}

fn chars_match(a: char, b: char) -> bool {
    a == b
        || a.to_uppercase().eq(b.to_uppercase())
        || a.to_lowercase().eq(b.to_lowercase())
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Song Title: {}, Artist: {}, Play Count: {}, Duration: {} seconds",
            self.title, self.artist, self.play_count, self.duration_seconds
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_matches_ignores_case() {
        let song = Song::new("Artist1", "Song A", 1, 1);
        assert!(song.title_matches("song a"));
        assert!(song.title_matches("SONG A"));
        assert!(!song.title_matches("song"));
        assert!(!song.title_matches("song a "));
    }

    #[test]
    fn title_matches_non_ascii() {
        let song = Song::new("Sigur Rós", "Ágætis Byrjun", 1, 1);
        assert!(song.title_matches("ÁGÆTIS BYRJUN"));

        let greek = Song::new("Artist", "ΟΔΟΣ", 1, 1);
        assert!(greek.title_matches("οδος"));
        assert!(greek.title_matches("οδοσ"));
        assert!(!greek.title_matches("οδο"));
    }

    #[test]
    fn display() {
        let song = Song::new("Artist1", "Title1", 10, 200);
        assert_eq!(
            song.to_string(),
            "Song Title: Title1, Artist: Artist1, Play Count: 10, Duration: 200 seconds"
        );
    }

    #[test]
    fn json_field_names() {
        let song = Song::new("Artist1", "Title1", 10, 200);
        let json = serde_json::to_string(&song).unwrap();
        assert_eq!(
            json,
            r#"{"artist":"Artist1","title":"Title1","playCount":10,"durationSeconds":200}"#
        );
    }
}
