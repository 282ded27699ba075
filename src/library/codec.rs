//! Plain text line format for songs: `artist,title,playCount,durationSeconds`.
//!
//! Fields are joined with a bare comma and nothing is quoted or escaped, so files written by
//! earlier releases keep loading unchanged. The cost is that an artist or title containing a
//! comma does not survive a save and load: its fields shift and the line is rejected or misread.

use std::io::{self, BufRead, Write};

use log::warn;

use crate::library::{entities::Song, errors::RecordError};

const DELIMITER: char = ',';

/// Encode one song as a single line, without the terminator
pub fn encode_line(song: &Song) -> String {
    format!(
        "{}{DELIMITER}{}{DELIMITER}{}{DELIMITER}{}",
        song.artist, song.title, song.play_count, song.duration_seconds
    )
}

/// Whether a song survives an encode and decode unchanged
pub fn is_encodable(song: &Song) -> bool {
    [&song.artist, &song.title]
        .iter()
        .all(|field| !field.contains([DELIMITER, '\n', '\r']))
}

/// Decode one line into a song.
///
/// Trailing empty fields are dropped before the fields are counted, so `a,b,1,2,` is still a
/// valid record while `a,b,1` and `a,b,c,1,2` are not.
pub fn decode_line(line: &str) -> Result<Song, RecordError> {
    let mut parts: Vec<&str> = line.split(DELIMITER).collect();
    while parts.last().is_some_and(|p| p.is_empty()) {
        parts.pop();
    }

    let [artist, title, play_count, duration] = parts.as_slice() else {
        return Err(RecordError::FieldCount(parts.len()));
    };

    Ok(Song {
        artist: artist.to_string(),
        title: title.to_string(),
        play_count: parse_number("play count", play_count)?,
        duration_seconds: parse_number("duration", duration)?,
    })
}

fn parse_number(field: &'static str, value: &str) -> Result<i32, RecordError> {
    value.parse().map_err(|_| RecordError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Write every song as one line, in order
pub fn write_all<W: Write>(mut writer: W, songs: &[Song]) -> io::Result<()> {
    for song in songs {
        writeln!(writer, "{}", encode_line(song))?;
    }
    writer.flush()
}

/// Read songs line by line. Malformed lines are logged and skipped.
///
/// A line that is not valid UTF-8 is skipped like any other malformed line. Any other read
/// failure ends the read early and keeps what was decoded up to that point.
pub fn read_all<R: BufRead>(reader: R) -> Vec<Song> {
    let mut songs = vec![];
    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = match line {
            Ok(line) => line,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                warn!("Skipping malformed line {line_number}: {e}");
                continue;
            }
            Err(e) => {
                warn!("Stopped reading songs at line {line_number}: {e}");
                break;
            }
        };

        match decode_line(&line) {
            Ok(song) => songs.push(song),
            Err(e) => warn!("Skipping malformed line {line_number} ({e}): {line:?}"),
        }
    }
    songs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode() {
        let song = Song::new("Artist1", "Title1", 10, 200);
        assert_eq!(encode_line(&song), "Artist1,Title1,10,200");
    }

    #[test]
    fn decode() {
        let song = decode_line("Artist2,Title2,5,180").unwrap();
        assert_eq!(song, Song::new("Artist2", "Title2", 5, 180));
    }

    #[test]
    fn decode_wrong_field_count() {
        assert_eq!(decode_line("a,b,1"), Err(RecordError::FieldCount(3)));
        assert_eq!(decode_line("a,b,c,1,2"), Err(RecordError::FieldCount(5)));
        assert_eq!(decode_line(""), Err(RecordError::FieldCount(0)));
    }

    #[test]
    fn decode_drops_trailing_empty_fields() {
        assert_eq!(
            decode_line("a,b,1,2,,").unwrap(),
            Song::new("a", "b", 1, 2)
        );
        // Empty fields in the middle still count
        assert_eq!(decode_line("a,,1,2").unwrap(), Song::new("a", "", 1, 2));
    }

    #[test]
    fn decode_bad_numbers() {
        assert_eq!(
            decode_line("a,b,ten,2"),
            Err(RecordError::InvalidNumber {
                field: "play count",
                value: "ten".to_string()
            })
        );
        assert_eq!(
            decode_line("a,b,1,2.5"),
            Err(RecordError::InvalidNumber {
                field: "duration",
                value: "2.5".to_string()
            })
        );
        assert!(decode_line("a,b, 1,2").is_err());
        assert!(decode_line("a,b,1,99999999999").is_err());
    }

    #[test]
    fn decode_keeps_negative_numbers() {
        assert_eq!(
            decode_line("Legacy,Old Song,-1,200").unwrap(),
            Song::new("Legacy", "Old Song", -1, 200)
        );
        assert_eq!(decode_line("a,b,+3,-20").unwrap(), Song::new("a", "b", 3, -20));
        assert_eq!(encode_line(&Song::new("a", "b", -1, 5)), "a,b,-1,5");
    }

    #[test]
    fn embedded_comma_does_not_round_trip() {
        let song = Song::new("Crosby, Stills & Nash", "Helplessly Hoping", 3, 161);
        assert!(!is_encodable(&song));
        assert!(decode_line(&encode_line(&song)).is_err());
    }

    #[test]
    fn line_breaks_are_not_encodable() {
        assert!(!is_encodable(&Song::new("a", "b\nc", 1, 1)));
        assert!(is_encodable(&Song::new("AC/DC", "T.N.T.", 1, 1)));
    }

    #[test]
    fn write_all_one_line_per_song() {
        let songs = [
            Song::new("Artist1", "Title1", 10, 200),
            Song::new("Artist2", "Title2", 5, 180),
        ];
        let mut buffer = vec![];
        write_all(&mut buffer, &songs).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Artist1,Title1,10,200\nArtist2,Title2,5,180\n"
        );
    }

    #[test]
    fn read_all_skips_malformed_lines() {
        let input = "Artist1,Title1,10,200\n\
                     just some text\n\
                     Artist2,Title2,five,180\n\
                     Artist3,Title3,1,2,3\n\
                     \n\
                     Artist4,Title4,0,90\r\n";
        let songs = read_all(input.as_bytes());
        assert_eq!(
            songs,
            vec![
                Song::new("Artist1", "Title1", 10, 200),
                Song::new("Artist4", "Title4", 0, 90),
            ]
        );
    }

    #[test]
    fn read_all_skips_invalid_utf8() {
        let mut input = b"Artist1,Title1,10,200\n".to_vec();
        input.extend_from_slice(b"\xff\xfe,bad,1,1\n");
        input.extend_from_slice(b"Artist2,Title2,5,180\n");
        let songs = read_all(&input[..]);
        assert_eq!(songs.len(), 2);
        assert_eq!(songs[1].title, "Title2");
    }

    #[test]
    fn round_trip_preserves_order() {
        let songs: Vec<Song> = (0..20)
            .map(|i| Song::new(format!("Artist {i}"), format!("Title {i}"), i * 3, i * 7))
            .collect();
        let mut buffer = vec![];
        write_all(&mut buffer, &songs).unwrap();
        assert_eq!(read_all(&buffer[..]), songs);
    }
}
