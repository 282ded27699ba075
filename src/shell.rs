use std::io::Write;
use std::str::FromStr;
use std::time::Duration;

use log::debug;
use songbook::library::{
    Catalog, PlaybackEvent, PlaybackPace, PlaybackSession, PlaybackState, Song, Storage,
    errors::Result,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::time::Instant;

const MENU: &str = "
--- Songbook ---
1. Add a new song
2. Remove a song
3. Print all songs
4. Print songs over a play count
5. Play songs
6. Exit";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct PlaybackSummary {
    pub played: usize,
    pub skipped: usize,
    pub finished: usize,
}

enum Flow {
    Continue,
    Exit,
}

// Line-based front end over a catalog. Reads commands from `input`, writes everything to `output`.
pub struct Shell<R, W, S: Storage> {
    catalog: Catalog<S>,
    pace: PlaybackPace,
    input: Lines<R>,
    output: W,
}

impl<R, W, S> Shell<R, W, S>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    S: Storage,
{
    pub fn new(catalog: Catalog<S>, pace: PlaybackPace, input: R, output: W) -> Self {
        Shell {
            catalog,
            pace,
            input: input.lines(),
            output,
        }
    }

    #[cfg(test)]
    pub fn catalog(&self) -> &Catalog<S> {
        &self.catalog
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }

    // Menu loop, runs until the user exits or input ends
    pub async fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.read_number::<u32>("Choose an option: ").await? else {
                break;
            };
            if let Flow::Exit = self.menu_action(choice).await? {
                break;
            }
        }
        debug!("Shell closed");
        Ok(())
    }

    async fn menu_action(&mut self, choice: u32) -> Result<Flow> {
        match choice {
            1 => {
                let Some(artist) = self.read_line("Enter artist name: ").await? else {
                    return Ok(Flow::Exit);
                };
                let Some(title) = self.read_line("Enter song title: ").await? else {
                    return Ok(Flow::Exit);
                };
                let Some(play_count) = self.read_count("Enter play count: ").await? else {
                    return Ok(Flow::Exit);
                };
                let Some(duration) = self
                    .read_count("Enter song duration (in seconds): ")
                    .await?
                else {
                    return Ok(Flow::Exit);
                };
                self.add(artist, title, play_count, duration)?;
            }
            2 => {
                let Some(title) = self.read_line("Enter song title to remove: ").await? else {
                    return Ok(Flow::Exit);
                };
                self.remove(&title)?;
            }
            3 => self.list(None)?,
            4 => {
                let Some(threshold) = self.read_number::<i64>("Enter play count threshold: ").await?
                else {
                    return Ok(Flow::Exit);
                };
                self.list(Some(threshold))?;
            }
            5 => {
                self.play().await?;
            }
            6 => {
                writeln!(self.output, "Exiting the application.")?;
                return Ok(Flow::Exit);
            }
            _ => writeln!(self.output, "Invalid option. Please try again.")?,
        }
        Ok(Flow::Continue)
    }

    pub fn add(
        &mut self,
        artist: String,
        title: String,
        play_count: i32,
        duration_seconds: i32,
    ) -> Result<()> {
        let song = self
            .catalog
            .add(artist, title, play_count, duration_seconds);
        writeln!(self.output, "Song added: {song}")?;
        Ok(())
    }

    pub fn remove(&mut self, title: &str) -> Result<()> {
        if self.catalog.remove(title) {
            writeln!(self.output, "Song removed: {title}")?;
        } else {
            writeln!(self.output, "Song not found in the list.")?;
        }
        Ok(())
    }

    pub fn list(&mut self, threshold: Option<i64>) -> Result<()> {
        let songs = match threshold {
            Some(t) => {
                writeln!(self.output, "Songs with play count over {t}:")?;
                self.catalog.list_above(t)
            }
            None => {
                writeln!(self.output, "List of all songs:")?;
                self.catalog.list_all()
            }
        };
        for song in &songs {
            writeln!(self.output, "{}", row(song))?;
        }
        Ok(())
    }

    pub fn list_json(&mut self, threshold: Option<i64>) -> Result<()> {
        let songs = match threshold {
            Some(t) => self.catalog.list_above(t),
            None => self.catalog.list_all(),
        };
        writeln!(self.output, "{}", serde_json::to_string_pretty(&songs)?)?;
        Ok(())
    }

    // Shuffle through the catalog until the user stops or input ends
    pub async fn play(&mut self) -> Result<PlaybackSummary> {
        let mut summary = PlaybackSummary::default();
        let mut session = PlaybackSession::new(self.catalog.list_all(), rand::rng());
        if let Err(e) = session.start() {
            writeln!(self.output, "{e}.")?;
            return Ok(summary);
        }

        while let Some(song) = session.now_playing().cloned() {
            summary.played += 1;
            writeln!(self.output, "\nNow Playing:\n{song}\nEnjoy the song!")?;
            write!(
                self.output,
                "Press 's' to skip the song, or 'q' to stop playing... "
            )?;
            self.output.flush()?;

            let play_time = self.pace.wait_for(&song);
            let event = self.next_event(play_time).await?;
            match session.handle(event) {
                PlaybackState::Skipped(_) => {
                    summary.skipped += 1;
                    writeln!(self.output, "\nSong skipped!")?;
                }
                PlaybackState::Finished(_) => {
                    summary.finished += 1;
                    writeln!(self.output, "\nSong finished.")?;
                }
                PlaybackState::Stopped => writeln!(self.output, "\nStopping the music...")?,
                PlaybackState::Idle | PlaybackState::Playing(_) => {}
            }
            if !session.is_stopped() {
                writeln!(self.output, "Next song will play.")?;
            }
        }

        debug!("Playback ended: {summary:?}");
        Ok(summary)
    }

    // Wait for a skip or stop from input, or for the song's time to run out.
    // Any other input is ignored without resetting the deadline.
    async fn next_event(&mut self, play_time: Duration) -> Result<PlaybackEvent> {
        let deadline = Instant::now() + play_time;
        loop {
            tokio::select! {
                line = self.input.next_line() => match line? {
                    Some(line) if line.trim().eq_ignore_ascii_case("s") => return Ok(PlaybackEvent::Skip),
                    Some(line) if line.trim().eq_ignore_ascii_case("q") => return Ok(PlaybackEvent::Stop),
                    Some(_) => {}
                    None => return Ok(PlaybackEvent::Stop),
                },
                () = tokio::time::sleep_until(deadline) => return Ok(PlaybackEvent::DurationExpired),
            }
        }
    }

    async fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        Ok(self.input.next_line().await?)
    }

    // Counts and durations stored from the shell are never negative
    async fn read_count(&mut self, prompt: &str) -> Result<Option<i32>> {
        loop {
            match self.read_number::<i32>(prompt).await? {
                Some(n) if n < 0 => {
                    writeln!(self.output, "Invalid input. Please enter a number of zero or more.")?;
                }
                count => return Ok(count),
            }
        }
    }

    // Re-prompts until the answer parses, `None` once input ends
    async fn read_number<T: FromStr>(&mut self, prompt: &str) -> Result<Option<T>> {
        loop {
            let Some(line) = self.read_line(prompt).await? else {
                return Ok(None);
            };
            match line.trim().parse() {
                Ok(number) => return Ok(Some(number)),
                Err(_) => writeln!(self.output, "Invalid input. Please enter a valid number.")?,
            }
        }
    }
}

fn row(song: &Song) -> String {
    format!(
        "{} by {} Play Count: {}",
        song.title, song.artist, song.play_count
    )
}
