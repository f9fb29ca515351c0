//! Plain-text transcript persistence.
//!
//! A transcript mirrors the session's turns into a flat UTF-8 file, one
//! `"{label}: {text}"` block per turn separated by blank lines. It is
//! not a structured serialization of the conversation; it exists so a
//! human can reread the session later.

use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Who produced a transcript block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Speaker {
    /// The person at the terminal.
    User,
    /// The model.
    Assistant,
}

impl Speaker {
    fn label(self) -> &'static str {
        match self {
            Speaker::User => "You",
            Speaker::Assistant => "Chinwag",
        }
    }
}

/// An error while creating a transcript file.
#[derive(Debug)]
pub enum TranscriptError {
    /// A file with the requested name already exists. The caller should
    /// ask for another name.
    NameCollision(String),
    /// Any other filesystem failure. Fatal to the session.
    Io(io::Error),
}

impl Display for TranscriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptError::NameCollision(name) => {
                write!(f, "a transcript named '{name}' already exists")
            }
            TranscriptError::Io(err) => {
                write!(f, "transcript i/o failed: {err}")
            }
        }
    }
}

impl Error for TranscriptError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TranscriptError::NameCollision(_) => None,
            TranscriptError::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for TranscriptError {
    fn from(err: io::Error) -> Self {
        TranscriptError::Io(err)
    }
}

/// An open, append-only transcript file.
///
/// Exactly one of [`discard`](Self::discard) and
/// [`finalize`](Self::finalize) consumes the writer at session end.
#[derive(Debug)]
pub struct TranscriptWriter {
    file: File,
    path: PathBuf,
}

impl TranscriptWriter {
    /// Creates a transcript with the default name
    /// `{user_name}_{YYYYMMDDHHMM}_{seq:03}.txt`, where `seq` is one more
    /// than the highest sequence among the user's existing transcripts.
    ///
    /// The storage directory is created when absent.
    pub fn create(dir: &Path, user_name: &str) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let seq = next_sequence(dir, user_name)?;
        let timestamp = chrono::Local::now().format("%Y%m%d%H%M");
        let path = dir.join(format!("{user_name}_{timestamp}_{seq:03}.txt"));
        debug!("creating transcript at {}", path.display());
        let file = File::create(&path)?;
        Ok(Self { file, path })
    }

    /// Creates a transcript with a caller-chosen filename, used verbatim.
    ///
    /// Fails with [`TranscriptError::NameCollision`] when a file by that
    /// name already exists; creation and the existence check are a
    /// single `create_new` open, so there is no window between them.
    pub fn create_named(
        dir: &Path,
        name: &str,
    ) -> Result<Self, TranscriptError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(name);
        let file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
        {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                return Err(TranscriptError::NameCollision(name.to_owned()));
            }
            Err(err) => return Err(err.into()),
        };
        debug!("creating transcript at {}", path.display());
        Ok(Self { file, path })
    }

    /// Returns the path of the underlying file.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one block for the given speaker.
    ///
    /// The block is flushed immediately, so it is visible to concurrent
    /// reads of the file without closing the writer.
    pub fn append(&mut self, speaker: Speaker, text: &str) -> io::Result<()> {
        write!(self.file, "{}: {text}\n\n", speaker.label())?;
        self.file.flush()
    }

    /// Closes the transcript and deletes the file.
    pub fn discard(self) -> io::Result<()> {
        drop(self.file);
        fs::remove_file(&self.path)
    }

    /// Closes the transcript, keeping the file, and returns its path.
    pub fn finalize(self) -> PathBuf {
        self.path
    }
}

/// Scans the directory for `{user_name}_*` transcripts and returns the
/// next free sequence number. Filenames whose trailing segment is not
/// numeric are ignored.
fn next_sequence(dir: &Path, user_name: &str) -> io::Result<u32> {
    let prefix = format!("{user_name}_");
    let mut highest = 0;
    for entry in fs::read_dir(dir)? {
        let file_name = entry?.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        let Some(rest) = name.strip_prefix(&prefix) else {
            continue;
        };
        let seq = rest
            .rsplit('_')
            .next()
            .and_then(|tail| tail.split('.').next())
            .and_then(|digits| digits.parse::<u32>().ok());
        if let Some(seq) = seq {
            highest = highest.max(seq);
        }
    }
    Ok(highest + 1)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_default_naming_starts_at_one() {
        let dir = TempDir::new().unwrap();
        let writer = TranscriptWriter::create(dir.path(), "alice").unwrap();
        let name = writer.path().file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("alice_"));
        assert!(name.ends_with("_001.txt"));
    }

    #[test]
    fn test_default_naming_increments_past_existing_sessions() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("alice_202501010900_001.txt"), "").unwrap();
        fs::write(dir.path().join("alice_202501020900_007.txt"), "").unwrap();
        // Other users and unparseable names don't count.
        fs::write(dir.path().join("bob_202501010900_020.txt"), "").unwrap();
        fs::write(dir.path().join("alice_notes"), "").unwrap();

        let writer = TranscriptWriter::create(dir.path(), "alice").unwrap();
        let name = writer.path().file_name().unwrap().to_str().unwrap();
        assert!(name.ends_with("_008.txt"));
    }

    #[test]
    fn test_custom_name_collision() {
        let dir = TempDir::new().unwrap();
        let first =
            TranscriptWriter::create_named(dir.path(), "chat.txt").unwrap();
        let err = TranscriptWriter::create_named(dir.path(), "chat.txt")
            .unwrap_err();
        assert!(matches!(err, TranscriptError::NameCollision(name) if name == "chat.txt"));
        drop(first);
    }

    #[test]
    fn test_append_is_visible_before_close() {
        let dir = TempDir::new().unwrap();
        let mut writer =
            TranscriptWriter::create(dir.path(), "alice").unwrap();
        writer.append(Speaker::User, "Hello").unwrap();
        writer.append(Speaker::Assistant, "Hi there!").unwrap();

        // Read back while the writer is still open.
        let contents = fs::read_to_string(writer.path()).unwrap();
        assert_eq!(contents, "You: Hello\n\nChinwag: Hi there!\n\n");
    }

    #[test]
    fn test_discard_removes_the_file() {
        let dir = TempDir::new().unwrap();
        let mut writer =
            TranscriptWriter::create(dir.path(), "alice").unwrap();
        writer.append(Speaker::User, "Hello").unwrap();
        let path = writer.path().to_owned();
        writer.discard().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_finalize_keeps_the_file() {
        let dir = TempDir::new().unwrap();
        let mut writer =
            TranscriptWriter::create(dir.path(), "alice").unwrap();
        writer.append(Speaker::User, "Hello").unwrap();
        let path = writer.finalize();
        assert!(path.exists());
        assert_eq!(fs::read_to_string(path).unwrap(), "You: Hello\n\n");
    }
}
