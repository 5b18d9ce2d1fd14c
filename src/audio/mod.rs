//! Saving recorded audio to local storage.
//!
//! Recordings are written as `<name>.wav` into the recordings directory.
//! There is no cleanup policy: saved files accumulate indefinitely. Known
//! resource leak, carried forward deliberately.

use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// A recording saved to disk.
#[derive(Debug, Clone)]
pub struct SavedRecording {
    /// Name under which the recording (and its summary record) is keyed.
    pub filename: String,
    /// Full path to the written `.wav` file.
    pub path: PathBuf,
}

/// Save audio bytes into `dir`, keyed by `name` or a timestamp default.
///
/// When `name` is `None`, a `file_<unix_ts>` name is generated. The `.wav`
/// extension is appended to the stored file but is not part of the key.
#[instrument(skip(audio_bytes), fields(bytes = audio_bytes.len()))]
pub fn save_recording(dir: &Path, audio_bytes: &[u8], name: Option<&str>) -> Result<SavedRecording> {
    std::fs::create_dir_all(dir)?;

    let filename = match name {
        Some(n) if !n.trim().is_empty() => n.trim().to_string(),
        _ => format!("file_{}", chrono::Utc::now().timestamp()),
    };

    let path = dir.join(format!("{}.wav", filename));
    std::fs::write(&path, audio_bytes)?;

    debug!("Saved recording to {:?}", path);
    Ok(SavedRecording { filename, path })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_with_explicit_name() {
        let dir = tempfile::tempdir().unwrap();
        let saved = save_recording(dir.path(), b"RIFFdata", Some("lecture1")).unwrap();

        assert_eq!(saved.filename, "lecture1");
        assert_eq!(saved.path, dir.path().join("lecture1.wav"));
        assert_eq!(std::fs::read(&saved.path).unwrap(), b"RIFFdata");
    }

    #[test]
    fn test_save_without_name_uses_timestamp_default() {
        let dir = tempfile::tempdir().unwrap();
        let saved = save_recording(dir.path(), b"RIFFdata", None).unwrap();

        assert!(saved.filename.starts_with("file_"));
        assert!(saved.path.extension().is_some_and(|e| e == "wav"));
    }

    #[test]
    fn test_saved_files_accumulate() {
        let dir = tempfile::tempdir().unwrap();
        save_recording(dir.path(), b"one", Some("a")).unwrap();
        save_recording(dir.path(), b"two", Some("b")).unwrap();

        let count = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(count, 2);
    }
}
