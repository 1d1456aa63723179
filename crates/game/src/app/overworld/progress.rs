/// Where the player left off. The facing matters as much as the cell:
/// restoring it keeps the action-trigger cell the same across restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Progress {
    pub(crate) save_version: u32,
    pub(crate) map_id: String,
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) facing: Direction,
}

/// Best effort. Any failure is logged and the session keeps running
/// without a save file.
fn save_progress(path: &Path, progress: &Progress) {
    let payload = match serde_json::to_string_pretty(progress) {
        Ok(payload) => payload,
        Err(error) => {
            warn!(error = %error, "progress_encode_failed");
            return;
        }
    };
    if let Err(error) = fs::write(path, payload) {
        warn!(path = %path.display(), error = %error, "progress_write_failed");
    } else {
        debug!(path = %path.display(), "progress_saved");
    }
}

/// Missing file means a fresh start. An unreadable, malformed, or
/// stale-versioned file is treated the same way, with a log line saying
/// which field broke.
fn load_progress(path: &Path) -> Option<Progress> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == ErrorKind::NotFound => return None,
        Err(error) => {
            warn!(path = %path.display(), error = %error, "progress_read_failed");
            return None;
        }
    };

    let mut deserializer = serde_json::Deserializer::from_str(&raw);
    let progress: Progress = match serde_path_to_error::deserialize(&mut deserializer) {
        Ok(progress) => progress,
        Err(error) => {
            warn!(
                path = %path.display(),
                field = %error.path(),
                error = %error,
                "progress_parse_failed"
            );
            return None;
        }
    };

    if progress.save_version != PROGRESS_SAVE_VERSION {
        warn!(
            found = progress.save_version,
            expected = PROGRESS_SAVE_VERSION,
            "progress_version_mismatch"
        );
        return None;
    }
    Some(progress)
}
