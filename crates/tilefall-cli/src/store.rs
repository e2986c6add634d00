use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tilefall_game::BestScoreStore;

/// Keeps the best score in a small text file holding a single number.
///
/// The file is read once when the store is opened. A missing file counts as a
/// best score of 0; an unreadable one is reported and also treated as 0.
#[derive(Debug, Clone)]
pub(crate) struct FileBestStore {
    path: PathBuf,
    best: u64,
}

impl FileBestStore {
    pub(crate) fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let best = match read_best(&path) {
            Ok(best) => best,
            Err(err) => {
                log::warn!("ignoring best score file {}: {err}", path.display());
                0
            }
        };
        Self { path, best }
    }
}

fn read_best(path: &Path) -> io::Result<u64> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(err) => return Err(err),
    };
    text.trim()
        .parse()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

impl BestScoreStore for FileBestStore {
    fn get(&self) -> u64 {
        self.best
    }

    fn set(&mut self, score: u64) {
        self.best = score;
        if let Err(err) = fs::write(&self.path, format!("{score}\n")) {
            log::warn!(
                "failed to save best score to {}: {err}",
                self.path.display()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tilefall-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_missing_file_is_zero() {
        let store = FileBestStore::open(temp_path("missing"));
        assert_eq!(store.get(), 0);
    }

    #[test]
    fn test_round_trip_through_file() {
        let path = temp_path("round-trip");
        let mut store = FileBestStore::open(&path);
        store.set(420);
        assert_eq!(FileBestStore::open(&path).get(), 420);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_garbage_file_is_zero() {
        let path = temp_path("garbage");
        fs::write(&path, "not a number").unwrap();
        assert_eq!(FileBestStore::open(&path).get(), 0);
        fs::remove_file(&path).unwrap();
    }
}
