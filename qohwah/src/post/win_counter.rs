use crate::error::{PersistError, PersistResult};
use crate::pre::read_text::read_text;
use std::fs;
use std::path::{Path, PathBuf};

/// parse_wins decodes the content of the win counter file (a single decimal integer).
pub fn parse_wins(content: &str) -> Option<i32> {
    content.trim().parse::<i32>().ok()
}

pub fn try_load_wins(filepath: &Path) -> PersistResult<i32> {
    let content = read_text(filepath)?;

    parse_wins(&content).ok_or_else(|| PersistError::Parse {
        path: filepath.to_path_buf(),
        reason: format!("{:?} is not an integer", content.trim()),
    })
}

/// load_wins returns the persisted win counter, or 0 if the file is missing or unusable.
pub fn load_wins(filepath: &Path) -> i32 {
    match try_load_wins(filepath) {
        Ok(wins) => wins,
        Err(PersistError::Missing(_)) => 0,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load win counter, starting from 0");
            0
        }
    }
}

pub fn try_save_wins(filepath: &Path, wins: i32) -> PersistResult<()> {
    fs::write(filepath, wins.to_string()).map_err(|e| PersistError::Io {
        path: filepath.to_path_buf(),
        source: e,
    })
}

/// save_wins persists the win counter on a best-effort basis, failures are only logged.
pub fn save_wins(filepath: &Path, wins: i32) {
    if let Err(e) = try_save_wins(filepath, wins) {
        tracing::warn!(error = %e, wins, "Failed to save win counter");
    }
}

/// WinCounter is the in-memory win counter bound to its file. Every change is written through
/// immediately. The counter may become negative.
#[derive(Debug, Clone)]
pub struct WinCounter {
    wins: i32,
    filepath: PathBuf,
}

impl WinCounter {
    pub fn load(filepath: &Path) -> WinCounter {
        let wins = load_wins(filepath);
        tracing::info!(path = %filepath.display(), wins, "Loaded win counter");

        WinCounter {
            wins,
            filepath: filepath.to_path_buf(),
        }
    }

    pub fn get(&self) -> i32 {
        self.wins
    }

    /// add changes the counter by delta (negative to decrement) and persists it.
    pub fn add(&mut self, delta: i32) -> i32 {
        self.wins = self.wins.saturating_add(delta);
        save_wins(&self.filepath, self.wins);
        self.wins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let filepath = dir.path().join("QohwahWins.ini");

        for &wins in [0, 7, -3].iter() {
            save_wins(&filepath, wins);
            assert_eq!(load_wins(&filepath), wins);
        }
    }

    #[test]
    fn test_load_wins_missing_or_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let filepath = dir.path().join("QohwahWins.ini");
        assert_eq!(load_wins(&filepath), 0);

        fs::write(&filepath, "lots").unwrap();
        assert_eq!(load_wins(&filepath), 0);
        assert!(matches!(
            try_load_wins(&filepath),
            Err(PersistError::Parse { .. })
        ));
    }

    #[test]
    fn test_parse_wins_whitespace() {
        assert_eq!(parse_wins(" 12\r\n"), Some(12));
        assert_eq!(parse_wins("-4"), Some(-4));
        assert_eq!(parse_wins("1.5"), None);
    }

    #[test]
    fn test_save_wins_failure_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let filepath = dir.path().join("missing_dir").join("QohwahWins.ini");

        save_wins(&filepath, 3);
        assert!(try_save_wins(&filepath, 3).is_err());
    }

    #[test]
    fn test_win_counter_writes_through() {
        let dir = tempfile::tempdir().unwrap();
        let filepath = dir.path().join("QohwahWins.ini");
        let mut counter = WinCounter::load(&filepath);

        assert_eq!(counter.get(), 0);
        assert_eq!(counter.add(-1), -1);
        assert_eq!(load_wins(&filepath), -1);
        assert_eq!(counter.add(2), 1);
        assert_eq!(WinCounter::load(&filepath).get(), 1);
    }

    #[test]
    fn test_load_wins_with_bom_keeps_count() {
        let dir = tempfile::tempdir().unwrap();
        let filepath = dir.path().join("QohwahWins.ini");
        fs::write(&filepath, b"\xef\xbb\xbf12\r\n").unwrap();

        let mut counter = WinCounter::load(&filepath);
        assert_eq!(counter.get(), 12);
        assert_eq!(counter.add(-1), 11);
        assert_eq!(fs::read_to_string(&filepath).unwrap(), "11");
    }

    #[test]
    fn test_load_wins_invalid_bytes_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let filepath = dir.path().join("QohwahWins.ini");
        fs::write(&filepath, b"1\xe92").unwrap();

        assert!(matches!(
            try_load_wins(&filepath),
            Err(PersistError::Parse { .. })
        ));
    }
}
