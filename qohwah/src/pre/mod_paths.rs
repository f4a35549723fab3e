use std::path::{Path, PathBuf};

pub const DEFAULT_SCRIPTS_DIR: &str = "scripts";
pub const RACES_FILENAME: &str = "QohwahRaces.ini";
pub const CONFIG_FILENAME: &str = "QohwahConfig.ini";
pub const WINS_FILENAME: &str = "QohwahWins.ini";

/// ModPaths bundles the locations of the files the mod reads and writes.
#[derive(Debug, Clone, PartialEq)]
pub struct ModPaths {
    pub races: PathBuf,
    pub config: PathBuf,
    pub wins: PathBuf,
}

impl ModPaths {
    /// from_scripts_dir places all files with their default names in the given directory.
    pub fn from_scripts_dir(scripts_dir: &Path) -> ModPaths {
        ModPaths {
            races: scripts_dir.join(RACES_FILENAME),
            config: scripts_dir.join(CONFIG_FILENAME),
            wins: scripts_dir.join(WINS_FILENAME),
        }
    }
}

impl Default for ModPaths {
    fn default() -> Self {
        ModPaths::from_scripts_dir(Path::new(DEFAULT_SCRIPTS_DIR))
    }
}
