use dirs::home_dir;
use std::{env, fs, io, path::Path, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".kakeibo";
const HOME_ENV: &str = "KAKEIBO_HOME";
const CONFIG_FILE: &str = "config.json";
const TRANSACTIONS_FILE: &str = "transactions.json";

/// Resolves the locations of application files.
pub struct PathResolver;

impl PathResolver {
    /// Application data directory: `$KAKEIBO_HOME`, else `~/.kakeibo`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_FILE)
    }

    pub fn transactions_file_in(base: &Path) -> PathBuf {
        base.join(TRANSACTIONS_FILE)
    }
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
