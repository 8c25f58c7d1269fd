//! Data directory layout.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "POSTCRAFT_DATA_DIR";

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `POSTCRAFT_DATA_DIR` environment variable
/// 2. `~/.postcraft`
pub fn resolve_data_dir() -> PathBuf {
    data_dir_from(std::env::var_os(DATA_DIR_ENV), dirs::home_dir())
}

fn data_dir_from(override_dir: Option<OsString>, home: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = override_dir.filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }

    if let Some(home) = home {
        return home.join(".postcraft");
    }

    // Last resort: current directory
    PathBuf::from(".postcraft")
}

/// SQLite URL for the saved-output database inside `data_dir`.
pub fn database_url(data_dir: &Path) -> String {
    format!("sqlite://{}?mode=rwc", data_dir.join("postcraft.db").display())
}

/// Create the data directory if needed.
pub async fn ensure_data_dir(data_dir: &Path) -> Result<(), std::io::Error> {
    tokio::fs::create_dir_all(data_dir).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_url() {
        let url = database_url(Path::new("/home/user/.postcraft"));
        assert_eq!(url, "sqlite:///home/user/.postcraft/postcraft.db?mode=rwc");
    }

    #[tokio::test]
    async fn test_ensure_data_dir_creates_nested() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a").join("b");
        ensure_data_dir(&nested).await.unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_data_dir_priority() {
        let home = Some(PathBuf::from("/home/user"));

        let dir = data_dir_from(Some("/tmp/test-postcraft".into()), home.clone());
        assert_eq!(dir, PathBuf::from("/tmp/test-postcraft"));

        assert_eq!(
            data_dir_from(None, home.clone()),
            PathBuf::from("/home/user/.postcraft")
        );
        assert_eq!(
            data_dir_from(Some(OsString::new()), home),
            PathBuf::from("/home/user/.postcraft")
        );
        assert_eq!(data_dir_from(None, None), PathBuf::from(".postcraft"));
    }
}
