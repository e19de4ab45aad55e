//! Staging of uploaded log files
//!
//! An uploaded log is copied to the configured upload location, replacing
//! whatever was staged before. Analysis always runs against that copy.

use crate::config::InputConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while staging an upload
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("No file name given")]
    MissingFileName,

    #[error("Not a .log file: {0}")]
    NotALogFile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Copy `source` into the upload directory under the configured file name
pub fn stage_upload(config: &InputConfig, source: &Path) -> Result<PathBuf, UploadError> {
    let name = source
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .ok_or(UploadError::MissingFileName)?;

    if !name.ends_with(".log") {
        return Err(UploadError::NotALogFile(name.to_string()));
    }

    std::fs::create_dir_all(&config.upload_dir)?;
    let target = config.staged_path();

    // Copying a file onto itself truncates it before it is read
    let source_real = std::fs::canonicalize(source)?;
    if std::fs::canonicalize(&target).is_ok_and(|t| t == source_real) {
        log::info!("{:?} is already staged", source);
        return Ok(target);
    }

    std::fs::copy(source, &target)?;

    log::info!("Staged {:?} as {:?}", source, target);
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn config_in(dir: &Path) -> InputConfig {
        InputConfig {
            upload_dir: dir.join("uploads"),
            file_name: "temp.log".to_string(),
        }
    }

    #[test]
    fn test_stage_creates_dir_and_copies() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("access.log");
        std::fs::write(&source, "line\n").unwrap();

        let config = config_in(dir.path());
        let staged = stage_upload(&config, &source).unwrap();

        assert_eq!(staged, config.staged_path());
        assert_eq!(std::fs::read_to_string(staged).unwrap(), "line\n");
    }

    #[test]
    fn test_stage_overwrites_previous_upload() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());

        let first = dir.path().join("first.log");
        let second = dir.path().join("second.log");
        std::fs::write(&first, "first\n").unwrap();
        std::fs::write(&second, "second\n").unwrap();

        stage_upload(&config, &first).unwrap();
        let staged = stage_upload(&config, &second).unwrap();

        assert_eq!(std::fs::read_to_string(staged).unwrap(), "second\n");
    }

    #[test]
    fn test_restaging_staged_file_keeps_contents() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        std::fs::create_dir_all(&config.upload_dir).unwrap();
        std::fs::write(config.staged_path(), "important\n").unwrap();

        let staged = stage_upload(&config, &config.staged_path()).unwrap();
        assert_eq!(staged, config.staged_path());
        assert_eq!(std::fs::read_to_string(&staged).unwrap(), "important\n");

        // Same file reached through a different spelling of the path
        let indirect = config.upload_dir.join(".").join("temp.log");
        stage_upload(&config, &indirect).unwrap();
        assert_eq!(std::fs::read_to_string(&staged).unwrap(), "important\n");
    }

    #[test]
    fn test_rejects_non_log_extension() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("access.txt");
        std::fs::write(&source, "line\n").unwrap();

        let result = stage_upload(&config_in(dir.path()), &source);
        assert!(matches!(result, Err(UploadError::NotALogFile(name)) if name == "access.txt"));
        assert!(!dir.path().join("uploads").exists());
    }

    #[test]
    fn test_rejects_missing_file_name() {
        let dir = tempdir().unwrap();
        let result = stage_upload(&config_in(dir.path()), Path::new(""));
        assert!(matches!(result, Err(UploadError::MissingFileName)));
    }

    #[test]
    fn test_missing_source_is_io_error() {
        let dir = tempdir().unwrap();
        let result = stage_upload(&config_in(dir.path()), &dir.path().join("absent.log"));
        assert!(matches!(result, Err(UploadError::Io(_))));
    }
}
