use crate::cue::error::{CueError, CueResult};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Returns `path` itself, or the cue sheet inside it when `path` is a directory.
pub async fn resolve_cue_path(path: &Path) -> CueResult<PathBuf> {
    let is_dir = fs::metadata(path)
        .await
        .map(|metadata| metadata.is_dir())
        .unwrap_or(false);

    if is_dir {
        find_cue_file(path).await
    } else {
        Ok(path.to_path_buf())
    }
}

/// First regular `.cue` file in directory listing order.
pub async fn find_cue_file(dir_path: &Path) -> CueResult<PathBuf> {
    let mut dir = fs::read_dir(dir_path).await?;

    while let Some(entry) = dir.next_entry().await? {
        let path = entry.path();

        let is_cue = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| name.ends_with(".cue"));

        if !is_cue {
            continue;
        }

        let is_file = fs::metadata(&path)
            .await
            .map(|metadata| metadata.is_file())
            .unwrap_or(false);

        if is_file {
            return Ok(path);
        }
    }

    Err(CueError::NoCueFileFound(dir_path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn finds_the_cue_file_in_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("image.flac"), b"").unwrap();
        std::fs::write(dir.path().join("disc.cue"), b"").unwrap();

        let found = resolve_cue_path(dir.path()).await.unwrap();
        assert_eq!(found, dir.path().join("disc.cue"));
    }

    #[tokio::test]
    async fn ignores_directories_named_like_cue_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("extras.cue")).unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"").unwrap();

        let err = find_cue_file(dir.path()).await.unwrap_err();
        assert!(matches!(err, CueError::NoCueFileFound(path) if path == dir.path()));
    }

    #[tokio::test]
    async fn passes_file_paths_through() {
        let dir = tempfile::tempdir().unwrap();
        let cue = dir.path().join("disc.cue");
        std::fs::write(&cue, b"").unwrap();

        assert_eq!(resolve_cue_path(&cue).await.unwrap(), cue);

        // missing paths are left for the parser to report
        let missing = dir.path().join("missing.cue");
        assert_eq!(resolve_cue_path(&missing).await.unwrap(), missing);
    }
}
