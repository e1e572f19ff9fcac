//! File system utilities for binding.
//!
//! Idempotent removal, metadata-preserving copies and cross-device moves,
//! all with path context on failure.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{fs::FileTimes, io, path::Path};
use tokio::fs;

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(e).fs_context("removing directory", path),
    }
}

/// Removes the file if it exists.
pub async fn remove_file(path: &Path) -> Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).fs_context("removing file", path),
    }
}

/// Copies a regular file, keeping its permissions and timestamps.
///
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<u64> {
    let metadata = fs::metadata(from)
        .await
        .fs_context("reading metadata of", from)?;
    if !metadata.is_file() {
        return Err(Error::GenericError(format!(
            "{} is not a file",
            from.display()
        )));
    }

    // tokio::fs::copy carries permissions over; timestamps need a second pass.
    let copied = fs::copy(from, to).await.fs_context("copying to", to)?;

    let mut times = FileTimes::new();
    if let Ok(modified) = metadata.modified() {
        times = times.set_modified(modified);
    }
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    let target = to.to_path_buf();
    let stamped = tokio::task::spawn_blocking(move || open_for_times(&target)?.set_times(times))
        .await
        .map_err(|e| Error::GenericError(format!("timestamp task panicked: {e}")))?;
    if let Err(e) = stamped {
        // Metadata is kept where the platform allows it.
        log::debug!("could not copy timestamps to {}: {e}", to.display());
    }

    Ok(copied)
}

/// Moves a file to `to`, replacing whatever file is already there.
///
/// A plain rename is tried first; when that fails because the two paths
/// live on different filesystems the file is copied and the source removed.
pub async fn move_file(from: &Path, to: &Path) -> Result<()> {
    match fs::rename(from, to).await {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device(&e) => {
            log::debug!(
                "rename {} -> {} crossed filesystems, copying instead",
                from.display(),
                to.display()
            );
            copy_file(from, to).await?;
            remove_file(from).await
        }
        // Windows refuses to rename over some existing files.
        #[cfg(windows)]
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied && to.is_file() => {
            remove_file(to).await?;
            fs::rename(from, to).await.fs_context("moving file to", to)
        }
        Err(e) => Err(e).fs_context("moving file to", to),
    }
}

fn is_cross_device(e: &io::Error) -> bool {
    e.kind() == io::ErrorKind::CrossesDevices
}

/// Opens a file with just enough access to update its timestamps.
#[cfg(unix)]
fn open_for_times(path: &Path) -> io::Result<std::fs::File> {
    // futimens only needs ownership, so read-only copies work too.
    std::fs::File::open(path)
}

/// Opens a file with just enough access to update its timestamps.
#[cfg(not(unix))]
fn open_for_times(path: &Path) -> io::Result<std::fs::File> {
    std::fs::File::options().write(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};

    #[tokio::test]
    async fn removal_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let missing_dir = dir.path().join("build");
        let missing_file = dir.path().join("opener_script.spec");

        remove_dir_all(&missing_dir).await.unwrap();
        remove_file(&missing_file).await.unwrap();

        std::fs::create_dir_all(missing_dir.join("nested")).unwrap();
        std::fs::write(&missing_file, "spec").unwrap();
        remove_dir_all(&missing_dir).await.unwrap();
        remove_file(&missing_file).await.unwrap();
        assert!(!missing_dir.exists());
        assert!(!missing_file.exists());
    }

    #[tokio::test]
    async fn copy_keeps_modification_time() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("a.txt");
        let to = dir.path().join("b.txt");
        std::fs::write(&from, "hello").unwrap();
        let past = SystemTime::now() - Duration::from_secs(3600 * 24);
        std::fs::File::options()
            .write(true)
            .open(&from)
            .unwrap()
            .set_modified(past)
            .unwrap();

        let copied = copy_file(&from, &to).await.unwrap();
        assert_eq!(copied, 5);

        let original = std::fs::metadata(&from).unwrap().modified().unwrap();
        let copy = std::fs::metadata(&to).unwrap().modified().unwrap();
        assert_eq!(original, copy);
    }

    #[tokio::test]
    async fn copy_rejects_directories() {
        let dir = tempfile::tempdir().unwrap();
        let err = copy_file(dir.path(), &dir.path().join("x")).await.unwrap_err();
        assert!(err.to_string().contains("is not a file"));
    }

    #[tokio::test]
    async fn move_overwrites_existing_target() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("new.exe");
        let to = dir.path().join("out.exe");
        std::fs::write(&from, "new").unwrap();
        std::fs::write(&to, "old").unwrap();

        move_file(&from, &to).await.unwrap();
        assert!(!from.exists());
        assert_eq!(std::fs::read_to_string(&to).unwrap(), "new");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn refused_move_keeps_existing_target() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("new.exe");
        std::fs::write(&from, "new").unwrap();
        let locked = dir.path().join("locked");
        std::fs::create_dir(&locked).unwrap();
        let to = locked.join("out.exe");
        std::fs::write(&to, "old").unwrap();
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o555)).unwrap();

        // Privileged users ignore directory permissions.
        let writable = std::fs::write(locked.join("canary"), "").is_ok();
        let result = move_file(&from, &to).await;
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
        if writable {
            return;
        }

        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(&to).unwrap(), "old");
        assert!(from.exists());
    }
}
