// src/path/handle.rs

use std::ffi::CString;
use std::fs::{self, OpenOptions};
use std::os::fd::{AsFd, BorrowedFd, OwnedFd};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::resolve::{MONITOR_FLAGS, descriptor_is_dir, descriptor_path, standardize};
use crate::errors::{FswireError, Result};

/// A path anchored to an open descriptor.
///
/// The descriptor, not the path text, is the identity: renaming the object
/// or any of its ancestors leaves the handle pointing at the same object,
/// and [`refresh`](Self::refresh) reads the new path back from the OS.
///
/// The descriptor is opened for monitoring only and is closed exactly once,
/// either by [`release`](Self::release) or when the handle is dropped.
/// Handles are not `Clone`; a second handle means opening the path again.
#[derive(Debug)]
pub struct PathHandle {
    path: PathBuf,
    is_directory: bool,
    descriptor: Option<OwnedFd>,
}

impl PathHandle {
    /// Open a handle on `path`.
    ///
    /// Fails with `InvalidArgument` for an empty path, `ResourceUnreachable`
    /// when nothing exists there (no descriptor is opened in that case), and
    /// `Os` when the open call itself fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(FswireError::InvalidArgument(
                "path handle requires a non-empty path".to_string(),
            ));
        }

        let path = standardize(path)?;
        if fs::metadata(&path).is_err() {
            return Err(FswireError::ResourceUnreachable(path));
        }

        let file = OpenOptions::new()
            .read(true)
            .custom_flags(MONITOR_FLAGS)
            .open(&path)
            .map_err(|source| FswireError::Os { op: "open", source })?;
        let descriptor = OwnedFd::from(file);
        let is_directory = descriptor_is_dir(descriptor.as_fd())?;

        debug!(path = %path.display(), is_directory, "opened path handle");
        Ok(Self {
            path,
            is_directory,
            descriptor: Some(descriptor),
        })
    }

    /// The path as of the last successful open or refresh.
    pub fn current_path(&self) -> &Path {
        &self.path
    }

    /// Segments of [`current_path`](Self::current_path), starting with `/`.
    pub fn path_components(&self) -> Vec<String> {
        self.path
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect()
    }

    /// NUL-terminated copy of the current path for C registration APIs.
    pub fn c_path(&self) -> Result<CString> {
        CString::new(self.path.as_os_str().as_bytes()).map_err(|_| {
            FswireError::InvalidArgument(format!(
                "path contains an interior NUL byte: {}",
                self.path.display()
            ))
        })
    }

    /// True while the handle still holds its descriptor.
    pub fn exists(&self) -> bool {
        self.descriptor.is_some()
    }

    /// Whether the object was a directory at the last open or refresh.
    pub fn is_directory(&self) -> bool {
        self.is_directory
    }

    /// Borrow the held descriptor, e.g. to register it with a watcher.
    pub fn descriptor(&self) -> Result<BorrowedFd<'_>> {
        self.descriptor
            .as_ref()
            .map(AsFd::as_fd)
            .ok_or(FswireError::Released)
    }

    /// Re-read the current path from the descriptor.
    ///
    /// On failure the error is returned and the stored path is untouched.
    pub fn refresh(&mut self) -> Result<()> {
        let fd = self.descriptor()?;
        let path = standardize(&descriptor_path(fd)?)?;
        let is_directory = descriptor_is_dir(fd)?;

        if path != self.path {
            debug!(
                old = %self.path.display(),
                new = %path.display(),
                "path handle moved"
            );
        }
        self.path = path;
        self.is_directory = is_directory;
        Ok(())
    }

    /// Close the descriptor now. Returns whether one was held; later calls
    /// and the eventual drop do nothing.
    pub fn release(&mut self) -> bool {
        match self.descriptor.take() {
            Some(descriptor) => {
                drop(descriptor);
                debug!(path = %self.path.display(), "released path handle");
                true
            }
            None => false,
        }
    }
}

impl Drop for PathHandle {
    fn drop(&mut self) {
        self.release();
    }
}
