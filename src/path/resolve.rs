// src/path/resolve.rs

//! Platform calls behind [`PathHandle`](super::PathHandle): the open flag
//! for monitoring-only descriptors and the descriptor → path translation.

use std::mem::MaybeUninit;
use std::os::fd::{AsRawFd, BorrowedFd};
use std::path::{Component, Path, PathBuf};

use crate::errors::{FswireError, Result};

/// Extra `open(2)` flags for a descriptor that is only used to track an
/// object, never to read or write it.
#[cfg(any(target_os = "macos", target_os = "ios"))]
pub(crate) const MONITOR_FLAGS: libc::c_int = libc::O_EVTONLY;

#[cfg(any(target_os = "linux", target_os = "android"))]
pub(crate) const MONITOR_FLAGS: libc::c_int = libc::O_PATH;

#[cfg(not(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "linux",
    target_os = "android"
)))]
pub(crate) const MONITOR_FLAGS: libc::c_int = 0;

/// Ask the OS which path `fd` currently refers to.
#[cfg(any(target_os = "macos", target_os = "ios"))]
pub(crate) fn descriptor_path(fd: BorrowedFd<'_>) -> Result<PathBuf> {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let mut buf = vec![0u8; libc::PATH_MAX as usize];
    // SAFETY: `fd` is a live descriptor and `buf` holds PATH_MAX bytes, the
    // most F_GETPATH writes (NUL included).
    let rc = unsafe { libc::fcntl(fd.as_raw_fd(), libc::F_GETPATH, buf.as_mut_ptr()) };
    if rc == -1 {
        return Err(FswireError::last_os("fcntl(F_GETPATH)"));
    }
    let len = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    buf.truncate(len);
    Ok(PathBuf::from(OsString::from_vec(buf)))
}

/// Ask the OS which path `fd` currently refers to.
///
/// Reads the `/proc/self/fd` link. The kernel appends ` (deleted)` once the
/// object has been unlinked; that is reported as unreachable.
#[cfg(any(target_os = "linux", target_os = "android"))]
pub(crate) fn descriptor_path(fd: BorrowedFd<'_>) -> Result<PathBuf> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    const DELETED_SUFFIX: &[u8] = b" (deleted)";

    let link = format!("/proc/self/fd/{}", fd.as_raw_fd());
    let path = std::fs::read_link(&link).map_err(|source| FswireError::Os {
        op: "readlink(/proc/self/fd)",
        source,
    })?;

    let bytes = path.as_os_str().as_bytes();
    if let Some(stripped) = bytes.strip_suffix(DELETED_SUFFIX) {
        return Err(FswireError::ResourceUnreachable(PathBuf::from(
            OsStr::from_bytes(stripped),
        )));
    }
    Ok(path)
}

#[cfg(not(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "linux",
    target_os = "android"
)))]
pub(crate) fn descriptor_path(_fd: BorrowedFd<'_>) -> Result<PathBuf> {
    Err(FswireError::Os {
        op: "descriptor path lookup",
        source: std::io::Error::from(std::io::ErrorKind::Unsupported),
    })
}

/// Whether the object behind `fd` is a directory.
pub(crate) fn descriptor_is_dir(fd: BorrowedFd<'_>) -> Result<bool> {
    let mut stat = MaybeUninit::<libc::stat>::uninit();
    // SAFETY: `fd` is live and `stat` is a properly sized out-parameter.
    let rc = unsafe { libc::fstat(fd.as_raw_fd(), stat.as_mut_ptr()) };
    if rc == -1 {
        return Err(FswireError::last_os("fstat"));
    }
    // SAFETY: fstat succeeded, so the struct is initialised.
    let stat = unsafe { stat.assume_init() };
    Ok(stat.st_mode & libc::S_IFMT == libc::S_IFDIR)
}

/// Absolute, lexically normalised form of `path`.
///
/// Relative paths are joined onto the current directory, `.` segments are
/// dropped and `..` removes the preceding segment. Symlinks are left alone.
pub(crate) fn standardize(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|source| FswireError::Os {
                op: "getcwd",
                source,
            })?
            .join(path)
    };

    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(Component::RootDir.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(segment) => out.push(segment),
        }
    }
    Ok(out)
}
