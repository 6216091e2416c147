//! Single-instance enforcement via an exclusive advisory lock file.
//!
//! Compiled in only with the `instance-lock` feature. Acquisition is
//! reference-counted so the same process can nest acquire/release pairs;
//! the file descriptor is held for the lifetime of the outermost
//! acquisition and the lock drops with the descriptor.

use std::{ffi::CString, io, os::unix::ffi::OsStrExt, path::PathBuf};

use tracing::debug;

use super::{error::SourceError, types::SourceResult};

/// Reference-counted exclusive lock on a named file.
pub struct InstanceLock {
    path: PathBuf,
    fd: Option<libc::c_int>,
    refcount: u32,
}

impl InstanceLock {
    pub fn new(path: PathBuf) -> Self {
        InstanceLock {
            path,
            fd: None,
            refcount: 0,
        }
    }

    /// Acquires the lock, or bumps the reference count when this process
    /// already holds it. Fails without blocking when another process holds
    /// the lock.
    pub fn acquire(&mut self) -> SourceResult<()> {
        if self.refcount > 0 {
            self.refcount += 1;
            return Ok(());
        }

        let c_path = CString::new(self.path.as_os_str().as_bytes()).map_err(|_| {
            SourceError::InvalidInput(format!("bad lock path {}", self.path.display()))
        })?;

        let fd = unsafe {
            libc::open(
                c_path.as_ptr(),
                libc::O_CREAT | libc::O_RDWR | libc::O_CLOEXEC,
                0o666 as libc::mode_t,
            )
        };
        if fd < 0 {
            return Err(SourceError::SystemCall {
                syscall: format!("open({})", self.path.display()),
                reason: io::Error::last_os_error().to_string(),
            });
        }

        if unsafe { libc::flock(fd, libc::LOCK_EX | libc::LOCK_NB) } == -1 {
            let err = io::Error::last_os_error();
            unsafe { libc::close(fd) };
            return Err(SourceError::SystemCall {
                syscall: format!("flock({})", self.path.display()),
                reason: err.to_string(),
            });
        }

        debug!(path = %self.path.display(), "instance lock acquired");
        self.fd = Some(fd);
        self.refcount = 1;
        Ok(())
    }

    /// Releases one reference; the underlying lock drops when the count
    /// reaches zero. Releasing a lock that is not held is an error.
    pub fn release(&mut self) -> SourceResult<()> {
        if self.refcount > 1 {
            self.refcount -= 1;
            return Ok(());
        }

        match self.fd.take() {
            Some(fd) => {
                unsafe {
                    libc::flock(fd, libc::LOCK_UN);
                    libc::close(fd);
                }
                self.refcount = 0;
                debug!(path = %self.path.display(), "instance lock released");
                Ok(())
            }
            None => Err(SourceError::InvalidInput("lock is not held".to_string())),
        }
    }

    /// Whether this process currently holds the lock.
    pub fn is_held(&self) -> bool {
        self.fd.is_some()
    }
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        if let Some(fd) = self.fd.take() {
            unsafe {
                libc::flock(fd, libc::LOCK_UN);
                libc::close(fd);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lock_in_tempdir() -> (tempfile::TempDir, InstanceLock) {
        let dir = tempfile::tempdir().expect("tempdir");
        let lock = InstanceLock::new(dir.path().join("devident.lock"));
        (dir, lock)
    }

    #[test]
    fn acquire_and_release() {
        let (_dir, mut lock) = lock_in_tempdir();
        assert!(!lock.is_held());
        lock.acquire().expect("acquire");
        assert!(lock.is_held());
        lock.release().expect("release");
        assert!(!lock.is_held());
    }

    #[test]
    fn nested_acquisition_is_reference_counted() {
        let (_dir, mut lock) = lock_in_tempdir();
        lock.acquire().expect("first acquire");
        lock.acquire().expect("nested acquire");
        lock.release().expect("first release");
        assert!(lock.is_held());
        lock.release().expect("final release");
        assert!(!lock.is_held());
    }

    #[test]
    fn releasing_an_unheld_lock_fails() {
        let (_dir, mut lock) = lock_in_tempdir();
        assert!(lock.release().is_err());
    }

    #[test]
    fn drop_releases_the_descriptor() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("devident.lock");
        {
            let mut first = InstanceLock::new(path.clone());
            first.acquire().expect("acquire");
        }
        let mut second = InstanceLock::new(path);
        second.acquire().expect("reacquire after drop");
    }
}
