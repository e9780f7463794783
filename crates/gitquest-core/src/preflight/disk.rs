//! Free-space lookup for the filesystem holding the repository.
//!
//! - Unix: `libc::statvfs`
//! - Other platforms: `Unsupported` error

use std::path::Path;

/// Bytes available to unprivileged users on the filesystem containing `path`.
#[cfg(target_family = "unix")]
pub fn available_bytes(path: &Path) -> std::io::Result<u64> {
    use std::os::unix::ffi::OsStrExt;

    let path_cstr = std::ffi::CString::new(path.as_os_str().as_bytes())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    // SAFETY: statvfs is a plain C struct of integers; all-zero is a valid value.
    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    // SAFETY: path_cstr is a valid NUL-terminated string and stat is a valid
    // mutable reference for the duration of the call.
    let result = unsafe { libc::statvfs(path_cstr.as_ptr(), &mut stat) };

    if result != 0 {
        return Err(std::io::Error::last_os_error());
    }

    #[allow(clippy::unnecessary_cast)]
    Ok((stat.f_bavail as u64).saturating_mul(stat.f_frsize as u64))
}

#[cfg(not(target_family = "unix"))]
pub fn available_bytes(_path: &Path) -> std::io::Result<u64> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "disk space checking currently only supported on Unix systems",
    ))
}

#[cfg(all(test, target_family = "unix"))]
mod tests {
    use super::*;

    #[test]
    fn temp_dir_reports_space() {
        let temp = tempfile::TempDir::new().unwrap();
        assert!(available_bytes(temp.path()).unwrap() > 0);
    }

    #[test]
    fn missing_path_errors() {
        assert!(available_bytes(Path::new("/definitely/not/here")).is_err());
    }
}
