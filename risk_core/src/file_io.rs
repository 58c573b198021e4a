//! # Assessment Files
//!
//! Reading and writing `.lpr` assessment files:
//! - **Atomic saves**: write `<name>.lpr.tmp`, fsync, then rename over the target
//! - **File locking**: `<name>.lpr.lock` holds an OS lock plus who took it
//! - **Version validation**: files from a newer schema are refused
//!
//! ## Example
//!
//! ```rust,no_run
//! use risk_core::assessment::Assessment;
//! use risk_core::file_io::{load_assessment, save_assessment, FileLock};
//! use std::path::Path;
//!
//! let path = Path::new("warehouse.lpr");
//! let assessment = Assessment::template("Engineer", "25-001", "Client");
//!
//! let lock = FileLock::acquire(path, "engineer@company.com")?;
//! save_assessment(&assessment, path)?;
//! drop(lock);
//!
//! let loaded = load_assessment(path)?;
//! assert_eq!(loaded.meta.id, assessment.meta.id);
//! # Ok::<(), risk_core::errors::CalcError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::assessment::{Assessment, SCHEMA_VERSION};
use crate::errors::{CalcError, CalcResult};

/// File extension of assessment files
pub const FILE_EXTENSION: &str = "lpr";

/// Locks older than this are taken over regardless of owner
const STALE_LOCK_HOURS: i64 = 24;

/// Contents of a `.lpr.lock` file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// User identifier (email or username)
    pub user_id: String,
    pub machine: String,
    pub pid: u32,
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    /// Lock info for the current process
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }

    /// A lock whose process is gone, or that is simply too old.
    fn is_stale(&self) -> bool {
        if (Utc::now() - self.locked_at).num_hours() > STALE_LOCK_HOURS {
            return true;
        }
        match hostname() {
            Some(ours) if ours == self.machine => !process_alive(self.pid),
            _ => false,
        }
    }
}

fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME").ok().or_else(|| std::env::var("HOST").ok())
    }
}

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    Path::new(&format!("/proc/{}", pid)).exists()
}

#[cfg(not(unix))]
fn process_alive(_pid: u32) -> bool {
    true
}

/// Exclusive lock on an assessment file, released on drop.
///
/// Holds an OS-level lock (fs2) on the lock file and records the owner in
/// it, so other users can see who is editing.
#[derive(Debug)]
pub struct FileLock {
    assessment_path: PathBuf,
    lock_path: PathBuf,
    _handle: File,
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire the lock for `path`.
    ///
    /// # Returns
    ///
    /// * `Ok(FileLock)` - lock acquired
    /// * `Err(CalcError::FileLocked)` - someone else holds it
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> CalcResult<Self> {
        let lock_path = lock_path_for(path);
        let info = LockInfo::new(user_id);

        if let Some(existing) = read_lock_info(&lock_path) {
            if !existing.is_stale() {
                return Err(CalcError::file_locked(
                    path.display().to_string(),
                    format!("{} ({})", existing.user_id, existing.machine),
                    existing.locked_at.to_rfc3339(),
                ));
            }
        }

        let mut handle = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(io_error("create lock", &lock_path))?;

        // The owner record may only be cleared once the OS lock is ours
        handle
            .try_lock_exclusive()
            .map_err(|_| CalcError::file_locked(path.display().to_string(), "another process", "unknown"))?;

        let json = serde_json::to_string_pretty(&info).map_err(CalcError::serialization)?;
        handle
            .set_len(0)
            .and_then(|_| handle.write_all(json.as_bytes()))
            .and_then(|_| handle.sync_all())
            .map_err(io_error("write lock", &lock_path))?;

        Ok(FileLock {
            assessment_path: path.to_path_buf(),
            lock_path,
            _handle: handle,
            info,
        })
    }

    /// Who holds the lock on `path`, if anyone.
    pub fn check(path: &Path) -> Option<LockInfo> {
        read_lock_info(&lock_path_for(path)).filter(|info| !info.is_stale())
    }

    pub fn assessment_path(&self) -> &Path {
        &self.assessment_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

/// `<path>.lock`, keeping the original extension
fn lock_path_for(path: &Path) -> PathBuf {
    with_suffix(path, "lock")
}

/// `<path>.tmp`, keeping the original extension
fn temp_path_for(path: &Path) -> PathBuf {
    with_suffix(path, "tmp")
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let extension = match path.extension() {
        Some(ext) => format!("{}.{}", ext.to_string_lossy(), suffix),
        None => suffix.to_string(),
    };
    path.with_extension(extension)
}

fn read_lock_info(lock_path: &Path) -> Option<LockInfo> {
    let contents = fs::read_to_string(lock_path).ok()?;
    serde_json::from_str(&contents).ok()
}

fn io_error<'a>(operation: &'a str, path: &'a Path) -> impl FnOnce(std::io::Error) -> CalcError + 'a {
    move |e| CalcError::file_error(operation, path.display().to_string(), e.to_string())
}

/// Save an assessment with atomic write semantics.
///
/// The JSON is written to `<path>.tmp`, synced, then renamed over `path`,
/// so an interrupted save never leaves a truncated file behind.
pub fn save_assessment(assessment: &Assessment, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(assessment).map_err(CalcError::serialization)?;
    let tmp_path = temp_path_for(path);

    let mut tmp = File::create(&tmp_path).map_err(io_error("create temp file", &tmp_path))?;
    tmp.write_all(json.as_bytes())
        .and_then(|_| tmp.sync_all())
        .map_err(io_error("write temp file", &tmp_path))?;
    drop(tmp);

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })
}

/// Load an assessment and check its schema version.
///
/// # Returns
///
/// * `Ok(Assessment)` - loaded
/// * `Err(CalcError::VersionMismatch)` - written by an incompatible version
/// * `Err(CalcError::SerializationError)` - not a valid assessment
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_assessment(path: &Path) -> CalcResult<Assessment> {
    let contents = fs::read_to_string(path).map_err(io_error("read", path))?;

    let assessment: Assessment = serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid assessment in {}: {}", path.display(), e)))?;

    validate_version(&assessment.meta.version)?;
    Ok(assessment)
}

/// Load an assessment along with the current lock holder, if any.
pub fn load_assessment_with_lock_check(path: &Path) -> CalcResult<(Assessment, Option<LockInfo>)> {
    let assessment = load_assessment(path)?;
    Ok((assessment, FileLock::check(path)))
}

/// Same major version; within 0.x the file's minor may not be newer.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file = parse_version(file_version).ok_or_else(mismatch)?;
    let current = parse_version(SCHEMA_VERSION).ok_or_else(mismatch)?;

    if file.0 != current.0 || (current.0 == 0 && file.1 > current.1) {
        return Err(mismatch());
    }
    Ok(())
}

fn parse_version(version: &str) -> Option<(u32, u32)> {
    let mut parts = version.split('.');
    let major = parts.next()?.trim().parse().ok()?;
    let minor = parts.next().map_or(Some(0), |p| p.trim().parse().ok())?;
    Some((major, minor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    fn temp_assessment_path(name: &str) -> PathBuf {
        temp_dir().join(format!("risk_core_test_{}.{}", name, FILE_EXTENSION))
    }

    #[test]
    fn test_companion_paths() {
        let path = Path::new("/jobs/warehouse.lpr");
        assert_eq!(lock_path_for(path), Path::new("/jobs/warehouse.lpr.lock"));
        assert_eq!(temp_path_for(path), Path::new("/jobs/warehouse.lpr.tmp"));
        assert_eq!(lock_path_for(Path::new("plain")), Path::new("plain.lock"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_assessment_path("roundtrip");

        let assessment = Assessment::template("Test Engineer", "TEST-001", "Test Client");
        save_assessment(&assessment, &path).unwrap();

        let loaded = load_assessment(&path).unwrap();
        assert_eq!(loaded.meta.id, assessment.meta.id);
        assert_eq!(loaded.meta.engineer, "Test Engineer");
        assert_eq!(loaded.zones, assessment.zones);
        assert_eq!(loaded.lines, assessment.lines);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_leaves_no_tmp_file() {
        let path = temp_assessment_path("atomic");

        save_assessment(&Assessment::default(), &path).unwrap();

        assert!(!temp_path_for(&path).exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_lock_acquire_and_release() {
        let path = temp_assessment_path("lock");
        File::create(&path).unwrap();

        let lock = FileLock::acquire(&path, "test@example.com").unwrap();
        assert_eq!(lock.info.user_id, "test@example.com");
        assert_eq!(lock.assessment_path(), path.as_path());

        let lock_path = lock_path_for(&path);
        assert!(lock_path.exists());

        drop(lock);
        assert!(!lock_path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_held_lock_keeps_owner_record() {
        let path = temp_assessment_path("held_lock");
        File::create(&path).unwrap();

        let lock = FileLock::acquire(&path, "first@example.com").unwrap();
        let lock_path = lock_path_for(&path);

        // An old record makes the second caller try the OS lock
        let mut old = LockInfo::new("old@example.com");
        old.locked_at = Utc::now() - chrono::Duration::hours(STALE_LOCK_HOURS + 1);
        fs::write(&lock_path, serde_json::to_string_pretty(&old).unwrap()).unwrap();

        let err = FileLock::acquire(&path, "second@example.com").unwrap_err();
        assert_eq!(err.error_code(), "FILE_LOCKED");
        let on_disk = read_lock_info(&lock_path).unwrap();
        assert_eq!(on_disk.user_id, "old@example.com");

        drop(lock);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("0.0.9").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }

    #[test]
    fn test_newer_file_refused() {
        let path = temp_assessment_path("newer");
        let mut assessment = Assessment::default();
        assessment.meta.version = "0.9.0".to_string();
        save_assessment(&assessment, &path).unwrap();

        match load_assessment(&path) {
            Err(CalcError::VersionMismatch { file_version, .. }) => assert_eq!(file_version, "0.9.0"),
            other => panic!("expected VersionMismatch, got {:?}", other.map(|a| a.meta.version)),
        }

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_json_is_serialization_error() {
        let path = temp_assessment_path("invalid");
        fs::write(&path, "{ not json").unwrap();

        let err = load_assessment(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_with_lock_check() {
        let path = temp_assessment_path("lock_check");
        save_assessment(&Assessment::new("Test", "TEST", "Client"), &path).unwrap();

        let (loaded, lock_info) = load_assessment_with_lock_check(&path).unwrap();
        assert_eq!(loaded.meta.job_id, "TEST");
        assert!(lock_info.is_none());

        let _ = fs::remove_file(&path);
    }
}
