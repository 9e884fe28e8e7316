//! # File I/O Module
//!
//! Handles project file operations with safety features:
//! - **Atomic saves**: Write to a temp file, sync, rename over the target
//! - **File locking**: Keep two engineers from editing one project file
//! - **Version validation**: Refuse files written by a newer schema
//!
//! ## File Format
//!
//! Projects are saved as `.pcp` (pile capacity project) files containing JSON.
//! Lock files sit next to them as `.pcp.lock` and record who holds the lock.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pile_core::file_io::{save_project, load_project, FileLock};
//! use pile_core::project::Project;
//! use std::path::Path;
//!
//! let project = Project::sample("Pier 7", "Engineer", "Client");
//! let path = Path::new("pier7.pcp");
//!
//! let lock = FileLock::acquire(path, "engineer@company.com").unwrap();
//! save_project(&project, path).unwrap();
//! drop(lock);
//!
//! let loaded = load_project(path).unwrap();
//! assert_eq!(loaded.meta.name, "Pier 7");
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::{CalcError, CalcResult};
use crate::project::{Project, SCHEMA_VERSION};

/// Extension used for project files
pub const PROJECT_EXTENSION: &str = "pcp";

/// Locks older than this are treated as abandoned
const STALE_LOCK_HOURS: i64 = 24;

/// Metadata stored in a `.pcp.lock` file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
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

    /// Whether the lock has been abandoned: its process is gone (same
    /// machine only) or it is older than a day.
    pub fn is_stale(&self) -> bool {
        if hostname().as_deref() == Some(self.machine.as_str()) && !process_alive(self.pid) {
            return true;
        }
        (Utc::now() - self.locked_at).num_hours() > STALE_LOCK_HOURS
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

#[cfg(target_os = "linux")]
fn process_alive(pid: u32) -> bool {
    Path::new(&format!("/proc/{}", pid)).exists()
}

#[cfg(not(target_os = "linux"))]
fn process_alive(_pid: u32) -> bool {
    // No /proc; fall back to the age limit
    true
}

/// Exclusive lock on a project file, released on drop.
///
/// Combines an OS-level lock (fs2) on the sidecar file with the JSON
/// [`LockInfo`] written into it, so other users can see who holds it.
#[derive(Debug)]
pub struct FileLock {
    project_path: PathBuf,
    lock_path: PathBuf,
    /// Holds the OS lock for as long as the guard lives
    _lock_file: File,
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire an exclusive lock on a project file.
    ///
    /// Returns `CalcError::FileLocked` if another live process holds it.
    /// Stale locks are taken over.
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
            warn!(
                path = %path.display(),
                holder = %existing.user_id,
                "Taking over stale lock"
            );
        }

        let lock_file = lock_sidecar(path, &lock_path, &info)?;

        debug!(path = %path.display(), user = %info.user_id, "Acquired project lock");

        Ok(FileLock {
            project_path: path.to_path_buf(),
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }

    /// Current holder of the lock on `path`, if any live lock exists.
    pub fn check(path: &Path) -> Option<LockInfo> {
        read_lock_info(&lock_path_for(path)).filter(|info| !info.is_stale())
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

/// Open the sidecar, take the OS lock, then replace its contents with `info`.
///
/// The file is only truncated once the lock is held, so a refused caller
/// leaves the holder's record intact.
fn lock_sidecar(project_path: &Path, lock_path: &Path, info: &LockInfo) -> CalcResult<File> {
    let write_error = |e: std::io::Error| {
        CalcError::file_error("write lock", lock_path.display().to_string(), e.to_string())
    };

    let mut lock_file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(lock_path)
        .map_err(|e| {
            CalcError::file_error("create lock", lock_path.display().to_string(), e.to_string())
        })?;

    lock_file.try_lock_exclusive().map_err(|_| {
        CalcError::file_locked(project_path.display().to_string(), "another process", "unknown")
    })?;

    let lock_json = serde_json::to_string_pretty(info)?;
    lock_file.set_len(0).map_err(write_error)?;
    lock_file.seek(SeekFrom::Start(0)).map_err(write_error)?;
    lock_file
        .write_all(lock_json.as_bytes())
        .and_then(|_| lock_file.sync_all())
        .map_err(write_error)?;
    Ok(lock_file)
}

/// `project.pcp` -> `project.pcp.lock`
fn lock_path_for(project_path: &Path) -> PathBuf {
    sidecar_path(project_path, "lock")
}

fn sidecar_path(project_path: &Path, suffix: &str) -> PathBuf {
    let extension = project_path
        .extension()
        .map(|e| format!("{}.{}", e.to_string_lossy(), suffix))
        .unwrap_or_else(|| suffix.to_string());
    project_path.with_extension(extension)
}

/// Unreadable or malformed lock files count as no lock.
fn read_lock_info(lock_path: &Path) -> Option<LockInfo> {
    let contents = fs::read_to_string(lock_path).ok()?;
    serde_json::from_str(&contents).ok()
}

/// Save a project with atomic write semantics.
///
/// The JSON is parsed back before anything touches the disk, then written to
/// `<path>.tmp`, synced and renamed over `path`.
///
/// ```rust,no_run
/// use pile_core::file_io::save_project;
/// use pile_core::project::Project;
/// use std::path::Path;
///
/// let project = Project::sample("Pier 7", "Engineer", "Client");
/// save_project(&project, Path::new("pier7.pcp"))?;
/// # Ok::<(), pile_core::errors::CalcError>(())
/// ```
pub fn save_project(project: &Project, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(project)?;
    let _: Project = serde_json::from_str(&json)?;

    let tmp_path = sidecar_path(path, "tmp");
    let mut tmp_file = File::create(&tmp_path)
        .map_err(|e| {
            CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
        })?;

    tmp_file
        .write_all(json.as_bytes())
        .and_then(|_| tmp_file.sync_all())
        .map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
        })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    info!(path = %path.display(), bytes = json.len(), "Saved project");
    Ok(())
}

/// Load a project file and check its schema version.
///
/// # Errors
///
/// * `CalcError::FileError` - the file cannot be read
/// * `CalcError::SerializationError` - the file is not a valid project
/// * `CalcError::VersionMismatch` - the file was written by an incompatible schema
pub fn load_project(path: &Path) -> CalcResult<Project> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let project: Project =
        serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid project JSON in {}: {}", path.display(), e),
        })?;

    validate_version(&project.meta.version)?;

    info!(path = %path.display(), name = %project.meta.name, "Loaded project");
    Ok(project)
}

/// Load a project along with the current lock holder, if any.
pub fn load_project_with_lock_check(path: &Path) -> CalcResult<(Project, Option<LockInfo>)> {
    let project = load_project(path)?;
    Ok((project, FileLock::check(path)))
}

/// Major versions must match; within 0.x a newer minor is also rejected.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version);
    let current_parts = parse(SCHEMA_VERSION);

    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    match (file_parts.as_slice(), current_parts.as_slice()) {
        ([file_major, ..], [current_major, ..]) if file_major != current_major => Err(mismatch()),
        ([0, file_minor, ..], [0, current_minor, ..]) if file_minor > current_minor => {
            Err(mismatch())
        }
        ([_, ..], [_, ..]) => Ok(()),
        _ => Err(mismatch()),
    }
}
