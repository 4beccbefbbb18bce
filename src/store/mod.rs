//! Date-keyed entry storage.
//!
//! Every date maps to exactly one markdown file, `diary-YYYY-MM-DD.md`, inside
//! the storage directory. A blank entry is represented by the absence of its
//! file: saving whitespace-only text removes whatever was there before.

use crate::constants::{DATE_FORMAT_ISO, ENTRY_FILE_EXTENSION, ENTRY_FILE_PREFIX};
use crate::errors::StorageError;
use chrono::NaiveDate;
use std::fs::{self, File};
use std::io::{self, ErrorKind, Write};
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// What a call to [`EntryStore::save`] did on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The trimmed text was written, replacing any previous content.
    Written,
    /// The text was blank and an existing entry was deleted.
    Removed,
    /// The text was blank and there was no entry to delete.
    Skipped,
}

/// Persistence used by the editor session.
///
/// Implementations must treat a missing entry as the empty string and must
/// never persist blank text.
pub trait EntryStore {
    /// Returns the stored text for `date`, or an empty string if none exists.
    fn load(&self, date: NaiveDate) -> Result<String, StorageError>;

    /// Stores `text` for `date` after trimming surrounding whitespace.
    fn save(&self, date: NaiveDate, text: &str) -> Result<SaveOutcome, StorageError>;
}

/// File-backed [`EntryStore`] rooted at a single directory.
///
/// # Examples
///
/// ```no_run
/// use quill::store::{DocumentStore, EntryStore, SaveOutcome};
/// use chrono::NaiveDate;
/// use std::path::Path;
///
/// let store = DocumentStore::open(Path::new("/home/me/Documents/diary"))?;
/// let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
///
/// assert_eq!(store.save(date, "  Hello\n")?, SaveOutcome::Written);
/// assert_eq!(store.load(date)?, "Hello");
/// # Ok::<(), quill::errors::StorageError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    /// Opens the store, creating the storage directory if it does not exist.
    ///
    /// Creation is idempotent. On unix a newly created directory is restricted
    /// to its owner.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::CreateDir` if the directory cannot be created or
    /// its permissions cannot be set.
    pub fn open(root: &Path) -> Result<Self, StorageError> {
        ensure_storage_directory_exists(root)?;
        Ok(DocumentStore {
            root: root.to_path_buf(),
        })
    }

    /// The directory entries are stored in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding the entry for `date`.
    ///
    /// ```
    /// use quill::store::DocumentStore;
    /// use chrono::NaiveDate;
    /// # let dir = tempfile::tempdir().unwrap();
    /// let store = DocumentStore::open(dir.path()).unwrap();
    ///
    /// let path = store.path_for(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    /// assert!(path.ends_with("diary-2024-05-01.md"));
    /// ```
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.root.join(entry_file_name(date))
    }

    fn write_entry(&self, path: &Path, content: &str) -> Result<(), StorageError> {
        replace_file(&self.root, path, |file| file.write_all(content.as_bytes())).map_err(
            |source| StorageError::Write {
                path: path.to_path_buf(),
                source,
            },
        )
    }
}

impl EntryStore for DocumentStore {
    fn load(&self, date: NaiveDate) -> Result<String, StorageError> {
        let path = self.path_for(date);
        debug!("Loading {}", path.display());

        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!("Loaded {} bytes", content.len());
                Ok(content)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No entry for {}", date);
                Ok(String::new())
            }
            Err(source) => Err(StorageError::Read { path, source }),
        }
    }

    fn save(&self, date: NaiveDate, text: &str) -> Result<SaveOutcome, StorageError> {
        let path = self.path_for(date);
        let content = text.trim();

        if content.is_empty() {
            return match fs::remove_file(&path) {
                Ok(()) => {
                    info!("Removed blank entry {}", path.display());
                    Ok(SaveOutcome::Removed)
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    debug!("Nothing to save for {}", date);
                    Ok(SaveOutcome::Skipped)
                }
                Err(source) => Err(StorageError::Remove { path, source }),
            };
        }

        self.write_entry(&path, content)?;
        info!("Saved {}", path.display());
        Ok(SaveOutcome::Written)
    }
}

/// File name for the entry of `date`, e.g. `diary-2024-05-01.md`.
pub fn entry_file_name(date: NaiveDate) -> String {
    format!(
        "{}{}{}",
        ENTRY_FILE_PREFIX,
        date.format(DATE_FORMAT_ISO),
        ENTRY_FILE_EXTENSION
    )
}

/// Replaces `path` with whatever `fill` writes, via a temporary file in `dir`.
///
/// The old file stays untouched until the new content is fully written and
/// synced. On failure the temporary file is removed.
fn replace_file<F>(dir: &Path, path: &Path, fill: F) -> io::Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let mut temp = NamedTempFile::new_in(dir)?;

    #[cfg(unix)]
    {
        let permissions = fs::Permissions::from_mode(crate::constants::DEFAULT_FILE_PERMISSIONS);
        temp.as_file().set_permissions(permissions)?;
    }

    fill(temp.as_file_mut())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Ensures the storage directory exists, creating it if necessary.
fn ensure_storage_directory_exists(root: &Path) -> Result<(), StorageError> {
    if root.is_dir() {
        return Ok(());
    }

    let to_storage_error = |source| StorageError::CreateDir {
        path: root.to_path_buf(),
        source,
    };

    fs::create_dir_all(root).map_err(to_storage_error)?;

    #[cfg(unix)]
    {
        let permissions = fs::Permissions::from_mode(crate::constants::DEFAULT_DIR_PERMISSIONS);
        fs::set_permissions(root, permissions).map_err(to_storage_error)?;
        debug!("Set 0o700 permissions on storage directory");
    }

    info!("Created storage directory {}", root.display());
    Ok(())
}
