//! Error handling utilities for the quill application.
//!
//! This module provides `StorageError`, raised by the entry store when the
//! filesystem refuses an operation, and the central `AppError` type with its
//! `AppResult` alias used by everything above the store.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents filesystem failures while reading, writing or removing entries.
///
/// Every variant carries the path involved and the underlying I/O error, so the
/// front end can tell the user exactly which file could not be touched. A file
/// that simply does not exist is never reported through this type: a missing
/// entry is the normal "nothing written yet" state.
///
/// # Examples
///
/// ```
/// use quill::errors::StorageError;
/// use std::io::{self, ErrorKind};
/// use std::path::PathBuf;
///
/// let error = StorageError::Write {
///     path: PathBuf::from("/journal/diary-2024-05-01.md"),
///     source: io::Error::new(ErrorKind::PermissionDenied, "permission denied"),
/// };
///
/// assert!(format!("{}", error).contains("diary-2024-05-01.md"));
/// assert!(format!("{}", error).contains("permission denied"));
/// ```
#[derive(Debug, Error)]
pub enum StorageError {
    /// The storage directory could not be created.
    #[error("Failed to create storage directory {path}: {source}. Please check that the parent directory exists and is writable.")]
    CreateDir {
        /// The directory that could not be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// An existing entry could not be read.
    #[error("Failed to read entry {path}: {source}")]
    Read {
        /// The entry file that could not be read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// An entry could not be written.
    #[error("Failed to write entry {path}: {source}. Please check disk space and file permissions.")]
    Write {
        /// The entry file that could not be written
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A blank entry could not be removed.
    #[error("Failed to remove blank entry {path}: {source}")]
    Remove {
        /// The entry file that could not be removed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    /// The file or directory the failed operation was aimed at.
    pub fn path(&self) -> &PathBuf {
        match self {
            StorageError::CreateDir { path, .. }
            | StorageError::Read { path, .. }
            | StorageError::Write { path, .. }
            | StorageError::Remove { path, .. } => path,
        }
    }
}

/// Represents all possible errors that can occur in the quill application.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use quill::errors::AppError;
///
/// let error = AppError::Config("Missing journal directory".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Missing journal directory");
/// ```
///
/// Converting from an IO error:
/// ```
/// use quill::errors::AppError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "file not found");
/// let app_error: AppError = io_error.into();
///
/// match app_error {
///     AppError::Io(inner) => assert_eq!(inner.kind(), ErrorKind::NotFound),
///     _ => panic!("Expected Io variant"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors outside the entry store (terminal, logging setup).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors raised by the entry store.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Malformed user input, such as an unparseable date.
    #[error("Invalid input: {0}")]
    Input(String),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use quill::errors::{AppResult, AppError};
///
/// fn might_fail() -> AppResult<String> {
///     if false {
///         return Err(AppError::Input("not a date".to_string()));
///     }
///     Ok("Operation succeeded".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;
