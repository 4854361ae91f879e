//! Options record persistence.
//!
//! The upgrade engine keeps all of its durable state inside a single opaque
//! JSON object (the "options record"). Stores only know how to read and write
//! that object as a whole; which keys mean what is up to the caller.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

/// The opaque options record.
pub type Options = Map<String, Value>;

/// Errors raised when the options record cannot be read or written.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Failed to read options file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write options file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed options record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Options record is not a JSON object")]
    NotAnObject,
}

/// Get/set access to the options record.
pub trait OptionsStore {
    /// Read the whole record. A store that was never written returns an empty record.
    fn get(&self) -> Result<Options, PersistenceError>;

    /// Replace the whole record.
    fn set(&self, options: &Options) -> Result<(), PersistenceError>;
}

/// In-process store, used by tests and embedders that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStore {
    options: RefCell<Options>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the given record.
    pub fn with_options(options: Options) -> Self {
        Self {
            options: RefCell::new(options),
        }
    }
}

impl OptionsStore for MemoryStore {
    fn get(&self) -> Result<Options, PersistenceError> {
        Ok(self.options.borrow().clone())
    }

    fn set(&self, options: &Options) -> Result<(), PersistenceError> {
        *self.options.borrow_mut() = options.clone();
        Ok(())
    }
}

/// Store backed by a pretty-printed JSON file.
///
/// Writes go to a temp file next to the target and are renamed into place,
/// so readers never observe a half-written record.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("options.json");
        self.path.with_file_name(format!(".{}.tmp", name))
    }
}

impl OptionsStore for JsonFileStore {
    fn get(&self) -> Result<Options, PersistenceError> {
        if !self.path.exists() {
            return Ok(Options::new());
        }

        let contents = fs::read_to_string(&self.path).map_err(|source| PersistenceError::Read {
            path: self.path.clone(),
            source,
        })?;
        if contents.trim().is_empty() {
            return Ok(Options::new());
        }

        match serde_json::from_str::<Value>(&contents)? {
            Value::Object(options) => Ok(options),
            _ => Err(PersistenceError::NotAnObject),
        }
    }

    fn set(&self, options: &Options) -> Result<(), PersistenceError> {
        let write_err = |source| PersistenceError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let contents = serde_json::to_string_pretty(options)?;
        let temp_path = self.temp_path();
        fs::write(&temp_path, contents).map_err(write_err)?;

        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(write_err(e));
        }

        Ok(())
    }
}
