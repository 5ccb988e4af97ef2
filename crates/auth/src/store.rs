//! Process-wide holder of the current permission matrix.
//!
//! Readers take a snapshot (`Arc<PermissionMatrix>`) and keep evaluating
//! against it for as long as they hold it. A reload builds a complete new
//! matrix first and publishes it with one atomic pointer swap, so no reader
//! ever observes a partially updated matrix.

use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::{ConfigError, PermissionMatrix};

#[derive(Debug)]
pub struct PolicyStore {
    current: ArcSwap<PermissionMatrix>,
}

impl PolicyStore {
    pub fn new(matrix: PermissionMatrix) -> Self {
        Self {
            current: ArcSwap::from_pointee(matrix),
        }
    }

    /// Current matrix. Lock-free; the returned snapshot never changes.
    pub fn snapshot(&self) -> Arc<PermissionMatrix> {
        self.current.load_full()
    }

    /// Replace the matrix, returning the previous one.
    pub fn publish(&self, matrix: PermissionMatrix) -> Arc<PermissionMatrix> {
        self.current.swap(Arc::new(matrix))
    }

    /// Load `path` and publish it. On error the current matrix stays in place.
    pub fn reload_from_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let matrix = PermissionMatrix::load_file(path.as_ref())?;
        self.publish(matrix);
        tracing::info!(path = %path.as_ref().display(), "policy definitions reloaded");
        Ok(())
    }

    /// Load a definitions document and publish it. On error nothing changes.
    pub fn reload_from_str(&self, source: &str) -> Result<(), ConfigError> {
        let matrix = PermissionMatrix::load(source)?;
        self.publish(matrix);
        tracing::info!("policy definitions reloaded");
        Ok(())
    }
}
