//! Project discovery and structure

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Represents a KBT catalog project
#[derive(Debug)]
pub struct Project {
    /// Root directory of the project (parent of .kbt/)
    root: PathBuf,
}

impl Project {
    /// Find project root by walking up from the current directory
    pub fn discover() -> Result<Self, ProjectError> {
        let current =
            std::env::current_dir().map_err(|e| ProjectError::IoError(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find project root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        loop {
            let kbt_dir = current.join(".kbt");
            if kbt_dir.is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(ProjectError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Create a new project structure at the given path
    pub fn init(path: &Path) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        let kbt_dir = root.join(".kbt");
        if kbt_dir.exists() {
            return Err(ProjectError::AlreadyExists(root.clone()));
        }

        std::fs::create_dir_all(&kbt_dir).map_err(|e| ProjectError::IoError(e.to_string()))?;

        // Create default config
        let config_path = kbt_dir.join("config.yaml");
        std::fs::write(&config_path, Self::default_config())
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        Self::create_catalog_dirs(&root)?;

        Ok(Self { root })
    }

    fn default_config() -> &'static str {
        r#"# KBT Project Configuration

# Default author for new builds (can be overridden by global config)
# author: ""

# Default output format (auto, tsv, csv, md, json, id)
# default_format: auto
"#
    }

    fn create_catalog_dirs(root: &Path) -> Result<(), ProjectError> {
        let dirs = [
            "catalog/engines",
            "catalog/motors",
            "catalog/parts",
            "builds",
        ];

        for dir in dirs {
            std::fs::create_dir_all(root.join(dir))
                .map_err(|e| ProjectError::IoError(e.to_string()))?;
        }

        Ok(())
    }

    /// Get the project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the .kbt directory
    pub fn kbt_dir(&self) -> PathBuf {
        self.root.join(".kbt")
    }

    /// Get the gas engine catalog directory
    pub fn engines_dir(&self) -> PathBuf {
        self.root.join("catalog/engines")
    }

    /// Get the electric motor catalog directory
    pub fn motors_dir(&self) -> PathBuf {
        self.root.join("catalog/motors")
    }

    /// Get the part catalog directory
    pub fn parts_dir(&self) -> PathBuf {
        self.root.join("catalog/parts")
    }

    /// Get the saved builds directory
    pub fn builds_dir(&self) -> PathBuf {
        self.root.join("builds")
    }
}

/// Errors that can occur during project operations
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("no KBT project found (searched from {searched_from} upward); run `kbt init` first")]
    NotFound { searched_from: PathBuf },

    #[error("a KBT project already exists at {0}")]
    AlreadyExists(PathBuf),

    #[error("I/O error: {0}")]
    IoError(String),
}
