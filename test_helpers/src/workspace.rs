//! Temporary directories holding a base document and its patch.
//!
//! # Examples
//!
//! ```
//! use yaml_overlay_test_helpers::PatchWorkspace;
//!
//! # fn main() -> anyhow::Result<()> {
//! let workspace = PatchWorkspace::new()?;
//! let base = workspace.write_base("name: api\n")?;
//! let patch = workspace.write_patch("name: worker\n")?;
//! assert_eq!(patch.as_str(), format!("{base}.patch"));
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

const DEFAULT_BASE_NAME: &str = "config.yaml";

/// A temporary directory removed when the fixture is dropped.
#[derive(Debug)]
pub struct PatchWorkspace {
    _dir: TempDir,
    root: Utf8PathBuf,
    base_name: String,
}

impl PatchWorkspace {
    /// Create a workspace whose base document is named `config.yaml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created or its
    /// path is not UTF-8.
    pub fn new() -> Result<Self> {
        Self::with_base_name(DEFAULT_BASE_NAME)
    }

    /// Create a workspace with a custom base document name.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created or its
    /// path is not UTF-8.
    pub fn with_base_name(name: &str) -> Result<Self> {
        let dir = tempfile::tempdir().context("create temporary directory")?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow!("temporary path {} is not UTF-8", path.display()))?;
        Ok(Self {
            _dir: dir,
            root,
            base_name: name.to_owned(),
        })
    }

    /// Directory holding the documents.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Absolute path of the base document, whether or not it exists yet.
    #[must_use]
    pub fn base_path(&self) -> Utf8PathBuf {
        self.root.join(&self.base_name)
    }

    /// Absolute path of the patch document, whether or not it exists yet.
    #[must_use]
    pub fn patch_path(&self) -> Utf8PathBuf {
        self.root.join(format!("{}.patch", self.base_name))
    }

    /// Write the base document and return its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_base(&self, contents: &str) -> Result<Utf8PathBuf> {
        write_file(self.base_path(), contents)
    }

    /// Write the patch document and return its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_patch(&self, contents: &str) -> Result<Utf8PathBuf> {
        write_file(self.patch_path(), contents)
    }

    /// Write `contents` to `relative` beneath the workspace root, creating
    /// parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory or the file cannot be written.
    pub fn write(&self, relative: &str, contents: &str) -> Result<Utf8PathBuf> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        write_file(path, contents)
    }
}

fn write_file(path: Utf8PathBuf, contents: &str) -> Result<Utf8PathBuf> {
    std::fs::write(&path, contents).with_context(|| format!("write {path}"))?;
    Ok(path)
}
