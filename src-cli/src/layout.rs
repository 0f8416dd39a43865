//! On-disk output layout: one folder per artifact role under a root directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// What an output file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    /// Retrieved bytes as downloaded.
    Original,
    /// Grayscale preview at source size.
    Gray,
    /// Grayscale preview at target size.
    Resized,
    /// Black-and-white preview of the thresholded mask.
    Mono,
    /// Packed `.bin` output.
    Binary,
    /// C array `.c` output.
    CArray,
}

impl Role {
    pub const ALL: [Self; 6] = [
        Self::Original,
        Self::Gray,
        Self::Resized,
        Self::Mono,
        Self::Binary,
        Self::CArray,
    ];

    pub fn default_folder(self) -> &'static str {
        match self {
            Self::Original => "01_original",
            Self::Gray => "02_gray",
            Self::Resized => "03_resized",
            Self::Mono => "04_1bit",
            Self::Binary | Self::CArray => "05_binary",
        }
    }
}

/// Maps roles to folders below an output root.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
    folders: BTreeMap<Role, String>,
}

impl OutputLayout {
    /// Layout with the default numbered folders.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            folders: Role::ALL
                .iter()
                .map(|&role| (role, role.default_folder().to_string()))
                .collect(),
        }
    }

    /// Layout that writes every role directly into `root`.
    pub fn flat(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            folders: Role::ALL.iter().map(|&role| (role, String::new())).collect(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dir(&self, role: Role) -> PathBuf {
        match self.folders.get(&role).map(String::as_str) {
            None | Some("") => self.root.clone(),
            Some(folder) => self.root.join(folder),
        }
    }

    /// `<root>/<folder>/<stem>.<ext>`
    pub fn path(&self, role: Role, stem: &str, ext: &str) -> PathBuf {
        self.dir(role).join(format!("{stem}.{ext}"))
    }

    pub fn report_path(&self) -> PathBuf {
        self.root.join("report.json")
    }

    /// Create the folders for `roles` (and the root).
    pub fn ensure_dirs(&self, roles: &[Role]) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)?;
        for &role in roles {
            std::fs::create_dir_all(self.dir(role))?;
        }
        Ok(())
    }
}
