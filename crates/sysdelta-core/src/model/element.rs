use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An element of the analyzed system addressable by a unique fully-qualified name
/// (source file, type, module, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedElement {
    /// Unique fully-qualified name, used for all cross-snapshot matching
    pub fq_name: String,

    /// Short name shown to users
    pub presentation_name: String,
}

impl NamedElement {
    pub fn new(fq_name: impl Into<String>, presentation_name: impl Into<String>) -> Self {
        Self {
            fq_name: fq_name.into(),
            presentation_name: presentation_name.into(),
        }
    }
}

/// A content root of a module.
///
/// Two identities are in play: `fq_name` decides whether a module changed at
/// all, `presentation_name` decides how a changed module's roots are broken down.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RootDirectory {
    /// Fully-qualified path identity
    pub fq_name: String,

    /// Path as presented to users (usually relative to the system root)
    pub presentation_name: String,
}

impl RootDirectory {
    pub fn new(fq_name: impl Into<String>, presentation_name: impl Into<String>) -> Self {
        Self {
            fq_name: fq_name.into(),
            presentation_name: presentation_name.into(),
        }
    }
}

/// A module of the analyzed system, identified by name within one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Module name, unique within a snapshot
    pub name: String,

    /// Name shown to users
    #[serde(default)]
    pub presentation_name: String,

    /// Content roots in declaration order
    #[serde(default)]
    pub root_directories: Vec<RootDirectory>,
}

impl Module {
    /// Create a module without root directories
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            presentation_name: name.clone(),
            name,
            root_directories: Vec::new(),
        }
    }

    /// Append a root directory whose presentation name equals its path
    pub fn with_root(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.root_directories
            .push(RootDirectory::new(path.clone(), path));
        self
    }

    /// Append a root directory
    pub fn with_root_directory(mut self, root: RootDirectory) -> Self {
        self.root_directories.push(root);
        self
    }

    /// Fully-qualified identities of all root directories
    pub fn root_fq_names(&self) -> BTreeSet<&str> {
        self.root_directories
            .iter()
            .map(|r| r.fq_name.as_str())
            .collect()
    }
}
