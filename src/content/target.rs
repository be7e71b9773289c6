//! Classification of request targets into files and programs.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::ContentConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTarget {
    Static { path: PathBuf },
    Dynamic { program: PathBuf, query: String },
}

impl ResolvedTarget {
    /// Filesystem path that has to pass validation.
    pub fn path(&self) -> &Path {
        match self {
            ResolvedTarget::Static { path } => path,
            ResolvedTarget::Dynamic { program, .. } => program,
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self, ResolvedTarget::Static { .. })
    }
}

/// Maps a raw target onto the content root.
///
/// The target is concatenated to the root as text, so `/a` under root `.`
/// becomes `./a`. No traversal checks are made.
pub fn resolve(target: &str, content: &ContentConfig) -> ResolvedTarget {
    if !target.contains(content.dynamic_marker.as_str()) {
        let mut path = under_root(&content.root, target);
        if target.ends_with('/') {
            path.push(&content.default_document);
        }
        return ResolvedTarget::Static {
            path: PathBuf::from(path),
        };
    }

    let (program, query) = target.split_once('?').unwrap_or((target, ""));
    ResolvedTarget::Dynamic {
        program: PathBuf::from(under_root(&content.root, program)),
        query: query.to_string(),
    }
}

fn under_root(root: &Path, target: &str) -> OsString {
    let mut path = root.as_os_str().to_owned();
    path.push(target);
    path
}
