//! Status of a resolved resource and the checks it must pass.

use std::fs::Metadata;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use crate::content::target::ResolvedTarget;
use crate::http::error::DispatchError;

const OWNER_READ: u32 = 0o400;
const OWNER_EXEC: u32 = 0o100;

/// What a single status query tells us about a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceMetadata {
    pub is_file: bool,
    pub owner_readable: bool,
    pub owner_executable: bool,
    pub size: u64,
}

impl From<&Metadata> for ResourceMetadata {
    fn from(meta: &Metadata) -> Self {
        let mode = meta.permissions().mode();
        Self {
            is_file: meta.is_file(),
            owner_readable: mode & OWNER_READ != 0,
            owner_executable: mode & OWNER_EXEC != 0,
            size: meta.len(),
        }
    }
}

/// Queries the filesystem. Any failure counts as a missing resource.
pub async fn stat(path: &Path) -> Option<ResourceMetadata> {
    tokio::fs::metadata(path)
        .await
        .ok()
        .map(|meta| ResourceMetadata::from(&meta))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Ok,
    Fail(DispatchError),
}

/// A named check over a resolved target and its status.
pub struct Validator {
    pub name: &'static str,
    check: fn(&ResolvedTarget, Option<&ResourceMetadata>) -> Validation,
}

impl Validator {
    pub fn run(&self, target: &ResolvedTarget, meta: Option<&ResourceMetadata>) -> Validation {
        (self.check)(target, meta)
    }
}

/// Applied in order; the existence check always comes first.
pub const VALIDATORS: &[Validator] = &[
    Validator {
        name: "exists",
        check: check_exists,
    },
    Validator {
        name: "static-readable",
        check: check_static_readable,
    },
    Validator {
        name: "dynamic-executable",
        check: check_dynamic_executable,
    },
];

fn check_exists(target: &ResolvedTarget, meta: Option<&ResourceMetadata>) -> Validation {
    match meta {
        Some(_) => Validation::Ok,
        None => Validation::Fail(DispatchError::NotFound(target.path().to_path_buf())),
    }
}

fn check_static_readable(target: &ResolvedTarget, meta: Option<&ResourceMetadata>) -> Validation {
    match (target, meta) {
        (ResolvedTarget::Static { path }, Some(m)) if !m.is_file || !m.owner_readable => {
            Validation::Fail(DispatchError::StaticForbidden(path.clone()))
        }
        _ => Validation::Ok,
    }
}

fn check_dynamic_executable(
    target: &ResolvedTarget,
    meta: Option<&ResourceMetadata>,
) -> Validation {
    match (target, meta) {
        (ResolvedTarget::Dynamic { program, .. }, Some(m)) if !m.is_file || !m.owner_executable => {
            Validation::Fail(DispatchError::DynamicForbidden(program.clone()))
        }
        _ => Validation::Ok,
    }
}

/// Runs every validator in order and stops at the first failure.
pub fn validate(
    target: &ResolvedTarget,
    meta: Option<ResourceMetadata>,
) -> Result<ResourceMetadata, DispatchError> {
    for validator in VALIDATORS {
        if let Validation::Fail(err) = validator.run(target, meta.as_ref()) {
            tracing::debug!(check = validator.name, error = %err, "Validation failed");
            return Err(err);
        }
    }
    meta.ok_or_else(|| DispatchError::NotFound(target.path().to_path_buf()))
}

/// Stats the target's path and validates it.
pub async fn inspect(target: &ResolvedTarget) -> Result<ResourceMetadata, DispatchError> {
    let meta = stat(target.path()).await;
    validate(target, meta)
}
