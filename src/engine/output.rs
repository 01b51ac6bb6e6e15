//! Output Path Resolver
//!
//! The build-facing operation: derive `BASENAME` from a source path, expand a
//! template against it, then optionally canonicalize against a root.
//!
//! | Argument | Effect |
//! |----------|--------|
//! | `path`   | Source file; its file stem is bound as `BASENAME` |
//! | `root`   | Base directory the expansion is canonicalized against |
//!
//! Without `path`, `{BASENAME}` expands to nothing. Without `root`, the
//! expansion is returned as-is.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::path::{PathStyle, canonicalize_path};
use super::template::{DEFAULT_MAX_DEPTH, Interpolator};
use crate::error::{LbmError, Result};
use crate::vars::{VariableTable, json_kind};

/// Name of the variable bound from the `path` argument
pub const BASENAME_VAR: &str = "BASENAME";

/// Argument bag for [`resolve_output_path`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
}

impl OutputArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Read the argument bag handed over by the scripting layer.
    ///
    /// `null` counts as absent and unknown keys are ignored. Anything else
    /// that is not a string is rejected.
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            LbmError::invalid_argument(format!(
                "output arguments must be an object, got {}",
                json_kind(value)
            ))
        })?;

        let string_arg = |key: &str| -> Result<Option<String>> {
            match object.get(key) {
                None | Some(Value::Null) => Ok(None),
                Some(Value::String(s)) => Ok(Some(s.clone())),
                Some(other) => Err(LbmError::invalid_argument(format!(
                    "'{}' must be a string, got {}",
                    key,
                    json_kind(other)
                ))),
            }
        };

        Ok(Self {
            path: string_arg("path")?,
            root: string_arg("root")?,
        })
    }
}

/// File name of `path` without directory or extension.
///
/// The directory is everything up to the last `/` or `\`; the extension is
/// everything from the last `.` of the file name. `.bashrc` yields `""`.
pub fn derive_basename(path: &str) -> &str {
    let file = match path.rfind(|c: char| c == '/' || c == '\\') {
        Some(sep) => &path[sep + 1..],
        None => path,
    };
    match file.rfind('.') {
        Some(dot) => &file[..dot],
        None => file,
    }
}

pub(crate) fn resolve_with(
    template: &str,
    args: &OutputArgs,
    style: PathStyle,
    max_depth: usize,
) -> Result<String> {
    let mut vars = VariableTable::new();
    if let Some(path) = &args.path {
        vars.insert(BASENAME_VAR, derive_basename(path));
    }

    let expanded = Interpolator::new(&vars)
        .with_max_depth(max_depth)
        .interpolate(template)?;

    let resolved = match &args.root {
        Some(root) => canonicalize_path(&expanded, root, style),
        None => expanded,
    };
    debug!("Resolved output path '{}' -> '{}'", template, resolved);
    Ok(resolved)
}

/// Expand `template` with `BASENAME` bound from `args.path`, then canonicalize
/// against `args.root` if given. Uses the host path convention.
pub fn resolve_output_path(template: &str, args: &OutputArgs) -> Result<String> {
    resolve_with(template, args, PathStyle::host(), DEFAULT_MAX_DEPTH)
}
