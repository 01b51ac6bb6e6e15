//! Path Canonicalizer
//!
//! Joins a path against a base directory and normalizes separators and
//! `.`/`..` segments as pure string algebra. Nothing here touches the
//! filesystem: no existence checks, no symlink resolution.
//!
//! # Steps
//!
//! 1. Empty base → `"."`
//! 2. Relative path → `base + sep + path`; rooted path → used as-is
//! 3. Trailing separators stripped, separator runs collapsed to the canonical one
//! 4. `<sep>..` segments squashed against the preceding segment
//! 5. `<sep>.` segments spliced out
//!
//! Squashing stops (leaving the rest untouched) when a marker has nothing to
//! backtrack over, e.g. `/../x` or `C:\..\x`.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::trace;

// ============================================================================
// Path Conventions
// ============================================================================

/// Which path convention canonicalization targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PathStyle {
    /// Slash-rooted paths (`/usr/src`)
    Unix,
    /// Drive-lettered backslash paths (`C:\src`)
    Windows,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self::host()
    }
}

impl PathStyle {
    /// Convention of the platform this binary was built for
    pub fn host() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Unix
        }
    }

    /// Canonical separator emitted by normalization
    pub fn separator(self) -> char {
        match self {
            Self::Unix => '/',
            Self::Windows => '\\',
        }
    }

    /// Length in bytes of the root prefix of `path`, 0 if it is relative.
    ///
    /// Unix roots are a leading `/`. Windows roots are a leading separator of
    /// either kind, or a drive letter followed by `:` and a separator.
    pub fn root_len(self, path: &str) -> usize {
        let bytes = path.as_bytes();
        match self {
            Self::Unix => usize::from(bytes.first() == Some(&b'/')),
            Self::Windows => {
                if bytes.len() >= 3
                    && bytes[0].is_ascii_alphabetic()
                    && bytes[1] == b':'
                    && is_separator(bytes[2] as char)
                {
                    3
                } else {
                    usize::from(bytes.first().is_some_and(|&b| is_separator(b as char)))
                }
            }
        }
    }

    pub fn is_rooted(self, path: &str) -> bool {
        self.root_len(path) > 0
    }
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

// ============================================================================
// Canonicalization
// ============================================================================

/// Join `path` onto `base_dir` (unless rooted) and normalize the result.
///
/// Total over its input: unresolvable leading `..` segments stay in place.
pub fn canonicalize_path(path: &str, base_dir: &str, style: PathStyle) -> String {
    let base = if base_dir.is_empty() { "." } else { base_dir };
    let joined = if style.is_rooted(path) {
        path.to_string()
    } else {
        format!("{}{}{}", base, style.separator(), path)
    };

    let mut canonical = normalize_separators(&joined, style);
    let root_len = style.root_len(&canonical);
    let root = canonical[..root_len].to_string();

    squash_parent_segments(&mut canonical, style);
    squash_current_segments(&mut canonical, style);

    // Squashing everything below the root leaves only the root.
    if canonical.len() < root.len() {
        canonical = root;
    }
    canonical
}

/// Strip trailing separators and collapse separator runs of either kind into
/// one canonical separator. The root prefix itself is never stripped.
fn normalize_separators(input: &str, style: PathStyle) -> String {
    let root_len = style.root_len(input);
    let mut trimmed = input.trim_end_matches(is_separator);
    if trimmed.len() < root_len {
        trimmed = &input[..root_len];
    }

    let sep = style.separator();
    let mut out = String::with_capacity(trimmed.len());
    let mut prev_was_sep = false;
    for c in trimmed.chars() {
        let this_is_sep = is_separator(c);
        if !this_is_sep {
            out.push(c);
        } else if !prev_was_sep {
            out.push(sep);
        }
        prev_was_sep = this_is_sep;
    }
    out
}

/// Find the first `marker` (`<sep>.` or `<sep>..`) that forms a whole segment,
/// i.e. is followed by a separator or the end of the string.
fn find_segment(path: &str, marker: &str, sep: char) -> Option<usize> {
    path.match_indices(marker)
        .map(|(at, _)| at)
        .find(|&at| {
            let rest = &path[at + marker.len()..];
            rest.is_empty() || rest.starts_with(sep)
        })
}

fn squash_parent_segments(path: &mut String, style: PathStyle) {
    let sep = style.separator();
    let marker = format!("{}..", sep);
    while let Some(at) = find_segment(path, &marker, sep) {
        let Some(prev) = path[..at].rfind(sep) else {
            trace!("Leaving unresolvable parent segment in '{}'", path);
            return;
        };
        if &path[prev + 1..at] == "." {
            // `a/./..` must resolve against `a`, not against `.`
            path.replace_range(prev..at, "");
        } else {
            path.replace_range(prev..at + marker.len(), "");
        }
    }
}

fn squash_current_segments(path: &mut String, style: PathStyle) {
    let sep = style.separator();
    let marker = format!("{}.", sep);
    while let Some(at) = find_segment(path, &marker, sep) {
        if at == 0 {
            trace!("Leaving leading current-dir segment in '{}'", path);
            return;
        }
        path.replace_range(at..at + marker.len(), "");
    }
}
