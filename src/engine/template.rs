//! Template Evaluator
//!
//! Expands brace templates against a [`VariableTable`] in a single
//! left-to-right pass.
//!
//! # Syntax
//!
//! | Form               | Meaning |
//! |--------------------|---------|
//! | `text`             | Copied verbatim |
//! | `{NAME}`           | Value of `NAME`, or nothing if unbound |
//! | `{u:NAME}`         | Value of `NAME`, uppercased |
//! | `{{X}Y}`           | Name built from the expansion of `{X}` followed by `Y` |
//!
//! A reference's name is itself a template, so nesting is realized by
//! recursing on the same input and handing back the cursor position where the
//! nested scan stopped. A `}` outside any reference is literal text.
//!
//! # Design
//!
//! - **Pure logic**: no I/O, the table is only read
//! - **Total over input**: unterminated `{` runs to end of input, lookup misses
//!   expand to nothing
//! - **Bounded recursion**: nesting beyond `max_depth` levels is rejected with
//!   [`LbmError::NestingTooDeep`] instead of exhausting the stack

use std::borrow::Cow;

use tracing::trace;

use crate::error::{LbmError, Result};
use crate::vars::VariableTable;

/// Default maximum number of nested `{` levels.
pub const DEFAULT_MAX_DEPTH: usize = 64;

// ============================================================================
// Modifiers
// ============================================================================

/// Flags parsed from the `<letters>:` clause in front of a variable name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// `u` — uppercase the substituted value
    pub uppercase: bool,
}

impl Modifiers {
    /// Parse a modifier clause. Unknown letters are ignored.
    pub fn parse(clause: &str) -> Self {
        let mut modifiers = Self::default();
        for flag in clause.chars() {
            if flag == 'u' {
                modifiers.uppercase = true;
            }
        }
        modifiers
    }

    pub fn apply<'a>(&self, value: &'a str) -> Cow<'a, str> {
        if self.uppercase {
            Cow::Owned(value.to_uppercase())
        } else {
            Cow::Borrowed(value)
        }
    }
}

/// Split off a modifier clause starting at byte offset `from`.
///
/// The first `:` only counts when no `\`, `{` or `}` comes before it, so a
/// colon belonging to a deeper reference is never taken for this level's
/// delimiter. Returns the modifiers and the offset where the name starts.
fn split_modifiers(input: &str, from: usize) -> (Modifiers, usize) {
    let rest = &input[from..];
    let Some(colon) = rest.find(':') else {
        return (Modifiers::default(), from);
    };
    let blocker = rest.find(|c: char| matches!(c, '\\' | '{' | '}'));
    match blocker {
        Some(b) if b < colon => (Modifiers::default(), from),
        _ => (Modifiers::parse(&rest[..colon]), from + colon + 1),
    }
}

// ============================================================================
// Interpolator
// ============================================================================

/// Expands templates against one variable table.
#[derive(Debug, Clone, Copy)]
pub struct Interpolator<'a> {
    vars: &'a VariableTable,
    max_depth: usize,
}

impl<'a> Interpolator<'a> {
    pub fn new(vars: &'a VariableTable) -> Self {
        Self {
            vars,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Expand `template`. Output order mirrors scan order exactly.
    pub fn interpolate(&self, template: &str) -> Result<String> {
        let (expanded, _) = self.scan(template, 0, None, 0)?;
        Ok(expanded)
    }

    /// Scan `input` from byte offset `start` until `terminator` or end of input.
    ///
    /// Returns the expansion and the offset just past the terminator, or
    /// `input.len()` when the terminator never appears.
    fn scan(
        &self,
        input: &str,
        start: usize,
        terminator: Option<u8>,
        depth: usize,
    ) -> Result<(String, usize)> {
        let bytes = input.as_bytes();
        let mut out = String::new();
        let mut literal_start = start;
        let mut pos = start;

        while pos < bytes.len() {
            let b = bytes[pos];
            if Some(b) == terminator {
                out.push_str(&input[literal_start..pos]);
                return Ok((out, pos + 1));
            }
            if b != b'{' {
                pos += 1;
                continue;
            }

            out.push_str(&input[literal_start..pos]);
            if depth >= self.max_depth {
                return Err(LbmError::NestingTooDeep {
                    limit: self.max_depth,
                });
            }

            let (modifiers, name_start) = split_modifiers(input, pos + 1);
            let (name, next) = self.scan(input, name_start, Some(b'}'), depth + 1)?;
            match self.vars.get(&name) {
                Some(value) => out.push_str(&modifiers.apply(value)),
                None => trace!("Template variable '{}' is unbound", name),
            }

            pos = next;
            literal_start = pos;
        }

        out.push_str(&input[literal_start..]);
        Ok((out, bytes.len()))
    }
}

/// Expand `template` against `vars` with the default nesting limit.
pub fn interpolate(template: &str, vars: &VariableTable) -> Result<String> {
    Interpolator::new(vars).interpolate(template)
}
