//! Engine modules — template expansion and path canonicalization.
//!
//! Three pure string-in/string-out operations back the build scripts:
//!
//! | Operation             | Module     |
//! |-----------------------|------------|
//! | `interpolate`         | `template` |
//! | `canonicalize_path`   | `path`     |
//! | `resolve_output_path` | `output`   |
//!
//! [`Engine`] bundles them behind one [`EngineConfig`] so callers pick the path
//! convention and nesting limit once.

pub mod output;
pub mod path;
pub mod template;

use tracing::debug;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::vars::VariableTable;

use output::OutputArgs;
use path::PathStyle;
use template::Interpolator;

/// Configured entry point for the three engine operations.
///
/// Holds no state between calls; every call builds and drops its own buffers.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn style(&self) -> PathStyle {
        self.config.style
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Expand `template` against `vars`.
    pub fn interpolate(&self, template: &str, vars: &VariableTable) -> Result<String> {
        debug!("Interpolating '{}' with {} variable(s)", template, vars.len());
        Interpolator::new(vars)
            .with_max_depth(self.config.max_depth)
            .interpolate(template)
    }

    /// Join `path` onto `base_dir` unless rooted, then normalize.
    pub fn canonicalize_path(&self, path: &str, base_dir: &str) -> String {
        let canonical = self::path::canonicalize_path(path, base_dir, self.config.style);
        debug!(
            "Canonicalized '{}' against '{}' -> '{}'",
            path, base_dir, canonical
        );
        canonical
    }

    /// Expand `template` with `BASENAME` bound from `args.path`, canonicalizing
    /// against `args.root` when present.
    pub fn resolve_output_path(&self, template: &str, args: &OutputArgs) -> Result<String> {
        output::resolve_with(template, args, self.config.style, self.config.max_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LbmError;

    fn engine(style: PathStyle) -> Engine {
        Engine::new(EngineConfig {
            style,
            ..EngineConfig::default()
        })
    }

    #[test]
    fn test_engine_uses_configured_style() {
        let unix = engine(PathStyle::Unix);
        assert_eq!(unix.canonicalize_path("a/../b", "/x"), "/x/b");

        let windows = engine(PathStyle::Windows);
        assert_eq!(windows.canonicalize_path("a/../b", "/x"), r"\x\b");
        assert_eq!(windows.style(), PathStyle::Windows);
    }

    #[test]
    fn test_engine_uses_configured_depth() {
        let engine = Engine::new(EngineConfig {
            style: PathStyle::Unix,
            max_depth: 1,
        });
        let vars: VariableTable = [("A", "B"), ("B", "x")].into_iter().collect();
        assert_eq!(engine.interpolate("{A}", &vars).unwrap(), "B");
        assert!(matches!(
            engine.interpolate("{{A}}", &vars),
            Err(LbmError::NestingTooDeep { limit: 1 })
        ));
    }

    #[test]
    fn test_engine_resolve_output_path() {
        let engine = engine(PathStyle::Unix);
        let args = OutputArgs::new().with_path("/src/foo.c").with_root("/out");
        assert_eq!(
            engine.resolve_output_path("obj/{BASENAME}.o", &args).unwrap(),
            "/out/obj/foo.o"
        );
    }
}
