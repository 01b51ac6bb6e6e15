//! Integration tests for the public lbm API
//!
//! Exercises the three engine operations the way a build script drives them:
//! - interpolate with a caller-supplied variable table
//! - canonicalize_path across both path conventions
//! - resolve_output_path with a script-style argument bag
//! - configuration files feeding the Engine façade

use std::fs;

use serde_json::json;
use tempfile::tempdir;

use lbm::{
    Engine, EngineConfig, LbmError, OutputArgs, PathStyle, VariableTable, canonicalize_path,
    interpolate,
};

fn unix_engine() -> Engine {
    Engine::new(EngineConfig {
        style: PathStyle::Unix,
        ..EngineConfig::default()
    })
}

// =============================================================================
// interpolate
// =============================================================================

#[test]
fn test_interpolate_literal_example() {
    let vars: VariableTable = [("NAME", "foo"), ("EXT", "txt")].into_iter().collect();
    assert_eq!(interpolate("{NAME}.{EXT}", &vars).unwrap(), "foo.txt");
}

#[test]
fn test_interpolate_dynamic_names() {
    let vars: VariableTable = [("X", "A"), ("AY", "hit")].into_iter().collect();
    assert_eq!(interpolate("{{X}Y}", &vars).unwrap(), "hit");
}

#[test]
fn test_interpolate_from_script_table() {
    let vars = VariableTable::from_json(&json!({
        "CONFIG": "release",
        "ARCH": "x86_64",
        "release_x86_64_DIR": "out/rel64",
    }))
    .unwrap();
    assert_eq!(
        interpolate("{{CONFIG}_{ARCH}_DIR}/{u:CONFIG}.bin", &vars).unwrap(),
        "out/rel64/RELEASE.bin"
    );
}

#[test]
fn test_interpolate_selects_platform_table() {
    // Build scripts pick per-platform names by composing them from variables.
    let vars: VariableTable = [
        ("PLATFORM", "unix"),
        ("unix_EXE", ""),
        ("win32_EXE", ".exe"),
    ]
    .into_iter()
    .collect();
    assert_eq!(interpolate("tool{{PLATFORM}_EXE}", &vars).unwrap(), "tool");
}

// =============================================================================
// canonicalize_path
// =============================================================================

#[test]
fn test_canonicalize_unix_squash() {
    assert_eq!(
        canonicalize_path("a/./b/../c", "/root", PathStyle::Unix),
        "/root/a/c"
    );
}

#[test]
fn test_canonicalize_drive_letter() {
    assert_eq!(
        canonicalize_path(r"foo\..\bar", r"C:\base", PathStyle::Windows),
        r"C:\base\bar"
    );
}

#[test]
fn test_canonicalize_unresolvable_parent() {
    assert_eq!(canonicalize_path("../x", "/", PathStyle::Unix), "/../x");
}

#[test]
fn test_canonicalize_rooted_path_ignores_base() {
    for base in ["", ".", "/elsewhere", r"C:\x"] {
        assert_eq!(
            canonicalize_path("/usr/include", base, PathStyle::Unix),
            "/usr/include"
        );
    }
}

// =============================================================================
// resolve_output_path
// =============================================================================

#[test]
fn test_resolve_output_path_basename() {
    let args = OutputArgs::new().with_path("/src/foo.c");
    assert_eq!(
        lbm::resolve_output_path("{BASENAME}.o", &args).unwrap(),
        "foo.o"
    );
}

#[test]
fn test_resolve_output_path_from_script_args() {
    let args = OutputArgs::from_json(&json!({
        "path": "src/render/shader.glsl",
        "root": "/proj/build",
    }))
    .unwrap();
    let out = unix_engine()
        .resolve_output_path("gen/../gen/{BASENAME}.h", &args)
        .unwrap();
    assert_eq!(out, "/proj/build/gen/shader.h");
}

#[test]
fn test_resolve_output_path_rejects_malformed_args() {
    let err = OutputArgs::from_json(&json!({ "path": false })).unwrap_err();
    assert!(matches!(err, LbmError::InvalidArgument(_)));
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_engine_from_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("lbm.json");
    fs::write(&path, r#"{ "style": "windows", "max_depth": 2 }"#).unwrap();

    let config = EngineConfig::load_from_file(&path).unwrap();
    config.validate().unwrap();
    let engine = Engine::new(config);

    assert_eq!(engine.canonicalize_path("obj/a.o", r"D:\b"), r"D:\b\obj\a.o");

    let vars: VariableTable = [("A", "B"), ("B", "ok")].into_iter().collect();
    assert_eq!(engine.interpolate("{{A}}", &vars).unwrap(), "ok");
    assert!(matches!(
        engine.interpolate("{{{A}}}", &vars),
        Err(LbmError::NestingTooDeep { limit: 2 })
    ));
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("lbm.json");
    fs::write(&path, r#"{ "max_depth": 0 }"#).unwrap();

    let config = EngineConfig::load_from_file(&path).unwrap();
    assert!(config.validate().is_err());
}
