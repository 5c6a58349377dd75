// tests/core/config.rs
use std::path::Path;

use script_vault::config::load_from;
use script_vault::consts::{DEFAULT_INTERPRETER, DEFAULT_KEY_ENV, DEFAULT_PREAMBLE};
#[cfg(unix)]
use script_vault::consts::{DEFAULT_SOURCE_ARG, DEFAULT_SOURCE_FD};
use script_vault::{Config, Template, VaultError};
use tempfile::tempdir;

use crate::common::write_file;

#[test]
fn test_defaults_match_constants() {
    let config = Config::default();
    assert_eq!(config.key.env_var, DEFAULT_KEY_ENV);
    assert_eq!(config.interpreter.program, DEFAULT_INTERPRETER);
    assert_eq!(config.template(), Template::default());
}

#[cfg(unix)]
#[test]
fn test_default_interpreter_reads_script_from_its_own_fd() {
    let config = Config::default();
    assert_eq!(config.interpreter.args, vec![DEFAULT_SOURCE_ARG.to_owned()]);
    assert_eq!(config.interpreter.source_fd, DEFAULT_SOURCE_FD);
}

#[test]
fn test_source_fd_zero_selects_stdin() {
    let config = Config::from_toml_str(
        "[interpreter]\nprogram = \"python3\"\nargs = [\"-\"]\nsource_fd = 0\n",
        Path::new("inline.toml"),
    )
    .unwrap();
    assert_eq!(config.interpreter.source_fd, 0);
    assert_eq!(config.interpreter.args, vec!["-".to_owned()]);
}

#[test]
fn test_partial_file_keeps_defaults_for_the_rest() {
    let config = Config::from_toml_str(
        r#"
        [interpreter]
        program = "ruby"
        args = ["-W0"]
        "#,
        Path::new("inline.toml"),
    )
    .unwrap();

    assert_eq!(config.interpreter.program, "ruby");
    assert_eq!(config.interpreter.args, vec!["-W0".to_owned()]);
    assert_eq!(config.key.env_var, DEFAULT_KEY_ENV);
    assert_eq!(config.template.preamble, DEFAULT_PREAMBLE);
}

#[test]
fn test_key_provider_uses_configured_variable() {
    let config = Config::from_toml_str(
        "[key]\nenv_var = \"MY_APP_KEY\"\n",
        Path::new("inline.toml"),
    )
    .unwrap();
    assert_eq!(config.key_provider().var(), "MY_APP_KEY");
}

#[test]
fn test_unknown_field_is_config_error() {
    let result = Config::from_toml_str("[key]\nname = \"X\"\n", Path::new("bad.toml"));
    match result {
        Err(err @ VaultError::Config { .. }) => assert!(err.to_string().contains("bad.toml")),
        other => panic!("expected Config error, got {other:?}"),
    }
}

#[test]
fn test_load_from_file() {
    let dir = tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "script-vault.toml",
        b"[template]\npreamble = \"#!/bin/sh\\nexec vault run '\"\npostamble = \"'\\n\"\n",
    );

    let config = load_from(&path).unwrap();
    assert_eq!(config.template.preamble, "#!/bin/sh\nexec vault run '");
    assert_eq!(config.template.postamble, "'\n");
}

#[test]
fn test_load_from_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let result = load_from(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(VaultError::Io { .. })));
}
