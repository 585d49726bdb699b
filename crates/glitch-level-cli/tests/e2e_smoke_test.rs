use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use glitch_level::{GlitchLevelError, levels::DEFAULT_LEVEL};
use glitch_level_cli::{Args, Command, Outcome, execute};

/// Sample levels live at the workspace root, not in the crate
fn levels_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("levels")
}

/// Collects all .lvl files from a directory
fn collect_lvl_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("lvl")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args(command: Command) -> Args {
    Args {
        command,
        config: None,
        log_level: "off".to_string(),
    }
}

fn run_to_string(command: Command) -> Result<String, GlitchLevelError> {
    let mut out = Vec::new();
    execute(&args(command), &mut out)?;
    Ok(String::from_utf8(out).expect("CLI output is UTF-8"))
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

#[test]
fn e2e_smoke_test_valid_levels() {
    let valid_levels = collect_lvl_files(levels_dir());

    assert!(!valid_levels.is_empty(), "No valid levels found in levels/");

    let mut failed_levels = Vec::new();

    for level_path in &valid_levels {
        let command = Command::Check {
            input: path_str(level_path),
            json: false,
        };
        if let Err(e) = run_to_string(command) {
            failed_levels.push((level_path.clone(), e));
        }
    }

    if !failed_levels.is_empty() {
        eprintln!("\nValid levels that failed:");
        for (path, err) in &failed_levels {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid level(s) failed unexpectedly", failed_levels.len());
    }
}

#[test]
fn e2e_smoke_test_error_levels() {
    let error_levels = collect_lvl_files(levels_dir().join("errors"));

    assert!(
        !error_levels.is_empty(),
        "No error levels found in levels/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for level_path in &error_levels {
        let command = Command::Check {
            input: path_str(level_path),
            json: false,
        };
        match run_to_string(command) {
            Err(GlitchLevelError::Parse { .. }) => {}
            _ => unexpectedly_succeeded.push(level_path.clone()),
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError levels that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error level(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }
}

#[test]
fn e2e_check_json_reports() {
    let mut out = Vec::new();
    let outcome = execute(
        &args(Command::Check {
            input: path_str(&levels_dir().join("doors.lvl")),
            json: true,
        }),
        &mut out,
    )
    .unwrap();
    assert_eq!(outcome, Outcome::Success);
    assert_eq!(String::from_utf8(out).unwrap().trim(), r#"{"status":"ok"}"#);

    let temp_dir = tempdir().expect("Failed to create temp directory");
    let path = temp_dir.path().join("broken.lvl");
    fs::write(&path, "N N Q N\n").unwrap();

    let mut out = Vec::new();
    let outcome = execute(
        &args(Command::Check {
            input: path_str(&path),
            json: true,
        }),
        &mut out,
    )
    .expect("a rejected level is reported, not raised");
    assert_eq!(outcome, Outcome::Rejected);
    assert_eq!(
        String::from_utf8(out).unwrap().trim(),
        r#"{"status":"error","error":{"parse_failed":{"rest":"Q N\n"}}}"#
    );
}

#[test]
fn e2e_fmt_write_and_check() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let path = temp_dir.path().join("messy.lvl");
    fs::write(&path, "  N   N+P\nX    H  \n").unwrap();

    let check = |path: &Path| {
        run_to_string(Command::Fmt {
            input: path_str(path),
            write: false,
            check: true,
        })
    };

    assert!(matches!(check(&path), Err(GlitchLevelError::Unformatted(_))));

    run_to_string(Command::Fmt {
        input: path_str(&path),
        write: true,
        check: false,
    })
    .unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "N\tN+P\nX\tH\n");
    assert!(check(&path).is_ok());
}

#[test]
fn e2e_fmt_prints_to_stdout() {
    let printed = run_to_string(Command::Fmt {
        input: path_str(&levels_dir().join("crlf.lvl")),
        write: false,
        check: false,
    })
    .unwrap();
    assert_eq!(printed, "N\tN\r\nN\tN+P\r\n");
}

#[test]
fn e2e_share_then_open() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let token = run_to_string(Command::Share {
        input: path_str(&levels_dir().join("doors.lvl")),
    })
    .unwrap();

    let output = temp_dir.path().join("opened.lvl");
    run_to_string(Command::Open {
        token: token.trim().to_string(),
        output: Some(path_str(&output)),
    })
    .unwrap();

    // The opened level is canonical and checks clean.
    let opened = fs::read_to_string(&output).unwrap();
    assert!(opened.starts_with("N+Wx2\tN+Wx2\t"));
    run_to_string(Command::Check {
        input: path_str(&output),
        json: false,
    })
    .unwrap();
}

#[test]
fn e2e_share_rejects_invalid_level() {
    let result = run_to_string(Command::Share {
        input: path_str(&levels_dir().join("errors").join("missing_player.lvl")),
    });
    assert!(matches!(result, Err(GlitchLevelError::Parse { .. })));
}

#[test]
fn e2e_open_bad_token_falls_back_to_default() {
    let printed = run_to_string(Command::Open {
        token: "1this-is-not-a-level".to_string(),
        output: None,
    })
    .unwrap();

    let default = glitch_level::levels::default_level();
    assert_eq!(printed, format!("{default}\n"));
    assert_eq!(printed.lines().count(), DEFAULT_LEVEL.lines().count());
}

#[test]
fn e2e_inspect() {
    let printed = run_to_string(Command::Inspect {
        input: path_str(&levels_dir().join("doors.lvl")),
        json: false,
    })
    .unwrap();

    assert!(printed.contains("size:    5x5"));
    assert!(printed.contains("player:  2:2"));
    assert!(printed.contains("tiles:   normal floor 25"));
    assert!(printed.contains("objects: box 1, door 2, goal 1, player start 1, trigger 2, wall 32"));
    assert!(printed.contains("trigger: red defined at [2:4], gates doors at [3:3, 4:3]"));

    let json = run_to_string(Command::Inspect {
        input: path_str(&levels_dir().join("doors.lvl")),
        json: true,
    })
    .unwrap();
    assert!(json.contains("\"width\": 5"));
    assert!(json.contains("\"red\""));
}

#[test]
fn e2e_explicit_config() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config = temp_dir.path().join("config.toml");
    fs::write(&config, "[level]\nmax_dimension = 4\n").unwrap();

    let mut out = Vec::new();
    let result = execute(
        &Args {
            command: Command::Check {
                input: path_str(&levels_dir().join("doors.lvl")),
                json: false,
            },
            config: Some(path_str(&config)),
            log_level: "off".to_string(),
        },
        &mut out,
    );
    let err = result.unwrap_err();
    assert!(err.to_string().contains("E203"), "{err}");
}
