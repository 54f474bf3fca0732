//! # sndit
//!
//! Command line entry point for the manifest generator.
//!
//! Scans `--dir` for asset groups and writes one generated Rust file into
//! each group directory. Exits non-zero on any failure.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use sndit_generate::{GenerateReport, Generator, GeneratorConfig};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Reported when no module path is given.
const MISSING_MODULE: &str = "-module flag is required";

/// Long flags that are also accepted with a single dash (`-module sndit`).
const SINGLE_DASH_FLAGS: &[&str] = &["dir", "module", "config", "verbose"];

#[derive(Debug, Parser)]
#[command(name = "sndit")]
#[command(about = "Generate typed sound identifiers and embedded bindings for audio assets")]
struct Cli {
    /// Root directory whose subdirectories are asset groups
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Rust path through which generated code reaches the sndit runtime (e.g. `sndit`)
    #[arg(long)]
    module: Option<String>,

    /// Generator configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log every scanned directory and asset
    #[arg(short, long)]
    verbose: bool,
}

/// Main entry point.
fn main() -> ExitCode {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("error: {e:#}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(report) => {
            info!(
                "sndit finished: {} groups, {} assets",
                report.groups.len(),
                report.asset_count()
            );
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

/// Rewrites `-dir`/`-module` style flags to their `--` form.
///
/// Without this clap would read `-module` as the short-flag cluster `-m odule`.
/// Arguments after a bare `--` are left alone.
fn normalize_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    let mut rest = false;
    args.into_iter()
        .map(|arg| {
            if rest {
                return arg;
            }
            let Some(s) = arg.to_str() else {
                return arg;
            };
            if s == "--" {
                rest = true;
                return arg;
            }
            match s.strip_prefix('-') {
                Some(flag) if !flag.starts_with('-') => {
                    let name = flag.split_once('=').map_or(flag, |(name, _)| name);
                    if SINGLE_DASH_FLAGS.contains(&name) {
                        OsString::from(format!("-{s}"))
                    } else {
                        arg
                    }
                },
                _ => arg,
            }
        })
        .collect()
}

fn init_tracing(verbose: bool) -> Result<()> {
    let directive = if verbose { "sndit=debug" } else { "sndit=info" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .try_init()?;
    Ok(())
}

fn run(cli: &Cli) -> Result<GenerateReport> {
    let module = cli
        .module
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| anyhow!(MISSING_MODULE))?;

    let config = match &cli.config {
        Some(path) => GeneratorConfig::load_from(path)?,
        None => GeneratorConfig::default(),
    };
    let generator = Generator::new(config)?;

    generator
        .generate(&cli.dir, module)
        .with_context(|| format!("generating manifests under {}", cli.dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::fs;
    use tempfile::TempDir;

    fn try_parse(args: &[&str]) -> Result<Cli, clap::Error> {
        let args = std::iter::once("sndit")
            .chain(args.iter().copied())
            .map(OsString::from);
        Cli::try_parse_from(normalize_args(args))
    }

    fn parse(args: &[&str]) -> Cli {
        try_parse(args).expect("valid arguments")
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["--module", "sndit"]);
        assert_eq!(cli.dir, PathBuf::from("."));
        assert_eq!(cli.module.as_deref(), Some("sndit"));
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_single_dash_long_flags() {
        let cli = parse(&["-dir", "assets", "-module", "sndit", "-verbose"]);
        assert_eq!(cli.dir, PathBuf::from("assets"));
        assert_eq!(cli.module.as_deref(), Some("sndit"));
        assert!(cli.verbose);

        let cli = parse(&["-dir=assets", "-module=my_game::audio"]);
        assert_eq!(cli.dir, PathBuf::from("assets"));
        assert_eq!(cli.module.as_deref(), Some("my_game::audio"));
    }

    #[test]
    fn test_single_dash_module_needs_a_value() {
        assert!(try_parse(&["-module"]).is_err());
        assert!(try_parse(&["-modulex"]).is_err());
    }

    #[test]
    fn test_arguments_after_separator_are_untouched() {
        let args = ["sndit", "--", "-module"].map(OsString::from);
        assert_eq!(normalize_args(args.clone()), args.to_vec());
    }

    #[test]
    fn test_cli_single_dash_generates() {
        let temp = TempDir::new().expect("temp dir");
        let sfx = temp.path().join("sfx");
        fs::create_dir(&sfx).expect("create group");
        fs::write(sfx.join("beep.wav"), b"fake").expect("write asset");

        let dir = temp.path().to_string_lossy().into_owned();
        run(&parse(&["-dir", &dir, "-module", "sndit"])).expect("run");

        let src = fs::read_to_string(sfx.join("sounds_gen.rs")).expect("read output");
        assert!(src.contains("impl sndit::SoundId for Sound {"));
    }

    #[test]
    fn test_cli_generates() {
        let temp = TempDir::new().expect("temp dir");
        let sfx = temp.path().join("sfx_play");
        fs::create_dir(&sfx).expect("create group");
        fs::write(sfx.join("click.wav"), b"fake").expect("write asset");

        let dir = temp.path().to_string_lossy().into_owned();
        let report = run(&parse(&["--dir", &dir, "--module", "sndit"])).expect("run");

        assert_eq!(report.groups.len(), 1);
        let src = fs::read_to_string(sfx.join("sounds_gen.rs")).expect("read output");
        assert!(src.contains("pub const GROUP: &str = \"sfx_play\";"));
        assert!(src.contains("Click = 0,"));
        assert!(src.contains("include_bytes!(\"click.wav\")"));
    }

    #[test]
    fn test_cli_missing_module() {
        let temp = TempDir::new().expect("temp dir");
        let dir = temp.path().to_string_lossy().into_owned();

        let err = run(&parse(&["--dir", &dir])).expect_err("module is required");
        assert_eq!(err.to_string(), MISSING_MODULE);

        let err = run(&parse(&["--dir", &dir, "--module", "  "])).expect_err("blank module");
        assert_eq!(err.to_string(), MISSING_MODULE);
    }

    #[test]
    fn test_cli_reports_collision() {
        let temp = TempDir::new().expect("temp dir");
        let sfx = temp.path().join("sfx");
        fs::create_dir(&sfx).expect("create group");
        fs::write(sfx.join("Click.wav"), b"fake").expect("write asset");
        fs::write(sfx.join("click.wav"), b"fake").expect("write asset");

        let dir = temp.path().to_string_lossy().into_owned();
        let err = run(&parse(&["--dir", &dir, "--module", "sndit"])).expect_err("collision");
        assert!(format!("{err:#}").contains("name collision"));
        assert!(!sfx.join("sounds_gen.rs").exists());
    }

    #[test]
    fn test_cli_config_file() {
        let temp = TempDir::new().expect("temp dir");
        let music = temp.path().join("music");
        fs::create_dir(&music).expect("create group");
        fs::write(music.join("theme.wav"), b"fake").expect("write asset");
        let config = temp.path().join("sndit.toml");
        fs::write(&config, "output_file = \"tracks.rs\"\ntype_name = \"Track\"\n")
            .expect("write config");

        let dir = temp.path().to_string_lossy().into_owned();
        let config = config.to_string_lossy().into_owned();
        run(&parse(&["--dir", &dir, "--module", "sndit", "--config", &config])).expect("run");

        let src = fs::read_to_string(music.join("tracks.rs")).expect("read output");
        assert!(src.contains("pub enum Track {"));
    }
}
