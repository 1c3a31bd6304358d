// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - territory workspace automation
//!
//! - `cargo xtask ci` lints, audits dependencies, builds and tests
//! - `cargo xtask run --seed-dir seed` starts `territory-server` on the CSV
//!   reference data in `seed/`
//! - `cargo xtask check-seed` loads `seed/` through the directory crate's
//!   seed tests

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{io, process::Output};

use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{Result, eyre::Context};
use duct::cmd;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

/// The server binary started by `run`.
const SERVER_PACKAGE: &str = "territory-server";

/// The crate whose tests read the seed CSV files.
const DIRECTORY_PACKAGE: &str = "territory-directory";

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    if let Err(err) = args.command.run() {
        tracing::error!("{err}");
        std::process::exit(1);
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Subcommand)]
enum Command {
    /// Lint, audit dependencies, build and test
    CI,

    /// Build every target
    #[command(visible_alias = "b")]
    Build,

    /// Type-check every target
    #[command(visible_alias = "c")]
    Check,

    /// Write an lcov report to target/lcov.info
    #[command(visible_alias = "cov")]
    Coverage,

    /// Audit dependencies with cargo-deny
    #[command(visible_alias = "cd")]
    Deny,

    /// Look for unused dependencies with cargo-machete
    #[command(visible_alias = "m")]
    Machete,

    /// Clippy, rustdoc, rustfmt and typos
    #[command(visible_alias = "l")]
    Lint,

    /// Clippy with warnings denied
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Build docs with docs.rs flags
    #[command(visible_alias = "d")]
    LintDocs,

    /// Check formatting on nightly rustfmt
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Check spelling with typos-cli
    #[command(visible_alias = "lt")]
    LintTypos,

    /// Apply clippy suggestions
    #[command(visible_alias = "fc")]
    FixClippy,

    /// Format the workspace on nightly rustfmt
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Unit tests, then doc tests
    #[command(visible_alias = "t")]
    Test,

    /// Doc tests only
    #[command(visible_alias = "td")]
    TestDocs,

    /// Unit tests only
    #[command(visible_alias = "tl")]
    TestLibs,

    /// Load the seed CSV files through the directory crate
    #[command(visible_alias = "cs")]
    CheckSeed,

    /// Start the territory server
    #[command(visible_alias = "r")]
    Run {
        /// Directory holding the reference CSV files
        #[arg(long)]
        seed_dir: Option<String>,

        /// Address to bind the server to
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,

        /// Port to bind the server to
        #[arg(long, default_value_t = 3000)]
        port: u16,
    },
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Lint => lint(),
            Self::Test => test(),
            Self::LintDocs => lint_docs(),
            Self::LintTypos => run_tool("typos", &[]),
            Self::Machete => run_tool("cargo-machete", &[]),
            Self::LintFormatting => run_cargo_nightly(&["fmt", "--all", "--check"]),
            Self::FixFormatting => run_cargo_nightly(&["fmt", "--all"]),
            other => run_cargo(&other.cargo_args()),
        }
    }

    /// Arguments for the commands that are a single stable cargo call.
    fn cargo_args(&self) -> Vec<String> {
        let args: Vec<&str> = match self {
            Self::Build => vec!["build", "--all-targets", "--all-features"],
            Self::Check => vec!["check", "--all-targets", "--all-features"],
            Self::Coverage => vec![
                "llvm-cov",
                "--lcov",
                "--output-path",
                "target/lcov.info",
                "--all-features",
            ],
            Self::Deny => vec!["deny", "check"],
            Self::LintClippy => {
                vec!["clippy", "--all-targets", "--all-features", "--", "-D", "warnings"]
            }
            Self::FixClippy => vec![
                "clippy",
                "--all-targets",
                "--all-features",
                "--fix",
                "--allow-dirty",
                "--allow-staged",
                "--",
                "-D",
                "warnings",
            ],
            Self::TestLibs => vec!["test", "--all-targets", "--all-features"],
            Self::TestDocs => vec!["test", "--doc", "--all-features"],
            Self::CheckSeed => vec!["test", "--package", DIRECTORY_PACKAGE, "seed"],
            Self::Run {
                seed_dir,
                bind,
                port,
            } => return server_args(seed_dir.as_deref(), bind, *port),
            Self::CI
            | Self::Lint
            | Self::Test
            | Self::LintDocs
            | Self::LintTypos
            | Self::Machete
            | Self::LintFormatting
            | Self::FixFormatting => Vec::new(),
        };
        args.into_iter().map(String::from).collect()
    }
}

/// Cargo arguments that start the server.
fn server_args(seed_dir: Option<&str>, bind: &str, port: u16) -> Vec<String> {
    let mut args: Vec<String> = ["run", "--package", SERVER_PACKAGE, "--", "--bind", bind]
        .into_iter()
        .map(String::from)
        .collect();
    args.extend([String::from("--port"), port.to_string()]);
    if let Some(dir) = seed_dir {
        args.extend([String::from("--seed-dir"), dir.to_string()]);
    }
    args
}

fn ci() -> Result<()> {
    lint()?;
    Command::Deny.run()?;
    Command::Machete.run()?;
    Command::Build.run()?;
    test()
}

/// Markdown lint is noisy, so its failure only warns.
fn lint() -> Result<()> {
    Command::LintClippy.run()?;
    lint_docs()?;
    Command::LintFormatting.run()?;
    Command::LintTypos.run()?;
    if let Err(err) = run_tool("markdownlint-cli2", &["**/*.md", "!target", "!**/target"]) {
        tracing::warn!("markdownlint reported problems: {err}");
    }
    Ok(())
}

/// Doc tests run last; they are the slow part.
fn test() -> Result<()> {
    Command::TestLibs.run()?;
    Command::TestDocs.run()
}

fn lint_docs() -> Result<()> {
    let meta = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?;

    for package in meta.workspace_default_packages() {
        cmd(
            "cargo",
            [
                "doc",
                "--no-deps",
                "--all-features",
                "--package",
                &package.name,
            ],
        )
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .env("RUSTDOCFLAGS", "--cfg docsrs -D warnings")
        .run_with_trace()?;
    }
    Ok(())
}

fn run_tool(tool: &str, args: &[&str]) -> Result<()> {
    cmd(tool, args).run_with_trace()?;
    Ok(())
}

fn run_cargo(args: &[String]) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

fn run_cargo_nightly(args: &[&str]) -> Result<()> {
    cmd("cargo", args)
        // set by cargo for subcommands; it would pin the stable toolchain
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

/// Logs a `duct::Expression` before running it.
trait ExpressionExt {
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
