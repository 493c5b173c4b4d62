//! CLI argument parsing for launch-gen.
//!
//! The CLI only collects flags; resolution rules live in the model builder so
//! they can be tested without a process.
use crate::model::DEFAULT_PACKAGE;
use crate::render::Format;
use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser};
use std::path::PathBuf;

/// Environment variable holding a tracing filter (e.g. `launch_gen=debug`).
pub const LOG_ENV_VAR: &str = "LAUNCH_GEN_LOG";

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "launch-gen",
    version,
    about = "Generate LaunchConfig initialization code from a launch YAML file",
    after_help = "Examples:\n  launch-gen -p launchconfig -o launch/config.go launch/my-service.yml\n  launch-gen --skip-dependency workflow-manager launch/my-service.yml\n  launch-gen -d service-d:service-d/custom/client launch/my-service.yml\n  launch-gen --format json --resolve-buckets launch/my-service.yml"
)]
pub struct RootArgs {
    /// Package name of the generated file
    #[arg(short = 'p', long = "package", value_name = "NAME", default_value = DEFAULT_PACKAGE)]
    pub package: String,

    /// Write output to this file instead of stdout
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Dependency to skip generating a client for (repeatable)
    #[arg(long = "skip-dependency", value_name = "DEP", action = ArgAction::Append)]
    pub skip_dependencies: Vec<String>,

    /// Replacement package paths, as dep1:path1,dep2:path2
    #[arg(short = 'd', long = "override-dependencies", value_name = "SPEC")]
    pub override_dependencies: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Go)]
    pub format: Format,

    /// Resolve bucket names against DEPLOY_ENV/_DEPLOY_ENV now (requires --format json)
    #[arg(long)]
    pub resolve_buckets: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Launch YAML descriptor
    #[arg(value_name = "FILE")]
    pub descriptor: PathBuf,
}

impl RootArgs {
    /// Cross-flag checks clap cannot express on its own.
    ///
    /// Go output resolves bucket names at runtime, so `--resolve-buckets` only
    /// makes sense for the JSON dump.
    pub fn validate(&self) -> Result<(), clap::Error> {
        if self.resolve_buckets && self.format != Format::Json {
            return Err(Self::command().error(
                ErrorKind::ArgumentConflict,
                "--resolve-buckets requires --format json",
            ));
        }
        Ok(())
    }
}
