use anyhow::{Context, Result};
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use launch_gen::cli::{RootArgs, LOG_ENV_VAR};
use launch_gen::descriptor::load_descriptor;
use launch_gen::model::{build_model, ModelOptions};
use launch_gen::resources::{EnvLookup, ProcessEnv};
use launch_gen::{output, render};

fn main() -> Result<()> {
    let args = RootArgs::parse();
    if let Err(err) = args.validate() {
        err.exit();
    }
    init_tracing(args.verbose);
    run(args)
}

/// Resolve the descriptor and flags into a model, render it, then write it.
///
/// Any error returns before output is touched.
fn run(args: RootArgs) -> Result<()> {
    let descriptor = load_descriptor(&args.descriptor)
        .inspect_err(|err| tracing::debug!(kind = ?err.kind(), "descriptor rejected"))?;
    tracing::debug!(
        path = %args.descriptor.display(),
        dependencies = descriptor.dependencies.len(),
        env_vars = descriptor.env.len(),
        "loaded descriptor"
    );

    let process_env = ProcessEnv;
    let options = ModelOptions {
        package: args.package,
        skip: args.skip_dependencies.into_iter().collect(),
        overrides: args.override_dependencies,
        bucket_env: args
            .resolve_buckets
            .then_some(&process_env as &dyn EnvLookup),
        ..ModelOptions::default()
    };
    let model = build_model(&descriptor, &options)
        .inspect_err(|err| tracing::debug!(kind = ?err.kind(), "resolution failed"))
        .with_context(|| format!("resolve {}", args.descriptor.display()))?;

    let text = render::render(&model, args.format)?;
    output::write_output(args.output.as_deref(), &text)
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}
