//! Emission backends for a resolved generation model.
//!
//! Backends only serialize; every decision (ordering, naming, package paths,
//! retrieval strategy) was already made when the model was built.

use crate::model::GenerationModel;
use anyhow::{Context, Result};
use clap::ValueEnum;

mod go;
mod imports;

pub use go::render_go;

/// Output format selected on the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Go source defining `LaunchConfig` and `InitLaunchConfig`
    #[default]
    Go,
    /// Pretty-printed JSON dump of the generation model
    Json,
}

/// Render the model as text in the requested format.
pub fn render(model: &GenerationModel, format: Format) -> Result<String> {
    match format {
        Format::Go => Ok(render_go(model)),
        Format::Json => render_json(model),
    }
}

fn render_json(model: &GenerationModel) -> Result<String> {
    let mut text = serde_json::to_string_pretty(model).context("serialize generation model")?;
    text.push('\n');
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::LaunchDescriptor;
    use crate::model::{build_model, ModelOptions};

    #[test]
    fn json_dump_lists_resolved_dependencies() {
        let descriptor = LaunchDescriptor {
            dependencies: vec!["service-c@v4".into()],
            env: vec!["TRACING_ACCESS_TOKEN".into()],
            ..LaunchDescriptor::default()
        };
        let model = build_model(&descriptor, &ModelOptions::default()).expect("build model");
        let text = render(&model, Format::Json).expect("render json");
        let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");

        assert_eq!(value["package"], "main");
        assert_eq!(
            value["dependencies"][0]["package_path"],
            "github.com/Clever/service-c/gen-go/client/v4"
        );
        assert_eq!(value["dependencies"][0]["resolved"]["version"], "v4");
        assert_eq!(value["env"][0]["retrieval"], "optional");
        assert!(text.ends_with('\n'));
    }
}
