//! Go source backend.
//!
//! Output is laid out the way gofmt would leave it (tabs, aligned struct fields
//! and keyed literals) so regenerated files diff cleanly.
use super::imports::ImportPlan;
use crate::model::{EnvRetrieval, GenerationModel};
use crate::resources::{
    NON_PRODUCTION_SUFFIX, PRIMARY_DEPLOY_ENV_VAR, PRODUCTION_ENV, SECONDARY_DEPLOY_ENV_VAR,
};

const GENERATED_HEADER: &str = "// Code generated by launch-gen DO NOT EDIT.";
const REQUIRE_ENV_FUNC: &str = "requireEnvVar";
const S3_NAME_FUNC: &str = "getS3NameByEnv";
const OPTIONAL_ENV_FUNC: &str = "os.Getenv";
const CLIENT_TYPE: &str = "Client";
const CLIENT_CONSTRUCTOR: &str = "NewFromDiscovery";

/// Render the complete Go file for `model`.
pub fn render_go(model: &GenerationModel) -> String {
    let imports = ImportPlan::from_model(model);
    let mut out = String::new();

    append_preamble(&mut out, model, &imports);
    append_config_types(&mut out, model, &imports);
    append_init_func(&mut out, model, &imports);
    append_helpers(&mut out);

    out
}

fn append_preamble(out: &mut String, model: &GenerationModel, imports: &ImportPlan) {
    push_line(out, GENERATED_HEADER);
    push_line(out, "");
    push_line(out, &format!("package {}", model.package));
    push_line(out, "");
    push_line(out, "import (");
    for spec in imports.lines() {
        push_line(out, &format!("\t{spec}"));
    }
    push_line(out, ")");
}

fn append_config_types(out: &mut String, model: &GenerationModel, imports: &ImportPlan) {
    push_line(out, "");
    push_line(
        out,
        "// LaunchConfig is generated from the launch YAML; do not edit it by hand",
    );
    push_line(out, "type LaunchConfig struct {");
    push_aligned(
        out,
        "\t",
        &[
            ("Deps".to_string(), "Dependencies".to_string()),
            ("Env".to_string(), "Environment".to_string()),
        ],
        " ",
        "",
    );
    push_line(out, "\tAwsResources");
    push_line(out, "}");

    let deps: Vec<(String, String)> = model
        .dependencies
        .iter()
        .map(|dep| {
            let alias = imports.alias(&dep.package_path);
            (dep.field_name.clone(), format!("{alias}.{CLIENT_TYPE}"))
        })
        .collect();
    push_line(out, "");
    push_line(out, "// Dependencies holds a client for each service dependency");
    push_struct(out, "Dependencies", &deps);

    let env: Vec<(String, String)> = model
        .env
        .iter()
        .map(|var| (var.field_name.clone(), "string".to_string()))
        .collect();
    push_line(out, "");
    push_line(out, "// Environment holds the values of the service's environment variables");
    push_struct(out, "Environment", &env);

    let buckets: Vec<(String, String)> = model
        .buckets
        .iter()
        .map(|bucket| (bucket.resource.field_name.clone(), "string".to_string()))
        .collect();
    push_line(out, "");
    push_line(out, "// AwsResources holds deploy-environment names of AWS resources");
    push_struct(out, "AwsResources", &buckets);
}

fn append_init_func(out: &mut String, model: &GenerationModel, imports: &ImportPlan) {
    push_line(out, "");
    push_line(out, "// InitLaunchConfig creates a LaunchConfig");
    push_line(out, "func InitLaunchConfig() LaunchConfig {");

    for dep in &model.dependencies {
        let alias = imports.alias(&dep.package_path);
        push_line(
            out,
            &format!("\t{}, err := {alias}.{CLIENT_CONSTRUCTOR}()", dep.var_name),
        );
        push_line(out, "\tif err != nil {");
        push_line(out, "\t\tlog.Fatalf(\"discovery error: %s\", err)");
        push_line(out, "\t}");
    }

    let deps: Vec<(String, String)> = model
        .dependencies
        .iter()
        .map(|dep| (dep.field_name.clone(), dep.var_name.clone()))
        .collect();
    let env: Vec<(String, String)> = model
        .env
        .iter()
        .map(|var| {
            let func = match var.retrieval {
                EnvRetrieval::Required => REQUIRE_ENV_FUNC,
                EnvRetrieval::Optional => OPTIONAL_ENV_FUNC,
            };
            (var.field_name.clone(), format!("{func}({})", go_string(&var.name)))
        })
        .collect();
    let buckets: Vec<(String, String)> = model
        .buckets
        .iter()
        .map(|bucket| {
            (
                bucket.resource.field_name.clone(),
                format!("{S3_NAME_FUNC}({})", go_string(&bucket.resource.raw_name)),
            )
        })
        .collect();

    push_line(out, "\treturn LaunchConfig{");
    push_literal_field(out, "Deps", "Dependencies", &deps);
    push_literal_field(out, "Env", "Environment", &env);
    push_literal_field(out, "AwsResources", "AwsResources", &buckets);
    push_line(out, "\t}");
    push_line(out, "}");
}

fn append_helpers(out: &mut String) {
    push_line(out, "");
    push_line(
        out,
        &format!("// {REQUIRE_ENV_FUNC} exits the program immediately if an env var is not set"),
    );
    push_line(out, &format!("func {REQUIRE_ENV_FUNC}(s string) string {{"));
    push_line(out, "\tval, present := os.LookupEnv(s)");
    push_line(out, "\tif !present {");
    push_line(out, "\t\tlog.Fatalf(\"env var %s is not defined\", s)");
    push_line(out, "\t}");
    push_line(out, "\treturn val");
    push_line(out, "}");

    let undetermined = format!(
        "Unable to determine deployment environment ({PRIMARY_DEPLOY_ENV_VAR} and {SECONDARY_DEPLOY_ENV_VAR} are undefined)"
    );
    push_line(out, "");
    push_line(
        out,
        &format!(
            "// {S3_NAME_FUNC} appends {} to a bucket name outside the {} deploy env.",
            go_string(NON_PRODUCTION_SUFFIX),
            go_string(PRODUCTION_ENV)
        ),
    );
    push_line(
        out,
        &format!(
            "// {PRIMARY_DEPLOY_ENV_VAR} is set for non-Lambda deployments and {SECONDARY_DEPLOY_ENV_VAR} for Lambda."
        ),
    );
    push_line(out, &format!("func {S3_NAME_FUNC}(s string) string {{"));
    push_line(
        out,
        &format!("\tenv := os.Getenv({})", go_string(PRIMARY_DEPLOY_ENV_VAR)),
    );
    push_line(out, "\tif env == \"\" {");
    push_line(
        out,
        &format!("\t\tenv = os.Getenv({})", go_string(SECONDARY_DEPLOY_ENV_VAR)),
    );
    push_line(out, "\t}");
    push_line(out, "\tif env == \"\" {");
    push_line(out, &format!("\t\tlog.Fatal({})", go_string(&undetermined)));
    push_line(out, "\t}");
    push_line(out, &format!("\tif env == {} {{", go_string(PRODUCTION_ENV)));
    push_line(out, "\t\treturn s");
    push_line(out, "\t}");
    push_line(out, &format!("\treturn s + {}", go_string(NON_PRODUCTION_SUFFIX)));
    push_line(out, "}");
}

fn push_struct(out: &mut String, name: &str, fields: &[(String, String)]) {
    if fields.is_empty() {
        push_line(out, &format!("type {name} struct{{}}"));
        return;
    }
    push_line(out, &format!("type {name} struct {{"));
    push_aligned(out, "\t", fields, " ", "");
    push_line(out, "}");
}

/// One `Key: Type{...},` entry of the returned LaunchConfig literal.
fn push_literal_field(out: &mut String, key: &str, type_name: &str, values: &[(String, String)]) {
    if values.is_empty() {
        push_line(out, &format!("\t\t{key}: {type_name}{{}},"));
        return;
    }
    push_line(out, &format!("\t\t{key}: {type_name}{{"));
    let keyed: Vec<(String, String)> = values
        .iter()
        .map(|(field, value)| (format!("{field}:"), value.clone()))
        .collect();
    push_aligned(out, "\t\t\t", &keyed, " ", ",");
    push_line(out, "\t\t},");
}

/// Rows of `left sep right suffix` with `left` padded to a common width.
fn push_aligned(
    out: &mut String,
    indent: &str,
    rows: &[(String, String)],
    sep: &str,
    suffix: &str,
) {
    let width = rows
        .iter()
        .map(|(left, _)| left.chars().count())
        .max()
        .unwrap_or(0);
    for (left, right) in rows {
        push_line(out, &format!("{indent}{left:<width$}{sep}{right}{suffix}"));
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

/// Interpreted Go string literal for `text`.
fn go_string(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for ch in text.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control() => quoted.push_str(&format!("\\u{:04x}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
#[path = "go_tests.rs"]
mod tests;
