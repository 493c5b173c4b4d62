//! Generation model: everything an emission backend needs, fully resolved.
//!
//! The model is flat and ordered. Dependencies and env vars follow descriptor
//! order, buckets are sorted, so backends never make decisions of their own.
use crate::dependencies::{resolve_dependencies, ResolvedDependency, SkipSet};
use crate::descriptor::LaunchDescriptor;
use crate::error::GenError;
use crate::identifier::Canonicalizer;
use crate::overrides::parse_overrides;
use crate::resources::{bucket_resources, BucketResource, EnvLookup};
use serde::Serialize;

/// Env vars read with an empty default instead of failing at startup.
pub const OPTIONAL_ENV_VARS: &[&str] = &[
    // not set in dev
    "TRACING_ACCESS_TOKEN",
];

pub const DEFAULT_PACKAGE: &str = "main";

#[derive(Debug, Serialize)]
pub struct GenerationModel {
    pub package: String,
    pub dependencies: Vec<DependencyClient>,
    pub env: Vec<EnvVar>,
    pub buckets: Vec<BucketField>,
}

/// A generated client built via service discovery.
#[derive(Debug, Serialize)]
pub struct DependencyClient {
    pub field_name: String,
    pub var_name: String,
    pub package_path: String,
    pub resolved: ResolvedDependency,
}

#[derive(Debug, Serialize)]
pub struct EnvVar {
    pub field_name: String,
    pub name: String,
    pub retrieval: EnvRetrieval,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvRetrieval {
    /// The generated program exits at startup when the variable is unset.
    Required,
    /// Read with an empty default.
    Optional,
}

#[derive(Debug, Serialize)]
pub struct BucketField {
    #[serde(flatten)]
    pub resource: BucketResource,
    pub naming: BucketNaming,
    /// Present only when bucket values were resolved at generation time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_qualified: Option<String>,
}

/// How the generated program derives a bucket's runtime name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketNaming {
    /// Bare name in production, `-dev` suffix elsewhere.
    DeployEnvSuffix,
}

/// Flags and capabilities that shape one model build.
pub struct ModelOptions<'a> {
    pub package: String,
    pub skip: SkipSet,
    pub overrides: Option<String>,
    pub canonicalizer: Canonicalizer<'a>,
    /// When set, bucket values are resolved now against this environment.
    pub bucket_env: Option<&'a dyn EnvLookup>,
}

impl Default for ModelOptions<'_> {
    fn default() -> Self {
        Self {
            package: DEFAULT_PACKAGE.to_string(),
            skip: SkipSet::new(),
            overrides: None,
            canonicalizer: Canonicalizer::default(),
            bucket_env: None,
        }
    }
}

/// Build the model, failing on the first violation.
pub fn build_model(
    descriptor: &LaunchDescriptor,
    options: &ModelOptions<'_>,
) -> Result<GenerationModel, GenError> {
    let canon = &options.canonicalizer;
    let overrides = parse_overrides(options.overrides.as_deref(), &descriptor.dependencies)?;
    let resolved = resolve_dependencies(&descriptor.dependencies, &options.skip, &overrides);

    let dependencies = resolved
        .into_iter()
        .map(|dep| {
            let ident = canon.canonical(&dep.name);
            DependencyClient {
                field_name: ident.exported,
                var_name: ident.unexported,
                package_path: dep.package_path(),
                resolved: dep,
            }
        })
        .collect();

    let env = descriptor
        .env
        .iter()
        .map(|name| EnvVar {
            field_name: canon.public(name),
            name: name.clone(),
            retrieval: env_retrieval(name),
        })
        .collect();

    let buckets = bucket_resources(&descriptor.aws.s3.read, &descriptor.aws.s3.write, canon)
        .into_iter()
        .map(|resource| {
            let env_qualified = match options.bucket_env {
                Some(lookup) => Some(resource.env_qualified_value(lookup)?),
                None => None,
            };
            Ok(BucketField {
                resource,
                naming: BucketNaming::DeployEnvSuffix,
                env_qualified,
            })
        })
        .collect::<Result<Vec<_>, GenError>>()?;

    let model = GenerationModel {
        package: options.package.clone(),
        dependencies,
        env,
        buckets,
    };
    tracing::info!(
        package = %model.package,
        dependencies = model.dependencies.len(),
        env_vars = model.env.len(),
        buckets = model.buckets.len(),
        "generation model built"
    );
    Ok(model)
}

pub fn env_retrieval(name: &str) -> EnvRetrieval {
    if OPTIONAL_ENV_VARS.contains(&name) {
        EnvRetrieval::Optional
    } else {
        EnvRetrieval::Required
    }
}
