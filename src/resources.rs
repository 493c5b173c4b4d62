//! S3 bucket resources and deployment-environment naming.
use crate::error::GenError;
use crate::identifier::Canonicalizer;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Checked first; injected for non-Lambda deployments.
pub const PRIMARY_DEPLOY_ENV_VAR: &str = "DEPLOY_ENV";
/// Fallback when the primary variable is empty; injected for Lambda deployments.
pub const SECONDARY_DEPLOY_ENV_VAR: &str = "_DEPLOY_ENV";
/// The only environment whose buckets keep their bare name.
pub const PRODUCTION_ENV: &str = "production";
pub const NON_PRODUCTION_SUFFIX: &str = "-dev";

const FIELD_PREFIX: &str = "S3";

/// Read access to environment variables.
pub trait EnvLookup {
    fn var(&self, key: &str) -> Option<String>;
}

/// The current process environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvLookup for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BucketResource {
    pub raw_name: String,
    pub field_name: String,
}

impl BucketResource {
    /// Bucket name as seen by the deployment environment `env` resolves to.
    pub fn env_qualified_value(&self, env: &dyn EnvLookup) -> Result<String, GenError> {
        let deploy_env = deploy_env(env)?;
        Ok(qualify_bucket_name(&self.raw_name, &deploy_env))
    }
}

/// Union read and write buckets, deduplicated and in sorted order.
pub fn bucket_resources(
    read: &[String],
    write: &[String],
    canon: &Canonicalizer<'_>,
) -> Vec<BucketResource> {
    let names: BTreeSet<&String> = read.iter().chain(write).collect();
    names
        .into_iter()
        .map(|name| BucketResource {
            raw_name: name.clone(),
            field_name: format!("{FIELD_PREFIX}{}", canon.public(name)),
        })
        .collect()
}

/// Current deployment environment; empty values count as unset.
pub fn deploy_env(env: &dyn EnvLookup) -> Result<String, GenError> {
    [PRIMARY_DEPLOY_ENV_VAR, SECONDARY_DEPLOY_ENV_VAR]
        .into_iter()
        .filter_map(|key| env.var(key))
        .find(|value| !value.is_empty())
        .ok_or(GenError::UndeterminedDeployEnv)
}

pub fn qualify_bucket_name(bucket: &str, deploy_env: &str) -> String {
    if deploy_env == PRODUCTION_ENV {
        bucket.to_string()
    } else {
        format!("{bucket}{NON_PRODUCTION_SUFFIX}")
    }
}
