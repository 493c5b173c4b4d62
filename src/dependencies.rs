//! Dependency resolution: skip, then override, then version suffix.
//!
//! Resolution only decides what each surviving token means. Package paths are
//! derived afterwards by [`ResolvedDependency::package_path`], which does not
//! depend on resolution order.
use crate::overrides::OverrideMap;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Organization namespace every generated client package lives under.
pub const ORG_NAMESPACE: &str = "github.com/Clever";

/// Path segment between the service name and an optional version.
const CLIENT_PACKAGE_SUFFIX: &str = "gen-go/client";

static VERSIONED_MODULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([a-z][a-z0-9-_]+)@(v[0-9]+)$").expect("regex for versioned modules")
});

/// Dependency tokens excluded before any other resolution step.
pub type SkipSet = BTreeSet<String>;

/// A dependency token after resolution. `version` and `override_path` are
/// never both set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedDependency {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(rename = "override", skip_serializing_if = "Option::is_none")]
    pub override_path: Option<String>,
}

impl ResolvedDependency {
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn versioned(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: Some(version.into()),
            override_path: None,
        }
    }

    pub fn overridden(name: impl Into<String>, override_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            override_path: Some(override_path.into()),
        }
    }

    /// Full import path of the generated client package.
    ///
    /// With wag v9 onwards `gen-go/client` follows the service name; a version
    /// goes after it. An override replaces everything below the namespace.
    pub fn package_path(&self) -> String {
        let package = match (&self.override_path, &self.version) {
            (Some(override_path), _) => override_path.clone(),
            (None, Some(version)) => format!("{}/{CLIENT_PACKAGE_SUFFIX}/{version}", self.name),
            (None, None) => format!("{}/{CLIENT_PACKAGE_SUFFIX}", self.name),
        };
        format!("{ORG_NAMESPACE}/{package}")
    }
}

/// Resolve descriptor tokens in order, dropping skipped ones.
pub fn resolve_dependencies(
    tokens: &[String],
    skip: &SkipSet,
    overrides: &OverrideMap,
) -> Vec<ResolvedDependency> {
    let mut resolved = Vec::with_capacity(tokens.len());
    for token in tokens {
        if skip.contains(token) {
            tracing::debug!(dependency = %token, "skipping dependency");
            continue;
        }

        if let Some(override_path) = overrides.get(token) {
            tracing::debug!(dependency = %token, %override_path, "dependency overridden");
            resolved.push(ResolvedDependency::overridden(token, override_path));
            continue;
        }

        if let Some((name, version)) = split_versioned(token) {
            tracing::debug!(
                dependency = %token,
                resolved_name = name,
                version,
                "versioned dependency"
            );
            resolved.push(ResolvedDependency::versioned(name, version));
            continue;
        }

        resolved.push(ResolvedDependency::plain(token));
    }
    resolved
}

/// Split `name@vN` into its name and version; anything else is `None`.
fn split_versioned(token: &str) -> Option<(&str, &str)> {
    let captures = VERSIONED_MODULE.captures(token)?;
    let name = captures.get(1)?.as_str();
    let version = captures.get(2)?.as_str();
    Some((name, version))
}

#[cfg(test)]
#[path = "dependencies_tests.rs"]
mod tests;
