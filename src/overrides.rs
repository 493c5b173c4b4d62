//! Parsing for the `-d dep1:path1,dep2:path2` override flag.
use crate::error::GenError;
use std::collections::BTreeMap;

/// Dependency token to replacement package path (relative to the org namespace).
pub type OverrideMap = BTreeMap<String, String>;

/// Parse an override specification against the descriptor's dependency tokens.
///
/// `None` and `""` both mean no overrides. Each entry must be exactly
/// `original:replacement` with both sides non-empty, and `original` must be a
/// verbatim descriptor token.
pub fn parse_overrides(
    spec: Option<&str>,
    dependencies: &[String],
) -> Result<OverrideMap, GenError> {
    let mut overrides = OverrideMap::new();
    let Some(spec) = spec.filter(|spec| !spec.is_empty()) else {
        return Ok(overrides);
    };

    for entry in spec.split(',') {
        let parts: Vec<&str> = entry.split(':').collect();
        let [original, replacement] = parts.as_slice() else {
            return Err(GenError::MalformedOverride {
                entry: entry.to_string(),
            });
        };
        if original.is_empty() {
            return Err(GenError::MalformedOverride {
                entry: entry.to_string(),
            });
        }
        if replacement.is_empty() {
            return Err(GenError::EmptyOverrideReplacement {
                entry: entry.to_string(),
            });
        }
        if !dependencies.iter().any(|dep| dep == original) {
            return Err(GenError::UnknownOverrideDependency {
                dependency: (*original).to_string(),
            });
        }
        overrides.insert((*original).to_string(), (*replacement).to_string());
    }

    Ok(overrides)
}
