//! Import block planning for the Go backend.
//!
//! Aliases are assigned once per file so the struct, init and import sections
//! all agree on the qualifier for each client package.
use crate::model::GenerationModel;
use std::collections::BTreeMap;

/// Standard library packages the generated file always uses.
const STD_IMPORTS: &[&str] = &["log", "os"];

/// Import aliases for one generated file.
///
/// Every dependency package gets an explicit alias derived from its path.
/// Clashing aliases get a numeric suffix in first-use order.
pub(super) struct ImportPlan {
    aliases: BTreeMap<String, String>,
}

impl ImportPlan {
    pub(super) fn from_model(model: &GenerationModel) -> Self {
        let mut aliases: BTreeMap<String, String> = BTreeMap::new();
        let mut taken: Vec<String> = STD_IMPORTS.iter().map(|name| name.to_string()).collect();

        for dep in &model.dependencies {
            if aliases.contains_key(&dep.package_path) {
                continue;
            }
            let base = guess_alias(&dep.package_path);
            let mut alias = base.clone();
            let mut n = 1;
            while taken.contains(&alias) {
                alias = format!("{base}{n}");
                n += 1;
            }
            taken.push(alias.clone());
            aliases.insert(dep.package_path.clone(), alias);
        }

        Self { aliases }
    }

    /// Alias for a package path of the model this plan was built from.
    ///
    /// Panics on a path the plan never saw; that is a backend bug, not bad input.
    pub(super) fn alias(&self, package_path: &str) -> &str {
        &self.aliases[package_path]
    }

    /// Import spec lines in path order, as gofmt sorts them.
    pub(super) fn lines(&self) -> Vec<String> {
        let mut specs: Vec<(&str, String)> = STD_IMPORTS
            .iter()
            .map(|path| (*path, format!("\"{path}\"")))
            .collect();
        specs.extend(
            self.aliases
                .iter()
                .map(|(path, alias)| (path.as_str(), format!("{alias} \"{path}\""))),
        );
        specs.sort_by(|a, b| a.0.cmp(b.0));
        specs.into_iter().map(|(_, line)| line).collect()
    }
}

/// Package name a path most likely declares: its last segment, or the one
/// before it when the last is a major-version suffix such as `v4`.
fn guess_alias(package_path: &str) -> String {
    let segments: Vec<&str> = package_path.split('/').filter(|s| !s.is_empty()).collect();
    let last = match segments.as_slice() {
        [.., prev, last] if is_major_version(last) => *prev,
        [.., last] => *last,
        [] => "",
    };
    let cleaned: String = last
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect::<String>()
        .to_ascii_lowercase();
    match cleaned.chars().next() {
        Some(first) if !first.is_ascii_digit() => cleaned,
        _ => format!("pkg{cleaned}"),
    }
}

fn is_major_version(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
}
