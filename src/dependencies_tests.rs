use super::*;
use proptest::prelude::*;

fn tokens(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|token| token.to_string()).collect()
}

#[test]
fn resolves_skip_override_and_version_in_order() {
    let deps = tokens(&["service-a", "service-b", "service-c@v4", "service-d"]);
    let skip: SkipSet = ["service-b".to_string()].into_iter().collect();
    let overrides: OverrideMap = [("service-d".to_string(), "custom/path".to_string())]
        .into_iter()
        .collect();

    let resolved = resolve_dependencies(&deps, &skip, &overrides);

    assert_eq!(
        resolved,
        vec![
            ResolvedDependency::plain("service-a"),
            ResolvedDependency::versioned("service-c", "v4"),
            ResolvedDependency::overridden("service-d", "custom/path"),
        ]
    );
}

#[test]
fn override_preempts_version_parsing() {
    let deps = tokens(&["service-c@v4"]);
    let overrides: OverrideMap = [("service-c@v4".to_string(), "forked/client".to_string())]
        .into_iter()
        .collect();

    let resolved = resolve_dependencies(&deps, &SkipSet::new(), &overrides);

    assert_eq!(
        resolved,
        vec![ResolvedDependency::overridden("service-c@v4", "forked/client")]
    );
}

#[test]
fn skip_wins_over_override() {
    let deps = tokens(&["service-a"]);
    let skip: SkipSet = ["service-a".to_string()].into_iter().collect();
    let overrides: OverrideMap = [("service-a".to_string(), "x".to_string())]
        .into_iter()
        .collect();

    assert!(resolve_dependencies(&deps, &skip, &overrides).is_empty());
}

#[test]
fn version_pattern_is_case_insensitive() {
    let resolved = resolve_dependencies(
        &tokens(&["Service_C@V12"]),
        &SkipSet::new(),
        &OverrideMap::new(),
    );
    assert_eq!(resolved, vec![ResolvedDependency::versioned("Service_C", "V12")]);
}

#[test]
fn non_matching_suffixes_resolve_as_plain_names() {
    let raw = ["service@2", "service@version", "1service@v2", "service@v", "s@v1"];
    let resolved = resolve_dependencies(&tokens(&raw), &SkipSet::new(), &OverrideMap::new());
    let expected: Vec<_> = raw.iter().map(|t| ResolvedDependency::plain(*t)).collect();
    assert_eq!(resolved, expected);
}

#[test]
fn package_paths() {
    assert_eq!(
        ResolvedDependency::plain("service-a").package_path(),
        "github.com/Clever/service-a/gen-go/client"
    );
    assert_eq!(
        ResolvedDependency::versioned("service-c", "v4").package_path(),
        "github.com/Clever/service-c/gen-go/client/v4"
    );
    assert_eq!(
        ResolvedDependency::overridden("service-d", "custom/path").package_path(),
        "github.com/Clever/custom/path"
    );
}

#[test]
fn serializes_only_set_fields() {
    let json = serde_json::to_value(ResolvedDependency::overridden("a", "b")).expect("json");
    assert_eq!(json, serde_json::json!({"name": "a", "override": "b"}));
}

proptest! {
    #[test]
    fn skipped_tokens_never_survive_and_order_is_kept(
        deps in prop::collection::vec("[a-e]{1,2}(@v[0-9])?", 0..12),
        skip in prop::collection::btree_set("[a-e]{1,2}(@v[0-9])?", 0..6),
    ) {
        let resolved = resolve_dependencies(&deps, &skip, &OverrideMap::new());
        let survivors: Vec<&String> = deps.iter().filter(|d| !skip.contains(*d)).collect();
        prop_assert_eq!(resolved.len(), survivors.len());
        for (dep, token) in resolved.iter().zip(survivors) {
            prop_assert!(token.starts_with(&dep.name));
            prop_assert!(dep.version.is_none() || dep.override_path.is_none());
        }
    }
}
