//! Launch descriptor model and YAML loading.
//!
//! The descriptor is read once per invocation and never mutated; every later
//! stage borrows from it.
use crate::error::GenError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;

/// Parsed launch YAML.
///
/// Every key is optional. A missing key or an explicit `null` reads as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LaunchDescriptor {
    /// Environment variable names in declaration order.
    #[serde(deserialize_with = "null_as_default")]
    pub env: Vec<String>,
    /// Dependency tokens in declaration order.
    #[serde(deserialize_with = "null_as_default")]
    pub dependencies: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub aws: AwsSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AwsSection {
    #[serde(deserialize_with = "null_as_default")]
    pub s3: S3Section,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct S3Section {
    #[serde(deserialize_with = "null_as_default")]
    pub read: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub write: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Read and parse a descriptor file.
pub fn load_descriptor(path: &Path) -> Result<LaunchDescriptor, GenError> {
    let text = fs::read_to_string(path).map_err(|source| GenError::DescriptorRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_descriptor(&text, path)
}

/// Parse descriptor text; `origin` is only used for error reporting.
pub fn parse_descriptor(text: &str, origin: &Path) -> Result<LaunchDescriptor, GenError> {
    if text.trim().is_empty() {
        return Ok(LaunchDescriptor::default());
    }
    serde_yaml::from_str(text).map_err(|source| GenError::DescriptorParse {
        path: origin.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::path::PathBuf;

    fn origin() -> PathBuf {
        PathBuf::from("launch.yml")
    }

    #[test]
    fn parses_full_descriptor() {
        let text = r#"
env:
  - DATABASE_URL
  - TRACING_ACCESS_TOKEN
dependencies:
  - service-a
  - service-c@v4
aws:
  s3:
    read:
      - bucket-a
    write:
      - bucket-b
"#;
        let descriptor = parse_descriptor(text, &origin()).expect("parse descriptor");
        assert_eq!(descriptor.env, vec!["DATABASE_URL", "TRACING_ACCESS_TOKEN"]);
        assert_eq!(descriptor.dependencies, vec!["service-a", "service-c@v4"]);
        assert_eq!(descriptor.aws.s3.read, vec!["bucket-a"]);
        assert_eq!(descriptor.aws.s3.write, vec!["bucket-b"]);
    }

    #[test]
    fn missing_and_null_keys_read_as_empty() {
        let text = "env:\ndependencies:\n  - service-a\naws:\n";
        let descriptor = parse_descriptor(text, &origin()).expect("parse descriptor");
        assert!(descriptor.env.is_empty());
        assert_eq!(descriptor.dependencies, vec!["service-a"]);
        assert!(descriptor.aws.s3.read.is_empty());
        assert!(descriptor.aws.s3.write.is_empty());
    }

    #[test]
    fn unrelated_top_level_keys_are_ignored() {
        let text = r#"
run:
  type: docker
team: eng-infra
resources:
  cpu: 0.25
  max_mem: 0.5
alarms:
  - type: InternalErrorAlarm
    severity: major
env:
  - CLIENT_ID
dependencies:
  - service-a
aws:
  s3:
    read:
      - bucket-a
  dynamodb:
    read:
      - table-a
"#;
        let descriptor = parse_descriptor(text, &origin()).expect("parse descriptor");
        assert_eq!(descriptor.env, vec!["CLIENT_ID"]);
        assert_eq!(descriptor.dependencies, vec!["service-a"]);
        assert_eq!(descriptor.aws.s3.read, vec!["bucket-a"]);
    }

    #[test]
    fn empty_file_is_an_empty_descriptor() {
        let descriptor = parse_descriptor("  \n", &origin()).expect("parse descriptor");
        assert_eq!(descriptor, LaunchDescriptor::default());
    }

    #[test]
    fn unparseable_descriptor_is_a_descriptor_error() {
        let err = parse_descriptor("dependencies: {not: [a list", &origin())
            .expect_err("should reject malformed yaml");
        assert_eq!(err.kind(), ErrorKind::Descriptor);
        assert!(err.to_string().contains("launch.yml"));
    }

    #[test]
    fn unreadable_descriptor_is_a_descriptor_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_descriptor(&dir.path().join("missing.yml"))
            .expect_err("missing file should fail");
        assert_eq!(err.kind(), ErrorKind::Descriptor);
    }
}
