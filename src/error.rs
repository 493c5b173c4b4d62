//! Failure taxonomy for descriptor resolution.
//!
//! Every check runs before the generation model is complete, so any error here
//! means nothing was written. `main` is the only caller that turns these into
//! a process exit.
use crate::resources::{PRIMARY_DEPLOY_ENV_VAR, SECONDARY_DEPLOY_ENV_VAR};
use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a [`GenError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed override syntax or an empty replacement.
    InputShape,
    /// An override names a dependency the descriptor does not declare.
    Referential,
    /// The deployment environment could not be determined.
    Environment,
    /// The descriptor could not be read or parsed.
    Descriptor,
}

#[derive(Debug, Error)]
pub enum GenError {
    #[error("invalid override entry '{entry}': expected <dependency>:<replacement>")]
    MalformedOverride { entry: String },

    #[error("override entry '{entry}' has an empty replacement")]
    EmptyOverrideReplacement { entry: String },

    #[error("{dependency} is not a dependency specified in the provided descriptor")]
    UnknownOverrideDependency { dependency: String },

    #[error(
        "unable to determine deployment environment ({} and {} are undefined)",
        PRIMARY_DEPLOY_ENV_VAR,
        SECONDARY_DEPLOY_ENV_VAR
    )]
    UndeterminedDeployEnv,

    #[error("read descriptor {}", path.display())]
    DescriptorRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse descriptor {}", path.display())]
    DescriptorParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl GenError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenError::MalformedOverride { .. } | GenError::EmptyOverrideReplacement { .. } => {
                ErrorKind::InputShape
            }
            GenError::UnknownOverrideDependency { .. } => ErrorKind::Referential,
            GenError::UndeterminedDeployEnv => ErrorKind::Environment,
            GenError::DescriptorRead { .. } | GenError::DescriptorParse { .. } => {
                ErrorKind::Descriptor
            }
        }
    }
}
