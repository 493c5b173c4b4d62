//! Generates `LaunchConfig` initialization code from a launch YAML descriptor.
//!
//! The pipeline is descriptor → [`model::build_model`] → [`render::render`] →
//! [`output::write_output`]. Everything up to rendering is pure and returns a
//! tagged [`error::GenError`]; only the binary decides to exit.
pub mod cli;
pub mod dependencies;
pub mod descriptor;
pub mod error;
pub mod identifier;
pub mod model;
pub mod output;
pub mod overrides;
pub mod render;
pub mod resources;
