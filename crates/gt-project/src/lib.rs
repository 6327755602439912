//! gt-project: gear train project files, validation and network build.

pub mod build;
pub mod report;
pub mod schema;
pub mod validate;

pub use build::{GearTrain, build_train};
pub use report::{GearReport, render_table, report};
pub use schema::*;
pub use validate::{LATEST_VERSION, ValidationError, validate_project};

use std::path::Path;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Link {index} rejected: {source}")]
    Link {
        index: usize,
        source: gt_network::NetworkError,
    },

    #[error("Drive {index} rejected: {source}")]
    Drive {
        index: usize,
        source: gt_network::NetworkError,
    },

    #[error("Network error: {0}")]
    Network(#[from] gt_network::NetworkError),

    #[error("Unsupported project file extension: {path}")]
    UnsupportedFormat { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &Path) -> ProjectResult<Project> {
    let content = std::fs::read_to_string(path)?;
    let project: Project = serde_yaml::from_str(&content)?;
    validate_project(&project)?;
    Ok(project)
}

pub fn save_yaml(path: &Path, project: &Project) -> ProjectResult<()> {
    validate_project(project)?;
    let content = serde_yaml::to_string(project)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<Project> {
    let content = std::fs::read_to_string(path)?;
    let project: Project = serde_json::from_str(&content)?;
    validate_project(&project)?;
    Ok(project)
}

pub fn save_json(path: &Path, project: &Project) -> ProjectResult<()> {
    validate_project(project)?;
    let content = serde_json::to_string_pretty(project)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a project, picking the format from the file extension.
pub fn load(path: &Path) -> ProjectResult<Project> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => load_yaml(path),
        Some("json") => load_json(path),
        _ => Err(ProjectError::UnsupportedFormat {
            path: path.display().to_string(),
        }),
    }
}
