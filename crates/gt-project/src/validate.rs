//! Project validation logic.

use crate::schema::{DriveDef, GearDef, LinkDef, Project};
use gt_core::ensure_finite;
use std::collections::HashSet;

/// Newest project file version this crate understands.
pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    let mut gear_ids = HashSet::new();
    for gear in &project.gears {
        if !gear_ids.insert(gear.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: gear.id.clone(),
                context: "gears".to_string(),
            });
        }
        validate_gear(gear)?;
    }

    for (index, link) in project.links.iter().enumerate() {
        validate_link(index, link, &gear_ids)?;
    }

    for (index, drive) in project.drives.iter().enumerate() {
        validate_drive(index, drive, &gear_ids)?;
    }

    Ok(())
}

fn validate_gear(gear: &GearDef) -> Result<(), ValidationError> {
    if gear.teeth <= 0 || gear.teeth > i64::from(u32::MAX) {
        return Err(ValidationError::InvalidValue {
            field: format!("gear '{}' teeth", gear.id),
            value: gear.teeth.to_string(),
            reason: "must be a positive whole number".to_string(),
        });
    }

    if let Some(radius) = gear.radius {
        let field = format!("gear '{}' radius", gear.id);
        finite(&field, radius)?;
        if radius <= 0.0 {
            return Err(ValidationError::InvalidValue {
                field,
                value: radius.to_string(),
                reason: "must be positive".to_string(),
            });
        }
    }

    Ok(())
}

fn validate_link(
    index: usize,
    link: &LinkDef,
    gear_ids: &HashSet<&str>,
) -> Result<(), ValidationError> {
    let context = format!("link {}", index);
    let ids = link.gear_ids();

    for id in &ids {
        if !gear_ids.contains(id) {
            return Err(ValidationError::MissingReference {
                id: id.to_string(),
                context,
            });
        }
    }

    match link {
        LinkDef::Axis { gears } if gears.len() < 2 => Err(ValidationError::InvalidValue {
            field: format!("{} gears", context),
            value: gears.len().to_string(),
            reason: "an axis needs at least two gears".to_string(),
        }),
        _ => {
            let mut seen = HashSet::new();
            for id in ids {
                if !seen.insert(id) {
                    return Err(ValidationError::InvalidValue {
                        field: format!("{} gears", context),
                        value: id.to_string(),
                        reason: "a gear cannot be linked to itself".to_string(),
                    });
                }
            }
            Ok(())
        }
    }
}

fn validate_drive(
    index: usize,
    drive: &DriveDef,
    gear_ids: &HashSet<&str>,
) -> Result<(), ValidationError> {
    let context = format!("drive {}", index);
    if !gear_ids.contains(drive.gear_id()) {
        return Err(ValidationError::MissingReference {
            id: drive.gear_id().to_string(),
            context,
        });
    }

    match drive {
        DriveDef::Frequency { value, .. }
        | DriveDef::ToothSpeed { value, .. }
        | DriveDef::Torque { value, .. }
        | DriveDef::EdgeForce { value, .. } => finite(&format!("{} value", context), *value),
        DriveDef::ForceAtRadius { value, radius, .. } => {
            finite(&format!("{} value", context), *value)?;
            finite(&format!("{} radius", context), *radius)
        }
    }
}

fn finite(field: &str, value: f64) -> Result<(), ValidationError> {
    ensure_finite(value, "project value").map_err(|e| ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })?;
    Ok(())
}
