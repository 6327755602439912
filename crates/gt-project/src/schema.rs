//! Project schema definitions.

use serde::{Deserialize, Serialize};

/// A gear train described as data: gears, then links, then drives.
///
/// Links and drives are applied in file order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub gears: Vec<GearDef>,
    #[serde(default)]
    pub links: Vec<LinkDef>,
    #[serde(default)]
    pub drives: Vec<DriveDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GearDef {
    pub id: String,
    pub teeth: i64,
    /// Defaults to the tooth count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum LinkDef {
    /// Mesh two gears; the one under more torque keeps its state.
    Mesh { a: String, b: String },
    /// Mesh two gears; `driver` keeps its state.
    MeshFrom { driver: String, driven: String },
    /// Put `b` on the axis of `a`.
    Axial { a: String, b: String },
    /// Put all listed gears on one axis.
    Axis { gears: Vec<String> },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum DriveDef {
    Frequency { gear: String, value: f64 },
    ToothSpeed { gear: String, value: f64 },
    Torque { gear: String, value: f64 },
    EdgeForce { gear: String, value: f64 },
    ForceAtRadius { gear: String, value: f64, radius: f64 },
}

impl LinkDef {
    /// Gear ids referenced by this link.
    pub fn gear_ids(&self) -> Vec<&str> {
        match self {
            LinkDef::Mesh { a, b } | LinkDef::Axial { a, b } => vec![a.as_str(), b.as_str()],
            LinkDef::MeshFrom { driver, driven } => vec![driver.as_str(), driven.as_str()],
            LinkDef::Axis { gears } => gears.iter().map(String::as_str).collect(),
        }
    }
}

impl DriveDef {
    /// Gear id this drive acts on.
    pub fn gear_id(&self) -> &str {
        match self {
            DriveDef::Frequency { gear, .. }
            | DriveDef::ToothSpeed { gear, .. }
            | DriveDef::Torque { gear, .. }
            | DriveDef::EdgeForce { gear, .. }
            | DriveDef::ForceAtRadius { gear, .. } => gear,
        }
    }
}
