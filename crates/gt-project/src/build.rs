//! Turning a project description into a live gear network.

use std::collections::BTreeMap;

use gt_core::GearId;
use gt_network::{Gear, GearNetwork, NetworkError};

use crate::schema::{DriveDef, LinkDef, Project};
use crate::validate::validate_project;
use crate::{ProjectError, ProjectResult};

/// A built network plus the mapping from project ids to gear handles.
#[derive(Debug, Clone)]
pub struct GearTrain {
    pub name: String,
    pub network: GearNetwork,
    ids: BTreeMap<String, GearId>,
    order: Vec<String>,
}

impl GearTrain {
    /// Handle of the gear declared with `id`.
    pub fn id(&self, id: &str) -> Option<GearId> {
        self.ids.get(id).copied()
    }

    /// Gear `id` as declared, paired with its handle, in declaration order.
    pub fn gears(&self) -> impl Iterator<Item = (&str, GearId)> + '_ {
        self.order
            .iter()
            .filter_map(|name| self.ids.get(name).map(|&id| (name.as_str(), id)))
    }

    fn lookup(&self, id: &str) -> ProjectResult<GearId> {
        self.id(id).ok_or_else(|| {
            crate::ValidationError::MissingReference {
                id: id.to_string(),
                context: "gear train".to_string(),
            }
            .into()
        })
    }
}

/// Validate `project`, create its gears, then apply links and drives in
/// file order.
pub fn build_train(project: &Project) -> ProjectResult<GearTrain> {
    validate_project(project)?;

    let mut train = GearTrain {
        name: project.name.clone(),
        network: GearNetwork::new(),
        ids: BTreeMap::new(),
        order: Vec::with_capacity(project.gears.len()),
    };

    for def in &project.gears {
        let gear = match def.radius {
            Some(radius) => Gear::new(def.teeth, radius)?,
            None => Gear::with_teeth(def.teeth)?,
        };
        let id = train.network.add(gear);
        train.ids.insert(def.id.clone(), id);
        train.order.push(def.id.clone());
    }

    for (index, link) in project.links.iter().enumerate() {
        apply_link(&mut train, link).map_err(|e| match e {
            ProjectError::Network(source) => ProjectError::Link { index, source },
            other => other,
        })?;
    }

    for (index, drive) in project.drives.iter().enumerate() {
        apply_drive(&mut train, drive).map_err(|e| match e {
            ProjectError::Network(source) => ProjectError::Drive { index, source },
            other => other,
        })?;
    }

    tracing::debug!(
        name = %train.name,
        gears = train.network.len(),
        links = project.links.len(),
        drives = project.drives.len(),
        "gear train built"
    );
    Ok(train)
}

fn apply_link(train: &mut GearTrain, link: &LinkDef) -> ProjectResult<()> {
    match link {
        LinkDef::Mesh { a, b } => {
            let (a, b) = (train.lookup(a)?, train.lookup(b)?);
            train.network.connect_mesh(a, b)?;
        }
        LinkDef::MeshFrom { driver, driven } => {
            let (driver, driven) = (train.lookup(driver)?, train.lookup(driven)?);
            train.network.connect_mesh_from(driver, driven)?;
        }
        LinkDef::Axial { a, b } => {
            let (a, b) = (train.lookup(a)?, train.lookup(b)?);
            train.network.connect_axial(a, b)?;
        }
        LinkDef::Axis { gears } => {
            let ids = gears
                .iter()
                .map(|g| train.lookup(g))
                .collect::<ProjectResult<Vec<_>>>()?;
            train.network.create_axis(&ids)?;
        }
    }
    Ok(())
}

fn apply_drive(train: &mut GearTrain, drive: &DriveDef) -> ProjectResult<()> {
    let id = train.lookup(drive.gear_id())?;
    let net = &mut train.network;
    let result: Result<_, NetworkError> = match *drive {
        DriveDef::Frequency { value, .. } => net.set_frequency(id, value),
        DriveDef::ToothSpeed { value, .. } => net.set_tooth_speed(id, value),
        DriveDef::Torque { value, .. } => net.apply_torque(id, value),
        DriveDef::EdgeForce { value, .. } => net.apply_edge_force(id, value),
        DriveDef::ForceAtRadius { value, radius, .. } => {
            net.apply_force_at_radius(id, value, radius)
        }
    };
    result?;
    Ok(())
}
