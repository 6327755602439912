//! Per-gear state report for a built train.

use gt_core::{GearId, hz, n, nm, s};
use serde::{Deserialize, Serialize};
use uom::fmt::DisplayStyle::Abbreviation;
use uom::si::{force::newton, frequency::hertz, time::second, torque::newton_meter};

use crate::build::GearTrain;

/// Snapshot of one gear's geometry and rotational state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GearReport {
    pub id: String,
    /// Network handle, serialized as its 0-based index.
    pub handle: GearId,
    pub teeth: u32,
    pub radius: f64,
    pub frequency: f64,
    pub torque: f64,
    pub tooth_speed: f64,
    /// Absent while the gear is at rest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<f64>,
    pub edge_force: f64,
}

/// Report every gear in declaration order.
pub fn report(train: &GearTrain) -> Vec<GearReport> {
    train
        .gears()
        .filter_map(|(name, id)| {
            let gear = train.network.gear(id).ok()?;
            Some(GearReport {
                id: name.to_string(),
                handle: id,
                teeth: gear.teeth(),
                radius: gear.radius(),
                frequency: gear.frequency(),
                torque: gear.torque(),
                tooth_speed: gear.tooth_speed(),
                period: gear.period().ok(),
                edge_force: gear.edge_force(),
            })
        })
        .collect()
}

/// Render reports as a plain-text table, one gear per line.
pub fn render_table(rows: &[GearReport]) -> String {
    let header = format!(
        "{:<12} {:>6} {:>10} {:>16} {:>16} {:>16} {:>14}",
        "gear", "teeth", "radius", "frequency", "torque", "period", "edge force"
    );
    let lines = rows.iter().map(|row| {
        let frequency = format!("{:.4}", hz(row.frequency).into_format_args(hertz, Abbreviation));
        let torque = format!(
            "{:.4}",
            nm(row.torque).into_format_args(newton_meter, Abbreviation)
        );
        let period = match row.period {
            Some(p) => format!("{:.4}", s(p).into_format_args(second, Abbreviation)),
            None => "-".to_string(),
        };
        let edge_force = format!(
            "{:.4}",
            n(row.edge_force).into_format_args(newton, Abbreviation)
        );
        format!(
            "{:<12} {:>6} {:>10.4} {:>16} {:>16} {:>16} {:>14}",
            row.id, row.teeth, row.radius, frequency, torque, period, edge_force
        )
    });

    let mut out = header;
    out.push('\n');
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    out
}
