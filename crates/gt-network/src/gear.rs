//! Gear value object: geometric constants plus the current rotational state.

use core::fmt;

use gt_core::{Real, ensure_positive};

use crate::error::{NetworkError, NetworkResult};

/// A toothed gear spinning on an axis.
///
/// Tooth count and radius are fixed at construction. Frequency and torque
/// are derived state owned by the network the gear is added to; outside a
/// network they stay at zero.
///
/// Units are up to the caller. Hz for frequency and the right-hand rule
/// for signs are the expected convention.
#[derive(Debug, Clone, PartialEq)]
pub struct Gear {
    teeth: u32,
    radius: Real,
    pub(crate) frequency: Real,
    pub(crate) torque: Real,
}

impl Gear {
    /// Create a gear with `teeth` teeth and the given radius.
    ///
    /// # Errors
    /// Fails if `teeth <= 0` or `radius` is not strictly positive.
    pub fn new(teeth: i64, radius: Real) -> NetworkResult<Self> {
        let teeth = u32::try_from(teeth)
            .ok()
            .filter(|&n| n > 0)
            .ok_or(NetworkError::InvalidTeeth { teeth })?;
        let radius =
            ensure_positive(radius, "radius").map_err(|_| NetworkError::InvalidRadius { radius })?;

        Ok(Self {
            teeth,
            radius,
            frequency: 0.0,
            torque: 0.0,
        })
    }

    /// Create a gear whose radius equals its tooth count.
    pub fn with_teeth(teeth: i64) -> NetworkResult<Self> {
        Self::new(teeth, teeth as Real)
    }

    pub fn teeth(&self) -> u32 {
        self.teeth
    }

    pub fn radius(&self) -> Real {
        self.radius
    }

    pub fn frequency(&self) -> Real {
        self.frequency
    }

    pub fn torque(&self) -> Real {
        self.torque
    }

    /// Rate at which teeth pass a fixed contact point.
    pub fn tooth_speed(&self) -> Real {
        self.frequency * self.teeth as Real
    }

    /// Time for one revolution.
    ///
    /// # Errors
    /// [`NetworkError::ZeroFrequency`] when the gear is at rest.
    pub fn period(&self) -> NetworkResult<Real> {
        if self.frequency == 0.0 {
            return Err(NetworkError::ZeroFrequency);
        }
        Ok(1.0 / self.frequency)
    }

    /// Force at the edge of the gear.
    pub fn edge_force(&self) -> Real {
        self.torque / self.radius
    }

    /// Force at a radial distance from the axis.
    ///
    /// # Errors
    /// [`NetworkError::NonPositiveDistance`] unless `distance > 0`.
    pub fn force_at_radius(&self, distance: Real) -> NetworkResult<Real> {
        let distance = ensure_positive(distance, "radial distance")
            .map_err(|_| NetworkError::NonPositiveDistance { distance })?;
        Ok(self.torque / distance)
    }
}

impl fmt::Display for Gear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Teeth={}, Frequency={}, Torque={}",
            self.teeth, self.frequency, self.torque
        )
    }
}
