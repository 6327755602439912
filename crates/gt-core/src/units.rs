//! `uom` aliases for the quantities a gear carries.

use uom::si::f64::{
    Force as UomForce, Frequency as UomFrequency, Length as UomLength, Time as UomTime,
    Torque as UomTorque,
};

pub type Force = UomForce;
pub type Frequency = UomFrequency;
pub type Length = UomLength;
pub type Time = UomTime;
pub type Torque = UomTorque;

#[inline]
pub fn hz(v: f64) -> Frequency {
    use uom::si::frequency::hertz;
    Frequency::new::<hertz>(v)
}

#[inline]
pub fn nm(v: f64) -> Torque {
    use uom::si::torque::newton_meter;
    Torque::new::<newton_meter>(v)
}

#[inline]
pub fn n(v: f64) -> Force {
    use uom::si::force::newton;
    Force::new::<newton>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}
