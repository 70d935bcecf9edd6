//! 방향. 기준 방향에 대한 절대 각도.

use std::f64::consts::PI;

use crate::dimensions::SIDimensions;
use crate::error::Error;
use crate::kind::Absolute;
use crate::quantity::Quantity;
use crate::unit::{UnitBuilder, UnitSystem};

use super::angle::Angle;
use super::linear;

quantity_type!(
    /// 기준 방향에 대한 방향.
    Direction,
    SIDimensions::ANGLE,
    register
);

impl Absolute for Direction {
    type Rel = Angle;
}

builtin_units!(Direction => {
    RADIAN = "rad";
    DEGREE = "deg";
});

fn register(q: &Quantity) -> Result<(), Error> {
    let radian = UnitBuilder::new(q)
        .id("rad")
        .name("radian")
        .unit_system(UnitSystem::SiDerived)
        .build()?;
    linear(&radian, PI / 180.0, "deg", "degree", &["°", "deg"], UnitSystem::SiAccepted)?;
    Ok(())
}
