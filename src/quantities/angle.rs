//! 각도.

use std::f64::consts::PI;

use crate::dimensions::SIDimensions;
use crate::error::Error;
use crate::kind::{RelWithAbs, Relative};
use crate::prefix::SiPrefixes;
use crate::quantity::Quantity;
use crate::scale::Scale;
use crate::unit::{UnitBuilder, UnitSystem};

use super::direction::Direction;
use super::linear;

quantity_type!(
    /// 두 방향 사이의 각. 절대량 짝은 [`Direction`].
    Angle,
    SIDimensions::ANGLE,
    register
);

impl Relative for Angle {}

impl RelWithAbs for Angle {
    type Abs = Direction;
}

builtin_units!(Angle => {
    RADIAN = "rad";
    MILLIRADIAN = "mrad";
    DEGREE = "deg";
    ARCMINUTE = "arcmin";
    ARCSECOND = "arcsec";
    GRAD = "grad";
    /// 경사 백분율. 100%는 45°이다.
    PERCENT = "%";
});

fn register(q: &Quantity) -> Result<(), Error> {
    let radian = UnitBuilder::new(q)
        .id("rad")
        .name("radian")
        .unit_system(UnitSystem::SiDerived)
        .prefixes(SiPrefixes::Unit, 1)
        .build()?;
    linear(&radian, PI / 180.0, "deg", "degree", &["°", "deg"], UnitSystem::SiAccepted)?;
    linear(&radian, PI / 10_800.0, "arcmin", "arcminute", &["'", "arcmin"], UnitSystem::SiAccepted)?;
    linear(&radian, PI / 648_000.0, "arcsec", "arcsecond", &["\"", "arcsec"], UnitSystem::SiAccepted)?;
    linear(&radian, PI / 200.0, "grad", "gradian", &["grad", "gon"], UnitSystem::Other)?;
    radian
        .derive(Scale::grade(0.01)?)?
        .id("%")
        .name("percent")
        .unit_system(UnitSystem::Other)
        .build()?;
    Ok(())
}
