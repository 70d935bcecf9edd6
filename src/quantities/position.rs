//! 위치. 기준점으로부터의 절대 거리이며 단위 id는 [`super::length`]와 같다.

use crate::dimensions::SIDimensions;
use crate::error::Error;
use crate::kind::Absolute;
use crate::prefix::SiPrefixes;
use crate::quantity::Quantity;
use crate::unit::{UnitBuilder, UnitSystem};

use super::length::Length;

quantity_type!(
    /// 기준점에 대한 위치.
    Position,
    SIDimensions::LENGTH,
    register
);

impl Absolute for Position {
    type Rel = Length;
}

builtin_units!(Position => {
    METER = "m";
    KILOMETER = "km";
    FOOT = "ft";
    MILE = "mi";
});

fn register(q: &Quantity) -> Result<(), Error> {
    let meter = UnitBuilder::new(q)
        .id("m")
        .name("meter")
        .unit_system(UnitSystem::SiBase)
        .prefixes(SiPrefixes::Unit, 1)
        .build()?;
    meter.derive_linear(0.0254, "in", "inch", UnitSystem::Imperial)?;
    meter.derive_linear(0.3048, "ft", "foot", UnitSystem::Imperial)?;
    meter.derive_linear(0.9144, "yd", "yard", UnitSystem::Imperial)?;
    meter.derive_linear(1609.344, "mi", "mile", UnitSystem::Imperial)?;
    Ok(())
}
