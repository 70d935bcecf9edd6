//! 길이. 내부 기준은 미터이다.

use crate::dimensions::SIDimensions;
use crate::error::Error;
use crate::kind::{RelWithAbs, Relative};
use crate::prefix::SiPrefixes;
use crate::quantity::Quantity;
use crate::unit::{UnitBuilder, UnitSystem};

use super::linear;
use super::position::Position;

quantity_type!(
    /// 두 점 사이의 거리. 절대량 짝은 [`Position`].
    Length,
    SIDimensions::LENGTH,
    register
);

impl Relative for Length {}

impl RelWithAbs for Length {
    type Abs = Position;
}

builtin_units!(Length => {
    METER = "m";
    MILLIMETER = "mm";
    CENTIMETER = "cm";
    DECIMETER = "dm";
    KILOMETER = "km";
    MICROMETER = "mum";
    NANOMETER = "nm";
    INCH = "in";
    FOOT = "ft";
    YARD = "yd";
    MILE = "mi";
    NAUTICAL_MILE = "NM";
    ASTRONOMICAL_UNIT = "au";
    LIGHTYEAR = "ly";
    PARSEC = "pc";
    ANGSTROM = "A";
});

fn register(q: &Quantity) -> Result<(), Error> {
    let meter = UnitBuilder::new(q)
        .id("m")
        .name("meter")
        .unit_system(UnitSystem::SiBase)
        .prefixes(SiPrefixes::Unit, 1)
        .build()?;
    linear(&meter, 0.0254, "in", "inch", &["in", "\""], UnitSystem::Imperial)?;
    linear(&meter, 0.3048, "ft", "foot", &["ft", "'"], UnitSystem::Imperial)?;
    meter.derive_linear(0.9144, "yd", "yard", UnitSystem::Imperial)?;
    meter.derive_linear(1609.344, "mi", "mile", UnitSystem::Imperial)?;
    linear(&meter, 1852.0, "NM", "nautical mile", &["NM", "nmi"], UnitSystem::Other)?;
    meter.derive_linear(149_597_870_700.0, "au", "astronomical unit", UnitSystem::SiAccepted)?;
    meter.derive_linear(9.460_730_472_580_8e15, "ly", "lightyear", UnitSystem::Other)?;
    meter.derive_linear(3.085_677_581_491_367e16, "pc", "parsec", UnitSystem::Other)?;
    linear(&meter, 1e-10, "A", "angstrom", &["Å", "A"], UnitSystem::Other)?;
    Ok(())
}
