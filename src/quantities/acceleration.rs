//! 가속도.

use crate::dimensions::SIDimensions;
use crate::error::Error;
use crate::kind::Relative;
use crate::prefix::SiPrefixes;
use crate::quantity::Quantity;
use crate::scale::Scale;
use crate::unit::{UnitBuilder, UnitSystem};

use super::linear;

quantity_type!(
    /// 가속도.
    Acceleration,
    SIDimensions::LENGTH.minus(&SIDimensions::TIME.pow(2)),
    register
);

impl Relative for Acceleration {}

builtin_units!(Acceleration => {
    METER_PER_SECOND_2 = "m/s2";
    KILOMETER_PER_HOUR_2 = "km/h2";
    FOOT_PER_SECOND_2 = "ft/s2";
    INCH_PER_SECOND_2 = "in/s2";
    STANDARD_GRAVITY = "g";
    GAL = "Gal";
});

fn register(q: &Quantity) -> Result<(), Error> {
    let base = UnitBuilder::new(q)
        .id("m/s2")
        .name("meter per second squared")
        .abbreviations(["m/s2", "m/s^2"])
        .unit_system(UnitSystem::SiDerived)
        .build()?;
    linear(
        &base,
        1000.0 / 3600.0 / 3600.0,
        "km/h2",
        "kilometer per hour squared",
        &["km/h2", "km/h^2"],
        UnitSystem::SiAccepted,
    )?;
    linear(
        &base,
        0.3048,
        "ft/s2",
        "foot per second squared",
        &["ft/s2", "ft/s^2"],
        UnitSystem::Imperial,
    )?;
    base.derive(Scale::linear(0.0254)?)?
        .id("in/s2")
        .name("inch per second squared")
        .abbreviations(["in/s2", "in/s^2", "in/sec2", "\"/s2", "\"/sec2"])
        .unit_system(UnitSystem::Imperial)
        .prefixes(SiPrefixes::Unit, 1)
        .build()?;
    linear(&base, 9.806_65, "g", "standard gravity", &["g", "g0"], UnitSystem::Other)?;
    base.derive_linear(0.01, "Gal", "gal", UnitSystem::Cgs)?;
    Ok(())
}
