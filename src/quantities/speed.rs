//! 속력.

use crate::dimensions::SIDimensions;
use crate::error::Error;
use crate::kind::Relative;
use crate::quantity::Quantity;
use crate::unit::{UnitBuilder, UnitSystem};

use super::linear;

quantity_type!(
    /// 속력.
    Speed,
    SIDimensions::LENGTH.minus(&SIDimensions::TIME),
    register
);

impl Relative for Speed {}

builtin_units!(Speed => {
    METER_PER_SECOND = "m/s";
    KILOMETER_PER_HOUR = "km/h";
    MILE_PER_HOUR = "mi/h";
    KNOT = "kt";
    FOOT_PER_SECOND = "ft/s";
});

fn register(q: &Quantity) -> Result<(), Error> {
    let mps = UnitBuilder::new(q)
        .id("m/s")
        .name("meter per second")
        .unit_system(UnitSystem::SiDerived)
        .build()?;
    linear(&mps, 1.0 / 3.6, "km/h", "kilometer per hour", &["km/h", "kph"], UnitSystem::SiAccepted)?;
    linear(&mps, 0.447_04, "mi/h", "mile per hour", &["mi/h", "mph"], UnitSystem::Imperial)?;
    linear(&mps, 1852.0 / 3600.0, "kt", "knot", &["kt", "kn"], UnitSystem::Other)?;
    linear(&mps, 0.3048, "ft/s", "foot per second", &["ft/s", "fps"], UnitSystem::Imperial)?;
    Ok(())
}
