//! 진동수.

use crate::dimensions::SIDimensions;
use crate::error::Error;
use crate::kind::Relative;
use crate::prefix::SiPrefixes;
use crate::quantity::Quantity;
use crate::scale::Scale;
use crate::unit::{UnitBuilder, UnitSystem};

use super::linear;

quantity_type!(
    /// 진동수.
    Frequency,
    SIDimensions::TIME.invert(),
    register
);

impl Relative for Frequency {}

builtin_units!(Frequency => {
    HERTZ = "Hz";
    KILOHERTZ = "kHz";
    MEGAHERTZ = "MHz";
    PER_SECOND = "/s";
    PER_MILLISECOND = "/ms";
    RPM = "rpm";
    PER_MINUTE = "/min";
    PER_HOUR = "/h";
});

fn register(q: &Quantity) -> Result<(), Error> {
    let hertz = UnitBuilder::new(q)
        .id("Hz")
        .name("hertz")
        .unit_system(UnitSystem::SiDerived)
        .prefixes(SiPrefixes::Unit, 1)
        .build()?;
    hertz
        .derive(Scale::linear(1.0)?)?
        .id("/s")
        .name("per second")
        .abbreviations(["/s", "1/s"])
        .prefixes(SiPrefixes::PerUnit, 1)
        .build()?;
    hertz.derive_linear(1.0 / 60.0, "rpm", "revolutions per minute", UnitSystem::Other)?;
    linear(&hertz, 1.0 / 60.0, "/min", "per minute", &["/min", "1/min"], UnitSystem::SiAccepted)?;
    linear(&hertz, 1.0 / 3600.0, "/h", "per hour", &["/h", "1/h"], UnitSystem::SiAccepted)?;
    Ok(())
}
