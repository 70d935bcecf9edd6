//! 무차원량.

use crate::dimensions::SIDimensions;
use crate::error::Error;
use crate::kind::Relative;
use crate::quantity::Quantity;
use crate::scale::Scale;
use crate::unit::{UnitBuilder, UnitSystem};

quantity_type!(
    /// 차원이 없는 값.
    Dimensionless,
    SIDimensions::DIMENSIONLESS,
    register
);

impl Relative for Dimensionless {}

builtin_units!(Dimensionless => {
    UNIT = "1";
    PERCENT = "%";
    PER_MILLE = "permille";
    PPM = "ppm";
    DECIBEL = "dB";
});

fn register(q: &Quantity) -> Result<(), Error> {
    let unit = UnitBuilder::new(q)
        .id("1")
        .name("unit")
        .unit_system(UnitSystem::SiDerived)
        .build()?;
    unit.derive_linear(0.01, "%", "percent", UnitSystem::Other)?;
    unit.derive_linear(1e-3, "permille", "per mille", UnitSystem::Other)?;
    unit.derive_linear(1e-6, "ppm", "parts per million", UnitSystem::Other)?;
    unit.derive(Scale::logarithmic(1.0, 10.0, 10.0)?)?
        .id("dB")
        .name("decibel")
        .unit_system(UnitSystem::Other)
        .build()?;
    Ok(())
}
