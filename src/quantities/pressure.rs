//! 압력.

use crate::dimensions::SIDimensions;
use crate::error::Error;
use crate::kind::Relative;
use crate::prefix::SiPrefixes;
use crate::quantity::Quantity;
use crate::scale::Scale;
use crate::unit::{UnitBuilder, UnitSystem};

use super::linear;

quantity_type!(
    /// 압력.
    Pressure,
    SIDimensions::new([0, 0, 1, -1, -2, 0, 0, 0, 0]),
    register
);

impl Relative for Pressure {}

builtin_units!(Pressure => {
    PASCAL = "Pa";
    HECTOPASCAL = "hPa";
    KILOPASCAL = "kPa";
    MEGAPASCAL = "MPa";
    BAR = "bar";
    MILLIBAR = "mbar";
    ATMOSPHERE = "atm";
    PSI = "psi";
    MILLIMETER_MERCURY = "mmHg";
    TORR = "torr";
});

fn register(q: &Quantity) -> Result<(), Error> {
    let pascal = UnitBuilder::new(q)
        .id("Pa")
        .name("pascal")
        .unit_system(UnitSystem::SiDerived)
        .prefixes(SiPrefixes::Unit, 1)
        .build()?;
    pascal
        .derive(Scale::linear(1e5)?)?
        .id("bar")
        .name("bar")
        .unit_system(UnitSystem::Other)
        .prefixes(SiPrefixes::Unit, 1)
        .build()?;
    pascal.derive_linear(101_325.0, "atm", "standard atmosphere", UnitSystem::Other)?;
    pascal.derive_linear(98_066.5, "at", "technical atmosphere", UnitSystem::Mts)?;
    linear(
        &pascal,
        6_894.757_293_168_361,
        "psi",
        "pound per square inch",
        &["psi", "lbf/in2"],
        UnitSystem::Imperial,
    )?;
    pascal.derive_linear(133.322_387_415, "mmHg", "millimeter of mercury", UnitSystem::Other)?;
    linear(&pascal, 101_325.0 / 760.0, "torr", "torr", &["torr", "Torr"], UnitSystem::Other)?;
    pascal.derive_linear(3_386.388_640_341, "inHg", "inch of mercury", UnitSystem::Imperial)?;
    Ok(())
}
