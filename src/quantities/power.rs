//! 일률.

use crate::dimensions::SIDimensions;
use crate::error::Error;
use crate::kind::Relative;
use crate::prefix::SiPrefixes;
use crate::quantity::Quantity;
use crate::unit::{UnitBuilder, UnitSystem};

quantity_type!(
    /// 일률.
    Power,
    SIDimensions::new([0, 0, 1, 2, -3, 0, 0, 0, 0]),
    register
);

impl Relative for Power {}

builtin_units!(Power => {
    WATT = "W";
    KILOWATT = "kW";
    MEGAWATT = "MW";
    HORSEPOWER = "hp";
    BTU_PER_HOUR = "BTU/h";
});

fn register(q: &Quantity) -> Result<(), Error> {
    let watt = UnitBuilder::new(q)
        .id("W")
        .name("watt")
        .unit_system(UnitSystem::SiDerived)
        .prefixes(SiPrefixes::Unit, 1)
        .build()?;
    watt.derive_linear(745.699_871_582_270_2, "hp", "horsepower", UnitSystem::Imperial)?;
    watt.derive_linear(0.293_071_070_172_22, "BTU/h", "BTU per hour", UnitSystem::Imperial)?;
    watt.derive_linear(1e-7, "erg/s", "erg per second", UnitSystem::Cgs)?;
    Ok(())
}
