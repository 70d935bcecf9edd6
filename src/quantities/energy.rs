//! 에너지. 차원이 같은 [`super::torque`]와는 다른 물리량이다.

use crate::dimensions::SIDimensions;
use crate::error::Error;
use crate::kind::Relative;
use crate::prefix::SiPrefixes;
use crate::quantity::Quantity;
use crate::scale::Scale;
use crate::unit::{UnitBuilder, UnitSystem};

use super::linear;

quantity_type!(
    /// 에너지.
    Energy,
    SIDimensions::new([0, 0, 1, 2, -2, 0, 0, 0, 0]),
    register
);

impl Relative for Energy {}

builtin_units!(Energy => {
    JOULE = "J";
    KILOJOULE = "kJ";
    ELECTRONVOLT = "eV";
    CALORIE = "cal";
    KILOCALORIE = "kcal";
    WATT_HOUR = "Wh";
    KILOWATT_HOUR = "kWh";
    BTU = "BTU";
    ERG = "erg";
});

fn register(q: &Quantity) -> Result<(), Error> {
    let joule = UnitBuilder::new(q)
        .id("J")
        .name("joule")
        .unit_system(UnitSystem::SiDerived)
        .prefixes(SiPrefixes::Unit, 1)
        .build()?;
    joule
        .derive(Scale::linear(1.602_176_634e-19)?)?
        .id("eV")
        .name("electronvolt")
        .unit_system(UnitSystem::SiAccepted)
        .prefixes(SiPrefixes::Unit, 1)
        .build()?;
    joule.derive_linear(4.184, "cal", "calorie", UnitSystem::Other)?;
    joule.derive_linear(4184.0, "kcal", "kilocalorie", UnitSystem::Other)?;
    joule.derive_linear(3600.0, "Wh", "watt hour", UnitSystem::SiAccepted)?;
    joule.derive_linear(3.6e6, "kWh", "kilowatt hour", UnitSystem::SiAccepted)?;
    linear(
        &joule,
        1_055.055_852_62,
        "BTU",
        "British thermal unit",
        &["BTU", "Btu"],
        UnitSystem::Imperial,
    )?;
    joule.derive_linear(1e-7, "erg", "erg", UnitSystem::Cgs)?;
    Ok(())
}
