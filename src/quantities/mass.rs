//! 질량. 기준 단위 kg 자체가 kilo 접두어를 가지므로 접두어 단위는 g 기준으로 만든다.

use crate::dimensions::SIDimensions;
use crate::error::Error;
use crate::kind::Relative;
use crate::prefix::SiPrefixes;
use crate::quantity::Quantity;
use crate::unit::{UnitBuilder, UnitSystem};

use super::linear;

quantity_type!(
    /// 질량.
    Mass,
    SIDimensions::MASS,
    register
);

impl Relative for Mass {}

builtin_units!(Mass => {
    KILOGRAM = "kg";
    GRAM = "g";
    MILLIGRAM = "mg";
    TONNE = "t";
    POUND = "lb";
    OUNCE = "oz";
    DALTON = "Da";
});

fn register(q: &Quantity) -> Result<(), Error> {
    let kilogram = UnitBuilder::new(q)
        .id("kg")
        .name("kilogram")
        .unit_system(UnitSystem::SiBase)
        .prefixes(SiPrefixes::Kilo, 1)
        .build()?;
    kilogram.derive_linear(1000.0, "t", "tonne", UnitSystem::Mts)?;
    linear(&kilogram, 0.453_592_37, "lb", "pound", &["lb", "lbs"], UnitSystem::Imperial)?;
    kilogram.derive_linear(0.028_349_523_125, "oz", "ounce", UnitSystem::Imperial)?;
    linear(&kilogram, 1.660_539_066_60e-27, "Da", "dalton", &["Da", "u"], UnitSystem::SiAccepted)?;
    Ok(())
}
