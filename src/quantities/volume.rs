//! 부피.

use crate::dimensions::SIDimensions;
use crate::error::Error;
use crate::kind::Relative;
use crate::prefix::SiPrefixes;
use crate::quantity::Quantity;
use crate::scale::Scale;
use crate::unit::{UnitBuilder, UnitSystem};

use super::linear;

quantity_type!(
    /// 부피.
    Volume,
    SIDimensions::LENGTH.pow(3),
    register
);

impl Relative for Volume {}

builtin_units!(Volume => {
    CUBIC_METER = "m3";
    CUBIC_CENTIMETER = "cm3";
    LITER = "L";
    MILLILITER = "mL";
    GALLON_US = "gal";
    CUBIC_FOOT = "ft3";
    CUBIC_INCH = "in3";
    BARREL = "bbl";
});

fn register(q: &Quantity) -> Result<(), Error> {
    let cubic_meter = UnitBuilder::new(q)
        .id("m3")
        .name("cubic meter")
        .abbreviations(["m3", "m^3"])
        .unit_system(UnitSystem::SiDerived)
        .prefixes(SiPrefixes::Unit, 3)
        .build()?;
    cubic_meter
        .derive(Scale::linear(1e-3)?)?
        .id("L")
        .name("liter")
        .abbreviations(["L", "l"])
        .unit_system(UnitSystem::SiAccepted)
        .prefixes(SiPrefixes::Unit, 1)
        .build()?;
    cubic_meter.derive_linear(3.785_411_784e-3, "gal", "gallon (US)", UnitSystem::UsCustomary)?;
    linear(&cubic_meter, 0.028_316_846_592, "ft3", "cubic foot", &["ft3", "ft^3"], UnitSystem::Imperial)?;
    linear(&cubic_meter, 1.638_706_4e-5, "in3", "cubic inch", &["in3", "in^3"], UnitSystem::Imperial)?;
    cubic_meter.derive_linear(0.158_987_294_928, "bbl", "barrel", UnitSystem::UsCustomary)?;
    Ok(())
}
