//! 면적.

use crate::dimensions::SIDimensions;
use crate::error::Error;
use crate::kind::Relative;
use crate::prefix::SiPrefixes;
use crate::quantity::Quantity;
use crate::unit::{UnitBuilder, UnitSystem};

use super::linear;

quantity_type!(
    /// 면적.
    Area,
    SIDimensions::LENGTH.pow(2),
    register
);

impl Relative for Area {}

builtin_units!(Area => {
    SQUARE_METER = "m2";
    SQUARE_KILOMETER = "km2";
    SQUARE_CENTIMETER = "cm2";
    SQUARE_MILLIMETER = "mm2";
    HECTARE = "ha";
    ACRE = "ac";
    SQUARE_FOOT = "ft2";
    SQUARE_INCH = "in2";
});

fn register(q: &Quantity) -> Result<(), Error> {
    let square_meter = UnitBuilder::new(q)
        .id("m2")
        .name("square meter")
        .abbreviations(["m2", "m^2"])
        .unit_system(UnitSystem::SiDerived)
        .prefixes(SiPrefixes::Unit, 2)
        .build()?;
    square_meter.derive_linear(1.0e4, "ha", "hectare", UnitSystem::SiAccepted)?;
    square_meter.derive_linear(4_046.856_422_4, "ac", "acre", UnitSystem::Imperial)?;
    linear(&square_meter, 0.092_903_04, "ft2", "square foot", &["ft2", "ft^2"], UnitSystem::Imperial)?;
    linear(&square_meter, 6.4516e-4, "in2", "square inch", &["in2", "in^2"], UnitSystem::Imperial)?;
    linear(&square_meter, 2_589_988.110_336, "mi2", "square mile", &["mi2", "mi^2"], UnitSystem::Imperial)?;
    Ok(())
}
