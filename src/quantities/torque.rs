//! 토크. 차원은 에너지와 같다.

use crate::dimensions::SIDimensions;
use crate::error::Error;
use crate::kind::Relative;
use crate::quantity::Quantity;
use crate::unit::{UnitBuilder, UnitSystem};

use super::linear;

quantity_type!(
    /// 토크.
    Torque,
    SIDimensions::new([0, 0, 1, 2, -2, 0, 0, 0, 0]),
    register
);

impl Relative for Torque {}

builtin_units!(Torque => {
    NEWTON_METER = "N.m";
    KILOGRAM_FORCE_METER = "kgf.m";
    POUND_FOOT = "lbf.ft";
    POUND_INCH = "lbf.in";
});

fn register(q: &Quantity) -> Result<(), Error> {
    let newton_meter = UnitBuilder::new(q)
        .id("N.m")
        .name("newton meter")
        .abbreviations(["N.m", "Nm", "N·m"])
        .unit_system(UnitSystem::SiDerived)
        .build()?;
    linear(
        &newton_meter,
        9.806_65,
        "kgf.m",
        "kilogram-force meter",
        &["kgf.m", "kgfm"],
        UnitSystem::Mts,
    )?;
    linear(
        &newton_meter,
        1.355_817_948_331_400_4,
        "lbf.ft",
        "pound-foot",
        &["lbf.ft", "lbfft"],
        UnitSystem::Imperial,
    )?;
    linear(
        &newton_meter,
        0.112_984_829_027_616_7,
        "lbf.in",
        "pound-inch",
        &["lbf.in", "lbfin"],
        UnitSystem::Imperial,
    )?;
    Ok(())
}
