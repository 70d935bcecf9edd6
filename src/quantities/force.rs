//! 힘.

use crate::dimensions::SIDimensions;
use crate::error::Error;
use crate::kind::Relative;
use crate::prefix::SiPrefixes;
use crate::quantity::Quantity;
use crate::unit::{UnitBuilder, UnitSystem};

quantity_type!(
    /// 힘.
    Force,
    SIDimensions::new([0, 0, 1, 1, -2, 0, 0, 0, 0]),
    register
);

impl Relative for Force {}

builtin_units!(Force => {
    NEWTON = "N";
    KILONEWTON = "kN";
    DYNE = "dyn";
    KILOGRAM_FORCE = "kgf";
    POUND_FORCE = "lbf";
});

fn register(q: &Quantity) -> Result<(), Error> {
    let newton = UnitBuilder::new(q)
        .id("N")
        .name("newton")
        .unit_system(UnitSystem::SiDerived)
        .prefixes(SiPrefixes::Unit, 1)
        .build()?;
    newton.derive_linear(1e-5, "dyn", "dyne", UnitSystem::Cgs)?;
    newton.derive_linear(9.806_65, "kgf", "kilogram-force", UnitSystem::Mts)?;
    newton.derive_linear(4.448_221_615_260_5, "lbf", "pound-force", UnitSystem::Imperial)?;
    Ok(())
}
