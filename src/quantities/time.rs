//! 시각. 기준 시점으로부터의 절대 시간이며 단위 id는 [`super::duration`]과 같다.

use crate::dimensions::SIDimensions;
use crate::error::Error;
use crate::kind::Absolute;
use crate::prefix::SiPrefixes;
use crate::quantity::Quantity;
use crate::unit::{UnitBuilder, UnitSystem};

use super::duration::Duration;

quantity_type!(
    /// 기준 시점에 대한 시각.
    Time,
    SIDimensions::TIME,
    register
);

impl Absolute for Time {
    type Rel = Duration;
}

builtin_units!(Time => {
    SECOND = "s";
    MINUTE = "min";
    HOUR = "h";
    DAY = "day";
});

fn register(q: &Quantity) -> Result<(), Error> {
    let second = UnitBuilder::new(q)
        .id("s")
        .name("second")
        .abbreviations(["s", "sec"])
        .unit_system(UnitSystem::SiBase)
        .prefixes(SiPrefixes::Unit, 1)
        .build()?;
    second.derive_linear(60.0, "min", "minute", UnitSystem::SiAccepted)?;
    second.derive_linear(3600.0, "h", "hour", UnitSystem::SiAccepted)?;
    second.derive_linear(86_400.0, "day", "day", UnitSystem::SiAccepted)?;
    Ok(())
}
