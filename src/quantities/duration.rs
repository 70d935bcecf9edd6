//! 지속시간.

use crate::dimensions::SIDimensions;
use crate::error::Error;
use crate::kind::{RelWithAbs, Relative};
use crate::prefix::SiPrefixes;
use crate::quantity::Quantity;
use crate::unit::{UnitBuilder, UnitSystem};

use super::time::Time;

quantity_type!(
    /// 시간 간격. 절대량 짝은 [`Time`].
    Duration,
    SIDimensions::TIME,
    register
);

impl Relative for Duration {}

impl RelWithAbs for Duration {
    type Abs = Time;
}

builtin_units!(Duration => {
    SECOND = "s";
    MILLISECOND = "ms";
    MICROSECOND = "mus";
    MINUTE = "min";
    HOUR = "h";
    DAY = "day";
    WEEK = "wk";
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
    second.derive_linear(604_800.0, "wk", "week", UnitSystem::Other)?;
    Ok(())
}
