//! 온도차. 절대온도와 달리 오프셋 없이 크기만 환산한다.

use crate::dimensions::SIDimensions;
use crate::error::Error;
use crate::kind::{RelWithAbs, Relative};
use crate::prefix::SiPrefixes;
use crate::quantity::Quantity;
use crate::unit::{UnitBuilder, UnitSystem};

use super::absolute_temperature::AbsoluteTemperature;
use super::linear;

quantity_type!(
    /// 온도차. 절대량 짝은 [`AbsoluteTemperature`].
    Temperature,
    SIDimensions::TEMPERATURE,
    register
);

impl Relative for Temperature {}

impl RelWithAbs for Temperature {
    type Abs = AbsoluteTemperature;
}

builtin_units!(Temperature => {
    KELVIN = "K";
    DEGREE_CELSIUS = "degC";
    DEGREE_FAHRENHEIT = "degF";
    DEGREE_RANKINE = "degR";
});

fn register(q: &Quantity) -> Result<(), Error> {
    let kelvin = UnitBuilder::new(q)
        .id("K")
        .name("kelvin")
        .unit_system(UnitSystem::SiBase)
        .prefixes(SiPrefixes::Unit, 1)
        .build()?;
    linear(&kelvin, 1.0, "degC", "degree Celsius", &["°C", "degC"], UnitSystem::SiDerived)?;
    linear(&kelvin, 5.0 / 9.0, "degF", "degree Fahrenheit", &["°F", "degF"], UnitSystem::Imperial)?;
    linear(&kelvin, 5.0 / 9.0, "degR", "degree Rankine", &["°R", "degR"], UnitSystem::Imperial)?;
    Ok(())
}
