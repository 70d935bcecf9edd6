//! 절대온도. 섭씨/화씨는 오프셋 선형 스케일이다.

use crate::dimensions::SIDimensions;
use crate::error::Error;
use crate::kind::Absolute;
use crate::quantity::Quantity;
use crate::scale::Scale;
use crate::unit::{UnitBuilder, UnitSystem};

use super::linear;
use super::temperature::Temperature;

quantity_type!(
    /// 절대온도.
    AbsoluteTemperature,
    SIDimensions::TEMPERATURE,
    register
);

impl Absolute for AbsoluteTemperature {
    type Rel = Temperature;
}

builtin_units!(AbsoluteTemperature => {
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
        .build()?;
    let celsius = kelvin
        .derive(Scale::offset_linear(1.0, 273.15)?)?
        .id("degC")
        .name("degree Celsius")
        .abbreviations(["°C", "degC"])
        .unit_system(UnitSystem::SiDerived)
        .build()?;
    // 섭씨 기준 화씨: C = (F - 32) * 5/9
    celsius
        .derive(Scale::offset_linear(5.0 / 9.0, -32.0)?)?
        .id("degF")
        .name("degree Fahrenheit")
        .abbreviations(["°F", "degF"])
        .unit_system(UnitSystem::Imperial)
        .build()?;
    linear(&kelvin, 5.0 / 9.0, "degR", "degree Rankine", &["°R", "degR"], UnitSystem::Imperial)?;
    Ok(())
}
