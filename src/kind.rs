//! 값의 종류(물리량)를 타입 수준에서 나타내는 트레이트들.
//!
//! 각 물리량은 값이 없는 표식 타입(`pub enum Length {}`)이며, [`Kind::Unit`]으로 표시 단위
//! 타입을 정한다. 이름 있는 물리량은 [`Unit<Q>`]를, 차원만 남은 값([`SI`])은 [`SIUnit`]을 쓴다.

use std::fmt;

use crate::dimensions::SIDimensions;
use crate::error::UnitError;
use crate::quantity::Quantity;
use crate::unit::{AnyUnit, SIUnit, Unit};

/// 값의 표시 단위로 쓸 수 있는 타입.
pub trait DisplayUnit: Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
    fn any(&self) -> &AnyUnit;

    /// 약어 문자열을 이 종류의 단위로 해석한다.
    fn parse_abbreviation(text: &str) -> Result<Self, UnitError>;
}

/// 값의 종류.
pub trait Kind: Sized + 'static {
    const NAME: &'static str;
    type Unit: DisplayUnit;
}

/// 이름 있는 물리량.
pub trait QuantityType: Kind<Unit = Unit<Self>> {
    /// 전역 레지스트리의 물리량. 첫 호출 때 내장 단위가 등록된다.
    fn quantity() -> &'static Quantity;

    fn dimensions() -> SIDimensions {
        Self::quantity().dimensions()
    }

    /// 표준 단위. 단위가 하나도 없으면 [`UnitError::NoStandardUnit`].
    fn try_standard_unit() -> Result<Unit<Self>, UnitError> {
        Self::quantity()
            .standard_unit()
            .map(Unit::wrap)
            .ok_or_else(|| UnitError::NoStandardUnit(Self::NAME.to_string()))
    }

    /// 표준 단위.
    ///
    /// # Panics
    ///
    /// 단위가 하나도 등록되지 않은 물리량이면 패닉한다. 내장 물리량은 초기화 시 이를 검사한다.
    fn standard_unit() -> Unit<Self> {
        match Self::try_standard_unit() {
            Ok(unit) => unit,
            Err(err) => panic!("{err}"),
        }
    }
}

/// 합과 차가 의미를 가지는 상대량 (길이, 지속시간, 온도차 등).
pub trait Relative: Kind {}

/// 기준점이 있는 절대량 (위치, 시각, 절대온도 등).
pub trait Absolute: QuantityType {
    type Rel: Relative + QuantityType;
}

/// 절대량 짝이 있는 상대량.
pub trait RelWithAbs: Relative + QuantityType {
    type Abs: Absolute;
}

/// 차원만 남은 값의 종류. 서로 다른 물리량끼리 곱하거나 나눈 결과가 이 종류가 된다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SI {}

impl Kind for SI {
    const NAME: &'static str = "SI";
    type Unit = SIUnit;
}

impl Relative for SI {}

impl<Q: QuantityType> DisplayUnit for Unit<Q> {
    fn any(&self) -> &AnyUnit {
        self
    }

    fn parse_abbreviation(text: &str) -> Result<Self, UnitError> {
        Unit::of(text)
    }
}

impl DisplayUnit for SIUnit {
    fn any(&self) -> &AnyUnit {
        self
    }

    fn parse_abbreviation(text: &str) -> Result<Self, UnitError> {
        Ok(SIUnit::of(text.parse()?))
    }
}

/// 차원 `actual`인 값을 물리량 `Q`로 볼 수 있는지 검사한다. 차원이 정확히 같아야 한다.
pub(crate) fn check_cast<Q: QuantityType>(actual: SIDimensions) -> Result<(), UnitError> {
    let expected = Q::dimensions();
    if expected == actual {
        Ok(())
    } else {
        Err(UnitError::DimensionMismatch {
            target: Q::NAME.to_string(),
            expected,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use super::*;

    // 단위를 하나도 등록하지 않은 물리량
    enum Bare {}

    impl Kind for Bare {
        const NAME: &'static str = "Bare";
        type Unit = Unit<Bare>;
    }

    impl QuantityType for Bare {
        fn quantity() -> &'static Quantity {
            static QUANTITY: LazyLock<Quantity> = LazyLock::new(|| {
                Quantity::new("KindBare", SIDimensions::LUMINOUS_INTENSITY.pow(7))
            });
            &QUANTITY
        }
    }

    #[test]
    fn missing_standard_unit_is_an_error() {
        assert_eq!(
            Bare::try_standard_unit().unwrap_err(),
            UnitError::NoStandardUnit("Bare".to_string())
        );
        let value = crate::value::Scalar::<SI>::from_si_dimensions(
            1.0,
            SIDimensions::LUMINOUS_INTENSITY.pow(7),
        );
        assert_eq!(
            value.as_quantity::<Bare>().unwrap_err(),
            UnitError::NoStandardUnit("Bare".to_string())
        );
    }
}
