use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use crate::dimensions::SIDimensions;
use crate::error::UnitError;
use crate::format::render;
use crate::kind::{Absolute, QuantityType, RelWithAbs};
use crate::parse::split_value_and_unit;
use crate::unit::Unit;
use crate::value::Scalar;

/// 기준점이 있는 절대값 (위치, 시각, 절대온도).
///
/// 절대값끼리는 더할 수 없다. 절대값 ± 상대값은 절대값이고, 절대값 − 절대값은 상대값이다.
pub struct AbsScalar<A: Absolute> {
    si: f64,
    display_unit: Unit<A>,
}

impl<A: Absolute> AbsScalar<A> {
    pub fn new(value: f64, unit: &Unit<A>) -> Self {
        AbsScalar {
            si: unit.to_base(value),
            display_unit: unit.clone(),
        }
    }

    pub fn from_si(si: f64, display_unit: &Unit<A>) -> Self {
        AbsScalar {
            si,
            display_unit: display_unit.clone(),
        }
    }

    pub fn parse(text: &str) -> Result<Self, UnitError> {
        let (value, unit) = split_value_and_unit(text)?;
        Ok(Self::new(value, &Unit::of(unit)?))
    }

    pub fn si(&self) -> f64 {
        self.si
    }

    pub fn in_unit(&self) -> f64 {
        self.display_unit.from_base(self.si)
    }

    pub fn in_unit_of(&self, unit: &Unit<A>) -> f64 {
        unit.from_base(self.si)
    }

    pub fn display_unit(&self) -> &Unit<A> {
        &self.display_unit
    }

    pub fn with_display_unit(&self, unit: &Unit<A>) -> Self {
        Self::from_si(self.si, unit)
    }

    pub fn dimensions(&self) -> SIDimensions {
        self.display_unit.dimensions()
    }

    /// 표시 단위와 id가 같은 상대 단위, 없으면 상대 물리량의 표준 단위.
    pub fn relative_unit(&self) -> Unit<A::Rel> {
        Unit::<A::Rel>::by_id(self.display_unit.id())
            .unwrap_or_else(<A::Rel as QuantityType>::standard_unit)
    }

    /// 상대값만큼 옮긴다.
    pub fn plus(&self, offset: &Scalar<A::Rel>) -> Self {
        Self::from_si(self.si + offset.si(), &self.display_unit)
    }

    pub fn minus_rel(&self, offset: &Scalar<A::Rel>) -> Self {
        Self::from_si(self.si - offset.si(), &self.display_unit)
    }

    /// 두 절대값 사이의 간격. 표시 단위는 [`AbsScalar::relative_unit`]이다.
    pub fn minus(&self, other: &Self) -> Scalar<A::Rel> {
        Scalar::from_si(self.si - other.si, &self.relative_unit())
    }

    pub fn to_string_with(&self, verbose: bool, with_unit: bool) -> String {
        let body = render(self.in_unit(), &self.display_unit, with_unit);
        if verbose {
            format!("Abs {} {body}", A::NAME)
        } else {
            body
        }
    }
}

impl<A: Absolute> Clone for AbsScalar<A> {
    fn clone(&self) -> Self {
        Self::from_si(self.si, &self.display_unit)
    }
}

impl<A: Absolute> fmt::Debug for AbsScalar<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AbsScalar")
            .field("kind", &A::NAME)
            .field("si", &self.si)
            .field("unit", &self.display_unit.id())
            .finish()
    }
}

impl<A: Absolute> fmt::Display for AbsScalar<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(false, true))
    }
}

impl<A: Absolute> FromStr for AbsScalar<A> {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<A: Absolute> PartialEq for AbsScalar<A> {
    fn eq(&self, other: &Self) -> bool {
        self.si == other.si
    }
}

impl<A: Absolute> PartialOrd for AbsScalar<A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.si.partial_cmp(&other.si)
    }
}

impl<A: Absolute> Add<Scalar<A::Rel>> for AbsScalar<A> {
    type Output = AbsScalar<A>;

    fn add(self, rhs: Scalar<A::Rel>) -> AbsScalar<A> {
        self.plus(&rhs)
    }
}

impl<A: Absolute> Sub<Scalar<A::Rel>> for AbsScalar<A> {
    type Output = AbsScalar<A>;

    fn sub(self, rhs: Scalar<A::Rel>) -> AbsScalar<A> {
        self.minus_rel(&rhs)
    }
}

impl<A: Absolute> Sub for AbsScalar<A> {
    type Output = Scalar<A::Rel>;

    fn sub(self, rhs: AbsScalar<A>) -> Scalar<A::Rel> {
        self.minus(&rhs)
    }
}

/// 상대값 + 절대값. 결과는 절대값의 표시 단위를 따른다.
impl<R: RelWithAbs> Add<AbsScalar<R::Abs>> for Scalar<R> {
    type Output = AbsScalar<R::Abs>;

    fn add(self, rhs: AbsScalar<R::Abs>) -> AbsScalar<R::Abs> {
        AbsScalar::from_si(self.si() + rhs.si, &rhs.display_unit)
    }
}

#[cfg(test)]
mod tests {
    use crate::quantities::{absolute_temperature, temperature, AbsoluteTemperature};

    #[test]
    fn interval_between_temperatures() {
        let boiling = absolute_temperature::DEGREE_CELSIUS.absolute(100.0);
        let freezing = absolute_temperature::DEGREE_CELSIUS.absolute(0.0);
        let span = boiling.minus(&freezing);
        assert!((span.si() - 100.0).abs() < 1e-9);
        assert_eq!(span.display_unit().id(), "degC");

        let warmer = freezing.clone() + temperature::DEGREE_FAHRENHEIT.scalar(18.0);
        assert!((warmer.in_unit() - 10.0).abs() < 1e-9);
        assert!(warmer > freezing);
    }

    #[test]
    fn parse_absolute() {
        let t: super::AbsScalar<AbsoluteTemperature> = "32 degF".parse().unwrap();
        assert!((t.si() - 273.15).abs() < 1e-9);
        assert_eq!(t.to_string_with(true, true), "Abs AbsoluteTemperature 32.000°F");
    }
}
