use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use crate::dimensions::SIDimensions;
use crate::error::UnitError;
use crate::format::render;
use crate::kind::{check_cast, DisplayUnit, Kind, QuantityType, Relative, SI};
use crate::parse::split_value_and_unit;
use crate::quantity::{Quantities, Quantity};
use crate::unit::{SIUnit, Unit};

/// 단일 값. 내부에는 SI 값을 보관하고 표시 단위는 출력과 단위 환산에만 쓴다.
///
/// ```
/// use dimunits::prelude::*;
/// use dimunits::quantities::length;
///
/// let total = length::KILOMETER.scalar(123.0) + length::MILE.scalar(250.0);
/// assert!((total.si() - 525_336.0).abs() < 1e-6);
/// assert_eq!(total.to_string(), "525.336km");
/// ```
pub struct Scalar<K: Kind> {
    si: f64,
    display_unit: K::Unit,
}

impl<K: Kind> Scalar<K> {
    /// 단위 `unit`으로 표현한 값 `value`.
    pub fn new(value: f64, unit: &K::Unit) -> Self {
        Scalar {
            si: unit.any().to_base(value),
            display_unit: unit.clone(),
        }
    }

    /// SI 값과 표시 단위로 만든다.
    pub fn from_si(si: f64, display_unit: &K::Unit) -> Self {
        Scalar {
            si,
            display_unit: display_unit.clone(),
        }
    }

    /// `"80 mm"` 같은 문자열을 해석한다.
    pub fn parse(text: &str) -> Result<Self, UnitError> {
        let (value, unit) = split_value_and_unit(text)?;
        Ok(Self::new(value, &K::Unit::parse_abbreviation(unit)?))
    }

    /// 값과 단위 약어로 만든다.
    pub fn of(value: f64, unit: &str) -> Result<Self, UnitError> {
        Ok(Self::new(value, &K::Unit::parse_abbreviation(unit)?))
    }

    pub fn si(&self) -> f64 {
        self.si
    }

    /// 표시 단위로 환산한 값.
    pub fn in_unit(&self) -> f64 {
        self.display_unit.any().from_base(self.si)
    }

    pub fn in_unit_of(&self, unit: &K::Unit) -> f64 {
        unit.any().from_base(self.si)
    }

    pub fn display_unit(&self) -> &K::Unit {
        &self.display_unit
    }

    /// 같은 값을 다른 표시 단위로.
    pub fn with_display_unit(&self, unit: &K::Unit) -> Self {
        Self::from_si(self.si, unit)
    }

    pub fn dimensions(&self) -> SIDimensions {
        self.display_unit.any().dimensions()
    }

    /// 물리량을 지운 SI 값.
    pub fn to_si_scalar(&self) -> Scalar<SI> {
        Scalar::from_si(self.si, &SIUnit::of(self.dimensions()))
    }

    /// 무차원 계수를 곱한다. 표시 단위는 유지한다.
    pub fn times_factor(&self, factor: f64) -> Self {
        Self::from_si(self.si * factor, &self.display_unit)
    }

    pub fn divide_by_factor(&self, factor: f64) -> Self {
        Self::from_si(self.si / factor, &self.display_unit)
    }

    pub fn abs(&self) -> Self {
        Self::from_si(self.si.abs(), &self.display_unit)
    }

    pub fn neg(&self) -> Self {
        Self::from_si(-self.si, &self.display_unit)
    }

    /// 표시 단위 기준 올림.
    pub fn ceil(&self) -> Self {
        Self::new(self.in_unit().ceil(), &self.display_unit)
    }

    /// 표시 단위 기준 내림.
    pub fn floor(&self) -> Self {
        Self::new(self.in_unit().floor(), &self.display_unit)
    }

    /// 표시 단위 기준 가장 가까운 정수 (반올림 짝수).
    pub fn rint(&self) -> Self {
        Self::new(self.in_unit().round_ties_even(), &self.display_unit)
    }

    /// 다른 단위로 환산해 쓴다.
    pub fn to_string_in(&self, unit: &K::Unit) -> String {
        render(self.in_unit_of(unit), unit.any(), true)
    }

    /// `verbose`면 종류를 앞에 붙이고, `with_unit`이 false면 수치만 쓴다.
    pub fn to_string_with(&self, verbose: bool, with_unit: bool) -> String {
        let body = render(self.in_unit(), self.display_unit.any(), with_unit);
        if verbose {
            format!("Rel {} {body}", K::NAME)
        } else {
            body
        }
    }
}

impl<K: Relative> Scalar<K> {
    fn check_same_dimensions(&self, other: &Self) -> Result<(), UnitError> {
        if self.dimensions() != other.dimensions() {
            return Err(UnitError::DimensionMismatch {
                target: K::NAME.to_string(),
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        Ok(())
    }

    /// 합. 결과는 왼쪽 값의 표시 단위를 따른다.
    pub fn plus(&self, other: &Self) -> Result<Self, UnitError> {
        self.check_same_dimensions(other)?;
        Ok(Self::from_si(self.si + other.si, &self.display_unit))
    }

    pub fn minus(&self, other: &Self) -> Result<Self, UnitError> {
        self.check_same_dimensions(other)?;
        Ok(Self::from_si(self.si - other.si, &self.display_unit))
    }

    /// 두 값의 곱. 차원은 더해진다. 절대값은 곱할 수 없다.
    ///
    /// ```compile_fail
    /// use dimunits::prelude::*;
    /// use dimunits::quantities::{position, Position};
    ///
    /// let p = Scalar::<Position>::new(2.0, &position::METER);
    /// let _area = p.clone() * p;
    /// ```
    pub fn times<K2: Relative>(&self, other: &Scalar<K2>) -> Scalar<SI> {
        let dims = self.dimensions().plus(&other.dimensions());
        Scalar::from_si(self.si * other.si, &SIUnit::of(dims))
    }

    /// 두 값의 몫. 차원은 빼진다.
    pub fn divide<K2: Relative>(&self, other: &Scalar<K2>) -> Scalar<SI> {
        let dims = self.dimensions().minus(&other.dimensions());
        Scalar::from_si(self.si / other.si, &SIUnit::of(dims))
    }

    pub fn reciprocal(&self) -> Scalar<SI> {
        Scalar::from_si(1.0 / self.si, &SIUnit::of(self.dimensions().invert()))
    }
}

impl Scalar<SI> {
    /// 차원과 SI 값으로 만든다.
    pub fn from_si_dimensions(si: f64, dimensions: SIDimensions) -> Self {
        Self::from_si(si, &SIUnit::of(dimensions))
    }

    /// 물리량 `Q`로 캐스트한다. 차원이 정확히 같아야 하며, 표시 단위는 `Q`의 표준 단위이다.
    pub fn as_quantity<Q: QuantityType>(&self) -> Result<Scalar<Q>, UnitError> {
        check_cast::<Q>(self.dimensions())?;
        Ok(Scalar::from_si(self.si, &Q::try_standard_unit()?))
    }

    /// 물리량 `Q`로 캐스트하고 표시 단위를 정한다.
    pub fn as_quantity_in<Q: QuantityType>(&self, unit: &Unit<Q>) -> Result<Scalar<Q>, UnitError> {
        check_cast::<Q>(self.dimensions())?;
        Ok(Scalar::from_si(self.si, unit))
    }

    /// 이 값의 차원을 가지는 등록된 물리량들.
    pub fn quantities(&self) -> Vec<Quantity> {
        Quantities::quantities_for(self.dimensions())
    }
}

impl<K: Kind> Clone for Scalar<K> {
    fn clone(&self) -> Self {
        Self::from_si(self.si, &self.display_unit)
    }
}

impl<K: Kind> fmt::Debug for Scalar<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scalar")
            .field("kind", &K::NAME)
            .field("si", &self.si)
            .field("unit", &self.display_unit.any().id())
            .finish()
    }
}

impl<K: Kind> fmt::Display for Scalar<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(false, true))
    }
}

impl<K: Kind> FromStr for Scalar<K> {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// SI 값과 차원이 같으면 같다. 표시 단위는 보지 않는다.
impl<K: Kind> PartialEq for Scalar<K> {
    fn eq(&self, other: &Self) -> bool {
        self.si == other.si && self.dimensions() == other.dimensions()
    }
}

impl<K: Kind> PartialOrd for Scalar<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.dimensions() != other.dimensions() {
            return None;
        }
        self.si.partial_cmp(&other.si)
    }
}

impl<Q: QuantityType + Relative> Add for Scalar<Q> {
    type Output = Scalar<Q>;

    fn add(self, rhs: Scalar<Q>) -> Scalar<Q> {
        Scalar::from_si(self.si + rhs.si, &self.display_unit)
    }
}

impl<'a, Q: QuantityType + Relative> Add<&'a Scalar<Q>> for &'a Scalar<Q> {
    type Output = Scalar<Q>;

    fn add(self, rhs: &'a Scalar<Q>) -> Scalar<Q> {
        Scalar::from_si(self.si + rhs.si, &self.display_unit)
    }
}

impl<Q: QuantityType + Relative> Sub for Scalar<Q> {
    type Output = Scalar<Q>;

    fn sub(self, rhs: Scalar<Q>) -> Scalar<Q> {
        Scalar::from_si(self.si - rhs.si, &self.display_unit)
    }
}

impl<'a, Q: QuantityType + Relative> Sub<&'a Scalar<Q>> for &'a Scalar<Q> {
    type Output = Scalar<Q>;

    fn sub(self, rhs: &'a Scalar<Q>) -> Scalar<Q> {
        Scalar::from_si(self.si - rhs.si, &self.display_unit)
    }
}

impl<K: Kind> Mul<f64> for Scalar<K> {
    type Output = Scalar<K>;

    fn mul(self, rhs: f64) -> Scalar<K> {
        self.times_factor(rhs)
    }
}

impl<K: Kind> Div<f64> for Scalar<K> {
    type Output = Scalar<K>;

    fn div(self, rhs: f64) -> Scalar<K> {
        self.divide_by_factor(rhs)
    }
}

impl<K1: Relative, K2: Relative> Mul<Scalar<K2>> for Scalar<K1> {
    type Output = Scalar<SI>;

    fn mul(self, rhs: Scalar<K2>) -> Scalar<SI> {
        self.times(&rhs)
    }
}

impl<K1: Relative, K2: Relative> Div<Scalar<K2>> for Scalar<K1> {
    type Output = Scalar<SI>;

    fn div(self, rhs: Scalar<K2>) -> Scalar<SI> {
        self.divide(&rhs)
    }
}

impl<K: Kind> Neg for Scalar<K> {
    type Output = Scalar<K>;

    fn neg(self) -> Scalar<K> {
        Scalar::from_si(-self.si, &self.display_unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantities::{length, speed, Length};

    #[test]
    fn rounding_uses_display_unit() {
        let x = length::KILOMETER.scalar(1.4);
        assert_eq!(x.ceil().si(), 2000.0);
        assert_eq!(x.floor().si(), 1000.0);
        assert_eq!(x.rint().si(), 1000.0);
        assert_eq!(length::KILOMETER.scalar(2.5).rint().si(), 2000.0);
        assert_eq!((-x.clone()).abs(), x);
    }

    #[test]
    fn comparison_needs_same_dimensions() {
        let a = length::METER.scalar(2.0).to_si_scalar();
        let b = speed::METER_PER_SECOND.scalar(2.0).to_si_scalar();
        assert_ne!(a, b);
        assert_eq!(a.partial_cmp(&b), None);
        assert!(length::METER.scalar(1.0) < length::FOOT.scalar(4.0));
    }

    #[test]
    fn display_unit_does_not_change_value() {
        let x = Scalar::<Length>::of(3.0, "ft").unwrap();
        let y = x.with_display_unit(&length::METER);
        assert_eq!(x, y);
        assert_eq!(y.to_string(), "0.914m");
        assert_eq!(x.to_string_with(true, false), "Rel Length 3.000");
        assert_eq!(y.to_string_in(&length::INCH), "36.000in");
    }

    #[test]
    fn cast_to_wrong_quantity_fails() {
        let x = length::METER.scalar(2.0).to_si_scalar();
        assert!(x.as_quantity::<Length>().is_ok());
        assert!(matches!(
            x.as_quantity::<crate::quantities::Mass>(),
            Err(UnitError::DimensionMismatch { .. })
        ));
    }
}
