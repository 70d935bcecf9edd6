//! SI 기본 차원 지수 벡터.
//!
//! 순서는 각도, 입체각, 질량, 길이, 시간, 전류, 온도, 물질량, 광도이다. 두 값은 모든 지수가
//! 같을 때만 같다. 곱셈은 지수 덧셈([`SIDimensions::plus`]), 나눗셈은 지수 뺄셈
//! ([`SIDimensions::minus`])에 대응한다.

use std::fmt;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnitError;

/// 기본 차원 수.
pub const NUMBER_DIMENSIONS: usize = 9;

/// 기본 차원의 SI 기호. 지수 벡터와 같은 순서이다.
pub const SI_ABBREVIATIONS: [&str; NUMBER_DIMENSIONS] =
    ["rad", "sr", "kg", "m", "s", "A", "K", "mol", "cd"];

// 최장 일치를 위해 길이 순으로 정렬한 해석용 기호 표
const PARSE_ORDER: [(&str, BaseDimension); NUMBER_DIMENSIONS] = [
    ("rad", BaseDimension::Angle),
    ("mol", BaseDimension::Amount),
    ("sr", BaseDimension::SolidAngle),
    ("kg", BaseDimension::Mass),
    ("cd", BaseDimension::LuminousIntensity),
    ("m", BaseDimension::Length),
    ("s", BaseDimension::Time),
    ("A", BaseDimension::Current),
    ("K", BaseDimension::Temperature),
];

/// SI 기본 차원.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseDimension {
    Angle = 0,
    SolidAngle = 1,
    Mass = 2,
    Length = 3,
    Time = 4,
    Current = 5,
    Temperature = 6,
    Amount = 7,
    LuminousIntensity = 8,
}

impl BaseDimension {
    pub const ALL: [BaseDimension; NUMBER_DIMENSIONS] = [
        BaseDimension::Angle,
        BaseDimension::SolidAngle,
        BaseDimension::Mass,
        BaseDimension::Length,
        BaseDimension::Time,
        BaseDimension::Current,
        BaseDimension::Temperature,
        BaseDimension::Amount,
        BaseDimension::LuminousIntensity,
    ];

    pub const fn symbol(self) -> &'static str {
        SI_ABBREVIATIONS[self as usize]
    }
}

/// 물리 차원 지문. 불변 값이다.
///
/// 지수 연산은 `i32` 범위에서 포화한다. 문자열 해석은 범위를 넘으면 오류를 낸다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SIDimensions {
    exponents: [i32; NUMBER_DIMENSIONS],
}

impl SIDimensions {
    pub const DIMENSIONLESS: SIDimensions = SIDimensions::new([0; NUMBER_DIMENSIONS]);
    pub const ANGLE: SIDimensions = SIDimensions::base(BaseDimension::Angle);
    pub const SOLID_ANGLE: SIDimensions = SIDimensions::base(BaseDimension::SolidAngle);
    pub const MASS: SIDimensions = SIDimensions::base(BaseDimension::Mass);
    pub const LENGTH: SIDimensions = SIDimensions::base(BaseDimension::Length);
    pub const TIME: SIDimensions = SIDimensions::base(BaseDimension::Time);
    pub const CURRENT: SIDimensions = SIDimensions::base(BaseDimension::Current);
    pub const TEMPERATURE: SIDimensions = SIDimensions::base(BaseDimension::Temperature);
    pub const AMOUNT: SIDimensions = SIDimensions::base(BaseDimension::Amount);
    pub const LUMINOUS_INTENSITY: SIDimensions =
        SIDimensions::base(BaseDimension::LuminousIntensity);

    pub const fn new(exponents: [i32; NUMBER_DIMENSIONS]) -> Self {
        Self { exponents }
    }

    /// 한 기본 차원의 1제곱.
    pub const fn base(dimension: BaseDimension) -> Self {
        let mut exponents = [0; NUMBER_DIMENSIONS];
        exponents[dimension as usize] = 1;
        Self { exponents }
    }

    pub const fn exponents(&self) -> [i32; NUMBER_DIMENSIONS] {
        self.exponents
    }

    pub const fn exponent(&self, dimension: BaseDimension) -> i32 {
        self.exponents[dimension as usize]
    }

    pub const fn is_dimensionless(&self) -> bool {
        let mut i = 0;
        while i < NUMBER_DIMENSIONS {
            if self.exponents[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }

    /// 곱의 차원(지수 덧셈).
    pub const fn plus(&self, other: &SIDimensions) -> SIDimensions {
        let mut exponents = [0; NUMBER_DIMENSIONS];
        let mut i = 0;
        while i < NUMBER_DIMENSIONS {
            exponents[i] = self.exponents[i].saturating_add(other.exponents[i]);
            i += 1;
        }
        SIDimensions { exponents }
    }

    /// 몫의 차원(지수 뺄셈).
    pub const fn minus(&self, other: &SIDimensions) -> SIDimensions {
        let mut exponents = [0; NUMBER_DIMENSIONS];
        let mut i = 0;
        while i < NUMBER_DIMENSIONS {
            exponents[i] = self.exponents[i].saturating_sub(other.exponents[i]);
            i += 1;
        }
        SIDimensions { exponents }
    }

    /// 거듭제곱의 차원.
    pub const fn pow(&self, power: i32) -> SIDimensions {
        let mut exponents = [0; NUMBER_DIMENSIONS];
        let mut i = 0;
        while i < NUMBER_DIMENSIONS {
            exponents[i] = self.exponents[i].saturating_mul(power);
            i += 1;
        }
        SIDimensions { exponents }
    }

    /// 역수의 차원.
    pub const fn invert(&self) -> SIDimensions {
        self.pow(-1)
    }

    /// 구분자와 지수 표기를 지정해 문자열로 만든다.
    ///
    /// `divided`가 true면 음의 지수를 `/` 뒤에 모으고, false면 음의 지수를 그대로 적는다.
    /// 예: `(true, "", "")` → `kgm2/s2`, `(true, ".", "^")` → `kg.m^2/s^2`,
    /// `(false, "", "")` → `kgm2s-2`.
    pub fn to_string_with(&self, divided: bool, separator: &str, power_prefix: &str) -> String {
        let render = |parts: &mut Vec<String>, dim: BaseDimension, exp: i32| {
            if exp == 1 {
                parts.push(dim.symbol().to_string());
            } else {
                parts.push(format!("{}{power_prefix}{exp}", dim.symbol()));
            }
        };
        let mut numerator = Vec::new();
        let mut denominator = Vec::new();
        for dim in BaseDimension::ALL {
            let exp = self.exponent(dim);
            if exp > 0 || (exp < 0 && !divided) {
                render(&mut numerator, dim, exp);
            } else if exp < 0 {
                render(&mut denominator, dim, -exp);
            }
        }
        let mut out = if numerator.is_empty() {
            "1".to_string()
        } else {
            numerator.join(separator)
        };
        if !denominator.is_empty() {
            out.push('/');
            out.push_str(&denominator.join(separator));
        }
        out
    }
}

impl fmt::Display for SIDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(true, "", ""))
    }
}

impl Add for SIDimensions {
    type Output = SIDimensions;

    fn add(self, rhs: SIDimensions) -> SIDimensions {
        self.plus(&rhs)
    }
}

impl Sub for SIDimensions {
    type Output = SIDimensions;

    fn sub(self, rhs: SIDimensions) -> SIDimensions {
        self.minus(&rhs)
    }
}

impl Neg for SIDimensions {
    type Output = SIDimensions;

    fn neg(self) -> SIDimensions {
        self.invert()
    }
}

fn invalid(text: &str, reason: &'static str) -> UnitError {
    UnitError::InvalidDimensions {
        text: text.to_string(),
        reason,
    }
}

// 분자 또는 분모 한 쪽을 해석해 sign 방향으로 지수를 누적한다.
fn parse_part(
    text: &str,
    part: &str,
    sign: i32,
    exponents: &mut [i32; NUMBER_DIMENSIONS],
) -> Result<(), UnitError> {
    if part == "1" {
        return Ok(());
    }
    if part.is_empty() {
        return Err(invalid(text, "빈 항"));
    }
    let mut rest = part;
    while !rest.is_empty() {
        rest = rest.trim_start_matches(['.', '·', '*']);
        if rest.is_empty() {
            break;
        }
        let Some((symbol, dim)) = PARSE_ORDER.iter().find(|(s, _)| rest.starts_with(*s)) else {
            return Err(invalid(text, "알 수 없는 기호"));
        };
        rest = &rest[symbol.len()..];
        rest = rest.strip_prefix('^').unwrap_or(rest);
        let digits_end = rest
            .char_indices()
            .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && c == '-')))
            .map_or(rest.len(), |(i, _)| i);
        let exponent = match &rest[..digits_end] {
            "" => 1,
            "-" => return Err(invalid(text, "지수 누락")),
            digits => digits
                .parse::<i32>()
                .map_err(|_| invalid(text, "잘못된 지수"))?,
        };
        let current = exponents[*dim as usize];
        exponents[*dim as usize] = exponent
            .checked_mul(sign)
            .and_then(|delta| current.checked_add(delta))
            .ok_or_else(|| invalid(text, "지수 범위 초과"))?;
        rest = &rest[digits_end..];
    }
    Ok(())
}

impl FromStr for SIDimensions {
    type Err = UnitError;

    /// `kgm2/s2`, `kg.m^2/s^2`, `1/s`, `m.s-2`, `1` 형태를 해석한다.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return Err(invalid(text, "빈 문자열"));
        }
        let mut exponents = [0; NUMBER_DIMENSIONS];
        let mut parts = compact.split('/');
        let numerator = parts.next().unwrap_or_default();
        parse_part(text, numerator, 1, &mut exponents)?;
        if let Some(denominator) = parts.next() {
            parse_part(text, denominator, -1, &mut exponents)?;
        }
        if parts.next().is_some() {
            return Err(invalid(text, "'/'는 한 번만 쓸 수 있음"));
        }
        Ok(SIDimensions { exponents })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENERGY: SIDimensions = SIDimensions::MASS
        .plus(&SIDimensions::LENGTH.pow(2))
        .minus(&SIDimensions::TIME.pow(2));

    #[test]
    fn parses_common_signatures() {
        assert_eq!("kgm2/s2".parse::<SIDimensions>().unwrap(), ENERGY);
        assert_eq!("kg.m^2/s^2".parse::<SIDimensions>().unwrap(), ENERGY);
        assert_eq!("kgm2s-2".parse::<SIDimensions>().unwrap(), ENERGY);
        assert_eq!(
            "1/s".parse::<SIDimensions>().unwrap(),
            SIDimensions::TIME.invert()
        );
        assert_eq!(
            "1".parse::<SIDimensions>().unwrap(),
            SIDimensions::DIMENSIONLESS
        );
        assert_eq!(
            "mol/m3".parse::<SIDimensions>().unwrap(),
            SIDimensions::AMOUNT.minus(&SIDimensions::LENGTH.pow(3))
        );
        assert_eq!(
            "cd.sr".parse::<SIDimensions>().unwrap(),
            SIDimensions::LUMINOUS_INTENSITY.plus(&SIDimensions::SOLID_ANGLE)
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!("".parse::<SIDimensions>().is_err());
        assert!("km/h".parse::<SIDimensions>().is_err());
        assert!("m/s/s".parse::<SIDimensions>().is_err());
        assert!("m^-".parse::<SIDimensions>().is_err());
        assert!("/s".parse::<SIDimensions>().is_err());
    }

    #[test]
    fn exponent_overflow_is_an_error() {
        let err = "m2147483647m1".parse::<SIDimensions>().unwrap_err();
        assert!(matches!(
            err,
            UnitError::InvalidDimensions { reason: "지수 범위 초과", .. }
        ));
        assert!("1/m-2147483648".parse::<SIDimensions>().is_err());
        assert!("m99999999999".parse::<SIDimensions>().is_err());
        assert_eq!(
            "m2147483647".parse::<SIDimensions>().unwrap().exponent(BaseDimension::Length),
            i32::MAX
        );
    }

    #[test]
    fn group_operations_saturate() {
        let huge = SIDimensions::LENGTH.pow(i32::MAX);
        assert_eq!((huge + SIDimensions::LENGTH).exponent(BaseDimension::Length), i32::MAX);
        assert_eq!(huge.pow(2).exponent(BaseDimension::Length), i32::MAX);
    }

    #[test]
    fn display_forms() {
        assert_eq!(ENERGY.to_string(), "kgm2/s2");
        assert_eq!(ENERGY.to_string_with(true, ".", "^"), "kg.m^2/s^2");
        assert_eq!(ENERGY.to_string_with(false, "", ""), "kgm2s-2");
        assert_eq!(SIDimensions::TIME.invert().to_string(), "1/s");
        assert_eq!(SIDimensions::DIMENSIONLESS.to_string(), "1");
    }

    #[test]
    fn group_operations() {
        let speed = SIDimensions::LENGTH - SIDimensions::TIME;
        assert_eq!(speed + SIDimensions::TIME, SIDimensions::LENGTH);
        assert_eq!(-(-speed), speed);
        assert!((speed - speed).is_dimensionless());
    }
}
