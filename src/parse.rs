//! 값+단위 문자열 해석.
//!
//! `"2.0km/h^2"`, `"-8E-3yd"`, `"80 mm"`처럼 앞쪽 수치와 뒤쪽 단위 약어로 나눈다.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::UnitError;

static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?[0-9]*\.?[0-9]+(?:[eE][-+]?[0-9]+)?").expect("숫자 정규식")
});

/// 문자열을 수치와 단위 약어로 나눈다. 단위가 비어 있으면 오류이다.
pub fn split_value_and_unit(text: &str) -> Result<(f64, &str), UnitError> {
    let trimmed = text.trim();
    let parse_error = || UnitError::Parse(text.to_string());
    let number = NUMBER.find(trimmed).ok_or_else(parse_error)?;
    let value: f64 = number.as_str().parse().map_err(|_| parse_error())?;
    if !value.is_finite() {
        return Err(parse_error());
    }
    let unit = trimmed[number.end()..].trim();
    if unit.is_empty() {
        return Err(parse_error());
    }
    Ok((value, unit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_number_and_unit() {
        assert_eq!(split_value_and_unit("2.0km/h^2").unwrap(), (2.0, "km/h^2"));
        assert_eq!(split_value_and_unit("-8E-3yd").unwrap(), (-8e-3, "yd"));
        assert_eq!(split_value_and_unit(" 80 mm ").unwrap(), (80.0, "mm"));
        assert_eq!(split_value_and_unit("0m").unwrap(), (0.0, "m"));
        assert_eq!(split_value_and_unit(".5 s").unwrap(), (0.5, "s"));
    }

    #[test]
    fn rejects_missing_parts() {
        assert!(split_value_and_unit("12").is_err());
        assert!(split_value_and_unit("km").is_err());
        assert!(split_value_and_unit("").is_err());
    }

    #[test]
    fn rejects_non_finite_magnitude() {
        assert_eq!(
            split_value_and_unit("1e400 m"),
            Err(UnitError::Parse("1e400 m".to_string()))
        );
        assert!(split_value_and_unit("-1e309km").is_err());
        assert_eq!(split_value_and_unit("1e308 m").unwrap(), (1e308, "m"));
    }
}
