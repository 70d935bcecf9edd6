//! 값의 문자열 표현.

use crate::unit::AnyUnit;

/// 표시용 수치 형식.
///
/// 0 이거나 절대값이 [1e-3, 1e7) 범위이면 소수점 3자리 고정 표기, 그 밖에는 지수 표기를 쓴다.
pub fn format_value(value: f64) -> String {
    let magnitude = value.abs();
    if value == 0.0 || (1e-3..1e7).contains(&magnitude) {
        format!("{value:.3}")
    } else {
        format!("{value:.3e}")
    }
}

/// 수치 표현 뒤에 표시 약어를 공백 없이 붙인다. 스칼라, 벡터, 행렬이 모두 이 형식을 쓴다.
pub(crate) fn attach_unit(body: String, unit: &AnyUnit) -> String {
    body + unit.default_display_abbreviation()
}

/// 단위로 환산된 값을 표시 약어와 함께 쓴다 (`525.336km`).
pub(crate) fn render(value_in_unit: f64, unit: &AnyUnit, with_unit: bool) -> String {
    let number = format_value(value_in_unit);
    if with_unit {
        attach_unit(number, unit)
    } else {
        number
    }
}

/// 여러 값을 `[a, b, c]` 형태로 쓴다.
pub(crate) fn render_list(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| format_value(*v)).collect();
    format!("[{}]", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_and_scientific() {
        assert_eq!(format_value(0.0), "0.000");
        assert_eq!(format_value(525.336), "525.336");
        assert_eq!(format_value(-0.008), "-0.008");
        assert_eq!(format_value(1.5e7), "1.500e7");
        assert_eq!(format_value(2.5e-4), "2.500e-4");
    }

    #[test]
    fn list() {
        assert_eq!(render_list(&[1.0, 2.5]), "[1.000, 2.500]");
    }
}
