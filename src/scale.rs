use serde::{Deserialize, Serialize};

use crate::error::UnitError;

/// 단위 값과 기준(SI) 값 사이의 변환.
///
/// 모든 변형은 상태가 없는 순수 함수 쌍이다. 선형/오프셋 선형 스케일의 계수는 0이 될 수 없으며
/// 생성 함수([`Scale::linear`] 등)와 단위 등록 시 [`Scale::validate`]로 검사한다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scale {
    /// 기준 단위 자체.
    #[default]
    Identity,
    /// `base = value * factor`
    Linear { factor: f64 },
    /// `base = (value + offset) * factor`. 온도처럼 0점이 다른 단위용.
    OffsetLinear { factor: f64, offset: f64 },
    /// `base = reference * base^(value / multiplier)`. 데시벨 등.
    Logarithmic {
        reference: f64,
        base: f64,
        multiplier: f64,
    },
    /// `base = atan(value * factor)`. 경사(%)를 각도로 바꾼다.
    Grade { factor: f64 },
}

fn check_factor(factor: f64) -> Result<(), UnitError> {
    if factor == 0.0 || !factor.is_finite() {
        return Err(UnitError::InvalidFactor(factor));
    }
    Ok(())
}

impl Scale {
    /// 선형 스케일을 만든다.
    pub fn linear(factor: f64) -> Result<Self, UnitError> {
        check_factor(factor)?;
        Ok(Scale::Linear { factor })
    }

    /// 오프셋 선형 스케일을 만든다. 오프셋은 계수를 곱하기 전에 더해진다.
    pub fn offset_linear(factor: f64, offset: f64) -> Result<Self, UnitError> {
        check_factor(factor)?;
        if !offset.is_finite() {
            return Err(UnitError::InvalidOffset(offset));
        }
        Ok(Scale::OffsetLinear { factor, offset })
    }

    /// 로그 스케일을 만든다.
    pub fn logarithmic(reference: f64, base: f64, multiplier: f64) -> Result<Self, UnitError> {
        let scale = Scale::Logarithmic {
            reference,
            base,
            multiplier,
        };
        scale.validate()?;
        Ok(scale)
    }

    /// 경사 스케일을 만든다.
    pub fn grade(factor: f64) -> Result<Self, UnitError> {
        check_factor(factor)?;
        Ok(Scale::Grade { factor })
    }

    /// 파라미터 불변식을 검사한다. 직접 구성한 값이나 역직렬화한 값에 사용한다.
    pub fn validate(&self) -> Result<(), UnitError> {
        match *self {
            Scale::Identity => Ok(()),
            Scale::Linear { factor } | Scale::Grade { factor } => check_factor(factor),
            Scale::OffsetLinear { factor, offset } => {
                check_factor(factor)?;
                if offset.is_finite() {
                    Ok(())
                } else {
                    Err(UnitError::InvalidOffset(offset))
                }
            }
            Scale::Logarithmic {
                reference,
                base,
                multiplier,
            } => {
                let ok = reference > 0.0
                    && reference.is_finite()
                    && base > 0.0
                    && base != 1.0
                    && base.is_finite()
                    && multiplier != 0.0
                    && multiplier.is_finite();
                if ok {
                    Ok(())
                } else {
                    Err(UnitError::InvalidLogarithmic {
                        reference,
                        base,
                        multiplier,
                    })
                }
            }
        }
    }

    /// 단위 값을 기준 값으로 변환한다.
    pub fn to_base(&self, value: f64) -> f64 {
        match *self {
            Scale::Identity => value,
            Scale::Linear { factor } => value * factor,
            Scale::OffsetLinear { factor, offset } => (value + offset) * factor,
            Scale::Logarithmic {
                reference,
                base,
                multiplier,
            } => reference * base.powf(value / multiplier),
            Scale::Grade { factor } => (value * factor).atan(),
        }
    }

    /// 기준 값을 단위 값으로 변환한다.
    pub fn from_base(&self, value: f64) -> f64 {
        match *self {
            Scale::Identity => value,
            Scale::Linear { factor } => value / factor,
            Scale::OffsetLinear { factor, offset } => value / factor - offset,
            Scale::Logarithmic {
                reference,
                base,
                multiplier,
            } => multiplier * (value / reference).ln() / base.ln(),
            Scale::Grade { factor } => value.tan() / factor,
        }
    }

    /// 변환이 항등 변환이면 true.
    pub fn is_base_scale(&self) -> bool {
        match *self {
            Scale::Identity => true,
            Scale::Linear { factor } => factor == 1.0,
            Scale::OffsetLinear { factor, offset } => factor == 1.0 && offset == 0.0,
            Scale::Logarithmic { .. } | Scale::Grade { .. } => false,
        }
    }

    /// 선형 계열이면 기준 단위로의 환산 계수.
    pub fn factor(&self) -> Option<f64> {
        match *self {
            Scale::Identity => Some(1.0),
            Scale::Linear { factor } | Scale::OffsetLinear { factor, .. } => Some(factor),
            Scale::Logarithmic { .. } | Scale::Grade { .. } => None,
        }
    }

    /// 선형 계열이면 오프셋(순수 선형은 0).
    pub fn offset(&self) -> Option<f64> {
        match *self {
            Scale::Identity | Scale::Linear { .. } => Some(0.0),
            Scale::OffsetLinear { offset, .. } => Some(offset),
            Scale::Logarithmic { .. } | Scale::Grade { .. } => None,
        }
    }

    /// `self`를 부모 스케일로 하여 `child`(부모 단위 기준으로 표현된 스케일)를 기준 단위 기준
    /// 스케일로 합성한다.
    ///
    /// 계수는 곱하고, 오프셋은 기준 단위 쪽 절편 `f1*o1 + f2*o2`(f1 = 합성 계수, o1 = 자식
    /// 오프셋, f2 = 부모 계수, o2 = 부모 오프셋)를 합성 계수로 나눠 얻는다. 이 규칙을 지켜야
    /// 화씨 → 섭씨 → 켈빈 같은 다단 변환이 정확하다.
    pub fn derive(&self, child: Scale) -> Result<Scale, UnitError> {
        child.validate()?;
        if let Scale::Identity = self {
            return Ok(child);
        }
        let (Some(parent_factor), Some(parent_offset)) = (self.factor(), self.offset()) else {
            return Err(UnitError::NonLinearDerivation(format!("{self:?}")));
        };
        let (Some(child_factor), Some(child_offset)) = (child.factor(), child.offset()) else {
            return Err(UnitError::NonLinearDerivation(format!("{child:?}")));
        };
        let factor = parent_factor * child_factor;
        let offset_scale = matches!(self, Scale::OffsetLinear { .. })
            || matches!(child, Scale::OffsetLinear { .. });
        if !offset_scale {
            return Scale::linear(factor);
        }
        let intercept = factor * child_offset + parent_factor * parent_offset;
        Scale::offset_linear(factor, intercept / factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn zero_and_nan_factor_rejected() {
        assert_eq!(Scale::linear(0.0), Err(UnitError::InvalidFactor(0.0)));
        assert!(Scale::linear(f64::NAN).is_err());
        assert!(Scale::offset_linear(f64::INFINITY, 1.0).is_err());
        assert!(Scale::offset_linear(1.0, f64::NAN).is_err());
        assert!(Scale::grade(0.0).is_err());
    }

    #[test]
    fn offset_applied_before_factor() {
        let celsius = Scale::offset_linear(1.0, 273.15).unwrap();
        assert!(close(celsius.to_base(0.0), 273.15));
        assert!(close(celsius.from_base(373.15), 100.0));
    }

    #[test]
    fn fahrenheit_composed_through_celsius() {
        let celsius = Scale::offset_linear(1.0, 273.15).unwrap();
        // 섭씨 기준 화씨: C = (F - 32) * 5/9
        let fahrenheit = celsius
            .derive(Scale::offset_linear(5.0 / 9.0, -32.0).unwrap())
            .unwrap();
        match fahrenheit {
            Scale::OffsetLinear { factor, offset } => {
                assert!(close(factor, 5.0 / 9.0));
                assert!(close(offset, 459.67));
            }
            other => panic!("unexpected scale {other:?}"),
        }
        assert!(close(fahrenheit.to_base(32.0), 273.15));
        assert!(close(fahrenheit.to_base(212.0), 373.15));
    }

    #[test]
    fn linear_composition_multiplies() {
        let km = Scale::linear(1000.0).unwrap();
        let mm_from_km = km.derive(Scale::linear(1e-6).unwrap()).unwrap();
        assert_eq!(mm_from_km.factor().map(|f| close(f, 1e-3)), Some(true));
        assert!(!mm_from_km.is_base_scale());
        assert!(Scale::linear(1.0).unwrap().is_base_scale());
    }

    #[test]
    fn nonlinear_parent_cannot_derive() {
        let grade = Scale::grade(0.01).unwrap();
        assert!(matches!(
            grade.derive(Scale::linear(2.0).unwrap()),
            Err(UnitError::NonLinearDerivation(_))
        ));
    }

    #[test]
    fn grade_and_decibel() {
        let percent = Scale::grade(0.01).unwrap();
        assert!(close(percent.to_base(100.0), std::f64::consts::FRAC_PI_4));
        assert!(close(percent.from_base(std::f64::consts::FRAC_PI_4), 100.0));

        let db = Scale::logarithmic(1.0, 10.0, 10.0).unwrap();
        assert!(close(db.to_base(20.0), 100.0));
        assert!(close(db.from_base(1000.0), 30.0));
        assert!(Scale::logarithmic(1.0, 1.0, 10.0).is_err());
    }
}
