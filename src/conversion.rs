//! 약어 문자열로 지정한 두 단위 사이의 값 환산.
//!
//! 약어는 공개된 모든 물리량에서 찾는다. 같은 약어가 여러 물리량에 있을 수 있으므로
//! (`K`는 온도차이기도 하고 절대온도이기도 하다) 두 단위를 함께 가진 물리량을 먼저 고르고,
//! 없으면 차원이 같은 조합을 고른다. 후보는 물리량 이름 순으로 살핀다.

use thiserror::Error;
use tracing::debug;

use crate::dimensions::SIDimensions;
use crate::error::UnitError;
use crate::quantity::Quantities;
use crate::unit::AnyUnit;

/// 환산 오류
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("알 수 없는 단위: {0}")]
    UnknownUnit(String),
    #[error("알 수 없는 물리량: {0}")]
    UnknownQuantity(String),
    #[error("환산할 수 없는 단위: {from} [{from_dimensions}] → {to} [{to_dimensions}]")]
    Incompatible {
        from: String,
        to: String,
        from_dimensions: SIDimensions,
        to_dimensions: SIDimensions,
    },
    #[error(transparent)]
    Unit(#[from] UnitError),
}

/// 약어(또는 SI 차원 문자열)에 해당하는 단위를 모든 공개 물리량에서 찾는다.
pub fn find_units(abbreviation: &str) -> Vec<AnyUnit> {
    Quantities::all()
        .iter()
        .filter_map(|quantity| quantity.unit_by_abbreviation(abbreviation))
        .collect()
}

/// 환산에 쓸 두 단위를 고른다.
pub fn resolve_pair(from: &str, to: &str) -> Result<(AnyUnit, AnyUnit), ConversionError> {
    let sources = find_units(from);
    if sources.is_empty() {
        return Err(ConversionError::UnknownUnit(from.to_string()));
    }
    let targets = find_units(to);
    if targets.is_empty() {
        return Err(ConversionError::UnknownUnit(to.to_string()));
    }

    for source in &sources {
        if let Some(target) = targets.iter().find(|t| t.quantity() == source.quantity()) {
            return Ok((source.clone(), target.clone()));
        }
    }
    for source in &sources {
        if let Some(target) = targets.iter().find(|t| t.dimensions() == source.dimensions()) {
            debug!(
                from = source.id(),
                to = target.id(),
                "서로 다른 물리량 사이의 환산 ({} → {})",
                source.quantity(),
                target.quantity()
            );
            return Ok((source.clone(), target.clone()));
        }
    }
    Err(ConversionError::Incompatible {
        from: from.to_string(),
        to: to.to_string(),
        from_dimensions: sources[0].dimensions(),
        to_dimensions: targets[0].dimensions(),
    })
}

/// 이름으로 지정한 물리량 안에서 두 단위를 찾는다.
pub fn resolve_pair_in(
    quantity: &str,
    from: &str,
    to: &str,
) -> Result<(AnyUnit, AnyUnit), ConversionError> {
    let quantity = Quantities::by_name(quantity)
        .ok_or_else(|| ConversionError::UnknownQuantity(quantity.to_string()))?;
    let lookup = |abbreviation: &str| {
        quantity
            .unit_by_abbreviation(abbreviation)
            .ok_or_else(|| UnitError::UnknownUnit {
                quantity: quantity.name().to_string(),
                unit: abbreviation.to_string(),
            })
    };
    Ok((lookup(from)?, lookup(to)?))
}

/// 기준 단위 값을 거쳐 환산한다.
pub fn convert_units(value: f64, from: &AnyUnit, to: &AnyUnit) -> f64 {
    to.from_base(from.to_base(value))
}

/// 값을 `from` 단위에서 `to` 단위로 환산한다.
pub fn convert(value: f64, from: &str, to: &str) -> Result<f64, ConversionError> {
    let (source, target) = resolve_pair(from, to)?;
    Ok(convert_units(value, &source, &target))
}

/// 물리량을 지정해 환산한다. 약어가 여러 물리량에 걸칠 때 쓴다.
pub fn convert_in(quantity: &str, value: f64, from: &str, to: &str) -> Result<f64, ConversionError> {
    let (source, target) = resolve_pair_in(quantity, from, to)?;
    Ok(convert_units(value, &source, &target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_within_quantity() {
        let inches = convert(25.4, "mm", "in").unwrap();
        assert!((inches - 1.0).abs() < 1e-12);
        let kmh = convert(1.0, "m/s", "km/h").unwrap();
        assert!((kmh - 3.6).abs() < 1e-12);
    }

    #[test]
    fn prefers_absolute_temperature_by_name_order() {
        let f = convert(100.0, "degC", "degF").unwrap();
        assert!((f - 212.0).abs() < 1e-9);
        let interval = convert_in("Temperature", 100.0, "degC", "degF").unwrap();
        assert!((interval - 180.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_incompatible_and_unknown() {
        assert!(matches!(
            convert(1.0, "m", "kg"),
            Err(ConversionError::Incompatible { .. })
        ));
        assert_eq!(
            convert(1.0, "furlongs", "m"),
            Err(ConversionError::UnknownUnit("furlongs".to_string()))
        );
        assert!(matches!(
            convert_in("Length", 1.0, "m", "kg"),
            Err(ConversionError::Unit(UnitError::UnknownUnit { .. }))
        ));
        assert_eq!(
            convert_in("Nope", 1.0, "m", "m"),
            Err(ConversionError::UnknownQuantity("Nope".to_string()))
        );
    }

    #[test]
    fn si_signature_resolves_to_standard_unit() {
        let newtons = convert(1.0, "kgm/s2", "kN").unwrap();
        assert!((newtons - 1e-3).abs() < 1e-15);
    }
}
