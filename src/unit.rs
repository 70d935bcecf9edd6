//! 단위 정의, 단위 파생, 접두어 단위 생성.
//!
//! [`AnyUnit`]은 물리량에 속한 불변 단위 정의의 공유 핸들이다. 새 단위는 [`UnitBuilder`]로
//! 만들거나 기존 단위에서 파생하며, 만들어지는 즉시 소속 물리량에 등록된다.
//! [`Unit<Q>`]는 물리량 타입이 정해진 얇은 래퍼이고, [`SIUnit`]은 차원만 있는 값의 단위이다.

use std::collections::HashMap;
use std::fmt;
use std::iter;
use std::marker::PhantomData;
use std::ops::Deref;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::dimensions::SIDimensions;
use crate::error::{Error, UnitError};
use crate::kind::{Absolute, QuantityType, Relative};
use crate::prefix::{SiPrefix, SiPrefixes, SI_PREFIXES};
use crate::quantity::Quantity;
use crate::scale::Scale;
use crate::value::{AbsScalar, Scalar};

/// 단위가 속한 단위계.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    SiBase,
    SiDerived,
    #[default]
    SiAccepted,
    Cgs,
    Imperial,
    UsCustomary,
    Mts,
    Other,
}

struct UnitDef {
    id: String,
    name: String,
    abbreviations: Vec<String>,
    display_abbreviation: String,
    scale: Scale,
    unit_system: UnitSystem,
    generated: bool,
    quantity: Quantity,
}

/// 물리량 타입이 지워진 단위 핸들.
///
/// 단위 정의는 만든 뒤 바뀌지 않는다. 비교는 동일성 기준이므로 같은 id라도 다른 물리량의
/// 단위(예: Length의 `m`과 Position의 `m`)는 서로 다르다.
#[derive(Clone)]
pub struct AnyUnit(Arc<UnitDef>);

fn push_unique(list: &mut Vec<String>, value: String) {
    if !value.is_empty() && !list.contains(&value) {
        list.push(value);
    }
}

/// 마지막 `/` 바로 뒤에 접두어를 끼운다.
fn insert_after_slash(text: &str, prefix: &str) -> Option<String> {
    let slash = text.rfind('/')?;
    Some(format!("{}{prefix}{}", &text[..=slash], &text[slash + 1..]))
}

impl AnyUnit {
    fn create(def: UnitDef) -> Self {
        AnyUnit(Arc::new(def))
    }

    pub fn id(&self) -> &str {
        &self.0.id
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// 등록된 약어 전체. 첫 항목이 기본 텍스트 약어이다.
    pub fn abbreviations(&self) -> &[String] {
        &self.0.abbreviations
    }

    pub fn default_textual_abbreviation(&self) -> &str {
        &self.0.abbreviations[0]
    }

    pub fn default_display_abbreviation(&self) -> &str {
        &self.0.display_abbreviation
    }

    pub fn scale(&self) -> Scale {
        self.0.scale
    }

    pub fn unit_system(&self) -> UnitSystem {
        self.0.unit_system
    }

    /// 접두어 정책으로 자동 생성된 단위이면 true.
    pub fn is_generated(&self) -> bool {
        self.0.generated
    }

    pub fn quantity(&self) -> &Quantity {
        &self.0.quantity
    }

    pub fn dimensions(&self) -> SIDimensions {
        self.0.quantity.dimensions()
    }

    /// 기준 단위와 같은 스케일이면 true.
    pub fn is_base_si_unit(&self) -> bool {
        self.0.scale.is_base_scale()
    }

    /// 이 단위의 값을 SI 값으로 바꾼다.
    pub fn to_base(&self, value: f64) -> f64 {
        self.0.scale.to_base(value)
    }

    /// SI 값을 이 단위의 값으로 바꾼다.
    pub fn from_base(&self, value: f64) -> f64 {
        self.0.scale.from_base(value)
    }

    /// 이 단위 기준으로 표현한 `child` 스케일을 합성한 빌더를 돌려준다.
    ///
    /// 물리량과 단위계는 이 단위의 것을 물려받는다. 비선형 스케일에서는 파생할 수 없다.
    pub fn derive(&self, child: Scale) -> Result<UnitBuilder, UnitError> {
        let scale = self.0.scale.derive(child)?;
        Ok(UnitBuilder::new(self.quantity())
            .scale(scale)
            .unit_system(self.unit_system()))
    }

    /// `factor`배 단위를 파생해 등록한다. 약어는 id 하나이다.
    pub fn derive_linear(
        &self,
        factor: f64,
        id: &str,
        name: &str,
        unit_system: UnitSystem,
    ) -> Result<AnyUnit, Error> {
        self.derive(Scale::linear(factor)?)?
            .id(id)
            .name(name)
            .unit_system(unit_system)
            .build()
    }

    /// 오프셋 선형 단위를 파생해 등록한다. `offset`은 이 단위 기준 값에 먼저 더해진다.
    pub fn derive_linear_offset(
        &self,
        factor: f64,
        offset: f64,
        id: &str,
        name: &str,
        unit_system: UnitSystem,
    ) -> Result<AnyUnit, Error> {
        self.derive(Scale::offset_linear(factor, offset)?)?
            .id(id)
            .name(name)
            .unit_system(unit_system)
            .build()
    }

    /// 소속 물리량에서 이 단위를 제거한다.
    pub fn unregister(&self) {
        self.0.quantity.unregister(self);
    }

    fn generated(
        &self,
        id: String,
        name: String,
        mut abbreviations: Vec<String>,
        display_abbreviation: String,
        factor: f64,
    ) -> Result<AnyUnit, UnitError> {
        let scale = self.0.scale.derive(Scale::linear(factor)?)?;
        push_unique(&mut abbreviations, display_abbreviation.clone());
        Ok(AnyUnit::create(UnitDef {
            id,
            name,
            abbreviations,
            display_abbreviation,
            scale,
            unit_system: self.unit_system(),
            generated: true,
            quantity: self.quantity().clone(),
        }))
    }

    /// 접두어 정책에 따른 형제 단위들을 만든다. 등록은 하지 않는다.
    ///
    /// 계수는 `접두어^power`이고, `PerUnit`은 그 역수, `Kilo`는 `kilo`를 뺀 어간 기준이다.
    pub(crate) fn prefixed_family(
        &self,
        policy: SiPrefixes,
        power: i32,
    ) -> Result<Vec<AnyUnit>, UnitError> {
        let policy_error = || UnitError::PrefixPolicy {
            policy: policy.as_str(),
            id: self.id().to_string(),
        };
        let mut family = Vec::new();
        match policy {
            SiPrefixes::None => {}
            SiPrefixes::Unit | SiPrefixes::UnitPositive => {
                for prefix in policy.prefixes() {
                    let mut abbreviations = Vec::new();
                    for abbreviation in self.abbreviations() {
                        for p in [prefix.textual, prefix.display] {
                            push_unique(&mut abbreviations, format!("{p}{abbreviation}"));
                        }
                    }
                    family.push(self.generated(
                        format!("{}{}", prefix.textual, self.id()),
                        format!("{}{}", prefix.name, self.name()),
                        abbreviations,
                        format!("{}{}", prefix.display, self.default_display_abbreviation()),
                        prefix.factor.powi(power),
                    )?);
                }
            }
            SiPrefixes::PerUnit => {
                if !self.id().contains('/') {
                    return Err(policy_error());
                }
                for prefix in policy.prefixes() {
                    let Some(id) = insert_after_slash(self.id(), prefix.textual) else {
                        return Err(policy_error());
                    };
                    let mut abbreviations = Vec::new();
                    for abbreviation in self.abbreviations() {
                        for p in [prefix.textual, prefix.display] {
                            if let Some(a) = insert_after_slash(abbreviation, p) {
                                push_unique(&mut abbreviations, a);
                            }
                        }
                    }
                    let display =
                        insert_after_slash(self.default_display_abbreviation(), prefix.display)
                            .unwrap_or_else(|| id.clone());
                    let name = match self.name().strip_prefix("per ") {
                        Some(rest) => format!("per {}{rest}", prefix.name),
                        None => format!("{}{}", prefix.name, self.name()),
                    };
                    family.push(self.generated(
                        id,
                        name,
                        abbreviations,
                        display,
                        1.0 / prefix.factor.powi(power),
                    )?);
                }
            }
            SiPrefixes::Kilo => {
                let Some(stem_id) = self.id().strip_prefix('k') else {
                    return Err(policy_error());
                };
                let stem_name = self.name().strip_prefix("kilo").unwrap_or(self.name());
                let stem_display = self
                    .default_display_abbreviation()
                    .strip_prefix('k')
                    .unwrap_or(stem_id);
                let stems: Vec<&str> = self
                    .abbreviations()
                    .iter()
                    .filter_map(|a| a.strip_prefix('k'))
                    .collect();
                let bare = SiPrefix {
                    textual: "",
                    display: "",
                    name: "",
                    factor: 1.0,
                };
                let options = iter::once(&bare)
                    .chain(SI_PREFIXES.iter().filter(|p| p.textual != "k"));
                for prefix in options {
                    let mut abbreviations = Vec::new();
                    for stem in &stems {
                        for p in [prefix.textual, prefix.display] {
                            push_unique(&mut abbreviations, format!("{p}{stem}"));
                        }
                    }
                    family.push(self.generated(
                        format!("{}{stem_id}", prefix.textual),
                        format!("{}{stem_name}", prefix.name),
                        abbreviations,
                        format!("{}{stem_display}", prefix.display),
                        (prefix.factor / 1e3).powi(power),
                    )?);
                }
            }
        }
        Ok(family)
    }
}

impl PartialEq for AnyUnit {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for AnyUnit {}

impl fmt::Debug for AnyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unit")
            .field("id", &self.0.id)
            .field("quantity", &self.0.quantity.name())
            .field("scale", &self.0.scale)
            .field("generated", &self.0.generated)
            .finish()
    }
}

impl fmt::Display for AnyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.display_abbreviation)
    }
}

/// 새 단위를 정의하고 등록하는 빌더.
///
/// ```
/// use dimunits::prelude::*;
///
/// let q = Quantity::new("Builder-Doc", SIDimensions::LENGTH.pow(5));
/// let unit = UnitBuilder::new(&q)
///     .id("bd")
///     .name("builder doc unit")
///     .build()
///     .unwrap();
/// assert_eq!(q.standard_unit(), Some(unit));
/// ```
#[derive(Debug, Clone)]
pub struct UnitBuilder {
    quantity: Quantity,
    id: String,
    name: String,
    abbreviations: Vec<String>,
    display_abbreviation: Option<String>,
    scale: Scale,
    unit_system: UnitSystem,
    prefixes: SiPrefixes,
    prefix_power: i32,
    generated: bool,
}

impl UnitBuilder {
    pub fn new(quantity: &Quantity) -> Self {
        UnitBuilder {
            quantity: quantity.clone(),
            id: String::new(),
            name: String::new(),
            abbreviations: Vec::new(),
            display_abbreviation: None,
            scale: Scale::Identity,
            unit_system: UnitSystem::default(),
            prefixes: SiPrefixes::None,
            prefix_power: 1,
            generated: false,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// 약어 목록. 비워 두면 id가 유일한 약어가 된다.
    pub fn abbreviations<I, S>(mut self, abbreviations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.abbreviations = abbreviations.into_iter().map(Into::into).collect();
        self
    }

    /// 표시용 약어. 비워 두면 첫 약어를 쓴다.
    pub fn display_abbreviation(mut self, abbreviation: impl Into<String>) -> Self {
        self.display_abbreviation = Some(abbreviation.into());
        self
    }

    pub fn scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    pub fn unit_system(mut self, unit_system: UnitSystem) -> Self {
        self.unit_system = unit_system;
        self
    }

    /// 등록 시 함께 만들 접두어 단위 계열. `power`는 면적(2), 부피(3)처럼 접두어 계수의 지수이다.
    pub fn prefixes(mut self, prefixes: SiPrefixes, power: i32) -> Self {
        self.prefixes = prefixes;
        self.prefix_power = power;
        self
    }

    /// 자동 생성 단위로 표시한다. 생성 단위는 명시적 단위와 충돌하면 조용히 무시된다.
    pub fn generated(mut self, generated: bool) -> Self {
        self.generated = generated;
        self
    }

    /// 단위를 만들어 물리량에 등록한다.
    pub fn build(self) -> Result<AnyUnit, Error> {
        if self.id.is_empty() {
            return Err(Error::MissingArgument("id"));
        }
        if self.name.is_empty() {
            return Err(Error::MissingArgument("name"));
        }
        self.scale.validate()?;
        let mut abbreviations = Vec::new();
        for abbreviation in self.abbreviations {
            push_unique(&mut abbreviations, abbreviation);
        }
        if abbreviations.is_empty() {
            abbreviations.push(self.id.clone());
        }
        let display_abbreviation = self
            .display_abbreviation
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| abbreviations[0].clone());
        push_unique(&mut abbreviations, display_abbreviation.clone());
        let unit = AnyUnit::create(UnitDef {
            id: self.id,
            name: self.name,
            abbreviations,
            display_abbreviation,
            scale: self.scale,
            unit_system: self.unit_system,
            generated: self.generated,
            quantity: self.quantity.clone(),
        });
        self.quantity
            .register_unit(&unit, self.prefixes, self.prefix_power)?;
        Ok(unit)
    }
}

/// 물리량 `Q`의 단위.
pub struct Unit<Q> {
    any: AnyUnit,
    kind: PhantomData<fn() -> Q>,
}

impl<Q> Unit<Q> {
    pub(crate) fn wrap(any: AnyUnit) -> Self {
        Unit {
            any,
            kind: PhantomData,
        }
    }

    pub fn as_any(&self) -> &AnyUnit {
        &self.any
    }

    pub fn into_any(self) -> AnyUnit {
        self.any
    }
}

impl<Q: QuantityType> Unit<Q> {
    /// 타입이 지워진 단위를 `Q`의 단위로 확인한다.
    pub fn try_from_any(any: AnyUnit) -> Result<Self, UnitError> {
        if any.quantity() != Q::quantity() {
            return Err(UnitError::ForeignUnit {
                unit: any.id().to_string(),
                expected: Q::NAME.to_string(),
                actual: any.quantity().name().to_string(),
            });
        }
        Ok(Self::wrap(any))
    }

    /// 약어로 단위를 찾는다.
    pub fn of(abbreviation: &str) -> Result<Self, UnitError> {
        Q::quantity()
            .unit_by_abbreviation(abbreviation)
            .map(Self::wrap)
            .ok_or_else(|| UnitError::UnknownUnit {
                quantity: Q::NAME.to_string(),
                unit: abbreviation.to_string(),
            })
    }

    pub fn by_id(id: &str) -> Option<Self> {
        Q::quantity().unit_by_id(id).map(Self::wrap)
    }

    pub fn standard() -> Self {
        Q::standard_unit()
    }

    /// 등록된 모든 단위 (id 순).
    pub fn all() -> Vec<Self> {
        Q::quantity().units().into_iter().map(Self::wrap).collect()
    }

    pub fn derive_linear(
        &self,
        factor: f64,
        id: &str,
        name: &str,
        unit_system: UnitSystem,
    ) -> Result<Self, Error> {
        Ok(Self::wrap(self.any.derive_linear(factor, id, name, unit_system)?))
    }

    pub fn derive_linear_offset(
        &self,
        factor: f64,
        offset: f64,
        id: &str,
        name: &str,
        unit_system: UnitSystem,
    ) -> Result<Self, Error> {
        Ok(Self::wrap(
            self.any
                .derive_linear_offset(factor, offset, id, name, unit_system)?,
        ))
    }
}

impl<Q: QuantityType + Relative> Unit<Q> {
    /// 이 단위로 표현한 값 `value`.
    pub fn scalar(&self, value: f64) -> Scalar<Q> {
        Scalar::new(value, self)
    }
}

impl<A: Absolute> Unit<A> {
    /// 이 단위로 표현한 절대값 `value`.
    pub fn absolute(&self, value: f64) -> AbsScalar<A> {
        AbsScalar::new(value, self)
    }
}

impl<Q> Clone for Unit<Q> {
    fn clone(&self) -> Self {
        Self::wrap(self.any.clone())
    }
}

impl<Q> PartialEq for Unit<Q> {
    fn eq(&self, other: &Self) -> bool {
        self.any == other.any
    }
}

impl<Q> Eq for Unit<Q> {}

impl<Q> fmt::Debug for Unit<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.any.fmt(f)
    }
}

impl<Q> fmt::Display for Unit<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.any, f)
    }
}

impl<Q> Deref for Unit<Q> {
    type Target = AnyUnit;

    fn deref(&self) -> &AnyUnit {
        &self.any
    }
}

/// 차원만 있는 값의 단위. SI 기준 단위 그대로이며 id는 차원 문자열(`kgm2/s2`)이다.
#[derive(Clone, PartialEq, Eq)]
pub struct SIUnit(AnyUnit);

static SI_UNITS: LazyLock<RwLock<HashMap<SIDimensions, SIUnit>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

impl SIUnit {
    /// 차원별로 하나씩 만들어 캐시한다.
    pub fn of(dimensions: SIDimensions) -> SIUnit {
        if let Some(unit) = SI_UNITS
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&dimensions)
        {
            return unit.clone();
        }
        let mut cache = SI_UNITS.write().unwrap_or_else(PoisonError::into_inner);
        cache
            .entry(dimensions)
            .or_insert_with(|| SIUnit::create(dimensions))
            .clone()
    }

    fn create(dimensions: SIDimensions) -> SIUnit {
        let text = dimensions.to_string();
        let quantity = Quantity::detached(format!("SI[{text}]"), dimensions);
        let mut abbreviations = vec![text.clone()];
        push_unique(&mut abbreviations, dimensions.to_string_with(true, ".", "^"));
        let unit = AnyUnit::create(UnitDef {
            id: text.clone(),
            name: text.clone(),
            abbreviations,
            display_abbreviation: text,
            scale: Scale::Identity,
            unit_system: UnitSystem::SiDerived,
            generated: false,
            quantity: quantity.clone(),
        });
        quantity.adopt(&unit);
        trace!(dimensions = %dimensions, "SI 단위 생성");
        SIUnit(unit)
    }

    pub fn dimensions(&self) -> SIDimensions {
        self.0.dimensions()
    }
}

impl Deref for SIUnit {
    type Target = AnyUnit;

    fn deref(&self) -> &AnyUnit {
        &self.0
    }
}

impl fmt::Debug for SIUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SIUnit({})", self.0.id())
    }
}

impl fmt::Display for SIUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh(name: &str, exponent: i32) -> Quantity {
        Quantity::detached(name, SIDimensions::AMOUNT.pow(exponent))
    }

    #[test]
    fn missing_id_or_name() {
        let q = fresh("NoId", 3);
        assert_eq!(
            UnitBuilder::new(&q).name("x").build(),
            Err(Error::MissingArgument("id"))
        );
        assert_eq!(
            UnitBuilder::new(&q).id("x").build(),
            Err(Error::MissingArgument("name"))
        );
        assert!(q.standard_unit().is_none());
    }

    #[test]
    fn unit_prefixes_with_power() {
        let q = fresh("Square", 2);
        UnitBuilder::new(&q)
            .id("q2")
            .name("quad")
            .abbreviations(["q2", "q^2"])
            .prefixes(SiPrefixes::Unit, 2)
            .build()
            .unwrap();
        let kq2 = q.unit_by_id("kq2").unwrap();
        assert!(kq2.is_generated());
        assert_eq!(kq2.name(), "kiloquad");
        assert!((kq2.to_base(1.0) - 1e6).abs() < 1e-6);
        assert_eq!(q.unit_by_abbreviation("kq^2"), Some(kq2));
        let micro = q.unit_by_abbreviation("μq2").unwrap();
        assert_eq!(micro.id(), "muq2");
        assert_eq!(micro.default_display_abbreviation(), "μq2");
    }

    #[test]
    fn kilo_policy_strips_stem() {
        let q = fresh("KiloBase", 5);
        UnitBuilder::new(&q)
            .id("kz")
            .name("kilozed")
            .prefixes(SiPrefixes::Kilo, 1)
            .build()
            .unwrap();
        let z = q.unit_by_id("z").unwrap();
        assert_eq!(z.name(), "zed");
        assert!((z.to_base(1.0) - 1e-3).abs() < 1e-15);
        let mz = q.unit_by_id("mz").unwrap();
        assert!((mz.to_base(1.0) - 1e-6).abs() < 1e-18);
        assert!(q.unit_by_id("kkz").is_none());
        assert_eq!(q.units().len(), 21);
    }

    #[test]
    fn per_unit_policy_inverts() {
        let q = Quantity::detached("PerTick", SIDimensions::TIME.invert().pow(1));
        UnitBuilder::new(&q)
            .id("/t")
            .name("per tick")
            .abbreviations(["/t", "1/t"])
            .prefixes(SiPrefixes::PerUnit, 1)
            .build()
            .unwrap();
        let per_ms = q.unit_by_abbreviation("1/mt").unwrap();
        assert_eq!(per_ms.id(), "/mt");
        assert_eq!(per_ms.name(), "per millitick");
        assert!((per_ms.to_base(1.0) - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn prefix_policy_mismatch() {
        let q = fresh("BadKilo", 6);
        let err = UnitBuilder::new(&q)
            .id("z")
            .name("zed")
            .prefixes(SiPrefixes::Kilo, 1)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Unit(UnitError::PrefixPolicy { policy: "kilo", .. })
        ));
        assert!(q.units().is_empty());
    }

    #[test]
    fn si_unit_cached_per_dimension() {
        let dims: SIDimensions = "kgm2/s2".parse().unwrap();
        let a = SIUnit::of(dims);
        let b = SIUnit::of(dims);
        assert_eq!(a, b);
        assert_eq!(a.id(), "kgm2/s2");
        assert!(a.abbreviations().iter().any(|s| s == "kg.m^2/s^2"));
    }
}
