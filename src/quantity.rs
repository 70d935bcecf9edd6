//! 물리량과 전역 물리량 레지스트리.
//!
//! [`Quantity`]는 하나의 물리 차원에 속한 단위들을 id와 약어로 찾을 수 있게 보관한다.
//! 처음 등록된 단위가 표준 단위가 되며, 그 시점에 물리량이 [`Quantities`]에 SI 차원 지문으로
//! 등록된다. 레지스트리는 `RwLock`으로 보호되며 여러 스레드에서 조회할 수 있다.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::iter;
use std::sync::{Arc, LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, trace};

use crate::dimensions::SIDimensions;
use crate::error::UnitError;
use crate::prefix::SiPrefixes;
use crate::unit::AnyUnit;

#[derive(Debug, Clone, Default)]
struct UnitTable {
    by_id: BTreeMap<String, AnyUnit>,
    by_abbreviation: HashMap<String, AnyUnit>,
    standard: Option<AnyUnit>,
}

impl UnitTable {
    /// 충돌 규칙을 적용해 단위를 넣는다. 생성 단위가 명시적 단위와 겹쳐 무시되면 `Ok(false)`.
    ///
    /// 명시적 단위끼리 또는 생성 단위끼리 겹치면 오류이고, 명시적 단위는 생성 단위를 덮어쓴다.
    fn insert(&mut self, quantity: &str, unit: &AnyUnit) -> Result<bool, UnitError> {
        let slots = iter::once((true, unit.id()))
            .chain(unit.abbreviations().iter().map(|a| (false, a.as_str())));
        for (is_id, slot) in slots.clone() {
            let existing = if is_id {
                self.by_id.get(slot)
            } else {
                self.by_abbreviation.get(slot)
            };
            let Some(existing) = existing else {
                continue;
            };
            if existing == unit {
                continue;
            }
            match (existing.is_generated(), unit.is_generated()) {
                (false, true) => {
                    trace!(quantity, slot, unit = unit.id(), "생성 단위가 명시적 단위와 겹쳐 무시됨");
                    return Ok(false);
                }
                (true, false) => {
                    trace!(quantity, slot, replaced = existing.id(), "명시적 단위가 생성 단위를 대체함");
                }
                _ => {
                    return Err(UnitError::DuplicateUnit {
                        quantity: quantity.to_string(),
                        slot: slot.to_string(),
                        existing: existing.id().to_string(),
                    });
                }
            }
        }
        for (is_id, slot) in slots {
            if is_id {
                self.by_id.insert(slot.to_string(), unit.clone());
            } else {
                self.by_abbreviation.insert(slot.to_string(), unit.clone());
            }
        }
        if self.standard.is_none() {
            self.standard = Some(unit.clone());
        }
        Ok(true)
    }
}

struct QuantityDef {
    name: String,
    dimensions: SIDimensions,
    published: bool,
    table: RwLock<UnitTable>,
}

/// 같은 물리 차원을 재는 단위 집합.
///
/// 복제는 같은 물리량을 가리키는 핸들을 만든다. 비교는 동일성(같은 물리량인지) 기준이다.
#[derive(Clone)]
pub struct Quantity(Arc<QuantityDef>);

/// 약어 비교용 정규화. `.`, `^`, 공백을 제거한다 (`kg.m/s^2` → `kgm/s2`).
pub fn normalize_abbreviation(abbreviation: &str) -> String {
    abbreviation
        .chars()
        .filter(|c| !matches!(c, '.' | '^' | ' '))
        .collect()
}

impl Quantity {
    /// 새 물리량을 만든다. 첫 단위가 등록되면 [`Quantities`]에 공개된다.
    pub fn new(name: impl Into<String>, dimensions: SIDimensions) -> Self {
        Self::create(name.into(), dimensions, true)
    }

    /// SI 차원 문자열(`kgm2/s2` 등)로 물리량을 만든다.
    pub fn from_si_string(name: impl Into<String>, dimensions: &str) -> Result<Self, UnitError> {
        Ok(Self::new(name, dimensions.parse()?))
    }

    /// 전역 레지스트리에 공개되지 않는 물리량. 차원 소거 값의 SI 단위에 쓴다.
    pub(crate) fn detached(name: impl Into<String>, dimensions: SIDimensions) -> Self {
        Self::create(name.into(), dimensions, false)
    }

    fn create(name: String, dimensions: SIDimensions, published: bool) -> Self {
        Quantity(Arc::new(QuantityDef {
            name,
            dimensions,
            published,
            table: RwLock::new(UnitTable::default()),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn dimensions(&self) -> SIDimensions {
        self.0.dimensions
    }

    fn read(&self) -> RwLockReadGuard<'_, UnitTable> {
        self.0.table.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, UnitTable> {
        self.0.table.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// 단위를 등록하고, 정책에 따라 접두어 단위 계열을 함께 등록한다.
    ///
    /// 등록은 원자적이다. 단위나 생성된 형제 단위 중 하나라도 충돌 규칙에 걸리면 아무것도
    /// 바뀌지 않는다. 처음 등록되는 단위는 표준 단위가 된다.
    pub fn register_unit(
        &self,
        unit: &AnyUnit,
        prefixes: SiPrefixes,
        prefix_power: i32,
    ) -> Result<(), UnitError> {
        if unit.quantity() != self {
            return Err(UnitError::ForeignUnit {
                unit: unit.id().to_string(),
                expected: self.name().to_string(),
                actual: unit.quantity().name().to_string(),
            });
        }
        let family = unit.prefixed_family(prefixes, prefix_power)?;
        let first = {
            let mut table = self.write();
            let was_empty = table.standard.is_none();
            let mut scratch = table.clone();
            scratch.insert(self.name(), unit)?;
            for derived in &family {
                scratch.insert(self.name(), derived)?;
            }
            *table = scratch;
            was_empty && table.standard.is_some()
        };
        debug!(
            quantity = self.name(),
            unit = unit.id(),
            generated = family.len(),
            "단위 등록"
        );
        if first && self.0.published {
            Quantities::publish(self);
        }
        Ok(())
    }

    /// 비어 있는 분리 물리량에 단위 하나를 충돌 검사 없이 넣는다.
    pub(crate) fn adopt(&self, unit: &AnyUnit) {
        let mut table = self.write();
        table.by_id.insert(unit.id().to_string(), unit.clone());
        for abbreviation in unit.abbreviations() {
            table
                .by_abbreviation
                .insert(abbreviation.clone(), unit.clone());
        }
        table.standard.get_or_insert_with(|| unit.clone());
    }

    /// id/약어 자리에서 단위를 제거한다. 표준 단위는 다시 지정하지 않는다.
    pub fn unregister(&self, unit: &AnyUnit) {
        let mut table = self.write();
        if table.by_id.get(unit.id()) == Some(unit) {
            table.by_id.remove(unit.id());
        }
        table.by_abbreviation.retain(|_, u| u != unit);
        debug!(quantity = self.name(), unit = unit.id(), "단위 등록 해제");
    }

    pub fn unit_by_id(&self, id: &str) -> Option<AnyUnit> {
        self.read().by_id.get(id).cloned()
    }

    /// 약어로 단위를 찾는다.
    ///
    /// 순서: 정확히 일치 → 구분자(`.`, `^`, 공백)를 제거한 형태로 일치 → 문자열을 SI 차원으로
    /// 해석해 이 물리량의 차원과 같으면 표준 단위.
    pub fn unit_by_abbreviation(&self, abbreviation: &str) -> Option<AnyUnit> {
        let table = self.read();
        if let Some(unit) = table.by_abbreviation.get(abbreviation) {
            return Some(unit.clone());
        }
        let normalized = normalize_abbreviation(abbreviation);
        if let Some(unit) = table.by_abbreviation.get(&normalized) {
            return Some(unit.clone());
        }
        let matched = table
            .by_abbreviation
            .iter()
            .filter(|(key, _)| normalize_abbreviation(key) == normalized)
            .min_by(|a, b| a.0.cmp(b.0))
            .map(|(_, unit)| unit.clone());
        if matched.is_some() {
            return matched;
        }
        let standard = table.standard.clone();
        drop(table);
        match abbreviation.parse::<SIDimensions>() {
            Ok(dimensions) if dimensions == self.dimensions() => standard,
            _ => None,
        }
    }

    /// 처음 등록된 단위.
    pub fn standard_unit(&self) -> Option<AnyUnit> {
        self.read().standard.clone()
    }

    /// 등록된 단위 목록 (id 순).
    pub fn units(&self) -> Vec<AnyUnit> {
        self.read().by_id.values().cloned().collect()
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Quantity {}

impl fmt::Debug for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quantity")
            .field("name", &self.0.name)
            .field("dimensions", &self.0.dimensions.to_string())
            .finish()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}

#[derive(Default)]
struct QuantityIndex {
    by_dimensions: HashMap<SIDimensions, Vec<Quantity>>,
    by_name: BTreeMap<String, Quantity>,
}

static INDEX: LazyLock<RwLock<QuantityIndex>> =
    LazyLock::new(|| RwLock::new(QuantityIndex::default()));

/// SI 차원 지문에서 물리량 목록으로의 전역 레지스트리.
///
/// 내장 물리량은 지연 초기화되므로 조회 함수는 먼저 모두 초기화한다.
pub struct Quantities;

impl Quantities {
    fn publish(quantity: &Quantity) {
        let mut index = INDEX.write().unwrap_or_else(PoisonError::into_inner);
        let list = index.by_dimensions.entry(quantity.dimensions()).or_default();
        if !list.contains(quantity) {
            list.push(quantity.clone());
        }
        index
            .by_name
            .entry(quantity.name().to_string())
            .or_insert_with(|| quantity.clone());
        debug!(
            quantity = quantity.name(),
            dimensions = %quantity.dimensions(),
            "물리량 공개"
        );
    }

    /// 같은 SI 차원을 가진 물리량들의 사본 (예: Energy와 Torque).
    pub fn quantities_for(dimensions: SIDimensions) -> Vec<Quantity> {
        crate::quantities::register_builtin();
        let index = INDEX.read().unwrap_or_else(PoisonError::into_inner);
        index
            .by_dimensions
            .get(&dimensions)
            .cloned()
            .unwrap_or_default()
    }

    /// 이름으로 물리량을 찾는다. 같은 이름이 여러 번 공개되면 처음 것이 남는다.
    pub fn by_name(name: &str) -> Option<Quantity> {
        crate::quantities::register_builtin();
        let index = INDEX.read().unwrap_or_else(PoisonError::into_inner);
        index.by_name.get(name).cloned()
    }

    /// 공개된 모든 물리량 (이름 순).
    pub fn all() -> Vec<Quantity> {
        crate::quantities::register_builtin();
        let index = INDEX.read().unwrap_or_else(PoisonError::into_inner);
        index.by_name.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::UnitBuilder;

    fn widget() -> Quantity {
        Quantity::detached("Widget", SIDimensions::LENGTH.pow(4))
    }

    #[test]
    fn first_unit_becomes_standard() {
        let q = widget();
        assert!(q.standard_unit().is_none());
        let base = UnitBuilder::new(&q).id("w").name("widget").build().unwrap();
        base.derive_linear(2.0, "ww", "double widget", Default::default())
            .unwrap();
        assert_eq!(q.standard_unit(), Some(base));
        assert_eq!(q.units().len(), 2);
    }

    #[test]
    fn normalized_and_si_fallback_lookup() {
        let q = widget();
        let base = UnitBuilder::new(&q)
            .id("w")
            .name("widget")
            .abbreviations(["w", "m.m^3"])
            .build()
            .unwrap();
        assert_eq!(q.unit_by_abbreviation("m.m^3"), Some(base.clone()));
        assert_eq!(q.unit_by_abbreviation("mm3"), Some(base.clone()));
        assert_eq!(q.unit_by_abbreviation("m^4"), Some(base));
        assert_eq!(q.unit_by_abbreviation("m3"), None);
    }

    #[test]
    fn foreign_unit_rejected() {
        let a = widget();
        let b = widget();
        let unit = UnitBuilder::new(&a).id("w").name("widget").build().unwrap();
        assert!(matches!(
            b.register_unit(&unit, SiPrefixes::None, 1),
            Err(UnitError::ForeignUnit { .. })
        ));
    }

    #[test]
    fn detached_quantity_not_published() {
        let q = Quantity::detached("Detached-Only", SIDimensions::CURRENT.pow(7));
        UnitBuilder::new(&q).id("x").name("x").build().unwrap();
        assert!(Quantities::by_name("Detached-Only").is_none());
    }
}
