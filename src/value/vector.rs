use std::fmt;

use crate::dimensions::SIDimensions;
use crate::error::{Error, UnitError, ValueError};
use crate::format::{attach_unit, render_list};
use crate::kind::{check_cast, Absolute, DisplayUnit, Kind, QuantityType, Relative, SI};
use crate::quantity::{Quantities, Quantity};
use crate::storage::{SharedStorage, Storage, StorageType};
use crate::unit::{SIUnit, Unit};
use crate::value::{display_rounding, Scalar};

/// 같은 종류의 값 여러 개. 내부에는 SI 값을 밀집 또는 희소 형태로 보관한다.
///
/// 새로 만든 벡터와 연산 결과는 불변이다. 수정하려면 [`Vector::mutable`]로 가변 사본을 얻는다.
/// 가변 사본은 원본과 버퍼를 공유하다가 처음 수정할 때 복제하므로 원본은 바뀌지 않는다.
pub struct Vector<K: Kind> {
    data: SharedStorage,
    display_unit: K::Unit,
}

impl<K: Kind> Vector<K> {
    /// 단위 `unit`으로 표현한 값들로 만든다.
    pub fn new(values: &[f64], unit: &K::Unit, storage_type: StorageType) -> Result<Self, ValueError> {
        let si = values.iter().map(|v| unit.any().to_base(*v)).collect();
        Self::from_si(si, unit, storage_type)
    }

    pub fn from_si(
        si: Vec<f64>,
        display_unit: &K::Unit,
        storage_type: StorageType,
    ) -> Result<Self, ValueError> {
        let storage = Storage::dense(1, si.len(), si)?.into_type(storage_type);
        Ok(Self::from_storage(storage, display_unit))
    }

    /// (인덱스, SI 값) 목록으로 희소 벡터를 만든다. 빠진 인덱스는 SI 0이다.
    pub fn from_sparse_si(
        size: usize,
        cells: &[(usize, f64)],
        display_unit: &K::Unit,
    ) -> Result<Self, ValueError> {
        if let Some((index, _)) = cells.iter().find(|(index, _)| *index >= size) {
            return Err(ValueError::IndexOutOfBounds {
                index: *index,
                size,
            });
        }
        let storage = Storage::sparse(1, size, cells.iter().map(|(i, v)| (0, *i, *v)))?;
        Ok(Self::from_storage(storage, display_unit))
    }

    pub fn from_scalars(
        scalars: &[Scalar<K>],
        display_unit: &K::Unit,
        storage_type: StorageType,
    ) -> Result<Self, ValueError> {
        let si = scalars.iter().map(Scalar::si).collect();
        Self::from_si(si, display_unit, storage_type)
    }

    pub(crate) fn from_storage(storage: Storage, display_unit: &K::Unit) -> Self {
        Vector {
            data: SharedStorage::new(storage),
            display_unit: display_unit.clone(),
        }
    }

    fn with_storage(&self, storage: Storage) -> Self {
        Vector {
            data: self.data.rebuild(storage),
            display_unit: self.display_unit.clone(),
        }
    }

    fn storage(&self) -> &Storage {
        self.data.get()
    }

    pub fn size(&self) -> usize {
        self.storage().cols()
    }

    pub fn storage_type(&self) -> StorageType {
        self.storage().storage_type()
    }

    pub fn display_unit(&self) -> &K::Unit {
        &self.display_unit
    }

    /// 표시 단위만 바꾼다. 불변 벡터에도 허용된다.
    pub fn set_display_unit(&mut self, unit: &K::Unit) {
        self.display_unit = unit.clone();
    }

    pub fn dimensions(&self) -> SIDimensions {
        self.display_unit.any().dimensions()
    }

    fn check_index(&self, index: usize) -> Result<(), ValueError> {
        if index >= self.size() {
            return Err(ValueError::IndexOutOfBounds {
                index,
                size: self.size(),
            });
        }
        Ok(())
    }

    pub fn get_si(&self, index: usize) -> Result<f64, ValueError> {
        self.check_index(index)?;
        self.storage().get(0, index)
    }

    pub fn get_in_unit(&self, index: usize) -> Result<f64, ValueError> {
        Ok(self.display_unit.any().from_base(self.get_si(index)?))
    }

    pub fn get_in_unit_of(&self, index: usize, unit: &K::Unit) -> Result<f64, ValueError> {
        Ok(unit.any().from_base(self.get_si(index)?))
    }

    pub fn get(&self, index: usize) -> Result<Scalar<K>, ValueError> {
        Ok(Scalar::from_si(self.get_si(index)?, &self.display_unit))
    }

    pub fn values_si(&self) -> Vec<f64> {
        self.storage().dense_values()
    }

    pub fn values_in_unit(&self) -> Vec<f64> {
        let unit = self.display_unit.any();
        self.values_si().into_iter().map(|v| unit.from_base(v)).collect()
    }

    pub fn scalars(&self) -> Vec<Scalar<K>> {
        self.values_si()
            .into_iter()
            .map(|v| Scalar::from_si(v, &self.display_unit))
            .collect()
    }

    /// 0이 아닌 값의 수.
    pub fn cardinality(&self) -> usize {
        self.storage().cardinality()
    }

    /// 모든 값의 합.
    pub fn z_sum(&self) -> Scalar<K> {
        Scalar::from_si(self.storage().z_sum(), &self.display_unit)
    }

    /// 밀집 형태. 이미 밀집이면 버퍼를 공유한다.
    pub fn to_dense(&self) -> Self {
        match self.storage_type() {
            StorageType::Dense => self.clone(),
            StorageType::Sparse => self.with_storage(self.storage().to_dense()),
        }
    }

    /// 희소 형태. 이미 희소이면 버퍼를 공유한다.
    pub fn to_sparse(&self) -> Self {
        match self.storage_type() {
            StorageType::Sparse => self.clone(),
            StorageType::Dense => self.with_storage(self.storage().to_sparse()),
        }
    }

    pub fn is_mutable(&self) -> bool {
        self.data.is_mutable()
    }

    /// 아직 원본과 버퍼를 공유 중인 가변 사본이면 true.
    pub fn is_copy_on_write(&self) -> bool {
        self.data.is_copy_on_write()
    }

    /// 가변 사본.
    pub fn mutable(&self) -> Self {
        Vector {
            data: self.data.mutable_view(),
            display_unit: self.display_unit.clone(),
        }
    }

    /// 불변 사본.
    pub fn immutable(&self) -> Self {
        Vector {
            data: self.data.immutable_view(),
            display_unit: self.display_unit.clone(),
        }
    }

    pub fn set_si(&mut self, index: usize, value: f64) -> Result<(), ValueError> {
        self.check_index(index)?;
        self.data.check_copy_on_write()?.set(0, index, value)
    }

    pub fn set_in_unit(&mut self, index: usize, value: f64) -> Result<(), ValueError> {
        let si = self.display_unit.any().to_base(value);
        self.set_si(index, si)
    }

    pub fn set(&mut self, index: usize, value: &Scalar<K>) -> Result<(), ValueError> {
        self.set_si(index, value.si())
    }

    /// 모든 SI 값에 `f`를 적용한다.
    pub fn assign<F>(&mut self, f: F) -> Result<&mut Self, ValueError>
    where
        F: Fn(f64) -> f64 + Sync + Send,
    {
        self.data.check_copy_on_write()?.assign(f);
        Ok(self)
    }

    pub fn abs(&mut self) -> Result<&mut Self, ValueError> {
        self.assign(f64::abs)
    }

    pub fn neg(&mut self) -> Result<&mut Self, ValueError> {
        self.assign(|v| -v)
    }

    /// 표시 단위 기준 올림.
    pub fn ceil(&mut self) -> Result<&mut Self, ValueError> {
        self.assign(display_rounding(self.display_unit.any(), f64::ceil))
    }

    pub fn floor(&mut self) -> Result<&mut Self, ValueError> {
        self.assign(display_rounding(self.display_unit.any(), f64::floor))
    }

    pub fn rint(&mut self) -> Result<&mut Self, ValueError> {
        self.assign(display_rounding(
            self.display_unit.any(),
            f64::round_ties_even,
        ))
    }

    pub fn multiply_by(&mut self, factor: f64) -> Result<&mut Self, ValueError> {
        self.assign(move |v| v * factor)
    }

    pub fn divide_by(&mut self, factor: f64) -> Result<&mut Self, ValueError> {
        self.assign(move |v| v / factor)
    }

    /// 계수를 곱한 새 벡터.
    pub fn times_factor(&self, factor: f64) -> Self {
        let mut storage = self.storage().clone();
        storage.assign(move |v| v * factor);
        Self::from_storage(storage, &self.display_unit)
    }

    /// 물리량을 지운 SI 벡터.
    pub fn to_si_vector(&self) -> Vector<SI> {
        Vector::from_storage(self.storage().clone(), &SIUnit::of(self.dimensions()))
    }

    pub fn to_string_with(&self, verbose: bool, with_unit: bool) -> String {
        let mut out = render_list(&self.values_in_unit());
        if with_unit {
            out = attach_unit(out, self.display_unit.any());
        }
        if verbose {
            let access = if self.is_mutable() { "Mutable" } else { "Immutable" };
            out = format!("{access} Vector<{}> {out}", K::NAME);
        }
        out
    }
}

impl<K: Relative> Vector<K> {
    fn check_same_dimensions<K2: Kind>(&self, other: &Vector<K2>) -> Result<(), UnitError> {
        if self.dimensions() != other.dimensions() {
            return Err(UnitError::DimensionMismatch {
                target: K::NAME.to_string(),
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        Ok(())
    }

    /// 원소별 합. 결과는 불변이며 이 벡터의 표시 단위를 따른다.
    pub fn plus(&self, other: &Self) -> Result<Self, Error> {
        self.check_same_dimensions(other)?;
        let storage = self.storage().combine(other.storage(), |a, b| a + b)?;
        Ok(Self::from_storage(storage, &self.display_unit))
    }

    pub fn minus(&self, other: &Self) -> Result<Self, Error> {
        self.check_same_dimensions(other)?;
        let storage = self.storage().combine(other.storage(), |a, b| a - b)?;
        Ok(Self::from_storage(storage, &self.display_unit))
    }

    /// 제자리 합.
    pub fn inc_by(&mut self, other: &Self) -> Result<&mut Self, Error> {
        self.check_same_dimensions(other)?;
        let storage = self.storage().combine(other.storage(), |a, b| a + b)?;
        self.data.replace(storage)?;
        Ok(self)
    }

    pub fn dec_by(&mut self, other: &Self) -> Result<&mut Self, Error> {
        self.check_same_dimensions(other)?;
        let storage = self.storage().combine(other.storage(), |a, b| a - b)?;
        self.data.replace(storage)?;
        Ok(self)
    }

    /// 원소별 곱. 절대량 벡터는 곱할 수 없다.
    ///
    /// ```compile_fail
    /// use dimunits::prelude::*;
    /// use dimunits::quantities::{position, Position};
    ///
    /// let p = Vector::<Position>::new(&[2.0, 3.0], &position::METER, StorageType::Dense).unwrap();
    /// let _area = p.times(&p);
    /// ```
    pub fn times<K2: Relative>(&self, other: &Vector<K2>) -> Result<Vector<SI>, ValueError> {
        let storage = self.storage().combine(other.storage(), |a, b| a * b)?;
        let dims = self.dimensions().plus(&other.dimensions());
        Ok(Vector::from_storage(storage, &SIUnit::of(dims)))
    }

    /// 원소별 몫.
    pub fn divide<K2: Relative>(&self, other: &Vector<K2>) -> Result<Vector<SI>, ValueError> {
        let storage = self.storage().combine(other.storage(), |a, b| a / b)?;
        let dims = self.dimensions().minus(&other.dimensions());
        Ok(Vector::from_storage(storage, &SIUnit::of(dims)))
    }

    /// 모든 원소에 스칼라를 곱한다.
    pub fn times_scalar<K2: Relative>(&self, scalar: &Scalar<K2>) -> Vector<SI> {
        let factor = scalar.si();
        let mut storage = self.storage().clone();
        storage.assign(move |v| v * factor);
        let dims = self.dimensions().plus(&scalar.dimensions());
        Vector::from_storage(storage, &SIUnit::of(dims))
    }
}

/// 절대량 벡터. 절대값 ± 상대값은 절대값, 절대값 − 절대값은 상대값이다.
impl<A: Absolute> Vector<A> {
    fn check_offset_dimensions(&self, other: SIDimensions) -> Result<(), UnitError> {
        if self.dimensions() != other {
            return Err(UnitError::DimensionMismatch {
                target: A::NAME.to_string(),
                expected: self.dimensions(),
                actual: other,
            });
        }
        Ok(())
    }

    /// 표시 단위와 id가 같은 상대 단위, 없으면 상대 물리량의 표준 단위.
    pub fn relative_unit(&self) -> Unit<A::Rel> {
        Unit::<A::Rel>::by_id(self.display_unit.any().id())
            .unwrap_or_else(<A::Rel as QuantityType>::standard_unit)
    }

    /// 원소별로 상대값만큼 옮긴다. 결과는 이 벡터의 표시 단위를 따른다.
    pub fn plus_rel(&self, offset: &Vector<A::Rel>) -> Result<Self, Error> {
        self.check_offset_dimensions(offset.dimensions())?;
        let storage = self.storage().combine(offset.storage(), |a, b| a + b)?;
        Ok(Self::from_storage(storage, &self.display_unit))
    }

    pub fn minus_rel(&self, offset: &Vector<A::Rel>) -> Result<Self, Error> {
        self.check_offset_dimensions(offset.dimensions())?;
        let storage = self.storage().combine(offset.storage(), |a, b| a - b)?;
        Ok(Self::from_storage(storage, &self.display_unit))
    }

    /// 원소별 간격. 표시 단위는 [`Vector::relative_unit`]이다.
    pub fn minus_abs(&self, other: &Self) -> Result<Vector<A::Rel>, Error> {
        self.check_offset_dimensions(other.dimensions())?;
        let storage = self.storage().combine(other.storage(), |a, b| a - b)?;
        Ok(Vector::from_storage(storage, &self.relative_unit()))
    }
}

impl Vector<SI> {
    pub fn from_si_dimensions(
        si: Vec<f64>,
        dimensions: SIDimensions,
        storage_type: StorageType,
    ) -> Result<Self, ValueError> {
        Self::from_si(si, &SIUnit::of(dimensions), storage_type)
    }

    /// 물리량 `Q`의 벡터로 캐스트한다. 표시 단위는 `Q`의 표준 단위이다.
    pub fn as_quantity<Q: QuantityType>(&self) -> Result<Vector<Q>, UnitError> {
        self.as_quantity_in(&Q::try_standard_unit()?)
    }

    pub fn as_quantity_in<Q: QuantityType>(&self, unit: &Unit<Q>) -> Result<Vector<Q>, UnitError> {
        check_cast::<Q>(self.dimensions())?;
        Ok(Vector {
            data: self.data.immutable_view(),
            display_unit: unit.clone(),
        })
    }

    pub fn quantities(&self) -> Vec<Quantity> {
        Quantities::quantities_for(self.dimensions())
    }
}

impl<K: Kind> Clone for Vector<K> {
    fn clone(&self) -> Self {
        Vector {
            data: self.data.clone(),
            display_unit: self.display_unit.clone(),
        }
    }
}

impl<K: Kind> fmt::Debug for Vector<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("kind", &K::NAME)
            .field("unit", &self.display_unit.any().id())
            .field("storage", self.storage())
            .field("mutable", &self.is_mutable())
            .finish()
    }
}

impl<K: Kind> fmt::Display for Vector<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(false, true))
    }
}

/// 크기, SI 값, 차원이 같으면 같다. 저장 형태와 표시 단위는 보지 않는다.
impl<K: Kind> PartialEq for Vector<K> {
    fn eq(&self, other: &Self) -> bool {
        self.dimensions() == other.dimensions() && self.storage() == other.storage()
    }
}
