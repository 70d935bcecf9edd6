use std::fmt;

use crate::dimensions::SIDimensions;
use crate::error::{Error, UnitError, ValueError};
use crate::format::{attach_unit, render_list};
use crate::kind::{check_cast, Absolute, DisplayUnit, Kind, QuantityType, Relative, SI};
use crate::quantity::{Quantities, Quantity};
use crate::storage::{SharedStorage, Storage, StorageType};
use crate::unit::{SIUnit, Unit};
use crate::value::{display_rounding, Scalar, Vector};

/// 같은 종류의 값으로 이루어진 2차원 행렬.
///
/// 가변성과 쓰기 시 복사 규칙은 [`Vector`]와 같다.
pub struct Matrix<K: Kind> {
    data: SharedStorage,
    display_unit: K::Unit,
}

/// 첫 행을 따라 여인수 전개한 행렬식.
fn cofactor_determinant(m: &[Vec<f64>]) -> f64 {
    let n = m.len();
    if n == 1 {
        return m[0][0];
    }
    let mut det = 0.0;
    for col in 0..n {
        let minor: Vec<Vec<f64>> = m[1..]
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter(|(c, _)| *c != col)
                    .map(|(_, v)| *v)
                    .collect()
            })
            .collect();
        let sign = if col % 2 == 0 { 1.0 } else { -1.0 };
        det += sign * m[0][col] * cofactor_determinant(&minor);
    }
    det
}

impl<K: Kind> Matrix<K> {
    /// 단위 `unit`으로 표현한 2차원 배열로 만든다.
    pub fn new(
        rows: &[Vec<f64>],
        unit: &K::Unit,
        storage_type: StorageType,
    ) -> Result<Self, ValueError> {
        let si: Vec<Vec<f64>> = rows
            .iter()
            .map(|row| row.iter().map(|v| unit.any().to_base(*v)).collect())
            .collect();
        Self::from_si_rows(&si, unit, storage_type)
    }

    pub fn from_si_rows(
        rows: &[Vec<f64>],
        display_unit: &K::Unit,
        storage_type: StorageType,
    ) -> Result<Self, ValueError> {
        let storage = Storage::from_rows(rows, storage_type)?;
        Ok(Self::from_storage(storage, display_unit))
    }

    /// (행, 열, SI 값) 목록으로 희소 행렬을 만든다.
    pub fn from_sparse_si(
        rows: usize,
        cols: usize,
        cells: &[(usize, usize, f64)],
        display_unit: &K::Unit,
    ) -> Result<Self, ValueError> {
        let storage = Storage::sparse(rows, cols, cells.iter().copied())?;
        Ok(Self::from_storage(storage, display_unit))
    }

    pub(crate) fn from_storage(storage: Storage, display_unit: &K::Unit) -> Self {
        Matrix {
            data: SharedStorage::new(storage),
            display_unit: display_unit.clone(),
        }
    }

    fn with_storage(&self, storage: Storage) -> Self {
        Matrix {
            data: self.data.rebuild(storage),
            display_unit: self.display_unit.clone(),
        }
    }

    fn storage(&self) -> &Storage {
        self.data.get()
    }

    pub fn rows(&self) -> usize {
        self.storage().rows()
    }

    pub fn cols(&self) -> usize {
        self.storage().cols()
    }

    pub fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }

    fn check_square(&self) -> Result<usize, ValueError> {
        if !self.is_square() {
            return Err(ValueError::NotSquare {
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        Ok(self.rows())
    }

    pub fn storage_type(&self) -> StorageType {
        self.storage().storage_type()
    }

    pub fn display_unit(&self) -> &K::Unit {
        &self.display_unit
    }

    pub fn set_display_unit(&mut self, unit: &K::Unit) {
        self.display_unit = unit.clone();
    }

    pub fn dimensions(&self) -> SIDimensions {
        self.display_unit.any().dimensions()
    }

    pub fn get_si(&self, row: usize, col: usize) -> Result<f64, ValueError> {
        self.storage().get(row, col)
    }

    pub fn get_in_unit(&self, row: usize, col: usize) -> Result<f64, ValueError> {
        Ok(self.display_unit.any().from_base(self.get_si(row, col)?))
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Scalar<K>, ValueError> {
        Ok(Scalar::from_si(self.get_si(row, col)?, &self.display_unit))
    }

    /// 행 우선 SI 값.
    pub fn values_si(&self) -> Vec<Vec<f64>> {
        let cols = self.cols();
        self.storage()
            .dense_values()
            .chunks(cols)
            .map(<[f64]>::to_vec)
            .collect()
    }

    pub fn values_in_unit(&self) -> Vec<Vec<f64>> {
        let unit = self.display_unit.any();
        self.values_si()
            .into_iter()
            .map(|row| row.into_iter().map(|v| unit.from_base(v)).collect())
            .collect()
    }

    pub fn row(&self, row: usize) -> Result<Vector<K>, ValueError> {
        let values = self.storage().row_values(row)?;
        Vector::from_si(values, &self.display_unit, self.storage_type())
    }

    pub fn column(&self, col: usize) -> Result<Vector<K>, ValueError> {
        let values = self.storage().column_values(col)?;
        Vector::from_si(values, &self.display_unit, self.storage_type())
    }

    /// 대각 원소. 정사각 행렬이어야 한다.
    pub fn diagonal(&self) -> Result<Vector<K>, ValueError> {
        let n = self.check_square()?;
        let values = (0..n)
            .map(|i| self.get_si(i, i))
            .collect::<Result<Vec<_>, _>>()?;
        Vector::from_si(values, &self.display_unit, self.storage_type())
    }

    pub fn transpose(&self) -> Self {
        Self::from_storage(self.storage().transpose(), &self.display_unit)
    }

    /// 대각합.
    pub fn trace(&self) -> Result<Scalar<K>, ValueError> {
        Ok(self.diagonal()?.z_sum())
    }

    /// 프로베니우스 노름.
    pub fn norm_frobenius(&self) -> Scalar<K> {
        let mut squares = self.storage().clone();
        squares.assign(|v| v * v);
        Scalar::from_si(squares.z_sum().sqrt(), &self.display_unit)
    }

    pub fn cardinality(&self) -> usize {
        self.storage().cardinality()
    }

    pub fn z_sum(&self) -> Scalar<K> {
        Scalar::from_si(self.storage().z_sum(), &self.display_unit)
    }

    pub fn to_dense(&self) -> Self {
        match self.storage_type() {
            StorageType::Dense => self.clone(),
            StorageType::Sparse => self.with_storage(self.storage().to_dense()),
        }
    }

    pub fn to_sparse(&self) -> Self {
        match self.storage_type() {
            StorageType::Sparse => self.clone(),
            StorageType::Dense => self.with_storage(self.storage().to_sparse()),
        }
    }

    pub fn is_mutable(&self) -> bool {
        self.data.is_mutable()
    }

    pub fn is_copy_on_write(&self) -> bool {
        self.data.is_copy_on_write()
    }

    pub fn mutable(&self) -> Self {
        Matrix {
            data: self.data.mutable_view(),
            display_unit: self.display_unit.clone(),
        }
    }

    pub fn immutable(&self) -> Self {
        Matrix {
            data: self.data.immutable_view(),
            display_unit: self.display_unit.clone(),
        }
    }

    pub fn set_si(&mut self, row: usize, col: usize, value: f64) -> Result<(), ValueError> {
        self.data.check_copy_on_write()?.set(row, col, value)
    }

    pub fn set_in_unit(&mut self, row: usize, col: usize, value: f64) -> Result<(), ValueError> {
        let si = self.display_unit.any().to_base(value);
        self.set_si(row, col, si)
    }

    pub fn set(&mut self, row: usize, col: usize, value: &Scalar<K>) -> Result<(), ValueError> {
        self.set_si(row, col, value.si())
    }

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

    pub fn times_factor(&self, factor: f64) -> Self {
        let mut storage = self.storage().clone();
        storage.assign(move |v| v * factor);
        Self::from_storage(storage, &self.display_unit)
    }

    pub fn to_si_matrix(&self) -> Matrix<SI> {
        Matrix::from_storage(self.storage().clone(), &SIUnit::of(self.dimensions()))
    }

    pub fn to_string_with(&self, verbose: bool, with_unit: bool) -> String {
        let rows: Vec<String> = self
            .values_in_unit()
            .iter()
            .map(|row| render_list(row))
            .collect();
        let mut out = format!("[{}]", rows.join(", "));
        if with_unit {
            out = attach_unit(out, self.display_unit.any());
        }
        if verbose {
            let access = if self.is_mutable() { "Mutable" } else { "Immutable" };
            out = format!("{access} Matrix<{}> {out}", K::NAME);
        }
        out
    }
}

impl<K: Relative> Matrix<K> {
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

    /// 행렬식. 차원은 원소 차원의 n제곱이다.
    pub fn determinant(&self) -> Result<Scalar<SI>, ValueError> {
        let n = self.check_square()?;
        let det = cofactor_determinant(&self.values_si());
        let dims = self.dimensions().pow(n as i32);
        Ok(Scalar::from_si(det, &SIUnit::of(dims)))
    }

    /// 원소별 곱.
    pub fn times<K2: Relative>(&self, other: &Matrix<K2>) -> Result<Matrix<SI>, ValueError> {
        let storage = self.storage().combine(other.storage(), |a, b| a * b)?;
        let dims = self.dimensions().plus(&other.dimensions());
        Ok(Matrix::from_storage(storage, &SIUnit::of(dims)))
    }

    /// 원소별 몫.
    pub fn divide<K2: Relative>(&self, other: &Matrix<K2>) -> Result<Matrix<SI>, ValueError> {
        let storage = self.storage().combine(other.storage(), |a, b| a / b)?;
        let dims = self.dimensions().minus(&other.dimensions());
        Ok(Matrix::from_storage(storage, &SIUnit::of(dims)))
    }

    pub fn times_scalar<K2: Relative>(&self, scalar: &Scalar<K2>) -> Matrix<SI> {
        let factor = scalar.si();
        let mut storage = self.storage().clone();
        storage.assign(move |v| v * factor);
        let dims = self.dimensions().plus(&scalar.dimensions());
        Matrix::from_storage(storage, &SIUnit::of(dims))
    }
}

/// 절대량 행렬. 연산 규칙은 절대량 [`Vector`]와 같다.
impl<A: Absolute> Matrix<A> {
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

    pub fn relative_unit(&self) -> Unit<A::Rel> {
        Unit::<A::Rel>::by_id(self.display_unit.any().id())
            .unwrap_or_else(<A::Rel as QuantityType>::standard_unit)
    }

    pub fn plus_rel(&self, offset: &Matrix<A::Rel>) -> Result<Self, Error> {
        self.check_offset_dimensions(offset.dimensions())?;
        let storage = self.storage().combine(offset.storage(), |a, b| a + b)?;
        Ok(Self::from_storage(storage, &self.display_unit))
    }

    pub fn minus_rel(&self, offset: &Matrix<A::Rel>) -> Result<Self, Error> {
        self.check_offset_dimensions(offset.dimensions())?;
        let storage = self.storage().combine(offset.storage(), |a, b| a - b)?;
        Ok(Self::from_storage(storage, &self.display_unit))
    }

    /// 원소별 간격.
    pub fn minus_abs(&self, other: &Self) -> Result<Matrix<A::Rel>, Error> {
        self.check_offset_dimensions(other.dimensions())?;
        let storage = self.storage().combine(other.storage(), |a, b| a - b)?;
        Ok(Matrix::from_storage(storage, &self.relative_unit()))
    }
}

impl Matrix<SI> {
    pub fn as_quantity<Q: QuantityType>(&self) -> Result<Matrix<Q>, UnitError> {
        self.as_quantity_in(&Q::try_standard_unit()?)
    }

    pub fn as_quantity_in<Q: QuantityType>(&self, unit: &Unit<Q>) -> Result<Matrix<Q>, UnitError> {
        check_cast::<Q>(self.dimensions())?;
        Ok(Matrix {
            data: self.data.immutable_view(),
            display_unit: unit.clone(),
        })
    }

    pub fn quantities(&self) -> Vec<Quantity> {
        Quantities::quantities_for(self.dimensions())
    }
}

impl<K: Kind> Clone for Matrix<K> {
    fn clone(&self) -> Self {
        Matrix {
            data: self.data.clone(),
            display_unit: self.display_unit.clone(),
        }
    }
}

impl<K: Kind> fmt::Debug for Matrix<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix")
            .field("kind", &K::NAME)
            .field("unit", &self.display_unit.any().id())
            .field("storage", self.storage())
            .field("mutable", &self.is_mutable())
            .finish()
    }
}

impl<K: Kind> fmt::Display for Matrix<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(false, true))
    }
}

impl<K: Kind> PartialEq for Matrix<K> {
    fn eq(&self, other: &Self) -> bool {
        self.dimensions() == other.dimensions() && self.storage() == other.storage()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantities::{dimensionless, length, time, Area, Dimensionless, Duration, Length, Time};

    #[test]
    fn determinant_cofactor() {
        let m = Matrix::<Dimensionless>::new(
            &[
                vec![2.0, 0.0, 1.0],
                vec![1.0, 3.0, 2.0],
                vec![1.0, 1.0, 2.0],
            ],
            &dimensionless::UNIT,
            StorageType::Sparse,
        )
        .unwrap();
        let det = m.determinant().unwrap();
        assert!((det.si() - 6.0).abs() < 1e-12);
        assert!(det.dimensions().is_dimensionless());
    }

    #[test]
    fn determinant_carries_dimension_power() {
        let m = Matrix::<Length>::new(
            &[vec![1.0, 2.0], vec![3.0, 4.0]],
            &length::METER,
            StorageType::Dense,
        )
        .unwrap();
        let det = m.determinant().unwrap().as_quantity::<Area>().unwrap();
        assert!((det.si() + 2.0).abs() < 1e-12);
        let wide = Matrix::<Length>::new(&[vec![1.0, 2.0]], &length::METER, StorageType::Dense)
            .unwrap();
        assert_eq!(
            wide.determinant().unwrap_err(),
            ValueError::NotSquare { rows: 1, cols: 2 }
        );
    }

    #[test]
    fn rows_columns_and_trace() {
        let m = Matrix::<Length>::new(
            &[vec![1.0, 2.0], vec![3.0, 4.0]],
            &length::METER,
            StorageType::Dense,
        )
        .unwrap();
        assert_eq!(m.row(1).unwrap().values_si(), vec![3.0, 4.0]);
        assert_eq!(m.column(1).unwrap().values_si(), vec![2.0, 4.0]);
        assert_eq!(m.transpose().get_si(0, 1).unwrap(), 3.0);
        assert_eq!(m.trace().unwrap().si(), 5.0);
        assert!((m.norm_frobenius().si() - 30f64.sqrt()).abs() < 1e-12);
        assert!(matches!(
            m.get_si(2, 0),
            Err(ValueError::CellOutOfBounds { row: 2, .. })
        ));
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = Matrix::<Length>::new(
            &[vec![1.0, 2.0], vec![3.0]],
            &length::METER,
            StorageType::Dense,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ValueError::RaggedArray {
                row: 1,
                len: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn copy_on_write_leaves_original() {
        let original = Matrix::<Length>::new(
            &[vec![1.0, 2.0], vec![3.0, 4.0]],
            &length::METER,
            StorageType::Dense,
        )
        .unwrap();
        let mut copy = original.mutable();
        assert!(copy.is_copy_on_write());
        copy.set_si(0, 0, 10.0).unwrap();
        copy.inc_by(&original).unwrap();
        assert!(!copy.is_copy_on_write());
        assert_eq!(copy.get_si(0, 0).unwrap(), 11.0);
        assert_eq!(original.get_si(0, 0).unwrap(), 1.0);
        assert_eq!(
            original.to_string(),
            "[[1.000, 2.000], [3.000, 4.000]]m"
        );
    }

    #[test]
    fn instants_minus_instants_are_durations() {
        let starts = Matrix::<Time>::new(
            &[vec![0.0, 60.0], vec![120.0, 180.0]],
            &time::SECOND,
            StorageType::Sparse,
        )
        .unwrap();
        let waits = Matrix::<Duration>::new(
            &[vec![30.0, 0.0], vec![0.0, 30.0]],
            &crate::quantities::duration::SECOND,
            StorageType::Dense,
        )
        .unwrap();
        let ends = starts.plus_rel(&waits).unwrap();
        assert_eq!(ends.values_si(), vec![vec![30.0, 60.0], vec![120.0, 210.0]]);
        assert_eq!(ends.minus_rel(&waits).unwrap(), starts);
        let spans = ends.minus_abs(&starts).unwrap();
        assert_eq!(spans, waits);
        assert_eq!(spans.display_unit().id(), "s");
    }
}
