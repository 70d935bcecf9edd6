//! 벡터/행렬 값의 SI 저장소와 쓰기 시 복사 셀.
//!
//! 저장소는 밀집(행 우선 전체 배열)과 희소(0이 아닌 셀의 행 우선 인덱스 + 값) 두 형태이며,
//! 어느 형태든 같은 논리 값을 가지면 같다고 본다. 벡터는 1행 행렬로 저장한다.
//! 셀 수가 [`PARALLEL_THRESHOLD`]를 넘으면 `parallel` 기능에서 rayon으로 병렬 처리한다.

use std::collections::BTreeMap;
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::ValueError;

/// 이 셀 수를 넘으면 병렬 처리한다.
pub const PARALLEL_THRESHOLD: usize = 999;

/// 저장 형태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageType {
    #[default]
    Dense,
    Sparse,
}

#[derive(Debug, Clone)]
pub struct DenseData {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct SparseData {
    rows: usize,
    cols: usize,
    /// 행 우선 평탄 인덱스, 오름차순
    indices: Vec<usize>,
    values: Vec<f64>,
}

/// SI 값 저장소.
#[derive(Debug, Clone)]
pub enum Storage {
    Dense(DenseData),
    Sparse(SparseData),
}

fn apply_in_place<F>(values: &mut [f64], f: &F)
where
    F: Fn(f64) -> f64 + Sync + Send,
{
    if values.len() > PARALLEL_THRESHOLD {
        #[cfg(feature = "parallel")]
        values.par_iter_mut().for_each(|x| *x = f(*x));
        #[cfg(not(feature = "parallel"))]
        values.iter_mut().for_each(|x| *x = f(*x));
    } else {
        values.iter_mut().for_each(|x| *x = f(*x));
    }
}

fn zip_with<F>(left: &[f64], right: &[f64], f: &F) -> Vec<f64>
where
    F: Fn(f64, f64) -> f64 + Sync + Send,
{
    if left.len() > PARALLEL_THRESHOLD {
        #[cfg(feature = "parallel")]
        return left
            .par_iter()
            .zip(right.par_iter())
            .map(|(a, b)| f(*a, *b))
            .collect();
    }
    left.iter().zip(right).map(|(a, b)| f(*a, *b)).collect()
}

fn sum(values: &[f64]) -> f64 {
    if values.len() > PARALLEL_THRESHOLD {
        #[cfg(feature = "parallel")]
        return values.par_iter().sum();
    }
    values.iter().sum()
}

impl Storage {
    /// 행 우선 값 배열로 밀집 저장소를 만든다.
    pub fn dense(rows: usize, cols: usize, values: Vec<f64>) -> Result<Self, ValueError> {
        if rows == 0 || cols == 0 {
            return Err(ValueError::EmptyArray);
        }
        if values.len() != rows * cols {
            return Err(ValueError::LengthMismatch {
                len: values.len(),
                rows,
                cols,
            });
        }
        Ok(Storage::Dense(DenseData { rows, cols, values }))
    }

    /// (행, 열, 값) 셀 목록으로 희소 저장소를 만든다. 같은 셀이 여러 번 나오면 마지막 값이 남는다.
    pub fn sparse<I>(rows: usize, cols: usize, cells: I) -> Result<Self, ValueError>
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        if rows == 0 || cols == 0 {
            return Err(ValueError::EmptyArray);
        }
        let mut map = BTreeMap::new();
        for (row, col, value) in cells {
            if row >= rows || col >= cols {
                return Err(ValueError::CellOutOfBounds {
                    row,
                    col,
                    rows,
                    cols,
                });
            }
            map.insert(row * cols + col, value);
        }
        let (indices, values) = map.into_iter().filter(|(_, v)| *v != 0.0).unzip();
        Ok(Storage::Sparse(SparseData {
            rows,
            cols,
            indices,
            values,
        }))
    }

    /// 2차원 배열로 만든다. 행 길이가 모두 같아야 한다.
    pub fn from_rows(rows: &[Vec<f64>], storage_type: StorageType) -> Result<Self, ValueError> {
        let expected = rows.first().map(Vec::len).ok_or(ValueError::EmptyArray)?;
        for (row, values) in rows.iter().enumerate() {
            if values.len() != expected {
                return Err(ValueError::RaggedArray {
                    row,
                    len: values.len(),
                    expected,
                });
            }
        }
        let flat = rows.iter().flatten().copied().collect();
        Ok(Storage::dense(rows.len(), expected, flat)?.into_type(storage_type))
    }

    pub fn rows(&self) -> usize {
        match self {
            Storage::Dense(d) => d.rows,
            Storage::Sparse(s) => s.rows,
        }
    }

    pub fn cols(&self) -> usize {
        match self {
            Storage::Dense(d) => d.cols,
            Storage::Sparse(s) => s.cols,
        }
    }

    /// 전체 셀 수.
    pub fn len(&self) -> usize {
        self.rows() * self.cols()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn storage_type(&self) -> StorageType {
        match self {
            Storage::Dense(_) => StorageType::Dense,
            Storage::Sparse(_) => StorageType::Sparse,
        }
    }

    fn check_cell(&self, row: usize, col: usize) -> Result<usize, ValueError> {
        let (rows, cols) = (self.rows(), self.cols());
        if row >= rows || col >= cols {
            return Err(ValueError::CellOutOfBounds {
                row,
                col,
                rows,
                cols,
            });
        }
        Ok(row * cols + col)
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64, ValueError> {
        let index = self.check_cell(row, col)?;
        Ok(self.get_flat(index))
    }

    fn get_flat(&self, index: usize) -> f64 {
        match self {
            Storage::Dense(d) => d.values[index],
            Storage::Sparse(s) => match s.indices.binary_search(&index) {
                Ok(pos) => s.values[pos],
                Err(_) => 0.0,
            },
        }
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), ValueError> {
        let index = self.check_cell(row, col)?;
        match self {
            Storage::Dense(d) => d.values[index] = value,
            Storage::Sparse(s) => match (s.indices.binary_search(&index), value == 0.0) {
                (Ok(pos), true) => {
                    s.indices.remove(pos);
                    s.values.remove(pos);
                }
                (Ok(pos), false) => s.values[pos] = value,
                (Err(_), true) => {}
                (Err(pos), false) => {
                    s.indices.insert(pos, index);
                    s.values.insert(pos, value);
                }
            },
        }
        Ok(())
    }

    /// 행 우선 전체 값.
    pub fn dense_values(&self) -> Vec<f64> {
        match self {
            Storage::Dense(d) => d.values.clone(),
            Storage::Sparse(s) => {
                let mut values = vec![0.0; s.rows * s.cols];
                for (index, value) in s.indices.iter().zip(&s.values) {
                    values[*index] = *value;
                }
                values
            }
        }
    }

    pub fn to_dense(&self) -> Storage {
        Storage::Dense(DenseData {
            rows: self.rows(),
            cols: self.cols(),
            values: self.dense_values(),
        })
    }

    pub fn to_sparse(&self) -> Storage {
        match self {
            Storage::Sparse(_) => self.clone(),
            Storage::Dense(d) => {
                let (indices, values) = d
                    .values
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| **v != 0.0)
                    .map(|(i, v)| (i, *v))
                    .unzip();
                Storage::Sparse(SparseData {
                    rows: d.rows,
                    cols: d.cols,
                    indices,
                    values,
                })
            }
        }
    }

    /// 지정한 형태로 바꾼다. 이미 그 형태면 그대로 돌려준다.
    pub fn into_type(self, storage_type: StorageType) -> Storage {
        match (storage_type, &self) {
            (StorageType::Dense, Storage::Sparse(_)) => self.to_dense(),
            (StorageType::Sparse, Storage::Dense(_)) => self.to_sparse(),
            _ => self,
        }
    }

    /// 0이 아닌 셀 수.
    pub fn cardinality(&self) -> usize {
        match self {
            Storage::Dense(d) => d.values.iter().filter(|v| **v != 0.0).count(),
            Storage::Sparse(s) => s.values.iter().filter(|v| **v != 0.0).count(),
        }
    }

    /// 모든 셀의 합.
    pub fn z_sum(&self) -> f64 {
        match self {
            Storage::Dense(d) => sum(&d.values),
            Storage::Sparse(s) => sum(&s.values),
        }
    }

    /// 모든 셀에 `f`를 적용한다. 희소 저장소에서 `f(0) != 0`이면 밀집 저장소로 바뀐다.
    pub fn assign<F>(&mut self, f: F)
    where
        F: Fn(f64) -> f64 + Sync + Send,
    {
        if let Storage::Sparse(_) = self {
            if f(0.0) != 0.0 {
                *self = self.to_dense();
            }
        }
        match self {
            Storage::Dense(d) => apply_in_place(&mut d.values, &f),
            Storage::Sparse(s) => {
                apply_in_place(&mut s.values, &f);
                if s.values.iter().any(|v| *v == 0.0) {
                    let (indices, values) = s
                        .indices
                        .iter()
                        .zip(&s.values)
                        .filter(|(_, v)| **v != 0.0)
                        .map(|(i, v)| (*i, *v))
                        .unzip();
                    s.indices = indices;
                    s.values = values;
                }
            }
        }
    }

    /// 같은 크기의 두 저장소를 셀별로 결합한다.
    ///
    /// 둘 다 희소이고 `f(0, 0) == 0`이면 결과도 희소이며, 그 밖에는 밀집이다.
    pub fn combine<F>(&self, other: &Storage, f: F) -> Result<Storage, ValueError>
    where
        F: Fn(f64, f64) -> f64 + Sync + Send,
    {
        if self.rows() != other.rows() || self.cols() != other.cols() {
            return Err(ValueError::SizeMismatch {
                left_rows: self.rows(),
                left_cols: self.cols(),
                right_rows: other.rows(),
                right_cols: other.cols(),
            });
        }
        let (rows, cols) = (self.rows(), self.cols());
        if let (Storage::Sparse(a), Storage::Sparse(b)) = (self, other) {
            if f(0.0, 0.0) == 0.0 {
                let mut cells = Vec::with_capacity(a.indices.len() + b.indices.len());
                let (mut i, mut j) = (0, 0);
                while i < a.indices.len() || j < b.indices.len() {
                    let left = a.indices.get(i).copied().unwrap_or(usize::MAX);
                    let right = b.indices.get(j).copied().unwrap_or(usize::MAX);
                    let (index, value) = if left == right {
                        i += 1;
                        j += 1;
                        (left, f(a.values[i - 1], b.values[j - 1]))
                    } else if left < right {
                        i += 1;
                        (left, f(a.values[i - 1], 0.0))
                    } else {
                        j += 1;
                        (right, f(0.0, b.values[j - 1]))
                    };
                    if value != 0.0 {
                        cells.push((index, value));
                    }
                }
                let (indices, values) = cells.into_iter().unzip();
                return Ok(Storage::Sparse(SparseData {
                    rows,
                    cols,
                    indices,
                    values,
                }));
            }
        }
        let left = self.dense_values();
        let right = other.dense_values();
        Ok(Storage::Dense(DenseData {
            rows,
            cols,
            values: zip_with(&left, &right, &f),
        }))
    }

    pub fn row_values(&self, row: usize) -> Result<Vec<f64>, ValueError> {
        self.check_cell(row, 0)?;
        Ok((0..self.cols())
            .map(|col| self.get_flat(row * self.cols() + col))
            .collect())
    }

    pub fn column_values(&self, col: usize) -> Result<Vec<f64>, ValueError> {
        self.check_cell(0, col)?;
        Ok((0..self.rows())
            .map(|row| self.get_flat(row * self.cols() + col))
            .collect())
    }

    /// 전치. 저장 형태는 유지한다.
    pub fn transpose(&self) -> Storage {
        let (rows, cols) = (self.rows(), self.cols());
        match self {
            Storage::Dense(d) => {
                let mut values = vec![0.0; d.values.len()];
                for row in 0..rows {
                    for col in 0..cols {
                        values[col * rows + row] = d.values[row * cols + col];
                    }
                }
                Storage::Dense(DenseData {
                    rows: cols,
                    cols: rows,
                    values,
                })
            }
            Storage::Sparse(s) => {
                let mut cells: Vec<(usize, f64)> = s
                    .indices
                    .iter()
                    .zip(&s.values)
                    .map(|(index, value)| {
                        let (row, col) = (index / cols, index % cols);
                        (col * rows + row, *value)
                    })
                    .collect();
                cells.sort_by_key(|(index, _)| *index);
                let (indices, values) = cells.into_iter().unzip();
                Storage::Sparse(SparseData {
                    rows: cols,
                    cols: rows,
                    indices,
                    values,
                })
            }
        }
    }
}

impl PartialEq for Storage {
    fn eq(&self, other: &Self) -> bool {
        if self.rows() != other.rows() || self.cols() != other.cols() {
            return false;
        }
        match (self, other) {
            (Storage::Sparse(a), Storage::Sparse(b)) => {
                a.indices == b.indices && a.values == b.values
            }
            _ => self.dense_values() == other.dense_values(),
        }
    }
}

/// 쓰기 시 복사를 지원하는 공유 저장소 셀.
///
/// `mutable_view()`로 얻은 사본은 버퍼를 공유하다가 처음 수정할 때 한 번 복제한다.
/// 불변 값은 수정할 수 없다.
#[derive(Debug, Clone)]
pub(crate) struct SharedStorage {
    data: Arc<Storage>,
    mutable: bool,
    copy_on_write: bool,
}

impl SharedStorage {
    pub(crate) fn new(storage: Storage) -> Self {
        SharedStorage {
            data: Arc::new(storage),
            mutable: false,
            copy_on_write: false,
        }
    }

    pub(crate) fn get(&self) -> &Storage {
        &self.data
    }

    pub(crate) fn is_mutable(&self) -> bool {
        self.mutable
    }

    pub(crate) fn is_copy_on_write(&self) -> bool {
        self.copy_on_write
    }

    /// 버퍼를 공유하는 가변 사본. 첫 수정 때 복제된다.
    pub(crate) fn mutable_view(&self) -> Self {
        SharedStorage {
            data: Arc::clone(&self.data),
            mutable: true,
            copy_on_write: true,
        }
    }

    /// 버퍼를 공유하는 불변 사본.
    pub(crate) fn immutable_view(&self) -> Self {
        SharedStorage {
            data: Arc::clone(&self.data),
            mutable: false,
            copy_on_write: false,
        }
    }

    /// 같은 가변성을 가진 새 셀. 버퍼는 공유하지 않는다.
    pub(crate) fn rebuild(&self, storage: Storage) -> Self {
        SharedStorage {
            data: Arc::new(storage),
            mutable: self.mutable,
            copy_on_write: false,
        }
    }

    /// 수정 가능한 저장소를 돌려준다. 공유 중이면 먼저 복제한다.
    pub(crate) fn check_copy_on_write(&mut self) -> Result<&mut Storage, ValueError> {
        if !self.mutable {
            return Err(ValueError::Immutable);
        }
        if self.copy_on_write {
            trace!(cells = self.data.len(), "쓰기 시 복사");
            self.data = Arc::new((*self.data).clone());
            self.copy_on_write = false;
        }
        Ok(Arc::make_mut(&mut self.data))
    }

    /// 저장소 전체를 바꾼다. 공유 버퍼는 건드리지 않는다.
    pub(crate) fn replace(&mut self, storage: Storage) -> Result<(), ValueError> {
        if !self.mutable {
            return Err(ValueError::Immutable);
        }
        self.data = Arc::new(storage);
        self.copy_on_write = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Storage {
        Storage::from_rows(&[vec![1.0, 0.0, 2.0], vec![0.0, 0.0, 3.0]], StorageType::Dense)
            .unwrap()
    }

    #[test]
    fn dense_sparse_equivalence() {
        let dense = sample();
        let sparse = dense.to_sparse();
        assert_eq!(sparse.storage_type(), StorageType::Sparse);
        assert_eq!(dense, sparse);
        assert_eq!(sparse.cardinality(), 3);
        assert_eq!(sparse.z_sum(), 6.0);
        assert_eq!(sparse.get(1, 2).unwrap(), 3.0);
        assert_eq!(sparse.get(1, 1).unwrap(), 0.0);
        assert_eq!(sparse.to_dense().dense_values(), dense.dense_values());
    }

    #[test]
    fn sparse_set_keeps_indices_sorted() {
        let mut s = sample().to_sparse();
        s.set(0, 1, 5.0).unwrap();
        s.set(0, 0, 0.0).unwrap();
        assert_eq!(s.cardinality(), 3);
        assert_eq!(s.row_values(0).unwrap(), vec![0.0, 5.0, 2.0]);
        assert!(matches!(
            s.set(2, 0, 1.0),
            Err(ValueError::CellOutOfBounds { row: 2, .. })
        ));
    }

    #[test]
    fn assign_densifies_when_zero_maps_to_nonzero() {
        let mut s = sample().to_sparse();
        s.assign(|v| v * 2.0);
        assert_eq!(s.storage_type(), StorageType::Sparse);
        assert_eq!(s.z_sum(), 12.0);
        s.assign(|v| v + 1.0);
        assert_eq!(s.storage_type(), StorageType::Dense);
        assert_eq!(s.z_sum(), 18.0);
    }

    #[test]
    fn combine_sparse_and_mixed() {
        let a = sample().to_sparse();
        let b = Storage::sparse(2, 3, [(0, 1, 4.0), (1, 2, -3.0)]).unwrap();
        let sum = a.combine(&b, |x, y| x + y).unwrap();
        assert_eq!(sum.storage_type(), StorageType::Sparse);
        assert_eq!(sum.dense_values(), vec![1.0, 4.0, 2.0, 0.0, 0.0, 0.0]);
        assert_eq!(sum.cardinality(), 3);

        let mixed = sample().combine(&b, |x, y| x * y).unwrap();
        assert_eq!(mixed.storage_type(), StorageType::Dense);
        assert_eq!(mixed.dense_values(), vec![0.0, 0.0, 0.0, 0.0, 0.0, -9.0]);

        let wrong = Storage::dense(3, 2, vec![0.0; 6]).unwrap();
        assert!(matches!(
            a.combine(&wrong, |x, y| x + y),
            Err(ValueError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn transpose_both_forms() {
        let dense = sample();
        let t = dense.transpose();
        assert_eq!((t.rows(), t.cols()), (3, 2));
        assert_eq!(t.column_values(1).unwrap(), vec![0.0, 0.0, 3.0]);
        assert_eq!(dense.to_sparse().transpose(), t);
    }

    #[test]
    fn ragged_and_empty() {
        assert_eq!(
            Storage::from_rows(&[vec![1.0], vec![1.0, 2.0]], StorageType::Dense),
            Err(ValueError::RaggedArray {
                row: 1,
                len: 2,
                expected: 1
            })
        );
        assert_eq!(
            Storage::from_rows(&[], StorageType::Sparse),
            Err(ValueError::EmptyArray)
        );
    }

    #[test]
    fn large_assign_and_sum() {
        let mut s = Storage::dense(1, 5000, vec![1.0; 5000]).unwrap();
        s.assign(|v| v * 3.0);
        assert_eq!(s.z_sum(), 15000.0);
    }

    #[test]
    fn copy_on_write_clones_once() {
        let original = SharedStorage::new(sample()).mutable_view();
        let mut copy = original.mutable_view();
        assert!(copy.is_copy_on_write());
        copy.check_copy_on_write().unwrap().set(0, 0, 9.0).unwrap();
        assert!(!copy.is_copy_on_write());
        assert_eq!(copy.get().get(0, 0).unwrap(), 9.0);
        assert_eq!(original.get().get(0, 0).unwrap(), 1.0);

        let mut frozen = original.immutable_view();
        assert_eq!(
            frozen.check_copy_on_write().map(|_| ()),
            Err(ValueError::Immutable)
        );
    }
}
