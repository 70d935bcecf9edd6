//! 벡터/행렬 값의 저장 형태, 가변성, 차원 연산 테스트.
use dimunits::prelude::*;
use dimunits::quantities::{area, duration, length, speed, Area, Length, Speed};

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.9} got {actual:.9} (diff {diff:.3e}, tol {rel_tol})"
    );
}

#[test]
fn copy_on_write_isolates_original() {
    let original =
        Vector::<Length>::new(&[1.0, 2.0, 3.0], &length::METER, StorageType::Dense).unwrap();
    let mut copy = original.mutable();
    assert!(copy.is_mutable());
    assert!(copy.is_copy_on_write());

    copy.set_si(0, 10.0).unwrap();
    copy.multiply_by(2.0).unwrap();
    assert!(!copy.is_copy_on_write());
    assert_eq!(copy.values_si(), vec![20.0, 4.0, 6.0]);
    assert_eq!(original.values_si(), vec![1.0, 2.0, 3.0]);

    let mut frozen = copy.immutable();
    assert_eq!(frozen.set_si(1, 0.0), Err(ValueError::Immutable));
    assert_eq!(frozen.values_si(), vec![20.0, 4.0, 6.0]);
}

#[test]
fn dense_and_sparse_agree() {
    let dense = Vector::<Length>::from_si(
        vec![0.0, 2.0, 0.0, 4.0, 0.0],
        &length::METER,
        StorageType::Dense,
    )
    .unwrap();
    let sparse =
        Vector::<Length>::from_sparse_si(5, &[(1, 2.0), (3, 4.0)], &length::METER).unwrap();
    assert_eq!(sparse.storage_type(), StorageType::Sparse);
    assert_eq!(dense.values_si(), sparse.values_si());
    assert_eq!(dense.cardinality(), 2);
    assert_eq!(sparse.cardinality(), 2);
    assert_close("z_sum", sparse.z_sum().si(), dense.z_sum().si(), 1e-15);

    let converted = dense.to_sparse();
    assert_eq!(converted.storage_type(), StorageType::Sparse);
    assert_eq!(converted.to_dense().values_si(), dense.values_si());

    let sum = dense.plus(&sparse).unwrap();
    assert_eq!(sum.values_si(), vec![0.0, 4.0, 0.0, 8.0, 0.0]);
}

#[test]
fn elementwise_product_casts_to_area() {
    let sides = Vector::<Length>::new(&[2.0, 3.0], &length::METER, StorageType::Dense).unwrap();
    let squares = sides.times(&sides).unwrap().as_quantity::<Area>().unwrap();
    assert_eq!(squares.values_si(), vec![4.0, 9.0]);
    assert_eq!(squares.display_unit().id(), area::SQUARE_METER.id());
    assert!(sides.times(&sides).unwrap().as_quantity::<Speed>().is_err());
}

#[test]
fn vector_times_scalar() {
    let speeds =
        Vector::<Speed>::new(&[36.0, 72.0], &speed::KILOMETER_PER_HOUR, StorageType::Dense)
            .unwrap();
    let distances = speeds
        .times_scalar(&duration::MINUTE.scalar(1.0))
        .as_quantity_in(&length::KILOMETER)
        .unwrap();
    let km = distances.values_in_unit();
    assert_close("first", km[0], 0.6, 1e-12);
    assert_close("second", km[1], 1.2, 1e-12);
    assert_eq!(distances.to_string(), "[0.600, 1.200]km");
}

#[test]
fn size_mismatch_is_reported() {
    let a = Vector::<Length>::new(&[1.0, 2.0], &length::METER, StorageType::Dense).unwrap();
    let b = Vector::<Length>::new(&[1.0, 2.0, 3.0], &length::METER, StorageType::Dense).unwrap();
    assert!(matches!(
        a.plus(&b),
        Err(Error::Value(ValueError::SizeMismatch { .. }))
    ));
}

#[test]
fn matrix_copy_on_write_and_transpose() {
    let m = Matrix::<Length>::new(
        &[vec![1.0, 2.0], vec![3.0, 4.0]],
        &length::METER,
        StorageType::Sparse,
    )
    .unwrap();
    let mut edit = m.mutable();
    edit.set_si(0, 1, 0.0).unwrap();
    assert_eq!(m.get_si(0, 1).unwrap(), 2.0);
    assert_eq!(edit.get_si(0, 1).unwrap(), 0.0);
    assert_eq!(edit.cardinality(), 3);

    let t = m.transpose();
    assert_eq!(t.values_si(), vec![vec![1.0, 3.0], vec![2.0, 4.0]]);
    assert_close("trace", m.trace().unwrap().si(), 5.0, 1e-15);
    let det = m.determinant().unwrap().as_quantity::<Area>().unwrap();
    assert_close("det", det.si(), -2.0, 1e-12);
}

#[test]
fn large_vectors_take_parallel_path() {
    let values: Vec<f64> = (0..5000).map(f64::from).collect();
    let v = Vector::<Length>::new(&values, &length::KILOMETER, StorageType::Dense).unwrap();
    let mut doubled = v.mutable();
    doubled.multiply_by(2.0).unwrap();
    assert_close("z_sum", doubled.z_sum().si(), 2.0 * 1000.0 * 4999.0 * 5000.0 / 2.0, 1e-12);
    assert_close("sample", doubled.get_in_unit(4999).unwrap(), 9998.0, 1e-12);
}
