//! SI 차원 대수, 스케일 역변환, 저장 형태에 대한 속성 기반 테스트.
use dimunits::prelude::*;
use dimunits::quantities::{length, Length};
use proptest::prelude::*;

fn arb_dimensions() -> impl Strategy<Value = SIDimensions> {
    prop::array::uniform9(-4i32..=4).prop_map(SIDimensions::new)
}

fn arb_scale() -> impl Strategy<Value = Scale> {
    prop_oneof![
        Just(Scale::Identity),
        (1e-6f64..1e6).prop_map(|factor| Scale::Linear { factor }),
        (1e-3f64..1e3, -500.0f64..500.0)
            .prop_map(|(factor, offset)| Scale::OffsetLinear { factor, offset }),
    ]
}

// 희소 저장소가 의미 있도록 절반쯤은 0
fn arb_cell() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0f64), -1e6f64..1e6]
}

fn arb_values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(arb_cell(), 1..64)
}

fn arb_grid() -> impl Strategy<Value = Vec<Vec<f64>>> {
    (1usize..6, 1usize..6).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(prop::collection::vec(arb_cell(), cols), rows)
    })
}

proptest! {
    #[test]
    fn dimension_strings_round_trip(dims in arb_dimensions()) {
        let compact: SIDimensions = dims.to_string().parse().unwrap();
        prop_assert_eq!(compact, dims);
        let dotted: SIDimensions = dims.to_string_with(true, ".", "^").parse().unwrap();
        prop_assert_eq!(dotted, dims);
        let signed: SIDimensions = dims.to_string_with(false, "", "").parse().unwrap();
        prop_assert_eq!(signed, dims);
    }

    #[test]
    fn dimension_algebra_is_a_group(a in arb_dimensions(), b in arb_dimensions()) {
        prop_assert_eq!(a + b, b + a);
        prop_assert_eq!((a + b) - b, a);
        prop_assert!((a - a).is_dimensionless());
        prop_assert_eq!(a.pow(2), a + a);
        prop_assert_eq!(-a, SIDimensions::DIMENSIONLESS - a);
    }

    #[test]
    fn scale_from_base_inverts_to_base(scale in arb_scale(), x in -1e6f64..1e6) {
        let back = scale.to_base(scale.from_base(x));
        let intercept = scale.offset().unwrap_or(0.0).abs() * scale.factor().unwrap_or(1.0);
        let magnitude = x.abs() + intercept + 1.0;
        prop_assert!((back - x).abs() <= 1e-9 * magnitude, "{:?}: {} -> {}", scale, x, back);
    }

    #[test]
    fn sparse_form_preserves_values(values in arb_values()) {
        let dense = Vector::<Length>::from_si(values.clone(), &length::METER, StorageType::Dense)
            .unwrap();
        let sparse = dense.to_sparse();
        prop_assert_eq!(sparse.values_si(), values.clone());
        prop_assert_eq!(sparse.cardinality(), values.iter().filter(|v| **v != 0.0).count());
        prop_assert!(dense == sparse);
    }
}

proptest! {
    #[test]
    fn every_registered_unit_round_trips(x in -1e3f64..1e3) {
        for quantity in Quantities::all() {
            for unit in quantity.units() {
                let back = unit.from_base(unit.to_base(x));
                let tol = 1e-9 * (x.abs() + 1.0);
                prop_assert!(
                    (back - x).abs() <= tol,
                    "{} {}: {} -> {}", quantity.name(), unit.id(), x, back
                );
            }
        }
    }

    #[test]
    fn product_dimensions_add(a in arb_dimensions(), b in arb_dimensions(), x in 0.1f64..10.0) {
        let left = Scalar::<SI>::from_si_dimensions(x, a);
        let right = Scalar::<SI>::from_si_dimensions(2.0, b);
        prop_assert_eq!(left.times(&right).dimensions(), a + b);
        prop_assert_eq!(left.divide(&right).dimensions(), a - b);
        prop_assert!((left.times(&right).si() - 2.0 * x).abs() < 1e-12);
    }
}

proptest! {
    #[test]
    fn mutable_copy_never_touches_original(
        values in arb_values(),
        index in any::<prop::sample::Index>(),
        replacement in 1e-3f64..1e3,
    ) {
        let original =
            Vector::<Length>::from_si(values.clone(), &length::METER, StorageType::Sparse).unwrap();
        let mut copy = original.mutable();
        let i = index.index(values.len());
        copy.set_si(i, values[i] + replacement).unwrap();
        copy.multiply_by(2.0).unwrap();
        prop_assert!(!copy.is_copy_on_write());
        prop_assert_eq!(original.values_si(), values.clone());
        prop_assert!(!original.is_mutable());
        prop_assert!(copy.get_si(i).unwrap() != values[i]);
    }

    #[test]
    fn matrix_dense_and_sparse_agree(grid in arb_grid()) {
        let (rows, cols) = (grid.len(), grid[0].len());
        let dense = Matrix::<Length>::from_si_rows(&grid, &length::METER, StorageType::Dense)
            .unwrap();
        let cells: Vec<(usize, usize, f64)> = grid
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, v)| (r, c, *v)))
            .filter(|(_, _, v)| *v != 0.0)
            .collect();
        let sparse = Matrix::<Length>::from_sparse_si(rows, cols, &cells, &length::METER).unwrap();
        prop_assert_eq!(sparse.values_si(), grid.clone());
        prop_assert_eq!(sparse.cardinality(), cells.len());
        prop_assert!(dense == sparse);
        let round_trip = dense.to_sparse().to_dense();
        prop_assert_eq!(round_trip.storage_type(), StorageType::Dense);
        prop_assert_eq!(round_trip.values_si(), grid);
    }
}
