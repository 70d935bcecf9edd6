//! 단위가 붙은 값: 스칼라, 절대 스칼라, 벡터, 행렬.

mod absolute;
mod matrix;
mod scalar;
mod vector;

pub use absolute::AbsScalar;
pub use matrix::Matrix;
pub use scalar::Scalar;
pub use vector::Vector;

use crate::unit::AnyUnit;

/// 표시 단위로 환산한 값에 `op`을 적용하고 다시 SI로 돌리는 함수.
fn display_rounding(unit: &AnyUnit, op: fn(f64) -> f64) -> impl Fn(f64) -> f64 + Sync + Send {
    let unit = unit.clone();
    move |si| unit.to_base(op(unit.from_base(si)))
}
