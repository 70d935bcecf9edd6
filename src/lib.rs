//! SI 차원 대수와 단위 환산 라이브러리.
//!
//! 물리량([`Quantity`])은 SI 차원 지문과 단위 표를 가진다. 값([`Scalar`], [`Vector`],
//! [`Matrix`])은 항상 SI 기준 단위로 저장되고 표시 단위만 따로 가진다. 곱셈과 나눗셈은
//! 차원을 더하고 빼서 [`SI`] 값을 만들며, `as_quantity`로 원하는 물리량으로 되돌린다.
//!
//! ```
//! use dimunits::prelude::*;
//! use dimunits::quantities::{duration, speed, Length};
//!
//! let v = speed::KILOMETER_PER_HOUR.scalar(50.0);
//! let t = duration::HOUR.scalar(0.5);
//! let d = v.times(&t).as_quantity::<Length>().unwrap();
//! assert!((d.si() - 25_000.0).abs() < 1e-9);
//! ```

pub mod app;
pub mod config;
pub mod conversion;
pub mod dimensions;
pub mod error;
pub mod format;
pub mod kind;
pub mod parse;
pub mod prefix;
pub mod quantities;
pub mod quantity;
pub mod scale;
pub mod storage;
pub mod unit;
pub mod value;

pub use dimensions::{BaseDimension, SIDimensions};
pub use error::{Error, UnitError, ValueError};
pub use kind::{Absolute, DisplayUnit, Kind, QuantityType, RelWithAbs, Relative, SI};
pub use prefix::SiPrefixes;
pub use quantity::{Quantities, Quantity};
pub use scale::Scale;
pub use storage::StorageType;
pub use unit::{AnyUnit, SIUnit, Unit, UnitBuilder, UnitSystem};
pub use value::{AbsScalar, Matrix, Scalar, Vector};

/// 자주 쓰는 타입 모음.
pub mod prelude {
    pub use crate::dimensions::{BaseDimension, SIDimensions};
    pub use crate::error::{Error, UnitError, ValueError};
    pub use crate::kind::{Absolute, DisplayUnit, Kind, QuantityType, RelWithAbs, Relative, SI};
    pub use crate::prefix::SiPrefixes;
    pub use crate::quantity::{Quantities, Quantity};
    pub use crate::scale::Scale;
    pub use crate::storage::StorageType;
    pub use crate::unit::{AnyUnit, SIUnit, Unit, UnitBuilder, UnitSystem};
    pub use crate::value::{AbsScalar, Matrix, Scalar, Vector};
}
