//! 내장 물리량과 단위 표.
//!
//! 각 물리량은 처음 사용될 때 초기화되며, 그때 단위 표가 등록되고 전역 레지스트리에 공개된다.
//! 단위 상수(`length::KILOMETER` 등)도 처음 접근할 때 id로 찾아 둔다.

use crate::dimensions::SIDimensions;
use crate::error::Error;
use crate::kind::QuantityType;
use crate::quantity::Quantity;
use crate::scale::Scale;
use crate::unit::{AnyUnit, Unit, UnitSystem};

/// 물리량 표식 타입과 `Kind`/`QuantityType` 구현을 만든다.
///
/// 초기화 함수는 인자로 받은 물리량에만 단위를 등록해야 한다. 안에서 자기 자신의
/// `quantity()`를 부르면 초기화가 재진입한다.
macro_rules! quantity_type {
    ($(#[$meta:meta])* $ty:ident, $dims:expr, $init:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $ty {}

        impl $crate::kind::Kind for $ty {
            const NAME: &'static str = stringify!($ty);
            type Unit = $crate::unit::Unit<$ty>;
        }

        impl $crate::kind::QuantityType for $ty {
            fn quantity() -> &'static $crate::quantity::Quantity {
                static QUANTITY: ::std::sync::LazyLock<$crate::quantity::Quantity> =
                    ::std::sync::LazyLock::new(|| {
                        $crate::quantities::builtin(stringify!($ty), $dims, $init)
                    });
                &QUANTITY
            }
        }
    };
}

/// id로 찾아 두는 단위 상수들.
macro_rules! builtin_units {
    ($ty:ty => { $($(#[$meta:meta])* $name:ident = $id:literal;)* }) => {
        $(
            $(#[$meta])*
            pub static $name: ::std::sync::LazyLock<$crate::unit::Unit<$ty>> =
                ::std::sync::LazyLock::new(|| $crate::quantities::builtin_unit::<$ty>($id));
        )*
    };
}

pub mod absolute_temperature;
pub mod acceleration;
pub mod angle;
pub mod area;
pub mod dimensionless;
pub mod direction;
pub mod duration;
pub mod energy;
pub mod force;
pub mod frequency;
pub mod length;
pub mod mass;
pub mod position;
pub mod power;
pub mod pressure;
pub mod speed;
pub mod temperature;
pub mod time;
pub mod torque;
pub mod volume;

pub use absolute_temperature::AbsoluteTemperature;
pub use acceleration::Acceleration;
pub use angle::Angle;
pub use area::Area;
pub use dimensionless::Dimensionless;
pub use direction::Direction;
pub use duration::Duration;
pub use energy::Energy;
pub use force::Force;
pub use frequency::Frequency;
pub use length::Length;
pub use mass::Mass;
pub use position::Position;
pub use power::Power;
pub use pressure::Pressure;
pub use speed::Speed;
pub use temperature::Temperature;
pub use time::Time;
pub use torque::Torque;
pub use volume::Volume;

/// 내장 물리량을 만들고 단위 표를 등록한다.
///
/// # Panics
///
/// 단위 표가 잘못되었거나 단위를 하나도 등록하지 않으면 패닉한다.
pub(crate) fn builtin(
    name: &'static str,
    dimensions: SIDimensions,
    init: fn(&Quantity) -> Result<(), Error>,
) -> Quantity {
    let quantity = Quantity::new(name, dimensions);
    if let Err(err) = init(&quantity) {
        panic!("내장 물리량 {name}의 단위 표 오류: {err}");
    }
    if quantity.standard_unit().is_none() {
        panic!("내장 물리량 {name}에 단위가 없음");
    }
    quantity
}

/// # Panics
///
/// 단위 표에 없는 id이면 패닉한다.
pub(crate) fn builtin_unit<Q: QuantityType>(id: &str) -> Unit<Q> {
    match Unit::by_id(id) {
        Some(unit) => unit,
        None => panic!("내장 단위 '{id}'이(가) 물리량 {}에 없음", Q::NAME),
    }
}

/// 약어를 여러 개 가진 선형 파생 단위.
fn linear(
    parent: &AnyUnit,
    factor: f64,
    id: &str,
    name: &str,
    abbreviations: &[&str],
    unit_system: UnitSystem,
) -> Result<AnyUnit, Error> {
    parent
        .derive(Scale::linear(factor)?)?
        .id(id)
        .name(name)
        .abbreviations(abbreviations.iter().copied())
        .unit_system(unit_system)
        .build()
}

/// 모든 내장 물리량을 초기화한다. 여러 번 불러도 된다.
pub fn register_builtin() {
    Dimensionless::quantity();
    Length::quantity();
    Position::quantity();
    Duration::quantity();
    Time::quantity();
    Mass::quantity();
    Area::quantity();
    Volume::quantity();
    Speed::quantity();
    Acceleration::quantity();
    Force::quantity();
    Energy::quantity();
    Torque::quantity();
    Power::quantity();
    Pressure::quantity();
    Frequency::quantity();
    Temperature::quantity();
    AbsoluteTemperature::quantity();
    Angle::quantity();
    Direction::quantity();
}
