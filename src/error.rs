//! 값/단위 오류 분류.
//!
//! 값 오류(인덱스, 크기, 빈 배열 등)와 단위/차원 오류(환산 계수, 중복 등록, 차원 캐스트,
//! 단위 문자열 해석)는 서로 다른 타입으로 구분한다. 필수 인자가 비어 있는 경우는
//! 상위 [`Error`]의 `MissingArgument`로 보고한다.

use thiserror::Error;

use crate::dimensions::SIDimensions;

/// 벡터/행렬 값 자체에 대한 오류.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// 벡터 인덱스가 범위를 벗어남
    #[error("인덱스 범위를 벗어남: {index} (크기 {size})")]
    IndexOutOfBounds { index: usize, size: usize },
    /// 행렬 셀 인덱스가 범위를 벗어남
    #[error("셀 인덱스 범위를 벗어남: ({row}, {col}) (크기 {rows}x{cols})")]
    CellOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    /// 행마다 길이가 다른 2차원 배열
    #[error("행 길이가 일정하지 않음: {row}행 길이 {len}, 기대값 {expected}")]
    RaggedArray {
        row: usize,
        len: usize,
        expected: usize,
    },
    /// 피연산자 크기 불일치
    #[error("크기 불일치: {left_rows}x{left_cols} vs {right_rows}x{right_cols}")]
    SizeMismatch {
        left_rows: usize,
        left_cols: usize,
        right_rows: usize,
        right_cols: usize,
    },
    /// 데이터 길이가 선언한 크기와 다름
    #[error("데이터 길이 {len}이(가) 크기 {rows}x{cols}와 맞지 않음")]
    LengthMismatch { len: usize, rows: usize, cols: usize },
    /// 빈 배열
    #[error("빈 배열은 허용되지 않음")]
    EmptyArray,
    /// 정사각 행렬이 필요한 연산
    #[error("정사각 행렬이 아님: {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },
    /// 불변 값에 대한 수정 시도
    #[error("불변 값은 수정할 수 없음; 먼저 mutable()을 호출해야 함")]
    Immutable,
}

/// 단위, 환산, 차원에 대한 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    /// 0 이거나 유한하지 않은 환산 계수
    #[error("유효하지 않은 환산 계수: {0}")]
    InvalidFactor(f64),
    /// 유한하지 않은 오프셋
    #[error("유효하지 않은 오프셋: {0}")]
    InvalidOffset(f64),
    /// 로그 스케일 파라미터 오류
    #[error("유효하지 않은 로그 스케일: 기준값 {reference}, 밑 {base}, 배수 {multiplier}")]
    InvalidLogarithmic {
        reference: f64,
        base: f64,
        multiplier: f64,
    },
    /// 같은 id/약어 자리에 명시적 단위가 이미 있음
    #[error("물리량 {quantity}에 '{slot}'이(가) 이미 등록되어 있음 (단위 {existing})")]
    DuplicateUnit {
        quantity: String,
        slot: String,
        existing: String,
    },
    /// 다른 물리량 소속 단위를 등록하려 함
    #[error("단위 '{unit}'은(는) 물리량 {expected}가 아니라 {actual} 소속임")]
    ForeignUnit {
        unit: String,
        expected: String,
        actual: String,
    },
    /// 차원 캐스트 실패
    #[error("차원 불일치: [{actual}] 값을 {target} [{expected}]로 변환할 수 없음")]
    DimensionMismatch {
        target: String,
        expected: SIDimensions,
        actual: SIDimensions,
    },
    /// 값+단위 문자열 해석 실패
    #[error("값 문자열을 해석할 수 없음: '{0}'")]
    Parse(String),
    /// SI 차원 문자열 해석 실패
    #[error("SI 차원 문자열을 해석할 수 없음: '{text}' ({reason})")]
    InvalidDimensions { text: String, reason: &'static str },
    /// 물리량에 없는 단위
    #[error("물리량 {quantity}에서 단위 '{unit}'을(를) 찾을 수 없음")]
    UnknownUnit { quantity: String, unit: String },
    /// 물리량에 표준 단위가 아직 없음
    #[error("물리량 {0}에 등록된 단위가 없음")]
    NoStandardUnit(String),
    /// 선형이 아닌 스케일에서 파생 시도
    #[error("비선형 스케일에서는 단위를 파생할 수 없음: {0}")]
    NonLinearDerivation(String),
    /// 접두어 정책을 적용할 수 없는 단위
    #[error("접두어 정책 {policy}을(를) 단위 '{id}'에 적용할 수 없음")]
    PrefixPolicy { policy: &'static str, id: String },
}

/// 크레이트 공통 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Value(#[from] ValueError),
    #[error(transparent)]
    Unit(#[from] UnitError),
    /// 필수 인자가 비어 있음
    #[error("필수 인자가 비어 있음: {0}")]
    MissingArgument(&'static str),
}
