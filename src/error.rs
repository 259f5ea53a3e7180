use thiserror::Error;

/// 添字や区間が列の範囲外であることを表すエラー
///
/// このエラーを返した操作は木を一切変更しない.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("range {start}..{end} is out of range for length {len}")]
    RangeOutOfBounds { start: usize, end: usize, len: usize },
    #[error("range start {start} is greater than range end {end}")]
    InvertedRange { start: usize, end: usize },
    #[error("range bound overflows usize")]
    BoundOverflow,
}

pub type Result<T, E = RangeError> = std::result::Result<T, E>;
