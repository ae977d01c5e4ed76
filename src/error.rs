use std::fmt;

use thiserror::Error;

/// 越界访问所涉及的坐标空间
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeKind {
    /// replicate 坐标（walk 查询）
    Replicate,
    /// 原始比对的列坐标
    Original,
    /// 矩阵行
    Row,
    /// 矩阵列
    Column,
}

impl fmt::Display for RangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RangeKind::Replicate => "replicate position",
            RangeKind::Original => "original column",
            RangeKind::Row => "row",
            RangeKind::Column => "column",
        };
        f.write_str(s)
    }
}

/// Errors produced by the walk model, the resampler and the file formats.
#[derive(Debug, Error)]
pub enum SeresError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed FASTA alignment (unequal rows, empty sequences, stray data).
    #[error("alignment format error: {0}")]
    AlignmentFormat(String),

    /// Malformed walk text (bad separators, unparseable integers, bad direction).
    #[error("walk format error: {0}")]
    WalkFormat(String),

    /// Malformed location list given to the translator.
    #[error("location format error: {0}")]
    LocationFormat(String),

    /// A well-formed segment that breaks walk continuity.
    #[error("walk segment {index} does not continue the walk")]
    InvalidWalk { index: usize },

    #[error("{kind} {index} out of range (bound {bound})")]
    OutOfRange {
        kind: RangeKind,
        index: usize,
        bound: usize,
    },

    /// Rejected before any generation work begins.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl SeresError {
    pub(crate) fn out_of_range(kind: RangeKind, index: usize, bound: usize) -> Self {
        Self::OutOfRange { kind, index, bound }
    }
}

pub type Result<T> = std::result::Result<T, SeresError>;
