use crate::error::{RangeKind, Result, SeresError};
use crate::util::matrix::CharMatrix;
use crate::walk::RandomWalk;

/// 按 walk 从原始比对复制列，得到 replicate 矩阵。
///
/// 输出的行数与输入相同，列数为 `walk.length()`；输出第 `j` 列是输入第
/// `walk.lookup_position(j)` 列。walk 访问到的任何原始列越界时在复制前直接报错。
pub fn resample(input: &CharMatrix, walk: &RandomWalk) -> Result<CharMatrix> {
    if let Some((_, max_col)) = walk.original_span() {
        if max_col >= input.length() {
            return Err(SeresError::out_of_range(RangeKind::Original, max_col, input.length()));
        }
    }

    let height = input.height();
    let mut output = CharMatrix::new(height, walk.length());
    for j in 0..walk.length() {
        let i = walk.lookup_position(j)?;
        for row in 0..height {
            output[(row, j)] = input[(row, i)];
        }
    }
    Ok(output)
}
