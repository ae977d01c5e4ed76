use std::ops::{Index, IndexMut};

use crate::error::{RangeKind, Result, SeresError};

/// 行优先存储的字符矩阵，行 = taxa，列 = 比对位点。
///
/// 尺寸在构造后固定。`get` / `set` 做边界检查并返回 [`SeresError::OutOfRange`]；
/// `matrix[(row, col)]` 只用于调用方已经确认过边界的内部路径，越界时 panic。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CharMatrix {
    height: usize,
    length: usize,
    data: Vec<u8>,
}

impl CharMatrix {
    pub fn new(height: usize, length: usize) -> Self {
        Self { height, length, data: vec![0u8; height * length] }
    }

    /// Builds a matrix from equal-length rows.
    pub fn from_rows<I, R>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[u8]>,
    {
        let mut data = Vec::new();
        let mut height = 0usize;
        let mut length = 0usize;
        for row in rows {
            let row = row.as_ref();
            if height == 0 {
                length = row.len();
            } else if row.len() != length {
                return Err(SeresError::AlignmentFormat(format!(
                    "row {} has length {}, expected {}",
                    height,
                    row.len(),
                    length
                )));
            }
            data.extend_from_slice(row);
            height += 1;
        }
        Ok(Self { height, length, data })
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn row(&self, row_index: usize) -> Option<&[u8]> {
        if row_index >= self.height {
            return None;
        }
        let start = row_index * self.length;
        Some(&self.data[start..start + self.length])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        (0..self.height).map(move |r| &self.data[r * self.length..(r + 1) * self.length])
    }

    pub fn get(&self, row_index: usize, col_index: usize) -> Result<u8> {
        let offset = self.offset(row_index, col_index)?;
        Ok(self.data[offset])
    }

    pub fn set(&mut self, row_index: usize, col_index: usize, c: u8) -> Result<()> {
        let offset = self.offset(row_index, col_index)?;
        self.data[offset] = c;
        Ok(())
    }

    fn offset(&self, row_index: usize, col_index: usize) -> Result<usize> {
        if row_index >= self.height {
            return Err(SeresError::out_of_range(RangeKind::Row, row_index, self.height));
        }
        if col_index >= self.length {
            return Err(SeresError::out_of_range(RangeKind::Column, col_index, self.length));
        }
        Ok(row_index * self.length + col_index)
    }
}

impl Index<(usize, usize)> for CharMatrix {
    type Output = u8;

    #[inline]
    fn index(&self, (row_index, col_index): (usize, usize)) -> &u8 {
        debug_assert!(row_index < self.height && col_index < self.length);
        &self.data[row_index * self.length + col_index]
    }
}

impl IndexMut<(usize, usize)> for CharMatrix {
    #[inline]
    fn index_mut(&mut self, (row_index, col_index): (usize, usize)) -> &mut u8 {
        debug_assert!(row_index < self.height && col_index < self.length);
        &mut self.data[row_index * self.length + col_index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_keeps_row_major_layout() {
        let m = CharMatrix::from_rows(["ACGT", "A-GT"]).unwrap();
        assert_eq!(m.height(), 2);
        assert_eq!(m.length(), 4);
        assert_eq!(m.get(1, 1).unwrap(), b'-');
        assert_eq!(m[(0, 3)], b'T');
        assert_eq!(m.row(1), Some(&b"A-GT"[..]));
        assert_eq!(m.row(2), None);
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        let err = CharMatrix::from_rows(["ACGT", "AC"]).unwrap_err();
        assert!(matches!(err, SeresError::AlignmentFormat(_)));
    }

    #[test]
    fn checked_access_reports_range_errors() {
        let mut m = CharMatrix::new(2, 3);
        assert!(m.set(1, 2, b'N').is_ok());
        assert_eq!(m.get(1, 2).unwrap(), b'N');
        assert!(matches!(
            m.get(2, 0),
            Err(SeresError::OutOfRange { kind: RangeKind::Row, index: 2, bound: 2 })
        ));
        assert!(matches!(
            m.set(0, 3, b'A'),
            Err(SeresError::OutOfRange { kind: RangeKind::Column, index: 3, bound: 3 })
        ));
    }

    #[test]
    fn clone_duplicates_buffer() {
        let a = CharMatrix::from_rows(["AC"]).unwrap();
        let mut b = a.clone();
        b[(0, 0)] = b'T';
        assert_eq!(a.get(0, 0).unwrap(), b'A');
        assert_eq!(b.get(0, 0).unwrap(), b'T');
    }
}
