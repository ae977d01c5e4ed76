//! Random walk keys.
//!
//! A [`RandomWalk`] fully describes one resampling run: a sequence of
//! [`WalkSegment`]s, each a maximal run over original columns in one
//! direction. Given the walk and the original alignment the replicate can be
//! rebuilt, and any replicate column can be translated back without rerunning
//! the random process.

pub mod text;

use serde::{Deserialize, Serialize};

use crate::error::{RangeKind, Result, SeresError};

/// 重采样器在原始比对上移动的方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Right,
    Left,
}

impl Direction {
    #[inline]
    pub fn reverse(self) -> Self {
        match self {
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
        }
    }

    #[inline]
    pub fn as_char(self) -> char {
        match self {
            Direction::Right => 'r',
            Direction::Left => 'l',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'r' => Some(Direction::Right),
            'l' => Some(Direction::Left),
            _ => None,
        }
    }
}

/// 一段不改变方向的连续游走。
///
/// "replicate 位置 4、原始位置 8、向右 10 个位点" <-> `4:8:10:r`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WalkSegment {
    /// 本段在 replicate 中的起始列
    pub replicate_pos: usize,
    /// 本段在原始比对中的起始列
    pub original_pos: usize,
    /// 本段覆盖的 replicate 列数
    pub length: usize,
    pub direction: Direction,
}

impl WalkSegment {
    pub fn new(replicate_pos: usize, original_pos: usize, length: usize, direction: Direction) -> Self {
        Self { replicate_pos, original_pos, length, direction }
    }

    /// One past the last replicate column covered by this segment.
    #[inline]
    pub fn replicate_end(&self) -> usize {
        self.replicate_pos + self.length
    }

    /// Original column of the last site visited, `None` for an empty run or
    /// a left run that would pass column 0.
    pub fn last_original(&self) -> Option<usize> {
        let steps = self.length.checked_sub(1)?;
        match self.direction {
            Direction::Right => self.original_pos.checked_add(steps),
            Direction::Left => self.original_pos.checked_sub(steps),
        }
    }

    /// Smallest and largest original column touched by the run.
    pub fn original_range(&self) -> Option<(usize, usize)> {
        let last = self.last_original()?;
        Some((self.original_pos.min(last), self.original_pos.max(last)))
    }

    #[inline]
    fn contains(&self, replicate_index: usize) -> bool {
        replicate_index >= self.replicate_pos && replicate_index < self.replicate_end()
    }

    /// Original column the walk expects next after turning around at the end
    /// of this segment.
    fn next_original(&self) -> Option<usize> {
        let last = self.last_original()?;
        match self.direction {
            Direction::Right => last.checked_sub(1),
            Direction::Left => last.checked_add(1),
        }
    }
}

/// An ordered, validity-constrained sequence of [`WalkSegment`]s.
///
/// Invariants, enforced by [`RandomWalk::add`]:
/// - every segment has a positive length and never passes below column 0;
/// - segments are contiguous in replicate coordinates;
/// - consecutive segments alternate direction;
/// - a segment starts one site before (after a right run) or after (after a
///   left run) the site where the previous run turned around.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<WalkSegment>", into = "Vec<WalkSegment>")]
pub struct RandomWalk {
    segments: Vec<WalkSegment>,
}

impl RandomWalk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `segment` if it continues the walk. Returns `false` and leaves
    /// the walk untouched otherwise.
    pub fn add(&mut self, segment: WalkSegment) -> bool {
        if segment.last_original().is_none() {
            return false;
        }
        if segment.replicate_pos.checked_add(segment.length).is_none() {
            return false;
        }

        let Some(last) = self.segments.last() else {
            self.segments.push(segment);
            return true;
        };

        if segment.replicate_pos != last.replicate_end() {
            return false;
        }
        if segment.direction != last.direction.reverse() {
            return false;
        }
        if last.next_original() != Some(segment.original_pos) {
            return false;
        }

        self.segments.push(segment);
        true
    }

    /// Appends a run starting at the current end of the walk.
    pub fn add_run(&mut self, original_pos: usize, length: usize, direction: Direction) -> bool {
        let replicate_pos = self.length();
        self.add(WalkSegment::new(replicate_pos, original_pos, length, direction))
    }

    /// Number of replicate columns described by the walk.
    pub fn length(&self) -> usize {
        self.segments.last().map_or(0, WalkSegment::replicate_end)
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[WalkSegment] {
        &self.segments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WalkSegment> {
        self.segments.iter()
    }

    /// Smallest and largest original column visited anywhere in the walk.
    pub fn original_span(&self) -> Option<(usize, usize)> {
        self.segments
            .iter()
            .filter_map(WalkSegment::original_range)
            .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
    }

    /// Original column copied into replicate column `replicate_index`.
    pub fn lookup_position(&self, replicate_index: usize) -> Result<usize> {
        let (seg, diff) = self.locate(replicate_index)?;
        let pos = match seg.direction {
            Direction::Right => seg.original_pos + diff,
            Direction::Left => seg.original_pos - diff,
        };
        Ok(pos)
    }

    /// Original boundary adjacent to the site at `replicate_index`.
    ///
    /// Boundaries are indexed by the original site immediately following
    /// them, so a left run reports one past the visited site.
    pub fn lookup_breakpoint(&self, replicate_index: usize) -> Result<usize> {
        let (seg, diff) = self.locate(replicate_index)?;
        let pos = match seg.direction {
            Direction::Right => seg.original_pos + diff,
            Direction::Left => seg.original_pos - diff + 1,
        };
        Ok(pos)
    }

    // 二分查找 replicate_pos <= idx 的最后一段
    fn locate(&self, replicate_index: usize) -> Result<(&WalkSegment, usize)> {
        let out_of_range = || SeresError::out_of_range(RangeKind::Replicate, replicate_index, self.length());
        let after = self.segments.partition_point(|s| s.replicate_pos <= replicate_index);
        let seg = after
            .checked_sub(1)
            .map(|i| &self.segments[i])
            .filter(|s| s.contains(replicate_index))
            .ok_or_else(out_of_range)?;
        Ok((seg, replicate_index - seg.replicate_pos))
    }
}

impl TryFrom<Vec<WalkSegment>> for RandomWalk {
    type Error = SeresError;

    fn try_from(segments: Vec<WalkSegment>) -> Result<Self> {
        let mut walk = RandomWalk::new();
        for (index, seg) in segments.into_iter().enumerate() {
            if !walk.add(seg) {
                return Err(SeresError::InvalidWalk { index });
            }
        }
        Ok(walk)
    }
}

impl From<RandomWalk> for Vec<WalkSegment> {
    fn from(walk: RandomWalk) -> Self {
        walk.segments
    }
}

impl<'a> IntoIterator for &'a RandomWalk {
    type Item = &'a WalkSegment;
    type IntoIter = std::slice::Iter<'a, WalkSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
