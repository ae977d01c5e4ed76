//! Textual form of a walk: `0:5:3:r, 3:6:4:l;`
//!
//! Each segment is `<replicate_pos>:<original_pos>:<length>:<direction>`,
//! segments are separated by `", "` and the walk is terminated by `;`.

use std::fmt;
use std::str::FromStr;

use super::{Direction, RandomWalk, WalkSegment};
use crate::error::{Result, SeresError};

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl fmt::Display for WalkSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}:{}", self.replicate_pos, self.original_pos, self.length, self.direction)
    }
}

impl fmt::Display for RandomWalk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", seg)?;
        }
        f.write_str(";")
    }
}

impl FromStr for Direction {
    type Err = SeresError;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Direction::from_char(c)
                .ok_or_else(|| SeresError::WalkFormat(format!("unknown direction '{}'", c))),
            _ => Err(SeresError::WalkFormat(format!("bad direction field '{}'", s))),
        }
    }
}

impl FromStr for WalkSegment {
    type Err = SeresError;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        let fields: Vec<&str> = token.split(':').collect();
        if fields.len() != 4 {
            return Err(SeresError::WalkFormat(format!(
                "segment '{}' needs 4 ':'-separated fields, found {}",
                token,
                fields.len()
            )));
        }
        Ok(WalkSegment {
            replicate_pos: parse_field(fields[0], "replicate position")?,
            original_pos: parse_field(fields[1], "original position")?,
            length: parse_field(fields[2], "length")?,
            direction: fields[3].trim().parse()?,
        })
    }
}

impl FromStr for RandomWalk {
    type Err = SeresError;

    /// Parses the textual form. Every segment goes through [`RandomWalk::add`],
    /// so a well-formed but discontinuous walk is reported as
    /// [`SeresError::InvalidWalk`].
    fn from_str(s: &str) -> Result<Self> {
        let body = s
            .trim()
            .strip_suffix(';')
            .ok_or_else(|| SeresError::WalkFormat("walk is not terminated by ';'".to_string()))?;

        let mut walk = RandomWalk::new();
        if body.trim().is_empty() {
            return Ok(walk);
        }
        for (index, token) in body.split(',').enumerate() {
            let seg: WalkSegment = token.parse()?;
            if !walk.add(seg) {
                return Err(SeresError::InvalidWalk { index });
            }
        }
        Ok(walk)
    }
}

fn parse_field(field: &str, what: &str) -> Result<usize> {
    let field = field.trim();
    field
        .parse::<usize>()
        .map_err(|e| SeresError::WalkFormat(format!("bad {} '{}': {}", what, field, e)))
}
