//! 将 replicate 坐标翻译回原始比对坐标。

use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use crate::error::SeresError;
use crate::walk::RandomWalk;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranslateMode {
    /// 被复制的原始列
    #[default]
    Position,
    /// 原始位点之间的断点
    Breakpoint,
}

#[derive(Debug, Clone)]
pub struct TranslateOpt {
    pub walk: PathBuf,
    pub mode: TranslateMode,
    /// 从文件读取坐标；缺省时读取调用方提供的输入（命令行下为 stdin）
    pub file: Option<PathBuf>,
    pub sep: char,
}

/// Splits `text` on `sep` into replicate indices. Surrounding whitespace is
/// ignored and empty tokens are skipped.
pub fn parse_locations(text: &str, sep: char) -> crate::error::Result<Vec<usize>> {
    text.split(sep)
        .map(str::trim)
        .filter(|tok| !tok.is_empty())
        .map(|tok| {
            tok.parse::<usize>()
                .map_err(|e| SeresError::LocationFormat(format!("'{}': {}", tok, e)))
        })
        .collect()
}

pub fn translate_locations(
    walk: &RandomWalk,
    locations: &[usize],
    mode: TranslateMode,
) -> crate::error::Result<Vec<usize>> {
    locations
        .iter()
        .map(|&loc| match mode {
            TranslateMode::Position => walk.lookup_position(loc),
            TranslateMode::Breakpoint => walk.lookup_breakpoint(loc),
        })
        .collect()
}

pub fn format_translations(values: &[usize]) -> String {
    values.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

pub fn read_walk_file(path: &std::path::Path) -> Result<RandomWalk> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot open walk file '{}'", path.display()))?;
    let walk = text
        .parse::<RandomWalk>()
        .with_context(|| format!("walk file '{}' is not a valid walk", path.display()))?;
    Ok(walk)
}

/// Loads the walk, reads locations from `opt.file` or `input`, and writes the
/// translated values as one line.
pub fn run_translate<R: Read, W: Write>(opt: &TranslateOpt, mut input: R, mut output: W) -> Result<()> {
    let walk = read_walk_file(&opt.walk)?;

    let text = match &opt.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("cannot open location file '{}'", path.display()))?,
        None => {
            let mut s = String::new();
            input.read_to_string(&mut s).context("cannot read locations")?;
            s
        }
    };
    let locations = parse_locations(&text, opt.sep)?;
    debug!(locations = locations.len(), mode = ?opt.mode, "translating");

    let values = translate_locations(&walk, &locations, opt.mode)?;
    writeln!(output, "{}", format_translations(&values))?;
    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk() -> RandomWalk {
        "0:5:3:r, 3:6:4:l;".parse().unwrap()
    }

    #[test]
    fn parse_locations_with_separators() {
        assert_eq!(parse_locations("0,2, 3\n", ',').unwrap(), vec![0, 2, 3]);
        assert_eq!(parse_locations("1\t4\t", '\t').unwrap(), vec![1, 4]);
        assert_eq!(parse_locations("", ',').unwrap(), Vec::<usize>::new());
        assert!(matches!(parse_locations("1,x", ','), Err(SeresError::LocationFormat(_))));
        assert!(parse_locations("1,-2", ',').is_err());
    }

    #[test]
    fn translate_positions_and_breakpoints() {
        let w = walk();
        let pos = translate_locations(&w, &[0, 2, 3, 6], TranslateMode::Position).unwrap();
        assert_eq!(pos, vec![5, 7, 6, 3]);
        let bp = translate_locations(&w, &[0, 3, 6], TranslateMode::Breakpoint).unwrap();
        assert_eq!(bp, vec![5, 7, 4]);
        assert_eq!(format_translations(&bp), "5, 7, 4");
    }

    #[test]
    fn out_of_range_location_fails() {
        assert!(translate_locations(&walk(), &[7], TranslateMode::Position).is_err());
    }

    #[test]
    fn run_translate_reads_given_input() {
        let dir = tempfile::tempdir().unwrap();
        let walk_path = dir.path().join("replicate-1.walk");
        std::fs::write(&walk_path, "0:5:3:r, 3:6:4:l;\n").unwrap();

        let opt = TranslateOpt {
            walk: walk_path,
            mode: TranslateMode::Breakpoint,
            file: None,
            sep: ';',
        };
        let mut out = Vec::new();
        run_translate(&opt, "1;3;5".as_bytes(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "6, 7, 5\n");
    }
}
