use std::io::{BufRead, Write};
use std::path::Path;

use crate::error::{Result, SeresError};
use crate::util::matrix::CharMatrix;

#[derive(Debug, Clone)]
pub struct FastaRecord {
    pub name: String,
    pub seq: Vec<u8>,
}

/// 多序列比对：taxa 名称与对应的字符矩阵（一行一个 taxon）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    pub taxa: Vec<String>,
    pub matrix: CharMatrix,
}

pub struct FastaReader<R: BufRead> {
    reader: R,
    buf: String,
    done: bool,
    peek_header: Option<String>,
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            done: false,
            peek_header: None,
        }
    }

    pub fn next_record(&mut self) -> Result<Option<FastaRecord>> {
        if self.done {
            return Ok(None);
        }

        // Find header line
        let name = if let Some(h) = self.peek_header.take() {
            h
        } else {
            loop {
                self.buf.clear();
                let n = self.reader.read_line(&mut self.buf)?;
                if n == 0 {
                    self.done = true;
                    return Ok(None);
                }
                let line = trim_eol(&self.buf);
                if line.is_empty() {
                    continue;
                }
                if let Some(h) = line.strip_prefix('>') {
                    break h.to_string();
                }
                return Err(SeresError::AlignmentFormat(
                    "sequence data before the first '>' header".to_string(),
                ));
            }
        };

        // Alignment characters are kept verbatim (gaps, case)
        let mut seq: Vec<u8> = Vec::new();
        loop {
            self.buf.clear();
            let n = self.reader.read_line(&mut self.buf)?;
            if n == 0 {
                self.done = true;
                break;
            }
            let line = trim_eol(&self.buf);
            if let Some(h) = line.strip_prefix('>') {
                self.peek_header = Some(h.to_string());
                break;
            }
            seq.extend_from_slice(line.as_bytes());
        }

        Ok(Some(FastaRecord { name, seq }))
    }
}

fn trim_eol(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

/// Reads a FASTA multiple sequence alignment. All sequences must share one
/// non-zero length.
pub fn read_alignment<R: BufRead>(reader: R) -> Result<Alignment> {
    let mut reader = FastaReader::new(reader);
    let mut taxa = Vec::new();
    let mut rows = Vec::new();
    while let Some(rec) = reader.next_record()? {
        taxa.push(rec.name);
        rows.push(rec.seq);
    }

    if rows.is_empty() {
        return Err(SeresError::AlignmentFormat("no sequences found".to_string()));
    }
    if rows[0].is_empty() {
        return Err(SeresError::AlignmentFormat(format!("sequence '{}' is empty", taxa[0])));
    }
    let matrix = CharMatrix::from_rows(&rows)?;
    Ok(Alignment { taxa, matrix })
}

/// Writes one header line and one sequence line per taxon.
pub fn write_alignment<W: Write>(mut writer: W, alignment: &Alignment) -> Result<()> {
    let matrix = &alignment.matrix;
    if alignment.taxa.len() != matrix.height() {
        return Err(SeresError::AlignmentFormat(format!(
            "{} taxa names for {} rows",
            alignment.taxa.len(),
            matrix.height()
        )));
    }
    for (name, row) in alignment.taxa.iter().zip(matrix.rows()) {
        writeln!(writer, ">{}", name)?;
        writer.write_all(row)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_alignment_file<P: AsRef<Path>>(path: P) -> Result<Alignment> {
    let fh = std::fs::File::open(path)?;
    read_alignment(std::io::BufReader::new(fh))
}

pub fn write_alignment_file<P: AsRef<Path>>(path: P, alignment: &Alignment) -> Result<()> {
    let fh = std::fs::File::create(path)?;
    write_alignment(std::io::BufWriter::new(fh), alignment)
}
