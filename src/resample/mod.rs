//! 重采样：生成随机游走并据此从原始比对构建 replicate。

pub mod apply;
pub mod generate;

pub use apply::resample;
pub use generate::{check_params, generate_random_walk};

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::io::fasta::{self, Alignment};
use crate::walk::RandomWalk;

pub const DEFAULT_BIAS: f64 = 0.01;

/// 重采样参数
#[derive(Debug, Clone)]
pub struct ResampleOpt {
    /// 每个位点掉头的概率，取值 (0, 1]
    pub bias: f64,
    /// replicate 长度，缺省为输入比对长度
    pub length: Option<usize>,
    /// replicate 个数
    pub number: usize,
    /// 输出目录
    pub out_dir: PathBuf,
    pub seed: u64,
    pub threads: usize,
}

impl Default for ResampleOpt {
    fn default() -> Self {
        Self {
            bias: DEFAULT_BIAS,
            length: None,
            number: 1,
            out_dir: PathBuf::from("."),
            seed: clock_seed(),
            threads: 1,
        }
    }
}

impl ResampleOpt {
    /// Checks the parameters against an input alignment of `input_length`
    /// columns and returns the replicate length to use.
    pub fn validate(&self, input_length: usize) -> Result<usize> {
        let length = self.length.unwrap_or(input_length);
        check_params(input_length, length, self.bias)?;
        if self.threads == 0 {
            anyhow::bail!("thread count must be at least 1");
        }
        Ok(length)
    }
}

/// Milliseconds since the Unix epoch, used when no seed is given.
pub fn clock_seed() -> u64 {
    chrono::Utc::now().timestamp_millis() as u64
}

#[derive(Debug, Clone)]
pub struct ResampleSummary {
    pub seed: u64,
    pub replicate_length: usize,
    /// (alignment, walk) file pairs, in replicate order
    pub outputs: Vec<(PathBuf, PathBuf)>,
}

pub fn replicate_paths(out_dir: &Path, replicate: usize) -> (PathBuf, PathBuf) {
    (
        out_dir.join(format!("replicate-{}.fasta", replicate)),
        out_dir.join(format!("replicate-{}.walk", replicate)),
    )
}

/// Generates `opt.number` walks from one seeded generator, then resamples
/// and writes each replicate with its walk file.
pub fn run_resample(input_path: &Path, opt: &ResampleOpt) -> Result<ResampleSummary> {
    let input = fasta::read_alignment_file(input_path)
        .with_context(|| format!("cannot read alignment '{}'", input_path.display()))?;
    let input_length = input.matrix.length();
    let length = opt.validate(input_length)?;

    if !opt.out_dir.is_dir() {
        anyhow::bail!("output directory '{}' does not exist", opt.out_dir.display());
    }

    info!(
        taxa = input.taxa.len(),
        sites = input_length,
        replicates = opt.number,
        length,
        bias = opt.bias,
        seed = opt.seed,
        "resampling alignment"
    );

    // walks are drawn sequentially so the output does not depend on thread count
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(opt.seed);
    let walks = (0..opt.number)
        .map(|_| generate_random_walk(input_length, length, opt.bias, &mut rng))
        .collect::<std::result::Result<Vec<RandomWalk>, _>>()?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(opt.threads)
        .build()
        .context("cannot build thread pool")?;
    let outputs = pool.install(|| {
        walks
            .par_iter()
            .enumerate()
            .map(|(i, walk)| write_replicate(&input, walk, &opt.out_dir, i + 1))
            .collect::<Result<Vec<_>>>()
    })?;

    info!(written = outputs.len(), dir = %opt.out_dir.display(), "replicates written");
    Ok(ResampleSummary { seed: opt.seed, replicate_length: length, outputs })
}

fn write_replicate(
    input: &Alignment,
    walk: &RandomWalk,
    out_dir: &Path,
    replicate: usize,
) -> Result<(PathBuf, PathBuf)> {
    let matrix = resample(&input.matrix, walk)?;
    let replicate_aln = Alignment { taxa: input.taxa.clone(), matrix };
    let (fasta_path, walk_path) = replicate_paths(out_dir, replicate);

    fasta::write_alignment_file(&fasta_path, &replicate_aln)
        .with_context(|| format!("cannot write replicate '{}'", fasta_path.display()))?;
    std::fs::write(&walk_path, format!("{}\n", walk))
        .with_context(|| format!("cannot write walk '{}'", walk_path.display()))?;

    debug!(replicate, segments = walk.num_segments(), "replicate done");
    Ok((fasta_path, walk_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_defaults_length_to_input() {
        let opt = ResampleOpt { seed: 1, ..Default::default() };
        assert_eq!(opt.validate(40).unwrap(), 40);

        let opt = ResampleOpt { length: Some(15), seed: 1, ..Default::default() };
        assert_eq!(opt.validate(40).unwrap(), 15);
    }

    #[test]
    fn validate_rejects_bad_bias_and_threads() {
        let opt = ResampleOpt { bias: 0.0, ..Default::default() };
        assert!(opt.validate(10).is_err());
        let opt = ResampleOpt { bias: 1.0, ..Default::default() };
        assert!(opt.validate(10).is_ok());
        let opt = ResampleOpt { threads: 0, ..Default::default() };
        assert!(opt.validate(10).is_err());
        let opt = ResampleOpt { length: Some(0), ..Default::default() };
        assert!(opt.validate(10).is_err());
    }

    #[test]
    fn replicate_paths_are_one_based_names() {
        let (a, w) = replicate_paths(Path::new("out"), 3);
        assert_eq!(a, Path::new("out/replicate-3.fasta"));
        assert_eq!(w, Path::new("out/replicate-3.walk"));
    }
}
