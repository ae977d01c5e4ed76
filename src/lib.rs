//! # seres-rust
//!
//! 多序列比对（MSA）的随机游走分块重采样。
//!
//! 重采样器在原始比对的列上做带掉头概率的随机游走，把经过的列依次拼成
//! replicate。游走本身（[`walk::RandomWalk`]）是紧凑、可序列化、可逆的：
//! 只凭游走和原始比对就能精确重建 replicate，也能把 replicate 的任意列或断点
//! 翻译回原始坐标，无需重新运行随机过程。
//!
//! ## 快速示例
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand_xoshiro::Xoshiro256PlusPlus;
//! use seres_rust::resample::{generate_random_walk, resample};
//! use seres_rust::util::matrix::CharMatrix;
//!
//! let input = CharMatrix::from_rows(["ACGTACGTAC", "TTGGCCAANN"]).unwrap();
//! let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
//! let walk = generate_random_walk(input.length(), 20, 0.1, &mut rng).unwrap();
//! let replicate = resample(&input, &walk).unwrap();
//! assert_eq!(replicate.length(), 20);
//!
//! // 序列化后再解析得到同一条游走
//! let text = walk.to_string();
//! assert_eq!(text.parse::<seres_rust::walk::RandomWalk>().unwrap(), walk);
//! ```
//!
//! ## 模块说明
//!
//! - [`walk`] — 游走数据结构、不变量、坐标反查、文本格式
//! - [`resample`] — 游走生成、按游走重采样、批量输出
//! - [`translate`] — replicate 坐标 / 断点翻译
//! - [`io`] — FASTA 比对读写
//! - [`util`] — 字符矩阵

pub mod error;
pub mod io;
pub mod resample;
pub mod translate;
pub mod util;
pub mod walk;

pub use error::{Result, SeresError};
