use rand::Rng;

use crate::error::{Result, SeresError};
use crate::walk::{Direction, RandomWalk};

/// 生成一条长度为 `output_length` 的随机游走。
///
/// 起点在 `[0, input_length)` 内均匀选取，初始方向均匀选取（位于两端时强制朝内）。
/// 之后每访问一个位点就以 `turnaround_bias` 的概率掉头；若继续前进会越出比对范围，
/// 则无论抽样结果如何都强制掉头，若掉头后的下一步会越界则不掉头。
/// 同一方向的连续位点合并为一个 segment。
///
/// 随机数抽取顺序固定，相同种子与参数得到完全相同的 walk。
pub fn generate_random_walk<R: Rng + ?Sized>(
    input_length: usize,
    output_length: usize,
    turnaround_bias: f64,
    rng: &mut R,
) -> Result<RandomWalk> {
    check_params(input_length, output_length, turnaround_bias)?;

    let start = rng.gen_range(0..input_length);
    let coin = rng.gen_bool(0.5);
    let mut direction = if start == 0 {
        Direction::Right
    } else if start == input_length - 1 {
        Direction::Left
    } else if coin {
        Direction::Right
    } else {
        Direction::Left
    };

    let mut walk = RandomWalk::new();
    let mut pos = start;
    let mut run_start = start;
    let mut run_len = 0usize;
    let mut produced = 0usize;

    loop {
        run_len += 1;
        produced += 1;
        if produced == output_length {
            flush(&mut walk, run_start, run_len, direction)?;
            break;
        }

        let wants_turn = rng.gen_bool(turnaround_bias);
        let ahead = step(pos, direction, input_length);
        let behind = step(pos, direction.reverse(), input_length);

        match (ahead, behind) {
            (Some(next), None) => pos = next,
            (Some(next), Some(_)) if !wants_turn => pos = next,
            (_, Some(back)) => {
                flush(&mut walk, run_start, run_len, direction)?;
                direction = direction.reverse();
                pos = back;
                run_start = back;
                run_len = 0;
            }
            // only reachable for a single column, excluded by check_params
            (None, None) => {
                return Err(SeresError::InvalidParameter(
                    "walk cannot move within a single column".to_string(),
                ))
            }
        }
    }

    Ok(walk)
}

/// Validates generation parameters before any random draws are made.
pub fn check_params(input_length: usize, output_length: usize, turnaround_bias: f64) -> Result<()> {
    if input_length == 0 {
        return Err(SeresError::InvalidParameter("input alignment has no columns".to_string()));
    }
    if output_length == 0 {
        return Err(SeresError::InvalidParameter("replicate length must be positive".to_string()));
    }
    if !turnaround_bias.is_finite() || turnaround_bias <= 0.0 || turnaround_bias > 1.0 {
        return Err(SeresError::InvalidParameter(format!(
            "turnaround bias {} is not in (0, 1]",
            turnaround_bias
        )));
    }
    if input_length == 1 && output_length > 1 {
        return Err(SeresError::InvalidParameter(format!(
            "a single-column alignment cannot produce a replicate of length {}",
            output_length
        )));
    }
    Ok(())
}

#[inline]
fn step(pos: usize, direction: Direction, input_length: usize) -> Option<usize> {
    match direction {
        Direction::Right => pos.checked_add(1).filter(|&p| p < input_length),
        Direction::Left => pos.checked_sub(1),
    }
}

fn flush(walk: &mut RandomWalk, original_pos: usize, length: usize, direction: Direction) -> Result<()> {
    if walk.add_run(original_pos, length, direction) {
        Ok(())
    } else {
        Err(SeresError::InvalidWalk { index: walk.num_segments() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn rng(seed: u64) -> Xoshiro256PlusPlus {
        Xoshiro256PlusPlus::seed_from_u64(seed)
    }

    #[test]
    fn walk_has_requested_length() {
        for seed in 0..20 {
            let w = generate_random_walk(50, 200, 0.05, &mut rng(seed)).unwrap();
            assert_eq!(w.length(), 200);
            let (lo, hi) = w.original_span().unwrap();
            assert!(hi < 50, "seed {} visited column {}", seed, hi);
            assert!(lo <= hi);
        }
    }

    #[test]
    fn same_seed_same_walk() {
        let a = generate_random_walk(100, 300, 0.1, &mut rng(7)).unwrap();
        let b = generate_random_walk(100, 300, 0.1, &mut rng(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn bias_one_turns_at_every_site() {
        // a start at an edge cannot turn, so only the first run may be longer
        let w = generate_random_walk(10, 9, 1.0, &mut rng(3)).unwrap();
        assert_eq!(w.length(), 9);
        assert!(w.segments()[0].length <= 2);
        assert!(w.iter().skip(1).all(|s| s.length == 1));
        assert!(w.num_segments() >= 8);
    }

    #[test]
    fn two_columns_bounce_between_edges() {
        let w = generate_random_walk(2, 10, 0.5, &mut rng(11)).unwrap();
        assert_eq!(w.length(), 10);
        for j in 0..10 {
            assert!(w.lookup_position(j).unwrap() < 2);
        }
    }

    #[test]
    fn single_column_single_site() {
        let w = generate_random_walk(1, 1, 0.01, &mut rng(0)).unwrap();
        assert_eq!(w.to_string(), "0:0:1:r;");
    }

    #[test]
    fn rejects_bad_parameters() {
        let mut r = rng(0);
        assert!(generate_random_walk(0, 5, 0.1, &mut r).is_err());
        assert!(generate_random_walk(5, 0, 0.1, &mut r).is_err());
        assert!(generate_random_walk(5, 5, 0.0, &mut r).is_err());
        assert!(generate_random_walk(5, 5, 1.5, &mut r).is_err());
        assert!(generate_random_walk(5, 5, f64::NAN, &mut r).is_err());
        assert!(generate_random_walk(1, 2, 0.1, &mut r).is_err());
    }
}
