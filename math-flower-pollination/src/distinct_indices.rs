use crate::error::{FpaError, Result};
use crate::random_source::RandomSource;

/// Draws per pollinator before the source is declared stuck.
pub(crate) const MAX_INDEX_DRAWS: usize = 64;

/// Picks the two pollinators for local pollination of member `current`.
///
/// `first != current` and `second != first`, each by rejection sampling over
/// `0..pool_size`. `second` may equal `current`.
///
/// # Errors
///
/// Returns `FpaError::DegenerateIndexDraws` when a pollinator is rejected
/// [`MAX_INDEX_DRAWS`] times in a row, as with a source that repeats one index.
pub(crate) fn pollinator_pair<S: RandomSource + ?Sized>(
    current: usize,
    pool_size: usize,
    source: &mut S,
) -> Result<(usize, usize)> {
    debug_assert!(pool_size >= 3);
    let first = draw_index_except(current, pool_size, source)?;
    let second = draw_index_except(first, pool_size, source)?;
    Ok((first, second))
}

fn draw_index_except<S: RandomSource + ?Sized>(
    excluded: usize,
    pool_size: usize,
    source: &mut S,
) -> Result<usize> {
    for _ in 0..MAX_INDEX_DRAWS {
        let idx = source.next_index(pool_size);
        if idx != excluded {
            return Ok(idx);
        }
    }
    log::warn!(
        "pollinator index {} drawn {} times in a row",
        excluded,
        MAX_INDEX_DRAWS
    );
    Err(FpaError::DegenerateIndexDraws {
        attempts: MAX_INDEX_DRAWS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random_source::{RngSource, ScriptedSource};

    #[test]
    fn test_rejects_current_then_first() {
        // pool of 4: 0.0 -> 0 (== current, rejected), 0.5 -> 2,
        // 0.5 -> 2 (== first, rejected), 0.0 -> 0
        let mut src = ScriptedSource::new(vec![0.0, 0.5, 0.5, 0.0]);
        let (first, second) = pollinator_pair(0, 4, &mut src).unwrap();

        assert_eq!((first, second), (2, 0));
        assert_eq!(src.consumed(), 4);
    }

    #[test]
    fn test_second_may_equal_current() {
        let mut src = ScriptedSource::new(vec![0.5, 0.0]);
        let (first, second) = pollinator_pair(0, 3, &mut src).unwrap();

        assert_eq!((first, second), (1, 0));
    }

    #[test]
    fn test_pairs_are_distinct_under_sampling() {
        let mut src = RngSource::seeded(9);
        for round in 0..5_000 {
            let current = round % 3;
            let (first, second) = pollinator_pair(current, 3, &mut src).unwrap();
            assert_ne!(first, current);
            assert_ne!(second, first);
            assert!(first < 3 && second < 3);
        }
    }

    #[test]
    fn test_repeated_current_index_gives_up() {
        // 0.0 always maps to index 0, the current member
        let mut src = ScriptedSource::constant(0.0);
        let err = pollinator_pair(0, 3, &mut src).unwrap_err();

        assert!(matches!(err, FpaError::DegenerateIndexDraws { attempts: MAX_INDEX_DRAWS }));
        assert_eq!(src.consumed(), MAX_INDEX_DRAWS);
    }

    #[test]
    fn test_repeated_first_index_gives_up() {
        // first = 1 is accepted, then every draw collides with it
        let mut src = ScriptedSource::constant(0.5);
        let err = pollinator_pair(0, 3, &mut src).unwrap_err();

        assert!(err.is_domain_error());
        assert_eq!(src.consumed(), 1 + MAX_INDEX_DRAWS);
    }
}
