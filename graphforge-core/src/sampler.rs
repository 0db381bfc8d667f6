//! Exclusion-aware sampling of distinct integers from a range.
//!
//! Draws `k` distinct values from `[low, high)` minus an exclusion set,
//! without ever materializing the range. The draws land in a contracted
//! range `[low, high - k - |excluded|]`; sorting them yields `k` ordered
//! positions among the free slots, and a single merge pass over the sorted
//! exclusion set shifts each draw past every excluded value at or below it.
//! Total cost is `O(k log k + |excluded|)`, independent of `high - low`.

use rand::Rng;

use crate::error::{GraphError, Result};

/// Draws `count` distinct, strictly ascending values from `[low, high)`
/// that avoid every value in `excluded`.
///
/// Every `count`-subset of the free slots is equally likely. The exclusion
/// set need not be sorted and may contain duplicates or values outside the
/// range; both are ignored.
///
/// # Errors
/// Returns [`GraphError::CapacityExceeded`] when fewer than `count` free
/// slots remain after exclusions.
///
/// # Examples
/// ```
/// use graphforge_core::{rng, sampler};
///
/// let mut rng = rng::seeded(7);
/// let values = sampler::sample_without_replacement(&mut rng, 3, 0, 10, vec![4, 5])?;
/// assert_eq!(values.len(), 3);
/// assert!(values.windows(2).all(|w| w[0] < w[1]));
/// assert!(values.iter().all(|v| *v < 10 && *v != 4 && *v != 5));
/// # Ok::<(), graphforge_core::GraphError>(())
/// ```
pub fn sample_without_replacement<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    low: u64,
    high: u64,
    mut excluded: Vec<u64>,
) -> Result<Vec<u64>> {
    excluded.retain(|&value| value >= low && value < high);
    excluded.sort_unstable();
    excluded.dedup();

    let span = high.saturating_sub(low);
    let available = span - excluded.len() as u64;
    if count as u64 > available {
        return Err(GraphError::CapacityExceeded {
            requested: count,
            available,
        });
    }
    if count == 0 {
        return Ok(Vec::new());
    }

    // Inclusive upper bound of the contracted range: low + available - count.
    let top = high - count as u64 - excluded.len() as u64;
    let mut samples: Vec<u64> = (0..count).map(|_| rng.gen_range(low..=top)).collect();
    samples.sort_unstable();

    let mut passed = 0usize;
    for (offset, sample) in samples.iter_mut().enumerate() {
        while passed < excluded.len() && excluded[passed] <= *sample + (offset + passed) as u64 {
            passed += 1;
        }
        *sample += (offset + passed) as u64;
    }
    Ok(samples)
}
