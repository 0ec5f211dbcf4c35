//! Bit-level genetic operators.
//!
//! A genome is a slice of 32-bit words viewed as one flat bit string, most
//! significant bit of each word first: global bit `p` is bit `31 - p % 32`
//! of word `p / 32`. Operators here know nothing about gains or offsets;
//! [`Chromosome`](super::Chromosome) flattens itself into words and calls
//! them.
//!
//! # Crossover Operators
//!
//! - [`n_point_crossover`]: random n-point crossover at bit granularity
//! - [`n_point_crossover_at`]: the same with caller-chosen points
//!
//! # Mutation Operators
//!
//! - [`bit_flip_mutation`]: independent per-bit flips
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - De Jong (1975), "An Analysis of the Behavior of a Class of Genetic
//!   Adaptive Systems" (n-point crossover)

use rand::Rng;

/// Bits per genome word.
pub const WORD_BITS: usize = 32;

// ============================================================================
// Crossover operators
// ============================================================================

/// Draws `count` crossover positions uniformly from `0..total_bits`.
///
/// Positions are drawn independently (duplicates possible) and returned
/// sorted ascending.
pub fn crossover_points<R: Rng>(total_bits: usize, count: usize, rng: &mut R) -> Vec<usize> {
    let mut points: Vec<usize> = (0..count).map(|_| rng.random_range(0..total_bits)).collect();
    points.sort_unstable();
    points
}

/// n-point crossover at random bit positions.
///
/// See [`n_point_crossover_at`] for the exact semantics.
///
/// # Panics
/// Panics if parents have different lengths or are empty.
pub fn n_point_crossover<R: Rng>(
    first: &[u32],
    second: &[u32],
    count: usize,
    rng: &mut R,
) -> Vec<u32> {
    assert_eq!(first.len(), second.len(), "parents must have equal length");
    assert!(!first.is_empty(), "parents must not be empty");

    let points = crossover_points(first.len() * WORD_BITS, count, rng);
    n_point_crossover_at(first, second, &points)
}

/// n-point crossover at the given sorted bit positions.
///
/// The child starts copying from `first`. Each position `p` switches the
/// source, and bit `p` is the first bit taken from the new source. Equal
/// positions each switch, so a duplicated pair cancels out. Words without a
/// position are copied whole; the others are assembled from MSB-first
/// sub-ranges.
///
/// # Complexity
/// O(words + points)
///
/// # Panics
/// Panics if parents have different lengths, or a position is out of range.
pub fn n_point_crossover_at(first: &[u32], second: &[u32], points: &[usize]) -> Vec<u32> {
    assert_eq!(first.len(), second.len(), "parents must have equal length");
    debug_assert!(points.windows(2).all(|w| w[0] <= w[1]), "points must be sorted");
    let total_bits = first.len() * WORD_BITS;
    assert!(
        points.iter().all(|&p| p < total_bits),
        "crossover point out of range"
    );

    let mut child = Vec::with_capacity(first.len());
    let mut from_first = true;
    let mut next = 0;

    for (word, (&a, &b)) in first.iter().zip(second).enumerate() {
        let word_start = word * WORD_BITS;
        let word_end = word_start + WORD_BITS;

        // Step 1: no crossover point inside, copy verbatim
        if next == points.len() || points[next] >= word_end {
            child.push(if from_first { a } else { b });
            continue;
        }

        // Step 2: OR together sub-ranges, switching source at every point
        let mut assembled = 0u32;
        let mut segment_start = 0;
        while next < points.len() && points[next] < word_end {
            let cut = points[next] - word_start;
            let source = if from_first { a } else { b };
            assembled |= source & span_mask(segment_start, cut);
            from_first = !from_first;
            segment_start = cut;
            next += 1;
        }

        // Step 3: remainder of the word
        let source = if from_first { a } else { b };
        assembled |= source & span_mask(segment_start, WORD_BITS);
        child.push(assembled);
    }

    child
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Flips every bit independently with `probability`.
///
/// The probability applies per bit, not per word: a 10-word genome at
/// `0.01` flips 3.2 bits on average.
///
/// # Complexity
/// O(bits)
///
/// # Panics
/// Panics if `probability` is outside `[0, 1]`.
pub fn bit_flip_mutation<R: Rng>(words: &mut [u32], probability: f64, rng: &mut R) {
    for word in words.iter_mut() {
        for bit in 0..WORD_BITS {
            if rng.random_bool(probability) {
                *word ^= 1u32 << (WORD_BITS - 1 - bit);
            }
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Mask of MSB-first offsets `[start, end)` within a word.
fn span_mask(start: usize, end: usize) -> u32 {
    if start >= end {
        return 0;
    }
    let from_start = u32::MAX.checked_shr(start as u32).unwrap_or(0);
    let from_end = u32::MAX.checked_shr(end as u32).unwrap_or(0);
    from_start & !from_end
}

// ============================================================================
// Tests
// ============================================================================
