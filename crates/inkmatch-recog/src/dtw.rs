//! Dynamic time warping distance
//!
//! Both sequences are flat scalar arrays grouped into frames of `dim`
//! scalars. With `n` and `m` frames, the `n x m` cost matrix is filled as:
//!
//! ```text
//! cell(0, 0)          = 0
//! cell(0, j), j > 0   = +inf
//! cell(i, 0), i > 0   = +inf
//! cell(i, j)          = |a_i - b_j| + min(cell(i-1, j), cell(i-1, j-1), cell(i, j-1))
//! ```
//!
//! and the distance is `cell(n-1, m-1)`. The infinite first row and column
//! pin the warping path to start at `(0, 0)`; a one-frame sequence is
//! therefore infinitely far from any longer one.
//!
//! The cost is `O(n * m)` time and memory with no banding or early exit, so
//! callers downsample writings before extracting features.

use crate::error::{RecogError, RecogResult};

/// Compute the DTW distance between two frame sequences.
///
/// Returns `+inf` if either sequence is empty.
///
/// # Errors
///
/// Returns [`RecogError::InvalidParameter`] if `dim` is 0 or either length
/// is not a multiple of `dim`.
pub fn distance(a: &[f32], b: &[f32], dim: usize) -> RecogResult<f32> {
    if dim == 0 {
        return Err(RecogError::InvalidParameter(
            "frame dimension must be positive".to_string(),
        ));
    }
    if a.len() % dim != 0 || b.len() % dim != 0 {
        return Err(RecogError::InvalidParameter(format!(
            "sequence lengths {} and {} are not multiples of frame dimension {dim}",
            a.len(),
            b.len()
        )));
    }

    let n = a.len() / dim;
    let m = b.len() / dim;
    if n == 0 || m == 0 {
        return Ok(f32::INFINITY);
    }

    let mut cost = vec![f32::INFINITY; n * m];
    cost[0] = 0.0;

    for i in 1..n {
        let fa = &a[i * dim..(i + 1) * dim];
        for j in 1..m {
            let fb = &b[j * dim..(j + 1) * dim];
            let best = cost[(i - 1) * m + j]
                .min(cost[(i - 1) * m + j - 1])
                .min(cost[i * m + j - 1]);
            cost[i * m + j] = euclidean(fa, fb) + best;
        }
    }

    Ok(cost[n * m - 1])
}

/// Euclidean distance between two frames of equal width.
#[inline]
fn euclidean(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}
