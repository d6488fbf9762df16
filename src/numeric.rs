//! Small numeric helpers shared by the dynamics and the readout.

use ndarray::ArrayView1;

/// Keeps a value representable.
///
/// Infinities are clamped to the finite extremes and NaN (which fails every
/// comparison) maps to `f32::MAX`.
#[inline]
pub fn bound_state(x: f32) -> f32 {
    if x.is_nan() {
        f32::MAX
    } else {
        x.clamp(f32::MIN, f32::MAX)
    }
}

/// Index of the first maximal element, or `None` for an empty view.
///
/// Later elements must be strictly greater to win, so ties go to the
/// earliest index.
pub fn index_of_max(values: ArrayView1<'_, f32>) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, &value) in values.iter().enumerate() {
        let is_better = match best {
            None => true,
            Some((_, best_value)) => value > best_value,
        };
        if is_better {
            best = Some((index, value));
        }
    }
    best.map(|(index, _)| index)
}

/// Replaces `values` with their softmax at the given temperature, which is
/// expected to be finite and positive.
pub fn softmax_in_place(values: &mut [f32], temperature: f32) {
    let Some(max) = values.iter().copied().reduce(f32::max) else {
        return;
    };

    let mut normalization = 0.0;
    for value in values.iter_mut() {
        *value = ((*value - max) / temperature).exp();
        normalization += *value;
    }
    for value in values.iter_mut() {
        *value /= normalization;
    }
}
