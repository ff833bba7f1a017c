//! Interpolation helpers:
//! - lerp_f32 (scalar blend, unclamped so overshooting easings pass through)
//! - interpolate (structural blend of value trees)
//! - progress_for (elapsed/duration normalization)

use hashbrown::HashMap;

use crate::time::AnimationTime;
use crate::value::AnimatableValue;

/// Linear interpolation of scalars. Exact at `t = 0` and `t = 1`.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    (1.0 - t) * a + t * b
}

/// Normalized, clamped progress of `elapsed` through `duration`.
///
/// A zero duration counts as already finished.
#[inline]
pub fn progress_for(elapsed: AnimationTime, duration: AnimationTime) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_nanos() as f64 / duration.as_nanos() as f64).clamp(0.0, 1.0) as f32
}

/// Blend `from` toward `to` at `t`.
///
/// Numbers blend linearly, sequences element-wise and mappings key-wise over
/// the keys of `from`. A `from` key with no partner in `to`, or a node whose
/// kinds disagree, keeps its `from` value; callers validate shapes up front
/// with [`AnimatableValue::check_compatible`].
pub fn interpolate(from: &AnimatableValue, to: &AnimatableValue, t: f32) -> AnimatableValue {
    match (from, to) {
        (AnimatableValue::Number(a), AnimatableValue::Number(b)) => {
            AnimatableValue::Number(lerp_f32(*a, *b, t))
        }
        (AnimatableValue::Sequence(a), AnimatableValue::Sequence(b)) => AnimatableValue::Sequence(
            a.iter()
                .enumerate()
                .map(|(i, fa)| match b.get(i) {
                    Some(fb) => interpolate(fa, fb, t),
                    None => fa.clone(),
                })
                .collect(),
        ),
        (AnimatableValue::Mapping(a), AnimatableValue::Mapping(b)) => {
            let mut out: HashMap<String, AnimatableValue> = HashMap::with_capacity(a.len());
            for (key, fa) in a {
                let blended = match b.get(key) {
                    Some(fb) => interpolate(fa, fb, t),
                    None => fa.clone(),
                };
                out.insert(key.clone(), blended);
            }
            AnimatableValue::Mapping(out)
        }
        _ => from.clone(),
    }
}
