//! Animatable value trees.
//!
//! A tween moves between two trees of the same shape. Leaves are `f32`;
//! interior nodes are ordered sequences or keyed mappings. In JSON the tree
//! is written naturally: `1.5`, `[0, 1]`, `{"x": 0, "y": 2}`.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::AnimationError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnimatableValue {
    Number(f32),
    Sequence(Vec<AnimatableValue>),
    /// Only the keys of the `from` side are animated; extra keys on the
    /// `to` side are ignored.
    Mapping(HashMap<String, AnimatableValue>),
}

/// Coarse shape tag, used in error messages.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    Number,
    Sequence,
    Mapping,
}

impl AnimatableValue {
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            AnimatableValue::Number(_) => ValueKind::Number,
            AnimatableValue::Sequence(_) => ValueKind::Sequence,
            AnimatableValue::Mapping(_) => ValueKind::Mapping,
        }
    }

    /// Build a mapping from `(key, value)` pairs.
    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, AnimatableValue)>,
    {
        AnimatableValue::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Sequence of plain numbers.
    pub fn numbers(values: &[f32]) -> Self {
        AnimatableValue::Sequence(values.iter().copied().map(AnimatableValue::Number).collect())
    }

    #[inline]
    pub fn as_number(&self) -> Option<f32> {
        match self {
            AnimatableValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_sequence(&self) -> Option<&[AnimatableValue]> {
        match self {
            AnimatableValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&AnimatableValue> {
        match self {
            AnimatableValue::Mapping(map) => map.get(key),
            _ => None,
        }
    }

    /// Numeric field of a mapping, e.g. `camera.get_number("zoom")`.
    #[inline]
    pub fn get_number(&self, key: &str) -> Option<f32> {
        self.get(key).and_then(AnimatableValue::as_number)
    }

    /// Check that `to` can be interpolated from `self`.
    ///
    /// Numbers pair with numbers, sequences need equal length, and every key
    /// of a `from` mapping must exist on the `to` side. Extra `to` keys pass.
    pub fn check_compatible(&self, to: &AnimatableValue) -> Result<(), AnimationError> {
        check_shape(self, to, "$")
    }
}

impl From<f32> for AnimatableValue {
    fn from(v: f32) -> Self {
        AnimatableValue::Number(v)
    }
}

impl From<Vec<f32>> for AnimatableValue {
    fn from(v: Vec<f32>) -> Self {
        AnimatableValue::numbers(&v)
    }
}

impl<const N: usize> From<[f32; N]> for AnimatableValue {
    fn from(v: [f32; N]) -> Self {
        AnimatableValue::numbers(&v)
    }
}

fn check_shape(from: &AnimatableValue, to: &AnimatableValue, path: &str) -> Result<(), AnimationError> {
    match (from, to) {
        (AnimatableValue::Number(a), AnimatableValue::Number(b)) => {
            if a.is_finite() && b.is_finite() {
                Ok(())
            } else {
                Err(AnimationError::ShapeMismatch {
                    path: path.to_string(),
                    reason: format!("non-finite endpoint ({a} -> {b})"),
                })
            }
        }
        (AnimatableValue::Sequence(a), AnimatableValue::Sequence(b)) => {
            if a.len() != b.len() {
                return Err(AnimationError::ShapeMismatch {
                    path: path.to_string(),
                    reason: format!("sequence length {} vs {}", a.len(), b.len()),
                });
            }
            for (i, (fa, fb)) in a.iter().zip(b).enumerate() {
                check_shape(fa, fb, &format!("{path}[{i}]"))?;
            }
            Ok(())
        }
        (AnimatableValue::Mapping(a), AnimatableValue::Mapping(b)) => {
            for (key, fa) in a {
                let child = format!("{path}.{key}");
                match b.get(key) {
                    Some(fb) => check_shape(fa, fb, &child)?,
                    None => {
                        return Err(AnimationError::ShapeMismatch {
                            path: child,
                            reason: "key missing from target".to_string(),
                        })
                    }
                }
            }
            Ok(())
        }
        (a, b) => Err(AnimationError::ShapeMismatch {
            path: path.to_string(),
            reason: format!("{:?} vs {:?}", a.kind(), b.kind()),
        }),
    }
}
