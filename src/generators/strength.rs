// src/generators/strength.rs
use crate::models::{ClassSet, StrengthTier};

/// Maps the number of enabled classes to a strength tier.
///
/// An empty set is rated `Unrated` instead of failing.
pub fn classify(classes: ClassSet) -> StrengthTier {
    match classes.len() {
        0 => StrengthTier::Unrated,
        1 => StrengthTier::TooWeak,
        2 => StrengthTier::Weak,
        3 => StrengthTier::Medium,
        _ => StrengthTier::Strong,
    }
}
