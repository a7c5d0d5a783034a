// src/generators/charset.rs
use crate::models::ClassSet;

/// Concatenates the alphabets of the enabled classes in enumeration order
/// (upper, lower, digit, symbol).
///
/// An empty set yields an empty string; rejecting that is left to the sampler.
pub fn build(classes: ClassSet) -> String {
    classes.iter().map(|class| class.alphabet()).collect()
}
