// src/generators/password.rs
use rand::distributions::{Distribution, Uniform};
use rand::{CryptoRng, Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;

use crate::core::policy::PolicyState;
use crate::generators::{charset, strength};
use crate::models::StrengthTier;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GenError {
    #[error("cannot generate a password from an empty character set")]
    EmptyCharset,
}

/// Draws `length` characters from `charset`, each independently and
/// uniformly, with replacement.
///
/// `Uniform` rejects draws from the biased tail of the integer range, so
/// charsets whose size is not a power of two are still sampled evenly.
pub fn generate<R>(rng: &mut R, charset: &str, length: usize) -> Result<String, GenError>
where
    R: Rng + CryptoRng + ?Sized,
{
    let chars: Vec<char> = charset.chars().collect();
    if chars.is_empty() {
        log::error!("Password requested from an empty charset (length {})", length);
        return Err(GenError::EmptyCharset);
    }

    let index = Uniform::new(0, chars.len());
    Ok((0..length).map(|_| chars[index.sample(&mut *rng)]).collect())
}

/// Generates passwords for a policy with a CSPRNG it owns.
pub struct PasswordGenerator<R = ChaCha20Rng> {
    rng: R,
}

impl PasswordGenerator<ChaCha20Rng> {
    pub fn new() -> Self {
        PasswordGenerator {
            rng: ChaCha20Rng::from_entropy(),
        }
    }
}

impl Default for PasswordGenerator<ChaCha20Rng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng + CryptoRng> PasswordGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        PasswordGenerator { rng }
    }

    pub fn generate_password(&mut self, policy: &PolicyState) -> Result<String, GenError> {
        let charset = charset::build(policy.classes());
        generate(&mut self.rng, &charset, policy.length())
    }

    pub fn analyze_strength(&self, policy: &PolicyState) -> StrengthTier {
        strength::classify(policy.classes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CharClass, ClassSet};
    use std::collections::HashMap;

    fn seeded() -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(7)
    }

    #[test]
    fn test_empty_charset_fails() {
        let mut rng = seeded();
        assert_eq!(generate(&mut rng, "", 1), Err(GenError::EmptyCharset));
        assert_eq!(generate(&mut rng, "", 20), Err(GenError::EmptyCharset));
    }

    #[test]
    fn test_length_and_containment() {
        let mut rng = seeded();
        let charset = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
        for length in 1..=20 {
            let password = generate(&mut rng, charset, length).unwrap();
            assert_eq!(password.chars().count(), length);
            assert!(password.chars().all(|c| charset.contains(c)));
        }
    }

    #[test]
    fn test_zero_length_yields_empty_password() {
        let mut rng = seeded();
        assert_eq!(generate(&mut rng, "abc", 0).unwrap(), "");
    }

    #[test]
    fn test_distribution_is_roughly_uniform() {
        // 3 is not a power of two, so a modulo reduction would show here
        let mut rng = seeded();
        let sample = generate(&mut rng, "xyz", 30_000).unwrap();
        let mut counts: HashMap<char, usize> = HashMap::new();
        for c in sample.chars() {
            *counts.entry(c).or_default() += 1;
        }
        assert_eq!(counts.len(), 3);
        for count in counts.values() {
            assert!((9_000..11_000).contains(count), "skewed count {}", count);
        }
    }

    #[test]
    fn test_generator_follows_policy() {
        let classes: ClassSet = [CharClass::Upper, CharClass::Digit].into_iter().collect();
        let policy = PolicyState::new(8, classes).unwrap();
        let mut generator = PasswordGenerator::with_rng(seeded());

        let password = generator.generate_password(&policy).unwrap();
        assert_eq!(password.len(), 8);
        assert!(password
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        assert_eq!(generator.analyze_strength(&policy), StrengthTier::Weak);
    }

    #[test]
    fn test_entropy_seeded_generators_differ() {
        let policy = PolicyState::new(20, ClassSet::all()).unwrap();
        let a = PasswordGenerator::new().generate_password(&policy).unwrap();
        let b = PasswordGenerator::new().generate_password(&policy).unwrap();
        assert_ne!(a, b);
    }
}
