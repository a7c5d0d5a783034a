// src/models.rs
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const DIGITS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*()_+[]{}|;:,.<>?";

/// Decorative alphabet used for scrambled reveal frames.
pub const NOISE: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()_+[]{}|;:,.<>?";

// Character classes, in the order their alphabets are concatenated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharClass {
    Upper,
    Lower,
    Digit,
    Symbol,
}

impl CharClass {
    pub const ALL: [CharClass; 4] = [
        CharClass::Upper,
        CharClass::Lower,
        CharClass::Digit,
        CharClass::Symbol,
    ];

    pub fn alphabet(self) -> &'static str {
        match self {
            CharClass::Upper => UPPERCASE,
            CharClass::Lower => LOWERCASE,
            CharClass::Digit => DIGITS,
            CharClass::Symbol => SYMBOLS,
        }
    }

    /// Human readable name, as shown next to the menu toggles.
    pub fn description(self) -> &'static str {
        match self {
            CharClass::Upper => "Include Uppercase Letters",
            CharClass::Lower => "Include Lowercase Letters",
            CharClass::Digit => "Include Numbers",
            CharClass::Symbol => "Include Symbols",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharClass::Upper => write!(f, "upper"),
            CharClass::Lower => write!(f, "lower"),
            CharClass::Digit => write!(f, "digit"),
            CharClass::Symbol => write!(f, "symbol"),
        }
    }
}

impl FromStr for CharClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "upper" | "uppercase" => Ok(CharClass::Upper),
            "lower" | "lowercase" => Ok(CharClass::Lower),
            "digit" | "digits" | "number" | "numbers" => Ok(CharClass::Digit),
            "symbol" | "symbols" => Ok(CharClass::Symbol),
            other => Err(format!("unknown character class '{}'", other)),
        }
    }
}

/// A set of character classes. Iteration always follows `CharClass::ALL`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ClassSet(u8);

impl ClassSet {
    pub const fn empty() -> Self {
        ClassSet(0)
    }

    pub fn all() -> Self {
        CharClass::ALL.into_iter().collect()
    }

    pub fn contains(&self, class: CharClass) -> bool {
        self.0 & class.bit() != 0
    }

    pub fn insert(&mut self, class: CharClass) {
        self.0 |= class.bit();
    }

    pub fn remove(&mut self, class: CharClass) {
        self.0 &= !class.bit();
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = CharClass> + '_ {
        CharClass::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl FromIterator<CharClass> for ClassSet {
    fn from_iter<I: IntoIterator<Item = CharClass>>(iter: I) -> Self {
        let mut set = ClassSet::empty();
        for class in iter {
            set.insert(class);
        }
        set
    }
}

impl Serialize for ClassSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for ClassSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let classes = Vec::<CharClass>::deserialize(deserializer)?;
        Ok(classes.into_iter().collect())
    }
}

// Coarse strength of the active policy, ordered weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthTier {
    /// No class enabled. Unreachable through `PolicyState`.
    Unrated,
    TooWeak,
    Weak,
    Medium,
    Strong,
}

pub const UNLIT_BAR_COLOR: &str = "#2a2a2a";

impl StrengthTier {
    pub fn label(self) -> &'static str {
        match self {
            StrengthTier::Unrated => "",
            StrengthTier::TooWeak => "TOO WEAK!",
            StrengthTier::Weak => "WEAK",
            StrengthTier::Medium => "MEDIUM",
            StrengthTier::Strong => "STRONG",
        }
    }

    /// Number of the four meter bars this tier lights up.
    pub fn lit_bars(self) -> usize {
        match self {
            StrengthTier::Unrated => 0,
            StrengthTier::TooWeak => 1,
            StrengthTier::Weak => 2,
            StrengthTier::Medium => 3,
            StrengthTier::Strong => 4,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            StrengthTier::Unrated => UNLIT_BAR_COLOR,
            StrengthTier::TooWeak => "#F64A4A",
            StrengthTier::Weak => "#FB7C58",
            StrengthTier::Medium => "#F8CD65",
            StrengthTier::Strong => "#A4FFAF",
        }
    }

    /// Colour of meter bar `index` (0..4).
    pub fn bar_color(self, index: usize) -> &'static str {
        if index < self.lit_bars() {
            self.color()
        } else {
            UNLIT_BAR_COLOR
        }
    }
}

impl fmt::Display for StrengthTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// Summary of a finished generation, printed in JSON mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub password: String,
    pub length: usize,
    pub classes: ClassSet,
    pub strength: StrengthTier,
    pub generated_at: DateTime<Utc>,
}
