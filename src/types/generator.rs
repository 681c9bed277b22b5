use std::fmt;

use serde::{Deserialize, Serialize};

/// Smallest password length the generator produces.
pub const MIN_LENGTH: usize = 4;

/// Largest password length the generator produces.
pub const MAX_LENGTH: usize = 64;

/// Default length offered to the user.
pub const DEFAULT_LENGTH: usize = 16;

/// Options for synthesizing a password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    pub length: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub numbers: bool,
    pub symbols: bool,
    /// Drops `0 O 1 l I |` from every active class.
    pub exclude_similar: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            uppercase: true,
            lowercase: true,
            numbers: true,
            symbols: true,
            exclude_similar: false,
        }
    }
}

impl GenerationOptions {
    /// Returns the requested length clamped into `[MIN_LENGTH, MAX_LENGTH]`.
    pub fn clamped_length(&self) -> usize {
        self.length.clamp(MIN_LENGTH, MAX_LENGTH)
    }

    /// Returns the selected character classes in their fixed order.
    pub fn active_classes(&self) -> Vec<CharacterClass> {
        CharacterClass::ALL
            .into_iter()
            .filter(|class| match class {
                CharacterClass::Uppercase => self.uppercase,
                CharacterClass::Lowercase => self.lowercase,
                CharacterClass::Digit => self.numbers,
                CharacterClass::Symbol => self.symbols,
            })
            .collect()
    }
}

/// One of the four alphabets used for synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterClass {
    Uppercase,
    Lowercase,
    Digit,
    Symbol,
}

impl CharacterClass {
    /// All classes, in pool order.
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Uppercase,
        CharacterClass::Lowercase,
        CharacterClass::Digit,
        CharacterClass::Symbol,
    ];

    pub fn alphabet(&self) -> &'static str {
        match self {
            CharacterClass::Uppercase => "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
            CharacterClass::Lowercase => "abcdefghijklmnopqrstuvwxyz",
            CharacterClass::Digit => "0123456789",
            CharacterClass::Symbol => "!@#$%^&*()_+-=[]{}|;:,.<>?",
        }
    }

    /// Whether `c` belongs to this class's alphabet.
    pub fn contains(&self, c: char) -> bool {
        self.alphabet().contains(c)
    }
}

/// Ordered password strength classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrengthTier {
    Weak,
    Fair,
    Good,
    Strong,
    VeryStrong,
}

impl StrengthTier {
    /// Maps an additive score onto its tier.
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 7 => StrengthTier::VeryStrong,
            s if s >= 5 => StrengthTier::Strong,
            s if s >= 3 => StrengthTier::Good,
            2 => StrengthTier::Fair,
            _ => StrengthTier::Weak,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StrengthTier::Weak => "weak",
            StrengthTier::Fair => "fair",
            StrengthTier::Good => "good",
            StrengthTier::Strong => "strong",
            StrengthTier::VeryStrong => "very-strong",
        }
    }
}

impl fmt::Display for StrengthTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
