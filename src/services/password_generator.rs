//! Password synthesis and strength scoring.
//!
//! Generation guarantees one character from every active class, pads from the
//! combined pool, then applies a Fisher-Yates shuffle. All draws go through
//! [`RandomSource::uniform_index`], which rejects out-of-zone samples so every
//! index is equally likely.

use ring::rand::{SecureRandom, SystemRandom};
use zeroize::Zeroizing;

use crate::types::errors::GeneratorError;
use crate::types::generator::{CharacterClass, GenerationOptions, StrengthTier};

/// Glyphs dropped from every class when `exclude_similar` is set.
pub const SIMILAR_CHARS: [char; 6] = ['0', 'O', '1', 'l', 'I', '|'];

/// Source of uniformly distributed random bytes.
pub trait RandomSource {
    fn fill(&self, dest: &mut [u8]) -> Result<(), GeneratorError>;

    /// Returns an index uniformly distributed over `0..bound`.
    fn uniform_index(&self, bound: usize) -> Result<usize, GeneratorError> {
        if bound <= 1 {
            return Ok(0);
        }
        let bound = bound as u64;
        let span = 1u64 << 32;
        let zone = span - span % bound;
        loop {
            let mut buf = [0u8; 4];
            self.fill(&mut buf)?;
            let value = u32::from_le_bytes(buf) as u64;
            if value < zone {
                return Ok((value % bound) as usize);
            }
        }
    }
}

/// [`RandomSource`] backed by the operating system CSPRNG.
pub struct SystemRandomSource {
    rng: SystemRandom,
}

impl SystemRandomSource {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }
}

impl Default for SystemRandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for SystemRandomSource {
    fn fill(&self, dest: &mut [u8]) -> Result<(), GeneratorError> {
        self.rng
            .fill(dest)
            .map_err(|_| GeneratorError::RandomSource("system random source failed".to_string()))
    }
}

/// Trait defining password generation operations.
pub trait PasswordGeneratorTrait {
    /// Synthesizes a password. Returns an empty string when no class is active.
    fn generate(&self, options: &GenerationOptions) -> Result<String, GeneratorError>;

    /// Classifies a password into a strength tier.
    fn strength(&self, password: &str) -> StrengthTier;
}

pub struct PasswordGenerator<R = SystemRandomSource> {
    rng: R,
}

impl PasswordGenerator<SystemRandomSource> {
    pub fn new() -> Self {
        Self {
            rng: SystemRandomSource::new(),
        }
    }
}

impl Default for PasswordGenerator<SystemRandomSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> PasswordGenerator<R> {
    pub fn with_source(rng: R) -> Self {
        Self { rng }
    }

    fn shuffle(&self, chars: &mut [char]) -> Result<(), GeneratorError> {
        for i in (1..chars.len()).rev() {
            let j = self.rng.uniform_index(i + 1)?;
            chars.swap(i, j);
        }
        Ok(())
    }
}

impl<R: RandomSource> PasswordGeneratorTrait for PasswordGenerator<R> {
    fn generate(&self, options: &GenerationOptions) -> Result<String, GeneratorError> {
        let alphabets: Vec<Vec<char>> = options
            .active_classes()
            .into_iter()
            .map(|class| class_alphabet(class, options.exclude_similar))
            .filter(|alphabet| !alphabet.is_empty())
            .collect();

        if alphabets.is_empty() {
            return Ok(String::new());
        }

        let pool: Vec<char> = alphabets.concat();
        let length = options.clamped_length();

        let mut chars = Zeroizing::new(Vec::with_capacity(length.max(alphabets.len())));
        for alphabet in &alphabets {
            chars.push(alphabet[self.rng.uniform_index(alphabet.len())?]);
        }
        while chars.len() < length {
            chars.push(pool[self.rng.uniform_index(pool.len())?]);
        }

        self.shuffle(&mut chars)?;
        Ok(chars.iter().collect())
    }

    fn strength(&self, password: &str) -> StrengthTier {
        score_strength(password)
    }
}

/// Returns the alphabet of `class`, minus the similar glyphs if requested.
pub fn class_alphabet(class: CharacterClass, exclude_similar: bool) -> Vec<char> {
    class
        .alphabet()
        .chars()
        .filter(|c| !(exclude_similar && SIMILAR_CHARS.contains(c)))
        .collect()
}

/// Additive strength score in `0..=8`.
pub fn strength_score(password: &str) -> u8 {
    let length = password.chars().count();
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_other = password.chars().any(|c| !c.is_ascii_alphanumeric());

    let mut score = 0u8;
    if length >= 12 {
        score += 2;
    } else if length >= 8 {
        score += 1;
    }

    score += [has_lower, has_upper, has_digit, has_other]
        .iter()
        .filter(|present| **present)
        .count() as u8;

    if length >= 16 {
        score += 1;
    }
    if has_lower && has_upper && has_digit && has_other {
        score += 1;
    }
    score
}

pub fn score_strength(password: &str) -> StrengthTier {
    StrengthTier::from_score(strength_score(password))
}
