//! Unit tests for the password generator and strength scoring.

use rstest::rstest;

use credvault::services::password_generator::{
    score_strength, strength_score, PasswordGenerator, PasswordGeneratorTrait, SIMILAR_CHARS,
};
use credvault::types::generator::{CharacterClass, GenerationOptions, StrengthTier};

fn options(length: usize, upper: bool, lower: bool, numbers: bool, symbols: bool) -> GenerationOptions {
    GenerationOptions {
        length,
        uppercase: upper,
        lowercase: lower,
        numbers,
        symbols,
        exclude_similar: false,
    }
}

// ─── Generation ───

#[test]
fn test_no_class_selected_yields_empty() {
    let generator = PasswordGenerator::new();
    let password = generator.generate(&options(16, false, false, false, false)).unwrap();
    assert!(password.is_empty());
}

#[test]
fn test_default_options() {
    let generator = PasswordGenerator::new();
    let password = generator.generate(&GenerationOptions::default()).unwrap();
    assert_eq!(password.chars().count(), 16);
    for class in CharacterClass::ALL {
        assert!(password.chars().any(|c| class.contains(c)), "missing {:?}", class);
    }
}

#[test]
fn test_alphanumeric_excluding_similar() {
    let generator = PasswordGenerator::new();
    let opts = GenerationOptions {
        length: 12,
        uppercase: true,
        lowercase: true,
        numbers: true,
        symbols: false,
        exclude_similar: true,
    };

    for _ in 0..50 {
        let password = generator.generate(&opts).unwrap();
        assert_eq!(password.chars().count(), 12);
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(password.chars().all(|c| !SIMILAR_CHARS.contains(&c)));
        assert!(password.chars().any(|c| c.is_ascii_uppercase()));
        assert!(password.chars().any(|c| c.is_ascii_lowercase()));
        assert!(password.chars().any(|c| c.is_ascii_digit()));
    }
}

#[test]
fn test_symbols_only_excluding_similar_has_no_pipe() {
    let generator = PasswordGenerator::new();
    let mut opts = options(64, false, false, false, true);
    opts.exclude_similar = true;

    for _ in 0..20 {
        let password = generator.generate(&opts).unwrap();
        assert_eq!(password.chars().count(), 64);
        assert!(!password.contains('|'));
        assert!(password.chars().all(|c| CharacterClass::Symbol.contains(c)));
    }
}

#[rstest]
#[case(0, 4)]
#[case(2, 4)]
#[case(4, 4)]
#[case(30, 30)]
#[case(64, 64)]
#[case(65, 64)]
#[case(500, 64)]
fn test_length_is_clamped(#[case] requested: usize, #[case] expected: usize) {
    let generator = PasswordGenerator::new();
    let password = generator.generate(&options(requested, true, true, true, true)).unwrap();
    assert_eq!(password.chars().count(), expected);
}

#[test]
fn test_inactive_classes_never_appear() {
    let generator = PasswordGenerator::new();
    let password = generator.generate(&options(64, false, true, false, false)).unwrap();
    assert!(password.chars().all(|c| c.is_ascii_lowercase()));
}

#[test]
fn test_guaranteed_characters_are_not_always_first() {
    // With four classes the first character would always be uppercase if
    // the required characters were left in place.
    let generator = PasswordGenerator::new();
    let opts = options(4, true, true, true, true);
    let leading_upper = (0..200)
        .filter(|_| {
            let password = generator.generate(&opts).unwrap();
            password.chars().next().map(|c| c.is_ascii_uppercase()).unwrap_or(false)
        })
        .count();
    assert!(leading_upper < 200);
}

#[test]
fn test_outputs_differ() {
    let generator = PasswordGenerator::new();
    let a = generator.generate(&GenerationOptions::default()).unwrap();
    let b = generator.generate(&GenerationOptions::default()).unwrap();
    assert_ne!(a, b);
}

// ─── Strength ───

#[rstest]
#[case("", StrengthTier::Weak)]
#[case("abc", StrengthTier::Weak)]
#[case("abcdefgh", StrengthTier::Fair)]
#[case("abcdefghijkl", StrengthTier::Good)]
#[case("Abcdefgh1", StrengthTier::Good)]
#[case("Abcdefghijk1", StrengthTier::Strong)]
#[case("Tr0ub4dor&3", StrengthTier::Strong)]
#[case("Tr0ub4dor&3xyz", StrengthTier::VeryStrong)]
#[case("aB3$aB3$aB3$aB3$", StrengthTier::VeryStrong)]
fn test_strength_tiers(#[case] password: &str, #[case] expected: StrengthTier) {
    assert_eq!(score_strength(password), expected);
}

#[test]
fn test_example_passphrase_scores() {
    // 11 chars: +1 length, +4 classes, +1 all-classes bonus.
    assert_eq!(strength_score("Tr0ub4dor&3"), 6);
    assert!(score_strength("Tr0ub4dor&3") >= StrengthTier::Strong);
}

#[test]
fn test_tier_labels() {
    assert_eq!(StrengthTier::VeryStrong.to_string(), "very-strong");
    assert_eq!(
        serde_json::to_value(StrengthTier::Fair).unwrap(),
        serde_json::json!("fair")
    );
    assert!(StrengthTier::Weak < StrengthTier::Fair);
    assert!(StrengthTier::Strong < StrengthTier::VeryStrong);
}

#[test]
fn test_generator_strength_matches_free_function() {
    let generator = PasswordGenerator::new();
    assert_eq!(generator.strength("hunter2"), score_strength("hunter2"));
}
