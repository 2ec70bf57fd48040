//! End-to-end canonicalization tests
//!
//! Scenario tests run the built-in en-US pack through the public API;
//! property tests check the pipeline-wide guarantees.

use std::sync::Arc;

use aster_core::{
    canonicalize, Canonicalizer, Direction, EnUsPack, Lexicon, LocalePack, Registries,
    SemanticTokenKind, TransformerRegistry,
};
use proptest::prelude::*;

fn english() -> Canonicalizer {
    Canonicalizer::for_locale("en-US").unwrap()
}

fn canon(text: &str) -> String {
    english().canonicalize(text)
}

/// Every kind spelled as its lowercase name, with German sentence keywords
fn german() -> Lexicon {
    let mut builder = Lexicon::builder("de-DE", "Deutsch")
        .punctuation(aster_core::PunctuationConfig::standard());
    for &kind in SemanticTokenKind::ALL {
        builder = builder.keyword(kind, kind.name().to_lowercase().replace('_', " "));
    }
    builder
        .keyword(SemanticTokenKind::Set, "Setze")
        .keyword(SemanticTokenKind::To, "auf")
        .keyword(SemanticTokenKind::Let, "Sei")
        .keyword(SemanticTokenKind::Be, "gleich")
        .keyword(SemanticTokenKind::Return, "Gib zurück")
        .phrase("größer als", ">")
        .article("der")
        .article("die")
        .article("das")
        .transformer("set-to")
        .build()
        .unwrap()
}

// ── Scenarios ─────────────────────────────────────────────

#[test]
fn test_canonical_input_is_unchanged() {
    assert_eq!(canon("Module app."), "Module app.");
}

#[test]
fn test_multi_word_keyword_and_article() {
    assert_eq!(canon("As One Of the options."), "as one of options.");
    assert_eq!(canon("Wait For the result."), "wait for result.");
}

#[test]
fn test_possessive_scenarios() {
    assert!(canon("If driver's age under 18:").contains("driver.age"));
    assert!(canon("Return Müller's score.").contains("Müller.score"));
}

#[test]
fn test_literal_blocks_possessive() {
    let output = canon("Return \"driver's license\".");
    assert!(output.contains("\"driver's license\""));
}

#[test]
fn test_result_is_scenarios() {
    assert!(canon("The result is 42.").contains("Return 42."));
    assert!(canon("the result is 42.").contains("Return 42."));
}

#[test]
fn test_set_to_scenario() {
    assert_eq!(
        canon("Set basePremium to calculateBase with driver, vehicle."),
        "Let basePremium be calculateBase with driver, vehicle."
    );
}

#[test]
fn test_comparison_scenarios() {
    assert_eq!(canon("x under 18"), "x < 18");
    assert_eq!(canon("x over 3"), "x > 3");
    assert_eq!(canon("x more than 3"), "x > 3");
}

#[test]
fn test_compound_comparison_scenarios() {
    assert_eq!(canon("x is greater than or equal to 3"), "x >= 3");
    assert_eq!(canon("x greater than or equal to 3"), "x >= 3");
    assert_eq!(canon("x Is Less Than Or Equal To 3"), "x <= 3");
    assert_eq!(canon("x less than or equal to 3"), "x <= 3");
    assert_eq!(canon("If age is greater than or equal to 18:"), "If age >= 18:");
    // Shorter phrases still apply when the compound form is incomplete.
    assert_eq!(canon("x greater than or y"), "x > or y");
}

#[test]
fn test_literal_scenario() {
    let input = "print \"the quick brown fox\"";
    assert_eq!(canon(input), input);
}

#[test]
fn test_article_removal_around_literal() {
    assert_eq!(
        canon("call the function with \"the parameter\""),
        "call function with \"the parameter\""
    );
}

#[test]
fn test_free_function_uses_en_us() {
    assert_eq!(canonicalize("Set x to 1.").unwrap(), "Let x be 1.");
}

#[test]
fn test_whole_program() {
    let input = "\
This module is quotes.

Rule premium given driver:
  Set base to 100.
  If driver's age under 25:
    Set base to base plus 50.
  The result is base.
";
    let expected = "\
Module quotes.

Rule premium given driver:
  Let base be 100.
  If driver.age < 25:
    Let base be base plus 50.
  Return base.
";
    assert_eq!(canon(input), expected);
}

#[test]
fn test_other_locale_uses_its_own_vocabulary() {
    let canonicalizer =
        Canonicalizer::new(Arc::new(german()), &TransformerRegistry::with_builtins()).unwrap();
    assert_eq!(
        canonicalizer.canonicalize("SETZE x AUF die summe."),
        "Sei x gleich summe."
    );
    assert_eq!(canonicalizer.canonicalize("x GRÖSSER ALS 3"), "x GRÖSSER ALS 3");
    assert_eq!(canonicalizer.canonicalize("x Größer Als 3"), "x > 3");
    // Only the transformers the locale lists run.
    assert_eq!(canonicalizer.canonicalize("x's y"), "x's y");
}

#[test]
fn test_registries_share_lexicons() {
    let mut registries = Registries::empty();
    let installed = registries.install(&EnUsPack).unwrap();
    let fetched = registries.lexicons.get("en-US").unwrap();
    assert!(Arc::ptr_eq(&installed, &fetched));
    assert_eq!(fetched.direction(), Direction::Ltr);
}

// ── Properties ────────────────────────────────────────────

/// Tokens whose combinations the en-US pack rewrites stably
const VOCABULARY: &[&str] = &[
    "Module", "app", "the", "a", "an", "result", "is", "Set", "set", "x", "to", "Let", "be",
    "driver's", "car’s", "age", "over", "under", "more", "than", "at", "least", "As", "One",
    "Of", "wait", "For", "each", "Return", "42", "\"lit\"", "\"the x's\"", "plus", "If", ":",
    ".", ",", "\n", "  ", "Müller's", "größe",
];

fn program() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(VOCABULARY), 0..24).prop_map(|tokens| tokens.join(" "))
}

fn scramble_case(text: &str, mask: &[bool]) -> String {
    text.chars()
        .zip(mask.iter().cycle())
        .map(|(c, &upper)| {
            if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_literals_survive(
        prefix in program(),
        body in "[a-zA-Z' .,]{0,24}",
        suffix in program(),
    ) {
        let literal = format!("\"{}\"", body);
        let input = format!("{} {} {}", prefix.replace('"', ""), literal, suffix.replace('"', ""));
        let output = canon(&input);
        prop_assert!(output.contains(&literal), "{:?} lost {:?}: {:?}", input, literal, output);
    }

    #[test]
    fn prop_idempotent(input in program()) {
        let once = canon(&input);
        let twice = canon(&once);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn prop_keyword_casing_is_canonical(
        index in 0..SemanticTokenKind::COUNT,
        mask in prop::collection::vec(any::<bool>(), 1..16),
    ) {
        let lexicon = EnUsPack.lexicon().unwrap();
        let kind = SemanticTokenKind::ALL[index];
        let spelling = lexicon.keyword(kind);
        prop_assume!(spelling.chars().any(char::is_alphabetic));

        let input = format!("zz {} zz", scramble_case(spelling, &mask));
        prop_assert_eq!(canon(&input), format!("zz {} zz", spelling));
    }

    #[test]
    fn prop_longest_phrase_wins(
        index in 0..64usize,
        mask in prop::collection::vec(any::<bool>(), 1..16),
    ) {
        let lexicon = EnUsPack.lexicon().unwrap();
        let phrases = lexicon.phrases();
        let phrase = &phrases[index % phrases.len()];

        let input = format!("x {} y", scramble_case(&phrase.phrase, &mask));
        prop_assert_eq!(canon(&input), format!("x {} y", phrase.canonical));
    }
}
