//! # Localization Tests
//!
//! Language fallback and message rendering as the bot's users see them.

use perfect_fit::localization::{
    detect_language, init_localization, t_args_lang, t_lang, LocalizationManager,
};

fn setup_localization() {
    let _ = init_localization();
}

/// Regional French variants get the French bundle
#[test]
fn test_regional_french_uses_french() {
    setup_localization();

    let french = t_lang("prompt-bust", Some("fr"));
    assert!(french.contains("tour de poitrine"));

    for code in ["fr-CA", "fr_BE", "FR-fr"] {
        assert_eq!(t_lang("prompt-bust", Some(code)), french, "{}", code);
    }
}

/// Unsupported or missing languages fall back to English
#[test]
fn test_unsupported_language_falls_back_to_english() {
    setup_localization();

    let english = t_lang("prompt-underbust", Some("en"));
    assert!(english.contains("underbust"));

    assert_eq!(t_lang("prompt-underbust", Some("de")), english);
    assert_eq!(t_lang("prompt-underbust", Some("pt-BR")), english);
    assert_eq!(t_lang("prompt-underbust", None), english);
}

#[test]
fn test_language_detection() {
    assert_eq!(detect_language(Some("en-US")), "en");
    assert_eq!(detect_language(Some("fr-CA")), "fr");
    assert_eq!(detect_language(Some("de")), "en");
    assert_eq!(detect_language(Some("")), "en");
    assert_eq!(detect_language(None), "en");
}

/// Sizes and measurement limits are substituted into both languages
#[test]
fn test_arguments_in_both_languages() {
    setup_localization();

    for lang in ["en", "fr"] {
        let size = t_args_lang("size-result", &[("size", "37DD")], Some(lang));
        assert!(size.contains("37DD"), "{}: {}", lang, size);

        let range = t_args_lang("error-out-of-range", &[("min", "40"), ("max", "200")], Some(lang));
        assert!(range.contains("40") && range.contains("200"), "{}: {}", lang, range);
    }
}

#[test]
fn test_missing_key_is_visible() {
    setup_localization();
    assert_eq!(
        t_lang("no-such-key", Some("fr")),
        "Missing translation: no-such-key"
    );
}

/// Every message the bot sends exists in French
#[test]
fn test_french_bundle_is_complete() {
    let manager = LocalizationManager::new().unwrap();
    let keys = [
        "welcome-title",
        "welcome-description",
        "prompt-underbust",
        "prompt-bust",
        "error-not-a-number",
        "error-not-positive",
        "error-out-of-range",
        "error-bust-too-small",
        "size-result",
        "prompt-garment",
        "prompt-budget",
        "garment-daily",
        "garment-sports",
        "garment-party",
        "budget-low",
        "budget-mid",
        "budget-high",
        "results-title",
        "tip-daily",
        "tip-sports",
        "tip-party",
        "results-restart",
        "out-of-sequence",
        "help-title",
        "help-measure-underbust",
        "help-measure-bust",
        "help-sports",
        "help-daily",
        "help-commands",
    ];

    for key in keys {
        let message = manager.get_message_in_language(key, "fr", None);
        assert!(!message.starts_with("Missing"), "missing French key {}", key);
    }
}
