use anyhow::Result;
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tracing::warn;
use unic_langid::LanguageIdentifier;

/// Language used when the user's language is unknown or unsupported
pub const DEFAULT_LANGUAGE: &str = "en";

/// Locale resources compiled into the binary
const RESOURCES: [(&str, &str); 2] = [
    ("en", include_str!("../locales/en/main.ftl")),
    ("fr", include_str!("../locales/fr/main.ftl")),
];

/// Localization manager for the Perfect Fit bot
#[derive(Default)]
pub struct LocalizationManager {
    bundles: HashMap<String, Arc<FluentBundle<FluentResource>>>,
}

impl LocalizationManager {
    /// Create a new localization manager with every bundled language loaded
    pub fn new() -> Result<Self> {
        let mut bundles = HashMap::new();

        for (code, source) in RESOURCES {
            let locale: LanguageIdentifier = code.parse()?;
            let bundle = Self::create_bundle(&locale, source);
            bundles.insert(code.to_string(), Arc::new(bundle));
        }

        Ok(Self { bundles })
    }

    /// Create a fluent bundle for a specific locale
    fn create_bundle(locale: &LanguageIdentifier, source: &str) -> FluentBundle<FluentResource> {
        let mut bundle = FluentBundle::new_concurrent(vec![locale.clone()]);
        // Telegram renders the bidi isolation marks as stray characters
        bundle.set_use_isolating(false);

        let resource = match FluentResource::try_new(source.to_string()) {
            Ok(resource) => resource,
            Err((resource, errors)) => {
                warn!(locale = %locale, errors = ?errors, "Locale resource parsed with errors");
                resource
            }
        };

        if let Err(errors) = bundle.add_resource(resource) {
            warn!(locale = %locale, errors = ?errors, "Failed to add locale resource");
        }

        bundle
    }

    pub fn is_language_supported(&self, language: &str) -> bool {
        self.bundles.contains_key(language)
    }

    /// Get a localized message, falling back to English for unsupported languages
    pub fn get_message_in_language(
        &self,
        key: &str,
        language: &str,
        args: Option<&HashMap<&str, &str>>,
    ) -> String {
        let bundle = match self
            .bundles
            .get(language)
            .or_else(|| self.bundles.get(DEFAULT_LANGUAGE))
        {
            Some(bundle) => bundle,
            None => return format!("Missing translation: {}", key),
        };

        let msg = match bundle.get_message(key) {
            Some(msg) => msg,
            None => return format!("Missing translation: {}", key),
        };

        let pattern = match msg.value() {
            Some(pattern) => pattern,
            None => return format!("Missing value for key: {}", key),
        };

        let mut errors = vec![];
        let fluent_args = args.map(|args| {
            FluentArgs::from_iter(args.iter().map(|(k, v)| (*k, FluentValue::from(*v))))
        });
        let value = bundle.format_pattern(pattern, fluent_args.as_ref(), &mut errors);

        value.into_owned()
    }

    /// Get a localized message with simple string arguments
    pub fn get_message_with_args(&self, key: &str, language: &str, args: &[(&str, &str)]) -> String {
        let args_map: HashMap<&str, &str> = args.iter().cloned().collect();
        self.get_message_in_language(key, language, Some(&args_map))
    }
}

/// Global localization instance
static LOCALIZATION_MANAGER: OnceLock<LocalizationManager> = OnceLock::new();

/// Initialize the global localization manager
pub fn init_localization() -> Result<()> {
    let manager = LocalizationManager::new()?;
    // A second call keeps the manager from the first one
    let _ = LOCALIZATION_MANAGER.set(manager);
    Ok(())
}

/// Get the global localization manager, loading it on first use
pub fn get_localization_manager() -> &'static LocalizationManager {
    LOCALIZATION_MANAGER.get_or_init(|| {
        LocalizationManager::new().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load locales, messages will show their keys");
            LocalizationManager::default()
        })
    })
}

/// Map a Telegram language code to a supported language
pub fn detect_language(language_code: Option<&str>) -> &'static str {
    let primary = language_code
        .and_then(|code| code.split(['-', '_']).next())
        .map(|code| code.to_lowercase());

    match primary.as_deref() {
        Some("fr") => "fr",
        _ => DEFAULT_LANGUAGE,
    }
}

/// Convenience function to get a localized message
pub fn t_lang(key: &str, language_code: Option<&str>) -> String {
    get_localization_manager().get_message_in_language(key, detect_language(language_code), None)
}

/// Convenience function to get a localized message with arguments
pub fn t_args_lang(key: &str, args: &[(&str, &str)], language_code: Option<&str>) -> String {
    get_localization_manager().get_message_with_args(key, detect_language(language_code), args)
}
