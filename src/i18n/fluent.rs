// SPDX-License-Identifier: MPL-2.0
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource};
use rust_embed::RustEmbed;
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

pub const DEFAULT_LOCALE: &str = "en-US";

pub struct I18n {
    bundles: HashMap<LanguageIdentifier, FluentBundle<FluentResource>>,
    pub available_locales: Vec<LanguageIdentifier>,
    current_locale: LanguageIdentifier,
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("available_locales", &self.available_locales)
            .field("current_locale", &self.current_locale)
            .finish_non_exhaustive()
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl I18n {
    /// Loads every embedded `.ftl` file and picks the active locale from the
    /// CLI flag, then the configured language, then the OS locale.
    pub fn new(cli_lang: Option<String>, config_lang: Option<&str>) -> Self {
        let mut bundles = HashMap::new();
        let mut available_locales = Vec::new();

        for file in Asset::iter() {
            let filename = file.as_ref();
            let Some(locale_str) = filename.strip_suffix(".ftl") else {
                continue;
            };
            let Ok(locale) = locale_str.parse::<LanguageIdentifier>() else {
                tracing::warn!(file = filename, "skipping translation file with invalid locale");
                continue;
            };
            let Some(content) = Asset::get(filename) else {
                continue;
            };

            let source = String::from_utf8_lossy(content.data.as_ref()).to_string();
            let resource = match FluentResource::try_new(source) {
                Ok(resource) => resource,
                Err((resource, errors)) => {
                    tracing::warn!(file = filename, errors = errors.len(), "translation file has syntax errors");
                    resource
                }
            };
            let mut bundle = FluentBundle::new(vec![locale.clone()]);
            // Unicode isolation marks would leak into plain iced text.
            bundle.set_use_isolating(false);
            if let Err(errors) = bundle.add_resource(resource) {
                tracing::warn!(file = filename, errors = errors.len(), "duplicate translation keys");
            }
            bundles.insert(locale.clone(), bundle);
            available_locales.push(locale);
        }
        available_locales.sort_by_key(ToString::to_string);

        let current_locale = resolve_locale(cli_lang, config_lang, &available_locales)
            .unwrap_or_else(default_locale);

        Self {
            bundles,
            available_locales,
            current_locale,
        }
    }

    #[must_use]
    pub fn current_locale(&self) -> &LanguageIdentifier {
        &self.current_locale
    }

    pub fn tr(&self, key: &str) -> String {
        self.format(key, None)
    }

    pub fn tr_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, *value);
        }
        self.format(key, Some(&fluent_args))
    }

    fn format(&self, key: &str, args: Option<&FluentArgs>) -> String {
        if let Some(bundle) = self.bundles.get(&self.current_locale) {
            if let Some(msg) = bundle.get_message(key) {
                if let Some(pattern) = msg.value() {
                    let mut errors = vec![];
                    let value = bundle.format_pattern(pattern, args, &mut errors);
                    if errors.is_empty() {
                        return value.to_string();
                    }
                }
            }
        }
        format!("MISSING: {}", key)
    }
}

fn default_locale() -> LanguageIdentifier {
    LanguageIdentifier::from_bytes(DEFAULT_LOCALE.as_bytes()).unwrap_or_default()
}

fn parse_available(raw: &str, available: &[LanguageIdentifier]) -> Option<LanguageIdentifier> {
    let lang = raw.parse::<LanguageIdentifier>().ok()?;
    if available.contains(&lang) {
        return Some(lang);
    }
    // "id-ID" falls back to "id" when only the bare language ships
    available
        .iter()
        .find(|candidate| candidate.language == lang.language && candidate.region.is_none())
        .cloned()
}

fn resolve_locale(
    cli_lang: Option<String>,
    config_lang: Option<&str>,
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    cli_lang
        .as_deref()
        .and_then(|lang| parse_available(lang, available))
        .or_else(|| config_lang.and_then(|lang| parse_available(lang, available)))
        .or_else(|| sys_locale::get_locale().and_then(|lang| parse_available(&lang, available)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn available() -> Vec<LanguageIdentifier> {
        vec!["en-US".parse().unwrap(), "id".parse().unwrap()]
    }

    #[test]
    fn test_resolve_locale_cli() {
        let lang = resolve_locale(Some("id".to_string()), Some("en-US"), &available());
        assert_eq!(lang, Some("id".parse().unwrap()));
    }

    #[test]
    fn test_resolve_locale_config() {
        let lang = resolve_locale(None, Some("id"), &available());
        assert_eq!(lang, Some("id".parse().unwrap()));
    }

    #[test]
    fn test_region_falls_back_to_language() {
        let lang = resolve_locale(Some("id-ID".to_string()), None, &available());
        assert_eq!(lang, Some("id".parse().unwrap()));
    }

    #[test]
    fn test_resolve_locale_default() {
        let available = available();
        let lang = resolve_locale(None, None, &available);
        // depends on the host locale
        if let Some(l) = lang {
            assert!(available.contains(&l));
        }
    }

    #[test]
    fn embedded_bundles_translate_keys() {
        let english = I18n::new(Some("en-US".into()), None);
        assert_eq!(english.tr("camera-take-photo"), "Take photo");

        let indonesian = I18n::new(Some("id".into()), None);
        assert_eq!(indonesian.tr("camera-take-photo"), "Ambil foto");
    }

    #[test]
    fn args_are_interpolated() {
        let i18n = I18n::new(Some("en-US".into()), None);
        assert_eq!(
            i18n.tr_with_args("result-detection-label", &[("label", "Penyu Hijau")]),
            "Result: Penyu Hijau"
        );
    }

    #[test]
    fn missing_key_is_marked() {
        let i18n = I18n::new(Some("en-US".into()), None);
        assert_eq!(i18n.tr("no-such-key"), "MISSING: no-such-key");
    }

    #[test]
    fn both_locales_define_the_same_keys() {
        let en = Asset::get("en-US.ftl").expect("en-US bundle");
        let id = Asset::get("id.ftl").expect("id bundle");
        let keys = |data: &[u8]| {
            let mut keys: Vec<String> = String::from_utf8_lossy(data)
                .lines()
                .filter_map(|line| line.split_once(" = ").map(|(k, _)| k.trim().to_string()))
                .filter(|k| !k.starts_with('#') && !k.is_empty())
                .collect();
            keys.sort();
            keys
        };
        assert_eq!(keys(&en.data), keys(&id.data));
    }
}
