//! Locale-aware labels.
//!
//! Weekday labels are produced through the [`WeekdayFormatter`] trait so the
//! engine never depends on ambient locale data. [`BuiltinWeekdays`] ships the
//! short weekday names for the languages the front end offers.
//!
//! [`translate`] is a plain key lookup for the handful of labels a front end
//! shows next to a report.

use time::Date;
use weatherly_types::Condition;

/// Languages with built-in weekday names and translations.
pub const SUPPORTED_LANGUAGES: [&str; 9] = ["en", "es", "fr", "de", "ja", "pt", "it", "hi", "zh"];

/// Formats the short weekday label of a date for a language tag.
pub trait WeekdayFormatter: Send + Sync {
    /// Short weekday label, e.g. `"Mon"` for English or `"lun."` for French.
    fn short_weekday(&self, date: Date, language: &str) -> String;
}

/// Built-in short weekday names.
///
/// Region subtags are ignored (`pt-BR` uses `pt`); unknown languages fall
/// back to English.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinWeekdays;

impl BuiltinWeekdays {
    fn names(language: &str) -> &'static [&'static str; 7] {
        // Sunday first
        match primary_language(language).as_str() {
            "es" => &["dom", "lun", "mar", "mié", "jue", "vie", "sáb"],
            "fr" => &["dim.", "lun.", "mar.", "mer.", "jeu.", "ven.", "sam."],
            "de" => &["So.", "Mo.", "Di.", "Mi.", "Do.", "Fr.", "Sa."],
            "ja" => &["日", "月", "火", "水", "木", "金", "土"],
            "pt" => &["dom.", "seg.", "ter.", "qua.", "qui.", "sex.", "sáb."],
            "it" => &["dom", "lun", "mar", "mer", "gio", "ven", "sab"],
            "hi" => &["रवि", "सोम", "मंगल", "बुध", "गुरु", "शुक्र", "शनि"],
            "zh" => &["周日", "周一", "周二", "周三", "周四", "周五", "周六"],
            _ => &["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
        }
    }
}

impl WeekdayFormatter for BuiltinWeekdays {
    fn short_weekday(&self, date: Date, language: &str) -> String {
        let index = usize::from(date.weekday().number_days_from_sunday());
        Self::names(language)[index].to_string()
    }
}

/// Lowercased primary subtag of a BCP-47-like tag (`"pt-BR"` -> `"pt"`).
pub fn primary_language(language: &str) -> String {
    language
        .trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Labels available through [`translate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationKey {
    Humidity,
    Wind,
    /// "Any" weather, i.e. no condition filter.
    AnyWeather,
    Condition(Condition),
    NotFound,
}

/// Look up a label in the requested language, falling back to English.
///
/// # Example
///
/// ```
/// use weatherly_core::locale::{TranslationKey, translate};
///
/// assert_eq!(translate(TranslationKey::Wind, "de-AT"), "Wind");
/// assert_eq!(translate(TranslationKey::Humidity, "es"), "Humedad");
/// assert_eq!(translate(TranslationKey::Humidity, "xx"), "Humidity");
/// ```
pub fn translate(key: TranslationKey, language: &str) -> &'static str {
    let lang = primary_language(language);
    lookup(key, &lang)
        .or_else(|| lookup(key, "en"))
        .unwrap_or_default()
}

fn lookup(key: TranslationKey, lang: &str) -> Option<&'static str> {
    use TranslationKey as K;

    let label = match (key, lang) {
        (K::Humidity, "en") => "Humidity",
        (K::Humidity, "es") => "Humedad",
        (K::Humidity, "fr") => "Humidité",
        (K::Humidity, "de") => "Luftfeuchtigkeit",
        (K::Humidity, "ja") => "湿度",
        (K::Humidity, "pt") => "Umidade",
        (K::Humidity, "it") => "Umidità",
        (K::Humidity, "hi") => "नमी",
        (K::Humidity, "zh") => "湿度",

        (K::Wind, "en") => "Wind",
        (K::Wind, "es") => "Viento",
        (K::Wind, "fr") => "Vent",
        (K::Wind, "de") => "Wind",
        (K::Wind, "ja") => "風",
        (K::Wind, "pt") => "Vento",
        (K::Wind, "it") => "Vento",
        (K::Wind, "hi") => "हवा",
        (K::Wind, "zh") => "风",

        (K::AnyWeather, "en") => "Any",
        (K::AnyWeather, "es") => "Cualquiera",
        (K::AnyWeather, "fr") => "Tout",
        (K::AnyWeather, "de") => "Jedes",
        (K::AnyWeather, "ja") => "すべて",
        (K::AnyWeather, "pt") => "Qualquer",
        (K::AnyWeather, "it") => "Qualsiasi",
        (K::AnyWeather, "hi") => "कोई भी",
        (K::AnyWeather, "zh") => "任何",

        (K::Condition(c), "en") => c.name(),
        (K::Condition(c), lang) => return condition_label(c, lang),

        (K::NotFound, "en") => "Could not find weather data for that location. Please try another.",

        _ => return None,
    };
    Some(label)
}

fn condition_label(condition: Condition, lang: &str) -> Option<&'static str> {
    use weatherly_types::Condition::*;

    let label = match (condition, lang) {
        (Sunny, "es") => "Soleado",
        (Sunny, "fr") => "Ensoleillé",
        (Sunny, "de") => "Sonnig",
        (Sunny, "ja") => "晴れ",
        (Sunny, "pt") => "Ensolarado",
        (Sunny, "it") => "Soleggiato",
        (Sunny, "hi") => "धूप",
        (Sunny, "zh") => "晴天",

        (Cloudy, "es") => "Nublado",
        (Cloudy, "fr") => "Nuageux",
        (Cloudy, "de") => "Bewölkt",
        (Cloudy, "ja") => "曇り",
        (Cloudy, "pt") => "Nublado",
        (Cloudy, "it") => "Nuvoloso",
        (Cloudy, "hi") => "बादल",
        (Cloudy, "zh") => "多云",

        (Rain, "es") => "Lluvia",
        (Rain, "fr") => "Pluie",
        (Rain, "de") => "Regen",
        (Rain, "ja") => "雨",
        (Rain, "pt") => "Chuva",
        (Rain, "it") => "Pioggia",
        (Rain, "hi") => "बारिश",
        (Rain, "zh") => "雨",

        (Snow, "es") => "Nieve",
        (Snow, "fr") => "Neige",
        (Snow, "de") => "Schnee",
        (Snow, "ja") => "雪",
        (Snow, "pt") => "Neve",
        (Snow, "it") => "Neve",
        (Snow, "hi") => "बर्फ़",
        (Snow, "zh") => "雪",

        (Thunderstorm, "es") => "Tormenta",
        (Thunderstorm, "fr") => "Orage",
        (Thunderstorm, "de") => "Gewitter",
        (Thunderstorm, "ja") => "雷雨",
        (Thunderstorm, "pt") => "Trovoada",
        (Thunderstorm, "it") => "Temporale",
        (Thunderstorm, "hi") => "आंधी",
        (Thunderstorm, "zh") => "雷暴",

        (Foggy, "es") => "Nebuloso",
        (Foggy, "fr") => "Brouillard",
        (Foggy, "de") => "Neblig",
        (Foggy, "ja") => "霧",
        (Foggy, "pt") => "Nevoeiro",
        (Foggy, "it") => "Nebbioso",
        (Foggy, "hi") => "धुंध",
        (Foggy, "zh") => "有雾",

        // Partly Cloudy has no translations yet
        _ => return None,
    };
    Some(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_english_weekdays() {
        let fmt = BuiltinWeekdays;
        // 2025-06-01 was a Sunday
        assert_eq!(fmt.short_weekday(date!(2025 - 06 - 01), "en"), "Sun");
        assert_eq!(fmt.short_weekday(date!(2025 - 06 - 02), "en"), "Mon");
        assert_eq!(fmt.short_weekday(date!(2025 - 06 - 07), "en-US"), "Sat");
    }

    #[test]
    fn test_localized_weekdays() {
        let fmt = BuiltinWeekdays;
        let monday = date!(2025 - 06 - 02);
        assert_eq!(fmt.short_weekday(monday, "fr"), "lun.");
        assert_eq!(fmt.short_weekday(monday, "de"), "Mo.");
        assert_eq!(fmt.short_weekday(monday, "ja"), "月");
        assert_eq!(fmt.short_weekday(monday, "pt-BR"), "seg.");
        assert_eq!(fmt.short_weekday(monday, "zh-CN"), "周一");
    }

    #[test]
    fn test_unknown_language_falls_back_to_english() {
        assert_eq!(BuiltinWeekdays.short_weekday(date!(2025 - 06 - 03), "tlh"), "Tue");
        assert_eq!(BuiltinWeekdays.short_weekday(date!(2025 - 06 - 03), ""), "Tue");
    }

    #[test]
    fn test_primary_language() {
        assert_eq!(primary_language("en-US"), "en");
        assert_eq!(primary_language(" PT_br "), "pt");
        assert_eq!(primary_language(""), "");
    }

    #[test]
    fn test_translate_conditions() {
        assert_eq!(translate(TranslationKey::Condition(Condition::Rain), "it"), "Pioggia");
        assert_eq!(translate(TranslationKey::Condition(Condition::Snow), "en"), "Snow");
        assert_eq!(
            translate(TranslationKey::Condition(Condition::PartlyCloudy), "fr"),
            "Partly Cloudy"
        );
    }

    #[test]
    fn test_every_key_has_english_label() {
        let mut keys = vec![
            TranslationKey::Humidity,
            TranslationKey::Wind,
            TranslationKey::AnyWeather,
            TranslationKey::NotFound,
        ];
        keys.extend(Condition::ALL.map(TranslationKey::Condition));
        for key in keys {
            for lang in SUPPORTED_LANGUAGES {
                assert!(!translate(key, lang).is_empty(), "{key:?} missing for {lang}");
            }
        }
    }
}
