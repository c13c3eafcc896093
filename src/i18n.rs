//! Internationalization (i18n) module
//!
//! Picks the console language from the system locale.
//! Supports English and Chinese Simplified.
//! Note: Log messages remain in English for consistency.

/// Supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    ChineseSimplified,
}

impl Language {
    /// Locale key used by the translation files
    pub fn locale(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::ChineseSimplified => "zh-CN",
        }
    }

    /// Map a BCP 47 tag or POSIX locale string to a supported language
    pub fn from_locale_tag(tag: &str) -> Self {
        let tag = tag.to_lowercase();
        if tag.starts_with("zh") || tag.contains("hans") {
            Language::ChineseSimplified
        } else {
            Language::English
        }
    }
}

/// Detect the system language
pub fn detect_language() -> Language {
    sys_locale::get_locale()
        .map(|tag| Language::from_locale_tag(&tag))
        .unwrap_or(Language::English)
}

/// Set the translation locale from the system settings
pub fn init_locale() {
    rust_i18n::set_locale(detect_language().locale());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_detection() {
        // This test just ensures the function doesn't panic
        let _lang = detect_language();
    }

    #[test]
    fn test_from_locale_tag() {
        assert_eq!(Language::from_locale_tag("zh-CN"), Language::ChineseSimplified);
        assert_eq!(Language::from_locale_tag("zh_CN.UTF-8"), Language::ChineseSimplified);
        assert_eq!(Language::from_locale_tag("en-US"), Language::English);
        assert_eq!(Language::from_locale_tag("de_DE"), Language::English);
    }

    #[test]
    fn test_strings_exist() {
        assert_eq!(
            rust_i18n::t!("progress", locale = "en", count = 1, total = 4),
            "1 of 4 completed."
        );
        assert!(!rust_i18n::t!("progress", locale = "zh-CN", count = 1, total = 4).is_empty());
    }
}
