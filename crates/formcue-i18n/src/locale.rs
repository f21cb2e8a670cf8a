#![forbid(unsafe_code)]

//! Locale tags: normalization, system detection and candidate derivation.

use std::env;

/// A BCP-47-ish locale tag such as `"en"` or `"ru-RU"`.
pub type Locale = String;

/// Detect the system locale from environment variables.
///
/// Preference order: `LC_ALL`, then `LANG`. Falls back to `"en"` when unknown.
#[must_use]
pub fn detect_system_locale() -> Locale {
    let lc_all = env::var("LC_ALL").ok();
    let lang = env::var("LANG").ok();
    detect_system_locale_from(lc_all.as_deref(), lang.as_deref())
}

fn detect_system_locale_from(lc_all: Option<&str>, lang: Option<&str>) -> Locale {
    lc_all
        .and_then(normalize_locale)
        .or_else(|| lang.and_then(normalize_locale))
        .unwrap_or_else(|| crate::FALLBACK_LOCALE.to_owned())
}

/// Normalize a raw locale string into a dash-separated tag.
///
/// Drops `.codeset` and `@modifier` suffixes, turns `_` into `-`, and maps the
/// `C`/`POSIX` locales to `"en"`. Returns `None` for blank input.
#[must_use]
pub fn normalize_locale(raw: &str) -> Option<Locale> {
    let raw = raw.trim();
    let raw = raw.split('@').next().unwrap_or(raw);
    let raw = raw.split('.').next().unwrap_or(raw).trim();
    if raw.is_empty() {
        return None;
    }
    if raw.eq_ignore_ascii_case("c") || raw.eq_ignore_ascii_case("posix") {
        return Some(crate::FALLBACK_LOCALE.to_owned());
    }
    Some(raw.replace('_', "-"))
}

/// Locale candidates from most to least specific.
///
/// Trailing subtags are stripped one at a time:
/// `"zh-Hant-TW"` yields `["zh-Hant-TW", "zh-Hant", "zh"]`. Blank input
/// yields no candidates.
#[must_use]
pub fn locale_candidates(tag: &str) -> Vec<Locale> {
    let tag = tag.trim();
    let mut parts: Vec<&str> = tag.split(['-', '_']).filter(|p| !p.is_empty()).collect();
    let mut candidates = Vec::with_capacity(parts.len());
    while !parts.is_empty() {
        candidates.push(parts.join("-"));
        parts.pop();
    }
    candidates
}
