//! Company name normalization
//!
//! Strips corporate suffixes to recover the parent entity, so that
//! "SteelFlow Ltd" and "Steelflow Limited" group under one name.

use once_cell::sync::Lazy;
use regex::Regex;

static CORPORATE_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(ltd|industries|infra|group|enterprises|corp|limited)\b").unwrap()
});

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Parent entity name, title-cased
///
/// A name made up only of suffixes ("Group Ltd") is title-cased as given
/// rather than collapsed to an empty string.
pub fn normalize_company(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let stripped = CORPORATE_SUFFIX.replace_all(&lowered, "");
    let collapsed = WHITESPACE.replace_all(stripped.trim(), " ");

    if collapsed.is_empty() {
        return title_case(&WHITESPACE.replace_all(&lowered, " "));
    }
    title_case(&collapsed)
}

/// Uppercase the first letter of every alphabetic run
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
