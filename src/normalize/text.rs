//! Text canonicalisation shared by the lookup and overlap normalizers.

use std::collections::BTreeSet;

/// Canonical form used for every string comparison: trimmed, lowercase,
/// internal whitespace collapsed to single spaces.
pub fn normalize_key(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Canonical, de-duplicated set of keys. Blank entries are dropped.
pub fn key_set<I, S>(items: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| normalize_key(item.as_ref()))
        .filter(|key| !key.is_empty())
        .collect()
}

/// Alphanumeric tokens of at least two characters, lowercased.
///
/// `"Nairobi, Kenya"` → `{"kenya", "nairobi"}`.
pub fn tokens(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_lowercase)
        .collect()
}

/// Magnitude words accepted after a number, longest spelling first so that
/// prefix stripping prefers `"million"` over `"m"`.
const MAGNITUDES: [(&str, f64); 10] = [
    ("thousand", 1e3),
    ("million", 1e6),
    ("billion", 1e9),
    ("mln", 1e6),
    ("mil", 1e6),
    ("mn", 1e6),
    ("bn", 1e9),
    ("k", 1e3),
    ("m", 1e6),
    ("b", 1e9),
];

/// Currency names that are not three-letter codes. Listed explicitly where
/// they would otherwise read as a magnitude followed by a code (`"kshs"`).
const CURRENCY_WORDS: [&str; 22] = [
    "ksh", "kshs", "shs", "sh", "rs", "dollar", "dollars", "euro", "euros", "pound", "pounds",
    "shilling", "shillings", "rupee", "rupees", "naira", "rand", "peso", "pesos", "franc",
    "francs", "cedis",
];

fn is_currency(word: &str) -> bool {
    word.len() == 3 || CURRENCY_WORDS.contains(&word)
}

/// Multiplier implied by the letters after a number: a magnitude, a currency,
/// or a magnitude followed by a currency (`"musd"`, `"milliondollars"`).
fn suffix_multiplier(suffix: &str) -> Option<f64> {
    let suffix = suffix.trim_end_matches('.');
    if suffix.is_empty() {
        return Some(1.0);
    }
    if !suffix.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    if let Some((_, multiplier)) = MAGNITUDES.iter().find(|(word, _)| *word == suffix) {
        return Some(*multiplier);
    }
    if is_currency(suffix) {
        return Some(1.0);
    }
    let mut prefixed = MAGNITUDES
        .iter()
        .filter_map(|(word, multiplier)| {
            suffix
                .strip_prefix(*word)
                .map(|rest| (rest, *multiplier))
        })
        .peekable();
    if prefixed.peek().is_none() {
        // plain currency word, e.g. "90000 colones"
        return Some(1.0);
    }
    prefixed
        .find(|(rest, _)| is_currency(rest))
        .map(|(_, multiplier)| multiplier)
}

/// Parses a single monetary amount.
///
/// Tolerates currency symbols or codes on either side, thousands separators,
/// and magnitude suffixes (`k`, `M`, `bn`, `million`), including a magnitude
/// followed by a currency (`"5M USD"`). A period is only read as a decimal
/// point when a digit follows it and no letter precedes it, so abbreviations
/// such as `"Ksh."` or `"approx."` are skipped. Returns `None` for anything
/// else.
pub fn parse_amount(text: &str) -> Option<f64> {
    let cleaned: Vec<char> = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect();

    let start = (0..cleaned.len()).find(|&i| {
        let c = cleaned[i];
        c.is_ascii_digit()
            || (c == '.'
                && cleaned.get(i + 1).is_some_and(char::is_ascii_digit)
                && !(i > 0 && cleaned[i - 1].is_alphabetic()))
    })?;
    let body = &cleaned[start..];
    let split = body
        .iter()
        .position(|c| !(c.is_ascii_digit() || *c == '.'))
        .unwrap_or(body.len());

    let number: String = body[..split].iter().collect();
    let suffix: String = body[split..].iter().collect();

    let value: f64 = number.parse().ok()?;
    let value = value * suffix_multiplier(&suffix)?;
    value.is_finite().then_some(value)
}

/// Parses a budget given as one amount or a `min-max` range.
///
/// A range resolves to its midpoint. Returns `None` when the text holds no
/// usable amount.
pub fn parse_budget(text: &str) -> Option<f64> {
    let parts: Vec<&str> = text
        .split(['-', '–', '—'])
        .flat_map(|part| part.split(" to "))
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    match parts.as_slice() {
        [single] => parse_amount(single),
        [low, high] => {
            let low = parse_amount(low)?;
            let high = parse_amount(high)?;
            Some((low + high) / 2.0)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("  Clean   Water "), "clean water");
        assert_eq!(normalize_key(""), "");
    }

    #[test]
    fn test_key_set_dedupes() {
        let set = key_set(["Health", "health ", "", "Water"]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("health"));
    }

    #[test]
    fn test_tokens() {
        let t = tokens("Nairobi, Kenya (East Africa)");
        assert!(t.contains("nairobi"));
        assert!(t.contains("east"));
        assert_eq!(t.len(), 4);
        assert!(tokens("a / b").is_empty());
    }

    #[test]
    fn test_parse_amount_variants() {
        assert_eq!(parse_amount("250000"), Some(250_000.0));
        assert_eq!(parse_amount("$1,200,000"), Some(1_200_000.0));
        assert_eq!(parse_amount("750k"), Some(750_000.0));
        assert_eq!(parse_amount("1.5M"), Some(1_500_000.0));
        assert_eq!(parse_amount("€ 40 000"), Some(40_000.0));
        assert_eq!(parse_amount("90000 USD"), Some(90_000.0));
        assert_eq!(parse_amount("tbd"), None);
        assert_eq!(parse_amount("12x4"), None);
    }

    #[test]
    fn test_parse_amount_skips_abbreviated_prefixes() {
        assert_eq!(parse_amount("Ksh. 1,000,000"), Some(1_000_000.0));
        assert_eq!(parse_amount("Rs. 500000"), Some(500_000.0));
        assert_eq!(parse_amount("approx. 500000"), Some(500_000.0));
        assert_eq!(parse_amount(".5M"), Some(500_000.0));
        assert_eq!(parse_amount("$.5M"), Some(500_000.0));
    }

    #[test]
    fn test_parse_amount_magnitude_then_currency() {
        assert_eq!(parse_amount("5M USD"), Some(5_000_000.0));
        assert_eq!(parse_amount("750k EUR"), Some(750_000.0));
        assert_eq!(parse_amount("1.2 million dollars"), Some(1_200_000.0));
        assert_eq!(parse_amount("2bn KES"), Some(2_000_000_000.0));
        assert_eq!(parse_amount("300000 KES"), Some(300_000.0));
        assert_eq!(parse_amount("300000 KShs"), Some(300_000.0));
        assert_eq!(parse_amount("5 mn."), Some(5_000_000.0));
        assert_eq!(parse_amount("5 kxyzw"), None);
    }

    #[test]
    fn test_parse_budget_range_midpoint() {
        assert_eq!(parse_budget("800000-1200000"), Some(1_000_000.0));
        assert_eq!(parse_budget("$800,000 - $1,200,000"), Some(1_000_000.0));
        assert_eq!(parse_budget("100k to 300k"), Some(200_000.0));
        assert_eq!(parse_budget("50000"), Some(50_000.0));
        assert_eq!(parse_budget("Ksh. 500,000 - Ksh. 1,500,000"), Some(1_000_000.0));
    }

    #[test]
    fn test_parse_budget_rejects_garbage() {
        assert_eq!(parse_budget(""), None);
        assert_eq!(parse_budget("unknown"), None);
        assert_eq!(parse_budget("1-2-3"), None);
        assert_eq!(parse_budget("100 - n/a"), None);
    }
}
