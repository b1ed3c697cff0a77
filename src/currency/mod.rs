//! Locale-aware rendering of whole-unit amounts.

/// Separators and symbol placement for a BCP 47 language tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub grouping_separator: char,
    pub symbol_after_amount: bool,
}

impl LocaleConfig {
    /// Resolves the conventions for `tag`; unknown languages fall back to `,` grouping.
    pub fn for_tag(tag: &str) -> Self {
        let language = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        let (grouping_separator, symbol_after_amount) = match language.as_str() {
            "de" | "es" | "it" | "nl" | "pt" | "da" | "id" => ('.', true),
            "fr" | "sv" | "nb" | "fi" | "pl" | "cs" | "ru" => (' ', true),
            _ => (',', false),
        };
        Self {
            language_tag: tag.to_string(),
            grouping_separator,
            symbol_after_amount,
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::for_tag("ja-JP")
    }
}

pub fn symbol_for(code: &str) -> String {
    match code.to_ascii_uppercase().as_str() {
        "JPY" => "¥".into(),
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "KRW" => "₩".into(),
        "CNY" => "CN¥".into(),
        other => other.into(),
    }
}

/// Groups the digits of `value` in threes using the locale's separator.
pub fn format_number(locale: &LocaleConfig, value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(locale.grouping_separator);
        }
        grouped.push(ch);
    }
    if value < 0 {
        grouped.insert(0, '-');
    }
    grouped
}

/// Renders `amount` with the currency symbol placed the way `locale` expects.
pub fn format_currency(locale: &LocaleConfig, currency: &str, amount: i64) -> String {
    let symbol = symbol_for(currency);
    let body = format_number(locale, amount.saturating_abs());
    let sign = if amount < 0 { "-" } else { "" };
    if locale.symbol_after_amount {
        format!("{sign}{body} {symbol}")
    } else {
        format!("{sign}{symbol}{body}")
    }
}
