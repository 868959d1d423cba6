use regex::Regex;
use std::sync::OnceLock;

static DATE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn date_pattern() -> &'static Regex {
    DATE_PATTERN.get_or_init(|| Regex::new(r"^(\d{2})-(\d{2})-(\d{4})$").expect("static pattern"))
}

/// Reformat a `DD-MM-YYYY` date into the `YYYY-MM-DD` form a native date
/// input accepts. Anything not matching that exact shape passes through
/// unchanged.
pub fn to_input_format(date: &str) -> String {
    match date_pattern().captures(date) {
        Some(parts) => format!("{}-{}-{}", &parts[3], &parts[2], &parts[1]),
        None => date.to_string(),
    }
}
