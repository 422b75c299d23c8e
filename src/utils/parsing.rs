//! String parsing utilities

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_width::UnicodeWidthStr;

static ANSI_ESCAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\x1b\[[0-9;]*m").unwrap());

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Extract value after the first colon, trimmed
pub fn extract_after_colon(line: &str) -> Option<String> {
    line.split_once(':')
        .map(|(_, value)| value.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Upper-case the first character and lower-case the rest ("KITTY" -> "Kitty")
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Title-case every word; a word starts after any non-alphabetic character
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut previous_alpha = false;
    for c in s.chars() {
        if previous_alpha {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        previous_alpha = c.is_alphabetic();
    }
    out
}

/// `gnome-terminal` -> `Gnome Terminal`
pub fn dashes_to_title(s: &str) -> String {
    title_case(&s.replace('-', " "))
}

/// Format uptime from seconds: `H:MM:SS`, with a `N day(s), ` prefix once a day has passed
pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    let clock = format!("{}:{:02}:{:02}", hours, minutes, secs);

    match days {
        0 => clock,
        1 => format!("1 day, {}", clock),
        n => format!("{} days, {}", n, clock),
    }
}

/// Bytes to whole gigabytes (GiB), rounded to nearest
pub fn bytes_to_gb(bytes: u64) -> u64 {
    (bytes as f64 / BYTES_PER_GB).round() as u64
}

/// `part / whole` as a percentage rounded to one decimal place; 0 when `whole` is 0
pub fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round_tenth(part as f64 / whole as f64 * 100.0)
}

pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Join at most `limit` items with ", ", appending "..." when some were cut.
/// An empty list yields `empty`.
pub fn join_limited<S: AsRef<str>>(items: &[S], limit: usize, empty: &str) -> String {
    if items.is_empty() {
        return empty.to_string();
    }
    let shown: Vec<&str> = items.iter().take(limit).map(AsRef::as_ref).collect();
    let mut joined = shown.join(", ");
    if items.len() > limit {
        joined.push_str("...");
    }
    joined
}

/// Remove ANSI SGR escape sequences
pub fn strip_ansi(text: &str) -> String {
    ANSI_ESCAPE.replace_all(text, "").into_owned()
}

/// Display width of a string ignoring colour codes
pub fn visible_width(text: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(text).as_str())
}

/// The text after the last `:` when it is a non-empty run of digits
pub fn port_from_address(address: &str) -> Option<u16> {
    let (_, port) = address.rsplit_once(':')?;
    if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    port.parse().ok()
}
