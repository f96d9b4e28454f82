// src/sources/text.rs
//! Text helpers shared by the extraction policies.

use once_cell::sync::OnceCell;
use regex::Regex;
use scraper::ElementRef;

/// Collapse whitespace runs (incl. NBSP) to one space and trim.
pub fn collapse_ws(s: &str) -> String {
    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"[\s\u{00A0}]+").unwrap());
    re_ws.replace_all(s, " ").trim().to_string()
}

/// All text under `el`, whitespace-collapsed.
pub fn element_text(el: ElementRef<'_>) -> String {
    collapse_ws(&el.text().collect::<String>())
}

/// Turn an HTML fragment (e.g. a feed item body) into text lines.
/// Line breaks come from `<br>` and closing block tags; blank lines survive as "".
pub fn html_to_lines(s: &str) -> Vec<String> {
    static RE_BREAK: OnceCell<Regex> = OnceCell::new();
    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    let re_break = RE_BREAK
        .get_or_init(|| Regex::new(r"(?i)<br\s*/?>|</(p|div|li|h[1-6])\s*>").unwrap());
    let re_tags = RE_TAGS.get_or_init(|| Regex::new(r"(?is)</?[^>]+>").unwrap());

    let out = re_break.replace_all(s, "\n");
    let out = re_tags.replace_all(&out, "");
    let out = html_escape::decode_html_entities(&out);

    out.lines().map(collapse_ws).collect()
}

/// First letter upper-case, the rest lower-case.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_ws_handles_nbsp() {
        assert_eq!(collapse_ws("  Soup\u{00A0}\u{00A0} of \n the day "), "Soup of the day");
    }

    #[test]
    fn html_to_lines_keeps_breaks_and_blank_lines() {
        let lines = html_to_lines("<p>Pondelok:<br/>Polievka &amp; chlieb</p><br>Utorok:");
        assert_eq!(lines, vec!["Pondelok:", "Polievka & chlieb", "", "Utorok:"]);
    }

    #[test]
    fn capitalize_lowers_the_tail() {
        assert_eq!(capitalize("KURACIE prsia"), "Kuracie prsia");
        assert_eq!(capitalize("štvrtok"), "Štvrtok");
        assert_eq!(capitalize(""), "");
    }
}
