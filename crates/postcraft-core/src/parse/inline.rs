//! URL and hashtag recognition within a line of text.

use std::sync::LazyLock;

use regex::Regex;

use postcraft_types::parsed::Span;

/// Either token, URL alternative first so `https://x.com/#top` stays one URL.
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s()]+|#[\w-]+").expect("token regex is valid"));

/// Split `text` into plain, URL and hashtag spans.
///
/// Concatenating the span texts reproduces `text` exactly.
pub fn spans(text: &str) -> Vec<Span> {
    let mut out = Vec::new();
    let mut last = 0;
    for m in TOKEN_RE.find_iter(text) {
        if m.start() > last {
            out.push(Span::Text(text[last..m.start()].to_string()));
        }
        let token = m.as_str().to_string();
        if token.starts_with('#') {
            out.push(Span::Hashtag(token));
        } else {
            out.push(Span::Url(token));
        }
        last = m.end();
    }
    if last < text.len() {
        out.push(Span::Text(text[last..].to_string()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(spans: &[Span]) -> String {
        spans.iter().map(Span::as_str).collect()
    }

    #[test]
    fn test_plain_text_is_one_span() {
        assert_eq!(spans("just words"), vec![Span::Text("just words".into())]);
        assert!(spans("").is_empty());
    }

    #[test]
    fn test_hashtag_and_url() {
        let out = spans("#Sale https://example.com");
        assert_eq!(
            out,
            vec![
                Span::Hashtag("#Sale".into()),
                Span::Text(" ".into()),
                Span::Url("https://example.com".into()),
            ]
        );
    }

    #[test]
    fn test_url_stops_at_parenthesis() {
        let out = spans("(see http://a.io/x) now");
        assert_eq!(out[1], Span::Url("http://a.io/x".into()));
        assert_eq!(joined(&out), "(see http://a.io/x) now");
    }

    #[test]
    fn test_fragment_stays_in_url() {
        let out = spans("https://shop.example.com/#deals");
        assert_eq!(out, vec![Span::Url("https://shop.example.com/#deals".into())]);
    }

    #[test]
    fn test_adjacent_hashtags_and_hyphens() {
        let out = spans("#eco-friendly#Home");
        assert_eq!(
            out,
            vec![Span::Hashtag("#eco-friendly".into()), Span::Hashtag("#Home".into())]
        );
    }

    #[test]
    fn test_concatenation_reproduces_input() {
        for input in [
            "Shop now 👉 https://x.co/a?b=c #Deal #Deal2!",
            "no tokens at all",
            "# lonely hash",
            "ends with #tag",
            "http:// incomplete",
        ] {
            assert_eq!(joined(&spans(input)), input);
        }
    }
}
