// file: src/parser/patterns.rs
// description: compiled regex patterns for markup tokenization
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // One token per match: comment, directive, tag or text
    pub static ref HTML_TOKEN: Regex = Regex::new(
        r#"(?s)(?P<comment><!--.*?-->)|(?P<directive><[!?][^>]*>)|<(?P<close>/)?(?P<tag>[A-Za-z][A-Za-z0-9-]*)(?P<attrs>(?:[^>"']|"[^"]*"|'[^']*')*?)\s*(?P<selfclose>/)?>|(?P<text>[^<]+|<)"#
    ).expect("HTML_TOKEN regex is valid");

    pub static ref ATTRIBUTE: Regex = Regex::new(
        r#"(?P<name>[A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|(?P<bare>[^\s"'=<>`]+)))?"#
    ).expect("ATTRIBUTE regex is valid");

    pub static ref ENTITY: Regex = Regex::new(
        r"&(?P<body>#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[A-Za-z][A-Za-z0-9]{1,31});"
    ).expect("ENTITY regex is valid");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_token() {
        let caps = HTML_TOKEN.captures(r#"<p class="a>b">"#).unwrap();
        assert_eq!(&caps["tag"], "p");
        assert!(caps.name("close").is_none());
        assert_eq!(caps.get(0).unwrap().as_str(), r#"<p class="a>b">"#);
    }

    #[test]
    fn test_self_closing_token() {
        let caps = HTML_TOKEN.captures("<br />").unwrap();
        assert_eq!(&caps["tag"], "br");
        assert!(caps.name("selfclose").is_some());
    }

    #[test]
    fn test_lone_angle_bracket_is_text() {
        let caps = HTML_TOKEN.captures("< b").unwrap();
        assert_eq!(&caps["text"], "<");
    }

    #[test]
    fn test_entity_pattern() {
        let found: Vec<&str> = ENTITY
            .find_iter("a &amp; b &#39; &#x27; &bogus")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(found, vec!["&amp;", "&#39;", "&#x27;"]);
    }
}
