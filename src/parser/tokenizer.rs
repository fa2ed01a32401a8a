// file: src/parser/tokenizer.rs
// description: lenient html tokenizer producing tags and decoded text with source spans
// reference: https://html.spec.whatwg.org/multipage/parsing.html#tokenization

use crate::parser::patterns::{ATTRIBUTE, ENTITY, HTML_TOKEN};
use std::borrow::Cow;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    StartTag {
        name: String,
        attrs: Vec<(String, String)>,
        self_closing: bool,
        span: Range<usize>,
    },
    EndTag {
        name: String,
        span: Range<usize>,
    },
    Text {
        text: String,
        span: Range<usize>,
    },
}

pub struct HtmlTokenizer;

impl HtmlTokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Comments and directives are dropped; everything else becomes a token.
    pub fn tokenize(&self, input: &str) -> Vec<Token> {
        let mut tokens = Vec::new();

        for caps in HTML_TOKEN.captures_iter(input) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let span = whole.start()..whole.end();

            if caps.name("comment").is_some() || caps.name("directive").is_some() {
                continue;
            }

            if let Some(text) = caps.name("text") {
                let decoded = decode_entities(text.as_str()).into_owned();
                match tokens.last_mut() {
                    // A stray '<' splits text; stitch it back together
                    Some(Token::Text {
                        text: previous,
                        span: previous_span,
                    }) if previous_span.end == span.start => {
                        previous.push_str(&decoded);
                        previous_span.end = span.end;
                    }
                    _ => tokens.push(Token::Text {
                        text: decoded,
                        span,
                    }),
                }
                continue;
            }

            let Some(tag) = caps.name("tag") else {
                continue;
            };
            let name = tag.as_str().to_ascii_lowercase();

            if caps.name("close").is_some() {
                tokens.push(Token::EndTag { name, span });
            } else {
                let attrs = caps
                    .name("attrs")
                    .map(|a| parse_attributes(a.as_str()))
                    .unwrap_or_default();
                tokens.push(Token::StartTag {
                    name,
                    attrs,
                    self_closing: caps.name("selfclose").is_some(),
                    span,
                });
            }
        }

        tokens
    }
}

impl Default for HtmlTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_attributes(raw: &str) -> Vec<(String, String)> {
    ATTRIBUTE
        .captures_iter(raw)
        .filter_map(|caps| {
            let name = caps.name("name")?.as_str().to_ascii_lowercase();
            let value = caps
                .name("dq")
                .or_else(|| caps.name("sq"))
                .or_else(|| caps.name("bare"))
                .map(|v| decode_entities(v.as_str()).into_owned())
                .unwrap_or_default();
            Some((name, value))
        })
        .collect()
}

/// Decodes named and numeric character references. Unknown names are left
/// untouched.
pub fn decode_entities(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }

    ENTITY.replace_all(raw, |caps: &regex::Captures| {
        let body = &caps["body"];
        let decoded = if let Some(hex) = body
            .strip_prefix("#x")
            .or_else(|| body.strip_prefix("#X"))
        {
            u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
        } else if let Some(dec) = body.strip_prefix('#') {
            dec.parse::<u32>().ok().and_then(char::from_u32)
        } else {
            named_entity(body)
        };

        match decoded {
            Some(c) => c.to_string(),
            None => caps[0].to_string(),
        }
    })
}

fn named_entity(name: &str) -> Option<char> {
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201c}',
        "rdquo" => '\u{201d}',
        "hellip" => '\u{2026}',
        "bull" => '\u{2022}',
        "copy" => '\u{a9}',
        "reg" => '\u{ae}',
        "trade" => '\u{2122}',
        "euro" => '\u{20ac}',
        _ => return None,
    };
    Some(c)
}
