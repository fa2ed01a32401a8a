// file: src/parser/mod.rs
// description: markup parsing and serialization module exports
// reference: internal module structure

pub mod dom;
pub mod markup;
pub mod patterns;
pub mod serializer;
pub mod tokenizer;

pub use dom::{Element, Node, parse_fragment, plain_text};
pub use markup::MarkupParser;
pub use serializer::{MarkupSerializer, escape_text};
pub use tokenizer::{HtmlTokenizer, Token, decode_entities};
