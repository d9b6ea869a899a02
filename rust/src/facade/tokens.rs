//! Flat token view over `proc_macro2` token trees.
//!
//! Groups are unfolded into open/close tokens and every token remembers
//! whether the source had a gap (whitespace or a comment) before it, so
//! parameter lists and return types can be re-rendered with canonical
//! spacing.

use proc_macro2::{Delimiter, LexError, LineColumn, Spacing, Span, TokenStream, TokenTree};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    Literal,
    Punct,
    Open(Delimiter),
    Close(Delimiter),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub start: LineColumn,
    pub end: LineColumn,
    /// Whitespace or a comment separated this token from the previous one.
    pub spaced: bool,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            start: span.start(),
            end: span.end(),
            spaced: false,
        }
    }

    pub fn is_ident(&self, word: &str) -> bool {
        self.kind == TokenKind::Ident && self.text == word
    }

    pub fn is_punct(&self, punct: &str) -> bool {
        self.kind == TokenKind::Punct && self.text == punct
    }
}

/// Joint punctuation pairs kept as a single token.
const JOINED: [&str; 3] = ["::", "->", "=>"];

pub fn parse_trees(text: &str) -> Result<Vec<TokenTree>, LexError> {
    Ok(TokenStream::from_str(text)?.into_iter().collect())
}

pub fn tokenize(text: &str) -> Result<Vec<Token>, LexError> {
    Ok(flatten(&parse_trees(text)?))
}

pub fn flatten(trees: &[TokenTree]) -> Vec<Token> {
    let mut out = Vec::new();
    push_trees(trees, &mut out);
    let mut prev_end: Option<LineColumn> = None;
    for tok in &mut out {
        tok.spaced = prev_end.is_some_and(|end| end != tok.start);
        prev_end = Some(tok.end);
    }
    out
}

/// Joins tokens back into text, with one space wherever the source had a gap.
pub fn render(tokens: &[Token]) -> String {
    let mut out = String::new();
    for (i, tok) in tokens.iter().enumerate() {
        if i > 0 && tok.spaced {
            out.push(' ');
        }
        out.push_str(&tok.text);
    }
    out
}

fn push_trees(trees: &[TokenTree], out: &mut Vec<Token>) {
    let mut i = 0;
    while i < trees.len() {
        match &trees[i] {
            TokenTree::Group(group) => {
                let delimiter = group.delimiter();
                if let Some((open, _)) = delimiter_text(delimiter) {
                    out.push(Token::new(TokenKind::Open(delimiter), open, group.span_open()));
                }
                let inner: Vec<TokenTree> = group.stream().into_iter().collect();
                push_trees(&inner, out);
                if let Some((_, close)) = delimiter_text(delimiter) {
                    out.push(Token::new(TokenKind::Close(delimiter), close, group.span_close()));
                }
            }
            TokenTree::Ident(ident) => {
                out.push(Token::new(TokenKind::Ident, ident.to_string(), ident.span()))
            }
            TokenTree::Literal(lit) => {
                out.push(Token::new(TokenKind::Literal, lit.to_string(), lit.span()))
            }
            TokenTree::Punct(punct) => {
                // `///` comments arrive as `#[doc = "..."]`
                if punct.as_char() == '#' && is_doc_attribute(trees.get(i + 1)) {
                    i += 2;
                    continue;
                }
                if let (Spacing::Joint, Some(TokenTree::Punct(next))) =
                    (punct.spacing(), trees.get(i + 1))
                {
                    let pair: String = [punct.as_char(), next.as_char()].iter().collect();
                    if JOINED.contains(&pair.as_str()) {
                        out.push(Token {
                            kind: TokenKind::Punct,
                            text: pair,
                            start: punct.span().start(),
                            end: next.span().end(),
                            spaced: false,
                        });
                        i += 2;
                        continue;
                    }
                }
                out.push(Token::new(
                    TokenKind::Punct,
                    punct.as_char().to_string(),
                    punct.span(),
                ));
            }
        }
        i += 1;
    }
}

fn is_doc_attribute(tree: Option<&TokenTree>) -> bool {
    let Some(TokenTree::Group(group)) = tree else {
        return false;
    };
    group.delimiter() == Delimiter::Bracket
        && matches!(group.stream().into_iter().next(), Some(TokenTree::Ident(id)) if id == "doc")
}

fn delimiter_text(delimiter: Delimiter) -> Option<(&'static str, &'static str)> {
    match delimiter {
        Delimiter::Parenthesis => Some(("(", ")")),
        Delimiter::Bracket => Some(("[", "]")),
        Delimiter::Brace => Some(("{", "}")),
        Delimiter::None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(src: &str) -> Vec<String> {
        tokenize(src).unwrap().into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn comments_and_doc_comments_leave_no_tokens() {
        assert_eq!(
            texts("/// docs\npub /* a /* nested */ b */ fn // trailing\nrun"),
            vec!["pub", "fn", "run"]
        );
    }

    #[test]
    fn groups_unfold_into_open_and_close_tokens() {
        let toks = tokenize("f(x, [y])").unwrap();
        let kinds: Vec<_> = toks.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Ident,
                TokenKind::Open(Delimiter::Parenthesis),
                TokenKind::Ident,
                TokenKind::Punct,
                TokenKind::Open(Delimiter::Bracket),
                TokenKind::Ident,
                TokenKind::Close(Delimiter::Bracket),
                TokenKind::Close(Delimiter::Parenthesis),
            ]
        );
    }

    #[test]
    fn path_separators_and_arrows_stay_whole() {
        assert_eq!(
            texts("a::b -> c => d: e"),
            vec!["a", "::", "b", "->", "c", "=>", "d", ":", "e"]
        );
        assert_eq!(texts("Vec<Vec<u8>>").last().map(String::as_str), Some(">"));
    }

    #[test]
    fn gaps_are_recorded_across_lines_and_comments() {
        let toks = tokenize("f( x ,\n y /* c */)").unwrap();
        assert!(!toks[1].spaced);
        assert!(toks[2].spaced);
        assert!(toks[3].spaced);
        assert!(toks[4].spaced);
        assert!(toks[5].spaced);
        assert_eq!(toks[4].start.line, 2);
    }

    #[test]
    fn render_collapses_gaps_and_drops_comments() {
        let toks = tokenize("Result <\n   Vec<u8>,   // why\n Error>").unwrap();
        assert_eq!(render(&toks), "Result < Vec<u8>, Error>");
        assert_eq!(render(&tokenize("&'a str").unwrap()), "&'a str");
    }

    #[test]
    fn literals_keep_their_source_form() {
        assert_eq!(
            texts(r###"r#"pub fn x() {"# b'x' 'c' 1.5"###),
            vec![r##"r#"pub fn x() {"#"##, "b'x'", "'c'", "1.5"]
        );
    }

    #[test]
    fn unbalanced_text_is_a_lex_error() {
        assert!(tokenize("pub fn broken(a: u8").is_err());
        assert!(tokenize("fn f() }").is_err());
    }
}
