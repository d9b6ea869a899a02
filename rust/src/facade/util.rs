use crate::facade::tokens::{render, tokenize, Token, TokenKind};
use once_cell::sync::Lazy;
use proc_macro2::Delimiter;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

pub fn compact_whitespace(s: &str) -> String {
    WHITESPACE.replace_all(s.trim(), " ").to_string()
}

/// Canonical form of a parenthesized parameter list.
///
/// Line breaks and comments disappear, `,` and type-ascription `:` get
/// exactly one trailing space, and a trailing comma before the list's own
/// closing parenthesis is dropped. Running it on its own output is a no-op.
pub fn normalize_parameters(text: &str) -> String {
    match tokenize(text) {
        Ok(tokens) => normalize_tokens(&tokens),
        Err(_) => compact_whitespace(text),
    }
}

pub fn normalize_tokens(tokens: &[Token]) -> String {
    let mut kept: Vec<&Token> = tokens.iter().collect();
    let n = kept.len();
    if n >= 3
        && kept[0].kind == TokenKind::Open(Delimiter::Parenthesis)
        && kept[n - 1].kind == TokenKind::Close(Delimiter::Parenthesis)
        && kept[n - 2].is_punct(",")
    {
        kept.remove(n - 2);
    }

    let mut out = String::new();
    let mut prev: Option<&Token> = None;
    for tok in kept {
        if prev.is_some_and(|p| wants_space(p, tok)) {
            out.push(' ');
        }
        out.push_str(&tok.text);
        prev = Some(tok);
    }
    out
}

fn wants_space(prev: &Token, next: &Token) -> bool {
    if matches!(next.kind, TokenKind::Close(_)) || next.is_punct(",") || next.is_punct(":") {
        return false;
    }
    if prev.is_punct(",") || prev.is_punct(":") {
        return true;
    }
    if next.is_punct("::")
        || prev.is_punct("::")
        || matches!(
            prev.kind,
            TokenKind::Open(Delimiter::Parenthesis) | TokenKind::Open(Delimiter::Bracket)
        )
    {
        return false;
    }
    next.spaced
}

/// Names to pass when forwarding a call with the given parameter list.
///
/// Receivers (`self`, `&self`, `mut self`, `self: Box<Self>`) are skipped,
/// as is the `mut` binding modifier.
pub fn argument_names(parameters: &str) -> Vec<String> {
    let tokens = tokenize(parameters).unwrap_or_default();
    let inner = match tokens.as_slice() {
        [first, inner @ .., last]
            if first.kind == TokenKind::Open(Delimiter::Parenthesis)
                && last.kind == TokenKind::Close(Delimiter::Parenthesis) =>
        {
            inner
        }
        all => all,
    };

    split_top_level(inner, ",")
        .into_iter()
        .filter_map(|entry| {
            let colon = find_top_level(entry, ":")?;
            let mut pattern = &entry[..colon];
            if pattern.len() > 1 && pattern[0].is_ident("mut") {
                pattern = &pattern[1..];
            }
            let name = render(pattern);
            (!name.is_empty() && name != "self").then_some(name)
        })
        .collect()
}

/// Splits on `punct` occurring outside any bracket or angle-bracket nesting.
fn split_top_level<'t>(tokens: &'t [Token], punct: &str) -> Vec<&'t [Token]> {
    let mut parts = Vec::new();
    let mut rest = tokens;
    while let Some(at) = find_top_level(rest, punct) {
        parts.push(&rest[..at]);
        rest = &rest[at + 1..];
    }
    if !rest.is_empty() {
        parts.push(rest);
    }
    parts
}

fn find_top_level(tokens: &[Token], punct: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, tok) in tokens.iter().enumerate() {
        match tok.kind {
            TokenKind::Open(_) => depth += 1,
            TokenKind::Close(_) => depth = depth.saturating_sub(1),
            TokenKind::Punct if tok.text == "<" => depth += 1,
            TokenKind::Punct if tok.text == ">" => depth = depth.saturating_sub(1),
            TokenKind::Punct if depth == 0 && tok.text == punct => return Some(i),
            _ => {}
        }
    }
    None
}
