use crate::facade::loader::ModuleSource;
use crate::facade::model::{FunctionSignature, ModuleSignatureSet, Qualifier};
use crate::facade::tokens::{flatten, parse_trees, render};
use proc_macro2::{Delimiter, Spacing, TokenTree};
use tracing::debug;

/// Every `pub [async] fn` in `text`, in order of appearance.
///
/// Candidates that do not fit the expected shape (restricted visibility,
/// `const`/`unsafe` qualifiers, bounded or multiple generics, body-less
/// declarations) are skipped without error. Text that does not tokenize,
/// such as unbalanced delimiters, yields no signatures.
pub fn extract_signatures(text: &str) -> Vec<FunctionSignature> {
    let trees = match parse_trees(text) {
        Ok(trees) => trees,
        Err(e) => {
            debug!(error = %e, "source does not tokenize, no signatures extracted");
            return Vec::new();
        }
    };
    let mut signatures = Vec::new();
    scan_trees(&trees, &mut signatures);
    signatures
}

pub fn extract_module(source: &ModuleSource) -> ModuleSignatureSet {
    let signatures = extract_signatures(&source.text);
    debug!(
        path = %source.path.display(),
        count = signatures.len(),
        "extracted signatures"
    );
    ModuleSignatureSet {
        module_id: source.module_id.clone(),
        signatures,
    }
}

/// Walks one nesting level, descending into groups where they appear so
/// signatures come out in source order.
fn scan_trees(trees: &[TokenTree], out: &mut Vec<FunctionSignature>) {
    let mut i = 0;
    while i < trees.len() {
        match &trees[i] {
            TokenTree::Group(group) => {
                let inner: Vec<TokenTree> = group.stream().into_iter().collect();
                scan_trees(&inner, out);
                i += 1;
            }
            TokenTree::Ident(ident) if *ident == "pub" => match match_signature(trees, i) {
                Some((signature, terminator)) => {
                    out.push(signature);
                    i = terminator;
                }
                None => {
                    if is_fn_candidate(trees, i) {
                        let line = ident.span().start().line;
                        debug!(line, "skipping unrecognized public function signature");
                    }
                    i += 1;
                }
            },
            _ => i += 1,
        }
    }
}

/// Tries `pub async? fn NAME (<T>)? (PARAMS) (-> RET)? {|where` at `start`,
/// returning the signature and the index of the terminator.
fn match_signature(trees: &[TokenTree], start: usize) -> Option<(FunctionSignature, usize)> {
    let mut i = start + 1;
    let qualifier = if is_ident(trees.get(i)?, "async") {
        i += 1;
        Some(Qualifier::Async)
    } else {
        None
    };
    if !is_ident(trees.get(i)?, "fn") {
        return None;
    }
    i += 1;

    let TokenTree::Ident(ident) = trees.get(i)? else {
        return None;
    };
    let mut name = ident.to_string();
    i += 1;
    if is_punct(trees.get(i)?, '<') {
        let TokenTree::Ident(generic) = trees.get(i + 1)? else {
            return None;
        };
        if !is_punct(trees.get(i + 2)?, '>') {
            return None;
        }
        name = format!("{}<{}>", name, generic);
        i += 3;
    }

    match trees.get(i)? {
        TokenTree::Group(group) if group.delimiter() == Delimiter::Parenthesis => {}
        _ => return None,
    }
    let parameters = render(&flatten(&trees[i..=i]));
    i += 1;

    let mut return_type = None;
    if is_arrow(trees, i) {
        let first = i + 2;
        let mut end = first;
        loop {
            let tree = trees.get(end)?;
            if is_body(tree) || is_ident(tree, "where") {
                break;
            }
            if is_punct(tree, ';') {
                return None;
            }
            end += 1;
        }
        if end == first {
            return None;
        }
        return_type = Some(render(&flatten(&trees[first..end])));
        i = end;
    }

    let terminator = trees.get(i)?;
    if !is_body(terminator) && !is_ident(terminator, "where") {
        return None;
    }

    let signature = FunctionSignature::new(qualifier, &name, &parameters, return_type.as_deref());
    Some((signature, i))
}

fn is_ident(tree: &TokenTree, word: &str) -> bool {
    matches!(tree, TokenTree::Ident(ident) if *ident == word)
}

fn is_punct(tree: &TokenTree, ch: char) -> bool {
    matches!(tree, TokenTree::Punct(punct) if punct.as_char() == ch)
}

fn is_body(tree: &TokenTree) -> bool {
    matches!(tree, TokenTree::Group(group) if group.delimiter() == Delimiter::Brace)
}

fn is_arrow(trees: &[TokenTree], i: usize) -> bool {
    matches!(
        (trees.get(i), trees.get(i + 1)),
        (Some(TokenTree::Punct(dash)), Some(TokenTree::Punct(gt)))
            if dash.as_char() == '-' && dash.spacing() == Spacing::Joint && gt.as_char() == '>'
    )
}

fn is_fn_candidate(trees: &[TokenTree], start: usize) -> bool {
    trees[start + 1..]
        .iter()
        .take(3)
        .any(|t| is_ident(t, "fn"))
}
