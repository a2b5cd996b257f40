//! Runtime message templates
//!
//! Formatted log calls carry their template and arguments separately so that
//! writers can keep them apart (the recorder does) or render them late. The
//! syntax is a small subset of `format!`:
//!
//! - `{}` takes the next positional argument
//! - `{N}` takes argument `N`
//! - `{{` and `}}` are literal braces
//!
//! A placeholder with no matching argument renders as `{!missing}`. Arguments
//! past the highest index any placeholder referenced are appended as
//! ` {!extra: a, b}`.

use super::field_value::FieldValue;
use std::fmt::Write;

const MISSING: &str = "{!missing}";

/// Interpolate `args` into `template`.
pub fn render(template: &str, args: &[FieldValue]) -> String {
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut next = 0usize;
    // one past the highest argument index any placeholder referenced
    let mut consumed = 0usize;
    let mut chars = template.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        match c {
            '{' => {
                if let Some(&(_, '{')) = chars.peek() {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let rest = &template[idx + 1..];
                match rest.find('}') {
                    Some(end) => {
                        let body = &rest[..end];
                        let pos = if body.is_empty() {
                            next += 1;
                            next - 1
                        } else if let Ok(pos) = body.trim().parse::<usize>() {
                            pos
                        } else {
                            out.push('{');
                            continue;
                        };
                        consumed = consumed.max(pos.saturating_add(1));
                        match args.get(pos) {
                            Some(value) => {
                                let _ = write!(out, "{}", value);
                            }
                            None => out.push_str(MISSING),
                        }
                        // skip the placeholder body and closing brace
                        for _ in 0..=body.chars().count() {
                            chars.next();
                        }
                    }
                    None => out.push('{'),
                }
            }
            '}' => {
                if let Some(&(_, '}')) = chars.peek() {
                    chars.next();
                }
                out.push('}');
            }
            _ => out.push(c),
        }
    }

    if consumed < args.len() {
        out.push_str(" {!extra: ");
        out.push_str(&join(&args[consumed..], ", "));
        out.push('}');
    }

    out
}

/// Render each argument with its display form, separated by `sep`.
pub fn join(args: &[FieldValue], sep: &str) -> String {
    let mut out = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        let _ = write!(out, "{}", arg);
    }
    out
}
