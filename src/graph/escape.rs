//! Escaping for text that ends up inside a filter graph or on a command line.
//!
//! A filter graph is tokenized twice (graph level, then option level) before a filter such as
//! `drawtext` sees its arguments, and the whole graph is then wrapped in double quotes for the
//! shell. Every text-bearing value goes through [`quote_text`] or [`quote_value`]; the assembled
//! graph and every path go through [`shell_quote`].

/// Quote free text for `drawtext`'s `text=` option.
///
/// The result is single-quoted at graph level, with option-level and `drawtext` expansion
/// escapes applied inside.
pub(crate) fn quote_text(s: &str) -> String {
    quote_with(s, true)
}

/// Quote a plain option value (font paths, family names).
pub(crate) fn quote_value(s: &str) -> String {
    quote_with(s, false)
}

fn quote_with(s: &str, expand: bool) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' if expand => out.push_str("\\\\\\\\"),
            '\\' => out.push_str("\\\\"),
            '%' if expand => out.push_str("\\\\%"),
            ':' => out.push_str("\\:"),
            '\'' => out.push_str("'\\\\\\''"),
            '\n' | '\r' => out.push(' '),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Single-quote an expression at graph level when it contains separators.
pub(crate) fn quote_expr(expr: &str) -> String {
    if expr.contains([',', ';', '[', ']', ':', ' ']) {
        format!("'{expr}'")
    } else {
        expr.to_owned()
    }
}

/// Double-quote a command-line argument for a POSIX shell.
pub(crate) fn shell_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Quote `s` only when a shell would otherwise split or expand it.
pub(crate) fn shell_arg(s: &str) -> String {
    let plain = !s.is_empty()
        && s.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ':' | '+' | '=' | ',')
        });
    if plain { s.to_owned() } else { shell_quote(s) }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/escape.rs"]
mod tests;
