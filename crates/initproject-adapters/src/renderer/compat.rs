//! Jinja-style conveniences layered over Tera.
//!
//! Tera is strict where generator templates expect leniency. Before a
//! template reaches Tera it is rewritten so that:
//!
//! - the first newline after a `{% ... %}` or `{# ... #}` tag is dropped
//!   (Jinja's `trim_blocks`), so control lines leave no blank line behind;
//! - `{{ path }}` interpolations get a leading `default(value="")` filter,
//!   so a missing nested key renders as nothing;
//! - dotted paths in `if`, `elif`, `for` and `set` tags get the same filter,
//!   or `default(value=[])` for the container of a `for` loop, so a missing
//!   nested key is falsy, compares unequal and iterates nothing;
//! - every root name the template reads is reported, so the renderer can
//!   bind the ones absent from the context to an empty value.
//!
//! `{% raw %}` sections pass through untouched, apart from the trimmed
//! newline after the opening tag.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// How a missing root name is used, and so what it should default to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RootUse {
    /// Interpolated, tested or compared: bound to `""`.
    Scalar,
    /// The container of a `for` loop: bound to `[]`.
    Iterable,
}

/// A template rewritten for Tera plus the root names it reads.
#[derive(Debug)]
pub(crate) struct Prepared {
    pub source: String,
    pub roots: BTreeMap<String, RootUse>,
}

const KEYWORDS: &[&str] = &[
    "if", "elif", "else", "endif", "for", "in", "endfor", "and", "or", "not", "is", "set",
    "set_global", "endset", "macro", "endmacro", "import", "as", "include", "ignore", "missing",
    "block", "endblock", "extends", "filter", "endfilter", "raw", "endraw", "break", "continue",
    "loop", "true", "false", "True", "False", "none", "None", "self", "super",
];

/// Keywords whose following identifier is a name, not a variable read.
const NAMING_KEYWORDS: &[&str] = &["is", "filter", "block", "as", "macro"];

/// Block tags whose body is an expression.
const EXPRESSION_TAGS: &[&str] = &["if", "elif", "for", "set", "set_global"];

const SCALAR_DEFAULT: &str = " | default(value=\"\")";
const ITERABLE_DEFAULT: &str = " | default(value=[])";

static OPEN_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{[{%#]").expect("valid regex"));

static END_RAW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{%-?\s*endraw\s*-?%\}").expect("valid regex"));

static PLAIN_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(?:\s*\.\s*[A-Za-z_][A-Za-z0-9_]*|\[\s*\d+\s*\])*")
        .expect("valid regex")
});

/// Rewrite `source` for Tera and collect the root names it reads.
pub(crate) fn prepare(source: &str) -> Prepared {
    let mut out = String::with_capacity(source.len() + 64);
    let mut roots = BTreeMap::new();
    let mut pos = 0;

    while let Some(open) = OPEN_TAG.find_at(source, pos) {
        let start = open.start();
        out.push_str(&source[pos..start]);

        let kind = source.as_bytes()[start + 1];
        let close = match kind {
            b'{' => "}}",
            b'%' => "%}",
            _ => "#}",
        };

        let Some(end) = find_close(source, start + 2, close, kind != b'#') else {
            // Unterminated tag: leave it for Tera to report.
            out.push_str(&source[start..]);
            return Prepared { source: out, roots };
        };
        let inner = &source[start + 2..end];
        let mut tag_end = end + 2;

        match kind {
            b'{' => {
                collect_roots(inner, &mut roots);
                out.push_str(&rewrite_expression(inner));
            }
            b'%' if strip_dashes(inner).trim() == "raw" => {
                out.push_str(&source[start..tag_end]);
                let body = skip_newline(source, tag_end);
                tag_end = END_RAW
                    .find_at(source, body)
                    .map_or(source.len(), |end_raw| end_raw.end());
                out.push_str(&source[body..tag_end]);
            }
            b'%' => {
                collect_roots(inner, &mut roots);
                out.push_str("{%");
                out.push_str(&rewrite_block(inner));
                out.push_str("%}");
            }
            _ => out.push_str(&source[start..tag_end]),
        }

        pos = tag_end;
        if kind != b'{' {
            pos = skip_newline(source, pos);
        }
    }

    out.push_str(&source[pos..]);
    Prepared { source: out, roots }
}

/// Index of `close` at or after `from`, skipping string literals when
/// `respect_strings` is set.
fn find_close(source: &str, from: usize, close: &str, respect_strings: bool) -> Option<usize> {
    let bytes = source.as_bytes();
    let close = close.as_bytes();
    let mut quote: Option<u8> = None;
    let mut i = from;

    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if respect_strings && matches!(b, b'"' | b'\'' | b'`') => quote = Some(b),
            None if bytes[i..].starts_with(close) => return Some(i),
            None => {}
        }
        i += 1;
    }
    None
}

fn skip_newline(source: &str, pos: usize) -> usize {
    let rest = &source[pos..];
    if rest.starts_with("\r\n") {
        pos + 2
    } else if rest.starts_with('\n') {
        pos + 1
    } else {
        pos
    }
}

fn strip_dashes(inner: &str) -> &str {
    let inner = inner.strip_prefix('-').unwrap_or(inner);
    inner.strip_suffix('-').unwrap_or(inner)
}

/// `{{ a.b | upper }}` becomes `{{ a.b | default(value="") | upper }}`.
fn rewrite_expression(inner: &str) -> String {
    let lead = if inner.starts_with('-') { "-" } else { "" };
    let trail = if inner.len() > lead.len() && inner.ends_with('-') {
        "-"
    } else {
        ""
    };
    let body = inner[lead.len()..inner.len() - trail.len()].trim();

    let rewritten = PLAIN_PATH.find(body).and_then(|path| {
        let root = path
            .as_str()
            .split(['.', '['])
            .next()
            .unwrap_or_default()
            .trim();
        let rest = body[path.end()..].trim_start();
        let plain = rest.is_empty() || (rest.starts_with('|') && !rest.starts_with("||"));
        let already_defaulted = rest
            .strip_prefix('|')
            .is_some_and(|filters| filters.trim_start().starts_with("default"));

        (plain && !already_defaulted && !KEYWORDS.contains(&root)).then(|| {
            if rest.is_empty() {
                format!("{} | default(value=\"\")", path.as_str())
            } else {
                format!("{} | default(value=\"\") {rest}", path.as_str())
            }
        })
    });

    match rewritten {
        Some(body) => format!("{{{{{lead} {body} {trail}}}}}"),
        None => format!("{{{{{inner}}}}}"),
    }
}

/// `{% if a.b == "x" %}` becomes `{% if a.b | default(value="") == "x" %}`
/// and `{% for x in a.b %}` becomes `{% for x in a.b | default(value=[]) %}`.
///
/// Only dotted or indexed paths outside parentheses are touched; bare roots
/// are bound by the renderer instead.
fn rewrite_block(inner: &str) -> String {
    let keyword = strip_dashes(inner)
        .trim_start()
        .split(|c: char| !is_ident_char(c))
        .next()
        .unwrap_or_default();
    if !EXPRESSION_TAGS.contains(&keyword) {
        return inner.to_string();
    }
    let is_for = keyword == "for";

    let bytes = inner.as_bytes();
    let mut out = String::with_capacity(inner.len() + 32);
    let mut copied = 0;
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut container_next = false;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            if b == q {
                quote = None;
            }
            i += 1;
            continue;
        }
        match b {
            b'"' | b'\'' | b'`' => quote = Some(b),
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }

        let starts_ident = (b.is_ascii_alphabetic() || b == b'_')
            && (i == 0 || !is_ident_char(char::from(bytes[i - 1])));
        let path = if starts_ident && depth == 0 {
            PLAIN_PATH.find(&inner[i..])
        } else {
            None
        };
        let Some(path) = path else {
            i += 1;
            continue;
        };

        let end = i + path.end();
        let word = path.as_str();
        if word == "in" {
            container_next = is_for;
            i = end;
            continue;
        }
        let container = std::mem::take(&mut container_next);

        let root = word.split(['.', '[']).next().unwrap_or_default().trim();
        let prev = inner[..i].trim_end().chars().last();
        let rest = inner[end..].trim_start();
        let already_defaulted = rest
            .strip_prefix('|')
            .is_some_and(|filters| filters.trim_start().starts_with("default"));
        let skip = !word.contains(['.', '['])
            || KEYWORDS.contains(&root)
            || matches!(prev, Some('.' | '|'))
            || rest.starts_with(['(', ':'])
            || starts_with_word(rest, "is")
            || already_defaulted;

        if !skip {
            out.push_str(&inner[copied..end]);
            out.push_str(if container {
                ITERABLE_DEFAULT
            } else {
                SCALAR_DEFAULT
            });
            copied = end;
        }
        i = end;
    }

    out.push_str(&inner[copied..]);
    out
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn starts_with_word(text: &str, word: &str) -> bool {
    text.strip_prefix(word)
        .is_some_and(|rest| !rest.starts_with(is_ident_char))
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token<'a> {
    Ident(&'a str),
    Punct(char),
    Literal,
}

fn tokenize(body: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut chars = body.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c.is_whitespace() {
            continue;
        }
        if matches!(c, '"' | '\'' | '`') {
            for (_, next) in chars.by_ref() {
                if next == c {
                    break;
                }
            }
            tokens.push(Token::Literal);
        } else if c.is_ascii_digit() {
            while chars
                .peek()
                .is_some_and(|&(_, next)| next.is_ascii_alphanumeric() || next == '_')
            {
                chars.next();
            }
            tokens.push(Token::Literal);
        } else if c.is_ascii_alphabetic() || c == '_' {
            let mut end = start + c.len_utf8();
            while let Some(&(i, next)) = chars.peek() {
                if next.is_ascii_alphanumeric() || next == '_' {
                    end = i + next.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token::Ident(&body[start..end]));
        } else {
            tokens.push(Token::Punct(c));
        }
    }
    tokens
}

/// Record every root variable `inner` reads.
fn collect_roots(inner: &str, roots: &mut BTreeMap<String, RootUse>) {
    let tokens = tokenize(strip_dashes(inner));
    let is_for = tokens.first() == Some(&Token::Ident("for"));

    for (i, token) in tokens.iter().enumerate() {
        let Token::Ident(name) = *token else {
            continue;
        };
        let prev = i.checked_sub(1).and_then(|j| tokens.get(j));
        let prev2 = i.checked_sub(2).and_then(|j| tokens.get(j));
        let next = tokens.get(i + 1);
        let next2 = tokens.get(i + 2);

        let attribute_or_filter = matches!(prev, Some(Token::Punct('.' | '|')));
        let call_or_namespace = matches!(next, Some(Token::Punct('(' | ':')));
        let assignment = next == Some(&Token::Punct('='))
            && next2 != Some(&Token::Punct('='));
        let named = matches!(prev, Some(Token::Ident(kw)) if NAMING_KEYWORDS.contains(kw))
            || (prev == Some(&Token::Ident("not")) && prev2 == Some(&Token::Ident("is")));

        if attribute_or_filter
            || call_or_namespace
            || assignment
            || named
            || KEYWORDS.contains(&name)
        {
            continue;
        }

        let iterable = is_for
            && prev == Some(&Token::Ident("in"))
            && !matches!(next, Some(Token::Punct('.' | '[')));
        let usage = if iterable {
            RootUse::Iterable
        } else {
            RootUse::Scalar
        };

        roots
            .entry(name.to_string())
            .and_modify(|existing| {
                if usage == RootUse::Iterable {
                    *existing = RootUse::Iterable;
                }
            })
            .or_insert(usage);
    }
}
