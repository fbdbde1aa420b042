//! Minimal tag scanning for the RFC index page.
//!
//! The index is machine-generated and regular enough that a depth-aware
//! substring scan recovers tables, rows, and cells. Tag names are matched
//! ASCII case-insensitively; byte offsets into the lower-cased copy are valid
//! in the original because only ASCII is folded.

use std::ops::Range;

/// Byte ranges of `<tag ...>...</tag>` elements that are not nested inside
/// another element with the same tag. An element left open at the end of
/// input is dropped.
pub fn outer_blocks(s: &str, tag: &str) -> Vec<Range<usize>> {
    let lc = s.to_ascii_lowercase();
    let open = format!("<{}", tag.to_ascii_lowercase());
    let close = format!("</{}>", tag.to_ascii_lowercase());

    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut pos = 0usize;

    loop {
        let next_open = find_open_tag(&lc, &open, pos);
        let next_close = lc[pos..].find(&close).map(|i| i + pos);
        match (next_open, next_close) {
            (Some(o), c) if c.is_none_or(|c| o < c) => {
                if depth == 0 {
                    start = o;
                }
                depth += 1;
                pos = o + open.len();
            }
            (_, Some(c)) => {
                if depth > 0 {
                    depth -= 1;
                    if depth == 0 {
                        out.push(start..c + close.len());
                    }
                }
                pos = c + close.len();
            }
            _ => break,
        }
    }
    out
}

/// Inner markup of the first `<tag>` element in `s`, if any.
pub fn first_element<'a>(s: &'a str, tag: &str) -> Option<&'a str> {
    let range = outer_blocks(s, tag).into_iter().next()?;
    Some(inner_html(&s[range]))
}

/// Markup between the end of the opening tag and the start of the closing tag.
pub fn inner_html(block: &str) -> &str {
    match (block.find('>'), block.rfind('<')) {
        (Some(oe), Some(cs)) if cs > oe => &block[oe + 1..cs],
        _ => "",
    }
}

/// Text with tags removed and common entities decoded. Line breaks in the
/// source are kept.
pub fn text_content(s: &str) -> String {
    decode_entities(&strip_tags(s))
}

pub fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

const NAMED_ENTITIES: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", ' '),
    ("ndash", '\u{2013}'),
    ("mdash", '\u{2014}'),
    ("lsquo", '\u{2018}'),
    ("rsquo", '\u{2019}'),
    ("ldquo", '\u{201C}'),
    ("rdquo", '\u{201D}'),
    ("hellip", '\u{2026}'),
];

// Longest reference body looked at, e.g. `#x10FFFF`.
const MAX_REFERENCE: usize = 10;

/// Decode character references in one pass, so `&amp;lt;` yields `&lt;`.
/// Numeric references (`&#233;`, `&#x2013;`) and the common named ones are
/// decoded; anything else is left as written.
pub fn decode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(at) = rest.find('&') {
        out.push_str(&rest[..at]);
        let tail = &rest[at + 1..];
        let decoded = tail
            .find(';')
            .filter(|&end| end <= MAX_REFERENCE)
            .and_then(|end| Some((reference(&tail[..end])?, end)));
        match decoded {
            Some((ch, end)) => {
                out.push(ch);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

fn reference(body: &str) -> Option<char> {
    let Some(number) = body.strip_prefix('#') else {
        return NAMED_ENTITIES
            .iter()
            .find(|(name, _)| *name == body)
            .map(|&(_, ch)| ch);
    };
    let (digits, radix) = match number.strip_prefix(['x', 'X']) {
        Some(hex) => (hex, 16),
        None => (number, 10),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    char::from_u32(u32::from_str_radix(digits, radix).ok()?)
}

// `<tr` must not match `<track`.
fn find_open_tag(lc: &str, open: &str, from: usize) -> Option<usize> {
    let mut pos = from;
    while let Some(rel) = lc.get(pos..)?.find(open) {
        let at = pos + rel;
        match lc.as_bytes().get(at + open.len()) {
            Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => return Some(at),
            None => return None,
            _ => pos = at + open.len(),
        }
    }
    None
}
