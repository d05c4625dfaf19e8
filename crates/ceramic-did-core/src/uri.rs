#[derive(Copy, Clone, PartialEq, Eq)]
pub enum Segment {
    /// segment
    Base,
    /// segment-nz
    Nz,
    /// segment-nz-nc
    NzNc,
}

/// Whether the string conforms to a given [Segment], following [RFC 3986](https://www.rfc-editor.org/rfc/rfc3986#section-3.3).
///
/// ```text
/// pchar         = unreserved / pct-encoded / sub-delims / ":" / "@"
/// segment       = *pchar
/// segment-nz    = 1*pchar
/// segment-nz-nc = 1*( unreserved / pct-encoded / sub-delims / "@" )
/// ```
pub fn is_segment(value: &str, segment: Segment) -> bool {
    if segment != Segment::Base && value.is_empty() {
        return false;
    }

    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        let valid = match c {
            // pct-encoded = "%" HEXDIG HEXDIG
            '%' => {
                let hi = chars.next();
                let lo = chars.next();
                matches!((hi, lo), (Some(a), Some(b)) if a.is_ascii_hexdigit() && b.is_ascii_hexdigit())
            }
            '@' => true,
            ':' => segment != Segment::NzNc,
            c => is_unreserved(c) || is_sub_delim(c),
        };

        if !valid {
            return false;
        }
    }

    true
}

/// unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"
fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}

/// sub-delims = "!" / "$" / "&" / "'" / "(" / ")" / "*" / "+" / "," / ";" / "="
fn is_sub_delim(c: char) -> bool {
    matches!(
        c,
        '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '='
    )
}
