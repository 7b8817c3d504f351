//! Markup filter for user-supplied free text.
//!
//! Whitelisted tags survive, rebuilt with only the attributes allowed for
//! that tag. Anything else that looks like a tag is escaped, as are stray
//! angle brackets and double quotes in text.

use once_cell::sync::Lazy;
use regex::Regex;

static ATTRIBUTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
        .expect("valid attribute regex")
});

/// Character references, with the trailing `;` optional as browsers allow
static ENTITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(?:#([0-9]+)|#[xX]([0-9a-fA-F]+)|([A-Za-z][A-Za-z0-9]*));?")
        .expect("valid entity regex")
});

/// Attributes whose values are URLs and must not carry a script scheme
const URL_ATTRIBUTES: &[&str] = &["href", "src", "cite"];

/// Filter a free-text value before it is returned to a client.
pub fn filter_xss(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('<') {
        escape_text_into(&rest[..start], &mut out);
        let candidate = &rest[start..];

        match tag_end(candidate) {
            Some(end) => {
                let raw = &candidate[..=end];
                match rebuild_tag(raw) {
                    Some(tag) => out.push_str(&tag),
                    None => escape_text_into(raw, &mut out),
                }
                rest = &candidate[end + 1..];
            }
            None => {
                out.push_str("&lt;");
                rest = &candidate[1..];
            }
        }
    }

    escape_text_into(rest, &mut out);
    out
}

fn escape_text_into(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Byte index of the `>` closing the tag that starts at `candidate[0]`,
/// or `None` when the `<` does not open a tag.
fn tag_end(candidate: &str) -> Option<usize> {
    let after = candidate.get(1..)?;
    let name_start = after.strip_prefix('/').unwrap_or(after);
    if !name_start.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }

    let mut quote: Option<char> = None;
    for (i, c) in candidate.char_indices().skip(1) {
        match (quote, c) {
            (None, '"') | (None, '\'') => quote = Some(c),
            (Some(q), c) if q == c => quote = None,
            (None, '>') => return Some(i),
            (None, '<') => return None,
            _ => {}
        }
    }
    None
}

/// Rebuild a whitelisted tag; `None` means the tag must be escaped.
fn rebuild_tag(raw: &str) -> Option<String> {
    let inner = &raw[1..raw.len() - 1];
    let (closing, body) = match inner.strip_prefix('/') {
        Some(body) => (true, body),
        None => (false, inner),
    };

    let name_end = body
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(body.len());
    let name = body[..name_end].to_ascii_lowercase();
    let allowed = allowed_attributes(&name)?;

    if closing {
        return Some(format!("</{}>", name));
    }

    let attributes = body[name_end..].trim_end();
    let self_closing = attributes.ends_with('/');
    let attributes = attributes.trim_end_matches('/');

    let mut tag = format!("<{}", name);
    for caps in ATTRIBUTE_RE.captures_iter(attributes) {
        let attr = caps[1].to_ascii_lowercase();
        if !allowed.contains(&attr.as_str()) {
            continue;
        }

        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map(|m| m.as_str());

        match value.map(decode_entities) {
            Some(value) => {
                if URL_ATTRIBUTES.contains(&attr.as_str()) && !is_safe_url(&value) {
                    continue;
                }
                tag.push_str(&format!(" {}=\"{}\"", attr, escape_attribute(&value)));
            }
            None => tag.push_str(&format!(" {}", attr)),
        }
    }

    if self_closing {
        tag.push_str(" /");
    }
    tag.push('>');
    Some(tag)
}

/// Decode numeric and common named character references. Unknown names and
/// invalid code points are left as written.
fn decode_entities(value: &str) -> String {
    ENTITY_RE
        .replace_all(value, |caps: &regex::Captures| {
            let decoded = if let Some(dec) = caps.get(1) {
                dec.as_str().parse::<u32>().ok().and_then(char::from_u32)
            } else if let Some(hex) = caps.get(2) {
                u32::from_str_radix(hex.as_str(), 16)
                    .ok()
                    .and_then(char::from_u32)
            } else {
                caps.get(3).and_then(|name| named_entity(name.as_str()))
            };

            match decoded {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn named_entity(name: &str) -> Option<char> {
    let c = match name.to_ascii_lowercase().as_str() {
        "colon" => ':',
        "tab" => '\t',
        "newline" => '\n',
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "sol" => '/',
        "lpar" => '(',
        "rpar" => ')',
        "period" => '.',
        "excl" => '!',
        _ => return None,
    };
    Some(c)
}

/// Expects an entity-decoded value.
fn is_safe_url(value: &str) -> bool {
    let normalized: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    if normalized.starts_with("data:image/") {
        return true;
    }

    !["javascript:", "vbscript:", "data:"]
        .iter()
        .any(|scheme| normalized.starts_with(scheme))
}

/// Tags that may appear in free text, with the attributes each may keep.
fn allowed_attributes(tag: &str) -> Option<&'static [&'static str]> {
    const TABLE_CELL: &[&str] = &["width", "rowspan", "colspan", "align", "valign"];
    const MEDIA: &[&str] = &[
        "autoplay", "controls", "crossorigin", "loop", "muted", "playsinline", "poster",
        "preload", "src", "height", "width",
    ];

    let attrs: &'static [&'static str] = match tag {
        "a" => &["target", "href", "title"],
        "abbr" | "font" => &["title", "color", "size", "face"],
        "img" => &["src", "alt", "title", "width", "height"],
        "blockquote" | "q" => &["cite"],
        "del" | "ins" => &["datetime"],
        "details" => &["open"],
        "table" => &["width", "border", "align", "valign"],
        "td" | "th" => TABLE_CELL,
        "tr" => &["rowspan", "align", "valign"],
        "col" | "colgroup" => &["align", "valign", "span", "width"],
        "audio" | "video" => MEDIA,
        "source" => &["src", "type"],
        "address" | "area" | "article" | "aside" | "b" | "bdi" | "bdo" | "big" | "br"
        | "caption" | "center" | "cite" | "code" | "dd" | "div" | "dl" | "dt" | "em"
        | "figcaption" | "figure" | "footer" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6"
        | "header" | "hr" | "i" | "li" | "mark" | "nav" | "ol" | "p" | "pre" | "s"
        | "section" | "small" | "span" | "sub" | "summary" | "sup" | "strong" | "strike"
        | "tbody" | "tfoot" | "thead" | "tt" | "u" | "ul" => &[],
        _ => return None,
    };
    Some(attrs)
}
