//! Scraping of workshop item pages
//!
//! Only the handful of elements modsync needs are extracted:
//!
//! ```text
//! <div class="workshopItemTitle">CBA_A3</div>
//! <div class="detailsStatRight">35.514 MB</div>       <- size
//! <div class="detailsStatRight">4 Aug, 2015 @ 3:42pm</div>   <- posted
//! <div class="detailsStatRight">12 Mar @ 4:10pm</div>        <- updated (absent if never updated)
//! <div class="requiredItemsContainer" id="RequiredItems">
//!     <a href="https://steamcommunity.com/workshop/filedetails/?id=450814997">...</a>
//! </div>
//! ```

use std::sync::OnceLock;

use regex::Regex;

#[allow(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    // Patterns are constants exercised by the tests below.
    Regex::new(pattern).expect("constant pattern should compile")
}

fn title_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        compile(r#"(?is)<div\b[^>]*\bclass\s*=\s*["'][^"']*\bworkshopItemTitle\b[^"']*["'][^>]*>(.*?)</div>"#)
    })
}

fn stat_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        compile(r#"(?is)<div\b[^>]*\bclass\s*=\s*["'][^"']*\bdetailsStatRight\b[^"']*["'][^>]*>(.*?)</div>"#)
    })
}

fn required_items_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| compile(r#"\bid\s*=\s*["']RequiredItems["']"#))
}

fn href_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| compile(r#"(?is)<a\b[^>]*?\bhref\s*=\s*["']([^"']*)["']"#))
}

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| compile(r"<[^>]*>"))
}

/// Item title, entities decoded and trimmed
pub fn title(html: &str) -> Option<String> {
    let inner = title_pattern().captures(html)?.get(1)?.as_str();
    let text = text_content(inner);
    (!text.is_empty()).then_some(text)
}

/// Last-updated marker as displayed on the page
///
/// The stats column lists size, posted date and, for items that were ever
/// updated, the update date. The posted date stands in when there is no
/// update date.
pub fn updated_marker(html: &str) -> Option<String> {
    let stats: Vec<String> = stat_pattern()
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| text_content(m.as_str()))
        .collect();
    stats
        .get(2)
        .or_else(|| stats.get(1))
        .filter(|marker| !marker.is_empty())
        .cloned()
}

/// Link targets inside the required items section, in page order
pub fn required_item_links(html: &str) -> Vec<String> {
    let Some(marker) = required_items_pattern().find(html) else {
        return Vec::new();
    };
    let Some(section) = enclosing_element(html, marker.start()) else {
        return Vec::new();
    };
    href_pattern()
        .captures_iter(section)
        .filter_map(|caps| caps.get(1))
        .map(|m| decode_entities(m.as_str().trim()))
        .collect()
}

/// The element whose opening tag contains byte offset `inside_tag`,
/// found by balancing open and close tags of the same name
fn enclosing_element(html: &str, inside_tag: usize) -> Option<&str> {
    let start = html[..inside_tag].rfind('<')?;
    let name: String = html[start + 1..]
        .chars()
        .take_while(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_lowercase();
    if name.is_empty() {
        return None;
    }

    // ASCII lowercasing keeps byte offsets valid for `html`.
    let lower = html.to_ascii_lowercase();
    let open = format!("<{name}");
    let close = format!("</{name}");

    let mut depth = 0usize;
    let mut pos = start;
    loop {
        let next_open = find_tag(&lower, &open, pos);
        let next_close = find_tag(&lower, &close, pos);
        match (next_open, next_close) {
            (Some(o), Some(c)) if o < c => {
                depth += 1;
                pos = o + open.len();
            }
            (Some(o), None) => {
                depth += 1;
                pos = o + open.len();
            }
            (_, Some(c)) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&html[start..c]);
                }
                pos = c + close.len();
            }
            (None, None) => return Some(&html[start..]),
        }
    }
}

/// Next `<name` or `</name` at or after `from` that is not a longer tag name
fn find_tag(lower: &str, tag: &str, from: usize) -> Option<usize> {
    let mut from = from;
    while let Some(i) = lower[from..].find(tag) {
        let at = from + i;
        let next = lower.as_bytes().get(at + tag.len()).copied();
        if matches!(next, Some(b' ' | b'\t' | b'\n' | b'\r' | b'>' | b'/')) {
            return Some(at);
        }
        from = at + tag.len();
    }
    None
}

fn text_content(fragment: &str) -> String {
    let stripped = tag_pattern().replace_all(fragment, "");
    decode_entities(&stripped).trim().to_string()
}

/// Decode named and numeric HTML character references
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail
            .find(';')
            .filter(|&end| end <= 10)
            .and_then(|end| decode_entity(&tail[1..end]).map(|c| (c, end)));
        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Named references Workshop titles use; others only decode when numeric
const NAMED_ENTITIES: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", ' '),
    ("copy", '©'),
    ("reg", '®'),
    ("trade", '™'),
    ("deg", '°'),
    ("middot", '·'),
    ("laquo", '«'),
    ("raquo", '»'),
    ("ndash", '–'),
    ("mdash", '—'),
    ("hellip", '…'),
    ("lsquo", '‘'),
    ("rsquo", '’'),
    ("ldquo", '“'),
    ("rdquo", '”'),
    ("bull", '•'),
    ("szlig", 'ß'),
    ("Agrave", 'À'),
    ("Aacute", 'Á'),
    ("Acirc", 'Â'),
    ("Auml", 'Ä'),
    ("Aring", 'Å'),
    ("Ccedil", 'Ç'),
    ("Egrave", 'È'),
    ("Eacute", 'É'),
    ("Ecirc", 'Ê'),
    ("Iacute", 'Í'),
    ("Ntilde", 'Ñ'),
    ("Oacute", 'Ó'),
    ("Ouml", 'Ö'),
    ("Oslash", 'Ø'),
    ("Uacute", 'Ú'),
    ("Uuml", 'Ü'),
    ("agrave", 'à'),
    ("aacute", 'á'),
    ("acirc", 'â'),
    ("auml", 'ä'),
    ("aring", 'å'),
    ("ccedil", 'ç'),
    ("egrave", 'è'),
    ("eacute", 'é'),
    ("ecirc", 'ê'),
    ("euml", 'ë'),
    ("iacute", 'í'),
    ("iuml", 'ï'),
    ("ntilde", 'ñ'),
    ("oacute", 'ó'),
    ("ocirc", 'ô'),
    ("ouml", 'ö'),
    ("oslash", 'ø'),
    ("uacute", 'ú'),
    ("ucirc", 'û'),
    ("uuml", 'ü'),
    ("yacute", 'ý'),
];

fn decode_entity(name: &str) -> Option<char> {
    match NAMED_ENTITIES.iter().find(|(entity, _)| *entity == name) {
        Some(&(_, c)) => Some(c),
        None => {
            let number = name.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}
