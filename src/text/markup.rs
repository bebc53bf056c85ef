//! Minimal reader for editor markup.
//!
//! Only two things matter to keyword extraction: the text inside heading
//! elements and everything else. No DOM is built; headings are matched with
//! a regex and all remaining tags are removed.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use thiserror::Error;
use tracing::warn;

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<h[1-6](?:\s[^>]*)?>(.*?)</h[1-6]\s*>").expect("valid heading regex")
});
static HEADING_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<h[1-6](?:\s[^>]*)?>").expect("valid heading open regex"));
static HEADING_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</h[1-6]\s*>").expect("valid heading close regex"));
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid tag regex"));
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").expect("valid entity regex")
});

/// Reasons a markup body could not be split into headings and text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    /// A `<` opened a tag that never closed, or opened inside another tag.
    #[error("unterminated tag at byte {offset}")]
    UnterminatedTag { offset: usize },

    /// Heading open and close tags do not pair up.
    #[error("unbalanced headings: {opened} opened, {closed} closed")]
    UnbalancedHeadings { opened: usize, closed: usize },
}

/// Text of a markup body, split by structural weight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupSegments {
    /// Text of each heading element, tags removed, in document order.
    pub headings: Vec<String>,
    /// All non-heading text, tags removed.
    pub text: String,
}

impl MarkupSegments {
    /// Treats the whole body as plain text with tags removed.
    pub fn fallback(markup: &str) -> Self {
        Self {
            headings: Vec::new(),
            text: strip_tags(markup),
        }
    }
}

/// Splits markup into heading text and remaining text.
///
/// # Errors
///
/// Returns [`MarkupError`] when tags are unterminated or headings unbalanced.
///
/// # Examples
///
/// ```
/// use notegraph::text::parse_markup;
///
/// let segments = parse_markup("<h2>Graph <em>theory</em></h2><p>Edges &amp; nodes</p>").unwrap();
/// assert_eq!(segments.headings, vec!["Graph theory"]);
/// assert_eq!(segments.text.trim(), "Edges & nodes");
/// ```
pub fn parse_markup(markup: &str) -> Result<MarkupSegments, MarkupError> {
    check_tags_terminated(markup)?;

    let opened = HEADING_OPEN_RE.find_iter(markup).count();
    let closed = HEADING_CLOSE_RE.find_iter(markup).count();
    if opened != closed {
        return Err(MarkupError::UnbalancedHeadings { opened, closed });
    }

    let headings = HEADING_RE
        .captures_iter(markup)
        .map(|caps| collapse(&strip_tags(&caps[1])))
        .filter(|heading| !heading.is_empty())
        .collect();
    let rest = HEADING_RE.replace_all(markup, " ");

    Ok(MarkupSegments {
        headings,
        text: strip_tags(&rest),
    })
}

/// Like [`parse_markup`], but degrades to [`MarkupSegments::fallback`] on
/// malformed input instead of failing.
pub fn segments_or_fallback(markup: &str) -> MarkupSegments {
    parse_markup(markup).unwrap_or_else(|err| {
        warn!(error = %err, "malformed markup, falling back to tag stripping");
        MarkupSegments::fallback(markup)
    })
}

/// Removes every tag, replacing it with a space so adjacent blocks do not
/// merge, then decodes character entities.
pub fn strip_tags(markup: &str) -> String {
    let without_tags = TAG_RE.replace_all(markup, " ");
    decode_entities(&without_tags)
}

fn decode_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some(' '),
                _ => numeric_entity(entity),
            };
            decoded.unwrap_or(' ').to_string()
        })
        .into_owned()
}

fn numeric_entity(entity: &str) -> Option<char> {
    let digits = entity.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse().ok()?,
    };
    char::from_u32(code)
}

fn check_tags_terminated(markup: &str) -> Result<(), MarkupError> {
    let mut open_at = None;
    for (offset, c) in markup.char_indices() {
        match c {
            '<' if open_at.is_some() => return Err(MarkupError::UnterminatedTag { offset }),
            '<' => open_at = Some(offset),
            '>' => open_at = None,
            _ => {}
        }
    }
    match open_at {
        Some(offset) => Err(MarkupError::UnterminatedTag { offset }),
        None => Ok(()),
    }
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_are_extracted_in_order() {
        let segments =
            parse_markup("<h1>First</h1><p>body</p><h3 class=\"x\">Second <b>part</b></h3>")
                .unwrap();
        assert_eq!(segments.headings, vec!["First", "Second part"]);
        assert_eq!(collapse(&segments.text), "body");
    }

    #[test]
    fn header_element_is_not_a_heading() {
        let segments = parse_markup("<header>site</header><p>text</p>").unwrap();
        assert!(segments.headings.is_empty());
        assert_eq!(collapse(&segments.text), "site text");
    }

    #[test]
    fn adjacent_blocks_do_not_merge() {
        assert_eq!(collapse(&strip_tags("<p>alpha</p><p>beta</p>")), "alpha beta");
    }

    #[test]
    fn entities_are_decoded() {
        assert_eq!(strip_tags("a&nbsp;&amp;&#65;&#x42;&unknown;"), "a &AB ");
    }

    #[test]
    fn unterminated_tag_is_an_error() {
        assert_eq!(
            parse_markup("<p>open <b"),
            Err(MarkupError::UnterminatedTag { offset: 8 })
        );
        assert!(matches!(
            parse_markup("<p <b>>x"),
            Err(MarkupError::UnterminatedTag { .. })
        ));
    }

    #[test]
    fn unbalanced_headings_are_an_error() {
        assert_eq!(
            parse_markup("<h1>never closed<p>text</p>"),
            Err(MarkupError::UnbalancedHeadings {
                opened: 1,
                closed: 0
            })
        );
    }

    #[test]
    fn fallback_strips_tags_without_heading_boost() {
        let segments = segments_or_fallback("<h1>title<p>body</p>");
        assert!(segments.headings.is_empty());
        assert_eq!(collapse(&segments.text), "title body");
    }

    #[test]
    fn empty_markup_yields_empty_segments() {
        assert_eq!(parse_markup("").unwrap(), MarkupSegments::default());
    }
}
