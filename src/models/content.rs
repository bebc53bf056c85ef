use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Storage format of a note body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    /// Unstructured text.
    Plain,
    /// Rich-text markup (HTML produced by the editor).
    Markup,
}

impl fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Markup => write!(f, "markup"),
        }
    }
}

impl FromStr for ContentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(Self::Plain),
            "markup" => Ok(Self::Markup),
            other => Err(format!("unknown content format: {other}")),
        }
    }
}

/// A note body, tagged with how it must be read.
///
/// The format is decided once when the note enters the system, so keyword
/// extraction never has to sniff the text again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format", content = "text", rename_all = "lowercase")]
pub enum Content {
    /// Plain text, tokenized as-is.
    #[serde(rename = "plain")]
    PlainText(String),
    /// Markup whose headings are weighted above body text.
    Markup(String),
}

impl Content {
    /// Classifies raw editor output.
    ///
    /// Text containing both `<` and `>` is treated as markup. This is a
    /// heuristic: plain text such as `a < b > c` is misread as markup and
    /// loses whatever looks like a tag. A lone `<` inside real markup, as in
    /// `<h1>Parser</h1><p>a < b</p>`, makes the whole body unparseable, so
    /// the note falls back to plain tag stripping and its headings lose
    /// their weight boost. Callers that know the format should construct
    /// the variant directly.
    ///
    /// # Examples
    ///
    /// ```
    /// use notegraph::Content;
    ///
    /// assert!(matches!(Content::detect("<h1>Title</h1>"), Content::Markup(_)));
    /// assert!(matches!(Content::detect("just text"), Content::PlainText(_)));
    /// ```
    pub fn detect(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.contains('<') && text.contains('>') {
            Self::Markup(text)
        } else {
            Self::PlainText(text)
        }
    }

    /// Rebuilds a body from its stored format and text.
    pub fn from_parts(format: ContentFormat, text: impl Into<String>) -> Self {
        match format {
            ContentFormat::Plain => Self::PlainText(text.into()),
            ContentFormat::Markup => Self::Markup(text.into()),
        }
    }

    /// Returns the raw text, markup included.
    pub fn as_str(&self) -> &str {
        match self {
            Self::PlainText(text) | Self::Markup(text) => text,
        }
    }

    pub fn format(&self) -> ContentFormat {
        match self {
            Self::PlainText(_) => ContentFormat::Plain,
            Self::Markup(_) => ContentFormat::Markup,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().trim().is_empty()
    }
}

impl Default for Content {
    fn default() -> Self {
        Self::PlainText(String::new())
    }
}
