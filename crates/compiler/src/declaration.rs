use std::fmt;

use phf::{phf_map, phf_set};

use crate::{
    error::{DeltaError, DeltaResult},
    utils::{collapse_whitespace, is_token_end, is_token_start, lowercase_unquoted},
};

/// Units that make `0<unit>` equivalent to a bare `0`
static LENGTH_UNITS: phf::Set<&'static str> = phf_set! {
    "px", "em", "rem", "ex", "ch", "vw", "vh", "vmin", "vmax", "vi", "vb",
    "cm", "mm", "q", "in", "pt", "pc",
};

static PARENT_TYPES: phf::Map<&'static str, ParentType> = phf_map! {
    "charset" => ParentType::Charset,
    "custom-media" => ParentType::CustomMedia,
    "document" => ParentType::Document,
    "host" => ParentType::Host,
    "font-face" => ParentType::FontFace,
    "import" => ParentType::Import,
    "keyframes" => ParentType::Keyframes,
    "media" => ParentType::Media,
    "namespace" => ParentType::Namespace,
    "page" => ParentType::Page,
    "supports" => ParentType::Supports,
};

/// Where a declaration, comment or at-rule starts in its source file
///
/// Unknown lines sort after every known line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceLine {
    Known(u32),
    Unknown,
}

impl SourceLine {
    pub(crate) fn from_zero_based(line: usize) -> Self {
        u32::try_from(line + 1).map_or(SourceLine::Unknown, SourceLine::Known)
    }
}

impl fmt::Display for SourceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLine::Known(line) => write!(f, "{}", line),
            SourceLine::Unknown => f.write_str("?"),
        }
    }
}

/// The kind of at-rule enclosing a declaration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParentType {
    Charset,
    CustomMedia,
    Document,
    Host,
    FontFace,
    Import,
    Keyframes,
    Media,
    Namespace,
    Page,
    Supports,
    Unknown,
}

impl ParentType {
    /// Classifies an at-rule header such as `@media screen` or
    /// `@-moz-document url-prefix()` by its at-keyword
    ///
    /// Returns `None` for an empty header, i.e. a top-level declaration.
    pub fn from_header(header: &str) -> Option<Self> {
        let header = header.trim();
        if header.is_empty() {
            return None;
        }

        let name = header
            .trim_start_matches('@')
            .split(|c: char| c.is_whitespace() || c == '(' || c == '{')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        Some(
            PARENT_TYPES
                .get(unprefixed(&name))
                .copied()
                .unwrap_or(ParentType::Unknown),
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ParentType::Charset => "charset",
            ParentType::CustomMedia => "custom-media",
            ParentType::Document => "document",
            ParentType::Host => "host",
            ParentType::FontFace => "font-face",
            ParentType::Import => "import",
            ParentType::Keyframes => "keyframes",
            ParentType::Media => "media",
            ParentType::Namespace => "namespace",
            ParentType::Page => "page",
            ParentType::Supports => "supports",
            ParentType::Unknown => "unknown",
        }
    }

    /// Whether rules may be nested under an at-rule of this kind
    pub fn is_container(self) -> bool {
        matches!(
            self,
            ParentType::Document | ParentType::Host | ParentType::Media | ParentType::Supports
        )
    }
}

/// Strips a vendor prefix such as `-moz-` or `-webkit-` from an at-keyword
pub(crate) fn unprefixed(name: &str) -> &str {
    if let Some(rest) = name.strip_prefix('-') {
        if let Some(idx) = rest.find('-') {
            return &rest[idx + 1..];
        }
    }

    name
}

/// One normalized `property: value` pair, scoped to a selector and an optional
/// enclosing at-rule
///
/// All fields are normalized at construction and the comparison keys are
/// derived from them, so two declarations are equivalent exactly when their
/// [`identity_key`](Declaration::identity_key)s are equal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    parent_selector: String,
    selector: String,
    property: String,
    value: String,
    declaration_text: String,
    line: SourceLine,
    comments_before: Vec<String>,
    comments_after: Vec<String>,
    parent_type: Option<ParentType>,
    full_selector: String,
    identity_key: String,
}

impl Declaration {
    /// Builds a declaration from raw parsed text
    ///
    /// Fails if the selector or property is empty once normalized.
    pub fn new(
        parent_selector: &str,
        selector: &str,
        property: &str,
        value: &str,
        line: SourceLine,
    ) -> DeltaResult<Self> {
        let parent_selector = normalize_selector(parent_selector);
        let selector = normalize_selector(selector);
        let property = property.trim().to_lowercase();
        let value = normalize_value(value);

        if selector.is_empty() {
            return Err(DeltaError::structural(format!(
                "declaration `{}` has no selector",
                property
            )));
        }

        if property.is_empty() {
            return Err(DeltaError::structural(format!(
                "declaration in `{}` has no property",
                selector
            )));
        }

        let parent_type = ParentType::from_header(&parent_selector);

        let full_selector = if parent_type.is_some() {
            format!("{} {{ {}", parent_selector, selector)
        } else {
            selector.clone()
        };

        let identity_key = format!("{} {{ {}: {}", full_selector, property, value);
        let declaration_text = format!("{}: {};", property, value);

        Ok(Declaration {
            parent_selector,
            selector,
            property,
            value,
            declaration_text,
            line,
            comments_before: Vec::new(),
            comments_after: Vec::new(),
            parent_type,
            full_selector,
            identity_key,
        })
    }

    #[must_use]
    pub fn with_comments_before(mut self, comments: Vec<String>) -> Self {
        self.comments_before = comments;
        self
    }

    pub(crate) fn push_comment_after(&mut self, comment: String) {
        self.comments_after.push(comment);
    }

    pub fn parent_selector(&self) -> &str {
        &self.parent_selector
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// `property: value;`
    pub fn declaration_text(&self) -> &str {
        &self.declaration_text
    }

    pub fn line(&self) -> SourceLine {
        self.line
    }

    pub fn comments_before(&self) -> &[String] {
        &self.comments_before
    }

    pub fn comments_after(&self) -> &[String] {
        &self.comments_after
    }

    pub fn parent_type(&self) -> Option<ParentType> {
        self.parent_type
    }

    /// The selector qualified by its enclosing at-rule, if any
    pub fn full_selector(&self) -> &str {
        &self.full_selector
    }

    pub fn identity_key(&self) -> &str {
        &self.identity_key
    }

    /// Whether both declarations set the same property to the same value for
    /// the same selector in the same context
    pub fn is_equivalent(&self, other: &Self) -> bool {
        self.identity_key == other.identity_key
    }
}

/// Trims, collapses whitespace and lowercases a selector or at-rule header
pub fn normalize_selector(selector: &str) -> String {
    lowercase_unquoted(&collapse_whitespace(selector))
}

/// Trims, collapses whitespace, lowercases and rewrites zero lengths such as
/// `0px` to `0`
pub fn normalize_value(value: &str) -> String {
    collapse_zero_units(&lowercase_unquoted(&collapse_whitespace(value)))
}

/// Rewrites `0<length unit>` to `0` wherever the zero starts a token and the
/// unit ends it. Quoted strings are left alone.
pub(crate) fn collapse_zero_units(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let mut buffer = String::with_capacity(value.len());
    let mut quote: Option<char> = None;
    let mut idx = 0;

    while idx < chars.len() {
        let c = chars[idx];

        if let Some(q) = quote {
            buffer.push(c);
            if c == '\\' {
                if let Some(&escaped) = chars.get(idx + 1) {
                    buffer.push(escaped);
                    idx += 1;
                }
            } else if c == q {
                quote = None;
            }
            idx += 1;
            continue;
        }

        match c {
            '"' | '\'' => quote = Some(c),
            '0' if is_token_start(idx.checked_sub(1).map(|prev| chars[prev])) => {
                let unit_end = chars[idx + 1..]
                    .iter()
                    .position(|c| !c.is_ascii_alphabetic())
                    .map_or(chars.len(), |len| idx + 1 + len);
                let unit: String = chars[idx + 1..unit_end]
                    .iter()
                    .map(char::to_ascii_lowercase)
                    .collect();

                if LENGTH_UNITS.contains(unit.as_str()) && is_token_end(chars.get(unit_end).copied())
                {
                    buffer.push('0');
                    idx = unit_end;
                    continue;
                }
            }
            _ => {}
        }

        buffer.push(c);
        idx += 1;
    }

    buffer
}
