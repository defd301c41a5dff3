use crate::declaration::SourceLine;

/// A declaration: `color: red`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstStyle {
    pub property: String,
    pub value: String,
    pub line: SourceLine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstComment {
    /// The text between `/*` and `*/`
    pub text: String,
    pub line: SourceLine,
}

/// A style rule. The body holds only [`AstStmt::Style`] and
/// [`AstStmt::Comment`] nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstRuleSet {
    pub selectors: Vec<String>,
    pub body: Vec<AstStmt>,
    pub line: SourceLine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstCharset {
    pub charset: String,
    pub line: SourceLine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstCustomMedia {
    pub name: String,
    pub media: String,
    pub line: SourceLine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstDocument {
    /// A vendor prefix such as `-moz-`, if present
    pub vendor: Option<String>,
    pub document: String,
    pub body: Vec<AstStmt>,
    pub line: SourceLine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstFontFace {
    pub body: Vec<AstStmt>,
    pub line: SourceLine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstHost {
    pub body: Vec<AstStmt>,
    pub line: SourceLine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstImport {
    pub import: String,
    pub line: SourceLine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstKeyframes {
    pub vendor: Option<String>,
    pub name: String,
    /// [`AstStmt::Keyframe`] and [`AstStmt::Comment`] nodes
    pub body: Vec<AstStmt>,
    pub line: SourceLine,
}

/// One step of a `@keyframes` rule, e.g. `from, 50% { .. }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstKeyframe {
    pub values: Vec<String>,
    pub body: Vec<AstStmt>,
    pub line: SourceLine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstMedia {
    pub query: String,
    pub body: Vec<AstStmt>,
    pub line: SourceLine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstNamespace {
    pub namespace: String,
    pub line: SourceLine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstPage {
    /// Empty for a bare `@page { .. }`
    pub selectors: Vec<String>,
    pub body: Vec<AstStmt>,
    pub line: SourceLine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstSupports {
    pub condition: String,
    pub body: Vec<AstStmt>,
    pub line: SourceLine,
}

/// An at-rule this parser has no structure for, such as `@layer` or
/// `@container`. It is carried through verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstUnknownAtRule {
    pub name: String,
    pub params: String,
    /// The raw text between the braces, or `None` for a statement at-rule
    pub body: Option<String>,
    pub line: SourceLine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstStmt {
    Style(AstStyle),
    RuleSet(AstRuleSet),
    Comment(AstComment),
    Charset(AstCharset),
    CustomMedia(AstCustomMedia),
    Document(AstDocument),
    FontFace(AstFontFace),
    Host(AstHost),
    Import(AstImport),
    Keyframes(AstKeyframes),
    Keyframe(AstKeyframe),
    Media(AstMedia),
    Namespace(AstNamespace),
    Page(AstPage),
    Supports(AstSupports),
    UnknownAtRule(AstUnknownAtRule),
}

impl AstStmt {
    pub fn line(&self) -> SourceLine {
        match self {
            AstStmt::Style(AstStyle { line, .. })
            | AstStmt::RuleSet(AstRuleSet { line, .. })
            | AstStmt::Comment(AstComment { line, .. })
            | AstStmt::Charset(AstCharset { line, .. })
            | AstStmt::CustomMedia(AstCustomMedia { line, .. })
            | AstStmt::Document(AstDocument { line, .. })
            | AstStmt::FontFace(AstFontFace { line, .. })
            | AstStmt::Host(AstHost { line, .. })
            | AstStmt::Import(AstImport { line, .. })
            | AstStmt::Keyframes(AstKeyframes { line, .. })
            | AstStmt::Keyframe(AstKeyframe { line, .. })
            | AstStmt::Media(AstMedia { line, .. })
            | AstStmt::Namespace(AstNamespace { line, .. })
            | AstStmt::Page(AstPage { line, .. })
            | AstStmt::Supports(AstSupports { line, .. })
            | AstStmt::UnknownAtRule(AstUnknownAtRule { line, .. }) => *line,
        }
    }

    /// The node kind, as used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            AstStmt::Style(..) => "declaration",
            AstStmt::RuleSet(..) => "rule",
            AstStmt::Comment(..) => "comment",
            AstStmt::Charset(..) => "charset",
            AstStmt::CustomMedia(..) => "custom-media",
            AstStmt::Document(..) => "document",
            AstStmt::FontFace(..) => "font-face",
            AstStmt::Host(..) => "host",
            AstStmt::Import(..) => "import",
            AstStmt::Keyframes(..) => "keyframes",
            AstStmt::Keyframe(..) => "keyframe",
            AstStmt::Media(..) => "media",
            AstStmt::Namespace(..) => "namespace",
            AstStmt::Page(..) => "page",
            AstStmt::Supports(..) => "supports",
            AstStmt::UnknownAtRule(..) => "at-rule",
        }
    }
}
