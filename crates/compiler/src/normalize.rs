use std::mem;

use crate::{
    ast::*,
    declaration::{normalize_selector, Declaration, SourceLine},
    error::{DeltaError, DeltaResult},
    Options,
};

/// A comment kept aside for reattachment once the diff is done
///
/// Comments are never compared. `context` holds the header of the enclosing
/// container (e.g. `@media print`) for comments found inside one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub(crate) text: String,
    pub(crate) line: SourceLine,
    pub(crate) context: Option<String>,
}

impl Comment {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line(&self) -> SourceLine {
        self.line
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }
}

/// A top-level construct that is not broken into declarations, such as
/// `@import` or `@keyframes`, stored as canonical CSS text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtRule {
    pub(crate) css: String,
    pub(crate) line: SourceLine,
}

impl AtRule {
    pub fn css(&self) -> &str {
        &self.css
    }

    pub fn line(&self) -> SourceLine {
        self.line
    }

    /// Case-insensitive comparison of the full text
    pub fn matches(&self, other: &Self) -> bool {
        self.css.to_lowercase() == other.css.to_lowercase()
    }
}

/// The flattened form of one parsed stylesheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    pub(crate) declarations: Vec<Declaration>,
    pub(crate) comments: Vec<Comment>,
    pub(crate) at_rules: Vec<AtRule>,
}

impl Stylesheet {
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn at_rules(&self) -> &[AtRule] {
        &self.at_rules
    }

    /// Orders declarations by identity key, as [`ParentIndex`] expects
    ///
    /// [`ParentIndex`]: crate::ParentIndex
    pub fn sort_by_identity(&mut self) {
        self.declarations
            .sort_by(|a, b| a.identity_key().cmp(b.identity_key()));
    }

    pub fn from_ast(stmts: Vec<AstStmt>, options: &Options) -> DeltaResult<Self> {
        let mut normalizer = Normalizer {
            options,
            stylesheet: Stylesheet::default(),
        };

        for stmt in stmts {
            normalizer.visit_top_level(stmt)?;
        }

        Ok(normalizer.stylesheet)
    }
}

struct Normalizer<'a> {
    options: &'a Options<'a>,
    stylesheet: Stylesheet,
}

impl<'a> Normalizer<'a> {
    fn visit_top_level(&mut self, stmt: AstStmt) -> DeltaResult<()> {
        match &stmt {
            AstStmt::RuleSet(..) => self.visit_rule(&stmt, None)?,
            AstStmt::Comment(comment) => self.push_comment(&comment.text, comment.line, None),
            AstStmt::Document(AstDocument {
                vendor,
                document,
                body,
                ..
            }) => {
                let header = format!(
                    "@{}document {}",
                    vendor.as_deref().unwrap_or_default(),
                    document
                );
                self.visit_container(&stmt, &header, body)?;
            }
            AstStmt::Host(AstHost { body, .. }) => self.visit_container(&stmt, "@host", body)?,
            AstStmt::Media(AstMedia { query, body, .. }) => {
                self.visit_container(&stmt, &format!("@media {}", query), body)?;
            }
            AstStmt::Supports(AstSupports {
                condition, body, ..
            }) => self.visit_container(&stmt, &format!("@supports {}", condition), body)?,
            AstStmt::Page(page) => {
                let rule = AstStmt::RuleSet(page_to_rule(page));
                self.visit_rule(&rule, None)?;
            }
            AstStmt::Charset(..)
            | AstStmt::CustomMedia(..)
            | AstStmt::FontFace(..)
            | AstStmt::Import(..)
            | AstStmt::Keyframes(..)
            | AstStmt::Namespace(..)
            | AstStmt::UnknownAtRule(..) => self.push_at_rule(&stmt),
            AstStmt::Style(..) | AstStmt::Keyframe(..) => {
                return Err(DeltaError::structural(format!(
                    "found a {} outside of any rule",
                    stmt.kind()
                )))
            }
        }

        Ok(())
    }

    /// Flattens a rule with at least one declaration, or turns an all-comment
    /// rule into a single comment
    fn visit_rule(&mut self, stmt: &AstStmt, context: Option<&str>) -> DeltaResult<()> {
        let rule = match stmt {
            AstStmt::RuleSet(rule) => rule,
            _ => {
                return Err(DeltaError::structural(format!(
                    "expected a rule, found {}",
                    stmt.kind()
                )))
            }
        };

        if rule.body.iter().any(|child| matches!(child, AstStmt::Style(..))) {
            let declarations =
                rule_to_declarations(stmt, context.unwrap_or_default(), self.options)?;
            self.stylesheet.declarations.extend(declarations);
        } else if !rule.body.is_empty() {
            let comments: Vec<&str> = rule
                .body
                .iter()
                .filter_map(|child| match child {
                    AstStmt::Comment(comment) => Some(comment.text.trim()),
                    _ => None,
                })
                .collect();

            let text = format!(
                "{} {{\n  {}\n}}",
                rule.selectors.join(",\n"),
                comments.join("\n  ")
            );
            self.push_comment(&text, rule.line, context);
        }

        Ok(())
    }

    fn visit_container(
        &mut self,
        stmt: &AstStmt,
        header: &str,
        body: &[AstStmt],
    ) -> DeltaResult<()> {
        let is_flat = body
            .iter()
            .all(|child| matches!(child, AstStmt::RuleSet(..) | AstStmt::Comment(..)));

        // only one level of context is tracked
        if !is_flat {
            self.push_at_rule(stmt);
            return Ok(());
        }

        let context = normalize_selector(header);

        for child in body {
            match child {
                AstStmt::Comment(comment) => {
                    self.push_comment(&comment.text, comment.line, Some(&context));
                }
                _ => self.visit_rule(child, Some(&context))?,
            }
        }

        Ok(())
    }

    fn push_comment(&mut self, text: &str, line: SourceLine, context: Option<&str>) {
        let text = text.trim();
        if self.options.remove_comments || text.is_empty() {
            return;
        }

        self.stylesheet.comments.push(Comment {
            text: text.to_owned(),
            line,
            context: context.map(str::to_owned),
        });
    }

    fn push_at_rule(&mut self, stmt: &AstStmt) {
        self.stylesheet.at_rules.push(AtRule {
            css: stmt.to_css(),
            line: stmt.line(),
        });
    }
}

/// `@page` rules are compared like ordinary rules whose selectors carry the
/// `@page` prefix
fn page_to_rule(page: &AstPage) -> AstRuleSet {
    let selectors = if page.selectors.is_empty() {
        vec!["@page".to_owned()]
    } else {
        page.selectors
            .iter()
            .map(|selector| format!("@page {}", selector))
            .collect()
    };

    AstRuleSet {
        selectors,
        body: page.body.clone(),
        line: page.line,
    }
}

/// Expands a rule into one [`Declaration`] per selector and declaration,
/// attaching interleaved comments to their neighbouring declarations
///
/// Fails with a structural error for anything other than a rule.
pub fn rule_to_declarations(
    stmt: &AstStmt,
    parent_selector: &str,
    options: &Options,
) -> DeltaResult<Vec<Declaration>> {
    let rule = match stmt {
        AstStmt::RuleSet(rule) => rule,
        _ => {
            return Err(DeltaError::structural(format!(
                "rule_to_declarations works on rules only, found {}",
                stmt.kind()
            )))
        }
    };

    let mut declarations: Vec<Declaration> = Vec::new();
    let last_idx = rule.body.len().saturating_sub(1);

    for selector in &rule.selectors {
        let pass_start = declarations.len();
        let mut pending: Vec<String> = Vec::new();

        for (idx, child) in rule.body.iter().enumerate() {
            match child {
                AstStmt::Style(style) => {
                    let declaration = Declaration::new(
                        parent_selector,
                        selector,
                        &style.property,
                        &style.value,
                        style.line,
                    )?
                    .with_comments_before(mem::take(&mut pending));
                    declarations.push(declaration);
                }
                AstStmt::Comment(comment) => {
                    let text = comment.text.trim();
                    if options.remove_comments || text.is_empty() {
                        continue;
                    }

                    let previous = declarations[pass_start..].last_mut();
                    let is_last = idx == last_idx;

                    match (options.comments_same_line, previous) {
                        (true, Some(previous)) => previous.push_comment_after(text.to_owned()),
                        (false, Some(previous)) if is_last => {
                            for comment in pending.drain(..) {
                                previous.push_comment_after(comment);
                            }
                            previous.push_comment_after(text.to_owned());
                        }
                        (_, None) if is_last => {}
                        (..) => pending.push(text.to_owned()),
                    }
                }
                _ => {
                    return Err(DeltaError::structural(format!(
                        "unexpected {} inside a rule",
                        child.kind()
                    )))
                }
            }
        }

        if let Some(previous) = declarations[pass_start..].last_mut() {
            for comment in pending {
                previous.push_comment_after(comment);
            }
        }
    }

    Ok(declarations)
}
