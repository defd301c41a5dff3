use crate::{
    declaration::collapse_zero_units,
    utils::collapse_whitespace,
};

use super::{AstStmt, AstStyle};

impl AstStmt {
    /// Renders the node back to canonical CSS text
    ///
    /// This is the text non-decomposable at-rules are stored and compared by,
    /// so it only depends on the parsed structure and never on the original
    /// formatting.
    pub fn to_css(&self) -> String {
        let mut buffer = String::new();
        self.write_css(&mut buffer);
        buffer
    }

    fn write_css(&self, buffer: &mut String) {
        match self {
            AstStmt::Style(style) => write_style(buffer, style),
            AstStmt::RuleSet(rule) => {
                buffer.push_str(&rule.selectors.join(",\n"));
                write_declaration_block(buffer, &rule.body);
            }
            AstStmt::Comment(comment) => {
                buffer.push_str(&format!("/* {} */", comment.text.trim()));
            }
            AstStmt::Charset(charset) => {
                buffer.push_str(&format!("@charset {};", charset.charset));
            }
            AstStmt::CustomMedia(custom_media) => buffer.push_str(&format!(
                "@custom-media {} {};",
                custom_media.name, custom_media.media
            )),
            AstStmt::Document(document) => {
                buffer.push_str(&format!(
                    "@{}document {}",
                    document.vendor.as_deref().unwrap_or_default(),
                    document.document
                ));
                write_rule_block(buffer, &document.body);
            }
            AstStmt::FontFace(font_face) => {
                buffer.push_str("@font-face");
                write_declaration_block(buffer, &font_face.body);
            }
            AstStmt::Host(host) => {
                buffer.push_str("@host");
                write_rule_block(buffer, &host.body);
            }
            AstStmt::Import(import) => buffer.push_str(&format!("@import {};", import.import)),
            AstStmt::Keyframes(keyframes) => {
                buffer.push_str(&format!(
                    "@{}keyframes {}",
                    keyframes.vendor.as_deref().unwrap_or_default(),
                    keyframes.name
                ));
                write_rule_block(buffer, &keyframes.body);
            }
            AstStmt::Keyframe(keyframe) => {
                buffer.push_str(&keyframe.values.join(",\n"));
                write_declaration_block(buffer, &keyframe.body);
            }
            AstStmt::Media(media) => {
                buffer.push_str("@media ");
                buffer.push_str(&media.query);
                write_rule_block(buffer, &media.body);
            }
            AstStmt::Namespace(namespace) => {
                buffer.push_str(&format!("@namespace {};", namespace.namespace));
            }
            AstStmt::Page(page) => {
                buffer.push_str("@page");
                if !page.selectors.is_empty() {
                    buffer.push(' ');
                    buffer.push_str(&page.selectors.join(",\n"));
                }
                write_declaration_block(buffer, &page.body);
            }
            AstStmt::Supports(supports) => {
                buffer.push_str("@supports ");
                buffer.push_str(&supports.condition);
                write_rule_block(buffer, &supports.body);
            }
            AstStmt::UnknownAtRule(rule) => {
                buffer.push('@');
                buffer.push_str(&rule.name);
                if !rule.params.is_empty() {
                    buffer.push(' ');
                    buffer.push_str(&rule.params);
                }
                match &rule.body {
                    Some(body) => buffer.push_str(&format!(" {{\n{}\n}}", body)),
                    None => buffer.push(';'),
                }
            }
        }
    }
}

/// `property: value;` with whitespace collapsed and zero lengths unitless
fn write_style(buffer: &mut String, style: &AstStyle) {
    buffer.push_str(&format!(
        "{}: {};",
        style.property,
        collapse_zero_units(&collapse_whitespace(&style.value))
    ));
}

/// `{ .. }` holding declarations, one per indented line
fn write_declaration_block(buffer: &mut String, body: &[AstStmt]) {
    buffer.push_str(" {\n");
    for child in body {
        buffer.push_str("  ");
        child.write_css(buffer);
        buffer.push('\n');
    }
    buffer.push('}');
}

/// `{ .. }` holding whole rules, one per line
fn write_rule_block(buffer: &mut String, body: &[AstStmt]) {
    buffer.push_str(" {\n");
    for child in body {
        child.write_css(buffer);
        buffer.push('\n');
    }
    buffer.push('}');
}
