use crate::{
    ast::*,
    declaration::{unprefixed, SourceLine},
    error::DeltaResult,
    lexer::Lexer,
    utils::{collapse_whitespace, split_top_level},
    Token,
};

use super::BaseParser;

/// Parses plain CSS into a list of [`AstStmt`]s
///
/// Only the structure the differ needs is recovered: selectors, declarations,
/// comments and at-rules. Values and preludes are kept as text.
pub(crate) struct CssParser {
    pub toks: Lexer,
}

impl BaseParser for CssParser {
    fn toks(&self) -> &Lexer {
        &self.toks
    }

    fn toks_mut(&mut self) -> &mut Lexer {
        &mut self.toks
    }
}

impl CssParser {
    pub fn new(toks: Lexer) -> Self {
        CssParser { toks }
    }

    pub fn __parse(&mut self) -> DeltaResult<Vec<AstStmt>> {
        let stmts = self.parse_rule_list(false)?;
        debug_assert!(self.toks.peek().is_none());
        Ok(stmts)
    }

    /// Parses rules, comments and at-rules until the end of input or, inside a
    /// block, the closing brace (which is consumed)
    fn parse_rule_list(&mut self, in_block: bool) -> DeltaResult<Vec<AstStmt>> {
        let mut stmts = Vec::new();

        loop {
            self.whitespace_without_comments();

            match self.toks.peek() {
                None if in_block => {
                    return Err(("expected \"}\".", self.toks.current_span()).into())
                }
                None => break,
                Some(Token { kind: '}', .. }) if in_block => {
                    self.toks.next();
                    break;
                }
                Some(Token { kind: '}', .. }) => {
                    return Err(("unmatched \"}\".", self.toks.current_span()).into())
                }
                Some(Token { kind: ';', .. }) => {
                    self.toks.next();
                }
                Some(Token { kind: '/', .. }) if self.looking_at_comment() => {
                    stmts.push(self.parse_comment()?);
                }
                Some(Token { kind: '@', .. }) => stmts.push(self.parse_at_rule()?),
                Some(..) => stmts.push(self.parse_rule_set()?),
            }
        }

        Ok(stmts)
    }

    fn parse_comment(&mut self) -> DeltaResult<AstStmt> {
        let line = self.toks.current_line();
        let text = self.parse_loud_comment()?;
        Ok(AstStmt::Comment(AstComment { text, line }))
    }

    /// Reads a selector list up to its opening brace, which is consumed
    fn parse_selectors(&mut self) -> DeltaResult<Vec<String>> {
        let start = self.toks.cursor();
        let (prelude, stop) = self.scan_until(&['{', '}', ';'], false)?;

        if stop != Some('{') {
            return Err(("expected \"{\".", self.toks.span_from(start)).into());
        }

        self.toks.next();

        let selectors: Vec<String> = split_top_level(&prelude, ',')
            .iter()
            .map(|selector| collapse_whitespace(selector))
            .collect();

        if selectors.is_empty() {
            return Err(("expected selector.", self.toks.span_from(start)).into());
        }

        Ok(selectors)
    }

    fn parse_rule_set(&mut self) -> DeltaResult<AstStmt> {
        let line = self.toks.current_line();
        let selectors = self.parse_selectors()?;
        let body = self.parse_declaration_block()?;

        Ok(AstStmt::RuleSet(AstRuleSet {
            selectors,
            body,
            line,
        }))
    }

    /// Parses declarations and comments after an already consumed `{`, up to
    /// and including the closing `}`
    fn parse_declaration_block(&mut self) -> DeltaResult<Vec<AstStmt>> {
        let mut body = Vec::new();

        loop {
            self.whitespace_without_comments();

            match self.toks.peek() {
                None => return Err(("expected \"}\".", self.toks.current_span()).into()),
                Some(Token { kind: '}', .. }) => {
                    self.toks.next();
                    break;
                }
                Some(Token { kind: ';', .. }) => {
                    self.toks.next();
                }
                Some(Token { kind: '/', .. }) if self.looking_at_comment() => {
                    body.push(self.parse_comment()?);
                }
                Some(..) => body.push(self.parse_declaration()?),
            }
        }

        Ok(body)
    }

    fn parse_declaration(&mut self) -> DeltaResult<AstStmt> {
        let line = self.toks.current_line();
        let start = self.toks.cursor();

        let (property, stop) = self.scan_until(&[':', ';', '{', '}'], false)?;
        if stop != Some(':') {
            return Err(("expected \":\".", self.toks.span_from(start)).into());
        }

        let property = property.trim().to_owned();
        if property.is_empty() {
            return Err(("Expected identifier.", self.toks.span_from(start)).into());
        }

        self.expect_char(':')?;

        let value_start = self.toks.cursor();
        let (value, stop) = self.scan_until(&[';', '{', '}'], false)?;
        match stop {
            Some(';') => {
                self.toks.next();
            }
            Some('}') => {}
            Some(..) | None => {
                return Err(("expected \";\".", self.toks.span_from(value_start)).into())
            }
        }

        let value = value.trim().to_owned();
        if value.is_empty() {
            return Err(("Expected expression.", self.toks.span_from(value_start)).into());
        }

        Ok(AstStmt::Style(AstStyle {
            property,
            value,
            line,
        }))
    }

    /// Reads an at-rule prelude, stopping before its block or terminating
    /// semicolon
    fn parse_prelude(&mut self) -> DeltaResult<(String, Option<char>)> {
        let (prelude, stop) = self.scan_until(&['{', ';', '}'], false)?;
        Ok((collapse_whitespace(&prelude), stop))
    }

    fn expect_block(&mut self, stop: Option<char>, start: usize) -> DeltaResult<()> {
        if stop == Some('{') {
            self.toks.next();
            Ok(())
        } else {
            Err(("expected \"{\".", self.toks.span_from(start)).into())
        }
    }

    fn expect_statement_end(&mut self, stop: Option<char>, start: usize) -> DeltaResult<()> {
        match stop {
            Some(';') => {
                self.toks.next();
                Ok(())
            }
            None => Ok(()),
            Some(..) => Err(("expected \";\".", self.toks.span_from(start)).into()),
        }
    }

    fn parse_at_rule(&mut self) -> DeltaResult<AstStmt> {
        let start = self.toks.cursor();
        let line = self.toks.current_line();

        self.expect_char('@')?;
        let name = self.parse_name();
        if name.is_empty() {
            return Err(("Expected identifier.", self.toks.current_span()).into());
        }

        let lower = name.to_ascii_lowercase();
        let vendor = match unprefixed(&lower) {
            base if base.len() < lower.len() => Some(lower[..lower.len() - base.len()].to_owned()),
            _ => None,
        };

        let (prelude, stop) = self.parse_prelude()?;

        Ok(match (unprefixed(&lower), vendor.is_some()) {
            ("document", _) => {
                self.expect_block(stop, start)?;
                AstStmt::Document(AstDocument {
                    vendor,
                    document: prelude,
                    body: self.parse_rule_list(true)?,
                    line,
                })
            }
            ("keyframes", _) => {
                self.expect_block(stop, start)?;
                AstStmt::Keyframes(AstKeyframes {
                    vendor,
                    name: prelude,
                    body: self.parse_keyframe_list()?,
                    line,
                })
            }
            ("media", false) => {
                self.expect_block(stop, start)?;
                AstStmt::Media(AstMedia {
                    query: prelude,
                    body: self.parse_rule_list(true)?,
                    line,
                })
            }
            ("supports", false) => {
                self.expect_block(stop, start)?;
                AstStmt::Supports(AstSupports {
                    condition: prelude,
                    body: self.parse_rule_list(true)?,
                    line,
                })
            }
            ("host", false) => {
                self.expect_block(stop, start)?;
                AstStmt::Host(AstHost {
                    body: self.parse_rule_list(true)?,
                    line,
                })
            }
            ("page", false) => {
                self.expect_block(stop, start)?;
                AstStmt::Page(AstPage {
                    selectors: split_top_level(&prelude, ','),
                    body: self.parse_declaration_block()?,
                    line,
                })
            }
            ("font-face", false) => {
                self.expect_block(stop, start)?;
                AstStmt::FontFace(AstFontFace {
                    body: self.parse_declaration_block()?,
                    line,
                })
            }
            ("import", false) => {
                self.expect_statement_end(stop, start)?;
                AstStmt::Import(AstImport {
                    import: prelude,
                    line,
                })
            }
            ("charset", false) => {
                self.expect_statement_end(stop, start)?;
                AstStmt::Charset(AstCharset {
                    charset: prelude,
                    line,
                })
            }
            ("namespace", false) => {
                self.expect_statement_end(stop, start)?;
                AstStmt::Namespace(AstNamespace {
                    namespace: prelude,
                    line,
                })
            }
            ("custom-media", false) => {
                self.expect_statement_end(stop, start)?;
                let (name, media) = match prelude.split_once(' ') {
                    Some((name, media)) => (name.to_owned(), media.to_owned()),
                    None => {
                        return Err((
                            "expected media query.",
                            self.toks.span_from(start),
                        )
                            .into())
                    }
                };
                AstStmt::CustomMedia(AstCustomMedia { name, media, line })
            }
            _ => self.parse_unknown_at_rule(name, prelude, stop, start, line)?,
        })
    }

    fn parse_keyframe_list(&mut self) -> DeltaResult<Vec<AstStmt>> {
        let mut body = Vec::new();

        loop {
            self.whitespace_without_comments();

            match self.toks.peek() {
                None => return Err(("expected \"}\".", self.toks.current_span()).into()),
                Some(Token { kind: '}', .. }) => {
                    self.toks.next();
                    break;
                }
                Some(Token { kind: '/', .. }) if self.looking_at_comment() => {
                    body.push(self.parse_comment()?);
                }
                Some(..) => {
                    let line = self.toks.current_line();
                    let values = self.parse_selectors()?;
                    body.push(AstStmt::Keyframe(AstKeyframe {
                        values,
                        body: self.parse_declaration_block()?,
                        line,
                    }));
                }
            }
        }

        Ok(body)
    }

    fn parse_unknown_at_rule(
        &mut self,
        name: String,
        params: String,
        stop: Option<char>,
        start: usize,
        line: SourceLine,
    ) -> DeltaResult<AstStmt> {
        let body = if stop == Some('{') {
            self.toks.next();
            Some(self.parse_raw_block(start)?)
        } else {
            self.expect_statement_end(stop, start)?;
            None
        };

        Ok(AstStmt::UnknownAtRule(AstUnknownAtRule {
            name,
            params,
            body,
            line,
        }))
    }

    /// Returns the trimmed text up to the `}` matching an already consumed
    /// `{`, which is consumed as well
    fn parse_raw_block(&mut self, start: usize) -> DeltaResult<String> {
        let mut buffer = String::new();
        let mut depth = 0_usize;

        loop {
            let (text, stop) = self.scan_until(&['{', '}'], true)?;
            buffer.push_str(&text);

            match stop {
                Some('{') => {
                    self.toks.next();
                    buffer.push('{');
                    depth += 1;
                }
                Some(..) if depth > 0 => {
                    self.toks.next();
                    buffer.push('}');
                    depth -= 1;
                }
                Some(..) => {
                    self.toks.next();
                    break;
                }
                None => return Err(("expected \"}\".", self.toks.span_from(start)).into()),
            }
        }

        Ok(buffer.trim().to_owned())
    }
}
