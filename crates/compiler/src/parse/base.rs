use crate::{
    error::DeltaResult,
    lexer::Lexer,
    utils::{is_name, opposite_bracket},
    Token,
};

pub(crate) trait BaseParser {
    fn toks(&self) -> &Lexer;
    fn toks_mut(&mut self) -> &mut Lexer;

    fn whitespace_without_comments(&mut self) {
        while matches!(
            self.toks().peek(),
            Some(Token {
                kind: ' ' | '\t' | '\n',
                ..
            })
        ) {
            self.toks_mut().next();
        }
    }

    fn next_matches(&mut self, s: &str) -> bool {
        for (idx, c) in s.chars().enumerate() {
            match self.toks().peek_n(idx) {
                Some(Token { kind, .. }) if kind == c => {}
                _ => return false,
            }
        }

        true
    }

    fn looking_at_comment(&mut self) -> bool {
        self.next_matches("/*")
    }

    fn skip_loud_comment(&mut self) -> DeltaResult<()> {
        debug_assert!(self.next_matches("/*"));
        let start = self.toks().cursor();
        self.toks_mut().next();
        self.toks_mut().next();

        while let Some(next) = self.toks_mut().next() {
            if next.kind != '*' {
                continue;
            }

            while self.scan_char('*') {}

            if self.scan_char('/') {
                return Ok(());
            }
        }

        Err(("expected more input.", self.toks().span_from(start)).into())
    }

    /// Consumes a `/* .. */` comment and returns the text between the delimiters
    fn parse_loud_comment(&mut self) -> DeltaResult<String> {
        let raw = self.fallible_raw_text(Self::skip_loud_comment)?;
        Ok(raw[2..raw.len() - 2].to_owned())
    }

    fn scan_char(&mut self, c: char) -> bool {
        if let Some(Token { kind, .. }) = self.toks().peek() {
            if kind == c {
                self.toks_mut().next();
                return true;
            }
        }

        false
    }

    fn expect_char(&mut self, c: char) -> DeltaResult<()> {
        match self.toks().peek() {
            Some(tok) if tok.kind == c => {
                self.toks_mut().next();
                Ok(())
            }
            Some(..) | None => {
                Err((format!("expected \"{}\".", c), self.toks().current_span()).into())
            }
        }
    }

    /// Consumes a quoted string, leaving the quotes and escapes in place
    fn skip_string(&mut self) -> DeltaResult<()> {
        let start = self.toks().cursor();
        let quote = match self.toks_mut().next() {
            Some(Token {
                kind: q @ ('\'' | '"'),
                ..
            }) => q,
            Some(..) | None => return Err(("Expected string.", self.toks().current_span()).into()),
        };

        while let Some(next) = self.toks_mut().next() {
            match next.kind {
                c if c == quote => return Ok(()),
                '\n' => break,
                '\\' => {
                    self.toks_mut().next();
                }
                _ => {}
            }
        }

        Err((
            format!("Expected {quote}.", quote = quote),
            self.toks().span_from(start),
        )
            .into())
    }

    /// Consumes text up to (but not including) the first of `stops` that
    /// appears outside of strings, comments, parentheses and brackets
    ///
    /// Strings and escapes are copied verbatim. Comments are copied only when
    /// `keep_comments` is set. Returns `None` as the stop character when the
    /// input ends first.
    fn scan_until(
        &mut self,
        stops: &[char],
        keep_comments: bool,
    ) -> DeltaResult<(String, Option<char>)> {
        let mut buffer = String::new();
        let mut brackets = Vec::new();

        while let Some(tok) = self.toks().peek() {
            match tok.kind {
                c if brackets.is_empty() && stops.contains(&c) => {
                    return Ok((buffer, Some(c)));
                }
                '"' | '\'' => buffer.push_str(&self.fallible_raw_text(Self::skip_string)?),
                '/' if self.looking_at_comment() => {
                    let comment = self.fallible_raw_text(Self::skip_loud_comment)?;
                    if keep_comments {
                        buffer.push_str(&comment);
                    }
                }
                '\\' => {
                    self.toks_mut().next();
                    buffer.push('\\');
                    if let Some(escaped) = self.toks_mut().next() {
                        buffer.push(escaped.kind);
                    }
                }
                c @ ('(' | '[') => {
                    self.toks_mut().next();
                    buffer.push(c);
                    brackets.push(opposite_bracket(c));
                }
                c @ (')' | ']') => {
                    self.toks_mut().next();
                    buffer.push(c);
                    if brackets.last() == Some(&c) {
                        brackets.pop();
                    }
                }
                c => {
                    self.toks_mut().next();
                    buffer.push(c);
                }
            }
        }

        Ok((buffer, None))
    }

    fn fallible_raw_text<T>(
        &mut self,
        func: impl Fn(&mut Self) -> DeltaResult<T>,
    ) -> DeltaResult<String> {
        let start = self.toks().cursor();
        func(self)?;
        Ok(self.toks().raw_text(start))
    }

    /// Consumes an at-rule or property name
    fn parse_name(&mut self) -> String {
        let mut text = String::new();

        while let Some(tok) = self.toks().peek() {
            if !is_name(tok.kind) {
                break;
            }

            self.toks_mut().next();
            text.push(tok.kind);
        }

        text
    }
}
