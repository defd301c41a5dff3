use std::sync::Arc;

use codemap::{File, Span};

use crate::declaration::SourceLine;

/// One character of input and its byte offset in the file
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Token {
    pub kind: char,
    pos: u32,
}

/// A cursor over the characters of one stylesheet
///
/// `\r\n`, a lone `\r` and form feeds are all read as `\n`, so that line
/// handling elsewhere only has to look for `\n`.
#[derive(Debug, Clone)]
pub(crate) struct Lexer {
    buf: Vec<Token>,
    file: Arc<File>,
    cursor: usize,
}

impl Lexer {
    pub fn new_from_file(file: &Arc<File>) -> Self {
        let source = file.source();
        let mut buf = Vec::with_capacity(source.len());
        let mut chars = source.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            let kind = match c {
                '\r' => {
                    chars.next_if(|&(_, next)| next == '\n');
                    '\n'
                }
                '\x0C' => '\n',
                c => c,
            };

            buf.push(Token {
                kind,
                pos: pos as u32,
            });
        }

        Lexer {
            buf,
            file: Arc::clone(file),
            cursor: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn peek(&self) -> Option<Token> {
        self.peek_n(0)
    }

    pub fn peek_n(&self, n: usize) -> Option<Token> {
        self.buf.get(self.cursor + n).copied()
    }

    /// The input consumed since `start`, with line endings already folded
    pub fn raw_text(&self, start: usize) -> String {
        self.buf[start..self.cursor].iter().map(|tok| tok.kind).collect()
    }

    /// Span of the token at `idx`, falling back to the last token past the end
    /// of input and to an empty span for empty input
    fn span_at(&self, idx: usize) -> Span {
        let (start, len) = match self.buf.get(idx).or_else(|| self.buf.last()) {
            Some(tok) => (u64::from(tok.pos), tok.kind.len_utf8() as u64),
            None => (0, 0),
        };

        self.file.span.subspan(start, start + len)
    }

    pub fn current_span(&self) -> Span {
        self.span_at(self.cursor)
    }

    pub fn prev_span(&self) -> Span {
        self.span_at(self.cursor.saturating_sub(1))
    }

    pub fn span_from(&self, start: usize) -> Span {
        self.span_at(start).merge(self.prev_span())
    }

    /// The 1-based line of the next token
    pub fn current_line(&self) -> SourceLine {
        let pos = self.current_span().low();
        SourceLine::from_zero_based(self.file.find_line(pos))
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let tok = self.peek()?;
        self.cursor += 1;
        Some(tok)
    }
}
