use std::io::BufRead;

use crate::error::{Error, ParseError, ParseErrorKind};
use crate::model::{Document, Entry};

/// Parse dotenv entries from UTF-8 text.
pub fn parse_str(input: &str) -> Result<Document, Error> {
    parse_document(input).map_err(Error::from)
}

/// Parse dotenv entries from UTF-8 bytes.
///
/// The whole buffer must be valid UTF-8; any other byte sequence, even inside
/// a value, fails with [`Error::InvalidEncoding`] before scanning starts.
pub fn parse_bytes(input: &[u8]) -> Result<Document, Error> {
    let text = std::str::from_utf8(input)?;
    parse_str(text)
}

/// Parse dotenv entries from a buffered reader.
pub fn parse_reader<R: BufRead>(mut reader: R) -> Result<Document, Error> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    parse_bytes(&buf)
}

pub(crate) fn parse_document(input: &str) -> Result<Document, ParseError> {
    let mut cursor = Cursor::new(input);
    let mut document = Document::new();

    loop {
        cursor.skip_blank();
        match cursor.peek() {
            None => break,
            Some(b'#') => cursor.skip_comment(),
            Some(_) => document.push(cursor.scan_entry()?),
        }
    }

    tracing::debug!(
        entries = document.len(),
        bytes = input.len(),
        "parsed dotenv document"
    );
    Ok(document)
}

/// Scan position within one input buffer.
///
/// `pos` only ever advances past ASCII bytes or up to a `\n`, so it always
/// sits on a char boundary of `input`.
struct Cursor<'a> {
    input: &'a str,
    pos: usize,
    line: u32,
    line_start: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            line_start: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn at_line_end(&self) -> bool {
        matches!(self.peek(), None | Some(b'\n'))
    }

    fn skip_blank(&mut self) {
        while let Some(byte) = self.peek() {
            match byte {
                b' ' => self.pos += 1,
                b'\n' => self.finish_line(),
                _ => break,
            }
        }
    }

    fn skip_spaces(&mut self) {
        while self.peek() == Some(b' ') {
            self.pos += 1;
        }
    }

    fn skip_comment(&mut self) {
        self.pos = self.line_end();
        self.finish_line();
    }

    /// Steps over the newline at `pos`, if any, and counts a new line.
    ///
    /// The line counter advances even at end of input.
    fn finish_line(&mut self) {
        if self.peek() == Some(b'\n') {
            self.pos += 1;
        }
        self.line += 1;
        self.line_start = self.pos;
    }

    fn line_end(&self) -> usize {
        self.input[self.pos..]
            .find('\n')
            .map_or(self.input.len(), |offset| self.pos + offset)
    }

    fn scan_entry(&mut self) -> Result<Entry, ParseError> {
        let line = self.line;

        let key_start = self.pos;
        while self.peek().is_some_and(is_key_byte) {
            self.pos += 1;
        }
        if self.pos == key_start {
            return Err(self.error(ParseErrorKind::EmptyKey));
        }
        let key = self.input[key_start..self.pos].to_owned();

        self.skip_spaces();
        if self.peek() != Some(b'=') {
            return Err(self.error(ParseErrorKind::MissingDelimiter));
        }
        self.pos += 1;
        if self.at_line_end() {
            return Err(self.error(ParseErrorKind::EmptyValue));
        }
        self.skip_spaces();

        let value_end = self.line_end();
        let value = strip_quotes(&self.input[self.pos..value_end]);
        self.pos = value_end;
        self.finish_line();

        Ok(Entry::new(key, value, line))
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        let column = self.input[self.line_start..self.pos].chars().count() as u32 + 1;
        ParseError::new(self.line, column, kind)
    }
}

fn is_key_byte(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

fn strip_quotes(raw: &str) -> String {
    raw.chars().filter(|ch| !matches!(ch, '"' | '\'')).collect()
}
