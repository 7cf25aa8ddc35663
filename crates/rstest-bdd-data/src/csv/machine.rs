//! Single-pass state machine that splits CSV text into raw records.
//!
//! Quoted fields may contain delimiters and line breaks, so the input cannot
//! be split into lines up front. The machine consumes one character at a time
//! and never backtracks:
//!
//! ```text
//! FieldStart --'"'--> Quoted --'"'--> QuoteInQuoted --'"'--> Quoted
//!     |                                    |
//!     +--other--> Unquoted                 +--delimiter/break--> FieldStart
//! ```
//!
//! A carriage return ends a record and moves to `RecordEnd`, which swallows
//! one following line feed so `\r\n` counts as a single break.

use std::str::Chars;

use crate::error::CsvError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    FieldStart,
    Unquoted,
    Quoted,
    QuoteInQuoted,
    RecordEnd,
}

/// Field text together with whether it was written in quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RawField {
    pub text: String,
    pub quoted: bool,
}

/// Fields of one logical record and the line on which it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RawRecord {
    pub line: usize,
    pub fields: Vec<RawField>,
}

impl RawRecord {
    /// A physical line holding nothing but unquoted whitespace.
    pub(super) fn is_blank(&self) -> bool {
        match self.fields.as_slice() {
            [only] => !only.quoted && only.text.trim().is_empty(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Position {
    line: usize,
    column: usize,
}

/// Iterator over the raw records of a CSV document.
///
/// Yields at most one error, after which it is exhausted.
pub(super) struct RecordReader<'a> {
    chars: Chars<'a>,
    delimiter: char,
    state: State,
    field: String,
    quoted: bool,
    fields: Vec<RawField>,
    record_line: Option<usize>,
    quote_opened: Position,
    line: usize,
    column: usize,
    after_cr: bool,
    finished: bool,
}

impl<'a> RecordReader<'a> {
    pub(super) fn new(input: &'a str, delimiter: char) -> Self {
        Self {
            chars: input.chars(),
            delimiter,
            state: State::FieldStart,
            field: String::new(),
            quoted: false,
            fields: Vec::new(),
            record_line: None,
            quote_opened: Position { line: 1, column: 1 },
            line: 1,
            column: 0,
            after_cr: false,
            finished: false,
        }
    }

    fn advance_position(&mut self, ch: char) -> Position {
        let position = Position {
            line: self.line,
            column: self.column + 1,
        };
        match ch {
            '\r' => {
                self.line += 1;
                self.column = 0;
                self.after_cr = true;
            }
            '\n' => {
                if !self.after_cr {
                    self.line += 1;
                }
                self.column = 0;
                self.after_cr = false;
            }
            _ => {
                self.column += 1;
                self.after_cr = false;
            }
        }
        position
    }

    fn finish_field(&mut self) {
        self.fields.push(RawField {
            text: std::mem::take(&mut self.field),
            quoted: std::mem::replace(&mut self.quoted, false),
        });
    }

    fn finish_record(&mut self) -> RawRecord {
        self.finish_field();
        RawRecord {
            line: self.record_line.take().unwrap_or(self.line),
            fields: std::mem::take(&mut self.fields),
        }
    }

    /// Ends the current record on a line break, remembering whether a
    /// following line feed must be swallowed.
    fn break_record(&mut self, ch: char) -> RawRecord {
        self.state = if ch == '\r' {
            State::RecordEnd
        } else {
            State::FieldStart
        };
        self.finish_record()
    }

    /// Feed one character, returning a record when it completes one.
    fn step(&mut self, ch: char, position: Position) -> Result<Option<RawRecord>, CsvError> {
        if self.state == State::RecordEnd {
            self.state = State::FieldStart;
            if ch == '\n' {
                return Ok(None);
            }
        }
        self.record_line.get_or_insert(position.line);

        match self.state {
            State::FieldStart | State::RecordEnd => match ch {
                '"' => {
                    self.quoted = true;
                    self.quote_opened = position;
                    self.state = State::Quoted;
                }
                c if c == self.delimiter => self.finish_field(),
                '\r' | '\n' => return Ok(Some(self.break_record(ch))),
                c => {
                    self.field.push(c);
                    self.state = State::Unquoted;
                }
            },
            State::Unquoted => match ch {
                c if c == self.delimiter => {
                    self.finish_field();
                    self.state = State::FieldStart;
                }
                '\r' | '\n' => return Ok(Some(self.break_record(ch))),
                c => self.field.push(c),
            },
            State::Quoted => match ch {
                '"' => self.state = State::QuoteInQuoted,
                c => self.field.push(c),
            },
            State::QuoteInQuoted => match ch {
                '"' => {
                    self.field.push('"');
                    self.state = State::Quoted;
                }
                c if c == self.delimiter => {
                    self.finish_field();
                    self.state = State::FieldStart;
                }
                '\r' | '\n' => return Ok(Some(self.break_record(ch))),
                found => {
                    return Err(CsvError::TrailingCharacter {
                        line: position.line,
                        column: position.column,
                        found,
                    });
                }
            },
        }
        Ok(None)
    }

    /// Flush whatever the input left open when it ran out.
    fn finish_input(&mut self) -> Result<Option<RawRecord>, CsvError> {
        match self.state {
            State::Quoted => Err(CsvError::UnterminatedQuote {
                line: self.quote_opened.line,
                column: self.quote_opened.column,
            }),
            State::Unquoted | State::QuoteInQuoted => Ok(Some(self.finish_record())),
            State::FieldStart if !self.fields.is_empty() => Ok(Some(self.finish_record())),
            State::FieldStart | State::RecordEnd => Ok(None),
        }
    }
}

impl Iterator for RecordReader<'_> {
    type Item = Result<RawRecord, CsvError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        while let Some(ch) = self.chars.next() {
            let position = self.advance_position(ch);
            match self.step(ch, position) {
                Ok(None) => {}
                Ok(Some(record)) => return Some(Ok(record)),
                Err(err) => {
                    self.finished = true;
                    return Some(Err(err));
                }
            }
        }
        self.finished = true;
        self.finish_input().transpose()
    }
}
