//! Hierarchical indentation parser.
//!
//! Reads `ls -R` style text where every section starts with a label terminated by a
//! colon and continues with item lines until a blank line. Leading tabs express
//! nesting: a body line that itself ends in a colon opens a nested section one level
//! below the current one. The parser has no knowledge of what labels and items mean;
//! it drives a [`SectionHandler`] in document order.

use crate::error::{MsiError, Result};
use std::fmt::Display;
use std::io::Read;
use tracing::{debug, warn};

/// Outcome reported by [`SectionHandler::pop_levels`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelChange {
    /// Keep reading the current body at the lower level
    Processed,
    /// Stop reading the current body; the dedented line is read again as a label
    Ignored,
}

/// Consumer of parser events.
///
/// Returning an error from any callback aborts the whole parse.
pub trait SectionHandler {
    /// A label was found. `level` starts at 1 for a top-level section.
    fn add_section(&mut self, level: usize, label: &str) -> Result<()>;

    /// The indentation dropped to `level` open sections.
    fn pop_levels(&mut self, level: usize) -> Result<LevelChange>;

    /// An item line (text after the leading tabs) was found.
    fn add_item(&mut self, item: &str) -> Result<()>;
}

/// Colon-label parser bound to the name of the input it reads, for diagnostics.
#[derive(Debug, Clone)]
pub struct ColonParser {
    source_name: String,
}

impl ColonParser {
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
        }
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Parse `reader` to the end, invoking `handler` for every event.
    ///
    /// Each call starts from a fresh scanning state, so one parser (or two parsers
    /// with unrelated handlers) can be driven any number of times.
    pub fn parse<R, H>(&self, mut reader: R, handler: &mut H) -> Result<()>
    where
        R: Read,
        H: SectionHandler + ?Sized,
    {
        let mut input = Vec::new();
        reader.read_to_end(&mut input).map_err(|e| {
            MsiError::Resource(format!("Failed to read {}: {}", self.source_name, e))
        })?;

        Scan {
            source_name: &self.source_name,
            input: &input,
            pos: 0,
            line: 1,
        }
        .run(handler)
    }
}

enum BodyLine {
    Item(String),
    Label(String),
    Eof,
}

struct Scan<'a> {
    source_name: &'a str,
    input: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> Scan<'a> {
    fn run<H: SectionHandler + ?Sized>(&mut self, handler: &mut H) -> Result<()> {
        let mut level = 0usize;
        let mut pending: Option<String> = None;

        loop {
            let label = match pending.take() {
                Some(label) => label,
                None => match self.read_label()? {
                    Some(label) => label,
                    None => return Ok(()),
                },
            };
            level += 1;
            debug!(source = self.source_name, line = self.line, level, label = %label, "Section");
            handler.add_section(level, &label)?;
            self.finish_label_line()?;

            loop {
                match self.peek() {
                    None => return Ok(()),
                    Some(b'\n') => {
                        // Blank line: the section and everything it opened are closed.
                        self.bump();
                        if level > 0 {
                            handler.pop_levels(0)?;
                            level = 0;
                        }
                        break;
                    }
                    Some(_) => {}
                }

                let tabs = self.skip_tabs();
                if tabs < level {
                    let change = handler.pop_levels(tabs)?;
                    level = tabs;
                    if change == LevelChange::Ignored {
                        break;
                    }
                }

                match self.read_body_line()? {
                    BodyLine::Eof => return Ok(()),
                    BodyLine::Label(label) => {
                        pending = Some(label);
                        break;
                    }
                    BodyLine::Item(item) => {
                        if !item.trim().is_empty() {
                            handler.add_item(&item)?;
                        }
                    }
                }
            }
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn bump(&mut self) {
        if let Some(byte) = self.peek() {
            self.pos += 1;
            if byte == b'\n' {
                self.line += 1;
            }
        }
    }

    fn skip_tabs(&mut self) -> usize {
        let mut tabs = 0;
        while self.peek() == Some(b'\t') {
            self.bump();
            tabs += 1;
        }
        tabs
    }

    fn format_error(&self, message: impl Display) -> MsiError {
        MsiError::Format(format!("{}:{}: {}", self.source_name, self.line, message))
    }

    fn carriage_return(&self) -> MsiError {
        self.format_error("found a non-Unix newline character in the input stream")
    }

    fn text(&self, start: usize) -> Result<String> {
        String::from_utf8(self.input[start..self.pos].to_vec())
            .map_err(|_| self.format_error("input is not valid UTF-8"))
    }

    /// Read a label at a section start. Returns `None` at a clean end of input.
    fn read_label(&mut self) -> Result<Option<String>> {
        loop {
            while matches!(self.peek(), Some(b'\n') | Some(b'\t')) {
                self.bump();
            }

            let start = self.pos;
            loop {
                match self.peek() {
                    None => {
                        if self.input[start..].iter().all(|b| *b == b' ') {
                            return Ok(None);
                        }
                        return Err(self.format_error("unterminated label at end of input"));
                    }
                    Some(b':') => {
                        let label = self.text(start)?;
                        self.bump();
                        return Ok(Some(label));
                    }
                    Some(b'\r') => return Err(self.carriage_return()),
                    Some(b'\n') => {
                        if self.input[start..self.pos].iter().all(|b| *b == b' ') {
                            break;
                        }
                        return Err(self.format_error(format!(
                            "malformed label (missing ':'): {}",
                            self.text(start)?
                        )));
                    }
                    Some(_) => self.bump(),
                }
            }
        }
    }

    /// Consume the remainder of a label line up to and including its newline.
    fn finish_label_line(&mut self) -> Result<()> {
        loop {
            match self.peek() {
                None => return Ok(()),
                Some(b'\n') => {
                    self.bump();
                    return Ok(());
                }
                Some(b'\r') => return Err(self.carriage_return()),
                Some(b' ') | Some(b'\t') => self.bump(),
                Some(_) => return Err(self.format_error("unexpected text after ':' in label")),
            }
        }
    }

    fn read_body_line(&mut self) -> Result<BodyLine> {
        let start = self.pos;
        loop {
            match self.peek() {
                None => {
                    if start < self.pos {
                        warn!(
                            source = self.source_name,
                            line = self.line,
                            "Discarding unterminated last line"
                        );
                    }
                    return Ok(BodyLine::Eof);
                }
                Some(b'\r') => return Err(self.carriage_return()),
                Some(b'\n') => {
                    let item = self.text(start)?;
                    self.bump();
                    return Ok(BodyLine::Item(item));
                }
                Some(b':') => {
                    let label = self.text(start)?;
                    self.bump();
                    return Ok(BodyLine::Label(label));
                }
                Some(_) => self.bump(),
            }
        }
    }
}
