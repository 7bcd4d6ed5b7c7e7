//! Source documents and offset-to-position translation.

use thiserror::Error;

/// A byte offset could not be translated to a line and column.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("offset {offset} is outside the document (length {len})")]
pub struct TranslateError {
    /// The offending offset.
    pub offset: usize,
    /// Length of the document in bytes.
    pub len: usize,
}

/// Precomputed line starts for a document.
///
/// Lines are separated by a single configurable delimiter byte. Columns count
/// characters, not bytes, and do not expand tabs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Offsets of every delimiter byte, ascending.
    delimiters: Vec<usize>,
    len: usize,
}

impl LineIndex {
    /// Indexes `text` using `delimiter` as the line separator.
    #[must_use]
    pub fn new(text: &str, delimiter: u8) -> Self {
        let delimiters = text
            .bytes()
            .enumerate()
            .filter_map(|(i, b)| (b == delimiter).then_some(i))
            .collect();
        Self {
            delimiters,
            len: text.len(),
        }
    }

    /// Translates a byte offset into a 1-based `(line, column)` pair.
    ///
    /// `offset == len` is valid and denotes the end of the document.
    ///
    /// # Errors
    ///
    /// Returns an error if `offset` is past the end of the document.
    pub fn translate(&self, text: &str, offset: usize) -> Result<(usize, usize), TranslateError> {
        if offset > self.len || text.len() != self.len {
            return Err(TranslateError {
                offset,
                len: self.len,
            });
        }

        let before = self.delimiters.partition_point(|&d| d < offset);
        let line_start = before
            .checked_sub(1)
            .map_or(0, |i| self.delimiters[i] + 1);
        let column = 1 + text.as_bytes()[line_start..offset]
            .iter()
            .filter(|&&b| !is_utf8_continuation(b))
            .count();

        Ok((before + 1, column))
    }

    /// Returns the number of lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.delimiters.len() + 1
    }
}

const fn is_utf8_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// A document being linted: its text, line delimiter and line index.
#[derive(Debug, Clone)]
pub struct SourceText<'a> {
    text: &'a str,
    delimiter: u8,
    index: LineIndex,
}

impl<'a> SourceText<'a> {
    /// Wraps `text`, splitting lines on `delimiter`.
    #[must_use]
    pub fn new(text: &'a str, delimiter: u8) -> Self {
        Self {
            text,
            delimiter,
            index: LineIndex::new(text, delimiter),
        }
    }

    /// Returns the document text.
    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        self.text
    }

    /// Returns the document bytes.
    #[must_use]
    pub const fn bytes(&self) -> &'a [u8] {
        self.text.as_bytes()
    }

    /// Returns the document length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns true if the document is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the line delimiter byte.
    #[must_use]
    pub const fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Returns the line index.
    #[must_use]
    pub const fn line_index(&self) -> &LineIndex {
        &self.index
    }

    /// Translates a byte offset into a 1-based `(line, column)` pair.
    ///
    /// # Errors
    ///
    /// Returns an error if `offset` is past the end of the document.
    pub fn translate(&self, offset: usize) -> Result<(usize, usize), TranslateError> {
        self.index.translate(self.text, offset)
    }
}
