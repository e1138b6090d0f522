//! Tab-separated document source.
//!
//! One document per line. A line is trimmed first and skipped if nothing is
//! left; skipped lines do not consume an id. If the trimmed line contains a
//! tab, the text before the first tab is the name and the text between the
//! first and second tab is the body (both trimmed, later fields ignored).
//! Otherwise the document is named `Doc_<id>` and the whole line is its body.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use log::info;

use crate::document::Document;
use crate::error::Result;
use crate::index::DocId;

/// Reads [`Document`]s from a tab-separated source, assigning ids from 0.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
///
/// use skiff::document::TsvDocumentReader;
///
/// let source = Cursor::new("Batman Begins\tBruce Wayne returns\n\nuntitled text\n");
/// let documents: Vec<_> = TsvDocumentReader::new(source)
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// assert_eq!(documents.len(), 2);
/// assert_eq!(documents[0].name, "Batman Begins");
/// assert_eq!(documents[1].name, "Doc_1");
/// assert_eq!(documents[1].text, "untitled text");
/// ```
pub struct TsvDocumentReader<R> {
    lines: Lines<R>,
    next_id: DocId,
}

impl TsvDocumentReader<BufReader<File>> {
    /// Open a file as a document source.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("opening document source {}", path.display());
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> TsvDocumentReader<R> {
    /// Wrap a buffered reader.
    pub fn new(reader: R) -> Self {
        TsvDocumentReader {
            lines: reader.lines(),
            next_id: 0,
        }
    }

    /// Parse one trimmed, non-empty line into a document with id `id`.
    fn parse_line(id: DocId, line: &str) -> Document {
        let mut fields = line.split('\t');
        match (fields.next(), fields.next()) {
            (Some(name), Some(text)) => Document::new(id, name.trim(), text.trim()),
            _ => Document::new(id, format!("Doc_{id}"), line),
        }
    }
}

impl<R: BufRead> Iterator for TsvDocumentReader<R> {
    type Item = Result<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let document = Self::parse_line(self.next_id, line);
            self.next_id += 1;
            return Some(Ok(document));
        }
    }
}
