use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::CoverSheetError;
use crate::extraction::BlockSource;
use crate::model::{Block, Cell, Row};

const DOCUMENT_PART: &str = "word/document.xml";

/// A cover sheet loaded from a `.docx` package.
///
/// Only the main document part is kept. Blocks are parsed lazily from it on
/// every walk, so the document itself never changes.
#[derive(Debug, Clone)]
pub struct DocxDocument {
    name: String,
    xml: String,
}

impl DocxDocument {
    pub fn open(path: &Path) -> Result<Self, CoverSheetError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let file = File::open(path)?;
        Self::from_reader(name, file)
    }

    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> Result<Self, CoverSheetError> {
        Self::from_reader(name.into(), Cursor::new(bytes))
    }

    /// Wrap an already extracted `word/document.xml`.
    pub fn from_xml(name: impl Into<String>, xml: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            xml: xml.into(),
        }
    }

    fn from_reader<R: Read + Seek>(name: String, reader: R) -> Result<Self, CoverSheetError> {
        let mut archive = ZipArchive::new(reader)?;
        let mut xml = String::new();
        match archive.by_name(DOCUMENT_PART) {
            Ok(mut part) => {
                part.read_to_string(&mut xml)?;
            }
            Err(ZipError::FileNotFound) => {
                return Err(CoverSheetError::MissingPart {
                    document: name,
                    part: DOCUMENT_PART.into(),
                });
            }
            Err(e) => return Err(e.into()),
        }
        Ok(Self { name, xml })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Walk the body from the top.
    pub fn iter_blocks(&self) -> Blocks<'_> {
        Blocks {
            body: BodyReader {
                reader: Reader::from_str(&self.xml),
                document: &self.name,
            },
            phase: Phase::Prologue,
            wrappers: 0,
        }
    }
}

impl BlockSource for DocxDocument {
    fn name(&self) -> &str {
        &self.name
    }

    fn blocks(&self) -> Box<dyn Iterator<Item = Result<Block, CoverSheetError>> + '_> {
        Box::new(self.iter_blocks())
    }
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Prologue,
    Body,
    Finished,
}

/// Streaming iterator over the top-level blocks of `w:body`.
///
/// Content controls and custom XML wrapping whole paragraphs or tables are
/// looked through, so their blocks come out in place. An error ends the walk.
pub struct Blocks<'a> {
    body: BodyReader<'a>,
    phase: Phase,
    wrappers: usize,
}

impl Iterator for Blocks<'_> {
    type Item = Result<Block, CoverSheetError>;

    fn next(&mut self) -> Option<Self::Item> {
        if matches!(self.phase, Phase::Finished) {
            return None;
        }
        match self.advance() {
            Ok(Some(block)) => Some(Ok(block)),
            Ok(None) => {
                self.phase = Phase::Finished;
                None
            }
            Err(e) => {
                self.phase = Phase::Finished;
                Some(Err(e))
            }
        }
    }
}

impl Blocks<'_> {
    fn advance(&mut self) -> Result<Option<Block>, CoverSheetError> {
        loop {
            let event = self.body.reader.read_event()?;
            match self.phase {
                Phase::Prologue => match event {
                    Event::Start(e) if e.local_name().as_ref() == b"body" => {
                        self.phase = Phase::Body;
                    }
                    Event::Eof => return Ok(None),
                    _ => {}
                },
                Phase::Body => match event {
                    Event::Start(e) => match e.local_name().as_ref() {
                        b"p" => return self.body.paragraph().map(|t| Some(Block::paragraph(t))),
                        b"tbl" => return self.body.table().map(|rows| Some(Block::table(rows))),
                        name if is_block_wrapper(name) => self.wrappers += 1,
                        _ => self.body.skip()?,
                    },
                    Event::Empty(e) if e.local_name().as_ref() == b"p" => {
                        return Ok(Some(Block::paragraph("")));
                    }
                    Event::End(_) => {
                        // Closing w:body
                        if self.wrappers == 0 {
                            return Ok(None);
                        }
                        self.wrappers -= 1;
                    }
                    Event::Eof => {
                        return Err(self.body.malformed("document ended inside w:body"));
                    }
                    _ => {}
                },
                Phase::Finished => return Ok(None),
            }
        }
    }
}

/// Elements that only wrap block content: content controls and custom XML.
fn is_block_wrapper(name: &[u8]) -> bool {
    matches!(name, b"sdt" | b"sdtContent" | b"customXml")
}

/// Paragraph children whose text is not part of the paragraph's visible text
/// run sequence: properties (tab stop definitions), drawings and text boxes,
/// equations, deleted revisions.
fn is_hidden_run_content(name: &[u8]) -> bool {
    matches!(
        name,
        b"pPr"
            | b"rPr"
            | b"sdtPr"
            | b"sdtEndPr"
            | b"drawing"
            | b"pict"
            | b"object"
            | b"AlternateContent"
            | b"oMath"
            | b"oMathPara"
            | b"del"
            | b"moveFrom"
    )
}

struct BodyReader<'a> {
    reader: Reader<&'a [u8]>,
    document: &'a str,
}

impl BodyReader<'_> {
    fn malformed(&self, reason: &str) -> CoverSheetError {
        CoverSheetError::MalformedDocument {
            document: self.document.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Skip to the end of the element whose start tag was just read.
    fn skip(&mut self) -> Result<(), CoverSheetError> {
        let mut depth = 0usize;
        loop {
            match self.reader.read_event()? {
                Event::Start(_) => depth += 1,
                Event::End(_) => {
                    if depth == 0 {
                        return Ok(());
                    }
                    depth -= 1;
                }
                Event::Eof => return Err(self.malformed("unexpected end of document")),
                _ => {}
            }
        }
    }

    fn paragraph(&mut self) -> Result<String, CoverSheetError> {
        let mut text = String::new();
        let mut depth = 0usize;
        let mut in_text = false;
        loop {
            match self.reader.read_event()? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"t" => {
                        in_text = true;
                        depth += 1;
                    }
                    name if is_hidden_run_content(name) => self.skip()?,
                    _ => depth += 1,
                },
                Event::Empty(e) => match e.local_name().as_ref() {
                    b"tab" | b"ptab" => text.push('\t'),
                    b"br" | b"cr" => text.push('\n'),
                    b"noBreakHyphen" => text.push('-'),
                    _ => {}
                },
                Event::Text(t) if in_text => text.push_str(&t.unescape()?),
                Event::End(e) => {
                    if depth == 0 {
                        return Ok(text);
                    }
                    depth -= 1;
                    if e.local_name().as_ref() == b"t" {
                        in_text = false;
                    }
                }
                Event::Eof => return Err(self.malformed("document ended inside a paragraph")),
                _ => {}
            }
        }
    }

    fn table(&mut self) -> Result<Vec<Row>, CoverSheetError> {
        let mut rows = Vec::new();
        let mut wrappers = 0usize;
        loop {
            match self.reader.read_event()? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"tr" => rows.push(self.row()?),
                    name if is_block_wrapper(name) => wrappers += 1,
                    _ => self.skip()?,
                },
                Event::End(_) => {
                    if wrappers == 0 {
                        return Ok(rows);
                    }
                    wrappers -= 1;
                }
                Event::Eof => return Err(self.malformed("document ended inside a table")),
                _ => {}
            }
        }
    }

    fn row(&mut self) -> Result<Row, CoverSheetError> {
        let mut cells = Vec::new();
        let mut wrappers = 0usize;
        loop {
            match self.reader.read_event()? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"tc" => cells.push(self.cell()?),
                    name if is_block_wrapper(name) => wrappers += 1,
                    _ => self.skip()?,
                },
                Event::Empty(e) if e.local_name().as_ref() == b"tc" => {
                    cells.push(Cell::default());
                }
                Event::End(_) => {
                    if wrappers == 0 {
                        return Ok(Row { cells });
                    }
                    wrappers -= 1;
                }
                Event::Eof => return Err(self.malformed("document ended inside a table row")),
                _ => {}
            }
        }
    }

    /// Only the cell's own paragraphs; nested tables are skipped whole.
    fn cell(&mut self) -> Result<Cell, CoverSheetError> {
        let mut paragraphs = Vec::new();
        let mut wrappers = 0usize;
        loop {
            match self.reader.read_event()? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"p" => paragraphs.push(self.paragraph()?),
                    name if is_block_wrapper(name) => wrappers += 1,
                    _ => self.skip()?,
                },
                Event::Empty(e) if e.local_name().as_ref() == b"p" => {
                    paragraphs.push(String::new());
                }
                Event::End(_) => {
                    if wrappers == 0 {
                        return Ok(Cell { paragraphs });
                    }
                    wrappers -= 1;
                }
                Event::Eof => return Err(self.malformed("document ended inside a table cell")),
                _ => {}
            }
        }
    }
}
