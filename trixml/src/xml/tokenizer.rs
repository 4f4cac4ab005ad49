//! Parse events produced from quick-xml's streaming reader.

use std::collections::VecDeque;
use std::io::BufRead;

use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesRef, BytesStart, Event};
use quick_xml::Reader;

use super::is_valid_name;
use crate::node::Attributes;

/// A single event in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEvent {
    /// An element was opened. Self-closing tags produce `Open` then `Close`.
    Open {
        /// Tag name, prefix included.
        name: String,
        /// Unescaped attribute values.
        attributes: Attributes,
    },
    /// The innermost open element was closed.
    Close,
    /// A run of character data with entity and character references resolved.
    Text(String),
    /// The contents of a CDATA section.
    CData(String),
    /// The contents of a comment.
    Comment(String),
    /// The input is malformed. No events follow an error.
    Error(String),
}

/// Strict scanner turning XML input into [`ParseEvent`]s.
///
/// Adjacent text and entity references are merged into one `Text` event so
/// that consumers see each character run whole.
pub struct Tokenizer<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    /// Text accumulated since the last markup event.
    pending_text: Option<String>,
    queue: VecDeque<ParseEvent>,
    /// Number of currently open elements.
    depth: usize,
    finished: bool,
}

impl<'a> Tokenizer<&'a [u8]> {
    /// Creates a tokenizer over a string.
    pub fn from_str(xml: &'a str) -> Self {
        Self::new(Reader::from_str(xml))
    }
}

impl<R: BufRead> Tokenizer<R> {
    /// Creates a tokenizer over any buffered reader.
    pub fn from_reader(reader: R) -> Self {
        Self::new(Reader::from_reader(reader))
    }

    fn new(mut reader: Reader<R>) -> Self {
        // Whitespace filtering belongs to the tree builder
        reader.config_mut().trim_text(false);
        reader.config_mut().check_end_names = true;
        Tokenizer {
            reader,
            buf: Vec::new(),
            pending_text: None,
            queue: VecDeque::new(),
            depth: 0,
            finished: false,
        }
    }

    /// Queues character data. Only whitespace may appear outside the root.
    fn push_text(&mut self, text: &str) -> Result<(), String> {
        if self.depth == 0 && !text.trim().is_empty() {
            return Err("text outside root element".to_string());
        }
        self.pending_text
            .get_or_insert_with(String::new)
            .push_str(text);
        Ok(())
    }

    fn flush_text(&mut self) {
        if let Some(text) = self.pending_text.take() {
            self.queue.push_back(ParseEvent::Text(text));
        }
    }

    fn fail(&mut self, message: String) {
        self.pending_text = None;
        self.queue.push_back(ParseEvent::Error(message));
        self.finished = true;
    }

    /// Reads one quick-xml event and queues the resulting parse events.
    fn advance(&mut self) {
        let mut buf = std::mem::take(&mut self.buf);
        buf.clear();

        let outcome = match self.reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => self.open_tag(e).map(|open| {
                self.flush_text();
                self.queue.push_back(open);
                self.depth += 1;
            }),
            Ok(Event::Empty(ref e)) => self.open_tag(e).map(|open| {
                self.flush_text();
                self.queue.push_back(open);
                self.queue.push_back(ParseEvent::Close);
            }),
            Ok(Event::End(_)) => {
                if self.depth == 0 {
                    Err("unexpected close tag".to_string())
                } else {
                    self.flush_text();
                    self.queue.push_back(ParseEvent::Close);
                    self.depth -= 1;
                    Ok(())
                }
            }
            Ok(Event::Text(e)) => std::str::from_utf8(e.as_ref())
                .map_err(|e| e.to_string())
                .and_then(|raw| unescape(raw).map_err(|e| e.to_string()))
                .and_then(|text| self.push_text(&text)),
            Ok(Event::GeneralRef(e)) => {
                resolve_reference(&e).and_then(|resolved| self.push_text(&resolved))
            }
            Ok(Event::CData(e)) => std::str::from_utf8(e.as_ref())
                .map_err(|e| e.to_string())
                .map(|text| {
                    self.flush_text();
                    self.queue.push_back(ParseEvent::CData(text.to_string()));
                }),
            Ok(Event::Comment(e)) => {
                self.flush_text();
                let text = String::from_utf8_lossy(e.as_ref()).to_string();
                self.queue.push_back(ParseEvent::Comment(text));
                Ok(())
            }
            Ok(Event::Decl(_)) | Ok(Event::PI(_)) | Ok(Event::DocType(_)) => Ok(()),
            Ok(Event::Eof) => {
                if self.depth > 0 {
                    Err(format!("unclosed element at end of input ({} open)", self.depth))
                } else {
                    self.flush_text();
                    self.finished = true;
                    Ok(())
                }
            }
            Err(e) => Err(e.to_string()),
        };

        self.buf = buf;
        if let Err(message) = outcome {
            let position = self.reader.buffer_position();
            self.fail(format!("{} at position {}", message, position));
        }
    }

    /// Builds an `Open` event from a start tag.
    fn open_tag(&self, e: &BytesStart) -> Result<ParseEvent, String> {
        let name = self
            .reader
            .decoder()
            .decode(e.name().as_ref())
            .map_err(|e| e.to_string())?
            .to_string();
        if !is_valid_name(&name) {
            return Err(format!("invalid element name {:?}", name));
        }

        let mut attributes = Attributes::new();
        for attr_result in e.attributes() {
            let attr = attr_result.map_err(|e| format!("attribute error: {}", e))?;
            let key = self
                .reader
                .decoder()
                .decode(attr.key.as_ref())
                .map_err(|e| e.to_string())?
                .to_string();
            if !is_valid_name(&key) {
                return Err(format!("invalid attribute name {:?}", key));
            }
            let value = attr
                .unescape_value()
                .map_err(|e| e.to_string())?
                .to_string();
            attributes.insert(key, value);
        }

        Ok(ParseEvent::Open { name, attributes })
    }
}

/// Resolves `&name;` and `&#N;` references. Only the predefined XML entities
/// are known.
fn resolve_reference(e: &BytesRef) -> Result<String, String> {
    if let Some(ch) = e.resolve_char_ref().map_err(|e| e.to_string())? {
        return Ok(ch.to_string());
    }
    let name = e.decode().map_err(|e| e.to_string())?;
    resolve_predefined_entity(&name)
        .map(str::to_string)
        .ok_or_else(|| format!("unknown entity &{};", name))
}

impl<R: BufRead> Iterator for Tokenizer<R> {
    type Item = ParseEvent;

    fn next(&mut self) -> Option<ParseEvent> {
        loop {
            if let Some(event) = self.queue.pop_front() {
                return Some(event);
            }
            if self.finished {
                return None;
            }
            self.advance();
        }
    }
}
