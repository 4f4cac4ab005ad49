//! XML printer that writes builder trees as text.

use std::io::Write;

use super::builder::XmlBuilder;

/// Options for XML output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Whether to put each element on its own indented line.
    pub pretty_print: bool,
    /// Indentation unit used when pretty printing.
    pub indent: String,
    /// Line separator used when pretty printing.
    pub newline: String,
    /// Whether to start with an XML declaration.
    pub declaration: bool,
    /// Whether elements without content are written as `<name/>`.
    pub self_close_empty: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        SerializeOptions {
            pretty_print: false,
            indent: "  ".to_string(),
            newline: "\n".to_string(),
            declaration: true,
            self_close_empty: true,
        }
    }
}

impl SerializeOptions {
    /// Enables pretty printing.
    pub fn pretty(mut self) -> Self {
        self.pretty_print = true;
        self
    }

    /// Sets the indentation unit.
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Sets the line separator.
    pub fn with_newline(mut self, newline: impl Into<String>) -> Self {
        self.newline = newline.into();
        self
    }

    /// Omits the XML declaration.
    pub fn headless(mut self) -> Self {
        self.declaration = false;
        self
    }

    /// Writes empty elements as `<name></name>`.
    pub fn expand_empty(mut self) -> Self {
        self.self_close_empty = false;
        self
    }
}

/// XML printer for [`XmlBuilder`] trees.
pub struct XmlPrinter<W: Write> {
    writer: W,
    options: SerializeOptions,
    /// Whether anything has been written yet (no separator before the first line)
    started: bool,
    /// Set while inside mixed content, where added whitespace would change the text.
    inline: bool,
}

impl<W: Write> XmlPrinter<W> {
    /// Creates a new XML printer.
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, SerializeOptions::default())
    }

    /// Creates a new XML printer with the given options.
    pub fn with_options(writer: W, options: SerializeOptions) -> Self {
        XmlPrinter {
            writer,
            options,
            started: false,
            inline: false,
        }
    }

    /// Prints a complete document.
    pub fn print(&mut self, root: &XmlBuilder) -> std::io::Result<()> {
        if self.options.declaration {
            self.start_line(0)?;
            write!(self.writer, "<?xml version=\"1.0\"?>")?;
        }
        self.print_element(root, 0)?;
        self.writer.flush()
    }

    fn print_element(&mut self, element: &XmlBuilder, level: usize) -> std::io::Result<()> {
        let name = element.name();
        self.start_line(level)?;

        let mut tag = String::new();
        tag.push('<');
        tag.push_str(name);
        for (key, value) in element.attribute_map() {
            tag.push(' ');
            tag.push_str(key);
            tag.push_str("=\"");
            tag.push_str(&to_entities(value));
            tag.push('"');
        }
        write!(self.writer, "{}", tag)?;

        let text = element.text_content();
        let children = element.children();

        if text.is_empty() && children.is_empty() {
            if self.options.self_close_empty {
                return write!(self.writer, "/>");
            }
            return write!(self.writer, "></{}>", name);
        }
        write!(self.writer, ">")?;

        // Text-only elements stay on one line
        if children.is_empty() {
            return write!(self.writer, "{}</{}>", to_entities(text), name);
        }

        // Mixed content: no added whitespace until this element closes
        let was_inline = self.inline;
        if !text.is_empty() {
            self.inline = true;
            write!(self.writer, "{}", to_entities(text))?;
        }
        for child in children {
            self.print_element(child, level + 1)?;
        }
        self.start_line(level)?;
        self.inline = was_inline;
        write!(self.writer, "</{}>", name)
    }

    /// Starts a new output line when pretty printing.
    fn start_line(&mut self, level: usize) -> std::io::Result<()> {
        if self.options.pretty_print && !self.inline {
            if self.started {
                write!(self.writer, "{}", self.options.newline)?;
            }
            write!(self.writer, "{}", self.options.indent.repeat(level))?;
        }
        self.started = true;
        Ok(())
    }
}

/// Converts special characters to XML entities.
fn to_entities(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '\'' => result.push_str("&apos;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}
