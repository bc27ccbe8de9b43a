//! Output sinks for rendered tables.
//!
//! A table writes through the [`OutputSink`] capability: text carrying
//! inline markup goes to [`OutputSink::write_styled`], which renders the
//! markup (or drops it), and export formats go to
//! [`OutputSink::write_plain`] verbatim. [`Console`] is the sink for any
//! [`Write`] implementation.

use std::io::{self, Write};

use crate::markup::{self, Token};
use crate::style::{Style, StyleStack};
use crate::terminal;

/// Destination for rendered table output.
pub trait OutputSink {
    /// Write text carrying inline markup.
    fn write_styled(&mut self, text: &str) -> io::Result<()>;

    /// Write text as is.
    fn write_plain(&mut self, text: &str) -> io::Result<()>;

    /// Remove markup from text.
    fn strip(&self, text: &str) -> String {
        markup::strip(text)
    }

    /// Display width of the widest line of marked-up text.
    fn measure(&self, text: &str) -> usize {
        markup::measure(text)
    }
}

impl<T: OutputSink + ?Sized> OutputSink for &mut T {
    fn write_styled(&mut self, text: &str) -> io::Result<()> {
        (**self).write_styled(text)
    }

    fn write_plain(&mut self, text: &str) -> io::Result<()> {
        (**self).write_plain(text)
    }

    fn strip(&self, text: &str) -> String {
        (**self).strip(text)
    }

    fn measure(&self, text: &str) -> usize {
        (**self).measure(text)
    }
}

/// Markup-aware writer.
///
/// With color enabled, styled runs are written between ANSI SGR codes and
/// reset before every newline. Without it, markup is stripped.
#[derive(Debug)]
pub struct Console<W: Write> {
    writer: W,
    color: bool,
}

impl Console<io::Stdout> {
    /// Console on stdout, with color when stdout is a terminal and
    /// `NO_COLOR` is unset.
    #[must_use]
    pub fn stdout() -> Self {
        Self {
            writer: io::stdout(),
            color: terminal::color_enabled(),
        }
    }
}

impl<W: Write> Console<W> {
    /// Console on any writer, without color.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            color: false,
        }
    }

    /// Enable or disable ANSI styling.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Whether ANSI styling is enabled.
    #[must_use]
    pub fn is_color_enabled(&self) -> bool {
        self.color
    }

    /// Borrow the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Unwrap the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_run(&mut self, text: &str, style: &Style) -> io::Result<()> {
        let (prefix, suffix) = style.render_ansi();
        if prefix.is_empty() {
            return self.writer.write_all(text.as_bytes());
        }
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.writer.write_all(b"\n")?;
            }
            if !line.is_empty() {
                write!(self.writer, "{prefix}{line}{suffix}")?;
            }
        }
        Ok(())
    }
}

impl<W: Write> OutputSink for Console<W> {
    fn write_styled(&mut self, text: &str) -> io::Result<()> {
        if !self.color {
            let plain = markup::strip(text);
            self.writer.write_all(plain.as_bytes())?;
            return self.writer.flush();
        }

        let mut stack = StyleStack::new();
        for element in markup::tokenize(text) {
            match element.token {
                Token::Text(run) => self.write_run(run, &stack.current())?,
                Token::Escape => self.write_run("<", &stack.current())?,
                Token::Open(name) => stack.push(name, Style::from_tag(name).unwrap_or_default()),
                Token::Close(name) => stack.pop(name),
            }
        }
        self.writer.flush()
    }

    fn write_plain(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()
    }
}
