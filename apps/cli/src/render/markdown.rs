//! Markdown writer — emits the assembled document as a plain prose CV.
//!
//! Content arrives pre-formatted from the assembler (dates, headline,
//! bolded keywords), so this layer is pure markup emission.

use std::fmt::Write;

use crate::assemble::{Connection, Document, SectionBody};

/// Markdown builder over a single reused buffer.
pub struct MarkdownRenderer {
    buffer: String,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        MarkdownRenderer {
            buffer: String::with_capacity(4096),
        }
    }

    /// Renders the whole document to a Markdown string.
    pub fn render(&mut self, document: &Document) -> String {
        self.buffer.clear();

        // Writing to a String is infallible, so these cannot fail.
        self.write_header(document).expect("write to String");
        self.write_sections(document).expect("write to String");

        std::mem::take(&mut self.buffer)
    }

    fn write_header(&mut self, document: &Document) -> std::fmt::Result {
        writeln!(self.buffer, "# {}", document.name)?;
        writeln!(self.buffer)?;

        if let Some(headline) = &document.headline {
            writeln!(self.buffer, "**{headline}**")?;
            writeln!(self.buffer)?;
        }

        if !document.connections.is_empty() {
            let line = document
                .connections
                .iter()
                .map(format_connection)
                .collect::<Vec<_>>()
                .join(" | ");
            writeln!(self.buffer, "{line}")?;
            writeln!(self.buffer)?;
        }

        if let Some(note) = &document.last_updated {
            writeln!(self.buffer, "*{note}*")?;
            writeln!(self.buffer)?;
        }
        Ok(())
    }

    fn write_sections(&mut self, document: &Document) -> std::fmt::Result {
        for section in &document.sections {
            if section.body.is_empty() {
                continue;
            }
            writeln!(self.buffer, "## {}", section.title)?;
            writeln!(self.buffer)?;
            match &section.body {
                SectionBody::Summary(text) => {
                    writeln!(self.buffer, "{text}")?;
                    writeln!(self.buffer)?;
                }
                SectionBody::Experience(blocks) => {
                    for block in blocks {
                        writeln!(self.buffer, "### {} — {}", block.title, block.organization)?;
                        writeln!(self.buffer)?;
                        self.write_meta_line(
                            &block.date_range,
                            block.time_span.as_deref(),
                            block.location.as_deref(),
                        )?;
                        if let Some(summary) = &block.summary {
                            writeln!(self.buffer, "{summary}")?;
                            writeln!(self.buffer)?;
                        }
                        if !block.highlights.is_empty() {
                            for highlight in &block.highlights {
                                writeln!(self.buffer, "- {highlight}")?;
                            }
                            writeln!(self.buffer)?;
                        }
                    }
                }
                SectionBody::Skills(lines) => {
                    for line in lines {
                        writeln!(
                            self.buffer,
                            "- **{}**: {}",
                            line.category,
                            line.skills.join(", ")
                        )?;
                    }
                    writeln!(self.buffer)?;
                }
                SectionBody::Education(blocks) => {
                    for block in blocks {
                        writeln!(
                            self.buffer,
                            "### {} — {}",
                            block.degree, block.institution
                        )?;
                        writeln!(self.buffer)?;
                        self.write_meta_line(&block.date_range, None, block.location.as_deref())?;
                    }
                }
            }
        }
        Ok(())
    }

    /// The "*2020 – present (2 years) · Austin, TX*" line under entry titles.
    fn write_meta_line(
        &mut self,
        date_range: &str,
        time_span: Option<&str>,
        location: Option<&str>,
    ) -> std::fmt::Result {
        write!(self.buffer, "*{date_range}")?;
        if let Some(span) = time_span {
            write!(self.buffer, " ({span})")?;
        }
        if let Some(location) = location {
            write!(self.buffer, " · {location}")?;
        }
        writeln!(self.buffer, "*")?;
        writeln!(self.buffer)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        MarkdownRenderer::new()
    }
}

fn format_connection(connection: &Connection) -> String {
    match &connection.url {
        Some(url) => format!("[{}]({url})", connection.body),
        None => connection.body.clone(),
    }
}
