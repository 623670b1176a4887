//! Typst writer — emits a self-contained `.typ` source for the external
//! compiler. The design options become `#set` rules; content text is escaped
//! and inline Markdown emphasis is converted to Typst markup.

use std::fmt::Write;

use crate::assemble::{Connection, Document, SectionBody};
use crate::models::design::Design;

/// Typst source builder over a single reused buffer.
pub struct TypstRenderer {
    buffer: String,
}

impl TypstRenderer {
    pub fn new() -> Self {
        TypstRenderer {
            buffer: String::with_capacity(8192),
        }
    }

    /// Renders the whole document to Typst source.
    pub fn render(&mut self, document: &Document, design: &Design) -> String {
        self.buffer.clear();

        // Writing to a String is infallible, so these cannot fail.
        self.write_preamble(document, design).expect("write to String");
        self.write_header(document, design).expect("write to String");
        self.write_sections(document, design).expect("write to String");

        std::mem::take(&mut self.buffer)
    }

    fn write_preamble(&mut self, document: &Document, design: &Design) -> std::fmt::Result {
        let name = &document.name;
        writeln!(self.buffer, "// {name}'s CV")?;
        writeln!(self.buffer)?;
        writeln!(
            self.buffer,
            "#import \"@preview/fontawesome:0.5.0\": fa-icon"
        )?;
        writeln!(self.buffer)?;
        writeln!(
            self.buffer,
            "#set document(author: {}, title: {})",
            str_literal(name),
            str_literal(&format!("{name}'s CV"))
        )?;

        let page = &design.page;
        writeln!(self.buffer, "#set page(")?;
        writeln!(self.buffer, "  paper: {},", str_literal(&page.paper))?;
        writeln!(
            self.buffer,
            "  margin: (top: {}, bottom: {}, left: {}, right: {}),",
            page.top_margin, page.bottom_margin, page.left_margin, page.right_margin
        )?;
        if page.show_page_numbers {
            writeln!(
                self.buffer,
                "  footer: context align(center, text(size: 8pt, counter(page).display())),"
            )?;
        }
        writeln!(self.buffer, ")")?;

        let typography = &design.typography;
        writeln!(
            self.buffer,
            "#set text(font: {}, size: {}, fill: rgb(\"{}\"))",
            str_literal(typography.font_family.typst_name()),
            typography.font_size,
            design.colors.text
        )?;
        writeln!(
            self.buffer,
            "#set par(leading: {}, justify: false)",
            typography.leading
        )?;
        writeln!(
            self.buffer,
            "#show link: set text(fill: rgb(\"{}\"))",
            design.colors.links
        )?;
        writeln!(self.buffer)?;

        // Section title: accent-colored upper-case heading over a rule.
        writeln!(self.buffer, "#let section-title(title) = {{")?;
        writeln!(self.buffer, "  v({})", design.spacing.section_spacing)?;
        writeln!(
            self.buffer,
            "  text(size: 12pt, weight: \"bold\", fill: rgb(\"{}\"), upper(title))",
            design.colors.accent
        )?;
        writeln!(self.buffer, "  v(-0.7em)")?;
        writeln!(
            self.buffer,
            "  line(length: 100%, stroke: 0.5pt + rgb(\"{}\"))",
            design.colors.accent
        )?;
        writeln!(self.buffer, "}}")?;
        writeln!(self.buffer)?;

        // Two-column entry row: titles on the left, dates on the right.
        writeln!(self.buffer, "#let entry-row(left-part, right-part) = grid(")?;
        writeln!(self.buffer, "  columns: (1fr, auto),")?;
        writeln!(self.buffer, "  column-gutter: 1em,")?;
        writeln!(self.buffer, "  left-part,")?;
        writeln!(self.buffer, "  align(right, right-part),")?;
        writeln!(self.buffer, ")")?;
        writeln!(self.buffer)
    }

    fn write_header(&mut self, document: &Document, design: &Design) -> std::fmt::Result {
        writeln!(self.buffer, "#align(center)[")?;
        writeln!(
            self.buffer,
            "  #text(size: {}, weight: \"bold\")[{}]",
            design.typography.name_font_size,
            escape_typst(&document.name)
        )?;
        if let Some(headline) = &document.headline {
            writeln!(self.buffer)?;
            writeln!(
                self.buffer,
                "  #text(size: 11pt)[{}]",
                escape_typst(headline)
            )?;
        }
        if !document.connections.is_empty() {
            let line = document
                .connections
                .iter()
                .map(format_connection)
                .collect::<Vec<_>>()
                .join(" #h(0.5em) ");
            writeln!(self.buffer)?;
            writeln!(self.buffer, "  {line}")?;
        }
        if let Some(note) = &document.last_updated {
            writeln!(self.buffer)?;
            writeln!(
                self.buffer,
                "  #text(size: 8pt, style: \"italic\")[{}]",
                escape_typst(note)
            )?;
        }
        writeln!(self.buffer, "]")?;
        writeln!(self.buffer)
    }

    fn write_sections(&mut self, document: &Document, design: &Design) -> std::fmt::Result {
        for section in &document.sections {
            if section.body.is_empty() {
                continue;
            }
            writeln!(
                self.buffer,
                "#section-title({})",
                str_literal(&section.title)
            )?;
            match &section.body {
                SectionBody::Summary(text) => {
                    writeln!(self.buffer, "{}", markdown_to_typst(text))?;
                    writeln!(self.buffer)?;
                }
                SectionBody::Experience(blocks) => {
                    for block in blocks {
                        let mut right = block.date_range.clone();
                        if let Some(span) = &block.time_span {
                            right.push_str(&format!(" ({span})"));
                        }
                        writeln!(
                            self.buffer,
                            "#entry-row([#strong[{}] — {}], [{}])",
                            escape_typst(&block.title),
                            escape_typst(&block.organization),
                            escape_typst(&right)
                        )?;
                        if let Some(location) = &block.location {
                            writeln!(
                                self.buffer,
                                "#text(style: \"italic\")[{}]",
                                escape_typst(location)
                            )?;
                        }
                        if let Some(summary) = &block.summary {
                            writeln!(self.buffer, "{}", markdown_to_typst(summary))?;
                        }
                        if !block.highlights.is_empty() {
                            writeln!(
                                self.buffer,
                                "#list(indent: {},",
                                design.spacing.highlight_indent
                            )?;
                            for highlight in &block.highlights {
                                writeln!(self.buffer, "  [{}],", markdown_to_typst(highlight))?;
                            }
                            writeln!(self.buffer, ")")?;
                        }
                        writeln!(self.buffer, "#v({})", design.spacing.entry_spacing)?;
                        writeln!(self.buffer)?;
                    }
                }
                SectionBody::Skills(lines) => {
                    writeln!(self.buffer, "#list(")?;
                    for line in lines {
                        let skills = line
                            .skills
                            .iter()
                            .map(|s| markdown_to_typst(s))
                            .collect::<Vec<_>>()
                            .join(", ");
                        writeln!(
                            self.buffer,
                            "  [#strong[{}]: {}],",
                            escape_typst(&line.category),
                            skills
                        )?;
                    }
                    writeln!(self.buffer, ")")?;
                    writeln!(self.buffer)?;
                }
                SectionBody::Education(blocks) => {
                    for block in blocks {
                        writeln!(
                            self.buffer,
                            "#entry-row([#strong[{}] — {}], [{}])",
                            escape_typst(&block.degree),
                            escape_typst(&block.institution),
                            escape_typst(&block.date_range)
                        )?;
                        if let Some(location) = &block.location {
                            writeln!(
                                self.buffer,
                                "#text(style: \"italic\")[{}]",
                                escape_typst(location)
                            )?;
                        }
                        writeln!(self.buffer, "#v({})", design.spacing.entry_spacing)?;
                        writeln!(self.buffer)?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for TypstRenderer {
    fn default() -> Self {
        TypstRenderer::new()
    }
}

fn format_connection(connection: &Connection) -> String {
    let body = format!(
        "#fa-icon(\"{}\") {}",
        connection.icon,
        escape_typst(&connection.body)
    );
    match &connection.url {
        Some(url) => format!("#link({})[#box[{body}]]", str_literal(url)),
        None => format!("#box[{body}]"),
    }
}

/// Quotes a string for a Typst string literal position.
fn str_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Escapes Typst-significant characters in markup position. A backslash
/// before any of these produces the literal character.
pub fn escape_typst(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        push_escaped(&mut out, c);
    }
    out
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '\\' | '[' | ']' | '{' | '}' | '#' | '$' | '@' | '%' | '~' | '_' | '*' | '"' | '<'
        | '>' | '/' => {
            out.push('\\');
            out.push(c);
        }
        _ => out.push(c),
    }
}

/// Converts inline Markdown emphasis to Typst markup, escaping everything
/// else: `**bold**` → `#strong[...]`, `*italic*` → `#emph[...]`, `` `code` ``
/// → raw text, `[text](url)` → `#link(...)[...]`. Unterminated markers are
/// treated as literal text.
pub fn markdown_to_typst(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut rest = text;

    while !rest.is_empty() {
        if let Some(inner) = rest.strip_prefix("**") {
            // A zero-length span ("****", "** b") is not emphasis; fall
            // through and render the markers literally.
            if let Some(end) = inner.find("**").filter(|end| *end > 0) {
                out.push_str("#strong[");
                out.push_str(&escape_typst(&inner[..end]));
                out.push(']');
                rest = &inner[end + 2..];
                continue;
            }
        }
        if let Some(inner) = rest.strip_prefix('*') {
            if let Some(end) = inner.find('*').filter(|end| *end > 0) {
                out.push_str("#emph[");
                out.push_str(&escape_typst(&inner[..end]));
                out.push(']');
                rest = &inner[end + 1..];
                continue;
            }
        }
        if let Some(inner) = rest.strip_prefix('`') {
            if let Some(end) = inner.find('`') {
                // Raw text keeps its content unescaped, as in Markdown.
                out.push('`');
                out.push_str(&inner[..end]);
                out.push('`');
                rest = &inner[end + 1..];
                continue;
            }
        }
        if let Some(inner) = rest.strip_prefix('[') {
            if let Some(close) = inner.find("](") {
                let after = &inner[close + 2..];
                if let Some(end) = after.find(')') {
                    out.push_str("#link(");
                    out.push_str(&str_literal(&after[..end]));
                    out.push_str(")[");
                    out.push_str(&escape_typst(&inner[..close]));
                    out.push(']');
                    rest = &after[end + 1..];
                    continue;
                }
            }
        }
        let mut chars = rest.chars();
        match chars.next() {
            Some(c) => {
                push_escaped(&mut out, c);
                rest = chars.as_str();
            }
            None => break,
        }
    }
    out
}
