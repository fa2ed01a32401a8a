// file: src/importer/converter.rs
// description: converts a binary .docx package into an html fragment
// reference: https://docs.rs/quick-xml, https://docs.rs/zip

use crate::error::{EditorError, Result};
use crate::parser::escape_text;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;
use std::io::{Cursor, Read};
use tracing::debug;
use zip::ZipArchive;
use zip::result::ZipError;

const DOCUMENT_PART: &str = "word/document.xml";
const NUMBERING_PART: &str = "word/numbering.xml";

/// Turns DOCX bytes into an HTML string. The importer only ever sees the
/// HTML, so any converter can stand in here.
pub trait HtmlConverter: Send + Sync {
    fn convert(&self, bytes: &[u8]) -> Result<String>;
}

/// Reads the main document part directly.
///
/// Paragraph styles map to headings and quotes, numbered paragraphs are
/// grouped into flat lists, and empty paragraphs are dropped. Tables keep
/// only their cell text.
#[derive(Debug, Clone, Default)]
pub struct OoxmlHtmlConverter;

impl OoxmlHtmlConverter {
    pub fn new() -> Self {
        Self
    }
}

impl HtmlConverter for OoxmlHtmlConverter {
    fn convert(&self, bytes: &[u8]) -> Result<String> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(conversion_error)?;

        let document = read_part(&mut archive, DOCUMENT_PART)?.ok_or_else(|| {
            EditorError::ImportConversion(format!("package has no {}", DOCUMENT_PART))
        })?;
        let numbering = match read_part(&mut archive, NUMBERING_PART)? {
            Some(xml) => NumberingMap::parse(&xml)?,
            None => NumberingMap::default(),
        };

        let items = parse_body(&document)?;
        debug!("Read {} body items from {}", items.len(), DOCUMENT_PART);

        Ok(render_html(&items, &numbering))
    }
}

fn read_part(archive: &mut ZipArchive<Cursor<&[u8]>>, name: &str) -> Result<Option<String>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(conversion_error(e)),
    };

    let mut xml = String::new();
    file.read_to_string(&mut xml)
        .map_err(|e| EditorError::ImportConversion(format!("{}: {}", name, e)))?;
    Ok(Some(xml))
}

fn conversion_error(e: impl std::fmt::Display) -> EditorError {
    EditorError::ImportConversion(e.to_string())
}

fn attr_value(element: &BytesStart, name: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == name)
        .and_then(|attr| attr.unescape_value().ok().map(|value| value.into_owned()))
}

/// `<w:b/>` is on, `<w:b w:val="false"/>` is off.
fn toggle_on(element: &BytesStart) -> bool {
    !matches!(
        attr_value(element, b"val").as_deref(),
        Some("false" | "0" | "off" | "none")
    )
}

#[derive(Debug, Default)]
struct NumberingMap {
    num_to_abstract: HashMap<String, String>,
    formats: HashMap<(String, u32), String>,
}

impl NumberingMap {
    fn parse(xml: &str) -> Result<Self> {
        let mut map = Self::default();
        let mut reader = Reader::from_str(xml);
        let mut abstract_id: Option<String> = None;
        let mut level: Option<u32> = None;
        let mut num_id: Option<String> = None;

        loop {
            match reader.read_event().map_err(conversion_error)? {
                Event::Start(e) | Event::Empty(e) => match e.local_name().as_ref() {
                    b"abstractNum" => abstract_id = attr_value(&e, b"abstractNumId"),
                    b"lvl" => level = attr_value(&e, b"ilvl").and_then(|v| v.parse().ok()),
                    b"numFmt" => {
                        if let (Some(abstract_id), Some(level), Some(format)) =
                            (&abstract_id, level, attr_value(&e, b"val"))
                        {
                            map.formats.insert((abstract_id.clone(), level), format);
                        }
                    }
                    b"num" => num_id = attr_value(&e, b"numId"),
                    b"abstractNumId" => {
                        if let (Some(num_id), Some(target)) = (&num_id, attr_value(&e, b"val")) {
                            map.num_to_abstract.insert(num_id.clone(), target);
                        }
                    }
                    _ => {}
                },
                Event::End(e) => match e.local_name().as_ref() {
                    b"abstractNum" => abstract_id = None,
                    b"lvl" => level = None,
                    b"num" => num_id = None,
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(map)
    }

    /// Unknown definitions fall back to bullets.
    fn is_ordered(&self, num_id: &str, level: u32) -> bool {
        self.num_to_abstract
            .get(num_id)
            .and_then(|abstract_id| self.formats.get(&(abstract_id.clone(), level)))
            .is_some_and(|format| format != "bullet" && format != "none")
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
struct ParsedRun {
    text: String,
    bold: bool,
    italic: bool,
    underline: bool,
}

#[derive(Debug, Default, Clone, PartialEq)]
struct ParsedParagraph {
    style: Option<String>,
    num_id: Option<String>,
    level: u32,
    runs: Vec<ParsedRun>,
}

impl ParsedParagraph {
    fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    fn is_blank(&self) -> bool {
        self.runs.iter().all(|run| run.text.trim().is_empty())
    }

    /// `numId` 0 explicitly removes numbering.
    fn list_num_id(&self) -> Option<&str> {
        self.num_id.as_deref().filter(|id| *id != "0")
    }
}

#[derive(Debug, Clone, PartialEq)]
enum BodyItem {
    Paragraph(ParsedParagraph),
    Table(Vec<Vec<String>>),
}

#[derive(Debug, Default)]
struct BodyState {
    items: Vec<BodyItem>,
    paragraph: Option<ParsedParagraph>,
    run: Option<ParsedRun>,
    in_paragraph_props: bool,
    in_run_props: bool,
    in_text: bool,
    tables: Vec<Vec<Vec<String>>>,
}

impl BodyState {
    fn open(&mut self, element: &BytesStart, empty: bool) {
        match element.local_name().as_ref() {
            b"p" => {
                self.paragraph = Some(ParsedParagraph::default());
                if empty {
                    self.finish_paragraph();
                }
            }
            b"pPr" => self.in_paragraph_props = !empty,
            b"pStyle" if self.in_paragraph_props => {
                if let Some(paragraph) = self.paragraph.as_mut() {
                    paragraph.style = attr_value(element, b"val");
                }
            }
            b"numId" if self.in_paragraph_props => {
                if let Some(paragraph) = self.paragraph.as_mut() {
                    paragraph.num_id = attr_value(element, b"val");
                }
            }
            b"ilvl" if self.in_paragraph_props => {
                if let Some(paragraph) = self.paragraph.as_mut() {
                    paragraph.level = attr_value(element, b"val")
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(0);
                }
            }
            b"r" if !empty => self.run = Some(ParsedRun::default()),
            b"rPr" => self.in_run_props = !empty,
            name @ (b"b" | b"i" | b"u") if self.in_run_props => {
                if let Some(run) = self.run.as_mut() {
                    let on = toggle_on(element);
                    match name {
                        b"b" => run.bold = on,
                        b"i" => run.italic = on,
                        _ => run.underline = on,
                    }
                }
            }
            b"t" => self.in_text = !empty,
            b"br" | b"cr" => self.push_text("\n"),
            b"tab" if !self.in_paragraph_props => self.push_text("\t"),
            b"tbl" if !empty => self.tables.push(Vec::new()),
            b"tr" => {
                if let Some(table) = self.tables.last_mut() {
                    table.push(Vec::new());
                }
            }
            b"tc" => {
                if let Some(row) = self.tables.last_mut().and_then(|table| table.last_mut()) {
                    row.push(String::new());
                }
            }
            _ => {}
        }
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"p" => self.finish_paragraph(),
            b"pPr" => self.in_paragraph_props = false,
            b"r" => {
                if let (Some(run), Some(paragraph)) = (self.run.take(), self.paragraph.as_mut()) {
                    paragraph.runs.push(run);
                }
            }
            b"rPr" => self.in_run_props = false,
            b"t" => self.in_text = false,
            b"tbl" => {
                if let Some(table) = self.tables.pop() {
                    if self.tables.is_empty() {
                        self.items.push(BodyItem::Table(table));
                    } else {
                        // nested tables collapse into the enclosing cell
                        let text = table
                            .iter()
                            .flatten()
                            .map(String::as_str)
                            .collect::<Vec<_>>()
                            .join(" ");
                        self.append_to_cell(&text);
                    }
                }
            }
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(run) = self.run.as_mut() {
            run.text.push_str(text);
        }
    }

    fn finish_paragraph(&mut self) {
        let Some(paragraph) = self.paragraph.take() else {
            return;
        };

        if self.tables.is_empty() {
            self.items.push(BodyItem::Paragraph(paragraph));
        } else {
            self.append_to_cell(paragraph.text().trim());
        }
    }

    fn append_to_cell(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(cell) = self
            .tables
            .last_mut()
            .and_then(|table| table.last_mut())
            .and_then(|row| row.last_mut())
        {
            if !cell.is_empty() {
                cell.push(' ');
            }
            cell.push_str(text);
        }
    }
}

fn parse_body(xml: &str) -> Result<Vec<BodyItem>> {
    let mut reader = Reader::from_str(xml);
    let mut state = BodyState::default();

    loop {
        match reader.read_event().map_err(conversion_error)? {
            Event::Start(e) => state.open(&e, false),
            Event::Empty(e) => state.open(&e, true),
            Event::Text(t) if state.in_text => {
                let text = t.unescape().map_err(conversion_error)?;
                state.push_text(&text);
            }
            Event::End(e) => state.close(e.local_name().as_ref()),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(state.items)
}

fn block_tag(style: Option<&str>) -> &'static str {
    let Some(style) = style else {
        return "p";
    };

    match style.to_ascii_lowercase().as_str() {
        "title" | "heading1" => "h1",
        "heading2" => "h2",
        "heading3" => "h3",
        "heading4" => "h4",
        "heading5" => "h5",
        "heading6" => "h6",
        "quote" | "intensequote" => "blockquote",
        _ => "p",
    }
}

fn render_runs(runs: &[ParsedRun], out: &mut String) {
    for run in runs {
        if run.text.is_empty() {
            continue;
        }

        if run.bold {
            out.push_str("<strong>");
        }
        if run.italic {
            out.push_str("<em>");
        }
        if run.underline {
            out.push_str("<u>");
        }

        let escaped = escape_text(&run.text);
        out.push_str(&escaped.replace('\n', "<br>"));

        if run.underline {
            out.push_str("</u>");
        }
        if run.italic {
            out.push_str("</em>");
        }
        if run.bold {
            out.push_str("</strong>");
        }
    }
}

fn render_html(items: &[BodyItem], numbering: &NumberingMap) -> String {
    let mut out = String::new();
    let mut open_list: Option<&'static str> = None;

    for item in items {
        let list_tag = match item {
            BodyItem::Paragraph(paragraph) if !paragraph.is_blank() => paragraph
                .list_num_id()
                .map(|id| if numbering.is_ordered(id, paragraph.level) { "ol" } else { "ul" }),
            _ => None,
        };

        if let Some(open) = open_list
            && list_tag != Some(open)
        {
            out.push_str(&format!("</{}>", open));
            open_list = None;
        }

        match item {
            BodyItem::Paragraph(paragraph) if paragraph.is_blank() => {}
            BodyItem::Paragraph(paragraph) => {
                if let Some(tag) = list_tag {
                    if open_list.is_none() {
                        out.push_str(&format!("<{}>", tag));
                        open_list = Some(tag);
                    }
                    out.push_str("<li>");
                    render_runs(&paragraph.runs, &mut out);
                    out.push_str("</li>");
                } else {
                    let tag = block_tag(paragraph.style.as_deref());
                    out.push_str(&format!("<{}>", tag));
                    render_runs(&paragraph.runs, &mut out);
                    out.push_str(&format!("</{}>", tag));
                }
            }
            BodyItem::Table(rows) => {
                out.push_str("<table>");
                for row in rows {
                    out.push_str("<tr>");
                    for cell in row {
                        out.push_str(&format!("<td>{}</td>", escape_text(cell)));
                    }
                    out.push_str("</tr>");
                }
                out.push_str("</table>");
            }
        }
    }

    if let Some(open) = open_list {
        out.push_str(&format!("</{}>", open));
    }

    out
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    const W_NS: &str = "xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\"";

    /// Builds a minimal package around a `w:body` fragment.
    pub(crate) fn package(body: &str, numbering: Option<&str>) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();

        writer.start_file(DOCUMENT_PART, options).unwrap();
        write!(
            writer,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><w:document {}><w:body>{}</w:body></w:document>",
            W_NS, body
        )
        .unwrap();

        if let Some(numbering) = numbering {
            writer.start_file(NUMBERING_PART, options).unwrap();
            write!(writer, "<w:numbering {}>{}</w:numbering>", W_NS, numbering).unwrap();
        }

        writer.finish().unwrap().into_inner()
    }

    fn convert(body: &str, numbering: Option<&str>) -> String {
        OoxmlHtmlConverter::new()
            .convert(&package(body, numbering))
            .unwrap()
    }

    #[test]
    fn test_heading_and_formatted_paragraph() {
        let html = convert(
            r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Title</w:t></w:r></w:p>
               <w:p><w:r><w:t xml:space="preserve">Some </w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>bold</w:t></w:r><w:r><w:t xml:space="preserve"> text.</w:t></w:r></w:p>"#,
            None,
        );
        assert_eq!(html, "<h1>Title</h1><p>Some <strong>bold</strong> text.</p>");
    }

    #[test]
    fn test_run_toggles_and_escaping() {
        let html = convert(
            r#"<w:p><w:r><w:rPr><w:b w:val="false"/><w:i/><w:u w:val="single"/></w:rPr><w:t>a &amp; b</w:t></w:r></w:p>"#,
            None,
        );
        assert_eq!(html, "<p><em><u>a &amp; b</u></em></p>");
    }

    #[test]
    fn test_empty_paragraphs_dropped_and_breaks_kept() {
        let html = convert(
            r#"<w:p/><w:p><w:r><w:t>one</w:t><w:br/><w:t>two</w:t></w:r></w:p><w:p><w:r><w:t> </w:t></w:r></w:p>"#,
            None,
        );
        assert_eq!(html, "<p>one<br>two</p>");
    }

    #[test]
    fn test_lists_grouped_by_numbering_format() {
        let numbering = r#"<w:abstractNum w:abstractNumId="0"><w:lvl w:ilvl="0"><w:numFmt w:val="bullet"/></w:lvl></w:abstractNum>
            <w:abstractNum w:abstractNumId="1"><w:lvl w:ilvl="0"><w:numFmt w:val="decimal"/></w:lvl></w:abstractNum>
            <w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>
            <w:num w:numId="2"><w:abstractNumId w:val="1"/></w:num>"#;
        let item = |num: &str, text: &str| {
            format!(
                r#"<w:p><w:pPr><w:numPr><w:ilvl w:val="0"/><w:numId w:val="{}"/></w:numPr></w:pPr><w:r><w:t>{}</w:t></w:r></w:p>"#,
                num, text
            )
        };
        let body = [item("1", "a"), item("1", "b"), item("2", "one"), item("0", "plain")].concat();

        assert_eq!(
            convert(&body, Some(numbering)),
            "<ul><li>a</li><li>b</li></ul><ol><li>one</li></ol><p>plain</p>"
        );
    }

    #[test]
    fn test_quote_style_and_table() {
        let html = convert(
            r#"<w:p><w:pPr><w:pStyle w:val="Quote"/></w:pPr><w:r><w:t>Wise</w:t></w:r></w:p>
               <w:tbl><w:tr><w:tc><w:p><w:r><w:t>x</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>y</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#,
            None,
        );
        assert_eq!(
            html,
            "<blockquote>Wise</blockquote><table><tr><td>x</td><td>y</td></tr></table>"
        );
    }

    #[test]
    fn test_invalid_package_is_conversion_error() {
        let result = OoxmlHtmlConverter::new().convert(b"not a zip");
        assert!(matches!(result, Err(EditorError::ImportConversion(_))));
    }

    #[test]
    fn test_missing_document_part() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("other.xml", SimpleFileOptions::default())
            .unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let result = OoxmlHtmlConverter::new().convert(&bytes);
        assert!(matches!(result, Err(EditorError::ImportConversion(_))));
    }
}
