//! srcML Source Facts
//!
//! Measures of the source code in a srcML document: element counts for a
//! fixed set of srcML element names, plus character and line counts over
//! the text content.

use std::io::{self, Write};
use std::time::Duration;

use memchr::memchr_iter;

use super::{group_thousands, value_width};
use crate::sax::handler::XmlHandler;

/// Counters accumulated over one srcML document
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SrcFacts {
    /// Value of the last `url` attribute seen
    pub url: String,
    /// Bytes of text content; each entity reference counts as one
    pub text_size: u64,
    pub loc: u64,
    pub expressions: u64,
    pub functions: u64,
    pub classes: u64,
    pub units: u64,
    pub declarations: u64,
    pub comments: u64,
    pub line_comments: u64,
    pub returns: u64,
    pub literals: u64,
    /// A nested `unit` was seen, so the outer one is an archive wrapper
    pub is_archive: bool,
    /// The most recent start tag was a `comment` element
    in_comment_element: bool,
}

impl SrcFacts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of source files; the archive wrapper unit is not one
    pub fn files(&self) -> u64 {
        if self.is_archive {
            self.units.saturating_sub(1)
        } else {
            self.units
        }
    }

    /// Throughput in millions of lines of code per second
    pub fn mloc_per_sec(&self, elapsed: Duration) -> f64 {
        let seconds = elapsed.as_secs_f64();
        if seconds == 0.0 {
            return 0.0;
        }
        self.loc as f64 / seconds / 1_000_000.0
    }

    /// Write the markdown report
    pub fn write_report<W: Write>(&self, out: &mut W, total_bytes: u64) -> io::Result<()> {
        let width = value_width(total_bytes);
        let rows = [
            ("srcML bytes  ", total_bytes),
            ("Characters   ", self.text_size),
            ("Files        ", self.files()),
            ("LOC          ", self.loc),
            ("Classes      ", self.classes),
            ("Functions    ", self.functions),
            ("Declarations ", self.declarations),
            ("Expressions  ", self.expressions),
            ("Comments     ", self.comments),
            ("Line Comments", self.line_comments),
            ("Returns      ", self.returns),
            ("Literals     ", self.literals),
        ];

        writeln!(out, "# srcFacts: {}", self.url)?;
        writeln!(out, "| Measure      | {:>w$}", "Value |", w = width + 2)?;
        writeln!(out, "|:-------------|-{:->w$}", ":|", w = width + 2)?;
        for (label, value) in rows {
            writeln!(out, "| {}| {:>w$} |", label, group_thousands(value), w = width)?;
        }
        writeln!(out)
    }

    fn count_text(&mut self, characters: &[u8]) {
        self.text_size += characters.len() as u64;
        self.loc += memchr_iter(b'\n', characters).count() as u64;
    }
}

impl XmlHandler for SrcFacts {
    fn start_document(&mut self, _depth: i32) {}

    fn end_document(&mut self, _depth: i32) {}

    fn start_tag(&mut self, depth: i32, _qname: &[u8], _prefix: &[u8], local_name: &[u8]) {
        self.in_comment_element = false;
        match local_name {
            b"expr" => self.expressions += 1,
            b"decl" => self.declarations += 1,
            b"comment" => {
                self.comments += 1;
                self.in_comment_element = true;
            }
            b"function" => self.functions += 1,
            b"unit" => {
                self.units += 1;
                if depth == 1 {
                    self.is_archive = true;
                }
            }
            b"class" => self.classes += 1,
            b"return" => self.returns += 1,
            b"literal" => self.literals += 1,
            _ => {}
        }
    }

    fn attribute(
        &mut self,
        _depth: i32,
        _qname: &[u8],
        _prefix: &[u8],
        local_name: &[u8],
        value: &[u8],
    ) {
        if local_name == b"url" {
            self.url = String::from_utf8_lossy(value).into_owned();
        }
        if self.in_comment_element && value == b"line" {
            self.line_comments += 1;
        }
    }

    fn namespace(&mut self, _depth: i32, _prefix: &[u8], _uri: &[u8]) {}

    fn end_tag(&mut self, _depth: i32, _prefix: &[u8], _qname: &[u8], _local_name: &[u8]) {}

    fn characters(&mut self, _depth: i32, characters: &[u8]) {
        self.count_text(characters);
    }

    fn cdata(&mut self, _depth: i32, characters: &[u8]) {
        self.count_text(characters);
    }

    fn char_entity_ref(&mut self, _depth: i32, _characters: &[u8]) {
        self.text_size += 1;
    }

    fn comment(&mut self, _depth: i32, _comment: &[u8]) {}

    fn declaration(
        &mut self,
        _depth: i32,
        _version: &[u8],
        _encoding: Option<&[u8]>,
        _standalone: Option<&[u8]>,
    ) {
    }

    fn processing_instruction(&mut self, _depth: i32, _target: &[u8], _data: &[u8]) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::XmlParser;

    const ARCHIVE: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<unit xmlns="http://www.srcML.org/srcML/src" url="demo">
<unit filename="a.cpp"><function><type><name>int</name></type> <name>main</name>() <block>{
    <comment type="line">// entry</comment>
    <decl_stmt><decl><type><name>int</name></type> <name>x</name> <init>= <expr><literal type="number">1</literal></expr></init></decl>;</decl_stmt>
    <return>return <expr><name>x</name> &lt; <literal type="number">2</literal></expr>;</return>
}</block></function>
</unit>
<unit filename="b.cpp"><class>class <name>A</name> <block>{}</block>;</class>
<comment type="block">/* x */</comment>
</unit>
</unit>
"#;

    fn facts(input: &[u8]) -> SrcFacts {
        let mut facts = SrcFacts::new();
        XmlParser::new(input).parse(&mut facts).unwrap();
        facts
    }

    #[test]
    fn test_archive_counts() {
        let facts = facts(ARCHIVE);

        assert_eq!(facts.url, "demo");
        assert!(facts.is_archive);
        assert_eq!(facts.units, 3);
        assert_eq!(facts.files(), 2);
        assert_eq!(facts.functions, 1);
        assert_eq!(facts.classes, 1);
        assert_eq!(facts.declarations, 1);
        assert_eq!(facts.expressions, 2);
        assert_eq!(facts.literals, 2);
        assert_eq!(facts.returns, 1);
        assert_eq!(facts.comments, 2);
        assert_eq!(facts.line_comments, 1);
        // newlines inside the outer unit; whitespace outside it is skipped
        assert_eq!(facts.loc, 10);
    }

    #[test]
    fn test_single_unit_is_not_archive() {
        let facts = facts(b"<unit filename=\"a.c\"><expr>a &amp;&amp; b</expr>\n</unit>");

        assert!(!facts.is_archive);
        assert_eq!(facts.files(), 1);
        assert_eq!(facts.expressions, 1);
        // "a ", two entity references, " b", "\n"
        assert_eq!(facts.text_size, 7);
        assert_eq!(facts.loc, 1);
    }

    #[test]
    fn test_report_table() {
        let facts = SrcFacts {
            url: "demo".to_string(),
            loc: 1234,
            units: 1,
            ..SrcFacts::default()
        };
        let mut out = Vec::new();
        facts.write_report(&mut out, 100).unwrap();
        let report = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "# srcFacts: demo");
        assert_eq!(lines[1], "| Measure      | Value |");
        assert_eq!(lines[2], "|:-------------|------:|");
        assert_eq!(lines[3], "| srcML bytes  |   100 |");
        assert_eq!(lines[6], "| LOC          | 1,234 |");
        assert_eq!(lines.len(), 16);
    }
}
