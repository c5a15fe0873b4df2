//! Line-oriented code writer with an indentation stack and named,
//! deferred insertion sections.
//!
//! The writer is the only output surface of the generator: emitters append
//! lines through [`CodeWriter::write_line`] and the walker serializes the
//! buffer once per generated file. Sections allow lines that are only known
//! late in emission (e.g. `use` imports collected while resolving types) to
//! be placed near the top of the file without rebuilding the buffer.

/// A named insertion point registered at some position in the line buffer.
///
/// Pending lines are held on the section and spliced into the buffer once,
/// at serialization time, instead of being inserted into a growing `Vec`
/// on every write.
struct Section {
    name: String,
    /// Buffer index the section's lines are spliced at.
    anchor: usize,
    /// Indentation prefix captured when the section was registered.
    indentation: String,
    /// Lines queued for this section, in insertion order.
    pending: Vec<String>,
    /// When set, a duplicate insertion becomes a blank line instead.
    unique_items: bool,
    /// Raw (unindented) lines already inserted, for duplicate detection.
    items: Vec<String>,
}

/// Append-only line buffer used to build one generated source file.
pub struct CodeWriter {
    lines: Vec<String>,
    indent_string: String,
    indentations: Vec<String>,
    sections: Vec<Section>,
}

impl CodeWriter {
    /// Create a writer using `indent_string` as one indentation level.
    pub fn new(indent_string: impl Into<String>) -> Self {
        Self {
            lines: Vec::new(),
            indent_string: indent_string.into(),
            indentations: Vec::new(),
            sections: Vec::new(),
        }
    }

    /// Push one indentation level.
    pub fn indent(&mut self) {
        self.indentations.push(self.indent_string.clone());
    }

    /// Pop one indentation level. Popping at level zero is a no-op.
    pub fn outdent(&mut self) {
        self.indentations.pop();
    }

    fn indentation(&self) -> String {
        self.indentations.concat()
    }

    /// Append `line` at the current indentation; an empty `line` appends a
    /// blank line with no indentation.
    pub fn write_line(&mut self, line: &str) {
        if line.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines.push(format!("{}{}", self.indentation(), line));
        }
    }

    /// Drop the most recently appended buffer line, if any.
    ///
    /// Emitters use this to cancel a trailing blank line before closing a
    /// body. Section anchors are left untouched; anchors past the end of
    /// the buffer are clamped at serialization.
    pub fn pop_line(&mut self) {
        self.lines.pop();
    }

    /// Register a named section anchored at the current end of the buffer,
    /// capturing the current indentation. Registering an existing name
    /// again is a no-op.
    pub fn add_section(&mut self, name: &str, unique_items: bool) {
        if self.sections.iter().any(|s| s.name == name) {
            return;
        }
        self.sections.push(Section {
            name: name.to_string(),
            anchor: self.lines.len(),
            indentation: self.indentation(),
            pending: Vec::new(),
            unique_items,
            items: Vec::new(),
        });
    }

    /// Queue `line` for insertion at the section named `name`.
    ///
    /// Unknown section names are ignored. Under `unique_items` a line equal
    /// to one already queued degrades to a blank line. The first queued line
    /// also reserves exactly one blank line after the section.
    pub fn write_line_in_section(&mut self, line: &str, name: &str) {
        let Some(section) = self.sections.iter_mut().find(|s| s.name == name) else {
            return;
        };
        if !line.is_empty() && (!section.unique_items || !section.items.iter().any(|i| i == line)) {
            section
                .pending
                .push(format!("{}{}", section.indentation, line));
            section.items.push(line.to_string());
        } else {
            section.pending.push(String::new());
        }
    }

    /// Flush all sections into the buffer and join the lines into the final
    /// file text.
    pub fn into_text(self) -> String {
        let Self {
            lines, mut sections, ..
        } = self;
        let len = lines.len();
        sections.retain(|s| !s.pending.is_empty());
        // Stable sort keeps registration order for sections sharing an anchor.
        sections.sort_by_key(|s| s.anchor.min(len));

        let mut out: Vec<String> =
            Vec::with_capacity(len + sections.iter().map(|s| s.pending.len() + 1).sum::<usize>());
        let mut next = sections.into_iter().peekable();
        for (idx, line) in lines.into_iter().enumerate() {
            while let Some(section) = next.next_if(|s| s.anchor.min(len) == idx) {
                out.extend(section.pending);
                out.push(String::new());
            }
            out.push(line);
        }
        for section in next {
            out.extend(section.pending);
            out.push(String::new());
        }
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_write_line_applies_indentation() {
        let mut w = CodeWriter::new("    ");
        w.write_line("a");
        w.indent();
        w.write_line("b");
        w.indent();
        w.write_line("c");
        w.outdent();
        w.write_line("d");
        w.outdent();
        w.write_line("e");
        assert_eq!(w.into_text(), "a\n    b\n        c\n    d\ne");
    }

    #[test]
    fn test_empty_line_has_no_indentation() {
        let mut w = CodeWriter::new("\t");
        w.indent();
        w.write_line("x");
        w.write_line("");
        w.write_line("y");
        assert_eq!(w.into_text(), "\tx\n\n\ty");
    }

    #[test]
    fn test_outdent_at_zero_is_noop() {
        let mut w = CodeWriter::new("  ");
        w.outdent();
        w.write_line("x");
        assert_eq!(w.into_text(), "x");
    }

    #[test]
    fn test_pop_line_drops_last_line() {
        let mut w = CodeWriter::new("  ");
        w.write_line("keep");
        w.write_line("drop");
        w.pop_line();
        assert_eq!(w.into_text(), "keep");
    }

    #[test]
    fn test_section_lines_spliced_at_anchor_with_one_trailing_blank() {
        let mut w = CodeWriter::new("    ");
        w.write_line("header");
        w.add_section("uses", false);
        w.write_line("body");
        w.write_line_in_section("use A;", "uses");
        w.write_line_in_section("use B;", "uses");
        assert_eq!(w.into_text(), "header\nuse A;\nuse B;\n\nbody");
    }

    #[test]
    fn test_section_captures_indentation_at_registration() {
        let mut w = CodeWriter::new("    ");
        w.indent();
        w.add_section("inner", false);
        w.outdent();
        w.write_line("after");
        w.write_line_in_section("line", "inner");
        assert_eq!(w.into_text(), "    line\n\nafter");
    }

    #[test]
    fn test_unique_section_duplicate_becomes_blank_line() {
        let mut w = CodeWriter::new("    ");
        w.add_section("uses", true);
        w.write_line("body");
        w.write_line_in_section("use A;", "uses");
        w.write_line_in_section("use A;", "uses");
        w.write_line_in_section("use B;", "uses");
        assert_eq!(w.into_text(), "use A;\n\nuse B;\n\nbody");
    }

    #[test]
    fn test_section_registered_twice_keeps_first_anchor() {
        let mut w = CodeWriter::new("    ");
        w.add_section("s", false);
        w.write_line("middle");
        w.add_section("s", false);
        w.write_line_in_section("x", "s");
        assert_eq!(w.into_text(), "x\n\nmiddle");
    }

    #[test]
    fn test_unknown_section_is_ignored() {
        let mut w = CodeWriter::new("    ");
        w.write_line("only");
        w.write_line_in_section("x", "missing");
        assert_eq!(w.into_text(), "only");
    }

    #[test]
    fn test_empty_section_inserts_nothing() {
        let mut w = CodeWriter::new("    ");
        w.write_line("a");
        w.add_section("uses", true);
        w.write_line("b");
        assert_eq!(w.into_text(), "a\nb");
    }

    #[test]
    fn test_section_anchor_past_popped_line_is_clamped() {
        let mut w = CodeWriter::new("    ");
        w.write_line("a");
        w.add_section("tail", false);
        w.pop_line();
        w.write_line_in_section("x", "tail");
        assert_eq!(w.into_text(), "x\n");
    }

    #[test]
    fn test_two_sections_flush_in_registration_order() {
        let mut w = CodeWriter::new("    ");
        w.add_section("first", false);
        w.add_section("second", false);
        w.write_line("body");
        w.write_line_in_section("2", "second");
        w.write_line_in_section("1", "first");
        assert_eq!(w.into_text(), "1\n\n2\n\nbody");
    }
}
