use crate::document::DictionaryDocument;
use crate::entry::Entry;
use crate::error::ValueError;
use crate::header::FOOTER_RULER;
use crate::lexer;

const INDENT: &str = "    ";

impl DictionaryDocument {
    /// Render the complete file: banner, `FoamFile` block, body, footer.
    ///
    /// Formatting is canonical rather than preserved: comments and original
    /// spacing from parsed text are not reproduced.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        self.header().write_to(&mut out);
        out.push('\n');
        let body = self.to_body_string();
        if !body.is_empty() {
            out.push_str(&body);
            out.push_str("\n\n");
        }
        out.push_str(FOOTER_RULER);
        out.push('\n');
        out
    }

    /// Render only the entries, without header or footer.
    pub fn to_body_string(&self) -> String {
        let mut lines = Vec::new();
        write_entries(self, 0, &mut lines);
        lines.join("\n")
    }

    /// Check that every key and scalar would read back unchanged from
    /// [`serialize`](Self::serialize).
    ///
    /// Values are written verbatim, so text that starts a comment (`//`,
    /// `/*`), ends the entry (`;`, `{`, `}`), spans lines, or is empty fails
    /// unless quoted. The error names the first offending entry by its
    /// scoped path.
    pub fn check_values(&self) -> Result<(), ValueError> {
        check_entries(self, "")
    }
}

fn check_entries(doc: &DictionaryDocument, prefix: &str) -> Result<(), ValueError> {
    for (key, entry) in doc.iter() {
        let path = if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}/{key}")
        };
        match entry {
            Entry::Scalar(value) => {
                if key.contains(char::is_whitespace) || !is_bare_line(key) {
                    return Err(ValueError::Key { path });
                }
                if !value_reads_back(key, value) {
                    return Err(ValueError::Value {
                        path,
                        value: value.clone(),
                    });
                }
            }
            Entry::Dict(sub) => {
                // The empty key is an unnamed block.
                if !key.is_empty() && !is_bare_line(key) {
                    return Err(ValueError::Key { path });
                }
                check_entries(sub, &path)?;
            }
        }
    }
    Ok(())
}

/// Lex `key value;` as it is written and compare the value the parser would
/// take from it.
fn value_reads_back(key: &str, value: &str) -> bool {
    let lines = lexer::logical_lines(&format!("{key}{INDENT}{value};"), 1);
    matches!(lines.as_slice(), [line] if line
        .text
        .strip_suffix(';')
        .and_then(|statement| statement.trim().split_once(char::is_whitespace))
        .is_some_and(|(_, v)| v.trim() == value))
}

/// Text that lexes as one logical line, unchanged and not a statement.
fn is_bare_line(text: &str) -> bool {
    !text.ends_with(';')
        && matches!(lexer::logical_lines(text, 1).as_slice(), [line] if line.text == text)
}
