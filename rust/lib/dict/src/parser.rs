use tracing::{debug, warn};

use crate::document::DictionaryDocument;
use crate::entry::Entry;
use crate::error::ParseError;
use crate::lexer::Line;

/// A block whose `}` has not been seen yet.
struct OpenBlock {
    key: String,
    line: usize,
    body: DictionaryDocument,
}

/// Build the entry tree from logical lines in one pass.
///
/// Open blocks live on an explicit stack, so nesting depth is bounded by
/// memory rather than the call stack. Malformed scalar lines are skipped; an
/// unterminated block is the only hard error.
pub(crate) fn parse_lines(lines: &[Line]) -> Result<DictionaryDocument, ParseError> {
    let mut root = DictionaryDocument::new();
    let mut open: Vec<OpenBlock> = Vec::new();
    // A bare line directly before `{` names the block.
    let mut pending: Option<&Line> = None;

    for line in lines {
        if let Some(statement) = line.text.strip_suffix(';') {
            pending = None;
            match statement.trim().split_once(char::is_whitespace) {
                Some((key, value)) => {
                    current(&mut root, &mut open).insert(key, value.trim());
                }
                None => debug!("skipping line {}: no key/value pair in {:?}", line.number, line.text),
            }
        } else if line.is_open() {
            open.push(OpenBlock {
                key: pending.take().map(|l| l.text.clone()).unwrap_or_default(),
                line: line.number,
                body: DictionaryDocument::new(),
            });
        } else if line.is_close() {
            pending = None;
            match open.pop() {
                Some(block) => {
                    current(&mut root, &mut open).insert(block.key, Entry::Dict(block.body));
                }
                None => warn!("skipping unmatched '}}' at line {}", line.number),
            }
        } else if let Some(previous) = pending.replace(line) {
            debug!("skipping line {}: {:?}", previous.number, previous.text);
        }
    }

    // The outermost unclosed block is the one reported.
    match open.into_iter().next() {
        Some(block) => Err(ParseError::Unterminated {
            key: block.key,
            line: block.line,
        }),
        None => Ok(root),
    }
}

/// Document that receives the next entry: the innermost open block, or the
/// top level.
fn current<'a>(
    root: &'a mut DictionaryDocument,
    open: &'a mut [OpenBlock],
) -> &'a mut DictionaryDocument {
    match open.last_mut() {
        Some(block) => &mut block.body,
        None => root,
    }
}
