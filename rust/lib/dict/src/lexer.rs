//! Comment stripping and statement splitting.
//!
//! The parser works on logical lines: trimmed, non-empty, comment-free text
//! where every `;` ends a line and every `{` / `}` stands on a line of its
//! own. `p { solver GAMG; }` and OpenFOAM's own
//!
//! ```text
//! p
//! {
//!     solver GAMG;
//! }
//! ```
//!
//! therefore produce the same stream: `p`, `{`, `solver GAMG;`, `}`.
//! Nothing inside double quotes is split or treated as a comment.
//!
//! Damage stays local: a quote still open at the end of a line closes there,
//! and a `/*` with no `*/` anywhere after it only comments out the rest of
//! its line.

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Line {
    pub text: String,
    /// 1-based source line where the text starts.
    pub number: usize,
}

impl Line {
    pub fn is_open(&self) -> bool {
        self.text == "{"
    }

    pub fn is_close(&self) -> bool {
        self.text == "}"
    }
}

struct Splitter {
    lines: Vec<Line>,
    current: String,
    start: usize,
    line: usize,
}

impl Splitter {
    fn push(&mut self, c: char) {
        if self.current.trim().is_empty() && !c.is_whitespace() {
            self.current.clear();
            self.start = self.line;
        }
        self.current.push(c);
    }

    fn flush(&mut self) {
        let text = self.current.trim();
        if !text.is_empty() {
            self.lines.push(Line {
                text: text.to_string(),
                number: self.start,
            });
        }
        self.current.clear();
    }
}

/// Split `text` into logical lines. `first_line` is the source line number
/// of the first line of `text`.
pub(crate) fn logical_lines(text: &str, first_line: usize) -> Vec<Line> {
    let mut s = Splitter {
        lines: Vec::new(),
        current: String::new(),
        start: first_line,
        line: first_line,
    };
    let mut chars = text.chars().peekable();
    let mut in_quote = false;
    // Set once a `/*` finds no `*/`; nothing later can close either.
    let mut no_comment_end = false;

    while let Some(c) = chars.next() {
        if in_quote {
            match c {
                '\\' => {
                    s.push(c);
                    if let Some(escaped) = chars.next_if(|&n| n != '\n') {
                        s.push(escaped);
                    }
                }
                '"' => {
                    in_quote = false;
                    s.push(c);
                }
                '\n' => {
                    in_quote = false;
                    s.flush();
                    s.line += 1;
                }
                _ => s.push(c),
            }
            continue;
        }

        match c {
            '"' => {
                in_quote = true;
                s.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                while chars.next_if(|&n| n != '\n').is_some() {}
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let closed = if no_comment_end {
                    None
                } else {
                    comment_end(chars.clone())
                };
                match closed {
                    Some((consumed, newlines)) => {
                        for _ in 0..consumed {
                            chars.next();
                        }
                        s.line += newlines;
                        if newlines > 0 {
                            s.flush();
                        } else {
                            s.push(' ');
                        }
                    }
                    None => {
                        no_comment_end = true;
                        while chars.next_if(|&n| n != '\n').is_some() {}
                    }
                }
            }
            '\n' => {
                s.flush();
                s.line += 1;
            }
            ';' => {
                s.push(c);
                s.flush();
            }
            '{' | '}' => {
                s.flush();
                s.push(c);
                s.flush();
            }
            _ => s.push(c),
        }
    }
    s.flush();
    s.lines
}

/// Characters up to and including the `*/` ending a block comment, and the
/// newlines among them. `None` if the comment never ends.
fn comment_end(rest: impl Iterator<Item = char>) -> Option<(usize, usize)> {
    let mut prev = '\0';
    let mut newlines = 0;
    for (idx, c) in rest.enumerate() {
        if prev == '*' && c == '/' {
            return Some((idx + 1, newlines));
        }
        if c == '\n' {
            newlines += 1;
        }
        prev = c;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(text: &str) -> Vec<String> {
        logical_lines(text, 1).into_iter().map(|l| l.text).collect()
    }

    #[test]
    fn strips_line_comments() {
        assert_eq!(texts("tolerance 1e-6; // relative\n// whole line\n"), ["tolerance 1e-6;"]);
    }

    #[test]
    fn strips_block_comments() {
        let text = "/* banner\n   more */\na 1; /* inline */ b 2;\n";
        assert_eq!(texts(text), ["a 1;", "b 2;"]);
    }

    #[test]
    fn splits_inline_blocks() {
        assert_eq!(
            texts("p { solver GAMG; tolerance 1e-6; }"),
            ["p", "{", "solver GAMG;", "tolerance 1e-6;", "}"]
        );
    }

    #[test]
    fn quotes_protect_separators() {
        assert_eq!(
            texts("banner \"a;b // {c}\";\nnext 1;"),
            ["banner \"a;b // {c}\";", "next 1;"]
        );
    }

    #[test]
    fn line_numbers_follow_source() {
        let lines = logical_lines("\n\nfoo\n{\n  bar 1;\n}\n", 10);
        let numbers: Vec<usize> = lines.iter().map(|l| l.number).collect();
        assert_eq!(numbers, [12, 13, 14, 15]);
    }

    #[test]
    fn missing_semicolon_stays_bare() {
        assert_eq!(
            texts("application simpleFoam\nstartFrom startTime;"),
            ["application simpleFoam", "startFrom startTime;"]
        );
    }

    #[test]
    fn open_quote_closes_at_end_of_line() {
        assert_eq!(
            texts("a    x\"y;\nb    2;"),
            ["a    x\"y;", "b    2;"]
        );
    }

    #[test]
    fn unclosed_block_comment_ends_with_its_line() {
        assert_eq!(texts("a    inc/*;\nb    2;\nc 3; /* x"), ["a    inc", "b    2;", "c 3;"]);
    }

    #[test]
    fn block_comment_line_numbers() {
        let lines = logical_lines("/* one\ntwo */ a 1;\nb 2;", 1);
        let numbers: Vec<usize> = lines.iter().map(|l| l.number).collect();
        assert_eq!(numbers, [2, 3]);
    }
}
