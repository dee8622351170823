//! Field text wrapping.
//!
//! Splits one field's text into row-sized chunks. Widths are counted in
//! `char`s and every split lands on a char boundary.

/// Why a chunk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Break {
    /// The row was full; the text continues directly in the next chunk
    Width,
    /// An embedded newline was consumed right after this chunk
    Newline,
    /// Last chunk of the field
    End,
}

/// One row's worth of text from a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub text: &'a str,
    pub brk: Break,
}

/// Lazy iterator over the chunks of one field. See [`wrap`].
#[derive(Debug, Clone)]
pub struct Wrap<'a> {
    rest: Option<&'a str>,
    width: usize,
}

/// Wrap `text` into chunks of at most `width` chars.
///
/// An empty input still yields one empty chunk so every field occupies at
/// least one row. A trailing newline ends the field without an extra row.
pub fn wrap(text: &str, width: usize) -> Wrap<'_> {
    Wrap {
        rest: Some(text),
        width: width.max(1),
    }
}

impl<'a> Iterator for Wrap<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Chunk<'a>> {
        let rest = self.rest?;

        // Byte offset just past the first `width` chars, present only when
        // more than `width` chars remain.
        let cut = rest.char_indices().nth(self.width).map(|(i, _)| i);

        let chunk = match cut {
            Some(cut) => {
                let candidate = &rest[..cut];
                match candidate.find('\n') {
                    Some(nl) => {
                        self.rest = Some(&rest[nl + 1..]);
                        Chunk {
                            text: &rest[..nl],
                            brk: Break::Newline,
                        }
                    }
                    None => {
                        self.rest = Some(&rest[cut..]);
                        Chunk {
                            text: candidate,
                            brk: Break::Width,
                        }
                    }
                }
            }
            None => match rest.find('\n') {
                Some(nl) => {
                    let after = &rest[nl + 1..];
                    self.rest = (!after.is_empty()).then_some(after);
                    Chunk {
                        text: &rest[..nl],
                        brk: Break::Newline,
                    }
                }
                None => {
                    self.rest = None;
                    Chunk {
                        text: rest,
                        brk: Break::End,
                    }
                }
            },
        };

        Some(chunk)
    }
}

impl std::iter::FusedIterator for Wrap<'_> {}

/// Pad a chunk into a full content cell: one space, the text
/// left-justified to `width`, one space.
pub fn pad(text: &str, width: usize) -> String {
    format!(" {:<width$} ", text, width = width)
}

/// Rebuild the source text from its chunks.
pub fn unwrap_chunks<'a>(chunks: impl IntoIterator<Item = Chunk<'a>>) -> String {
    let mut out = String::new();
    for chunk in chunks {
        out.push_str(chunk.text);
        if chunk.brk == Break::Newline {
            out.push('\n');
        }
    }
    out
}
