//! Splitting multi-document YAML streams.

/// One document of a YAML stream, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Document<'a> {
    /// Position among the non-empty documents (1-indexed).
    pub index: usize,
    /// Line the document starts on in the source (1-indexed).
    pub line: usize,
    pub bytes: &'a [u8],
}

/// Split raw input on `---` separator lines.
///
/// A separator line is `---` optionally followed by whitespace or a comment.
/// Segments holding nothing but blank and comment lines are dropped.
pub fn split_documents(raw: &[u8]) -> Vec<Document<'_>> {
    let mut documents = Vec::new();
    let mut start = 0;
    let mut start_line = 1;
    let mut offset = 0;

    for (i, line) in raw.split_inclusive(|b| *b == b'\n').enumerate() {
        if is_separator(line) {
            push_document(&mut documents, &raw[start..offset], start_line);
            start = offset + line.len();
            start_line = i + 2;
        }
        offset += line.len();
    }
    push_document(&mut documents, &raw[start..], start_line);

    documents
}

fn push_document<'a>(documents: &mut Vec<Document<'a>>, bytes: &'a [u8], line: usize) {
    if is_blank(bytes) {
        return;
    }
    documents.push(Document {
        index: documents.len() + 1,
        line,
        bytes,
    });
}

fn is_separator(line: &[u8]) -> bool {
    let Some(rest) = line.strip_prefix(b"---") else {
        return false;
    };
    if rest.first().is_some_and(|b| !b.is_ascii_whitespace()) {
        return false;
    }
    let rest = rest.trim_ascii();
    rest.is_empty() || rest.starts_with(b"#")
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes
        .split(|b| *b == b'\n')
        .map(<[u8]>::trim_ascii)
        .all(|line| line.is_empty() || line.starts_with(b"#"))
}
