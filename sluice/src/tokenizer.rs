//! Chunk-resumable XML record tokenizer.
//!
//! Scans buffered input for `<...>` markup spans, tracks nesting depth, and
//! emits whole record elements once the configured capture depth closes. The
//! buffer, depth counter, and capture state persist across chunk boundaries,
//! so a chunk cut can land anywhere (mid-tag, mid-text, mid-attribute)
//! without changing the emitted records. Memory stays bounded to roughly one
//! chunk plus one in-progress record: markup outside the capture window is
//! depth-tracked but never buffered.

use memchr::memchr;

use crate::stream::ChunkSource;
use crate::Result;

/// Markup token kinds, classified by literal edge match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `<?...?>`
    ProcessingInstruction,
    /// `<!--...-->`
    Comment,
    /// `<![CDATA[...]]>`
    CData,
    /// `<!...>` (doctype and other declarations)
    Declaration,
    /// `</...>`
    CloseTag,
    /// `<.../>`
    SelfClosingTag,
    /// `<...>`
    OpenTag,
}

impl TokenKind {
    /// Classify a captured `<...>` span by its opening and closing edges,
    /// most specific edges first.
    pub fn classify(token: &[u8]) -> TokenKind {
        const EDGES: &[(&[u8], &[u8], TokenKind)] = &[
            (b"<?", b"?>", TokenKind::ProcessingInstruction),
            (b"<!--", b"-->", TokenKind::Comment),
            (b"<![CDATA[", b"]]>", TokenKind::CData),
            (b"<!", b">", TokenKind::Declaration),
            (b"</", b">", TokenKind::CloseTag),
            (b"<", b"/>", TokenKind::SelfClosingTag),
            (b"<", b">", TokenKind::OpenTag),
        ];

        for (opening, closing, kind) in EDGES {
            if token.starts_with(opening) && token.ends_with(closing) {
                return *kind;
            }
        }

        // Unreachable for spans cut by next_span (they always match the
        // final `<...>` edge), kept total for direct callers.
        TokenKind::OpenTag
    }

    /// Effect of this token on the nesting depth.
    pub fn depth_delta(self) -> i32 {
        match self {
            TokenKind::CloseTag => -1,
            TokenKind::OpenTag => 1,
            _ => 0,
        }
    }
}

/// Tokenizer state persisted across `next_record` calls.
///
/// One instance serves one stream; the buffer/depth/capture triple is owned
/// exclusively by the in-progress read.
pub struct ChunkTokenizer {
    buf: Vec<u8>,
    depth: i32,
    capture_depth: i32,
    capturing: bool,
    node: Vec<u8>,
}

impl ChunkTokenizer {
    pub fn new(capture_depth: i32) -> Self {
        Self {
            buf: Vec::new(),
            depth: 0,
            capture_depth,
            capturing: false,
            node: Vec::new(),
        }
    }

    /// Leftover bytes that never resolved into a token. Non-empty after
    /// exhaustion indicates truncated or malformed input.
    pub fn residue(&self) -> &[u8] {
        &self.buf
    }

    /// Pull chunks from `source` until the next complete record at the
    /// capture depth is assembled, or the source is exhausted.
    ///
    /// A record left mid-capture at end of stream is dropped, not surfaced;
    /// [`residue`](Self::residue) exposes whatever never tokenized.
    pub fn next_record<S: ChunkSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<Option<String>> {
        loop {
            while let Some((lt, gt)) = self.next_span() {
                let kind = TokenKind::classify(&self.buf[lt..=gt]);
                let delta = kind.depth_delta();
                self.depth += delta;

                let mut flush = false;
                if self.depth == self.capture_depth && delta > 0 {
                    self.capturing = true;
                } else if self.depth == self.capture_depth - 1 && delta < 0 {
                    flush = true;
                    self.capturing = false;
                }

                // The element unit is the data preceding the token plus the
                // token itself; both belong to the record while capturing.
                if self.capturing || flush {
                    self.node.extend_from_slice(&self.buf[..=gt]);
                }
                self.buf.drain(..=gt);

                if flush {
                    let node = std::mem::take(&mut self.node);
                    return Ok(Some(String::from_utf8(node)?));
                }
            }

            match source.next_chunk()? {
                Some(chunk) if !chunk.is_empty() => self.buf.extend_from_slice(&chunk),
                _ => return Ok(None),
            }
        }
    }

    /// Locate the next `<...>` span: the first `<`, then the first `>` after
    /// it with at least one byte in between. Text before the span is the
    /// data part of the element unit; an unmatched `<` keeps the whole
    /// remainder buffered until more input arrives.
    fn next_span(&self) -> Option<(usize, usize)> {
        let mut from = 0;
        loop {
            let lt = from + memchr(b'<', &self.buf[from..])?;
            let gt = lt + 1 + memchr(b'>', &self.buf[lt + 1..])?;
            if gt > lt + 1 {
                return Some((lt, gt));
            }
            from = lt + 1;
        }
    }
}
