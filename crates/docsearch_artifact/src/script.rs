//! Doxygen `searchData` scripts.
//!
//! Doxygen writes one script per category and first character, e.g.
//! `search/functions_b.js`:
//!
//! ```text
//! var searchData=
//! [
//!   ['max_5fsize',['max_size',['../d0/d6f/classblaze_1_1AlignedAllocator.html#aef31…',1,'blaze::AlignedAllocator']]],
//!   ['maxsize',['maxSize',['../d3/ddf/…#accd…',1,'blaze::PtrVector::maxSize()'],['../db/dee/…#ab8e…',1,'blaze::threadpool::TaskQueue::maxSize()']]]
//! ];
//! ```
//!
//! Each item is `[id, [label, target, ...]]` and each target is
//! `[url, frame, scope]`. The id is the lowercased symbol with every
//! non-alphanumeric byte written as `_` plus two hex digits; it becomes the
//! entry name once unescaped. The scope becomes the qualifier. The frame flag
//! only tells the browser which frame to open the link in and is dropped.

use crate::batch::RecordBatch;
use crate::error::{ArtifactError, ArtifactResult};
use docsearch_core::{IndexError, Record, RecordTarget};

/// Maximum nesting depth accepted in a script literal.
const MAX_DEPTH: usize = 32;

/// Options for reading search scripts.
#[derive(Debug, Clone)]
pub struct ScriptOptions {
    /// Whether HTML entities in labels and qualifiers are decoded.
    pub decode_entities: bool,
    /// Whether `_XX` escapes in ids are decoded.
    pub unescape_ids: bool,
}

impl Default for ScriptOptions {
    fn default() -> Self {
        Self {
            decode_entities: true,
            unescape_ids: true,
        }
    }
}

impl ScriptOptions {
    /// Creates options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps HTML entities as written.
    #[must_use]
    pub const fn raw_entities(mut self) -> Self {
        self.decode_entities = false;
        self
    }

    /// Keeps ids as written.
    #[must_use]
    pub const fn raw_ids(mut self) -> Self {
        self.unescape_ids = false;
        self
    }
}

/// A value in a script literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// Quoted string.
    Str(String),
    /// Integer.
    Int(i64),
    /// Bracketed list.
    List(Vec<Literal>),
}

impl Literal {
    fn as_str(&self) -> Option<&str> {
        match self {
            Literal::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    fn as_list(&self) -> Option<&[Literal]> {
        match self {
            Literal::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

/// Decodes a search script into records.
///
/// # Errors
///
/// Returns an error if the script is not a well-formed literal array.
/// Items of the wrong shape become defects in the batch.
pub fn decode_script(data: &[u8], options: &ScriptOptions) -> ArtifactResult<RecordBatch> {
    let text = std::str::from_utf8(data).map_err(|_| ArtifactError::InvalidUtf8 {
        context: "search script",
    })?;

    let literal = parse_script(text)?;
    let Literal::List(items) = literal else {
        return Err(ArtifactError::invalid_format("search data is not an array"));
    };

    let mut batch = RecordBatch::new();
    for (position, item) in items.iter().enumerate() {
        match item_to_record(position, item, options) {
            Ok(record) => batch.push(record),
            Err(defect) => batch.push_defect(defect),
        }
    }
    Ok(batch)
}

fn item_to_record(
    position: usize,
    item: &Literal,
    options: &ScriptOptions,
) -> Result<Record, IndexError> {
    let malformed = |reason: &str| IndexError::malformed(position, reason);

    let parts = item.as_list().ok_or_else(|| malformed("item is not an array"))?;
    let [id, group, ..] = parts else {
        return Err(malformed("item needs an id and a result group"));
    };
    let id = id.as_str().ok_or_else(|| malformed("id is not a string"))?;
    let group = group
        .as_list()
        .ok_or_else(|| malformed("result group is not an array"))?;
    let (label, targets) = group
        .split_first()
        .ok_or_else(|| malformed("result group is empty"))?;
    let label = label
        .as_str()
        .ok_or_else(|| malformed("label is not a string"))?;

    let mut record_targets = Vec::with_capacity(targets.len());
    for (i, target) in targets.iter().enumerate() {
        let fields = target
            .as_list()
            .ok_or_else(|| IndexError::malformed(position, format!("target {i} is not an array")))?;
        let url = fields.first().and_then(Literal::as_str).ok_or_else(|| {
            IndexError::malformed(position, format!("target {i} has no url"))
        })?;
        let scope = fields.get(2).and_then(Literal::as_str).filter(|s| !s.is_empty());

        record_targets.push(RecordTarget {
            url: Some(url.to_string()),
            qualifier: scope.map(|s| text_field(s, options)),
        });
    }

    let name = if options.unescape_ids {
        unescape_id(id)
    } else {
        id.to_string()
    };

    Ok(Record {
        position,
        name: Some(name),
        label: Some(text_field(label, options)),
        targets: Some(record_targets),
    })
}

fn text_field(s: &str, options: &ScriptOptions) -> String {
    if options.decode_entities {
        decode_entities(s)
    } else {
        s.to_string()
    }
}

/// Parses a whole script, with or without the `var name =` prefix.
///
/// # Errors
///
/// Returns a syntax error describing the first problem found.
pub fn parse_script(text: &str) -> ArtifactResult<Literal> {
    let mut parser = ScriptParser::new(text);
    parser.skip_ws();
    if parser.eat_keyword("var") {
        parser.skip_ws();
        parser.identifier()?;
        parser.skip_ws();
        parser.expect(b'=')?;
    }
    parser.skip_ws();
    let literal = parser.value(0)?;
    parser.skip_ws();
    if parser.peek() == Some(b';') {
        parser.pos += 1;
        parser.skip_ws();
    }
    if !parser.is_empty() {
        return Err(ArtifactError::syntax(parser.pos, "unexpected trailing input"));
    }
    Ok(literal)
}

/// Recursive-descent parser over the script bytes.
struct ScriptParser<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> ScriptParser<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn bytes(&self) -> &'a [u8] {
        self.text.as_bytes()
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes().get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn expect(&mut self, byte: u8) -> ArtifactResult<()> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(ArtifactError::syntax(
                self.pos,
                format!("expected `{}`", byte as char),
            ))
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        let rest = &self.bytes()[self.pos..];
        let followed_by_ident = rest
            .get(keyword.len())
            .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_');
        if rest.starts_with(keyword.as_bytes()) && !followed_by_ident {
            self.pos += keyword.len();
            true
        } else {
            false
        }
    }

    fn identifier(&mut self) -> ArtifactResult<&'a str> {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_alphanumeric() || b == b'_' || b == b'$' {
                self.pos += 1;
            } else {
                break;
            }
        }
        if start == self.pos {
            return Err(ArtifactError::syntax(start, "expected identifier"));
        }
        Ok(&self.text[start..self.pos])
    }

    fn value(&mut self, depth: usize) -> ArtifactResult<Literal> {
        match self.peek() {
            Some(b'[') => self.list(depth),
            Some(quote @ (b'\'' | b'"')) => self.string(quote).map(Literal::Str),
            Some(b) if b == b'-' || b.is_ascii_digit() => self.integer(),
            Some(_) => Err(ArtifactError::syntax(self.pos, "expected a value")),
            None => Err(ArtifactError::UnexpectedEof {
                context: "search script",
            }),
        }
    }

    fn list(&mut self, depth: usize) -> ArtifactResult<Literal> {
        if depth >= MAX_DEPTH {
            return Err(ArtifactError::syntax(self.pos, "nesting too deep"));
        }
        self.expect(b'[')?;

        let mut items = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some(b']') {
                self.pos += 1;
                return Ok(Literal::List(items));
            }
            items.push(self.value(depth + 1)?);
            self.skip_ws();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {}
                Some(_) => return Err(ArtifactError::syntax(self.pos, "expected `,` or `]`")),
                None => {
                    return Err(ArtifactError::UnexpectedEof {
                        context: "search script",
                    })
                }
            }
        }
    }

    fn string(&mut self, quote: u8) -> ArtifactResult<String> {
        let start = self.pos;
        self.pos += 1;

        let mut out = String::new();
        let mut chunk_start = self.pos;
        loop {
            let Some(b) = self.peek() else {
                return Err(ArtifactError::syntax(start, "unterminated string"));
            };
            if b == quote {
                out.push_str(&self.text[chunk_start..self.pos]);
                self.pos += 1;
                return Ok(out);
            }
            if b == b'\\' {
                out.push_str(&self.text[chunk_start..self.pos]);
                self.pos += 1;
                out.push(self.escape()?);
                chunk_start = self.pos;
            } else {
                self.pos += 1;
            }
        }
    }

    fn escape(&mut self) -> ArtifactResult<char> {
        let at = self.pos;
        let Some(b) = self.peek() else {
            return Err(ArtifactError::syntax(at, "unterminated escape"));
        };
        self.pos += 1;
        let c = match b {
            b'n' => '\n',
            b't' => '\t',
            b'r' => '\r',
            b'0' => '\0',
            b'u' => {
                let digits = self
                    .text
                    .get(self.pos..self.pos + 4)
                    .ok_or_else(|| ArtifactError::syntax(at, "truncated \\u escape"))?;
                if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
                    return Err(ArtifactError::syntax(at, "invalid \\u escape"));
                }
                let code = u32::from_str_radix(digits, 16)
                    .map_err(|_| ArtifactError::syntax(at, "invalid \\u escape"))?;
                self.pos += 4;
                char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
            }
            b if b.is_ascii() => b as char,
            _ => {
                // Escaped non-ASCII character stands for itself.
                self.pos = at;
                let c = self.text[at..]
                    .chars()
                    .next()
                    .ok_or_else(|| ArtifactError::syntax(at, "unterminated escape"))?;
                self.pos += c.len_utf8();
                c
            }
        };
        Ok(c)
    }

    fn integer(&mut self) -> ArtifactResult<Literal> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        self.text[start..self.pos]
            .parse()
            .map(Literal::Int)
            .map_err(|_| ArtifactError::syntax(start, "invalid integer"))
    }
}

/// Decodes Doxygen's `_XX` id escapes.
///
/// `max_5fsize` becomes `max_size`. An underscore not followed by two hex
/// digits is kept as is.
pub fn unescape_id(id: &str) -> String {
    let bytes = id.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'_' {
            if let Some(byte) = bytes.get(i + 1..i + 3).and_then(hex_byte) {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8(out).unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
}

fn hex_byte(pair: &[u8]) -> Option<u8> {
    let text = std::str::from_utf8(pair).ok()?;
    if !text.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u8::from_str_radix(text, 16).ok()
}

/// Decodes the HTML entities Doxygen writes into labels and scopes.
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = rest
            .find(';')
            .filter(|&end| end <= 10)
            .and_then(|end| entity(&rest[1..end]).map(|c| (c, end)));
        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn entity(name: &str) -> Option<char> {
    match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(value)
        }
    }
}
