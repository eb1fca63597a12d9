//! Format-preserving model of a YAML document built from block mappings
//!
//! Only what gets edited is modelled: block mappings become entries, while
//! everything else (comments, blank lines, sequences, block scalars, flow
//! collections) is carried as verbatim text attached to the nearest entry.
//! Serializing an unmodified document reproduces the input byte for byte.

use serde_yaml::Value;
use std::fmt;
use thiserror::Error;

const DEFAULT_INDENT: usize = 2;

/// Errors raised while loading a manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("line {line}: the document root must be a block mapping")]
    UnsupportedRoot { line: usize },

    #[error("could not encode value: {0}")]
    Encode(#[from] serde_yaml::Error),
}

/// An intermediate key on a path exists but does not hold a mapping
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("`{path}` exists but is not a mapping")]
pub struct PathConflict {
    pub path: String,
}

#[derive(Debug, Clone)]
struct Entry {
    /// Blank and comment lines directly above the entry
    leading: Vec<String>,
    /// Unquoted key
    key: String,
    /// The raw `key: value  # comment` line
    header: String,
    body: Body,
}

#[derive(Debug, Clone)]
enum Body {
    /// Nested block mapping on the following lines
    Mapping(Block),
    /// Verbatim continuation lines (possibly none)
    Lines(Vec<String>),
}

#[derive(Debug, Clone, Default)]
struct Block {
    indent: usize,
    entries: Vec<Entry>,
}

/// A parsed YAML document that can be edited by key path
#[derive(Debug, Clone)]
pub struct Document {
    root: Block,
    /// Trivia after the last root entry
    trailing: Vec<String>,
    indent_unit: usize,
    line_ending: &'static str,
    final_newline: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            root: Block::default(),
            trailing: Vec::new(),
            indent_unit: DEFAULT_INDENT,
            line_ending: "\n",
            final_newline: true,
        }
    }
}

impl Document {
    /// Parse document text; an empty string is an empty mapping
    pub fn parse(text: &str) -> Result<Self, ManifestError> {
        let line_ending = if text.contains("\r\n") { "\r\n" } else { "\n" };
        let final_newline = text.is_empty() || text.ends_with('\n');

        let mut lines: Vec<String> = text
            .split('\n')
            .map(|line| match line_ending {
                "\r\n" => line.strip_suffix('\r').unwrap_or(line).to_string(),
                _ => line.to_string(),
            })
            .collect();
        if final_newline {
            lines.pop();
        }

        let mut parser = Parser {
            lines: &lines,
            pos: 0,
        };
        let first = parser.next_content(0);
        let root = match lines.get(first) {
            None => Block::default(),
            Some(line) => {
                let indent = indent_of(line);
                if parse_header(&line[indent..]).is_none() {
                    return Err(ManifestError::UnsupportedRoot { line: first + 1 });
                }
                parser.block(indent)?
            }
        };

        let rest = parser.next_content(parser.pos);
        if rest < lines.len() {
            return Err(parse_error(rest, "unexpected content after the root mapping"));
        }
        let trailing = lines[parser.pos..].to_vec();

        let indent_unit = root
            .entries
            .iter()
            .find_map(|entry| match &entry.body {
                Body::Mapping(child) => Some(child.indent - root.indent),
                Body::Lines(_) => None,
            })
            .unwrap_or(DEFAULT_INDENT);

        Ok(Self {
            root,
            trailing,
            indent_unit,
            line_ending,
            final_newline,
        })
    }

    /// Indentation step used for newly created nesting levels
    pub fn indent_unit(&self) -> usize {
        self.indent_unit
    }

    /// Set `path` to `value`, creating missing intermediates as mappings
    ///
    /// Fails without touching the document when an intermediate exists but is
    /// not a mapping. A `null` or flow-mapping intermediate counts as a mapping.
    pub fn try_set(&mut self, path: &[&str], value: &Value) -> Result<(), PathConflict> {
        // intermediates are rewritten on the way down, so edit a copy
        let mut draft = self.clone();
        draft.set_path(path, value, false)?;
        *self = draft;
        Ok(())
    }

    /// Like [`Document::try_set`], but a conflicting intermediate is replaced
    /// by a fresh mapping, dropping whatever it held before
    pub fn force_set(&mut self, path: &[&str], value: &Value) {
        // cannot fail when forcing
        let _ = self.set_path(path, value, true);
    }

    fn set_path(&mut self, path: &[&str], value: &Value, force: bool) -> Result<(), PathConflict> {
        let Some((last, parents)) = path.split_last() else {
            return Ok(());
        };
        let unit = self.indent_unit;

        // New top-level keys go after everything else, including trailing comments
        let mut leading = if self.root.position(path[0]).is_none() {
            self.take_root_leading()
        } else {
            Vec::new()
        };

        let mut block = &mut self.root;
        for (depth, key) in parents.iter().enumerate() {
            block = block
                .child_block(key, std::mem::take(&mut leading), unit, force)
                .ok_or_else(|| PathConflict {
                    path: path[..=depth].join("."),
                })?;
        }
        block.set_leaf(last, value, leading, unit);
        Ok(())
    }

    fn take_root_leading(&mut self) -> Vec<String> {
        let mut leading = std::mem::take(&mut self.trailing);
        let has_content =
            !self.root.entries.is_empty() || leading.iter().any(|line| !line.trim().is_empty());
        if has_content && leading.last().map_or(true, |line| !line.trim().is_empty()) {
            leading.push(String::new());
        }
        leading
    }

    /// Value at `path`, decoded with serde_yaml
    pub fn get(&self, path: &[&str]) -> Option<Value> {
        let (first, mut remaining) = path.split_first()?;
        let mut block = &self.root;
        let mut entry = block.entry(first)?;

        while let Some((next, tail)) = remaining.split_first() {
            let Body::Mapping(child) = &entry.body else {
                break;
            };
            block = child;
            entry = block.entry(next)?;
            remaining = tail;
        }

        let mut value = entry.value(block.indent)?;
        for key in remaining {
            value = value.get(*key)?.clone();
        }
        Some(value)
    }

    /// String value at `path`, if it is a string scalar
    pub fn get_str(&self, path: &[&str]) -> Option<String> {
        self.get(path)?.as_str().map(str::to_string)
    }

    pub fn contains(&self, path: &[&str]) -> bool {
        self.get(path).is_some()
    }

    /// Top-level keys in document order
    pub fn keys(&self) -> Vec<&str> {
        self.root.entries.iter().map(|e| e.key.as_str()).collect()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = Vec::new();
        self.root.write_lines(&mut lines);
        lines.extend(self.trailing.iter().map(String::as_str));

        if lines.is_empty() {
            return Ok(());
        }
        f.write_str(&lines.join(self.line_ending))?;
        if self.final_newline {
            f.write_str(self.line_ending)?;
        }
        Ok(())
    }
}

impl Block {
    fn new(indent: usize) -> Self {
        Self {
            indent,
            entries: Vec::new(),
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }

    fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.key == key)
    }

    fn write_lines<'a>(&'a self, out: &mut Vec<&'a str>) {
        for entry in &self.entries {
            out.extend(entry.leading.iter().map(String::as_str));
            entry.write_lines(out);
        }
    }

    /// The mapping under `key`, created when missing
    fn child_block(
        &mut self,
        key: &str,
        leading: Vec<String>,
        unit: usize,
        force: bool,
    ) -> Option<&mut Block> {
        let indent = self.indent;
        let child_indent = indent + unit;

        let idx = match self.position(key) {
            Some(idx) => idx,
            None => {
                self.entries.push(Entry {
                    leading,
                    key: key.to_string(),
                    header: format!("{}{}:", pad(indent), render_key(key)),
                    body: Body::Mapping(Block::new(child_indent)),
                });
                self.entries.len() - 1
            }
        };

        let entry = &mut self.entries[idx];
        if !entry.make_mapping(indent, child_indent, unit) {
            if !force {
                return None;
            }
            entry.header = entry.rebuild_header(indent, None);
            entry.body = Body::Mapping(Block::new(child_indent));
        }

        match &mut entry.body {
            Body::Mapping(block) => Some(block),
            Body::Lines(_) => None,
        }
    }

    /// Set `key` to `value`, replacing any previous value but keeping the
    /// original key spelling and trailing comment
    fn set_leaf(&mut self, key: &str, value: &Value, leading: Vec<String>, unit: usize) {
        let indent = self.indent;
        let (inline, body) = render_value(value, indent + unit, unit);

        match self.position(key) {
            Some(idx) => {
                let entry = &mut self.entries[idx];
                entry.header = entry.rebuild_header(indent, inline.as_deref());
                entry.body = body;
            }
            None => {
                let mut header = format!("{}{}:", pad(indent), render_key(key));
                if let Some(inline) = inline {
                    header.push(' ');
                    header.push_str(&inline);
                }
                self.entries.push(Entry {
                    leading,
                    key: key.to_string(),
                    header,
                    body,
                });
            }
        }
    }
}

impl Entry {
    fn write_lines<'a>(&'a self, out: &mut Vec<&'a str>) {
        out.push(&self.header);
        match &self.body {
            Body::Mapping(block) => block.write_lines(out),
            Body::Lines(lines) => out.extend(lines.iter().map(String::as_str)),
        }
    }

    /// Turn a `null` or flow-mapping value into a block mapping in place,
    /// keeping any anchor or tag on the header.
    /// Returns false when the value is something else.
    fn make_mapping(&mut self, indent: usize, child_indent: usize, unit: usize) -> bool {
        let has_body = match &self.body {
            Body::Mapping(_) => return true,
            Body::Lines(lines) => lines.iter().any(|line| !is_trivia(line)),
        };

        let inline = match self.header.get(indent..).and_then(parse_header) {
            Some(header) => header.value.to_string(),
            None => return false,
        };
        let (properties, rest) = split_properties(&inline);
        let properties = Some(properties).filter(|p| !p.is_empty());

        if !has_body && matches!(rest, "" | "~" | "null") {
            self.header = self.rebuild_header(indent, properties);
            self.body = Body::Mapping(Block::new(child_indent));
            return true;
        }

        // Flow mapping, on the header line or spread over the body
        let Some(Value::Mapping(map)) = self.value(indent) else {
            return false;
        };
        let mut block = Block::new(child_indent);
        for (key, value) in &map {
            block.set_leaf(&key_text(key), value, Vec::new(), unit);
        }
        self.header = self.rebuild_header(indent, properties);
        self.body = Body::Mapping(block);
        true
    }

    fn rebuild_header(&self, indent: usize, value: Option<&str>) -> String {
        let value = value.map(|v| format!(" {}", v)).unwrap_or_default();
        match self.header.get(indent..).and_then(parse_header) {
            Some(header) => format!(
                "{}{}:{}{}",
                pad(indent),
                header.raw_key,
                value,
                header.comment
            ),
            None => format!("{}{}:{}", pad(indent), render_key(&self.key), value),
        }
    }

    /// Decode this entry's value by parsing its own text
    fn value(&self, indent: usize) -> Option<Value> {
        let mut lines = Vec::new();
        self.write_lines(&mut lines);
        let text = lines
            .iter()
            .map(|line| match line.get(..indent) {
                Some(prefix) if prefix.bytes().all(|b| b == b' ') => &line[indent..],
                _ => line.trim_start(),
            })
            .collect::<Vec<_>>()
            .join("\n");

        let parsed: Value = serde_yaml::from_str(&text).ok()?;
        parsed.get(self.key.as_str()).cloned()
    }
}

struct Parser<'a> {
    lines: &'a [String],
    pos: usize,
}

impl<'a> Parser<'a> {
    /// Index of the first non-trivia line at or after `from`
    fn next_content(&self, from: usize) -> usize {
        let mut i = from;
        while i < self.lines.len() && is_trivia(&self.lines[i]) {
            i += 1;
        }
        i
    }

    /// Parse entries at exactly `indent`. Trivia after the last entry is left
    /// unconsumed so the enclosing level can attach it to its next entry.
    fn block(&mut self, indent: usize) -> Result<Block, ManifestError> {
        let lines = self.lines;
        let mut block = Block::new(indent);

        loop {
            let start = self.pos;
            let next = self.next_content(start);
            let Some(line) = lines.get(next) else {
                break;
            };

            let line_indent = indent_of(line);
            if line_indent < indent {
                break;
            }
            if line_indent > indent {
                return Err(parse_error(next, "unexpected indentation"));
            }

            let header = parse_header(&line[indent..])
                .ok_or_else(|| parse_error(next, "expected a `key: value` entry"))?;
            let key = header.key;
            // `key: &anchor` and `key: !tag` still open a nested block
            let opens_block = split_properties(header.value).1.is_empty();

            self.pos = next + 1;
            let body = self.body(indent, opens_block)?;
            block.entries.push(Entry {
                leading: lines[start..next].to_vec(),
                key,
                header: line.clone(),
                body,
            });
        }

        Ok(block)
    }

    fn body(&mut self, indent: usize, opens_block: bool) -> Result<Body, ManifestError> {
        let lines = self.lines;
        if opens_block {
            if let Some(line) = lines.get(self.next_content(self.pos)) {
                let child = indent_of(line);
                let content = &line[child..];
                if child > indent && !is_sequence_item(content) && parse_header(content).is_some() {
                    return Ok(Body::Mapping(self.block(child)?));
                }
            }
        }
        Ok(Body::Lines(self.continuation(indent, opens_block)))
    }

    /// Lines belonging to a non-mapping value: anything indented deeper than
    /// the entry, plus `- item` lines at the same indent for an empty header
    fn continuation(&mut self, indent: usize, compact_sequence: bool) -> Vec<String> {
        let lines = self.lines;
        let mut end = self.pos;
        let mut i = self.pos;

        while i < lines.len() {
            let line = &lines[i];
            if is_trivia(line) {
                i += 1;
                continue;
            }
            let line_indent = indent_of(line);
            let deeper = line_indent > indent;
            let sequence = compact_sequence
                && line_indent == indent
                && is_sequence_item(&line[line_indent..]);
            if !(deeper || sequence) {
                break;
            }
            i += 1;
            end = i;
        }

        let body = lines[self.pos..end].to_vec();
        self.pos = end;
        body
    }
}

/// Pieces of a `key: value  # comment` line, indentation removed
struct Header<'a> {
    raw_key: &'a str,
    key: String,
    value: &'a str,
    comment: &'a str,
}

fn parse_header(content: &str) -> Option<Header<'_>> {
    let first = content.chars().next()?;
    if is_sequence_item(content) || "[]{}?&*!|>%@`#,".contains(first) {
        return None;
    }

    let bytes = content.as_bytes();
    let quoted = first == '"' || first == '\'';
    let key_end = if quoted {
        closing_quote(content)? + 1
    } else {
        0
    };

    let mut colon = None;
    for i in key_end..bytes.len() {
        match bytes[i] {
            b':' if matches!(bytes.get(i + 1), None | Some(b' ') | Some(b'\t')) => {
                colon = Some(i);
                break;
            }
            b'#' if i > 0 && matches!(bytes[i - 1], b' ' | b'\t') => return None,
            _ => {}
        }
    }
    let colon = colon?;

    if quoted && !content[key_end..colon].trim().is_empty() {
        return None;
    }
    let raw_key = content[..colon].trim_end();
    if raw_key.is_empty() {
        return None;
    }
    let key = if quoted {
        serde_yaml::from_str::<String>(raw_key)
            .unwrap_or_else(|_| raw_key[1..raw_key.len() - 1].to_string())
    } else {
        raw_key.to_string()
    };

    let rest = &content[colon + 1..];
    let (value, comment) = rest.split_at(comment_start(rest));
    Some(Header {
        raw_key,
        key,
        value: value.trim(),
        comment,
    })
}

/// Split the node properties (`&anchor`, `!tag`) off the front of a value
fn split_properties(value: &str) -> (&str, &str) {
    let mut rest = value;
    while rest.starts_with('&') || rest.starts_with('!') {
        let end = rest.find(|c: char| c == ' ' || c == '\t').unwrap_or(rest.len());
        rest = rest[end..].trim_start();
    }
    (value[..value.len() - rest.len()].trim_end(), rest)
}

/// Byte index of the quote closing the quoted scalar that starts `s`
fn closing_quote(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let quote = *bytes.first()?;
    let mut i = 1;
    while i < bytes.len() {
        let b = bytes[i];
        if quote == b'"' && b == b'\\' {
            i += 2;
            continue;
        }
        if b == quote {
            if quote == b'\'' && bytes.get(i + 1) == Some(&b'\'') {
                i += 2;
                continue;
            }
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Where the trailing comment of a value starts, including the whitespace
/// before `#`; `rest.len()` when there is none
fn comment_start(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    let value_start = rest.len() - rest.trim_start().len();
    let mut i = value_start;

    if matches!(bytes.get(i), Some(b'"') | Some(b'\'')) {
        if let Some(end) = closing_quote(&rest[i..]) {
            i += end + 1;
        }
    }

    let flow = matches!(bytes.get(value_start), Some(b'{') | Some(b'['));
    let mut in_quote: Option<u8> = None;

    while i < bytes.len() {
        let b = bytes[i];
        if flow {
            match in_quote {
                Some(q) if b == q => in_quote = None,
                None if b == b'"' || b == b'\'' => in_quote = Some(b),
                _ => {}
            }
        }
        if b == b'#' && in_quote.is_none() && (i == 0 || matches!(bytes[i - 1], b' ' | b'\t')) {
            let mut start = i;
            while start > 0 && matches!(bytes[start - 1], b' ' | b'\t') {
                start -= 1;
            }
            return start;
        }
        i += 1;
    }
    bytes.len()
}

/// Render a value for placement under a key: an inline part for the header
/// line and/or a body on the following lines
fn render_value(value: &Value, child_indent: usize, unit: usize) -> (Option<String>, Body) {
    match value {
        Value::Mapping(map) if map.is_empty() => (Some("{}".to_string()), Body::Lines(Vec::new())),
        Value::Mapping(map) => {
            let mut block = Block::new(child_indent);
            for (key, value) in map {
                block.set_leaf(&key_text(key), value, Vec::new(), unit);
            }
            (None, Body::Mapping(block))
        }
        Value::Sequence(seq) if seq.is_empty() => (Some("[]".to_string()), Body::Lines(Vec::new())),
        Value::Sequence(_) | Value::Tagged(_) => match serde_yaml::to_string(value) {
            Ok(text) => {
                let lines = text
                    .lines()
                    .map(|line| format!("{}{}", pad(child_indent), line))
                    .collect();
                (None, Body::Lines(lines))
            }
            Err(_) => (Some("null".to_string()), Body::Lines(Vec::new())),
        },
        scalar => (Some(render_scalar(scalar)), Body::Lines(Vec::new())),
    }
}

/// Single-line YAML text for a scalar, quoted when plain style would change its meaning
fn render_scalar(value: &Value) -> String {
    if let Ok(text) = serde_yaml::to_string(value) {
        let text = text.trim_end_matches('\n');
        if !text.contains('\n') {
            return text.to_string();
        }
    }
    match value {
        Value::String(s) => format!(
            "\"{}\"",
            s.replace('\\', "\\\\")
                .replace('"', "\\\"")
                .replace('\n', "\\n")
                .replace('\t', "\\t")
        ),
        _ => "null".to_string(),
    }
}

fn render_key(key: &str) -> String {
    render_scalar(&Value::String(key.to_string()))
}

fn key_text(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => render_scalar(other),
    }
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

fn is_trivia(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || line == "---"
        || line.starts_with("--- ")
        || line == "..."
        || line.starts_with('%')
}

fn is_sequence_item(content: &str) -> bool {
    content == "-" || content.starts_with("- ") || content.starts_with("-\t")
}

fn pad(indent: usize) -> String {
    " ".repeat(indent)
}

fn parse_error(index: usize, message: &str) -> ManifestError {
    ManifestError::Parse {
        line: index + 1,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUBSPEC: &str = r#"name: demo_app
description: "A new Flutter project."
# The following line prevents the package from being accidentally published
publish_to: 'none' # Remove this line if you wish to publish to pub.dev

version: 1.0.0+1

environment:
  sdk: ^3.5.0

dependencies:
  flutter:
    sdk: flutter

  # The following adds the Cupertino Icons font to your application.
  cupertino_icons: ^1.0.8

dev_dependencies:
  flutter_test:
    sdk: flutter
  flutter_lints: ^4.0.0

flutter:

  # The following line ensures that the Material Icons font is
  # included with your application.
  uses-material-design: true

  # To add assets to your application, add an assets section, like this:
  # assets:
  #   - images/a_dot_burr.jpeg
"#;

    fn s(v: &str) -> Value {
        Value::String(v.to_string())
    }

    #[test]
    fn test_roundtrip_is_byte_exact() {
        let inputs = [
            PUBSPEC,
            "",
            "# only a comment\n",
            "a: 1",
            "a: 1\r\nb:\r\n  c: 2\r\n",
            "key: |\n  line one\n\n  line two\nnext: [1, 2]\n",
            "list:\n- a\n- b\nother:\n  - c\n",
            "---\n\"quoted key\": 'x' # c\nplain: value # trailing comment\nurl: http://example.com/#frag\n",
            "outer:\n    inner:\n        deep: true\n    sibling: 1\n\n\n",
        ];
        for input in inputs {
            let doc = Document::parse(input).unwrap();
            assert_eq!(doc.to_string(), input);
        }
    }

    #[test]
    fn test_get_navigates_nested_values() {
        let doc = Document::parse(PUBSPEC).unwrap();
        assert_eq!(doc.get_str(&["name"]).as_deref(), Some("demo_app"));
        assert_eq!(doc.get_str(&["publish_to"]).as_deref(), Some("none"));
        assert_eq!(
            doc.get_str(&["dependencies", "flutter", "sdk"]).as_deref(),
            Some("flutter")
        );
        assert_eq!(
            doc.get_str(&["dependencies", "cupertino_icons"]).as_deref(),
            Some("^1.0.8")
        );
        assert_eq!(doc.get(&["flutter", "uses-material-design"]), Some(Value::Bool(true)));
        assert!(!doc.contains(&["dependencies", "missing"]));
        assert_eq!(
            doc.keys(),
            vec![
                "name",
                "description",
                "publish_to",
                "version",
                "environment",
                "dependencies",
                "dev_dependencies",
                "flutter"
            ]
        );
    }

    #[test]
    fn test_set_adds_sibling_without_disturbing_others() {
        let mut doc = Document::parse(PUBSPEC).unwrap();
        doc.try_set(&["dependencies", "http"], &s("^1.2.2")).unwrap();
        let out = doc.to_string();

        assert!(out.contains("  cupertino_icons: ^1.0.8\n  http: ^1.2.2\n\ndev_dependencies:"));
        assert_eq!(out.replace("  http: ^1.2.2\n", ""), PUBSPEC);
    }

    #[test]
    fn test_set_creates_missing_intermediates() {
        let mut doc = Document::parse("name: x\n").unwrap();
        doc.try_set(&["a", "b", "c"], &s("v")).unwrap();
        assert_eq!(doc.to_string(), "name: x\n\na:\n  b:\n    c: v\n");
    }

    #[test]
    fn test_set_on_empty_document() {
        let mut doc = Document::parse("").unwrap();
        doc.try_set(&["dependencies", "http"], &s("^1.0.0")).unwrap();
        assert_eq!(doc.to_string(), "dependencies:\n  http: ^1.0.0\n");
    }

    #[test]
    fn test_scalar_intermediate_is_a_conflict() {
        let input = "dependencies: not-a-map\nother: 1\n";
        let mut doc = Document::parse(input).unwrap();
        let err = doc.try_set(&["dependencies", "pkg_a"], &s("^1.0.0")).unwrap_err();
        assert_eq!(err.path, "dependencies");
        assert_eq!(doc.to_string(), input);
    }

    #[test]
    fn test_sequence_intermediate_is_a_conflict() {
        let mut doc = Document::parse("dependencies:\n  - a\n  - b\n").unwrap();
        assert!(doc.try_set(&["dependencies", "pkg"], &s("1")).is_err());
    }

    #[test]
    fn test_force_set_replaces_conflicting_subtree() {
        let mut doc = Document::parse("dependencies: \"not-a-map\" # keep\nother: 1\n").unwrap();
        doc.force_set(&["dependencies", "pkg_a"], &s("^1.0.0"));
        assert_eq!(
            doc.to_string(),
            "dependencies: # keep\n  pkg_a: ^1.0.0\nother: 1\n"
        );
    }

    #[test]
    fn test_null_value_becomes_mapping() {
        let mut doc = Document::parse("dev_dependencies:   # tools\nflutter:\n").unwrap();
        doc.try_set(&["dev_dependencies", "mocktail"], &s("^1.0.4")).unwrap();
        assert_eq!(
            doc.to_string(),
            "dev_dependencies:   # tools\n  mocktail: ^1.0.4\nflutter:\n"
        );
    }

    #[test]
    fn test_flow_mapping_is_expanded() {
        let mut doc = Document::parse("dependencies: {a: ^1.0.0, b: {sdk: flutter}}\n").unwrap();
        assert_eq!(doc.get_str(&["dependencies", "a"]).as_deref(), Some("^1.0.0"));

        doc.try_set(&["dependencies", "c"], &s("^3.0.0")).unwrap();
        assert_eq!(
            doc.to_string(),
            "dependencies:\n  a: ^1.0.0\n  b:\n    sdk: flutter\n  c: ^3.0.0\n"
        );
    }

    #[test]
    fn test_anchored_or_tagged_mapping_keeps_entries() {
        for header in ["dependencies: &deps", "dependencies: !!map", "dependencies: &deps !!map"] {
            let input = format!("{}\n  existing_pkg: ^1.0.0\nname: x\n", header);
            let mut doc = Document::parse(&input).unwrap();
            assert_eq!(doc.to_string(), input);
            assert_eq!(
                doc.get_str(&["dependencies", "existing_pkg"]).as_deref(),
                Some("^1.0.0")
            );

            doc.try_set(&["dependencies", "new_pkg"], &s("^2.0.0")).unwrap();
            assert_eq!(
                doc.to_string(),
                format!("{}\n  existing_pkg: ^1.0.0\n  new_pkg: ^2.0.0\nname: x\n", header)
            );
        }
    }

    #[test]
    fn test_multiline_flow_mapping_is_expanded() {
        let input = "dependencies: {\n  existing_pkg: ^1.0.0,\n  other: ^3.0.0 }\nname: x\n";
        let mut doc = Document::parse(input).unwrap();
        assert_eq!(doc.to_string(), input);

        doc.try_set(&["dependencies", "new_pkg"], &s("^2.0.0")).unwrap();
        assert_eq!(
            doc.to_string(),
            "dependencies:\n  existing_pkg: ^1.0.0\n  other: ^3.0.0\n  new_pkg: ^2.0.0\nname: x\n"
        );
    }

    #[test]
    fn test_anchor_on_flow_or_null_mapping_is_kept() {
        let mut doc = Document::parse("deps: &d {a: ^1.0.0}\ndev: &t\n").unwrap();
        doc.try_set(&["deps", "b"], &s("^2.0.0")).unwrap();
        doc.try_set(&["dev", "c"], &s("^3.0.0")).unwrap();
        assert_eq!(
            doc.to_string(),
            "deps: &d\n  a: ^1.0.0\n  b: ^2.0.0\ndev: &t\n  c: ^3.0.0\n"
        );
    }

    #[test]
    fn test_nested_conflict_leaves_document_untouched() {
        let input = "a: {b: x}\n# tail\n";
        let mut doc = Document::parse(input).unwrap();
        let err = doc.try_set(&["a", "b", "c"], &s("v")).unwrap_err();
        assert_eq!(err.path, "a.b");
        assert_eq!(doc.to_string(), input);
    }

    #[test]
    fn test_replacing_leaf_keeps_key_spelling_and_comment() {
        let mut doc = Document::parse("deps:\n  'http': ^0.13.0  # pinned\n").unwrap();
        doc.try_set(&["deps", "http"], &s("^1.2.2")).unwrap();
        assert_eq!(doc.to_string(), "deps:\n  'http': ^1.2.2  # pinned\n");
    }

    #[test]
    fn test_replacing_mapping_with_mapping() {
        let input = "dependencies:\n  flutter:\n    sdk: flutter\n    # note\n  x: 1\n";
        let mut doc = Document::parse(input).unwrap();
        let mut table = serde_yaml::Mapping::new();
        table.insert(s("sdk"), s("flutter"));
        doc.try_set(&["dependencies", "flutter"], &Value::Mapping(table)).unwrap();
        assert_eq!(doc.to_string(), input);
    }

    #[test]
    fn test_values_needing_quotes_are_quoted() {
        let mut doc = Document::parse("").unwrap();
        doc.try_set(&["deps", "ranged"], &s(">=1.0.0 <2.0.0")).unwrap();
        doc.try_set(&["deps", "boolish"], &s("true")).unwrap();
        doc.try_set(&["deps", "hashy"], &s("a #b")).unwrap();
        let out = doc.to_string();

        let parsed: Value = serde_yaml::from_str(&out).unwrap();
        assert_eq!(parsed["deps"]["ranged"], s(">=1.0.0 <2.0.0"));
        assert_eq!(parsed["deps"]["boolish"], s("true"));
        assert_eq!(parsed["deps"]["hashy"], s("a #b"));
    }

    #[test]
    fn test_detected_indent_is_used_for_new_levels() {
        let mut doc = Document::parse("environment:\n    sdk: ^3.5.0\n").unwrap();
        assert_eq!(doc.indent_unit(), 4);
        doc.try_set(&["dependencies", "http"], &s("^1.0.0")).unwrap();
        assert!(doc.to_string().ends_with("\ndependencies:\n    http: ^1.0.0\n"));
    }

    #[test]
    fn test_new_root_key_goes_after_trailing_comments() {
        let mut doc = Document::parse(PUBSPEC).unwrap();
        doc.try_set(&["flutter_scaffold", "template"], &s("bloc")).unwrap();
        let out = doc.to_string();
        assert!(out.starts_with(PUBSPEC));
        assert!(out.ends_with(
            "#   - images/a_dot_burr.jpeg\n\nflutter_scaffold:\n  template: bloc\n"
        ));
    }

    #[test]
    fn test_crlf_is_preserved_for_new_lines() {
        let mut doc = Document::parse("a: 1\r\n").unwrap();
        doc.try_set(&["b"], &s("2")).unwrap();
        assert_eq!(doc.to_string(), "a: 1\r\n\r\nb: '2'\r\n");
    }

    #[test]
    fn test_sequence_root_is_rejected() {
        assert!(matches!(
            Document::parse("# header\n- a\n- b\n"),
            Err(ManifestError::UnsupportedRoot { line: 2 })
        ));
    }

    #[test]
    fn test_bad_indentation_is_rejected() {
        let err = Document::parse("a:\n    b: 1\n  c: 2\n").unwrap_err();
        assert!(matches!(err, ManifestError::Parse { line: 3, .. }), "{:?}", err);
    }

    #[test]
    fn test_parse_header_pieces() {
        let header = parse_header("cupertino_icons: ^1.0.8   # icons").unwrap();
        assert_eq!(header.raw_key, "cupertino_icons");
        assert_eq!(header.key, "cupertino_icons");
        assert_eq!(header.value, "^1.0.8");
        assert_eq!(header.comment, "   # icons");

        let header = parse_header("\"a: b\": 'x # y'").unwrap();
        assert_eq!(header.key, "a: b");
        assert_eq!(header.value, "'x # y'");
        assert_eq!(header.comment, "");

        let header = parse_header("url: http://example.com/#frag").unwrap();
        assert_eq!(header.value, "http://example.com/#frag");

        assert!(parse_header("- item").is_none());
        assert!(parse_header("just text").is_none());
    }
}
