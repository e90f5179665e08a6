//! Single-pass CIR linker
//!
//! One forward pass over the source, each line classified into exactly
//! one CIR kind. Multi-line constructs (span blocks, type blocks,
//! policy blocks) are represented as explicit tagged states: while one
//! is open the linker accumulates fields into a pending node instead of
//! committing lines individually.
//!
//! Consensus discipline: memory precedes type precedes value. The pass
//! never rescans a completed line; the first violation is terminal.

use rift_core::span::DEFAULT_SPAN_BYTES;
use rift_core::{GovernMode, SpanKind};
use crate::cir::{CirKind, CirNode, CirProgram, MAX_NODES, MAX_TRACKED_VARS};

/// Where the pass currently sits
enum BlockState {
    Top,
    SpanBlock {
        kind: SpanKind,
        bytes: Option<u64>,
        opened_line: usize,
        inner_depth: usize,
    },
    TypeBlock {
        name: String,
        inner_depth: usize,
    },
    PolicyBlock {
        inner_depth: usize,
    },
}

/// Link a `.rift` source into a CIR program
pub fn link(source: &str) -> CirProgram {
    Linker::new().run(source)
}

struct Linker {
    nodes: Vec<CirNode>,
    mode: GovernMode,
    state: BlockState,
    flow_depth: usize,
    seen_span: bool,
    vars: Vec<String>,
    error: Option<String>,
    failed: bool,
}

impl Linker {
    fn new() -> Self {
        Self {
            nodes: Vec::new(),
            mode: GovernMode::default(),
            state: BlockState::Top,
            flow_depth: 0,
            seen_span: false,
            vars: Vec::new(),
            error: None,
            failed: false,
        }
    }

    fn run(mut self, source: &str) -> CirProgram {
        for (idx, raw) in source.lines().enumerate() {
            if self.failed {
                break;
            }
            self.classify(idx + 1, raw.trim());
        }

        CirProgram {
            nodes: self.nodes,
            mode: self.mode,
            consensus_ok: !self.failed,
            error: self.error,
        }
    }

    fn classify(&mut self, line_no: usize, line: &str) {
        if self.failed || line.is_empty() {
            return;
        }

        match std::mem::replace(&mut self.state, BlockState::Top) {
            BlockState::SpanBlock { kind, bytes, opened_line, inner_depth } => {
                self.span_block_line(line, kind, bytes, opened_line, inner_depth);
                return;
            }
            BlockState::TypeBlock { name, inner_depth } => {
                self.type_block_line(line_no, line, name, inner_depth);
                return;
            }
            BlockState::PolicyBlock { inner_depth } => {
                self.policy_block_line(line, inner_depth);
                return;
            }
            BlockState::Top => {}
        }

        if let Some(text) = strip_comment(line) {
            self.push(line_no, CirKind::Comment { text });
            return;
        }

        if let Some(rest) = line.strip_prefix("!govern") {
            match rest.trim().parse::<GovernMode>() {
                Ok(mode) => {
                    self.mode = mode;
                    self.push(line_no, CirKind::Govern { mode });
                }
                Err(_) => self.push(line_no, CirKind::Unknown { text: line.to_string() }),
            }
            return;
        }

        if line.starts_with("align span<") || line.starts_with("align span <") {
            self.open_span(line_no, line);
            return;
        }

        if line.starts_with("type ") && line.contains('=') {
            self.open_type(line_no, line);
            return;
        }

        if let Some(rest) = line.strip_prefix("policy_fn on") {
            let name = rest
                .trim()
                .split(|c: char| c.is_whitespace() || c == '{')
                .next()
                .unwrap_or("")
                .to_string();
            self.push(line_no, CirKind::Policy { name });
            if line.contains('{') && !line.contains('}') {
                self.state = BlockState::PolicyBlock { inner_depth: 0 };
            }
            return;
        }

        if starts_flow_keyword(line, "while") {
            self.open_flow(line_no, line, "while");
            return;
        }

        if starts_flow_keyword(line, "if") {
            self.open_flow(line_no, line, "if");
            return;
        }

        if line == "}" {
            if self.flow_depth > 0 {
                self.flow_depth -= 1;
                self.push(line_no, CirKind::BlockClose);
            } else {
                self.push(line_no, CirKind::Unknown { text: line.to_string() });
            }
            return;
        }

        if let Some(rest) = line.strip_prefix("validate(") {
            let arg = rest.split(')').next().unwrap_or("").trim().to_string();
            self.push(line_no, CirKind::Validate { arg });
            return;
        }

        if line.contains(":=") {
            self.commit_assign(line_no, line, ":=");
            return;
        }

        // Deferred quantum assignment links the same way.
        if line.contains("=:") {
            self.commit_assign(line_no, line, "=:");
            return;
        }

        self.push(line_no, CirKind::Unknown { text: line.to_string() });
    }

    // ===== Multi-line block accumulation =====

    fn span_block_line(
        &mut self,
        line: &str,
        kind: SpanKind,
        mut bytes: Option<u64>,
        opened_line: usize,
        mut inner_depth: usize,
    ) {
        if bytes.is_none() {
            bytes = parse_bytes_field(line);
        }

        if line.contains('{') {
            inner_depth += 1;
        }
        if line.contains('}') {
            if inner_depth > 0 {
                inner_depth -= 1;
            } else {
                self.commit_span(opened_line, kind, bytes);
                return;
            }
        }

        self.state = BlockState::SpanBlock { kind, bytes, opened_line, inner_depth };
    }

    fn type_block_line(&mut self, line_no: usize, line: &str, name: String, mut inner_depth: usize) {
        if line.starts_with('}') {
            if inner_depth > 0 {
                inner_depth -= 1;
                self.state = BlockState::TypeBlock { name, inner_depth };
            } else {
                self.seal_type_block();
            }
            return;
        }

        if let Some((field, field_type)) = split_field(line) {
            self.push(
                line_no,
                CirKind::TypeField {
                    type_name: name.clone(),
                    name: field,
                    field_type,
                    is_last_field: false,
                },
            );
        }

        if line.ends_with('{') {
            inner_depth += 1;
        }
        self.state = BlockState::TypeBlock { name, inner_depth };
    }

    fn policy_block_line(&mut self, line: &str, mut inner_depth: usize) {
        if line.contains('{') {
            inner_depth += 1;
        }
        if line.contains('}') {
            if inner_depth > 0 {
                inner_depth -= 1;
            } else {
                return; // block closed, body discarded
            }
        }
        self.state = BlockState::PolicyBlock { inner_depth };
    }

    // ===== Construct openers =====

    fn open_span(&mut self, line_no: usize, line: &str) {
        let kind = match span_kind_of(line) {
            Some(kind) => kind,
            None => {
                self.push(line_no, CirKind::Unknown { text: line.to_string() });
                return;
            }
        };

        match line.find('{') {
            Some(open) => {
                let after = &line[open + 1..];
                if let Some(close) = after.find('}') {
                    let bytes = parse_bytes_field(&after[..close]);
                    self.commit_span(line_no, kind, bytes);
                } else {
                    self.state = BlockState::SpanBlock {
                        kind,
                        bytes: parse_bytes_field(after),
                        opened_line: line_no,
                        inner_depth: 0,
                    };
                }
            }
            None => self.commit_span(line_no, kind, None),
        }
    }

    fn open_type(&mut self, line_no: usize, line: &str) {
        if !self.require_span(line_no, "type definition") {
            return;
        }

        let name = line["type".len()..]
            .split('=')
            .next()
            .unwrap_or("")
            .trim()
            .to_string();
        self.push(line_no, CirKind::TypeDef { name: name.clone() });

        match line.find('{') {
            Some(open) => {
                let after = &line[open + 1..];
                if let Some(close) = after.find('}') {
                    // Single-line record: fields separated by commas.
                    for part in after[..close].split(',') {
                        if let Some((field, field_type)) = split_field(part) {
                            self.push(
                                line_no,
                                CirKind::TypeField {
                                    type_name: name.clone(),
                                    name: field,
                                    field_type,
                                    is_last_field: false,
                                },
                            );
                        }
                    }
                    self.seal_type_block();
                } else {
                    self.state = BlockState::TypeBlock { name, inner_depth: 0 };
                }
            }
            None => {}
        }
    }

    fn open_flow(&mut self, line_no: usize, line: &str, keyword: &str) {
        let after = &line[keyword.len()..];
        let Some((condition, rest)) = extract_parens(after) else {
            self.push(line_no, CirKind::Unknown { text: line.to_string() });
            return;
        };

        let kind = if keyword == "while" {
            CirKind::While { condition }
        } else {
            CirKind::If { condition }
        };
        self.push(line_no, kind);

        let rest = rest.trim_start();
        if let Some(inner) = rest.strip_prefix('{') {
            self.flow_depth += 1;
            let inner = inner.trim();
            if let Some(pos) = inner.rfind('}') {
                let body = inner[..pos].trim();
                if !body.is_empty() {
                    self.classify(line_no, body);
                }
                if !self.failed {
                    self.flow_depth -= 1;
                    self.push(line_no, CirKind::BlockClose);
                }
            } else if !inner.is_empty() {
                self.classify(line_no, inner);
            }
        }
    }

    fn commit_assign(&mut self, line_no: usize, line: &str, op: &str) {
        if !self.require_span(line_no, "assignment") {
            return;
        }

        let Some((name, expr)) = line.split_once(op) else {
            self.push(line_no, CirKind::Unknown { text: line.to_string() });
            return;
        };
        let name = name.trim().to_string();
        let expr = expr.trim().to_string();

        let is_first_use = !self.vars.iter().any(|v| *v == name);
        if is_first_use {
            if self.vars.len() >= MAX_TRACKED_VARS {
                self.failed = true;
                self.error = Some(format!("line {}: variable table limit exceeded", line_no));
                return;
            }
            self.vars.push(name.clone());
        }

        self.push(line_no, CirKind::Assign { name, expr, is_first_use });
    }

    // ===== Commit helpers =====

    fn commit_span(&mut self, line_no: usize, kind: SpanKind, bytes: Option<u64>) {
        self.seen_span = true;
        self.push(
            line_no,
            CirKind::Span {
                kind,
                bytes: bytes.unwrap_or(DEFAULT_SPAN_BYTES),
            },
        );
    }

    fn seal_type_block(&mut self) {
        for node in self.nodes.iter_mut().rev() {
            if let CirKind::TypeField { is_last_field, .. } = &mut node.kind {
                *is_last_field = true;
                break;
            }
        }
    }

    fn require_span(&mut self, line_no: usize, what: &str) -> bool {
        if self.seen_span {
            return true;
        }
        self.failed = true;
        self.error = Some(format!(
            "line {}: {} before span declaration (violates memory-first ordering)",
            line_no, what
        ));
        false
    }

    fn push(&mut self, line_no: usize, kind: CirKind) {
        if self.nodes.len() >= MAX_NODES {
            self.failed = true;
            self.error = Some(format!("line {}: node limit exceeded", line_no));
            return;
        }
        self.nodes.push(CirNode::new(kind, line_no));
    }
}

// ===== Line-level parsing helpers =====

/// Strip `//` and `/* ... */` markers; None when the line is no comment
fn strip_comment(line: &str) -> Option<String> {
    if let Some(rest) = line.strip_prefix("//") {
        return Some(rest.trim().to_string());
    }
    if let Some(rest) = line.strip_prefix("/*") {
        let body = rest.strip_suffix("*/").unwrap_or(rest);
        return Some(body.trim().to_string());
    }
    None
}

/// Span kind between the `<` `>` of an `align span<...>` opener
fn span_kind_of(line: &str) -> Option<SpanKind> {
    let open = line.find('<')?;
    let close = line[open..].find('>')? + open;
    line[open + 1..close].parse().ok()
}

/// `bytes: N` inside a span block body
fn parse_bytes_field(body: &str) -> Option<u64> {
    let idx = body.find("bytes")?;
    let rest = body[idx + "bytes".len()..].trim_start().strip_prefix(':')?;
    let digits: String = rest
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// `name: TYPE` field line, trailing comma tolerated
fn split_field(line: &str) -> Option<(String, String)> {
    let (name, field_type) = line.split_once(':')?;
    let name = name.trim();
    let field_type = field_type.trim().trim_end_matches(',').trim();
    if name.is_empty() || field_type.is_empty() {
        return None;
    }
    Some((name.to_string(), field_type.to_string()))
}

/// True when the line is `keyword (` with optional space between
fn starts_flow_keyword(line: &str, keyword: &str) -> bool {
    line.strip_prefix(keyword)
        .is_some_and(|rest| rest.trim_start().starts_with('('))
}

/// Balanced-paren extraction: returns (inner, rest-after-close)
fn extract_parens(s: &str) -> Option<(String, &str)> {
    let open = s.find('(')?;
    let mut depth = 0usize;
    for (idx, ch) in s[open..].char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    let inner = s[open + 1..open + idx].trim().to_string();
                    return Some((inner, &s[open + idx + 1..]));
                }
            }
            _ => {}
        }
    }
    None
}
