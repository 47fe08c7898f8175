//! Module splitting and logical-line assembly
//!
//! Textual IR is line oriented, but a handful of constructs are not: a
//! `switch` spreads its case table over several lines, `invoke` puts its
//! `to label ... unwind label ...` clause on the next line, and `landingpad`
//! is followed by `catch`/`cleanup`/`filter` clauses. [`logical_lines`]
//! folds a function body into one entry per instruction or block label.

use crate::features::ir_parsing::domain::label_register;

/// One physical line, 1-based
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub number: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSource {
    /// `define` header without the opening brace
    pub header: SourceLine,
    pub body: Vec<SourceLine>,
}

/// The parts of a module the analysis reads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleSource {
    pub aliases: Vec<SourceLine>,
    pub attribute_groups: Vec<SourceLine>,
    pub functions: Vec<FunctionSource>,
}

impl ModuleSource {
    pub fn split(text: &str) -> Self {
        let mut module = ModuleSource::default();
        let mut lines = text.lines().enumerate();

        while let Some((index, raw)) = lines.next() {
            let line = strip_comment(raw).trim();
            let number = index + 1;

            if line.starts_with("define ") || line == "define" {
                let mut header = line.to_string();
                while !header.ends_with('{') {
                    match lines.next() {
                        Some((_, next)) => {
                            header.push(' ');
                            header.push_str(strip_comment(next).trim());
                        }
                        None => break,
                    }
                }
                let header = header.trim_end_matches('{').trim_end().to_string();

                let mut body = Vec::new();
                for (body_index, body_raw) in lines.by_ref() {
                    if body_raw.trim() == "}" {
                        break;
                    }
                    body.push(SourceLine {
                        number: body_index + 1,
                        text: body_raw.to_string(),
                    });
                }

                module.functions.push(FunctionSource {
                    header: SourceLine {
                        number,
                        text: header,
                    },
                    body,
                });
            } else if line.starts_with("attributes #") {
                module.attribute_groups.push(SourceLine {
                    number,
                    text: line.to_string(),
                });
            } else if is_alias_line(line) {
                module.aliases.push(SourceLine {
                    number,
                    text: line.to_string(),
                });
            }
        }

        module
    }
}

fn is_alias_line(line: &str) -> bool {
    line.starts_with('@')
        && line.contains('=')
        && line.split_whitespace().any(|word| word == "alias")
}

/// Cut a `;` comment, ignoring semicolons inside quoted strings
pub fn strip_comment(line: &str) -> &str {
    let mut in_quotes = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Block label at the start of a line (`5:`, `entry:`, `"a b":`)
pub fn block_label(line: &str) -> Option<&str> {
    let end = if let Some(rest) = line.strip_prefix('"') {
        rest.find('"')? + 2
    } else {
        line.find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '$' | '.' | '_')))?
    };
    if end == 0 || line[end..].chars().next() != Some(':') {
        return None;
    }
    Some(&line[..end])
}

/// Pre-3.x style `; <label>:12:` marker
fn legacy_label(raw: &str) -> Option<&str> {
    let rest = raw.trim_start().strip_prefix("; <label>:")?;
    let end = rest.find(':').unwrap_or(rest.len());
    let label = &rest[..end];
    (!label.is_empty()).then_some(label)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogicalLine {
    /// Block label in register form (`%5`)
    Label(String),
    Instruction(SourceLine),
}

fn bracket_depth(text: &str) -> i32 {
    let mut depth = 0;
    let mut in_quotes = false;
    for c in text.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            '[' if !in_quotes => depth += 1,
            ']' if !in_quotes => depth -= 1,
            _ => {}
        }
    }
    depth
}

fn is_continuation(text: &str) -> bool {
    text.starts_with("to ") || text.starts_with("unwind ")
}

fn is_landingpad(text: &str) -> bool {
    let keyword = match text.split_once('=') {
        Some((lhs, rhs)) if lhs.trim_start().starts_with('%') => rhs,
        _ => text,
    };
    keyword.trim_start().starts_with("landingpad")
}

fn is_landingpad_clause(text: &str) -> bool {
    ["catch ", "cleanup", "filter "]
        .iter()
        .any(|prefix| text.starts_with(prefix))
}

/// Calls to debug-info and lifetime markers carry nothing the analysis needs
fn is_ignored_intrinsic(text: &str) -> bool {
    text.contains("@llvm.dbg.") || text.contains("@llvm.lifetime.")
}

/// Fold a function body into labels and complete instruction lines
pub fn logical_lines(body: &[SourceLine]) -> Vec<LogicalLine> {
    let mut result = Vec::new();
    let mut pending: Option<SourceLine> = None;
    let mut depth = 0;
    let mut in_landingpad = false;

    for raw in body {
        if let Some(label) = legacy_label(&raw.text) {
            flush(&mut result, &mut pending);
            result.push(LogicalLine::Label(label_register(label)));
            continue;
        }

        let text = strip_comment(&raw.text).trim();
        if text.is_empty() {
            continue;
        }

        if let Some(open) = pending.as_mut() {
            if depth > 0 || is_continuation(text) {
                open.text.push(' ');
                open.text.push_str(text);
                depth += bracket_depth(text);
                continue;
            }
        }

        if in_landingpad && is_landingpad_clause(text) {
            continue;
        }
        in_landingpad = false;

        flush(&mut result, &mut pending);

        if let Some(label) = block_label(text) {
            result.push(LogicalLine::Label(label_register(label)));
            continue;
        }
        if is_landingpad(text) {
            in_landingpad = true;
            continue;
        }

        depth = bracket_depth(text);
        pending = Some(SourceLine {
            number: raw.number,
            text: text.to_string(),
        });
    }

    flush(&mut result, &mut pending);
    result
        .into_iter()
        .filter(|line| match line {
            LogicalLine::Instruction(source) => !is_ignored_intrinsic(&source.text),
            LogicalLine::Label(_) => true,
        })
        .collect()
}

fn flush(result: &mut Vec<LogicalLine>, pending: &mut Option<SourceLine>) {
    if let Some(line) = pending.take() {
        result.push(LogicalLine::Instruction(line));
    }
}
