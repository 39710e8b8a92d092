//! Pure text operations shared by every generated artifact.
//!
//! - [`dedent`] normalizes the indentation of a block written inline in source or data.
//! - [`interpolate`] fills `{name}` placeholders from a parameter map.
//!
//! Neither function touches the filesystem or any global state, so the same input
//! always produces the same output.

use std::collections::BTreeMap;

use crate::error::{CourseError, Result};

/// Values for [`interpolate`], keyed by placeholder name.
pub type Params<'a> = BTreeMap<&'a str, String>;

/// Strip the common leading whitespace from every line of `text`.
///
/// Leading blank lines are dropped and whitespace-only lines become empty, so the
/// result never starts with a newline and `dedent(dedent(x)) == dedent(x)`.
///
/// The margin is the shortest indentation among non-blank lines. Every non-blank
/// line must start with the same `margin` characters as the first one; a block
/// that indents some lines with tabs and others with spaces is rejected rather
/// than guessed at.
pub fn dedent(text: &str) -> Result<String> {
    let lines: Vec<&str> = text.split('\n').collect();
    let first = lines
        .iter()
        .position(|line| !is_blank(line))
        .unwrap_or(lines.len());
    let lines = &lines[first..];

    let margin = lines
        .iter()
        .filter(|line| !is_blank(line))
        .map(|line| indentation(line).len())
        .min()
        .unwrap_or(0);

    let prefix = lines
        .iter()
        .find(|line| !is_blank(line))
        .map(|line| &line[..margin])
        .unwrap_or("");

    let mut out = Vec::with_capacity(lines.len());
    for (offset, line) in lines.iter().enumerate() {
        if is_blank(line) {
            out.push("");
            continue;
        }
        if !line.starts_with(prefix) {
            return Err(CourseError::UnsupportedIndentation {
                line: first + offset + 1,
            });
        }
        out.push(&line[margin..]);
    }

    Ok(out.join("\n"))
}

/// Replace every `{name}` placeholder in `template` with `params[name]`.
///
/// A placeholder is `{` + identifier + `}`; any other brace (CSS rules, Verilog
/// concatenations, JSON) is copied through untouched. Substituted values are not
/// scanned again.
pub fn interpolate(template: &str, params: &Params<'_>) -> Result<String> {
    let bytes = template.as_bytes();
    let mut out = String::with_capacity(template.len());
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'{' {
            if let Some(len) = placeholder_len(&bytes[i + 1..]) {
                let name = &template[i + 1..i + 1 + len];
                let value = params
                    .get(name)
                    .ok_or_else(|| CourseError::MissingParameter {
                        name: name.to_string(),
                    })?;
                out.push_str(&template[copied..i]);
                out.push_str(value);
                i += len + 2;
                copied = i;
                continue;
            }
        }
        i += 1;
    }

    out.push_str(&template[copied..]);
    Ok(out)
}

/// [`dedent`] followed by [`interpolate`], the usual way inline templates are rendered.
pub fn render(template: &str, params: &Params<'_>) -> Result<String> {
    interpolate(&dedent(template)?, params)
}

/// Length of the identifier at the start of `rest` if it is closed by `}`.
fn placeholder_len(rest: &[u8]) -> Option<usize> {
    let first = *rest.first()?;
    if !(first.is_ascii_alphabetic() || first == b'_') {
        return None;
    }
    let len = rest
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
        .count();
    (rest.get(len) == Some(&b'}')).then_some(len)
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn indentation(line: &str) -> &str {
    let end = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    &line[..end]
}
