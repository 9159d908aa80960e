//! Comment stripping and brace splitting.
//!
//! Both passes keep the original line number on every logical line they emit,
//! so later diagnostics always point back at the author's source.

use super::Line;

/// Strips `//` and `/* */` comments and drops blank lines.
///
/// A raw line starting with `@` outside a block comment passes through
/// untouched, which keeps `@import url("http://...")` intact. On a single line
/// a block comment spans from the first `/*` to the last `*/`. A line such as
/// `a */ b /* c` keeps the text before the open and after the close.
pub fn normalize(source: &str) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut inside_comment = false;

    for (index, raw) in source.lines().enumerate() {
        let number = index + 1;

        if !inside_comment && raw.starts_with('@') {
            push_trimmed(&mut lines, raw, number);
            continue;
        }

        let text = match raw.find("//") {
            Some(pos) => &raw[..pos],
            None => raw,
        };

        let start = text.find("/*");
        let end = text.rfind("*/");

        if inside_comment {
            // Still inside: the rest of the line only counts after the close.
            if let Some(end) = end {
                inside_comment = false;
                push_trimmed(&mut lines, &text[end + 2..], number);
            }
            continue;
        }

        match (start, end) {
            // The slices overlap when the last close comes before the first
            // open; both segments are kept as written.
            (Some(start), Some(end)) => {
                push_trimmed(&mut lines, &text[..start], number);
                push_trimmed(&mut lines, &text[end + 2..], number);
            }
            (Some(start), _) => {
                inside_comment = true;
                push_trimmed(&mut lines, &text[..start], number);
            }
            _ => push_trimmed(&mut lines, text, number),
        }
    }

    lines
}

/// Splits every line containing `{` or `}` so each brace stands on its own line.
pub fn split_braces(lines: Vec<Line>) -> Vec<Line> {
    let mut result = Vec::with_capacity(lines.len());

    for line in lines {
        if line.text == "{" || line.text == "}" || !line.text.contains(['{', '}']) {
            result.push(line);
            continue;
        }

        let mut start = 0;
        for (pos, ch) in line.text.char_indices() {
            if ch == '{' || ch == '}' {
                let segment = &line.text[start..pos];
                match segment.rfind(';') {
                    // Statements ahead of a block header stay on their own line.
                    Some(semi) if ch == '{' => {
                        push_trimmed(&mut result, &segment[..=semi], line.number);
                        push_trimmed(&mut result, &segment[semi + 1..], line.number);
                    }
                    _ => push_trimmed(&mut result, segment, line.number),
                }
                push_trimmed(&mut result, &line.text[pos..pos + 1], line.number);
                start = pos + 1;
            }
        }
        push_trimmed(&mut result, &line.text[start..], line.number);
    }

    result
}

fn push_trimmed(lines: &mut Vec<Line>, text: &str, number: usize) {
    let text = text.trim();
    if !text.is_empty() {
        lines.push(Line::new(text, number));
    }
}
