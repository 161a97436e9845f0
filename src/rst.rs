//! Block-level reStructuredText reader.
//!
//! Covers what proposal documents actually use: adorned section titles, paragraphs, literal
//! blocks, block quotes, bullet/enumerated/definition/field lists, comments and directives,
//! and transitions. Inline markup is reduced to its plain text the way docutils' `astext()`
//! renders it. Anything unrecognised degrades to a paragraph rather than failing.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// A parsed document: its top-level nodes in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Doctree {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Section { title: String, children: Vec<Node> },
    Paragraph(String),
    LiteralBlock(String),
    BlockQuote(Vec<Node>),
    BulletList(Vec<Vec<Node>>),
    EnumeratedList(Vec<Vec<Node>>),
    DefinitionList(Vec<(String, Vec<Node>)>),
    FieldList(Vec<(String, String)>),
    /// Comments, directives and hyperlink targets; their body is kept verbatim.
    Comment(String),
    Transition,
}

/// A title's adornment. Levels are assigned in the order styles are first seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Style {
    adornment: char,
    overline: bool,
}

enum Block {
    Title { text: String, style: Style },
    Node(Node),
}

pub fn parse(text: &str) -> Doctree {
    let lines: Vec<String> = text.lines().map(expand_tabs).collect();
    Doctree {
        nodes: nest_sections(parse_blocks(&lines, true)),
    }
}

/// Parse a nested body (list item, block quote, definition). Titles are not allowed there.
fn parse_body(lines: &[String]) -> Vec<Node> {
    parse_blocks(lines, false)
        .into_iter()
        .filter_map(|b| match b {
            Block::Node(n) => Some(n),
            Block::Title { .. } => None,
        })
        .collect()
}

fn parse_blocks(lines: &[String], sections: bool) -> Vec<Block> {
    static ENUMERATOR_RE: Lazy<Regex> =
        Lazy::new(|| {
            Regex::new(concat!(
                r"^(?:\((?:\d+|#|[A-Za-z]|[ivxlcdmIVXLCDM]+)\)",
                r"|(?:\d+|#|[A-Za-z]|[ivxlcdmIVXLCDM]+)[.)]) +(.*)$",
            ))
            .unwrap()
        });
    static FIELD_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^:([^:\s][^:]*):(?:\s+(.*))?$").unwrap());

    let mut out = Vec::new();
    let mut literal_next = false;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].as_str();
        if is_blank(line) {
            i += 1;
            continue;
        }
        let expect_literal = std::mem::take(&mut literal_next);

        // Indented block: literal after `::`, otherwise a quote.
        if indent_of(line) > 0 {
            let end = indented_end(lines, i, 1);
            let body = dedent(&lines[i..end]);
            let node = if expect_literal {
                Node::LiteralBlock(body.join("\n"))
            } else {
                Node::BlockQuote(parse_body(&body))
            };
            push(&mut out, node);
            i = end;
            continue;
        }

        if line == ".." || line.starts_with(".. ") {
            let end = indented_end(lines, i + 1, 1);
            let mut body = vec![line[2..].trim().to_string()];
            body.extend(dedent(&lines[i + 1..end]));
            push(&mut out, Node::Comment(body.join("\n").trim().to_string()));
            i = end;
            continue;
        }

        if let Some(c) = adornment_char(line).filter(|_| line.chars().count() >= 4) {
            // Overline, title, underline.
            if sections
                && i + 2 < lines.len()
                && !is_blank(&lines[i + 1])
                && adornment_char(&lines[i + 2]) == Some(c)
            {
                out.push(Block::Title {
                    text: strip_inline(lines[i + 1].trim()),
                    style: Style {
                        adornment: c,
                        overline: true,
                    },
                });
                i += 3;
                continue;
            }
            if lines.get(i + 1).is_none_or(|next| is_blank(next)) {
                push(&mut out, Node::Transition);
                i += 1;
                continue;
            }
        }

        if let Some(marker) = bullet_marker(line) {
            let mut items = Vec::new();
            while i < lines.len() && bullet_marker(&lines[i]) == Some(marker) {
                let end = indented_end(lines, i + 1, 2);
                let mut body = vec![lines[i][marker.len_utf8() + 1..].trim_start().to_string()];
                body.extend(dedent(&lines[i + 1..end]));
                items.push(parse_body(&body));
                i = skip_blank(lines, end);
            }
            push(&mut out, Node::BulletList(items));
            continue;
        }

        if ENUMERATOR_RE.is_match(line) && starts_list(lines, i, &ENUMERATOR_RE) {
            let mut items = Vec::new();
            while let Some(caps) = lines.get(i).and_then(|l| ENUMERATOR_RE.captures(l)) {
                let end = indented_end(lines, i + 1, 1);
                let mut body = vec![caps[1].to_string()];
                body.extend(dedent(&lines[i + 1..end]));
                items.push(parse_body(&body));
                i = skip_blank(lines, end);
            }
            push(&mut out, Node::EnumeratedList(items));
            continue;
        }

        if FIELD_RE.is_match(line) {
            let mut fields = Vec::new();
            while let Some(caps) = lines.get(i).and_then(|l| FIELD_RE.captures(l)) {
                let end = indented_end(lines, i + 1, 1);
                let mut value = vec![caps.get(2).map_or("", |m| m.as_str()).to_string()];
                value.extend(dedent(&lines[i + 1..end]));
                fields.push((
                    strip_inline(caps[1].trim()),
                    strip_inline(value.join("\n").trim()),
                ));
                i = skip_blank(lines, end);
            }
            push(&mut out, Node::FieldList(fields));
            continue;
        }

        if sections
            && let Some(under) = lines.get(i + 1)
            && let Some(c) = adornment_char(under)
            && is_underline(under, line)
        {
            out.push(Block::Title {
                text: strip_inline(line.trim()),
                style: Style {
                    adornment: c,
                    overline: false,
                },
            });
            i += 2;
            continue;
        }

        // A single text line directly followed by indented text is a definition list item.
        if lines
            .get(i + 1)
            .is_some_and(|next| !is_blank(next) && indent_of(next) > 0)
        {
            let end = indented_end(lines, i + 1, 1);
            let definition = parse_body(&dedent(&lines[i + 1..end]));
            push(
                &mut out,
                Node::DefinitionList(vec![(strip_inline(line), definition)]),
            );
            i = end;
            continue;
        }

        let mut end = i + 1;
        while end < lines.len() && !is_blank(&lines[end]) && indent_of(&lines[end]) == 0 {
            end += 1;
        }
        let text = lines[i..end].join("\n");
        i = end;

        let text = match text.strip_suffix("::") {
            Some(rest) => {
                literal_next = true;
                if rest.trim().is_empty() {
                    continue;
                } else if rest.ends_with(char::is_whitespace) {
                    rest.trim_end().to_string()
                } else {
                    format!("{rest}:")
                }
            }
            None => text,
        };
        push(&mut out, Node::Paragraph(strip_inline(&text)));
    }

    out
}

/// Append a node, folding consecutive definition list items into one list.
fn push(out: &mut Vec<Block>, node: Node) {
    if let Node::DefinitionList(items) = node {
        if let Some(Block::Node(Node::DefinitionList(existing))) = out.last_mut() {
            existing.extend(items);
        } else {
            out.push(Block::Node(Node::DefinitionList(items)));
        }
        return;
    }
    out.push(Block::Node(node));
}

/// Turn the flat title/node stream into nested sections.
fn nest_sections(blocks: Vec<Block>) -> Vec<Node> {
    let mut styles: Vec<Style> = Vec::new();
    let mut root = Vec::new();
    // (level, title, children) of every open section, outermost first.
    let mut open: Vec<(usize, String, Vec<Node>)> = Vec::new();

    fn close(open: &mut Vec<(usize, String, Vec<Node>)>, root: &mut Vec<Node>) {
        if let Some((_, title, children)) = open.pop() {
            let section = Node::Section { title, children };
            match open.last_mut() {
                Some((_, _, parent)) => parent.push(section),
                None => root.push(section),
            }
        }
    }

    for block in blocks {
        match block {
            Block::Title { text, style } => {
                let level = match styles.iter().position(|s| *s == style) {
                    Some(level) => level,
                    None => {
                        styles.push(style);
                        styles.len() - 1
                    }
                };
                while open.last().is_some_and(|(l, _, _)| *l >= level) {
                    close(&mut open, &mut root);
                }
                open.push((level, text, Vec::new()));
            }
            Block::Node(node) => match open.last_mut() {
                Some((_, _, children)) => children.push(node),
                None => root.push(node),
            },
        }
    }
    while !open.is_empty() {
        close(&mut open, &mut root);
    }
    root
}

/// Reduce inline markup to plain text.
fn strip_inline(text: &str) -> String {
    static INLINE_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(concat!(
            r"``(?P<literal>.+?)``",
            r"|:(?P<role>[A-Za-z][\w+.-]*):`(?P<role_text>[^`]+)`",
            r"|\[(?P<footnote>\d+|#[\w-]*|\*|[A-Za-z][\w.-]*)\]_",
            r"|\|(?P<substitution>[^|\s][^|]*)\|_{0,2}",
            r"|`(?P<reference>[^`]+)`__?",
            r"|`(?P<interpreted>[^`]+)`",
            r"|\*\*(?P<strong>[^*]+)\*\*",
            r"|\*(?P<emphasis>[^*\s][^*]*)\*",
            r"|\b(?P<name>[A-Za-z0-9](?:[\w.-]*[A-Za-z0-9])?)__?(?P<after>[\s.,;:!?)\]]|$)",
        ))
        .unwrap()
    });

    INLINE_RE
        .replace_all(text, |caps: &Captures| {
            if let Some(m) = caps.name("literal") {
                return m.as_str().to_string();
            }
            if let Some(m) = caps.name("role_text") {
                let (shown, explicit) = split_target(m.as_str());
                return match caps.name("role").map(|r| r.as_str()) {
                    Some("pep" | "PEP") if !explicit => format!("PEP {shown}"),
                    Some("rfc" | "RFC") if !explicit => format!("RFC {shown}"),
                    _ => shown.to_string(),
                };
            }
            if let Some(m) = caps.name("footnote") {
                // Auto-numbered and auto-symbol labels render as nothing.
                let label = m.as_str();
                return if label.starts_with('#') || label == "*" {
                    String::new()
                } else {
                    label.to_string()
                };
            }
            if let Some(m) = caps.name("substitution") {
                return m.as_str().to_string();
            }
            if let Some(m) = caps.name("reference") {
                return split_target(m.as_str()).0.to_string();
            }
            if let Some(m) = caps
                .name("interpreted")
                .or_else(|| caps.name("strong"))
                .or_else(|| caps.name("emphasis"))
            {
                return m.as_str().to_string();
            }
            format!(
                "{}{}",
                caps.name("name").map_or("", |m| m.as_str()),
                caps.name("after").map_or("", |m| m.as_str())
            )
        })
        .into_owned()
}

/// Split `title <target>` into the shown text; the bool says whether a title was given.
fn split_target(s: &str) -> (&str, bool) {
    if let Some(body) = s.strip_suffix('>')
        && let Some(open) = body.rfind('<')
    {
        let title = body[..open].trim();
        return if title.is_empty() {
            (&body[open + 1..], false)
        } else {
            (title, true)
        };
    }
    (s, false)
}

fn expand_tabs(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut col = 0;
    for c in line.chars() {
        if c == '\t' {
            let pad = 8 - col % 8;
            out.extend(std::iter::repeat_n(' ', pad));
            col += pad;
        } else {
            out.push(c);
            col += 1;
        }
    }
    out.truncate(out.trim_end().len());
    out
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

/// End (exclusive) of the run starting at `start` whose non-blank lines are indented by at
/// least `min`. Trailing blank lines are not part of the run.
fn indented_end(lines: &[String], start: usize, min: usize) -> usize {
    let mut end = start;
    for (k, line) in lines.iter().enumerate().skip(start) {
        if is_blank(line) {
            continue;
        }
        if indent_of(line) < min {
            break;
        }
        end = k + 1;
    }
    end
}

fn skip_blank(lines: &[String], mut i: usize) -> usize {
    while lines.get(i).is_some_and(|l| is_blank(l)) {
        i += 1;
    }
    i
}

fn dedent(lines: &[String]) -> Vec<String> {
    let cut = lines
        .iter()
        .filter(|l| !is_blank(l))
        .map(|l| indent_of(l))
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|l| if is_blank(l) { String::new() } else { l[cut..].to_string() })
        .collect()
}

/// The repeated punctuation character of an adornment line, e.g. `=` for `=====`.
fn adornment_char(line: &str) -> Option<char> {
    let first = line.chars().next()?;
    (first.is_ascii_punctuation() && line.chars().all(|c| c == first)).then_some(first)
}

fn is_underline(under: &str, title: &str) -> bool {
    let width = under.chars().count();
    adornment_char(title).is_none() && (width >= title.trim().chars().count() || width >= 4)
}

fn bullet_marker(line: &str) -> Option<char> {
    let mut chars = line.chars();
    let marker = chars.next().filter(|c| matches!(c, '-' | '*' | '+' | '•'))?;
    (chars.next() == Some(' ')).then_some(marker)
}

/// An enumerator only opens a list when the next line can belong to it.
fn starts_list(lines: &[String], i: usize, enumerator: &Regex) -> bool {
    lines
        .get(i + 1)
        .is_none_or(|next| is_blank(next) || indent_of(next) > 0 || enumerator.is_match(next))
}
