//! Template directive language.
//!
//! A template is a (possibly multi-line) pattern with directives between
//! `%<` and `>`:
//!
//! | directive              | meaning                                                  |
//! |------------------------|----------------------------------------------------------|
//! | `%<name>`, `%<a.b>`    | render a child node, or stringify a scalar               |
//! | `%<name:join ', '>`    | render a sequence, joined with the quoted separator      |
//! | `%<name:lines>`        | one member per line                                      |
//! | `%<name:stmts>`        | one statement per line, simple ones terminated           |
//! | `%<name:paragraphs>`   | one member per paragraph (blank line between)            |
//! | `%<@name>`             | render a semantic type through the type table            |
//! | `%<.name>`             | optional: the profile's present/fallback pair for `name` |
//! | `%<#name>`             | call the profile override `name`                         |
//!
//! Templates are written with four spaces per indentation level; each level
//! becomes one profile indent unit relative to the render depth. Lines whose
//! directives all render to nothing are dropped, and blank template lines
//! are kept only directly after a line that produced directive output.

mod render;

pub use render::{Renderer, single_return};

use crate::error::TemplateError;

/// A parsed template, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    lines: Vec<Line>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Line {
    level: usize,
    segments: Vec<Segment>,
}

impl Line {
    fn is_blank(&self) -> bool {
        self.segments.is_empty()
    }

    fn has_directive(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Directive(_)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Directive(Directive),
}

/// A dotted attribute path such as `iterators.index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path(Vec<String>);

impl Path {
    pub fn parse(source: &str) -> Option<Self> {
        let parts: Vec<String> = source.split('.').map(str::to_string).collect();
        parts.iter().all(|p| is_identifier(p)).then_some(Path(parts))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

/// How a sequence attribute is joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinMode {
    /// Inline, with a separator between members.
    Separator(String),
    /// One member per line.
    Lines,
    /// One statement per line; simple statements get the profile terminator.
    Statements,
    /// Members separated by a blank line.
    Paragraphs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Directive {
    Placeholder(Path),
    Join { path: Path, mode: JoinMode },
    Type(Path),
    Optional(String),
    Override(String),
}

/// Width of one indentation level in template source.
const SOURCE_INDENT: usize = 4;

impl Template {
    /// Parse a template. `owner` names the table entry, for error messages.
    pub fn parse(owner: &str, source: &str) -> Result<Self, TemplateError> {
        let raw: Vec<&str> = source.lines().collect();
        let start = raw.iter().position(|l| !l.trim().is_empty());
        let end = raw.iter().rposition(|l| !l.trim().is_empty());
        let (start, end) = match (start, end) {
            (Some(s), Some(e)) => (s, e),
            _ => return Ok(Template { lines: vec![] }),
        };
        let raw = &raw[start..=end];

        let margin = raw
            .iter()
            .filter(|l| !l.trim().is_empty())
            .map(|l| leading_spaces(l))
            .min()
            .unwrap_or(0);

        let mut lines = Vec::with_capacity(raw.len());
        for line in raw {
            if line.trim().is_empty() {
                lines.push(Line {
                    level: 0,
                    segments: vec![],
                });
                continue;
            }
            let indent = leading_spaces(line);
            lines.push(Line {
                level: (indent - margin) / SOURCE_INDENT,
                segments: parse_segments(owner, &line[indent..])?,
            });
        }
        Ok(Template { lines })
    }

    /// Whether the template has no content at all.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

fn leading_spaces(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

fn parse_segments(owner: &str, line: &str) -> Result<Vec<Segment>, TemplateError> {
    let mut segments = Vec::new();
    let mut rest = line;
    while let Some(open) = rest.find("%<") {
        if open > 0 {
            segments.push(Segment::Text(rest[..open].to_string()));
        }
        let body_start = open + 2;
        let close = find_close(&rest[body_start..]).ok_or_else(|| TemplateError::Unterminated {
            owner: owner.to_string(),
            source_text: line.to_string(),
        })?;
        let body = &rest[body_start..body_start + close];
        segments.push(Segment::Directive(parse_directive(owner, body)?));
        rest = &rest[body_start + close + 1..];
    }
    if !rest.is_empty() {
        segments.push(Segment::Text(rest.to_string()));
    }
    Ok(segments)
}

/// Position of the `>` closing a directive, skipping quoted separators.
fn find_close(body: &str) -> Option<usize> {
    let mut quoted = false;
    for (i, c) in body.char_indices() {
        match c {
            '\'' => quoted = !quoted,
            '>' if !quoted => return Some(i),
            _ => {}
        }
    }
    None
}

fn parse_directive(owner: &str, body: &str) -> Result<Directive, TemplateError> {
    let invalid = || TemplateError::InvalidDirective {
        owner: owner.to_string(),
        directive: body.to_string(),
    };

    if let Some(name) = body.strip_prefix('.') {
        return is_identifier(name)
            .then(|| Directive::Optional(name.to_string()))
            .ok_or_else(invalid);
    }
    if let Some(name) = body.strip_prefix('#') {
        return is_identifier(name)
            .then(|| Directive::Override(name.to_string()))
            .ok_or_else(invalid);
    }
    if let Some(path) = body.strip_prefix('@') {
        return Path::parse(path).map(Directive::Type).ok_or_else(invalid);
    }

    let Some((path, mode)) = body.split_once(':') else {
        return Path::parse(body)
            .map(Directive::Placeholder)
            .ok_or_else(invalid);
    };
    let path = Path::parse(path).ok_or_else(invalid)?;
    let mode = match mode {
        "lines" => JoinMode::Lines,
        "stmts" => JoinMode::Statements,
        "paragraphs" => JoinMode::Paragraphs,
        _ => {
            let separator = mode
                .strip_prefix("join ")
                .and_then(|s| s.trim().strip_prefix('\''))
                .and_then(|s| s.strip_suffix('\''))
                .ok_or_else(invalid)?;
            JoinMode::Separator(separator.to_string())
        }
    };
    Ok(Directive::Join { path, mode })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> Path {
        Path::parse(s).unwrap()
    }

    #[test]
    fn test_parse_inline() {
        let t = Template::parse("call", "%<function>(%<args:join ', '>)").unwrap();
        assert_eq!(t.lines.len(), 1);
        assert_eq!(
            t.lines[0].segments,
            vec![
                Segment::Directive(Directive::Placeholder(path("function"))),
                Segment::Text("(".into()),
                Segment::Directive(Directive::Join {
                    path: path("args"),
                    mode: JoinMode::Separator(", ".into()),
                }),
                Segment::Text(")".into()),
            ]
        );
    }

    #[test]
    fn test_parse_separator_with_angle_bracket() {
        let t = Template::parse("x", "%<items:join ' > '>").unwrap();
        assert_eq!(
            t.lines[0].segments,
            vec![Segment::Directive(Directive::Join {
                path: path("items"),
                mode: JoinMode::Separator(" > ".into()),
            })]
        );
    }

    #[test]
    fn test_parse_levels_and_blank_lines() {
        let t = Template::parse(
            "while_statement",
            "
            while (%<test>)
            {
                %<block:stmts>
            }

            done",
        )
        .unwrap();
        let levels: Vec<_> = t.lines.iter().map(|l| l.level).collect();
        assert_eq!(levels, vec![0, 0, 1, 0, 0, 0]);
        assert!(t.lines[4].is_blank());
        assert!(t.lines[2].has_directive());
        assert!(!t.lines[1].has_directive());
    }

    #[test]
    fn test_parse_directive_kinds() {
        let t = Template::parse("x", "%<.base>%<#params>%<@return_type>%<iterators.index>").unwrap();
        assert_eq!(
            t.lines[0].segments,
            vec![
                Segment::Directive(Directive::Optional("base".into())),
                Segment::Directive(Directive::Override("params".into())),
                Segment::Directive(Directive::Type(path("return_type"))),
                Segment::Directive(Directive::Placeholder(path("iterators.index"))),
            ]
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Template::parse("x", "%<name"),
            Err(TemplateError::Unterminated { .. })
        ));
        assert!(matches!(
            Template::parse("x", "%<Name>"),
            Err(TemplateError::InvalidDirective { .. })
        ));
        assert!(matches!(
            Template::parse("x", "%<args:join ,>"),
            Err(TemplateError::InvalidDirective { .. })
        ));
        assert!(matches!(
            Template::parse("x", "%<.a.b>"),
            Err(TemplateError::InvalidDirective { .. })
        ));
    }

    #[test]
    fn test_empty_template() {
        assert!(Template::parse("null", "").unwrap().is_empty());
        assert!(!Template::parse("null", "null").unwrap().is_empty());
    }
}
