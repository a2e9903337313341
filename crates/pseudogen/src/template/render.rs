//! Template rendering against a node and a profile.

use super::{Directive, JoinMode, Path, Segment, Template};
use crate::error::GenerateError;
use crate::profile::{Entry, Profile};
use crate::tree::{Attr, Node, PseudoType, Tag};
use std::collections::HashSet;

/// Renders nodes through one profile.
///
/// `depth` is the indentation depth of the line a node starts on. The first
/// line of any rendered fragment carries no indentation; the caller has
/// already positioned it.
pub struct Renderer<'p> {
    profile: &'p Profile,
    declared: HashSet<String>,
}

impl<'p> Renderer<'p> {
    pub fn new(profile: &'p Profile) -> Self {
        Self {
            profile,
            declared: HashSet::new(),
        }
    }

    /// Type names the module itself declares (classes, custom exceptions).
    /// These render verbatim when the type table has no entry for them.
    pub fn declaring(mut self, names: impl IntoIterator<Item = String>) -> Self {
        self.declared.extend(names);
        self
    }

    pub fn profile(&self) -> &'p Profile {
        self.profile
    }

    pub fn indent(&self, depth: usize) -> String {
        self.profile.indent().at(depth)
    }

    /// Render one node by its tag's table entry.
    pub fn render(&self, node: &Node, depth: usize) -> Result<String, GenerateError> {
        let tag = node.tag();
        match self.profile.entry(tag) {
            Some(Entry::Template(template)) => self.render_template(template, node, depth),
            Some(Entry::Switch(switch)) => {
                let key = self.discriminant(node, &switch.on)?;
                let template =
                    switch
                        .select(&key)
                        .ok_or_else(|| GenerateError::DiscriminantMismatch {
                            tag,
                            discriminant: key.clone(),
                        })?;
                self.render_template(template, node, depth)
            }
            None => Err(GenerateError::NoTemplate(tag)),
        }
    }

    /// Render `template` with `node` supplying the attributes.
    pub fn render_template(
        &self,
        template: &Template,
        node: &Node,
        depth: usize,
    ) -> Result<String, GenerateError> {
        let mut out: Vec<String> = Vec::with_capacity(template.lines.len());
        let mut last_had_directive = false;
        let mut pending_blank = false;
        // A dropped line between a blank and plain text voids the blank.
        let mut dropped_since_blank = false;

        for line in &template.lines {
            if line.is_blank() {
                pending_blank |= last_had_directive;
                dropped_since_blank = false;
                continue;
            }
            let level = depth + line.level;
            let mut content = String::new();
            for segment in &line.segments {
                match segment {
                    Segment::Text(text) => content.push_str(text),
                    Segment::Directive(directive) => {
                        content.push_str(&self.directive(directive, node, level)?)
                    }
                }
            }
            if line.has_directive() && content.trim().is_empty() {
                dropped_since_blank = true;
                continue;
            }
            if pending_blank && (line.has_directive() || !dropped_since_blank) {
                out.push(String::new());
            }
            pending_blank = false;
            dropped_since_blank = false;
            if out.is_empty() {
                out.push(content);
            } else {
                out.push(format!("{}{content}", self.indent(level)));
            }
            last_had_directive = line.has_directive();
        }
        Ok(out.join("\n"))
    }

    /// Render a sequence of nodes at `depth`.
    pub fn render_block(
        &self,
        nodes: &[Node],
        depth: usize,
        mode: &JoinMode,
    ) -> Result<String, GenerateError> {
        let mut items = Vec::with_capacity(nodes.len());
        for node in nodes {
            let mut item = self.render(node, depth)?;
            if *mode == JoinMode::Statements && !node.is_compound() {
                item.push_str(self.profile.terminator());
            }
            items.push(item);
        }
        let separator = match mode {
            JoinMode::Separator(sep) => sep.clone(),
            JoinMode::Lines | JoinMode::Statements => format!("\n{}", self.indent(depth)),
            JoinMode::Paragraphs => format!("\n\n{}", self.indent(depth)),
        };
        Ok(items.join(&separator))
    }

    /// Render a semantic type through the profile's type table.
    pub fn render_type(&self, ty: &PseudoType) -> Result<String, GenerateError> {
        let types = self.profile.types();
        match ty {
            PseudoType::Named(name) => match types.get(name) {
                Some(syntax) => Ok(syntax.apply(&[])),
                None if self.declared.contains(name) => Ok(name.clone()),
                None => Err(GenerateError::UnknownType(name.clone())),
            },
            PseudoType::Container { name, args } => {
                let syntax = types
                    .get(name)
                    .ok_or_else(|| GenerateError::UnknownType(name.clone()))?;
                let args = args
                    .iter()
                    .map(|arg| self.render_type(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(syntax.apply(&args))
            }
            PseudoType::FixedArray { element, size } => {
                let syntax = types
                    .get(ty.base_name())
                    .ok_or_else(|| GenerateError::UnknownType(ty.base_name().to_string()))?;
                Ok(syntax.apply(&[self.render_type(element)?, size.to_string()]))
            }
        }
    }

    fn directive(
        &self,
        directive: &Directive,
        node: &Node,
        depth: usize,
    ) -> Result<String, GenerateError> {
        match directive {
            Directive::Placeholder(path) => {
                let (owner, attribute, attr) = resolve(node, path)?;
                match attr {
                    Attr::Node(child) => self.render(child, depth),
                    Attr::Text(text) => Ok(text.to_string()),
                    Attr::Int(value) => Ok(value.to_string()),
                    Attr::Float(value) => Ok(format_float(value)),
                    Attr::Bool(value) => Ok(value.to_string()),
                    Attr::Type(ty) => self.render_type(ty),
                    Attr::Nodes(_) => Err(GenerateError::AttributeShape {
                        tag: owner,
                        attribute,
                        expected: "a single value",
                    }),
                    Attr::Absent => Err(GenerateError::MissingAttribute {
                        tag: owner,
                        attribute,
                    }),
                }
            }
            Directive::Join { path, mode } => {
                let (owner, attribute, attr) = resolve(node, path)?;
                match attr {
                    Attr::Nodes(nodes) => self.render_block(nodes, depth, mode),
                    Attr::Absent => Ok(String::new()),
                    _ => Err(GenerateError::AttributeShape {
                        tag: owner,
                        attribute,
                        expected: "a sequence",
                    }),
                }
            }
            Directive::Type(path) => {
                let (owner, attribute, attr) = resolve(node, path)?;
                match attr {
                    Attr::Type(ty) => self.render_type(ty),
                    Attr::Node(child) => self.render_type(&child.pseudo_type),
                    _ => Err(GenerateError::AttributeShape {
                        tag: owner,
                        attribute,
                        expected: "a type",
                    }),
                }
            }
            Directive::Optional(name) => {
                let tag = node.tag();
                let attr = node
                    .attr(name)
                    .ok_or_else(|| GenerateError::MissingAttribute {
                        tag,
                        attribute: name.clone(),
                    })?;
                let (present, fallback) = self.profile.optional(tag, name).ok_or_else(|| {
                    GenerateError::UndefinedDirective {
                        tag,
                        directive: format!(".{name}"),
                    }
                })?;
                let template = if attr.is_empty() { fallback } else { present };
                self.render_template(template, node, depth)
            }
            Directive::Override(name) => {
                let f = self.profile.override_fn(name).ok_or_else(|| {
                    GenerateError::UndefinedDirective {
                        tag: node.tag(),
                        directive: format!("#{name}"),
                    }
                })?;
                f(self, node, depth)
            }
        }
    }

    fn discriminant(&self, node: &Node, on: &Path) -> Result<String, GenerateError> {
        let (owner, attribute, attr) = resolve(node, on)?;
        match attr {
            Attr::Node(child) => Ok(child.tag().as_str().to_string()),
            Attr::Bool(value) => Ok(value.to_string()),
            Attr::Text(text) => Ok(text.to_string()),
            Attr::Int(value) => Ok(value.to_string()),
            Attr::Absent => Ok("none".to_string()),
            _ => Err(GenerateError::AttributeShape {
                tag: owner,
                attribute,
                expected: "a switchable value",
            }),
        }
    }
}

/// Follow a dotted path. Returns the tag owning the last segment, its name,
/// and the attribute found there.
fn resolve<'n>(node: &'n Node, path: &Path) -> Result<(Tag, String, Attr<'n>), GenerateError> {
    let mut current = node;
    let segments = path.segments();
    for (i, segment) in segments.iter().enumerate() {
        let attr = current
            .attr(segment)
            .ok_or_else(|| GenerateError::MissingAttribute {
                tag: current.tag(),
                attribute: segment.clone(),
            })?;
        if i + 1 == segments.len() {
            return Ok((current.tag(), segment.clone(), attr));
        }
        match attr {
            Attr::Node(child) => current = child,
            Attr::Absent => {
                return Err(GenerateError::MissingAttribute {
                    tag: current.tag(),
                    attribute: segment.clone(),
                });
            }
            _ => {
                return Err(GenerateError::AttributeShape {
                    tag: current.tag(),
                    attribute: segment.clone(),
                    expected: "a node",
                });
            }
        }
    }
    // Paths always have at least one segment.
    Err(GenerateError::MissingAttribute {
        tag: node.tag(),
        attribute: String::new(),
    })
}

fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// The returned expression of a block that is exactly one return statement.
pub fn single_return(block: &[Node]) -> Option<&Node> {
    match block {
        [only] => only.returned_value(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Indent, Profile, Switch, TypeSyntax, TypeTable};
    use crate::tree::Kind;
    use pretty_assertions::assert_eq;

    fn profile() -> Profile {
        Profile::builder("test", "t")
            .indent(Indent::spaces(2))
            .terminator(";")
            .types(
                TypeTable::new()
                    .name("Int", "int")
                    .name("Void", "void")
                    .format("List", "list<{0}>"),
            )
            .template(Tag::Int, "%<value>")
            .template(Tag::Float, "%<value>")
            .template(Tag::Local, "%<name>")
            .template(Tag::Call, "%<function>(%<args:join ', '>)")
            .template(Tag::ImplicitReturn, "return %<value>")
            .template(
                Tag::WhileStatement,
                "
                while %<test>:
                    %<block:stmts>
                ",
            )
            .template(
                Tag::FunctionDefinition,
                "
                def %<name>(%<params:join ', '>) -> %<@return_type>:
                    %<block:stmts>
                    %<#trailer>

                end",
            )
            .template(
                Tag::ClassDefinition,
                "
                class %<name>:
                    %<attrs:lines>

                    %<methods:lines>
                end",
            )
            .override_fn("trailer", |_, _, _| Ok(String::new()))
            .switch(
                Tag::Assignment,
                Switch::on("first_mention")
                    .case("true", "let %<target> = %<value>")
                    .default("%<target> = %<value>"),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_nested_indentation() {
        let profile = profile();
        let r = Renderer::new(&profile);
        let node = Node::while_statement(
            Node::local("x", "Int"),
            vec![Node::while_statement(
                Node::local("y", "Int"),
                vec![Node::call(Node::local("f", "Void"), vec![Node::int(1)], "Void")],
            )],
        );
        assert_eq!(r.render(&node, 0).unwrap(), "while x:\n  while y:\n    f(1);");
    }

    #[test]
    fn test_empty_directive_line_dropped_and_blank_kept_after_directive() {
        let profile = profile();
        let r = Renderer::new(&profile);
        let node = Node::new(Kind::FunctionDefinition {
            name: "f".into(),
            params: vec![],
            return_type: "Int".into(),
            block: vec![Node::implicit_return(Node::int(2))],
        });
        assert_eq!(
            r.render(&node, 0).unwrap(),
            "def f() -> int:\n  return 2;\n\nend"
        );
    }

    fn class(attrs: Vec<Node>, methods: Vec<Node>) -> Node {
        Node::new(Kind::ClassDefinition {
            name: "A".into(),
            base: None,
            attrs,
            constructor: None,
            methods,
        })
    }

    #[test]
    fn test_blank_before_dropped_line_not_flushed_into_plain_text() {
        let profile = profile();
        let r = Renderer::new(&profile);
        let attrs = || vec![Node::local("a", "Int")];
        assert_eq!(r.render(&class(attrs(), vec![]), 0).unwrap(), "class A:\n  a\nend");
        assert_eq!(
            r.render(&class(attrs(), vec![Node::local("m", "Int")]), 0).unwrap(),
            "class A:\n  a\n\n  m\nend"
        );
    }

    #[test]
    fn test_switch_branches() {
        let profile = profile();
        let r = Renderer::new(&profile);
        let mut node = Node::assignment(Node::local("a", "Int"), Node::int(1));
        assert_eq!(r.render(&node, 0).unwrap(), "a = 1");
        if let Kind::Assignment { first_mention, .. } = &mut node.kind {
            *first_mention = true;
        }
        assert_eq!(r.render(&node, 0).unwrap(), "let a = 1");
    }

    #[test]
    fn test_float_formatting() {
        let profile = profile();
        let r = Renderer::new(&profile);
        assert_eq!(r.render(&Node::float(42.0), 0).unwrap(), "42.0");
        assert_eq!(r.render(&Node::float(4.25), 0).unwrap(), "4.25");
    }

    #[test]
    fn test_missing_template() {
        let profile = profile();
        let r = Renderer::new(&profile);
        assert_eq!(
            r.render(&Node::string("x"), 0),
            Err(GenerateError::NoTemplate(Tag::String))
        );
    }

    #[test]
    fn test_render_type() {
        let profile = profile();
        let r = Renderer::new(&profile).declaring(["Egg".to_string()]);
        assert_eq!(
            r.render_type(&PseudoType::list(PseudoType::list("Int".into())))
                .unwrap(),
            "list<list<int>>"
        );
        assert_eq!(r.render_type(&"Egg".into()).unwrap(), "Egg");
        assert_eq!(
            r.render_type(&"Chicken".into()),
            Err(GenerateError::UnknownType("Chicken".into()))
        );
    }

    #[test]
    fn test_single_return() {
        let block = vec![Node::implicit_return(Node::int(1))];
        assert_eq!(single_return(&block), Some(&Node::int(1)));
        assert_eq!(single_return(&[]), None);
    }

    #[test]
    fn test_type_syntax_variadic() {
        assert_eq!(
            TypeSyntax::variadic("Func<{0}>", ", ").apply(&["int".into(), "bool".into()]),
            "Func<int, bool>"
        );
    }
}
