//! Identifier casing per target convention.

use super::Middleware;
use crate::profile::Profile;
use crate::tree::{Kind, Node};
use convert_case::{Boundary, Case, Casing};
use serde::Deserialize;
use std::collections::HashSet;

/// Word boundaries recognized when converting to snake case.
const BOUNDARIES: [Boundary; 4] = [
    Boundary::Underscore,
    Boundary::Hyphen,
    Boundary::LowerUpper,
    Boundary::Acronym,
];

/// Separators that split words for camel and pascal case. Case changes are
/// not boundaries here, so joined output never re-splits.
const SEPARATORS: [Boundary; 2] = [Boundary::Underscore, Boundary::Hyphen];

/// A casing convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameCase {
    Camel,
    Pascal,
    Snake,
    /// Leave names as written.
    Preserve,
}

impl NameCase {
    /// Convert `name`, keeping any leading underscores.
    pub fn apply(self, name: &str) -> String {
        let case = match self {
            NameCase::Camel => Case::Camel,
            NameCase::Pascal => Case::Pascal,
            NameCase::Snake => Case::Snake,
            NameCase::Preserve => return name.to_string(),
        };
        let body = name.trim_start_matches('_');
        if body.is_empty() {
            return name.to_string();
        }
        let prefix = &name[..name.len() - body.len()];
        let converted = match case {
            Case::Snake => body.with_boundaries(&BOUNDARIES).to_case(case),
            _ if body.contains(['_', '-']) => body.with_boundaries(&SEPARATORS).to_case(case),
            Case::Pascal => with_first(body, char::to_ascii_uppercase),
            _ => with_first(body, char::to_ascii_lowercase),
        };
        format!("{prefix}{converted}")
    }
}

/// `name` with its first character mapped by `f`.
fn with_first(name: &str, f: fn(&char) -> char) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => std::iter::once(f(&first)).chain(chars).collect(),
        None => String::new(),
    }
}

/// Renames identifiers: `normal` for locals, parameters, attributes and
/// instance variables, `method` for method definitions and calls, `function`
/// for function definitions and references to them. Constants, type names
/// and library calls keep their spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamingMiddleware {
    pub normal: NameCase,
    pub method: NameCase,
    pub function: NameCase,
}

impl Middleware for NamingMiddleware {
    fn name(&self) -> &'static str {
        "naming"
    }

    fn process(&self, mut tree: Node, _profile: &Profile) -> Node {
        let mut functions = HashSet::new();
        let mut constants = HashSet::new();
        tree.walk(&mut |n| match &n.kind {
            Kind::FunctionDefinition { name, .. } => {
                functions.insert(name.clone());
            }
            Kind::Constant { constant, .. } => {
                constants.insert(constant.clone());
            }
            _ => {}
        });
        let names = Names {
            functions,
            constants,
        };
        self.rename(&mut tree, &names);
        tree
    }
}

struct Names {
    functions: HashSet<String>,
    constants: HashSet<String>,
}

impl NamingMiddleware {
    fn rename(&self, node: &mut Node, names: &Names) {
        match &mut node.kind {
            Kind::FunctionDefinition { name, .. } => *name = self.function.apply(name),
            Kind::MethodDefinition { name, .. }
            | Kind::MethodCall { message: name, .. }
            | Kind::StaticCall { message: name, .. } => *name = self.method.apply(name),
            Kind::Local { name } if !names.constants.contains(name.as_str()) => {
                let case = if names.functions.contains(name.as_str()) {
                    self.function
                } else {
                    self.normal
                };
                *name = case.apply(name);
            }
            Kind::InstanceVariable { name }
            | Kind::ClassAttr { name, .. }
            | Kind::Attr { attr: name, .. }
            | Kind::ExceptionHandler { instance: name, .. } => *name = self.normal.apply(name),
            _ => {}
        }
        for child in node.children_mut() {
            self.rename(child, names);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::PseudoType;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_case_conversion() {
        assert_eq!(NameCase::Camel.apply("fix_value"), "fixValue");
        assert_eq!(NameCase::Pascal.apply("fix_value"), "FixValue");
        assert_eq!(NameCase::Snake.apply("fixValue"), "fix_value");
        assert_eq!(NameCase::Camel.apply("egg"), "egg");
        assert_eq!(NameCase::Pascal.apply("weird"), "Weird");
        assert_eq!(NameCase::Preserve.apply("Fix_value"), "Fix_value");
    }

    #[test]
    fn test_single_letter_and_digit_words() {
        assert_eq!(NameCase::Pascal.apply("get_x_y"), "GetXY");
        assert_eq!(NameCase::Camel.apply("level_2_score"), "level2Score");
        assert_eq!(NameCase::Camel.apply("x_y_z"), "xYZ");
        assert_eq!(NameCase::Camel.apply("GetXY"), "getXY");
        assert_eq!(NameCase::Pascal.apply("parseHTTPRequest"), "ParseHTTPRequest");
    }

    #[test]
    fn test_middleware_is_idempotent() {
        let def = Node::new(Kind::FunctionDefinition {
            name: "get_x_y".into(),
            params: vec![
                Node::local("level_2_score", "Int"),
                Node::local("x_y_z", "Int"),
            ],
            return_type: "Int".into(),
            block: vec![Node::implicit_return(Node::local("x_y_z", "Int"))],
        });
        let tree = Node::module()
            .definition(def)
            .statement(Node::call(
                Node::local("get_x_y", "Int"),
                vec![Node::int(1), Node::int(2)],
                "Int",
            ))
            .build();
        let profile = Profile::builder("t", "t").build().unwrap();
        let once = naming().process(tree, &profile);
        let twice = naming().process(once.clone(), &profile);
        assert_eq!(once, twice);

        let mut locals = Vec::new();
        once.walk(&mut |n| {
            if let Kind::Local { name } = &n.kind {
                locals.push(name.clone());
            }
        });
        assert_eq!(locals, vec!["level2Score", "xYZ", "xYZ", "GetXY"]);
    }

    #[test]
    fn test_leading_underscores_kept() {
        assert_eq!(NameCase::Camel.apply("_index"), "_index");
        assert_eq!(NameCase::Camel.apply("__private_thing"), "__privateThing");
        assert_eq!(NameCase::Camel.apply("_"), "_");
    }

    #[test]
    fn test_case_conversion_is_idempotent() {
        let names = [
            "fix_value",
            "parseHTTPRequest",
            "egg_count_total",
            "_private_name",
            "get_x_y",
            "level_2_score",
            "x_y_z",
            "a1_b2",
        ];
        for name in names {
            for case in [NameCase::Camel, NameCase::Pascal, NameCase::Snake] {
                let once = case.apply(name);
                assert_eq!(case.apply(&once), once, "{name} as {case:?}");
            }
        }
    }

    fn naming() -> NamingMiddleware {
        NamingMiddleware {
            normal: NameCase::Camel,
            method: NameCase::Pascal,
            function: NameCase::Pascal,
        }
    }

    fn rename(tree: Node) -> Node {
        let mut tree = tree;
        let m = naming();
        let mut functions = HashSet::new();
        tree.walk(&mut |n| {
            if let Kind::FunctionDefinition { name, .. } = &n.kind {
                functions.insert(name.clone());
            }
        });
        let names = Names {
            functions,
            constants: HashSet::from(["MAX_EGGS".to_string()]),
        };
        m.rename(&mut tree, &names);
        tree
    }

    #[test]
    fn test_roles_get_their_casing() {
        let def = Node::new(Kind::FunctionDefinition {
            name: "fix_value".into(),
            params: vec![Node::local("egg_count", "Int")],
            return_type: "Int".into(),
            block: vec![Node::implicit_return(Node::local("egg_count", "Int"))],
        });
        let call = Node::call(
            Node::local("fix_value", "Int"),
            vec![Node::local("MAX_EGGS", "Int")],
            "Int",
        );
        let method = Node::method_call(Node::local("a_b", "A"), "get_eggs", vec![], "Int");
        let tree = rename(Node::module().definition(def).statement(call).statement(method).build());

        let mut locals = Vec::new();
        let mut messages = Vec::new();
        tree.walk(&mut |n| match &n.kind {
            Kind::Local { name } => locals.push(name.clone()),
            Kind::MethodCall { message, .. } => messages.push(message.clone()),
            _ => {}
        });
        assert_eq!(
            locals,
            vec!["eggCount", "eggCount", "FixValue", "MAX_EGGS", "aB"]
        );
        assert_eq!(messages, vec!["GetEggs"]);
    }

    #[test]
    fn test_typenames_and_library_calls_untouched() {
        let tree = rename(Node::standard_call(
            "io",
            "read_file",
            vec![Node::typename("some_type")],
            PseudoType::named("String"),
        ));
        assert_eq!(
            tree,
            Node::standard_call(
                "io",
                "read_file",
                vec![Node::typename("some_type")],
                PseudoType::named("String"),
            )
        );
    }
}
