//! The pseudo-AST: a closed set of tagged node kinds.
//!
//! Every node is a [`Kind`] (the tag plus exactly the fields that tag uses)
//! and a semantic [`PseudoType`]. Templates address fields by name through
//! [`Node::attr`], so the tag alone decides which attributes exist.
//!
//! Trees deserialize from the producer's JSON form, with the tag under
//! `"type"`:
//!
//! ```json
//! {"type": "local", "name": "egg", "pseudo_type": "Int"}
//! ```

mod build;
pub mod types;
mod visit;

pub use build::ModuleBuilder;
pub use types::PseudoType;

use crate::error::TreeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A node of the pseudo-AST.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(flatten)]
    pub kind: Kind,
    #[serde(default, skip_serializing_if = "PseudoType::is_void")]
    pub pseudo_type: PseudoType,
}

/// Node kinds and their attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Kind {
    Module {
        #[serde(default)]
        definitions: Vec<Node>,
        #[serde(default)]
        dependencies: Vec<Node>,
        #[serde(default)]
        constants: Vec<Node>,
        #[serde(default)]
        custom_exceptions: Vec<Node>,
        #[serde(default)]
        main: Vec<Node>,
    },
    Dependency {
        name: String,
    },
    Constant {
        constant: String,
        init: Box<Node>,
    },
    CustomException {
        name: String,
        #[serde(default)]
        base: Option<String>,
    },

    // Definitions
    FunctionDefinition {
        name: String,
        params: Vec<Node>,
        #[serde(default)]
        return_type: PseudoType,
        block: Vec<Node>,
    },
    MethodDefinition {
        name: String,
        params: Vec<Node>,
        this: Box<Node>,
        #[serde(default)]
        return_type: PseudoType,
        #[serde(default)]
        is_public: bool,
        block: Vec<Node>,
    },
    Constructor {
        params: Vec<Node>,
        this: Box<Node>,
        block: Vec<Node>,
    },
    ClassDefinition {
        name: String,
        #[serde(default)]
        base: Option<String>,
        #[serde(default)]
        attrs: Vec<Node>,
        #[serde(default)]
        constructor: Option<Box<Node>>,
        #[serde(default)]
        methods: Vec<Node>,
    },
    ClassAttr {
        name: String,
        #[serde(default)]
        is_public: bool,
    },
    AnonymousFunction {
        params: Vec<Node>,
        #[serde(default)]
        return_type: PseudoType,
        block: Vec<Node>,
    },

    // Statements
    Assignment {
        target: Box<Node>,
        value: Box<Node>,
        /// Set by the declaration pass on the first assignment to a name in its scope.
        #[serde(default)]
        first_mention: bool,
    },
    IndexAssignment {
        sequence: Box<Node>,
        index: Box<Node>,
        value: Box<Node>,
    },
    IfStatement {
        test: Box<Node>,
        block: Vec<Node>,
        #[serde(default)]
        otherwise: Option<Box<Node>>,
    },
    #[serde(alias = "elseif_statement")]
    ElseIfStatement {
        test: Box<Node>,
        block: Vec<Node>,
        #[serde(default)]
        otherwise: Option<Box<Node>>,
    },
    ElseStatement {
        block: Vec<Node>,
    },
    WhileStatement {
        test: Box<Node>,
        block: Vec<Node>,
    },
    ForStatement {
        iterators: Box<Node>,
        sequences: Box<Node>,
        block: Vec<Node>,
    },
    ForRangeStatement {
        index: Box<Node>,
        #[serde(default)]
        first: Option<Box<Node>>,
        last: Box<Node>,
        #[serde(default)]
        step: Option<Box<Node>>,
        block: Vec<Node>,
    },
    ForIterator {
        iterator: Box<Node>,
    },
    ForIteratorWithIndex {
        index: Box<Node>,
        iterator: Box<Node>,
    },
    ForIteratorWithItems {
        key: Box<Node>,
        value: Box<Node>,
    },
    ForIteratorZip {
        iterators: Vec<Node>,
    },
    ForSequence {
        sequence: Box<Node>,
    },
    ForSequenceWithIndex {
        sequence: Box<Node>,
    },
    ForSequenceWithItems {
        sequence: Box<Node>,
    },
    ForSequenceZip {
        sequences: Vec<Node>,
    },
    TryStatement {
        block: Vec<Node>,
        handlers: Vec<Node>,
    },
    ExceptionHandler {
        #[serde(default)]
        exception: Option<String>,
        instance: String,
        #[serde(default)]
        is_builtin: bool,
        block: Vec<Node>,
    },
    ThrowStatement {
        exception: String,
        value: Box<Node>,
    },
    ImplicitReturn {
        value: Box<Node>,
    },
    ExplicitReturn {
        value: Box<Node>,
    },
    Block {
        block: Vec<Node>,
    },

    // Literals
    Int {
        value: i64,
    },
    Float {
        value: f64,
    },
    String {
        value: String,
    },
    Boolean {
        value: bool,
    },
    Null,
    Regex {
        value: String,
    },
    List {
        elements: Vec<Node>,
    },
    Dictionary {
        pairs: Vec<Node>,
    },
    Pair {
        key: Box<Node>,
        value: Box<Node>,
    },
    Set {
        elements: Vec<Node>,
    },
    Tuple {
        elements: Vec<Node>,
    },
    Array {
        elements: Vec<Node>,
    },

    // References
    Local {
        name: String,
    },
    Typename {
        name: String,
    },
    InstanceVariable {
        name: String,
    },
    This,
    Attr {
        object: Box<Node>,
        attr: String,
    },
    Index {
        sequence: Box<Node>,
        index: Box<Node>,
    },

    // Calls and operations
    Call {
        function: Box<Node>,
        args: Vec<Node>,
    },
    MethodCall {
        receiver: Box<Node>,
        message: String,
        args: Vec<Node>,
    },
    StaticCall {
        receiver: Box<Node>,
        message: String,
        args: Vec<Node>,
    },
    StandardCall {
        namespace: String,
        function: String,
        args: Vec<Node>,
    },
    StandardMethodCall {
        receiver: Box<Node>,
        message: String,
        args: Vec<Node>,
    },
    NewInstance {
        class_name: Box<Node>,
        args: Vec<Node>,
    },
    BinaryOp {
        op: String,
        left: Box<Node>,
        right: Box<Node>,
    },
    UnaryOp {
        op: String,
        value: Box<Node>,
    },
    Comparison {
        op: String,
        left: Box<Node>,
        right: Box<Node>,
    },
}

macro_rules! tags {
    ($($variant:ident => $name:literal,)*) => {
        /// The discriminant of a [`Kind`], used as the template table key.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Tag {
            $($variant,)*
        }

        impl Tag {
            pub const ALL: &'static [Tag] = &[$(Tag::$variant,)*];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Tag::$variant => $name,)*
                }
            }
        }

        impl Kind {
            pub fn tag(&self) -> Tag {
                match self {
                    $(Kind::$variant { .. } => Tag::$variant,)*
                }
            }
        }
    };
}

tags! {
    Module => "module",
    Dependency => "dependency",
    Constant => "constant",
    CustomException => "custom_exception",
    FunctionDefinition => "function_definition",
    MethodDefinition => "method_definition",
    Constructor => "constructor",
    ClassDefinition => "class_definition",
    ClassAttr => "class_attr",
    AnonymousFunction => "anonymous_function",
    Assignment => "assignment",
    IndexAssignment => "index_assignment",
    IfStatement => "if_statement",
    ElseIfStatement => "else_if_statement",
    ElseStatement => "else_statement",
    WhileStatement => "while_statement",
    ForStatement => "for_statement",
    ForRangeStatement => "for_range_statement",
    ForIterator => "for_iterator",
    ForIteratorWithIndex => "for_iterator_with_index",
    ForIteratorWithItems => "for_iterator_with_items",
    ForIteratorZip => "for_iterator_zip",
    ForSequence => "for_sequence",
    ForSequenceWithIndex => "for_sequence_with_index",
    ForSequenceWithItems => "for_sequence_with_items",
    ForSequenceZip => "for_sequence_zip",
    TryStatement => "try_statement",
    ExceptionHandler => "exception_handler",
    ThrowStatement => "throw_statement",
    ImplicitReturn => "implicit_return",
    ExplicitReturn => "explicit_return",
    Block => "block",
    Int => "int",
    Float => "float",
    String => "string",
    Boolean => "boolean",
    Null => "null",
    Regex => "regex",
    List => "list",
    Dictionary => "dictionary",
    Pair => "pair",
    Set => "set",
    Tuple => "tuple",
    Array => "array",
    Local => "local",
    Typename => "typename",
    InstanceVariable => "instance_variable",
    This => "this",
    Attr => "attr",
    Index => "index",
    Call => "call",
    MethodCall => "method_call",
    StaticCall => "static_call",
    StandardCall => "standard_call",
    StandardMethodCall => "standard_method_call",
    NewInstance => "new_instance",
    BinaryOp => "binary_op",
    UnaryOp => "unary_op",
    Comparison => "comparison",
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A borrowed view of one node attribute, as seen by templates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Attr<'a> {
    Node(&'a Node),
    Nodes(&'a [Node]),
    Text(&'a str),
    Int(i64),
    Float(f64),
    Bool(bool),
    Type(&'a PseudoType),
    /// An optional attribute the tag declares but this node leaves unset.
    Absent,
}

impl Attr<'_> {
    /// Whether an optional directive should fall back to its default.
    pub fn is_empty(&self) -> bool {
        match self {
            Attr::Absent | Attr::Bool(false) => true,
            Attr::Text(text) => text.is_empty(),
            Attr::Nodes(nodes) => nodes.is_empty(),
            _ => false,
        }
    }
}

fn opt_node(node: &Option<Box<Node>>) -> Attr<'_> {
    node.as_deref().map_or(Attr::Absent, Attr::Node)
}

fn opt_text(text: &Option<String>) -> Attr<'_> {
    text.as_deref().map_or(Attr::Absent, Attr::Text)
}

impl Node {
    /// Create a node whose type is `Void`.
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            pseudo_type: PseudoType::void(),
        }
    }

    pub fn typed(kind: Kind, pseudo_type: impl Into<PseudoType>) -> Self {
        Self {
            kind,
            pseudo_type: pseudo_type.into(),
        }
    }

    pub fn tag(&self) -> Tag {
        self.kind.tag()
    }

    /// Look up an attribute by name.
    ///
    /// Returns `None` when the tag has no such attribute, and
    /// `Some(Attr::Absent)` for a declared optional attribute that is unset.
    /// Every node answers `pseudo_type`.
    pub fn attr(&self, name: &str) -> Option<Attr<'_>> {
        if name == "pseudo_type" {
            return Some(Attr::Type(&self.pseudo_type));
        }
        let attr = match (&self.kind, name) {
            (Kind::Module { definitions, .. }, "definitions") => Attr::Nodes(definitions),
            (Kind::Module { dependencies, .. }, "dependencies") => Attr::Nodes(dependencies),
            (Kind::Module { constants, .. }, "constants") => Attr::Nodes(constants),
            (Kind::Module { custom_exceptions, .. }, "custom_exceptions") => {
                Attr::Nodes(custom_exceptions)
            }
            (Kind::Module { main, .. }, "main") => Attr::Nodes(main),

            (Kind::Dependency { name }, "name") => Attr::Text(name),
            (Kind::Constant { constant, .. }, "constant") => Attr::Text(constant),
            (Kind::Constant { init, .. }, "init") => Attr::Node(init),
            (Kind::CustomException { name, .. }, "name") => Attr::Text(name),
            (Kind::CustomException { base, .. }, "base") => opt_text(base),

            (Kind::FunctionDefinition { name, .. }, "name") => Attr::Text(name),
            (Kind::FunctionDefinition { params, .. }, "params") => Attr::Nodes(params),
            (Kind::FunctionDefinition { return_type, .. }, "return_type") => {
                Attr::Type(return_type)
            }
            (Kind::FunctionDefinition { block, .. }, "block") => Attr::Nodes(block),

            (Kind::MethodDefinition { name, .. }, "name") => Attr::Text(name),
            (Kind::MethodDefinition { params, .. }, "params") => Attr::Nodes(params),
            (Kind::MethodDefinition { this, .. }, "this") => Attr::Node(this),
            (Kind::MethodDefinition { return_type, .. }, "return_type") => Attr::Type(return_type),
            (Kind::MethodDefinition { is_public, .. }, "is_public") => Attr::Bool(*is_public),
            (Kind::MethodDefinition { block, .. }, "block") => Attr::Nodes(block),

            (Kind::Constructor { params, .. }, "params") => Attr::Nodes(params),
            (Kind::Constructor { this, .. }, "this") => Attr::Node(this),
            (Kind::Constructor { block, .. }, "block") => Attr::Nodes(block),

            (Kind::ClassDefinition { name, .. }, "name") => Attr::Text(name),
            (Kind::ClassDefinition { base, .. }, "base") => opt_text(base),
            (Kind::ClassDefinition { attrs, .. }, "attrs") => Attr::Nodes(attrs),
            (Kind::ClassDefinition { constructor, .. }, "constructor") => opt_node(constructor),
            (Kind::ClassDefinition { methods, .. }, "methods") => Attr::Nodes(methods),
            (Kind::ClassAttr { name, .. }, "name") => Attr::Text(name),
            (Kind::ClassAttr { is_public, .. }, "is_public") => Attr::Bool(*is_public),

            (Kind::AnonymousFunction { params, .. }, "params") => Attr::Nodes(params),
            (Kind::AnonymousFunction { return_type, .. }, "return_type") => {
                Attr::Type(return_type)
            }
            (Kind::AnonymousFunction { block, .. }, "block") => Attr::Nodes(block),

            (Kind::Assignment { target, .. }, "target") => Attr::Node(target),
            (Kind::Assignment { value, .. }, "value") => Attr::Node(value),
            (Kind::Assignment { first_mention, .. }, "first_mention") => {
                Attr::Bool(*first_mention)
            }
            (Kind::IndexAssignment { sequence, .. }, "sequence") => Attr::Node(sequence),
            (Kind::IndexAssignment { index, .. }, "index") => Attr::Node(index),
            (Kind::IndexAssignment { value, .. }, "value") => Attr::Node(value),

            (
                Kind::IfStatement { test, .. } | Kind::ElseIfStatement { test, .. },
                "test",
            ) => Attr::Node(test),
            (
                Kind::IfStatement { otherwise, .. } | Kind::ElseIfStatement { otherwise, .. },
                "otherwise",
            ) => opt_node(otherwise),
            (Kind::WhileStatement { test, .. }, "test") => Attr::Node(test),

            (Kind::ForStatement { iterators, .. }, "iterators") => Attr::Node(iterators),
            (Kind::ForStatement { sequences, .. }, "sequences") => Attr::Node(sequences),
            (Kind::ForRangeStatement { index, .. }, "index") => Attr::Node(index),
            (Kind::ForRangeStatement { first, .. }, "first") => opt_node(first),
            (Kind::ForRangeStatement { last, .. }, "last") => Attr::Node(last),
            (Kind::ForRangeStatement { step, .. }, "step") => opt_node(step),

            (Kind::ForIterator { iterator }, "iterator") => Attr::Node(iterator),
            (Kind::ForIteratorWithIndex { index, .. }, "index") => Attr::Node(index),
            (Kind::ForIteratorWithIndex { iterator, .. }, "iterator") => Attr::Node(iterator),
            (Kind::ForIteratorWithItems { key, .. }, "key") => Attr::Node(key),
            (Kind::ForIteratorWithItems { value, .. }, "value") => Attr::Node(value),
            (Kind::ForIteratorZip { iterators }, "iterators") => Attr::Nodes(iterators),
            (
                Kind::ForSequence { sequence }
                | Kind::ForSequenceWithIndex { sequence }
                | Kind::ForSequenceWithItems { sequence },
                "sequence",
            ) => Attr::Node(sequence),
            (Kind::ForSequenceZip { sequences }, "sequences") => Attr::Nodes(sequences),

            (Kind::TryStatement { handlers, .. }, "handlers") => Attr::Nodes(handlers),
            (Kind::ExceptionHandler { exception, .. }, "exception") => opt_text(exception),
            (Kind::ExceptionHandler { instance, .. }, "instance") => Attr::Text(instance),
            (Kind::ExceptionHandler { is_builtin, .. }, "is_builtin") => Attr::Bool(*is_builtin),
            (Kind::ThrowStatement { exception, .. }, "exception") => Attr::Text(exception),
            (Kind::ThrowStatement { value, .. }, "value") => Attr::Node(value),
            (Kind::ImplicitReturn { value } | Kind::ExplicitReturn { value }, "value") => {
                Attr::Node(value)
            }

            (
                Kind::IfStatement { block, .. }
                | Kind::ElseIfStatement { block, .. }
                | Kind::ElseStatement { block }
                | Kind::WhileStatement { block, .. }
                | Kind::ForStatement { block, .. }
                | Kind::ForRangeStatement { block, .. }
                | Kind::TryStatement { block, .. }
                | Kind::ExceptionHandler { block, .. }
                | Kind::Block { block },
                "block",
            ) => Attr::Nodes(block),

            (Kind::Int { value }, "value") => Attr::Int(*value),
            (Kind::Float { value }, "value") => Attr::Float(*value),
            (Kind::String { value } | Kind::Regex { value }, "value") => Attr::Text(value),
            (Kind::Boolean { value }, "value") => Attr::Bool(*value),
            (
                Kind::List { elements }
                | Kind::Set { elements }
                | Kind::Tuple { elements }
                | Kind::Array { elements },
                "elements",
            ) => Attr::Nodes(elements),
            (Kind::Dictionary { pairs }, "pairs") => Attr::Nodes(pairs),
            (Kind::Pair { key, .. }, "key") => Attr::Node(key),
            (Kind::Pair { value, .. }, "value") => Attr::Node(value),

            (
                Kind::Local { name } | Kind::Typename { name } | Kind::InstanceVariable { name },
                "name",
            ) => Attr::Text(name),
            (Kind::Attr { object, .. }, "object") => Attr::Node(object),
            (Kind::Attr { attr, .. }, "attr") => Attr::Text(attr),
            (Kind::Index { sequence, .. }, "sequence") => Attr::Node(sequence),
            (Kind::Index { index, .. }, "index") => Attr::Node(index),

            (Kind::Call { function, .. }, "function") => Attr::Node(function),
            (
                Kind::MethodCall { receiver, .. }
                | Kind::StaticCall { receiver, .. }
                | Kind::StandardMethodCall { receiver, .. },
                "receiver",
            ) => Attr::Node(receiver),
            (
                Kind::MethodCall { message, .. }
                | Kind::StaticCall { message, .. }
                | Kind::StandardMethodCall { message, .. },
                "message",
            ) => Attr::Text(message),
            (Kind::StandardCall { namespace, .. }, "namespace") => Attr::Text(namespace),
            (Kind::StandardCall { function, .. }, "function") => Attr::Text(function),
            (Kind::NewInstance { class_name, .. }, "class_name") => Attr::Node(class_name),
            (
                Kind::Call { args, .. }
                | Kind::MethodCall { args, .. }
                | Kind::StaticCall { args, .. }
                | Kind::StandardCall { args, .. }
                | Kind::StandardMethodCall { args, .. }
                | Kind::NewInstance { args, .. },
                "args",
            ) => Attr::Nodes(args),

            (
                Kind::BinaryOp { op, .. } | Kind::UnaryOp { op, .. } | Kind::Comparison { op, .. },
                "op",
            ) => Attr::Text(op),
            (
                Kind::BinaryOp { left, .. } | Kind::Comparison { left, .. },
                "left",
            ) => Attr::Node(left),
            (
                Kind::BinaryOp { right, .. } | Kind::Comparison { right, .. },
                "right",
            ) => Attr::Node(right),
            (Kind::UnaryOp { value, .. }, "value") => Attr::Node(value),

            _ => return None,
        };
        Some(attr)
    }

    /// Statements that end in their own block and take no statement terminator.
    pub fn is_compound(&self) -> bool {
        matches!(
            self.kind,
            Kind::IfStatement { .. }
                | Kind::ElseIfStatement { .. }
                | Kind::ElseStatement { .. }
                | Kind::WhileStatement { .. }
                | Kind::ForStatement { .. }
                | Kind::ForRangeStatement { .. }
                | Kind::TryStatement { .. }
                | Kind::ExceptionHandler { .. }
                | Kind::FunctionDefinition { .. }
                | Kind::MethodDefinition { .. }
                | Kind::Constructor { .. }
                | Kind::ClassDefinition { .. }
                | Kind::CustomException { .. }
                | Kind::Block { .. }
        )
    }

    /// Whether this node is an implicit or explicit return.
    pub fn returned_value(&self) -> Option<&Node> {
        match &self.kind {
            Kind::ImplicitReturn { value } | Kind::ExplicitReturn { value } => Some(value),
            _ => None,
        }
    }

    /// Map a runtime scalar to its literal node.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, TreeError> {
        use serde_json::Value;
        match value {
            Value::String(s) => Ok(Node::string(s.as_str())),
            Value::Bool(b) => Ok(Node::boolean(*b)),
            Value::Null => Ok(Node::null()),
            Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => Ok(Node::int(i)),
                (None, Some(f)) => Ok(Node::float(f)),
                _ => Err(TreeError::UnsupportedLiteral(n.to_string())),
            },
            other => Err(TreeError::UnsupportedLiteral(other.to_string())),
        }
    }

    /// Human-readable structural dump. One-way: not meant to be parsed back.
    pub fn dump(&self) -> String {
        match serde_yaml::to_string(self) {
            Ok(yaml) => yaml,
            Err(e) => format!("# dump failed: {e}\n{self:#?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_type_is_void() {
        assert!(Node::new(Kind::Null).pseudo_type.is_void());
        assert_eq!(Node::local("egg", "Int").pseudo_type, PseudoType::named("Int"));
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(Node::local("egg", "Int"), Node::local("egg", "Int"));
        assert_ne!(Node::local("egg", "Int"), Node::local("egg", "Float"));
        assert_ne!(Node::local("egg", "Int"), Node::typename("egg"));
    }

    #[test]
    fn test_attr_lookup() {
        let node = Node::attr_access(Node::local("e", "A"), "egg", "Int");
        assert!(matches!(node.attr("object"), Some(Attr::Node(_))));
        assert_eq!(node.attr("attr"), Some(Attr::Text("egg")));
        assert_eq!(node.attr("nope"), None);
        assert!(matches!(node.attr("pseudo_type"), Some(Attr::Type(_))));
    }

    #[test]
    fn test_optional_attr_absent() {
        let class = Node::new(Kind::ClassDefinition {
            name: "A".into(),
            base: None,
            attrs: vec![],
            constructor: None,
            methods: vec![],
        });
        assert_eq!(class.attr("base"), Some(Attr::Absent));
        assert!(class.attr("constructor").is_some_and(|a| a.is_empty()));
        assert!(class.attr("attrs").is_some_and(|a| a.is_empty()));
    }

    #[test]
    fn test_from_value() {
        assert_eq!(Node::from_value(&json!(42)).unwrap(), Node::int(42));
        assert_eq!(Node::from_value(&json!("la")).unwrap(), Node::string("la"));
        assert_eq!(Node::from_value(&json!(true)).unwrap(), Node::boolean(true));
        assert_eq!(Node::from_value(&json!(4.2)).unwrap(), Node::float(4.2));
        assert_eq!(Node::from_value(&json!(null)).unwrap(), Node::null());
        assert!(matches!(
            Node::from_value(&json!([1, 2])),
            Err(TreeError::UnsupportedLiteral(_))
        ));
    }

    #[test]
    fn test_deserialize_tree() {
        let node: Node = serde_json::from_value(json!({
            "type": "assignment",
            "target": {"type": "local", "name": "egg", "pseudo_type": "Int"},
            "value": {"type": "int", "value": 4, "pseudo_type": "Int"}
        }))
        .unwrap();
        assert_eq!(node, Node::assignment(Node::local("egg", "Int"), Node::int(4)));
    }

    #[test]
    fn test_deserialize_elseif_spelling() {
        let node: Node = serde_json::from_value(json!({
            "type": "if_statement",
            "test": {"type": "boolean", "value": true, "pseudo_type": "Boolean"},
            "block": [],
            "otherwise": {
                "type": "elseif_statement",
                "test": {"type": "boolean", "value": false, "pseudo_type": "Boolean"},
                "block": []
            }
        }))
        .unwrap();
        assert_eq!(
            node,
            Node::if_statement(
                Node::boolean(true),
                vec![],
                Some(Node::else_if_statement(Node::boolean(false), vec![], None)),
            )
        );
    }

    #[test]
    fn test_deserialize_list_type() {
        let node: Node = serde_json::from_value(json!({
            "type": "local",
            "name": "xs",
            "pseudo_type": ["List", "String"]
        }))
        .unwrap();
        assert_eq!(node.pseudo_type, PseudoType::list("String".into()));
    }

    #[test]
    fn test_tag_names_are_unique() {
        let mut names: Vec<_> = Tag::ALL.iter().map(|t| t.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Tag::ALL.len());
    }

    #[test]
    fn test_tag_matches_serde_name() {
        let node = Node::for_each_with_index(
            Node::local("j", "Int"),
            Node::local("k", "String"),
            Node::local("z", PseudoType::list("String".into())),
            vec![],
        );
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["type"], "for_statement");
        assert_eq!(value["iterators"]["type"], Tag::ForIteratorWithIndex.as_str());
    }

    #[test]
    fn test_dump_mentions_tag_and_fields() {
        let dump = Node::local("egg", "Int").dump();
        assert!(dump.contains("type: local"));
        assert!(dump.contains("name: egg"));
        assert!(dump.contains("pseudo_type: Int"));
    }
}
