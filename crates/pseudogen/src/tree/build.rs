//! Convenience constructors for common node shapes.
//!
//! These are sugar over [`Node::new`]/[`Node::typed`]; they produce exactly
//! the nodes a producer would build by hand.

use super::{Kind, Node, PseudoType};

impl Node {
    pub fn local(name: impl Into<String>, ty: impl Into<PseudoType>) -> Self {
        Node::typed(Kind::Local { name: name.into() }, ty)
    }

    pub fn typename(name: impl Into<String>) -> Self {
        let name = name.into();
        Node::typed(Kind::Typename { name: name.clone() }, PseudoType::Named(name))
    }

    pub fn instance_variable(name: impl Into<String>, ty: impl Into<PseudoType>) -> Self {
        Node::typed(Kind::InstanceVariable { name: name.into() }, ty)
    }

    pub fn this(class: impl Into<PseudoType>) -> Self {
        Node::typed(Kind::This, class)
    }

    pub fn int(value: i64) -> Self {
        Node::typed(Kind::Int { value }, "Int")
    }

    pub fn float(value: f64) -> Self {
        Node::typed(Kind::Float { value }, "Float")
    }

    pub fn string(value: impl Into<String>) -> Self {
        Node::typed(Kind::String { value: value.into() }, "String")
    }

    pub fn boolean(value: bool) -> Self {
        Node::typed(Kind::Boolean { value }, "Boolean")
    }

    pub fn null() -> Self {
        Node::new(Kind::Null)
    }

    /// Attribute access `object.attr`.
    pub fn attr_access(object: Node, attr: impl Into<String>, ty: impl Into<PseudoType>) -> Self {
        Node::typed(
            Kind::Attr {
                object: Box::new(object),
                attr: attr.into(),
            },
            ty,
        )
    }

    pub fn index(sequence: Node, index: Node, ty: impl Into<PseudoType>) -> Self {
        Node::typed(
            Kind::Index {
                sequence: Box::new(sequence),
                index: Box::new(index),
            },
            ty,
        )
    }

    pub fn call(function: Node, args: Vec<Node>, ty: impl Into<PseudoType>) -> Self {
        Node::typed(
            Kind::Call {
                function: Box::new(function),
                args,
            },
            ty,
        )
    }

    pub fn method_call(
        receiver: Node,
        message: impl Into<String>,
        args: Vec<Node>,
        ty: impl Into<PseudoType>,
    ) -> Self {
        Node::typed(
            Kind::MethodCall {
                receiver: Box::new(receiver),
                message: message.into(),
                args,
            },
            ty,
        )
    }

    pub fn standard_call(
        namespace: impl Into<String>,
        function: impl Into<String>,
        args: Vec<Node>,
        ty: impl Into<PseudoType>,
    ) -> Self {
        Node::typed(
            Kind::StandardCall {
                namespace: namespace.into(),
                function: function.into(),
                args,
            },
            ty,
        )
    }

    pub fn standard_method_call(
        receiver: Node,
        message: impl Into<String>,
        args: Vec<Node>,
        ty: impl Into<PseudoType>,
    ) -> Self {
        Node::typed(
            Kind::StandardMethodCall {
                receiver: Box::new(receiver),
                message: message.into(),
                args,
            },
            ty,
        )
    }

    pub fn new_instance(class_name: impl Into<String>, args: Vec<Node>) -> Self {
        let class = Node::typename(class_name);
        let ty = class.pseudo_type.clone();
        Node::typed(
            Kind::NewInstance {
                class_name: Box::new(class),
                args,
            },
            ty,
        )
    }

    pub fn binary_op(op: impl Into<String>, left: Node, right: Node, ty: impl Into<PseudoType>) -> Self {
        Node::typed(
            Kind::BinaryOp {
                op: op.into(),
                left: Box::new(left),
                right: Box::new(right),
            },
            ty,
        )
    }

    pub fn unary_op(op: impl Into<String>, value: Node) -> Self {
        let ty = value.pseudo_type.clone();
        Node::typed(
            Kind::UnaryOp {
                op: op.into(),
                value: Box::new(value),
            },
            ty,
        )
    }

    pub fn comparison(op: impl Into<String>, left: Node, right: Node) -> Self {
        Node::typed(
            Kind::Comparison {
                op: op.into(),
                left: Box::new(left),
                right: Box::new(right),
            },
            "Boolean",
        )
    }

    pub fn assignment(target: Node, value: Node) -> Self {
        Node::new(Kind::Assignment {
            target: Box::new(target),
            value: Box::new(value),
            first_mention: false,
        })
    }

    pub fn index_assignment(sequence: Node, index: Node, value: Node) -> Self {
        Node::new(Kind::IndexAssignment {
            sequence: Box::new(sequence),
            index: Box::new(index),
            value: Box::new(value),
        })
    }

    pub fn if_statement(test: Node, block: Vec<Node>, otherwise: Option<Node>) -> Self {
        Node::new(Kind::IfStatement {
            test: Box::new(test),
            block,
            otherwise: otherwise.map(Box::new),
        })
    }

    pub fn else_if_statement(test: Node, block: Vec<Node>, otherwise: Option<Node>) -> Self {
        Node::new(Kind::ElseIfStatement {
            test: Box::new(test),
            block,
            otherwise: otherwise.map(Box::new),
        })
    }

    pub fn else_statement(block: Vec<Node>) -> Self {
        Node::new(Kind::ElseStatement { block })
    }

    pub fn while_statement(test: Node, block: Vec<Node>) -> Self {
        Node::new(Kind::WhileStatement {
            test: Box::new(test),
            block,
        })
    }

    /// `for iterator in sequence`.
    pub fn for_each(iterator: Node, sequence: Node, block: Vec<Node>) -> Self {
        Self::for_statement(
            Kind::ForIterator {
                iterator: Box::new(iterator),
            },
            Kind::ForSequence {
                sequence: Box::new(sequence),
            },
            block,
        )
    }

    /// `for index, iterator in sequence` with a tracked position.
    pub fn for_each_with_index(index: Node, iterator: Node, sequence: Node, block: Vec<Node>) -> Self {
        Self::for_statement(
            Kind::ForIteratorWithIndex {
                index: Box::new(index),
                iterator: Box::new(iterator),
            },
            Kind::ForSequenceWithIndex {
                sequence: Box::new(sequence),
            },
            block,
        )
    }

    /// `for key, value in dictionary`.
    pub fn for_each_with_items(key: Node, value: Node, sequence: Node, block: Vec<Node>) -> Self {
        Self::for_statement(
            Kind::ForIteratorWithItems {
                key: Box::new(key),
                value: Box::new(value),
            },
            Kind::ForSequenceWithItems {
                sequence: Box::new(sequence),
            },
            block,
        )
    }

    /// Lock-step iteration over several sequences, one iterator per sequence.
    pub fn for_each_zip(iterators: Vec<Node>, sequences: Vec<Node>, block: Vec<Node>) -> Self {
        Self::for_statement(
            Kind::ForIteratorZip { iterators },
            Kind::ForSequenceZip { sequences },
            block,
        )
    }

    fn for_statement(iterators: Kind, sequences: Kind, block: Vec<Node>) -> Self {
        Node::new(Kind::ForStatement {
            iterators: Box::new(Node::new(iterators)),
            sequences: Box::new(Node::new(sequences)),
            block,
        })
    }

    pub fn for_range(
        index: Node,
        first: Option<Node>,
        last: Node,
        step: Option<Node>,
        block: Vec<Node>,
    ) -> Self {
        Node::new(Kind::ForRangeStatement {
            index: Box::new(index),
            first: first.map(Box::new),
            last: Box::new(last),
            step: step.map(Box::new),
            block,
        })
    }

    pub fn implicit_return(value: Node) -> Self {
        let ty = value.pseudo_type.clone();
        Node::typed(
            Kind::ImplicitReturn {
                value: Box::new(value),
            },
            ty,
        )
    }

    /// Start building a module root.
    pub fn module() -> ModuleBuilder {
        ModuleBuilder::default()
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::int(value)
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::float(value)
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::boolean(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::string(value)
    }
}

/// Builder for a [`Kind::Module`] root.
#[derive(Debug, Default)]
pub struct ModuleBuilder {
    definitions: Vec<Node>,
    dependencies: Vec<Node>,
    constants: Vec<Node>,
    custom_exceptions: Vec<Node>,
    main: Vec<Node>,
}

impl ModuleBuilder {
    pub fn definition(mut self, definition: Node) -> Self {
        self.definitions.push(definition);
        self
    }

    pub fn dependency(mut self, name: impl Into<String>) -> Self {
        self.dependencies
            .push(Node::new(Kind::Dependency { name: name.into() }));
        self
    }

    pub fn constant(mut self, name: impl Into<String>, init: Node) -> Self {
        let ty = init.pseudo_type.clone();
        self.constants.push(Node::typed(
            Kind::Constant {
                constant: name.into(),
                init: Box::new(init),
            },
            ty,
        ));
        self
    }

    pub fn custom_exception(mut self, name: impl Into<String>, base: Option<String>) -> Self {
        self.custom_exceptions.push(Node::new(Kind::CustomException {
            name: name.into(),
            base,
        }));
        self
    }

    pub fn statement(mut self, statement: Node) -> Self {
        self.main.push(statement);
        self
    }

    pub fn statements(mut self, statements: impl IntoIterator<Item = Node>) -> Self {
        self.main.extend(statements);
        self
    }

    pub fn build(self) -> Node {
        Node::new(Kind::Module {
            definitions: self.definitions,
            dependencies: self.dependencies,
            constants: self.constants,
            custom_exceptions: self.custom_exceptions,
            main: self.main,
        })
    }
}
