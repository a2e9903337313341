//! Child traversal in source order.

use super::{Kind, Node};

impl Node {
    /// Direct children in source order.
    pub fn children(&self) -> Vec<&Node> {
        let mut out: Vec<&Node> = Vec::new();
        match &self.kind {
            Kind::Module {
                definitions,
                dependencies,
                constants,
                custom_exceptions,
                main,
            } => {
                out.extend(dependencies);
                out.extend(custom_exceptions);
                out.extend(constants);
                out.extend(definitions);
                out.extend(main);
            }
            Kind::Constant { init, .. } => out.push(init),
            Kind::FunctionDefinition { params, block, .. }
            | Kind::AnonymousFunction { params, block, .. } => {
                out.extend(params);
                out.extend(block);
            }
            Kind::MethodDefinition {
                params, this, block, ..
            }
            | Kind::Constructor {
                params, this, block, ..
            } => {
                out.push(this);
                out.extend(params);
                out.extend(block);
            }
            Kind::ClassDefinition {
                attrs,
                constructor,
                methods,
                ..
            } => {
                out.extend(attrs);
                out.extend(constructor.as_deref());
                out.extend(methods);
            }
            Kind::Assignment { target, value, .. } => {
                out.push(target);
                out.push(value);
            }
            Kind::IndexAssignment {
                sequence,
                index,
                value,
            } => {
                out.push(sequence);
                out.push(index);
                out.push(value);
            }
            Kind::IfStatement {
                test,
                block,
                otherwise,
            }
            | Kind::ElseIfStatement {
                test,
                block,
                otherwise,
            } => {
                out.push(test);
                out.extend(block);
                out.extend(otherwise.as_deref());
            }
            Kind::WhileStatement { test, block } => {
                out.push(test);
                out.extend(block);
            }
            Kind::ForStatement {
                iterators,
                sequences,
                block,
            } => {
                out.push(iterators);
                out.push(sequences);
                out.extend(block);
            }
            Kind::ForRangeStatement {
                index,
                first,
                last,
                step,
                block,
            } => {
                out.push(index);
                out.extend(first.as_deref());
                out.push(last);
                out.extend(step.as_deref());
                out.extend(block);
            }
            Kind::ForIterator { iterator } => out.push(iterator),
            Kind::ForIteratorWithIndex { index, iterator } => {
                out.push(index);
                out.push(iterator);
            }
            Kind::ForIteratorWithItems { key, value } | Kind::Pair { key, value } => {
                out.push(key);
                out.push(value);
            }
            Kind::ForIteratorZip { iterators: nodes }
            | Kind::ForSequenceZip { sequences: nodes }
            | Kind::List { elements: nodes }
            | Kind::Set { elements: nodes }
            | Kind::Tuple { elements: nodes }
            | Kind::Array { elements: nodes }
            | Kind::Dictionary { pairs: nodes }
            | Kind::ElseStatement { block: nodes }
            | Kind::Block { block: nodes }
            | Kind::ExceptionHandler { block: nodes, .. }
            | Kind::StandardCall { args: nodes, .. } => out.extend(nodes),
            Kind::ForSequence { sequence }
            | Kind::ForSequenceWithIndex { sequence }
            | Kind::ForSequenceWithItems { sequence } => out.push(sequence),
            Kind::TryStatement { block, handlers } => {
                out.extend(block);
                out.extend(handlers);
            }
            Kind::ThrowStatement { value, .. }
            | Kind::ImplicitReturn { value }
            | Kind::ExplicitReturn { value }
            | Kind::UnaryOp { value, .. } => out.push(value),
            Kind::Attr { object, .. } => out.push(object),
            Kind::Index { sequence, index } => {
                out.push(sequence);
                out.push(index);
            }
            Kind::Call { function, args } => {
                out.push(function);
                out.extend(args);
            }
            Kind::MethodCall { receiver, args, .. }
            | Kind::StaticCall { receiver, args, .. }
            | Kind::StandardMethodCall { receiver, args, .. } => {
                out.push(receiver);
                out.extend(args);
            }
            Kind::NewInstance { class_name, args } => {
                out.push(class_name);
                out.extend(args);
            }
            Kind::BinaryOp { left, right, .. } | Kind::Comparison { left, right, .. } => {
                out.push(left);
                out.push(right);
            }
            Kind::Dependency { .. }
            | Kind::CustomException { .. }
            | Kind::ClassAttr { .. }
            | Kind::Int { .. }
            | Kind::Float { .. }
            | Kind::String { .. }
            | Kind::Boolean { .. }
            | Kind::Null
            | Kind::Regex { .. }
            | Kind::Local { .. }
            | Kind::Typename { .. }
            | Kind::InstanceVariable { .. }
            | Kind::This => {}
        }
        out
    }

    /// Mutable direct children in source order.
    pub fn children_mut(&mut self) -> Vec<&mut Node> {
        let mut out: Vec<&mut Node> = Vec::new();
        match &mut self.kind {
            Kind::Module {
                definitions,
                dependencies,
                constants,
                custom_exceptions,
                main,
            } => {
                out.extend(dependencies);
                out.extend(custom_exceptions);
                out.extend(constants);
                out.extend(definitions);
                out.extend(main);
            }
            Kind::Constant { init, .. } => out.push(init),
            Kind::FunctionDefinition { params, block, .. }
            | Kind::AnonymousFunction { params, block, .. } => {
                out.extend(params);
                out.extend(block);
            }
            Kind::MethodDefinition {
                params, this, block, ..
            }
            | Kind::Constructor {
                params, this, block, ..
            } => {
                out.push(this);
                out.extend(params);
                out.extend(block);
            }
            Kind::ClassDefinition {
                attrs,
                constructor,
                methods,
                ..
            } => {
                out.extend(attrs);
                out.extend(constructor.as_deref_mut());
                out.extend(methods);
            }
            Kind::Assignment { target, value, .. } => {
                out.push(target);
                out.push(value);
            }
            Kind::IndexAssignment {
                sequence,
                index,
                value,
            } => {
                out.push(sequence);
                out.push(index);
                out.push(value);
            }
            Kind::IfStatement {
                test,
                block,
                otherwise,
            }
            | Kind::ElseIfStatement {
                test,
                block,
                otherwise,
            } => {
                out.push(test);
                out.extend(block);
                out.extend(otherwise.as_deref_mut());
            }
            Kind::WhileStatement { test, block } => {
                out.push(test);
                out.extend(block);
            }
            Kind::ForStatement {
                iterators,
                sequences,
                block,
            } => {
                out.push(iterators);
                out.push(sequences);
                out.extend(block);
            }
            Kind::ForRangeStatement {
                index,
                first,
                last,
                step,
                block,
            } => {
                out.push(index);
                out.extend(first.as_deref_mut());
                out.push(last);
                out.extend(step.as_deref_mut());
                out.extend(block);
            }
            Kind::ForIterator { iterator } => out.push(iterator),
            Kind::ForIteratorWithIndex { index, iterator } => {
                out.push(index);
                out.push(iterator);
            }
            Kind::ForIteratorWithItems { key, value } | Kind::Pair { key, value } => {
                out.push(key);
                out.push(value);
            }
            Kind::ForIteratorZip { iterators: nodes }
            | Kind::ForSequenceZip { sequences: nodes }
            | Kind::List { elements: nodes }
            | Kind::Set { elements: nodes }
            | Kind::Tuple { elements: nodes }
            | Kind::Array { elements: nodes }
            | Kind::Dictionary { pairs: nodes }
            | Kind::ElseStatement { block: nodes }
            | Kind::Block { block: nodes }
            | Kind::ExceptionHandler { block: nodes, .. }
            | Kind::StandardCall { args: nodes, .. } => out.extend(nodes),
            Kind::ForSequence { sequence }
            | Kind::ForSequenceWithIndex { sequence }
            | Kind::ForSequenceWithItems { sequence } => out.push(sequence),
            Kind::TryStatement { block, handlers } => {
                out.extend(block);
                out.extend(handlers);
            }
            Kind::ThrowStatement { value, .. }
            | Kind::ImplicitReturn { value }
            | Kind::ExplicitReturn { value }
            | Kind::UnaryOp { value, .. } => out.push(value),
            Kind::Attr { object, .. } => out.push(object),
            Kind::Index { sequence, index } => {
                out.push(sequence);
                out.push(index);
            }
            Kind::Call { function, args } => {
                out.push(function);
                out.extend(args);
            }
            Kind::MethodCall { receiver, args, .. }
            | Kind::StaticCall { receiver, args, .. }
            | Kind::StandardMethodCall { receiver, args, .. } => {
                out.push(receiver);
                out.extend(args);
            }
            Kind::NewInstance { class_name, args } => {
                out.push(class_name);
                out.extend(args);
            }
            Kind::BinaryOp { left, right, .. } | Kind::Comparison { left, right, .. } => {
                out.push(left);
                out.push(right);
            }
            Kind::Dependency { .. }
            | Kind::CustomException { .. }
            | Kind::ClassAttr { .. }
            | Kind::Int { .. }
            | Kind::Float { .. }
            | Kind::String { .. }
            | Kind::Boolean { .. }
            | Kind::Null
            | Kind::Regex { .. }
            | Kind::Local { .. }
            | Kind::Typename { .. }
            | Kind::InstanceVariable { .. }
            | Kind::This => {}
        }
        out
    }

    /// Visit this node and every descendant, parents before children.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        f(self);
        for child in self.children() {
            child.walk(f);
        }
    }
}
