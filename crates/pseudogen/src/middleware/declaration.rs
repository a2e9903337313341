//! First-mention detection for local assignments.
//!
//! Scopes are function-level: each function, method and constructor body
//! starts empty except for its parameters, and the module's `main` block is
//! one scope seeded with the module constants. Loop variables and exception
//! instances are declared by their statement. Anonymous functions see the
//! enclosing names and add their own without leaking them back out.

use super::Middleware;
use crate::profile::Profile;
use crate::tree::{Kind, Node};
use std::collections::HashSet;

/// Marks the first assignment to each local name in its scope.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeclarationMiddleware;

impl Middleware for DeclarationMiddleware {
    fn name(&self) -> &'static str {
        "declaration"
    }

    fn process(&self, mut tree: Node, _profile: &Profile) -> Node {
        declare(&mut tree, &mut HashSet::new());
        tree
    }
}

type Scope = HashSet<String>;

fn declare(node: &mut Node, scope: &mut Scope) {
    match &mut node.kind {
        Kind::Module {
            constants,
            definitions,
            main,
            ..
        } => {
            for definition in definitions.iter_mut() {
                declare(definition, &mut Scope::new());
            }
            let mut main_scope: Scope = constants
                .iter()
                .filter_map(|c| match &c.kind {
                    Kind::Constant { constant, .. } => Some(constant.clone()),
                    _ => None,
                })
                .collect();
            for statement in main.iter_mut() {
                declare(statement, &mut main_scope);
            }
        }
        Kind::FunctionDefinition { params, block, .. }
        | Kind::MethodDefinition { params, block, .. }
        | Kind::Constructor { params, block, .. } => {
            let mut body = Scope::new();
            bind_all(params, &mut body);
            for statement in block.iter_mut() {
                declare(statement, &mut body);
            }
        }
        Kind::AnonymousFunction { params, block, .. } => {
            let mut body = scope.clone();
            bind_all(params, &mut body);
            for statement in block.iter_mut() {
                declare(statement, &mut body);
            }
        }
        Kind::Assignment {
            target,
            value,
            first_mention,
        } => {
            declare(value, scope);
            match &target.kind {
                Kind::Local { name } => *first_mention = scope.insert(name.clone()),
                _ => declare(target, scope),
            }
        }
        Kind::ForStatement {
            iterators,
            sequences,
            block,
        } => {
            declare(sequences, scope);
            bind(iterators, scope);
            for statement in block.iter_mut() {
                declare(statement, scope);
            }
        }
        Kind::ForRangeStatement {
            index,
            first,
            last,
            step,
            block,
        } => {
            for bound in first.iter_mut().chain(step.iter_mut()) {
                declare(bound, scope);
            }
            declare(last, scope);
            bind(index, scope);
            for statement in block.iter_mut() {
                declare(statement, scope);
            }
        }
        Kind::ExceptionHandler {
            instance, block, ..
        } => {
            scope.insert(instance.clone());
            for statement in block.iter_mut() {
                declare(statement, scope);
            }
        }
        _ => {
            for child in node.children_mut() {
                declare(child, scope);
            }
        }
    }
}

/// Declare every local name under `node` (loop iterators, parameters).
fn bind(node: &Node, scope: &mut Scope) {
    node.walk(&mut |n| {
        if let Kind::Local { name } = &n.kind {
            scope.insert(name.clone());
        }
    });
}

fn bind_all(nodes: &[Node], scope: &mut Scope) {
    for node in nodes {
        bind(node, scope);
    }
}
