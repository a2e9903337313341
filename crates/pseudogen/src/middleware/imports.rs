//! Dependency collection from library calls and type usage.

use super::Middleware;
use crate::profile::{Library, Profile};
use crate::tree::{Kind, Node, PseudoType};

/// Appends a `dependency` node to the module for every library entry or
/// semantic type the tree uses that needs one. Existing dependencies are
/// kept; new ones follow in first-use order.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImportMiddleware;

impl Middleware for ImportMiddleware {
    fn name(&self) -> &'static str {
        "imports"
    }

    fn process(&self, mut tree: Node, profile: &Profile) -> Node {
        let library = profile.library();
        let mut required: Vec<String> = Vec::new();
        tree.walk(&mut |node| {
            for dependency in node_dependencies(node, library) {
                if !required.iter().any(|d| d == dependency) {
                    required.push(dependency.to_string());
                }
            }
        });

        if let Kind::Module { dependencies, .. } = &mut tree.kind {
            for name in required {
                let present = dependencies
                    .iter()
                    .any(|d| matches!(&d.kind, Kind::Dependency { name: existing } if *existing == name));
                if !present {
                    tracing::debug!(dependency = %name, "adding dependency");
                    dependencies.push(Node::new(Kind::Dependency { name }));
                }
            }
        }
        tree
    }
}

fn node_dependencies<'l>(node: &Node, library: &'l Library) -> Vec<&'l str> {
    let mut out = Vec::new();
    let entry = match &node.kind {
        Kind::StandardCall {
            namespace,
            function,
            ..
        } => library.function(namespace, function),
        Kind::StandardMethodCall {
            receiver, message, ..
        } => library.method(receiver.pseudo_type.base_name(), message),
        _ => None,
    };
    out.extend(entry.and_then(|e| e.dependency.as_deref()));

    type_dependencies(&node.pseudo_type, library, &mut out);
    if let Kind::FunctionDefinition { return_type, .. }
    | Kind::MethodDefinition { return_type, .. }
    | Kind::AnonymousFunction { return_type, .. } = &node.kind
    {
        type_dependencies(return_type, library, &mut out);
    }
    out
}

fn type_dependencies<'l>(ty: &PseudoType, library: &'l Library, out: &mut Vec<&'l str>) {
    out.extend(library.type_dependency(ty.base_name()));
    for component in ty.components() {
        type_dependencies(component, library, out);
    }
}
