//! Mapping from semantic type names to target type syntax.

use std::collections::HashMap;

/// How one semantic type name is spelled in the target language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSyntax {
    /// A plain replacement name (`Int` -> `int`).
    Name(String),
    /// A format string with positional slots `{0}`, `{1}`, ... filled by the
    /// rendered components in declared order.
    Format(String),
    /// A format string whose `{0}` receives every component, joined.
    Variadic { format: String, separator: String },
    /// A callable whose last component is its return type. When the return
    /// renders as `void`, the parameters alone go through `procedure`, or
    /// `bare` is used if there are none.
    Callable {
        format: String,
        procedure: String,
        bare: String,
        void: String,
        separator: String,
    },
}

impl TypeSyntax {
    pub fn name(name: impl Into<String>) -> Self {
        TypeSyntax::Name(name.into())
    }

    pub fn format(format: impl Into<String>) -> Self {
        TypeSyntax::Format(format.into())
    }

    pub fn variadic(format: impl Into<String>, separator: impl Into<String>) -> Self {
        TypeSyntax::Variadic {
            format: format.into(),
            separator: separator.into(),
        }
    }

    /// Fill in already-rendered component types.
    pub fn apply(&self, args: &[String]) -> String {
        match self {
            TypeSyntax::Name(name) => name.clone(),
            TypeSyntax::Format(format) => {
                let mut out = format.clone();
                for (i, arg) in args.iter().enumerate() {
                    out = out.replace(&format!("{{{i}}}"), arg);
                }
                out
            }
            TypeSyntax::Variadic { format, separator } => {
                format.replace("{0}", &args.join(separator))
            }
            TypeSyntax::Callable {
                format,
                procedure,
                bare,
                void,
                separator,
            } => match args.split_last() {
                Some((ret, [])) if ret == void => bare.clone(),
                Some((ret, params)) if ret == void => {
                    procedure.replace("{0}", &params.join(separator))
                }
                _ => format.replace("{0}", &args.join(separator)),
            },
        }
    }
}

/// A profile's type table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeTable {
    entries: HashMap<String, TypeSyntax>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(self, semantic: &str, target: &str) -> Self {
        self.with(semantic, TypeSyntax::name(target))
    }

    pub fn format(self, semantic: &str, format: &str) -> Self {
        self.with(semantic, TypeSyntax::format(format))
    }

    pub fn variadic(self, semantic: &str, format: &str, separator: &str) -> Self {
        self.with(semantic, TypeSyntax::variadic(format, separator))
    }

    pub fn with(mut self, semantic: &str, syntax: TypeSyntax) -> Self {
        self.entries.insert(semantic.to_string(), syntax);
        self
    }

    pub fn get(&self, semantic: &str) -> Option<&TypeSyntax> {
        self.entries.get(semantic)
    }
}
