//! Semantic type annotations carried by every node.
//!
//! A type is either a scalar name (`Int`, `String`, a class name) or a
//! container descriptor whose component count is fixed by the container:
//!
//! | container    | components                  |
//! |--------------|-----------------------------|
//! | `List`/`Set` | 1                           |
//! | `Dictionary` | 2 (key, value)              |
//! | `Function`   | N arguments + return (>= 1) |
//! | `Tuple`      | 2..N                        |
//! | `Array`      | element type + size         |
//!
//! In serialized trees a descriptor is a list: `["Dictionary", "String", "Int"]`,
//! `["Array", "Int", 2]`.

use crate::error::TreeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the "no value" type every node defaults to.
pub const VOID: &str = "Void";

/// A language-neutral semantic type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TypeRepr", into = "TypeRepr")]
pub enum PseudoType {
    /// A scalar or user-declared type name.
    Named(String),
    /// A generic container applied to its component types.
    Container { name: String, args: Vec<PseudoType> },
    /// A fixed-size array of one element type.
    FixedArray { element: Box<PseudoType>, size: usize },
}

impl PseudoType {
    pub fn named(name: impl Into<String>) -> Self {
        PseudoType::Named(name.into())
    }

    pub fn void() -> Self {
        PseudoType::Named(VOID.into())
    }

    pub fn list(element: PseudoType) -> Self {
        PseudoType::Container {
            name: "List".into(),
            args: vec![element],
        }
    }

    pub fn set(element: PseudoType) -> Self {
        PseudoType::Container {
            name: "Set".into(),
            args: vec![element],
        }
    }

    pub fn dictionary(key: PseudoType, value: PseudoType) -> Self {
        PseudoType::Container {
            name: "Dictionary".into(),
            args: vec![key, value],
        }
    }

    pub fn function(params: Vec<PseudoType>, ret: PseudoType) -> Self {
        let mut args = params;
        args.push(ret);
        PseudoType::Container {
            name: "Function".into(),
            args,
        }
    }

    pub fn fixed_array(element: PseudoType, size: usize) -> Self {
        PseudoType::FixedArray {
            element: Box::new(element),
            size,
        }
    }

    /// Build a container type, checking the component count against the
    /// container's arity.
    pub fn container(name: impl Into<String>, args: Vec<PseudoType>) -> Result<Self, TreeError> {
        let name = name.into();
        check_arity(&name, args.len())?;
        Ok(PseudoType::Container { name, args })
    }

    pub fn tuple(items: Vec<PseudoType>) -> Result<Self, TreeError> {
        Self::container("Tuple", items)
    }

    /// The scalar name, container name, or `Array` for fixed arrays.
    pub fn base_name(&self) -> &str {
        match self {
            PseudoType::Named(name) => name,
            PseudoType::Container { name, .. } => name,
            PseudoType::FixedArray { .. } => "Array",
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, PseudoType::Named(name) if name == VOID)
    }

    /// Component types in declared order (empty for scalars).
    pub fn components(&self) -> &[PseudoType] {
        match self {
            PseudoType::Named(_) => &[],
            PseudoType::Container { args, .. } => args,
            PseudoType::FixedArray { element, .. } => std::slice::from_ref(element.as_ref()),
        }
    }
}

impl Default for PseudoType {
    fn default() -> Self {
        Self::void()
    }
}

impl From<&str> for PseudoType {
    fn from(name: &str) -> Self {
        PseudoType::named(name)
    }
}

impl fmt::Display for PseudoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PseudoType::Named(name) => f.write_str(name),
            PseudoType::Container { name, args } => {
                write!(f, "{name}[")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str("]")
            }
            PseudoType::FixedArray { element, size } => write!(f, "Array[{element}, {size}]"),
        }
    }
}

fn check_arity(name: &str, found: usize) -> Result<(), TreeError> {
    let (ok, expected) = match name {
        "List" | "Set" => (found == 1, "1"),
        "Dictionary" => (found == 2, "2"),
        "Tuple" => (found >= 2, "at least 2"),
        "Function" => (found >= 1, "at least 1"),
        "Array" => (false, "an element type and a size"),
        _ => (found >= 1, "at least 1"),
    };
    if ok {
        Ok(())
    } else {
        Err(TreeError::TypeArity {
            name: name.to_string(),
            expected,
            found,
        })
    }
}

// Serialized form: a bare name or a `[name, components...]` list.

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum TypeRepr {
    Name(String),
    Descriptor(Vec<Component>),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum Component {
    Size(usize),
    Type(PseudoType),
}

impl TryFrom<TypeRepr> for PseudoType {
    type Error = TreeError;

    fn try_from(repr: TypeRepr) -> Result<Self, Self::Error> {
        let parts = match repr {
            TypeRepr::Name(name) => return Ok(PseudoType::Named(name)),
            TypeRepr::Descriptor(parts) => parts,
        };
        let mut parts = parts.into_iter();
        let name = match parts.next() {
            Some(Component::Type(PseudoType::Named(name))) => name,
            _ => {
                return Err(TreeError::MalformedType(
                    "descriptor must start with a container name".into(),
                ));
            }
        };
        let rest: Vec<Component> = parts.collect();

        if name == "Array" {
            return match rest.as_slice() {
                [Component::Type(element), Component::Size(size)] => {
                    Ok(PseudoType::fixed_array(element.clone(), *size))
                }
                _ => Err(TreeError::TypeArity {
                    name,
                    expected: "an element type and a size",
                    found: rest.len(),
                }),
            };
        }

        let args = rest
            .into_iter()
            .map(|c| match c {
                Component::Type(ty) => Ok(ty),
                Component::Size(size) => Err(TreeError::MalformedType(format!(
                    "unexpected size {size} in `{name}`"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        PseudoType::container(name, args)
    }
}

impl From<PseudoType> for TypeRepr {
    fn from(ty: PseudoType) -> Self {
        match ty {
            PseudoType::Named(name) => TypeRepr::Name(name),
            PseudoType::Container { name, args } => {
                let mut parts = vec![Component::Type(PseudoType::Named(name))];
                parts.extend(args.into_iter().map(Component::Type));
                TypeRepr::Descriptor(parts)
            }
            PseudoType::FixedArray { element, size } => TypeRepr::Descriptor(vec![
                Component::Type(PseudoType::Named("Array".into())),
                Component::Type(*element),
                Component::Size(size),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_void() {
        assert!(PseudoType::default().is_void());
        assert!(!PseudoType::named("Int").is_void());
    }

    #[test]
    fn test_container_arity() {
        assert!(PseudoType::container("List", vec!["Int".into()]).is_ok());
        assert!(PseudoType::container("List", vec![]).is_err());
        assert!(PseudoType::container("Dictionary", vec!["String".into()]).is_err());
        assert!(PseudoType::tuple(vec!["Int".into()]).is_err());
        assert!(PseudoType::tuple(vec!["Int".into(), "Float".into(), "String".into()]).is_ok());
    }

    #[test]
    fn test_deserialize_descriptor() {
        let ty: PseudoType = serde_json::from_str(r#"["Dictionary", "String", "Int"]"#).unwrap();
        assert_eq!(ty, PseudoType::dictionary("String".into(), "Int".into()));

        let ty: PseudoType = serde_json::from_str(r#"["Array", "Int", 2]"#).unwrap();
        assert_eq!(ty, PseudoType::fixed_array("Int".into(), 2));

        let ty: PseudoType = serde_json::from_str(r#"["List", ["List", "String"]]"#).unwrap();
        assert_eq!(ty, PseudoType::list(PseudoType::list("String".into())));
    }

    #[test]
    fn test_deserialize_rejects_bad_arity() {
        let result: Result<PseudoType, _> = serde_json::from_str(r#"["List", "Int", "Int"]"#);
        assert!(result.is_err());
        let result: Result<PseudoType, _> = serde_json::from_str(r#"["Array", "Int"]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_descriptor() {
        let ty = PseudoType::fixed_array("Int".into(), 4);
        assert_eq!(serde_json::to_string(&ty).unwrap(), r#"["Array","Int",4]"#);
        assert_eq!(
            serde_json::to_string(&PseudoType::named("Int")).unwrap(),
            r#""Int""#
        );
    }

    #[test]
    fn test_display() {
        let ty = PseudoType::dictionary("String".into(), PseudoType::list("Int".into()));
        assert_eq!(ty.to_string(), "Dictionary[String, List[Int]]");
    }
}
