//! Built-in target languages.

#[cfg(feature = "target-csharp")]
pub mod csharp;

#[cfg(feature = "target-csharp")]
pub use csharp::{CSHARP, CSharp};
