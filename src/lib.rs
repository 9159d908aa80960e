//! Tailless compiles a CSS superset (variables, nested selectors, mixins and
//! built-in utility classes) down to plain CSS.
//!
//! ```
//! let css = tailless::compile("@color: red; .a { color: @color; }").unwrap();
//! assert_eq!(css, ".a {\n  color: red;\n}\n");
//! ```

pub use crate::engine::{compile, compile_file, compile_named, Compiler};
pub use crate::errors::{ErrorCategory, ErrorKind, SourceContext, TaillessError};

pub mod ast;
pub mod catalog;
pub mod cli;
pub mod engine;
pub mod errors;
pub mod render;
pub mod resolve;
pub mod scope;
pub mod selectors;
pub mod syntax;
