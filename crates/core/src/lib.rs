//! Source generation for serde data shapes.
//!
//! The pipeline is parse ([`parse_input`]), validate, emit one [`Code`] tree
//! per declaration through a [`Target`] table, then assemble the rendered
//! trees into files ([`generate`]). Nothing here touches the filesystem.

#![forbid(unsafe_code)]

pub mod code;
pub mod docs;
pub mod emit;
pub mod error;
pub mod generate;
pub mod ident;
pub mod target;
pub mod translate;
pub mod validate;

pub use code::{Code, Node};
pub use emit::{EmitOptions, Emitted, Emitter};
pub use error::Error;
pub use generate::{Options, generate, generate_output, parse_input};
pub use target::{FileLayout, Syntax, Target, builtin_targets, lookup};
pub use translate::{Translated, translate};
