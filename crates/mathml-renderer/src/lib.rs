//! Internal library for the `htmlmath` crate for rendering MathML.
//!
//! This library allows you to construct an AST representing MathML and then render it to a string.
//!
//! # Example
//!
//! ```rust
//! use htmlmath_renderer_internal::ast::{MathMLEmitter, Node};
//!
//! let ast = Node::Row(&[
//!     &Node::Superscript {
//!         target: &Node::Identifier("x"),
//!         symbol: &Node::Number("2"),
//!     },
//!     &Node::Operator("+"),
//!     &Node::Number("1"),
//! ]);
//!
//! let mut emitter = MathMLEmitter::new();
//! emitter.emit(&ast, 0).unwrap();
//! assert_eq!(
//!     emitter.into_inner(),
//!     "<mrow><msup><mi>x</mi><mn>2</mn></msup><mo>+</mo><mn>1</mn></mrow>"
//! );
//! ```
pub mod arena;
pub mod ast;
pub mod attribute;
pub mod fmt;
pub mod html_utils;
