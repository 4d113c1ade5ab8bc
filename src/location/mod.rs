//! Diagnostic locations and raw-text location resolution.
//!
//! - [`LocationRange`] - the span reported with a diagnostic
//! - [`LocationResolver`] - narrows coarse tokenizer ranges using the raw text
//! - [`DocumentStore`] - one resolver per open document
//!
//! # Example
//!
//! ```
//! use berth::ast::SourceRange;
//! use berth::location::{LocationRange, LocationResolver};
//!
//! let resolver = LocationResolver::from_text("FROM alpine\nWORKDIR app");
//! let range = resolver.string_location("app", &[SourceRange::line(2)]);
//!
//! assert_eq!(range, LocationRange::new(2, 8, 2, 11));
//! ```

pub mod range;
pub mod resolver;
pub mod store;

pub use range::{Location, LocationRange};
pub use resolver::LocationResolver;
pub use store::DocumentStore;
