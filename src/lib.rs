//! A Wadler-style document layout engine.
//!
//! The crate takes a tree of layout directives, a [`Document`], and
//! renders it as a string that respects a configured maximum print width
//! while honoring forced breaks, deferred line suffixes, and indentation
//! policies. Callers, typically AST walkers, assemble the tree with a
//! [`Builder`](builder::Builder) and render it with [`format`].
//!
//! ```
//! use typeset::builder::Builder;
//! use typeset::settings::FormatSettings;
//!
//! let mut builder: Builder<'_> = Builder::new(FormatSettings::default());
//! builder.group(|builder| {
//!     builder.text("[");
//!     builder.indent(|builder| {
//!         builder.breakable_empty();
//!         builder.text("1, 2, 3");
//!     });
//!     builder.breakable_empty();
//!     builder.text("]");
//! });
//!
//! assert_eq!("[1, 2, 3]", builder.format());
//! ```
//!
//! The same document printed with a narrower [`print_width`] breaks at the
//! breakable points instead, indenting each element line.
//!
//! [`print_width`]: settings::FormatSettings::print_width

pub mod builder;
pub mod document;
pub mod settings;

mod printer;

use crate::document::Document;
use crate::printer::Printer;
use crate::settings::FormatSettings;

/// Renders a document tree with the given settings.
///
/// Emission is deterministic: the same tree and settings always produce
/// byte-identical output. Line endings are `"\n"`; callers wanting CRLF
/// post-process.
pub fn format(document: Document<'_>, settings: FormatSettings) -> String {
    Printer::new(document, 0, settings).build()
}

/// Like [`format`], with a pre-size hint for the output buffer; useful
/// when the caller knows the approximate rendered size.
pub fn format_with_capacity(document: Document<'_>, settings: FormatSettings, capacity_hint: usize) -> String {
    Printer::new(document, capacity_hint, settings).build()
}
