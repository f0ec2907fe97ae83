#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/eightk/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Filing text processing: markup normalization and item extraction.
//!
//! Two pure passes over filing content:
//!
//! - [`html_to_text`] - strip markup down to scannable plain text
//! - [`extract_items`] - find "Item N.NN" headings and build
//!   [`ExtractedItem`](eightk_core::ExtractedItem)s with category labels and
//!   bounded excerpts
//!
//! # Example
//!
//! ```
//! use eightk_extract::{extract_items, html_to_text};
//!
//! let text = html_to_text("<p>Item 5.02: Officer Change</p><p>Details follow.</p>");
//! let items = extract_items(&text);
//! assert_eq!(items[0].code, "5.02");
//! assert_eq!(items[0].title_guess, "Officer Change");
//! ```

/// Item heading extraction and label resolution.
pub mod items;
/// Markup-to-text normalization.
pub mod normalize;

pub use items::{extract_items, item_label, SNIPPET_MAX_CHARS, SNIPPET_MAX_LINES};
pub use normalize::html_to_text;
