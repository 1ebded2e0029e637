//! Rich-text deltas and their operational-transform algebra.
//!
//! A [`Delta`] is an ordered list of [`Op`]s (insert, delete, retain), each
//! optionally carrying an [`AttributeMap`]. A delta made only of inserts is
//! a document; anything else is an edit to one.
//!
//! The algebra:
//! - [`Delta::compose`] merges two sequential edits into one.
//! - [`Delta::transform`] rebases an edit over a concurrent one, and
//!   [`Delta::transform_position`] does the same for a caret.
//! - [`Delta::diff`] finds the edit between two documents.
//! - [`Delta::invert`] undoes an edit given the document it was made for.
//!
//! `compose` and `transform` also guard the [`constants::DETECTION_ID`]
//! attribute: an id that ends up split or partially erased is cleared, so a
//! surviving id always covers one unbroken run.
//!
//! # Example
//!
//! ```
//! use rich_delta::{attributes, Delta};
//!
//! let doc = Delta::builder().insert("Gandalf the Grey").build();
//! let edit = Delta::builder()
//!     .retain(12)
//!     .insert_with("White", attributes! { "color" => "#fff" })
//!     .delete(4)
//!     .build();
//! let result = doc.compose(&edit)?;
//! assert_eq!(
//!     result,
//!     Delta::builder()
//!         .insert("Gandalf the ")
//!         .insert_with("White", attributes! { "color" => "#fff" })
//!         .build()
//! );
//! # Ok::<(), rich_delta::DeltaError>(())
//! ```

pub mod attributes;
pub mod codec;
pub mod constants;
mod cursor;
mod delta;
mod detection;
mod error;
mod op;

pub use attributes::{AttributeMap, AttributeValue};
pub use cursor::OpCursor;
pub use delta::{Delta, DeltaBuilder};
pub use error::DeltaError;
pub use op::{InsertValue, Op, OpKind};
