//! # Fenci
//!
//! Fenci is a word segmenter for scripts without explicit word
//! boundaries (such as Chinese), based on a frequency-weighted
//! dictionary and a shortest-path search over a character lattice.
//!
//! ## Examples
//!
//! ```
//! use fenci::{Dictionary, Segmenter};
//!
//! let entries = "中国 100\n人 50 n\n中国人 30 n";
//!
//! let dict = Dictionary::from_readers([entries.as_bytes()])?;
//!
//! let segmenter = Segmenter::new(dict);
//! let mut worker = segmenter.new_worker();
//!
//! worker.reset_sentence("中国人");
//! worker.segment();
//! assert_eq!(worker.num_tokens(), 1);
//! assert_eq!(worker.token(0).surface(), "中国人");
//! # Ok::<(), fenci::errors::FenciError>(())
//! ```
#![deny(missing_docs)]

#[cfg(target_pointer_width = "16")]
compile_error!("`target_pointer_width` must be larger than or equal to 32");

pub mod common;
pub mod dictionary;
pub mod errors;
pub mod segmenter;
mod sentence;
pub mod token;


pub use dictionary::builder::DictionaryBuilder;
pub use dictionary::Dictionary;
pub use segmenter::Segmenter;
