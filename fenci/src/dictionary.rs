//! Dictionary for segmentation.
pub mod builder;
pub(crate) mod lexicon;

use std::io::{Read, Write};

use bincode::{Decode, Encode};

use crate::common;
use crate::errors::{FenciError, Result};
use builder::DictionaryBuilder;
use lexicon::Lexicon;

/// Magic number identifying the model format. Must be bumped whenever
/// the serialized layout changes.
const MODEL_MAGIC: &[u8] = b"FenciDict 0.1\n";

/// Inner data of [`Dictionary`].
#[derive(Decode, Encode)]
pub(crate) struct DictionaryInner {
    pub(crate) lexicon: Lexicon,
}

/// Immutable dictionary of frequency-weighted words.
///
/// A dictionary is created once, either from text sources or from a
/// compiled model, and is then only read. It can be shared across
/// threads freely.
pub struct Dictionary(pub(crate) DictionaryInner);

impl Dictionary {
    /// Creates a dictionary from text sources in the format described
    /// at [`DictionaryBuilder::read_source()`].
    ///
    /// Sources are processed in the given order, and the earliest
    /// definition of a surface wins; pass user-supplied dictionaries
    /// before general ones.
    ///
    /// # Errors
    ///
    /// [`FenciError`](crate::errors::FenciError) is returned when a
    /// reader fails or when no entry is accepted.
    pub fn from_readers<I, R>(rdrs: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: Read,
    {
        let mut builder = DictionaryBuilder::new();
        for rdr in rdrs {
            builder.read_source(rdr)?;
        }
        builder.build()
    }

    #[inline(always)]
    pub(crate) const fn lexicon(&self) -> &Lexicon {
        &self.0.lexicon
    }

    #[cfg(test)]
    pub(crate) fn into_lexicon(self) -> Lexicon {
        self.0.lexicon
    }

    /// Returns the number of stored words.
    #[inline(always)]
    pub fn num_words(&self) -> usize {
        self.lexicon().num_entries()
    }

    /// Returns the sum of frequencies over all stored words.
    #[inline(always)]
    pub fn total_frequency(&self) -> u64 {
        self.lexicon().total_frequency()
    }

    /// Exports the compiled model.
    ///
    /// # Errors
    ///
    /// When bincode generates an error, it will be returned as is.
    pub fn write<W>(&self, mut wtr: W) -> Result<usize>
    where
        W: Write,
    {
        wtr.write_all(MODEL_MAGIC)?;
        let num_bytes =
            bincode::encode_into_std_write(&self.0, &mut wtr, common::bincode_config())?;
        Ok(num_bytes + MODEL_MAGIC.len())
    }

    /// Creates a dictionary from a compiled model exported by
    /// [`Dictionary::write()`].
    ///
    /// # Errors
    ///
    /// [`FenciError`] is returned when the magic number is invalid.
    /// When bincode generates an error, it will be returned as is.
    pub fn read<R>(mut rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut magic = [0u8; MODEL_MAGIC.len()];
        rdr.read_exact(&mut magic)?;
        if magic != *MODEL_MAGIC {
            return Err(FenciError::invalid_argument(
                "rdr",
                "invalid magic number for the model",
            ));
        }
        let data = bincode::decode_from_std_read(&mut rdr, common::bincode_config())?;
        Ok(Self(data))
    }
}
