use bincode::{
    de::{BorrowDecoder, Decoder},
    enc::Encoder,
    error::{DecodeError, EncodeError},
    BorrowDecode, Decode, Encode,
};

use crate::errors::{FenciError, Result};

/// Mapping from surfaces to word ids, supporting common-prefix
/// searches over character sequences.
pub struct WordMap {
    da: crawdad::Trie,
}

impl Encode for WordMap {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<(), EncodeError> {
        Encode::encode(&self.da.serialize_to_vec(), encoder)?;
        Ok(())
    }
}

impl Decode for WordMap {
    fn decode<D: Decoder>(decoder: &mut D) -> Result<Self, DecodeError> {
        let data: Vec<u8> = Decode::decode(decoder)?;
        let (da, _) = crawdad::Trie::deserialize_from_slice(&data);
        Ok(Self { da })
    }
}

// The derived decoders of the containing structs also require the
// borrowed flavor.
impl<'de> BorrowDecode<'de> for WordMap {
    fn borrow_decode<D: BorrowDecoder<'de>>(decoder: &mut D) -> Result<Self, DecodeError> {
        Decode::decode(decoder)
    }
}

impl WordMap {
    /// Builds a new instance from pairs of a surface and a word id,
    /// sorted by surface with no duplicate surfaces.
    pub fn from_records<K>(records: &[(K, u32)]) -> Result<Self>
    where
        K: AsRef<str>,
    {
        Ok(Self {
            da: crawdad::Trie::from_records(records.iter().map(|(k, v)| (k, *v)))
                .map_err(|e| FenciError::invalid_argument("records", e.to_string()))?,
        })
    }

    /// Iterates over word ids whose surfaces are prefixes of `input`,
    /// in increasing order of the matched character length.
    #[inline(always)]
    pub fn common_prefix_iterator<'a>(
        &'a self,
        input: &'a [char],
    ) -> impl Iterator<Item = (u32, usize)> + 'a {
        self.da.common_prefix_search(input.iter().cloned())
    }
}
