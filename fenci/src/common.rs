//! Common constants and utilities.
use bincode::config::{self, Fixint, LittleEndian};

/// Minimum frequency of a dictionary entry.
/// Entries below this threshold are dropped at load time.
pub const MIN_WORD_FREQUENCY: u32 = 2;

/// Cost assigned to a synthesized unknown token, chosen so that an
/// unknown edge is taken only when no dictionary-backed path reaches
/// a position. Must stay far above any realistic entry cost
/// (`log2(total_frequency) - log2(frequency)`).
pub const UNKNOWN_WORD_COST: f32 = 32.0;

/// Tag assigned to synthesized unknown tokens.
pub const UNKNOWN_WORD_TAG: &str = "x";

pub(crate) fn bincode_config() -> config::Configuration<LittleEndian, Fixint> {
    config::standard()
        .with_little_endian()
        .with_fixed_int_encoding()
}
