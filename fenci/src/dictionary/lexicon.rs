pub(crate) mod map;

use bincode::{Decode, Encode};

use crate::sentence::Sentence;
use map::WordMap;

/// Lexicon of words with their frequencies, derived costs, and
/// precomputed sub-decompositions.
#[derive(Decode, Encode)]
pub struct Lexicon {
    map: WordMap,
    entries: Vec<WordEntry>,
    total_frequency: u64,
    max_token_length: usize,
}

/// A stored dictionary entry. Immutable once the dictionary is built.
#[derive(Decode, Encode, Debug, PartialEq)]
pub(crate) struct WordEntry {
    pub surface: String,
    pub frequency: u32,
    pub cost: f32,
    pub tag: String,
    pub sub_segments: Vec<SubSegment>,
}

/// One piece of an entry's precomputed search-mode decomposition.
/// `word_id` is `None` when the piece is out of vocabulary; `start`
/// and `end` are byte offsets within the parent surface.
#[derive(Decode, Encode, Debug, PartialEq, Clone, Copy)]
pub(crate) struct SubSegment {
    pub word_id: Option<u32>,
    pub start: u32,
    pub end: u32,
}

/// A candidate found by a prefix lookup, spanning `end_unit` atomic
/// units from the lookup position.
#[derive(Eq, PartialEq, Debug)]
pub(crate) struct LexMatch {
    pub word_id: u32,
    pub end_unit: usize,
}

impl Lexicon {
    pub(crate) fn new(
        map: WordMap,
        entries: Vec<WordEntry>,
        total_frequency: u64,
        max_token_length: usize,
    ) -> Self {
        Self {
            map,
            entries,
            total_frequency,
            max_token_length,
        }
    }

    /// Iterates over entries whose surfaces are prefixes of the unit
    /// sequence starting at `start_unit`, bounded by the longest
    /// stored entry. A character-level trie match counts only when it
    /// ends exactly on a unit boundary, so an entry never matches the
    /// middle of a coalesced Latin run. Matches are yielded in
    /// increasing order of unit length.
    #[inline(always)]
    pub(crate) fn common_prefix_iterator<'a>(
        &'a self,
        sent: &'a Sentence,
        start_unit: usize,
    ) -> impl Iterator<Item = LexMatch> + 'a {
        let end_bound = sent.len_units().min(start_unit + self.max_token_length);
        let c_start = sent.char_position(start_unit);
        let c_end = sent.char_position(end_bound);
        self.map
            .common_prefix_iterator(&sent.chars()[c_start..c_end])
            .filter_map(move |(word_id, len_char)| {
                sent.unit_at_char(c_start + len_char).map(|end| LexMatch {
                    word_id,
                    end_unit: end - start_unit,
                })
            })
    }

    #[inline(always)]
    pub(crate) fn word_cost(&self, word_id: u32) -> f32 {
        self.entries[word_id as usize].cost
    }

    #[inline(always)]
    pub(crate) fn word_frequency(&self, word_id: u32) -> u32 {
        self.entries[word_id as usize].frequency
    }

    #[inline(always)]
    pub(crate) fn word_tag(&self, word_id: u32) -> &str {
        &self.entries[word_id as usize].tag
    }

    #[inline(always)]
    pub(crate) fn word_surface(&self, word_id: u32) -> &str {
        &self.entries[word_id as usize].surface
    }

    #[inline(always)]
    pub(crate) fn sub_segments(&self, word_id: u32) -> &[SubSegment] {
        &self.entries[word_id as usize].sub_segments
    }

    pub(crate) fn set_sub_segments(&mut self, word_id: u32, sub_segments: Vec<SubSegment>) {
        self.entries[word_id as usize].sub_segments = sub_segments;
    }

    /// Returns the number of stored entries.
    #[inline(always)]
    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }

    /// Returns the sum of frequencies over all stored entries.
    #[inline(always)]
    pub fn total_frequency(&self) -> u64 {
        self.total_frequency
    }

    /// Returns the maximum number of atomic units over all stored
    /// entries, which bounds candidate lookups.
    #[inline(always)]
    pub fn max_token_length(&self) -> usize {
        self.max_token_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::builder::DictionaryBuilder;

    fn lookup(lexicon: &Lexicon, input: &str, start_unit: usize) -> Vec<(String, usize)> {
        let mut sent = Sentence::new();
        sent.set_sentence(input);
        lexicon
            .common_prefix_iterator(&sent, start_unit)
            .map(|m| (lexicon.word_surface(m.word_id).to_string(), m.end_unit))
            .collect()
    }

    fn build(entries: &[(&str, u32)]) -> Lexicon {
        let mut builder = DictionaryBuilder::new();
        for &(surface, frequency) in entries {
            builder.add_word(surface, frequency, "");
        }
        builder.build().unwrap().into_lexicon()
    }

    #[test]
    fn test_shortest_candidate_first() {
        let lexicon = build(&[("中国", 100), ("中国人", 30), ("人", 50)]);
        assert_eq!(
            lookup(&lexicon, "中国人民", 0),
            vec![("中国".to_string(), 2), ("中国人".to_string(), 3)]
        );
        assert_eq!(lookup(&lexicon, "中国人民", 2), vec![("人".to_string(), 1)]);
    }

    #[test]
    fn test_unit_aligned_match() {
        // "hel" may not match inside the coalesced run "hello".
        let lexicon = build(&[("hel", 10), ("中", 10)]);
        assert_eq!(lookup(&lexicon, "hello中", 0), vec![]);
        assert_eq!(lookup(&lexicon, "hel中", 0), vec![("hel".to_string(), 1)]);
    }

    #[test]
    fn test_statistics() {
        let lexicon = build(&[("中国", 100), ("中国人", 30), ("人", 50)]);
        assert_eq!(lexicon.num_entries(), 3);
        assert_eq!(lexicon.total_frequency(), 180);
        assert_eq!(lexicon.max_token_length(), 3);
    }

    #[test]
    fn test_latin_run_is_one_unit() {
        let lexicon = build(&[("hello", 10), ("world", 10)]);
        assert_eq!(lexicon.max_token_length(), 1);
        assert_eq!(lookup(&lexicon, "Hello", 0), vec![("hello".to_string(), 1)]);
    }
}
