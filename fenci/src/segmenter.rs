//! Shortest-path segmenter.
pub(crate) mod lattice;

use crate::dictionary::Dictionary;
use crate::sentence::Sentence;
use crate::token::{Token, TokenIter};
use lattice::{Lattice, Mode, RawSegment};

/// Segmenter over an immutable dictionary.
pub struct Segmenter {
    dict: Dictionary,
}

impl Segmenter {
    /// Creates a new instance.
    ///
    /// # Arguments
    ///
    ///  - `dict`: Dictionary to be used.
    pub const fn new(dict: Dictionary) -> Self {
        Self { dict }
    }

    /// Gets the reference to the dictionary.
    pub const fn dictionary(&self) -> &Dictionary {
        &self.dict
    }

    /// Creates a new worker.
    pub fn new_worker(&self) -> Worker<'_> {
        Worker::new(self)
    }
}

/// Maintainer of an input sentence and segmented results.
///
/// It also holds the internal data structures used in segmentation,
/// which can be reused to avoid unnecessary memory reallocation.
/// Workers are independent of each other; create one per thread.
pub struct Worker<'a> {
    pub(crate) dict: &'a Dictionary,
    pub(crate) sent: Sentence,
    pub(crate) segments: Vec<RawSegment>,
    lattice: Lattice,
}

impl<'a> Worker<'a> {
    pub(crate) fn new(segmenter: &'a Segmenter) -> Self {
        Self {
            dict: &segmenter.dict,
            sent: Sentence::new(),
            segments: vec![],
            lattice: Lattice::default(),
        }
    }

    /// Resets the input sentence to be segmented.
    pub fn reset_sentence<S>(&mut self, input: S)
    where
        S: AsRef<str>,
    {
        self.segments.clear();
        self.sent.set_sentence(input);
    }

    /// Segments the input sentence into the minimum-cost sequence of
    /// tokens. An empty input produces no tokens; any other input is
    /// covered completely.
    pub fn segment(&mut self) {
        self.run(Mode::Normal);
    }

    /// Segments the input sentence for search indexing: the token
    /// spanning the whole input is forbidden, so compounds are forced
    /// apart. A single-unit input produces no tokens.
    pub fn segment_for_search(&mut self) {
        self.run(Mode::Search);
    }

    fn run(&mut self, mode: Mode) {
        self.lattice
            .decode(self.dict.lexicon(), &self.sent, mode, &mut self.segments);
    }

    /// Gets the number of resultant tokens.
    #[inline(always)]
    pub fn num_tokens(&self) -> usize {
        self.segments.len()
    }

    /// Gets the `i`-th resultant token.
    #[inline(always)]
    pub fn token(&self, i: usize) -> Token {
        Token::new(self, i)
    }

    /// Creates an iterator of resultant tokens.
    #[inline(always)]
    pub const fn token_iter(&'a self) -> TokenIter<'a> {
        TokenIter::new(self, 0)
    }
}
