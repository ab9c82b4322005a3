//! Container of resultant tokens.
use std::ops::Range;

use crate::common::{UNKNOWN_WORD_COST, UNKNOWN_WORD_TAG};
use crate::dictionary::lexicon::SubSegment;
use crate::segmenter::Worker;

/// Resultant token.
pub struct Token<'a> {
    worker: &'a Worker<'a>,
    index: usize,
}

impl<'a> Token<'a> {
    #[inline(always)]
    pub(crate) const fn new(worker: &'a Worker<'a>, index: usize) -> Self {
        Self { worker, index }
    }

    /// Gets the position range of the token in bytes of the raw input.
    #[inline(always)]
    pub fn range_byte(&self) -> Range<usize> {
        let seg = &self.worker.segments[self.index];
        let sent = &self.worker.sent;
        sent.byte_position(seg.start_unit)..sent.byte_position(seg.end_unit)
    }

    /// Gets the normalized surface of the token: the raw slice with
    /// Latin letters lower-cased.
    #[inline(always)]
    pub fn surface(&self) -> &'a str {
        let seg = &self.worker.segments[self.index];
        let sent = &self.worker.sent;
        &sent.normalized()[sent.norm_position(seg.start_unit)..sent.norm_position(seg.end_unit)]
    }

    /// Checks if the token was synthesized for text absent from the
    /// dictionary.
    #[inline(always)]
    pub fn is_unknown(&self) -> bool {
        self.worker.segments[self.index].word_id.is_none()
    }

    /// Gets the tag of the token, or [`UNKNOWN_WORD_TAG`] for a
    /// synthesized unknown token.
    #[inline(always)]
    pub fn tag(&self) -> &'a str {
        match self.worker.segments[self.index].word_id {
            Some(word_id) => self.worker.dict.lexicon().word_tag(word_id),
            None => UNKNOWN_WORD_TAG,
        }
    }

    /// Gets the corpus frequency of the token, or 1 for a synthesized
    /// unknown token.
    #[inline(always)]
    pub fn frequency(&self) -> u32 {
        match self.worker.segments[self.index].word_id {
            Some(word_id) => self.worker.dict.lexicon().word_frequency(word_id),
            None => 1,
        }
    }

    /// Gets the cost of the token, the edge weight used in the
    /// shortest-path search.
    #[inline(always)]
    pub fn cost(&self) -> f32 {
        match self.worker.segments[self.index].word_id {
            Some(word_id) => self.worker.dict.lexicon().word_cost(word_id),
            None => UNKNOWN_WORD_COST,
        }
    }

    /// Creates an iterator over the precomputed search-mode
    /// decomposition of the token, empty when the token is unknown
    /// or cannot be decomposed.
    #[inline(always)]
    pub fn sub_tokens(&self) -> SubTokenIter<'a> {
        let seg = &self.worker.segments[self.index];
        let pieces = match seg.word_id {
            Some(word_id) => self.worker.dict.lexicon().sub_segments(word_id),
            None => &[],
        };
        SubTokenIter {
            worker: self.worker,
            pieces,
            offset_byte: self.worker.sent.byte_position(seg.start_unit),
            i: 0,
        }
    }
}

/// Iterator of tokens.
pub struct TokenIter<'a> {
    worker: &'a Worker<'a>,
    i: usize,
}

impl<'a> TokenIter<'a> {
    #[inline(always)]
    pub(crate) const fn new(worker: &'a Worker<'a>, i: usize) -> Self {
        Self { worker, i }
    }
}

impl<'a> Iterator for TokenIter<'a> {
    type Item = Token<'a>;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.i < self.worker.num_tokens() {
            let t = self.worker.token(self.i);
            self.i += 1;
            Some(t)
        } else {
            None
        }
    }
}

/// One piece of a token's precomputed decomposition.
pub struct SubToken<'a> {
    worker: &'a Worker<'a>,
    piece: SubSegment,
    offset_byte: usize,
}

impl<'a> SubToken<'a> {
    /// Gets the position range of the piece in bytes of the raw
    /// input. ASCII-only lower-casing keeps normalized byte offsets
    /// aligned with the raw input.
    #[inline(always)]
    pub fn range_byte(&self) -> Range<usize> {
        self.offset_byte + self.piece.start as usize..self.offset_byte + self.piece.end as usize
    }

    /// Gets the normalized surface of the piece.
    #[inline(always)]
    pub fn surface(&self) -> &'a str {
        match self.piece.word_id {
            Some(word_id) => self.worker.dict.lexicon().word_surface(word_id),
            // The piece was out of vocabulary when the parent entry
            // was decomposed at build time; slice its normalized text
            // out of the sentence instead.
            None => &self.worker.sent.normalized()[self.range_byte()],
        }
    }

    /// Gets the tag of the piece, or [`UNKNOWN_WORD_TAG`] when the
    /// piece is out of vocabulary.
    #[inline(always)]
    pub fn tag(&self) -> &'a str {
        match self.piece.word_id {
            Some(word_id) => self.worker.dict.lexicon().word_tag(word_id),
            None => UNKNOWN_WORD_TAG,
        }
    }

    /// Checks if the piece is out of vocabulary.
    #[inline(always)]
    pub fn is_unknown(&self) -> bool {
        self.piece.word_id.is_none()
    }
}

/// Iterator of the pieces of a token's precomputed decomposition.
pub struct SubTokenIter<'a> {
    worker: &'a Worker<'a>,
    pieces: &'a [SubSegment],
    offset_byte: usize,
    i: usize,
}

impl<'a> Iterator for SubTokenIter<'a> {
    type Item = SubToken<'a>;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.i < self.pieces.len() {
            let t = SubToken {
                worker: self.worker,
                piece: self.pieces[self.i],
                offset_byte: self.offset_byte,
            };
            self.i += 1;
            Some(t)
        } else {
            None
        }
    }
}
