use crate::common::UNKNOWN_WORD_COST;
use crate::dictionary::lexicon::Lexicon;
use crate::sentence::Sentence;

/// Decoding mode.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub(crate) enum Mode {
    /// Minimum-cost segmentation of the whole input.
    Normal,
    /// Like [`Mode::Normal`], but the match spanning the whole input
    /// is forbidden, forcing compounds apart. Used for indexing-time
    /// sub-token expansion and for precomputing an entry's own
    /// decomposition.
    Search,
}

/// A resolved segment in unit coordinates. `word_id` is `None` for a
/// synthesized unknown token covering a single unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct RawSegment {
    pub word_id: Option<u32>,
    pub start_unit: usize,
    pub end_unit: usize,
}

/// An edge adopted at some position: the token it came from, how many
/// units it spans, and its own cost.
#[derive(Clone, Copy, Debug)]
struct Hop {
    word_id: Option<u32>,
    len_units: usize,
    cost: f32,
}

/// Per-position record of the minimum cumulative cost and the token
/// achieving it. `hop == None` means the position has not been
/// reached yet; a genuine zero-cost path is therefore distinguishable
/// from an unvisited position.
#[derive(Clone, Copy, Default, Debug)]
struct Jumper {
    min_cost: f32,
    hop: Option<Hop>,
}

impl Jumper {
    /// Adopts the proposed edge when the position is unvisited or the
    /// new cumulative cost is strictly lower. Ties keep the earlier
    /// proposal, i.e. lookup order.
    #[inline(always)]
    fn update(&mut self, base_cost: f32, hop: Hop) {
        let new_cost = base_cost + hop.cost;
        if self.hop.is_none() || new_cost < self.min_cost {
            self.min_cost = new_cost;
            self.hop = Some(hop);
        }
    }
}

/// Reusable state of the shortest-path search. The jumper array is
/// kept across calls to avoid reallocation.
#[derive(Default)]
pub(crate) struct Lattice {
    jumpers: Vec<Jumper>,
}

impl Lattice {
    /// Runs the shortest-path search over the unit lattice and stores
    /// the minimum-cost segmentation into `segments` in left-to-right
    /// order.
    ///
    /// Every position is reachable by at least one unknown edge of
    /// length one, so the search never fails on a non-empty input.
    pub fn decode(
        &mut self,
        lexicon: &Lexicon,
        sent: &Sentence,
        mode: Mode,
        segments: &mut Vec<RawSegment>,
    ) {
        segments.clear();

        let n = sent.len_units();
        if n == 0 {
            return;
        }
        // A single unit cannot be decomposed any further.
        if mode == Mode::Search && n == 1 {
            return;
        }

        self.jumpers.clear();
        self.jumpers.resize(n, Jumper::default());
        for current in 0..n {
            let base_cost = if current == 0 {
                0.0
            } else {
                self.jumpers[current - 1].min_cost
            };

            let mut shortest = usize::MAX;
            for m in lexicon.common_prefix_iterator(sent, current) {
                shortest = shortest.min(m.end_unit);
                let location = current + m.end_unit - 1;
                if mode == Mode::Search && current == 0 && location == n - 1 {
                    continue;
                }
                self.jumpers[location].update(
                    base_cost,
                    Hop {
                        word_id: Some(m.word_id),
                        len_units: m.end_unit,
                        cost: lexicon.word_cost(m.word_id),
                    },
                );
            }

            // No single-unit entry starts here, so propose an unknown
            // token to keep the lattice connected.
            if shortest != 1 {
                self.jumpers[current].update(
                    base_cost,
                    Hop {
                        word_id: None,
                        len_units: 1,
                        cost: UNKNOWN_WORD_COST,
                    },
                );
            }
        }

        let mut index = n;
        while index > 0 {
            debug_assert!(self.jumpers[index - 1].hop.is_some());
            let hop = self.jumpers[index - 1].hop.unwrap();
            let start_unit = index - hop.len_units;
            segments.push(RawSegment {
                word_id: hop.word_id,
                start_unit,
                end_unit: index,
            });
            index = start_unit;
        }
        segments.reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::builder::DictionaryBuilder;

    fn build(entries: &[(&str, u32)]) -> Lexicon {
        let mut builder = DictionaryBuilder::new();
        for &(surface, frequency) in entries {
            builder.add_word(surface, frequency, "");
        }
        builder.build().unwrap().into_lexicon()
    }

    fn sentence(input: &str) -> Sentence {
        let mut sent = Sentence::new();
        sent.set_sentence(input);
        sent
    }

    fn decode(lexicon: &Lexicon, sent: &Sentence, mode: Mode) -> Vec<RawSegment> {
        let mut segments = vec![];
        Lattice::default().decode(lexicon, sent, mode, &mut segments);
        segments
    }

    fn surfaces(lexicon: &Lexicon, sent: &Sentence, mode: Mode) -> Vec<String> {
        decode(lexicon, sent, mode)
            .iter()
            .map(|s| {
                sent.normalized()[sent.norm_position(s.start_unit)..sent.norm_position(s.end_unit)]
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn test_compound_wins() {
        // cost(中国) ~ 0.848, cost(人) ~ 1.848, cost(中国人) ~ 2.585.
        // The compound at 2.585 beats 中国+人 at 2.696.
        let lexicon = build(&[("中国", 100), ("人", 50), ("中国人", 30)]);
        let sent = sentence("中国人");
        assert_eq!(surfaces(&lexicon, &sent, Mode::Normal), vec!["中国人"]);
    }

    #[test]
    fn test_split_wins() {
        // With the compound rare enough, the two-token path is cheaper.
        let lexicon = build(&[("中国", 100), ("人", 100), ("中国人", 2)]);
        let sent = sentence("中国人");
        assert_eq!(surfaces(&lexicon, &sent, Mode::Normal), vec!["中国", "人"]);
    }

    #[test]
    fn test_search_mode_forbids_full_span() {
        let lexicon = build(&[("中国", 100), ("人", 50), ("中国人", 30)]);
        let sent = sentence("中国人");
        assert_eq!(
            surfaces(&lexicon, &sent, Mode::Search),
            vec!["中国", "人"]
        );
    }

    #[test]
    fn test_search_mode_single_unit() {
        let lexicon = build(&[("中", 100), ("人", 50)]);
        assert_eq!(decode(&lexicon, &sentence("中"), Mode::Search), vec![]);
        assert_eq!(decode(&lexicon, &sentence("hello"), Mode::Search), vec![]);
    }

    #[test]
    fn test_unknown_fallback() {
        let lexicon = build(&[("中国", 100), ("人", 50)]);
        let sent = sentence("日本");
        let segments = decode(&lexicon, &sent, Mode::Normal);
        assert_eq!(
            segments,
            vec![
                RawSegment {
                    word_id: None,
                    start_unit: 0,
                    end_unit: 1
                },
                RawSegment {
                    word_id: None,
                    start_unit: 1,
                    end_unit: 2
                },
            ]
        );
    }

    #[test]
    fn test_fallback_when_shortest_exceeds_one() {
        // No entry starts with 中, so the lattice still needs a
        // one-unit unknown edge at position 0.
        let lexicon = build(&[("国人", 60), ("人", 50)]);
        let sent = sentence("中国人");
        assert_eq!(
            surfaces(&lexicon, &sent, Mode::Normal),
            vec!["中", "国人"]
        );
    }

    #[test]
    fn test_zero_cost_path_is_visited() {
        // A single entry holds the whole frequency mass, so its cost
        // is exactly zero. The original implementation conflated a
        // zero-cost path with an unvisited position; the explicit
        // visited flag keeps the cheap path.
        let lexicon = build(&[("中国", 100)]);
        assert!((lexicon.word_cost(0) - 0.0).abs() < f32::EPSILON);
        let sent = sentence("中国人");
        assert_eq!(
            surfaces(&lexicon, &sent, Mode::Normal),
            vec!["中国", "人"]
        );
    }

    #[test]
    fn test_empty_input() {
        let lexicon = build(&[("中国", 100)]);
        assert_eq!(decode(&lexicon, &sentence(""), Mode::Normal), vec![]);
        assert_eq!(decode(&lexicon, &sentence(""), Mode::Search), vec![]);
    }

    #[test]
    fn test_lattice_reuse() {
        // Stale jumpers from a longer earlier input must not leak
        // into later searches over the same lattice.
        let lexicon = build(&[("中国", 100), ("人", 50), ("中国人", 30)]);
        let mut lattice = Lattice::default();
        let mut segments = vec![];

        lattice.decode(&lexicon, &sentence("中国人说中国"), Mode::Normal, &mut segments);
        assert_eq!(segments.len(), 3);

        lattice.decode(&lexicon, &sentence("中国人"), Mode::Normal, &mut segments);
        assert_eq!(
            segments,
            vec![RawSegment {
                word_id: Some(2),
                start_unit: 0,
                end_unit: 3
            }]
        );

        lattice.decode(&lexicon, &sentence(""), Mode::Normal, &mut segments);
        assert_eq!(segments, vec![]);
    }
}
