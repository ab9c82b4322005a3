//! Construction of dictionaries from word sources.
use std::io::{BufRead, BufReader, Read};

use hashbrown::HashMap;

use crate::common::MIN_WORD_FREQUENCY;
use crate::dictionary::lexicon::{map::WordMap, Lexicon, SubSegment, WordEntry};
use crate::dictionary::{Dictionary, DictionaryInner};
use crate::errors::{FenciError, Result};
use crate::segmenter::lattice::{Lattice, Mode};
use crate::sentence::Sentence;

/// Builder of [`Dictionary`](crate::Dictionary).
///
/// Words are accumulated with [`DictionaryBuilder::add_word()`] or
/// [`DictionaryBuilder::read_source()`] and frozen by
/// [`DictionaryBuilder::build()`], which computes the aggregate
/// statistics, derives per-entry costs, and precomputes the
/// search-mode decomposition of every compound entry.
///
/// When the same surface is defined twice, the earliest definition
/// wins. Read user-supplied sources before general ones so that they
/// take priority.
#[derive(Default)]
pub struct DictionaryBuilder {
    entries: Vec<WordEntry>,
    surface_to_id: HashMap<String, usize>,
}

impl DictionaryBuilder {
    /// Creates a new instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a word with its corpus frequency and an opaque tag.
    ///
    /// The surface is normalized through the atomic-unit splitter, so
    /// Latin letters are stored lower-cased. Words with a frequency
    /// below [`MIN_WORD_FREQUENCY`], empty surfaces, and surfaces
    /// already defined are silently dropped.
    pub fn add_word(&mut self, surface: &str, frequency: u32, tag: &str) {
        if frequency < MIN_WORD_FREQUENCY {
            return;
        }
        let mut sent = Sentence::new();
        sent.set_sentence(surface);
        if sent.len_units() == 0 {
            return;
        }
        let surface = sent.normalized().to_string();
        if self.surface_to_id.contains_key(&surface) {
            return;
        }
        self.surface_to_id.insert(surface.clone(), self.entries.len());
        self.entries.push(WordEntry {
            surface,
            frequency,
            cost: 0.0,
            tag: tag.to_string(),
            sub_segments: vec![],
        });
    }

    /// Reads a dictionary source with one word per line:
    /// `<text> <frequency> [<tag>]`, separated by single spaces.
    ///
    /// Lines with fewer than two fields or a non-numeric frequency
    /// are skipped. Entries already defined by a previously read
    /// source keep their earlier definition.
    ///
    /// # Errors
    ///
    /// [`FenciError`] is returned when the reader fails.
    pub fn read_source<R>(&mut self, rdr: R) -> Result<()>
    where
        R: Read,
    {
        let reader = BufReader::new(rdr);
        for line in reader.lines() {
            let line = line?;
            let mut fields = line.split(' ');
            let (Some(surface), Some(freq_text)) = (fields.next(), fields.next()) else {
                log::debug!("Skipped a malformed line: {line}");
                continue;
            };
            let Ok(frequency) = freq_text.parse::<u32>() else {
                log::debug!("Skipped a non-numeric frequency: {line}");
                continue;
            };
            let tag = fields.next().unwrap_or("");
            self.add_word(surface, frequency, tag);
        }
        Ok(())
    }

    /// Freezes the accumulated words into an immutable dictionary.
    ///
    /// # Errors
    ///
    /// [`FenciError`] is returned when no word was accepted, since
    /// costs are undefined over an empty frequency distribution.
    pub fn build(self) -> Result<Dictionary> {
        if self.entries.is_empty() {
            return Err(FenciError::invalid_argument(
                "entries",
                "at least one dictionary entry is required",
            ));
        }

        let mut entries = self.entries;
        let total_frequency: u64 = entries.iter().map(|e| u64::from(e.frequency)).sum();

        let log_total_frequency = (total_frequency as f64).log2();
        for entry in entries.iter_mut() {
            entry.cost = (log_total_frequency - f64::from(entry.frequency).log2()) as f32;
        }

        let mut sentences = Vec::with_capacity(entries.len());
        let mut max_token_length = 0;
        for entry in &entries {
            let mut sent = Sentence::new();
            sent.set_sentence(&entry.surface);
            max_token_length = max_token_length.max(sent.len_units());
            sentences.push(sent);
        }

        let mut records = Vec::with_capacity(self.surface_to_id.len());
        for (surface, &word_id) in &self.surface_to_id {
            records.push((surface.as_str(), u32::try_from(word_id)?));
        }
        records.sort_unstable_by_key(|&(surface, _)| surface);
        let map = WordMap::from_records(&records)?;

        let mut lexicon = Lexicon::new(map, entries, total_frequency, max_token_length);

        // Decompose every compound entry with the same decoder used
        // for live queries, in search mode over its own units.
        let mut decompositions = vec![];
        let mut lattice = Lattice::default();
        let mut raw_segments = vec![];
        for (word_id, sent) in sentences.iter().enumerate() {
            if sent.len_units() < 2 {
                continue;
            }
            lattice.decode(&lexicon, sent, Mode::Search, &mut raw_segments);
            let mut sub_segments = vec![];
            for s in &raw_segments {
                sub_segments.push(SubSegment {
                    word_id: s.word_id,
                    start: u32::try_from(sent.byte_position(s.start_unit))?,
                    end: u32::try_from(sent.byte_position(s.end_unit))?,
                });
            }
            decompositions.push((u32::try_from(word_id)?, sub_segments));
        }
        for (word_id, sub_segments) in decompositions {
            lexicon.set_sub_segments(word_id, sub_segments);
        }

        Ok(Dictionary(DictionaryInner { lexicon }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_threshold_dropped() {
        let mut builder = DictionaryBuilder::new();
        builder.add_word("稀", 1, "");
        builder.add_word("中国", 100, "");
        let dict = builder.build().unwrap();
        assert_eq!(dict.lexicon().num_entries(), 1);
        assert_eq!(dict.lexicon().total_frequency(), 100);
    }

    #[test]
    fn test_first_definition_wins() {
        let mut builder = DictionaryBuilder::new();
        builder.add_word("中国", 100, "user");
        builder.add_word("中国", 30, "general");
        let dict = builder.build().unwrap();
        assert_eq!(dict.lexicon().num_entries(), 1);
        assert_eq!(dict.lexicon().word_frequency(0), 100);
        assert_eq!(dict.lexicon().word_tag(0), "user");
        assert_eq!(dict.lexicon().total_frequency(), 100);
    }

    #[test]
    fn test_surface_normalized() {
        let mut builder = DictionaryBuilder::new();
        builder.add_word("Rust", 10, "eng");
        // The lower-cased form collides with the first definition.
        builder.add_word("rust", 5, "eng");
        let dict = builder.build().unwrap();
        assert_eq!(dict.lexicon().num_entries(), 1);
        assert_eq!(dict.lexicon().word_surface(0), "rust");
        assert_eq!(dict.lexicon().word_frequency(0), 10);
    }

    #[test]
    fn test_empty_surface_dropped() {
        let mut builder = DictionaryBuilder::new();
        builder.add_word("", 10, "");
        builder.add_word("中国", 100, "");
        let dict = builder.build().unwrap();
        assert_eq!(dict.lexicon().num_entries(), 1);
    }

    #[test]
    fn test_empty_builder_fails() {
        assert!(DictionaryBuilder::new().build().is_err());
        let mut builder = DictionaryBuilder::new();
        builder.add_word("稀", 1, "");
        assert!(builder.build().is_err());
    }

    #[test]
    fn test_read_source_skips_malformed() {
        let source = "中国 100 ns\n人 50\nmalformed\n稀 1\n变 notanumber\n";
        let mut builder = DictionaryBuilder::new();
        builder.read_source(source.as_bytes()).unwrap();
        let dict = builder.build().unwrap();
        assert_eq!(dict.lexicon().num_entries(), 2);
        assert_eq!(dict.lexicon().total_frequency(), 150);
        assert_eq!(dict.lexicon().word_tag(0), "ns");
        assert_eq!(dict.lexicon().word_tag(1), "");
    }

    #[test]
    fn test_costs() {
        let mut builder = DictionaryBuilder::new();
        builder.add_word("中国", 100, "");
        builder.add_word("人", 50, "");
        builder.add_word("中国人", 30, "");
        let dict = builder.build().unwrap();
        let lexicon = dict.lexicon();
        assert_eq!(lexicon.total_frequency(), 180);
        assert!((lexicon.word_cost(0) - 0.848).abs() < 1e-3);
        assert!((lexicon.word_cost(1) - 1.848).abs() < 1e-3);
        assert!((lexicon.word_cost(2) - 2.585).abs() < 1e-3);
    }

    #[test]
    fn test_sub_segments_precomputed() {
        let mut builder = DictionaryBuilder::new();
        builder.add_word("中国", 100, "");
        builder.add_word("人", 50, "");
        builder.add_word("中国人", 30, "");
        let dict = builder.build().unwrap();
        let lexicon = dict.lexicon();

        // 中国人 decomposes into 中国 + 人.
        assert_eq!(
            lexicon.sub_segments(2),
            &[
                SubSegment {
                    word_id: Some(0),
                    start: 0,
                    end: 6
                },
                SubSegment {
                    word_id: Some(1),
                    start: 6,
                    end: 9
                },
            ]
        );
        // 中国 decomposes into two out-of-vocabulary characters.
        assert_eq!(
            lexicon.sub_segments(0),
            &[
                SubSegment {
                    word_id: None,
                    start: 0,
                    end: 3
                },
                SubSegment {
                    word_id: None,
                    start: 3,
                    end: 6
                },
            ]
        );
        // Single units cannot be decomposed.
        assert_eq!(lexicon.sub_segments(1), &[]);
    }
}
