//! Vocabulary training.
//!
//! Training runs the segmentation engine over every word of a corpus and
//! appends the fragments it has not seen before to a [`Vocabulary`]. The
//! fragments discovered during one pass are sorted and appended as a single
//! block after the existing entries, so a pass never reorders what was
//! there before and a second pass over the same corpus adds nothing.
//!
//! # Examples
//!
//! ```
//! use phonesis::alphabet::Alphabet;
//! use phonesis::training::Trainer;
//!
//! let mut trainer = Trainer::new(Alphabet::english());
//! let added = trainer.run(["Machine learning", "machine"]).unwrap();
//! assert_eq!(added, trainer.vocabulary().len());
//! assert_eq!(trainer.run(["machine learning"]).unwrap(), 0);
//! ```

use std::collections::HashSet;
use std::time::Instant;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::alphabet::Alphabet;
use crate::analysis::normalizer;
use crate::analysis::segmenter::{Segmenter, segment_word};
use crate::error::Result;
use crate::storage::{ModelRecord, RecordStore};
use crate::tokenizer::{Tokenizer, TokenizerConfig};
use crate::vocabulary::Vocabulary;

/// Configuration for training passes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Number of words between two progress reports (0 disables them).
    pub progress_interval: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            progress_interval: 1000,
        }
    }
}

/// Receives progress notifications from a training pass.
///
/// All methods default to doing nothing; `()` is the silent reporter.
pub trait ProgressReporter {
    /// A pass starts; `samples` is the corpus size when it is known.
    fn start(&mut self, _samples: Option<usize>) {}

    /// `words_done` words have been segmented so far.
    fn step(&mut self, _words_done: usize) {}

    /// The pass finished.
    fn finish(&mut self, _added: usize, _vocab_size: usize) {}
}

impl ProgressReporter for () {}

/// Reports training progress through the `log` facade.
#[derive(Debug, Default)]
pub struct LogProgress {
    started: Option<Instant>,
    words: usize,
}

impl LogProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for LogProgress {
    fn start(&mut self, samples: Option<usize>) {
        self.started = Some(Instant::now());
        self.words = 0;
        match samples {
            Some(n) => info!("Training on {n} samples"),
            None => info!("Training started"),
        }
    }

    fn step(&mut self, words_done: usize) {
        self.words = words_done;
        debug!("{words_done} words segmented");
    }

    fn finish(&mut self, added: usize, vocab_size: usize) {
        let elapsed = self.started.map(|s| s.elapsed()).unwrap_or_default();
        let rate = if elapsed.as_secs_f64() > 0.0 {
            self.words as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };
        info!(
            "Training process is done in {elapsed:?} ({rate:.2} words/sec). \
             {added} new tokens, {vocab_size} tokens in vocabulary."
        );
    }
}

/// Train `vocabulary` on `corpus` and return the number of new fragments.
///
/// The vocabulary is only modified once the whole corpus was segmented;
/// on error it is left untouched.
pub fn train<I, S>(corpus: I, alphabet: &Alphabet, vocabulary: &mut Vocabulary) -> Result<usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    train_with_progress(
        corpus,
        alphabet,
        vocabulary,
        &TrainerConfig::default(),
        &mut (),
    )
}

/// [`train`] with progress notifications.
pub fn train_with_progress<I, S>(
    corpus: I,
    alphabet: &Alphabet,
    vocabulary: &mut Vocabulary,
    config: &TrainerConfig,
    progress: &mut dyn ProgressReporter,
) -> Result<usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let corpus = corpus.into_iter();
    let (lower, upper) = corpus.size_hint();
    progress.start(upper.filter(|&u| u == lower));

    let mut discovered: HashSet<String> = HashSet::new();
    let mut words_done = 0;
    let mut last_reported = 0;

    for sample in corpus {
        for (_, word) in normalizer::words(sample.as_ref(), alphabet) {
            for token in segment_word(alphabet, &word)? {
                let text = token.as_str();
                if !vocabulary.contains(text) && !discovered.contains(text) {
                    discovered.insert(text.to_string());
                }
            }

            words_done += 1;
            if config.progress_interval > 0 && words_done % config.progress_interval == 0 {
                progress.step(words_done);
                last_reported = words_done;
            }
        }
    }

    let added = vocabulary.extend_sorted(discovered);
    if words_done != last_reported {
        progress.step(words_done);
    }
    progress.finish(added, vocabulary.len());
    Ok(added)
}

/// Stateful trainer owning the alphabet and the vocabulary being built.
#[derive(Debug, Clone)]
pub struct Trainer {
    segmenter: Segmenter,
    vocabulary: Vocabulary,
    config: TrainerConfig,
}

impl Trainer {
    /// Create a trainer starting from an empty vocabulary.
    pub fn new(alphabet: Alphabet) -> Self {
        Self::with_vocabulary(alphabet, Vocabulary::new())
    }

    /// Create a trainer that extends an existing vocabulary.
    pub fn with_vocabulary(alphabet: Alphabet, vocabulary: Vocabulary) -> Self {
        Trainer {
            segmenter: Segmenter::new(alphabet),
            vocabulary,
            config: TrainerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: TrainerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn alphabet(&self) -> &Alphabet {
        self.segmenter.alphabet()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Run one silent training pass.
    pub fn run<I, S>(&mut self, corpus: I) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.run_with_progress(corpus, &mut ())
    }

    /// Run one training pass reporting to `progress`.
    pub fn run_with_progress<I, S>(
        &mut self,
        corpus: I,
        progress: &mut dyn ProgressReporter,
    ) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        train_with_progress(
            corpus,
            self.segmenter.alphabet(),
            &mut self.vocabulary,
            &self.config,
            progress,
        )
    }

    /// Replace alphabet and vocabulary with the content of `store`.
    ///
    /// The record is fully validated first; on error the trainer keeps its
    /// previous state. The configuration is kept.
    pub fn load(&mut self, store: &dyn RecordStore) -> Result<()> {
        let record = store.load()?;
        let alphabet = record.alphabet()?;
        let vocabulary = record.vocabulary()?;

        self.segmenter = Segmenter::new(alphabet);
        self.vocabulary = vocabulary;
        info!(
            "Loaded trainer state with {} tokens",
            self.vocabulary.len()
        );
        Ok(())
    }

    /// Write alphabet and vocabulary to `store`.
    pub fn save(&self, store: &dyn RecordStore) -> Result<()> {
        store.save(&ModelRecord::new(self.alphabet(), &self.vocabulary))
    }

    /// Build a lenient tokenizer from the trained alphabet and vocabulary.
    pub fn into_tokenizer(self) -> Tokenizer {
        Tokenizer::from_parts(
            self.segmenter.shared_alphabet(),
            self.vocabulary,
            TokenizerConfig::default(),
        )
    }
}
