//! Integration tests for vocabulary training.

use phonesis::prelude::*;
use phonesis::training::{ProgressReporter, train};

#[test]
fn test_training_collects_every_fragment() -> Result<()> {
    let alphabet = Alphabet::english();
    let mut vocab = Vocabulary::new();
    let corpus = ["Each machine learning module", "contained experience"];

    train(corpus, &alphabet, &mut vocab)?;

    let segmenter = Segmenter::new(alphabet);
    for text in corpus {
        for word in segmenter.segment_text(text)? {
            for token in word.tokens {
                assert!(vocab.contains(token.as_str()), "{}", token.as_str());
            }
        }
    }

    Ok(())
}

#[test]
fn test_training_twice_is_idempotent() -> Result<()> {
    let mut trainer = Trainer::new(Alphabet::english());
    let corpus = vec!["each machine", "learning module"];

    let first = trainer.run(&corpus)?;
    let snapshot = trainer.vocabulary().clone();
    let second = trainer.run(&corpus)?;

    assert!(first > 0);
    assert_eq!(second, 0);
    assert_eq!(trainer.vocabulary(), &snapshot);

    Ok(())
}

#[test]
fn test_new_fragments_appended_as_sorted_block() -> Result<()> {
    let mut trainer = Trainer::new(Alphabet::english());
    trainer.run(["module"])?;
    assert_eq!(trainer.vocabulary().as_slice(), &["#", "du", "le", "mo"]);

    // Existing indices stay put; only the new block is sorted.
    let added = trainer.run(["machine"])?;
    assert_eq!(added, 3);
    assert_eq!(
        trainer.vocabulary().as_slice(),
        &["#", "du", "le", "mo", "hi", "mac", "ne"]
    );

    Ok(())
}

#[test]
fn test_training_extends_loaded_vocabulary() -> Result<()> {
    let alphabet = Alphabet::new("bcd".chars(), "a".chars())?;
    let mut vocab = Vocabulary::from_entries(["ba"])?;

    // Punctuation and case are normalized away before segmentation.
    let added = train(["Ba, ba!"], &alphabet, &mut vocab)?;
    assert_eq!(added, 1);
    assert_eq!(vocab.as_slice(), &["ba", "#"]);

    Ok(())
}

#[derive(Default)]
struct Counter {
    steps: usize,
    finished: bool,
}

impl ProgressReporter for Counter {
    fn step(&mut self, _words_done: usize) {
        self.steps += 1;
    }

    fn finish(&mut self, _added: usize, _vocab_size: usize) {
        self.finished = true;
    }
}

#[test]
fn test_progress_reporting() -> Result<()> {
    let mut trainer = Trainer::new(Alphabet::english()).with_config(TrainerConfig {
        progress_interval: 0,
    });
    let mut counter = Counter::default();

    trainer.run_with_progress(["each machine"], &mut counter)?;

    // Interval 0 disables periodic reports; the final count is still sent.
    assert_eq!(counter.steps, 1);
    assert!(counter.finished);

    Ok(())
}
