//! Command implementations for the Phonesis CLI.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use log::{debug, info};

use crate::alphabet::Alphabet;
use crate::analysis::segmenter::Segmenter;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{PhonesisError, Result};
use crate::storage::{self, JsonFileStore};
use crate::tokenizer::{TokenizedText, Tokenizer, TokenizerConfig};
use crate::training::{LogProgress, Trainer, TrainerConfig};
use crate::vocabulary::Vocabulary;

/// Execute a CLI command.
pub fn execute_command(args: PhonesisArgs) -> Result<()> {
    match &args.command {
        Command::Train(train_args) => train(train_args.clone(), &args),
        Command::Tokenize(tokenize_args) => tokenize(tokenize_args.clone(), &args),
        Command::Segment(segment_args) => segment(segment_args.clone(), &args),
    }
}

/// Alphabet from an alphabet record, or the English default.
fn resolve_alphabet(path: Option<&Path>) -> Result<Alphabet> {
    match path {
        Some(path) => {
            debug!("Loading alphabet from: {}", path.display());
            storage::load_alphabet(path)
        }
        None => Ok(Alphabet::english()),
    }
}

/// Train a vocabulary on a word list and save the model.
fn train(args: TrainArgs, cli_args: &PhonesisArgs) -> Result<()> {
    let file = File::open(&args.words_file)
        .with_context(|| format!("cannot open word list '{}'", args.words_file.display()))?;
    let samples = BufReader::new(file)
        .lines()
        .collect::<std::result::Result<Vec<String>, _>>()?;

    let config = TrainerConfig {
        progress_interval: args.progress_interval,
    };
    let mut trainer = match &args.base {
        Some(base) => {
            info!("Extending vocabulary of: {}", base.display());
            let mut trainer = Trainer::new(Alphabet::english()).with_config(config);
            trainer.load(&JsonFileStore::new(base))?;
            if let Some(path) = &args.alphabet {
                if &storage::load_alphabet(path)? != trainer.alphabet() {
                    return Err(PhonesisError::invalid_argument(
                        "base model was trained with a different alphabet",
                    ));
                }
            }
            trainer
        }
        None => Trainer::new(resolve_alphabet(args.alphabet.as_deref())?).with_config(config),
    };

    let start_time = Instant::now();
    let new_fragments = trainer.run_with_progress(&samples, &mut LogProgress::new())?;
    let duration = start_time.elapsed();

    let vocab_size = trainer.vocabulary().len();
    trainer.save(&JsonFileStore::new(&args.output))?;

    output_result(
        "Training process is done",
        &TrainingResult {
            model_path: args.output.to_string_lossy().to_string(),
            samples: samples.len(),
            new_fragments,
            vocab_size,
            duration_ms: duration.as_millis() as u64,
        },
        cli_args,
    )
}

fn tokenization_result(text: &str, encoded: TokenizedText) -> TokenizationResult {
    TokenizationResult {
        text: text.to_string(),
        fragments: encoded.fragments,
        ids: encoded.ids,
        unknown_words: encoded.unknowns.into_keys().collect(),
    }
}

/// Tokenize texts given on the command line, or stdin line by line.
fn tokenize(args: TokenizeArgs, cli_args: &PhonesisArgs) -> Result<()> {
    let mut tokenizer = Tokenizer::new(Alphabet::english(), Vocabulary::new())
        .with_config(TokenizerConfig {
            strict: args.strict(),
        });
    tokenizer.load(&JsonFileStore::new(&args.model))?;

    if !args.texts.is_empty() {
        let encoded = if args.parallel {
            tokenizer.par_forward(&args.texts)?
        } else {
            tokenizer.forward(&args.texts)?
        };
        for (text, result) in args.texts.iter().zip(encoded) {
            output_result("Tokenized text", &tokenization_result(text, result), cli_args)?;
        }
        return Ok(());
    }

    // One line at a time; an unknown fragment only fails its own line.
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        match tokenizer.encode(&line) {
            Ok(result) => {
                output_result("Tokenized text", &tokenization_result(&line, result), cli_args)?
            }
            Err(e @ PhonesisError::UnknownFragment { .. }) => eprintln!("Error: {e}"),
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

/// Print the fragments and shapes of each word.
fn segment(args: SegmentArgs, cli_args: &PhonesisArgs) -> Result<()> {
    let segmenter = Segmenter::new(resolve_alphabet(args.alphabet.as_deref())?);

    for input in &args.words {
        for word in segmenter.segment_text(input)? {
            let fragments = word
                .tokens
                .iter()
                .filter_map(|token| token.fragment())
                .map(|fragment| FragmentView {
                    text: fragment.text.clone(),
                    shape: fragment.shape.to_string(),
                })
                .collect();

            output_result(
                "Segmented word",
                &SegmentationResult {
                    encoding: segmenter.alphabet().encode(&word.word).to_string(),
                    word: word.word,
                    fragments,
                },
                cli_args,
            )?;
        }
    }

    Ok(())
}
