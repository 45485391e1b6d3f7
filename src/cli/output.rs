//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, PhonesisArgs};
use crate::error::Result;
use crate::tokenizer::TokenId;

/// Result structure for a training run.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainingResult {
    pub model_path: String,
    pub samples: usize,
    pub new_fragments: usize,
    pub vocab_size: usize,
    pub duration_ms: u64,
}

/// Result structure for one tokenized text.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenizationResult {
    pub text: String,
    pub fragments: Vec<String>,
    pub ids: Vec<TokenId>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub unknown_words: Vec<String>,
}

/// A fragment together with the shape that produced it.
#[derive(Debug, Serialize, Deserialize)]
pub struct FragmentView {
    pub text: String,
    pub shape: String,
}

/// Result structure for one segmented word.
#[derive(Debug, Serialize, Deserialize)]
pub struct SegmentationResult {
    pub word: String,
    pub encoding: String,
    pub fragments: Vec<FragmentView>,
}

/// Output a command result in the requested format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &PhonesisArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &PhonesisArgs) -> Result<()> {
    if args.verbosity() > 1 && !message.is_empty() {
        println!("{message}");
        println!();
    }

    // Convert to JSON value for easier manipulation
    let value = serde_json::to_value(result)?;
    output_generic_human(&value);
    Ok(())
}

/// Output generic data in human format.
fn output_generic_human(value: &serde_json::Value) {
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                let formatted_val = format_value(val);
                println!("{key}: {formatted_val}");
            }
        }
        _ => {
            let formatted_value = format_value(value);
            println!("{formatted_value}");
        }
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &PhonesisArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(obj) => {
            // Fragment views read best as `text/SHAPE`
            match (obj.get("text"), obj.get("shape")) {
                (Some(text), Some(shape)) => {
                    format!("{}/{}", format_value(text), format_value(shape))
                }
                _ => "[object]".to_string(),
            }
        }
        serde_json::Value::Null => "null".to_string(),
    }
}
