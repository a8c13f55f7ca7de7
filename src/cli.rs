//! Minimal CLI: infer → (typescript | model)
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;
use serde_json::Value;

use crate::inference::Inference;
use crate::ir::Model;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer structural types from JSON documents and emit TypeScript
/// interface definitions or the raw typed model
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// infer and emit a TypeScript interface listing
    Typescript(TypescriptOut),
    /// infer and dump the typed model as JSON
    Model(ModelOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (one document per line)
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /data/items)
    #[arg(long)]
    json_pointer: Option<String>,

    /// jq filter applied to each document before inference
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    ///
    /// TODO: stdin not yet supported
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug)]
struct TypescriptOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// name for the root definition / alias
    #[arg(long, default_value = "Root")]
    root_type: String,

    /// prepend a generated-at banner comment
    #[arg(long, default_value_t = false)]
    banner: bool,

    /// output .ts file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ModelOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// name for the root definition / alias
    #[arg(long, default_value = "Root")]
    root_type: String,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

/// One loaded document: where it came from, and the value to infer.
#[derive(Debug)]
struct Document {
    label: String,
    value: Value,
}

#[derive(Debug, thiserror::Error)]
enum InputError {
    #[error("failed to read {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
    #[error("json pointer {pointer} matched nothing in {path}")]
    Pointer { path: String, pointer: String },
    #[error("jq filter failed on {path}: {message}")]
    Jq { path: String, message: String },
    #[error("glob pattern matched no files: {0}")]
    EmptyGlob(String),
    #[error(transparent)]
    BadPattern(#[from] glob::PatternError),
    #[error(transparent)]
    BadEntry(#[from] glob::GlobError),
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_documents(&self) -> Result<Vec<Document>, InputError> {
        let mut docs = Vec::new();
        for path in resolve_input_paths(&self.input)? {
            let label = path.to_string_lossy().into_owned();
            let source = std::fs::read_to_string(&path)
                .map_err(|source| InputError::Read { path: label.clone(), source })?;

            let parsed: Vec<(String, Value)> = if self.ndjson {
                crate::path_de::parse_ndjson(&source)
                    .map_err(|message| InputError::Parse { path: label.clone(), message })?
                    .into_iter()
                    .map(|(line_no, value)| (format!("{label}:{line_no}"), value))
                    .collect()
            } else {
                let value = crate::path_de::parse_document(&source)
                    .map_err(|message| InputError::Parse { path: label.clone(), message })?;
                vec![(label.clone(), value)]
            };

            for (doc_label, value) in parsed {
                let value = match self.json_pointer.as_deref() {
                    None => value,
                    Some(pointer) => value.pointer(pointer).cloned().ok_or_else(|| {
                        InputError::Pointer {
                            path: doc_label.clone(),
                            pointer: pointer.to_string(),
                        }
                    })?,
                };
                match self.jq_expr.as_deref() {
                    None => docs.push(Document { label: doc_label, value }),
                    Some(expr) => {
                        let produced = crate::jq_exec::apply_filter(expr, &value).map_err(
                            |err| InputError::Jq {
                                path: doc_label.clone(),
                                message: format!("{err:#}"),
                            },
                        )?;
                        for (i, value) in produced.into_iter().enumerate() {
                            docs.push(Document { label: format!("{doc_label}#{i}"), value });
                        }
                    }
                }
            }
        }
        Ok(docs)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Typescript(target) => {
                let docs = target.input_settings.load_documents()?;
                let labeled = docs.len() > 1;
                // one independent run per document; runs share nothing
                let sections: Vec<String> = docs
                    .par_iter()
                    .map(|doc| {
                        let listing = crate::inference::infer(&doc.value, &target.root_type);
                        if labeled {
                            format!("// {}\n{listing}", doc.label)
                        } else {
                            listing
                        }
                    })
                    .collect();
                let mut text = sections.join("\n");
                if target.banner {
                    let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
                    text = format!("// generated by json-tsgen on {stamp}\n\n{text}");
                }
                write_output(target.out.as_deref(), &text)
            }
            Command::Model(target) => {
                let docs = target.input_settings.load_documents()?;
                let models: Vec<Model> = docs
                    .par_iter()
                    .map(|doc| Inference::new().solve(&doc.value, &target.root_type))
                    .collect();
                let payload = match models.as_slice() {
                    [single] => serde_json::to_string_pretty(single)?,
                    many => serde_json::to_string_pretty(many)?,
                };
                write_output(target.out.as_deref(), &payload)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(out: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, text)?;
            eprintln!("{} {}", "wrote".green().bold(), path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn resolve_input_paths<I>(patterns: I) -> Result<Vec<PathBuf>, InputError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();
    for raw in patterns {
        let pattern = raw.as_ref();
        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            // an explicit glob that matches nothing is an error, not silence
            if !matched_any {
                return Err(InputError::EmptyGlob(pattern.to_string()));
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_paths_pass_through_untouched() {
        let paths = resolve_input_paths(["a.json", "dir/b.json"]).unwrap();
        assert_eq!(paths, [PathBuf::from("a.json"), PathBuf::from("dir/b.json")]);
    }

    #[test]
    fn empty_globs_are_errors() {
        let err = resolve_input_paths(["no-such-dir-xyz/*.json"]).unwrap_err();
        assert!(matches!(err, InputError::EmptyGlob(_)));
    }
}
