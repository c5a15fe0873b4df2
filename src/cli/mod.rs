//! Command-line interface for phpgen.
//!
//! Provides the `generate` command: load a JSON model document, resolve the
//! base element and write the PHP source tree.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use crate::generator::{generate, GenOptions};
use crate::model::load_model;

/// phpgen command line
#[derive(Parser)]
#[command(name = "phpgen")]
#[command(about = "Generate PHP sources from a UML model document", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate PHP sources from a model document
    Generate {
        /// Path to the JSON model document
        #[arg(short, long)]
        model: PathBuf,

        /// Output directory the package tree is created under
        #[arg(short, long)]
        out: PathBuf,

        /// Name of the element to generate from (default: document root)
        #[arg(long)]
        root: Option<String>,

        /// Path to a JSON options file (flags below override its values)
        #[arg(long)]
        options: Option<PathBuf>,

        /// Indent with a tab instead of spaces
        #[arg(long)]
        use_tab: bool,

        /// Spaces per indentation level
        #[arg(long)]
        indent_spaces: Option<usize>,

        /// Suffix for class file names (before .php)
        #[arg(long)]
        class_suffix: Option<String>,

        /// Suffix for interface file names (before .php)
        #[arg(long)]
        interface_suffix: Option<String>,

        /// Prefix parameters with resolved type hints
        #[arg(long)]
        strict: bool,

        /// Append return type declarations to method signatures
        #[arg(long)]
        return_types: bool,

        /// Do not emit doc comments
        #[arg(long)]
        no_doc: bool,
    },
}

pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Generate {
            model,
            out,
            root,
            options,
            use_tab,
            indent_spaces,
            class_suffix,
            interface_suffix,
            strict,
            return_types,
            no_doc,
        } => {
            let mut opts = match options {
                Some(path) => {
                    let content = std::fs::read_to_string(&path)
                        .with_context(|| format!("failed to read options file {path:?}"))?;
                    serde_json::from_str::<GenOptions>(&content)
                        .with_context(|| format!("invalid options file {path:?}"))?
                }
                None => GenOptions::default(),
            };
            if use_tab {
                opts.use_tab = true;
            }
            if let Some(n) = indent_spaces {
                opts.indent_spaces = n;
            }
            if let Some(s) = class_suffix {
                opts.class_suffix = s;
            }
            if let Some(s) = interface_suffix {
                opts.interface_suffix = s;
            }
            if strict {
                opts.strict_types = true;
            }
            if return_types {
                opts.return_types = true;
            }
            if no_doc {
                opts.php_doc = false;
            }

            let graph = load_model(&model)?;
            let base = match root {
                Some(name) => match graph.find_by_name(&name) {
                    Some(id) => id,
                    None => bail!("no element named `{name}` in {model:?}"),
                },
                None => graph.root(),
            };
            generate(&graph, base, &out, &opts)
        }
    }
}
