//! CLI: grammar tables → generated visitor scaffolding, one file per base.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use colored::Colorize;

use crate::emit::{render_file, Lang};
use crate::grammar::GrammarTable;
use crate::output::{output_path, write_generated, WriteMode};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate AST node declarations and a visitor interface for each grammar table
///
/// Output goes to `<OUTPUT_DIR>/<Base>.<ext>` and is APPENDED to any existing
/// file: running twice without clearing the file duplicates every declaration.
/// Pass `--truncate` to replace the file instead.
#[derive(Parser, Debug)]
#[command(name = "ast-gen")]
pub struct CommandLineInterface {
    /// directory to write into (must already exist)
    output_dir: PathBuf,

    /// target language of the generated source
    #[arg(long, value_enum, default_value_t = Lang::Cpp)]
    lang: Lang,

    /// grammar file, as a literal path or quoted glob pattern; repeat for
    /// more. Each file's stem is its base name (`Stmt.ast` → `Stmt`).
    /// Defaults to the built-in `Expr` table.
    #[arg(long, short, action = ArgAction::Append, num_args = 1)]
    grammar: Vec<String>,

    /// replace the output file instead of appending to it
    #[arg(long, default_value_t = false)]
    truncate: bool,

    /// print the parsed grammar tables as JSON on stdout
    #[arg(long, default_value_t = false)]
    dump_grammar: bool,

    /// report each file written on stderr
    #[arg(long, short, default_value_t = false)]
    verbose: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        // 1) every table is parsed before anything is written
        let tables = self.load_tables()?;

        if self.dump_grammar {
            let json = serde_json::to_string_pretty(&tables)?;
            println!("{json}");
        }

        // 2) render all files in memory, then write
        let backend = self.lang.backend();
        let mode = if self.truncate { WriteMode::Truncate } else { WriteMode::Append };
        let rendered = tables.iter()
            .map(|table| -> Result<_> {
                let path = output_path(&self.output_dir, table.base_name(), backend.extension());
                let source = render_file(backend.as_ref(), table)
                    .with_context(|| format!("cannot generate base `{}`", table.base_name()))?;
                Ok((path, table.len(), source))
            })
            .collect::<Result<Vec<_>>>()?;

        for (path, kinds, source) in rendered {
            write_generated(&path, &source, mode)?;
            if self.verbose {
                eprintln!("{} {} ({kinds} kinds)", "wrote".green(), path.display());
            }
        }
        Ok(())
    }

    fn load_tables(&self) -> Result<Vec<GrammarTable>> {
        if self.grammar.is_empty() {
            return Ok(vec![GrammarTable::builtin_expr()?]);
        }
        let paths = resolve_file_path_patterns(&self.grammar)
            .context("failed to resolve grammar file paths")?;
        let mut tables = Vec::with_capacity(paths.len());
        for path in paths {
            if self.verbose {
                eprintln!("{} {}", "reading".cyan(), path.display());
            }
            let table = GrammarTable::load(&path)?;
            if let Some(clash) = tables.iter().find(|t: &&GrammarTable| t.base_name() == table.base_name()) {
                anyhow::bail!(
                    "`{}` and an earlier grammar both describe base `{}`",
                    path.display(),
                    clash.base_name(),
                );
            }
            tables.push(table);
        }
        Ok(tables)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched = glob::glob(pattern)?.collect::<Result<Vec<_>, _>>()?;
            if matched.is_empty() {
                anyhow::bail!("glob pattern matched no files: {pattern}");
            }
            // glob yields alphabetical order already; keep it explicit
            matched.sort();
            out.append(&mut matched);
        } else {
            out.push(Path::new(pattern).to_path_buf());
        }
    }

    Ok(out)
}
