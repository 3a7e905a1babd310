use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning spec lines into a grammar table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// A spec line that does not follow `Name : type field, type field`.
    #[error("malformed spec line `{line}`: {reason}")]
    Malformed { line: String, reason: String },

    /// Two kinds with the same name would produce two identical visitor methods.
    #[error("kind `{name}` is declared twice for base `{base}`")]
    DuplicateKind { base: String, name: String },

    /// A kind declaring two fields with the same name.
    #[error("field `{field}` is declared twice in kind `{kind}`")]
    DuplicateField { kind: String, field: String },

    /// A kind named after its own base would derive from itself.
    #[error("kind `{name}` has the same name as its base")]
    KindShadowsBase { name: String },

    /// Two kinds whose visitor methods are spelled the same in the target language.
    #[error("kinds `{first}` and `{second}` both map to visitor method `{method}`")]
    VisitMethodClash { method: String, first: String, second: String },

    /// A kind or field name the target language reserves.
    #[error("`{name}` in kind `{kind}` cannot be used as a name in {lang}")]
    ReservedName { kind: String, name: String, lang: &'static str },

    /// A base name (usually a grammar file stem) that is not an identifier.
    #[error("`{base}` is not a valid base name")]
    InvalidBaseName { base: String },

    /// A grammar with no kinds at all.
    #[error("grammar for base `{base}` declares no kinds")]
    EmptyGrammar { base: String },
}

/// Errors raised while writing generated source to disk.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
