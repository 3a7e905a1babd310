//! Grammar tables: every kind sharing one base, in declaration order.
use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Serialize;

use crate::error::SpecError;
use crate::spec::{is_identifier, parse_spec, TypeSpec};

/// The expression tree every run generates unless grammar files are given.
/// Padding before `:` is kept as written; the parser trims it.
pub const EXPR_GRAMMAR: [&str; 4] = [
    "Binary\t : Expr left, Token oprtr, Expr right",
    "Grouping : Expr expression",
    "Literal  : Object value",
    "Unary\t : Token oprtr, Expr right",
];

pub const EXPR_BASE: &str = "Expr";

#[derive(Debug, Clone, Serialize)]
pub struct GrammarTable {
    base_name: String,
    /// keyed by kind name; insertion order is table order
    kinds: IndexMap<String, TypeSpec>,
}

impl GrammarTable {
    pub fn new(base_name: &str) -> Result<Self, SpecError> {
        if !is_identifier(base_name) {
            return Err(SpecError::InvalidBaseName { base: base_name.to_string() });
        }
        Ok(Self { base_name: base_name.to_string(), kinds: IndexMap::new() })
    }

    /// Parse every line, failing on the first bad one. Nothing is skipped.
    pub fn from_lines<'a, I>(base_name: &str, lines: I) -> Result<Self, SpecError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut table = Self::new(base_name)?;
        for line in lines {
            table.push(parse_spec(line)?)?;
        }
        table.ensure_non_empty()?;
        Ok(table)
    }

    pub fn builtin_expr() -> Result<Self, SpecError> {
        Self::from_lines(EXPR_BASE, EXPR_GRAMMAR)
    }

    /// Grammar file source: one spec line per kind, `#` comments and blank
    /// lines ignored. Errors name the 1-based line they came from.
    pub fn from_source(base_name: &str, source: &str) -> Result<Self> {
        let mut table = Self::new(base_name)?;
        for (ix, line) in source.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let spec = parse_spec(line).with_context(|| format!("line {}", ix + 1))?;
            table.push(spec).with_context(|| format!("line {}", ix + 1))?;
        }
        table.ensure_non_empty()?;
        Ok(table)
    }

    /// Load a grammar file; the base name is the file stem (`Stmt.ast` → `Stmt`).
    pub fn load(path: &Path) -> Result<Self> {
        let base_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .with_context(|| format!("cannot derive a base name from `{}`", path.display()))?;
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read grammar file `{}`", path.display()))?;
        Self::from_source(base_name, &source)
            .with_context(|| format!("invalid grammar file `{}`", path.display()))
    }

    pub fn push(&mut self, spec: TypeSpec) -> Result<(), SpecError> {
        if spec.name == self.base_name {
            return Err(SpecError::KindShadowsBase { name: spec.name });
        }
        let mut seen = HashSet::new();
        for field in spec.field_names() {
            if !seen.insert(field) {
                return Err(SpecError::DuplicateField {
                    kind: spec.name.clone(),
                    field: field.to_string(),
                });
            }
        }
        if self.kinds.contains_key(&spec.name) {
            return Err(SpecError::DuplicateKind {
                base: self.base_name.clone(),
                name: spec.name,
            });
        }
        self.kinds.insert(spec.name.clone(), spec);
        Ok(())
    }

    fn ensure_non_empty(&self) -> Result<(), SpecError> {
        if self.kinds.is_empty() {
            return Err(SpecError::EmptyGrammar { base: self.base_name.clone() });
        }
        Ok(())
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn kinds(&self) -> impl Iterator<Item = &TypeSpec> {
        self.kinds.values()
    }

    pub fn get(&self, name: &str) -> Option<&TypeSpec> {
        self.kinds.get(name)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_has_four_kinds_in_order() {
        let table = GrammarTable::builtin_expr().unwrap();
        assert_eq!(table.base_name(), "Expr");
        let names: Vec<_> = table.kinds().map(|k| k.name.as_str()).collect();
        assert_eq!(names, ["Binary", "Grouping", "Literal", "Unary"]);

        let binary = table.get("Binary").unwrap();
        let fields: Vec<_> = binary.field_names().collect();
        assert_eq!(fields, ["left", "oprtr", "right"]);
        assert_eq!(table.get("Literal").unwrap().fields[0].type_name, "Object");
    }

    #[test]
    fn duplicate_kind_is_rejected() {
        let err = GrammarTable::from_lines("Expr", [
            "Grouping : Expr expression",
            "Grouping : Expr inner",
        ]).unwrap_err();
        assert_eq!(err, SpecError::DuplicateKind { base: "Expr".into(), name: "Grouping".into() });
    }

    #[test]
    fn duplicate_field_is_rejected() {
        let err = GrammarTable::from_lines("Expr", ["Binary : Expr left, Expr left"]).unwrap_err();
        assert_eq!(err, SpecError::DuplicateField { kind: "Binary".into(), field: "left".into() });
    }

    #[test]
    fn kind_named_after_its_base_is_rejected() {
        let err = GrammarTable::from_lines("Expr", ["Expr : Expr inner"]).unwrap_err();
        assert_eq!(err, SpecError::KindShadowsBase { name: "Expr".into() });
    }

    #[test]
    fn malformed_line_fails_the_whole_table() {
        let err = GrammarTable::from_lines("Expr", [
            "Grouping : Expr expression",
            "Binary Expr left Token oprtr",
        ]).unwrap_err();
        assert!(matches!(err, SpecError::Malformed { .. }));
    }

    #[test]
    fn empty_table_and_bad_base_are_rejected() {
        let err = GrammarTable::from_lines("Expr", [] as [&str; 0]).unwrap_err();
        assert_eq!(err, SpecError::EmptyGrammar { base: "Expr".into() });

        let err = GrammarTable::new("my-base").unwrap_err();
        assert!(matches!(err, SpecError::InvalidBaseName { .. }));
    }

    #[test]
    fn source_skips_comments_and_blank_lines() {
        let source = "# statements\n\nExpression : Expr expression\n  # trailing note\nPrint : Expr expression\n";
        let table = GrammarTable::from_source("Stmt", source).unwrap();
        let names: Vec<_> = table.kinds().map(|k| k.name.as_str()).collect();
        assert_eq!(names, ["Expression", "Print"]);
    }

    #[test]
    fn source_errors_carry_line_numbers() {
        let source = "Expression : Expr expression\n\nPrint Expr expression\n";
        let err = GrammarTable::from_source("Stmt", source).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("line 3"), "{msg}");
        assert!(err.downcast_ref::<SpecError>().is_some());
    }

    #[test]
    fn load_uses_file_stem_as_base_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Stmt.ast");
        std::fs::write(&path, "Print : Expr expression\nVar : Token name, Expr initializer\n").unwrap();
        let table = GrammarTable::load(&path).unwrap();
        assert_eq!(table.base_name(), "Stmt");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn serializes_in_table_order() {
        let table = GrammarTable::builtin_expr().unwrap();
        let json = serde_json::to_value(&table).unwrap();
        let keys: Vec<_> = json["kinds"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["Binary", "Grouping", "Literal", "Unary"]);
        assert_eq!(json["kinds"]["Unary"]["fields"][0]["field_name"], "oprtr");
    }
}
