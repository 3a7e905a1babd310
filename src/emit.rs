//! Source emission: preamble, visitor interface, base type and one concrete
//! type per kind, rendered by a per-language [`Backend`].
//!
//! Every kind's `accept` calls exactly the visitor method named after it
//! (`visit<Name><Base>` in the target language's spelling), so the set of
//! visitor methods and the set of `accept` calls are the same set.
pub mod cpp;
pub mod rust;

use std::collections::HashMap;

use clap::ValueEnum;

use crate::error::SpecError;
use crate::grammar::GrammarTable;
use crate::spec::{FieldSpec, TypeSpec};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

pub trait Backend {
    /// output file extension, without the dot
    fn extension(&self) -> &'static str;

    fn visit_method_name(&self, base_name: &str, kind_name: &str) -> String;

    /// import line for the externally defined `Token` type
    fn preamble(&self) -> String;

    /// One abstract method per kind, in `specs` order. Never looks at fields.
    fn visitor_interface(&self, base_name: &str, specs: &[&TypeSpec]) -> String;

    fn base_type(&self, base_name: &str) -> String;

    fn concrete_type(&self, base_name: &str, spec: &TypeSpec) -> String;

    /// Reject kind or field names this language cannot declare.
    fn check_kind(&self, base_name: &str, spec: &TypeSpec) -> Result<(), SpecError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Lang {
    #[default]
    Cpp,
    Rust,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Lang {
    pub fn backend(self) -> Box<dyn Backend> {
        match self {
            Lang::Cpp => Box::new(cpp::CppBackend),
            Lang::Rust => Box::new(rust::RustBackend),
        }
    }
}

/// The whole output file for one table: preamble, visitor interface, base
/// type, then concrete types in table order. Pure function of its inputs.
pub fn render_file(backend: &dyn Backend, table: &GrammarTable) -> Result<String, SpecError> {
    check_table(backend, table)?;

    let base_name = table.base_name();
    let specs: Vec<&TypeSpec> = table.kinds().collect();

    let mut out = backend.preamble();
    out.push_str(&backend.visitor_interface(base_name, &specs));
    out.push_str(&backend.base_type(base_name));
    for spec in &specs {
        out.push_str(&backend.concrete_type(base_name, spec));
    }
    Ok(out)
}

/// Distinct kinds must map to distinct visitor methods in the backend's
/// spelling (`FooBar` and `Foo_bar` are both `visit_foo_bar_expr` in Rust).
pub fn check_table(backend: &dyn Backend, table: &GrammarTable) -> Result<(), SpecError> {
    let base_name = table.base_name();
    let mut methods: HashMap<String, &str> = HashMap::new();
    for spec in table.kinds() {
        backend.check_kind(base_name, spec)?;
        let method = backend.visit_method_name(base_name, &spec.name);
        if let Some(first) = methods.insert(method.clone(), &spec.name) {
            return Err(SpecError::VisitMethodClash {
                method,
                first: first.to_string(),
                second: spec.name.clone(),
            });
        }
    }
    Ok(())
}

/// First field or kind name of `spec` that `reserved` rejects.
pub(crate) fn find_reserved<'a>(
    spec: &'a TypeSpec,
    reserved: impl Fn(&str) -> bool,
) -> Option<&'a str> {
    std::iter::once(spec.name.as_str())
        .chain(spec.field_names())
        .find(|name| reserved(*name))
}

/// The fields every base declaration carries: a binary-operation shape that
/// does not depend on the kinds in the table. Kinds never use this storage;
/// each declares its own complete field set.
pub fn legacy_base_fields(base_name: &str) -> [FieldSpec; 3] {
    let field = |type_name: &str, field_name: &str| FieldSpec {
        type_name: type_name.to_string(),
        field_name: field_name.to_string(),
    };
    [
        field(base_name, "left"),
        field("Token", "oprtr"),
        field(base_name, "right"),
    ]
}

/// `visitBinaryExpr` → `visit_binary_expr`, `visitHTTPExpr` → `visit_http_expr`.
pub fn snake_case(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);
    for (ix, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && ix > 0 {
            let prev = chars[ix - 1];
            let next_is_lower = chars.get(ix + 1).is_some_and(|n| n.is_ascii_lowercase());
            let boundary = prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower);
            if boundary && prev != '_' {
                out.push('_');
            }
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
