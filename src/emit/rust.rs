//! Rust: the base is an object-safe trait, each kind a struct implementing it,
//! and the visitor a trait with one `&mut self` method per kind.
//!
//! Traits carry no storage, so the fixed base field shape is written as the
//! base trait's doc comment rather than as fields.
use super::{find_reserved, legacy_base_fields, snake_case, Backend};
use crate::error::SpecError;
use crate::spec::{FieldSpec, TypeSpec};

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod",
    "move", "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait",
    "true", "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do",
    "final", "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

pub struct RustBackend;

impl RustBackend {
    fn visitor_name(base_name: &str) -> String {
        format!("{base_name}Visitor")
    }

    /// Fields typed as the base itself are boxed trait objects.
    fn field_type(base_name: &str, field: &FieldSpec) -> String {
        if field.type_name == base_name {
            format!("Box<dyn {base_name}>")
        } else {
            field.type_name.clone()
        }
    }

    fn accessor(base_name: &str, field: &FieldSpec) -> String {
        let name = &field.field_name;
        if field.type_name == base_name {
            format!(
                "    pub fn {name}(&self) -> &dyn {base_name} {{\n        self.{name}.as_ref()\n    }}\n",
            )
        } else {
            format!(
                "    pub fn {name}(&self) -> &{} {{\n        &self.{name}\n    }}\n",
                field.type_name,
            )
        }
    }
}

impl Backend for RustBackend {
    fn extension(&self) -> &'static str {
        "rs"
    }

    fn visit_method_name(&self, base_name: &str, kind_name: &str) -> String {
        snake_case(&format!("visit{kind_name}{base_name}"))
    }

    fn preamble(&self) -> String {
        "use crate::token::*;\n\n".to_string()
    }

    fn visitor_interface(&self, base_name: &str, specs: &[&TypeSpec]) -> String {
        let param = snake_case(base_name);
        let mut out = format!("pub trait {} {{\n", Self::visitor_name(base_name));
        for spec in specs {
            out.push_str(&format!(
                "    fn {}(&mut self, {param}: &{});\n",
                self.visit_method_name(base_name, &spec.name),
                spec.name,
            ));
        }
        out.push_str("}\n\n");
        out
    }

    fn base_type(&self, base_name: &str) -> String {
        let shape = legacy_base_fields(base_name)
            .iter()
            .map(|f| format!("{}: {}", f.field_name, f.type_name))
            .collect::<Vec<_>>()
            .join(", ");
        let mut out = format!("/// Base shape: {shape}.\n");
        out.push_str(&format!("pub trait {base_name} {{\n"));
        out.push_str(&format!(
            "    fn accept(&self, visitor: &mut dyn {});\n",
            Self::visitor_name(base_name),
        ));
        out.push_str("}\n\n");
        out
    }

    fn concrete_type(&self, base_name: &str, spec: &TypeSpec) -> String {
        let name = &spec.name;

        let mut out = format!("pub struct {name} {{\n");
        for field in &spec.fields {
            out.push_str(&format!(
                "    {}: {},\n",
                field.field_name,
                Self::field_type(base_name, field),
            ));
        }
        out.push_str("}\n\n");

        let params = spec.fields.iter()
            .map(|f| format!("{}: {}", f.field_name, Self::field_type(base_name, f)))
            .collect::<Vec<_>>()
            .join(", ");
        let inits = spec.field_names().collect::<Vec<_>>().join(", ");
        out.push_str(&format!("impl {name} {{\n"));
        out.push_str(&format!("    pub fn new({params}) -> Self {{\n"));
        out.push_str(&format!("        Self {{ {inits} }}\n"));
        out.push_str("    }\n");
        for field in &spec.fields {
            out.push('\n');
            out.push_str(&Self::accessor(base_name, field));
        }
        out.push_str("}\n\n");

        out.push_str(&format!("impl {base_name} for {name} {{\n"));
        out.push_str(&format!(
            "    fn accept(&self, visitor: &mut dyn {}) {{\n",
            Self::visitor_name(base_name),
        ));
        out.push_str(&format!("        visitor.{}(self);\n", self.visit_method_name(base_name, name)));
        out.push_str("    }\n");
        out.push_str("}\n\n");
        out
    }

    fn check_kind(&self, base_name: &str, spec: &TypeSpec) -> Result<(), SpecError> {
        // field accessors share the inherent impl with `new`
        let visitor = Self::visitor_name(base_name);
        let reserved = |name: &str| KEYWORDS.contains(&name) || name == "new" || name == visitor;
        match find_reserved(spec, reserved) {
            Some(name) => Err(SpecError::ReservedName {
                kind: spec.name.clone(),
                name: name.to_string(),
                lang: "Rust",
            }),
            None => Ok(()),
        }
    }
}
