//! C++ structs with a pure-virtual `visitorInterface`.
use super::{find_reserved, legacy_base_fields, Backend};
use crate::error::SpecError;
use crate::spec::TypeSpec;

const VISITOR: &str = "visitorInterface";

const KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break",
    "case", "catch", "char", "char8_t", "char16_t", "char32_t", "class", "compl", "concept",
    "const", "consteval", "constexpr", "constinit", "const_cast", "continue", "co_await",
    "co_return", "co_yield", "decltype", "default", "delete", "do", "double", "dynamic_cast",
    "else", "enum", "explicit", "export", "extern", "false", "float", "for", "friend", "goto",
    "if", "inline", "int", "long", "mutable", "namespace", "new", "noexcept", "not", "not_eq",
    "nullptr", "operator", "or", "or_eq", "private", "protected", "public", "register",
    "reinterpret_cast", "requires", "return", "short", "signed", "sizeof", "static",
    "static_assert", "static_cast", "struct", "switch", "template", "this", "thread_local",
    "throw", "true", "try", "typedef", "typeid", "typename", "union", "unsigned", "using",
    "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
];

pub struct CppBackend;

impl Backend for CppBackend {
    fn extension(&self) -> &'static str {
        "cpp"
    }

    fn visit_method_name(&self, base_name: &str, kind_name: &str) -> String {
        format!("visit{kind_name}{base_name}")
    }

    fn preamble(&self) -> String {
        "#include \"Token.h\"\n\n".to_string()
    }

    fn visitor_interface(&self, base_name: &str, specs: &[&TypeSpec]) -> String {
        let param = base_name.to_lowercase();
        let mut out = String::new();
        // the interface names every kind before any of them is defined
        for spec in specs {
            out.push_str(&format!("struct {};\n", spec.name));
        }
        if !specs.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("struct {VISITOR} {{\n"));
        for spec in specs {
            out.push_str(&format!(
                "\tvirtual void {}({}& {param}) = 0;\n",
                self.visit_method_name(base_name, &spec.name),
                spec.name,
            ));
        }
        out.push_str("};\n\n");
        out
    }

    fn base_type(&self, base_name: &str) -> String {
        let mut out = format!("struct {base_name} {{\n");
        for field in legacy_base_fields(base_name) {
            out.push_str(&format!("\tconst {field};\n"));
        }
        out.push_str(&format!("\n\tvirtual void accept({VISITOR}& visitor) = 0;\n"));
        out.push_str("};\n\n");
        out
    }

    fn concrete_type(&self, base_name: &str, spec: &TypeSpec) -> String {
        let name = &spec.name;
        let params = spec.fields.iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let inits = spec.field_names()
            .map(|f| format!("{f}{{{f}}}"))
            .collect::<Vec<_>>()
            .join(", ");

        let mut out = format!("struct {name} : {base_name} {{\n");
        out.push_str(&format!("\t{name} ({params})\n"));
        out.push_str(&format!("\t\t: {inits}\n"));
        out.push_str("\t{}\n\n");
        for field in &spec.fields {
            out.push_str(&format!("\tconst {field};\n"));
        }
        out.push_str(&format!("\n\tvoid accept({VISITOR}& visitor) override {{\n"));
        out.push_str(&format!("\t\tvisitor.{}(*this);\n", self.visit_method_name(base_name, name)));
        out.push_str("\t}\n");
        out.push_str("};\n\n");
        out
    }

    fn check_kind(&self, _base_name: &str, spec: &TypeSpec) -> Result<(), SpecError> {
        // `accept` is taken by the dispatch method, `visitorInterface` by the visitor
        let reserved = |name: &str| KEYWORDS.contains(&name) || name == "accept" || name == VISITOR;
        match find_reserved(spec, reserved) {
            Some(name) => Err(SpecError::ReservedName {
                kind: spec.name.clone(),
                name: name.to_string(),
                lang: "C++",
            }),
            None => Ok(()),
        }
    }
}
