//! Spec lines: `"Name : type1 field1, type2 field2"` → [`TypeSpec`].
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::SpecError;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// One described kind. Field order is both declaration and constructor order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeSpec {
    pub name: String,
    pub fields: Vec<FieldSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// taken verbatim, never checked against a type universe
    pub type_name: String,
    pub field_name: String,
}

// kind and field names end up as identifiers in the generated source
static IDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

const NAME_DELIMITER: char = ':';
const FIELD_DELIMITER: &str = ", ";

// ————————————————————————————————————————————————————————————————————————————
// PARSER
// ————————————————————————————————————————————————————————————————————————————

pub fn parse_spec(line: &str) -> Result<TypeSpec, SpecError> {
    let malformed = |reason: String| SpecError::Malformed {
        line: line.to_string(),
        reason,
    };

    let Some((name, field_list)) = line.split_once(NAME_DELIMITER) else {
        return Err(malformed(format!("missing `{NAME_DELIMITER}` between name and fields")));
    };
    let name = name.trim();
    if !IDENT.is_match(name) {
        return Err(malformed(format!("`{name}` is not a valid kind name")));
    }

    let mut fields = Vec::new();
    for token in field_list.split(FIELD_DELIMITER) {
        let token = token.trim();
        let Some((type_name, field_name)) = token.split_once(' ') else {
            return Err(malformed(format!("field `{token}` is not a `<type> <name>` pair")));
        };
        let (type_name, field_name) = (type_name.trim(), field_name.trim());
        if !IDENT.is_match(field_name) {
            return Err(malformed(format!("`{field_name}` is not a valid field name")));
        }
        fields.push(FieldSpec {
            type_name: type_name.to_string(),
            field_name: field_name.to_string(),
        });
    }

    Ok(TypeSpec { name: name.to_string(), fields })
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl FromStr for TypeSpec {
    type Err = SpecError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_spec(s)
    }
}

/// Canonical spec-line form; re-parses to an identical `TypeSpec`.
impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {NAME_DELIMITER} ", self.name)?;
        for (ix, field) in self.fields.iter().enumerate() {
            if ix > 0 {
                f.write_str(FIELD_DELIMITER)?;
            }
            write!(f, "{field}")?;
        }
        Ok(())
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.type_name, self.field_name)
    }
}

impl TypeSpec {
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.field_name.as_str())
    }
}

pub(crate) fn is_identifier(s: &str) -> bool {
    IDENT.is_match(s)
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;

    fn field(type_name: &str, field_name: &str) -> FieldSpec {
        FieldSpec { type_name: type_name.into(), field_name: field_name.into() }
    }

    #[test]
    fn parses_name_and_ordered_fields() {
        let spec = parse_spec("Binary : Expr left, Token oprtr, Expr right").unwrap();
        assert_eq!(spec.name, "Binary");
        assert_eq!(spec.fields, vec![
            field("Expr", "left"),
            field("Token", "oprtr"),
            field("Expr", "right"),
        ]);
    }

    #[test]
    fn alignment_padding_is_trimmed() {
        // padding as found in hand-aligned grammar tables
        let spec = parse_spec("Unary\t : Token oprtr, Expr right").unwrap();
        assert_eq!(spec.name, "Unary");
        assert_eq!(spec.fields[0], field("Token", "oprtr"));

        let spec = parse_spec("  Literal  :   Object value  ").unwrap();
        assert_eq!(spec.name, "Literal");
        assert_eq!(spec.fields, vec![field("Object", "value")]);
    }

    #[test]
    fn splits_only_on_first_colon() {
        let spec = parse_spec("Scoped : std::string name").unwrap();
        assert_eq!(spec.name, "Scoped");
        assert_eq!(spec.fields, vec![field("std::string", "name")]);
    }

    #[test]
    fn type_names_are_opaque() {
        let spec = parse_spec("Call : Box<Expr> callee, Vec<Expr> arguments").unwrap();
        assert_eq!(spec.fields[0].type_name, "Box<Expr>");
        assert_eq!(spec.fields[1].type_name, "Vec<Expr>");
    }

    #[test]
    fn missing_colon_is_malformed() {
        let err = parse_spec("Binary Expr left Token oprtr").unwrap_err();
        assert!(matches!(err, SpecError::Malformed { .. }), "{err:?}");
    }

    #[test]
    fn field_without_space_is_malformed() {
        let err = parse_spec("Grouping : expression").unwrap_err();
        assert!(matches!(err, SpecError::Malformed { .. }), "{err:?}");

        let err = parse_spec("Empty :").unwrap_err();
        assert!(matches!(err, SpecError::Malformed { .. }), "{err:?}");
    }

    #[test]
    fn comma_without_space_does_not_leak_into_names() {
        let err = parse_spec("Binary : Expr left,Token oprtr").unwrap_err();
        assert!(matches!(err, SpecError::Malformed { .. }), "{err:?}");
    }

    #[test]
    fn empty_kind_name_is_malformed() {
        let err = parse_spec(" : Expr left").unwrap_err();
        assert!(matches!(err, SpecError::Malformed { .. }), "{err:?}");
    }

    #[test]
    fn display_round_trips() {
        for line in [
            "Binary\t : Expr left, Token oprtr, Expr right",
            "Grouping : Expr expression",
            "Literal  : Object value",
            "Call : Box<Expr> callee, Token paren, Vec<Expr> arguments",
        ] {
            let spec = parse_spec(line).unwrap();
            let rendered = spec.to_string();
            let reparsed: TypeSpec = rendered.parse().unwrap();
            assert_eq!(spec, reparsed, "round trip through `{rendered}`");
        }
        assert_eq!(
            parse_spec("Unary\t : Token oprtr, Expr right").unwrap().to_string(),
            "Unary : Token oprtr, Expr right",
        );
    }
}
