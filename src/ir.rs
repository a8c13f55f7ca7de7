// Strongly-typed type expressions for signatures and codegen. No serde_json::Value here.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Prim {
    Boolean,
    Number,
    String,
    Null,
    Undefined,
    Unknown,
}

impl Prim {
    pub fn keyword(self) -> &'static str {
        match self {
            Prim::Boolean => "boolean",
            Prim::Number => "number",
            Prim::String => "string",
            Prim::Null => "null",
            Prim::Undefined => "undefined",
            Prim::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Prim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeExpr {
    Primitive(Prim),
    ArrayOf(Box<TypeExpr>),
    /// Deduplicated alternatives; null/undefined always sort last.
    Union(Vec<TypeExpr>),
    /// Reference to an emitted interface, by name.
    Ref(String),
}

impl TypeExpr {
    pub fn unknown_array() -> TypeExpr {
        TypeExpr::ArrayOf(Box::new(TypeExpr::Primitive(Prim::Unknown)))
    }

    fn is_absent_marker(&self) -> bool {
        matches!(
            self,
            TypeExpr::Primitive(Prim::Null) | TypeExpr::Primitive(Prim::Undefined)
        )
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Primitive(p) => write!(f, "{p}"),
            TypeExpr::Ref(name) => f.write_str(name),
            TypeExpr::Union(alts) => {
                for (i, alt) in alts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{alt}")?;
                }
                Ok(())
            }
            TypeExpr::ArrayOf(item) => match item.as_ref() {
                // parenthesize so `(A | B)[]` is not read as `A | B[]`
                union @ TypeExpr::Union(_) => write!(f, "({union})[]"),
                other => write!(f, "{other}[]"),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceDef {
    pub name: String,
    /// First-seen order; rendered as-is for output stability.
    pub fields: Vec<FieldDef>,
}

/// Result of one inference run: the root expression plus every named
/// definition, in creation order.
#[derive(Debug, Clone, Serialize)]
pub struct Model {
    pub root: TypeExpr,
    pub interfaces: Vec<InterfaceDef>,
}

// ------------------------------ Union assembly ---------------------------- //

/// Add `ty` to the alternative set, flattening nested unions and
/// skipping structural duplicates.
pub fn push_unique(alts: &mut Vec<TypeExpr>, ty: TypeExpr) {
    match ty {
        TypeExpr::Union(inner) => {
            for t in inner {
                push_unique(alts, t);
            }
        }
        ty => {
            if !alts.contains(&ty) {
                alts.push(ty);
            }
        }
    }
}

/// Collapse an alternative set into a single expression: prune the
/// `unknown[]` fallback when a more specific array type was observed,
/// move null/undefined to the tail, and unwrap singletons.
pub fn union_of(mut alts: Vec<TypeExpr>) -> TypeExpr {
    prune_unknown_arrays(&mut alts);
    alts.sort_by_key(|t| match t {
        TypeExpr::Primitive(Prim::Null) => 1,
        TypeExpr::Primitive(Prim::Undefined) => 2,
        _ => 0,
    });
    match alts.len() {
        0 => TypeExpr::Primitive(Prim::Unknown),
        1 => alts.remove(0),
        _ => TypeExpr::Union(alts),
    }
}

/// `unknown[]` only carries information when nothing better was seen.
fn prune_unknown_arrays(alts: &mut Vec<TypeExpr>) {
    let fallback = TypeExpr::unknown_array();
    let has_specific = alts
        .iter()
        .any(|t| matches!(t, TypeExpr::ArrayOf(_)) && *t != fallback);
    if has_specific {
        alts.retain(|t| *t != fallback);
    }
}

/// True when the set pairs null with at least one concrete alternative —
/// the case where null counts as a present value, not absence.
pub fn null_with_concrete(alts: &[TypeExpr]) -> bool {
    alts.iter().any(|t| *t == TypeExpr::Primitive(Prim::Null))
        && alts.iter().any(|t| !t.is_absent_marker())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_sorts_null_and_undefined_last() {
        let mut alts = Vec::new();
        push_unique(&mut alts, TypeExpr::Primitive(Prim::Null));
        push_unique(&mut alts, TypeExpr::Primitive(Prim::Number));
        push_unique(&mut alts, TypeExpr::Primitive(Prim::Undefined));
        push_unique(&mut alts, TypeExpr::Primitive(Prim::String));
        assert_eq!(union_of(alts).to_string(), "number | string | null | undefined");
    }

    #[test]
    fn union_collapses_singletons_and_duplicates() {
        let mut alts = Vec::new();
        push_unique(&mut alts, TypeExpr::Primitive(Prim::Number));
        push_unique(&mut alts, TypeExpr::Primitive(Prim::Number));
        assert_eq!(union_of(alts), TypeExpr::Primitive(Prim::Number));
    }

    #[test]
    fn union_flattens_nested_unions() {
        let nested = TypeExpr::Union(vec![
            TypeExpr::Primitive(Prim::Number),
            TypeExpr::Primitive(Prim::String),
        ]);
        let mut alts = Vec::new();
        push_unique(&mut alts, nested);
        push_unique(&mut alts, TypeExpr::Primitive(Prim::String));
        assert_eq!(union_of(alts).to_string(), "number | string");
    }

    #[test]
    fn unknown_array_pruned_when_specific_alternative_exists() {
        let alts = vec![
            TypeExpr::unknown_array(),
            TypeExpr::ArrayOf(Box::new(TypeExpr::Primitive(Prim::Number))),
        ];
        assert_eq!(union_of(alts).to_string(), "number[]");
    }

    #[test]
    fn unknown_array_kept_when_alone() {
        assert_eq!(union_of(vec![TypeExpr::unknown_array()]).to_string(), "unknown[]");
    }

    #[test]
    fn heterogeneous_array_renders_parenthesized() {
        let ty = TypeExpr::ArrayOf(Box::new(TypeExpr::Union(vec![
            TypeExpr::Primitive(Prim::Number),
            TypeExpr::Primitive(Prim::String),
        ])));
        assert_eq!(ty.to_string(), "(number | string)[]");
    }

    #[test]
    fn nested_arrays_render_with_stacked_suffixes() {
        let ty = TypeExpr::ArrayOf(Box::new(TypeExpr::ArrayOf(Box::new(
            TypeExpr::Primitive(Prim::Number),
        ))));
        assert_eq!(ty.to_string(), "number[][]");
    }
}
