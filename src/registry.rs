//! The per-run store of emitted interface definitions.
//!
//! Three-step decision for every freshly computed shape:
//! 1. exact signature match → reuse the existing name;
//! 2. same field-name set + same base name → merge into the existing
//!    definition in place (its name stays valid everywhere);
//! 3. otherwise allocate a unique name and insert.
//!
//! Lookups are indexed by full signature and by (base name, sorted
//! field-name set), so neither step scans the whole registry.

use std::collections::HashMap;

use crate::ir::{null_with_concrete, push_unique, union_of, FieldDef, InterfaceDef};
use crate::naming::{self, Fallback, NameAllocator};

/// Canonical, order-independent key for a shape: fields sorted by
/// name, joined as `name:type` pairs.
pub fn signature(fields: &[FieldDef]) -> String {
    let mut pairs: Vec<String> = fields
        .iter()
        .map(|f| format!("{}:{}", f.name, f.ty))
        .collect();
    pairs.sort();
    pairs.join(";")
}

/// Same key with the types stripped: the "same entity, varying
/// fields" half of the similarity test.
fn field_name_key(fields: &[FieldDef]) -> String {
    let mut names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    names.sort_unstable();
    names.join(";")
}

fn base_name(name: &str) -> &str {
    name.trim_end_matches(|c: char| c.is_ascii_digit())
}

#[derive(Debug)]
pub struct InterfaceRegistry {
    defs: Vec<InterfaceDef>,
    /// full signature → interface name
    by_signature: HashMap<String, String>,
    /// (base name, field-name key) → interface name
    by_shape: HashMap<(String, String), String>,
    names: NameAllocator,
}

impl InterfaceRegistry {
    pub fn new() -> Self {
        Self {
            defs: Vec::new(),
            by_signature: HashMap::new(),
            by_shape: HashMap::new(),
            names: NameAllocator::new(),
        }
    }

    /// Register a shape and return the name call sites should reference.
    pub fn register(&mut self, fields: Vec<FieldDef>, hint: &str, fallback: Fallback) -> String {
        let sig = signature(&fields);
        if let Some(name) = self.by_signature.get(&sig) {
            return name.clone();
        }

        let candidate = naming::clean(hint, fallback);
        let shape_key = (base_name(&candidate).to_string(), field_name_key(&fields));
        if let Some(name) = self.by_shape.get(&shape_key).cloned() {
            self.merge_into(&name, fields);
            return name;
        }

        let name = self.names.unique(candidate);
        self.by_signature.insert(sig, name.clone());
        self.by_shape.insert(shape_key, name.clone());
        self.defs.push(InterfaceDef { name: name.clone(), fields });
        name
    }

    /// Widen an existing definition with a same-field-set sibling.
    fn merge_into(&mut self, name: &str, incoming: Vec<FieldDef>) {
        let def = self
            .defs
            .iter_mut()
            .find(|d| d.name == name)
            .expect("shape index points at a registered definition");

        let old_sig = signature(&def.fields);
        let mut incoming: HashMap<String, FieldDef> =
            incoming.into_iter().map(|f| (f.name.clone(), f)).collect();

        for field in &mut def.fields {
            let Some(new) = incoming.remove(&field.name) else {
                continue;
            };
            let mut alts = Vec::new();
            push_unique(&mut alts, field.ty.clone());
            push_unique(&mut alts, new.ty);
            // null next to a concrete type is a present value, so the
            // field stays required; otherwise optional only if both
            // occurrences were optional.
            field.optional = if null_with_concrete(&alts) {
                false
            } else {
                field.optional && new.optional
            };
            field.ty = union_of(alts);
        }

        let new_sig = signature(&def.fields);
        self.by_signature.remove(&old_sig);
        self.by_signature.insert(new_sig, name.to_string());
    }

    pub fn into_defs(self) -> Vec<InterfaceDef> {
        self.defs
    }

    #[cfg(test)]
    fn defs(&self) -> &[InterfaceDef] {
        &self.defs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Prim, TypeExpr};

    fn field(name: &str, ty: TypeExpr) -> FieldDef {
        FieldDef { name: name.into(), ty, optional: false }
    }

    fn number() -> TypeExpr {
        TypeExpr::Primitive(Prim::Number)
    }

    fn string() -> TypeExpr {
        TypeExpr::Primitive(Prim::String)
    }

    #[test]
    fn signature_is_order_independent() {
        let ab = vec![field("a", number()), field("b", string())];
        let ba = vec![field("b", string()), field("a", number())];
        assert_eq!(signature(&ab), signature(&ba));
        assert_eq!(signature(&ab), "a:number;b:string");
    }

    #[test]
    fn identical_shapes_reuse_one_name() {
        let mut reg = InterfaceRegistry::new();
        let first = reg.register(vec![field("x", number())], "point", Fallback::Generic);
        let second = reg.register(vec![field("x", number())], "somewhere_else", Fallback::Generic);
        assert_eq!(first, "Point");
        assert_eq!(second, "Point");
        assert_eq!(reg.defs().len(), 1);
    }

    #[test]
    fn similar_shapes_merge_in_place() {
        let mut reg = InterfaceRegistry::new();
        let first = reg.register(vec![field("a", number())], "item", Fallback::Element);
        let second = reg.register(vec![field("a", string())], "item", Fallback::Element);
        assert_eq!(first, "Item");
        assert_eq!(second, "Item");
        assert_eq!(reg.defs().len(), 1);
        let merged = &reg.defs()[0].fields[0];
        assert_eq!(merged.ty.to_string(), "number | string");
        assert!(!merged.optional);
    }

    #[test]
    fn different_field_sets_with_one_base_name_get_numbered() {
        let mut reg = InterfaceRegistry::new();
        let first = reg.register(vec![field("a", number())], "item", Fallback::Element);
        let second = reg.register(vec![field("b", string())], "item", Fallback::Element);
        assert_eq!(first, "Item");
        assert_eq!(second, "Item2");
        assert_eq!(reg.defs().len(), 2);
    }

    #[test]
    fn merge_keeps_null_bearing_fields_required() {
        let mut reg = InterfaceRegistry::new();
        reg.register(vec![field("a", number())], "item", Fallback::Element);
        reg.register(
            vec![field("a", TypeExpr::Primitive(Prim::Null))],
            "item",
            Fallback::Element,
        );
        let merged = &reg.defs()[0].fields[0];
        assert_eq!(merged.ty.to_string(), "number | null");
        assert!(!merged.optional);
    }

    #[test]
    fn merge_ands_optionality() {
        let optional = |name: &str, ty: TypeExpr| FieldDef { name: name.into(), ty, optional: true };

        let mut reg = InterfaceRegistry::new();
        reg.register(vec![optional("a", number())], "item", Fallback::Element);
        reg.register(vec![optional("a", string())], "item", Fallback::Element);
        assert!(reg.defs()[0].fields[0].optional, "optional in both occurrences");

        let mut reg = InterfaceRegistry::new();
        reg.register(vec![optional("a", number())], "item", Fallback::Element);
        reg.register(vec![field("a", string())], "item", Fallback::Element);
        assert!(!reg.defs()[0].fields[0].optional, "required in one occurrence");
    }

    #[test]
    fn merged_signature_stays_reachable() {
        let mut reg = InterfaceRegistry::new();
        reg.register(vec![field("a", number())], "item", Fallback::Element);
        reg.register(vec![field("a", string())], "item", Fallback::Element);
        // the widened shape now matches exactly and must not re-merge
        let name = reg.register(
            vec![field("a", TypeExpr::Union(vec![number(), string()]))],
            "item",
            Fallback::Element,
        );
        assert_eq!(name, "Item");
        assert_eq!(reg.defs().len(), 1);
    }
}
