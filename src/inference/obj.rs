use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::Inference;
use crate::ir::{null_with_concrete, push_unique, union_of, FieldDef, Prim, TypeExpr};
use crate::naming::Fallback;

impl Inference {
    /// Register the object's own shape and return the interface name.
    pub(super) fn object_type(&mut self, map: &Map<String, Value>, hint: &str) -> String {
        let fields = self.fields_of(map);
        self.registry.register(fields, hint, Fallback::Generic)
    }

    /// One field per key, in the object's own key order, each value
    /// classified with its key as the name hint.
    pub(super) fn fields_of(&mut self, map: &Map<String, Value>) -> Vec<FieldDef> {
        map.iter()
            .map(|(key, value)| FieldDef {
                name: key.clone(),
                ty: self.type_of(value, key),
                optional: false,
            })
            .collect()
    }
}

/// Evidence gathered for one key across sampled shapes.
#[derive(Debug, Default)]
struct FieldAcc {
    alts: Vec<TypeExpr>,
    seen_in: usize,
}

/// Unify N sampled object shapes into one field list.
///
/// Keys accumulate in first-seen order; each key's type set is the
/// union of every sighting. A key absent from some sample is the
/// optionality signal — unless null was also sighted next to a
/// concrete type, which keeps the field required with null folded
/// into its union.
pub(super) fn merge_shapes(shapes: Vec<Vec<FieldDef>>) -> Vec<FieldDef> {
    let samples = shapes.len();
    let mut acc: IndexMap<String, FieldAcc> = IndexMap::new();

    for shape in shapes {
        for field in shape {
            let slot = acc.entry(field.name).or_default();
            push_unique(&mut slot.alts, field.ty);
            slot.seen_in += 1;
        }
    }

    acc.into_iter()
        .map(|(name, slot)| {
            let missing = slot.seen_in < samples;
            let undefined = slot.alts.contains(&TypeExpr::Primitive(Prim::Undefined));
            let optional = if null_with_concrete(&slot.alts) {
                false
            } else {
                missing || undefined
            };
            FieldDef { name, ty: union_of(slot.alts), optional }
        })
        .collect()
}
