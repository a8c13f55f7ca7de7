use serde_json::Value;

use super::{obj, Inference};
use crate::ir::{push_unique, union_of, FieldDef, TypeExpr};
use crate::naming::Fallback;
use crate::registry::signature;

impl Inference {
    /// Element-type analysis: scalars and nested arrays classify
    /// individually; every object element funnels into exactly one
    /// element interface, merged across differing shapes.
    pub(super) fn array_type(&mut self, items: &[Value], hint: &str) -> TypeExpr {
        if items.is_empty() {
            return TypeExpr::unknown_array();
        }

        let mut alts: Vec<TypeExpr> = Vec::new();
        let mut object_shapes: Vec<Vec<FieldDef>> = Vec::new();
        for item in items {
            match item {
                Value::Object(map) => object_shapes.push(self.fields_of(map)),
                other => {
                    let ty = self.type_of(other, hint);
                    push_unique(&mut alts, ty);
                }
            }
        }

        if !object_shapes.is_empty() {
            let name = self.element_interface(object_shapes, hint);
            push_unique(&mut alts, TypeExpr::Ref(name));
        }

        TypeExpr::ArrayOf(Box::new(union_of(alts)))
    }

    fn element_interface(&mut self, shapes: Vec<Vec<FieldDef>>, hint: &str) -> String {
        let first_sig = signature(&shapes[0]);
        let uniform = shapes.iter().skip(1).all(|shape| signature(shape) == first_sig);
        let fields = if uniform {
            shapes.into_iter().next().expect("at least one sampled shape")
        } else {
            obj::merge_shapes(shapes)
        };
        self.registry.register(fields, hint, Fallback::Element)
    }
}
