//! Structural type inference over a parsed JSON value.
//!
//! One call, one private registry: classify every node into a type
//! expression, collapse identical or similar object shapes into named
//! interface definitions, and hand back the root expression plus the
//! definitions in creation order. Infallible for any JSON input —
//! every value kind has a label, with `unknown` as the defensive
//! fallback.
pub mod arr;
pub mod obj;

use serde_json::Value;

use crate::ir::{Model, Prim, TypeExpr};
use crate::registry::InterfaceRegistry;

pub struct Inference {
    registry: InterfaceRegistry,
}

impl Inference {
    pub fn new() -> Self {
        Self { registry: InterfaceRegistry::new() }
    }

    /// Classify `value` and consume the run, yielding the typed model.
    pub fn solve(mut self, value: &Value, root_hint: &str) -> Model {
        let root = self.type_of(value, root_hint);
        Model { root, interfaces: self.registry.into_defs() }
    }

    pub(crate) fn type_of(&mut self, value: &Value, hint: &str) -> TypeExpr {
        match value {
            Value::Null => TypeExpr::Primitive(Prim::Null),
            Value::Bool(_) => TypeExpr::Primitive(Prim::Boolean),
            Value::Number(_) => TypeExpr::Primitive(Prim::Number),
            Value::String(_) => TypeExpr::Primitive(Prim::String),
            Value::Array(items) => self.array_type(items, hint),
            Value::Object(map) => TypeExpr::Ref(self.object_type(map, hint)),
        }
    }
}

/// Convenience front door: infer and render in one step.
pub fn infer(value: &Value, root_name: &str) -> String {
    let model = Inference::new().solve(value, root_name);
    crate::codegen::render(&model, root_name)
}
