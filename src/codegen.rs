//! TypeScript listing renderer for an inferred model.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ir::{InterfaceDef, Model, TypeExpr};

static BARE_IDENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("valid identifier pattern"));

pub struct Codegen {
    out: String,
}

impl Codegen {
    pub fn new() -> Self {
        Self { out: String::new() }
    }

    /// Emit every definition in reverse creation order, then a root
    /// alias when the root value did not yield a named definition.
    pub fn emit(&mut self, model: &Model, root_name: &str) {
        for def in model.interfaces.iter().rev() {
            self.emit_interface(def);
        }
        if !matches!(model.root, TypeExpr::Ref(_)) {
            self.emit_alias(root_name, &model.root);
        }
    }

    fn emit_interface(&mut self, def: &InterfaceDef) {
        self.separate();
        if def.fields.is_empty() {
            self.out.push_str(&format!("interface {} {{}}\n", def.name));
            return;
        }
        self.out.push_str(&format!("interface {} {{\n", def.name));
        for field in &def.fields {
            let marker = if field.optional { "?" } else { "" };
            self.out
                .push_str(&format!("  {}{marker}: {};\n", field_label(&field.name), field.ty));
        }
        self.out.push_str("}\n");
    }

    fn emit_alias(&mut self, name: &str, ty: &TypeExpr) {
        self.separate();
        self.out.push_str(&format!("type {name} = {ty};\n"));
    }

    fn separate(&mut self) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

pub fn render(model: &Model, root_name: &str) -> String {
    let mut cg = Codegen::new();
    cg.emit(model, root_name);
    cg.into_string()
}

/// Keys that are not bare identifiers render in quoted form.
fn field_label(name: &str) -> String {
    if BARE_IDENT.is_match(name) {
        name.to_string()
    } else {
        serde_json::to_string(name).expect("strings always serialize")
    }
}
