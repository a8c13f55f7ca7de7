//! jq pre-filtering via jaq. Each value the filter produces becomes
//! its own inference run.

use anyhow::{anyhow, Result};
use jaq_core::{load, Compiler, Ctx, RcIter};
use jaq_json::Val;
use serde_json::Value;

pub fn apply_filter(filter_src: &str, input: &Value) -> Result<Vec<Value>> {
    let loader = load::Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let arena = load::Arena::default();
    let program = load::File { code: filter_src, path: () };

    let modules = loader.load(&arena, program).map_err(|errs| {
        let lines: Vec<String> = errs
            .iter()
            .map(|(file, err)| format!("parse error: {err:?} in `{}`", file.code))
            .collect();
        anyhow!(lines.join("\n"))
    })?;

    let filter = Compiler::default()
        .with_funs(jaq_std::funs().chain(jaq_json::funs()))
        .compile(modules)
        .map_err(|errs| {
            let mut lines = Vec::new();
            for (file, undefined) in errs {
                for (name, kind) in undefined {
                    lines.push(format!("undefined `{name}`: {kind:?} in `{}`", file.code));
                }
            }
            anyhow!(lines.join("\n"))
        })?;

    let inputs = RcIter::new(core::iter::empty());
    let mut out = Vec::new();
    for item in filter.run((Ctx::new([], &inputs), Val::from(input.clone()))) {
        let val = item.map_err(|e| anyhow!("{e:?}"))?;
        // Val displays as JSON text; round-trip it back into a Value.
        let value = crate::path_de::parse_document(&format!("{val}"))
            .map_err(|e| anyhow!("filter produced unparseable output: {e}"))?;
        out.push(value);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn identity_filter_passes_the_document_through() {
        let input = json!({"a": [1, 2], "b": "x"});
        let out = apply_filter(".", &input).unwrap();
        assert_eq!(out, vec![input]);
    }

    #[test]
    fn field_selection_narrows_the_document() {
        let input = json!({"data": {"items": [1, 2]}});
        let out = apply_filter(".data.items", &input).unwrap();
        assert_eq!(out, vec![json!([1, 2])]);
    }

    #[test]
    fn bad_filters_surface_as_errors() {
        assert!(apply_filter("definitely not jq §", &json!(null)).is_err());
    }
}
