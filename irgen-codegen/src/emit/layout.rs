//! gofmt layout helpers

use irgen_frontend::{write_signature, ParamGroup};
use std::fmt;

/// Struct field lines with the types aligned in one column, as gofmt
/// aligns consecutive single-line fields
pub(crate) fn aligned_fields(fields: &[ParamGroup]) -> Vec<String> {
    let names: Vec<String> = fields.iter().map(|group| group.names.join(", ")).collect();
    let width = names.iter().map(|name| name.chars().count()).max().unwrap_or(0);

    names
        .iter()
        .zip(fields)
        .map(|(name, group)| {
            let padding = width - name.chars().count() + 1;
            format!("{name}{}{}", " ".repeat(padding), group.ty)
        })
        .collect()
}

/// `(params) results` of a function declaration
pub(crate) struct Signature<'a> {
    pub params: &'a [ParamGroup],
    pub results: &'a [ParamGroup],
}

impl fmt::Display for Signature<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_signature(f, self.params, self.results)
    }
}
