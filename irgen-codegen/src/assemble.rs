//! Declaration assembly

use crate::synthesize::{DispatchFunction, VariantRecord};
use irgen_frontend::ImportSpec;

/// Everything the emitter writes for one run
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedUnit {
    pub package: String,
    pub imports: Vec<ImportSpec>,
    /// One per consumer method, in declaration order
    pub records: Vec<VariantRecord>,
    /// Same order as `records`
    pub functions: Vec<DispatchFunction>,
}

/// Split the synthesized pairs into all records followed by all functions
pub fn assemble(
    package: &str,
    imports: Vec<ImportSpec>,
    variants: Vec<(VariantRecord, DispatchFunction)>,
) -> GeneratedUnit {
    let (records, functions) = variants.into_iter().unzip();
    GeneratedUnit {
        package: package.to_string(),
        imports,
        records,
        functions,
    }
}
