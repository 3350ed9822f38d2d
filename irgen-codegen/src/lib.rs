//! irgen - Variant Generation
//!
//! This crate turns a composite/consumer interface pair into Go code:
//!
//! - Lookup: finds the two declarations in a loaded package
//! - Validation: checks both against the composite/consumer contract
//! - Synthesis: one record and one dispatch function per consumer method
//! - Imports: carries the source imports the generated types refer to
//! - Assembly and emission: a gofmt-style Go file

pub mod assemble;
pub mod emit;
pub mod imports;
pub mod lookup;
pub mod naming;
pub mod synthesize;
pub mod validate;

pub use assemble::{assemble, GeneratedUnit};
pub use emit::{emit, render, GENERATED_MARKER};
pub use naming::{BindingStrategy, BindingStyle};
pub use synthesize::{DispatchFunction, Statement, VariantRecord};

use irgen_common::{GenError, Role};
use irgen_frontend::{load_package, SourceUnit};
use log::debug;
use std::io::Write;
use std::path::PathBuf;

/// Names of the two interfaces a run works from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeNames {
    pub composite: String,
    pub consumer: String,
}

/// Everything one generation run needs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub directory: PathBuf,
    pub package_name: String,
    pub type_names: TypeNames,
    pub binding: BindingStrategy,
}

impl Config {
    pub fn new(directory: impl Into<PathBuf>, package_name: &str, composite: &str, consumer: &str) -> Self {
        Self {
            directory: directory.into(),
            package_name: package_name.to_string(),
            type_names: TypeNames {
                composite: composite.to_string(),
                consumer: consumer.to_string(),
            },
            binding: BindingStrategy::default(),
        }
    }

    /// Load the configured package
    pub fn load(&self) -> Result<SourceUnit, GenError> {
        load_package(&self.directory, &self.package_name)
    }

    /// Load, validate, synthesize and write the generated file to `out`
    pub fn generate<W: Write>(&self, out: &mut W) -> Result<(), GenError> {
        let unit = self.load()?;
        let generated = self.generate_unit(&unit)?;
        emit(&generated, out)
    }

    /// Run lookup, validation, synthesis and assembly on a loaded package
    pub fn generate_unit(&self, unit: &SourceUnit) -> Result<GeneratedUnit, GenError> {
        let TypeNames { composite, consumer } = &self.type_names;

        let composite_decl = lookup::find(unit, Role::Composite, composite)?;
        validate::interface_methods(composite_decl, Role::Composite)?;
        let consumer_decl = lookup::find(unit, Role::Consumer, consumer)?;
        let consumer = validate::validate_consumer(consumer_decl)?;

        let composite = validate::validate_composite(composite_decl)?;
        validate::validate_destructuring_method(composite.method, consumer.name)?;

        let mut variants = Vec::with_capacity(consumer.methods.len());
        for method in &consumer.methods {
            validate::validate_consumer_method(method)?;
            variants.push(synthesize::synthesize(
                composite.name,
                composite.method,
                method,
                &self.binding,
            ));
        }
        debug!(
            "{} variants for {}/{}",
            variants.len(),
            composite.name,
            consumer.name
        );

        let imports = imports::resolve_imports(unit, &variants);
        Ok(assemble(&self.package_name, imports, variants))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use irgen_frontend::Frontend;

    fn unit(source: &str) -> SourceUnit {
        let file = Frontend::parse_source(source, "test.go").unwrap();
        SourceUnit {
            package: file.package.clone(),
            files: vec![file],
        }
    }

    fn generate(source: &str, composite: &str, consumer: &str) -> Result<GeneratedUnit, GenError> {
        Config::new(".", "p", composite, consumer).generate_unit(&unit(source))
    }

    #[test]
    fn test_one_pair_per_consumer_method() {
        let generated = generate(
            "package p\ntype Expr interface{ FeedTo(c C) }\ntype C interface {\n\tLit(N int)\n\tVar(Name string)\n\tAdd(Left, Right Expr)\n}\n",
            "Expr",
            "C",
        )
        .unwrap();

        let records: Vec<_> = generated.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(records, vec!["Lit", "Var", "Add"]);
        assert_eq!(generated.functions.len(), 3);
        assert_eq!(generated.functions[2].body.to_string(), "consumer.Add(expr.Left, expr.Right)");
    }

    #[test]
    fn test_composite_kind_checked_before_consumer_lookup() {
        let err = generate("package p\ntype Expr struct{}\n", "Expr", "Missing").unwrap_err();
        assert!(matches!(err, GenError::Kind { role: Role::Composite, .. }));
    }

    #[test]
    fn test_consumer_kind_checked_before_composite_methods() {
        let err = generate("package p\ntype Expr interface{}\ntype C int\n", "Expr", "C").unwrap_err();
        assert!(matches!(err, GenError::Kind { role: Role::Consumer, .. }));
    }

    #[test]
    fn test_missing_consumer() {
        let err = generate("package p\ntype Expr interface{ FeedTo(c C) }\n", "Expr", "C").unwrap_err();
        assert!(matches!(err, GenError::NotFound { role: Role::Consumer, .. }));
    }

    #[test]
    fn test_first_failing_consumer_method_aborts() {
        let err = generate(
            "package p\ntype Expr interface{ FeedTo(c C) }\ntype C interface {\n\tLit(N int)\n\tVar(name string)\n\tAdd(Left, Right Expr) error\n}\n",
            "Expr",
            "C",
        )
        .unwrap_err();
        assert!(matches!(err, GenError::NonExportableName { ref method, .. } if method == "Var"));
    }

    #[test]
    fn test_binding_strategy_is_configurable() {
        let mut config = Config::new(".", "p", "IntExpr", "C");
        config.binding = BindingStrategy::new(BindingStyle::LowercaseFirst, "_");
        let generated = config
            .generate_unit(&unit("package p\ntype IntExpr interface{ FeedTo(c C) }\ntype C interface{ Lit(N int) }\n"))
            .unwrap();
        assert_eq!(generated.functions[0].receiver, "intExpr");
    }
}
