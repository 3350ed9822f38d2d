//! Go source emitter
//!
//! Writes a `GeneratedUnit` in gofmt style: tab indentation, field types
//! aligned in a column, one blank line between declarations. The output
//! depends only on the unit, so identical input renders identical bytes.

mod layout;

use crate::assemble::GeneratedUnit;
use crate::synthesize::{DispatchFunction, VariantRecord};
use irgen_common::GenError;
use irgen_frontend::ImportSpec;
use layout::{aligned_fields, Signature};
use std::fmt::Write as _;
use std::io;

/// First line of every generated file
pub const GENERATED_MARKER: &str = "// Code generated by irgen; DO NOT EDIT.";

/// Render `unit` and write it to `out` in one piece
pub fn emit<W: io::Write>(unit: &GeneratedUnit, out: &mut W) -> Result<(), GenError> {
    let text = render(unit)?;
    out.write_all(text.as_bytes())?;
    Ok(())
}

/// Render `unit` as Go source text
pub fn render(unit: &GeneratedUnit) -> Result<String, GenError> {
    for function in &unit.functions {
        if !unit.records.iter().any(|record| record.name == function.receiver_type) {
            return Err(GenError::render(format!(
                "dispatch function {} has receiver *{} but no such record was generated",
                function.name, function.receiver_type
            )));
        }
    }

    let mut out = String::new();
    writeln!(out, "{GENERATED_MARKER}")?;
    writeln!(out)?;
    writeln!(out, "package {}", unit.package)?;
    write_imports(&mut out, &unit.imports)?;

    for record in &unit.records {
        writeln!(out)?;
        write_record(&mut out, record)?;
    }
    for function in &unit.functions {
        writeln!(out)?;
        write_function(&mut out, function)?;
    }

    Ok(out)
}

fn write_imports(out: &mut String, imports: &[ImportSpec]) -> Result<(), GenError> {
    match imports {
        [] => {}
        [single] => {
            writeln!(out)?;
            writeln!(out, "import {single}")?;
        }
        _ => {
            writeln!(out)?;
            writeln!(out, "import (")?;
            for import in imports {
                writeln!(out, "\t{import}")?;
            }
            writeln!(out, ")")?;
        }
    }
    Ok(())
}

fn write_record(out: &mut String, record: &VariantRecord) -> Result<(), GenError> {
    if record.fields.is_empty() {
        writeln!(out, "type {} struct{{}}", record.name)?;
        return Ok(());
    }

    writeln!(out, "type {} struct {{", record.name)?;
    for line in aligned_fields(&record.fields) {
        writeln!(out, "\t{line}")?;
    }
    writeln!(out, "}}")?;
    Ok(())
}

fn write_function(out: &mut String, function: &DispatchFunction) -> Result<(), GenError> {
    let signature = Signature {
        params: &function.params,
        results: &function.results,
    };
    writeln!(
        out,
        "func ({} *{}) {}{} {{",
        function.receiver, function.receiver_type, function.name, signature
    )?;
    writeln!(out, "\t{}", function.body)?;
    writeln!(out, "}}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::assemble;
    use crate::naming::BindingStrategy;
    use crate::synthesize::{synthesize, Statement};
    use irgen_common::SourceSpan;
    use irgen_frontend::{MethodSignature, ParamGroup, TypeExpr};
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn signature(name: &str, params: Vec<ParamGroup>, results: Vec<ParamGroup>) -> MethodSignature {
        MethodSignature {
            name: name.to_string(),
            params,
            results,
            span: SourceSpan::dummy(),
        }
    }

    fn option_unit(imports: Vec<ImportSpec>) -> GeneratedUnit {
        let feed_to = signature(
            "FeedTo",
            vec![ParamGroup::named(&["c"], TypeExpr::ident("OptionConsumer"))],
            vec![],
        );
        let some = signature("Some", vec![ParamGroup::named(&["X"], TypeExpr::ident("any"))], vec![]);
        let none = signature("None", vec![], vec![]);
        let strategy = BindingStrategy::default();
        let variants = vec![
            synthesize("Option", &feed_to, &some, &strategy),
            synthesize("Option", &feed_to, &none, &strategy),
        ];
        assemble("option", imports, variants)
    }

    fn import(name: Option<&str>, path: &str) -> ImportSpec {
        ImportSpec {
            name: name.map(str::to_string),
            path: path.to_string(),
            span: SourceSpan::dummy(),
        }
    }

    #[test]
    fn test_render_option() {
        let text = render(&option_unit(vec![])).unwrap();
        assert_eq!(
            text,
            indoc! {"
                // Code generated by irgen; DO NOT EDIT.

                package option

                type Some struct {
                	X any
                }

                type None struct{}

                func (option *Some) FeedTo(consumer OptionConsumer) {
                	consumer.Some(option.X)
                }

                func (option *None) FeedTo(consumer OptionConsumer) {
                	consumer.None()
                }
            "}
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let unit = option_unit(vec![]);
        assert_eq!(render(&unit).unwrap(), render(&unit).unwrap());
    }

    #[test]
    fn test_render_single_import() {
        let text = render(&option_unit(vec![import(None, "time")])).unwrap();
        assert!(text.contains("package option\n\nimport \"time\"\n\ntype Some struct {\n"));
    }

    #[test]
    fn test_render_import_block() {
        let imports = vec![import(None, "fmt"), import(Some("str"), "strings")];
        let text = render(&option_unit(imports)).unwrap();
        assert!(text.contains("package option\n\nimport (\n\t\"fmt\"\n\tstr \"strings\"\n)\n\ntype Some"));
    }

    #[test]
    fn test_render_return_statement() {
        let mut unit = option_unit(vec![]);
        for function in &mut unit.functions {
            function.results = vec![ParamGroup::unnamed(TypeExpr::ident("error"))];
            if let Statement::Expr(call) = &function.body {
                function.body = Statement::Return(call.clone());
            }
        }
        let text = render(&unit).unwrap();
        assert!(text.contains("func (option *Some) FeedTo(consumer OptionConsumer) error {\n\treturn consumer.Some(option.X)\n}\n"));
    }

    #[test]
    fn test_function_without_record_is_a_render_error() {
        let mut unit = option_unit(vec![]);
        unit.records.remove(0);
        let err = render(&unit).unwrap_err();
        assert!(matches!(err, GenError::Render { .. }));
    }

    #[test]
    fn test_emit_writes_rendered_text() {
        let unit = option_unit(vec![]);
        let mut buffer = Vec::new();
        emit(&unit, &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), render(&unit).unwrap());
    }
}
