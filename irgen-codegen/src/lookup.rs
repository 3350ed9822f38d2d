//! Declaration lookup by name

use irgen_common::{GenError, Role};
use irgen_frontend::{SourceUnit, TypeDeclaration};
use log::debug;

/// Find the single type declaration called `name` in any file of `unit`
pub fn find<'a>(unit: &'a SourceUnit, role: Role, name: &str) -> Result<&'a TypeDeclaration, GenError> {
    let matches: Vec<&TypeDeclaration> = unit.type_declarations().filter(|decl| decl.name == name).collect();

    match matches.as_slice() {
        [] => Err(GenError::NotFound {
            role,
            name: name.to_string(),
            package: unit.package.clone(),
        }),
        [decl] => {
            debug!("{role} type {name} found at {}", decl.location());
            Ok(decl)
        }
        _ => Err(GenError::AmbiguousName {
            role,
            name: name.to_string(),
            package: unit.package.clone(),
            locations: matches.iter().map(|decl| decl.location().clone()).collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use irgen_frontend::Frontend;

    fn unit(sources: &[&str]) -> SourceUnit {
        let files = sources
            .iter()
            .enumerate()
            .map(|(i, source)| Frontend::parse_source(source, &format!("f{i}.go")).unwrap())
            .collect();
        SourceUnit {
            package: "p".to_string(),
            files,
        }
    }

    #[test]
    fn test_find_across_files() {
        let unit = unit(&["package p\ntype A int\n", "package p\ntype B interface{}\n"]);
        let decl = find(&unit, Role::Consumer, "B").unwrap();
        assert_eq!(decl.location().filename, "f1.go");
    }

    #[test]
    fn test_not_found() {
        let unit = unit(&["package p\ntype A int\n"]);
        let err = find(&unit, Role::Composite, "Expr").unwrap_err();
        assert_eq!(
            err.to_string(),
            "can't retrieve composite type Expr: no type named Expr in package p"
        );
    }

    #[test]
    fn test_ambiguous_name() {
        let unit = unit(&["package p\ntype A int\n", "package p\n\ntype (\n\tB int\n\tA string\n)\n"]);
        let err = find(&unit, Role::Consumer, "A").unwrap_err();
        assert_eq!(
            err.to_string(),
            "can't retrieve consumer type A: type A declared 2 times in package p"
        );
        match err {
            GenError::AmbiguousName { locations, .. } => {
                assert_eq!(locations[0].to_string(), "f0.go:2:6");
                assert_eq!(locations[1].to_string(), "f1.go:5:2");
            }
            other => panic!("Expected AmbiguousName, found {other:?}"),
        }
    }
}
