//! Import resolution
//!
//! Generated code mentions the types of record fields and of the
//! destructuring method's signature. Package qualifiers in those types are
//! matched against the imports of the source package.

use crate::synthesize::{DispatchFunction, VariantRecord};
use irgen_frontend::{ImportSpec, SourceUnit};
use log::{debug, warn};

/// Imports needed by `variants`, sorted by path
pub fn resolve_imports(unit: &SourceUnit, variants: &[(VariantRecord, DispatchFunction)]) -> Vec<ImportSpec> {
    let mut qualifiers = Vec::new();
    for (record, function) in variants {
        let types = record
            .fields
            .iter()
            .chain(&function.params)
            .chain(&function.results)
            .map(|group| &group.ty);
        for ty in types {
            ty.collect_qualifiers(&mut qualifiers);
        }
    }

    let mut imports: Vec<ImportSpec> = Vec::new();
    for qualifier in &qualifiers {
        match unit.imports().find(|import| import.binding() == Some(qualifier.as_str())) {
            Some(import) => {
                debug!("qualifier {qualifier} resolved to {import}");
                if !imports.iter().any(|known| known.path == import.path && known.name == import.name) {
                    imports.push(import.clone());
                }
            }
            None => warn!("no import in package {} provides {qualifier}, leaving it out", unit.package),
        }
    }

    imports.sort_by(|a, b| a.path.cmp(&b.path));
    imports
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::BindingStrategy;
    use crate::synthesize::synthesize;
    use irgen_frontend::{Frontend, InterfaceElement, MethodSignature};

    fn methods(source: &str) -> (SourceUnit, Vec<MethodSignature>) {
        let file = Frontend::parse_source(source, "event.go").unwrap();
        let methods = file
            .declarations
            .iter()
            .flat_map(|decl| decl.interface_elements().unwrap_or_default())
            .filter_map(|element| match element {
                InterfaceElement::Method(method) => Some(method.clone()),
                InterfaceElement::Embedded(_) => None,
            })
            .collect();
        let unit = SourceUnit {
            package: file.package.clone(),
            files: vec![file],
        };
        (unit, methods)
    }

    #[test]
    fn test_resolves_aliases_and_last_segments() {
        let (unit, methods) = methods(
            r#"package event

import (
	"fmt"
	"time"
	pe "github.com/pkg/errors"
	"net/url"
)

type Event interface {
	FeedTo(c EventConsumer)
}

type EventConsumer interface {
	Tick(At time.Time, Every time.Duration)
	Fail(Err pe.Fundamental, Where *url.URL)
	Custom(Data map[string]fmt.Stringer)
}
"#,
        );
        let variants: Vec<_> = methods[1..]
            .iter()
            .map(|method| synthesize("Event", &methods[0], method, &BindingStrategy::default()))
            .collect();

        let imports = resolve_imports(&unit, &variants);
        let rendered: Vec<String> = imports.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "\"fmt\"",
                "pe \"github.com/pkg/errors\"",
                "\"net/url\"",
                "\"time\"",
            ]
        );
    }

    #[test]
    fn test_unresolved_and_dot_imports_are_dropped() {
        let (unit, methods) = methods(
            r#"package event

import (
	. "strings"
	_ "embed"
)

type Event interface {
	FeedTo(c EventConsumer)
}

type EventConsumer interface {
	Read(R Reader, B bytes.Buffer)
}
"#,
        );
        let variants = vec![synthesize("Event", &methods[0], &methods[1], &BindingStrategy::default())];
        assert!(resolve_imports(&unit, &variants).is_empty());
    }
}
