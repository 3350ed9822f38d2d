//! Shape validation
//!
//! The composite must be an interface with a single destructuring method
//! `M(c Consumer)`, and the consumer an interface whose methods only take
//! named, exportable, non-variadic parameters and return nothing. Checks run in a fixed
//! order and the first violated rule is reported.

use crate::naming::is_exported;
use irgen_common::{GenError, Role};
use irgen_frontend::{InterfaceElement, MethodSignature, TypeDeclaration, TypeExpr};
use std::collections::HashSet;

/// A composite that passed `validate_composite`
#[derive(Debug, Clone, Copy)]
pub struct CompositeDeclaration<'a> {
    pub name: &'a str,
    pub method: &'a MethodSignature,
}

/// A consumer that passed `validate_consumer`; its methods are checked one
/// by one with `validate_consumer_method`
#[derive(Debug, Clone)]
pub struct ConsumerDeclaration<'a> {
    pub name: &'a str,
    pub methods: Vec<&'a MethodSignature>,
}

/// Methods of an interface declaration, or `Kind`/`EmbeddedElement`
pub fn interface_methods(decl: &TypeDeclaration, role: Role) -> Result<Vec<&MethodSignature>, GenError> {
    let elements = decl.interface_elements().ok_or_else(|| GenError::Kind {
        role,
        name: decl.name.clone(),
        location: decl.location().clone(),
    })?;

    elements
        .iter()
        .map(|element| match element {
            InterfaceElement::Method(method) => Ok(method),
            InterfaceElement::Embedded(ty) => Err(GenError::EmbeddedElement {
                role,
                name: decl.name.clone(),
                element: ty.to_string(),
                location: decl.location().clone(),
            }),
        })
        .collect()
}

pub fn validate_composite(decl: &TypeDeclaration) -> Result<CompositeDeclaration<'_>, GenError> {
    let methods = interface_methods(decl, Role::Composite)?;
    match methods.as_slice() {
        [method] => Ok(CompositeDeclaration {
            name: &decl.name,
            method: *method,
        }),
        methods => Err(GenError::MethodCount {
            name: decl.name.clone(),
            count: methods.len(),
            location: decl.location().clone(),
        }),
    }
}

pub fn validate_destructuring_method(method: &MethodSignature, consumer_name: &str) -> Result<(), GenError> {
    let count = method.param_count();
    if count != 1 {
        return Err(GenError::Arity {
            method: method.name.clone(),
            count,
            location: method.location().clone(),
        });
    }

    let param = &method.params[0].ty;
    if param.as_ident() != Some(consumer_name) {
        return Err(GenError::ParamType {
            method: method.name.clone(),
            expected: consumer_name.to_string(),
            found: param.to_string(),
            location: method.location().clone(),
        });
    }

    check_no_results(method, Role::Composite)
}

pub fn validate_consumer(decl: &TypeDeclaration) -> Result<ConsumerDeclaration<'_>, GenError> {
    Ok(ConsumerDeclaration {
        name: &decl.name,
        methods: interface_methods(decl, Role::Consumer)?,
    })
}

pub fn validate_consumer_method(method: &MethodSignature) -> Result<(), GenError> {
    if method.params.iter().any(|group| group.names.is_empty()) {
        return Err(GenError::UnnamedParam {
            method: method.name.clone(),
            location: method.location().clone(),
        });
    }

    let names = || method.params.iter().flat_map(|group| group.names.iter());
    if let Some(param) = names().find(|name| !is_exported(name)) {
        return Err(GenError::NonExportableName {
            method: method.name.clone(),
            param: param.clone(),
            location: method.location().clone(),
        });
    }

    let mut seen = HashSet::new();
    if let Some(field) = names().find(|name| !seen.insert(name.as_str())) {
        return Err(GenError::DuplicateFieldName {
            method: method.name.clone(),
            field: field.clone(),
            location: method.location().clone(),
        });
    }

    let variadic = method
        .params
        .iter()
        .find(|group| matches!(group.ty, TypeExpr::Variadic(_)));
    if let Some(group) = variadic {
        return Err(GenError::VariadicParam {
            method: method.name.clone(),
            param: group.names.join(", "),
            location: method.location().clone(),
        });
    }

    check_no_results(method, Role::Consumer)
}

fn check_no_results(method: &MethodSignature, role: Role) -> Result<(), GenError> {
    match method.result_count() {
        0 => Ok(()),
        count => Err(GenError::ResultCount {
            role,
            method: method.name.clone(),
            count,
            location: method.location().clone(),
        }),
    }
}
