//! Variant synthesis
//!
//! Each consumer method becomes a struct holding its parameters and a
//! method on that struct, shaped like the composite's destructuring method,
//! which hands the fields back to the consumer.

use crate::naming::{BindingStrategy, CONSUMER_PARAM};
use irgen_frontend::{MethodSignature, ParamGroup};
use std::fmt;

/// `type <Name> struct { <fields> }`
#[derive(Debug, Clone, PartialEq)]
pub struct VariantRecord {
    pub name: String,
    pub fields: Vec<ParamGroup>,
}

impl VariantRecord {
    /// Field names in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().flat_map(|group| group.names.iter().map(String::as_str))
    }
}

/// `recv.Field`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub base: String,
    pub field: String,
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.base, self.field)
    }
}

/// `consumer.Method(args...)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExpr {
    pub target: String,
    pub method: String,
    pub args: Vec<Selector>,
}

impl fmt::Display for CallExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args: Vec<String> = self.args.iter().map(ToString::to_string).collect();
        write!(f, "{}.{}({})", self.target, self.method, args.join(", "))
    }
}

/// The single statement of a dispatch function body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Expr(CallExpr),
    Return(CallExpr),
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Expr(call) => write!(f, "{call}"),
            Statement::Return(call) => write!(f, "return {call}"),
        }
    }
}

/// `func (<receiver> *<ReceiverType>) <Name>(consumer C) { <body> }`
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchFunction {
    pub receiver: String,
    pub receiver_type: String,
    pub name: String,
    pub params: Vec<ParamGroup>,
    pub results: Vec<ParamGroup>,
    pub body: Statement,
}

/// Build the record and dispatch function for one consumer method.
///
/// Both methods are expected to have passed validation.
pub fn synthesize(
    composite_name: &str,
    destructuring: &MethodSignature,
    consumer_method: &MethodSignature,
    strategy: &BindingStrategy,
) -> (VariantRecord, DispatchFunction) {
    let record = VariantRecord {
        name: consumer_method.name.clone(),
        fields: consumer_method.params.clone(),
    };

    let fields: Vec<&str> = record.field_names().collect();
    let receiver = strategy.binding_name(composite_name, &fields);

    let mut params = destructuring.params.clone();
    if let Some(first) = params.first_mut() {
        first.names = vec![CONSUMER_PARAM.to_string()];
    }

    let call = CallExpr {
        target: CONSUMER_PARAM.to_string(),
        method: consumer_method.name.clone(),
        args: fields
            .iter()
            .map(|field| Selector {
                base: receiver.clone(),
                field: field.to_string(),
            })
            .collect(),
    };
    let body = if destructuring.results.is_empty() {
        Statement::Expr(call)
    } else {
        Statement::Return(call)
    };

    let function = DispatchFunction {
        receiver,
        receiver_type: record.name.clone(),
        name: destructuring.name.clone(),
        params,
        results: destructuring.results.clone(),
        body,
    };

    (record, function)
}

#[cfg(test)]
mod tests {
    use super::*;
    use irgen_common::SourceSpan;
    use irgen_frontend::TypeExpr;

    fn signature(name: &str, params: Vec<ParamGroup>, results: Vec<ParamGroup>) -> MethodSignature {
        MethodSignature {
            name: name.to_string(),
            params,
            results,
            span: SourceSpan::dummy(),
        }
    }

    fn feed_to() -> MethodSignature {
        signature(
            "FeedTo",
            vec![ParamGroup::named(&["c"], TypeExpr::ident("OptionConsumer"))],
            vec![],
        )
    }

    #[test]
    fn test_fields_follow_parameter_order() {
        let method = signature(
            "M",
            vec![
                ParamGroup::named(&["A", "B"], TypeExpr::ident("int")),
                ParamGroup::named(&["C"], TypeExpr::ident("string")),
            ],
            vec![],
        );
        let (record, function) = synthesize("Option", &feed_to(), &method, &BindingStrategy::default());

        assert_eq!(record.name, "M");
        assert_eq!(record.fields, method.params);
        assert_eq!(record.field_names().collect::<Vec<_>>(), vec!["A", "B", "C"]);
        assert_eq!(
            function.body.to_string(),
            "consumer.M(option.A, option.B, option.C)"
        );
    }

    #[test]
    fn test_dispatch_function_shape() {
        let method = signature("Some", vec![ParamGroup::named(&["X"], TypeExpr::ident("any"))], vec![]);
        let (_, function) = synthesize("Option", &feed_to(), &method, &BindingStrategy::default());

        assert_eq!(function.receiver, "option");
        assert_eq!(function.receiver_type, "Some");
        assert_eq!(function.name, "FeedTo");
        assert_eq!(
            function.params,
            vec![ParamGroup::named(&["consumer"], TypeExpr::ident("OptionConsumer"))]
        );
        assert!(function.results.is_empty());
        assert_eq!(function.body.to_string(), "consumer.Some(option.X)");
    }

    #[test]
    fn test_zero_parameter_variant() {
        let method = signature("None", vec![], vec![]);
        let (record, function) = synthesize("Option", &feed_to(), &method, &BindingStrategy::default());

        assert!(record.fields.is_empty());
        assert_eq!(function.body, Statement::Expr(CallExpr {
            target: "consumer".to_string(),
            method: "None".to_string(),
            args: vec![],
        }));
        assert_eq!(function.body.to_string(), "consumer.None()");
    }

    #[test]
    fn test_unnamed_destructuring_parameter_is_named() {
        let destructuring = signature(
            "Accept",
            vec![ParamGroup::unnamed(TypeExpr::ident("Visitor"))],
            vec![],
        );
        let method = signature("Leaf", vec![], vec![]);
        let (_, function) = synthesize("Tree", &destructuring, &method, &BindingStrategy::default());
        assert_eq!(function.params[0].names, vec!["consumer".to_string()]);
    }

    #[test]
    fn test_result_bearing_destructuring_method_returns() {
        // validation rejects this shape; the synthesizer still handles it
        let destructuring = signature(
            "FeedTo",
            vec![ParamGroup::named(&["c"], TypeExpr::ident("C"))],
            vec![ParamGroup::unnamed(TypeExpr::ident("error"))],
        );
        let method = signature("Lit", vec![ParamGroup::named(&["N"], TypeExpr::ident("int"))], vec![]);
        let (_, function) = synthesize("Expr", &destructuring, &method, &BindingStrategy::default());

        assert!(matches!(function.body, Statement::Return(_)));
        assert_eq!(function.body.to_string(), "return consumer.Lit(expr.N)");
        assert_eq!(function.results.len(), 1);
    }

    #[test]
    fn test_keyword_receiver_is_decorated() {
        let destructuring = signature(
            "FeedTo",
            vec![ParamGroup::named(&["cons"], TypeExpr::ident("TypeConsumer"))],
            vec![],
        );
        let method = signature(
            "Named",
            vec![ParamGroup::named(&["Name"], TypeExpr::ident("string"))],
            vec![],
        );
        let (_, function) = synthesize("Type", &destructuring, &method, &BindingStrategy::default());
        assert_eq!(function.receiver, "type_");
        assert_eq!(function.body.to_string(), "consumer.Named(type_.Name)");
    }
}
