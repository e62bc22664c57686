//! Conversion from evalexpr operator trees into [`Expr`].
//!
//! evalexpr does the tokenizing and precedence handling; this module maps the
//! resulting nodes onto the jet vocabulary. Function names are resolved against
//! [`Builtin`] here, identifiers are kept by name and resolved at evaluation time.
//!
//! The main entry point is [`parse`], which runs both steps and folds constants.

use evalexpr::{build_operator_tree, Node, Operator};

use crate::builtins::Builtin;
use crate::errors::{ConvertError, EvalError};
use crate::expr::Expr;

/// Parses `text` into a simplified [`Expr`].
pub fn parse(text: &str) -> Result<Expr, EvalError> {
    let node: Node = build_operator_tree(text)?;
    Ok(build_ast(&node)?.simplify())
}

/// Converts an evalexpr AST node into an [`Expr`].
///
/// # Arguments
/// * `node` - The evalexpr AST node to convert
///
/// # Returns
/// * `Result<Expr, ConvertError>` - The converted expression or an error if the node
///   uses an operator, literal or function outside the jet vocabulary
///
/// # Supported syntax
/// * Arithmetic: `+`, `-`, `*`, `/`, unary `-`
/// * `^`: cross product on vectors, power otherwise
/// * Integer and float literals
/// * Identifiers, resolved when the expression is evaluated
/// * Calls such as `Sin(t)` or `Vec(1, 2, t)`
pub fn build_ast(node: &Node) -> Result<Expr, ConvertError> {
    match node.operator() {
        // Addition and multiplication may have more than two children
        Operator::Add => fold_children(node, Expr::Add),
        Operator::Mul => fold_children(node, Expr::Mul),
        Operator::Sub => {
            let (left, right) = binary_children(node)?;
            Ok(Expr::Sub(Box::new(left), Box::new(right)))
        }
        Operator::Div => {
            let (left, right) = binary_children(node)?;
            Ok(Expr::Div(Box::new(left), Box::new(right)))
        }
        Operator::Exp => {
            let (left, right) = binary_children(node)?;
            Ok(Expr::Caret(Box::new(left), Box::new(right)))
        }
        Operator::Neg => match node.children() {
            [child] => Ok(Expr::Neg(Box::new(build_ast(child)?))),
            children => Err(ConvertError::Malformed(format!(
                "negation with {} operands",
                children.len()
            ))),
        },
        Operator::Const { value } => match value {
            evalexpr::Value::Float(f) => Ok(Expr::Const(*f)),
            evalexpr::Value::Int(i) => Ok(Expr::Const(*i as f64)),
            _ => Err(ConvertError::ConstOperator(format!("{value:?}"))),
        },
        Operator::VariableIdentifierRead { identifier } => Ok(Expr::Var(identifier.to_string())),
        Operator::FunctionIdentifier { identifier } => {
            let builtin = Builtin::from_name(identifier)
                .ok_or_else(|| ConvertError::UnknownFunction(identifier.to_string()))?;
            let args = node
                .children()
                .iter()
                .flat_map(call_arguments)
                .map(build_ast)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Expr::Call(builtin, args))
        }
        // Root node - parentheses and the top level, should have exactly one child
        Operator::RootNode => match node.children() {
            [child] => build_ast(child),
            children => Err(ConvertError::Malformed(format!(
                "expected a single expression, found {}",
                children.len()
            ))),
        },
        other => Err(ConvertError::UnsupportedOperator(format!("{other:?}"))),
    }
}

fn fold_children(
    node: &Node,
    combine: fn(Box<Expr>, Box<Expr>) -> Expr,
) -> Result<Expr, ConvertError> {
    let children = node.children();
    if children.len() < 2 {
        return Err(ConvertError::Malformed(format!(
            "{:?} with {} operands",
            node.operator(),
            children.len()
        )));
    }
    children.iter().skip(1).try_fold(
        build_ast(&children[0])?,
        |acc, child| -> Result<Expr, ConvertError> {
            Ok(combine(Box::new(acc), Box::new(build_ast(child)?)))
        },
    )
}

fn binary_children(node: &Node) -> Result<(Expr, Expr), ConvertError> {
    match node.children() {
        [left, right] => Ok((build_ast(left)?, build_ast(right)?)),
        children => Err(ConvertError::Malformed(format!(
            "{:?} with {} operands",
            node.operator(),
            children.len()
        ))),
    }
}

/// Splits the argument subtree of a call into one node per argument.
///
/// evalexpr wraps call arguments in a root node and joins several arguments into a
/// tuple.
fn call_arguments(node: &Node) -> Vec<&Node> {
    match (node.operator(), node.children()) {
        (Operator::RootNode, [child]) => call_arguments(child),
        (Operator::RootNode, []) => Vec::new(),
        (Operator::Tuple, children) => children.iter().collect(),
        _ => vec![node],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::Elementary;
    use crate::expr::{default_bindings, Scope};
    use crate::value::Value;
    use crate::vector::RealVector;

    fn eval(text: &str) -> Value {
        let bindings = default_bindings();
        parse(text).unwrap().eval(&Scope::new(&bindings)).unwrap()
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval("1 + 2 * 3"), Value::Real(7.0));
        assert_eq!(eval("(1 + 2) * 3"), Value::Real(9.0));
        assert_eq!(eval("2 * 3 ^ 2"), Value::Real(18.0));
        assert_eq!(eval("-2 + 5"), Value::Real(3.0));
        assert_eq!(eval("10 - 4 - 3"), Value::Real(3.0));
    }

    #[test]
    fn test_integer_and_float_literals() {
        assert_eq!(eval("7"), Value::Real(7.0));
        assert_eq!(eval("0.25 * 4"), Value::Real(1.0));
        assert_eq!(eval("1 / 4"), Value::Real(0.25));
    }

    #[test]
    fn test_calls_and_tuples() {
        assert_eq!(eval("Sqrt(2*2)"), Value::Real(2.0));
        assert_eq!(eval("sqrt(9)"), Value::Real(3.0));
        assert_eq!(eval("Vec(1, 2, 3)"), Value::Vector(RealVector::new(1.0, 2.0, 3.0)));
        assert_eq!(eval("Vec(1, 0, 0) ^ Vec(0, 1, 0)"), Value::Vector(RealVector::new(0.0, 0.0, 1.0)));
        assert_eq!(eval("Dot(Vec(1, 2, 3), Vec(1, 1, 1))"), Value::Real(6.0));
        assert_eq!(eval("Norm(Vec(3, 4, 0))"), Value::Real(5.0));
    }

    #[test]
    fn test_identifiers_are_kept() {
        let expr = parse("Sin(t) + PI").unwrap();
        assert_eq!(
            expr,
            Expr::Add(
                Box::new(Expr::Call(
                    Builtin::Elementary(Elementary::Sin),
                    vec![Expr::Var("t".to_string())]
                )),
                Box::new(Expr::Var("PI".to_string())),
            )
        );
    }

    #[test]
    fn test_unknown_function() {
        let err = parse("Foo(1)").unwrap_err();
        assert!(matches!(err, EvalError::Convert(ConvertError::UnknownFunction(name)) if name == "Foo"));
    }

    #[test]
    fn test_unsupported_operator() {
        let err = parse("1 == 2").unwrap_err();
        assert!(matches!(err, EvalError::Convert(ConvertError::UnsupportedOperator(_))));
    }

    #[test]
    fn test_non_numeric_literal() {
        let err = parse("\"abc\"").unwrap_err();
        assert!(matches!(err, EvalError::Convert(ConvertError::ConstOperator(_))));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(parse("(1").unwrap_err(), EvalError::Parse(_)));
    }
}
