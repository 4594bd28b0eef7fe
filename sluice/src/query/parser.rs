//! Compiles `<field> <operator> <value> [<value2>]` expressions.

use std::fmt;

use crate::{Error, Result};

/// Comparison operators accepted in filter expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `=`
    Eq,
    /// `!=` or `<>`
    NotEq,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `>=`
    Gte,
    /// `<=`
    Lte,
    /// `!<` (not less than)
    NotLt,
    /// `!>` (not greater than)
    NotGt,
    /// `btw`, inclusive range over two values
    Between,
}

impl Operator {
    pub fn parse(token: &str) -> Option<Operator> {
        match token {
            "=" => Some(Operator::Eq),
            "!=" | "<>" => Some(Operator::NotEq),
            ">" => Some(Operator::Gt),
            "<" => Some(Operator::Lt),
            ">=" => Some(Operator::Gte),
            "<=" => Some(Operator::Lte),
            "!<" => Some(Operator::NotLt),
            "!>" => Some(Operator::NotGt),
            "btw" => Some(Operator::Between),
            _ => None,
        }
    }

    /// SQL spelling of this operator.
    pub fn sql(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::NotEq => "<>",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Gte | Operator::NotLt => ">=",
            Operator::Lte | Operator::NotGt => "<=",
            Operator::Between => "BETWEEN",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Operator::Eq => "=",
            Operator::NotEq => "!=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Gte => ">=",
            Operator::Lte => "<=",
            Operator::NotLt => "!<",
            Operator::NotGt => "!>",
            Operator::Between => "btw",
        };
        write!(f, "{}", token)
    }
}

/// A compiled filter: field, operator, and the operator's arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criterion {
    pub field: String,
    pub operator: Operator,
    pub arguments: Vec<String>,
}

/// Compile a whitespace-separated filter expression.
///
/// `btw` takes exactly two values; every other operator takes one, and any
/// trailing token is ignored.
pub fn compile(expression: &str) -> Result<Criterion> {
    let parts: Vec<&str> = expression.split_whitespace().collect();
    if parts.len() < 3 {
        return Err(Error::MalformedExpression(format!(
            "expected '<field> <operator> <value>', got '{}'",
            expression
        )));
    }

    let operator = Operator::parse(parts[1]).ok_or_else(|| {
        Error::MalformedExpression(format!("unknown operator '{}'", parts[1]))
    })?;

    let arguments = if operator == Operator::Between {
        let second = parts
            .get(3)
            .ok_or_else(|| Error::Arity("the btw operator requires two values".to_string()))?;
        vec![parts[2].to_string(), second.to_string()]
    } else {
        vec![parts[2].to_string()]
    };

    Ok(Criterion {
        field: parts[0].to_string(),
        operator,
        arguments,
    })
}
