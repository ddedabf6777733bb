use crate::{Error, Result};

use multilingual_core::stmt::{BinaryOp, Expr, Value};

/// Separates field names from lookups in a path (`title_en__startswith`).
pub(crate) const LOOKUP_SEP: &str = "__";

/// A comparison applied to a field reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lookup {
    Exact,
    IsNull,
    Gt,
    Gte,
    Lt,
    Lte,
    StartsWith,
    Contains,
    In,
}

/// The right-hand side of a condition.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Operand {
    Value(Value),
    List(Vec<Value>),
}

impl Lookup {
    pub(crate) fn from_name(name: &str) -> Option<Lookup> {
        Some(match name {
            "exact" => Lookup::Exact,
            "isnull" => Lookup::IsNull,
            "gt" => Lookup::Gt,
            "gte" => Lookup::Gte,
            "lt" => Lookup::Lt,
            "lte" => Lookup::Lte,
            "startswith" => Lookup::StartsWith,
            "contains" => Lookup::Contains,
            "in" => Lookup::In,
            _ => return None,
        })
    }

    /// Builds the predicate `lhs <lookup> operand`.
    pub(crate) fn apply(self, lhs: Expr, operand: Operand) -> Result<Expr> {
        let value = match (self, operand) {
            (Lookup::In, Operand::List(list)) => return Ok(Expr::in_list(lhs, list)),
            (Lookup::In, Operand::Value(_)) => {
                return Err(Error::unsupported_query("`in` lookup takes a list of values"))
            }
            (_, Operand::List(_)) => {
                return Err(Error::unsupported_query(format!(
                    "`{self:?}` lookup takes a single value"
                )))
            }
            (_, Operand::Value(value)) => value,
        };

        Ok(match self {
            Lookup::Exact if value.is_null() => Expr::is_null(lhs),
            Lookup::Exact => Expr::eq(lhs, value),
            Lookup::IsNull => match value.as_bool() {
                Some(true) => Expr::is_null(lhs),
                Some(false) => Expr::is_not_null(lhs),
                None => {
                    return Err(Error::unsupported_query(
                        "`isnull` lookup takes a boolean",
                    ))
                }
            },
            Lookup::Gt => Expr::binary_op(lhs, BinaryOp::Gt, value),
            Lookup::Gte => Expr::binary_op(lhs, BinaryOp::Ge, value),
            Lookup::Lt => Expr::binary_op(lhs, BinaryOp::Lt, value),
            Lookup::Lte => Expr::binary_op(lhs, BinaryOp::Le, value),
            Lookup::StartsWith | Lookup::Contains => {
                let Some(text) = value.as_str() else {
                    return Err(Error::unsupported_query(format!(
                        "`{self:?}` lookup takes a string"
                    )));
                };

                let escaped = Expr::escape_like(text);
                let pattern = if self == Lookup::StartsWith {
                    format!("{escaped}%")
                } else {
                    format!("%{escaped}%")
                };

                Expr::like(lhs, pattern)
            }
            Lookup::In => unreachable!(),
        })
    }
}
