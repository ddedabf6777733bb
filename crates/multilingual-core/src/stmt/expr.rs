use super::{ExprColumn, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// All expressions must evaluate to true
    And(Vec<Expr>),

    /// Binary expression
    BinaryOp {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    /// First non-null expression
    Coalesce(Vec<Expr>),

    /// A column of a table in the statement
    Column(ExprColumn),

    /// `COUNT(*)`
    CountStar,

    /// Membership in a list of values
    InList { expr: Box<Expr>, list: Vec<Value> },

    /// `IS NULL`, or `IS NOT NULL` when `negate` is set
    IsNull { expr: Box<Expr>, negate: bool },

    /// `LIKE` with `%` and `_` wildcards, escaped by [`Expr::LIKE_ESCAPE`]
    Like { expr: Box<Expr>, pattern: String },

    /// Negation
    Not(Box<Expr>),

    /// Any expression must evaluate to true
    Or(Vec<Expr>),

    /// A constant
    Value(Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    Ne,
    Ge,
    Gt,
    Le,
    Lt,
}

impl Expr {
    /// Escape character of `LIKE` patterns.
    pub const LIKE_ESCAPE: char = '!';

    /// Escapes wildcards in `literal` so it matches itself in a `LIKE`
    /// pattern.
    pub fn escape_like(literal: &str) -> String {
        let mut escaped = String::with_capacity(literal.len());
        for ch in literal.chars() {
            if matches!(ch, '%' | '_') || ch == Self::LIKE_ESCAPE {
                escaped.push(Self::LIKE_ESCAPE);
            }
            escaped.push(ch);
        }
        escaped
    }

    pub fn value(value: impl Into<Value>) -> Expr {
        Expr::Value(value.into())
    }

    pub fn binary_op(lhs: impl Into<Expr>, op: BinaryOp, rhs: impl Into<Expr>) -> Expr {
        Expr::BinaryOp {
            op,
            lhs: Box::new(lhs.into()),
            rhs: Box::new(rhs.into()),
        }
    }

    pub fn eq(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary_op(lhs, BinaryOp::Eq, rhs)
    }

    pub fn is_null(expr: impl Into<Expr>) -> Expr {
        Expr::IsNull {
            expr: Box::new(expr.into()),
            negate: false,
        }
    }

    pub fn is_not_null(expr: impl Into<Expr>) -> Expr {
        Expr::IsNull {
            expr: Box::new(expr.into()),
            negate: true,
        }
    }

    pub fn like(expr: impl Into<Expr>, pattern: impl Into<String>) -> Expr {
        Expr::Like {
            expr: Box::new(expr.into()),
            pattern: pattern.into(),
        }
    }

    pub fn in_list(expr: impl Into<Expr>, list: Vec<Value>) -> Expr {
        Expr::InList {
            expr: Box::new(expr.into()),
            list,
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(expr: impl Into<Expr>) -> Expr {
        Expr::Not(Box::new(expr.into()))
    }

    /// Conjunction, flattening nested `And`s.
    pub fn and(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        let mut operands = vec![];
        for expr in [lhs.into(), rhs.into()] {
            match expr {
                Expr::And(nested) => operands.extend(nested),
                expr => operands.push(expr),
            }
        }
        Expr::And(operands)
    }

    pub fn and_from_vec(mut operands: Vec<Expr>) -> Expr {
        match operands.len() {
            1 => operands.remove(0),
            _ => Expr::And(operands),
        }
    }

    pub fn coalesce(mut operands: Vec<Expr>) -> Expr {
        match operands.len() {
            1 => operands.remove(0),
            _ => Expr::Coalesce(operands),
        }
    }

    /// Calls `f` on every column reference in the expression.
    pub fn for_each_column_mut(&mut self, f: &mut impl FnMut(&mut ExprColumn)) {
        match self {
            Expr::Column(column) => f(column),
            Expr::And(operands) | Expr::Or(operands) | Expr::Coalesce(operands) => {
                for operand in operands {
                    operand.for_each_column_mut(f);
                }
            }
            Expr::BinaryOp { lhs, rhs, .. } => {
                lhs.for_each_column_mut(f);
                rhs.for_each_column_mut(f);
            }
            Expr::InList { expr, .. }
            | Expr::IsNull { expr, .. }
            | Expr::Like { expr, .. }
            | Expr::Not(expr) => expr.for_each_column_mut(f),
            Expr::CountStar | Expr::Value(_) => {}
        }
    }

    /// Calls `f` on every column reference in the expression.
    pub fn for_each_column(&self, f: &mut impl FnMut(&ExprColumn)) {
        match self {
            Expr::Column(column) => f(column),
            Expr::And(operands) | Expr::Or(operands) | Expr::Coalesce(operands) => {
                for operand in operands {
                    operand.for_each_column(f);
                }
            }
            Expr::BinaryOp { lhs, rhs, .. } => {
                lhs.for_each_column(f);
                rhs.for_each_column(f);
            }
            Expr::InList { expr, .. }
            | Expr::IsNull { expr, .. }
            | Expr::Like { expr, .. }
            | Expr::Not(expr) => expr.for_each_column(f),
            Expr::CountStar | Expr::Value(_) => {}
        }
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::Value(value)
    }
}
