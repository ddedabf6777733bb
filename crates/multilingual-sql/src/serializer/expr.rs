use super::{Comma, Delimited, Formatter, Ident, Params, ToSql};

use multilingual_core::stmt::{self, BinaryOp, Expr, ExprColumn, Value};

impl ToSql for &Expr {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        match self {
            Expr::And(operands) => {
                fmt!(f, "(", Delimited(operands, " AND "), ")");
            }
            Expr::BinaryOp { op, lhs, rhs } => {
                fmt!(f, &**lhs, " ", op, " ", &**rhs);
            }
            Expr::Coalesce(operands) => {
                fmt!(f, "COALESCE(", Comma(operands), ")");
            }
            Expr::Column(column) => column.to_sql(f),
            Expr::CountStar => fmt!(f, "COUNT(*)"),
            Expr::InList { expr, list } => {
                if list.is_empty() {
                    // Nothing is a member of the empty list
                    fmt!(f, "(1 = 0)");
                } else {
                    fmt!(f, &**expr, " IN (", Comma(list), ")");
                }
            }
            Expr::IsNull { expr, negate } => {
                let op = if *negate { " IS NOT NULL" } else { " IS NULL" };
                fmt!(f, &**expr, op);
            }
            Expr::Like { expr, pattern } => {
                let pattern = Value::String(pattern.clone());
                fmt!(f, &**expr, " LIKE ", &pattern, " ESCAPE '", Escape, "'");
            }
            Expr::Not(expr) => {
                fmt!(f, "NOT (", &**expr, ")");
            }
            Expr::Or(operands) => {
                fmt!(f, "(", Delimited(operands, " OR "), ")");
            }
            Expr::Value(value) => value.to_sql(f),
        }
    }
}

struct Escape;

impl ToSql for Escape {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        f.dst.push(Expr::LIKE_ESCAPE);
    }
}

impl ToSql for &ExprColumn {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        fmt!(f, Ident(&self.table), ".", Ident(&self.column));
    }
}

impl ToSql for &BinaryOp {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        f.dst.push_str(match self {
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "<>",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
        })
    }
}

impl ToSql for &Value {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        if self.is_null() {
            fmt!(f, "NULL");
        } else {
            let placeholder = f.params.push(self);
            placeholder.to_sql(f);
        }
    }
}

impl ToSql for &stmt::SelectItem {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let alias = self.alias.as_ref().map(|alias| (" AS ", Ident(alias)));
        fmt!(f, &self.expr, alias);
    }
}

impl<A: ToSql, B: ToSql> ToSql for (A, B) {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        fmt!(f, self.0, self.1);
    }
}
