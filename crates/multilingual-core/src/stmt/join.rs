use super::Expr;

#[derive(Debug, Clone)]
pub struct Join {
    /// The table to join
    pub table: String,

    /// Alias the joined table is referenced by
    pub alias: String,

    /// The join condition
    pub constraint: JoinOp,
}

#[derive(Debug, Clone)]
pub enum JoinOp {
    /// Rows of the left side are kept when nothing matches
    Left(Expr),
}

impl JoinOp {
    pub fn expr(&self) -> &Expr {
        match self {
            JoinOp::Left(expr) => expr,
        }
    }

    pub fn expr_mut(&mut self) -> &mut Expr {
        match self {
            JoinOp::Left(expr) => expr,
        }
    }
}
