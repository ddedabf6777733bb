use super::Expr;

/// A reference to a column of a table in a statement.
///
/// `table` is the alias the table is reachable under: the statement's own
/// alias or the alias of one of its joins.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ExprColumn {
    pub table: String,
    pub column: String,
}

impl ExprColumn {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> ExprColumn {
        ExprColumn {
            table: table.into(),
            column: column.into(),
        }
    }
}

impl Expr {
    pub fn column(table: impl Into<String>, column: impl Into<String>) -> Self {
        ExprColumn::new(table, column).into()
    }

    pub fn is_column(&self) -> bool {
        matches!(self, Self::Column(_))
    }
}

impl From<ExprColumn> for Expr {
    fn from(value: ExprColumn) -> Self {
        Self::Column(value)
    }
}
