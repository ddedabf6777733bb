use crate::stmt::Statement;

#[derive(Debug, Clone)]
pub enum Operation {
    /// Execute a statement
    Statement(Statement),

    /// Transaction control
    Transaction(Transaction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transaction {
    Start,
    Commit,
    Rollback,
}

impl Operation {
    pub fn as_statement(&self) -> Option<&Statement> {
        match self {
            Operation::Statement(stmt) => Some(stmt),
            Operation::Transaction(_) => None,
        }
    }
}

impl From<Statement> for Operation {
    fn from(value: Statement) -> Self {
        Operation::Statement(value)
    }
}

impl From<Transaction> for Operation {
    fn from(value: Transaction) -> Self {
        Operation::Transaction(value)
    }
}
