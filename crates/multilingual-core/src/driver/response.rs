use crate::stmt::Value;

#[derive(Debug, Clone)]
pub struct Response {
    pub rows: Rows,
}

#[derive(Debug, Clone)]
pub enum Rows {
    /// Number of rows affected
    Count(u64),

    /// Returned rows, each aligned with the statement's projection
    Values(Vec<Vec<Value>>),
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
        }
    }

    pub fn values(rows: Vec<Vec<Value>>) -> Self {
        Self {
            rows: Rows::Values(rows),
        }
    }

    pub fn into_values(self) -> Vec<Vec<Value>> {
        match self.rows {
            Rows::Values(rows) => rows,
            Rows::Count(_) => vec![],
        }
    }

    pub fn count_affected(&self) -> u64 {
        match &self.rows {
            Rows::Count(count) => *count,
            Rows::Values(rows) => rows.len() as u64,
        }
    }
}
