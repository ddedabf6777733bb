use super::Value;

#[derive(Debug, Clone)]
pub struct Insert {
    pub table: String,
    pub columns: Vec<String>,
    pub values: Vec<Value>,

    /// Column whose generated value the insert returns
    pub returning: Option<String>,
}
