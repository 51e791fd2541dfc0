use error_stack::Context;

#[derive(Debug)]
pub enum PostgresError {
    Connection,
    Query,
}

impl Context for PostgresError {}

impl std::fmt::Display for PostgresError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostgresError::Connection => f.write_str("failed to acquire a database connection"),
            PostgresError::Query => f.write_str("a query related error occured"),
        }
    }
}
