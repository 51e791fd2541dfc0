use error_stack::Context;

#[derive(Debug)]
pub struct InsertError;

impl Context for InsertError {}

impl std::fmt::Display for InsertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("an error occurred during data insertion")
    }
}

/// A ship type code outside the set of tracked types.
#[derive(Debug, PartialEq, Eq)]
pub struct ShipTypeError(pub i32);

impl std::error::Error for ShipTypeError {}

impl std::fmt::Display for ShipTypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "encountered an untracked ship type code: {}", self.0)
    }
}
