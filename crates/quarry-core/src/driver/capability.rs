/// Describes behaviors that vary per database engine.
#[derive(Debug, Clone)]
pub struct Capability {
    /// Supports `CREATE TABLE IF NOT EXISTS`
    pub create_if_not_exists: bool,

    /// Can return generated keys inline via a RETURNING clause
    pub returning: bool,

    /// Supports sequence objects
    pub sequences: bool,

    /// Supports identity (auto-increment) key columns
    pub identity: bool,
}
