/// Portable field types, mapped to engine-specific column types by each
/// dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Boolean,

    /// Signed 32-bit integer
    Integer,

    /// Signed 64-bit integer
    BigInt,

    Float,

    Double,

    /// Variable-length character data. A length constraint on the field maps
    /// to a bounded VARCHAR; otherwise the dialect's unbounded text type.
    Text,

    Timestamp,

    /// Enumerated type stored by variant name
    Enum,

    /// Enumerated type stored by variant ordinal
    EnumInt,

    Blob,

    Clob,

    /// A foreign-key column. Stored as the dialect's 64-bit integer type;
    /// the relation metadata carries the target model.
    ForeignKey,
}

impl Type {
    /// True for types acceptable as an optimistic-lock version column.
    pub fn is_integer_family(&self) -> bool {
        matches!(self, Self::Integer | Self::BigInt)
    }

    pub fn is_enum(&self) -> bool {
        matches!(self, Self::Enum | Self::EnumInt)
    }
}
