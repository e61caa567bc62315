/// A value of an enumerated field.
///
/// Carries both the variant name and its ordinal so the renderer can pick
/// the representation the column's declared storage mode asks for.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueEnum {
    pub name: String,
    pub ordinal: i32,
}

impl ValueEnum {
    pub fn new(name: impl Into<String>, ordinal: i32) -> Self {
        Self {
            name: name.into(),
            ordinal,
        }
    }
}
