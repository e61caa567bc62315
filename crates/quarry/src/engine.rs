pub(crate) mod exec;
pub(crate) mod hydrate;
pub(crate) mod lower;
