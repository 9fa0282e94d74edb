pub mod dict;
pub mod store;
