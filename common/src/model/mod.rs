pub mod payload;
pub mod profile;
