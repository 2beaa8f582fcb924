pub mod list;
pub mod serve;
pub mod test;
pub mod validate;
