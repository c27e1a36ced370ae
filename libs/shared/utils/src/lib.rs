pub mod image;
pub mod test_utils;
pub mod validate;
