pub mod check;
pub mod load;
pub mod transform;
pub mod validate;
