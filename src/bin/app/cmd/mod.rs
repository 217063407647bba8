pub mod simplify;
pub mod info;
pub mod batch;
