pub mod frame;
pub mod input;
pub mod persistence;
