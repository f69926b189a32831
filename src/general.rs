pub mod common;
pub mod squares;
pub mod tables;
