pub mod command;
pub mod file;
pub mod parsing;
