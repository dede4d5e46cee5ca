pub mod audio;
pub mod command;
pub mod layout;
pub mod runner;
pub mod separator;
