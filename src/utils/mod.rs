pub mod command;
pub mod dir;
pub mod errors;
pub mod logger;
pub mod progress;
pub mod temp;
pub mod variables;
