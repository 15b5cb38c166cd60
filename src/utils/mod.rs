pub mod filename;
pub mod time;
