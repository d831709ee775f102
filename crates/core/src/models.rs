pub mod appointment;
pub mod directory;
pub mod window;
