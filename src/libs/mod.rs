pub mod command;
pub mod dump;
pub mod error;
pub mod io;
pub mod model;
pub mod path;
