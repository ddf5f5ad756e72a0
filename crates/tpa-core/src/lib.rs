pub mod catalog;
pub mod config;
pub mod error;
pub mod matrix;
pub mod record;


pub use catalog::*;
pub use config::*;
pub use error::*;
pub use matrix::*;
pub use record::*;
