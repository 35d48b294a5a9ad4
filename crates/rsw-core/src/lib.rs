pub mod commit;
pub mod config;
pub mod cycle;
pub mod dataset;
pub mod error;
pub mod generate;
pub mod io;
pub mod paths;
pub mod render;

pub use error::{Result, RswError};
