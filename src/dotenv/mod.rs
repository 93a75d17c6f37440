pub mod file;
pub mod line;
pub mod lines;
pub mod sequence;

use crate::error::DotenvError;

pub type Result<T> = std::result::Result<T, DotenvError>;
