mod error;
mod recipe;
mod week;

pub use error::*;
pub use recipe::*;
pub use week::*;
