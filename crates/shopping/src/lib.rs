mod aggregator;
mod categorize;
mod keyword;
mod list;

pub use aggregator::*;
pub use categorize::*;
pub use keyword::*;
pub use list::*;
