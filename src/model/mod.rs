pub mod catalog;
pub mod directive;
pub mod types;

pub use catalog::*;
pub use directive::*;
pub use types::*;
