pub mod credential;
pub mod patient;

pub use credential::*;
pub use patient::*;
