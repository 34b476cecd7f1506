pub mod domain;
pub mod error;
pub mod report;
pub mod roster;
