//! Handlers 模块

pub mod health;
pub mod locations;
pub mod readings;

pub use health::*;
pub use locations::*;
pub use readings::*;
