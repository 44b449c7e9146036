//! Handler 共用工具

pub mod params;
pub mod response;

pub use params::*;
pub use response::*;
