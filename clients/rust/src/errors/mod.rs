pub mod client;
pub mod sunpath;

pub use client::*;
pub use sunpath::*;
