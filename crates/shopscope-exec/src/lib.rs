pub mod client;
pub mod contracts;
pub mod pipeline;

pub use client::*;
pub use contracts::*;
pub use pipeline::*;
