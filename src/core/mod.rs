//! Core application primitives (orchestrator, HTTP surface, scheduler)

pub mod http;
pub mod scanner;
pub mod scheduler;

pub use http::*;
pub use scanner::*;
pub use scheduler::*;
