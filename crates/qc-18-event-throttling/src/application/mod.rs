//! Application layer: the throttling decision engine

pub mod service;

pub use service::ThrottlingState;
