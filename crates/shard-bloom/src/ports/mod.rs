//! Ports Layer
//!
//! Defines the interfaces (traits) external callers drive the filter through.

pub mod inbound;

pub use inbound::MembershipApi;
