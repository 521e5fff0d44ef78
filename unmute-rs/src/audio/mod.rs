//! Audio module for default output endpoint control.
//!
//! The unmuter only ever talks to the default render endpoint, so the
//! surface here is deliberately small: find that endpoint, then read and
//! write its mute flag and master volume scalar.

pub mod endpoint;
pub mod mock;

#[cfg(target_os = "windows")]
pub mod enumerator;
#[cfg(target_os = "windows")]
pub mod volume;

pub use endpoint::{AudioError, EndpointProvider, OutputEndpoint, SystemEndpoints};
pub use mock::{MockEndpointState, MockEndpoints};
