//! Data structures and helpers for talking to a busnet backend.
//!
//! The backend exposes a handful of JSON endpoints (see [`endpoints`]).
//! Every one of them answers with an [`OutputEnvelope`],
//! which is what clients ultimately render for the user.

pub mod endpoints;
mod envelope;
mod request;

pub use envelope::OutputEnvelope;
pub use request::{EmptyRequest, EtaForBusRequest, MoveBusRequest, StopPairRequest};
