//! Offline replies: canned lines per identity, no network involved.

mod canned;

pub use canned::CannedResponses;
