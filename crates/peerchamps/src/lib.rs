//! Customer reference program tooling: advocate matching, reporting, and the HTTP surface
//! shared by the `peerchamps-api` service.

pub mod config;
pub mod error;
pub mod matching;
pub mod telemetry;
