//! Library components of the clinic CLI: logging setup and the ingestion
//! pipeline, kept out of the binary so integration tests can drive them.

pub mod logging;
pub mod pipeline;
