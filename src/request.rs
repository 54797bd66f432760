//! Sessions handed over by B-Fabric when an application is opened

/// Read session files and validate them against a JSON schema
pub mod message;
/// Compile the embedded JSON schema
pub mod schema;
/// Valid JSON sessions are deserialised into a set of structs defined here
pub mod session;
/// Tabular view of the session's input dataset
pub mod dataset;
