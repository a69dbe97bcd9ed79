/// Shared wire types for the Courier HTTP API.
///
/// Field names (`friendname`, `sendername`, `gettername`) are part of the
/// external contract consumed by existing clients and must not be renamed.
pub mod api;
