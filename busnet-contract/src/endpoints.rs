//! Endpoint paths exposed by the backend.
//!
//! Paths are relative to the backend's base URL.

pub const MOVE_BUS: &str = "/move_bus";
pub const MOVE_ALL: &str = "/move_all";
pub const ETA_BETWEEN: &str = "/eta_between";
pub const ETA_FOR_BUS: &str = "/eta_for_bus";
pub const SHORTEST_PATH: &str = "/shortest_path";
pub const ASTAR: &str = "/astar";
pub const SUGGEST: &str = "/suggest";
pub const SUMMARY: &str = "/summary";
pub const STOPS: &str = "/stops";
pub const BUSES: &str = "/buses";
pub const MST: &str = "/mst";
pub const HISTORY: &str = "/history";
pub const LOGS: &str = "/logs";

/// The query parameter carrying the stop-name prefix for [`SUGGEST`].
pub const SUGGEST_PREFIX_PARAM: &str = "prefix";
