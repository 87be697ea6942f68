use serde::Serialize;

/// Body for `POST /move_bus`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MoveBusRequest {
    pub bus_id: String,
}

/// Body for the endpoints that take a pair of stops
/// (`/eta_between`, `/shortest_path` and `/astar`).
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct StopPairRequest {
    /// The source stop.
    pub src: String,
    /// The destination stop.
    pub dst: String,
}

/// Body for `POST /eta_for_bus`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EtaForBusRequest {
    pub bus_id: String,
    /// The stop the bus is heading for.
    pub target: String,
}

/// An empty JSON object (`{}`).
///
/// POST endpoints without parameters still expect a JSON body.
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptyRequest {}
