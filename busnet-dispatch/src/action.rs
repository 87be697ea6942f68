use crate::error::ValidationError;
use crate::request::ApiRequest;
use busnet_contract::{
    EmptyRequest, EtaForBusRequest, MoveBusRequest, StopPairRequest, endpoints,
};

/// A user action, together with the field values it was triggered with.
///
/// Field values are passed through untouched;
/// the only validation is that required fields are non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Advance a single bus along its route.
    MoveBus { bus_id: String },
    /// Advance every bus.
    MoveAll,
    /// Estimated travel time between two stops.
    EtaBetween { src: String, dst: String },
    /// Estimated arrival time of a bus at a target stop.
    EtaForBus { bus_id: String, target: String },
    /// Shortest path between two stops.
    ShortestPath { src: String, dst: String },
    /// Shortest path between two stops, using the backend's A* search.
    AStar { src: String, dst: String },
    /// Stop names starting with a prefix. The prefix may be empty.
    Suggest { prefix: String },
    /// Network summary.
    Summary,
    /// All stops.
    Stops,
    /// All buses and their positions.
    Buses,
    /// Minimum spanning tree of the stop graph.
    Mst,
    /// Past actions recorded by the backend.
    History,
    /// Recent backend log lines.
    Logs,
}

const ENTER_BUS_ID: &str = "Enter bus id";
const ENTER_SRC_AND_DST: &str = "Enter src and dst";
const ENTER_BUS_AND_TARGET: &str = "Enter bus and target";

impl Action {
    /// A short, stable name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::MoveBus { .. } => "move_bus",
            Action::MoveAll => "move_all",
            Action::EtaBetween { .. } => "eta_between",
            Action::EtaForBus { .. } => "eta_for_bus",
            Action::ShortestPath { .. } => "shortest_path",
            Action::AStar { .. } => "astar",
            Action::Suggest { .. } => "suggest",
            Action::Summary => "summary",
            Action::Stops => "stops",
            Action::Buses => "buses",
            Action::Mst => "mst",
            Action::History => "history",
            Action::Logs => "logs",
        }
    }

    /// Validates the action's fields and builds the matching backend request.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] carrying the alert text
    /// when a required field is empty.
    pub fn to_request(&self) -> Result<ApiRequest, ValidationError> {
        match self {
            Action::MoveBus { bus_id } => {
                if bus_id.is_empty() {
                    return Err(ValidationError::new(self.name(), ENTER_BUS_ID));
                }
                Ok(ApiRequest::post(
                    endpoints::MOVE_BUS,
                    &MoveBusRequest {
                        bus_id: bus_id.clone(),
                    },
                ))
            }
            Action::MoveAll => Ok(ApiRequest::post(endpoints::MOVE_ALL, &EmptyRequest {})),
            Action::EtaBetween { src, dst } => self.stop_pair(endpoints::ETA_BETWEEN, src, dst),
            Action::ShortestPath { src, dst } => {
                self.stop_pair(endpoints::SHORTEST_PATH, src, dst)
            }
            Action::AStar { src, dst } => self.stop_pair(endpoints::ASTAR, src, dst),
            Action::EtaForBus { bus_id, target } => {
                if bus_id.is_empty() || target.is_empty() {
                    return Err(ValidationError::new(self.name(), ENTER_BUS_AND_TARGET));
                }
                Ok(ApiRequest::post(
                    endpoints::ETA_FOR_BUS,
                    &EtaForBusRequest {
                        bus_id: bus_id.clone(),
                        target: target.clone(),
                    },
                ))
            }
            Action::Suggest { prefix } => Ok(ApiRequest::get(endpoints::SUGGEST)
                .with_query(endpoints::SUGGEST_PREFIX_PARAM, prefix.as_str())),
            Action::Summary => Ok(ApiRequest::get(endpoints::SUMMARY)),
            Action::Stops => Ok(ApiRequest::get(endpoints::STOPS)),
            Action::Buses => Ok(ApiRequest::get(endpoints::BUSES)),
            Action::Mst => Ok(ApiRequest::get(endpoints::MST)),
            Action::History => Ok(ApiRequest::get(endpoints::HISTORY)),
            Action::Logs => Ok(ApiRequest::get(endpoints::LOGS)),
        }
    }

    /// Builds a `{src, dst}` request; both stops are required.
    fn stop_pair(
        &self,
        path: &'static str,
        src: &str,
        dst: &str,
    ) -> Result<ApiRequest, ValidationError> {
        if src.is_empty() || dst.is_empty() {
            return Err(ValidationError::new(self.name(), ENTER_SRC_AND_DST));
        }

        Ok(ApiRequest::post(
            path,
            &StopPairRequest {
                src: src.to_string(),
                dst: dst.to_string(),
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;
    use serde_json::json;

    fn stops(src: &str, dst: &str) -> [Action; 3] {
        let (src, dst) = (src.to_string(), dst.to_string());
        [
            Action::EtaBetween {
                src: src.clone(),
                dst: dst.clone(),
            },
            Action::ShortestPath {
                src: src.clone(),
                dst: dst.clone(),
            },
            Action::AStar { src, dst },
        ]
    }

    #[test]
    fn move_bus_requires_a_bus_id() {
        let err = Action::MoveBus {
            bus_id: String::new(),
        }
        .to_request()
        .unwrap_err();
        assert_eq!(err.message(), "Enter bus id");
        assert_eq!(err.action(), "move_bus");
    }

    #[test]
    fn stop_pair_actions_require_both_stops() {
        for (src, dst) in [("", "B"), ("A", ""), ("", "")] {
            for action in stops(src, dst) {
                let err = action.to_request().unwrap_err();
                assert_eq!(err.message(), "Enter src and dst", "{action:?}");
            }
        }
    }

    #[test]
    fn eta_for_bus_requires_bus_and_target() {
        for (bus_id, target) in [("", "Central"), ("4", ""), ("", "")] {
            let err = Action::EtaForBus {
                bus_id: bus_id.to_string(),
                target: target.to_string(),
            }
            .to_request()
            .unwrap_err();
            assert_eq!(err.to_string(), "Enter bus and target");
        }
    }

    #[test]
    fn whitespace_is_not_empty() {
        let request = Action::MoveBus {
            bus_id: " ".to_string(),
        }
        .to_request()
        .unwrap();
        assert_eq!(request.body, Some(json!({"busId": " "})));
    }

    #[test]
    fn stop_pair_requests() {
        let paths: Vec<_> = stops("Depot", "Harbor")
            .iter()
            .map(|action| {
                let request = action.to_request().unwrap();
                assert_eq!(request.method, Method::POST);
                assert_eq!(request.body, Some(json!({"src": "Depot", "dst": "Harbor"})));
                request.path
            })
            .collect();
        assert_eq!(paths, ["/eta_between", "/shortest_path", "/astar"]);
    }

    #[test]
    fn eta_for_bus_request() {
        let request = Action::EtaForBus {
            bus_id: "12".to_string(),
            target: "Harbor".to_string(),
        }
        .to_request()
        .unwrap();
        assert_eq!(request.path, "/eta_for_bus");
        insta::assert_snapshot!(request.body.unwrap().to_string(), @r#"{"busId":"12","target":"Harbor"}"#);
    }

    #[test]
    fn suggest_accepts_an_empty_prefix() {
        let request = Action::Suggest {
            prefix: String::new(),
        }
        .to_request()
        .unwrap();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.path, "/suggest");
        assert_eq!(request.query, vec![("prefix", String::new())]);
        assert_eq!(request.body, None);
    }

    #[test]
    fn move_all_posts_an_empty_object() {
        let request = Action::MoveAll.to_request().unwrap();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.body, Some(json!({})));
    }

    #[test]
    fn report_actions_are_plain_gets() {
        for (action, path) in [
            (Action::Summary, "/summary"),
            (Action::Stops, "/stops"),
            (Action::Buses, "/buses"),
            (Action::Mst, "/mst"),
            (Action::History, "/history"),
            (Action::Logs, "/logs"),
        ] {
            assert_eq!(action.to_request().unwrap(), ApiRequest::get(path));
        }
    }
}
