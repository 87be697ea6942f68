use busnet_dispatch::Action;
use clap::{Parser, Subcommand};

/// One subcommand per backend action.
///
/// Every field is optional at this level.
/// Missing values become empty strings,
/// so the dispatcher's own empty-field check is the only validation.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ActionCommand {
    /// Move a single bus one step along its route
    MoveBus { bus_id: Option<String> },
    /// Move every bus one step
    MoveAll,
    /// Estimated travel time between two stops
    EtaBetween {
        src: Option<String>,
        dst: Option<String>,
    },
    /// Estimated arrival time of a bus at a target stop
    EtaForBus {
        bus_id: Option<String>,
        target: Option<String>,
    },
    /// Shortest path between two stops
    ShortestPath {
        src: Option<String>,
        dst: Option<String>,
    },
    /// Shortest path between two stops using A* search
    Astar {
        src: Option<String>,
        dst: Option<String>,
    },
    /// Suggest stop names starting with a prefix (empty lists everything)
    Suggest { prefix: Option<String> },
    /// Network summary
    Summary,
    /// List all stops
    Stops,
    /// List all buses
    Buses,
    /// Minimum spanning tree of the stop graph
    Mst,
    /// Action history
    History,
    /// Recent backend logs
    Logs,
}

impl From<ActionCommand> for Action {
    fn from(command: ActionCommand) -> Self {
        match command {
            ActionCommand::MoveBus { bus_id } => Action::MoveBus {
                bus_id: bus_id.unwrap_or_default(),
            },
            ActionCommand::MoveAll => Action::MoveAll,
            ActionCommand::EtaBetween { src, dst } => Action::EtaBetween {
                src: src.unwrap_or_default(),
                dst: dst.unwrap_or_default(),
            },
            ActionCommand::EtaForBus { bus_id, target } => Action::EtaForBus {
                bus_id: bus_id.unwrap_or_default(),
                target: target.unwrap_or_default(),
            },
            ActionCommand::ShortestPath { src, dst } => Action::ShortestPath {
                src: src.unwrap_or_default(),
                dst: dst.unwrap_or_default(),
            },
            ActionCommand::Astar { src, dst } => Action::AStar {
                src: src.unwrap_or_default(),
                dst: dst.unwrap_or_default(),
            },
            ActionCommand::Suggest { prefix } => Action::Suggest {
                prefix: prefix.unwrap_or_default(),
            },
            ActionCommand::Summary => Action::Summary,
            ActionCommand::Stops => Action::Stops,
            ActionCommand::Buses => Action::Buses,
            ActionCommand::Mst => Action::Mst,
            ActionCommand::History => Action::History,
            ActionCommand::Logs => Action::Logs,
        }
    }
}

/// A single line typed into the interactive shell.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    action: ActionCommand,
}

/// Parses a shell line (ex: `eta-between Depot "City Hall"`) into an action.
///
/// # Errors
///
/// Fails with clap's usage error (or help text) if the line isn't a valid action.
pub fn parse_line(line: &str) -> Result<Action, clap::Error> {
    ShellLine::try_parse_from(split_words(line)).map(|line| line.action.into())
}

/// Splits a line on whitespace, keeping double-quoted runs together.
///
/// `""` yields an empty word, which is how an empty field is typed.
fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current: Option<String> = None;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                current.get_or_insert_with(String::new);
            }
            c if c.is_whitespace() && !quoted => {
                if let Some(word) = current.take() {
                    words.push(word);
                }
            }
            c => current.get_or_insert_with(String::new).push(c),
        }
    }
    words.extend(current);

    words
}
