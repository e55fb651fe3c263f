pub mod coerce;
pub mod constants;
pub mod graph;

pub use coerce::{is_valid_multiplier, safe_parse_multiplier, safe_parse_weight, NumericInput};
pub use constants::*;
pub use graph::{
    dependency_chain, dependency_depth, dependency_graph, direct_dependent_ids,
    find_cycle_path, find_direct_dependents, is_calculation_valid, would_create_cycle,
};
