//! Queries over the calculation edges between foods.
//!
//! Every derived food points at exactly one source through
//! `calculation.source_id`. These functions only read the collection; the
//! ledger is responsible for keeping the edges acyclic.

use std::collections::{BTreeMap, HashSet};

use crate::engine::coerce::is_valid_multiplier;
use crate::models::{Food, FoodId};

/// Every food whose calculation reads from `source_id`.
pub fn find_direct_dependents(foods: &[Food], source_id: FoodId) -> Vec<&Food> {
    foods
        .iter()
        .filter(|f| f.source_id() == Some(source_id))
        .collect()
}

/// Ids of the direct dependents of `source_id`, in collection order.
pub fn direct_dependent_ids(foods: &[Food], source_id: FoodId) -> Vec<FoodId> {
    find_direct_dependents(foods, source_id)
        .into_iter()
        .map(|f| f.id)
        .collect()
}

/// Walk the source chain starting at `proposed_source`, looking for `target`.
///
/// Returns the visited path ending in `target` when making `target` derive
/// from `proposed_source` would close a cycle. A self-reference yields a
/// single-element path.
pub fn find_cycle_path(
    foods: &[Food],
    proposed_source: FoodId,
    target: FoodId,
) -> Option<Vec<FoodId>> {
    if proposed_source == target {
        return Some(vec![target]);
    }

    let mut visited = HashSet::new();
    let mut path = Vec::new();
    let mut stack = vec![proposed_source];

    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }

        path.push(current);
        if current == target {
            return Some(path);
        }

        if let Some(next) = find_food(foods, current).and_then(Food::source_id) {
            stack.push(next);
        }
    }

    None
}

/// Whether adding the edge `target → proposed_source` would create a cycle.
pub fn would_create_cycle(foods: &[Food], proposed_source: FoodId, target: FoodId) -> bool {
    find_cycle_path(foods, proposed_source, target).is_some()
}

/// All checks a new calculation must pass.
///
/// The target and source must differ, the multiplier must be positive, the
/// source must exist with a finite product, and the edge must not close a
/// cycle.
pub fn is_calculation_valid(
    foods: &[Food],
    target_id: FoodId,
    source_id: FoodId,
    multiplier: f64,
) -> bool {
    target_id != source_id
        && is_valid_multiplier(multiplier)
        && find_food(foods, source_id).is_some_and(|s| (s.weight * multiplier).is_finite())
        && !would_create_cycle(foods, source_id, target_id)
}

/// Adjacency from each food to the foods derived from it.
///
/// Every food appears as a key. Edges whose source has been deleted are keyed
/// under the missing id as well.
pub fn dependency_graph(foods: &[Food]) -> BTreeMap<FoodId, Vec<FoodId>> {
    let mut graph: BTreeMap<FoodId, Vec<FoodId>> =
        foods.iter().map(|f| (f.id, Vec::new())).collect();

    for food in foods {
        if let Some(source) = food.source_id() {
            graph.entry(source).or_default().push(food.id);
        }
    }

    graph
}

/// `food_id` followed by its source, the source's source, and so on.
///
/// A deleted source is still listed, as the last id. Stops at an independent
/// food, a missing food, or a repeated id.
pub fn dependency_chain(foods: &[Food], food_id: FoodId) -> Vec<FoodId> {
    let mut chain = Vec::new();
    let mut seen = HashSet::new();
    let mut current = Some(food_id);

    while let Some(id) = current {
        if !seen.insert(id) {
            break;
        }
        chain.push(id);
        current = find_food(foods, id).and_then(Food::source_id);
    }

    chain
}

/// Number of calculation hops from `food_id` to the end of its chain.
///
/// A missing food or an independent food has depth 0; a food whose source was
/// deleted has depth 1.
pub fn dependency_depth(foods: &[Food], food_id: FoodId) -> usize {
    dependency_chain(foods, food_id).len().saturating_sub(1)
}

fn find_food(foods: &[Food], id: FoodId) -> Option<&Food> {
    foods.iter().find(|f| f.id == id)
}
