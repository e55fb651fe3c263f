use std::collections::HashSet;

use tracing::{debug, warn};

use crate::engine::coerce::{safe_parse_multiplier, safe_parse_weight, NumericInput};
use crate::engine::constants::{CIRCULAR_REFERENCE_WARNING, FOOD_NAME_PREFIX};
use crate::engine::graph::{direct_dependent_ids, find_cycle_path, is_calculation_valid};
use crate::models::{Calculation, Food, FoodId, HistoryEntry, HistoryKind};
use crate::state::Notifier;

/// Result of a `set_calculation` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculationOutcome {
    /// The target now derives its weight from the source.
    Applied,
    /// Refused by validation; the notifier was warned and nothing changed.
    Rejected,
    /// Target or source does not exist; nothing changed.
    Ignored,
}

/// A food another food could derive from.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationOption {
    pub id: FoodId,
    pub name: String,
    pub weight: f64,
}

/// Owns the foods, their history, and the calculation edges between them.
///
/// Lookups by id are soft: operations on a missing id do nothing.
#[derive(Debug, Clone)]
pub struct FoodLedger {
    /// Foods in creation order.
    foods: Vec<Food>,
    next_id: FoodId,
}

impl Default for FoodLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl FoodLedger {
    /// An empty ledger whose first food gets id 1.
    pub fn new() -> Self {
        Self {
            foods: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuild a ledger from persisted foods.
    ///
    /// `next_id` is raised past the largest stored id so ids are never reused.
    pub fn from_parts(foods: Vec<Food>, next_id: FoodId) -> Self {
        let floor = foods.iter().map(|f| f.id + 1).max().unwrap_or(1);
        Self {
            foods,
            next_id: next_id.max(floor),
        }
    }

    /// Get a food by id.
    pub fn food(&self, id: FoodId) -> Option<&Food> {
        self.foods.iter().find(|f| f.id == id)
    }

    fn food_mut(&mut self, id: FoodId) -> Option<&mut Food> {
        self.foods.iter_mut().find(|f| f.id == id)
    }

    /// All foods in creation order.
    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    /// Id the next created food will receive.
    pub fn next_id(&self) -> FoodId {
        self.next_id
    }

    /// Count of foods in the ledger.
    pub fn len(&self) -> usize {
        self.foods.len()
    }

    /// Check if the ledger has no foods.
    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    /// Append an empty food and return its id.
    ///
    /// The placeholder name counts foods currently present, not ids, so two
    /// foods may share a placeholder after a deletion.
    pub fn create_food(&mut self) -> FoodId {
        let id = self.next_id;
        self.next_id += 1;

        let name = format!("{} {}", FOOD_NAME_PREFIX, self.foods.len() + 1);
        debug!(food_id = id, name = %name, "created food");
        self.foods.push(Food::new(id, name));
        id
    }

    /// Set a food's name to the trimmed input. Blank names are ignored.
    pub fn rename_food(&mut self, id: FoodId, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return false;
        }
        match self.food_mut(id) {
            Some(food) => {
                food.name = trimmed.to_string();
                true
            }
            None => false,
        }
    }

    /// Remove a food. Dependents keep their (now dangling) calculation and
    /// stop being recalculated.
    pub fn delete_food(&mut self, id: FoodId) -> bool {
        let before = self.foods.len();
        self.foods.retain(|f| f.id != id);
        let removed = self.foods.len() != before;
        if removed {
            debug!(food_id = id, "deleted food");
        }
        removed
    }

    /// Remove every food. The id counter keeps counting.
    pub fn clear_all_foods(&mut self) {
        self.foods.clear();
    }

    /// Add grams to a food, turning it independent.
    ///
    /// Returns false (and records nothing) for a missing food, an amount
    /// that coerces to 0, or a result too large to store.
    pub fn add_weight<A: NumericInput>(&mut self, id: FoodId, amount: A) -> bool {
        self.apply_manual(id, HistoryKind::Add, safe_parse_weight(&amount))
    }

    /// Subtract grams from a food, turning it independent.
    pub fn subtract_weight<A: NumericInput>(&mut self, id: FoodId, amount: A) -> bool {
        self.apply_manual(id, HistoryKind::Subtract, safe_parse_weight(&amount))
    }

    fn apply_manual(&mut self, id: FoodId, kind: HistoryKind, amount: f64) -> bool {
        if amount == 0.0 {
            return false;
        }
        let Some(food) = self.food_mut(id) else {
            return false;
        };

        let new_weight = match kind {
            HistoryKind::Subtract => food.weight - amount,
            _ => food.weight + amount,
        };
        if !new_weight.is_finite() {
            warn!(food_id = id, amount, "weight change out of range, ignored");
            return false;
        }

        let snapshot = food.snapshot();
        food.state_history.push(snapshot);
        food.weight = new_weight;
        food.calculation = None;
        food.history.push(HistoryEntry::manual(kind, amount));
        debug!(
            food_id = id,
            kind = kind.label(),
            amount,
            weight = new_weight,
            "manual weight change"
        );

        self.recalculate_dependents(id);
        true
    }

    /// Make `target_id` weigh `source weight × multiplier` from now on.
    ///
    /// The multiplier goes through the same lenient parse as weights, so text
    /// that is not a number becomes 0 and is refused along with zero,
    /// negative, self-referencing, cyclic and overflowing calculations.
    pub fn set_calculation<M: NumericInput>(
        &mut self,
        target_id: FoodId,
        source_id: FoodId,
        multiplier: M,
        notifier: &mut dyn Notifier,
    ) -> CalculationOutcome {
        let (source_weight, source_name) = match (self.food(target_id), self.food(source_id)) {
            (Some(_), Some(source)) => (source.weight, source.name.clone()),
            _ => return CalculationOutcome::Ignored,
        };

        let multiplier = safe_parse_multiplier(&multiplier);
        if !is_calculation_valid(&self.foods, target_id, source_id, multiplier) {
            warn!(
                target_id,
                source_id,
                multiplier,
                cycle = ?find_cycle_path(&self.foods, source_id, target_id),
                "calculation rejected"
            );
            notifier.warn(CIRCULAR_REFERENCE_WARNING);
            return CalculationOutcome::Rejected;
        }

        let result = source_weight * multiplier;
        let Some(target) = self.food_mut(target_id) else {
            return CalculationOutcome::Ignored;
        };
        let snapshot = target.snapshot();
        target.state_history.push(snapshot);
        target.calculation = Some(Calculation {
            source_id,
            multiplier,
        });
        target.weight = result;
        target.history.push(HistoryEntry::derived(
            HistoryKind::Calculation,
            result,
            &source_name,
            multiplier,
        ));
        debug!(target_id, source_id, multiplier, weight = result, "calculation applied");

        self.recalculate_dependents(target_id);
        CalculationOutcome::Applied
    }

    /// Propagate a weight change to every affected dependent.
    ///
    /// Dependents whose weight comes out unchanged are left alone and their
    /// own dependents are not visited. Each food is updated at most once.
    fn recalculate_dependents(&mut self, changed_id: FoodId) {
        let mut updated = HashSet::from([changed_id]);
        let mut pending = vec![changed_id];

        while let Some(source_id) = pending.pop() {
            let Some(source) = self.food(source_id) else {
                continue;
            };
            let source_weight = source.weight;
            let source_name = source.name.clone();

            for dependent_id in direct_dependent_ids(&self.foods, source_id) {
                if updated.contains(&dependent_id) {
                    warn!(food_id = dependent_id, "dependency loop in stored data, skipping");
                    continue;
                }
                let Some(dependent) = self.food_mut(dependent_id) else {
                    continue;
                };
                let Some(calc) = dependent.calculation else {
                    continue;
                };

                let new_weight = source_weight * calc.multiplier;
                if new_weight == dependent.weight {
                    continue;
                }
                if !new_weight.is_finite() {
                    warn!(
                        food_id = dependent_id,
                        source_id,
                        "recalculated weight out of range, kept"
                    );
                    continue;
                }

                let snapshot = dependent.snapshot();
                dependent.state_history.push(snapshot);
                dependent.weight = new_weight;
                dependent.history.push(HistoryEntry::derived(
                    HistoryKind::AutoRecalculation,
                    new_weight,
                    &source_name,
                    calc.multiplier,
                ));
                debug!(
                    food_id = dependent_id,
                    source_id,
                    weight = new_weight,
                    "recalculated dependent"
                );

                updated.insert(dependent_id);
                pending.push(dependent_id);
            }
        }
    }

    /// Revert the most recent operation on a food and re-derive its dependents.
    ///
    /// Without a snapshot to pop the food falls back to its initial state.
    pub fn undo(&mut self, id: FoodId) -> bool {
        let Some(food) = self.food_mut(id) else {
            return false;
        };
        if food.history.pop().is_none() {
            return false;
        }

        match food.state_history.pop() {
            Some(snapshot) => food.restore(&snapshot),
            None => {
                food.weight = 0.0;
                food.calculation = None;
            }
        }
        debug!(food_id = id, weight = food.weight, "undo");

        self.recalculate_dependents(id);
        true
    }

    /// Whether `undo` would do anything for this food.
    pub fn can_undo(&self, id: FoodId) -> bool {
        self.food(id).map(Food::can_undo).unwrap_or(false)
    }

    /// Foods whose weight is derived from another food.
    pub fn foods_with_calculation(&self) -> Vec<&Food> {
        self.foods.iter().filter(|f| f.is_derived()).collect()
    }

    /// Every food except `exclude_id`, as candidate calculation sources.
    pub fn calculation_options(&self, exclude_id: FoodId) -> Vec<CalculationOption> {
        self.foods
            .iter()
            .filter(|f| f.id != exclude_id)
            .map(|f| CalculationOption {
                id: f.id,
                name: f.name.clone(),
                weight: f.weight,
            })
            .collect()
    }

    /// Sum of all food weights.
    pub fn total_weight(&self) -> f64 {
        self.foods.iter().map(|f| f.weight).sum()
    }

    /// Clone the foods for serialization.
    pub fn to_foods(&self) -> Vec<Food> {
        self.foods.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger_with(weights: &[f64]) -> (FoodLedger, Vec<FoodId>) {
        let mut ledger = FoodLedger::new();
        let ids = weights
            .iter()
            .map(|&w| {
                let id = ledger.create_food();
                ledger.add_weight(id, w);
                id
            })
            .collect();
        (ledger, ids)
    }

    #[test]
    fn test_create_food_names_follow_collection_size() {
        let mut ledger = FoodLedger::new();
        let a = ledger.create_food();
        let b = ledger.create_food();
        ledger.delete_food(a);
        let c = ledger.create_food();

        assert_eq!((a, b, c), (1, 2, 3));
        assert_eq!(ledger.food(b).unwrap().name, "Food 2");
        assert_eq!(ledger.food(c).unwrap().name, "Food 2");
        assert_eq!(ledger.next_id(), 4);
    }

    #[test]
    fn test_rename_trims_and_rejects_blank() {
        let mut ledger = FoodLedger::new();
        let id = ledger.create_food();

        assert!(ledger.rename_food(id, "  Rice  "));
        assert_eq!(ledger.food(id).unwrap().name, "Rice");

        assert!(!ledger.rename_food(id, "   "));
        assert_eq!(ledger.food(id).unwrap().name, "Rice");

        assert!(!ledger.rename_food(99, "Ghost"));
    }

    #[test]
    fn test_subtract_can_go_negative() {
        let (mut ledger, ids) = ledger_with(&[50.0]);
        ledger.subtract_weight(ids[0], "80");
        assert_eq!(ledger.food(ids[0]).unwrap().weight, -30.0);
        assert_eq!(ledger.food(ids[0]).unwrap().history.len(), 2);
    }

    #[test]
    fn test_missing_ids_are_no_ops() {
        let mut ledger = FoodLedger::new();
        let mut warnings: Vec<String> = Vec::new();

        assert!(!ledger.add_weight(5, 10.0));
        assert!(!ledger.subtract_weight(5, 10.0));
        assert!(!ledger.undo(5));
        assert!(!ledger.delete_food(5));
        assert_eq!(
            ledger.set_calculation(5, 6, 1.0, &mut warnings),
            CalculationOutcome::Ignored
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_missing_source_is_ignored_without_warning() {
        let (mut ledger, ids) = ledger_with(&[100.0]);
        let mut warnings: Vec<String> = Vec::new();

        let outcome = ledger.set_calculation(ids[0], 42, 2.0, &mut warnings);
        assert_eq!(outcome, CalculationOutcome::Ignored);
        assert!(warnings.is_empty());
        assert_eq!(ledger.food(ids[0]).unwrap().history.len(), 1);
    }

    #[test]
    fn test_invalid_multiplier_is_rejected() {
        let (mut ledger, ids) = ledger_with(&[100.0, 0.0]);
        let mut warnings: Vec<String> = Vec::new();

        for bad in ["abc", "0", "-1"] {
            let outcome = ledger.set_calculation(ids[1], ids[0], bad, &mut warnings);
            assert_eq!(outcome, CalculationOutcome::Rejected);
        }
        assert_eq!(warnings.len(), 3);
        assert!(ledger.food(ids[1]).unwrap().history.is_empty());
        assert!(ledger.food(ids[1]).unwrap().calculation.is_none());
    }

    #[test]
    fn test_calculation_keeps_full_precision() {
        let (mut ledger, ids) = ledger_with(&[33.0, 0.0]);
        let mut warnings: Vec<String> = Vec::new();

        ledger.set_calculation(ids[1], ids[0], "0.5", &mut warnings);
        let derived = ledger.food(ids[1]).unwrap();
        assert_eq!(derived.weight, 16.5);
        assert_eq!(derived.display_weight(), "17g");
    }

    #[test]
    fn test_unchanged_dependent_is_not_touched() {
        let (mut ledger, ids) = ledger_with(&[100.0, 0.0, 100.0]);
        let mut warnings: Vec<String> = Vec::new();
        ledger.set_calculation(ids[1], ids[0], 1.0, &mut warnings);
        assert_eq!(ledger.food(ids[1]).unwrap().history.len(), 1);

        // the source becomes derived but keeps weighing 100
        ledger.set_calculation(ids[0], ids[2], 1.0, &mut warnings);
        let derived = ledger.food(ids[1]).unwrap();
        assert_eq!(derived.weight, 100.0);
        assert_eq!(derived.history.len(), 1);
        assert_eq!(derived.state_history.len(), 1);
    }

    #[test]
    fn test_undo_without_snapshot_resets_to_initial_state() {
        let (mut ledger, ids) = ledger_with(&[75.0]);
        let food = ledger.food_mut(ids[0]).unwrap();
        food.state_history.clear();

        assert!(ledger.undo(ids[0]));
        let food = ledger.food(ids[0]).unwrap();
        assert_eq!(food.weight, 0.0);
        assert!(food.calculation.is_none());
        assert!(!ledger.can_undo(ids[0]));
        assert!(!ledger.undo(ids[0]));
    }

    #[test]
    fn test_deleted_source_freezes_dependent() {
        let (mut ledger, ids) = ledger_with(&[100.0, 0.0]);
        let mut warnings: Vec<String> = Vec::new();
        ledger.set_calculation(ids[1], ids[0], 2.0, &mut warnings);

        ledger.delete_food(ids[0]);
        let derived = ledger.food(ids[1]).unwrap();
        assert_eq!(derived.weight, 200.0);
        assert_eq!(derived.source_id(), Some(ids[0]));

        // a manual change detaches it
        ledger.add_weight(ids[1], 5.0);
        assert!(ledger.food(ids[1]).unwrap().calculation.is_none());
    }

    #[test]
    fn test_cascade_survives_stored_loop() {
        // A and B derive from each other, as a hand-edited file could have it
        let mut a = Food::new(1, "A");
        a.weight = 1.0;
        a.calculation = Some(Calculation {
            source_id: 2,
            multiplier: 2.0,
        });
        let snapshot = a.snapshot();
        a.state_history.push(snapshot);
        a.history.push(HistoryEntry::manual(HistoryKind::Add, 1.0));
        a.weight = 0.0;

        let mut b = Food::new(2, "B");
        b.calculation = Some(Calculation {
            source_id: 1,
            multiplier: 2.0,
        });
        let mut ledger = FoodLedger::from_parts(vec![a, b], 1);

        assert!(ledger.undo(1));
        assert_eq!(ledger.food(1).unwrap().weight, 1.0);
        assert_eq!(ledger.food(2).unwrap().weight, 2.0);
    }

    #[test]
    fn test_overflowing_manual_change_is_ignored() {
        let (mut ledger, ids) = ledger_with(&[1e308]);

        assert!(!ledger.add_weight(ids[0], "1e308"));
        assert!(!ledger.subtract_weight(ids[0], -1e308));

        let food = ledger.food(ids[0]).unwrap();
        assert_eq!(food.weight, 1e308);
        assert_eq!(food.history.len(), 1);
        assert_eq!(food.state_history.len(), 1);
    }

    #[test]
    fn test_overflowing_calculation_is_rejected() {
        let (mut ledger, ids) = ledger_with(&[1e300, 5.0]);
        let mut warnings: Vec<String> = Vec::new();

        let outcome = ledger.set_calculation(ids[1], ids[0], 1e10, &mut warnings);

        assert_eq!(outcome, CalculationOutcome::Rejected);
        assert_eq!(warnings.len(), 1);
        let food = ledger.food(ids[1]).unwrap();
        assert_eq!(food.weight, 5.0);
        assert!(food.calculation.is_none());
    }

    #[test]
    fn test_overflowing_dependent_keeps_its_weight() {
        let (mut ledger, ids) = ledger_with(&[1e300, 0.0]);
        let mut warnings: Vec<String> = Vec::new();
        ledger.set_calculation(ids[1], ids[0], 1e8, &mut warnings);
        let before = ledger.food(ids[1]).unwrap().weight;
        assert!(before.is_finite());

        // the source itself is still in range, its dependent would not be
        assert!(ledger.add_weight(ids[0], 1e300));
        assert!(ledger.food(ids[0]).unwrap().weight.is_finite());

        let dependent = ledger.food(ids[1]).unwrap();
        assert_eq!(dependent.weight, before);
        assert_eq!(dependent.history.len(), 1);
        assert!(ledger.foods().iter().all(|f| f.weight.is_finite()));
    }

    #[test]
    fn test_from_parts_raises_next_id() {
        let ledger = FoodLedger::from_parts(vec![Food::new(7, "Rice")], 3);
        assert_eq!(ledger.next_id(), 8);

        let ledger = FoodLedger::from_parts(Vec::new(), 12);
        assert_eq!(ledger.next_id(), 12);
    }

    #[test]
    fn test_queries() {
        let (mut ledger, ids) = ledger_with(&[100.0, 0.0, 20.0]);
        let mut warnings: Vec<String> = Vec::new();
        ledger.set_calculation(ids[1], ids[0], 0.5, &mut warnings);

        assert_eq!(ledger.total_weight(), 170.0);
        assert_eq!(ledger.foods_with_calculation().len(), 1);

        let options = ledger.calculation_options(ids[1]);
        let option_ids: Vec<FoodId> = options.iter().map(|o| o.id).collect();
        assert_eq!(option_ids, vec![ids[0], ids[2]]);
    }
}
