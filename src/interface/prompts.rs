use dialoguer::{Confirm, Select};
use strsim::jaro_winkler;

use crate::engine::constants::FUZZY_MATCH_THRESHOLD;
use crate::error::{PortionError, Result};
use crate::models::FoodId;
use crate::state::FoodLedger;

/// Foods whose names resemble `input`, best match first.
pub fn fuzzy_candidates(ledger: &FoodLedger, input: &str) -> Vec<(FoodId, String, f64)> {
    let needle = input.trim().to_lowercase();
    let mut candidates: Vec<(FoodId, String, f64)> = ledger
        .foods()
        .iter()
        .map(|f| (f.id, f.name.clone(), jaro_winkler(&f.name.to_lowercase(), &needle)))
        .filter(|(_, _, score)| *score > FUZZY_MATCH_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));
    candidates
}

/// Resolve a food reference without prompting: an existing id, or an exact
/// (case-insensitive) name.
pub fn find_food_ref(ledger: &FoodLedger, reference: &str) -> Option<FoodId> {
    let reference = reference.trim();
    let by_id = reference
        .strip_prefix('#')
        .unwrap_or(reference)
        .parse::<FoodId>()
        .ok()
        .filter(|id| ledger.food(*id).is_some());

    by_id.or_else(|| {
        ledger
            .foods()
            .iter()
            .find(|f| f.name.to_lowercase() == reference.to_lowercase())
            .map(|f| f.id)
    })
}

/// Resolve a food reference, asking the user to pick among fuzzy matches.
pub fn resolve_food(ledger: &FoodLedger, reference: &str) -> Result<FoodId> {
    if let Some(id) = find_food_ref(ledger, reference) {
        return Ok(id);
    }

    let candidates = fuzzy_candidates(ledger, reference);
    match candidates.as_slice() {
        [] => Err(PortionError::FoodNotFound(reference.to_string())),
        [(id, name, _)] => {
            let confirm = Confirm::new()
                .with_prompt(format!("Did you mean '{}'?", name))
                .default(true)
                .interact()?;
            if confirm {
                Ok(*id)
            } else {
                Err(PortionError::FoodNotFound(reference.to_string()))
            }
        }
        many => {
            let options: Vec<&(FoodId, String, f64)> = many.iter().take(5).collect();
            let mut labels: Vec<String> = options
                .iter()
                .map(|(id, name, _)| format!("#{} {}", id, name))
                .collect();
            labels.push("None of these".to_string());

            let selection = Select::new()
                .with_prompt("Which did you mean?")
                .items(&labels)
                .default(0)
                .interact()?;

            options
                .get(selection)
                .map(|(id, _, _)| *id)
                .ok_or_else(|| PortionError::FoodNotFound(reference.to_string()))
        }
    }
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_ledger() -> FoodLedger {
        let mut ledger = FoodLedger::new();
        for name in ["Brown rice", "Chicken curry", "Miso soup"] {
            let id = ledger.create_food();
            ledger.rename_food(id, name);
        }
        ledger
    }

    #[test]
    fn test_find_by_id_or_exact_name() {
        let ledger = sample_ledger();
        assert_eq!(find_food_ref(&ledger, "2"), Some(2));
        assert_eq!(find_food_ref(&ledger, "#3"), Some(3));
        assert_eq!(find_food_ref(&ledger, "miso SOUP"), Some(3));
        assert_eq!(find_food_ref(&ledger, "9"), None);
        assert_eq!(find_food_ref(&ledger, "pasta"), None);
    }

    #[test]
    fn test_fuzzy_candidates_rank_closest_first() {
        let ledger = sample_ledger();
        let candidates = fuzzy_candidates(&ledger, "brown rce");
        assert_eq!(candidates[0].0, 1);
        assert!(fuzzy_candidates(&ledger, "zzzz").is_empty());
    }
}
