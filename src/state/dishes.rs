use std::cmp::Ordering;

use crate::engine::coerce::{safe_parse_weight, NumericInput};
use crate::engine::constants::DEFAULT_DISHES;
use crate::error::{PortionError, Result};
use crate::models::Dish;

/// A dish as offered in a selection list.
#[derive(Debug, Clone, PartialEq)]
pub struct DishOption {
    pub index: usize,
    pub name: String,
    pub weight: f64,
    pub display_text: String,
}

/// Ordered list of tare presets with case-insensitively unique names.
#[derive(Debug, Clone, Default)]
pub struct DishShelf {
    dishes: Vec<Dish>,
}

impl DishShelf {
    pub fn new(dishes: Vec<Dish>) -> Self {
        Self { dishes }
    }

    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Dish> {
        self.dishes.get(index)
    }

    /// Add a preset. The name is trimmed; the weight must be positive.
    pub fn add<W: NumericInput>(&mut self, name: &str, weight: W) -> Result<()> {
        let dish = Self::checked(name, weight)?;
        if self.find_by_name(&dish.name).is_some() {
            return Err(PortionError::DuplicateDish(dish.name));
        }
        self.dishes.push(dish);
        Ok(())
    }

    /// Replace the preset at `index`, keeping names unique among the others.
    pub fn update<W: NumericInput>(&mut self, index: usize, name: &str, weight: W) -> Result<()> {
        if index >= self.dishes.len() {
            return Err(PortionError::DishNotFound(format!("#{}", index)));
        }
        let dish = Self::checked(name, weight)?;
        let taken = self
            .dishes
            .iter()
            .enumerate()
            .any(|(i, d)| i != index && d.has_name(&dish.name));
        if taken {
            return Err(PortionError::DuplicateDish(dish.name));
        }
        self.dishes[index] = dish;
        Ok(())
    }

    /// Remove the preset at `index`. Out-of-range indices are ignored.
    pub fn delete(&mut self, index: usize) -> Option<Dish> {
        (index < self.dishes.len()).then(|| self.dishes.remove(index))
    }

    pub fn clear(&mut self) {
        self.dishes.clear();
    }

    /// Find a preset by name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&Dish> {
        let name = name.trim();
        self.dishes.iter().find(|d| d.has_name(name))
    }

    pub fn sort_by_weight(&mut self, ascending: bool) {
        self.dishes.sort_by(|a, b| {
            let ord = a.weight.partial_cmp(&b.weight).unwrap_or(Ordering::Equal);
            if ascending { ord } else { ord.reverse() }
        });
    }

    pub fn sort_by_name(&mut self, ascending: bool) {
        self.dishes.sort_by(|a, b| {
            let ord = a.name.to_lowercase().cmp(&b.name.to_lowercase());
            if ascending { ord } else { ord.reverse() }
        });
    }

    /// Install the built-in presets, skipping names already present.
    ///
    /// Returns how many were added.
    pub fn add_defaults(&mut self) -> usize {
        let mut added = 0;
        for (name, weight) in DEFAULT_DISHES {
            if self.find_by_name(name).is_none() {
                self.dishes.push(Dish::new(name, weight));
                added += 1;
            }
        }
        added
    }

    /// Presets with their index and a display label.
    pub fn options(&self) -> Vec<DishOption> {
        self.dishes
            .iter()
            .enumerate()
            .map(|(index, d)| DishOption {
                index,
                name: d.name.clone(),
                weight: d.weight,
                display_text: d.display_text(),
            })
            .collect()
    }

    /// Every preset has a non-empty name and a positive weight.
    pub fn is_valid(&self) -> bool {
        self.dishes.iter().all(Dish::is_valid)
    }

    pub fn to_dishes(&self) -> Vec<Dish> {
        self.dishes.clone()
    }

    fn checked<W: NumericInput>(name: &str, weight: W) -> Result<Dish> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PortionError::InvalidInput("dish name is empty".to_string()));
        }
        let weight = safe_parse_weight(&weight);
        if weight <= 0.0 {
            return Err(PortionError::InvalidInput(format!(
                "dish weight must be positive, got {}",
                weight
            )));
        }
        Ok(Dish::new(name, weight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_shelf() -> DishShelf {
        DishShelf::new(vec![
            Dish::new("Cup", 90.0),
            Dish::new("bowl", 180.0),
            Dish::new("Plate", 150.0),
        ])
    }

    #[test]
    fn test_add_validates() {
        let mut shelf = DishShelf::default();
        assert!(shelf.add("  Tray  ", "300").is_ok());
        assert_eq!(shelf.get(0).unwrap().name, "Tray");

        assert!(matches!(shelf.add("", 10.0), Err(PortionError::InvalidInput(_))));
        assert!(matches!(shelf.add("Lid", 0.0), Err(PortionError::InvalidInput(_))));
        assert!(matches!(shelf.add("Lid", "abc"), Err(PortionError::InvalidInput(_))));
        assert!(matches!(shelf.add("TRAY", 5.0), Err(PortionError::DuplicateDish(_))));
        assert_eq!(shelf.len(), 1);
    }

    #[test]
    fn test_update_allows_own_name() {
        let mut shelf = sample_shelf();
        assert!(shelf.update(0, "CUP", 95.0).is_ok());
        assert_eq!(shelf.get(0).unwrap().weight, 95.0);

        assert!(matches!(shelf.update(0, "Bowl", 95.0), Err(PortionError::DuplicateDish(_))));
        assert!(matches!(shelf.update(9, "Pan", 95.0), Err(PortionError::DishNotFound(_))));
    }

    #[test]
    fn test_delete_out_of_range_is_ignored() {
        let mut shelf = sample_shelf();
        assert!(shelf.delete(7).is_none());
        assert_eq!(shelf.delete(1).unwrap().name, "bowl");
        assert_eq!(shelf.len(), 2);
    }

    #[test]
    fn test_sorting() {
        let mut shelf = sample_shelf();
        shelf.sort_by_weight(true);
        let names: Vec<&str> = shelf.dishes().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Cup", "Plate", "bowl"]);

        shelf.sort_by_name(false);
        let names: Vec<&str> = shelf.dishes().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Plate", "Cup", "bowl"]);
    }

    #[test]
    fn test_add_defaults_skips_existing() {
        let mut shelf = sample_shelf();
        // "Cup" and "bowl" are already there
        assert_eq!(shelf.add_defaults(), 4);
        assert_eq!(shelf.len(), 7);
        assert_eq!(shelf.add_defaults(), 0);
        assert!(shelf.is_valid());
    }

    #[test]
    fn test_options() {
        let options = sample_shelf().options();
        assert_eq!(options[2].index, 2);
        assert_eq!(options[2].display_text, "Plate 150g");
    }
}
