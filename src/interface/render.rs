use crate::engine::graph::{dependency_chain, dependency_graph};
use crate::models::{format_weight, Food, FoodId};
use crate::state::{AppStats, DishShelf, FoodLedger, Notifier};

/// Prints warnings to stderr.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn warn(&mut self, message: &str) {
        eprintln!("Warning: {}", message);
    }
}

/// Lines describing one food card.
pub fn food_card_lines(ledger: &FoodLedger, food: &Food) -> Vec<String> {
    let mut lines = vec![format!(
        "#{} {} - {}",
        food.id,
        food.name,
        food.display_weight()
    )];

    if let Some(calc) = food.calculation {
        match ledger.food(calc.source_id) {
            Some(source) => lines.push(format!(
                "    = {} × {} ({})",
                source.name,
                calc.multiplier,
                source.display_weight()
            )),
            None => lines.push(format!(
                "    = #{} × {} (source deleted, weight frozen)",
                calc.source_id, calc.multiplier
            )),
        }

        let chain = dependency_chain(ledger.foods(), food.id);
        if chain.len() > 2 {
            let names: Vec<String> = chain
                .iter()
                .map(|id| match ledger.food(*id) {
                    Some(f) => f.name.clone(),
                    None => format!("#{}", id),
                })
                .collect();
            lines.push(format!("    via {}", names.join(" ← ")));
        }
    }

    if let Some(last) = food.history.last() {
        lines.push(format!(
            "    last: {} at {} ({} in history)",
            last.describe(),
            last.timestamp,
            food.history.len()
        ));
    }

    lines
}

/// Display every food card.
pub fn display_food_list(ledger: &FoodLedger) {
    if ledger.is_empty() {
        println!("No foods yet. Use 'new' to add one.");
        return;
    }

    println!();
    println!("=== Foods ({} items, {}) ===", ledger.len(), format_weight(ledger.total_weight()));
    println!();

    for food in ledger.foods() {
        for line in food_card_lines(ledger, food) {
            println!("{}", line);
        }
    }

    println!();
}

/// Display one food card followed by the sources it could derive from.
pub fn display_food(ledger: &FoodLedger, food: &Food) {
    for line in food_card_lines(ledger, food) {
        println!("{}", line);
    }

    let options = ledger.calculation_options(food.id);
    if !options.is_empty() {
        let labels: Vec<String> = options
            .iter()
            .map(|o| format!("#{} {} ({})", o.id, o.name, format_weight(o.weight)))
            .collect();
        println!("    sources: {}", labels.join(", "));
    }
}

/// Display a food's history, oldest first.
pub fn display_history(food: &Food) {
    if food.history.is_empty() {
        println!("{}: no history", food.name);
        return;
    }

    println!();
    println!("=== History of {} ===", food.name);
    println!();
    for (i, entry) in food.history.iter().enumerate() {
        println!("{:>3}. [{}] {}", i + 1, entry.timestamp, entry.describe());
    }
    println!();
}

/// Display the dish presets with their indices.
pub fn display_dish_list(shelf: &DishShelf) {
    if shelf.is_empty() {
        println!("No dish presets. Use 'dish add' or 'dish defaults'.");
        return;
    }

    for option in shelf.options() {
        println!("{:>3}. {}", option.index, option.display_text);
    }
}

/// Lines of the dependency forest, each derived food indented under its source.
pub fn dependency_tree_lines(ledger: &FoodLedger) -> Vec<String> {
    let graph = dependency_graph(ledger.foods());
    let mut lines = Vec::new();

    // roots: independent foods and foods whose source is gone
    let roots = ledger
        .foods()
        .iter()
        .filter(|f| f.source_id().and_then(|s| ledger.food(s)).is_none());

    for root in roots {
        let mut stack: Vec<(FoodId, usize)> = vec![(root.id, 0)];
        while let Some((id, depth)) = stack.pop() {
            let Some(food) = ledger.food(id) else {
                continue;
            };
            let multiplier = match (depth, food.calculation) {
                (0, _) | (_, None) => String::new(),
                (_, Some(calc)) => format!(" (× {})", calc.multiplier),
            };
            lines.push(format!(
                "{}{} {}{}",
                "  ".repeat(depth),
                food.name,
                food.display_weight(),
                multiplier
            ));

            if let Some(children) = graph.get(&id) {
                for child in children.iter().rev() {
                    stack.push((*child, depth + 1));
                }
            }
        }
    }

    lines
}

pub fn display_dependency_tree(ledger: &FoodLedger) {
    let lines = dependency_tree_lines(ledger);
    if lines.is_empty() {
        println!("No foods yet.");
        return;
    }
    for line in lines {
        println!("{}", line);
    }
}

pub fn display_stats(stats: &AppStats) {
    println!("Version:      {}", stats.version);
    println!("Foods:        {}", stats.food_count);
    println!("Dishes:       {}", stats.dish_count);
    println!("Total weight: {}", format_weight(stats.total_weight));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_ledger() -> (FoodLedger, FoodId, FoodId, FoodId) {
        let mut ledger = FoodLedger::new();
        let mut warnings: Vec<String> = Vec::new();
        let pot = ledger.create_food();
        let bowl = ledger.create_food();
        let kid = ledger.create_food();
        ledger.rename_food(pot, "Pot");
        ledger.rename_food(bowl, "Bowl");
        ledger.rename_food(kid, "Kid");
        ledger.add_weight(pot, 300.0);
        ledger.set_calculation(bowl, pot, 0.5, &mut warnings);
        ledger.set_calculation(kid, bowl, 0.5, &mut warnings);
        (ledger, pot, bowl, kid)
    }

    #[test]
    fn test_card_shows_source_and_chain() {
        let (ledger, _, _, kid) = sample_ledger();
        let lines = food_card_lines(&ledger, ledger.food(kid).unwrap());
        assert_eq!(lines[0], "#3 Kid - 75g");
        assert_eq!(lines[1], "    = Bowl × 0.5 (150g)");
        assert_eq!(lines[2], "    via Kid ← Bowl ← Pot");
    }

    #[test]
    fn test_card_marks_deleted_source() {
        let (mut ledger, pot, bowl, _) = sample_ledger();
        ledger.delete_food(pot);
        let lines = food_card_lines(&ledger, ledger.food(bowl).unwrap());
        assert!(lines[1].contains("source deleted"));
    }

    #[test]
    fn test_chain_lists_deleted_source_by_id() {
        let (mut ledger, pot, _, kid) = sample_ledger();
        ledger.delete_food(pot);
        let lines = food_card_lines(&ledger, ledger.food(kid).unwrap());
        assert_eq!(lines[2], "    via Kid ← Bowl ← #1");
    }

    #[test]
    fn test_dependency_tree() {
        let (ledger, _, _, _) = sample_ledger();
        let lines = dependency_tree_lines(&ledger);
        assert_eq!(lines, vec!["Pot 300g", "  Bowl 150g (× 0.5)", "    Kid 75g (× 0.5)"]);
    }
}
