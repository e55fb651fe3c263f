use std::fs;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use portion_ledger_rs::cli::{Cli, Command, DishCommand, SortKey};
use portion_ledger_rs::error::{PortionError, Result};
use portion_ledger_rs::interface::{
    display_dependency_tree, display_dish_list, display_food, display_food_list, display_history,
    display_stats, prompt_yes_no, resolve_food, should_trigger_undo, ConsoleNotifier,
};
use portion_ledger_rs::models::{format_weight, FoodId};
use portion_ledger_rs::state::{write_history_csv, CalculationOutcome, Session};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut notifier = ConsoleNotifier;
    let mut session = Session::open(&cli.file, &mut notifier);
    let command = cli.command.unwrap_or_default();
    info!(file = %cli.file.display(), ?command, "running command");

    let changed = match command {
        Command::List => {
            display_food_list(session.ledger());
            false
        }
        Command::Show { food } => {
            let id = resolve_food(session.ledger(), &food)?;
            if let Some(food) = session.ledger().food(id) {
                display_food(session.ledger(), food);
            }
            false
        }
        Command::New { name } => cmd_new(&mut session, name.as_deref()),
        Command::Rename { food, name } => {
            let id = resolve_food(session.ledger(), &food)?;
            let renamed = session.ledger_mut().rename_food(id, &name);
            if !renamed {
                println!("Name must not be empty.");
            }
            renamed
        }
        Command::Delete { food } => {
            let id = resolve_food(session.ledger(), &food)?;
            session.ledger_mut().delete_food(id)
        }
        Command::Clear => cmd_clear(&mut session, cli.yes)?,
        Command::Add { food, amount } => {
            let id = resolve_food(session.ledger(), &food)?;
            let changed = session.ledger_mut().add_weight(id, amount.as_str());
            report_weight_change(&session, id, changed)
        }
        Command::Sub { food, amount, dish } => {
            let id = resolve_food(session.ledger(), &food)?;
            let changed = match (amount, dish) {
                (_, Some(dish)) => session.subtract_dish(id, &dish)?,
                (Some(amount), None) => session.ledger_mut().subtract_weight(id, amount.as_str()),
                (None, None) => false,
            };
            report_weight_change(&session, id, changed)
        }
        Command::Calc {
            target,
            source,
            multiplier,
        } => {
            let target_id = resolve_food(session.ledger(), &target)?;
            let source_id = resolve_food(session.ledger(), &source)?;
            let outcome = session.ledger_mut().set_calculation(
                target_id,
                source_id,
                multiplier.as_str(),
                &mut notifier,
            );
            report_weight_change(&session, target_id, outcome == CalculationOutcome::Applied)
        }
        Command::Undo { food } => {
            let id = resolve_food(session.ledger(), &food)?;
            let undone = session.ledger_mut().undo(id);
            if !undone {
                println!("Nothing to undo.");
            }
            report_weight_change(&session, id, undone)
        }
        Command::Swipe { food, dx, ms } => {
            let id = resolve_food(session.ledger(), &food)?;
            if should_trigger_undo(dx, ms, session.ledger().can_undo(id)) {
                let undone = session.ledger_mut().undo(id);
                report_weight_change(&session, id, undone)
            } else {
                println!("Swipe ignored.");
                false
            }
        }
        Command::History { food, csv } => {
            let id = resolve_food(session.ledger(), &food)?;
            if let Some(food) = session.ledger().food(id) {
                display_history(food);
                if let Some(path) = csv {
                    write_history_csv(food, &path)?;
                    println!("History written to {}", path.display());
                }
            }
            false
        }
        Command::Tree => {
            display_dependency_tree(session.ledger());
            false
        }
        Command::Stats => {
            display_stats(&session.stats());
            false
        }
        Command::Dish { command } => cmd_dish(&mut session, command)?,
        Command::Theme { theme } => match theme {
            Some(theme) => {
                session.set_theme(theme);
                println!("Theme set to {}.", theme);
                true
            }
            None => {
                println!("{}", session.theme());
                false
            }
        },
        Command::Export { path } => {
            let json = session.export_json()?;
            match path {
                Some(path) => {
                    fs::write(&path, json)?;
                    println!("Exported to {}", path.display());
                }
                None => println!("{}", json),
            }
            false
        }
        Command::Import { path } => {
            let content = fs::read_to_string(&path)?;
            session.import_json(&content)?;
            println!("Imported {} foods.", session.ledger().len());
            true
        }
    };

    if changed && session.persist(&mut notifier) {
        info!(file = %session.path().display(), "state saved");
    }

    Ok(())
}

/// Print the food's new weight, or note that nothing changed.
fn report_weight_change(session: &Session, id: FoodId, changed: bool) -> bool {
    match session.ledger().food(id) {
        Some(food) if changed => println!("{}: {}", food.name, food.display_weight()),
        Some(food) => println!("{} unchanged ({}).", food.name, food.display_weight()),
        None => {}
    }
    changed
}

fn cmd_new(session: &mut Session, name: Option<&str>) -> bool {
    let id = session.ledger_mut().create_food();
    if let Some(name) = name {
        session.ledger_mut().rename_food(id, name);
    }
    if let Some(food) = session.ledger().food(id) {
        println!("Created #{} {}", food.id, food.name);
    }
    true
}

fn cmd_clear(session: &mut Session, yes: bool) -> Result<bool> {
    if !yes && !prompt_yes_no("Delete all foods and dish presets?", false)? {
        return Ok(false);
    }
    session.clear_all_data();
    println!("All data cleared.");
    Ok(true)
}

fn cmd_dish(session: &mut Session, command: DishCommand) -> Result<bool> {
    let shelf = session.dishes_mut();
    let changed = match command {
        DishCommand::List => {
            display_dish_list(shelf);
            false
        }
        DishCommand::Add { name, weight } => {
            shelf.add(&name, weight)?;
            println!("Added dish '{}'.", name.trim());
            true
        }
        DishCommand::Edit {
            index,
            name,
            weight,
        } => {
            shelf.update(index, &name, weight)?;
            println!("Updated dish #{}.", index);
            true
        }
        DishCommand::Delete { index } => match shelf.delete(index) {
            Some(dish) => {
                println!("Deleted dish '{}' ({}).", dish.name, format_weight(dish.weight));
                true
            }
            None => return Err(PortionError::DishNotFound(format!("#{}", index))),
        },
        DishCommand::Defaults => {
            let added = shelf.add_defaults();
            println!("Added {} default dishes.", added);
            added > 0
        }
        DishCommand::Sort { by, desc } => {
            match by {
                SortKey::Weight => shelf.sort_by_weight(!desc),
                SortKey::Name => shelf.sort_by_name(!desc),
            }
            display_dish_list(shelf);
            true
        }
    };
    Ok(changed)
}
