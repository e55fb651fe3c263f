pub mod gesture;
pub mod prompts;
pub mod render;

pub use gesture::{classify_swipe, should_trigger_undo, SwipeDirection};
pub use prompts::{find_food_ref, fuzzy_candidates, prompt_yes_no, resolve_food};
pub use render::{
    dependency_tree_lines, display_dependency_tree, display_dish_list, display_food,
    display_food_list, display_history, display_stats, food_card_lines, ConsoleNotifier,
};
