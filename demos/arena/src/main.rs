//! Arena demo
//!
//! Builds a small synthetic equipment catalog, then asks BuildForge for
//! the tankiest loadouts that a 40-point strength budget allows.
//!
//! Run with `RUST_LOG=buildforge_solver=debug` to watch the partition
//! driver at work.

use buildforge::prelude::*;
use buildforge::{RawCatalog, RawItem, Slot};
use tracing_subscriber::EnvFilter;

/// A few items per slot: heavier pieces give more hp and defense but
/// consume more of the strength budget.
fn sample_catalog() -> SlotCatalog {
    let mut raw = RawCatalog::new();
    let mut add = |slot: Slot, name: &str, hp: i64, defense: i64, strength: i64| {
        raw.push(
            slot,
            RawItem::new(
                name,
                vec![
                    ("hp".to_string(), hp),
                    ("defense".to_string(), defense),
                    ("strength".to_string(), strength),
                ],
            ),
        );
    };

    add(Slot::Weapon, "Training Sword", 10, 0, 2);
    add(Slot::Weapon, "War Hammer", 25, 2, 9);
    add(Slot::Helmet, "Iron Helmet", 12, 5, 3);
    add(Slot::Helmet, "Steel Helmet", 18, 8, 6);
    add(Slot::Helmet, "Golden Helmet", 14, 6, 4);
    add(Slot::Chestplate, "Leather Armor", 20, 15, 2);
    add(Slot::Chestplate, "Chainmail Armor", 30, 25, 7);
    add(Slot::Chestplate, "Plate Armor", 45, 40, 12);
    add(Slot::Leggings, "Cloth Leggings", 6, 3, 0);
    add(Slot::Leggings, "Iron Leggings", 16, 12, 6);
    add(Slot::Boots, "Cloth Boots", 4, 2, 0);
    add(Slot::Boots, "Iron Boots", 12, 10, 5);
    add(Slot::Ring, "Silver Ring", 5, 1, 0);
    add(Slot::Ring, "Gold Ring", 9, 2, 1);
    add(Slot::Ring, "Platinum Ring", 14, 3, 2);
    add(Slot::Bracelet, "Silver Bracelet", 4, 1, 0);
    add(Slot::Bracelet, "Gold Bracelet", 8, 3, 1);
    add(Slot::Necklace, "Silver Necklace", 5, 1, 0);
    add(Slot::Necklace, "Gold Necklace", 10, 4, 1);

    SlotCatalog::from_raw(raw)
}

fn main() -> buildforge::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let catalog = sample_catalog();

    let mut config = BuildForgeConfig::new().with_top_k(5).with_combined_cap(None);
    config.budget.resources.clear();
    config.budget.push_resource("strength", 40);

    let spec = ScoreSpec::maximize("hp").with_minimum("defense", 60);
    let outcome = buildforge::run_with_config(&catalog, &spec, &config)?;

    println!(
        "Explored {} builds ({} pruned subtrees), {} qualified:\n",
        outcome.statistics.leaves_evaluated,
        outcome.statistics.subtrees_pruned,
        outcome.statistics.qualifying_builds(),
    );
    for (rank, build) in outcome.builds.iter().enumerate() {
        println!("#{} score {}", rank + 1, build.score);
        println!("   {}", build.name);
        let stats: Vec<String> = build
            .stats
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect();
        println!("   {}\n", stats.join(", "));
    }
    if outcome.is_empty() {
        println!("No build satisfies the requirements under this budget.");
    }

    Ok(())
}
