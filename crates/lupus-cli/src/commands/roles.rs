use comfy_table::{ContentArrangement, Table};

pub fn run() -> Result<(), String> {
    let engine = super::engine();
    let registry = engine.registry();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Name", "Team", "Acts", "Order", "Uses", "Description"]);

    for def in registry.ordered() {
        let acts = if def.resolve.is_some() {
            def.acts_at_night.to_string()
        } else {
            "-".to_string()
        };
        table.add_row(vec![
            def.id.to_string(),
            def.name.to_string(),
            def.team.to_string(),
            acts,
            def.phase_order.to_string(),
            def.number_of_usage.to_string(),
            def.description.to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} roles", registry.len());
    Ok(())
}
