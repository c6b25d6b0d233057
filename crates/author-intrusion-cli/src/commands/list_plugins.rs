//! List plugins command implementation.

use author_intrusion_plugins::builtin_registry;

/// Runs the list-plugins command.
pub fn run() {
    println!("Available plugins:\n");
    println!("{:<25} Description", "Plugin");
    println!("{}", "-".repeat(80));

    for (id, plugin) in builtin_registry().iter() {
        println!("{:<25} {}", id, plugin.description());
    }

    println!("\nReference a plugin from an analysis in project.aipj, e.g.:");
    println!(r#"  {{ "name": "length", "plugin": "line-length", "max": 100 }}"#);
}
