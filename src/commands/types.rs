use kubedmp::printers::render;
use kubedmp::registry::RESOURCE_TYPES;

pub fn run() -> anyhow::Result<()> {
    let mut types: Vec<_> = RESOURCE_TYPES.iter().collect();
    types.sort_by_key(|t| t.name);

    let rows = types
        .iter()
        .map(|t| {
            vec![
                t.name.to_string(),
                t.aliases.join(","),
                t.namespaced.to_string(),
                t.file_stem.to_string(),
            ]
        })
        .collect();
    println!("{}", render(&["KIND", "ALIASES", "NAMESPACED", "FILE"], rows));
    Ok(())
}
