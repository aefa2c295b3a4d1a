use chaosperm_core::{Result, all_maps};

pub fn run() -> Result<()> {
    let maps = all_maps();
    println!("{} built-in chaotic map(s):\n", maps.len());
    for map in &maps {
        let info = map.info();
        let params: Vec<String> = info
            .param_names
            .iter()
            .zip(info.default_params)
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        println!(
            "  {:<15} {:<4} {:<16} {}",
            info.name,
            info.dimension,
            params.join(", "),
            info.formula
        );
        println!("  {:<15} {}", "", info.description);
    }
    Ok(())
}
