use chaosperm_core::{Result, Seed};

use crate::MapArgs;

pub fn run(args: &MapArgs, x0: f64, y0: f64, warmup: usize, n: usize, json: bool) -> Result<()> {
    let generator = super::make_generator(args)?;
    let seed = Seed::new(x0, y0);
    let permutation = generator.generate(seed, warmup, n)?;

    if json {
        let out = serde_json::json!({
            "map": generator.map().name(),
            "params": generator.map().params(),
            "seed": seed,
            "warmup": warmup,
            "n": n,
            "permutation": permutation,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let items: Vec<String> = permutation.as_slice().iter().map(|i| i.to_string()).collect();
    println!("{}", items.join(" "));
    Ok(())
}
