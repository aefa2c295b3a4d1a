use std::time::Instant;

use chaosperm_core::{Result, random_seeds};
use chaosperm_tests::order_sweep;

use crate::MapArgs;

pub fn run(
    args: &MapArgs,
    warmup: usize,
    n_values: &str,
    seeds: usize,
    rng_seed: Option<u64>,
    output_path: Option<&str>,
) -> Result<()> {
    let generator = super::make_generator(args)?;
    let sizes = super::parse_n_values(n_values)?;
    let seeds = random_seeds(seeds, rng_seed);

    println!(
        "Order sweep: {} over {} size(s), {} seed(s) each, warmup={warmup}\n",
        generator.map().name(),
        sizes.len(),
        seeds.len()
    );

    let t0 = Instant::now();
    let points = order_sweep(&generator, &seeds, warmup, &sizes)?;

    println!("  {:>6} {:>16} {:>14}", "N", "Avg order", "Avg log10");
    for p in &points {
        println!(
            "  {:>6} {:>16.4e} {:>14.3}",
            p.n, p.average_order, p.average_log10_order
        );
    }
    println!("\n  [{:.1}s]", t0.elapsed().as_secs_f64());

    if let Some(path) = output_path {
        let out = serde_json::json!({
            "map": generator.map().name(),
            "params": generator.map().params(),
            "warmup": warmup,
            "seeds": seeds.len(),
            "points": points,
        });
        super::write_json(path, &out)?;
        println!("\n📄 Sweep saved to: {path}");
    }
    Ok(())
}
