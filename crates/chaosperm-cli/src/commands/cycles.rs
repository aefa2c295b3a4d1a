use chaosperm_core::{Result, Seed};
use chaosperm_tests::find_cycles;

use crate::MapArgs;

pub fn run(
    args: &MapArgs,
    x0: f64,
    y0: f64,
    warmup: usize,
    n: usize,
    show_cycles: bool,
) -> Result<()> {
    let generator = super::make_generator(args)?;
    let seed = Seed::new(x0, y0);
    let permutation = generator.generate(seed, warmup, n)?;
    let structure = find_cycles(&permutation);

    println!(
        "{} seed {seed}, warmup={warmup}, n={n}\n",
        generator.map().name()
    );
    println!("  Cycles:        {}", structure.cycle_count());
    println!("  Fixed points:  {}", structure.fixed_points());
    println!("  Longest cycle: {}", structure.longest_cycle());
    println!("  Order:         {}", structure.order);
    println!("  log10(order):  {:.3}", structure.order.log10());

    println!("\n  {:>8} {:>8}", "Length", "Count");
    for (length, count) in &structure.length_counts {
        println!("  {length:>8} {count:>8}");
    }

    if show_cycles {
        println!();
        for cycle in &structure.cycles {
            let items: Vec<String> = cycle.iter().map(|i| i.to_string()).collect();
            println!("  ({})", items.join(" "));
        }
    }
    Ok(())
}
