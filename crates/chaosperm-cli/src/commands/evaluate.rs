use std::path::Path;
use std::time::Instant;

use chaosperm_core::{Error, EvaluationConfig, EvaluationProfile, Result};
use chaosperm_tests::{EvaluationReport, Evaluator, calculate_quality_score, run_all_tests};

pub struct EvaluateCommandConfig<'a> {
    pub config_path: Option<&'a str>,
    pub map: Option<&'a str>,
    pub params: Option<&'a str>,
    pub divergence: Option<&'a str>,
    pub warmup: Option<usize>,
    pub n: Option<usize>,
    pub profile: Option<&'a str>,
    pub seeds: Option<usize>,
    pub rng_seed: Option<u64>,
    pub delta: Option<f64>,
    pub combine: Option<&'a str>,
    pub output_path: Option<&'a str>,
    pub verbose: bool,
}

/// Config file first, then profile, then individual flags.
fn resolve_config(cfg: &EvaluateCommandConfig<'_>) -> Result<EvaluationConfig> {
    let mut config = match cfg.config_path {
        Some(path) => EvaluationConfig::from_json_path(Path::new(path))?,
        None => EvaluationConfig::default(),
    };

    if let Some(name) = cfg.profile {
        let profile = EvaluationProfile::parse(name)
            .ok_or_else(|| Error::invalid_parameter("profile", format!("unknown profile '{name}'")))?;
        config = config.with_profile(profile);
    }
    if let Some(map) = cfg.map {
        config.map = map.to_string();
        // Parameters from a config file belong to its map.
        config.params.clear();
    }
    if cfg.params.is_some() {
        config.params = super::parse_params(cfg.params)?;
    }
    if let Some(d) = cfg.divergence {
        config.divergence = super::parse_divergence(d);
    }
    if let Some(m) = cfg.warmup {
        config.warmup = m;
    }
    if let Some(n) = cfg.n {
        config.n = n;
    }
    if let Some(s) = cfg.seeds {
        config.seeds = s;
    }
    if cfg.rng_seed.is_some() {
        config.rng_seed = cfg.rng_seed;
    }
    if let Some(delta) = cfg.delta {
        config.delta = delta;
    }
    if let Some(c) = cfg.combine {
        config.combine = super::parse_combine(c);
    }

    config.validate()?;
    Ok(config)
}

pub fn run(cfg: EvaluateCommandConfig<'_>) -> Result<()> {
    let config = resolve_config(&cfg)?;
    log::debug!("resolved config: {config:?}");
    let evaluator = Evaluator::new(config.build_generator()?);
    let seeds = config.draw_seeds();

    println!(
        "🔬 Evaluating {} {:?}: {} seed(s), n={}, warmup={}, delta={:e}\n",
        evaluator.generator().map().name(),
        evaluator.generator().map().params(),
        seeds.len(),
        config.n,
        config.warmup,
        config.delta
    );

    let t0 = Instant::now();
    let report = evaluator.evaluate(&seeds, &config)?;
    let elapsed = t0.elapsed().as_secs_f64();

    if cfg.verbose {
        print_records(&report);
    }
    print_summary(&report, elapsed);

    if let Some(path) = cfg.output_path {
        super::write_json(path, &report)?;
        println!("\n📄 Report saved to: {path}");
    }
    Ok(())
}

fn print_records(report: &EvaluationReport) {
    println!("  {:<44} {:>14} {:>10}", "Seed", "Order", "Similarity");
    for r in &report.records {
        println!(
            "  {:<44} {:>14} {:>10.4}",
            r.seed.to_string(),
            r.order.to_string(),
            r.similarity
        );
    }
    println!();
}

fn print_summary(report: &EvaluationReport, elapsed: f64) {
    let u = &report.uniformity;
    let s = &report.sensitivity;

    println!("{}", "=".repeat(60));
    println!("  Cycle structure");
    println!("    Average order:        {:.4e}", report.average_order);
    println!("    Average log10(order): {:.3}", report.average_log10_order);

    println!("  Positional uniformity ({} rows, {} combiner)", u.n, u.method);
    println!(
        "    Combined:             stat={:.3} p={:.6}",
        u.combined_statistic, u.combined_p_value
    );
    println!("    Rows rejected @0.01:  {}/{}", u.rejected_rows, u.n);

    println!("  Seed sensitivity (delta={:e})", report.delta);
    println!(
        "    Similarity:           mean={:.4} min={:.4} max={:.4}",
        s.mean, s.min, s.max
    );
    println!(
        "    Random baseline:      {:.4}  (agreements={}, p={:.6})",
        s.random_baseline, s.total_agreements, s.p_value
    );
    println!("{}", "-".repeat(60));

    let results = run_all_tests(report);
    for t in &results {
        let ok = if t.passed { "✓" } else { "✗" };
        let pval = t
            .p_value
            .map(|p| format!("{p:.6}"))
            .unwrap_or_else(|| "—".to_string());
        println!("  {ok} {:<24} {:>10} {:>3}  {}", t.name, pval, t.grade, t.details);
    }
    let score = calculate_quality_score(&results);
    let passed = results.iter().filter(|r| r.passed).count();
    println!(
        "\n  Score: {:.0}/100 ({}/{} passed) [{:.1}s]",
        score,
        passed,
        results.len(),
        elapsed
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use chaosperm_core::{CombineMethod, Divergence};

    fn empty() -> EvaluateCommandConfig<'static> {
        EvaluateCommandConfig {
            config_path: None,
            map: None,
            params: None,
            divergence: None,
            warmup: None,
            n: None,
            profile: None,
            seeds: None,
            rng_seed: None,
            delta: None,
            combine: None,
            output_path: None,
            verbose: false,
        }
    }

    #[test]
    fn test_resolve_defaults() {
        let c = resolve_config(&empty()).unwrap();
        assert_eq!(c.map, "logistic");
        assert_eq!(c.n, EvaluationConfig::default().n);
    }

    #[test]
    fn test_seeds_override_profile() {
        let cfg = EvaluateCommandConfig {
            profile: Some("quick"),
            ..empty()
        };
        assert_eq!(resolve_config(&cfg).unwrap().seeds, 200);

        let cfg = EvaluateCommandConfig {
            profile: Some("deep"),
            seeds: Some(7),
            ..empty()
        };
        assert_eq!(resolve_config(&cfg).unwrap().seeds, 7);
    }

    #[test]
    fn test_flags_override() {
        let cfg = EvaluateCommandConfig {
            map: Some("henon"),
            params: Some("1.2,0.3"),
            divergence: Some("report"),
            n: Some(64),
            delta: Some(1e-3),
            combine: Some("stouffer"),
            ..empty()
        };
        let c = resolve_config(&cfg).unwrap();
        assert_eq!(c.map, "henon");
        assert_eq!(c.params, vec![1.2, 0.3]);
        assert_eq!(c.divergence, Divergence::Report);
        assert_eq!(c.n, 64);
        assert_eq!(c.delta, 1e-3);
        assert_eq!(c.combine, CombineMethod::Stouffer);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let cfg = EvaluateCommandConfig {
            n: Some(0),
            ..empty()
        };
        assert!(resolve_config(&cfg).is_err());

        let cfg = EvaluateCommandConfig {
            profile: Some("huge"),
            ..empty()
        };
        assert!(resolve_config(&cfg).is_err());

        let cfg = EvaluateCommandConfig {
            config_path: Some("/nonexistent/chaosperm.json"),
            ..empty()
        };
        assert!(resolve_config(&cfg).is_err());
    }
}
