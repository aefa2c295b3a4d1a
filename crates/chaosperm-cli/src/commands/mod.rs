pub mod cycles;
pub mod evaluate;
pub mod generate;
pub mod maps;
pub mod sweep;

use chaosperm_core::{CombineMethod, Divergence, Error, PermutationGenerator, Result, map_by_name};

use crate::MapArgs;

/// Build a generator from the shared map flags.
pub fn make_generator(args: &MapArgs) -> Result<PermutationGenerator> {
    let params = parse_params(args.params.as_deref())?;
    let divergence = parse_divergence(&args.divergence);
    let map = map_by_name(&args.map, Some(&params), divergence)?;
    Ok(PermutationGenerator::new(map))
}

/// Parse "3.8" or "1.4, 0.3" into parameter values. `None` means defaults.
pub fn parse_params(s: Option<&str>) -> Result<Vec<f64>> {
    let Some(s) = s else {
        return Ok(Vec::new());
    };
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            p.parse::<f64>()
                .map_err(|_| Error::invalid_parameter("params", format!("'{p}' is not a number")))
        })
        .collect()
}

/// Parse a divergence policy string into the enum.
pub fn parse_divergence(s: &str) -> Divergence {
    match s {
        "reseed" => Divergence::Reseed,
        "report" | "fail" => Divergence::Report,
        _ => {
            eprintln!("Unknown divergence policy '{s}', using reseed");
            Divergence::Reseed
        }
    }
}

/// Parse a combiner name into the enum.
pub fn parse_combine(s: &str) -> CombineMethod {
    match s {
        "fisher" => CombineMethod::Fisher,
        "stouffer" | "z" => CombineMethod::Stouffer,
        _ => {
            eprintln!("Unknown combiner '{s}', using fisher");
            CombineMethod::Fisher
        }
    }
}

/// Parse "start:end:step" (inclusive) or "a,b,c" into sizes.
pub fn parse_n_values(s: &str) -> Result<Vec<usize>> {
    let bad = |detail: String| Error::invalid_parameter("n-values", detail);
    let parse = |t: &str| {
        t.trim()
            .parse::<usize>()
            .map_err(|_| bad(format!("'{t}' is not a size")))
    };

    let values: Vec<usize> = if s.contains(':') {
        let parts: Vec<&str> = s.split(':').collect();
        let [start, end, step] = parts.as_slice() else {
            return Err(bad(format!("expected start:end:step, got '{s}'")));
        };
        let (start, end, step) = (parse(start)?, parse(end)?, parse(step)?);
        if step == 0 {
            return Err(bad("step must be positive".to_string()));
        }
        (start..=end).step_by(step).collect()
    } else {
        s.split(',')
            .filter(|t| !t.trim().is_empty())
            .map(parse)
            .collect::<Result<_>>()?
    };

    if values.is_empty() {
        return Err(bad(format!("no sizes in '{s}'")));
    }
    if let Some(&zero) = values.iter().find(|&&n| n == 0) {
        return Err(Error::InvalidSize { n: zero });
    }
    Ok(values)
}

/// Write `value` as pretty JSON to `path`.
pub fn write_json<T: serde::Serialize>(path: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(map: &str, params: Option<&str>) -> MapArgs {
        MapArgs {
            map: map.to_string(),
            params: params.map(str::to_string),
            divergence: "reseed".to_string(),
        }
    }

    // -----------------------------------------------------------------------
    // parse_params tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_parse_params_none() {
        assert!(parse_params(None).unwrap().is_empty());
    }

    #[test]
    fn test_parse_params_list() {
        assert_eq!(parse_params(Some("1.4, 0.3")).unwrap(), vec![1.4, 0.3]);
        assert_eq!(parse_params(Some("3.9,")).unwrap(), vec![3.9]);
    }

    #[test]
    fn test_parse_params_rejects_garbage() {
        assert!(parse_params(Some("r=3.8")).is_err());
    }

    // -----------------------------------------------------------------------
    // enum parsing tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_parse_divergence() {
        assert_eq!(parse_divergence("reseed"), Divergence::Reseed);
        assert_eq!(parse_divergence("report"), Divergence::Report);
        assert_eq!(parse_divergence("fail"), Divergence::Report);
        assert_eq!(parse_divergence("???"), Divergence::Reseed);
    }

    #[test]
    fn test_parse_combine() {
        assert_eq!(parse_combine("fisher"), CombineMethod::Fisher);
        assert_eq!(parse_combine("stouffer"), CombineMethod::Stouffer);
        assert_eq!(parse_combine("z"), CombineMethod::Stouffer);
        assert_eq!(parse_combine("FISHER"), CombineMethod::Fisher);
    }

    // -----------------------------------------------------------------------
    // parse_n_values tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_parse_n_values_range() {
        assert_eq!(parse_n_values("20:100:20").unwrap(), vec![20, 40, 60, 80, 100]);
        assert_eq!(parse_n_values("20:1000:20").unwrap().len(), 50);
    }

    #[test]
    fn test_parse_n_values_list() {
        assert_eq!(parse_n_values("5, 10,50").unwrap(), vec![5, 10, 50]);
    }

    #[test]
    fn test_parse_n_values_errors() {
        assert!(parse_n_values("1:2").is_err());
        assert!(parse_n_values("1:10:0").is_err());
        assert!(parse_n_values("0,5").is_err());
        assert!(parse_n_values("").is_err());
        assert!(parse_n_values("a,b").is_err());
    }

    // -----------------------------------------------------------------------
    // make_generator tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_make_generator_defaults() {
        let g = make_generator(&args("henon", None)).unwrap();
        assert_eq!(g.map().params(), vec![1.4, 0.3]);
    }

    #[test]
    fn test_make_generator_override() {
        let g = make_generator(&args("logistic", Some("3.99"))).unwrap();
        assert_eq!(g.map().params(), vec![3.99]);
    }

    #[test]
    fn test_make_generator_wrong_arity() {
        assert!(make_generator(&args("henon", Some("1.4"))).is_err());
    }
}
