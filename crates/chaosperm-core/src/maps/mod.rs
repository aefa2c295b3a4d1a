//! The five built-in chaotic map oracles and their registry.

pub mod henon;
pub mod unimodal;

pub use henon::{DIVERGENCE_BOUND, Divergence, HenonMap};
pub use unimodal::{IcmicMap, LogisticMap, LogisticTentMap, TentMap};

use crate::error::{Error, Result};
use crate::map::MapOracle;

/// Registry names, in display order.
pub const MAP_NAMES: &[&str] = &["logistic", "tent", "icmic", "logistic_tent", "henon"];

/// Every built-in map with its default parameters.
pub fn all_maps() -> Vec<Box<dyn MapOracle>> {
    vec![
        Box::new(LogisticMap::default()),
        Box::new(TentMap::default()),
        Box::new(IcmicMap::default()),
        Box::new(LogisticTentMap::default()),
        Box::new(HenonMap::default()),
    ]
}

/// Check that every parameter is finite and that there are exactly `names.len()`.
fn check_params(map: &str, names: &[&str], params: &[f64]) -> Result<()> {
    if params.len() != names.len() {
        return Err(Error::invalid_parameter(
            map,
            format!(
                "expected {} parameter(s) ({}), got {}",
                names.len(),
                names.join(", "),
                params.len()
            ),
        ));
    }
    for (name, value) in names.iter().zip(params) {
        if !value.is_finite() {
            return Err(Error::invalid_parameter(
                *name,
                format!("must be finite, got {value}"),
            ));
        }
    }
    Ok(())
}

/// Look up a map by registry name.
///
/// `params` overrides the defaults positionally; `None` or an empty slice
/// keeps the defaults. `divergence` only affects maps that can escape
/// (currently Hénon).
pub fn map_by_name(
    name: &str,
    params: Option<&[f64]>,
    divergence: Divergence,
) -> Result<Box<dyn MapOracle>> {
    let params = params.filter(|p| !p.is_empty());
    let map: Box<dyn MapOracle> = match name {
        "logistic" => {
            let mut m = LogisticMap::default();
            if let Some(p) = params {
                check_params(name, &["r"], p)?;
                m.r = p[0];
            }
            Box::new(m)
        }
        "tent" => {
            let mut m = TentMap::default();
            if let Some(p) = params {
                check_params(name, &["r"], p)?;
                m.r = p[0];
            }
            Box::new(m)
        }
        "icmic" => {
            let mut m = IcmicMap::default();
            if let Some(p) = params {
                check_params(name, &["r"], p)?;
                m.r = p[0];
            }
            Box::new(m)
        }
        "logistic_tent" | "logistic-tent" => {
            let mut m = LogisticTentMap::default();
            if let Some(p) = params {
                check_params(name, &["r"], p)?;
                m.r = p[0];
            }
            Box::new(m)
        }
        "henon" => {
            let mut m = HenonMap::default().with_divergence(divergence);
            if let Some(p) = params {
                check_params(name, &["a", "b"], p)?;
                m.a = p[0];
                m.b = p[1];
            }
            Box::new(m)
        }
        other => return Err(Error::UnknownMap(other.to_string())),
    };
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_maps_match_names() {
        let names: Vec<_> = all_maps().iter().map(|m| m.name()).collect();
        assert_eq!(names, MAP_NAMES);
    }

    #[test]
    fn test_defaults_match_info() {
        for map in all_maps() {
            assert_eq!(map.params(), map.info().default_params, "{}", map.name());
            assert_eq!(map.info().param_names.len(), map.params().len());
        }
    }

    #[test]
    fn test_lookup_every_name() {
        for name in MAP_NAMES {
            let map = map_by_name(name, None, Divergence::Reseed).unwrap();
            assert_eq!(map.name(), *name);
        }
    }

    #[test]
    fn test_param_override() {
        let map = map_by_name("henon", Some(&[1.2, 0.25]), Divergence::Reseed).unwrap();
        assert_eq!(map.params(), vec![1.2, 0.25]);
        let map = map_by_name("logistic", Some(&[]), Divergence::Reseed).unwrap();
        assert_eq!(map.params(), vec![3.8]);
    }

    #[test]
    fn test_wrong_arity_rejected() {
        let err = map_by_name("logistic", Some(&[3.9, 0.1]), Divergence::Reseed)
            .err()
            .unwrap();
        assert!(matches!(err, Error::InvalidParameter { .. }));
    }

    #[test]
    fn test_non_finite_param_rejected() {
        let err = map_by_name("tent", Some(&[f64::NAN]), Divergence::Reseed)
            .err()
            .unwrap();
        assert!(matches!(err, Error::InvalidParameter { .. }));
    }

    #[test]
    fn test_unknown_map() {
        let err = map_by_name("lorenz", None, Divergence::Reseed).err().unwrap();
        assert!(matches!(err, Error::UnknownMap(ref n) if n == "lorenz"));
    }
}
