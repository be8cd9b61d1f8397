use crate::catalog::PhraseCatalog;
use crate::error::{Error, Result};
use rand::Rng;
use std::collections::HashSet;

/// Catalog entries not yet in `used`, in catalog order.
pub fn eligible<'a>(catalog: &'a PhraseCatalog, used: &[String]) -> Vec<&'a str> {
    let used: HashSet<&str> = used.iter().map(String::as_str).collect();
    catalog
        .phrases()
        .iter()
        .map(String::as_str)
        .filter(|p| !used.contains(p))
        .collect()
}

/// Pick one unused phrase uniformly at random.
pub fn select<'a, R: Rng>(
    catalog: &'a PhraseCatalog,
    used: &[String],
    rng: &mut R,
) -> Result<&'a str> {
    let available = eligible(catalog, used);
    if available.is_empty() {
        return Err(Error::ExhaustedCatalog);
    }
    let i = rng.random_range(0..available.len());
    Ok(available[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn catalog(items: &[&str]) -> PhraseCatalog {
        PhraseCatalog::new(items.iter().copied()).unwrap()
    }

    fn used(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_eligible_preserves_order() {
        let c = catalog(&["A", "B", "C", "D"]);
        assert_eq!(eligible(&c, &used(&["C", "A"])), vec!["B", "D"]);
    }

    #[test]
    fn test_eligible_ignores_unknown_used_entries() {
        let c = catalog(&["A", "B"]);
        assert_eq!(eligible(&c, &used(&["Z"])), vec!["A", "B"]);
    }

    #[test]
    fn test_select_never_repeats() {
        let c = catalog(&["A", "B", "C", "D", "E"]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let picked = select(&c, &used(&["A", "C", "E"]), &mut rng).unwrap();
            assert!(picked == "B" || picked == "D", "picked {picked}");
        }
    }

    #[test]
    fn test_select_single_remaining() {
        let c = catalog(&["A", "B"]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(select(&c, &used(&["A"]), &mut rng).unwrap(), "B");
    }

    #[test]
    fn test_select_covers_every_eligible_phrase() {
        let c = catalog(&["A", "B", "C"]);
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            seen.insert(select(&c, &[], &mut rng).unwrap());
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_exhausted_catalog() {
        let c = catalog(&["A", "B"]);
        let mut rng = StdRng::seed_from_u64(0);
        let err = select(&c, &used(&["B", "A"]), &mut rng).unwrap_err();
        assert!(matches!(err, Error::ExhaustedCatalog));
    }
}
