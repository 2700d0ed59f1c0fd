//! Package filtering and ordering for the pricing grid

use crate::catalog::Package;

/// Packages to display for an optional provider-availability set.
///
/// With a non-empty set only packages from those providers are kept;
/// otherwise the whole catalog is returned. The result is ordered by
/// ascending price, and equal prices keep their catalog order.
pub fn select_packages<'a, S>(catalog: &'a [Package], providers: Option<&[S]>) -> Vec<&'a Package>
where
    S: AsRef<str>,
{
    let mut selected: Vec<&Package> = match providers {
        Some(ids) if !ids.is_empty() => catalog
            .iter()
            .filter(|pkg| ids.iter().any(|id| id.as_ref() == pkg.provider_id))
            .collect(),
        _ => catalog.iter().collect(),
    };

    // sort_by_key is stable
    selected.sort_by_key(|pkg| pkg.price);
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::data;

    fn priced(id: &str, provider: &str, price: u32) -> Package {
        Package {
            id: id.to_string(),
            provider_id: provider.to_string(),
            name: id.to_string(),
            speed_down: 10,
            speed_up: 10,
            price,
            features: Vec::new(),
            contract_term: "Month-to-Month".to_string(),
            has_router: true,
            has_installation: true,
            uncapped: true,
        }
    }

    fn ids(packages: &[&Package]) -> Vec<String> {
        packages.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_filter_and_sort_scenario() {
        let catalog = vec![priced("a", "A", 599), priced("b", "B", 289), priced("c", "C", 749)];
        let shown = select_packages(&catalog, Some(&["A", "C"][..]));
        assert_eq!(ids(&shown), vec!["a", "c"]);
        assert_eq!(shown[0].price, 599);
        assert_eq!(shown[1].price, 749);
    }

    #[test]
    fn test_no_set_returns_whole_catalog_sorted() {
        let catalog = data::packages();
        let shown = select_packages::<&str>(&catalog, None);
        assert_eq!(shown.len(), catalog.len());
        assert_eq!(shown[0].id, "os-10");
        assert!(shown.windows(2).all(|w| w[0].price <= w[1].price));

        let empty: [&str; 0] = [];
        assert_eq!(select_packages(&catalog, Some(&empty[..])).len(), catalog.len());
    }

    #[test]
    fn test_equal_prices_keep_catalog_order() {
        // ff-20 and vuma-20 are both 599; ff-20 comes first in the catalog
        let catalog = data::packages();
        let shown = select_packages::<&str>(&catalog, None);
        let at_599: Vec<_> = shown.iter().filter(|p| p.price == 599).map(|p| p.id.as_str()).collect();
        assert_eq!(at_599, vec!["ff-20", "vuma-20"]);
    }

    #[test]
    fn test_idempotent() {
        let catalog = data::packages();
        let providers = vec!["vumatel".to_string(), "frogfoot".to_string()];
        let first = select_packages(&catalog, Some(providers.as_slice()));
        let second = select_packages(&catalog, Some(providers.as_slice()));
        assert_eq!(first, second);
        assert_eq!(first.len(), 6);
    }

    #[test]
    fn test_unknown_provider_yields_empty() {
        let catalog = data::packages();
        assert!(select_packages(&catalog, Some(&["nobody"][..])).is_empty());
    }
}
