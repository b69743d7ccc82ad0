//! `retrieve_places` — static country → destinations catalog.

/// Countries the catalog knows, in the order the places handler scans for them.
pub const KNOWN_COUNTRIES: [&str; 2] = ["india", "france"];

const CATALOG: &[(&str, &[&str])] = &[
    ("india", &["Goa", "Manali", "Jaipur"]),
    ("france", &["Paris", "Nice", "Lyon"]),
];

fn catalog(country_lower: &str) -> Option<(&'static str, &'static [&'static str])> {
    CATALOG
        .iter()
        .find(|(key, _)| *key == country_lower)
        .copied()
}

/// `"Top places in {country}: {a, b, c}"`.
///
/// Lookup is case-insensitive and a known country is printed by its catalog
/// key, so `"INDIA"` and `"india"` give the same line. Unknown countries are
/// echoed as given and list `No data`.
pub fn retrieve_places(country: &str) -> String {
    match catalog(&country.to_lowercase()) {
        Some((key, places)) => format!("Top places in {key}: {}", places.join(", ")),
        None => format!("Top places in {country}: No data"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_country_lists_places() {
        assert_eq!(retrieve_places("france"), "Top places in france: Paris, Nice, Lyon");
        assert_eq!(retrieve_places("india"), "Top places in india: Goa, Manali, Jaipur");
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(retrieve_places("INDIA"), retrieve_places("india"));
        assert_eq!(retrieve_places("France"), "Top places in france: Paris, Nice, Lyon");
    }

    #[test]
    fn unknown_country_has_no_data() {
        assert_eq!(retrieve_places("Germany"), "Top places in Germany: No data");
        assert_eq!(retrieve_places(""), "Top places in : No data");
    }

    #[test]
    fn every_known_country_is_cataloged() {
        for c in KNOWN_COUNTRIES {
            assert!(catalog(c).is_some(), "{c} missing from catalog");
        }
    }
}
