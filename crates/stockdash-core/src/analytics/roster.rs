//! Roster filtering and aggregates for the company list

use crate::model::{Company, RosterEntry};

/// Entries whose symbol or name contains `search` (case-insensitive)
/// and whose sector matches `sector` exactly when given
///
/// A blank search matches everything. Order is preserved.
pub fn filter_companies(
    companies: &[RosterEntry],
    search: &str,
    sector: Option<&str>,
) -> Vec<RosterEntry> {
    let needle = search.trim().to_lowercase();
    companies
        .iter()
        .filter(|c| {
            needle.is_empty()
                || c.symbol.to_lowercase().contains(&needle)
                || c.name.to_lowercase().contains(&needle)
        })
        .filter(|c| sector.is_none_or(|s| c.sector == s))
        .cloned()
        .collect()
}

/// Distinct sectors in first-seen order
pub fn unique_sectors(companies: &[RosterEntry]) -> Vec<String> {
    let mut sectors: Vec<String> = Vec::new();
    for company in companies {
        if !sectors.iter().any(|s| *s == company.sector) {
            sectors.push(company.sector.clone());
        }
    }
    sectors
}

/// Smallest and largest market value, `None` for an empty roster
pub fn market_value_range(companies: &[RosterEntry]) -> Option<(f64, f64)> {
    companies
        .iter()
        .map(|c| c.market_value)
        .filter(|v| v.is_finite())
        .fold(None, |range, value| match range {
            None => Some((value, value)),
            Some((low, high)) => Some((low.min(value), high.max(value))),
        })
}

/// Strictly positive change since the previous close
pub fn is_gaining(company: &Company) -> bool {
    company.change > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<RosterEntry> {
        vec![
            Company::new("TCS", "Tata Consultancy Services")
                .with_sector("Technology")
                .with_quote(3800.0, 12.5, 0.33)
                .with_market_value(1.4e13),
            Company::new("HDFCBANK", "HDFC Bank")
                .with_sector("Financial Services")
                .with_quote(1500.0, -4.0, -0.27)
                .with_market_value(1.1e13),
            Company::new("INFY", "Infosys")
                .with_sector("Technology")
                .with_quote(1450.0, 0.0, 0.0)
                .with_market_value(6.0e12),
        ]
        .into_iter()
        .map(RosterEntry::new)
        .collect()
    }

    fn symbols(entries: &[RosterEntry]) -> Vec<&str> {
        entries.iter().map(|c| c.symbol.as_str()).collect()
    }

    #[test]
    fn test_filter_by_search() {
        let companies = roster();
        assert_eq!(symbols(&filter_companies(&companies, "tcs", None)), ["TCS"]);
        assert_eq!(symbols(&filter_companies(&companies, "bank", None)), ["HDFCBANK"]);
        assert_eq!(filter_companies(&companies, "  ", None).len(), 3);
        assert!(filter_companies(&companies, "wipro", None).is_empty());
    }

    #[test]
    fn test_filter_by_sector() {
        let companies = roster();
        let tech = filter_companies(&companies, "", Some("Technology"));
        assert_eq!(symbols(&tech), ["TCS", "INFY"]);

        let narrowed = filter_companies(&companies, "inf", Some("Technology"));
        assert_eq!(symbols(&narrowed), ["INFY"]);
        assert!(filter_companies(&companies, "", Some("technology")).is_empty());
    }

    #[test]
    fn test_unique_sectors_keep_first_seen_order() {
        assert_eq!(
            unique_sectors(&roster()),
            vec!["Technology".to_string(), "Financial Services".to_string()]
        );
        assert!(unique_sectors(&[]).is_empty());
    }

    #[test]
    fn test_market_value_range() {
        assert_eq!(market_value_range(&roster()), Some((6.0e12, 1.4e13)));
        assert_eq!(market_value_range(&[]), None);
    }

    #[test]
    fn test_is_gaining() {
        let companies = roster();
        assert!(is_gaining(&companies[0]));
        assert!(!is_gaining(&companies[1]));
        assert!(!is_gaining(&companies[2]));
    }
}
