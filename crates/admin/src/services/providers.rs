//! Provider list assembly.
//!
//! The backend serves approved and pending providers from different
//! endpoints. The providers page shows them as one list per kind.

use std::collections::HashMap;

use wecare_core::ProviderId;

use crate::api::Provider;

/// Merge the pending and listed providers of one kind.
///
/// Pending entries come first, then listed ones, one entry per id. If an id
/// shows up in both lists, the decided (non-pending) copy replaces the
/// pending one in place.
#[must_use]
pub fn merge(pending: Vec<Provider>, listed: Vec<Provider>) -> Vec<Provider> {
    let mut merged: Vec<Provider> = Vec::with_capacity(pending.len() + listed.len());
    let mut positions: HashMap<ProviderId, usize> = HashMap::new();

    for provider in pending.into_iter().chain(listed) {
        match positions.get(provider.id()) {
            Some(&at) => {
                if let Some(kept) = merged.get_mut(at)
                    && !kept.verification_status().is_decided()
                    && provider.verification_status().is_decided()
                {
                    *kept = provider;
                }
            }
            None => {
                positions.insert(provider.id().clone(), merged.len());
                merged.push(provider);
            }
        }
    }

    merged
}

/// Case-insensitive substring match over name, owner, city and phone.
/// A blank search matches everything.
#[must_use]
pub fn matches_search(provider: &Provider, search: &str) -> bool {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    [
        provider.display_name(),
        provider.owner_name(),
        provider.city(),
        provider.phone_number(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(&needle))
}

/// Apply [`matches_search`] to a merged list.
#[must_use]
pub fn filter(providers: Vec<Provider>, search: Option<&str>) -> Vec<Provider> {
    match search {
        Some(search) => providers
            .into_iter()
            .filter(|p| matches_search(p, search))
            .collect(),
        None => providers,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wecare_core::VerificationStatus;

    use super::*;
    use crate::api::{Address, Daycare};

    fn daycare(id: &str, name: &str, status: VerificationStatus) -> Provider {
        Provider::Daycare(Daycare {
            id: ProviderId::parse(id).unwrap(),
            center_name: Some(name.to_string()),
            owner_name: Some("Meera Iyer".to_string()),
            total_capacity: Some(20),
            phone_number: Some("9876543210".to_string()),
            address: Some(Address {
                city: Some("Pune".to_string()),
                ..Address::default()
            }),
            verification_status: status,
            admin_estimated_price: None,
            rejection_reason: None,
            created_at: None,
        })
    }

    fn ids(providers: &[Provider]) -> Vec<&str> {
        providers.iter().map(|p| p.id().as_str()).collect()
    }

    #[test]
    fn test_merge_puts_pending_first() {
        let merged = merge(
            vec![daycare("p1", "Little Steps", VerificationStatus::Pending)],
            vec![
                daycare("a1", "Sunshine", VerificationStatus::Approved),
                daycare("a2", "Rainbow", VerificationStatus::Approved),
            ],
        );
        assert_eq!(ids(&merged), vec!["p1", "a1", "a2"]);
    }

    #[test]
    fn test_merge_has_no_duplicates() {
        let merged = merge(
            vec![
                daycare("x1", "Little Steps", VerificationStatus::Pending),
                daycare("p2", "Kidzee", VerificationStatus::Pending),
            ],
            vec![
                daycare("a1", "Sunshine", VerificationStatus::Approved),
                daycare("x1", "Little Steps", VerificationStatus::Approved),
            ],
        );
        assert_eq!(ids(&merged), vec!["x1", "p2", "a1"]);
        assert_eq!(merged[0].verification_status(), VerificationStatus::Approved);
    }

    #[test]
    fn test_merge_keeps_first_decided_copy() {
        let merged = merge(
            vec![],
            vec![
                daycare("a1", "Sunshine", VerificationStatus::Approved),
                daycare("a1", "Sunshine", VerificationStatus::Rejected),
            ],
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].verification_status(), VerificationStatus::Approved);
    }

    #[test]
    fn test_matches_search_fields() {
        let p = daycare("a1", "Sunshine Kids", VerificationStatus::Approved);
        assert!(matches_search(&p, "sunshine"));
        assert!(matches_search(&p, "MEERA"));
        assert!(matches_search(&p, "pune"));
        assert!(matches_search(&p, "98765"));
        assert!(matches_search(&p, "  "));
        assert!(!matches_search(&p, "mumbai"));
    }

    #[test]
    fn test_filter_after_merge() {
        let merged = merge(
            vec![daycare("p1", "Little Steps", VerificationStatus::Pending)],
            vec![daycare("a1", "Sunshine", VerificationStatus::Approved)],
        );
        let shown = filter(merged, Some("little"));
        assert_eq!(ids(&shown), vec!["p1"]);
    }
}
