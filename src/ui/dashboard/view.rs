//! Derived view of the proposal list
//!
//! Pure functions recomputed on every render: search, pagination and the
//! summary statistics.

use crate::consts::cli_consts::PAGE_SIZE;
use crate::proposal::Proposal;
use serde::Serialize;

/// Proposals whose name or description contains `term`, ignoring case.
/// An empty term keeps everything.
pub fn filter_proposals<'a>(proposals: &'a [Proposal], term: &str) -> Vec<&'a Proposal> {
    let needle = term.to_lowercase();
    proposals
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        })
        .collect()
}

pub fn total_pages(filtered: usize) -> usize {
    filtered.div_ceil(PAGE_SIZE)
}

/// Clamps a 1-based page into `[1, total_pages]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Items of the 1-based `page`. Out-of-range pages are empty.
pub fn paginate<T>(items: &[T], page: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(PAGE_SIZE);
    if start >= items.len() {
        return &[];
    }
    let end = (start + PAGE_SIZE).min(items.len());
    &items[start..end]
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
    pub waiting: usize,
}

/// Statistics over the whole list, ignoring the search term.
pub fn stats(proposals: &[Proposal]) -> Stats {
    proposals.iter().fold(Stats::default(), |mut stats, p| {
        stats.total += 1;
        if p.is_verified {
            stats.completed += 1;
        } else {
            stats.pending += 1;
        }
        if p.is_waiting() {
            stats.waiting += 1;
        }
        stats
    })
}

/// The page of proposals visible for a search term.
pub struct ListView<'a> {
    pub filtered: Vec<&'a Proposal>,
    pub page: usize,
    pub total_pages: usize,
}

impl<'a> ListView<'a> {
    pub fn new(proposals: &'a [Proposal], term: &str, page: usize) -> Self {
        let filtered = filter_proposals(proposals, term);
        let total_pages = total_pages(filtered.len());
        Self {
            page: clamp_page(page, total_pages),
            total_pages,
            filtered,
        }
    }

    pub fn visible(&self) -> &[&'a Proposal] {
        paginate(&self.filtered, self.page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::types::BusinessData;

    fn proposal(n: usize, name: &str, description: &str, verified: bool) -> Proposal {
        Proposal::from_record(
            &format!("multisig-{}", n),
            BusinessData {
                name: name.to_string(),
                description: description.to_string(),
                creator: "0xde709f2102306220921060314715629080e2fb77".to_string(),
                timestamp: 1_700_000_000,
                public_value1: 2,
                public_value2: (n % 3) as u64,
                is_verified: verified,
                decrypted_value: 0,
            },
        )
    }

    fn many(count: usize) -> Vec<Proposal> {
        (0..count)
            .map(|n| proposal(n, &format!("Proposal {}", n), "", n % 2 == 0))
            .collect()
    }

    #[test]
    fn empty_search_is_identity() {
        let list = many(7);
        let filtered = filter_proposals(&list, "");
        assert_eq!(filtered.len(), 7);
        assert!(filtered.iter().zip(list.iter()).all(|(a, b)| a.id == b.id));
    }

    #[test]
    fn search_is_case_insensitive_on_name_or_description() {
        let list = vec![
            proposal(1, "Treasury Payout", "", false),
            proposal(2, "Vendor", "monthly TREASURY top-up", false),
            proposal(3, "Payroll", "salaries", false),
        ];
        let upper: Vec<&str> = filter_proposals(&list, "TREASURY")
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        let lower: Vec<&str> = filter_proposals(&list, "treasury")
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(upper, vec!["multisig-1", "multisig-2"]);
        assert_eq!(upper, lower);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(5), 1);
        assert_eq!(total_pages(6), 2);
        assert_eq!(total_pages(11), 3);
    }

    #[test]
    fn pages_reconstruct_the_filtered_list() {
        let list = many(12);
        let pages = total_pages(list.len());
        let rebuilt: Vec<&Proposal> = (1..=pages)
            .flat_map(|page| paginate(&list, page).iter())
            .collect();
        assert_eq!(rebuilt.len(), list.len());
        assert!(rebuilt.iter().zip(list.iter()).all(|(a, b)| a.id == b.id));
        assert!(paginate(&list, pages + 1).is_empty());
    }

    #[test]
    fn page_is_clamped() {
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(9, 3), 3);
        assert_eq!(clamp_page(4, 0), 1);

        let list = many(6);
        let view = ListView::new(&list, "", 10);
        assert_eq!(view.page, 2);
        assert_eq!(view.visible().len(), 1);
    }

    #[test]
    fn stats_partition_by_verification() {
        let list = many(9);
        let stats = stats(&list);
        assert_eq!(stats.total, 9);
        assert_eq!(stats.pending + stats.completed, stats.total);
        assert_eq!(stats.completed, 5);
        let waiting = list
            .iter()
            .filter(|p| p.current_signatures < p.required_signatures)
            .count();
        assert_eq!(stats.waiting, waiting);
    }

    #[test]
    fn empty_list_has_empty_stats() {
        assert_eq!(stats(&[]), Stats::default());
        let view = ListView::new(&[], "anything", 1);
        assert_eq!(view.total_pages, 0);
        assert!(view.visible().is_empty());
    }
}
