//! Helpers for rendering the FAQ list and dashboard from store state.

use crate::types::{AggregateCounts, FaqRecord, StatusFilter};

/// Records on the current page matching `filter` whose question or answer
/// contains `term`, ignoring case. An empty term matches everything.
pub fn search<'a>(items: &'a [FaqRecord], filter: StatusFilter, term: &str) -> Vec<&'a FaqRecord> {
    let needle = term.to_lowercase();
    items
        .iter()
        .filter(|r| filter.matches(r))
        .filter(|r| {
            needle.is_empty()
                || r.question.to_lowercase().contains(&needle)
                || r.answer.to_lowercase().contains(&needle)
        })
        .collect()
}

/// One-based position of a row across all pages.
pub fn row_number(page: u32, limit: u32, index: usize) -> u64 {
    u64::from(page.saturating_sub(1)) * u64::from(limit) + index as u64 + 1
}

/// Page to reload after a delete.
///
/// Moves only when the visible rows were emptied and the current page now
/// lies past the last page of `total_after` records; it then jumps to that
/// last page. Otherwise the current page is reloaded, even if a search
/// hides the records it still holds.
pub fn page_after_delete(current_page: u32, remaining_on_page: usize, total_after: u64, limit: u32) -> u32 {
    let last_page = if limit == 0 {
        1
    } else {
        u32::try_from(total_after.div_ceil(u64::from(limit)))
            .unwrap_or(u32::MAX)
            .max(1)
    };
    if remaining_on_page == 0 && current_page > last_page {
        last_page
    } else {
        current_page.max(1)
    }
}

/// Active/inactive split for the dashboard chart, in whole percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBreakdown {
    pub active_percent: u32,
    pub inactive_percent: u32,
}

impl From<AggregateCounts> for StatusBreakdown {
    fn from(counts: AggregateCounts) -> Self {
        if counts.total == 0 {
            return Self {
                active_percent: 0,
                inactive_percent: 0,
            };
        }
        let percent = |part: u64| (part as f64 * 100.0 / counts.total as f64).round() as u32;
        Self {
            active_percent: percent(counts.active),
            inactive_percent: percent(counts.inactive),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(question: &str, answer: &str, status: bool) -> FaqRecord {
        FaqRecord {
            status,
            ..FaqRecord::new(question, answer)
        }
    }

    #[test]
    fn search_matches_question_or_answer_case_insensitively() {
        let items = vec![
            record("How do I log in?", "Use your email.", true),
            record("Where is billing?", "Under Settings > Billing.", false),
            record("Can I export data?", "Yes, as CSV.", true),
        ];
        let hits = search(&items, StatusFilter::Total, "BILLING");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].question, "Where is billing?");

        let hits = search(&items, StatusFilter::Total, "csv");
        assert_eq!(hits[0].question, "Can I export data?");
    }

    #[test]
    fn search_applies_status_filter() {
        let items = vec![
            record("Active one?", "Yes it is.", true),
            record("Inactive one?", "Yes it is.", false),
        ];
        assert_eq!(search(&items, StatusFilter::Active, "").len(), 1);
        assert_eq!(search(&items, StatusFilter::Inactive, "one")[0].question, "Inactive one?");
        assert_eq!(search(&items, StatusFilter::Total, "").len(), 2);
    }

    #[test]
    fn row_numbers_continue_across_pages() {
        assert_eq!(row_number(1, 20, 0), 1);
        assert_eq!(row_number(3, 20, 4), 45);
    }

    #[test]
    fn deleting_last_row_of_last_page_jumps_to_new_last_page() {
        assert_eq!(page_after_delete(3, 0, 40, 20), 2);
        assert_eq!(page_after_delete(5, 0, 41, 20), 3);
        assert_eq!(page_after_delete(1, 0, 0, 20), 1);
        assert_eq!(page_after_delete(2, 0, 0, 20), 1);
    }

    #[test]
    fn page_is_kept_while_it_still_holds_records() {
        // search hid the rest of page 2, but 29 records still span two pages
        assert_eq!(page_after_delete(2, 0, 29, 20), 2);
        assert_eq!(page_after_delete(3, 0, 60, 20), 3);
        assert_eq!(page_after_delete(2, 5, 25, 20), 2);
        assert_eq!(page_after_delete(5, 3, 25, 20), 5);
    }

    #[test]
    fn breakdown_handles_empty_dataset() {
        let empty = StatusBreakdown::from(AggregateCounts::default());
        assert_eq!(empty.active_percent, 0);
        assert_eq!(empty.inactive_percent, 0);
    }

    #[test]
    fn breakdown_rounds_to_whole_percent() {
        let split = StatusBreakdown::from(AggregateCounts {
            total: 4,
            active: 3,
            inactive: 1,
        });
        assert_eq!(split.active_percent, 75);
        assert_eq!(split.inactive_percent, 25);

        let thirds = StatusBreakdown::from(AggregateCounts {
            total: 3,
            active: 2,
            inactive: 1,
        });
        assert_eq!(thirds.active_percent, 67);
        assert_eq!(thirds.inactive_percent, 33);
    }
}
