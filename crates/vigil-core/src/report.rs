//! Report pagination: pack labelled entries into bounded pages of text.
//!
//! Two independent caps apply:
//! - a per-page character budget `C` on the page body
//! - a per-batch page-count cap `K`, matching the downstream renderer's
//!   limit of roughly ten renderable units per delivery call
//!
//! The packing check is "would adding this line overflow", not "does this
//! line alone overflow": a single line longer than `C` still lands alone on
//! its own page (accepted overflow, never truncated or rejected).

use serde::Serialize;

/// Caveat shown under every page; rendered outside the body budget.
pub const TRACKING_FOOTER: &str =
    "Tracked via the activity ledger. Users who last spoke before tracking began will not appear here.";

/// Visual emphasis for a rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    Normal,
    Alert,
}

/// One bounded block of rendered report text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportPage {
    pub title: String,
    pub body: String,
    pub accent: Accent,
    pub footer: String,
}

/// An ordered, count-bounded group of pages delivered together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportBatch {
    pub pages: Vec<ReportPage>,
}

/// The two packing caps. Defaults carry the reference values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBudget {
    /// Character budget per page body.
    pub max_chars: usize,
    /// Maximum pages per batch.
    pub max_pages: usize,
}

impl Default for PageBudget {
    fn default() -> Self {
        Self {
            max_chars: 1024,
            max_pages: 10,
        }
    }
}

/// One line-to-be of report text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub label: String,
    pub value: String,
}

impl ReportEntry {
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// The formatted line this entry contributes to a page body.
    #[must_use]
    pub fn line(&self) -> String {
        format!("{} - {}\n", self.label, self.value)
    }
}

/// Receives finished batches for delivery to wherever reports go.
pub trait ReportSink {
    /// Deliver one batch. Batches arrive in packing order.
    ///
    /// # Errors
    ///
    /// Returns an error when delivery fails; the caller logs and reports it.
    fn deliver(&self, batch: &ReportBatch) -> anyhow::Result<()>;
}

/// Pack `entries` into pages of at most `budget.max_chars` characters,
/// grouped into batches of at most `budget.max_pages` pages.
///
/// Guarantees:
/// - empty input yields exactly one batch holding one alert page whose body
///   is `empty_message`
/// - otherwise every entry's line appears in exactly one page body, in input
///   order, untruncated
/// - no page is emitted empty; a page only exceeds the budget when a single
///   line alone does
/// - every batch holds between 1 and `max_pages` pages; a partial final
///   batch is always emitted
#[must_use]
pub fn paginate(
    entries: &[ReportEntry],
    title: &str,
    empty_message: &str,
    accent: Accent,
    budget: PageBudget,
) -> Vec<ReportBatch> {
    if entries.is_empty() {
        return vec![ReportBatch {
            pages: vec![make_page(title, empty_message.to_string(), Accent::Alert)],
        }];
    }

    let mut batches = Vec::new();
    let mut pages: Vec<ReportPage> = Vec::new();
    let mut body = String::new();
    let mut body_chars = 0_usize;

    for entry in entries {
        let line = entry.line();
        let line_chars = line.chars().count();

        if !body.is_empty() && body_chars + line_chars > budget.max_chars {
            pages.push(make_page(title, std::mem::take(&mut body), accent));
            body.push_str(&line);
            body_chars = line_chars;

            if pages.len() >= budget.max_pages {
                batches.push(ReportBatch {
                    pages: std::mem::take(&mut pages),
                });
            }
        } else {
            body.push_str(&line);
            body_chars += line_chars;
        }
    }

    if !body.is_empty() {
        pages.push(make_page(title, body, accent));
    }

    if !pages.is_empty() {
        batches.push(ReportBatch { pages });
    }

    batches
}

fn make_page(title: &str, body: String, accent: Accent) -> ReportPage {
    ReportPage {
        title: title.to_string(),
        body,
        accent,
        footer: TRACKING_FOOTER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{Accent, PageBudget, ReportEntry, paginate};

    fn entry(label: &str, value: &str) -> ReportEntry {
        ReportEntry::new(label, value)
    }

    /// Reassemble every page body across all batches.
    fn joined_bodies(batches: &[super::ReportBatch]) -> String {
        batches
            .iter()
            .flat_map(|batch| batch.pages.iter())
            .map(|page| page.body.as_str())
            .collect()
    }

    #[test]
    fn empty_input_yields_single_alert_page() {
        let batches = paginate(&[], "Users", "No users found.", Accent::Normal, PageBudget::default());

        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].pages.len(), 1);

        let page = &batches[0].pages[0];
        assert_eq!(page.title, "Users");
        assert_eq!(page.body, "No users found.");
        assert_eq!(page.accent, Accent::Alert);
        assert!(!page.footer.is_empty());
    }

    #[test]
    fn single_entry_fits_one_page() {
        let entries = [entry("u-1", "Last active: yesterday")];
        let batches = paginate(&entries, "Users", "empty", Accent::Normal, PageBudget::default());

        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].pages.len(), 1);
        assert_eq!(batches[0].pages[0].body, "u-1 - Last active: yesterday\n");
        assert_eq!(batches[0].pages[0].accent, Accent::Normal);
    }

    #[test]
    fn twenty_five_fifty_char_lines_pack_into_two_pages_one_batch() {
        // label(8) + " - "(3) + value(38) + "\n"(1) = 50 chars per line.
        // 20 lines = 1000 <= 1024; the 21st would overflow.
        let value = "x".repeat(38);
        let entries: Vec<_> = (0..25)
            .map(|i| entry(&format!("user-{i:03}"), &value))
            .collect();
        for e in &entries {
            assert_eq!(e.line().chars().count(), 50);
        }

        let batches = paginate(&entries, "Users", "empty", Accent::Normal, PageBudget::default());

        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].pages.len(), 2);
        assert_eq!(batches[0].pages[0].body.lines().count(), 20);
        assert_eq!(batches[0].pages[1].body.lines().count(), 5);
    }

    #[test]
    fn every_entry_appears_once_in_order() {
        let entries: Vec<_> = (0..100).map(|i| entry(&format!("u-{i}"), "v")).collect();
        let budget = PageBudget {
            max_chars: 64,
            max_pages: 3,
        };

        let batches = paginate(&entries, "Users", "empty", Accent::Normal, budget);
        let expected: String = entries.iter().map(|e| e.line()).collect();
        assert_eq!(joined_bodies(&batches), expected);
    }

    #[test]
    fn oversized_line_lands_alone_and_uncut() {
        let big = "y".repeat(200);
        let entries = [entry("u-1", "small"), entry("u-2", &big), entry("u-3", "small")];
        let budget = PageBudget {
            max_chars: 64,
            max_pages: 10,
        };

        let batches = paginate(&entries, "Users", "empty", Accent::Alert, budget);

        assert_eq!(batches.len(), 1);
        let pages = &batches[0].pages;
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].body, "u-1 - small\n");
        assert_eq!(pages[1].body, format!("u-2 - {big}\n"));
        assert!(pages[1].body.chars().count() > budget.max_chars);
        assert_eq!(pages[2].body, "u-3 - small\n");
    }

    #[test]
    fn oversized_first_line_does_not_emit_an_empty_page() {
        let big = "z".repeat(200);
        let entries = [entry("u-1", &big), entry("u-2", "small")];
        let budget = PageBudget {
            max_chars: 64,
            max_pages: 10,
        };

        let batches = paginate(&entries, "Users", "empty", Accent::Normal, budget);

        let pages = &batches[0].pages;
        assert_eq!(pages.len(), 2);
        assert!(pages.iter().all(|p| !p.body.is_empty()));
        assert_eq!(pages[0].body, format!("u-1 - {big}\n"));
    }

    #[test]
    fn batch_closes_at_page_cap_and_partial_final_batch_is_emitted() {
        // One entry per page: every line overflows the next, each page holds
        // exactly one line.
        let entries: Vec<_> = (0..7).map(|i| entry(&format!("u-{i}"), "vvvv")).collect();
        let budget = PageBudget {
            max_chars: 8,
            max_pages: 3,
        };

        let batches = paginate(&entries, "Users", "empty", Accent::Normal, budget);

        let sizes: Vec<usize> = batches.iter().map(|b| b.pages.len()).collect();
        assert_eq!(sizes, [3, 3, 1]);
    }

    #[test]
    fn page_bodies_from_multiple_entries_respect_the_budget() {
        let entries: Vec<_> = (0..50).map(|i| entry(&format!("u-{i:02}"), "val")).collect();
        let budget = PageBudget {
            max_chars: 40,
            max_pages: 10,
        };

        let batches = paginate(&entries, "Users", "empty", Accent::Normal, budget);
        for page in batches.iter().flat_map(|b| b.pages.iter()) {
            if page.body.lines().count() > 1 {
                assert!(page.body.chars().count() <= budget.max_chars);
            }
        }
    }

    #[test]
    fn exact_fit_does_not_open_a_new_page() {
        // Two 16-char lines exactly fill a 32-char budget.
        let entries = [entry("abcd", "efghijkl"), entry("abcd", "efghijkl")];
        assert_eq!(entries[0].line().chars().count(), 16);
        let budget = PageBudget {
            max_chars: 32,
            max_pages: 10,
        };

        let batches = paginate(&entries, "Users", "empty", Accent::Normal, budget);
        assert_eq!(batches[0].pages.len(), 1);
        assert_eq!(batches[0].pages[0].body.chars().count(), 32);
    }

    #[test]
    fn all_batches_are_within_the_page_cap() {
        let entries: Vec<_> = (0..200).map(|i| entry(&format!("u-{i}"), "value")).collect();
        let budget = PageBudget {
            max_chars: 24,
            max_pages: 4,
        };

        let batches = paginate(&entries, "Users", "empty", Accent::Normal, budget);
        assert!(!batches.is_empty());
        for batch in &batches {
            assert!(!batch.pages.is_empty());
            assert!(batch.pages.len() <= budget.max_pages);
        }
    }
}
