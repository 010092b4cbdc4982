//! Lead filtering: single conditions, AND/OR groups, segment membership and
//! the table's search/sort pass.
//!
//! Everything here is a pure function over borrowed leads. Callers own the
//! collection and decide when to re-run.

mod group;
mod predicate;
mod search;
mod segment;

pub use group::{apply_filter, evaluate_group};
pub use predicate::{compare_as_dates, evaluate_condition, parse_date, text_matches};
pub use search::{compare_leads, matches_search, search_and_sort, SortOrder, TableQuery};
pub use segment::{count_segment, segment_matches, segment_members};
