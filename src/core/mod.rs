// Core algorithm exports
pub mod ranking;
pub mod scoring;
pub mod selection;
pub mod tags;
pub mod window;

pub use ranking::{top_three, TOP_THREE};
pub use scoring::{score_cohort, shared_tag_count};
pub use selection::{check_top_three_access, plan_selection, RANK_BONUSES};
pub use tags::{normalize_tags, slugify, tag_key};
pub use window::{active_cohort, check_match_ready, check_registration_window, check_selection_window, CohortPhase};
