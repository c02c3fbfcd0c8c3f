//! The shared list/selection/pagination/mutation core every screen
//! composes instead of hand-rolling its own fetch loop.

pub mod cache;
pub mod controller;
pub mod envelope;
pub mod mutation;
pub mod page;
pub mod query;
pub mod selection;

pub use cache::{QueryCache, QueryCacheService};
pub use controller::{FetchPlan, ListQueryController, LoadState};
pub use envelope::{normalize, PageData};
pub use mutation::{BulkDeleteReport, MutationKind, MutationToken, MutationTracker};
pub use page::ListPageVm;
pub use query::{ListQuery, QueryKey, DEFAULT_PAGE_SIZE};
pub use selection::SelectionSet;
