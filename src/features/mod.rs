// Feature aggregation: the items and users tables.

pub mod items;
pub mod priority;
pub mod users;

pub use items::aggregate_items;
pub use priority::{PriorityScorer, PriorityStrategy};
pub use users::{aggregate_users, ReadRates};
