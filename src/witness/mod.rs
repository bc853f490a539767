pub mod ledger;
pub mod query;
pub mod record;

pub use ledger::{LEDGER_ENV, append, ledger_path};
pub use query::QueryFilter;
pub use record::{WitnessDraft, WitnessRecord};
