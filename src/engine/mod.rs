pub mod debounce;
pub mod search;

pub use debounce::Debouncer;
pub use search::{SearchOutcome, SearchSession};
