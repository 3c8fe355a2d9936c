pub mod pipeline;
pub mod report;
pub mod search;
pub mod session;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod traits;
pub mod url_match;

pub use search::SearchPipeline;
pub use session::{SearchEvent, SearchEventKind, SearchSession, SearchState};
pub use traits::ArenaSource;
