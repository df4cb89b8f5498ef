pub mod enrich;
pub mod genres;
pub mod session;

pub use enrich::Enricher;
pub use genres::GenreCatalog;
pub use session::{BrowseSession, FlowKind, FlowPhase, FlowState};
