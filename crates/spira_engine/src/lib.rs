pub mod engine;
pub mod mirror;
pub mod personality;
pub mod session;
pub mod templates;

pub use engine::{CompanionEngine, EntryOutcome, FALLBACK_RESPONSE};
pub use mirror::{preferred_response_mode, resolve_mode};
pub use personality::personality_type;
pub use session::{SessionContext, SessionItem};
