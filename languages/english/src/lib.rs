pub mod builder;
pub mod derivation;
pub mod gate;
pub mod poetic;
pub mod prompts;
pub mod rephrase;
pub mod session;

pub use builder::{BuildOutcome, EntryBuilder};
pub use derivation::Derivation;
pub use prompts::VERSION;
pub use session::Session;

/// Terminal error strings written to the entry log.
pub mod errors {
    pub const NOT_ENGLISH: &str = "not an English word";
    pub const ENTRY_NOT_DICT: &str = "Initial entry was not a dict object";
    pub const POETIC_NOT_LIST: &str = "Poetic definitions were not a list object";
    pub const DERIVATION_CYCLE: &str = "derivation cycle";
}
