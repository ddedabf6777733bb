//! Configured languages, the active language and fallback chains.
//!
//! The registry itself is immutable shared data built once from
//! [`LanguageSettings`]. What changes per request is the language context
//! (ambient locale and language lock), which lives in task-local storage
//! inside [`scope`] and in thread-local storage otherwise. It is never
//! process-global.

mod code;
pub use code::LanguageCode;

mod context;
pub use context::{activate, current_locale, deactivate, in_scope, scope, sync_scope, LockGuard};

mod registry;
pub use registry::{LanguageInfo, Languages};

mod settings;
pub use settings::{LanguageEntry, LanguageSettings};

/// Suffix of proxy names and lookups that enable fallback (`title_any`,
/// `title_en_any`).
pub const FALLBACK_SUFFIX: &str = "any";

/// Alias of the translation table joined for one specific language.
///
/// Pure function of the table name and the language code, which is what lets
/// the planner recognize a join it already made for that language.
pub fn table_alias(table: &str, code: &LanguageCode) -> String {
    format!("{}_{}", table, code.sanitized())
}

/// Alias of an eager-loaded translation column in a query's projection.
pub fn field_alias(field: &str, code: &LanguageCode) -> String {
    format!("_trans_{}_{}", field, code.sanitized())
}
