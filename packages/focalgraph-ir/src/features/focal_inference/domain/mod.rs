pub mod function_body;
pub mod verdict;

pub use function_body::FunctionBody;
pub use verdict::{CacheSlot, MutationKind, Verdict};
