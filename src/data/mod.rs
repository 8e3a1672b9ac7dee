pub mod resolver;
pub mod types;

pub use resolver::{ResolveError, StaticResolver, TokenResolver, DEFAULT_DELAY};
pub use types::*;
