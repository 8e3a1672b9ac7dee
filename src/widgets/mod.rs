mod loading;
mod prompt;
mod terminal;

pub use loading::{Loading, LoadingWidget};
pub use prompt::{Prompt, PromptOutcome};
pub use terminal::Terminal;
