//! CLI commands

mod changes;
mod completions;
mod release_notes;
mod report;
#[cfg(test)]
mod test_support;

pub use changes::ChangesCommand;
pub use completions::CompletionsCommand;
pub use release_notes::ReleaseNotesCommand;
