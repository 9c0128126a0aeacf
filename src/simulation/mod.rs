pub mod economy;
pub mod events;
pub mod level_run;
pub mod progression;

pub use events::{ProgressionEvent, ProgressionLog};
pub use level_run::{Interaction, LevelRun};
pub use progression::{CompletionOutcome, ProgressionLedger, RunResult};
