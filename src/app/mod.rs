//! Campaign orchestration: steps, progress lines, and step reports.
mod campaign;
mod progress;
mod step;
mod summary;

#[cfg(test)]
mod tests;

pub use campaign::{CampaignReport, StepReport, config_origin, run_campaign};
pub use progress::{format_elapsed, progress_line};
pub use step::run_step;
pub use summary::{print_summary, recap_lines, summary_lines};
