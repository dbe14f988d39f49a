//! Policy command handler

use gradebook::config::Config;
use gradebook::{info, verbose, GradingPolicy};

/// Print the grading policy the configuration resolves to
///
/// # Errors
/// Returns a message when the `[grading]` section names an unknown mode or
/// missing-work policy.
pub fn run(config: &Config) -> Result<(), String> {
    let policy = config
        .grading_policy()
        .map_err(|e| format!("Invalid [grading] configuration: {e}"))?;
    info!("Effective grading policy: {policy}");
    println!("{policy}");
    verbose!("{}", describe(policy));
    Ok(())
}

/// One-line explanation of how a policy computes percentages
fn describe(policy: GradingPolicy) -> String {
    let formula = match policy.mode {
        gradebook::AggregationMode::Points => "sum(score) / sum(max_points)",
        gradebook::AggregationMode::Weighted => {
            "sum(weight * score / max_points) / sum(weight)"
        }
    };
    let over = match policy.missing_work {
        gradebook::MissingWork::Exclude => "items with a recorded submission",
        gradebook::MissingWork::ZeroFill => "all items, missing work scored as zero",
    };
    format!("Percentage = {formula} over {over}")
}
