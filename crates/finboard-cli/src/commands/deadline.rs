use chrono::NaiveDate;
use clap::Args;
use serde_json::Value;

use finboard_core::loans::deadline::{self, DeadlineInput};

use crate::input;

/// Arguments for a single deadline check
#[derive(Args)]
pub struct DeadlineArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Payoff deadline (YYYY-MM-DD)
    #[arg(long)]
    pub deadline: Option<NaiveDate>,

    /// Evaluation date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub today: Option<NaiveDate>,
}

pub fn run_deadline(args: DeadlineArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let deadline_input: DeadlineInput = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        data
    } else {
        DeadlineInput {
            deadline: args
                .deadline
                .ok_or("--deadline is required (or provide --input)")?,
            as_of: args.today,
        }
    };

    let assessment = deadline::assess_deadline(&deadline_input);
    Ok(serde_json::to_value(assessment)?)
}
