use chrono::NaiveDate;
use clap::Args;
use log::info;
use rust_decimal::Decimal;
use serde_json::Value;

use finboard_core::currency::rates::ExchangeRateTable;
use finboard_core::loans::book::LoanBook;
use finboard_core::loans::deadline;
use finboard_core::loans::loan::{Loan, LoanInput};
use finboard_core::loans::report::{self, LoanQuoteInput};
use finboard_core::loans::schedule::{self, ScheduleInput};
use finboard_core::Currency;

use crate::input;

/// Display-currency options shared by the loan commands
#[derive(Args)]
pub struct DisplayArgs {
    /// Currency to show converted figures in (e.g. GBP, INR)
    #[arg(long)]
    pub currency: Option<Currency>,

    /// Path to a JSON exchange-rate table (defaults to the built-in USD/GBP/INR rates)
    #[arg(long)]
    pub rates: Option<String>,
}

impl DisplayArgs {
    fn exchange_rates(&self) -> Result<Option<ExchangeRateTable>, Box<dyn std::error::Error>> {
        match self.rates {
            Some(ref path) => {
                let table: ExchangeRateTable = input::read_json(path)?;
                table.validate()?;
                Ok(Some(table))
            }
            None => Ok(None),
        }
    }
}

/// Arguments for pricing a loan
#[derive(Args)]
pub struct AmortizeArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed, in the reference currency
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Nominal annual interest rate in percent (5.5 = 5.5%)
    #[arg(long, alias = "apr")]
    pub rate: Option<Decimal>,

    /// Term in whole years
    #[arg(long, alias = "years")]
    pub term: Option<u32>,

    /// Origination date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    #[command(flatten)]
    pub display: DisplayArgs,
}

impl AmortizeArgs {
    fn required_terms(&self) -> Result<(Decimal, Decimal, u32), Box<dyn std::error::Error>> {
        Ok((
            self.principal
                .ok_or("--principal is required (or provide --input)")?,
            self.rate.ok_or("--rate is required (or provide --input)")?,
            self.term.ok_or("--term is required (or provide --input)")?,
        ))
    }
}

pub fn run_amortize(args: AmortizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let quote_input: LoanQuoteInput = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        data
    } else {
        let (principal, rate, term) = args.required_terms()?;
        LoanQuoteInput {
            principal,
            annual_rate_percent: rate,
            term_years: term,
            start_date: args.start_date,
            display_currency: args.display.currency.clone(),
            exchange_rates: args.display.exchange_rates()?,
        }
    };

    let result = report::quote_loan(&quote_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for a month-by-month schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed, in the reference currency
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Nominal annual interest rate in percent (5.5 = 5.5%)
    #[arg(long, alias = "apr")]
    pub rate: Option<Decimal>,

    /// Term in whole years
    #[arg(long, alias = "years")]
    pub term: Option<u32>,

    /// Origination date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule_input: ScheduleInput = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        data
    } else {
        ScheduleInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
            term_years: args.term.ok_or("--term is required (or provide --input)")?,
            start_date: args.start_date,
        }
    };

    let result = schedule::build_amortization_schedule(&schedule_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for the loan book overview
#[derive(Args)]
pub struct LoansArgs {
    /// Path to a JSON array of loans (defaults to the sample loans)
    #[arg(long)]
    pub input: Option<String>,

    /// Evaluation date for deadlines (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Add a loan originated today: name for the new loan
    #[arg(long)]
    pub add: Option<String>,

    /// Principal of the loan being added
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual rate in percent of the loan being added
    #[arg(long, alias = "apr")]
    pub rate: Option<Decimal>,

    /// Term in years of the loan being added
    #[arg(long, alias = "years")]
    pub term: Option<u32>,

    /// Remove loans by id before summarising
    #[arg(long, value_delimiter = ',')]
    pub remove: Vec<String>,

    #[command(flatten)]
    pub display: DisplayArgs,
}

pub fn run_loans(args: LoansArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let today = args.today.unwrap_or_else(deadline::today);

    let mut book = if let Some(ref path) = args.input {
        let loans: Vec<Loan> = input::read_json(path)?;
        LoanBook::from_loans(loans)?
    } else if let Some(loans) = input::read_stdin::<Vec<Loan>>()? {
        LoanBook::from_loans(loans)?
    } else {
        LoanBook::with_sample_loans()?
    };

    for id in &args.remove {
        let removed = book.remove(id)?;
        info!("removed loan {} ({})", removed.id, removed.name);
    }

    if let Some(name) = args.add {
        let loan = book.add(
            LoanInput {
                name,
                principal: args.principal.ok_or("--principal is required with --add")?,
                interest_rate: args.rate.ok_or("--rate is required with --add")?,
                term_years: args.term.ok_or("--term is required with --add")?,
            },
            today,
        )?;
        info!("added loan {} ({}) due {}", loan.id, loan.name, loan.deadline);
    }

    let result = report::summarize_book(
        &book,
        today,
        &args.display.currency,
        &args.display.exchange_rates()?,
    )?;
    Ok(serde_json::to_value(result)?)
}
