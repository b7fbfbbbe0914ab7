//! College ROI CLI
//!
//! Runs the EFC, ROI, loan and trend calculators from the command line and
//! prints results as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use college_roi::{
    affordability::FinancialProfile,
    assumptions::LoanAssumptions,
    institution::load_institutions,
    loan::{payoff_date, yearly_schedule},
    InstitutionType, LoanInputs, RoiInputs, ScenarioRunner, TrendAnchor,
};
use serde::Serialize;
use serde_json::json;

/// College cost, affordability and ROI calculations.
#[derive(Parser)]
#[command(name = "college-roi")]
#[command(about = "College cost, affordability and ROI calculations", long_about = None)]
struct Cli {
    /// Directory with assumption CSV overrides
    #[arg(long, global = true)]
    assumptions: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Control {
    Public,
    PrivateNonprofit,
    #[value(name = "private-forprofit")]
    PrivateForProfit,
}

impl From<Control> for InstitutionType {
    fn from(control: Control) -> Self {
        match control {
            Control::Public => InstitutionType::Public,
            Control::PrivateNonprofit => InstitutionType::PrivateNonprofit,
            Control::PrivateForProfit => InstitutionType::PrivateForProfit,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Plan {
    Standard,
    Graduated,
    /// Standard payments over the extended term
    Extended,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate Expected Family Contribution.
    ///
    /// With --cost, also assesses affordability and debt burden.
    Efc {
        #[arg(long, default_value_t = 0.0)]
        student_income: f64,
        #[arg(long, default_value_t = 0.0)]
        student_assets: f64,
        #[arg(long)]
        parent_income: f64,
        #[arg(long, default_value_t = 0.0)]
        parent_assets: f64,
        #[arg(long, default_value_t = 2)]
        parents: u8,
        #[arg(long, default_value_t = 2)]
        dependents: u32,
        #[arg(long, default_value_t = 1)]
        in_college: u32,
        /// Student files as independent (no parental contribution)
        #[arg(long)]
        independent: bool,
        #[arg(long)]
        parent_age: Option<u32>,
        /// Two-letter state code
        #[arg(long)]
        state: Option<String>,
        /// Annual institution cost to assess
        #[arg(long)]
        cost: Option<f64>,
        #[arg(long, value_enum, default_value = "public")]
        control: Control,
    },

    /// Project degree ROI for one program, or compare institutions from a CSV.
    Roi {
        /// Institutions CSV to compare instead of a single program
        #[arg(long, conflicts_with_all = ["tuition", "earnings"])]
        institutions: Option<PathBuf>,
        /// Use in-state tuition when comparing institutions
        #[arg(long)]
        in_state: bool,
        #[arg(long, required_unless_present = "institutions")]
        tuition: Option<f64>,
        #[arg(long, default_value_t = 0.0)]
        fees: f64,
        #[arg(long)]
        room_board: Option<f64>,
        #[arg(long)]
        books: Option<f64>,
        #[arg(long)]
        years: Option<u32>,
        /// Median earnings 10 years after entry
        #[arg(long, required_unless_present = "institutions")]
        earnings: Option<f64>,
        #[arg(long)]
        baseline: Option<f64>,
        #[arg(long)]
        include_room_board: bool,
        #[arg(long)]
        include_books: bool,
        #[arg(long)]
        career_years: Option<u32>,
        /// Yearly grant aid
        #[arg(long, default_value_t = 0.0)]
        grants: f64,
        /// Yearly scholarship aid
        #[arg(long, default_value_t = 0.0)]
        scholarships: f64,
    },

    /// Amortize a student loan.
    Loan {
        #[arg(long)]
        principal: f64,
        /// Annual rate as a fraction (0.055) or percentage (5.5)
        #[arg(long)]
        rate: f64,
        /// Term in years; not accepted with --plan extended
        #[arg(long)]
        years: Option<u32>,
        #[arg(long, value_enum, default_value = "standard")]
        plan: Plan,
        /// Print the year-by-year schedule
        #[arg(long)]
        schedule: bool,
        /// First payment date (YYYY-MM-DD) for the payoff date
        #[arg(long)]
        start_date: Option<NaiveDate>,
    },

    /// Extrapolate cost, salary and ROI trends from one anchor year.
    Trend {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        avg_cost: f64,
        #[arg(long)]
        base_salary: Option<f64>,
        #[arg(long, default_value_t = 5)]
        years_back: u32,
        #[arg(long, default_value_t = 3)]
        years_ahead: u32,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Extended plans have a fixed term, so an explicit --years is an error
fn loan_inputs(
    plan: Plan,
    principal: f64,
    rate: f64,
    years: Option<u32>,
    loan: &LoanAssumptions,
) -> Result<LoanInputs> {
    if matches!(plan, Plan::Extended) && years.is_some() {
        anyhow::bail!(
            "--years cannot be combined with --plan extended (term is {} years)",
            loan.extended_term_years
        );
    }
    let term = years.unwrap_or(loan.standard_term_years);
    Ok(match plan {
        Plan::Standard => LoanInputs::standard(principal, rate, term),
        Plan::Graduated => LoanInputs::graduated(principal, rate, term),
        Plan::Extended => LoanInputs::extended(principal, rate, loan),
    })
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let runner = match &cli.assumptions {
        Some(dir) => ScenarioRunner::from_csv_path(dir)
            .with_context(|| format!("Failed to load assumptions from {}", dir.display()))?,
        None => ScenarioRunner::new(),
    };

    match cli.command {
        Commands::Efc {
            student_income,
            student_assets,
            parent_income,
            parent_assets,
            parents,
            dependents,
            in_college,
            independent,
            parent_age,
            state,
            cost,
            control,
        } => {
            let profile = FinancialProfile {
                student_income,
                student_assets,
                parent_income,
                parent_assets,
                number_of_parents: parents,
                number_of_dependents: dependents,
                number_in_college: in_college,
                is_student_dependent: !independent,
                parent_age,
                state_of_residence: state,
            };
            let efc = runner.efc(&profile)?;

            match cost {
                Some(cost) => {
                    let assessment = runner.affordability(efc.total_efc, cost, control.into())?;
                    let debt = runner.debt_burden(efc.total_efc, cost)?;
                    print_json(&json!({
                        "efc": efc,
                        "affordability": assessment,
                        "tier_label": assessment.affordability_tier.label(),
                        "tier_description": assessment.affordability_tier.description(),
                        "debt_burden": debt,
                    }))
                }
                None => print_json(&efc),
            }
        }

        Commands::Roi {
            institutions,
            in_state,
            tuition,
            fees,
            room_board,
            books,
            years,
            earnings,
            baseline,
            include_room_board,
            include_books,
            career_years,
            grants,
            scholarships,
        } => {
            if let Some(path) = institutions {
                let institutions = load_institutions(&path)
                    .with_context(|| format!("Failed to load {}", path.display()))?;
                let rows =
                    runner.compare(&institutions, in_state, include_room_board, include_books);
                return print_json(&rows);
            }

            let defaults = &runner.assumptions().roi;
            let inputs = RoiInputs {
                annual_tuition: tuition.context("--tuition is required")?,
                annual_fees: fees,
                annual_room_board: room_board,
                annual_books_supplies: books,
                years_of_study: years.unwrap_or(defaults.years_of_study),
                median_earnings_10yr: earnings.context("--earnings is required")?,
                baseline_earnings: baseline.unwrap_or(defaults.baseline_earnings),
                include_room_board,
                include_books_supplies: include_books,
                career_years: career_years.unwrap_or(defaults.career_years),
                annual_grants: grants,
                annual_scholarships: scholarships,
            };
            let result = runner.roi(&inputs)?;
            let npv = runner.npv(&inputs)?;
            print_json(&json!({
                "result": result,
                "payback": result.payback_years.label(),
                "payback_after_gift_aid": result.payback_years_after_gift_aid.label(),
                "npv": npv,
            }))
        }

        Commands::Loan {
            principal,
            rate,
            years,
            plan,
            schedule,
            start_date,
        } => {
            let loan = &runner.assumptions().loan;
            let inputs = loan_inputs(plan, principal, rate, years, loan)?;

            let result = runner.loan(&inputs)?;
            let yearly = if schedule {
                Some(yearly_schedule(&inputs, loan)?)
            } else {
                None
            };
            let payoff = start_date
                .map(|start| payoff_date(start, &inputs))
                .transpose()?;
            print_json(&json!({
                "result": result,
                "yearly_schedule": yearly,
                "payoff_date": payoff,
            }))
        }

        Commands::Trend {
            year,
            avg_cost,
            base_salary,
            years_back,
            years_ahead,
        } => {
            let anchor = TrendAnchor {
                year,
                avg_cost,
                base_salary: base_salary.unwrap_or(runner.assumptions().trend.base_salary),
                data_points: 0,
            };
            let historical = runner.trend(&anchor, years_back)?;
            let predictions = runner.predict(&historical, years_ahead)?;
            let category_trends: Vec<_> = runner
                .trend_summary(&historical)
                .into_iter()
                .map(|trend| json!({ "label": trend.category.label(), "trend": trend }))
                .collect();
            print_json(&json!({
                "historical": historical,
                "predictions": predictions,
                "category_trends": category_trends,
            }))
        }
    }
}
