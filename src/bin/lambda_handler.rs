//! AWS Lambda handler for college cost and ROI calculations
//!
//! Accepts a JSON request with an `operation` field and returns the matching
//! calculation. Works both when invoked directly (the payload is the request)
//! and behind a Lambda Function URL (the request is the `body` string).

use chrono::NaiveDate;
use college_roi::{
    affordability::FinancialProfile,
    assumptions::loader::DEFAULT_ASSUMPTIONS_PATH,
    loan::{payoff_date, yearly_schedule},
    CalcError, InstitutionType, LoanInputs, RoiInputs, ScenarioRunner, TrendAnchor, TrendPoint,
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::Deserialize;
use serde_json::{json, Value};

/// One calculation request
#[derive(Debug, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
enum CalculationRequest {
    Efc {
        profile: FinancialProfile,
    },
    Affordability {
        efc: f64,
        institution_cost: f64,
        institution_type: InstitutionType,
    },
    DebtBurden {
        efc: f64,
        /// Yearly cost before EFC
        annual_cost: f64,
    },
    Roi {
        inputs: RoiInputs,
    },
    Loan {
        loan: LoanInputs,
        /// Include the year-by-year schedule
        #[serde(default)]
        schedule: bool,
        #[serde(default)]
        start_date: Option<NaiveDate>,
    },
    Trend {
        anchor: TrendAnchor,
        #[serde(default = "default_years_back")]
        years_back: u32,
        #[serde(default = "default_years_ahead")]
        years_ahead: u32,
    },
}

fn default_years_back() -> u32 {
    5
}

fn default_years_ahead() -> u32 {
    3
}

fn dispatch(runner: &ScenarioRunner, request: CalculationRequest) -> college_roi::Result<Value> {
    let value = match request {
        CalculationRequest::Efc { profile } => serde_json::to_value(runner.efc(&profile)?)?,
        CalculationRequest::Affordability {
            efc,
            institution_cost,
            institution_type,
        } => {
            let assessment = runner.affordability(efc, institution_cost, institution_type)?;
            json!({
                "result": assessment,
                "tier_label": assessment.affordability_tier.label(),
                "tier_description": assessment.affordability_tier.description(),
            })
        }
        CalculationRequest::DebtBurden {
            efc,
            annual_cost,
        } => serde_json::to_value(runner.debt_burden(efc, annual_cost)?)?,
        CalculationRequest::Roi { inputs } => {
            let result = runner.roi(&inputs)?;
            let npv = runner.npv(&inputs)?;
            json!({
                "result": result,
                "payback_label": result.payback_years.label(),
                "payback_after_gift_aid": result.payback_years_after_gift_aid.label(),
                "npv": npv,
            })
        }
        CalculationRequest::Loan {
            loan,
            schedule,
            start_date,
        } => {
            let result = runner.loan(&loan)?;
            let yearly = if schedule {
                Some(yearly_schedule(&loan, &runner.assumptions().loan)?)
            } else {
                None
            };
            let payoff = match start_date {
                Some(start) => Some(payoff_date(start, &loan)?),
                None => None,
            };
            json!({
                "result": result,
                "yearly_schedule": yearly,
                "payoff_date": payoff,
            })
        }
        CalculationRequest::Trend {
            anchor,
            years_back,
            years_ahead,
        } => {
            let historical = runner.trend(&anchor, years_back)?;
            let predictions = runner.predict(&historical, years_ahead)?;
            json!({
                "historical": historical,
                "predictions": predictions,
                "category_trends": labelled_trends(runner, &historical),
            })
        }
    };
    Ok(value)
}

fn labelled_trends(runner: &ScenarioRunner, history: &[TrendPoint]) -> Vec<Value> {
    runner
        .trend_summary(history)
        .into_iter()
        .map(|trend| json!({ "label": trend.category.label(), "trend": trend }))
        .collect()
}

fn response(status: u16, body: &Value) -> Value {
    json!({
        "statusCode": status,
        "headers": {
            "Content-Type": "application/json",
            "Access-Control-Allow-Origin": "*",
            "Access-Control-Allow-Methods": "POST, OPTIONS",
            "Access-Control-Allow-Headers": "Content-Type",
        },
        "body": body.to_string(),
    })
}

fn error_response(status: u16, message: &str) -> Value {
    response(status, &json!({ "error": message }))
}

/// Pull the request out of a direct invocation or a Function URL event
fn request_payload(payload: Value) -> Result<Value, serde_json::Error> {
    match payload.get("body") {
        Some(Value::String(body)) if body.trim().is_empty() => Ok(json!({})),
        Some(Value::String(body)) => serde_json::from_str(body),
        _ => Ok(payload),
    }
}

fn handle(runner: &ScenarioRunner, payload: Value) -> Value {
    let method = payload
        .pointer("/requestContext/http/method")
        .and_then(Value::as_str);
    if method == Some("OPTIONS") {
        return response(200, &json!({}));
    }

    let parsed = request_payload(payload).and_then(serde_json::from_value);
    let request: CalculationRequest = match parsed {
        Ok(r) => r,
        Err(e) => return error_response(400, &format!("Invalid request: {}", e)),
    };

    match dispatch(runner, request) {
        Ok(body) => response(200, &body),
        Err(e @ CalcError::InvalidInput { .. }) => error_response(400, &e.to_string()),
        Err(e) => {
            log::error!("calculation failed: {}", e);
            error_response(500, "Calculation failed")
        }
    }
}

/// Missing tables in the directory fall back to compiled-in defaults
fn load_runner() -> Result<ScenarioRunner, Error> {
    let path = std::env::var("ASSUMPTIONS_PATH")
        .unwrap_or_else(|_| DEFAULT_ASSUMPTIONS_PATH.to_string());
    log::info!("loading assumptions from {}", path);
    Ok(ScenarioRunner::from_csv_path(std::path::Path::new(&path))?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let runner = load_runner()?;
    let runner = &runner;

    run(service_fn(move |event: LambdaEvent<Value>| async move {
        Ok::<Value, Error>(handle(runner, event.payload))
    }))
    .await
}
