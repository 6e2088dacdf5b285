use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use hourglass_rs::{SafeTimeProvider, TimeSource};
use uuid::Uuid;

use crate::age::local_today;
use crate::api::dto::SimulationResponse;
use crate::api::error::ApiError;
use crate::api::AppState;
use crate::validation::SimulationForm;

/// `POST /load-simulator`
pub async fn simulate(
    State(state): State<AppState>,
    body: Result<Json<SimulationForm>, JsonRejection>,
) -> Result<Json<SimulationResponse>, ApiError> {
    let span = tracing::info_span!("simulate", simulation_id = %Uuid::new_v4());
    span.in_scope(|| {
        let Json(form) = body.map_err(|rejection| ApiError::MalformedBody(rejection.body_text()))?;
        run(&state, &form).map(Json)
    })
}

fn run(state: &AppState, form: &SimulationForm) -> Result<SimulationResponse, ApiError> {
    // one reading of the clock serves both validation and the calculation
    let today = local_today(&SafeTimeProvider::new(TimeSource::System));

    let request = form.validate(today)?;
    let result = state.simulator.simulate(&request, today)?;

    tracing::info!(
        loan_amount = %request.loan_amount,
        term_months = request.payment_term_months,
        installment = %result.monthly_installment,
        "simulation completed"
    );

    Ok(SimulationResponse::from(result))
}
