pub mod model;
pub mod report;
pub mod score;

use crate::core::model::DayInputs;
use crate::core::score::HealthScoreResult;
use crate::store::{DayStore, SavedScore, StoreError};
use chrono::NaiveDate;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DayEvaluation {
    pub date: NaiveDate,
    pub inputs: DayInputs,
    pub result: HealthScoreResult,
}

/// Loads the day and scores it. Never writes; see [`persist_score`].
pub fn evaluate_day(store: &DayStore, date: NaiveDate) -> Result<DayEvaluation, StoreError> {
    let day = store.load_day(date)?;
    let inputs = DayInputs::from(&day);
    let result = score::compute_score(&inputs);
    debug!(%date, score = result.score, category = %result.category.category, "day evaluated");

    Ok(DayEvaluation {
        date,
        inputs,
        result,
    })
}

pub fn persist_score(
    store: &DayStore,
    evaluation: &DayEvaluation,
) -> Result<SavedScore, StoreError> {
    store.save_score(evaluation.date, &evaluation.result)
}
