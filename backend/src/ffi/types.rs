//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust types and PyO3-compatible types (PyDict, PyList).

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::metrics::WeeklyRecord;
use crate::orchestrator::{ModelConfig, ModelVariant, WeekResult};
use crate::policy::LockInRejection;

// ========================================================================
// PyDict Extraction Helpers
// ========================================================================

/// Extract a required field, raising ValueError when it is missing
fn extract_required<T>(dict: &Bound<'_, PyDict>, key: &str) -> PyResult<T>
where
    for<'py> T: FromPyObject<'py>,
{
    dict.get_item(key)?
        .ok_or_else(|| PyValueError::new_err(format!("Missing required field '{}'", key)))?
        .extract()
}

/// Extract a field with a default value if missing
fn extract_with_default<T>(dict: &Bound<'_, PyDict>, key: &str, default: T) -> PyResult<T>
where
    for<'py> T: FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) => value.extract(),
        None => Ok(default),
    }
}

// ========================================================================
// Configuration Parsers
// ========================================================================

/// Convert Python dict to ModelConfig
///
/// Keys mirror the JSON config: `seed`, `labor_force`, `separation_rate`,
/// `initial` and `target` are required; the rest fall back to defaults.
/// `variant` is `"plain"` or `"insurance"`, `lock_in_rejection` is
/// `"uncounted"` or `"counted"`.
pub fn parse_model_config(py_config: &Bound<'_, PyDict>) -> PyResult<ModelConfig> {
    let mut config = ModelConfig::new(
        extract_required(py_config, "seed")?,
        extract_required(py_config, "labor_force")?,
        extract_required(py_config, "separation_rate")?,
        extract_required(py_config, "initial")?,
        extract_required(py_config, "target")?,
    );

    config.hiring_factor = extract_with_default(py_config, "hiring_factor", config.hiring_factor)?;
    config.steps = extract_with_default(py_config, "steps", config.steps)?;
    config.almp = extract_with_default(py_config, "almp", config.almp)?;
    config.skill_income_factor =
        extract_with_default(py_config, "skill_income_factor", config.skill_income_factor)?;
    config.threat_factor = extract_with_default(py_config, "threat_factor", config.threat_factor)?;
    config.rolling_initial_eligibility = extract_with_default(
        py_config,
        "rolling_initial_eligibility",
        config.rolling_initial_eligibility,
    )?;
    config.initial_wealth = extract_with_default(py_config, "initial_wealth", config.initial_wealth)?;

    let variant: String = extract_with_default(py_config, "variant", "insurance".to_string())?;
    config.variant = match variant.as_str() {
        "plain" => ModelVariant::Plain,
        "insurance" => ModelVariant::Insurance,
        other => {
            return Err(PyValueError::new_err(format!(
                "Unknown variant '{}' (expected 'plain' or 'insurance')",
                other
            )))
        }
    };

    let lock_in: String = extract_with_default(py_config, "lock_in_rejection", "uncounted".to_string())?;
    config.lock_in_rejection = match lock_in.as_str() {
        "uncounted" => LockInRejection::Uncounted,
        "counted" => LockInRejection::Counted,
        other => {
            return Err(PyValueError::new_err(format!(
                "Unknown lock_in_rejection '{}' (expected 'uncounted' or 'counted')",
                other
            )))
        }
    };

    config
        .validate()
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    Ok(config)
}

// ========================================================================
// Result Converters
// ========================================================================

/// Convert WeekResult to Python dict
pub fn week_result_to_py(py: Python, result: &WeekResult) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);

    dict.set_item("week", result.week)?;
    dict.set_item("separations", result.separations)?;
    dict.set_item("hires", result.hires)?;
    dict.set_item("unfilled_vacancies", result.unfilled_vacancies)?;
    dict.set_item("vacancies_carried_over", result.vacancies_carried_over)?;
    dict.set_item("employed", result.employed)?;
    dict.set_item("unemployed", result.unemployed)?;
    dict.set_item("unemployment_rate", result.unemployment_rate)?;
    dict.set_item("gini_coefficient", result.gini_coefficient)?;

    Ok(dict.unbind())
}

/// Convert WeeklyRecord to Python dict (`t`, `unemployment_rate`, `gini_coefficient`)
pub fn weekly_record_to_py(py: Python, record: &WeeklyRecord) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);

    dict.set_item("t", record.t)?;
    dict.set_item("unemployment_rate", record.unemployment_rate)?;
    dict.set_item("gini_coefficient", record.gini_coefficient)?;

    Ok(dict.unbind())
}
