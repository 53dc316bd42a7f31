//! PyO3 wrapper for LaborMarket
//!
//! This module provides the Python interface to the weekly cycle.

use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use super::types::{parse_model_config, week_result_to_py, weekly_record_to_py};
use crate::orchestrator::LaborMarket as RustLaborMarket;

/// Python wrapper for the Rust labor market model
///
/// # Example (from Python)
///
/// ```python
/// from labor_market_core_rs import LaborMarket
///
/// config = {
///     "seed": 42,
///     "labor_force": 1000,
///     "separation_rate": 0.05,
///     "initial": 0.95,
///     "target": 0.90,
///     "almp": True,
/// }
///
/// model = LaborMarket.new(config)
/// weeks = model.run()
/// print(f"Final unemployment: {model.unemployment_rate():.2f}%")
/// ```
#[pyclass(name = "LaborMarket")]
pub struct PyLaborMarket {
    inner: RustLaborMarket,
}

#[pymethods]
impl PyLaborMarket {
    /// Create a model from a configuration dict
    ///
    /// Raises ValueError for missing or out-of-range fields.
    #[staticmethod]
    fn new(config: &Bound<'_, PyDict>) -> PyResult<Self> {
        let rust_config = parse_model_config(config)?;

        let inner = RustLaborMarket::new(rust_config).map_err(|e| {
            PyRuntimeError::new_err(format!("Failed to create labor market: {}", e))
        })?;

        Ok(PyLaborMarket { inner })
    }

    /// Restore a model from a `save_state()` string
    #[staticmethod]
    fn load_state(config: &Bound<'_, PyDict>, state_json: &str) -> PyResult<Self> {
        let rust_config = parse_model_config(config)?;

        let inner = RustLaborMarket::load_state(rust_config, state_json).map_err(|e| {
            PyRuntimeError::new_err(format!("Failed to load state: {}", e))
        })?;

        Ok(PyLaborMarket { inner })
    }

    /// Execute one week and return its summary dict
    fn step(&mut self, py: Python) -> PyResult<Py<PyDict>> {
        let result = self
            .inner
            .step()
            .map_err(|e| PyRuntimeError::new_err(format!("Week execution failed: {}", e)))?;

        week_result_to_py(py, &result)
    }

    /// Run every remaining week, returning one summary dict per week
    fn run(&mut self, py: Python) -> PyResult<Py<PyList>> {
        let weeks = self
            .inner
            .run()
            .map_err(|e| PyRuntimeError::new_err(format!("Run failed: {}", e)))?;

        let py_list = PyList::empty_bound(py);
        for week in &weeks {
            py_list.append(week_result_to_py(py, week)?)?;
        }
        Ok(py_list.unbind())
    }

    fn current_week(&self) -> usize {
        self.inner.current_week()
    }

    fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    /// Percent of workers unemployed right now
    fn unemployment_rate(&self) -> f64 {
        self.inner.unemployment_rate()
    }

    /// Gini coefficient of current wealth
    fn gini_coefficient(&self) -> f64 {
        self.inner.gini_coefficient()
    }

    /// Recorded weekly aggregates as a list of dicts
    fn history(&self, py: Python) -> PyResult<Py<PyList>> {
        let py_list = PyList::empty_bound(py);
        for record in self.inner.history().records() {
            py_list.append(weekly_record_to_py(py, record)?)?;
        }
        Ok(py_list.unbind())
    }

    /// Serialize the current state to a JSON string
    fn save_state(&self) -> PyResult<String> {
        self.inner
            .save_state()
            .map_err(|e| PyRuntimeError::new_err(format!("Failed to save state: {}", e)))
    }
}
