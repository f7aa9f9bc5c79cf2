//! Python bindings, built with the `python` feature.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::exceptions::{PyKeyError, PyValueError};
use pyo3::prelude::*;

use crate::config::{LoaderConfig, ScheduleConfig};
use crate::loader::load_path;
use crate::models::TaskView;
use crate::schedule::{Schedule, ScheduleError};

fn to_py_err(err: ScheduleError) -> PyErr {
    match err {
        ScheduleError::NotFound(_) => PyKeyError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

/// Read-only task snapshot (PyO3 wrapper).
#[pyclass(name = "TaskView", frozen)]
#[derive(Clone, Debug)]
pub struct PyTaskView {
    #[pyo3(get)]
    pub name: String,
    #[pyo3(get)]
    pub duration: u64,
    #[pyo3(get)]
    pub earliest_start: Option<u64>,
    #[pyo3(get)]
    pub earliest_finish: Option<u64>,
    #[pyo3(get)]
    pub latest_start: Option<u64>,
    #[pyo3(get)]
    pub latest_finish: Option<u64>,
    #[pyo3(get)]
    pub total_float: Option<u64>,
    #[pyo3(get)]
    pub predecessors: Vec<String>,
    #[pyo3(get)]
    pub successors: Vec<String>,
}

impl From<TaskView> for PyTaskView {
    fn from(view: TaskView) -> Self {
        Self {
            name: view.name,
            duration: view.duration,
            earliest_start: view.earliest_start,
            earliest_finish: view.earliest_finish,
            latest_start: view.latest_start,
            latest_finish: view.latest_finish,
            total_float: view.total_float,
            predecessors: view.predecessors,
            successors: view.successors,
        }
    }
}

#[pymethods]
impl PyTaskView {
    fn is_critical(&self) -> bool {
        self.total_float == Some(0)
    }

    fn __repr__(&self) -> String {
        format!(
            "TaskView(name={:?}, duration={}, total_float={:?})",
            self.name, self.duration, self.total_float
        )
    }
}

/// Precedence diagram with cached critical path analysis (PyO3 wrapper).
#[pyclass(name = "Schedule")]
pub struct PySchedule {
    inner: Schedule,
}

#[pymethods]
impl PySchedule {
    #[new]
    #[pyo3(signature = (verbosity=0))]
    fn new(verbosity: u8) -> Self {
        Self {
            inner: Schedule::with_config(ScheduleConfig::with_verbosity(verbosity)),
        }
    }

    /// Load a delimited task file.
    #[staticmethod]
    #[pyo3(signature = (path, delimiter=',', verbosity=0))]
    fn load(path: String, delimiter: char, verbosity: u8) -> PyResult<Self> {
        let config = LoaderConfig {
            delimiter,
            verbosity,
            ..LoaderConfig::default()
        };
        let inner = load_path(&path, &config).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { inner })
    }

    #[pyo3(signature = (name, duration, predecessors=None))]
    fn add_task(
        &mut self,
        name: &str,
        duration: u64,
        predecessors: Option<Vec<String>>,
    ) -> PyResult<()> {
        let predecessors = predecessors.unwrap_or_default();
        let preds: Vec<&str> = predecessors.iter().map(String::as_str).collect();
        self.inner
            .add_task(name, duration, &preds)
            .map(|_| ())
            .map_err(to_py_err)
    }

    fn remove_task(&mut self, name: &str) -> PyResult<PyTaskView> {
        self.inner
            .remove_task(name)
            .map(PyTaskView::from)
            .map_err(to_py_err)
    }

    fn find_task(&self, name: &str) -> Option<PyTaskView> {
        self.inner.find_task(name).map(PyTaskView::from)
    }

    fn add_dependency(&mut self, task: &str, predecessor: &str) -> PyResult<bool> {
        self.inner
            .add_dependency(task, predecessor)
            .map_err(to_py_err)
    }

    fn compute_times(&mut self) -> PyResult<()> {
        self.inner.compute_times().map_err(to_py_err)
    }

    fn project_duration(&mut self) -> PyResult<u64> {
        self.inner.project_duration().map_err(to_py_err)
    }

    fn critical_tasks(&mut self) -> PyResult<Vec<PyTaskView>> {
        let tasks = self.inner.critical_tasks().map_err(to_py_err)?;
        Ok(tasks.into_iter().map(PyTaskView::from).collect())
    }

    fn critical_paths(&mut self) -> PyResult<Vec<Vec<PyTaskView>>> {
        let paths = self.inner.critical_paths().map_err(to_py_err)?;
        Ok(paths
            .into_iter()
            .map(|path| path.into_iter().map(PyTaskView::from).collect())
            .collect())
    }

    fn tasks(&self) -> Vec<PyTaskView> {
        self.inner.tasks().into_iter().map(PyTaskView::from).collect()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "Schedule(tasks={}, generation={})",
            self.inner.len(),
            self.inner.generation()
        )
    }
}

/// The pdm_schedule Python module.
#[pymodule]
fn pdm_schedule(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PySchedule>()?;
    m.add_class::<PyTaskView>()?;
    Ok(())
}
