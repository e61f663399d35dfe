use pyo3::prelude::*;
use pyo3::types::PyDict;
use std::sync::Arc;
use tokio::runtime::Runtime;

use crate::{BotConfig, BotResponse, FuriaBot as RustFuriaBot};

/// Python wrapper for FuriaBot
#[pyclass(name = "FuriaBot")]
struct PyFuriaBot {
    bot: Arc<RustFuriaBot>,
    runtime: Arc<Runtime>,
}

fn runtime_error(e: impl ToString) -> PyErr {
    PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(e.to_string())
}

#[pymethods]
impl PyFuriaBot {
    /// Create new bot; `config_json` overrides defaults, else `FURIA_*` env vars apply
    #[new]
    fn new(config_json: Option<String>) -> PyResult<Self> {
        let config = match config_json {
            Some(json) => BotConfig::from_json(&json).map_err(runtime_error)?,
            None => BotConfig::from_env(),
        };

        let runtime = Arc::new(Runtime::new().map_err(runtime_error)?);
        let bot = RustFuriaBot::new(config).map_err(runtime_error)?;

        Ok(Self {
            bot: Arc::new(bot),
            runtime,
        })
    }

    /// Handle one command; returns {"message": str, "is_final": bool}
    fn on_user_command(&self, py: Python<'_>, user_id: String, text: String) -> PyResult<PyObject> {
        let bot = self.bot.clone();
        let runtime = self.runtime.clone();
        // A cache miss sleeps and hits the network; let the host keep running
        let response = py.allow_threads(move || {
            runtime.block_on(async move { bot.on_user_command(&user_id, &text).await })
        });

        bot_response_to_py(py, &response)
    }

    /// Stripped command if `message` starts with the bot mention, else None
    fn addressed_command(&self, message: String) -> Option<String> {
        self.bot.addressed_command(&message).map(str::to_string)
    }

    /// Get cache statistics
    fn cache_stats(&self) -> PyResult<PyObject> {
        let stats = self.bot.cache_stats();

        Python::with_gil(|py| {
            let dict = PyDict::new(py);
            dict.set_item("entries", stats.entries)?;
            dict.set_item("hits", stats.hits)?;
            dict.set_item("misses", stats.misses)?;
            dict.set_item("maxsize", stats.maxsize)?;
            Ok(dict.into())
        })
    }
}

/// Convert BotResponse to Python dict
fn bot_response_to_py(py: Python, response: &BotResponse) -> PyResult<PyObject> {
    let dict = PyDict::new(py);
    dict.set_item("message", &response.message)?;
    dict.set_item("is_final", response.is_final)?;
    Ok(dict.into())
}

/// Python module
#[pymodule]
fn furia_esports_bot(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<PyFuriaBot>()?;
    m.add("__version__", crate::VERSION)?;
    Ok(())
}
