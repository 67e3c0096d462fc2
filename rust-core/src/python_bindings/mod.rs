//! PyO3 bindings for Python integration

use pyo3::prelude::*;

mod stft_bindings;

/// Python module definition
#[pymodule]
fn stft_stream(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<stft_bindings::PyStft>()?;

    // Add WindowType enum
    m.add_class::<stft_bindings::PyWindowType>()?;

    Ok(())
}
