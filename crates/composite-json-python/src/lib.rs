//! # composite-json-python
//!
//! Python bindings for composite-json, built with PyO3.
//!
//! Python objects are treated as a dynamic tree: `list` and `tuple` are sequences,
//! `dict` with `str` keys is a mapping, `None` is null. Everything else (numbers,
//! strings, booleans, other containers) is not composite.
//!
//! Exposes the following functions to Python as the `composite_json` module:
//!
//! - `is_composite(obj)` -- whether `obj` converts to a composite JSON value
//! - `normalize(obj)` -- a fresh copy made of `list`/`dict`/`None`, or `None`
//! - `dumps(obj)` -- compact JSON text for a composite object
//! - `loads(text)` -- JSON text -> nested `list`/`dict`/`None`

use composite_json::{from_dynamic, to_dynamic, DynamicBuilder, DynamicTree, JsonValue};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList, PyTuple};

/// A Python object seen through the dynamic-tree probes.
struct PyNode<'py>(Bound<'py, PyAny>);

impl<'py> PyNode<'py> {
    /// `None` for Python's `None`.
    fn wrap(object: Bound<'py, PyAny>) -> Option<Self> {
        (!object.is_none()).then_some(PyNode(object))
    }
}

impl<'py> DynamicTree for PyNode<'py> {
    fn as_sequence(&self) -> Option<Vec<Option<Self>>> {
        if let Ok(list) = self.0.downcast::<PyList>() {
            return Some(list.iter().map(PyNode::wrap).collect());
        }
        if let Ok(tuple) = self.0.downcast::<PyTuple>() {
            return Some(tuple.iter().map(PyNode::wrap).collect());
        }
        None
    }

    fn as_mapping(&self) -> Option<Vec<(String, Option<Self>)>> {
        let dict = self.0.downcast::<PyDict>().ok()?;
        dict.iter()
            .map(|(key, value)| {
                let key = key.extract::<String>().ok()?;
                Some((key, PyNode::wrap(value)))
            })
            .collect()
    }
}

/// Builds `list`/`dict`/`None` trees.
struct PyBuilder<'py> {
    py: Python<'py>,
}

impl<'py> DynamicBuilder for PyBuilder<'py> {
    type Node = Bound<'py, PyAny>;
    type Error = PyErr;

    fn null(&mut self) -> PyResult<Bound<'py, PyAny>> {
        Ok(self.py.None().into_bound(self.py))
    }

    fn sequence(&mut self, items: Vec<Bound<'py, PyAny>>) -> PyResult<Bound<'py, PyAny>> {
        Ok(PyList::new(self.py, items)?.into_any())
    }

    fn mapping(
        &mut self,
        entries: Vec<(String, Bound<'py, PyAny>)>,
    ) -> PyResult<Bound<'py, PyAny>> {
        let dict = PyDict::new(self.py);
        for (key, value) in entries {
            dict.set_item(key, value)?;
        }
        Ok(dict.into_any())
    }
}

fn convert(obj: &Bound<'_, PyAny>) -> Option<JsonValue> {
    from_dynamic(&PyNode(obj.clone()))
}

/// Check whether a Python object is a composite JSON value.
///
/// Args:
///     obj: Any Python object.
///
/// Returns:
///     True if `obj` is a list, tuple or str-keyed dict whose nested values are all
///     lists, tuples, str-keyed dicts or None.
#[pyfunction]
fn is_composite(obj: &Bound<'_, PyAny>) -> bool {
    convert(obj).is_some()
}

/// Copy a composite Python object into plain lists, dicts and None.
///
/// Tuples become lists. Returns None if `obj` is not composite.
#[pyfunction]
fn normalize<'py>(
    py: Python<'py>,
    obj: &Bound<'py, PyAny>,
) -> PyResult<Option<Bound<'py, PyAny>>> {
    match convert(obj) {
        Some(value) => to_dynamic(&value, &mut PyBuilder { py }).map(Some),
        None => Ok(None),
    }
}

/// Encode a composite Python object as compact JSON, keys sorted.
///
/// Raises:
///     ValueError: If `obj` is not composite.
#[pyfunction]
fn dumps(obj: &Bound<'_, PyAny>) -> PyResult<String> {
    let value =
        convert(obj).ok_or_else(|| PyValueError::new_err("not a composite JSON value"))?;
    composite_json::to_json_string(&value).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Decode JSON text into nested lists, dicts and None.
///
/// Raises:
///     ValueError: If the text is not valid JSON or contains a scalar anywhere.
#[pyfunction]
fn loads<'py>(py: Python<'py>, json: &str) -> PyResult<Bound<'py, PyAny>> {
    let value =
        composite_json::from_json_str(json).map_err(|e| PyValueError::new_err(e.to_string()))?;
    to_dynamic(&value, &mut PyBuilder { py })
}

/// The native extension module, exposed as `composite_json._native`.
#[pymodule]
fn _native(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(is_composite, m)?)?;
    m.add_function(wrap_pyfunction!(normalize, m)?)?;
    m.add_function(wrap_pyfunction!(dumps, m)?)?;
    m.add_function(wrap_pyfunction!(loads, m)?)?;
    Ok(())
}
