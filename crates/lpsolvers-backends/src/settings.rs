//! Typed readers for the untyped options handed to adapters.

// Each backend feature uses a different subset of these
#![allow(dead_code)]

use lpsolvers_types::{LpSolverError, OptionValue, Result};

pub(crate) fn bool_option(solver: &str, key: &str, value: &OptionValue) -> Result<bool> {
    value.as_bool().ok_or_else(|| mistyped(solver, key, "bool", value))
}

/// Finite float; NaN and infinities are rejected before reaching a backend
pub(crate) fn f64_option(solver: &str, key: &str, value: &OptionValue) -> Result<f64> {
    let x = value.as_f64().ok_or_else(|| mistyped(solver, key, "float", value))?;
    if !x.is_finite() {
        return Err(LpSolverError::invalid_option(
            solver,
            key,
            format!("expected a finite number, got {}", x),
        ));
    }
    Ok(x)
}

pub(crate) fn u32_option(solver: &str, key: &str, value: &OptionValue) -> Result<u32> {
    value
        .as_u32()
        .ok_or_else(|| mistyped(solver, key, "non-negative integer", value))
}

pub(crate) fn str_option<'v>(solver: &str, key: &str, value: &'v OptionValue) -> Result<&'v str> {
    value.as_str().ok_or_else(|| mistyped(solver, key, "string", value))
}

pub(crate) fn vector_option<'v>(
    solver: &str,
    key: &str,
    value: &'v OptionValue,
) -> Result<&'v [f64]> {
    value.as_vector().ok_or_else(|| mistyped(solver, key, "vector", value))
}

/// Non-negative, finite duration in seconds
pub(crate) fn seconds_option(solver: &str, key: &str, value: &OptionValue) -> Result<f64> {
    let secs = f64_option(solver, key, value)?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(LpSolverError::invalid_option(
            solver,
            key,
            format!("expected a non-negative number of seconds, got {}", secs),
        ));
    }
    Ok(secs)
}

pub(crate) fn unknown_option(solver: &str, key: &str) -> LpSolverError {
    LpSolverError::invalid_option(solver, key, "unknown option")
}

fn mistyped(solver: &str, key: &str, expected: &str, value: &OptionValue) -> LpSolverError {
    LpSolverError::invalid_option(
        solver,
        key,
        format!("expected {}, got {} `{}`", expected, value.type_name(), value),
    )
}
