//! Recording adapters that journal interactions.

pub mod link_fs;

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tracing::warn;

use crate::journal::JournalRecorder;

/// Journal a call with a plain (non-Result) return value.
pub(crate) fn record_interaction<I, O>(
    recorder: &Arc<Mutex<JournalRecorder>>,
    port: &str,
    op: &str,
    input: &I,
    output: &O,
) where
    I: Serialize,
    O: Serialize,
{
    let (Ok(input_json), Ok(output_json)) =
        (serde_json::to_value(input), serde_json::to_value(output))
    else {
        warn!(port, op, "dropping journal entry that could not be serialized");
        return;
    };
    let mut guard = recorder.lock().unwrap_or_else(PoisonError::into_inner);
    guard.record(port, op, input_json, output_json);
}

/// Journal a `Result<T, E>` call using the Ok/Err JSON convention.
///
/// - `Ok(v)` is serialized as `{"Ok": v}`
/// - `Err(e)` is serialized as `{"Err": e.to_string()}`
pub(crate) fn record_result<T, E, I>(
    recorder: &Arc<Mutex<JournalRecorder>>,
    port: &str,
    op: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    let output = match result {
        Ok(v) => match serde_json::to_value(v) {
            Ok(inner) => serde_json::json!({ "Ok": inner }),
            Err(_) => {
                warn!(port, op, "dropping journal entry that could not be serialized");
                return;
            }
        },
        Err(e) => serde_json::json!({ "Err": e.to_string() }),
    };
    record_interaction(recorder, port, op, input, &output);
}
