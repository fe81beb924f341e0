//! Request normalization: raw payload in, canonical request out.

use serde::{Deserialize, Serialize};

use crate::normalize::action_signal::normalize_action_signal;
use crate::normalize::error::ValidationFailure;
use crate::normalize::payload::{lookup, RawPayload};
use crate::normalize::row_data::normalize_row_data;
use crate::normalize::scalar::{coerce_float, coerce_int, parse_float, parse_int};

/// Accepted names for the action-signal field, in lookup order. The first
/// one holding a non-null value is used.
pub const ACTION_SIGNAL_FIELDS: &[&str] = &["action01", "actionSignalStr"];

/// Accepted names for the row-data field.
pub const ROW_DATA_FIELDS: &[&str] = &["rowDataJson"];

/// The optional engine parameters, by wire name.
pub const PARAMETER_FIELDS: [&str; 14] = [
    "binSizeSec",
    "preSec",
    "actSec",
    "postSec",
    "startPaddingSplitSec",
    "testTimeShiftSec",
    "endPaddingSec",
    "manualNoActPeriodSec",
    "maxLag",
    "minPThreshold",
    "minRequiredSpikes",
    "earlyStopPatience",
    "defaultIntervalSec",
    "defaultNumActions",
];

/// Optional engine parameters. `None` means "use the engine default".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameters {
    pub bin_size_sec: Option<i64>,
    pub pre_sec: Option<i64>,
    pub act_sec: Option<i64>,
    pub post_sec: Option<i64>,
    pub start_padding_split_sec: Option<i64>,
    pub test_time_shift_sec: Option<i64>,
    pub end_padding_sec: Option<i64>,
    pub manual_no_act_period_sec: Option<i64>,
    pub max_lag: Option<i64>,
    pub min_p_threshold: Option<f64>,
    pub min_required_spikes: Option<i64>,
    pub early_stop_patience: Option<i64>,
    pub default_interval_sec: Option<i64>,
    pub default_num_actions: Option<i64>,
}

/// The single shape handed to an engine.
///
/// Serialized as one flat JSON object: `actionSignal`, `rowData` and the
/// fourteen parameter names (null when absent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalRequest {
    /// Non-empty string over `0`/`1`.
    pub action_signal: String,
    /// JSON text, not interpreted here.
    pub row_data: String,
    #[serde(flatten)]
    pub parameters: Parameters,
}

/// Normalizes payloads into canonical requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestNormalizer {
    strict_parameters: bool,
}

impl RequestNormalizer {
    /// Create a normalizer. With `strict_parameters`, unreadable optional
    /// parameters fail the request instead of being dropped.
    pub fn new(strict_parameters: bool) -> Self {
        Self { strict_parameters }
    }

    /// Validate and coerce a payload. Unknown keys are ignored.
    pub fn normalize(&self, payload: &RawPayload) -> Result<CanonicalRequest, ValidationFailure> {
        let action_signal = normalize_action_signal(lookup(payload, ACTION_SIGNAL_FIELDS))
            .ok_or(ValidationFailure::InvalidActionSignal)?;
        let row_data = normalize_row_data(lookup(payload, ROW_DATA_FIELDS))
            .ok_or(ValidationFailure::MissingOrInvalidRowData)?;

        let fields = ParameterReader {
            payload,
            strict: self.strict_parameters,
        };
        let parameters = Parameters {
            bin_size_sec: fields.int("binSizeSec")?,
            pre_sec: fields.int("preSec")?,
            act_sec: fields.int("actSec")?,
            post_sec: fields.int("postSec")?,
            start_padding_split_sec: fields.int("startPaddingSplitSec")?,
            test_time_shift_sec: fields.int("testTimeShiftSec")?,
            end_padding_sec: fields.int("endPaddingSec")?,
            manual_no_act_period_sec: fields.int("manualNoActPeriodSec")?,
            max_lag: fields.int("maxLag")?,
            min_p_threshold: fields.float("minPThreshold")?,
            min_required_spikes: fields.int("minRequiredSpikes")?,
            early_stop_patience: fields.int("earlyStopPatience")?,
            default_interval_sec: fields.int("defaultIntervalSec")?,
            default_num_actions: fields.int("defaultNumActions")?,
        };

        Ok(CanonicalRequest {
            action_signal,
            row_data,
            parameters,
        })
    }
}

/// Normalize with the lenient parameter policy.
pub fn normalize(payload: &RawPayload) -> Result<CanonicalRequest, ValidationFailure> {
    RequestNormalizer::default().normalize(payload)
}

struct ParameterReader<'a> {
    payload: &'a RawPayload,
    strict: bool,
}

impl ParameterReader<'_> {
    fn int(&self, field: &'static str) -> Result<Option<i64>, ValidationFailure> {
        let value = lookup(self.payload, &[field]);
        if self.strict {
            parse_int(value).map_err(|_| ValidationFailure::InvalidParameter {
                field,
                expected: "an integer",
            })
        } else {
            Ok(coerce_int(value))
        }
    }

    fn float(&self, field: &'static str) -> Result<Option<f64>, ValidationFailure> {
        let value = lookup(self.payload, &[field]);
        if self.strict {
            parse_float(value).map_err(|_| ValidationFailure::InvalidParameter {
                field,
                expected: "a number",
            })
        } else {
            Ok(coerce_float(value))
        }
    }
}
