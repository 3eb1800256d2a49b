use crate::error::{ProvgenError, Result};
use crate::params::{ParamValue, ParameterSet};
use crate::regions::RegionCatalog;
use crate::schema::{ParamSpec, Schema};
use serde::Serialize;

// ---------------------------------------------------------------------------
// PromptSource
// ---------------------------------------------------------------------------

/// Parameter name whose answers are checked against the region catalog.
pub const LOCATION_PARAM: &str = "location";

/// Rejected answers tolerated per parameter before collection aborts.
const MAX_REJECTED_ANSWERS: u32 = 3;

/// Source of interactively supplied parameter values.
///
/// `Ok(None)` means the channel is closed (stdin hit EOF, or the caller
/// chose a never-prompt policy); the collector turns that into
/// `CollectionAborted` rather than inventing a value.
pub trait PromptSource {
    fn prompt(&mut self, spec: &ParamSpec) -> Result<Option<String>>;

    /// Called when an answer was rejected before re-prompting. Interactive
    /// sources display the reason; the default does nothing.
    fn reject(&mut self, _spec: &ParamSpec, _reason: &str) {}
}

/// Never-prompt policy: every missing required parameter aborts the run.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl PromptSource for NoInput {
    fn prompt(&mut self, _spec: &ParamSpec) -> Result<Option<String>> {
        Ok(None)
    }
}

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// Non-fatal finding surfaced during collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationWarning {
    pub param: String,
    pub message: String,
}

/// A completed collection: seed values plus everything obtained from the
/// prompt source.
#[derive(Debug, Clone)]
pub struct Collected {
    pub params: ParameterSet,
    pub warnings: Vec<ValidationWarning>,
}

/// Fill `seed` until every required spec in `schema` has a non-empty value.
///
/// Specs are visited in schema order; only required ones the seed does not
/// already cover are prompted. Seeded values are trusted as-is. The schema
/// itself is never mutated. On success the returned set satisfies every
/// required spec; otherwise the error is `CollectionAborted` and no partial
/// result escapes.
pub fn collect(
    schema: &Schema,
    seed: ParameterSet,
    regions: &RegionCatalog,
    prompter: &mut dyn PromptSource,
) -> Result<Collected> {
    let mut params = seed;
    let mut warnings = Vec::new();

    for spec in schema.params() {
        if !spec.required || params.contains(&spec.name) {
            continue;
        }
        let value = obtain(spec, regions, prompter, &mut warnings)?;
        params.insert(spec.name.clone(), ParamValue::String(value));
    }

    Ok(Collected { params, warnings })
}

fn obtain(
    spec: &ParamSpec,
    regions: &RegionCatalog,
    prompter: &mut dyn PromptSource,
    warnings: &mut Vec<ValidationWarning>,
) -> Result<String> {
    let mut rejected = 0u32;
    loop {
        let answer = prompter.prompt(spec)?.ok_or_else(|| ProvgenError::CollectionAborted {
            param: spec.name.clone(),
            reason: "no input source available".into(),
        })?;
        let answer = answer.trim().to_string();

        let rejection = if answer.is_empty() {
            Some("a value is required".to_string())
        } else if spec.name == LOCATION_PARAM {
            match regions.validate(&answer) {
                Some(true) => None,
                None => {
                    warnings.push(ValidationWarning {
                        param: spec.name.clone(),
                        message: format!(
                            "'{answer}' accepted without validation: region catalog unavailable"
                        ),
                    });
                    None
                }
                Some(false) => Some(format!(
                    "'{answer}' is not a known region (e.g., {})",
                    regions.examples(3)
                )),
            }
        } else {
            None
        };

        match rejection {
            None => return Ok(answer),
            Some(reason) => {
                rejected += 1;
                if rejected >= MAX_REJECTED_ANSWERS {
                    return Err(ProvgenError::CollectionAborted {
                        param: spec.name.clone(),
                        reason: format!("no usable value after {MAX_REJECTED_ANSWERS} attempts"),
                    });
                }
                prompter.reject(spec, &reason);
            }
        }
    }
}
