//! Session configuration and the setup wizard.
//!
//! A [`SessionConfig`] is resolved exactly once per run, either from the
//! defaults or by driving the [`SetupWizard`] to completion, and is
//! immutable afterwards. The wizard is an explicit state machine over
//! the pending field: the caller renders prompts and help text, feeds it
//! one line at a time, and reacts to the returned [`FieldOutcome`]. How
//! a retry was triggered (bad value, help request, whole-form rejection)
//! is carried in the outcome, never inferred by the caller.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

use crate::persona::{Persona, PersonaStore};

/// The model id used when the user skips customization.
pub const DEFAULT_MODEL: &str = "gpt-4";

/// The sampling temperature used when the user skips customization.
pub const DEFAULT_TEMPERATURE: f32 = 0.8;

/// The resolved settings for one session.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// The model id to request completions from.
    pub model: String,
    /// The sampling temperature, rounded to one decimal place.
    pub temperature: f32,
    /// The selected persona.
    pub persona: Persona,
    /// Free-form extra instructions; empty when the user gave none.
    pub instructions: String,
}

impl SessionConfig {
    /// Returns the default configuration against the given store.
    pub fn default_for(store: &PersonaStore) -> Self {
        Self {
            model: DEFAULT_MODEL.to_owned(),
            temperature: DEFAULT_TEMPERATURE,
            persona: store.default_persona(),
            instructions: String::new(),
        }
    }
}

/// An error produced while validating a configuration field.
///
/// These are always recovered locally by re-prompting the same field;
/// they never escape configuration.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The temperature input did not parse as a number.
    InvalidTemperature(String),
    /// The (rounded) temperature fell outside `[0.0, 2.0]`.
    OutOfRange(f32),
    /// The persona name is not in the store.
    UnknownPersona(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTemperature(input) => {
                write!(f, "'{input}' is not a number")
            }
            ConfigError::OutOfRange(value) => {
                write!(f, "{value} is outside the range 0.0 to 2.0")
            }
            ConfigError::UnknownPersona(name) => {
                write!(f, "unknown persona: '{name}'")
            }
        }
    }
}

impl Error for ConfigError {}

/// Parses a temperature input.
///
/// The value is rounded to one decimal place before the range check, so
/// `"1.67"` resolves to `1.7` and `"2.04"` is accepted as `2.0`.
pub fn parse_temperature(input: &str) -> Result<f32, ConfigError> {
    let trimmed = input.trim();
    let parsed: f32 = trimmed
        .parse()
        .map_err(|_| ConfigError::InvalidTemperature(trimmed.to_owned()))?;
    let rounded = (parsed * 10.0).round() / 10.0;
    if !(0.0..=2.0).contains(&rounded) {
        return Err(ConfigError::OutOfRange(rounded));
    }
    Ok(rounded)
}

/// The wizard's current step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WizardStep {
    /// Collecting the model id.
    Model,
    /// Collecting the sampling temperature.
    Temperature,
    /// Collecting the extra instructions.
    Instructions,
    /// Collecting the persona name.
    Persona,
    /// All fields collected, waiting for the user to confirm them.
    Confirm,
}

/// The result of feeding one line to the wizard.
#[derive(Clone, Debug)]
pub enum FieldOutcome {
    /// The input was the help sentinel: show the current field's
    /// guidance and re-prompt it. No value was consumed.
    Help,
    /// Validation failed; the same field is prompted again.
    Retry(ConfigError),
    /// The value was stored and the wizard moved to the next step.
    Advanced,
    /// The summary was confirmed; the configuration is final.
    Accepted(SessionConfig),
    /// The summary was rejected; collection restarts from the first
    /// field with a fresh draft.
    Restarted,
}

const HELP_SENTINEL: &str = "help";

/// The interactive configuration state machine.
///
/// Empty input keeps the field's default, so a user can hammer the enter
/// key through the whole wizard and end up with the stock configuration.
#[derive(Clone, Debug)]
pub struct SetupWizard {
    store: PersonaStore,
    step: WizardStep,
    draft: SessionConfig,
}

impl SetupWizard {
    /// Creates a wizard resolving personas against the given store.
    pub fn new(store: PersonaStore) -> Self {
        let draft = SessionConfig::default_for(&store);
        Self {
            store,
            step: WizardStep::Model,
            draft,
        }
    }

    /// Returns the step the wizard is waiting on.
    #[inline]
    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Returns the draft collected so far. Fields not yet visited hold
    /// their defaults.
    #[inline]
    pub fn draft(&self) -> &SessionConfig {
        &self.draft
    }

    /// Feeds one line of user input to the wizard.
    pub fn feed(&mut self, line: &str) -> FieldOutcome {
        let input = line.trim();
        if self.step != WizardStep::Confirm
            && input.eq_ignore_ascii_case(HELP_SENTINEL)
        {
            return FieldOutcome::Help;
        }

        match self.step {
            WizardStep::Model => {
                if !input.is_empty() {
                    self.draft.model = input.to_owned();
                }
                self.step = WizardStep::Temperature;
                FieldOutcome::Advanced
            }
            WizardStep::Temperature => {
                if !input.is_empty() {
                    match parse_temperature(input) {
                        Ok(temperature) => {
                            self.draft.temperature = temperature;
                        }
                        Err(err) => return FieldOutcome::Retry(err),
                    }
                }
                self.step = WizardStep::Instructions;
                FieldOutcome::Advanced
            }
            WizardStep::Instructions => {
                self.draft.instructions = input.to_owned();
                self.step = WizardStep::Persona;
                FieldOutcome::Advanced
            }
            WizardStep::Persona => {
                if !input.is_empty() {
                    match self.store.lookup(input) {
                        Ok(persona) => self.draft.persona = persona,
                        Err(err) => {
                            return FieldOutcome::Retry(
                                ConfigError::UnknownPersona(err.name),
                            );
                        }
                    }
                }
                self.step = WizardStep::Confirm;
                FieldOutcome::Advanced
            }
            WizardStep::Confirm => {
                if input.eq_ignore_ascii_case("y")
                    || input.eq_ignore_ascii_case("yes")
                {
                    FieldOutcome::Accepted(self.draft.clone())
                } else {
                    // Whole-form restart: no partial retry of one field.
                    self.draft = SessionConfig::default_for(&self.store);
                    self.step = WizardStep::Model;
                    FieldOutcome::Restarted
                }
            }
        }
    }
}
