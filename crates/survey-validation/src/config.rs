// File: src/config.rs
// Purpose: Survey form configuration parsing from TOML

use crate::form::{
    FormSettings, DEFAULT_ERROR_CLASS, DEFAULT_ERROR_SUFFIX, DEFAULT_FORM_ID, DEFAULT_RESET_PROMPT,
};
use crate::rules::{FieldRuleSet, FieldRules, Pattern, RuleError, EMAIL_PATTERN, PHONE_PATTERN};
use crate::validator::SurveyValidator;
use crate::{EMAIL, FNAME, PHONENUM};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Survey form configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyConfig {
    /// Id of the `<form>` element (default: "survey_form")
    #[serde(default = "default_form_id")]
    pub form_id: String,

    /// Class shared by all error indicators (default: "error")
    #[serde(default = "default_error_class")]
    pub error_class: String,

    /// Suffix appended to a field id to find its error indicator
    #[serde(default = "default_error_suffix")]
    pub error_suffix: String,

    /// Confirmation shown before the form is cleared
    #[serde(default = "default_reset_prompt")]
    pub reset_prompt: String,

    /// Fields in focus-priority order
    #[serde(default = "default_fields")]
    pub fields: Vec<FieldConfig>,
}

/// One field and its rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub name: String,

    #[serde(default = "default_true")]
    pub required: bool,

    /// Full-match regular expression applied to the raw value
    #[serde(default)]
    pub pattern: Option<String>,
}

// Default values
fn default_form_id() -> String {
    DEFAULT_FORM_ID.to_string()
}

fn default_error_class() -> String {
    DEFAULT_ERROR_CLASS.to_string()
}

fn default_error_suffix() -> String {
    DEFAULT_ERROR_SUFFIX.to_string()
}

fn default_reset_prompt() -> String {
    DEFAULT_RESET_PROMPT.to_string()
}

fn default_fields() -> Vec<FieldConfig> {
    vec![
        FieldConfig {
            name: FNAME.to_string(),
            required: true,
            pattern: None,
        },
        FieldConfig {
            name: PHONENUM.to_string(),
            required: true,
            pattern: Some(PHONE_PATTERN.to_string()),
        },
        FieldConfig {
            name: EMAIL.to_string(),
            required: true,
            pattern: Some(EMAIL_PATTERN.to_string()),
        },
    ]
}

fn default_true() -> bool {
    true
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            form_id: default_form_id(),
            error_class: default_error_class(),
            error_suffix: default_error_suffix(),
            reset_prompt: default_reset_prompt(),
            fields: default_fields(),
        }
    }
}

impl SurveyConfig {
    /// Load configuration from a TOML file
    ///
    /// Native entry point for code that validates survey submissions off
    /// the page (e.g. re-checking a posted form on the server). The WASM
    /// bindings have no filesystem and use `SurveyConfig::default()`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load from `path` if it exists, defaults otherwise
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no survey config found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SurveyConfig = toml::from_str(content).context("Invalid survey config")?;
        // Surface bad patterns at load time rather than on first submit
        config.rule_set()?;
        Ok(config)
    }

    /// Compile the configured fields into a rule set
    pub fn rule_set(&self) -> Result<FieldRuleSet, RuleError> {
        let mut set = FieldRuleSet::new();

        for field in &self.fields {
            let mut rules = FieldRules::new(&field.name);
            if field.required {
                rules = rules.required();
            }
            if let Some(source) = &field.pattern {
                let pattern = Pattern::new(source.as_str()).map_err(|source| {
                    RuleError::InvalidPattern {
                        field: field.name.clone(),
                        source,
                    }
                })?;
                rules = rules.pattern(pattern);
            }
            set.push(rules);
        }

        Ok(set)
    }

    pub fn validator(&self) -> Result<SurveyValidator, RuleError> {
        Ok(SurveyValidator::new(self.rule_set()?))
    }

    pub fn settings(&self) -> FormSettings {
        FormSettings {
            form_id: self.form_id.clone(),
            error_class: self.error_class.clone(),
            error_suffix: self.error_suffix.clone(),
            reset_prompt: self.reset_prompt.clone(),
        }
    }
}
