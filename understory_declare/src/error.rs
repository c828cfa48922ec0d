// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised while declaring properties, and the policy deciding which
//! of them reach the caller.

use std::path::PathBuf;

/// Result alias used throughout the crate.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors produced by property declaration, reads and template loading.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// No setter matches the property name.
    #[error("unknown property '{property}' for '{type_name}'")]
    UnknownProperty {
        /// Name of the configured type.
        type_name: &'static str,
        /// The property name as supplied by the caller.
        property: String,
    },

    /// More than one setter matches the property name exactly.
    #[error("ambiguous property '{property}'; matched to '{}'", .candidates.join(", "))]
    AmbiguousProperty {
        /// The property name as supplied by the caller.
        property: String,
        /// Full names of all matching setters.
        candidates: Vec<String>,
    },

    /// The template name is not present in the type's template store.
    #[error("unknown template '{template}' for '{type_name}'")]
    UnknownTemplate {
        /// Name of the configured type.
        type_name: &'static str,
        /// The requested template name.
        template: String,
    },

    /// The `template` property received something other than a string.
    #[error("expected property 'template' of '{type_name}' to be a string, got {found}")]
    TemplateNotString {
        /// Name of the configured type.
        type_name: &'static str,
        /// Kind of the value that was supplied.
        found: &'static str,
    },

    /// A color-valued property received a value that cannot be read as a color.
    #[error("invalid color value {value} for property '{property}'")]
    InvalidColorValue {
        /// The property name as supplied by the caller.
        property: String,
        /// Debug rendering of the offending value.
        value: String,
    },

    /// The number of positional arguments does not match the setter.
    #[error("'{setter}' takes {expected} argument(s), {found} given")]
    ArityMismatch {
        /// Full setter name.
        setter: String,
        /// Number of arguments the setter takes.
        expected: usize,
        /// Number of arguments supplied.
        found: usize,
    },

    /// A positional argument has the wrong kind for the setter parameter.
    #[error("'{setter}' argument {position}: expected {expected}, found {found}")]
    InvalidArgument {
        /// Full setter name.
        setter: String,
        /// Zero-based argument position.
        position: usize,
        /// Kind the setter parameter accepts.
        expected: &'static str,
        /// Kind of the value that was supplied.
        found: &'static str,
    },

    /// The delegate behind a prefix has not been created.
    #[error("delegate '{prefix}' of '{type_name}' is not available")]
    DelegateUnavailable {
        /// Name of the configured type.
        type_name: &'static str,
        /// The delegate prefix.
        prefix: String,
    },

    /// A template resource is structurally invalid.
    #[error("invalid templates for '{type_name}': {message}")]
    TemplateFormat {
        /// Name of the type the resource belongs to.
        type_name: String,
        /// What is wrong with the resource.
        message: String,
    },

    /// A template resource exists but could not be read.
    #[error("failed to read templates from {}", .path.display())]
    TemplateIo {
        /// Path of the resource.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A template resource is not valid JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    /// Returns `true` for errors raised while invoking a setter
    /// ([`ArityMismatch`](Self::ArityMismatch) and
    /// [`InvalidArgument`](Self::InvalidArgument)).
    ///
    /// These are the errors [`Policy::Lenient`] swallows.
    #[must_use]
    pub fn is_invocation_error(&self) -> bool {
        matches!(
            self,
            Self::ArityMismatch { .. } | Self::InvalidArgument { .. }
        )
    }
}

/// How setter invocation errors are treated during declaration.
///
/// Name resolution, template and color errors always surface. Invocation
/// errors surface under [`Strict`](Self::Strict) and are dropped under
/// [`Lenient`](Self::Lenient), turning the declaration into a no-op.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Policy {
    /// Surface every error.
    #[default]
    Strict,
    /// Ignore arity and argument-kind mismatches.
    Lenient,
}

impl Policy {
    /// Applies this policy to the result of a setter invocation.
    pub(crate) fn filter(self, result: ConfigResult<()>) -> ConfigResult<()> {
        match result {
            Err(err) if self == Self::Lenient && err.is_invocation_error() => {
                tracing::debug!(error = %err, "ignoring setter invocation error");
                Ok(())
            }
            other => other,
        }
    }
}
