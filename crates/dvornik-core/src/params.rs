//! Validated run parameters.
//!
//! Raw values are collected once at the process boundary into [`RawParameters`]
//! and resolved into a [`RunParameters`] before any remote call is made.
use std::{fmt, str::FromStr};

use thiserror::Error;
use time::Duration;

use dvornik_model::{
    ExemptionPolicy, Flag, ModelError, Namespace, SelectionMode, SelectionPolicy,
    StalenessThreshold,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("namespace must be provided")]
    MissingNamespace,

    #[error("pod age must be provided")]
    MissingPodAge,

    #[error("exemptions cannot be combined with the remote-filtered policy")]
    ExemptionsWithRemoteFilter,

    #[error("a label selector requires the remote-filtered policy")]
    SelectorWithoutRemoteFilter,

    #[error("unknown delete error policy: {0} (expected: abort|continue)")]
    UnknownDeleteErrorPolicy(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// What the remover does when a single delete fails.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DeleteErrorPolicy {
    /// Stop the run at the first failed delete.
    #[default]
    Abort,
    /// Record the failure, keep going, and fail the run once every pod was attempted.
    Continue,
}

impl FromStr for DeleteErrorPolicy {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "continue" => Ok(Self::Continue),
            _ => Err(ConfigError::UnknownDeleteErrorPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for DeleteErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeleteErrorPolicy::Abort => "abort",
            DeleteErrorPolicy::Continue => "continue",
        })
    }
}

/// Unvalidated parameters, exactly as acquired from the environment.
#[derive(Debug, Clone, Default)]
pub struct RawParameters {
    pub namespace: Option<String>,
    pub pod_age: Option<String>,
    pub exceptions: Option<String>,
    pub policy: Option<String>,
    pub label_selector: Option<String>,
    pub dry_run: Option<bool>,
    pub on_delete_error: Option<String>,
}

impl RawParameters {
    /// Validate and resolve into [`RunParameters`].
    pub fn resolve(self) -> Result<RunParameters, ConfigError> {
        let namespace = self.namespace.ok_or(ConfigError::MissingNamespace)?;
        let pod_age = self.pod_age.ok_or(ConfigError::MissingPodAge)?;
        let max_age = StalenessThreshold::parse_minutes(&pod_age)?;

        let mode = match self.policy.as_deref() {
            Some(raw) if !raw.trim().is_empty() => raw.parse::<SelectionMode>()?,
            _ => SelectionMode::default(),
        };
        let exemptions = match self.exceptions.as_deref() {
            Some(raw) => ExemptionPolicy::from_json(raw)?,
            None => ExemptionPolicy::none(),
        };
        let label_selector = self.label_selector.filter(|s| !s.trim().is_empty());

        let policy = match mode {
            SelectionMode::Exempting => {
                if label_selector.is_some() {
                    return Err(ConfigError::SelectorWithoutRemoteFilter);
                }
                SelectionPolicy::Exempting { exemptions }
            }
            SelectionMode::RemoteFiltered => {
                if !exemptions.is_empty() {
                    return Err(ConfigError::ExemptionsWithRemoteFilter);
                }
                SelectionPolicy::RemoteFiltered { label_selector }
            }
        };

        let on_delete_error = match self.on_delete_error.as_deref() {
            Some(raw) if !raw.trim().is_empty() => raw.parse()?,
            _ => DeleteErrorPolicy::default(),
        };

        Ok(RunParameters::new(namespace, max_age, policy)?
            .with_dry_run(self.dry_run.unwrap_or(false).into())
            .with_delete_error_policy(on_delete_error))
    }
}

/// Everything a single run needs, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunParameters {
    namespace: Namespace,
    max_age: Duration,
    policy: SelectionPolicy,
    dry_run: Flag,
    on_delete_error: DeleteErrorPolicy,
}

impl RunParameters {
    /// Namespace must be non-blank and `max_age` positive.
    pub fn new(
        namespace: impl Into<Namespace>,
        max_age: Duration,
        policy: SelectionPolicy,
    ) -> Result<Self, ConfigError> {
        let namespace = namespace.into().trim().to_string();
        if namespace.is_empty() {
            return Err(ConfigError::MissingNamespace);
        }
        if !max_age.is_positive() {
            return Err(ModelError::NonPositiveAge(max_age.whole_minutes()).into());
        }
        Ok(Self {
            namespace,
            max_age,
            policy,
            dry_run: Flag::disabled(),
            on_delete_error: DeleteErrorPolicy::default(),
        })
    }

    pub fn with_dry_run(mut self, dry_run: Flag) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_delete_error_policy(mut self, policy: DeleteErrorPolicy) -> Self {
        self.on_delete_error = policy;
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    pub fn policy(&self) -> &SelectionPolicy {
        &self.policy
    }

    pub fn dry_run(&self) -> Flag {
        self.dry_run
    }

    pub fn on_delete_error(&self) -> DeleteErrorPolicy {
        self.on_delete_error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(namespace: &str, pod_age: &str) -> RawParameters {
        RawParameters {
            namespace: Some(namespace.to_string()),
            pod_age: Some(pod_age.to_string()),
            ..RawParameters::default()
        }
    }

    #[test]
    fn minimal_parameters_use_exempting_policy() {
        let params = raw("default", "30").resolve().unwrap();

        assert_eq!(params.namespace(), "default");
        assert_eq!(params.max_age(), Duration::minutes(30));
        assert_eq!(params.policy(), &SelectionPolicy::default());
        assert!(params.dry_run().is_disabled());
        assert_eq!(params.on_delete_error(), DeleteErrorPolicy::Abort);
    }

    #[test]
    fn missing_or_blank_namespace_is_rejected() {
        let err = RawParameters {
            pod_age: Some("5".into()),
            ..RawParameters::default()
        }
        .resolve();
        assert!(matches!(err, Err(ConfigError::MissingNamespace)));

        assert!(matches!(
            raw("  ", "5").resolve(),
            Err(ConfigError::MissingNamespace)
        ));
    }

    #[test]
    fn bad_pod_age_is_rejected() {
        assert!(matches!(
            raw("ns", "0").resolve(),
            Err(ConfigError::Model(ModelError::NonPositiveAge(0)))
        ));
        assert!(matches!(
            raw("ns", "soon").resolve(),
            Err(ConfigError::Model(ModelError::UnparseableAge(_)))
        ));
        assert!(matches!(
            raw("ns", &i64::MAX.to_string()).resolve(),
            Err(ConfigError::Model(ModelError::AgeOutOfRange(_)))
        ));

        let missing = RawParameters {
            namespace: Some("ns".into()),
            ..RawParameters::default()
        };
        assert!(matches!(missing.resolve(), Err(ConfigError::MissingPodAge)));
    }

    #[test]
    fn exceptions_are_parsed_into_the_policy() {
        let params = RawParameters {
            exceptions: Some(r#"{"env":"prod"}"#.into()),
            ..raw("ns", "10")
        }
        .resolve()
        .unwrap();

        let exemptions = params.policy().exemptions().unwrap();
        assert_eq!(exemptions, &ExemptionPolicy::none().with_rule("env", "prod"));
    }

    #[test]
    fn malformed_exceptions_are_rejected() {
        let err = RawParameters {
            exceptions: Some("{not json".into()),
            ..raw("ns", "10")
        }
        .resolve();
        assert!(matches!(
            err,
            Err(ConfigError::Model(ModelError::MalformedExemptions(_)))
        ));
    }

    #[test]
    fn remote_filtered_policy_carries_selector() {
        let params = RawParameters {
            policy: Some("remote-filtered".into()),
            label_selector: Some("app=batch".into()),
            ..raw("ns", "10")
        }
        .resolve()
        .unwrap();

        assert_eq!(params.policy().label_selector(), Some("app=batch"));
        assert!(params.policy().exemptions().is_none());
    }

    #[test]
    fn conflicting_policy_options_are_rejected() {
        let selector_without_mode = RawParameters {
            label_selector: Some("app=batch".into()),
            ..raw("ns", "10")
        };
        assert!(matches!(
            selector_without_mode.resolve(),
            Err(ConfigError::SelectorWithoutRemoteFilter)
        ));

        let exemptions_with_remote = RawParameters {
            policy: Some("remote-filtered".into()),
            exceptions: Some(r#"{"env":"prod"}"#.into()),
            ..raw("ns", "10")
        };
        assert!(matches!(
            exemptions_with_remote.resolve(),
            Err(ConfigError::ExemptionsWithRemoteFilter)
        ));
    }

    #[test]
    fn dry_run_and_delete_policy_are_applied() {
        let params = RawParameters {
            dry_run: Some(true),
            on_delete_error: Some("Continue".into()),
            ..raw("ns", "10")
        }
        .resolve()
        .unwrap();

        assert!(params.dry_run().is_enabled());
        assert_eq!(params.on_delete_error(), DeleteErrorPolicy::Continue);

        let bad = RawParameters {
            on_delete_error: Some("retry".into()),
            ..raw("ns", "10")
        };
        assert!(matches!(
            bad.resolve(),
            Err(ConfigError::UnknownDeleteErrorPolicy(_))
        ));
    }

    #[test]
    fn new_validates_directly() {
        assert!(matches!(
            RunParameters::new("", Duration::minutes(1), SelectionPolicy::default()),
            Err(ConfigError::MissingNamespace)
        ));
        assert!(matches!(
            RunParameters::new("ns", Duration::ZERO, SelectionPolicy::default()),
            Err(ConfigError::Model(ModelError::NonPositiveAge(0)))
        ));
    }
}
