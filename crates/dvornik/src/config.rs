//! Process configuration from `DVORNIK_*` environment variables.
use std::path::PathBuf;

use serde::Deserialize;

use dvornik_core::{ConfigError, RawParameters, RunParameters};
use dvornik_observe::{LoggerConfig, LoggerError, LoggerFormat, LoggerLevel, LoggerTimeZone};

/// Prefix shared by every variable.
pub const ENV_PREFIX: &str = "DVORNIK_";

/// Raw settings, one field per `DVORNIK_<FIELD>` variable.
///
/// Values stay as strings here; validation happens in [`Settings::run_parameters`]
/// and [`Settings::logger`] so that errors name the offending setting.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    pub namespace: Option<String>,
    pub pod_age: Option<String>,
    pub exceptions: Option<String>,
    pub policy: Option<String>,
    pub label_selector: Option<String>,
    pub kubeconfig: Option<PathBuf>,
    pub dry_run: Option<bool>,
    pub on_delete_error: Option<String>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub log_tz: Option<String>,
}

impl Settings {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed(ENV_PREFIX).from_env()
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX).from_iter(vars)
    }

    /// Kubeconfig path; a blank value counts as unset.
    pub fn kubeconfig(&self) -> Option<PathBuf> {
        self.kubeconfig
            .clone()
            .filter(|p| !p.as_os_str().is_empty())
    }

    pub fn run_parameters(&self) -> Result<RunParameters, ConfigError> {
        RawParameters {
            namespace: self.namespace.clone(),
            pod_age: self.pod_age.clone(),
            exceptions: self.exceptions.clone(),
            policy: self.policy.clone(),
            label_selector: self.label_selector.clone(),
            dry_run: self.dry_run,
            on_delete_error: self.on_delete_error.clone(),
        }
        .resolve()
    }

    pub fn logger(&self) -> Result<LoggerConfig, LoggerError> {
        let mut cfg = LoggerConfig::default();
        if let Some(level) = non_blank(&self.log_level) {
            cfg.level = LoggerLevel::new(level)?;
        }
        if let Some(format) = non_blank(&self.log_format) {
            cfg.format = format.parse::<LoggerFormat>()?;
        }
        if let Some(tz) = non_blank(&self.log_tz) {
            cfg.tz = tz.parse::<LoggerTimeZone>()?;
        }
        Ok(cfg)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dvornik_model::SelectionPolicy;

    fn settings(vars: &[(&str, &str)]) -> Settings {
        Settings::from_vars(
            vars.iter()
                .map(|(k, v)| (format!("{ENV_PREFIX}{k}"), v.to_string())),
        )
        .unwrap()
    }

    #[test]
    fn reads_prefixed_variables() {
        let s = settings(&[
            ("NAMESPACE", "jobs"),
            ("POD_AGE", "15"),
            ("EXCEPTIONS", r#"{"keep":"true"}"#),
            ("KUBECONFIG", "/etc/kube/config"),
            ("DRY_RUN", "true"),
        ]);

        assert_eq!(s.namespace.as_deref(), Some("jobs"));
        assert_eq!(s.kubeconfig(), Some(PathBuf::from("/etc/kube/config")));

        let params = s.run_parameters().unwrap();
        assert_eq!(params.namespace(), "jobs");
        assert!(params.dry_run().is_enabled());
        assert!(params.policy().exemptions().is_some_and(|e| e.len() == 1));
    }

    #[test]
    fn unprefixed_variables_are_ignored() {
        let s = Settings::from_vars(vec![
            ("NAMESPACE".to_string(), "jobs".to_string()),
            ("KUBECONFIG".to_string(), "/home/me/.kube/config".to_string()),
        ])
        .unwrap();

        assert!(s.namespace.is_none());
        assert!(s.kubeconfig().is_none());
    }

    #[test]
    fn missing_namespace_is_a_config_error() {
        let s = settings(&[("POD_AGE", "15")]);
        assert!(matches!(
            s.run_parameters(),
            Err(ConfigError::MissingNamespace)
        ));
    }

    #[test]
    fn blank_kubeconfig_counts_as_unset() {
        let s = settings(&[("KUBECONFIG", "")]);
        assert!(s.kubeconfig().is_none());
    }

    #[test]
    fn remote_filtered_settings() {
        let s = settings(&[
            ("NAMESPACE", "ci"),
            ("POD_AGE", "60"),
            ("POLICY", "remote-filtered"),
            ("LABEL_SELECTOR", "app=runner"),
        ]);

        let params = s.run_parameters().unwrap();
        assert_eq!(
            params.policy(),
            &SelectionPolicy::RemoteFiltered {
                label_selector: Some("app=runner".into())
            }
        );
    }

    #[test]
    fn logger_defaults_and_overrides() {
        let cfg = settings(&[]).logger().unwrap();
        assert_eq!(cfg.format, LoggerFormat::Text);
        assert_eq!(cfg.level.as_str(), "info");

        let cfg = settings(&[
            ("LOG_LEVEL", "dvornik_core=debug,info"),
            ("LOG_FORMAT", "json"),
            ("LOG_TZ", "local"),
        ])
        .logger()
        .unwrap();
        assert_eq!(cfg.format, LoggerFormat::Json);
        assert_eq!(cfg.tz, LoggerTimeZone::Local);
        assert_eq!(cfg.level.as_str(), "dvornik_core=debug,info");
    }

    #[test]
    fn bad_logger_settings_are_rejected() {
        assert!(settings(&[("LOG_FORMAT", "xml")]).logger().is_err());
        assert!(settings(&[("LOG_LEVEL", "x=nope")]).logger().is_err());
        assert!(settings(&[("LOG_TZ", "mars")]).logger().is_err());
    }

    #[test]
    fn malformed_dry_run_fails_to_deserialize() {
        let res = Settings::from_vars(vec![(
            format!("{ENV_PREFIX}DRY_RUN"),
            "maybe".to_string(),
        )]);
        assert!(res.is_err());
    }
}
