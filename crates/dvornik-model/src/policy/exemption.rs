use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Labels, ModelError, ModelResult};

/// Label rules protecting pods from collection.
///
/// A pod is exempt when it carries *any* label whose key is in the policy with the policy's value.
/// Matching does not depend on label iteration order.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExemptionPolicy(BTreeMap<String, String>);

impl ExemptionPolicy {
    /// Policy with no rules: nothing is exempt.
    pub fn none() -> Self {
        Self::default()
    }

    /// Parse a policy from a JSON object of string values.
    ///
    /// Blank input and JSON `null` mean "no exemptions".
    pub fn from_json(raw: &str) -> ModelResult<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::none());
        }
        serde_json::from_str::<Option<Self>>(raw)
            .map(Option::unwrap_or_default)
            .map_err(|e| ModelError::MalformedExemptions(e.to_string()))
    }

    /// Add a rule, builder-style.
    pub fn with_rule(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the first rule (in key order) that the labels satisfy.
    pub fn matching_rule<'a>(&'a self, labels: &Labels) -> Option<(&'a str, &'a str)> {
        self.0
            .iter()
            .find(|(key, value)| labels.has(key, value))
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns `true` if `labels` satisfy at least one rule.
    pub fn exempts(&self, labels: &Labels) -> bool {
        self.matching_rule(labels).is_some()
    }
}

impl<K, V> FromIterator<(K, V)> for ExemptionPolicy
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pairs: &[(&str, &str)]) -> Labels {
        pairs.iter().copied().collect()
    }

    #[test]
    fn blank_json_is_empty_policy() {
        assert!(ExemptionPolicy::from_json("").unwrap().is_empty());
        assert!(ExemptionPolicy::from_json("   ").unwrap().is_empty());
    }

    #[test]
    fn null_json_is_empty_policy() {
        assert!(ExemptionPolicy::from_json("null").unwrap().is_empty());
        assert!(ExemptionPolicy::from_json(" null ").unwrap().is_empty());
    }

    #[test]
    fn parses_json_object() {
        let policy = ExemptionPolicy::from_json(r#"{"env":"prod","keep":"true"}"#).unwrap();
        assert_eq!(policy.len(), 2);
        assert!(policy.exempts(&labels(&[("keep", "true")])));
    }

    #[test]
    fn rejects_non_string_values_and_non_objects() {
        for bad in [r#"{"env":1}"#, r#"["env"]"#, "{", "true"] {
            let err = ExemptionPolicy::from_json(bad);
            assert!(
                matches!(err, Err(ModelError::MalformedExemptions(_))),
                "expected MalformedExemptions for {bad:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn value_must_match_exactly() {
        let policy = ExemptionPolicy::none().with_rule("env", "prod");

        assert!(policy.exempts(&labels(&[("env", "prod")])));
        assert!(!policy.exempts(&labels(&[("env", "staging")])));
        assert!(!policy.exempts(&labels(&[("tier", "prod")])));
        assert!(!policy.exempts(&Labels::new()));
    }

    #[test]
    fn any_matching_key_exempts() {
        let policy = ExemptionPolicy::none()
            .with_rule("a", "1")
            .with_rule("b", "2");

        // `a` is present with a non-matching value; `b` still exempts.
        let pod_labels = labels(&[("a", "0"), ("b", "2")]);
        assert!(policy.exempts(&pod_labels));
        assert_eq!(policy.matching_rule(&pod_labels), Some(("b", "2")));
    }

    #[test]
    fn empty_policy_exempts_nothing() {
        assert!(!ExemptionPolicy::none().exempts(&labels(&[("env", "prod")])));
    }
}
