use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Policy — four field-name sets, one per minimization category
// ---------------------------------------------------------------------------

/// The minimization policy carried in a credential.
///
/// Each category is a set of field names. A field may be listed in more
/// than one set; the disposition resolver picks exactly one category by
/// precedence. A field absent from every set defaults to suppression.
///
/// On the wire each set is a JSON mapping whose keys are field names —
/// the values carry no meaning and are discarded on decode.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Policy {
    #[serde(default, with = "field_set")]
    pub allowed: BTreeSet<String>,
    #[serde(default, with = "field_set")]
    pub generalized: BTreeSet<String>,
    #[serde(default, with = "field_set")]
    pub noised: BTreeSet<String>,
    #[serde(default, with = "field_set")]
    pub reduced: BTreeSet<String>,
}

impl Policy {
    /// The fail-closed policy: no field authorized in any category, so
    /// every field resolves to suppression.
    pub fn deny_all() -> Self {
        Self::default()
    }

    pub fn allow<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn generalize<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.generalized.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn noise<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.noised.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn reduce<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reduced.extend(fields.into_iter().map(Into::into));
        self
    }
}

/// Serde bridge between the wire form (mapping with ignored values) and
/// the in-memory form (set of field names).
mod field_set {
    use serde::de::IgnoredAny;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::{BTreeMap, BTreeSet};

    pub fn serialize<S>(set: &BTreeSet<String>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(set.iter().map(|name| (name, "")))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = BTreeMap::<String, IgnoredAny>::deserialize(deserializer)?;
        Ok(map.into_keys().collect())
    }
}

// ---------------------------------------------------------------------------
// Claims — policy plus registered identity claims
// ---------------------------------------------------------------------------

/// Decoded credential payload: the minimization policy plus the
/// registered claims the verifier checks. Built once per call and
/// discarded when the call completes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub policy: Policy,

    /// Issuer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Subject.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiry, unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued-at, unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn with_issuer(mut self, iss: impl Into<String>) -> Self {
        self.iss = Some(iss.into());
        self
    }

    pub fn with_subject(mut self, sub: impl Into<String>) -> Self {
        self.sub = Some(sub.into());
        self
    }

    pub fn with_expiry(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }
}
