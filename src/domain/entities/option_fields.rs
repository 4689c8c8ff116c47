use serde::{Deserialize, Deserializer, Serialize};
use validator::ValidateLength;

/// Tri-state field for partial updates.
///
/// - `Unchanged` → key absent from the payload
/// - `SetToNull` → key present with `null`
/// - `SetToValue` → key present with a value
///
/// Deserializing only yields `SetToNull` or `SetToValue`; pair the field with
/// `#[serde(default)]` so a missing key becomes `Unchanged`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub enum OptionField<T> {
    #[default]
    Unchanged,
    SetToNull,
    SetToValue(T),
}

impl<'de, T> Deserialize<'de> for OptionField<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.into())
    }
}

impl<T> From<Option<T>> for OptionField<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            None => OptionField::SetToNull,
            Some(v) => OptionField::SetToValue(v),
        }
    }
}

impl<T> ValidateLength<u64> for OptionField<T>
where
    T: ValidateLength<u64>,
{
    fn length(&self) -> Option<u64> {
        match self {
            OptionField::SetToValue(value) => value.length(),
            _ => None,
        }
    }

    fn validate_length(&self, min: Option<u64>, max: Option<u64>, equal: Option<u64>) -> bool {
        match self {
            OptionField::SetToValue(value) => value.validate_length(min, max, equal),
            _ => true,
        }
    }
}

impl<T> OptionField<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    /// Borrowed inner value, `None` unless `SetToValue`.
    pub fn value_ref(&self) -> Option<&T> {
        match self {
            Self::SetToValue(v) => Some(v),
            _ => None,
        }
    }
}

impl OptionField<String> {
    pub fn value_str(&self) -> Option<&str> {
        self.value_ref().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default)]
        caption: OptionField<String>,
    }

    #[test]
    fn missing_key_is_unchanged() {
        let patch: Patch = serde_json::from_str("{}").unwrap();
        assert!(patch.caption.is_unchanged());
    }

    #[test]
    fn explicit_null_clears() {
        let patch: Patch = serde_json::from_str(r#"{"caption": null}"#).unwrap();
        assert_eq!(patch.caption, OptionField::SetToNull);
    }

    #[test]
    fn value_is_kept() {
        let patch: Patch = serde_json::from_str(r#"{"caption": "Sunset"}"#).unwrap();
        assert_eq!(patch.caption.value_str(), Some("Sunset"));
    }

    #[test]
    fn length_checks_only_apply_to_values() {
        let unchanged: OptionField<String> = OptionField::Unchanged;
        assert!(unchanged.validate_length(Some(1), Some(3), None));

        let long = OptionField::SetToValue("abcd".to_string());
        assert!(!long.validate_length(None, Some(3), None));
    }
}
