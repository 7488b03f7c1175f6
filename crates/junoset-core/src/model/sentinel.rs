// Serde adapters for "unset" sentinels.
//
// Model files may spell an unset scalar the way the device resource
// schema does: `-1` or `0` for integers and `""` for text. Inside the
// model every one of those is `None`, so a real zero on a `-1` field
// stays distinguishable from "not configured".

use serde::{Deserialize, Deserializer, Serializer};

fn to_u32<E: serde::de::Error>(value: i64, sentinel: i64) -> Result<u32, E> {
    u32::try_from(value).map_err(|_| {
        E::custom(format!(
            "invalid value {value}: expected 0..={} or {sentinel} for unset",
            u32::MAX
        ))
    })
}

/// Integers whose unset sentinel is `-1`.
pub mod minus_one {
    use super::{Deserialize, Deserializer, Serializer, to_u32};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(value: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_u32(*v),
            None => serializer.serialize_i64(-1),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
        match Option::<i64>::deserialize(deserializer)? {
            None | Some(-1) => Ok(None),
            Some(v) => to_u32(v, -1).map(Some),
        }
    }
}

/// Integers whose unset sentinel is `0`.
pub mod zero {
    use super::{Deserialize, Deserializer, Serializer, to_u32};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(value: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(value.unwrap_or(0))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
        match Option::<i64>::deserialize(deserializer)? {
            None | Some(0) => Ok(None),
            Some(v) => to_u32(v, 0).map(Some),
        }
    }
}

/// Text whose unset sentinel is the empty string.
pub mod text {
    use serde::de::Error as _;

    use super::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(
        value: &Option<String>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(s) if s.is_empty() => Ok(None),
            Some(s) if s.contains(['\n', '\r']) => {
                Err(D::Error::custom("value must fit on a single line"))
            }
            Some(s) => Ok(Some(s)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Knobs {
        #[serde(default, with = "super::minus_one")]
        rollbacks: Option<u32>,
        #[serde(default, with = "super::zero")]
        port: Option<u32>,
        #[serde(default, with = "super::text")]
        name: Option<String>,
    }

    #[test]
    fn sentinels_become_none() {
        let knobs: Knobs =
            serde_json::from_str(r#"{"rollbacks": -1, "port": 0, "name": ""}"#).unwrap();
        assert_eq!(knobs.rollbacks, None);
        assert_eq!(knobs.port, None);
        assert_eq!(knobs.name, None);
    }

    #[test]
    fn zero_on_minus_one_field_is_a_value() {
        let knobs: Knobs = serde_json::from_str(r#"{"rollbacks": 0}"#).unwrap();
        assert_eq!(knobs.rollbacks, Some(0));
        assert_eq!(knobs.port, None);
    }

    #[test]
    fn negative_values_are_rejected() {
        let err = serde_json::from_str::<Knobs>(r#"{"port": -5}"#).unwrap_err();
        assert!(err.to_string().contains("invalid value -5"));
    }
}
