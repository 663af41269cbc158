use serde::{Deserialize, Deserializer};
use std::borrow::Cow;

/// Boolean request parameter.
///
/// Alpaca clients send `True`, `true` or `TRUE` depending on their
/// platform, so any casing is accepted.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BoolParam(bool);

impl From<BoolParam> for bool {
    fn from(param: BoolParam) -> Self {
        param.0
    }
}

impl<'de> Deserialize<'de> for BoolParam {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Cow::<'de, str>::deserialize(deserializer)?;
        if value.eq_ignore_ascii_case("true") {
            Ok(Self(true))
        } else if value.eq_ignore_ascii_case("false") {
            Ok(Self(false))
        } else {
            Err(serde::de::Error::invalid_value(
                serde::de::Unexpected::Str(&value),
                &"'true' or 'false' in any casing",
            ))
        }
    }
}
