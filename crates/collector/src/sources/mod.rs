//! Adapters for the three external data sources.

pub mod appraisal;
pub mod listings;
pub mod transactions;

use serde::{Deserialize, Deserializer};

// The listings and appraisal payloads are sloppy about scalar types: counts
// and codes arrive as numbers or strings depending on the endpoint (and
// sometimes on the day). These deserializers accept either.

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Str(String),
}

pub(crate) fn lenient_i64<'de, D: Deserializer<'de>>(de: D) -> Result<Option<i64>, D::Error> {
    Ok(match Option::<Scalar>::deserialize(de)? {
        Some(Scalar::Int(value)) => Some(value),
        Some(Scalar::Float(value)) => Some(value as i64),
        Some(Scalar::Str(value)) => value.trim().replace(',', "").parse().ok(),
        None => None,
    })
}

pub(crate) fn lenient_f64<'de, D: Deserializer<'de>>(de: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<Scalar>::deserialize(de)? {
        Some(Scalar::Int(value)) => Some(value as f64),
        Some(Scalar::Float(value)) => Some(value),
        Some(Scalar::Str(value)) => value.trim().replace('㎡', "").parse().ok(),
        None => None,
    })
}

pub(crate) fn lenient_string<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(match Option::<Scalar>::deserialize(de)? {
        Some(Scalar::Int(value)) => value.to_string(),
        Some(Scalar::Float(value)) => value.to_string(),
        Some(Scalar::Str(value)) => value,
        None => String::new(),
    })
}
