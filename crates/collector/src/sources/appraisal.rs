//! Client for the appraisal provider's internal JSON API.
//!
//! The endpoints are the ones the public frontend calls; query keys are in
//! Korean and `매물종별구분` is always "01" (apartment sale). A desktop user
//! agent plus `Origin`/`Referer` pointing at the public site is required or
//! the API answers 403.

use {
    super::{lenient_f64, lenient_i64, lenient_string},
    crate::fetcher::{Error, Fetcher},
    reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, ORIGIN, REFERER, USER_AGENT},
    serde::{Deserialize, de::DeserializeOwned},
    std::{collections::HashSet, time::Duration},
};

const BASE: &str = "https://api.kbland.kr";
const COMPLEX_LIST: &str = "/land-price/price/fastPriceComplexName";
const COMPLEX_BRIEF: &str = "/land-complex/complex/brif";
const AREA_TYPES: &str = "/land-complex/complex/typInfo";
const PRICE_INFO: &str = "/land-price/price/BasePrcInfoNew";

/// Success code of the response envelope.
const RESULT_OK: &str = "10000";
const LISTING_KIND_APARTMENT_SALE: &str = "01";

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
             Chrome/120.0.0.0 Safari/537.36",
        ),
    );
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/plain, */*"),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7"),
    );
    headers.insert(ORIGIN, HeaderValue::from_static("https://kbland.kr"));
    headers.insert(REFERER, HeaderValue::from_static("https://kbland.kr/"));
    headers
}

#[derive(Deserialize)]
struct Envelope<T> {
    #[serde(rename = "dataHeader", default)]
    header: Option<DataHeader>,
    #[serde(rename = "dataBody", default)]
    body: Option<T>,
}

#[derive(Deserialize, Default)]
struct DataHeader {
    #[serde(rename = "resultCode", deserialize_with = "lenient_string", default)]
    result_code: String,
    #[serde(default)]
    message: String,
}

#[derive(Deserialize, Default)]
struct DataList<T> {
    #[serde(default)]
    data: Vec<T>,
}

#[derive(Deserialize, Default)]
struct DataObject<T> {
    #[serde(default)]
    data: Option<T>,
}

/// A complex as known to the appraisal provider.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KbComplex {
    #[serde(rename = "단지기본일련번호", deserialize_with = "lenient_i64", default)]
    pub id: Option<i64>,
    #[serde(rename = "단지명", default)]
    pub name: String,
}

/// Brief complex profile, used to backfill metadata the listings source did
/// not provide.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComplexBrief {
    #[serde(rename = "총세대수", deserialize_with = "lenient_i64", default)]
    pub total_units: Option<i64>,
    #[serde(rename = "wgs84위도", deserialize_with = "lenient_f64", default)]
    pub lat: Option<f64>,
    #[serde(rename = "wgs84경도", deserialize_with = "lenient_f64", default)]
    pub lng: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AreaType {
    #[serde(rename = "면적일련번호", deserialize_with = "lenient_i64", default)]
    pub area_seq: Option<i64>,
    #[serde(rename = "전용면적", deserialize_with = "lenient_f64", default)]
    pub area_exclusive: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriceBand {
    #[serde(rename = "매매일반거래가", deserialize_with = "lenient_i64", default)]
    pub mid: Option<i64>,
    #[serde(rename = "매매상한가", deserialize_with = "lenient_i64", default)]
    pub high: Option<i64>,
    #[serde(rename = "매매하한가", deserialize_with = "lenient_i64", default)]
    low: Option<i64>,
    // the lower bound shows up under two different keys
    #[serde(rename = "매매하한거래가", deserialize_with = "lenient_i64", default)]
    low_alt: Option<i64>,
}

impl PriceBand {
    pub fn low(&self) -> Option<i64> {
        self.low.or(self.low_alt)
    }
}

#[derive(Deserialize, Default)]
struct PriceInfo {
    #[serde(rename = "시세", default)]
    bands: Vec<PriceBand>,
}

/// Normalized price for one floor-plan size of a complex.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaPrice {
    pub area_sqm: f64,
    pub price_low: Option<i64>,
    pub price_mid: i64,
    pub price_high: Option<i64>,
}

pub struct AppraisalClient {
    fetcher: Fetcher,
}

impl AppraisalClient {
    pub fn new(delay: Duration) -> reqwest::Result<Self> {
        Ok(Self {
            fetcher: Fetcher::new(delay, default_headers())?,
        })
    }

    /// Unwraps the response envelope. A non-success code with a body present
    /// is the provider's way of saying "no data"; a missing body is a broken
    /// payload.
    async fn get_body<T: DeserializeOwned + Default>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, Error> {
        let url = format!("{BASE}{path}");
        let envelope: Envelope<T> = self.fetcher.get_json(&url, query).await?;
        if let Some(header) = &envelope.header {
            if header.result_code != RESULT_OK {
                tracing::warn!(
                    code = %header.result_code,
                    message = %header.message,
                    %url,
                    "appraisal api returned non-success code"
                );
            }
        }
        envelope
            .body
            .ok_or_else(|| Error::Semantic(format!("{path}: missing dataBody")))
    }

    /// All complexes of a legal dong, identified by its 10-digit area code.
    pub async fn complexes_by_area(&self, area_code: &str) -> Result<Vec<KbComplex>, Error> {
        let body: DataList<KbComplex> = self
            .get_body(COMPLEX_LIST, &[("법정동코드", area_code)])
            .await?;
        Ok(body.data)
    }

    pub async fn complex_brief(&self, kb_complex_id: i64) -> Result<Option<ComplexBrief>, Error> {
        let id = kb_complex_id.to_string();
        let body: DataObject<ComplexBrief> = self
            .get_body(
                COMPLEX_BRIEF,
                &[
                    ("단지기본일련번호", id.as_str()),
                    ("매물종별구분", LISTING_KIND_APARTMENT_SALE),
                ],
            )
            .await?;
        Ok(body.data)
    }

    pub async fn area_types(&self, kb_complex_id: i64) -> Result<Vec<AreaType>, Error> {
        let id = kb_complex_id.to_string();
        let body: DataList<AreaType> = self
            .get_body(
                AREA_TYPES,
                &[
                    ("단지기본일련번호", id.as_str()),
                    ("매물종별구분", LISTING_KIND_APARTMENT_SALE),
                ],
            )
            .await?;
        Ok(body.data)
    }

    /// Price band for one floor-plan size, the first entry of the `시세`
    /// array.
    pub async fn price(
        &self,
        kb_complex_id: i64,
        area_seq: i64,
    ) -> Result<Option<PriceBand>, Error> {
        let id = kb_complex_id.to_string();
        let seq = area_seq.to_string();
        let body: DataObject<PriceInfo> = self
            .get_body(
                PRICE_INFO,
                &[
                    ("단지기본일련번호", id.as_str()),
                    ("면적일련번호", seq.as_str()),
                    ("매물종별구분", LISTING_KIND_APARTMENT_SALE),
                ],
            )
            .await?;
        Ok(body
            .data
            .and_then(|info| info.bands.into_iter().next()))
    }

    /// Prices for every floor-plan size of a complex: iterates the area
    /// types, deduplicates by area rounded to 0.1 m² and keeps entries with a
    /// non-null midpoint. Per-size fetch failures are skipped; access denial
    /// aborts.
    pub async fn all_prices(&self, kb_complex_id: i64) -> Result<Vec<AreaPrice>, Error> {
        let types = self.area_types(kb_complex_id).await?;
        let mut seen: HashSet<i64> = HashSet::new();
        let mut prices = Vec::new();
        for area_type in types {
            let (Some(area_seq), Some(area_sqm)) = (area_type.area_seq, area_type.area_exclusive)
            else {
                continue;
            };
            let area_key = (area_sqm * 10.0).round() as i64;
            if seen.contains(&area_key) {
                continue;
            }
            let band = match self.price(kb_complex_id, area_seq).await {
                Ok(Some(band)) => band,
                Ok(None) => continue,
                Err(err @ Error::AccessDenied(_)) => return Err(err),
                Err(err) => {
                    tracing::warn!(kb_complex_id, area_seq, ?err, "price fetch failed, skipping");
                    continue;
                }
            };
            let Some(mid) = band.mid else {
                continue;
            };
            seen.insert(area_key);
            tracing::debug!(
                kb_complex_id,
                area_sqm,
                mid,
                high = ?band.high,
                low = ?band.low(),
                "appraisal price"
            );
            prices.push(AreaPrice {
                area_sqm,
                price_low: band.low(),
                price_mid: mid,
                price_high: band.high,
            });
        }
        Ok(prices)
    }
}

/// Best-scoring complex of the area list for an external name, if any clears
/// the matching threshold.
pub fn match_complex<'a>(name: &str, complexes: &'a [KbComplex]) -> Option<&'a KbComplex> {
    let names: Vec<&str> = complexes.iter().map(|c| c.name.as_str()).collect();
    let (index, score) = matching::best_match(name, &names)?;
    tracing::debug!(name, matched = %complexes[index].name, score, "appraisal complex matched");
    Some(&complexes[index])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_with_korean_keys() {
        let payload = r#"{
            "dataHeader": {"resultCode": "10000", "message": "정상"},
            "dataBody": {"data": [
                {"단지기본일련번호": 12345, "단지명": "래미안대치팰리스"},
                {"단지기본일련번호": "67890", "단지명": "대치아이파크"}
            ]}
        }"#;
        let envelope: Envelope<DataList<KbComplex>> = serde_json::from_str(payload).unwrap();
        assert_eq!(envelope.header.unwrap().result_code, "10000");
        let data = envelope.body.unwrap().data;
        assert_eq!(data[0].id, Some(12345));
        assert_eq!(data[1].id, Some(67890));
    }

    #[test]
    fn price_band_lower_bound_key_variants() {
        let band: PriceBand = serde_json::from_str(
            r#"{"매매일반거래가": 250000, "매매상한가": 270000, "매매하한거래가": 220000}"#,
        )
        .unwrap();
        assert_eq!(band.mid, Some(250000));
        assert_eq!(band.low(), Some(220000));

        let band: PriceBand =
            serde_json::from_str(r#"{"매매일반거래가": "250,000", "매매하한가": 220000}"#).unwrap();
        assert_eq!(band.mid, Some(250000));
        assert_eq!(band.low(), Some(220000));
    }

    #[test]
    fn brief_fields() {
        let brief: ComplexBrief = serde_json::from_str(
            r#"{"총세대수": "1608", "wgs84위도": 37.499, "wgs84경도": 127.061}"#,
        )
        .unwrap();
        assert_eq!(brief.total_units, Some(1608));
        assert_eq!(brief.lat, Some(37.499));
    }

    #[test]
    fn complex_matching_threshold() {
        let complexes = vec![
            KbComplex {
                id: Some(1),
                name: "래미안대치팰리스1단지".to_string(),
            },
            KbComplex {
                id: Some(2),
                name: "은마".to_string(),
            },
        ];
        assert_eq!(
            match_complex("래미안대치팰리스", &complexes).and_then(|c| c.id),
            Some(1)
        );
        assert!(match_complex("잠실주공", &complexes).is_none());
    }
}
