//! Client for the listings portal's mobile JSON API.
//!
//! The endpoints are the ones the mobile frontend calls; the headers mimic an
//! iOS browser because the desktop API rejects unknown clients much more
//! aggressively.

use {
    super::{lenient_f64, lenient_i64, lenient_string},
    crate::fetcher::{Error, Fetcher},
    chrono::NaiveDate,
    reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, REFERER, USER_AGENT},
    serde::Deserialize,
    std::time::Duration,
};

const BASE: &str = "https://m.land.naver.com";
/// A1 = sale. The portal also knows B1 (jeonse) and B2 (monthly rent).
const TRADE_TYPE_SALE: &str = "A1";

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 16_0 like Mac OS X) AppleWebKit/605.1.15",
        ),
    );
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("ko-KR,ko;q=0.9"));
    headers.insert(REFERER, HeaderValue::from_static("https://m.land.naver.com/"));
    headers
}

/// A sub-division as returned by the region list endpoint: province code
/// yields districts, district code yields dongs.
#[derive(Debug, Clone, Deserialize)]
pub struct SubRegion {
    #[serde(rename = "CortarNo", deserialize_with = "lenient_string", default)]
    pub code: String,
    #[serde(rename = "CortarNm", default)]
    pub name: String,
    #[serde(rename = "CenterLat", deserialize_with = "lenient_f64", default)]
    pub lat: Option<f64>,
    #[serde(rename = "CenterLon", deserialize_with = "lenient_f64", default)]
    pub lon: Option<f64>,
}

#[derive(Deserialize)]
struct RegionListResponse {
    #[serde(default)]
    result: Option<RegionListResult>,
}

// The envelope flips between `{"result": {"list": [...]}}` and
// `{"result": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RegionListResult {
    Wrapped {
        #[serde(default)]
        list: Vec<SubRegion>,
    },
    Bare(Vec<SubRegion>),
}

/// One complex as listed in a dong, including the `deal_count` change signal
/// the incremental planner keys on.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComplexSummary {
    #[serde(rename = "hscpNo", deserialize_with = "lenient_string", default)]
    pub external_id: String,
    #[serde(rename = "hscpNm", default)]
    pub name: String,
    #[serde(rename = "dealCnt", deserialize_with = "lenient_i64", default)]
    pub deal_count: Option<i64>,
    #[serde(rename = "totHsehCnt", deserialize_with = "lenient_i64", default)]
    pub total_units: Option<i64>,
    #[serde(rename = "useAprvYmd", default)]
    pub use_approve_ymd: Option<String>,
    #[serde(deserialize_with = "lenient_f64", default)]
    pub lat: Option<f64>,
    #[serde(deserialize_with = "lenient_f64", default)]
    pub lon: Option<f64>,
    #[serde(rename = "cortarAddress", default)]
    pub dong: String,
    #[serde(rename = "dtlAddress", default)]
    pub address: String,
}

#[derive(Deserialize)]
struct ComplexListResponse {
    #[serde(default)]
    result: Option<Vec<ComplexSummary>>,
}

/// One sale article of a complex.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Article {
    #[serde(rename = "atclNo", deserialize_with = "lenient_string", default)]
    pub external_id: String,
    #[serde(rename = "atclNm", default)]
    pub name: String,
    #[serde(rename = "prcInfo", default)]
    pub price_text: String,
    #[serde(rename = "spc1", deserialize_with = "lenient_f64", default)]
    pub area_supply: Option<f64>,
    #[serde(rename = "spc2", deserialize_with = "lenient_f64", default)]
    pub area_exclusive: Option<f64>,
    #[serde(rename = "flrInfo", default)]
    pub floor_info: String,
    #[serde(rename = "bildNm", default)]
    pub building_name: String,
    #[serde(rename = "cfmYmd", default)]
    pub confirm_ymd: String,
    #[serde(default)]
    pub direction: String,
}

#[derive(Deserialize)]
struct ArticleListResponse {
    #[serde(default)]
    result: Option<ArticleListResult>,
}

#[derive(Deserialize, Default)]
struct ArticleListResult {
    #[serde(default)]
    list: Vec<Article>,
    #[serde(rename = "totalCount", deserialize_with = "lenient_i64", default)]
    total_count: Option<i64>,
}

pub struct ListingsClient {
    fetcher: Fetcher,
}

impl ListingsClient {
    pub fn new(delay: Duration) -> reqwest::Result<Self> {
        Ok(Self {
            fetcher: Fetcher::new(delay, default_headers())?,
        })
    }

    pub fn api_call_count(&self) -> u64 {
        self.fetcher.api_call_count()
    }

    pub fn reset_api_call_count(&self) {
        self.fetcher.reset_api_call_count()
    }

    /// Sub-regions of a region code, ordered as the source returns them.
    pub async fn sub_regions(&self, parent_code: &str) -> Result<Vec<SubRegion>, Error> {
        let url = format!("{BASE}/map/getRegionList");
        let response: RegionListResponse = self
            .fetcher
            .get_json(&url, &[("cortarNo", parent_code)])
            .await?;
        Ok(match response.result {
            Some(RegionListResult::Wrapped { list }) => list,
            Some(RegionListResult::Bare(list)) => list,
            None => Vec::new(),
        })
    }

    /// One page of complex summaries in a dong.
    pub async fn complexes_in_region(
        &self,
        sub_region_code: &str,
        page: u32,
    ) -> Result<Vec<ComplexSummary>, Error> {
        let url = format!("{BASE}/complex/ajax/complexListByCortarNo");
        let page = page.to_string();
        let response: ComplexListResponse = self
            .fetcher
            .get_json(
                &url,
                &[
                    ("cortarNo", sub_region_code),
                    ("order", "rank"),
                    ("realEstateType", "APT"),
                    ("tradeType", TRADE_TYPE_SALE),
                    ("page", &page),
                ],
            )
            .await?;
        Ok(response.result.unwrap_or_default())
    }

    /// All complex summaries of a dong, paging until the source runs dry.
    pub async fn all_complexes_in_region(
        &self,
        sub_region_code: &str,
    ) -> Result<Vec<ComplexSummary>, Error> {
        let mut all = Vec::new();
        let mut page = 1;
        loop {
            let complexes = self.complexes_in_region(sub_region_code, page).await?;
            if complexes.is_empty() {
                break;
            }
            all.extend(complexes);
            page += 1;
        }
        Ok(all)
    }

    /// One page of sale articles of a complex, with the reported total.
    pub async fn articles_for_complex(
        &self,
        external_complex_id: &str,
        page: u32,
    ) -> Result<(Vec<Article>, i64), Error> {
        let url = format!("{BASE}/complex/getComplexArticleList");
        let page = page.to_string();
        let response: ArticleListResponse = self
            .fetcher
            .get_json(
                &url,
                &[
                    ("hscpNo", external_complex_id),
                    ("tradTpCd", TRADE_TYPE_SALE),
                    ("order", "prc"),
                    ("showR0", "N"),
                    ("page", &page),
                ],
            )
            .await?;
        let result = response.result.unwrap_or_default();
        let total = result
            .total_count
            .unwrap_or_else(|| i64::try_from(result.list.len()).unwrap_or(i64::MAX));
        Ok((result.list, total))
    }

    /// All sale articles of a complex, paging until accumulated >= the
    /// reported total.
    pub async fn all_articles_for_complex(
        &self,
        external_complex_id: &str,
    ) -> Result<Vec<Article>, Error> {
        let mut all: Vec<Article> = Vec::new();
        let mut page = 1;
        loop {
            let (articles, total) = self.articles_for_complex(external_complex_id, page).await?;
            if articles.is_empty() {
                break;
            }
            all.extend(articles);
            if i64::try_from(all.len()).unwrap_or(i64::MAX) >= total {
                break;
            }
            page += 1;
        }
        Ok(all)
    }
}

/// Parses the portal's price text to an integer in units of 10,000 KRW:
/// "12억 5,000" -> 125000, "3억" -> 30000, "5,500" -> 5500. Empty or
/// malformed text parses to 0.
pub fn parse_price(text: &str) -> i64 {
    let cleaned = text.trim().replace(',', "");
    if cleaned.is_empty() {
        return 0;
    }
    match cleaned.split_once('억') {
        Some((whole, rest)) => {
            let Ok(whole) = whole.trim().parse::<i64>() else {
                return 0;
            };
            let rest = rest.trim();
            let remainder = if rest.is_empty() {
                0
            } else {
                match rest.parse::<i64>() {
                    Ok(value) => value,
                    Err(_) => return 0,
                }
            };
            whole * 10_000 + remainder
        }
        None => cleaned.parse().unwrap_or(0),
    }
}

/// Floor from "15/20"-style info. Coarse tokens ("저", "중", "고") have no
/// numeric floor.
pub fn parse_floor(floor_info: &str) -> Option<i32> {
    let first = floor_info.split('/').next().unwrap_or("");
    let digits = first.replace('층', "");
    let digits = digits.trim();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Accepts "YYYYMMDD", "YYYY-MM-DD", "YYYY.MM.DD" and the mobile API's
/// two-digit-year "YY.MM.DD".
pub fn parse_ymd(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    let bytes = text.as_bytes();
    if bytes.len() == 8 && bytes[2] == b'.' && bytes[5] == b'.' {
        if let Ok(date) = NaiveDate::parse_from_str(text, "%y.%m.%d") {
            return Some(date);
        }
    }
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    NaiveDate::parse_from_str(&digits, "%Y%m%d").ok()
}

/// "20050101" -> 2005.
pub fn parse_built_year(use_approve_ymd: &str) -> Option<i32> {
    let digits = use_approve_ymd.trim();
    digits.get(..4)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_text_parsing() {
        assert_eq!(parse_price("12억 5,000"), 125000);
        assert_eq!(parse_price("3억"), 30000);
        assert_eq!(parse_price("5,500"), 5500);
        assert_eq!(parse_price("24억"), 240000);
        assert_eq!(parse_price(""), 0);
        assert_eq!(parse_price("가격협의"), 0);
    }

    #[test]
    fn floor_parsing() {
        assert_eq!(parse_floor("15/20"), Some(15));
        assert_eq!(parse_floor("저/16"), None);
        assert_eq!(parse_floor("중/20"), None);
        assert_eq!(parse_floor("고"), None);
        assert_eq!(parse_floor("12층"), Some(12));
        assert_eq!(parse_floor(""), None);
    }

    #[test]
    fn date_parsing() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 15).unwrap();
        assert_eq!(parse_ymd("20260215"), Some(date));
        assert_eq!(parse_ymd("2026-02-15"), Some(date));
        assert_eq!(parse_ymd("2026.02.15"), Some(date));
        assert_eq!(parse_ymd("26.02.15"), Some(date));
        assert_eq!(parse_ymd(""), None);
        assert_eq!(parse_ymd("확인일자"), None);
    }

    #[test]
    fn built_year_parsing() {
        assert_eq!(parse_built_year("20050101"), Some(2005));
        assert_eq!(parse_built_year("1986"), Some(1986));
        assert_eq!(parse_built_year(""), None);
    }

    #[test]
    fn region_list_envelope_both_shapes() {
        let wrapped = r#"{"result": {"list": [
            {"CortarNo": "1168000000", "CortarNm": "강남구",
             "CenterLat": 37.49, "CenterLon": 127.06}
        ]}}"#;
        let response: RegionListResponse = serde_json::from_str(wrapped).unwrap();
        let Some(RegionListResult::Wrapped { list }) = response.result else {
            panic!("expected wrapped shape");
        };
        assert_eq!(list[0].code, "1168000000");
        assert_eq!(list[0].name, "강남구");

        let bare = r#"{"result": [{"CortarNo": 1168010600, "CortarNm": "대치동"}]}"#;
        let response: RegionListResponse = serde_json::from_str(bare).unwrap();
        let Some(RegionListResult::Bare(list)) = response.result else {
            panic!("expected bare shape");
        };
        // numeric codes are normalized to strings
        assert_eq!(list[0].code, "1168010600");
        assert_eq!(list[0].lat, None);
    }

    #[test]
    fn complex_list_payload() {
        let payload = r#"{"result": [
            {"hscpNo": "881", "hscpNm": "개포더샵트리에", "dealCnt": 4,
             "totHsehCnt": "232", "useAprvYmd": "20050101",
             "lat": 37.48, "lon": 127.05,
             "cortarAddress": "개포동", "dtlAddress": "언주로 103"}
        ]}"#;
        let response: ComplexListResponse = serde_json::from_str(payload).unwrap();
        let complexes = response.result.unwrap();
        assert_eq!(complexes[0].external_id, "881");
        assert_eq!(complexes[0].deal_count, Some(4));
        assert_eq!(complexes[0].total_units, Some(232));
        assert_eq!(complexes[0].dong, "개포동");
    }

    #[test]
    fn article_list_payload() {
        let payload = r#"{"result": {"totalCount": 2, "list": [
            {"atclNo": "2501", "atclNm": "래미안대치팰리스", "prcInfo": "24억",
             "spc1": "113.56", "spc2": "84.97", "flrInfo": "12/33",
             "bildNm": "101동", "cfmYmd": "26.02.14", "direction": "남향"},
            {"atclNo": "2502", "atclNm": "래미안대치팰리스", "prcInfo": "23억 5,000",
             "spc2": 84.97, "flrInfo": "저/33"}
        ]}}"#;
        let response: ArticleListResponse = serde_json::from_str(payload).unwrap();
        let result = response.result.unwrap();
        assert_eq!(result.total_count, Some(2));
        assert_eq!(parse_price(&result.list[0].price_text), 240000);
        assert_eq!(parse_price(&result.list[1].price_text), 235000);
        assert_eq!(result.list[1].area_exclusive, Some(84.97));
        assert_eq!(parse_floor(&result.list[1].floor_info), None);
    }
}
