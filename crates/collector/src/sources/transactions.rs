//! Client for the government transactions registry (data.go.kr).
//!
//! One XML endpoint, authenticated with a per-deployment service key. The
//! daily quota is around 1,000 requests per key, which the 1 s throttle and
//! the page size of 1,000 keep comfortably out of reach.

use {
    crate::fetcher::{Error, Fetcher},
    chrono::NaiveDate,
    serde::Deserialize,
    std::time::Duration,
};

const URL: &str = "https://apis.data.go.kr/1613000/RTMSDataSvcAptTrade/getRTMSDataSvcAptTrade";
const PAGE_SIZE: u32 = 1000;

/// `cdealType` value marking a cancelled (rescinded) deal.
const CANCELLED: &str = "O";

#[derive(Debug, Deserialize)]
struct Response {
    header: Header,
    #[serde(default)]
    body: Option<Body>,
}

#[derive(Debug, Deserialize, Default)]
struct Header {
    #[serde(rename = "resultCode", default)]
    result_code: String,
    #[serde(rename = "resultMsg", default)]
    result_msg: String,
}

#[derive(Debug, Deserialize, Default)]
struct Body {
    #[serde(default)]
    items: Option<Items>,
    #[serde(rename = "totalCount", default)]
    total_count: i64,
}

#[derive(Debug, Deserialize, Default)]
struct Items {
    #[serde(rename = "item", default)]
    item: Vec<RawItem>,
}

/// One `<item>` element, all fields as the registry sends them.
#[derive(Debug, Deserialize, Default)]
struct RawItem {
    #[serde(rename = "aptNm", default)]
    apt_name: String,
    #[serde(rename = "aptDong", default)]
    apt_dong: String,
    #[serde(rename = "umdNm", default)]
    umd_name: String,
    #[serde(default)]
    jibun: String,
    #[serde(rename = "excluUseAr", default)]
    area: String,
    #[serde(default)]
    floor: String,
    #[serde(rename = "dealAmount", default)]
    deal_amount: String,
    #[serde(rename = "dealYear", default)]
    deal_year: String,
    #[serde(rename = "dealMonth", default)]
    deal_month: String,
    #[serde(rename = "dealDay", default)]
    deal_day: String,
    #[serde(rename = "buildYear", default)]
    build_year: String,
    #[serde(rename = "cdealType", default)]
    cdeal_type: String,
}

/// A normalized, non-cancelled transaction record.
#[derive(Debug, Clone, PartialEq)]
pub struct DealRecord {
    pub apt_name: String,
    pub apt_dong: String,
    pub umd_name: String,
    pub jibun: String,
    pub area_sqm: f64,
    pub floor: Option<i32>,
    pub deal_price: i64,
    pub deal_date: NaiveDate,
    pub build_year: Option<i32>,
}

/// One decoded page.
#[derive(Debug)]
pub struct Page {
    pub records: Vec<DealRecord>,
    pub raw_count: usize,
    pub total_count: i64,
}

/// Decodes a response page. Cancelled deals and records with missing or
/// unparseable required fields are dropped (the raw count still includes
/// them, which is what the paging arithmetic needs).
pub fn parse_page(xml: &str) -> Result<Page, Error> {
    let response: Response =
        quick_xml::de::from_str(xml).map_err(|err| Error::Semantic(format!("xml decode: {err}")))?;
    let code = response.header.result_code.trim();
    if code != "00" && code != "000" {
        return Err(Error::Semantic(format!(
            "result code {code}: {}",
            response.header.result_msg
        )));
    }
    let Some(body) = response.body else {
        return Ok(Page {
            records: Vec::new(),
            raw_count: 0,
            total_count: 0,
        });
    };
    let raw = body.items.map(|items| items.item).unwrap_or_default();
    let raw_count = raw.len();
    let records = raw.iter().filter_map(normalize).collect();
    Ok(Page {
        records,
        raw_count,
        total_count: body.total_count,
    })
}

fn normalize(raw: &RawItem) -> Option<DealRecord> {
    let apt_name = raw.apt_name.trim();
    if apt_name.is_empty() {
        return None;
    }
    if raw.cdeal_type.trim() == CANCELLED {
        tracing::debug!(apt_name, "dropping cancelled deal");
        return None;
    }
    let deal_price: i64 = raw.deal_amount.trim().replace(',', "").parse().ok()?;
    let area_sqm: f64 = raw.area.trim().parse().ok()?;
    let floor = {
        let floor = raw.floor.trim();
        if floor.is_empty() {
            None
        } else {
            Some(floor.parse::<i32>().ok()?)
        }
    };
    let deal_date = NaiveDate::from_ymd_opt(
        raw.deal_year.trim().parse().ok()?,
        raw.deal_month.trim().parse().ok()?,
        raw.deal_day.trim().parse().ok()?,
    )?;
    let build_year = {
        let year = raw.build_year.trim();
        if year.is_empty() {
            None
        } else {
            let year = year.parse::<i32>().ok()?;
            (year != 0).then_some(year)
        }
    };
    Some(DealRecord {
        apt_name: apt_name.to_string(),
        apt_dong: raw.apt_dong.trim().to_string(),
        umd_name: raw.umd_name.trim().to_string(),
        jibun: raw.jibun.trim().to_string(),
        area_sqm,
        floor,
        deal_price,
        deal_date,
        build_year,
    })
}

pub struct TransactionsClient {
    fetcher: Fetcher,
    service_key: String,
}

impl TransactionsClient {
    pub fn new(service_key: String, delay: Duration) -> reqwest::Result<Self> {
        Ok(Self {
            fetcher: Fetcher::new(delay, Default::default())?,
            service_key,
        })
    }

    /// One page of deals for a district and contract month ("YYYYMM").
    pub async fn fetch_page(
        &self,
        district_code: &str,
        deal_yyyymm: &str,
        page: u32,
        rows: u32,
    ) -> Result<Page, Error> {
        let page = page.to_string();
        let rows = rows.to_string();
        let xml = self
            .fetcher
            .get_text(
                URL,
                &[
                    ("serviceKey", self.service_key.as_str()),
                    ("LAWD_CD", district_code),
                    ("DEAL_YMD", deal_yyyymm),
                    ("pageNo", &page),
                    ("numOfRows", &rows),
                ],
            )
            .await?;
        parse_page(&xml)
    }

    /// All deals for a district and contract month, paging until accumulated
    /// >= the reported total.
    pub async fn fetch_all(
        &self,
        district_code: &str,
        deal_yyyymm: &str,
    ) -> Result<Vec<DealRecord>, Error> {
        let mut all = Vec::new();
        let mut page_no = 1;
        loop {
            let page = self
                .fetch_page(district_code, deal_yyyymm, page_no, PAGE_SIZE)
                .await?;
            all.extend(page.records);
            let fetched_so_far = i64::from(page_no) * i64::from(PAGE_SIZE);
            if page.raw_count == 0 || fetched_so_far >= page.total_count {
                break;
            }
            page_no += 1;
        }
        tracing::info!(
            district_code,
            deal_yyyymm,
            records = all.len(),
            "transactions fetched"
        );
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<response>
  <header>
    <resultCode>00</resultCode>
    <resultMsg>NORMAL SERVICE.</resultMsg>
  </header>
  <body>
    <items>
      <item>
        <aptNm>개포현대</aptNm>
        <aptDong>200동</aptDong>
        <umdNm>개포동</umdNm>
        <jibun>653</jibun>
        <excluUseAr>84.97</excluUseAr>
        <floor>9</floor>
        <dealAmount>230,000</dealAmount>
        <dealYear>2025</dealYear>
        <dealMonth>6</dealMonth>
        <dealDay>12</dealDay>
        <buildYear>1986</buildYear>
      </item>
      <item>
        <aptNm>개포현대</aptNm>
        <umdNm>개포동</umdNm>
        <excluUseAr>84.97</excluUseAr>
        <floor>3</floor>
        <dealAmount>228,000</dealAmount>
        <dealYear>2025</dealYear>
        <dealMonth>5</dealMonth>
        <dealDay>2</dealDay>
        <buildYear>1986</buildYear>
        <cdealType>O</cdealType>
      </item>
      <item>
        <aptNm>은마</aptNm>
        <umdNm>대치동</umdNm>
        <excluUseAr>76.79</excluUseAr>
        <floor></floor>
        <dealAmount>245,000</dealAmount>
        <dealYear>2025</dealYear>
        <dealMonth>6</dealMonth>
        <dealDay>1</dealDay>
        <buildYear>1979</buildYear>
      </item>
    </items>
    <numOfRows>1000</numOfRows>
    <pageNo>1</pageNo>
    <totalCount>3</totalCount>
  </body>
</response>"#;

    #[test]
    fn parses_items_and_drops_cancelled() {
        let page = parse_page(SAMPLE).unwrap();
        assert_eq!(page.raw_count, 3);
        assert_eq!(page.total_count, 3);
        // the cancelled deal is gone
        assert_eq!(page.records.len(), 2);

        let first = &page.records[0];
        assert_eq!(first.apt_name, "개포현대");
        assert_eq!(first.apt_dong, "200동");
        assert_eq!(first.deal_price, 230000);
        assert_eq!(first.area_sqm, 84.97);
        assert_eq!(first.floor, Some(9));
        assert_eq!(
            first.deal_date,
            NaiveDate::from_ymd_opt(2025, 6, 12).unwrap()
        );
        assert_eq!(first.build_year, Some(1986));

        // empty floor element becomes a null floor
        assert_eq!(page.records[1].floor, None);
    }

    #[test]
    fn error_result_code_is_semantic() {
        let xml = r#"<response>
  <header><resultCode>30</resultCode><resultMsg>SERVICE KEY IS NOT REGISTERED ERROR.</resultMsg></header>
</response>"#;
        assert!(matches!(parse_page(xml), Err(Error::Semantic(_))));
    }

    #[test]
    fn missing_items_means_no_data() {
        let xml = r#"<response>
  <header><resultCode>000</resultCode><resultMsg>OK</resultMsg></header>
  <body><totalCount>0</totalCount></body>
</response>"#;
        let page = parse_page(xml).unwrap();
        assert!(page.records.is_empty());
        assert_eq!(page.raw_count, 0);
    }

    #[test]
    fn malformed_amount_drops_the_record() {
        let xml = r#"<response>
  <header><resultCode>00</resultCode></header>
  <body>
    <items><item>
      <aptNm>개포현대</aptNm>
      <excluUseAr>84.97</excluUseAr>
      <dealAmount>비공개</dealAmount>
      <dealYear>2025</dealYear><dealMonth>6</dealMonth><dealDay>1</dealDay>
    </item></items>
    <totalCount>1</totalCount>
  </body>
</response>"#;
        let page = parse_page(xml).unwrap();
        assert_eq!(page.raw_count, 1);
        assert!(page.records.is_empty());
    }
}
