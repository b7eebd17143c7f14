//! Static registry of Korean administrative division codes.
//!
//! Three levels are kept: province codes (10 digits, zero padded), district
//! codes (the 5-digit prefix required by the transactions registry) and
//! dong-level codes (the full 10-digit legal-dong identifier required by the
//! appraisal source). Dong refinement only exists for the districts where the
//! district-level fallback proved too coarse; everywhere else the fallback is
//! the district code padded with `00000`.

mod districts;
mod dongs;

pub use districts::DISTRICT_CODES;
pub use dongs::DONG_CODES;

/// Province name to its 10-digit code, as used by the listings source to seed
/// sub-region traversal.
pub const PROVINCE_CODES: &[(&str, &str)] = &[
    ("서울특별시", "1100000000"),
    ("부산광역시", "2600000000"),
    ("대구광역시", "2700000000"),
    ("인천광역시", "2800000000"),
    ("광주광역시", "2900000000"),
    ("대전광역시", "3000000000"),
    ("울산광역시", "3100000000"),
    ("세종특별자치시", "3600000000"),
    ("경기도", "4100000000"),
    ("강원특별자치도", "4200000000"),
    ("충청북도", "4300000000"),
    ("충청남도", "4400000000"),
    ("전북특별자치도", "4500000000"),
    ("전라남도", "4600000000"),
    ("경상북도", "4700000000"),
    ("경상남도", "4800000000"),
    ("제주특별자치도", "5000000000"),
];

pub fn province_code(province: &str) -> Option<&'static str> {
    PROVINCE_CODES
        .iter()
        .find(|(name, _)| *name == province)
        .map(|(_, code)| *code)
}

/// 5-digit district code, the `LAWD_CD` parameter of the transactions
/// registry.
pub fn district_code(province: &str, district: &str) -> Option<&'static str> {
    DISTRICT_CODES
        .iter()
        .find(|(p, d, _)| *p == province && *d == district)
        .map(|(_, _, code)| *code)
}

/// Dong-level 10-digit code, when a refinement entry exists.
pub fn dong_code(province: &str, district: &str, dong: &str) -> Option<&'static str> {
    DONG_CODES
        .iter()
        .find(|(p, d, n, _)| *p == province && *d == district && *n == dong)
        .map(|(_, _, _, code)| *code)
}

/// 10-digit area code for the appraisal source. Prefers the dong-level entry;
/// falls back to the district code padded to 10 digits.
pub fn area_code(province: &str, district: &str, dong: Option<&str>) -> Option<String> {
    if let Some(dong) = dong {
        if let Some(code) = dong_code(province, district, dong) {
            return Some(code.to_string());
        }
    }
    district_code(province, district).map(|code| format!("{code}00000"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provinces_have_ten_digit_codes() {
        for (name, code) in PROVINCE_CODES {
            assert_eq!(code.len(), 10, "{name}");
            assert!(code.chars().all(|c| c.is_ascii_digit()), "{name}");
        }
    }

    #[test]
    fn districts_have_five_digit_codes() {
        for (province, district, code) in DISTRICT_CODES {
            assert_eq!(code.len(), 5, "{province} {district}");
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn dong_codes_extend_their_district() {
        for (province, district, dong, code) in DONG_CODES {
            assert_eq!(code.len(), 10, "{district} {dong}");
            let district_code = district_code(province, district).unwrap();
            assert_eq!(&code[..5], district_code, "{district} {dong}");
        }
    }

    #[test]
    fn area_code_prefers_dong_refinement() {
        assert_eq!(
            area_code("서울특별시", "강남구", Some("대치동")).as_deref(),
            Some("1168010600")
        );
        // No refinement entry: fall back to the padded district code.
        assert_eq!(
            area_code("서울특별시", "강남구", Some("없는동")).as_deref(),
            Some("1168000000")
        );
        assert_eq!(
            area_code("경기도", "성남시", None).as_deref(),
            Some("4113000000")
        );
        assert_eq!(area_code("서울특별시", "없는구", None), None);
    }

    #[test]
    fn lookups_miss_cleanly() {
        assert_eq!(province_code("화성"), None);
        assert_eq!(district_code("서울특별시", "구미시"), None);
        assert_eq!(dong_code("서울특별시", "강남구", "혜화동"), None);
    }

    #[test]
    fn district_code_round_trips_known_regions() {
        assert_eq!(district_code("서울특별시", "강남구"), Some("11680"));
        assert_eq!(district_code("서울특별시", "송파구"), Some("11710"));
        assert_eq!(district_code("인천광역시", "미추홀구"), Some("28177"));
        assert_eq!(district_code("세종특별자치시", "세종시"), Some("36110"));
    }
}
