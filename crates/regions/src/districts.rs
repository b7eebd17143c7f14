//! Nationwide district (시/군/구) codes: 5-digit prefixes of the legal-dong
//! code, keyed by (province, district).

pub const DISTRICT_CODES: &[(&str, &str, &str)] = &[
    // 서울특별시
    ("서울특별시", "종로구", "11110"),
    ("서울특별시", "중구", "11140"),
    ("서울특별시", "용산구", "11170"),
    ("서울특별시", "성동구", "11200"),
    ("서울특별시", "광진구", "11215"),
    ("서울특별시", "동대문구", "11230"),
    ("서울특별시", "중랑구", "11260"),
    ("서울특별시", "성북구", "11290"),
    ("서울특별시", "강북구", "11305"),
    ("서울특별시", "도봉구", "11320"),
    ("서울특별시", "노원구", "11350"),
    ("서울특별시", "은평구", "11380"),
    ("서울특별시", "서대문구", "11410"),
    ("서울특별시", "마포구", "11440"),
    ("서울특별시", "양천구", "11470"),
    ("서울특별시", "강서구", "11500"),
    ("서울특별시", "구로구", "11530"),
    ("서울특별시", "금천구", "11545"),
    ("서울특별시", "영등포구", "11560"),
    ("서울특별시", "동작구", "11590"),
    ("서울특별시", "관악구", "11620"),
    ("서울특별시", "서초구", "11650"),
    ("서울특별시", "강남구", "11680"),
    ("서울특별시", "송파구", "11710"),
    ("서울특별시", "강동구", "11740"),
    // 경기도
    ("경기도", "수원시", "41110"),
    ("경기도", "성남시", "41130"),
    ("경기도", "의정부시", "41150"),
    ("경기도", "안양시", "41170"),
    ("경기도", "부천시", "41190"),
    ("경기도", "광명시", "41210"),
    ("경기도", "평택시", "41220"),
    ("경기도", "동두천시", "41250"),
    ("경기도", "안산시", "41270"),
    ("경기도", "고양시", "41280"),
    ("경기도", "과천시", "41290"),
    ("경기도", "구리시", "41310"),
    ("경기도", "남양주시", "41360"),
    ("경기도", "오산시", "41370"),
    ("경기도", "시흥시", "41390"),
    ("경기도", "군포시", "41410"),
    ("경기도", "의왕시", "41430"),
    ("경기도", "하남시", "41450"),
    ("경기도", "용인시", "41460"),
    ("경기도", "파주시", "41480"),
    ("경기도", "이천시", "41500"),
    ("경기도", "안성시", "41550"),
    ("경기도", "김포시", "41570"),
    ("경기도", "화성시", "41590"),
    ("경기도", "광주시", "41610"),
    ("경기도", "양주시", "41630"),
    ("경기도", "포천시", "41650"),
    ("경기도", "여주시", "41670"),
    // 인천광역시
    ("인천광역시", "중구", "28110"),
    ("인천광역시", "동구", "28140"),
    ("인천광역시", "미추홀구", "28177"),
    ("인천광역시", "연수구", "28185"),
    ("인천광역시", "남동구", "28200"),
    ("인천광역시", "부평구", "28237"),
    ("인천광역시", "계양구", "28245"),
    ("인천광역시", "서구", "28260"),
    // 부산광역시
    ("부산광역시", "중구", "26110"),
    ("부산광역시", "서구", "26140"),
    ("부산광역시", "동구", "26170"),
    ("부산광역시", "영도구", "26200"),
    ("부산광역시", "부산진구", "26230"),
    ("부산광역시", "동래구", "26260"),
    ("부산광역시", "남구", "26290"),
    ("부산광역시", "북구", "26320"),
    ("부산광역시", "해운대구", "26350"),
    ("부산광역시", "사하구", "26380"),
    ("부산광역시", "금정구", "26410"),
    ("부산광역시", "강서구", "26440"),
    ("부산광역시", "연제구", "26470"),
    ("부산광역시", "수영구", "26500"),
    ("부산광역시", "사상구", "26530"),
    ("부산광역시", "기장군", "26710"),
    // 대구광역시
    ("대구광역시", "중구", "27110"),
    ("대구광역시", "동구", "27140"),
    ("대구광역시", "서구", "27170"),
    ("대구광역시", "남구", "27200"),
    ("대구광역시", "북구", "27230"),
    ("대구광역시", "수성구", "27260"),
    ("대구광역시", "달서구", "27290"),
    ("대구광역시", "달성군", "27710"),
    // 광주광역시
    ("광주광역시", "동구", "29110"),
    ("광주광역시", "서구", "29140"),
    ("광주광역시", "남구", "29155"),
    ("광주광역시", "북구", "29170"),
    ("광주광역시", "광산구", "29200"),
    // 대전광역시
    ("대전광역시", "동구", "30110"),
    ("대전광역시", "중구", "30140"),
    ("대전광역시", "서구", "30170"),
    ("대전광역시", "유성구", "30200"),
    ("대전광역시", "대덕구", "30230"),
    // 세종특별자치시
    ("세종특별자치시", "세종시", "36110"),
    // 울산광역시
    ("울산광역시", "중구", "31110"),
    ("울산광역시", "남구", "31140"),
    ("울산광역시", "동구", "31170"),
    ("울산광역시", "북구", "31200"),
    ("울산광역시", "울주군", "31710"),
];
