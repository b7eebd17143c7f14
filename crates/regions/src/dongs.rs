//! Dong-level (법정동) 10-digit codes for the districts that need refinement
//! below the district fallback. The appraisal source resolves complex lists
//! per legal dong, so district-level codes miss complexes in large districts.

pub const DONG_CODES: &[(&str, &str, &str, &str)] = &[
    // 서울특별시 강남구
    ("서울특별시", "강남구", "역삼동", "1168010100"),
    ("서울특별시", "강남구", "개포동", "1168010300"),
    ("서울특별시", "강남구", "청담동", "1168010400"),
    ("서울특별시", "강남구", "삼성동", "1168010500"),
    ("서울특별시", "강남구", "대치동", "1168010600"),
    ("서울특별시", "강남구", "신사동", "1168010700"),
    ("서울특별시", "강남구", "논현동", "1168010800"),
    ("서울특별시", "강남구", "압구정동", "1168011000"),
    ("서울특별시", "강남구", "세곡동", "1168011100"),
    ("서울특별시", "강남구", "자곡동", "1168011200"),
    ("서울특별시", "강남구", "율현동", "1168011300"),
    ("서울특별시", "강남구", "일원동", "1168011400"),
    ("서울특별시", "강남구", "수서동", "1168011500"),
    ("서울특별시", "강남구", "도곡동", "1168011800"),
    // 서울특별시 서초구
    ("서울특별시", "서초구", "방배동", "1165010100"),
    ("서울특별시", "서초구", "양재동", "1165010200"),
    ("서울특별시", "서초구", "우면동", "1165010300"),
    ("서울특별시", "서초구", "잠원동", "1165010600"),
    ("서울특별시", "서초구", "반포동", "1165010700"),
    ("서울특별시", "서초구", "서초동", "1165010800"),
    ("서울특별시", "서초구", "내곡동", "1165010900"),
    ("서울특별시", "서초구", "신원동", "1165011100"),
    // 서울특별시 송파구
    ("서울특별시", "송파구", "잠실동", "1171010100"),
    ("서울특별시", "송파구", "신천동", "1171010200"),
    ("서울특별시", "송파구", "풍납동", "1171010300"),
    ("서울특별시", "송파구", "송파동", "1171010400"),
    ("서울특별시", "송파구", "석촌동", "1171010500"),
    ("서울특별시", "송파구", "삼전동", "1171010600"),
    ("서울특별시", "송파구", "가락동", "1171010700"),
    ("서울특별시", "송파구", "문정동", "1171010800"),
    ("서울특별시", "송파구", "장지동", "1171010900"),
    ("서울특별시", "송파구", "방이동", "1171011100"),
    ("서울특별시", "송파구", "오금동", "1171011200"),
    ("서울특별시", "송파구", "거여동", "1171011300"),
    ("서울특별시", "송파구", "마천동", "1171011400"),
    // 서울특별시 종로구
    ("서울특별시", "종로구", "청운동", "1111010100"),
    ("서울특별시", "종로구", "신교동", "1111010200"),
    ("서울특별시", "종로구", "궁정동", "1111010300"),
    ("서울특별시", "종로구", "효자동", "1111010400"),
    ("서울특별시", "종로구", "창성동", "1111010500"),
    ("서울특별시", "종로구", "통의동", "1111010600"),
    ("서울특별시", "종로구", "적선동", "1111010700"),
    ("서울특별시", "종로구", "통인동", "1111010800"),
    ("서울특별시", "종로구", "누상동", "1111010900"),
    ("서울특별시", "종로구", "누하동", "1111011000"),
    ("서울특별시", "종로구", "옥인동", "1111011100"),
    ("서울특별시", "종로구", "체부동", "1111011200"),
    ("서울특별시", "종로구", "필운동", "1111011300"),
    ("서울특별시", "종로구", "내자동", "1111011400"),
    ("서울특별시", "종로구", "사직동", "1111011500"),
    ("서울특별시", "종로구", "도렴동", "1111011600"),
    ("서울특별시", "종로구", "당주동", "1111011700"),
    ("서울특별시", "종로구", "내수동", "1111011800"),
    ("서울특별시", "종로구", "세종로", "1111011900"),
    ("서울특별시", "종로구", "신문로1가", "1111012000"),
    ("서울특별시", "종로구", "신문로2가", "1111012100"),
    ("서울특별시", "종로구", "청진동", "1111012200"),
    ("서울특별시", "종로구", "서린동", "1111012300"),
    ("서울특별시", "종로구", "수송동", "1111012400"),
    ("서울특별시", "종로구", "중학동", "1111012500"),
    ("서울특별시", "종로구", "종로1가", "1111012600"),
    ("서울특별시", "종로구", "공평동", "1111012700"),
    ("서울특별시", "종로구", "관훈동", "1111012800"),
    ("서울특별시", "종로구", "견지동", "1111012900"),
    ("서울특별시", "종로구", "와룡동", "1111013000"),
    ("서울특별시", "종로구", "권농동", "1111013100"),
    ("서울특별시", "종로구", "운니동", "1111013200"),
    ("서울특별시", "종로구", "익선동", "1111013300"),
    ("서울특별시", "종로구", "경운동", "1111013400"),
    ("서울특별시", "종로구", "관철동", "1111013500"),
    ("서울특별시", "종로구", "인사동", "1111013600"),
    ("서울특별시", "종로구", "낙원동", "1111013700"),
    ("서울특별시", "종로구", "종로2가", "1111013800"),
    ("서울특별시", "종로구", "팔판동", "1111013900"),
    ("서울특별시", "종로구", "삼청동", "1111014000"),
    ("서울특별시", "종로구", "안국동", "1111014100"),
    ("서울특별시", "종로구", "소격동", "1111014200"),
    ("서울특별시", "종로구", "화동", "1111014300"),
    ("서울특별시", "종로구", "사간동", "1111014400"),
    ("서울특별시", "종로구", "송현동", "1111014500"),
    ("서울특별시", "종로구", "가회동", "1111014600"),
    ("서울특별시", "종로구", "재동", "1111014700"),
    ("서울특별시", "종로구", "계동", "1111014800"),
    ("서울특별시", "종로구", "원서동", "1111014900"),
    ("서울특별시", "종로구", "훈정동", "1111015000"),
    ("서울특별시", "종로구", "묘동", "1111015100"),
    ("서울특별시", "종로구", "봉익동", "1111015200"),
    ("서울특별시", "종로구", "돈의동", "1111015300"),
    ("서울특별시", "종로구", "장사동", "1111015400"),
    ("서울특별시", "종로구", "관수동", "1111015500"),
    ("서울특별시", "종로구", "종로3가", "1111015600"),
    ("서울특별시", "종로구", "인의동", "1111015700"),
    ("서울특별시", "종로구", "예지동", "1111015800"),
    ("서울특별시", "종로구", "원남동", "1111015900"),
    ("서울특별시", "종로구", "연지동", "1111016000"),
    ("서울특별시", "종로구", "종로4가", "1111016100"),
    ("서울특별시", "종로구", "효제동", "1111016200"),
    ("서울특별시", "종로구", "종로5가", "1111016300"),
    ("서울특별시", "종로구", "종로6가", "1111016400"),
    ("서울특별시", "종로구", "이화동", "1111016500"),
    ("서울특별시", "종로구", "연건동", "1111016600"),
    ("서울특별시", "종로구", "충신동", "1111016700"),
    ("서울특별시", "종로구", "동숭동", "1111016800"),
    ("서울특별시", "종로구", "혜화동", "1111016900"),
    ("서울특별시", "종로구", "명륜1가", "1111017000"),
    ("서울특별시", "종로구", "명륜2가", "1111017100"),
    ("서울특별시", "종로구", "명륜4가", "1111017200"),
    ("서울특별시", "종로구", "명륜3가", "1111017300"),
    ("서울특별시", "종로구", "창신동", "1111017400"),
    ("서울특별시", "종로구", "숭인동", "1111017500"),
    ("서울특별시", "종로구", "교남동", "1111017600"),
    ("서울특별시", "종로구", "평동", "1111017700"),
    ("서울특별시", "종로구", "송월동", "1111017800"),
    ("서울특별시", "종로구", "홍파동", "1111017900"),
    ("서울특별시", "종로구", "교북동", "1111018000"),
    ("서울특별시", "종로구", "행촌동", "1111018100"),
    ("서울특별시", "종로구", "구기동", "1111018200"),
    ("서울특별시", "종로구", "평창동", "1111018300"),
    ("서울특별시", "종로구", "부암동", "1111018400"),
    ("서울특별시", "종로구", "홍지동", "1111018500"),
    ("서울특별시", "종로구", "신영동", "1111018600"),
    ("서울특별시", "종로구", "무악동", "1111018700"),
    // 서울특별시 중구
    ("서울특별시", "중구", "무교동", "1114010100"),
    ("서울특별시", "중구", "다동", "1114010200"),
    ("서울특별시", "중구", "태평로1가", "1114010300"),
    ("서울특별시", "중구", "을지로1가", "1114010400"),
    ("서울특별시", "중구", "을지로2가", "1114010500"),
    ("서울특별시", "중구", "남대문로1가", "1114010600"),
    ("서울특별시", "중구", "삼각동", "1114010700"),
    ("서울특별시", "중구", "수하동", "1114010800"),
    ("서울특별시", "중구", "장교동", "1114010900"),
    ("서울특별시", "중구", "수표동", "1114011000"),
    ("서울특별시", "중구", "소공동", "1114011100"),
    ("서울특별시", "중구", "남창동", "1114011200"),
    ("서울특별시", "중구", "북창동", "1114011300"),
    ("서울특별시", "중구", "태평로2가", "1114011400"),
    ("서울특별시", "중구", "남대문로2가", "1114011500"),
    ("서울특별시", "중구", "남대문로3가", "1114011600"),
    ("서울특별시", "중구", "남대문로4가", "1114011700"),
    ("서울특별시", "중구", "남대문로5가", "1114011800"),
    ("서울특별시", "중구", "봉래동1가", "1114011900"),
    ("서울특별시", "중구", "봉래동2가", "1114012000"),
    ("서울특별시", "중구", "회현동1가", "1114012100"),
    ("서울특별시", "중구", "회현동2가", "1114012200"),
    ("서울특별시", "중구", "회현동3가", "1114012300"),
    ("서울특별시", "중구", "충무로1가", "1114012400"),
    ("서울특별시", "중구", "충무로2가", "1114012500"),
    ("서울특별시", "중구", "명동1가", "1114012600"),
    ("서울특별시", "중구", "명동2가", "1114012700"),
    ("서울특별시", "중구", "남산동1가", "1114012800"),
    ("서울특별시", "중구", "남산동2가", "1114012900"),
    ("서울특별시", "중구", "남산동3가", "1114013000"),
    ("서울특별시", "중구", "저동1가", "1114013100"),
    ("서울특별시", "중구", "충무로4가", "1114013200"),
    ("서울특별시", "중구", "충무로5가", "1114013300"),
    ("서울특별시", "중구", "인현동2가", "1114013400"),
    ("서울특별시", "중구", "예관동", "1114013500"),
    ("서울특별시", "중구", "묵정동", "1114013600"),
    ("서울특별시", "중구", "필동1가", "1114013700"),
    ("서울특별시", "중구", "필동2가", "1114013800"),
    ("서울특별시", "중구", "필동3가", "1114013900"),
    ("서울특별시", "중구", "남학동", "1114014000"),
    ("서울특별시", "중구", "주자동", "1114014100"),
    ("서울특별시", "중구", "예장동", "1114014200"),
    ("서울특별시", "중구", "장충동1가", "1114014300"),
    ("서울특별시", "중구", "장충동2가", "1114014400"),
    ("서울특별시", "중구", "광희동1가", "1114014500"),
    ("서울특별시", "중구", "광희동2가", "1114014600"),
    ("서울특별시", "중구", "쌍림동", "1114014700"),
    ("서울특별시", "중구", "을지로6가", "1114014800"),
    ("서울특별시", "중구", "을지로7가", "1114014900"),
    ("서울특별시", "중구", "을지로4가", "1114015000"),
    ("서울특별시", "중구", "을지로5가", "1114015100"),
    ("서울특별시", "중구", "주교동", "1114015200"),
    ("서울특별시", "중구", "방산동", "1114015300"),
    ("서울특별시", "중구", "오장동", "1114015400"),
    ("서울특별시", "중구", "을지로3가", "1114015500"),
    ("서울특별시", "중구", "입정동", "1114015600"),
    ("서울특별시", "중구", "산림동", "1114015700"),
    ("서울특별시", "중구", "충무로3가", "1114015800"),
    ("서울특별시", "중구", "초동", "1114015900"),
    ("서울특별시", "중구", "인현동1가", "1114016000"),
    ("서울특별시", "중구", "저동2가", "1114016100"),
    ("서울특별시", "중구", "신당동", "1114016200"),
    ("서울특별시", "중구", "흥인동", "1114016300"),
    ("서울특별시", "중구", "무학동", "1114016400"),
    ("서울특별시", "중구", "황학동", "1114016500"),
    ("서울특별시", "중구", "서소문동", "1114016600"),
    ("서울특별시", "중구", "정동", "1114016700"),
    ("서울특별시", "중구", "순화동", "1114016800"),
    ("서울특별시", "중구", "의주로1가", "1114016900"),
    ("서울특별시", "중구", "충정로1가", "1114017000"),
    ("서울특별시", "중구", "중림동", "1114017100"),
    ("서울특별시", "중구", "의주로2가", "1114017200"),
    ("서울특별시", "중구", "만리동1가", "1114017300"),
    ("서울특별시", "중구", "만리동2가", "1114017400"),
    // 서울특별시 용산구
    ("서울특별시", "용산구", "후암동", "1117010100"),
    ("서울특별시", "용산구", "용산동2가", "1117010200"),
    ("서울특별시", "용산구", "용산동4가", "1117010300"),
    ("서울특별시", "용산구", "갈월동", "1117010400"),
    ("서울특별시", "용산구", "남영동", "1117010500"),
    ("서울특별시", "용산구", "용산동1가", "1117010600"),
    ("서울특별시", "용산구", "동자동", "1117010700"),
    ("서울특별시", "용산구", "서계동", "1117010800"),
    ("서울특별시", "용산구", "청파동1가", "1117010900"),
    ("서울특별시", "용산구", "청파동2가", "1117011000"),
    ("서울특별시", "용산구", "청파동3가", "1117011100"),
    ("서울특별시", "용산구", "원효로1가", "1117011200"),
    ("서울특별시", "용산구", "원효로2가", "1117011300"),
    ("서울특별시", "용산구", "신창동", "1117011400"),
    ("서울특별시", "용산구", "산천동", "1117011500"),
    ("서울특별시", "용산구", "청암동", "1117011600"),
    ("서울특별시", "용산구", "원효로3가", "1117011700"),
    ("서울특별시", "용산구", "원효로4가", "1117011800"),
    ("서울특별시", "용산구", "효창동", "1117011900"),
    ("서울특별시", "용산구", "도원동", "1117012000"),
    ("서울특별시", "용산구", "용문동", "1117012100"),
    ("서울특별시", "용산구", "문배동", "1117012200"),
    ("서울특별시", "용산구", "신계동", "1117012300"),
    ("서울특별시", "용산구", "한강로1가", "1117012400"),
    ("서울특별시", "용산구", "한강로2가", "1117012500"),
    ("서울특별시", "용산구", "용산동3가", "1117012600"),
    ("서울특별시", "용산구", "용산동5가", "1117012700"),
    ("서울특별시", "용산구", "한강로3가", "1117012800"),
    ("서울특별시", "용산구", "이촌동", "1117012900"),
    ("서울특별시", "용산구", "이태원동", "1117013000"),
    ("서울특별시", "용산구", "한남동", "1117013100"),
    ("서울특별시", "용산구", "동빙고동", "1117013200"),
    ("서울특별시", "용산구", "서빙고동", "1117013300"),
    ("서울특별시", "용산구", "주성동", "1117013400"),
    ("서울특별시", "용산구", "용산동6가", "1117013500"),
    ("서울특별시", "용산구", "보광동", "1117013600"),
];
