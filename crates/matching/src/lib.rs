//! Complex-name normalization and fuzzy matching.
//!
//! The three data sources disagree about how an apartment complex is called:
//! the listings portal says "래미안대치팰리스", the appraisal source
//! "래미안 대치팰리스 1단지", the transactions registry "래미안대치팰리스(1단지)".
//! Everything here is a pure function over strings so the matching behavior
//! can be tested without a store or a network.

use {
    regex::Regex,
    std::{collections::HashSet, sync::LazyLock},
};

static PARENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^)]*\)").unwrap());
static COMMA_DONG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\d,]+동.*$").unwrap());
static DONG_RANGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+동[~\-]\d+동").unwrap());
static TRAILING_UNIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(동|단지|차)$").unwrap());
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^0-9a-z가-힣]").unwrap());
static KOREAN_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[가-힣]{2,}").unwrap());

/// Canonicalizes a complex name: parenthesized notes, dong lists/ranges and
/// trailing unit tokens ("3동", "1단지", "2차") go away, the rest is
/// lowercased and stripped to Korean syllables, latin letters and digits.
/// Idempotent: trailing unit tokens are stripped to a fixed point.
pub fn normalize(name: &str) -> String {
    let mut s = PARENS.replace_all(name, "").into_owned();
    s = COMMA_DONG.replace_all(&s, "").into_owned();
    s = DONG_RANGE.replace_all(&s, "").into_owned();
    loop {
        let trimmed = s.trim_end();
        let next = TRAILING_UNIT.replace(trimmed, "").into_owned();
        if next == s {
            break;
        }
        s = next;
    }
    NON_WORD.replace_all(&s.to_lowercase(), "").into_owned()
}

/// Similarity of two raw names on a coarse 0/40/70/100 scale.
///
/// 100 = equal after normalization, 70 = one contains the other, 40 = they
/// share at least one Korean word of two or more syllables, 0 = unrelated.
pub fn score(a: &str, b: &str) -> u32 {
    score_normalized(&normalize(a), &normalize(b))
}

fn score_normalized(a: &str, b: &str) -> u32 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    if a == b {
        return 100;
    }
    if a.contains(b) || b.contains(a) {
        return 70;
    }
    let words_a: HashSet<&str> = KOREAN_WORD.find_iter(a).map(|m| m.as_str()).collect();
    let words_b: HashSet<&str> = KOREAN_WORD.find_iter(b).map(|m| m.as_str()).collect();
    if words_a.intersection(&words_b).next().is_some() {
        return 40;
    }
    0
}

/// Minimum score for [`best_match`] to report a candidate at all.
pub const MATCH_THRESHOLD: u32 = 40;

/// Index and score of the best-scoring candidate, if any reaches the
/// threshold. Earlier candidates win ties.
pub fn best_match<S: AsRef<str>>(target: &str, candidates: &[S]) -> Option<(usize, u32)> {
    let target = normalize(target);
    let mut best: Option<(usize, u32)> = None;
    for (index, candidate) in candidates.iter().enumerate() {
        let score = score_normalized(&target, &normalize(candidate.as_ref()));
        if score > best.map(|(_, s)| s).unwrap_or(0) {
            best = Some((index, score));
        }
    }
    best.filter(|(_, score)| *score >= MATCH_THRESHOLD)
}

/// The in-memory tail of the transaction-name resolution ladder, tried after
/// the store-side exact and substring lookups failed:
/// whitespace-stripped equality, then normalized equality, then normalized
/// bidirectional containment where the longer overlap wins. Transaction names
/// are the noisiest of the three sources (dong suffixes, parenthetical
/// notes), hence the extra strategies.
pub fn waterfall_match(target: &str, candidates: &[(i64, String)]) -> Option<i64> {
    let no_space = strip_spaces(target);
    for (id, name) in candidates {
        if strip_spaces(name) == no_space {
            return Some(*id);
        }
    }

    let target_norm = normalize(target);
    if target_norm.chars().count() >= 2 {
        for (id, name) in candidates {
            if normalize(name) == target_norm {
                return Some(*id);
            }
        }
    }

    if target_norm.chars().count() >= 3 {
        let mut best = None;
        let mut best_len = 0;
        for (id, name) in candidates {
            let candidate = normalize(name);
            if candidate.chars().count() < 3 {
                continue;
            }
            if target_norm.contains(&candidate) || candidate.contains(&target_norm) {
                let overlap = target_norm.chars().count().min(candidate.chars().count());
                if overlap > best_len {
                    best = Some(*id);
                    best_len = overlap;
                }
            }
        }
        if best.is_some() {
            return best;
        }
    }

    None
}

fn strip_spaces(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_parens_and_unit_tokens() {
        assert_eq!(normalize("래미안(1단지)"), "래미안");
        assert_eq!(normalize("래미안 1단지"), "래미안");
        assert_eq!(normalize("개포현대(200동)"), "개포현대");
        assert_eq!(normalize("현대1차101동~106동"), "현대");
        assert_eq!(normalize("한신서래-마을"), "한신서래마을");
        assert_eq!(normalize("DMC파크뷰자이"), "dmc파크뷰자이");
    }

    #[test]
    fn normalize_is_idempotent() {
        for name in [
            "래미안(1단지)",
            "현대1차2차",
            "잠실주공5단지",
            "e편한세상 2차",
            "개포현대 103동",
            "",
        ] {
            let once = normalize(name);
            assert_eq!(normalize(&once), once, "{name:?}");
        }
    }

    #[test]
    fn score_levels() {
        assert_eq!(score("래미안(1단지)", "래미안 1단지"), 100);
        assert_eq!(score("래미안", "자이"), 0);
        // one side contains the other
        assert_eq!(score("래미안대치팰리스", "대치팰리스"), 70);
        // shared korean word only (digits split the syllable runs)
        assert_eq!(score("서초2래미안", "대치3래미안"), 40);
    }

    #[test]
    fn score_self_is_100_when_nonempty() {
        for name in ["래미안", "잠실엘스", "e편한세상"] {
            assert_eq!(score(name, name), 100);
        }
        // degenerate: normalizes to empty
        assert_eq!(score("(1단지)", "(1단지)"), 0);
    }

    #[test]
    fn best_match_honors_threshold() {
        let candidates = ["래미안", "자이", "힐스테이트"];
        assert_eq!(best_match("래미안 1단지", &candidates), Some((0, 100)));
        assert_eq!(best_match("푸르지오", &candidates), None);
    }

    #[test]
    fn best_match_prefers_first_on_tie() {
        let candidates = ["대치래미안", "도곡래미안"];
        // both score 70 against "래미안"
        assert_eq!(best_match("래미안", &candidates), Some((0, 70)));
    }

    #[test]
    fn waterfall_space_stripped_equality() {
        let candidates = vec![(7, "래미안 대치팰리스".to_string())];
        assert_eq!(waterfall_match("래미안대치팰리스", &candidates), Some(7));
    }

    #[test]
    fn waterfall_normalized_equality() {
        let candidates = vec![(3, "개포현대".to_string())];
        assert_eq!(waterfall_match("개포현대(200동)", &candidates), Some(3));
    }

    #[test]
    fn waterfall_longest_containment_wins() {
        let candidates = vec![
            (1, "한양".to_string()),
            (2, "한양수자인".to_string()),
            (3, "한양수자인상월곡".to_string()),
        ];
        // "한양수자인" equals candidate 2 on an earlier rung; the longer
        // name only resolves through containment, where candidate 3 has the
        // larger overlap.
        assert_eq!(waterfall_match("한양수자인", &candidates), Some(2));
        assert_eq!(waterfall_match("한양수자인상월곡아파트", &candidates), Some(3));
    }

    #[test]
    fn waterfall_rejects_short_and_unrelated_names() {
        let candidates = vec![(1, "래미안".to_string())];
        assert_eq!(waterfall_match("자이", &candidates), None);
        assert_eq!(waterfall_match("", &candidates), None);
    }
}
