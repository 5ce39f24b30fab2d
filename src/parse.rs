// src/parse.rs
// Extract a draw from the results page's description text, e.g.
//   "로또 1155회 당첨번호는 4, 8, 22, 26, 32, 38 보너스 27 입니다.
//    추첨일 2025년 1월 18일, 1등 당첨자 14명, 1등 당첨금 19억6122만8268원"
// Only the numbers + bonus are required; every other field degrades to empty/0.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::model::{DrawResult, PICK};

static NUMBERS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"당첨번호(?:는|은)?\s*(\d{1,2})\s*,\s*(\d{1,2})\s*,\s*(\d{1,2})\s*,\s*(\d{1,2})\s*,\s*(\d{1,2})\s*,\s*(\d{1,2})\s*보너스(?:\s*번호)?\s*(\d{1,2})",
    )
    .expect("numbers pattern")
});

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4})년\s*(\d{1,2})월\s*(\d{1,2})일").expect("date pattern")
});

static WINNERS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"1등\s*(?:당첨자\s*)?(?:총\s*)?(\d[\d,]*)\s*명").expect("winners pattern")
});

static PRIZE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"1등\s*(?:1인당\s*)?당첨금(?:액)?(?:은|는)?\s*([\d,]*억?[\d,]*만?[\d,]*)원")
        .expect("prize pattern")
});

static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(\d+)억)?(?:(\d+)만)?(\d+)?$").expect("amount pattern")
});

/// Parse one description string. `None` when the numbers/bonus marker is absent
/// or the numbers break the 6/45 rules.
pub fn parse_description(draw_no: u32, text: &str) -> Option<DrawResult> {
    let caps = NUMBERS_RE.captures(text)?;
    let mut numbers = [0u8; PICK];
    for (i, slot) in numbers.iter_mut().enumerate() {
        *slot = caps.get(i + 1)?.as_str().parse().ok()?;
    }
    let bonus: u8 = caps.get(PICK + 1)?.as_str().parse().ok()?;

    let prize = PRIZE_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| parse_prize_amount(m.as_str()))
        .unwrap_or(0);
    let winners = WINNERS_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| strip_commas(m.as_str()).parse().ok())
        .unwrap_or(0);

    Some(
        DrawResult::new(draw_no, numbers, bonus)?
            .with_date(parse_date(text))
            .with_first_tier(prize, winners),
    )
}

/// First "YYYY년 M월 D일" in the text. Impossible dates yield `None`.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let caps = DATE_RE.captures(text)?;
    let y: i32 = caps.get(1)?.as_str().parse().ok()?;
    let m: u32 = caps.get(2)?.as_str().parse().ok()?;
    let d: u32 = caps.get(3)?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(y, m, d)
}

/// "40억6637만5179" (optionally with "원", commas or spaces) → 4066375179.
/// A missing unit group counts as zero.
pub fn parse_prize_amount(s: &str) -> Option<u64> {
    let cleaned: String = s
        .trim()
        .trim_end_matches('원')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    let caps = AMOUNT_RE.captures(&cleaned)?;
    let group = |i: usize| -> Option<u64> {
        match caps.get(i) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(0),
        }
    };
    let eok = group(1)?;
    let man = group(2)?;
    let rest = group(3)?;
    eok.checked_mul(100_000_000)?
        .checked_add(man.checked_mul(10_000)?)?
        .checked_add(rest)
}

fn strip_commas(s: &str) -> String {
    s.chars().filter(|c| *c != ',').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "로또 1155회 당첨번호는 4, 8, 22, 26, 32, 38 보너스 27 입니다. \
                          추첨일 2025년 1월 18일, 1등 당첨자 14명, 1등 당첨금 19억6122만8268원";

    #[test]
    fn parses_full_description() {
        let d = parse_description(1155, SAMPLE).expect("parsed");
        assert_eq!(d.draw_no(), 1155);
        assert_eq!(d.numbers(), &[4, 8, 22, 26, 32, 38]);
        assert_eq!(d.bonus(), 27);
        assert_eq!(d.date(), NaiveDate::from_ymd_opt(2025, 1, 18));
        assert_eq!(d.first_winner_count(), 14);
        assert_eq!(d.first_prize_amount(), 1_961_228_268);
    }

    #[test]
    fn prize_amount_groups() {
        assert_eq!(parse_prize_amount("40억6637만5179원"), Some(4_066_375_179));
        assert_eq!(parse_prize_amount("3억원"), Some(300_000_000));
        assert_eq!(parse_prize_amount("6637만"), Some(66_370_000));
        assert_eq!(parse_prize_amount("5,179원"), Some(5_179));
        assert_eq!(parse_prize_amount("12억 500"), Some(1_200_000_500));
        assert_eq!(parse_prize_amount("약 3억"), None);
    }

    #[test]
    fn date_is_zero_padded() {
        let date = parse_date("추첨일 2025년 1월 18일").expect("date");
        assert_eq!(date.format("%Y-%m-%d").to_string(), "2025-01-18");
        assert_eq!(parse_date("2025년 2월 30일"), None);
    }

    #[test]
    fn missing_numbers_marker_is_none() {
        assert!(parse_description(1, "동행복권 로또 6/45 당첨결과").is_none());
        assert!(parse_description(1, "당첨번호는 4, 8, 22, 26, 32 보너스 27").is_none());
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        let dup = "당첨번호는 4, 4, 22, 26, 32, 38 보너스 27";
        assert!(parse_description(1, dup).is_none());
        let out_of_range = "당첨번호는 4, 8, 22, 26, 32, 46 보너스 27";
        assert!(parse_description(1, out_of_range).is_none());
        let bonus_repeats = "당첨번호는 4, 8, 22, 26, 32, 38 보너스 38";
        assert!(parse_description(1, bonus_repeats).is_none());
    }

    #[test]
    fn optional_fields_degrade_independently() {
        let d = parse_description(7, "당첨번호 2,9,16,25,26,40 보너스 번호 42").expect("parsed");
        assert_eq!(d.numbers(), &[2, 9, 16, 25, 26, 40]);
        assert_eq!(d.bonus(), 42);
        assert_eq!(d.date(), None);
        assert_eq!(d.first_winner_count(), 0);
        assert_eq!(d.first_prize_amount(), 0);

        let d = parse_description(8, "당첨번호는 1, 2, 3, 4, 5, 6 보너스 7. 1등 당첨금 3억원")
            .expect("parsed");
        assert_eq!(d.first_prize_amount(), 300_000_000);
        assert_eq!(d.first_winner_count(), 0);
    }

    #[test]
    fn winner_count_accepts_total_marker() {
        let d = parse_description(9, "당첨번호는 1, 2, 3, 4, 5, 6 보너스 7, 1등 총 1,024명")
            .expect("parsed");
        assert_eq!(d.first_winner_count(), 1024);
    }

    #[test]
    fn parsing_is_deterministic() {
        assert_eq!(parse_description(1155, SAMPLE), parse_description(1155, SAMPLE));
    }
}
