//! JSON shapes shared by the HTTP API and the lottery operator's JSON
//! endpoint, which use the same field names.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{DrawResult, FrequencyTable};

pub const SUCCESS: &str = "success";

/// `{ returnValue, drwNo, drwNoDate, drwtNo1..6, bnusNo, firstWinamnt, firstPrzwnerCo }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LottoNumber {
    pub return_value: String,
    pub drw_no: u32,
    pub drw_no_date: String,
    pub drwt_no1: u8,
    pub drwt_no2: u8,
    pub drwt_no3: u8,
    pub drwt_no4: u8,
    pub drwt_no5: u8,
    pub drwt_no6: u8,
    pub bnus_no: u8,
    pub first_winamnt: u64,
    pub first_przwner_co: u32,
}

impl LottoNumber {
    /// Convert an upstream record. Fails unless `returnValue` is "success" and
    /// the numbers pass the draw rules.
    pub fn into_draw(self) -> Option<DrawResult> {
        if self.return_value != SUCCESS {
            return None;
        }
        let numbers = [
            self.drwt_no1,
            self.drwt_no2,
            self.drwt_no3,
            self.drwt_no4,
            self.drwt_no5,
            self.drwt_no6,
        ];
        let date = NaiveDate::parse_from_str(&self.drw_no_date, "%Y-%m-%d").ok();
        Some(
            DrawResult::new(self.drw_no, numbers, self.bnus_no)?
                .with_date(date)
                .with_first_tier(self.first_winamnt, self.first_przwner_co),
        )
    }
}

impl From<&DrawResult> for LottoNumber {
    fn from(d: &DrawResult) -> Self {
        let [n1, n2, n3, n4, n5, n6] = *d.numbers();
        Self {
            return_value: SUCCESS.to_string(),
            drw_no: d.draw_no(),
            drw_no_date: d
                .date()
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            drwt_no1: n1,
            drwt_no2: n2,
            drwt_no3: n3,
            drwt_no4: n4,
            drwt_no5: n5,
            drwt_no6: n6,
            bnus_no: d.bonus(),
            first_winamnt: d.first_prize_amount(),
            first_przwner_co: d.first_winner_count(),
        }
    }
}

/// `{ recommended: [..6], frequency: { "1": n, .., "45": n } }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub recommended: Vec<u8>,
    pub frequency: BTreeMap<u8, u32>,
}

impl From<&FrequencyTable> for Recommendation {
    fn from(t: &FrequencyTable) -> Self {
        Self {
            recommended: t.recommended(),
            frequency: t.counts().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_record_converts() {
        let body = r#"{"totSellamnt":118628811000,"returnValue":"success","drwNoDate":"2025-01-18",
            "firstWinamnt":1961228268,"drwtNo6":38,"drwtNo4":26,"firstPrzwnerCo":14,"drwtNo5":32,
            "bnusNo":27,"firstAccumamnt":27457195752,"drwNo":1155,"drwtNo2":8,"drwtNo3":22,"drwtNo1":4}"#;
        let rec: LottoNumber = serde_json::from_str(body).expect("json");
        let d = rec.into_draw().expect("draw");
        assert_eq!(d.draw_no(), 1155);
        assert_eq!(d.numbers(), &[4, 8, 22, 26, 32, 38]);
        assert_eq!(d.date(), NaiveDate::from_ymd_opt(2025, 1, 18));
        assert_eq!(d.first_prize_amount(), 1_961_228_268);
        assert_eq!(d.first_winner_count(), 14);
    }

    #[test]
    fn fail_record_is_none() {
        let rec: LottoNumber = serde_json::from_str(r#"{"returnValue":"fail"}"#).expect("json");
        assert!(rec.into_draw().is_none());
    }

    #[test]
    fn missing_date_serializes_empty() {
        let d = DrawResult::new(3, [11, 16, 19, 21, 27, 31], 30).expect("draw");
        let v = serde_json::to_value(LottoNumber::from(&d)).expect("json");
        assert_eq!(v["returnValue"], "success");
        assert_eq!(v["drwNoDate"], "");
        assert_eq!(v["drwtNo1"], 11);
        assert_eq!(v["bnusNo"], 30);
        assert_eq!(v["firstWinamnt"], 0);
    }

    #[test]
    fn frequency_keys_are_strings() {
        let v = serde_json::to_value(Recommendation::from(&FrequencyTable::new())).expect("json");
        assert_eq!(v["frequency"].as_object().map(|m| m.len()), Some(45));
        assert_eq!(v["frequency"]["45"], 0);
        assert_eq!(v["recommended"], serde_json::json!([1, 2, 3, 4, 5, 6]));
    }
}
