use std::collections::BTreeMap;

use chrono::NaiveDate;

/// Highest ball number in the 6/45 game.
pub const MAX_NUMBER: u8 = 45;
/// Main numbers drawn per round.
pub const PICK: usize = 6;

/// One historical draw. Fields are private so a value can only come out of
/// `DrawResult::new`, which enforces the number rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawResult {
    draw_no: u32,
    date: Option<NaiveDate>,
    numbers: [u8; PICK],  // ascending
    bonus: u8,
    first_prize_amount: u64,
    first_winner_count: u32,
}

impl DrawResult {
    /// Returns `None` unless every number is in 1..=45, the main numbers are
    /// distinct and the bonus is not one of them.
    pub fn new(draw_no: u32, mut numbers: [u8; PICK], bonus: u8) -> Option<Self> {
        if draw_no == 0 {
            return None;
        }
        let in_range = |n: u8| (1..=MAX_NUMBER).contains(&n);
        if !numbers.iter().copied().all(in_range) || !in_range(bonus) {
            return None;
        }
        numbers.sort_unstable();
        if numbers.windows(2).any(|w| w[0] == w[1]) || numbers.contains(&bonus) {
            return None;
        }
        Some(Self {
            draw_no,
            date: None,
            numbers,
            bonus,
            first_prize_amount: 0,
            first_winner_count: 0,
        })
    }

    pub fn with_date(mut self, date: Option<NaiveDate>) -> Self {
        self.date = date;
        self
    }

    pub fn with_first_tier(mut self, prize_amount: u64, winner_count: u32) -> Self {
        self.first_prize_amount = prize_amount;
        self.first_winner_count = winner_count;
        self
    }

    pub fn draw_no(&self) -> u32 { self.draw_no }
    pub fn date(&self) -> Option<NaiveDate> { self.date }
    pub fn numbers(&self) -> &[u8; PICK] { &self.numbers }
    pub fn bonus(&self) -> u8 { self.bonus }
    pub fn first_prize_amount(&self) -> u64 { self.first_prize_amount }
    pub fn first_winner_count(&self) -> u32 { self.first_winner_count }
}

/// Per-number occurrence counts over a range of draws. Always holds all 45 keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<u8, u32>,
    draws: u32,
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self {
            counts: (1..=MAX_NUMBER).map(|n| (n, 0)).collect(),
            draws: 0,
        }
    }
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the main numbers of one draw. The bonus number is ignored.
    pub fn record(&mut self, draw: &DrawResult) {
        for n in draw.numbers() {
            *self.counts.entry(*n).or_default() += 1;
        }
        self.draws += 1;
    }

    pub fn merge(&mut self, other: &FrequencyTable) {
        for (n, c) in &other.counts {
            *self.counts.entry(*n).or_default() += c;
        }
        self.draws += other.draws;
    }

    pub fn counts(&self) -> &BTreeMap<u8, u32> {
        &self.counts
    }

    pub fn count(&self, number: u8) -> u32 {
        self.counts.get(&number).copied().unwrap_or(0)
    }

    /// Number of draws that contributed to the table.
    pub fn draws(&self) -> u32 {
        self.draws
    }

    /// The six most frequent numbers, highest count first. Ties go to the
    /// smaller number; zero-count numbers fill the list when fewer than six
    /// numbers were ever drawn.
    pub fn recommended(&self) -> Vec<u8> {
        let mut ranked: Vec<(u8, u32)> = self.counts.iter().map(|(n, c)| (*n, *c)).collect();
        // counts iterate in ascending key order, so a stable sort keeps ties ascending
        ranked.sort_by_key(|(_, c)| std::cmp::Reverse(*c));
        ranked.into_iter().take(PICK).map(|(n, _)| n).collect()
    }
}
