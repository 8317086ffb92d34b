//! Pseudo-availability schedule for the hero booking grid.
//!
//! The grid covers the next three days after today, each split into three
//! fixed time buckets. Which cells show as free is a hand-authored table per
//! city, and the discount on a free cell depends only on how soon the day is.
//! Nothing here reads a clock; callers pass `today` in.

use crate::city::City;
use chrono::{Datelike, Days, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub const DAY_COUNT: usize = 3;
pub const TIME_BUCKET_COUNT: usize = 3;

/// Largest discount any slot can carry
pub const MAX_SLOT_DISCOUNT: u8 = 25;

/// Discount for free slots, indexed by day (tomorrow first)
const DISCOUNT_BY_DAY: [u8; DAY_COUNT] = [25, 10, 0];

/// Free time buckets per day for Almaty; also the fallback table
const FREE_ALMATY: [&[usize]; DAY_COUNT] = [&[1], &[0, 2], &[0, 1, 2]];

const FREE_ASTANA: [&[usize]; DAY_COUNT] = [&[0], &[0, 1], &[0, 1, 2]];

const MONTH_ABBR: [&str; 12] = [
    "янв", "фев", "мар", "апр", "май", "июн", "июл", "авг", "сен", "окт", "ноя", "дек",
];

/// One of the three fixed booking windows of a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeBucket {
    #[serde(rename = "9-13")]
    Morning,
    #[serde(rename = "13-17")]
    Afternoon,
    #[serde(rename = "17-22")]
    Evening,
}

impl TimeBucket {
    pub const ALL: [TimeBucket; TIME_BUCKET_COUNT] =
        [TimeBucket::Morning, TimeBucket::Afternoon, TimeBucket::Evening];

    pub fn index(&self) -> usize {
        match self {
            TimeBucket::Morning => 0,
            TimeBucket::Afternoon => 1,
            TimeBucket::Evening => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<TimeBucket> {
        Self::ALL.get(index).copied()
    }

    /// Short label as written on the slot element
    pub fn label(&self) -> &'static str {
        match self {
            TimeBucket::Morning => "9-13",
            TimeBucket::Afternoon => "13-17",
            TimeBucket::Evening => "17-22",
        }
    }

    /// Unknown labels map to the first bucket
    pub fn from_label(label: &str) -> TimeBucket {
        match label.trim() {
            "13-17" => TimeBucket::Afternoon,
            "17-22" => TimeBucket::Evening,
            _ => TimeBucket::Morning,
        }
    }

    pub fn long_label(&self) -> &'static str {
        match self {
            TimeBucket::Morning => "09:00 - 13:00",
            TimeBucket::Afternoon => "13:00 - 17:00",
            TimeBucket::Evening => "17:00 - 22:00",
        }
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OccupancyStatus {
    Available,
    Limited,
}

impl OccupancyStatus {
    pub fn css_class(&self) -> &'static str {
        match self {
            OccupancyStatus::Available => "available",
            OccupancyStatus::Limited => "limited",
        }
    }

    pub fn caption(&self) -> &'static str {
        match self {
            OccupancyStatus::Available => "Есть слоты",
            OccupancyStatus::Limited => "Под запрос",
        }
    }

    pub fn avatar_count(&self) -> usize {
        match self {
            OccupancyStatus::Available => 3,
            OccupancyStatus::Limited => 1,
        }
    }
}

/// Position of a slot in the 3x3 grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotId {
    pub day: usize,
    pub time: TimeBucket,
}

impl SlotId {
    pub fn new(day: usize, time: TimeBucket) -> Option<SlotId> {
        (day < DAY_COUNT).then_some(SlotId { day, time })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: SlotId,
    pub status: OccupancyStatus,
    pub discount: u8,
}

impl Slot {
    pub fn avatar_count(&self) -> usize {
        self.status.avatar_count()
    }

    /// Only free slots with a non-zero discount get a badge
    pub fn discount_badge(&self) -> Option<String> {
        (self.status == OccupancyStatus::Available && self.discount > 0)
            .then(|| format!("-{}%", self.discount))
    }

    pub fn date(&self, today: NaiveDate) -> NaiveDate {
        day_date(today, self.id.day)
    }
}

/// Calendar date for a day index: tomorrow is day 0
pub fn day_date(today: NaiveDate, day: usize) -> NaiveDate {
    today
        .checked_add_days(Days::new(day as u64 + 1))
        .unwrap_or(today)
}

/// Label shown at the start of each grid row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayLabel {
    pub day_index: usize,
    pub date: NaiveDate,
}

impl DayLabel {
    pub fn number(&self) -> u32 {
        self.date.day()
    }

    pub fn month_abbr(&self) -> &'static str {
        MONTH_ABBR[self.date.month0() as usize]
    }

    pub fn iso(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn text(&self) -> String {
        format!("{} {}", self.number(), self.month_abbr())
    }
}

pub fn day_labels(today: NaiveDate) -> [DayLabel; DAY_COUNT] {
    std::array::from_fn(|day_index| DayLabel {
        day_index,
        date: day_date(today, day_index),
    })
}

/// Availability grid for one city, rows are days
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitySchedule {
    pub city: City,
    rows: [[Slot; TIME_BUCKET_COUNT]; DAY_COUNT],
}

impl CitySchedule {
    pub fn slot(&self, id: SlotId) -> Option<&Slot> {
        self.rows.get(id.day).map(|row| &row[id.time.index()])
    }

    pub fn row(&self, day: usize) -> Option<&[Slot; TIME_BUCKET_COUNT]> {
        self.rows.get(day)
    }

    /// Slots in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.rows.iter().flat_map(|row| row.iter())
    }

    /// First slot, in row-major order, carrying the largest possible discount
    pub fn best_discount_slot(&self) -> Option<SlotId> {
        self.iter()
            .find(|slot| {
                slot.status == OccupancyStatus::Available && slot.discount == MAX_SLOT_DISCOUNT
            })
            .map(|slot| slot.id)
    }
}

/// Builds city schedules and keeps them for the rest of the session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleGenerator {
    cache: HashMap<City, CitySchedule>,
}

impl ScheduleGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deterministic grid for a city; no caching
    pub fn generate(city: City) -> CitySchedule {
        let free_map = match city {
            City::Almaty => &FREE_ALMATY,
            City::Astana => &FREE_ASTANA,
        };

        let rows = std::array::from_fn(|day| {
            std::array::from_fn(|time_index| {
                let is_free = free_map[day].contains(&time_index);
                Slot {
                    id: SlotId {
                        day,
                        time: TimeBucket::ALL[time_index],
                    },
                    status: if is_free {
                        OccupancyStatus::Available
                    } else {
                        OccupancyStatus::Limited
                    },
                    discount: if is_free { DISCOUNT_BY_DAY[day] } else { 0 },
                }
            })
        });

        CitySchedule { city, rows }
    }

    /// Same as [`ScheduleGenerator::generate`] for a raw city key
    pub fn generate_for_key(key: &str) -> CitySchedule {
        Self::generate(City::from_key_or_default(Some(key)))
    }

    /// Memoized schedule; repeated calls for a city return the same grid
    pub fn schedule_for(&mut self, city: City) -> &CitySchedule {
        self.cache.entry(city).or_insert_with(|| {
            log::debug!("generating schedule for {}", city.key());
            Self::generate(city)
        })
    }

    pub fn cached_cities(&self) -> usize {
        self.cache.len()
    }
}

/// Draw avatar photos for a slot without repeating within the slot
pub fn pick_avatars<R: Rng + ?Sized>(city: City, count: usize, rng: &mut R) -> Vec<&'static str> {
    let photos = city.master_photos();
    let mut pool: Vec<&'static str> = Vec::with_capacity(photos.len());

    (0..count)
        .map(|_| {
            if pool.is_empty() {
                pool.extend_from_slice(&photos);
            }
            let index = rng.gen_range(0..pool.len());
            pool.remove(index)
        })
        .collect()
}

/// Seed for a reproducible avatar draw of one slot
pub fn avatar_seed(city: City, id: SlotId) -> u64 {
    let city_index = City::ALL.iter().position(|c| *c == city).unwrap_or(0) as u64;
    (city_index << 16) | ((id.day as u64) << 8) | id.time.index() as u64
}
