//! Discount for the "custom package" calculator.
//!
//! Choosing a property type unlocks a 3% base, the cleaning type adds its own
//! bonus and each additional service adds 1%. Without a property type the
//! base is zero, but the other terms still count.

use serde::{Deserialize, Serialize};

pub const BASE_DISCOUNT: u8 = 3;

/// Length of the number roll when the percentage changes, in ms
pub const TRANSITION_MS: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyType {
    Apartment,
    House,
    Office,
}

impl PropertyType {
    pub const ALL: [PropertyType; 3] = [PropertyType::Apartment, PropertyType::House, PropertyType::Office];

    pub fn key(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "apartment",
            PropertyType::House => "house",
            PropertyType::Office => "office",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "Квартира",
            PropertyType::House => "Дом",
            PropertyType::Office => "Офис",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CleaningType {
    Maintenance,
    General,
    PostRenovation,
    Other,
}

impl CleaningType {
    pub const ALL: [CleaningType; 4] = [
        CleaningType::Maintenance,
        CleaningType::General,
        CleaningType::PostRenovation,
        CleaningType::Other,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            CleaningType::Maintenance => "maintenance",
            CleaningType::General => "general",
            CleaningType::PostRenovation => "post-renovation",
            CleaningType::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CleaningType::Maintenance => "Поддерживающая уборка",
            CleaningType::General => "Генеральная уборка",
            CleaningType::PostRenovation => "После ремонта",
            CleaningType::Other => "Другое",
        }
    }

    pub fn bonus(&self) -> u8 {
        match self {
            CleaningType::Maintenance => 3,
            CleaningType::General | CleaningType::PostRenovation => 4,
            CleaningType::Other => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdditionalService {
    FridgeCleaning,
    OvenCleaning,
    WindowCleaning,
    CarpetCleaning,
    CurtainWashing,
    MattressCleaning,
    DishesCleaning,
    AcCleaning,
}

impl AdditionalService {
    pub const ALL: [AdditionalService; 8] = [
        AdditionalService::FridgeCleaning,
        AdditionalService::OvenCleaning,
        AdditionalService::WindowCleaning,
        AdditionalService::CarpetCleaning,
        AdditionalService::CurtainWashing,
        AdditionalService::MattressCleaning,
        AdditionalService::DishesCleaning,
        AdditionalService::AcCleaning,
    ];

    /// Checkbox id on the page
    pub fn id(&self) -> &'static str {
        match self {
            AdditionalService::FridgeCleaning => "fridge-cleaning",
            AdditionalService::OvenCleaning => "oven-cleaning",
            AdditionalService::WindowCleaning => "window-cleaning",
            AdditionalService::CarpetCleaning => "carpet-cleaning",
            AdditionalService::CurtainWashing => "curtain-washing",
            AdditionalService::MattressCleaning => "mattress-cleaning",
            AdditionalService::DishesCleaning => "dishes-cleaning",
            AdditionalService::AcCleaning => "ac-cleaning",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AdditionalService::FridgeCleaning => "холодильник",
            AdditionalService::OvenCleaning => "духовка",
            AdditionalService::WindowCleaning => "окна",
            AdditionalService::CarpetCleaning => "ковры",
            AdditionalService::CurtainWashing => "шторы",
            AdditionalService::MattressCleaning => "матрас",
            AdditionalService::DishesCleaning => "посуда",
            AdditionalService::AcCleaning => "кондиционер",
        }
    }
}

/// One labeled line of the breakdown, e.g. ("Генеральная уборка:", "+4%")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownItem {
    pub label: String,
    pub value: String,
}

impl BreakdownItem {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountQuote {
    pub percentage: u8,
    pub breakdown: Vec<BreakdownItem>,
}

impl DiscountQuote {
    pub fn tier(&self) -> DiscountTier {
        DiscountTier::for_percentage(self.percentage)
    }

    /// Label of the custom package submit button
    pub fn lock_in_label(&self) -> String {
        format!("Зафиксировать {}%", self.percentage)
    }
}

pub fn compute(
    property_type: Option<PropertyType>,
    cleaning_type: Option<CleaningType>,
    additional_services: usize,
) -> DiscountQuote {
    let base = if property_type.is_some() { BASE_DISCOUNT } else { 0 };
    let mut percentage = u32::from(base);
    let mut breakdown = vec![BreakdownItem::new("Базовая скидка:", format!("{}%", base))];

    if let Some(cleaning) = cleaning_type {
        let bonus = cleaning.bonus();
        if bonus > 0 {
            percentage += u32::from(bonus);
            breakdown.push(BreakdownItem::new(
                format!("{}:", cleaning.label()),
                format!("+{}%", bonus),
            ));
        }
    }

    if additional_services > 0 {
        let bonus = additional_services as u32;
        percentage += bonus;
        breakdown.push(BreakdownItem::new(
            format!("Доп. услуги ({}):", additional_services),
            format!("+{}%", bonus),
        ));
    }

    DiscountQuote {
        percentage: percentage.min(u32::from(u8::MAX)) as u8,
        breakdown,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountTier {
    Low,
    Medium,
    High,
}

impl DiscountTier {
    pub fn for_percentage(percentage: u8) -> Self {
        match percentage {
            0..=5 => DiscountTier::Low,
            6..=10 => DiscountTier::Medium,
            _ => DiscountTier::High,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            DiscountTier::Low => "discount-low",
            DiscountTier::Medium => "discount-medium",
            DiscountTier::High => "discount-high",
        }
    }
}

/// A change of the displayed percentage, for animating the number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountTransition {
    pub from: u8,
    pub to: u8,
}

impl DiscountTransition {
    pub fn is_change(&self) -> bool {
        self.from != self.to
    }

    /// Value to show at `progress` in [0, 1], eased out cubically
    pub fn value_at(&self, progress: f64) -> u8 {
        let progress = progress.clamp(0.0, 1.0);
        let eased = 1.0 - (1.0 - progress).powi(3);
        let value = f64::from(self.from) + (f64::from(self.to) - f64::from(self.from)) * eased;
        value.round().clamp(0.0, f64::from(u8::MAX)) as u8
    }
}

/// Remembers the last shown percentage so each update reports `from -> to`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountTracker {
    current: u8,
}

impl Default for DiscountTracker {
    fn default() -> Self {
        Self {
            current: BASE_DISCOUNT,
        }
    }
}

impl DiscountTracker {
    pub fn current(&self) -> u8 {
        self.current
    }

    pub fn update(&mut self, quote: &DiscountQuote) -> DiscountTransition {
        let transition = DiscountTransition {
            from: self.current,
            to: quote.percentage,
        };
        self.current = quote.percentage;
        transition
    }
}

/// Rough room count for an area typed by the visitor
pub fn estimate_rooms(area: &str) -> Option<&'static str> {
    let area = leading_integer(area)?;
    if area <= 0 {
        return None;
    }

    Some(match area {
        1..=30 => "ориентировочно 1 комната",
        31..=80 => "ориентировочно 2 комнаты",
        81..=120 => "ориентировочно 3 комнаты",
        _ => "ориентировочно больше 4 комнат",
    })
}

/// Integer prefix of the input, so "45.5" and "45 м2" read as 45
pub fn leading_integer(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(digits.len(), |(i, _)| i);
    digits[..end].parse::<i64>().ok().map(|n| n * sign)
}
