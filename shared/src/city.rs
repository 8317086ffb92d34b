use serde::{Deserialize, Serialize};
use std::fmt;

/// Cities the cleaning crews operate in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum City {
    #[default]
    Almaty,
    Astana,
}

/// Office card shown in the location section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfficeInfo {
    pub title: &'static str,
    pub address: &'static str,
    pub map_url: &'static str,
}

impl City {
    pub const ALL: [City; 2] = [City::Almaty, City::Astana];

    /// Key used in URLs and `data-city` attributes
    pub fn key(&self) -> &'static str {
        match self {
            City::Almaty => "almaty",
            City::Astana => "astana",
        }
    }

    pub fn from_key(key: &str) -> Option<City> {
        match key.trim() {
            "almaty" => Some(City::Almaty),
            "astana" => Some(City::Astana),
            _ => None,
        }
    }

    /// Unknown or missing keys resolve to the first city
    pub fn from_key_or_default(key: Option<&str>) -> City {
        key.and_then(City::from_key).unwrap_or_default()
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            City::Almaty => "Алматы",
            City::Astana => "Астана",
        }
    }

    pub fn office(&self) -> OfficeInfo {
        match self {
            City::Almaty => OfficeInfo {
                title: "Наш офис в Алматы",
                address: "г. Алматы, ул. Римского-Корсакова, 19а",
                map_url: "https://yandex.ru/map-widget/v1/?ll=76.928020%2C43.233360&z=16&l=map&pt=76.928020%2C43.233360%2Cpm2rdm",
            },
            City::Astana => OfficeInfo {
                title: "Наш офис в Астане",
                address: "г. Астана, Адырна 15",
                map_url: "https://yandex.ru/map-widget/v1/?ll=71.432298%2C51.138313&z=16&l=map&pt=71.432298%2C51.138313%2Cpm2rdm",
            },
        }
    }

    /// Photos of the crew members working in this city
    pub fn master_photos(&self) -> [&'static str; 4] {
        match self {
            City::Almaty => [
                "media/masters/almaty1.jpg",
                "media/masters/almaty2.jpg",
                "media/masters/almaty3.jpg",
                "media/masters/almaty4.jpg",
            ],
            City::Astana => [
                "media/masters/astana1.jpg",
                "media/masters/astana2.jpg",
                "media/masters/astana3.jpg",
                "media/masters/astana4.jpg",
            ],
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_round_trip() {
        for city in City::ALL {
            assert_eq!(City::from_key(city.key()), Some(city));
        }
    }

    #[test]
    fn test_unknown_key_falls_back_to_almaty() {
        assert_eq!(City::from_key_or_default(Some("karaganda")), City::Almaty);
        assert_eq!(City::from_key_or_default(None), City::Almaty);
        assert_eq!(City::from_key_or_default(Some("astana")), City::Astana);
    }

    #[test]
    fn test_serde_uses_lowercase_keys() {
        assert_eq!(serde_json::to_string(&City::Astana).unwrap(), "\"astana\"");
    }
}
