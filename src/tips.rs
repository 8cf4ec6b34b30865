//! Static travel tips for well-known destinations.

use serde::Serialize;

/// Travel tips for one destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TouristTips {
    pub best_time_to_visit: &'static str,
    pub popular_attractions: &'static [&'static str],
    pub local_tips: &'static [&'static str],
    pub weather_tips: &'static [&'static str],
}

const KNOWN_DESTINATIONS: [(&str, TouristTips); 5] = [
    (
        "London,UK",
        TouristTips {
            best_time_to_visit: "April to September",
            popular_attractions: &[
                "Big Ben",
                "Tower of London",
                "Buckingham Palace",
                "London Eye",
            ],
            local_tips: &[
                "Get an Oyster card for public transport",
                "Visit museums on weekdays to avoid crowds",
                "Take a walk along the Thames",
            ],
            weather_tips: &[
                "Always carry an umbrella",
                "Layers are key for variable weather",
                "Summer days can be warm but evenings cool down",
            ],
        },
    ),
    (
        "Paris,FR",
        TouristTips {
            best_time_to_visit: "April to October",
            popular_attractions: &[
                "Eiffel Tower",
                "Louvre Museum",
                "Notre-Dame Cathedral",
                "Arc de Triomphe",
            ],
            local_tips: &[
                "Learn basic French phrases",
                "Avoid restaurants with English menus",
                "Take the metro to get around",
            ],
            weather_tips: &[
                "Spring and fall are mild but can be rainy",
                "Summer can be hot and crowded",
                "Winter is cold but less touristy",
            ],
        },
    ),
    (
        "New York,US",
        TouristTips {
            best_time_to_visit: "April to June, September to November",
            popular_attractions: &[
                "Times Square",
                "Central Park",
                "Statue of Liberty",
                "Empire State Building",
            ],
            local_tips: &[
                "Get a MetroCard for public transport",
                "Visit museums on free admission days",
                "Walk across the Brooklyn Bridge",
            ],
            weather_tips: &[
                "Summer is hot and humid",
                "Winter is cold with snow",
                "Spring and fall have variable weather",
            ],
        },
    ),
    (
        "Tokyo,JP",
        TouristTips {
            best_time_to_visit: "March to May, September to November",
            popular_attractions: &[
                "Senso-ji Temple",
                "Tokyo Skytree",
                "Shibuya Crossing",
                "Tsukiji Outer Market",
            ],
            local_tips: &[
                "Get a Suica or Pasmo card for transport",
                "Learn basic Japanese phrases",
                "Try local food at izakayas",
            ],
            weather_tips: &[
                "Spring has cherry blossoms but can be rainy",
                "Summer is hot and humid with typhoon season",
                "Fall has pleasant weather and autumn colors",
            ],
        },
    ),
    (
        "Sydney,AU",
        TouristTips {
            best_time_to_visit: "September to November, March to May",
            popular_attractions: &[
                "Sydney Opera House",
                "Sydney Harbour Bridge",
                "Bondi Beach",
                "Darling Harbour",
            ],
            local_tips: &[
                "Get an Opal card for public transport",
                "Visit beaches early morning or late afternoon",
                "Take a ferry ride in the harbour",
            ],
            weather_tips: &[
                "Summer (Dec-Feb) is hot and humid",
                "Winter (Jun-Aug) is mild but can be rainy",
                "Spring and fall have pleasant weather",
            ],
        },
    ),
];

/// Returned for any destination without curated tips.
pub const GENERIC_TIPS: TouristTips = TouristTips {
    best_time_to_visit: "Varies by season",
    popular_attractions: &["Check local tourism websites"],
    local_tips: &[
        "Learn basic phrases in the local language",
        "Use public transportation",
        "Try local cuisine",
    ],
    weather_tips: &[
        "Check weather forecasts before your trip",
        "Pack appropriate clothing",
        "Be prepared for changing conditions",
    ],
};

/// Tips for a destination such as `"Paris,FR"`.
///
/// Lookup ignores case and surrounding whitespace. Unknown destinations get
/// [`GENERIC_TIPS`].
pub fn tips_for(location: &str) -> TouristTips {
    let location = location.trim();
    KNOWN_DESTINATIONS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(location))
        .map(|(_, tips)| *tips)
        .unwrap_or(GENERIC_TIPS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_destination() {
        let tips = tips_for("Tokyo,JP");
        assert_eq!(tips.best_time_to_visit, "March to May, September to November");
        assert!(tips.popular_attractions.contains(&"Shibuya Crossing"));
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        assert_eq!(tips_for("  london,uk "), tips_for("London,UK"));
        assert_ne!(tips_for("london,uk"), GENERIC_TIPS);
    }

    #[test]
    fn unknown_destination_gets_generic_tips() {
        assert_eq!(tips_for("Reykjavik,IS"), GENERIC_TIPS);
    }

    #[test]
    fn serializes_snake_case_fields() {
        let json = serde_json::to_value(tips_for("Paris,FR")).unwrap();
        assert_eq!(json["best_time_to_visit"], "April to October");
        assert_eq!(json["local_tips"].as_array().unwrap().len(), 3);
    }
}
