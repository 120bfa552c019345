use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Sunny,
    Rain,
    Cloudy,
    Snow,
    Thunderstorm,
    Fog,
    /// Never produced by [`classify`]; only assigned explicitly.
    PartlyCloudy,
    Clear,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Sunny => "sunny",
            Category::Rain => "rain",
            Category::Cloudy => "cloudy",
            Category::Snow => "snow",
            Category::Thunderstorm => "thunderstorm",
            Category::Fog => "fog",
            Category::PartlyCloudy => "partly_cloudy",
            Category::Clear => "clear",
        }
    }

    pub const fn all() -> &'static [Category] {
        &[
            Category::Sunny,
            Category::Rain,
            Category::Cloudy,
            Category::Snow,
            Category::Thunderstorm,
            Category::Fog,
            Category::PartlyCloudy,
            Category::Clear,
        ]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Category {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        Category::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| anyhow::anyhow!("Unknown weather category '{value}'."))
    }
}

/// Keywords checked in this order; the first hit wins.
const KEYWORDS: &[(&str, Category)] = &[
    ("sun", Category::Sunny),
    ("rain", Category::Rain),
    ("cloud", Category::Cloudy),
    ("snow", Category::Snow),
    ("storm", Category::Thunderstorm),
    ("fog", Category::Fog),
];

/// Map a free-text weather description to a category.
///
/// Absent, empty or unrecognised labels yield [`Category::Clear`].
pub fn classify(label: Option<&str>) -> Category {
    let Some(label) = label.filter(|l| !l.is_empty()) else {
        return Category::Clear;
    };

    let lower = label.to_lowercase();

    KEYWORDS
        .iter()
        .find(|(needle, _)| lower.contains(*needle))
        .map(|(_, category)| *category)
        .unwrap_or(Category::Clear)
}
