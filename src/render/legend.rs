use serde::{Deserialize, Serialize};

use crate::analyzers::{Band, Tier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    Red,
    Orange,
    Green,
    Blue,
}

impl MarkerColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerColor::Red => "red",
            MarkerColor::Orange => "orange",
            MarkerColor::Green => "green",
            MarkerColor::Blue => "blue",
        }
    }
}

impl std::fmt::Display for MarkerColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Shared by every three-tier view.
pub fn tier_color(tier: Tier) -> MarkerColor {
    match tier {
        Tier::Low => MarkerColor::Red,
        Tier::Medium => MarkerColor::Orange,
        Tier::High => MarkerColor::Green,
    }
}

/// The percentile view highlights points above the cut in red.
pub fn band_color(band: Band) -> MarkerColor {
    match band {
        Band::Above => MarkerColor::Red,
        Band::Below => MarkerColor::Blue,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub color: MarkerColor,
    pub condition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: String,
    pub thresholds: Vec<f64>,
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    pub fn lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| format!("{:>6}  {}", e.color.as_str(), e.condition))
            .collect()
    }
}

/// Three color/condition rows for a three-tier map, thresholds at 2 decimals.
pub fn render_legend(p50: f64, p75: f64, unit_label: &str) -> Legend {
    Legend {
        title: "Legend".to_string(),
        thresholds: vec![p50, p75],
        entries: vec![
            LegendEntry {
                color: tier_color(Tier::Low),
                condition: format!("{} <= {:.2}", unit_label, p50),
            },
            LegendEntry {
                color: tier_color(Tier::Medium),
                condition: format!("{:.2} < {} <= {:.2}", p50, unit_label, p75),
            },
            LegendEntry {
                color: tier_color(Tier::High),
                condition: format!("{} > {:.2}", unit_label, p75),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_legend_formats_thresholds() {
        let legend = render_legend(71.456, 80.0, "Value");

        assert_eq!(legend.thresholds, vec![71.456, 80.0]);
        assert_eq!(
            legend.entries,
            vec![
                LegendEntry {
                    color: MarkerColor::Red,
                    condition: "Value <= 71.46".to_string(),
                },
                LegendEntry {
                    color: MarkerColor::Orange,
                    condition: "71.46 < Value <= 80.00".to_string(),
                },
                LegendEntry {
                    color: MarkerColor::Green,
                    condition: "Value > 80.00".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_color_contract() {
        assert_eq!(tier_color(Tier::Low), MarkerColor::Red);
        assert_eq!(tier_color(Tier::Medium), MarkerColor::Orange);
        assert_eq!(tier_color(Tier::High), MarkerColor::Green);
        assert_eq!(band_color(Band::Above), MarkerColor::Red);
        assert_eq!(band_color(Band::Below), MarkerColor::Blue);
    }

    #[test]
    fn test_colors_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&MarkerColor::Orange).unwrap(),
            "\"orange\""
        );
    }
}
