//! Overall chip strategy: rank whichever chips came out recommended.

use serde::{Deserialize, Serialize};

use super::{Chip, ChipConfig, ChipReport};

/// How urgently a chip should be played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChipOption {
    pub chip: Chip,
    pub priority: Priority,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Strategy {
    pub recommendation: String,
    pub priority: Option<Priority>,
    pub reasoning: Option<String>,
    pub advice: Option<String>,
    /// Highest priority first.
    pub options: Vec<ChipOption>,
}

/// Pick the chip to play this period, if any.
///
/// Free hit only counts during a big double period. Wildcard is urgent up to
/// and including the configured early-season period.
pub fn plan(report: &ChipReport, config: &ChipConfig) -> Strategy {
    if report.recommended.is_empty() {
        return Strategy {
            recommendation: "No chips recommended for this gameweek".to_string(),
            priority: None,
            reasoning: None,
            advice: None,
            options: Vec::new(),
        };
    }

    let mut options = Vec::new();
    let recommended = |chip: Chip| report.recommended.contains(&chip);

    if recommended(Chip::FreeHit) {
        if let Some(fh) = &report.free_hit {
            if fh.double_clubs >= config.free_hit.double_clubs {
                options.push(option(Chip::FreeHit, Priority::High, &fh.reason));
            }
        }
    }

    if recommended(Chip::TripleCaptain) {
        if let Some(tc) = &report.triple_captain {
            if tc.double_period {
                options.push(option(Chip::TripleCaptain, Priority::High, &tc.reasoning));
            } else if tc.recommended {
                options.push(option(Chip::TripleCaptain, Priority::Medium, &tc.reasoning));
            }
        }
    }

    if recommended(Chip::BenchBoost) {
        if let Some(bb) = &report.bench_boost {
            if bb.double_period && bb.bench_points > config.bench_boost.double_points {
                options.push(option(Chip::BenchBoost, Priority::High, &bb.reason));
            } else if bb.recommended {
                options.push(option(Chip::BenchBoost, Priority::Medium, &bb.reason));
            }
        }
    }

    if recommended(Chip::Wildcard) {
        if let Some(wc) = &report.wildcard {
            if wc.recommended {
                if report.current_period <= config.early_season_period {
                    options.push(option(
                        Chip::Wildcard,
                        Priority::High,
                        "Early season team overhaul",
                    ));
                } else {
                    options.push(option(Chip::Wildcard, Priority::Medium, &wc.reasoning));
                }
            }
        }
    }

    // Stable: equal priorities keep the order above.
    options.sort_by_key(|o| o.priority);

    let Some(top) = options.first().cloned() else {
        return Strategy {
            recommendation: "Chips available but not optimal to use this gameweek".to_string(),
            priority: None,
            reasoning: None,
            advice: Some(
                "Save chips for more favorable gameweeks (e.g., double gameweeks)".to_string(),
            ),
            options,
        };
    };

    Strategy {
        recommendation: format!("Use {} chip", top.chip),
        priority: Some(top.priority),
        reasoning: Some(top.reason),
        advice: None,
        options,
    }
}

fn option(chip: Chip, priority: Priority, reason: &str) -> ChipOption {
    ChipOption {
        chip,
        priority,
        reason: reason.to_string(),
    }
}
