//! `gaffer chips`: chip evaluation for a manager's squad.

use tabled::Tabled;

use super::output;
use crate::app::{Advice, Advisor};
use crate::error::Result;
use crate::optimizer::chip::{Chip, ChipReport};

#[derive(Tabled)]
struct ChipRow {
    #[tabled(rename = "Chip")]
    chip: &'static str,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Reason")]
    reason: String,
}

fn label(chip: Chip) -> &'static str {
    match chip {
        Chip::Wildcard => "Wildcard",
        Chip::TripleCaptain => "Triple Captain",
        Chip::BenchBoost => "Bench Boost",
        Chip::FreeHit => "Free Hit",
    }
}

fn rows(report: &ChipReport) -> Vec<ChipRow> {
    Chip::ALL
        .into_iter()
        .map(|chip| {
            let verdict = match chip {
                Chip::Wildcard => report
                    .wildcard
                    .as_ref()
                    .map(|a| (a.recommended, a.reasoning.clone())),
                Chip::TripleCaptain => report
                    .triple_captain
                    .as_ref()
                    .map(|a| (a.recommended, a.reasoning.clone())),
                Chip::BenchBoost => report
                    .bench_boost
                    .as_ref()
                    .map(|a| (a.recommended, a.reason.clone())),
                Chip::FreeHit => report
                    .free_hit
                    .as_ref()
                    .map(|a| (a.recommended, a.reason.clone())),
            };
            let (status, reason) = match verdict {
                None => (output::muted("used"), String::new()),
                Some((true, reason)) => (output::positive("play"), reason),
                Some((false, reason)) => ("hold".to_string(), reason),
            };
            ChipRow {
                chip: label(chip),
                status,
                reason,
            }
        })
        .collect()
}

pub async fn execute(advisor: &Advisor, team: u32) -> Result<()> {
    let pb = output::spinner("Evaluating chips");
    let advice = advisor.chips(team).await;
    output::spinner_done(&pb);
    let advice = advice?;

    if output::is_json() {
        return output::json_output(&advice);
    }

    let report = match advice {
        Advice::Ready(report) => report,
        Advice::Unavailable { message } => {
            output::warning(&message);
            return Ok(());
        }
    };

    output::header(env!("CARGO_PKG_VERSION"));
    render(&report);
    Ok(())
}

pub(super) fn render(report: &ChipReport) {
    output::section(&format!("Chips for gameweek {}", report.current_period));
    output::table(rows(report));

    output::section("Strategy");
    let strategy = &report.strategy;
    output::field("Call", output::highlight(&strategy.recommendation));
    if let Some(priority) = strategy.priority {
        output::field("Priority", priority);
    }
    if let Some(reasoning) = &strategy.reasoning {
        output::note(reasoning);
    }
    if let Some(advice) = &strategy.advice {
        output::hint(advice);
    }
}
