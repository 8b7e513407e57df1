//! `gaffer team`: every piece of squad advice in one report.

use super::{captain, chips, lineup, output, transfers};
use crate::app::{Advice, Advisor};
use crate::error::Result;

pub async fn execute(advisor: &Advisor, team: u32) -> Result<()> {
    let pb = output::spinner("Analysing team");
    let advice = advisor.team_report(team).await;
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
    output::section(&format!(
        "Team {} in gameweek {}",
        report.team, report.current_period
    ));

    lineup::render(&report.lineup);
    transfers::render(report.team, &report.transfers);
    captain::render(&report.captain);
    match &report.chips {
        Advice::Ready(chip_report) => chips::render(chip_report),
        Advice::Unavailable { message } => output::warning(message),
    }

    Ok(())
}
