//! `gaffer lineup`: starting eleven for a manager's squad.

use super::output;
use super::rows::PlayerRow;
use crate::app::{Advice, Advisor};
use crate::error::Result;
use crate::optimizer::LineupSelection;

pub async fn execute(advisor: &Advisor, team: u32) -> Result<()> {
    let pb = output::spinner("Picking lineup");
    let advice = advisor.lineup(team).await;
    output::spinner_done(&pb);
    let advice = advice?;

    if output::is_json() {
        return output::json_output(&advice);
    }

    let lineup = match advice {
        Advice::Ready(lineup) => lineup,
        Advice::Unavailable { message } => {
            output::warning(&message);
            return Ok(());
        }
    };

    output::header(env!("CARGO_PKG_VERSION"));
    render(&lineup);
    Ok(())
}

pub(super) fn render(lineup: &LineupSelection) {
    if !lineup.is_optimal() {
        output::warning(&format!("No valid lineup (solver: {})", lineup.status));
        return;
    }

    output::section(&format!("Starting XI ({})", lineup.formation));
    output::table(lineup.starting.iter().map(PlayerRow::from));

    output::section("Bench");
    output::table(lineup.bench.iter().map(PlayerRow::from));

    output::section("Summary");
    output::field("Formation", &lineup.formation);
    output::field("Projected", output::highlight(output::points(lineup.total_points)));
    output::field("Bench", output::points(lineup.bench_points()));
}
