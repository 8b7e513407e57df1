//! `gaffer squad`: best squad from scratch.

use super::rows::PlayerRow;
use super::{output, tenths, SquadArgs};
use crate::app::Advisor;
use crate::error::Result;

pub async fn execute(advisor: &Advisor, args: &SquadArgs) -> Result<()> {
    let budget = args.budget.map(|b| tenths("--budget", b)).transpose()?;

    let pb = output::spinner("Solving squad");
    let selection = advisor.squad(budget, args.horizon).await;
    output::spinner_done(&pb);
    let selection = selection?;

    if output::is_json() {
        return output::json_output(&selection);
    }

    output::header(env!("CARGO_PKG_VERSION"));

    if !selection.is_optimal() {
        output::warning(&format!(
            "No squad fits a budget of {} (solver: {})",
            output::money(selection.budget),
            selection.status
        ));
        output::hint("raise --budget or relax the configuration");
        return Ok(());
    }

    output::section(&format!(
        "Optimal squad over {} gameweek(s)",
        selection.horizon
    ));
    for (position, players) in selection.grouped().iter() {
        output::section(position.plural());
        output::table(players.iter().map(|p| PlayerRow::from(*p)));
    }

    output::section("Summary");
    output::field("Total cost", output::money(selection.total_cost));
    output::field("Remaining", output::money(selection.remaining_budget));
    output::field("Projected", output::highlight(output::points(selection.total_points)));

    Ok(())
}
