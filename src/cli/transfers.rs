//! `gaffer transfers`: swap suggestions for a manager's squad.

use tabled::Tabled;

use super::{output, tenths, TransfersArgs};
use crate::app::{Advice, Advisor};
use crate::error::Result;
use crate::optimizer::{TransferPlan, TransferProposal, TransferRequest};

#[derive(Tabled)]
struct TransferRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Out")]
    out: String,
    #[tabled(rename = "In")]
    incoming: String,
    #[tabled(rename = "Pos")]
    position: String,
    #[tabled(rename = "Cost")]
    cost_change: String,
    #[tabled(rename = "Gain")]
    gain: String,
}

impl TransferRow {
    fn new(index: usize, transfer: &TransferProposal) -> Self {
        Self {
            index,
            out: format!("{} ({})", transfer.out.name, transfer.out.club),
            incoming: format!("{} ({})", transfer.incoming.name, transfer.incoming.club),
            position: transfer.out.position.to_string(),
            cost_change: output::money(transfer.cost_change),
            gain: output::signed_points(transfer.points_gain),
        }
    }
}

pub async fn execute(advisor: &Advisor, args: &TransfersArgs) -> Result<()> {
    let defaults = advisor.transfer_search().config();
    let request = TransferRequest::new(args.transfers)
        .free_transfers(args.free.unwrap_or(defaults.free_transfers))
        .bank(tenths("--bank", args.bank)?)
        .horizon(args.horizon.unwrap_or(defaults.horizon));

    let pb = output::spinner("Searching transfers");
    let advice = advisor.transfers(args.team, request).await;
    output::spinner_done(&pb);
    let advice = advice?;

    if output::is_json() {
        return output::json_output(&advice);
    }

    let plan = match advice {
        Advice::Ready(plan) => plan,
        Advice::Unavailable { message } => {
            output::warning(&message);
            return Ok(());
        }
    };

    output::header(env!("CARGO_PKG_VERSION"));
    render(args.team, &plan);
    Ok(())
}

pub(super) fn render(team: u32, plan: &TransferPlan) {
    output::section(&format!(
        "Transfers for team {team} over {} gameweek(s)",
        plan.horizon
    ));

    if plan.is_empty() {
        output::note(&plan.recommendation);
    } else {
        output::table(
            plan.transfers
                .iter()
                .enumerate()
                .map(|(i, t)| TransferRow::new(i + 1, t)),
        );
        output::success(&plan.recommendation);
    }

    output::section("Summary");
    if plan.penalty > 0.0 {
        output::field("Hit", output::negative(format!("-{:.0}", plan.penalty)));
    }
    output::field("Net gain", output::signed_points(plan.net_improvement));
    output::field("Bank after", output::money(plan.remaining_bank));
}
