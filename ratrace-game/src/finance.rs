//! Financial model: cash flow, passive income, net worth, and exit eligibility.
//!
//! The `*_mut` style functions write derived fields back onto the player and
//! return the computed figure. [`recalculated`] is the value-returning form
//! used by the turn machine.

use crate::constants::CHILD_EXPENSE;
use crate::player::Player;

/// Recompute `total_expenses` and `monthly_payday`, returning the signed
/// monthly cash flow so callers can detect a negative month.
pub fn cash_flow(player: &mut Player) -> i64 {
    let rr = &mut player.rat_race;
    let child_expenses = i64::from(rr.children) * CHILD_EXPENSE;
    let loan_payments: i64 = rr
        .liabilities
        .bank_loans
        .iter()
        .map(|loan| loan.monthly_payment)
        .sum();

    rr.total_expenses = rr.monthly_expenses + child_expenses + loan_payments;
    let flow = rr.monthly_income - rr.total_expenses;
    rr.monthly_payday = flow.max(0);
    flow
}

/// Sum of monthly income over every held asset.
///
/// Income boosts are baked into the asset at purchase, so no scaling here.
pub fn passive_income(player: &mut Player) -> i64 {
    let assets = &player.rat_race.assets;
    let total = assets
        .real_estate
        .iter()
        .map(|a| a.monthly_income)
        .chain(assets.stocks.iter().map(|a| a.monthly_income))
        .chain(assets.businesses.iter().map(|a| a.monthly_income))
        .sum();
    player.rat_race.passive_income = total;
    total
}

/// Cash plus asset valuations, minus every liability.
pub fn net_worth(player: &mut Player) -> i64 {
    let rr = &player.rat_race;
    let holdings: i64 = rr
        .assets
        .real_estate
        .iter()
        .map(|a| a.current_value)
        .chain(rr.assets.stocks.iter().map(|a| a.current_value))
        .sum();
    let liabilities = &rr.liabilities;
    let debt = liabilities.home_loan
        + liabilities.car_loan
        + liabilities.credit_card_debt
        + liabilities.bank_loans.iter().map(|l| l.amount).sum::<i64>();

    player.net_worth = player.cash + holdings - debt;
    player.net_worth
}

/// Refresh every derived field. Idempotent.
pub fn recalculate(player: &mut Player) {
    cash_flow(player);
    passive_income(player);
    net_worth(player);
}

/// Copy of `player` with every derived field refreshed.
#[must_use]
pub fn recalculated(player: &Player) -> Player {
    let mut next = player.clone();
    recalculate(&mut next);
    next
}

/// Passive income strictly exceeds total expenses.
///
/// Passive income is recomputed from holdings; `total_expenses` is read as
/// last written by [`cash_flow`].
#[must_use]
pub fn can_exit_rat_race(player: &Player) -> bool {
    let mut scratch = player.clone();
    passive_income(&mut scratch) > player.rat_race.total_expenses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{BankLoan, RealEstateAsset, StockAsset};

    fn engineer() -> Player {
        let mut player = Player::new("p1", "Ada", "#3b82f6");
        player.rat_race.monthly_income = 5500;
        player.rat_race.monthly_expenses = 2100;
        player.cash = 800;
        player.rat_race.liabilities.home_loan = 70_000;
        player.rat_race.liabilities.car_loan = 12_000;
        player.rat_race.liabilities.credit_card_debt = 1_000;
        player
    }

    fn rental(income: i64, value: i64) -> RealEstateAsset {
        RealEstateAsset {
            id: format!("re-{income}"),
            name: "Rental".to_string(),
            down_payment: 0,
            total_cost: value,
            monthly_income: income,
            current_value: value,
        }
    }

    #[test]
    fn cash_flow_adds_children_and_loan_payments() {
        let mut player = engineer();
        player.rat_race.children = 2;
        player.rat_race.liabilities.bank_loans.push(BankLoan {
            id: "loan".to_string(),
            amount: 1000,
            monthly_payment: 100,
        });
        let flow = cash_flow(&mut player);
        assert_eq!(player.rat_race.total_expenses, 2100 + 80 + 100);
        assert_eq!(flow, 5500 - 2280);
        assert_eq!(player.rat_race.monthly_payday, flow);
    }

    #[test]
    fn payday_is_floored_but_cash_flow_stays_signed() {
        let mut player = engineer();
        player.rat_race.monthly_expenses = 6000;
        let flow = cash_flow(&mut player);
        assert_eq!(flow, -500);
        assert_eq!(player.rat_race.monthly_payday, 0);
    }

    #[test]
    fn passive_income_sums_all_holdings() {
        let mut player = engineer();
        player.rat_race.assets.real_estate.push(rental(500, 50_000));
        player.rat_race.assets.stocks.push(StockAsset {
            id: "s1".to_string(),
            symbol: "MYT4U".to_string(),
            shares: 100,
            purchase_price: 5000,
            current_value: 5000,
            monthly_income: 25,
        });
        assert_eq!(passive_income(&mut player), 525);
        assert_eq!(player.rat_race.passive_income, 525);
    }

    #[test]
    fn net_worth_subtracts_every_liability() {
        let mut player = engineer();
        player.rat_race.assets.real_estate.push(rental(300, 30_000));
        player.rat_race.liabilities.bank_loans.push(BankLoan {
            id: "loan".to_string(),
            amount: 2_000,
            monthly_payment: 200,
        });
        let worth = net_worth(&mut player);
        assert_eq!(worth, 800 + 30_000 - (70_000 + 12_000 + 1_000 + 2_000));
    }

    #[test]
    fn recalculate_is_idempotent() {
        let mut player = engineer();
        player.rat_race.children = 1;
        player.rat_race.assets.real_estate.push(rental(400, 40_000));
        recalculate(&mut player);
        let once = player.clone();
        recalculate(&mut player);
        assert_eq!(player, once);
        assert_eq!(recalculated(&once), once);
    }

    #[test]
    fn payday_never_negative_after_recalculate() {
        for expenses in [0, 2000, 5500, 9000, 50_000] {
            let mut player = engineer();
            player.rat_race.monthly_expenses = expenses;
            recalculate(&mut player);
            assert!(player.rat_race.monthly_payday >= 0);
        }
    }

    #[test]
    fn exit_requires_strictly_more_passive_income() {
        let mut player = engineer();
        player.rat_race.monthly_expenses = 2000;
        player.rat_race.assets.real_estate.push(rental(2000, 0));
        recalculate(&mut player);
        assert_eq!(player.rat_race.total_expenses, 2000);
        assert!(!can_exit_rat_race(&player), "equality must not exit");

        player.rat_race.assets.real_estate.push(rental(100, 0));
        recalculate(&mut player);
        assert_eq!(player.rat_race.passive_income, 2100);
        assert!(can_exit_rat_race(&player));
    }
}
