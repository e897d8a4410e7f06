use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

use super::SimulationResult;

/// Roll-up across every seed in a run.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Aggregate {
    pub games: usize,
    pub finished: usize,
    pub average_turns: f64,
    pub average_purchases: f64,
    pub total_donations: u32,
}

impl Aggregate {
    #[must_use]
    pub fn from_results(results: &[SimulationResult]) -> Self {
        let games = results.len();
        let finished = results.iter().filter(|r| r.finished).count();
        #[allow(clippy::cast_precision_loss)]
        let average = |total: u64| {
            if games == 0 {
                0.0
            } else {
                total as f64 / games as f64
            }
        };
        Self {
            games,
            finished,
            average_turns: average(results.iter().map(|r| u64::from(r.turns)).sum()),
            average_purchases: average(results.iter().map(|r| u64::from(r.purchases)).sum()),
            total_donations: results.iter().map(|r| r.donations).sum(),
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    results: &'a [SimulationResult],
    aggregate: Aggregate,
}

pub fn generate_console_report(
    out: &mut dyn Write,
    results: &[SimulationResult],
    total_duration: Duration,
) -> Result<()> {
    let aggregate = Aggregate::from_results(results);
    writeln!(out)?;
    writeln!(out, "{}", "📊 Simulation Results Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "==============================".cyan())?;
    writeln!(out, "Games: {}", aggregate.games)?;
    writeln!(
        out,
        "Finished: {}",
        aggregate.finished.to_string().green()
    )?;
    writeln!(
        out,
        "Out of turns: {}",
        (aggregate.games - aggregate.finished).to_string().yellow()
    )?;
    writeln!(out, "Average turns: {:.1}", aggregate.average_turns)?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = match &result.winner {
            Some(winner) => format!("🏁 {winner} escaped").green(),
            None => "⏳ no escape".yellow(),
        };
        writeln!(
            out,
            "{} seed {} ({})",
            status,
            result.seed.to_string().bold(),
            result.strategy
        )?;
        writeln!(
            out,
            "   Turns: {}  Purchases: {}  Donations: {}  Skipped: {}  Blocked: {}",
            result.turns,
            result.purchases,
            result.donations,
            result.skipped_turns,
            result.blocked_charges
        )?;
        for player in &result.players {
            let marker = if player.on_fast_track { "★" } else { " " };
            writeln!(
                out,
                "   {marker} {:<8} {:<10} cash ${:>8}  passive ${:>6}/mo  expenses ${:>6}/mo  net ${:>9}",
                player.name,
                player.profession.as_deref().unwrap_or("-"),
                player.cash,
                player.passive_income,
                player.total_expenses,
                player.net_worth
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, results: &[SimulationResult]) -> Result<()> {
    let report = JsonReport {
        results,
        aggregate: Aggregate::from_results(results),
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, results: &[SimulationResult]) -> Result<()> {
    let aggregate = Aggregate::from_results(results);
    writeln!(out, "# Rat Race Simulation Results\n")?;
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Games**: {}", aggregate.games)?;
    writeln!(out, "- **Finished**: {}", aggregate.finished)?;
    writeln!(out, "- **Average turns**: {:.1}", aggregate.average_turns)?;
    writeln!(out, "- **Average purchases**: {:.1}\n", aggregate.average_purchases)?;

    writeln!(out, "## Detailed Results\n")?;
    for result in results {
        let status = if result.finished { "🏁" } else { "⏳" };
        writeln!(out, "### {status} Seed {}\n", result.seed)?;
        writeln!(out, "- **Strategy**: {}", result.strategy)?;
        writeln!(out, "- **Turns**: {}", result.turns)?;
        writeln!(
            out,
            "- **Winner**: {}\n",
            result.winner.as_deref().unwrap_or("none")
        )?;
        writeln!(
            out,
            "| Player | Profession | Cash | Passive | Expenses | Net worth | Fast Track |"
        )?;
        writeln!(out, "|---|---|---:|---:|---:|---:|:---:|")?;
        for p in &result.players {
            writeln!(
                out,
                "| {} | {} | {} | {} | {} | {} | {} |",
                p.name,
                p.profession.as_deref().unwrap_or("-"),
                p.cash,
                p.passive_income,
                p.total_expenses,
                p.net_worth,
                if p.on_fast_track { "yes" } else { "no" }
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}
