use crate::analysis::{
    AssignmentSource, Participant, PerformanceReport, Role, RoleAssignment, Tier, TierEntry,
};
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct RoleRow {
    team: String,
    role: String,
    player: String,
    champion: String,
    source: String,
}

#[derive(Tabled)]
struct ScoreRow {
    #[tabled(rename = "#")]
    rank: String,
    player: String,
    champion: String,
    team: String,
    result: String,
    kda: String,
    score: String,
}

#[derive(Tabled)]
struct AnalysisRow {
    role: String,
    player: String,
    champion: String,
    kda: String,
    score: String,
    mvp: String,
}

#[derive(Tabled)]
struct TierRow {
    #[tabled(rename = "#")]
    rank: String,
    tier: String,
    champion: String,
    score: String,
    win_rate: String,
    pick_rate: String,
    games: String,
}

fn colored_tier(tier: Tier) -> String {
    match tier {
        Tier::Z => tier.to_string().magenta().bold().to_string(),
        Tier::S => tier.to_string().red().bold().to_string(),
        Tier::A => tier.to_string().yellow().to_string(),
        Tier::B => tier.to_string().green().to_string(),
        Tier::C => tier.to_string().dimmed().to_string(),
    }
}

fn result_label(won: bool) -> String {
    if won {
        "WIN".green().to_string()
    } else {
        "LOSS".red().to_string()
    }
}

fn kda_label(participant: &Participant) -> String {
    format!("{}/{}/{}", participant.kills, participant.deaths, participant.assists)
}

pub fn display_roles(assignment: &RoleAssignment<'_>) {
    println!("\n{}", "🗺️  ROLE ASSIGNMENT".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    if assignment.is_empty() {
        println!("{}", "No participants to assign".yellow());
        return;
    }

    let mut rows = vec![];
    let mut fallbacks = 0;
    for (team_id, roles) in &assignment.teams {
        for (role, slot) in roles {
            let source = match slot.source {
                AssignmentSource::Signal => "signal".green().to_string(),
                AssignmentSource::Fallback => {
                    fallbacks += 1;
                    "fallback".yellow().to_string()
                }
            };
            rows.push(RoleRow {
                team: team_id.to_string(),
                role: role.to_string(),
                player: slot.participant.display_name().to_string(),
                champion: slot.participant.champion_label(),
                source,
            });
        }
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    if fallbacks > 0 {
        println!(
            "\n{} {} role(s) filled without a role-table match",
            "⚠️".yellow(),
            fallbacks
        );
    }
    println!();
}

pub fn display_scores(participants: &[Participant], report: &PerformanceReport) {
    println!("\n{}", "🏆 PERFORMANCE SCORES".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    if report.cards.is_empty() {
        println!("{}", "No participants to score".yellow());
        return;
    }

    let mut ranked: Vec<_> = participants.iter().zip(&report.cards).collect();
    ranked.sort_by(|a, b| {
        b.1.score
            .partial_cmp(&a.1.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut rows = vec![];
    for (idx, (participant, card)) in ranked.iter().enumerate() {
        let mut player = participant.display_name().to_string();
        if report.is_mvp(&card.identity) {
            player = format!("{} ⭐", player);
        }
        rows.push(ScoreRow {
            rank: format!("{}", idx + 1),
            player,
            champion: participant.champion_label(),
            team: card.team_id.to_string(),
            result: result_label(card.win),
            kda: kda_label(participant),
            score: format!("{:.2}", card.score),
        });
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    display_mvps(participants, report);
}

fn display_mvps(participants: &[Participant], report: &PerformanceReport) {
    let lookup = |identity: &Option<String>| {
        identity.as_deref().and_then(|id| {
            participants
                .iter()
                .find(|p| p.identity == id)
                .map(|p| (p.display_name().to_string(), p.champion_label(), report.score_of(id)))
        })
    };

    println!("\n{}", "MVP".bold().yellow());
    if let Some((name, champion, score)) = lookup(&report.mvp_win) {
        println!(
            "  {} {} ({}) {:.2}",
            "Winning side:".green(),
            name,
            champion,
            score.unwrap_or_default()
        );
    }
    if let Some((name, champion, score)) = lookup(&report.mvp_lose) {
        println!(
            "  {} {} ({}) {:.2}",
            "Losing side: ".red(),
            name,
            champion,
            score.unwrap_or_default()
        );
    }
    println!();
}

/// Roles and scores side by side, one table per team.
pub fn display_match_analysis(assignment: &RoleAssignment<'_>, report: &PerformanceReport) {
    println!("\n{}", "📊 MATCH ANALYSIS".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    for (team_id, roles) in &assignment.teams {
        let won = roles.values().any(|slot| slot.participant.win);
        println!("{} {} {}", "Team".bold(), team_id, result_label(won));

        let rows: Vec<AnalysisRow> = Role::ALL
            .iter()
            .filter_map(|role| roles.get(role).map(|slot| (role, slot)))
            .map(|(role, slot)| {
                let participant = slot.participant;
                AnalysisRow {
                    role: role.to_string(),
                    player: participant.display_name().to_string(),
                    champion: participant.champion_label(),
                    kda: kda_label(participant),
                    score: report
                        .score_of(&participant.identity)
                        .map(|s| format!("{:.2}", s))
                        .unwrap_or_else(|| "-".to_string()),
                    mvp: if report.is_mvp(&participant.identity) {
                        "⭐".to_string()
                    } else {
                        String::new()
                    },
                }
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{}\n", table);
    }
}

pub fn display_tier_list(entries: &[TierEntry], min_games: u32) {
    println!("\n{}", "📈 CHAMPION TIER LIST".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    if entries.is_empty() {
        println!("{}", "No champion statistics available".yellow());
        return;
    }

    let mut rows = vec![];
    for (idx, entry) in entries.iter().enumerate() {
        rows.push(TierRow {
            rank: format!("{}", idx + 1),
            tier: colored_tier(entry.tier),
            champion: entry.champion.clone(),
            score: format!("{:.2}", entry.score),
            win_rate: format!("{:.1}%", entry.winrate),
            pick_rate: format!("{:.1}%", entry.pickrate),
            games: entry.games.to_string(),
        });
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    println!("\n{}", "Interpretation".bold().yellow());
    println!("• Score: (win rate - 50) × 1.5 + pick rate × 2 (pick rate part capped at 10)");
    println!("• Z > 12, S > 6, A > 0, B > -6, everything else C");
    println!("• Champions with fewer than {} games are always C\n", min_games);
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}
