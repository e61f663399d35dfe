//! User-facing texts (pt-BR).

use crate::core::{DataKind, Game, GameCatalog};

pub const CANCELLED: &str = "❌ Conversa com o bot encerrada.";
pub const NOT_A_NUMBER: &str = "⚠️ Opção inválida! Digite um número.";
pub const INVALID_TEAM: &str = "⚠️ Opção inválida! Escolha um número da lista.";
pub const PROCESSING_ERROR: &str = "⚠️ Erro ao processar comando!";

const EXIT_OPTION: &str = "🔴 0. Sair";

/// "1 ou 2", "1, 2 ou 3"
fn choice_list(count: usize) -> String {
    let numbers: Vec<String> = (1..=count).map(|n| n.to_string()).collect();
    match numbers.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} ou {}", rest.join(", "), last),
    }
}

fn numbered<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn game_menu(catalog: &GameCatalog) -> String {
    format!(
        "🎮 **Escolha um jogo**:\n{}\n\n{}",
        numbered(catalog.games().map(Game::menu_label)),
        EXIT_OPTION
    )
}

pub fn invalid_game(catalog: &GameCatalog) -> String {
    format!("⚠️ Opção inválida! Escolha {}.", choice_list(catalog.len()))
}

pub fn team_menu(game: Game, teams: &[String]) -> String {
    format!(
        "🏆 **Times disponíveis para {}**:\n{}\n\n{}",
        game.display_name(),
        numbered(teams.iter().map(String::as_str)),
        EXIT_OPTION
    )
}

pub fn data_menu(game: Game, team: &str) -> String {
    format!(
        "📋 **Opções para {} - {}**:\n1. 👥 Ver jogadores\n2. 📅 Últimas partidas\n\n{}",
        team,
        game.display_name(),
        EXIT_OPTION
    )
}

pub fn invalid_data_kind() -> String {
    format!("⚠️ Opção inválida! Escolha {}.", choice_list(2))
}

/// Titled bullet list plus the hint to call the bot again
pub fn answer(game: Game, team: &str, kind: DataKind, lines: &[String], mention: &str) -> String {
    let title = match kind {
        DataKind::Players => format!("👥 **Jogadores {} ({})**:", team, game.display_name()),
        DataKind::Matches => format!("📅 **Últimas partidas {} ({})**:", team, game.display_name()),
    };
    let bullets: Vec<String> = lines.iter().map(|line| format!("• {}", line)).collect();

    format!(
        "{}\n{}\n\n🔚 Digite {} para novo comando",
        title,
        bullets.join("\n"),
        mention
    )
}
