use clap::{Parser, Subcommand};
use furia_esports_bot::{BotConfig, DataKind, EsportsData, FuriaBot, Game};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(name = "furia-bot-cli")]
#[command(about = "FURIA Esports Bot CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Skip the team menu and always use the main roster
    #[arg(long)]
    no_team_selection: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Talk to the bot on stdin, one command per line
    Chat {
        /// Session identifier
        #[arg(short, long, default_value = "cli")]
        user: String,
    },

    /// One-shot lookup without the menus
    Fetch {
        /// Game code (counterstrike, valorant, leagueoflegends)
        #[arg(short, long)]
        game: String,

        /// Team name as listed on Liquipedia
        #[arg(short, long, default_value = "FURIA")]
        team: String,

        /// players or matches
        #[arg(short, long, default_value = "players")]
        kind: DataKind,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "furia_esports_bot=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = BotConfig::from_env();
    if cli.no_team_selection {
        config.team_selection_enabled = false;
    }

    match cli.command {
        Commands::Chat { user } => {
            let bot = FuriaBot::new(config)?;
            println!("💬 Type a message to start (sair or 0 ends a conversation, Ctrl-D exits)");

            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                let response = bot.on_user_command(&user, &line).await;
                println!("\n{}\n", response.message);
                if response.is_final {
                    println!("(conversation ended)\n");
                }
            }
        }

        Commands::Fetch { game, team, kind } => {
            let game = Game::from_code(&game)
                .ok_or_else(|| furia_esports_bot::BotError::UnknownGame(game.clone()))?;
            let data = EsportsData::new(&config)?;

            println!("🔍 {} → {} ({})", data.fetcher().page_url(game, &team, kind), team, kind);

            for line in data.get_esports_data(game, &team, kind).await {
                println!("• {}", line);
            }
        }
    }

    Ok(())
}
