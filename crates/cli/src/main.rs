//! Plume CLI: run the mock backend or drive a reading session from a shell.
//!
//! ```bash
//! plume serve
//! plume home --genre romance
//! plume read b-1 b-1-c4
//! plume buy --bundle 2 --method mtn
//! ```

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use plume_app::api::ApiClient;
use plume_app::catalog::models::{Book, Genre};
use plume_app::reader::UnlockOutcome;
use plume_app::wallet::payment::PaymentMethod;
use plume_app::{Session, View};
use plume_kernel::settings::Settings;

#[derive(Parser)]
#[command(name = "plume")]
#[command(author, version, about = "Plume reader tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the seeded catalog API
    Serve,
    /// Print the home feed
    Home {
        /// Only list books of this category
        #[arg(short, long)]
        genre: Option<String>,
    },
    /// Open a chapter, paying coins if it is locked
    Read { book: String, chapter: String },
    /// List the coin bundles on sale
    Bundles,
    /// Buy a coin bundle
    Buy {
        /// Bundle position as listed by `bundles`
        #[arg(short, long)]
        bundle: usize,

        #[arg(short, long, value_enum, default_value_t = MethodArg::Orange)]
        method: MethodArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum MethodArg {
    Orange,
    Mtn,
    Moov,
    Card,
}

impl From<MethodArg> for PaymentMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Orange => PaymentMethod::OrangeMoney,
            MethodArg::Mtn => PaymentMethod::MtnMobileMoney,
            MethodArg::Moov => PaymentMethod::MoovMoney,
            MethodArg::Card => PaymentMethod::BankCard,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load().with_context(|| "failed to load Plume settings")?;
    plume_telemetry::init(&settings.telemetry)?;

    if let Commands::Serve = cli.command {
        return plume_app::modules::serve_backend(&settings).await;
    }

    let client = ApiClient::new(&settings.api).context("failed to build API client")?;
    let mut session = Session::start(&client).await;

    match cli.command {
        Commands::Serve => {}
        Commands::Home { genre } => {
            if let Some(label) = genre {
                let Some(genre) = Genre::from_label(&label) else {
                    bail!("unknown category '{}'", label);
                };
                session.toggle_category(genre);
            }
            print_home(&session);
        }
        Commands::Read { book, chapter } => {
            session.select_book(&book.into())?;
            let outcome = session.select_chapter(&chapter.into())?;
            if let UnlockOutcome::Unlocked { spent } = outcome {
                println!("unlocked for {} coins, {} left", spent, session.user().coins);
            }
            if let View::ChapterReader { book, chapter } = session.view() {
                println!("{} · chapitre {}: {}", book.title, chapter.number, chapter.title);
                println!();
                println!("{}", chapter.content);
            }
        }
        Commands::Bundles => {
            for (i, bundle) in session.bundles().iter().enumerate() {
                let bonus = bundle.bonus.map(|b| format!(" +{}", b)).unwrap_or_default();
                let popular = if bundle.popular { " (populaire)" } else { "" };
                println!(
                    "[{}] {}{} coins for {}{}",
                    i, bundle.coins, bonus, bundle.price, popular
                );
            }
        }
        Commands::Buy { bundle, method } => {
            session.open_purchase();
            let receipt = session.purchase(bundle, method.into())?;
            println!("{}", receipt);
            println!("balance: {} coins (ref {})", receipt.balance, receipt.reference);
        }
    }

    let pending = session.end();
    if !pending.is_empty() {
        tracing::warn!(count = pending.len(), "votes left unreconciled");
    }
    Ok(())
}

fn print_home(session: &Session) {
    let feed = session.home_feed();
    if let Some(slide) = feed.slide {
        println!("» {}", slide.title);
    }
    println!("coins: {}", session.user().coins);

    if let Some((genre, books)) = &feed.filtered {
        print_shelf(genre.label(), books);
        return;
    }
    print_shelf("Recommandés", &feed.recommended);
    print_shelf("Populaires", &feed.popular);
    print_shelf("Romance", &feed.romance);
    print_shelf("Dark", &feed.dark);
    println!();
    println!("Auteurs");
    for featured in &feed.authors {
        let top = featured.top_book.map_or("-", |book| book.title.as_str());
        println!("  {} ({})", featured.author.name, top);
    }
}

fn print_shelf(title: &str, books: &[&Book]) {
    println!();
    println!("{}", title);
    for book in books {
        println!("  {:<6} {} · {}", book.id.as_str(), book.title, book.author);
    }
}
