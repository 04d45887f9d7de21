//! Command-line shell over the rooms client core.
//!
//! Shows the wallet, runs a coins-to-diamonds exchange through the same
//! dialog flow the app uses, searches the country catalogue, and prints the
//! current profile.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::sync::Arc;

use camino::Utf8PathBuf;
use catalogue::{Catalogue, Locale};
use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use rooms_client::config::ClientSettings;
use rooms_client::domain::ports::UserProfileQuery;
use rooms_client::domain::{ExchangeController, Notice, UserId, WalletExchangeService};
use rooms_client::outbound::http::HttpRoomsApi;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// `rooms-wallet` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "rooms-wallet",
    about = "Inspect and exchange live rooms wallet balances",
    version
)]
struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,
    /// Rooms API base URL. Overrides `ROOMS_API_BASE_URL`.
    #[arg(long, global = true, value_name = "url")]
    api_base_url: Option<String>,
    /// User id. Overrides `ROOMS_USER_ID`.
    #[arg(long, global = true, value_name = "uuid")]
    user_id: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show coin and diamond balances.
    Balance,
    /// Convert coins into diamonds.
    Exchange {
        /// Amount of coins, as typed.
        #[arg(long, allow_hyphen_values = true)]
        amount: String,
    },
    /// List countries, optionally filtered.
    Countries {
        /// Substring matched against codes and both names.
        #[arg(long)]
        query: Option<String>,
        /// Language of the printed names.
        #[arg(long, value_enum, default_value_t = LocaleArg::En)]
        locale: LocaleArg,
    },
    /// Print the current profile as JSON.
    Profile,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LocaleArg {
    Ar,
    En,
}

impl From<LocaleArg> for Locale {
    fn from(value: LocaleArg) -> Self {
        match value {
            LocaleArg::Ar => Self::Ar,
            LocaleArg::En => Self::En,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let settings = ClientSettings::load_from_iter([OsString::from("rooms-wallet")])
        .map_err(|err| eyre!("load settings: {err}"))?
        .with_overrides(cli.api_base_url.clone(), cli.user_id.clone());

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(run(cli.command, settings))
}

fn init_tracing(json: bool) {
    let builder = fmt().with_env_filter(EnvFilter::from_default_env());
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

async fn run(command: Command, settings: ClientSettings) -> Result<()> {
    match command {
        Command::Countries { query, locale } => {
            print_countries(&settings, query.as_deref().unwrap_or(""), locale.into())
        }
        Command::Balance => {
            let (api, user_id) = connect(&settings)?;
            let profile = api.fetch_profile(&user_id).await?;
            println!("coins={}", profile.wallet.coins);
            println!("diamonds={}", profile.wallet.diamonds);
            Ok(())
        }
        Command::Profile => {
            let (api, user_id) = connect(&settings)?;
            let profile = api.fetch_profile(&user_id).await?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
            Ok(())
        }
        Command::Exchange { amount } => exchange(&settings, amount).await,
    }
}

fn connect(settings: &ClientSettings) -> Result<(Arc<HttpRoomsApi>, UserId)> {
    let api = HttpRoomsApi::new(settings.api_base_url()?, settings.request_timeout())
        .wrap_err("build HTTP client")?;
    Ok((Arc::new(api), settings.user_id()?))
}

async fn exchange(settings: &ClientSettings, amount: String) -> Result<()> {
    let (api, user_id) = connect(settings)?;
    let wallet = api.fetch_profile(&user_id).await?.wallet;
    let service = WalletExchangeService::new(Arc::clone(&api), api)
        .with_timeout(settings.exchange_timeout());
    let mut controller = ExchangeController::new(service, user_id, wallet);

    controller.open()?;
    controller.edit(amount);
    controller.submit()?;
    let notice = controller
        .next_settlement()
        .await
        .ok_or_else(|| eyre!("exchange ended without an outcome"))?;

    match notice {
        Notice::ExchangeSucceeded { amount } => {
            println!("notice={}", notice.code());
            println!("exchanged_coins={amount}");
            let wallet = controller.wallet();
            println!("coins={}", wallet.coins);
            println!("diamonds={}", wallet.diamonds);
            Ok(())
        }
        Notice::ExchangeFailed(err) => {
            println!("notice={}", err.code());
            if let Some(input) = controller.dialog().input() {
                println!("amount={input}");
            }
            Err(err.into())
        }
    }
}

fn print_countries(settings: &ClientSettings, query: &str, locale: Locale) -> Result<()> {
    let path = Utf8PathBuf::from_path_buf(settings.catalogue_path())
        .map_err(|path| eyre!("catalogue path is not UTF-8: {}", path.display()))?;
    let catalogue = Catalogue::from_file(&path)?;
    for country in catalogue.search_countries(query) {
        println!(
            "{} {} {}",
            country.code(),
            country.flag().unwrap_or(" "),
            country.name().get(locale)
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    //! Unit tests for CLI parsing.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn exchange_amount_is_kept_verbatim() {
        let cli = Cli::try_parse_from(["rooms-wallet", "exchange", "--amount", "-5"])
            .expect("arguments parse");
        assert!(matches!(cli.command, Command::Exchange { ref amount } if amount == "-5"));
    }

    #[rstest]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "rooms-wallet",
            "countries",
            "--query",
            "مصر",
            "--locale",
            "ar",
            "--log-json",
        ])
        .expect("arguments parse");
        assert!(cli.log_json);
        assert!(matches!(
            cli.command,
            Command::Countries { query: Some(_), locale: LocaleArg::Ar }
        ));
    }

    #[rstest]
    fn a_subcommand_is_required() {
        assert!(Cli::try_parse_from(["rooms-wallet"]).is_err());
    }
}
