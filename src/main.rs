use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};

use authcode::account::AccountManager;
use authcode::cli::Cli;
use authcode::config::ConfigStore;
use authcode::http::ReqwestClient;
use authcode::notify::{NotificationDispatcher, NotificationMessage, Priority};
use authcode::registry::LazyShared;
use authcode::telemetry;

/// Composition root: every manager is constructed here and shared by Arc.
struct Managers {
    settings: Arc<ConfigStore>,
    accounts: Arc<AccountManager>,
    notifications: Arc<NotificationDispatcher>,
}

fn build_managers() -> Managers {
    // The store's load-or-create bootstrap must run exactly once per
    // process, inside the one-time initialization window.
    static SETTINGS: LazyShared<ConfigStore> = LazyShared::new();
    let settings = SETTINGS.get_or_init(|| {
        let store = ConfigStore::new();
        store.initialize();
        store
    });

    let accounts = Arc::new(AccountManager::new(Arc::clone(&settings)));
    let notifications = Arc::new(NotificationDispatcher::new(
        Arc::clone(&settings),
        Arc::new(ReqwestClient::new()),
    ));

    Managers {
        settings,
        accounts,
        notifications,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing(cli.debug);

    let managers = build_managers();

    managers
        .settings
        .set("application.last-launch", chrono::Local::now().to_rfc3339());
    managers.settings.save();

    if cli.dump_config {
        print!("{}", managers.settings.dump());
    }

    let mut exit_code = 0;

    if cli.clear {
        managers.accounts.clear_account();
        info!("Account cleared");
    } else {
        if let Some(secret) = cli.secret.as_deref() {
            exit_code = handle_set_secret(&managers, cli.account.as_deref(), secret);
        }

        if cli.watch {
            if exit_code == 0 {
                exit_code = run_watch_mode(&managers.accounts).await;
            }
        } else if cli.secret.is_none() && !cli.dump_config {
            exit_code = generate_and_print_once(&managers.accounts);
        }
    }

    managers.notifications.shutdown().await;
    std::process::exit(exit_code);
}

fn handle_set_secret(managers: &Managers, account: Option<&str>, secret: &str) -> i32 {
    let Some(account) = account else {
        error!("Both --secret (-s) and --account (-a) must be provided");
        return 1;
    };

    if !managers.accounts.set_account(account, secret) {
        error!("Failed to set secret");
        return 1;
    }

    info!(account, "Successfully set secret");
    managers.notifications.send(
        NotificationMessage::new("authcode", format!("TOTP account '{account}' was updated"))
            .with_title("Account updated")
            .with_priority(Priority::Default)
            .with_tags(vec!["key".to_string()]),
    );

    generate_and_print_once(&managers.accounts)
}

async fn run_watch_mode(accounts: &AccountManager) -> i32 {
    let account_name = accounts.get_account_name();
    if account_name.is_empty() {
        error!("No account configured. Set one with -s <secret> -a <name>");
        return 1;
    }

    info!(account = %account_name, "Watch mode started; press Ctrl-C to quit");
    let mut ticker = tokio::time::interval(Duration::from_secs(1));

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = ticker.tick() => {
                let Some(code) = accounts.generate_code() else {
                    error!("Could not generate TOTP code");
                    return 1;
                };
                print!(
                    "Code: {code}  (updates in {:2}s)  \r",
                    accounts.seconds_remaining()
                );
                let _ = io::stdout().flush();
            }
        }
    }

    println!();
    info!("Watch mode stopped");
    0
}

fn generate_and_print_once(accounts: &AccountManager) -> i32 {
    let account_name = accounts.get_account_name();
    if account_name.is_empty() {
        error!("No account configured. Set one with -s <secret> -a <name>");
        return 1;
    }

    match accounts.generate_code() {
        Some(code) => {
            println!("Account: {account_name}");
            println!("TOTP Code: {code}");
            0
        }
        None => {
            error!("Could not generate TOTP code");
            1
        }
    }
}
