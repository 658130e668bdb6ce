//! Demo CLI over an in-memory accounts API
//!
//! ```text
//! clientcli-demo status
//! clientcli-demo accounts list
//! clientcli-demo accounts get ac-1
//! clientcli-demo accounts networks ac-1 list --state active
//! ```

use clientcli::cli::display_error;
use clientcli::prelude::*;
use serde::Serialize;
use serde_json::json;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
struct Account {
    id: String,
    name: String,
}

#[derive(Debug, Clone, Serialize)]
struct Network {
    id: String,
    account_id: String,
    name: String,
    state: String,
}

/// Shared in-memory backend
#[derive(Debug)]
struct Store {
    accounts: Vec<Account>,
    networks: Vec<Network>,
}

impl Store {
    fn seeded() -> Self {
        let account = |id: &str, name: &str| Account {
            id: id.to_string(),
            name: name.to_string(),
        };
        let network = |id: &str, account_id: &str, name: &str, state: &str| Network {
            id: id.to_string(),
            account_id: account_id.to_string(),
            name: name.to_string(),
            state: state.to_string(),
        };
        Self {
            accounts: vec![account("ac-1", "Acme"), account("ac-2", "Globex")],
            networks: vec![
                network("net-1", "ac-1", "production", "active"),
                network("net-2", "ac-1", "staging", "deleted"),
                network("net-3", "ac-2", "default", "active"),
            ],
        }
    }
}

struct Client {
    profile: String,
    store: Arc<Store>,
}

impl Client {
    fn accounts() -> Property {
        Property::new("accounts", |ctx| {
            let client = receiver::<Client>(ctx)?;
            Ok(Returned::context(AccountsClient {
                store: client.store.clone(),
            }))
        })
        .with_spec(CommandSpec::new().about("Account commands"))
    }

    fn status() -> Callable {
        let spec = CommandSpec::new().about("Show the active profile");
        Callable::method("status", spec, |ctx, _args| {
            let client = receiver::<Client>(ctx)?;
            Returned::json(&json!({
                "profile": client.profile,
                "accounts": client.store.accounts.len(),
            }))
        })
    }
}

impl ClientObject for Client {
    fn members(&self) -> Vec<Member> {
        vec![
            Member::Property(Self::accounts()),
            Member::Method(Self::status()),
            Member::Field("profile".to_string()),
        ]
    }
}

struct AccountsClient {
    store: Arc<Store>,
}

impl AccountsClient {
    fn list() -> Callable {
        Callable::method("list", CommandSpec::new().about("List accounts"), |ctx, _args| {
            let accounts = receiver::<AccountsClient>(ctx)?;
            Returned::json(&accounts.store.accounts)
        })
    }

    fn get() -> Callable {
        let spec = CommandSpec::new()
            .about("Get an account")
            .param(ParamSpec::argument("account_id").with_help("Account ID"));
        Callable::method("get", spec, |ctx, args| {
            let accounts = receiver::<AccountsClient>(ctx)?;
            let account_id: String = args.require("account_id")?;
            let account = accounts
                .store
                .accounts
                .iter()
                .find(|a| a.id == account_id)
                .ok_or_else(|| anyhow::anyhow!("account '{}' not found", account_id))?;
            Returned::json(account)
        })
    }

    fn ids() -> Callable {
        let spec = CommandSpec::new().about("Stream account IDs");
        Callable::generator("ids", spec, |ctx, _args| {
            let accounts = receiver::<AccountsClient>(ctx)?;
            Ok(accounts
                .store
                .accounts
                .iter()
                .map(|a| a.id.clone())
                .collect::<Vec<_>>())
        })
    }

    fn networks() -> Callable {
        let spec = CommandSpec::new()
            .about("Networks of an account")
            .param(ParamSpec::argument("account_id").with_help("Account ID"));
        Callable::method("networks", spec, |ctx, args| {
            let accounts = receiver::<AccountsClient>(ctx)?;
            let account_id: String = args.require("account_id")?;
            Ok(Returned::context(NetworksClient {
                store: accounts.store.clone(),
                account_id,
            }))
        })
    }
}

impl ClientObject for AccountsClient {
    fn members(&self) -> Vec<Member> {
        vec![
            Member::Method(Self::list()),
            Member::Method(Self::get()),
            Member::Method(Self::ids()),
            Member::Method(Self::networks()),
        ]
    }
}

struct NetworksClient {
    store: Arc<Store>,
    account_id: String,
}

impl NetworksClient {
    fn list() -> Callable {
        let spec = CommandSpec::new().about("List networks").param(
            ParamSpec::option("state")
                .with_help("Only networks in this state")
                .with_possible_values(["active", "deleted"]),
        );
        Callable::method("list", spec, |ctx, args| {
            let networks = receiver::<NetworksClient>(ctx)?;
            let state: Option<String> = args.get("state")?;
            let found: Vec<_> = networks
                .store
                .networks
                .iter()
                .filter(|n| n.account_id == networks.account_id)
                .filter(|n| state.as_deref().map_or(true, |s| n.state == s))
                .collect();
            Returned::json(&found)
        })
    }

    fn delete() -> Callable {
        let spec = CommandSpec::new()
            .about("Delete a network")
            .param(ParamSpec::argument("network_id"))
            .param(ParamSpec::flag("dry_run").with_help("Only report what would be deleted"));
        Callable::method("delete", spec, |ctx, args| {
            let networks = receiver::<NetworksClient>(ctx)?;
            let network_id: String = args.require("network_id")?;
            let dry_run: bool = args.require("dry_run")?;
            if !networks
                .store
                .networks
                .iter()
                .any(|n| n.id == network_id && n.account_id == networks.account_id)
            {
                anyhow::bail!("network '{}' not found", network_id);
            }
            if dry_run {
                return Returned::json(&json!({ "would_delete": network_id }));
            }
            // the demo store is read-only
            Ok(Returned::None)
        })
    }
}

impl ClientObject for NetworksClient {
    fn members(&self) -> Vec<Member> {
        vec![Member::Method(Self::list()), Member::Method(Self::delete())]
    }
}

fn build_cli(config: CliConfig) -> CliResult<ClientCli> {
    let store = Arc::new(Store::seeded());
    let prototype_store = store.clone();
    let networks_prototype = NetworksClient {
        store: prototype_store,
        account_id: String::new(),
    };

    let tree = vec![
        Descriptor::group(
            Client::accounts(),
            [
                Descriptor::from(AccountsClient::list()),
                Descriptor::from(AccountsClient::get()),
                Descriptor::from(AccountsClient::ids()),
                Descriptor::group(
                    AccountsClient::networks(),
                    client_descriptors(&networks_prototype),
                ),
            ],
        ),
        Descriptor::from(Client::status()),
    ];

    ClientCli::new(config.app, move |args| {
        let profile: Option<String> = args.get("profile")?;
        Ok(Arc::new(Client {
            profile: profile.unwrap_or_else(|| "default".to_string()),
            store: store.clone(),
        }))
    })
    .with_root_params([ParamSpec::option("profile")
        .with_short('p')
        .with_help("Configuration profile")])?
    .with_descriptors(&tree)
}

fn main() -> ExitCode {
    let env = EnvironmentLoader::new(Some(Path::new(".env")));

    let default = CliConfig {
        app: AppConfig::new("clientcli-demo", env!("CARGO_PKG_VERSION"))
            .with_about("Demo client over an in-memory accounts API"),
        ..CliConfig::default()
    };
    let config = match CliConfig::load_or(env.config_path().as_deref(), default) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let filter = env.log_filter().unwrap_or_else(|| config.log_level.clone());
    if let Err(e) = init_tracing(Some(filter.as_str())) {
        eprintln!("{:#}", e);
        return ExitCode::FAILURE;
    }

    let app_name = config.app.name.clone();
    let result = build_cli(config).and_then(|cli| cli.run());
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(CliError::Usage(e)) => e.exit(),
        Err(e) => {
            display_error(&e, Some(&app_name));
            ExitCode::FAILURE
        }
    }
}
