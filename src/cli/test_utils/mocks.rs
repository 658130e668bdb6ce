//! Mock client objects for testing

use crate::cli::client::{receiver, Callable, ClientObject, Member, Property, Returned};
use crate::cli::params::{CommandSpec, ParamSpec};
use anyhow::anyhow;
use serde_json::json;
use std::sync::{Arc, Mutex};

type CallLog = Arc<Mutex<Vec<String>>>;

fn record(log: &CallLog, call: impl Into<String>) {
    log.lock().unwrap().push(call.into());
}

/// Root mock client
#[derive(Clone, Default)]
pub struct MockClient {
    pub log: CallLog,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every member invocation so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    pub fn accounts() -> Property {
        Property::new("accounts", |ctx| {
            let client = receiver::<MockClient>(ctx)?;
            record(&client.log, "accounts");
            Ok(Returned::context(AccountsClient {
                log: client.log.clone(),
            }))
        })
        .with_spec(CommandSpec::new().about("Accounts API"))
    }

    pub fn echo() -> Callable {
        let spec = CommandSpec::new()
            .about("Echo a message")
            .param(ParamSpec::argument("message"));
        Callable::method("echo", spec, |ctx, args| {
            let client = receiver::<MockClient>(ctx)?;
            let message: String = args.require("message")?;
            record(&client.log, format!("echo({message})"));
            Returned::json(&json!({ "message": message }))
        })
    }

    pub fn fail() -> Callable {
        Callable::method("fail", CommandSpec::new(), |_ctx, _args| Err(anyhow!("boom")))
    }

    pub fn networks() -> Callable {
        let spec = CommandSpec::new().param(ParamSpec::argument("account_id"));
        Callable::method("networks", spec, |ctx, args| {
            let client = receiver::<MockClient>(ctx)?;
            let account_id: String = args.require("account_id")?;
            record(&client.log, format!("networks({account_id})"));
            Ok(Returned::context(NetworksClient {
                log: client.log.clone(),
                account_id,
            }))
        })
    }

    pub fn ping() -> Callable {
        Callable::method("ping", CommandSpec::new(), |ctx, _args| {
            let client = receiver::<MockClient>(ctx)?;
            record(&client.log, "ping");
            Ok(Returned::None)
        })
    }

    fn reset() -> Callable {
        Callable::method("_reset", CommandSpec::new(), |ctx, _args| {
            receiver::<MockClient>(ctx)?.log.lock().unwrap().clear();
            Ok(Returned::None)
        })
    }
}

impl ClientObject for MockClient {
    fn members(&self) -> Vec<Member> {
        vec![
            Member::Method(Self::ping()),
            Member::Property(Self::accounts()),
            Member::Method(Self::echo()),
            Member::Field("version".to_string()),
            Member::Method(Self::reset()),
            Member::Method(Self::networks()),
            Member::Method(Self::fail()),
        ]
    }
}

/// Sub-client returned by `MockClient::accounts`
#[derive(Clone, Default)]
pub struct AccountsClient {
    pub log: CallLog,
}

impl AccountsClient {
    pub fn list() -> Callable {
        Callable::method("list", CommandSpec::new().about("List accounts"), |ctx, _args| {
            let accounts = receiver::<AccountsClient>(ctx)?;
            record(&accounts.log, "accounts.list");
            Returned::json(&json!([{ "id": 1 }]))
        })
    }

    pub fn get() -> Callable {
        let spec = CommandSpec::new().param(ParamSpec::argument("account_id"));
        Callable::method("get", spec, |ctx, args| {
            let accounts = receiver::<AccountsClient>(ctx)?;
            let account_id: String = args.require("account_id")?;
            record(&accounts.log, format!("accounts.get({account_id})"));
            Returned::json(&json!({ "id": account_id }))
        })
    }

    pub fn ids() -> Callable {
        Callable::generator("ids", CommandSpec::new(), |ctx, _args| {
            let accounts = receiver::<AccountsClient>(ctx)?;
            record(&accounts.log, "accounts.ids");
            Ok(vec![1, 2, 3])
        })
    }

    pub fn networks() -> Callable {
        let spec = CommandSpec::new().param(ParamSpec::argument("account_id"));
        Callable::method("networks", spec, |ctx, args| {
            let accounts = receiver::<AccountsClient>(ctx)?;
            let account_id: String = args.require("account_id")?;
            record(&accounts.log, format!("accounts.networks({account_id})"));
            Ok(Returned::context(NetworksClient {
                log: accounts.log.clone(),
                account_id,
            }))
        })
    }
}

impl ClientObject for AccountsClient {
    fn members(&self) -> Vec<Member> {
        vec![
            Member::Method(Self::list()),
            Member::Method(Self::networks()),
            Member::Method(Self::get()),
            Member::Method(Self::ids()),
        ]
    }
}

/// Sub-client scoped to one account
#[derive(Clone, Default)]
pub struct NetworksClient {
    pub log: CallLog,
    pub account_id: String,
}

impl NetworksClient {
    pub fn list() -> Callable {
        Callable::method("list", CommandSpec::new(), |ctx, _args| {
            let networks = receiver::<NetworksClient>(ctx)?;
            record(&networks.log, format!("networks.list({})", networks.account_id));
            Returned::json(&json!([{ "id": "net-1", "account_id": networks.account_id }]))
        })
    }

    pub fn get() -> Callable {
        let spec = CommandSpec::new().param(ParamSpec::argument("network_id"));
        Callable::method("get", spec, |ctx, args| {
            let networks = receiver::<NetworksClient>(ctx)?;
            let network_id: String = args.require("network_id")?;
            record(&networks.log, format!("networks.get({network_id})"));
            Returned::json(&json!({ "id": network_id, "account_id": networks.account_id }))
        })
    }
}

impl ClientObject for NetworksClient {
    fn members(&self) -> Vec<Member> {
        vec![Member::Method(Self::list()), Member::Method(Self::get())]
    }
}
