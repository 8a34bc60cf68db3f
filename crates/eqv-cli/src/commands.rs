use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use serde_json::json;
use tracing::info;

use eqv_cli::pipeline::{dataset_summary, dataset_view, upload_file, write_report};
use eqv_cli::settings::Settings;
use eqv_store::{NewAccount, Store};

use crate::cli::{DatasetArgs, GlobalArgs, LoginArgs, PasswordArgs, RegisterArgs, ReportArgs, UploadArgs};
use crate::output::{
    print_account, print_dataset, print_datasets, print_json, print_summary, print_upload,
};

/// Settings, store and acting user for one invocation.
pub struct Session {
    settings: Settings,
    settings_path: PathBuf,
    store: Store,
    user: Option<String>,
    json: bool,
}

impl Session {
    pub fn open(global: &GlobalArgs) -> Result<Self> {
        let settings_path = global.config.clone().unwrap_or_else(Settings::config_path);
        let settings = Settings::load_from(&settings_path);
        let store_path = global
            .store
            .clone()
            .unwrap_or_else(|| settings.store_path());
        let store = Store::open(&store_path, settings.store_config())
            .with_context(|| format!("open store {}", store_path.display()))?;
        let user = global
            .user
            .clone()
            .or_else(|| settings.session.active_user.clone());

        Ok(Self {
            settings,
            settings_path,
            store,
            user,
            json: global.json,
        })
    }

    fn owner(&self) -> Result<&str> {
        self.user
            .as_deref()
            .ok_or_else(|| anyhow!("not logged in; run `eqv login <USERNAME>` or pass --user"))
    }

    fn set_active_user(&mut self, user: Option<String>) -> Result<()> {
        self.settings.session.active_user = user;
        self.settings.save_to(&self.settings_path)
    }
}

pub fn run_register(session: &Session, args: &RegisterArgs) -> Result<()> {
    let account = session.store.register_account(&NewAccount {
        username: args.username.clone(),
        email: args.email.clone(),
        password: args.password.password.clone(),
    })?;

    if session.json {
        return print_json(&json!({
            "message": "Registration successful",
            "user": account,
        }));
    }
    println!("Registered {}. Log in with `eqv login {}`.", account.username, account.username);
    Ok(())
}

pub fn run_login(session: &mut Session, args: &LoginArgs) -> Result<()> {
    let account = session
        .store
        .authenticate(&args.login, &args.password.password)?;
    session.set_active_user(Some(account.username.clone()))?;
    info!(username = %account.username, "Logged in");

    if session.json {
        return print_json(&json!({ "message": "Login successful", "user": account }));
    }
    println!("Logged in as {}", account.username);
    Ok(())
}

pub fn run_logout(session: &mut Session) -> Result<()> {
    let previous = session.settings.session.active_user.clone();
    session.set_active_user(None)?;

    if session.json {
        return print_json(&json!({ "message": "Logged out", "user": previous }));
    }
    match previous {
        Some(user) => println!("Logged out {user}"),
        None => println!("Not logged in"),
    }
    Ok(())
}

pub fn run_whoami(session: &Session) -> Result<()> {
    let account = session.store.account(session.owner()?)?;
    if session.json {
        return print_json(&account);
    }
    print_account(&account);
    Ok(())
}

pub fn run_upload(session: &Session, args: &UploadArgs) -> Result<()> {
    let owner = session.owner()?;
    let outcome = upload_file(
        &session.store,
        owner,
        &args.file,
        &session.settings.ingest_options(),
    )?;

    if session.json {
        return print_json(&outcome);
    }
    print_upload(&outcome);
    Ok(())
}

pub fn run_list(session: &Session) -> Result<()> {
    let datasets = session.store.list_datasets(session.owner()?)?;
    if session.json {
        return print_json(&datasets);
    }
    print_datasets(&datasets);
    Ok(())
}

pub fn run_show(session: &Session, args: &DatasetArgs) -> Result<()> {
    let view = dataset_view(&session.store, session.owner()?, args.id)?;
    if session.json {
        return print_json(&view);
    }
    print_dataset(&view);
    Ok(())
}

pub fn run_summary(session: &Session, args: &DatasetArgs) -> Result<()> {
    let summary = dataset_summary(&session.store, session.owner()?, args.id)?;
    if session.json {
        return print_json(&summary);
    }
    print_summary(&summary);
    Ok(())
}

pub fn run_report(session: &Session, args: &ReportArgs) -> Result<()> {
    let path = write_report(
        &session.store,
        session.owner()?,
        args.id,
        &session.settings.report_options(),
        args.output.as_deref(),
    )?;

    if session.json {
        return print_json(&json!({ "report": path }));
    }
    println!("Report written to {}", path.display());
    Ok(())
}

pub fn run_delete(session: &Session, args: &DatasetArgs) -> Result<()> {
    session.store.delete_dataset(session.owner()?, args.id)?;
    if session.json {
        return print_json(&json!({ "message": "Dataset deleted", "id": args.id }));
    }
    println!("Deleted dataset #{}", args.id);
    Ok(())
}

pub fn run_delete_account(session: &mut Session, args: &PasswordArgs) -> Result<()> {
    let owner = session.owner()?.to_string();
    let removed = session.store.delete_account(&owner, &args.password)?;
    if session.settings.session.active_user.as_deref() == Some(owner.as_str()) {
        session.set_active_user(None)?;
    }

    if session.json {
        return print_json(&json!({
            "message": "Account deleted",
            "user": owner,
            "datasets_removed": removed,
        }));
    }
    println!("Deleted account {owner} and {removed} dataset(s)");
    Ok(())
}
