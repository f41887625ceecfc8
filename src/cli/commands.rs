//! Command implementations for the aws-upload CLI.
//!
//! Main commands:
//! - upload: load a profile, build the rsync command and run it (or print it)
//! - keys / projs / envs: list what is configured
//! - new / edit / copy: manage setting files
//! - check: diagnose a setting file

use super::editor::open_in_editor;
use super::messages;
use anyhow::{bail, Context, Result};
use aws_upload::{Error, ProfileKey, Rsync, SettingsStore};
use colored::Colorize;
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Parse a key, printing the format tips when it is malformed.
fn parse_key(key: &str) -> Result<ProfileKey> {
    ProfileKey::parse(key).map_err(|e| {
        print!("{}", messages::invalid_key(key));
        e.into()
    })
}

/// Print the hint matching a library error, then hand the error back.
fn explain(store: &SettingsStore, err: Error) -> anyhow::Error {
    match &err {
        Error::NotFound(key) => {
            let keys = store.keys().unwrap_or_default();
            print!("{}", messages::no_file_found(key, &keys));
        }
        Error::AlreadyExists(key) => {
            let keys = store.keys().unwrap_or_default();
            print!("{}", messages::key_already_exists(key, &keys));
        }
        other => debug!("No hint for {:?}", other),
    }
    err.into()
}

/// Upload the local folder of a profile with rsync.
pub fn upload(
    store: &SettingsStore,
    proj: &str,
    env: Option<&str>,
    simulate: bool,
    quiet: bool,
) -> Result<()> {
    let raw_key = match env {
        Some(env) => format!("{}.{}", proj, env),
        None => proj.to_string(),
    };
    let key = parse_key(&raw_key)?;

    let settings = match store.load_settings(&key) {
        Ok(settings) => settings,
        Err(e @ (Error::InvalidFormat { .. } | Error::InvalidSettings(_))) => {
            println!(
                "The setting file {} cannot be used. Try to type:\n\n    {}\n",
                key.file_name().yellow(),
                format!("aws-upload check {}", key).green()
            );
            return Err(e.into());
        }
        Err(e) => return Err(explain(store, e)),
    };

    let rsync = Rsync::new(settings);

    if simulate {
        if quiet {
            println!("{}", rsync.cmd());
        } else {
            print!("{}", messages::rsync_banner(&key, rsync.cmd()));
        }
        return Ok(());
    }

    if !quiet {
        print!("{}", messages::rsync_banner(&key, rsync.cmd()));
    }

    run_command(rsync.cmd())
}

/// Run a command line through `sh -c` with inherited stdio.
fn run_command(cmd: &str) -> Result<()> {
    info!("Running: {}", cmd);
    let status = Command::new("sh")
        .arg("-c")
        .arg(cmd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .context("Cannot execute rsync")?;

    if !status.success() {
        bail!("Rsync failed with exit code: {:?}", status.code());
    }

    Ok(())
}

/// Print every key as a project/environment table.
pub fn keys(store: &SettingsStore) -> Result<()> {
    let keys = store.keys()?;
    if keys.is_empty() {
        print!("{}", messages::no_projects());
        return Ok(());
    }

    print!("{}", messages::proj_env_table(&keys));
    Ok(())
}

/// Print the distinct projects.
pub fn projs(store: &SettingsStore) -> Result<()> {
    let projects = store.list_projects()?;
    if projects.is_empty() {
        print!("{}", messages::no_projects());
        return Ok(());
    }

    for project in &projects {
        println!("{}", project.green());
    }
    Ok(())
}

/// Print the environments of a project.
pub fn envs(store: &SettingsStore, proj: &str) -> Result<()> {
    match store.list_envs(proj) {
        Ok(envs) => {
            for env in envs {
                println!("{}", env.green());
            }
            Ok(())
        }
        Err(e @ Error::ProjectNotFound(_)) => {
            let projects = store.list_projects()?;
            if projects.is_empty() {
                print!("{}", messages::no_projects());
            } else {
                print!("{}", messages::unknown_project(proj, &projects));
            }
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Create a new, empty setting file.
pub fn new_setting(store: &SettingsStore, key: &str) -> Result<()> {
    let key = parse_key(key)?;
    store.create(&key).map_err(|e| explain(store, e))?;

    print!("{}", messages::new_setting_success(&key));
    Ok(())
}

/// Open an existing setting file in the editor.
pub fn edit(store: &SettingsStore, key: &str) -> Result<()> {
    let key = parse_key(key)?;
    if !store.exists(&key) {
        return Err(explain(store, Error::NotFound(key.to_string())));
    }

    open_in_editor(&store.path(&key))?;

    print!("{}", messages::edit_setting_success(&key));
    Ok(())
}

/// Copy a setting file to a new key.
pub fn copy(store: &SettingsStore, src: &str, dest: &str) -> Result<()> {
    let src = parse_key(src)?;
    let dest = parse_key(dest)?;
    store.copy(&src, &dest).map_err(|e| explain(store, e))?;

    print!("{}", messages::copy_setting_success(&src, &dest));
    Ok(())
}

/// Print the diagnostic report of a setting file.
pub fn check(store: &SettingsStore, key: &str) -> Result<()> {
    let key = parse_key(key)?;
    let report = store.inspect(&key).map_err(|e| explain(store, e))?;

    print!("{}", messages::report(&report));
    Ok(())
}
