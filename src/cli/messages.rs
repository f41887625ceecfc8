//! Human facing messages printed by the CLI.

use aws_upload::{ProfileKey, Report};
use colored::Colorize;
use std::path::Path;

const EXAMPLE_KEYS: &[&str] = &["my-site.staging", "my-site.dev", "my-site.prod"];

/// Banner printed before an upload.
pub fn rsync_banner(key: &ProfileKey, cmd: &str) -> String {
    format!(
        "=================================\n\
         Proj: {}\n\
         Env:  {}\n\
         Cmd:\n\
         {}\n\
         =================================\n",
        key.project().green(),
        key.environment().green(),
        cmd
    )
}

/// Shown when there is no setting file at all.
pub fn no_projects() -> String {
    format!(
        "It seems that you don't have any project setup.\nTry to type:\n\n    {}\n",
        "aws-upload new project.test".green()
    )
}

pub fn invalid_key(key: &str) -> String {
    let mut msg = format!(
        "It seems that the key {} is not valid:\n\n\
         Please try to use this format:\n    - [project].[environment]\n\n\
         Examples of valid keys to create a new setting file:\n",
        key.yellow()
    );
    msg.extend(
        EXAMPLE_KEYS
            .iter()
            .map(|example| format!("    - {}\n", example.green())),
    );
    msg.push_str(
        "\nTips on choosing the key name:\n\
         \x20   - for [project] and [environment] try to be: short, sweet, to the point\n\
         \x20   - use only one 'dot' . in the name\n",
    );
    msg
}

/// Shown when a key has no setting file.
pub fn no_file_found(key: &str, keys: &[ProfileKey]) -> String {
    if keys.is_empty() {
        return no_projects();
    }
    format!(
        "It seems that there is {} setting file for {}\n\n{}",
        "NO".red(),
        key.yellow(),
        proj_env_table(keys)
    )
}

pub fn key_already_exists(key: &str, keys: &[ProfileKey]) -> String {
    format!(
        "It seems that the key {} already exists, try to use another one.\n\n\
         Please consider you already have the following elements:\n{}",
        key.yellow(),
        proj_env_table(keys)
    )
}

pub fn new_setting_success(key: &ProfileKey) -> String {
    format!(
        "The setting file {} has been created successfully.\n\n\
         To edit the file type:\n    aws-upload edit {}\n",
        key.file_name().yellow(),
        key
    )
}

pub fn edit_setting_success(key: &ProfileKey) -> String {
    format!(
        "The setting file {} has been edited successfully.\n",
        key.file_name().yellow()
    )
}

pub fn copy_setting_success(src: &ProfileKey, dest: &ProfileKey) -> String {
    format!(
        "The setting file {} has been copied to {}.\n\n\
         To edit the file type:\n    aws-upload edit {}\n",
        src.file_name().yellow(),
        dest.file_name().yellow(),
        dest
    )
}

/// Shown when `envs` is asked for a project without setting files.
pub fn unknown_project<'a>(proj: &str, projects: impl IntoIterator<Item = &'a String>) -> String {
    let projects: Vec<&String> = projects.into_iter().collect();
    let mut msg = format!(
        "The project {} you are trying to use doesn't exist.\n\n",
        proj.red()
    );
    msg.push_str("These are the available projects:\n\n");
    msg.extend(projects.iter().map(|p| format!("  +  {}\n", p.green())));
    if let Some(first) = projects.first() {
        msg.push_str(&format!(
            "\nTo get the envs from one of them, run (for example):\n\n   aws-upload envs {}\n",
            first
        ));
    }
    msg
}

/// Two column table of every project and environment.
pub fn proj_env_table(keys: &[ProfileKey]) -> String {
    const PROJECT: &str = "Project";
    const ENVIRONMENT: &str = "Environment";

    let proj_width = keys
        .iter()
        .map(|k| k.project().len())
        .chain([PROJECT.len()])
        .max()
        .unwrap_or(PROJECT.len());
    let env_width = keys
        .iter()
        .map(|k| k.environment().len())
        .chain([ENVIRONMENT.len()])
        .max()
        .unwrap_or(ENVIRONMENT.len());

    let border = format!("+{}+{}+\n", "-".repeat(proj_width + 2), "-".repeat(env_width + 2));
    let header = format!(
        "| {:<pw$} | {:<ew$} |\n",
        PROJECT,
        ENVIRONMENT,
        pw = proj_width,
        ew = env_width
    );
    let rows: String = keys
        .iter()
        .map(|key| {
            // Pad before coloring so escape codes don't break alignment
            let proj = format!("{:<pw$}", key.project(), pw = proj_width);
            let env = format!("{:<ew$}", key.environment(), ew = env_width);
            format!("| {} | {} |\n", proj.green(), env.green())
        })
        .collect();

    format!("{border}{header}{border}{rows}{border}")
}

fn plot(condition: bool, ok: &str, ko: &str) -> String {
    if condition {
        ok.green().to_string()
    } else {
        ko.red().to_string()
    }
}

fn path_or_unset(path: Option<&Path>) -> String {
    match path {
        Some(path) => path.display().to_string().yellow().to_string(),
        None => "(not set)".dimmed().to_string(),
    }
}

/// Rendering of the `check` report.
pub fn report(report: &Report) -> String {
    let mut msg = format!(
        "File analysing:\n{}\nJson:             {}\n",
        report.path.display().to_string().yellow(),
        plot(report.is_valid_json, "VALID", "INVALID")
    );
    if let Some(kind) = report.json_error {
        msg.push_str(&format!(" - {}\n", kind.description()));
    }
    if report.is_valid_json {
        msg.push_str(&format!(
            "Settings:         {}\n",
            plot(report.settings_error.is_none(), "USABLE", "NOT USABLE")
        ));
    }
    if let Some(error) = &report.settings_error {
        msg.push_str(&format!(" - {}\n", error));
    }

    msg.push_str(&format!(
        "\nPem File:\n{}\nPem:              {}\n",
        path_or_unset(report.pem.as_deref()),
        plot(report.pem_exists, "EXISTS", "NOT EXISTS")
    ));
    if report.pem_exists {
        let perms = report.pem_perms.as_deref().unwrap_or("unknown");
        let strict = report.has_strict_pem_perms();
        msg.push_str(&format!("Pem Perm:         {}\n", plot(strict, perms, perms)));
        if let Some(pem) = report.pem.as_ref().filter(|_| !strict) {
            msg.push_str(&format!("Try to type: chmod 400 {}\n", pem.display()));
        }
    }

    msg.push_str(&format!(
        "\nLocal Folder:\n{}\nLocal Folder:     {}\n",
        path_or_unset(report.local.as_deref()),
        plot(report.local_exists, "EXISTS", "NOT EXISTS")
    ));
    msg
}
