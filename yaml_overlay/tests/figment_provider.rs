//! Extracting typed configuration through the `PatchedYaml` provider.

use anyhow::{Result, ensure};
use figment::{Figment, Profile, Provider};
use rstest::rstest;
use serde::Deserialize;
use test_helpers::figment::{figment_error, with_jail};
use yaml_overlay::PatchedYaml;

#[derive(Debug, Deserialize, PartialEq)]
struct Settings {
    host: String,
    port: u16,
    #[serde(default)]
    features: Vec<String>,
    verbose: bool,
}

#[rstest]
fn patched_values_are_extracted() -> Result<()> {
    let settings = with_jail(|jail| {
        jail.create_file("app.yaml", "host: localhost\nport: 80\nfeatures: [a, b]\nverbose: off\n")?;
        jail.create_file("app.yaml.patch", "port: 8080\nfeatures: [c]\nverbose: yes\n")?;
        Figment::from(PatchedYaml::file("app.yaml")).extract::<Settings>()
    })?;
    ensure!(
        settings
            == Settings {
                host: "localhost".to_owned(),
                port: 8080,
                features: vec!["c".to_owned()],
                verbose: true,
            },
        "unexpected settings {settings:?}"
    );
    Ok(())
}

#[rstest]
fn later_providers_still_override() -> Result<()> {
    let port = with_jail(|jail| {
        jail.create_file("app.yaml", "host: localhost\nport: 80\nverbose: false\n")?;
        Figment::from(PatchedYaml::file("app.yaml"))
            .merge(("port", 9000))
            .extract_inner::<u16>("port")
    })?;
    ensure!(port == 9000);
    Ok(())
}

#[rstest]
fn profile_selects_the_target() -> Result<()> {
    let profiles = with_jail(|jail| {
        jail.create_file("app.yaml", "host: localhost\n")?;
        let data = PatchedYaml::file("app.yaml").profile("staging").data()?;
        Ok(data.keys().cloned().collect::<Vec<Profile>>())
    })?;
    ensure!(profiles == [Profile::new("staging")], "{profiles:?}");
    Ok(())
}

#[rstest]
fn parse_errors_surface_with_the_path() -> Result<()> {
    let message = with_jail(|jail| {
        jail.create_file("app.yaml", "host: localhost\n")?;
        jail.create_file("app.yaml.patch", "notayaml")?;
        match Figment::from(PatchedYaml::file("app.yaml")).extract::<Settings>() {
            Ok(settings) => Err(figment_error(format!("unexpected success: {settings:?}"))),
            Err(err) => Ok(err.to_string()),
        }
    })?;
    ensure!(message.contains("app.yaml.patch"), "{message}");
    Ok(())
}

#[rstest]
fn missing_base_fails_extraction() -> Result<()> {
    let failed = with_jail(|_| {
        Ok(Figment::from(PatchedYaml::file("absent.yaml"))
            .extract::<Settings>()
            .is_err())
    })?;
    ensure!(failed);
    Ok(())
}

#[rstest]
fn empty_documents_provide_nothing() -> Result<()> {
    let empty = with_jail(|jail| {
        jail.create_file("app.yaml", "# nothing yet\n")?;
        let data = PatchedYaml::file("app.yaml").data()?;
        Ok(data.values().all(figment::value::Dict::is_empty))
    })?;
    ensure!(empty);
    Ok(())
}
