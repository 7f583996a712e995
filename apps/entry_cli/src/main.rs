use std::{io, path::PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use entry_core::{
    cultivar_options, greenhouse_options, hand_off, reduce, Effect, JsonLinesSink, Notice,
    Settings, WizardAction, WizardState,
};
use shared::{catalog::Catalog, domain::LocationCode, record::FinalRecord};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "entry_cli", about = "Headless driver for the greenhouse observation form")]
struct Cli {
    /// Settings file (defaults to ./entry.toml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List location codes
    Locations,
    /// List the greenhouse choices of a location
    Greenhouses { location: LocationCode },
    /// List the cultivar choices of a crop
    Cultivars { crop: String },
    /// Fill in the form step by step and print the record as JSON
    Submit {
        #[arg(long)]
        location: LocationCode,
        #[arg(long)]
        haus: Option<String>,
        #[arg(long, default_value = "")]
        kultur: String,
        #[arg(long, default_value = "")]
        sorte: String,
        /// Entry form field as name=value, repeatable
        #[arg(long = "field", value_name = "NAME=VALUE", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    if name.trim().is_empty() {
        return Err(format!("empty field name in '{raw}'"));
    }
    Ok((name.trim().to_string(), value.to_string()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref()).context("failed to load settings")?;
    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .with_writer(io::stderr)
        .init();
    let catalog = settings.catalog().context("failed to load reference tables")?;

    match cli.command {
        Command::Locations => {
            for entry in catalog.locations() {
                println!("{}\t{} Häuser", entry.code, entry.greenhouses.len());
            }
        }
        Command::Greenhouses { location } => {
            for option in greenhouse_options(&catalog, location).iter().skip(1) {
                println!("{}\t{}", option.value, option.label);
            }
        }
        Command::Cultivars { crop } => {
            for option in cultivar_options(&catalog, &crop).iter().skip(1) {
                println!("{}", option.label);
            }
        }
        Command::Submit {
            location,
            haus,
            kultur,
            sorte,
            fields,
        } => {
            let mut actions = vec![WizardAction::ChooseLocation(location)];
            if let Some(haus) = haus {
                actions.push(WizardAction::SelectGreenhouse(haus));
            }
            actions.push(WizardAction::ConfirmGreenhouse);
            actions.push(WizardAction::SelectCrop(kultur));
            actions.push(WizardAction::SelectCultivar(sorte));
            actions.extend(
                fields
                    .into_iter()
                    .map(|(name, value)| WizardAction::SetField { name, value }),
            );

            let wizard = WizardState::new(&catalog, settings.entry_fields.clone());
            let record = replay(&catalog, wizard, actions)?;

            let notice = hand_off(JsonLinesSink::new(io::stdout().lock()), &record)
                .context("failed to write record")?;
            info!(notice = notice.message(), "record packaged");
        }
    }

    Ok(())
}

/// Feeds the actions through the reducer, then submits.
fn replay(catalog: &Catalog, wizard: WizardState, actions: Vec<WizardAction>) -> Result<FinalRecord> {
    let mut state = wizard;
    for action in actions {
        let name = action.name();
        let transition = reduce(state, catalog, action.clone());
        if let Some(Notice::Warning(message)) = transition.notice {
            bail!("{name}: {message}");
        }
        state = transition.state;
        check_applied(&state, &action)?;
    }

    match reduce(state, catalog, WizardAction::Submit).effect {
        Some(Effect::Ingest(record)) => Ok(record),
        None => Err(anyhow!("form did not reach the entry step")),
    }
}

/// The reducer drops values the form does not offer; the CLI reports them instead.
fn check_applied(state: &WizardState, action: &WizardAction) -> Result<()> {
    match action {
        WizardAction::SelectGreenhouse(haus) if state.greenhouse_select().value() != haus => {
            bail!("greenhouse '{haus}' is not offered for this location")
        }
        WizardAction::SelectCrop(kultur) if state.crop_select().value() != kultur => {
            bail!("crop '{kultur}' is not offered")
        }
        WizardAction::SelectCultivar(sorte) if state.cultivar_select().value() != sorte => {
            bail!("cultivar '{sorte}' is not offered for crop '{}'", state.crop_select().value())
        }
        WizardAction::SetField { name, value } if state.field_value(name) != Some(value.as_str()) => {
            bail!("field '{name}' is not part of the entry form")
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::default_entry_fields;

    fn actions(haus: Option<&str>) -> Vec<WizardAction> {
        let mut actions = vec![WizardAction::ChooseLocation(LocationCode::Tgw)];
        if let Some(haus) = haus {
            actions.push(WizardAction::SelectGreenhouse(haus.into()));
        }
        actions.push(WizardAction::ConfirmGreenhouse);
        actions.push(WizardAction::SelectCrop("gurken".into()));
        actions.push(WizardAction::SelectCultivar("Verdon".into()));
        actions
    }

    #[test]
    fn parses_field_arguments() {
        assert_eq!(
            parse_field("plant-id=12").unwrap(),
            ("plant-id".to_string(), "12".to_string())
        );
        assert_eq!(
            parse_field("note=a=b").unwrap(),
            ("note".to_string(), "a=b".to_string())
        );
        assert!(parse_field("plant-id").is_err());
        assert!(parse_field("=3").is_err());
    }

    #[test]
    fn replay_builds_record() {
        let catalog = Catalog::builtin();
        let wizard = WizardState::new(&catalog, default_entry_fields());
        let record = replay(&catalog, wizard, actions(Some("4"))).expect("record");
        assert_eq!(record.haus.as_deref(), Some("4"));
        assert_eq!(record.kultur, "gurken");
        assert_eq!(record.sorte, "Verdon");
    }

    #[test]
    fn replay_without_greenhouse_fails_with_warning() {
        let catalog = Catalog::builtin();
        let wizard = WizardState::new(&catalog, default_entry_fields());
        let err = replay(&catalog, wizard, actions(None)).unwrap_err();
        assert!(err.to_string().contains("Please select a greenhouse."));
    }

    fn replay_error(actions: Vec<WizardAction>) -> String {
        let catalog = Catalog::builtin();
        let wizard = WizardState::new(&catalog, default_entry_fields());
        replay(&catalog, wizard, actions).unwrap_err().to_string()
    }

    #[test]
    fn replay_rejects_greenhouse_outside_location() {
        let err = replay_error(actions(Some("99")));
        assert!(err.contains("greenhouse '99'"), "{err}");
    }

    #[test]
    fn replay_rejects_unknown_crop_and_cultivar() {
        let mut wrong_case = actions(Some("4"));
        wrong_case[3] = WizardAction::SelectCrop("Gurken".into());
        let err = replay_error(wrong_case);
        assert!(err.contains("crop 'Gurken'"), "{err}");

        let mut unknown_sorte = actions(Some("4"));
        unknown_sorte[4] = WizardAction::SelectCultivar("Nope".into());
        let err = replay_error(unknown_sorte);
        assert!(err.contains("cultivar 'Nope'"), "{err}");
    }

    #[test]
    fn replay_rejects_unknown_field() {
        let mut with_typo = actions(Some("4"));
        with_typo.push(WizardAction::SetField {
            name: "plantid".into(),
            value: "12".into(),
        });
        let err = replay_error(with_typo);
        assert!(err.contains("field 'plantid'"), "{err}");
    }

    #[test]
    fn cli_accepts_lowercase_location() {
        let cli = Cli::try_parse_from(["entry_cli", "greenhouses", "eln"]).expect("parse");
        assert!(matches!(
            cli.command,
            Command::Greenhouses {
                location: LocationCode::Eln
            }
        ));
    }
}
