use std::io;

use bloodline::{BloodType, KeyValueStore, Registry, Urgency};
use clap::{Parser, ValueEnum};
use tracing::instrument;

use super::{
    Workspace,
    book::{DONOR_PLACEHOLDER, donor_option},
    render::{option_list, render_options},
};

/// Form fields that offer a fixed set of choices.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Field {
    BloodTypes,
    Urgency,
    Donors,
}

#[derive(Debug, Parser)]
#[command(about = "Print the choices for a form field, placeholder first")]
pub struct Options {
    /// The field to list choices for.
    #[arg(value_enum)]
    field: Field,
}

impl Options {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let options = self.options(&workspace.registry);
        render_options(&mut io::stdout().lock(), &options)?;
        Ok(())
    }

    fn options<S: KeyValueStore>(&self, registry: &Registry<S>) -> Vec<String> {
        match self.field {
            Field::BloodTypes => option_list("-- Select blood type --", BloodType::ALL),
            Field::Urgency => option_list("-- Select urgency --", Urgency::ALL),
            Field::Donors => {
                option_list(DONOR_PLACEHOLDER, registry.donors().iter().map(donor_option))
            }
        }
    }
}
