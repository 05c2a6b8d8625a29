use bloodline::{Collection, Counts, Donor};
use clap::Parser;
use tracing::instrument;

use super::{
    Workspace,
    terminal::{Colorize, is_narrow},
};

#[derive(Debug, Parser, Default)]
#[command(about = "Show record counts and the current donor profile")]
pub struct Status {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Suppress headers and format for scripting
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Status {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let registry = &workspace.registry;
        let counts = registry.counts();
        let matched = registry.match_current_donor();
        let current = matched
            .as_ref()
            .map(|(donor, requests)| (donor, requests.len()));

        match self.output {
            OutputFormat::Json => Self::output_json(&counts, current)?,
            OutputFormat::Table if self.quiet => Self::output_quiet(&counts),
            OutputFormat::Table => {
                if counts.total() == 0 {
                    println!("No records found yet. Register with 'bloodline register donor'.");
                    return Ok(());
                }
                Self::output_table(&counts, current);
            }
        }

        Ok(())
    }

    fn output_json(counts: &Counts, current: Option<(&Donor, usize)>) -> anyhow::Result<()> {
        use serde_json::json;

        let collections: Vec<_> = Collection::ALL
            .iter()
            .map(|&collection| {
                json!({
                    "collection": collection.key(),
                    "count": counts.get(collection),
                })
            })
            .collect();

        let current_donor = current.map(|(donor, matches)| {
            json!({
                "id": donor.id,
                "name": donor.name,
                "bloodType": donor.blood_type,
                "location": donor.location,
                "matchingRequests": matches,
            })
        });

        let output = json!({
            "collections": collections,
            "total": counts.total(),
            "currentDonor": current_donor,
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn output_quiet(counts: &Counts) {
        println!(
            "donors={} recipients={} requests={} appointments={}",
            counts.donors, counts.recipients, counts.requests, counts.appointments
        );
    }

    fn output_table(counts: &Counts, current: Option<(&Donor, usize)>) {
        let narrow = is_narrow();

        println!("Record counts");
        println!("{}", "─────────────".dim());

        if narrow {
            for collection in Collection::ALL {
                println!("{collection}: {}", counts.get(collection));
            }
            println!("Total: {}", counts.total());
        } else {
            println!("{:<14} Count", "Collection");
            for collection in Collection::ALL {
                println!("{:<14} {}", collection.key(), counts.get(collection));
            }
            println!("{:<14} {}", "Total", counts.total());
        }

        println!();

        match current {
            None => {
                println!("Current donor: {} ⚠️", "none".warning());
                println!(
                    "{}",
                    "Register with 'bloodline register donor' to see matches.".dim()
                );
            }
            Some((donor, 0)) => {
                println!(
                    "Current donor: {} ({}, {})",
                    donor.name.info(),
                    donor.blood_type,
                    donor.location
                );
                println!("Matching requests: {}", "0".dim());
            }
            Some((donor, matches)) => {
                println!(
                    "Current donor: {} ({}, {})",
                    donor.name.info(),
                    donor.blood_type,
                    donor.location
                );
                println!("Matching requests: {} ✅", matches.to_string().success());
                println!("{}", "Run 'bloodline match' to see them.".dim());
            }
        }
    }
}
