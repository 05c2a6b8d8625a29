use std::io::{self, Write};

use bloodline::{KeyValueStore, Registry, Request};
use clap::Parser;
use tracing::instrument;

use super::{
    Workspace,
    render::{OutputFormat, render_records, resolve_columns},
    terminal::Colorize,
};

/// Command arguments for `bloodline match`.
///
/// There are no accounts: the most recently registered donor is treated as
/// the current user.
#[derive(Debug, Parser)]
#[command(about = "Show requests the most recently registered donor can serve")]
pub struct Match {
    /// Columns to display (comma-separated field names).
    #[arg(long, value_delimiter = ',', value_name = "FIELD")]
    columns: Vec<String>,

    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Suppress headers and the donor summary.
    #[arg(long)]
    quiet: bool,
}

impl Match {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let mut stdout = io::stdout().lock();
        self.write(&workspace.registry, &mut stdout)
    }

    fn write<S: KeyValueStore, W: Write>(
        &self,
        registry: &Registry<S>,
        writer: &mut W,
    ) -> anyhow::Result<()> {
        let columns = resolve_columns::<Request>(&self.columns)?;

        let Some((donor, requests)) = registry.match_current_donor() else {
            writeln!(
                writer,
                "{}",
                "No donor profile found. Register as a donor first with 'bloodline register donor'."
                    .info()
            )?;
            return Ok(());
        };

        let table = self.output == OutputFormat::Table && !self.quiet;
        if table {
            writeln!(
                writer,
                "Matching for {} ({}) near {}",
                donor.name, donor.blood_type, donor.location
            )?;
            if requests.is_empty() {
                writeln!(writer, "{}", "No matching requests right now.".dim())?;
                return Ok(());
            }
            writeln!(writer)?;
        }

        render_records(writer, &requests, &columns, self.output, self.quiet)
    }
}

#[cfg(test)]
mod tests {
    use bloodline::{FormFields, MemoryStore, RecordStore};

    use super::*;

    fn output(registry: &Registry<MemoryStore>, args: &[&str]) -> String {
        let argv = std::iter::once("test").chain(args.iter().copied());
        let command = Match::try_parse_from(argv).unwrap();
        let mut buffer = Vec::new();
        command.write(registry, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn reports_missing_profile() {
        let registry = Registry::new(RecordStore::new(MemoryStore::new()));
        assert!(output(&registry, &[]).contains("No donor profile found"));
    }

    #[test]
    fn lists_compatible_nearby_requests() {
        let mut registry = Registry::new(RecordStore::new(MemoryStore::new()));
        registry
            .register_donor(
                &FormFields::new()
                    .with("name", "Ada")
                    .with("contact", "555 0100")
                    .with("email", "ada@example.com")
                    .with("location", "Springfield")
                    .with("bloodType", "O+"),
            )
            .unwrap();
        for (blood_type, location) in [
            ("A+", "Springfield General"),
            ("A-", "Springfield General"),
            ("B+", "Shelbyville"),
        ] {
            registry
                .submit_request(
                    &FormFields::new()
                        .with("bloodType", blood_type)
                        .with("urgency", "high")
                        .with("location", location),
                )
                .unwrap();
        }

        let quiet = output(&registry, &["--quiet", "--columns", "bloodType"]);
        assert_eq!(quiet, "A+\n");

        let table = output(&registry, &["--columns", "bloodType,location"]);
        assert!(table.starts_with("Matching for Ada (O+) near Springfield\n"));
        assert!(table.contains("Springfield General"));
    }
}
