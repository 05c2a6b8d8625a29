use std::io::{self, Write};

use bloodline::{
    Appointment, BloodType, Collection, Donor, KeyValueStore, Recipient, Record, Registry,
    Request, RequestFilter,
};
use clap::Parser;
use tracing::instrument;

use super::{
    Workspace,
    render::{OutputFormat, render_records, resolve_columns},
};

/// Command arguments for `bloodline list`.
#[derive(Debug, Parser)]
#[command(about = "List the records of one collection")]
pub struct List {
    /// The collection to list.
    #[arg(value_enum)]
    collection: Collection,

    /// Columns to display (comma-separated field names).
    #[arg(long, value_delimiter = ',', value_name = "FIELD")]
    columns: Vec<String>,

    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Suppress headers and format rows for scripting.
    #[arg(long)]
    quiet: bool,
}

impl List {
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
        match self.collection {
            Collection::Donors => self.render(&registry.all::<Donor>(), writer),
            Collection::Recipients => self.render(&registry.all::<Recipient>(), writer),
            Collection::Requests => self.render(&registry.requests(), writer),
            Collection::Appointments => self.render(&registry.all::<Appointment>(), writer),
        }
    }

    fn render<R: Record, W: Write>(&self, records: &[R], writer: &mut W) -> anyhow::Result<()> {
        let columns = resolve_columns::<R>(&self.columns)?;
        render_records(writer, records, &columns, self.output, self.quiet)
    }
}

/// Command arguments for `bloodline requests`.
#[derive(Debug, Parser)]
#[command(about = "List blood requests, optionally filtered")]
pub struct Requests {
    /// Only requests needing exactly this blood type.
    #[arg(long, allow_hyphen_values = true)]
    blood_type: Option<BloodType>,

    /// Only requests whose location contains this text (case-insensitive).
    #[arg(long)]
    location: Option<String>,

    /// Columns to display (comma-separated field names).
    #[arg(long, value_delimiter = ',', value_name = "FIELD")]
    columns: Vec<String>,

    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Suppress headers and format rows for scripting.
    #[arg(long)]
    quiet: bool,
}

impl Requests {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let mut stdout = io::stdout().lock();
        self.write(&workspace.registry, &mut stdout)
    }

    fn filter(&self) -> RequestFilter {
        RequestFilter {
            blood_type: self.blood_type,
            location: self.location.clone(),
        }
    }

    fn write<S: KeyValueStore, W: Write>(
        &self,
        registry: &Registry<S>,
        writer: &mut W,
    ) -> anyhow::Result<()> {
        let filter = self.filter();
        let requests = registry.filter_requests(&filter);

        if requests.is_empty() && !self.quiet && self.output == OutputFormat::Table {
            if filter.any() {
                writeln!(writer, "No requests match the filter.")?;
            } else {
                writeln!(writer, "No requests yet. Submit one with 'bloodline request'.")?;
            }
            return Ok(());
        }

        let columns = resolve_columns::<Request>(&self.columns)?;
        render_records(writer, &requests, &columns, self.output, self.quiet)
    }
}

#[cfg(test)]
mod tests {
    use bloodline::{FormFields, MemoryStore, RecordStore};

    use super::*;

    fn registry() -> Registry<MemoryStore> {
        let mut registry = Registry::new(RecordStore::new(MemoryStore::new()));
        for (blood_type, location) in [("A+", "Springfield"), ("B+", "Shelbyville")] {
            registry
                .submit_request(
                    &FormFields::new()
                        .with("bloodType", blood_type)
                        .with("urgency", "medium")
                        .with("location", location),
                )
                .unwrap();
        }
        registry
    }

    fn run<C: Parser>(
        args: &[&str],
        write: impl Fn(&C, &mut Vec<u8>) -> anyhow::Result<()>,
    ) -> String {
        let argv = std::iter::once("test").chain(args.iter().copied());
        let command = C::try_parse_from(argv).unwrap();
        let mut buffer = Vec::new();
        write(&command, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn requests_filter_by_location() {
        let registry = registry();
        let output = run::<Requests>(
            &["--location", "spring", "--columns", "bloodType,location", "--quiet"],
            |command, buffer| command.write(&registry, buffer),
        );
        assert_eq!(output, "A+\tSpringfield\n");
    }

    #[test]
    fn requests_filter_by_negative_blood_type() {
        let registry = registry();
        let output = run::<Requests>(&["--blood-type", "O-"], |command, buffer| {
            command.write(&registry, buffer)
        });
        assert_eq!(output, "No requests match the filter.\n");
    }

    #[test]
    fn list_renders_chosen_collection() {
        let registry = registry();
        let output = run::<List>(
            &["requests", "--columns", "location", "--output", "csv"],
            |command, buffer| command.write(&registry, buffer),
        );
        assert_eq!(output, "location\nSpringfield\nShelbyville\n");
    }

    #[test]
    fn list_rejects_unknown_columns() {
        let registry = registry();
        let command = List::try_parse_from(["test", "donors", "--columns", "urgency"]).unwrap();
        let mut buffer = Vec::new();
        assert!(command.write(&registry, &mut buffer).is_err());
    }
}
