use anyhow::Context;
use bloodline::{Donor, FormFields};
use chrono::Local;
use tracing::instrument;

use super::{
    Workspace,
    register::rejected,
    render::option_list,
    terminal::{is_interactive, notify},
};

pub const DONOR_PLACEHOLDER: &str = "-- Select donor --";

#[derive(Debug, clap::Parser)]
#[command(about = "Book a donation appointment")]
pub struct Book {
    /// ID of the donor; prompts for a donor on a terminal if omitted
    #[arg(long)]
    donor_id: Option<String>,

    /// Date of the appointment (YYYY-MM-DD, today or later)
    #[arg(long)]
    date: Option<String>,

    /// Time of the appointment (HH:MM, between 08:00 and 18:00)
    #[arg(long)]
    time: Option<String>,
}

impl Book {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, workspace: &mut Workspace) -> anyhow::Result<()> {
        let donor_id = match self.donor_id {
            Some(id) => Some(id),
            None if is_interactive() => pick_donor(&workspace.registry.donors())?,
            None => None,
        };

        let mut fields = FormFields::new();
        fields.insert_opt("donorId", donor_id);
        fields.insert_opt("date", self.date);
        fields.insert_opt("time", self.time);

        let today = Local::now().date_naive();
        let appointment = workspace
            .registry
            .book_appointment(&fields, today)
            .map_err(rejected)?;

        notify(
            &format!(
                "✅ Booked {} ({}) on {} at {}",
                appointment.donor_name,
                appointment.donor_blood,
                appointment.date,
                appointment.time.format("%H:%M")
            ),
            workspace.config.notice_duration(),
        );
        Ok(())
    }
}

/// The label a donor is offered under.
pub fn donor_option(donor: &Donor) -> String {
    format!("{} ({}, {}) [{}]", donor.name, donor.blood_type, donor.location, donor.id)
}

/// Asks which donor to book for.
///
/// Choosing the placeholder leaves the donor unset, which validation then
/// rejects.
fn pick_donor(donors: &[Donor]) -> anyhow::Result<Option<String>> {
    let options = option_list(DONOR_PLACEHOLDER, donors.iter().map(donor_option));

    let choice = dialoguer::Select::new()
        .with_prompt("Donor")
        .items(&options)
        .default(0)
        .interact()
        .context("failed to read donor selection")?;

    Ok(choice
        .checked_sub(1)
        .and_then(|index| donors.get(index))
        .map(|donor| donor.id.to_string()))
}
