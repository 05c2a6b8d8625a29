use bloodline::{FormFields, ValidationErrors};
use clap::{Args, Subcommand};
use tracing::instrument;

use super::{Workspace, terminal::notify};

/// Register a person with the registry.
#[derive(Debug, Subcommand)]
pub enum Register {
    /// Register a blood donor
    Donor(DonorArgs),

    /// Register a blood recipient
    Recipient(RecipientArgs),
}

#[derive(Debug, Args)]
pub struct DonorArgs {
    /// Full name
    #[arg(long)]
    name: Option<String>,

    /// Phone number
    #[arg(long)]
    contact: Option<String>,

    /// Email address
    #[arg(long)]
    email: Option<String>,

    /// Town or area the donor can donate in
    #[arg(long)]
    location: Option<String>,

    /// Blood type (O-, O+, A-, A+, B-, B+, AB-, AB+)
    #[arg(long, allow_hyphen_values = true)]
    blood_type: Option<String>,
}

impl DonorArgs {
    fn fields(self) -> FormFields {
        let mut fields = FormFields::new();
        fields.insert_opt("name", self.name);
        fields.insert_opt("contact", self.contact);
        fields.insert_opt("email", self.email);
        fields.insert_opt("location", self.location);
        fields.insert_opt("bloodType", self.blood_type);
        fields
    }
}

#[derive(Debug, Args)]
pub struct RecipientArgs {
    /// Full name
    #[arg(long)]
    name: Option<String>,

    /// Phone number
    #[arg(long)]
    contact: Option<String>,

    /// Hospital or town where blood is needed
    #[arg(long)]
    location: Option<String>,

    /// Blood type (O-, O+, A-, A+, B-, B+, AB-, AB+)
    #[arg(long, allow_hyphen_values = true)]
    blood_type: Option<String>,
}

impl RecipientArgs {
    fn fields(self) -> FormFields {
        let mut fields = FormFields::new();
        fields.insert_opt("name", self.name);
        fields.insert_opt("contact", self.contact);
        fields.insert_opt("location", self.location);
        fields.insert_opt("bloodType", self.blood_type);
        fields
    }
}

impl Register {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, workspace: &mut Workspace) -> anyhow::Result<()> {
        let duration = workspace.config.notice_duration();

        match self {
            Self::Donor(args) => {
                let donor = workspace
                    .registry
                    .register_donor(&args.fields())
                    .map_err(rejected)?;
                notify(
                    &format!("✅ Registered donor {} ({})", donor.name, donor.id),
                    duration,
                );
            }
            Self::Recipient(args) => {
                let recipient = workspace
                    .registry
                    .register_recipient(&args.fields())
                    .map_err(rejected)?;
                notify(
                    &format!("✅ Registered recipient {} ({})", recipient.name, recipient.id),
                    duration,
                );
            }
        }
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
#[command(about = "Submit a blood request")]
pub struct SubmitRequest {
    /// Blood type needed (O-, O+, A-, A+, B-, B+, AB-, AB+)
    #[arg(long, allow_hyphen_values = true)]
    blood_type: Option<String>,

    /// How soon it is needed (low, medium, high)
    #[arg(long)]
    urgency: Option<String>,

    /// Hospital or town where it is needed
    #[arg(long)]
    location: Option<String>,
}

impl SubmitRequest {
    fn fields(self) -> FormFields {
        let mut fields = FormFields::new();
        fields.insert_opt("bloodType", self.blood_type);
        fields.insert_opt("urgency", self.urgency);
        fields.insert_opt("location", self.location);
        fields
    }

    #[instrument(level = "debug", skip_all)]
    pub fn run(self, workspace: &mut Workspace) -> anyhow::Result<()> {
        let duration = workspace.config.notice_duration();
        let request = workspace
            .registry
            .submit_request(&self.fields())
            .map_err(rejected)?;

        notify(
            &format!(
                "✅ Submitted {} request for {} at {} ({})",
                request.urgency, request.blood_type, request.location, request.id
            ),
            duration,
        );
        Ok(())
    }
}

/// Turns validation failures into the command's error.
pub fn rejected(errors: ValidationErrors) -> anyhow::Error {
    anyhow::anyhow!("Submission rejected:\n{errors}")
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(subcommand)]
        register: Register,
    }

    #[test]
    fn negative_blood_types_parse_as_values() {
        let harness = Harness::try_parse_from([
            "test",
            "donor",
            "--name",
            "Ada",
            "--blood-type",
            "O-",
        ])
        .unwrap();

        let Register::Donor(args) = harness.register else {
            panic!("expected donor");
        };
        let fields = args.fields();
        assert_eq!(fields.get("bloodType"), Some("O-"));
        assert_eq!(fields.get("name"), Some("Ada"));
        assert_eq!(fields.get("email"), None);
    }

    #[test]
    fn rejection_lists_every_message() {
        let errors = bloodline::domain::form::request_from_fields(&FormFields::new()).unwrap_err();
        let message = rejected(errors).to_string();
        assert_eq!(
            message,
            "Submission rejected:\n\
             Blood type is required\n\
             Urgency is required\n\
             Location is required"
        );
    }
}
