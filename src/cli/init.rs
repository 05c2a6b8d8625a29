use std::{fs, path::Path};

use bloodline::Config;
use tracing::instrument;

use super::WORKSPACE_DIR;

#[derive(Debug)]
pub struct Init;

impl Init {
    #[instrument]
    pub fn run(root: &Path) -> anyhow::Result<()> {
        let dir = root.join(WORKSPACE_DIR);
        if dir.exists() {
            anyhow::bail!(
                "Registry already initialized (found existing {WORKSPACE_DIR} directory)"
            );
        }

        fs::create_dir_all(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to create {WORKSPACE_DIR} directory: {e}"))?;

        let config = Config::default();
        config
            .save(&dir.join("config.toml"))
            .map_err(|e| anyhow::anyhow!("Failed to create config.toml: {e}"))?;

        let data_dir = config.data_dir(&dir);
        fs::create_dir_all(&data_dir)
            .map_err(|e| anyhow::anyhow!("Failed to create data directory: {e}"))?;

        println!("Initialized bloodline registry in {}", root.display());
        println!("  Created: {WORKSPACE_DIR}/config.toml");
        println!("  Created: {WORKSPACE_DIR}/data/");
        println!();
        println!("Next steps:");
        println!(
            "  bloodline register donor --name \"Your Name\" --contact \"555 0100\" --email \
             you@example.com --location \"Your Town\" --blood-type O+"
        );

        Ok(())
    }
}
