use clap::{Args, Subcommand};
use serde::Serialize;

use funish::version::{resolve_bump, BumpPlan, ReleaseType};

use super::CmdResult;

#[derive(Args)]
pub struct VersionArgs {
    #[command(subcommand)]
    command: VersionCommand,
}

#[derive(Subcommand)]
enum VersionCommand {
    /// Compute the next semantic version
    Bump {
        /// Current version (e.g., 1.2.3)
        version: String,

        /// Release type (major, minor, patch, prerelease). Defaults to
        /// prerelease for pre-release versions and patch otherwise.
        release: Option<String>,

        /// Prerelease identifier (e.g., beta)
        #[arg(long)]
        preid: Option<String>,
    },
}

#[derive(Serialize)]
pub struct VersionBumpOutput {
    command: String,
    #[serde(flatten)]
    plan: BumpPlan,
}

pub fn run_json(args: VersionArgs) -> CmdResult<VersionBumpOutput> {
    match args.command {
        VersionCommand::Bump {
            version,
            release,
            preid,
        } => {
            let release = release
                .map(|r| r.parse::<ReleaseType>())
                .transpose()?;
            let plan = resolve_bump(&version, release, preid.as_deref())?;

            Ok((
                VersionBumpOutput {
                    command: "version.bump".to_string(),
                    plan,
                },
                0,
            ))
        }
    }
}
