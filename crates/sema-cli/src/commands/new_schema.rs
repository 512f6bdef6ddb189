//! New-schema command: publish a spec and bind its origin alias.
//!
//! Reads an Avro specification from stdin (or fetches it from a URL),
//! validates it locally, optionally checks the explorer that no schema of
//! that name exists yet, then publishes the schema under a fresh ID
//! followed by the origin alias `<name>-v0`.

use anyhow::{Context, Result, bail};
use clap::Args;
use serde::Deserialize;
use tokio::io::AsyncReadExt;

use sema_core::{Alias, NameVersion, SchemaId};
use sema_log::KafkaProducer;
use sema_registry::{AvroCodec, SchemaPublisher};

/// Arguments for the new-schema command.
#[derive(Debug, Args)]
pub struct NewSchemaArgs {
    /// A name for the new schema.
    #[arg(long)]
    pub name: String,

    /// Broker bootstrap address.
    #[arg(long, env = "SEMA_BROKER", default_value = "localhost:9092")]
    pub broker: String,

    /// Explorer base URL used to check whether the schema already exists.
    #[arg(long, env = "SEMA_EXPLORER", default_value = "localhost:8080")]
    pub explorer: String,

    /// Skip the explorer existence check.
    #[arg(long)]
    pub skip_check: bool,

    /// Fetch the specification via HTTP GET rather than reading stdin.
    #[arg(long)]
    pub from_url: Option<String>,
}

/// The slice of the explorer's alias listing this command needs.
#[derive(Debug, Deserialize)]
struct AliasListing {
    aliases: Vec<Alias>,
}

/// Execute the new-schema command.
///
/// # Errors
///
/// Returns an error when the name is taken, the spec is invalid, or a
/// publish fails.
pub async fn execute(args: NewSchemaArgs) -> Result<()> {
    if args.name.trim().is_empty() {
        bail!("the schema needs a name");
    }

    if !args.skip_check {
        println!("Checking whether the schema already exists...");
        if let Some(latest) = latest_version(&args.explorer, &args.name).await? {
            bail!(
                "a schema named '{}' already exists, its latest version is {latest:x}",
                args.name
            );
        }
        println!("Schema does not exist yet, continuing");
    }

    let spec = read_spec(&args).await?;
    AvroCodec::compile(&spec).context("this does not look like a valid Avro schema")?;

    let schema = SchemaId::generate();
    let publisher = SchemaPublisher::new(KafkaProducer::connect(&args.broker)?);

    publisher.update_schema(schema, &spec).await?;
    println!("Published schema {schema}");

    let origin = NameVersion::origin(args.name.as_str());
    publisher.update_alias(&origin.alias(), schema).await?;
    println!("Bound alias {}", origin.alias());

    Ok(())
}

/// Returns the highest published version of `name`, if any alias matches.
async fn latest_version(explorer: &str, name: &str) -> Result<Option<u64>> {
    let url = format!("{}/alias/list", base_url(explorer));
    let listing: AliasListing = reqwest::get(&url)
        .await
        .with_context(|| format!("unable to list aliases from {url}"))?
        .json()
        .await
        .context("unable to decode the explorer's alias listing")?;

    let mut latest: Option<u64> = None;
    for alias in listing.aliases {
        let Ok(version) = NameVersion::from_alias(&alias) else {
            tracing::debug!(alias = %alias, "alias is not in versioned format, skipping");
            continue;
        };
        if version.name == name {
            latest = Some(latest.map_or(version.version, |seen| seen.max(version.version)));
        }
    }
    Ok(latest)
}

async fn read_spec(args: &NewSchemaArgs) -> Result<String> {
    if let Some(url) = &args.from_url {
        return reqwest::get(url)
            .await
            .with_context(|| format!("unable to fetch the specification from {url}"))?
            .text()
            .await
            .context("unable to read the specification response");
    }

    let mut spec = String::new();
    tokio::io::stdin()
        .read_to_string(&mut spec)
        .await
        .context("unable to read the specification from stdin")?;
    Ok(spec)
}

fn base_url(explorer: &str) -> String {
    let trimmed = explorer.trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}
