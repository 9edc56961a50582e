//! ndfc-docgen CLI entrypoint
//! Parses command-line arguments and dispatches to the core library.

// Internal imports (std, crate)
use std::path::PathBuf;

// External imports (alphabetized)
use anyhow::Context;
use clap::{Parser, ValueEnum};
use ndfc_docgen_core::config::DEFAULT_REQUEST_TIMEOUT;
use ndfc_docgen_core::ruleset::build_ruleset;
use ndfc_docgen_core::utils::to_json_pretty;
use ndfc_docgen_core::{
    Config, DocBuilder, DocManifest, DocStyle, NdfcClient, NdfcTemplate, RawTemplate,
    TemplateIndex, TemplateSave,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ndfc-docgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Timeout, in seconds, for each controller request
    #[arg(long, global = true, default_value_t = DEFAULT_REQUEST_TIMEOUT)]
    timeout: u64,
    /// Verify the controller's TLS certificate
    #[arg(long, global = true)]
    verify: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Build Ansible module documentation for a template
    Build {
        /// Name of the template to fetch from the controller
        #[arg(long, conflicts_with = "template_file")]
        template: Option<String>,
        /// Read the template from a JSON file instead of the controller
        #[arg(long)]
        template_file: Option<PathBuf>,
        /// Read the all-templates listing from a JSON file instead of the controller
        #[arg(long)]
        templates_file: Option<PathBuf>,
        /// YAML or TOML manifest holding the documentation properties
        #[arg(long)]
        manifest: Option<PathBuf>,
        /// Module name, e.g. dcnm_fabric
        #[arg(long)]
        module_name: Option<String>,
        /// Module author
        #[arg(long)]
        author: Option<String>,
        /// Supported state; repeat for several
        #[arg(long = "state")]
        states: Vec<String>,
        /// Default state
        #[arg(long)]
        default_state: Option<String>,
        /// Module description line; repeat for several
        #[arg(long = "description")]
        description: Vec<String>,
        /// Suboption style
        #[arg(long, value_enum)]
        style: Option<DocStyle>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },
    /// Fetch a template from the controller and save it as JSON
    Save {
        /// Name of the template, e.g. Easy_Fabric
        #[arg(long)]
        template: String,
        /// File name; defaults to <template>.json
        #[arg(long)]
        filename: Option<String>,
        /// Directory to write into
        #[arg(long)]
        filepath: PathBuf,
    },
    /// Print a template file as the controller returned it
    PrintRaw {
        /// Template JSON file
        #[arg(long)]
        file: PathBuf,
        /// Keep the content and newContent keys
        #[arg(long)]
        keep_content: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },
    /// Print the visibility rules of a template's parameters
    Ruleset {
        /// Template JSON file
        #[arg(long)]
        template_file: PathBuf,
        #[arg(long, value_enum, default_value_t = DocStyle::Fabric)]
        style: DocStyle,
    },
}

/// Log in to the controller named by the environment
async fn connect(cli: &Cli) -> anyhow::Result<NdfcClient> {
    let mut config = Config::from_env()?;
    config.request_timeout = cli.timeout;
    config.request_verify = cli.verify;
    let mut client = NdfcClient::new(config)?;
    client
        .login()
        .await
        .context("Failed to log in to the controller")?;
    Ok(client)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; stdout carries the documents
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    match &cli.command {
        Commands::Build {
            template,
            template_file,
            templates_file,
            manifest,
            module_name,
            author,
            states,
            default_state,
            description,
            style,
            format,
        } => {
            let mut properties = match manifest {
                Some(path) => DocManifest::from_file(path)
                    .await
                    .with_context(|| format!("Failed to load manifest {}", path.display()))?,
                None => DocManifest::default(),
            };
            // Flags override the manifest; anything still unset fails at commit
            if module_name.is_some() {
                properties.module_name = module_name.clone();
            }
            if author.is_some() {
                properties.module_author = author.clone();
            }
            if !states.is_empty() {
                properties.module_states = Some(states.clone());
            }
            if default_state.is_some() {
                properties.module_default_state = default_state.clone();
            }
            if !description.is_empty() {
                properties.description = description.clone();
            }
            if let Some(value) = style {
                properties.style = *value;
            }
            let template_name = template.clone().or_else(|| properties.template.clone());
            if template_file.is_none() && template_name.is_none() {
                anyhow::bail!("Provide --template, --template-file, or a manifest template");
            }

            let needs_controller = template_file.is_none() || templates_file.is_none();
            let client = if needs_controller {
                Some(connect(&cli).await?)
            } else {
                None
            };

            let ndfc_template = match (template_file, template_name, &client) {
                (Some(path), _, _) => NdfcTemplate::from_file(path)
                    .await
                    .with_context(|| format!("Failed to load template {}", path.display()))?,
                (None, Some(name), Some(client)) => {
                    NdfcTemplate::from_value(client.fetch_template(&name).await?)
                }
                _ => anyhow::bail!("No template source"),
            };
            let index = match (templates_file, &client) {
                (Some(path), _) => TemplateIndex::from_file(path)
                    .await
                    .with_context(|| format!("Failed to load templates {}", path.display()))?,
                (None, Some(client)) => {
                    TemplateIndex::from_value(client.fetch_all_templates().await?)?
                }
                (None, None) => anyhow::bail!("No template index source"),
            };

            let mut builder = DocBuilder::from_manifest(&properties)?;
            builder.set_template(ndfc_template);
            builder.set_template_index(index);
            builder.commit()?;
            let output = match format {
                OutputFormat::Yaml => builder.documentation_yaml()?,
                OutputFormat::Json => builder.documentation_json()?,
            };
            println!("{output}");
        }
        Commands::Save {
            template,
            filename,
            filepath,
        } => {
            let client = connect(&cli).await?;
            let body = client.fetch_template(template).await?;

            let mut save = TemplateSave::new();
            save.set_filepath(filepath);
            save.set_filename(
                filename
                    .clone()
                    .unwrap_or_else(|| format!("{template}.json")),
            );
            let written = save.write_template(&body).await?;
            tracing::info!("Saved template {} to {}", template, written.display());
        }
        Commands::PrintRaw {
            file,
            keep_content,
            format,
        } => {
            let mut raw = RawTemplate::from_file(file)
                .await
                .with_context(|| format!("Failed to load template {}", file.display()))?;
            if !keep_content {
                raw.strip_content();
            }
            let output = match format {
                OutputFormat::Yaml => raw.to_yaml()?,
                OutputFormat::Json => raw.to_json()?,
            };
            println!("{output}");
        }
        Commands::Ruleset {
            template_file,
            style,
        } => {
            let ndfc_template = NdfcTemplate::from_file(template_file)
                .await
                .with_context(|| format!("Failed to load template {}", template_file.display()))?;
            let ruleset = build_ruleset(&ndfc_template, *style)?;
            tracing::info!("Built {} rules", ruleset.len());
            println!("{}", to_json_pretty(&ruleset)?);
        }
    }
    Ok(())
}
