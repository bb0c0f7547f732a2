use clap::Parser;
use colored::Colorize;
use pwcli::client::http::HttpClient;
use pwcli::commands::bundle::{self, BundleFilters};
use pwcli::commands::patch::{self, PatchChanges, PatchFilters};
use pwcli::commands::series::{self, SeriesFilters};
use pwcli::config::{Config, Overrides};
use pwcli::error::Result;
use pwcli::git::GitAm;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod args;
mod render;

use args::{BundleCommand, Cli, Commands, PatchCommand, SeriesCommand};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli) {
        eprintln!("{} {}", "error:".red().bold(), err);
        std::process::exit(err.exit_code());
    }
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "pwcli=debug" } else { "pwcli=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        command,
        server,
        project,
        token,
        username,
        password,
        debug: _,
    } = cli;
    let overrides = Overrides {
        server,
        project,
        token,
        username,
        password,
    };
    let config = Config::load(&overrides)?;
    let client = HttpClient::new(&config)?;

    match command {
        Commands::Series(command) => handle_series(&client, command),
        Commands::Patch(command) => handle_patch(&client, command),
        Commands::Bundle(command) => handle_bundle(&client, command),
    }
}

fn handle_series(client: &HttpClient, command: SeriesCommand) -> Result<()> {
    match command {
        SeriesCommand::List(args) => {
            let filters = SeriesFilters {
                submitter: args.submitter,
                query: args.query,
                page: args.page,
                per_page: args.limit,
                order: args.sort,
            };
            let series = series::list(client, &filters)?;
            println!("{}", render::series_table(&series));
            Ok(())
        }
        SeriesCommand::Show { id } => {
            let series = series::show(client, id)?;
            println!("{}", render::series_detail(&series));
            Ok(())
        }
        SeriesCommand::Download { id, output } => {
            let path = series::download(client, id, output.as_deref())?;
            println!("{}", path.display());
            Ok(())
        }
        SeriesCommand::Apply { id, args } => series::apply(client, &GitAm, id, &args),
    }
}

fn handle_patch(client: &HttpClient, command: PatchCommand) -> Result<()> {
    match command {
        PatchCommand::List(args) => {
            let filters = PatchFilters {
                states: args.state,
                submitter: args.submitter,
                delegate: args.delegate,
                hash: args.hash,
                archived: args.archived.then_some(true),
                query: args.query,
                page: args.page,
                per_page: args.limit,
                order: args.sort,
            };
            let patches = patch::list(client, &filters)?;
            println!("{}", render::patch_table(&patches));
            Ok(())
        }
        PatchCommand::Show { id } => {
            let patch = patch::show(client, id)?;
            println!("{}", render::patch_detail(&patch));
            Ok(())
        }
        PatchCommand::Download { id, output } => {
            let path = patch::download(client, id, output.as_deref())?;
            println!("{}", path.display());
            Ok(())
        }
        PatchCommand::Apply { id, args } => patch::apply(client, &GitAm, id, &args),
        PatchCommand::Update(args) => {
            let changes = PatchChanges {
                state: args.state,
                delegate: args.delegate,
                archived: args.archived,
            };
            let patch = patch::update(client, args.id, &changes)?;
            println!("{}", render::patch_detail(&patch));
            Ok(())
        }
    }
}

fn handle_bundle(client: &HttpClient, command: BundleCommand) -> Result<()> {
    match command {
        BundleCommand::List(args) => {
            let filters = BundleFilters {
                owner: args.owner,
                query: args.query,
                page: args.page,
                per_page: args.limit,
                order: args.sort,
            };
            let bundles = bundle::list(client, &filters)?;
            println!("{}", render::bundle_table(&bundles));
            Ok(())
        }
        BundleCommand::Show { id } => {
            let bundle = bundle::show(client, id)?;
            println!("{}", render::bundle_detail(&bundle));
            Ok(())
        }
        BundleCommand::Download { id, output } => {
            let path = bundle::download(client, id, output.as_deref())?;
            println!("{}", path.display());
            Ok(())
        }
        BundleCommand::Apply { id, args } => bundle::apply(client, &GitAm, id, &args),
    }
}
