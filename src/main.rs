use clap::Parser;
use tracing_subscriber::EnvFilter;

use leadcmd::cli::{
    run_add, run_export, run_filter, run_list, run_menu, run_segment, run_segments, run_show,
    run_stats, run_status, run_view, run_views, Cli, Commands,
};
use leadcmd::config::{Config, Overrides};
use leadcmd::store::{FileLeadSource, LeadSource, MockLeadSource};
use leadcmd::{LeadStore, Session};

fn init_tracing(verbose: bool) {
    let default = if verbose { "leadcmd=debug" } else { "leadcmd=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(Overrides {
        data_path: cli.data.clone(),
        latency_ms: cli.latency_ms,
        export_dir: cli.export_dir.clone(),
    });
    tracing::debug!(?config, "configuration resolved");

    let source: Box<dyn LeadSource> = match config.data_path.clone() {
        Some(path) => Box::new(FileLeadSource::new(path, config.latency)),
        None => Box::new(MockLeadSource::new(config.latency)),
    };
    eprintln!("Loading leads from {}...", source.describe());
    let workspace = source.fetch().await?;
    let mut session = Session::new(LeadStore::from_workspace(workspace)?, config.user.clone());

    match cli.command {
        None => {
            // No subcommand provided - show interactive menu
            run_menu(&mut session, &config.export_dir)?;
        }
        Some(Commands::List(args)) => {
            run_list(&mut session, args.search, args.sort, args.order)?;
        }
        Some(Commands::Filter(args)) => {
            run_filter(&mut session, &args.conditions, args.match_mode.as_deref())?;
        }
        Some(Commands::Segments) => {
            run_segments(&session)?;
        }
        Some(Commands::Segment(args)) => {
            run_segment(&mut session, &args.id)?;
        }
        Some(Commands::Views) => {
            run_views(&session)?;
        }
        Some(Commands::View(args)) => {
            run_view(&mut session, &args.id)?;
        }
        Some(Commands::Show(args)) => {
            run_show(&session, &args.identifier)?;
        }
        Some(Commands::Add(args)) => {
            run_add(&mut session, args.into())?;
        }
        Some(Commands::Status(args)) => {
            let (ids, status) = args.split();
            run_status(&mut session, ids, status)?;
        }
        Some(Commands::Export(args)) => {
            let dir = args.out.as_deref().unwrap_or(&config.export_dir);
            run_export(&mut session, &args.ids, args.all, dir)?;
        }
        Some(Commands::Stats) => {
            run_stats(&session)?;
        }
    }

    Ok(())
}
