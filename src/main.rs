use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use ecg2af::cli::{Cli, Commands, HeadsCommand, HeadsShowArgs};
use ecg2af::ctx::Ctx;
use ecg2af::heads::{self, HeadKind, HeadRegistry};
use ecg2af::io;
use ecg2af::pipeline::Pipeline;
use ecg2af::pipeline::stage0_scaffold::Stage0Scaffold;
use ecg2af::pipeline::stage1_heads::Stage1Heads;
use ecg2af::pipeline::stage2_extract::Stage2Extract;
use ecg2af::pipeline::stage3_inference::Stage3Inference;
use ecg2af::pipeline::stage4_decode::Stage4Decode;
use ecg2af::pipeline::stage5_output::Stage5Output;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            let mut ctx = Ctx::new(
                args.input,
                args.out,
                Some(args.predictions),
                args.json,
                args.tsv,
                env!("CARGO_PKG_VERSION"),
            );
            ctx.heads_path = args.heads;
            ctx.leads_path = args.leads;

            let pipeline = Pipeline::new(vec![
                Box::new(Stage0Scaffold::new()),
                Box::new(Stage1Heads::new()),
                Box::new(Stage2Extract::new()),
                Box::new(Stage3Inference::new()),
                Box::new(Stage4Decode::new()),
                Box::new(Stage5Output::new()),
            ]);
            pipeline.run(&mut ctx)?;

            print_summary(&ctx)?;
        }
        Commands::Extract(args) => {
            let mut ctx = Ctx::new(
                args.input,
                PathBuf::from("."),
                None,
                false,
                false,
                env!("CARGO_PKG_VERSION"),
            );
            ctx.leads_path = args.leads;

            let pipeline = Pipeline::new(vec![
                Box::new(Stage1Heads::new()),
                Box::new(Stage2Extract::new()),
            ]);
            pipeline.run(&mut ctx)?;

            print_extract_summary(&ctx);
        }
        Commands::Heads(args) => match args.command {
            HeadsCommand::Show(show) => handle_heads_show(show)?,
        },
    }

    Ok(())
}

fn print_summary(ctx: &Ctx) -> Result<()> {
    let summary = io::summary::format_summary(ctx)?;
    print!("{}", summary);
    print_warnings(ctx);
    Ok(())
}

fn print_extract_summary(ctx: &Ctx) {
    println!("ecg2af extract ok");
    if let Some(tensor) = &ctx.tensor {
        println!("samples: {}", tensor.samples());
        println!("leads: {}", tensor.leads());
        println!("raw_mean: {:.6}", tensor.raw_mean);
        println!("raw_std: {:.6}", tensor.raw_std);
    }
    print_warnings(ctx);
}

fn print_warnings(ctx: &Ctx) {
    if !ctx.warnings.is_empty() {
        println!("warnings:");
        for warning in &ctx.warnings {
            println!("- {}", warning);
        }
    }
}

fn handle_heads_show(args: HeadsShowArgs) -> Result<()> {
    let mut specs = heads::load_builtin_v1()?;
    if let Some(path) = args.heads {
        let user = heads::load_heads_tsv(&path)?;
        specs = heads::merge_specs(specs, user);
    }
    let registry = HeadRegistry::build(specs)?;
    print_heads(&registry);
    Ok(())
}

fn print_heads(registry: &HeadRegistry) {
    println!("heads (version {}):", heads::BUILTIN_VERSION);
    for spec in registry.iter() {
        let days = match spec.kind {
            HeadKind::SurvivalCurve { days_window } => days_window.to_string(),
            HeadKind::Categorical | HeadKind::Continuous => "-".to_string(),
        };
        println!(
            "{}\t{}\t{}\t{}\t{}",
            spec.name,
            spec.kind,
            spec.width,
            days,
            spec.output_name()
        );
    }
}
