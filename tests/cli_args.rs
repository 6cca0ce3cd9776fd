use clap::Parser;
use ecg2af::cli::{Cli, Commands, HeadsCommand};

#[test]
fn run_defaults_write_nothing() {
    let cli = Cli::parse_from([
        "ecg2af",
        "run",
        "--input",
        "ecg.hd5",
        "--predictions",
        "preds.json",
        "--out",
        "out",
    ]);
    match cli.command {
        Commands::Run(args) => {
            assert!(!args.json);
            assert!(!args.tsv);
            assert!(args.heads.is_none());
            assert!(args.leads.is_none());
        }
        _ => panic!("expected run command"),
    }
}

#[test]
fn run_requires_predictions() {
    let res = Cli::try_parse_from(["ecg2af", "run", "--input", "ecg.hd5", "--out", "out"]);
    assert!(res.is_err());
}

#[test]
fn heads_show_accepts_overlay() {
    let cli = Cli::parse_from(["ecg2af", "heads", "show", "--heads", "extra.tsv"]);
    match cli.command {
        Commands::Heads(args) => match args.command {
            HeadsCommand::Show(show) => {
                assert_eq!(show.heads.unwrap().to_str(), Some("extra.tsv"))
            }
        },
        _ => panic!("expected heads command"),
    }
}
