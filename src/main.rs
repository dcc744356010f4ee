use log::{error, info};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(
    name = "opendrive2sumo",
    about = "Compile an OpenDRIVE map into a SUMO plain-XML network"
)]
struct Args {
    /// The OpenDRIVE input file (.xodr)
    #[structopt(parse(from_os_str))]
    input: PathBuf,
    /// Output prefix for the artifacts; defaults to the input file stem
    #[structopt(short = "o", long = "output")]
    output: Option<String>,
    /// Only write the plain XML files, do not run the network assembler
    #[structopt(long = "no-assemble")]
    no_assemble: bool,
    /// Verbose output
    #[structopt(short = "v", long = "verbose")]
    verbose: bool,
}

fn main() {
    let args = Args::from_args();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(if args.verbose {
        "debug"
    } else {
        "info"
    }))
    .init();

    if let Err(error) = run(&args) {
        error!("{error}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> opendrive2sumo::compiler::Result<()> {
    let prefix = args.output.clone().unwrap_or_else(|| {
        args.input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "network".to_string())
    });

    let files = opendrive2sumo::compiler::compile_to_plain(&args.input, &prefix)?;
    info!(
        "wrote {}, {}, {}",
        files.nodes.display(),
        files.edges.display(),
        files.connections.display()
    );

    if !args.no_assemble {
        opendrive2sumo::assemble::run_netconvert(&prefix)?;
    }
    Ok(())
}
