extern crate pretty_env_logger;

#[macro_use]
extern crate log;

use clap::Parser;
use kmstep::{
    ArgParser, ClusteringEngine, JsonDataset, JsonRenderer, OutputFormat, RenderSink, Session,
    TextRenderer,
};
use rand::rngs::StdRng;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

fn run<S: RenderSink>(
    args: &ArgParser,
    engine: ClusteringEngine<StdRng>,
    sink: S,
) -> kmstep::Result<()> {
    let mut session = Session::new(engine, sink, args.engine.canvas());

    let input: Box<dyn BufRead> = match &args.io.script {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => {
            info!("reading actions from stdin");
            Box::new(io::stdin().lock())
        }
    };

    let stats = session.run(input)?;
    info!("{:#?}", stats);
    Ok(())
}

fn main() {
    let args = ArgParser::parse();
    let level = if args.io.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    pretty_env_logger::formatted_timed_builder()
        .filter_level(level)
        .init();

    info!("starting");
    info!("params: {:#?}", args);
    if !args.validate() {
        error!("please fix arguments");
        std::process::exit(1);
    }

    let mut engine = match args.engine.seed {
        Some(seed) => ClusteringEngine::seeded(seed),
        None => ClusteringEngine::from_entropy(),
    };

    let source = JsonDataset::new(&args.io.dataset, args.engine.canvas());
    if let Err(e) = engine.load_source(Box::new(source)) {
        error!("unable to load dataset: {}", e);
        std::process::exit(1);
    }
    for _ in 1..args.engine.centroids {
        if let Err(e) = engine.add_centroid() {
            error!("unable to add centroid: {}", e);
            std::process::exit(1);
        }
    }

    let writer: Box<dyn Write> = match &args.io.out {
        Some(path) => match File::create(path) {
            Ok(file) => Box::new(BufWriter::new(file)),
            Err(e) => {
                error!("unable to create {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Box::new(BufWriter::new(io::stdout())),
    };

    let result = match args.io.format {
        OutputFormat::Text => run(
            &args,
            engine,
            TextRenderer::new(writer, args.engine.show_points),
        ),
        OutputFormat::Json => run(&args, engine, JsonRenderer::new(writer)),
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
    info!("finished");
}
