use std::error::Error;
use std::fs::File;
use std::io::{self, stdout};
use std::time::Instant;

use galaxy_field::{
    create_clap_command, handle_clap_matches,
    preview::{render_preview, PreviewOptions},
    util::format_field_summary,
    AppConfig, DisplayTarget, Galaxy,
};
use log::{error, info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode, WriteLogger};

const IMAGE_WIDTH: usize = 1280;
const IMAGE_HEIGHT: usize = 720;

fn init_logging(config: &AppConfig) -> Result<(), Box<dyn Error>> {
    let level = if config.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    match &config.log_file {
        Some(path) => WriteLogger::init(level, Config::default(), File::create(path)?)?,
        None => TermLogger::init(
            level,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        )?,
    }
    Ok(())
}

fn run(config: &AppConfig) -> Result<(), Box<dyn Error>> {
    let params = config.params;
    let mut galaxy = Galaxy::new(params)?;
    let start = Instant::now();

    let field = match (config.seed, config.parallel) {
        (Some(seed), true) => galaxy.regenerate_parallel(seed),
        (None, true) => galaxy.regenerate_parallel(rand::random()),
        (Some(seed), false) => galaxy.regenerate(&mut StdRng::seed_from_u64(seed)),
        (None, false) => galaxy.regenerate(&mut rand::thread_rng()),
    };
    info!("{} in {:?}", format_field_summary(field), start.elapsed());

    match config.target {
        DisplayTarget::Off => {}
        DisplayTarget::Image => {
            let options = PreviewOptions::image(IMAGE_WIDTH, IMAGE_HEIGHT);
            let buffer = render_preview(field, params.radius, params.size, &options);
            buffer.save_png(&config.output)?;
            info!("wrote preview to {}", config.output.display());
        }
        DisplayTarget::Terminal => {
            let (columns, rows) = crossterm::terminal::size().unwrap_or((80, 24));
            // leave the last row for the shell prompt
            let rows = rows.saturating_sub(1).max(1);
            let options = PreviewOptions::terminal(columns as usize, rows as usize);
            let buffer = render_preview(field, params.radius, params.size, &options);
            buffer.present(&mut stdout())?;
        }
    }
    Ok(())
}

fn main() -> io::Result<()> {
    let matches = create_clap_command().get_matches();
    let config = match handle_clap_matches(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = init_logging(&config) {
        eprintln!("Failed to initialise logging: {}", e);
    }

    if let Err(e) = run(&config) {
        error!("{}", e);
        return Err(io::Error::new(io::ErrorKind::Other, e.to_string()));
    }
    Ok(())
}
