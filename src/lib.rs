use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

pub mod core;
pub mod error;
pub mod preview;
pub mod util;

pub use crate::core::{
    generate, Color, Galaxy, GenerationParameters, ParticleField, ParticleFieldGenerator,
    RandomSource, SequenceSource,
};
pub use error::{ConfigError, GenerationError, PreviewError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayTarget {
    Terminal,
    Image,
    Off,
}

/// Everything the binary needs for one run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub params: GenerationParameters,
    /// Fixed seed for reproducible output, `None` draws from the thread rng.
    pub seed: Option<u64>,
    pub parallel: bool,
    pub target: DisplayTarget,
    pub output: PathBuf,
    pub log_file: Option<PathBuf>,
    pub verbose: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            params: GenerationParameters::default(),
            seed: None,
            parallel: false,
            target: DisplayTarget::Terminal,
            output: PathBuf::from("galaxy.png"),
            log_file: None,
            verbose: false,
        }
    }
}

fn param_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).value_name("VALUE").help(help).required(false)
}

pub fn create_clap_command() -> Command {
    Command::new("galaxy_field")
        .about("Procedural spiral galaxy point-cloud generator")
        .version("0.1")
        .subcommand(
            Command::new("generate")
                .about("Generate a galaxy and preview it in the terminal or as a PNG")
                .arg(param_arg("count", "Number of particles").value_parser(value_parser!(usize)))
                .arg(
                    param_arg("size", "Point size hint in world units")
                        .value_parser(value_parser!(f32)),
                )
                .arg(param_arg("radius", "Galaxy radius").value_parser(value_parser!(f32)))
                .arg(
                    param_arg("branches", "Number of spiral arms")
                        .value_parser(value_parser!(u32)),
                )
                .arg(
                    param_arg("spin", "Radians of twist per unit radius")
                        .value_parser(value_parser!(f32))
                        .allow_negative_numbers(true),
                )
                .arg(
                    param_arg("randomness", "Scale of the positional jitter")
                        .value_parser(value_parser!(f32)),
                )
                .arg(
                    param_arg("randomness-power", "Exponent pulling jitter toward the arms")
                        .value_parser(value_parser!(f32)),
                )
                .arg(param_arg("inside-color", "Core color as #RRGGBB").value_name("HEX"))
                .arg(param_arg("outside-color", "Rim color as #RRGGBB").value_name("HEX"))
                .arg(
                    Arg::new("seed")
                        .short('s')
                        .long("seed")
                        .value_name("SEED")
                        .help("Seed for reproducible output")
                        .value_parser(value_parser!(u64)),
                )
                .arg(
                    Arg::new("parallel")
                        .short('p')
                        .long("parallel")
                        .help("Generate on all cores")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("mode")
                        .short('m')
                        .long("mode")
                        .value_name("MODE")
                        .help("Preview target ('terminal', 'image', 'none', or 't', 'i', 'n')")
                        .required(false)
                        .value_parser(["terminal", "image", "none", "t", "i", "n"]),
                )
                .arg(
                    Arg::new("out")
                        .short('o')
                        .long("out")
                        .value_name("FILE")
                        .help("PNG path used by image mode")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("log-file")
                        .long("log-file")
                        .value_name("FILE")
                        .help("Write the log to a file instead of stderr")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("verbose")
                        .short('v')
                        .long("verbose")
                        .help("Enable debug logging")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn parse_color(
    matches: &ArgMatches,
    flag: &'static str,
    fallback: Color,
) -> Result<Color, ConfigError> {
    match matches.get_one::<String>(flag) {
        Some(hex) => {
            Color::from_hex(hex).map_err(|message| ConfigError::InvalidColor { flag, message })
        }
        None => Ok(fallback),
    }
}

pub fn handle_clap_matches(matches: &ArgMatches) -> Result<AppConfig, ConfigError> {
    let mut config = AppConfig::default();

    if let Some(("generate", sub)) = matches.subcommand() {
        let defaults = GenerationParameters::default();
        config.params = GenerationParameters {
            count: sub.get_one::<usize>("count").copied().unwrap_or(defaults.count),
            size: sub.get_one::<f32>("size").copied().unwrap_or(defaults.size),
            radius: sub.get_one::<f32>("radius").copied().unwrap_or(defaults.radius),
            branches: sub.get_one::<u32>("branches").copied().unwrap_or(defaults.branches),
            spin: sub.get_one::<f32>("spin").copied().unwrap_or(defaults.spin),
            randomness: sub
                .get_one::<f32>("randomness")
                .copied()
                .unwrap_or(defaults.randomness),
            randomness_power: sub
                .get_one::<f32>("randomness-power")
                .copied()
                .unwrap_or(defaults.randomness_power),
            inside_color: parse_color(sub, "inside-color", defaults.inside_color)?,
            outside_color: parse_color(sub, "outside-color", defaults.outside_color)?,
        };
        config.params.validate()?;

        config.seed = sub.get_one::<u64>("seed").copied();
        config.parallel = sub.get_flag("parallel");
        config.verbose = sub.get_flag("verbose");
        config.log_file = sub.get_one::<PathBuf>("log-file").cloned();
        if let Some(out) = sub.get_one::<PathBuf>("out") {
            config.output = out.clone();
        }

        config.target = match sub.get_one::<String>("mode").map(|s| s.as_str()) {
            Some("image" | "i") => DisplayTarget::Image,
            Some("none" | "n") => DisplayTarget::Off,
            // an explicit --out without a mode means the user wants the image
            None if sub.contains_id("out") => DisplayTarget::Image,
            _ => DisplayTarget::Terminal,
        };
    }

    // Default behavior when no subcommand is provided
    Ok(config)
}
