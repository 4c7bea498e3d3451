// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::Level;

use chorale::harmony::functional;
use chorale::voicing::VoiceType;
use chorale::{
    Cadence, Contour, EngineConfig, Key, Melody, MelodyGenerator, ModulationMethod, Progression,
    VoiceLeader,
};

fn print_usage() {
    println!("CHORALE - Tonal Composition Engine");
    println!();
    println!("Usage: chorale [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --key <KEY>             Key, e.g. \"C major\" or \"F# minor\" (default C major)");
    println!("  --template <NAME>       Progression template (default basic)");
    println!("  --roman <NUMERALS>      Progression in Roman numerals, e.g. I-IV-V-I");
    println!("  --functional <N>        Generate N chords by harmonic function");
    println!("  --cadence <NAME>        Cadence for --functional (default authentic)");
    println!("  --modulate <KEY>        Append a pivot modulation to KEY");
    println!("  --seed <N>              Random seed (default 42)");
    println!("  --length <N>            Melody length in events (default 8)");
    println!("  --contour <NAME>        Melody contour (default arch)");
    println!("  --unity <0..1>          Motivic unity (default 0.5)");
    println!("  --period                Generate an antecedent/consequent period");
    println!("  --config <PATH>         Engine configuration (YAML or TOML)");
    println!("  --verbose, -v           Debug logging");
    println!("  --help                  Show this help message");
}

/// Parsed command line
struct Options {
    key: String,
    template: Option<String>,
    roman: Option<String>,
    functional: Option<usize>,
    cadence: String,
    modulate: Option<String>,
    seed: u64,
    length: usize,
    contour: String,
    unity: f64,
    period: bool,
    config: Option<PathBuf>,
    verbose: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            key: "C major".to_string(),
            template: None,
            roman: None,
            functional: None,
            cadence: "authentic".to_string(),
            modulate: None,
            seed: 42,
            length: 8,
            contour: "arch".to_string(),
            unity: 0.5,
            period: false,
            config: None,
            verbose: false,
        }
    }
}

fn value(args: &[String], i: usize, flag: &str) -> Result<String> {
    args.get(i + 1)
        .cloned()
        .ok_or_else(|| anyhow!("{} requires a value", flag))
}

fn parse_args(args: &[String]) -> Result<Option<Options>> {
    let mut options = Options::default();
    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--key" => options.key = value(args, i, flag)?,
            "--template" => options.template = Some(value(args, i, flag)?),
            "--roman" => options.roman = Some(value(args, i, flag)?),
            "--functional" => {
                let n = value(args, i, flag)?;
                options.functional = Some(
                    n.parse()
                        .map_err(|_| anyhow!("Invalid chord count: {}", n))?,
                );
            }
            "--cadence" => options.cadence = value(args, i, flag)?,
            "--modulate" => options.modulate = Some(value(args, i, flag)?),
            "--seed" => {
                let n = value(args, i, flag)?;
                options.seed = n.parse().map_err(|_| anyhow!("Invalid seed: {}", n))?;
            }
            "--length" => {
                let n = value(args, i, flag)?;
                options.length = n.parse().map_err(|_| anyhow!("Invalid length: {}", n))?;
            }
            "--contour" => options.contour = value(args, i, flag)?,
            "--unity" => {
                let n = value(args, i, flag)?;
                options.unity = n.parse().map_err(|_| anyhow!("Invalid unity: {}", n))?;
            }
            "--config" => options.config = Some(PathBuf::from(value(args, i, flag)?)),
            "--period" => {
                options.period = true;
                i += 1;
                continue;
            }
            "--verbose" | "-v" => {
                options.verbose = true;
                i += 1;
                continue;
            }
            "--help" | "-h" => return Ok(None),
            other => bail!("Unknown option: {}", other),
        }
        i += 2;
    }
    Ok(Some(options))
}

fn setup_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow!("failed to initialise tracing: {}", err))
}

fn build_progression(options: &Options, key: &Key, rng: &mut StdRng) -> Result<Progression> {
    let progression = if let Some(roman) = &options.roman {
        Progression::from_roman(roman, key)?
    } else if let Some(count) = options.functional {
        let cadence = Cadence::from_str(&options.cadence)?;
        functional(key, count, cadence, rng)?
    } else {
        let template = options.template.as_deref().unwrap_or("basic");
        Progression::from_template(template, key)?
    };

    match &options.modulate {
        Some(name) => {
            let target = Key::from_name(name)?;
            Ok(progression.modulate(&target, ModulationMethod::Pivot))
        }
        None => Ok(progression),
    }
}

fn print_melody(melody: &Melody) {
    let notes: Vec<String> = melody
        .events()
        .iter()
        .map(|event| match event.pitch() {
            Some(pitch) => format!("{}({})", pitch, event.duration()),
            None => format!("rest({})", event.duration()),
        })
        .collect();
    println!("Melody ({}, {}):", melody.contour(), melody.key());
    println!("  {}", notes.join(" "));
    for span in melody.phrases() {
        println!(
            "  {} phrase at {} ({} events): {} cadence",
            span.role, span.start, span.len, span.cadence
        );
    }
}

fn run(options: &Options) -> Result<()> {
    let config = match &options.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let key = Key::from_name(&options.key).context("Invalid --key")?;
    let contour = Contour::from_str(&options.contour)?;
    let mut rng = StdRng::seed_from_u64(options.seed);

    let progression = build_progression(options, &key, &mut rng)?;
    println!("Progression in {}: {}", key, progression.to_roman());
    println!("Chords: {}", progression);
    println!("Cadence: {}", progression.cadence());
    for modulation in progression.modulations() {
        println!(
            "Modulation at chord {}: {} -> {} ({})",
            modulation.index, modulation.from, modulation.to, modulation.method
        );
    }
    println!();

    let leader = VoiceLeader::new(config.voice_leading.clone());
    let voiced = match leader.voice_lead_progression(&progression, &mut rng) {
        Ok(voiced) => voiced,
        Err(failure) => {
            eprintln!("Warning: {}", failure);
            failure.partial
        }
    };
    println!("SATB (total motion {} semitones):", voiced.total_motion);
    for voice in VoiceType::ALL {
        let line: Vec<String> = voiced.line(voice).iter().map(|p| p.to_string()).collect();
        println!("  {:<8} {}", voice.name(), line.join(" "));
    }
    if voiced.violations.is_empty() {
        println!("  no rule violations");
    }
    for v in &voiced.violations {
        println!("  chord {}: {}", v.index, v.violation);
    }
    println!();

    let generator = MelodyGenerator::new(config.melody.clone());
    let melody = if options.period {
        let period =
            generator.generate_period(&progression, contour, options.unity, options.length, &mut rng);
        Melody::from_period(&period, key.clone(), contour)
    } else {
        generator.generate_melody(&progression, contour, options.unity, options.length, &mut rng)
    };
    print_melody(&melody);
    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let options = match parse_args(&args) {
        Ok(Some(options)) => options,
        Ok(None) => {
            print_usage();
            return Ok(());
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            print_usage();
            std::process::exit(1);
        }
    };

    setup_tracing(options.verbose)?;
    run(&options)
}
