use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use navstars_config::NavStarsConfig;
use navstars_core::solar::SolarModel;
use navstars_core::{Body, ObserverLocation};
use navstars_frames::{HemisphereAxis, format_ddm};
use navstars_search::{
    DailyTwilight, HourAngleSolverConfig, PredictionColumn, SolarSnapshot, TwilightResult,
    TwilightThreshold, build_prediction_table, compute_daily_twilight, compute_threshold,
    solve_hour_angle, sort_rows, star_name,
};
use navstars_time::{
    CalendarDate, format_duration_minutes, format_event, format_utc_clock, wrap_hours,
};

#[derive(Parser)]
#[command(name = "navstars", about = "Twilight times and navigational star predictions")]
struct Cli {
    /// Log debug output (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Civil, nautical and astronomical twilight, sunrise, sunset and transit
    Twilight {
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Latitude in degrees, north positive
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        /// Longitude in degrees, east positive
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Solar declination in degrees (skips the solar model)
        #[arg(long, allow_negative_numbers = true, requires = "eot")]
        dec: Option<f64>,
        /// Equation of time in minutes (skips the solar model)
        #[arg(long, allow_negative_numbers = true, requires = "dec")]
        eot: Option<f64>,
    },
    /// Prediction table at nautical twilight
    Predict {
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Sort column: number, name, azimuth, altitude, magnitude, declination
        #[arg(long, default_value = "number")]
        sort: String,
        /// Sort descending
        #[arg(long)]
        desc: bool,
    },
    /// Iterate the Moon's hour angle at a target altitude
    SolveMoon {
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Target altitude in degrees
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        alt: f64,
    },
    /// Format a fractional UTC hour as HH:MM
    Clock {
        #[arg(allow_negative_numbers = true)]
        hours: f64,
    },
    /// Julian Date to calendar date and weekday
    Calendar { jd: f64 },
    /// List the configured navigational stars
    Stars {
        /// TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn init_logger(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    let _ = builder.try_init();
}

fn require_date(s: &str) -> CalendarDate {
    s.parse().unwrap_or_else(|e| {
        eprintln!("Invalid date '{s}': {e}");
        std::process::exit(1);
    })
}

fn require_location(lat: f64, lon: f64) -> ObserverLocation {
    let loc = ObserverLocation::new(lat, lon);
    if !loc.is_valid() {
        eprintln!("Invalid location: lat {lat}, lon {lon}");
        std::process::exit(1);
    }
    loc
}

fn load_config(path: Option<&Path>) -> NavStarsConfig {
    match path {
        Some(p) => NavStarsConfig::from_file(p).unwrap_or_else(|e| {
            eprintln!("Failed to load config {}: {e}", p.display());
            std::process::exit(1);
        }),
        None => NavStarsConfig::default(),
    }
}

fn parse_column(s: &str) -> PredictionColumn {
    match s.to_ascii_lowercase().as_str() {
        "number" => PredictionColumn::Number,
        "name" => PredictionColumn::Name,
        "azimuth" => PredictionColumn::Azimuth,
        "altitude" => PredictionColumn::Altitude,
        "magnitude" => PredictionColumn::Magnitude,
        "declination" => PredictionColumn::Declination,
        _ => {
            eprintln!("Invalid sort column: {s}");
            std::process::exit(1);
        }
    }
}

fn print_location(loc: &ObserverLocation) {
    println!(
        "Location: {}  {}",
        format_ddm(loc.latitude_deg, HemisphereAxis::NorthSouth),
        format_ddm(loc.longitude_deg, HemisphereAxis::EastWest)
    );
}

fn print_band(name: &str, r: &TwilightResult) {
    println!(
        "{name:<14} begin {:<10} end {:<10} duration {}",
        format_event(r.morning_hours),
        format_event(r.evening_hours),
        format_duration_minutes(r.duration_minutes)
    );
}

fn print_daily(day: &DailyTwilight) {
    println!("Date: {}", day.date);
    println!(
        "Sun declination {}, equation of time {:.2} min",
        format_ddm(day.solar.declination_rad.to_degrees(), HemisphereAxis::NorthSouth),
        day.solar.equation_of_time_min
    );
    for t in TwilightThreshold::ALL {
        print_band(t.name(), day.band(t));
    }
    println!(
        "{:<14} rise  {:<10} set {:<10} transit {}",
        "sun",
        format_event(day.sun.morning_hours),
        format_event(day.sun.evening_hours),
        format_utc_clock(day.transit_hours)
    );
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Commands::Twilight {
            date,
            lat,
            lon,
            dec,
            eot,
        } => {
            let date = require_date(&date);
            let loc = require_location(lat, lon);
            print_location(&loc);
            match (dec, eot) {
                (Some(dec), Some(eot)) => {
                    let solar = SolarSnapshot {
                        epoch_jde: date.jd_noon(),
                        declination_rad: dec.to_radians(),
                        equation_of_time_min: eot,
                    };
                    println!("Date: {date}");
                    for t in TwilightThreshold::ALL {
                        print_band(t.name(), &compute_threshold(t, &loc, &solar));
                    }
                    let transit = compute_threshold(TwilightThreshold::Civil, &loc, &solar);
                    println!("{:<14} {}", "transit", format_utc_clock(transit.transit_hours));
                }
                _ => {
                    let model = SolarModel::new(loc, date.jd_noon());
                    let day = compute_daily_twilight(&model, &loc).unwrap_or_else(|e| {
                        eprintln!("Twilight computation failed: {e}");
                        std::process::exit(1);
                    });
                    print_daily(&day);
                }
            }
        }

        Commands::Predict {
            date,
            lat,
            lon,
            config,
            sort,
            desc,
        } => {
            let date = require_date(&date);
            let loc = require_location(lat, lon);
            let column = parse_column(&sort);
            let cfg = load_config(config.as_deref());
            let stars = cfg.star_numbers().unwrap_or_else(|e| {
                eprintln!("{e}");
                std::process::exit(1);
            });

            let mut model = SolarModel::new(loc, date.jd_noon());
            let mut table =
                build_prediction_table(&mut model, &loc, &stars, &cfg.prediction_config())
                    .unwrap_or_else(|e| {
                        eprintln!("Prediction failed: {e}");
                        std::process::exit(1);
                    });
            sort_rows(&mut table.rows, column, desc);

            print_location(&loc);
            println!("Date: {date}");
            match table.twilight_hours {
                Some(h) => println!("Nautical twilight: {}", format_utc_clock(h)),
                None => println!("Nautical twilight: -- (evaluated at transit)"),
            }
            println!("Evaluation JD: {:.5}", table.evaluation_jd);
            println!(
                "{:>4}  {:<16} {:>8} {:>8} {:>6}  {}",
                "", "Body", "Az", "Alt", "Mag", "Dec"
            );
            for row in &table.rows {
                println!(
                    "{:>4}  {:<16} {:>8.1} {:>8.1} {:>6.2}  {}",
                    row.designator,
                    row.label,
                    row.azimuth_deg,
                    row.altitude_deg,
                    row.magnitude,
                    row.declination_text
                );
            }
            if !table.skipped.is_empty() {
                println!("Skipped {} bodies:", table.skipped.len());
                for s in &table.skipped {
                    println!("  {}: {}", s.body, s.error);
                }
            }
        }

        Commands::SolveMoon {
            date,
            lat,
            lon,
            alt,
        } => {
            let date = require_date(&date);
            let loc = require_location(lat, lon);
            let mut model = SolarModel::new(loc, date.jd_noon());
            let config = HourAngleSolverConfig::default();
            match solve_hour_angle(&mut model, Body::Moon, alt, &loc, &config) {
                Ok(s) => {
                    println!(
                        "LHA {:.6} rad ({:.3} deg) at JD {:.6}, {} iterations, {}",
                        s.lha_rad,
                        s.lha_rad.to_degrees(),
                        s.epoch_jd,
                        s.iterations,
                        if s.converged { "converged" } else { "not converged" }
                    );
                }
                Err(e) => {
                    eprintln!("Moon hour angle failed: {e}");
                    std::process::exit(1);
                }
            }
        }

        Commands::Clock { hours } => {
            println!("{}", format_utc_clock(wrap_hours(hours)));
        }

        Commands::Calendar { jd } => match CalendarDate::from_jd(jd) {
            Ok(d) => println!("{d}"),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        },

        Commands::Stars { config } => {
            let cfg = load_config(config.as_deref());
            let stars = cfg.star_numbers().unwrap_or_else(|e| {
                eprintln!("{e}");
                std::process::exit(1);
            });
            for (i, hip) in stars.iter().enumerate() {
                println!(
                    "({:>2})  HIP {:<7} {}",
                    i + 1,
                    hip,
                    star_name(*hip).unwrap_or("")
                );
            }
        }
    }
}
