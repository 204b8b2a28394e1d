use std::fmt::Display;
use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};
use clap::{Args, Parser, Subcommand};
use kundali_chart::{
    AyanamshaModel, BirthData, ChartPositions, FixedEphemeris, abhijit_for_day,
    ashtakavarga_for_chart, choghadiya_for_day, current_dasha, dasha_timeline, full_chart,
    jd_to_datetime, panchanga_for_chart, parse_datetime, positions, shadbala_for_chart, transits,
    yogas_for_chart,
};
use kundali_config::KundaliConfig;
use kundali_vedic_base::{
    ALL_GRAHAS, ALL_RASHIS, AbhijitMuhurta, Amsha, ChoghadiyaPeriod, DashaPeriod, YogaFinding,
    abhijit_position, all_amsha_positions, amsha_position, nakshatra_from_longitude,
    rashi_from_longitude,
};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kundali", about = "Vedic astrology chart CLI")]
struct Cli {
    /// TOML configuration file (falls back to $KUNDALI_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

/// Birth moment, place and the snapshot file that stands in for an ephemeris.
#[derive(Args)]
struct ChartArgs {
    /// JSON ephemeris snapshot file (one snapshot or an array)
    #[arg(long)]
    snapshot: PathBuf,
    /// Local birth datetime, RFC 3339 (1990-05-15T14:30:00+05:30)
    #[arg(long)]
    date: String,
    /// Latitude in degrees (north positive)
    #[arg(long, allow_negative_numbers = true)]
    lat: f64,
    /// Longitude in degrees (east positive)
    #[arg(long, allow_negative_numbers = true)]
    lon: f64,
    /// Ayanamsa model: lahiri, krishnamurti (kp), raman. Overrides config.
    #[arg(long)]
    ayanamsa: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rashi from sidereal longitude
    Rashi {
        /// Sidereal ecliptic longitude in degrees
        #[arg(allow_negative_numbers = true)]
        lon: f64,
    },
    /// Nakshatra and pada from sidereal longitude
    Nakshatra {
        /// Sidereal ecliptic longitude in degrees
        #[arg(allow_negative_numbers = true)]
        lon: f64,
    },
    /// Divisional (varga) position of a longitude
    Amsha {
        /// Sidereal ecliptic longitude in degrees
        #[arg(allow_negative_numbers = true)]
        lon: f64,
        /// Division code (D1..D60); all supported divisions when omitted
        #[arg(long)]
        division: Option<String>,
    },
    /// Vimshottari balance and Mahadasha/Antardasha timeline
    Dasha {
        #[command(flatten)]
        chart: ChartArgs,
    },
    /// Running Maha/Antar/Pratyantar dasha at an instant
    CurrentDasha {
        #[command(flatten)]
        chart: ChartArgs,
        /// Query datetime, RFC 3339
        #[arg(long)]
        at: String,
    },
    /// Graha and ascendant positions
    Positions {
        #[command(flatten)]
        chart: ChartArgs,
    },
    /// Birth chart summary: positions, Moon nakshatra, dasha, D9, yogas
    Chart {
        #[command(flatten)]
        chart: ChartArgs,
        /// Instant for the running dasha, RFC 3339
        #[arg(long)]
        at: Option<String>,
    },
    /// Six-fold strength of the seven grahas
    Shadbala {
        #[command(flatten)]
        chart: ChartArgs,
    },
    /// Bhinna and Sarva Ashtakavarga tables
    Ashtakavarga {
        #[command(flatten)]
        chart: ChartArgs,
    },
    /// Transits over the natal chart with Ashtakavarga scoring
    Transit {
        #[command(flatten)]
        chart: ChartArgs,
        /// Transit datetime, RFC 3339
        #[arg(long)]
        at: String,
    },
    /// Yogas present in the birth chart
    Yogas {
        #[command(flatten)]
        chart: ChartArgs,
    },
    /// Tithi, yoga, karana, vara and nakshatra at the chart moment
    Panchanga {
        #[command(flatten)]
        chart: ChartArgs,
        /// Sunrise, RFC 3339 (enables Rahu/Gulika Kaal)
        #[arg(long, requires = "sunset")]
        sunrise: Option<String>,
        /// Sunset, RFC 3339
        #[arg(long, requires = "sunrise")]
        sunset: Option<String>,
    },
    /// Effective configuration after defaults, file and environment
    Config,
    /// Daytime Choghadiya periods and Abhijit muhurta
    Choghadiya {
        /// Sunrise, RFC 3339
        #[arg(long)]
        sunrise: String,
        /// Sunset, RFC 3339
        #[arg(long)]
        sunset: String,
    },
}

fn or_exit<T, E: Display>(result: Result<T, E>) -> T {
    result.unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    })
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_dt(s: &str) -> DateTime<FixedOffset> {
    or_exit(parse_datetime(s))
}

fn load_chart(args: &ChartArgs, cfg: &KundaliConfig) -> (FixedEphemeris, BirthData) {
    let text = or_exit(
        std::fs::read_to_string(&args.snapshot)
            .map_err(|e| format!("{}: {e}", args.snapshot.display())),
    );
    let provider = or_exit(FixedEphemeris::from_json(&text));
    let model = match &args.ayanamsa {
        Some(name) => or_exit(AyanamshaModel::from_name(name)),
        None => cfg.ayanamsa,
    };
    let birth = or_exit(BirthData::new(parse_dt(&args.date), args.lat, args.lon, model));
    debug!(jd = birth.jd_ut(), model = model.name(), "birth data");
    (provider, birth)
}

/// JSON when requested, otherwise the text renderer.
fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T)) {
    if json {
        println!("{}", or_exit(serde_json::to_string_pretty(value)));
    } else {
        text(value);
    }
}

fn fmt_jd(jd: f64, offset: FixedOffset) -> String {
    match jd_to_datetime(jd, offset) {
        Ok(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => format!("JD {jd:.5}"),
    }
}

fn print_period(indent: &str, p: &DashaPeriod, offset: FixedOffset) {
    println!(
        "{indent}{:<8} {} .. {}  ({:.3} y)",
        p.ruler.name(),
        fmt_jd(p.start_jd, offset),
        fmt_jd(p.end_jd, offset),
        p.years
    );
}

fn print_positions(pos: &ChartPositions) {
    println!("Ayanamsa: {:.6} deg\n", pos.ayanamsa);
    println!(
        "{:<10} {:>10} {:<10} {:>8} {:<20} {:>4} {:>9}",
        "Body", "Longitude", "Rashi", "Deg", "Nakshatra", "Pada", "Speed"
    );
    for p in pos.iter() {
        println!(
            "{:<10} {:>10.4} {:<10} {:>8.4} {:<20} {:>4} {:>9.4}{}",
            p.name,
            p.longitude,
            p.rashi.name(),
            p.rashi_degree,
            p.nakshatra.name(),
            p.nakshatra_pada,
            p.speed,
            if p.is_retrograde { " R" } else { "" }
        );
    }
}

fn print_yogas(yogas: &[YogaFinding]) {
    if yogas.is_empty() {
        println!("No yogas present");
    }
    for y in yogas {
        let grahas: Vec<&str> = y.grahas.iter().map(|g| g.name()).collect();
        println!(
            "{} ({:?}, {:?}) - {} [houses {:?}]",
            y.name,
            y.category,
            y.strength,
            grahas.join(", "),
            y.houses
        );
        println!("    {}", y.effects);
    }
}

fn main() {
    let cli = Cli::parse();
    let cfg = or_exit(KundaliConfig::load(cli.config.as_deref()));
    init_tracing(&cfg.log_filter);
    debug!(?cfg, "configuration loaded");
    let options = cfg.to_options();
    let json = cli.json;

    match cli.command {
        Commands::Config => {
            emit(json, &cfg, |c| print!("{}", or_exit(c.to_toml())));
        }

        Commands::Rashi { lon } => {
            let info = rashi_from_longitude(lon);
            emit(json, &info, |info| {
                let dms = info.dms;
                println!(
                    "{} ({}) - {} deg {} min {:.1} sec ({:.4} deg in rashi)",
                    info.rashi.name(),
                    info.rashi.western_name(),
                    dms.degrees,
                    dms.minutes,
                    dms.seconds,
                    info.degrees_in_rashi
                );
            });
        }

        Commands::Nakshatra { lon } => {
            let info = nakshatra_from_longitude(lon);
            emit(json, &info, |info| {
                println!(
                    "{} (index {}) - Pada {} ({:.4} deg in nakshatra, {:.4} deg in pada)",
                    info.nakshatra.name(),
                    info.nakshatra_index,
                    info.pada,
                    info.degrees_in_nakshatra,
                    info.degrees_in_pada
                );
                println!(
                    "Ruler: {}  Deity: {}  Symbol: {}",
                    info.ruler.name(),
                    info.deity,
                    info.symbol
                );
                if let Some(deg) = abhijit_position(lon) {
                    println!("Within Abhijit: {deg:.4} deg");
                }
            });
        }

        Commands::Amsha { lon, division } => match division {
            Some(code) => {
                let amsha = or_exit(Amsha::from_code(&code));
                let pos = amsha_position(lon, amsha);
                emit(json, &pos, |p| {
                    println!(
                        "{} {}: {} {:.4} deg",
                        amsha.code(),
                        amsha.name(),
                        p.rashi.name(),
                        p.degree
                    );
                });
            }
            None => {
                let all = all_amsha_positions(lon);
                emit(json, &all, |all| {
                    for (amsha, p) in all {
                        println!(
                            "{:<4} {:<14} {:<10} {:>8.4}",
                            amsha.code(),
                            amsha.name(),
                            p.rashi.name(),
                            p.degree
                        );
                    }
                });
            }
        },

        Commands::Dasha { chart } => {
            let (provider, birth) = load_chart(&chart, &cfg);
            let tl = or_exit(dasha_timeline(&provider, &birth, &options));
            let offset = *birth.datetime.offset();
            emit(json, &tl, |tl| {
                println!(
                    "Moon in {} (pada {}); balance of {} dasha: {:.4} years\n",
                    tl.moon_nakshatra.nakshatra.name(),
                    tl.moon_nakshatra.pada,
                    tl.balance.ruler.name(),
                    tl.balance.remaining_years
                );
                for major in &tl.timeline {
                    print_period("", &major.period, offset);
                    for sub in &major.sub_periods {
                        print_period("    ", sub, offset);
                    }
                }
            });
        }

        Commands::CurrentDasha { chart, at } => {
            let (provider, birth) = load_chart(&chart, &cfg);
            let target = parse_dt(&at);
            let cur = or_exit(current_dasha(&provider, &birth, target, &options));
            let offset = *target.offset();
            emit(json, &cur, |cur| {
                print_period("Maha:    ", &cur.major, offset);
                print_period("Antar:   ", &cur.sub, offset);
                print_period("Pratyan: ", &cur.sub_sub, offset);
            });
        }

        Commands::Positions { chart } => {
            let (provider, birth) = load_chart(&chart, &cfg);
            let pos = or_exit(positions(&provider, &birth));
            emit(json, &pos, print_positions);
        }

        Commands::Chart { chart, at } => {
            let (provider, birth) = load_chart(&chart, &cfg);
            let at = at.as_deref().map(parse_dt);
            let fc = or_exit(full_chart(&provider, &birth, at, &options));
            let offset = *birth.datetime.offset();
            emit(json, &fc, |fc| {
                print_positions(&fc.positions);
                println!(
                    "\nMoon nakshatra: {} (pada {})",
                    fc.moon_nakshatra.nakshatra.name(),
                    fc.moon_nakshatra.pada
                );
                match &fc.current_dasha {
                    Some(cur) => println!(
                        "Current dasha: {} / {} / {}",
                        cur.major.ruler.name(),
                        cur.sub.ruler.name(),
                        cur.sub_sub.ruler.name()
                    ),
                    None => println!("Current dasha: -"),
                }
                println!("\nMahadashas:");
                for p in &fc.mahadasha_timeline {
                    print_period("  ", p, offset);
                }
                println!("\nNavamsha (D9):");
                for g in ALL_GRAHAS {
                    let i = g.index() as usize;
                    println!(
                        "  {:<8} {:<10}{}",
                        g.name(),
                        fc.navamsha.grahas[i].rashi.name(),
                        if fc.navamsha.vargottama[i] { " vargottama" } else { "" }
                    );
                }
                println!("  {:<8} {}", "Lagna", fc.navamsha.ascendant.rashi.name());
                println!("\nYogas:");
                let all: Vec<YogaFinding> = fc
                    .yogas
                    .rajayogas
                    .iter()
                    .chain(&fc.yogas.dhana_yogas)
                    .chain(&fc.yogas.other_yogas)
                    .cloned()
                    .collect();
                print_yogas(&all);
            });
        }

        Commands::Shadbala { chart } => {
            let (provider, birth) = load_chart(&chart, &cfg);
            let all = or_exit(shadbala_for_chart(&provider, &birth, &options));
            emit(json, &all, |all| {
                println!(
                    "{:<8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>9} {:>6}",
                    "Graha", "Sthana", "Dig", "Kala", "Cheshta", "Naisarg", "Drik", "Total", "%"
                );
                for r in &all.results {
                    println!(
                        "{:<8} {:>8.2} {:>8.2} {:>8.2} {:>8.2} {:>8.2} {:>8.2} {:>9.2} {:>6.1}{}",
                        r.graha.name(),
                        r.sthana_bala,
                        r.dig_bala,
                        r.kala_bala,
                        r.cheshta_bala,
                        r.naisargika_bala,
                        r.drik_bala,
                        r.total,
                        r.strength_percentage,
                        if r.is_strong { "" } else { " weak" }
                    );
                }
                println!(
                    "\nStrongest: {}  Weakest: {}",
                    all.strongest.name(),
                    all.weakest.name()
                );
            });
        }

        Commands::Ashtakavarga { chart } => {
            let (provider, birth) = load_chart(&chart, &cfg);
            let av = or_exit(ashtakavarga_for_chart(&provider, &birth));
            emit(json, &av, |av| {
                print!("{:>10}", "");
                for r in ALL_RASHIS {
                    print!("{:>5}", &r.name()[..3]);
                }
                println!("{:>7}", "Total");
                for bav in &av.bavs {
                    print!("{:>10}", bav.graha.name());
                    for p in bav.points {
                        print!("{p:>5}");
                    }
                    println!("{:>7}", bav.total());
                }
                print!("{:>10}", "SAV");
                for p in av.sav.points {
                    print!("{p:>5}");
                }
                println!("{:>7}", av.sav.total());
            });
        }

        Commands::Transit { chart, at } => {
            let (provider, birth) = load_chart(&chart, &cfg);
            let tc = or_exit(transits(&provider, &birth, parse_dt(&at)));
            emit(json, &tc, |tc| {
                println!(
                    "Transits at {} over natal lagna {}\n",
                    tc.transit_datetime,
                    tc.natal.ascendant.rashi.name()
                );
                for g in ALL_GRAHAS {
                    let p = tc.transit.graha(g);
                    println!(
                        "{:<8} {:<10} house {:>2}{}",
                        g.name(),
                        p.rashi.name(),
                        tc.transit_houses[g.index() as usize],
                        if p.is_retrograde { " R" } else { "" }
                    );
                }
                println!();
                for a in &tc.analysis {
                    println!(
                        "{:<8} BAV {} ({})  SAV {} ({})  {}",
                        a.graha.name(),
                        a.bhinna_bindus,
                        a.bhinna_quality.name(),
                        a.sarva_bindus,
                        a.sarva_quality.name(),
                        a.recommendation
                    );
                }
            });
        }

        Commands::Yogas { chart } => {
            let (provider, birth) = load_chart(&chart, &cfg);
            let yogas = or_exit(yogas_for_chart(&provider, &birth));
            emit(json, &yogas, |y| print_yogas(y));
        }

        Commands::Panchanga {
            chart,
            sunrise,
            sunset,
        } => {
            let (provider, birth) = load_chart(&chart, &cfg);
            let rise = sunrise.as_deref().map(parse_dt);
            let set = sunset.as_deref().map(parse_dt);
            let p = or_exit(panchanga_for_chart(&provider, &birth, rise, set));
            let offset = *birth.datetime.offset();
            emit(json, &p, |p| {
                println!(
                    "Tithi:     {} ({:?} {}), lord {}",
                    p.tithi.name,
                    p.tithi.paksha,
                    p.tithi.tithi_in_paksha,
                    p.tithi.lord.name()
                );
                println!(
                    "Nakshatra: {} pada {}",
                    p.nakshatra.nakshatra.name(),
                    p.nakshatra.pada
                );
                println!("Yoga:      {} ({:?})", p.yoga.name, p.yoga.nature);
                println!("Karana:    {} ({:?})", p.karana.name, p.karana.kind);
                println!("Vara:      {} ({})", p.vara.name(), p.vara.sanskrit_name());
                for (label, w) in [("Rahu Kaal", p.rahu_kaal), ("Gulika Kaal", p.gulika_kaal)] {
                    if let Some(w) = w {
                        println!(
                            "{label}: {} .. {}",
                            fmt_jd(w.start_jd, offset),
                            fmt_jd(w.end_jd, offset)
                        );
                    }
                }
                println!(
                    "Score:     {} ({})",
                    p.auspiciousness_score,
                    if p.is_auspicious { "auspicious" } else { "not auspicious" }
                );
                for note in &p.special_notes {
                    println!("  * {note}");
                }
            });
        }

        Commands::Choghadiya { sunrise, sunset } => {
            let rise = parse_dt(&sunrise);
            let set = parse_dt(&sunset);
            let periods = or_exit(choghadiya_for_day(&rise, &set));
            let abhijit = or_exit(abhijit_for_day(&rise, &set));
            let offset = *rise.offset();

            #[derive(Serialize)]
            struct DayMuhurta<'a> {
                choghadiya: &'a [ChoghadiyaPeriod],
                abhijit: &'a AbhijitMuhurta,
            }
            let out = DayMuhurta {
                choghadiya: &periods,
                abhijit: &abhijit,
            };
            emit(json, &out, |out| {
                for c in out.choghadiya {
                    println!(
                        "{:<6} {} .. {}  lord {:<8}{}",
                        c.name,
                        fmt_jd(c.window.start_jd, offset),
                        fmt_jd(c.window.end_jd, offset),
                        c.lord.name(),
                        if c.is_good { "" } else { "  avoid" }
                    );
                }
                println!(
                    "\n{}: {} .. {} ({:.1} min)",
                    out.abhijit.name,
                    fmt_jd(out.abhijit.window.start_jd, offset),
                    fmt_jd(out.abhijit.window.end_jd, offset),
                    out.abhijit.duration_minutes
                );
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_negative_latitude() {
        let cli = Cli::try_parse_from([
            "kundali",
            "positions",
            "--snapshot",
            "s.json",
            "--date",
            "2000-01-01T00:00:00Z",
            "--lat",
            "-33.87",
            "--lon",
            "151.21",
        ])
        .unwrap();
        match cli.command {
            Commands::Positions { chart } => assert_eq!(chart.lat, -33.87),
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn config_subcommand_parses() {
        let cli = Cli::try_parse_from(["kundali", "config", "--config", "k.toml"]).unwrap();
        assert!(matches!(cli.command, Commands::Config));
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("k.toml")));
    }

    #[test]
    fn panchanga_needs_both_day_ends() {
        let base = [
            "kundali",
            "panchanga",
            "--snapshot",
            "s.json",
            "--date",
            "1990-05-15T14:30:00+05:30",
            "--lat",
            "28.61",
            "--lon",
            "77.21",
        ];
        let mut args = base.to_vec();
        args.extend(["--sunrise", "1990-05-15T05:35:00+05:30"]);
        assert!(Cli::try_parse_from(&args).is_err());
        args.extend(["--sunset", "1990-05-15T19:05:00+05:30"]);
        assert!(Cli::try_parse_from(&args).is_ok());
        assert!(Cli::try_parse_from(base).is_ok());
    }

    #[test]
    fn global_json_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["kundali", "rashi", "45.5", "--json"]).unwrap();
        assert!(cli.json);
    }

    #[test]
    fn chart_subcommand_takes_optional_instant() {
        let cli = Cli::try_parse_from([
            "kundali",
            "chart",
            "--snapshot",
            "s.json",
            "--date",
            "1990-05-15T14:30:00+05:30",
            "--lat",
            "28.61",
            "--lon",
            "77.21",
            "--ayanamsa",
            "kp",
        ])
        .unwrap();
        match cli.command {
            Commands::Chart { chart, at } => {
                assert!(at.is_none());
                assert_eq!(chart.ayanamsa.as_deref(), Some("kp"));
            }
            _ => panic!("wrong subcommand"),
        }
    }
}
