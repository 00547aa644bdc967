use super::{DataSpec, DEFAULT_TECHNOLOGIES, VERSION};
use clap::{App, Arg};
use std::collections::HashSet;
use std::path::PathBuf;

/// Takes the CLI arguments that locate the input tables and pick the
/// technologies to keep.
pub fn parse_cli() -> (DataSpec, HashSet<String>, PathBuf, bool) {
    let arg_dir = Arg::with_name("input_dir")
        .help("directory holding the input csv tables")
        .short("d")
        .long("dir")
        .takes_value(true)
        .default_value("CSV/input");
    let arg_zone = Arg::with_name("zone")
        .help("zone identifier of the time series files")
        .short("z")
        .long("zone")
        .takes_value(true)
        .default_value("FR");
    let arg_year = Arg::with_name("year")
        .help("year of the time series files")
        .short("y")
        .long("year")
        .takes_value(true)
        .default_value("2013");
    let arg_technologies = Arg::with_name("technologies")
        .help("technologies to keep, space separated")
        .short("t")
        .long("technologies")
        .takes_value(true)
        .multiple(true);
    let arg_outdir = Arg::with_name("output_dir")
        .help("directory for the filtered csv tables")
        .short("o")
        .long("outdir")
        .takes_value(true)
        .default_value(".");
    let arg_verbose = Arg::with_name("verbose")
        .help("print verbose information")
        .short("v")
        .long("verbose")
        .takes_value(false);
    let cli_args = App::new("energy_filter")
        .version(VERSION.unwrap_or("unknown"))
        .about("cli app to filter the energy tables to a technology selection")
        .arg(arg_dir)
        .arg(arg_zone)
        .arg(arg_year)
        .arg(arg_technologies)
        .arg(arg_outdir)
        .arg(arg_verbose)
        .get_matches();
    let input_dir = PathBuf::from(cli_args.value_of("input_dir").unwrap_or_default());
    let zone = cli_args.value_of("zone").unwrap_or_default();
    let year = cli_args
        .value_of("year")
        .unwrap_or_default()
        .parse::<i32>()
        .unwrap();
    let technologies: HashSet<String> = match cli_args.values_of("technologies") {
        Some(vals) => vals.map(String::from).collect(),
        None => DEFAULT_TECHNOLOGIES.iter().map(|t| String::from(*t)).collect(),
    };
    let outdir = PathBuf::from(cli_args.value_of("output_dir").unwrap_or_default());
    let verbose = cli_args.is_present("verbose");
    (DataSpec::new(input_dir, zone, year), technologies, outdir, verbose)
}
