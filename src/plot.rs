use super::{DataSpec, DEFAULT_TECHNOLOGIES, VERSION};
use clap::{App, Arg};
use std::collections::HashSet;
use std::path::PathBuf;

/// Takes the CLI arguments that control the charting of the
/// availability factor time series.
pub fn parse_cli() -> (
    DataSpec,
    HashSet<String>,
    String,
    PathBuf,
    Option<PathBuf>,
    bool,
    bool,
) {
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
    let arg_chart = Arg::with_name("chart_technology")
        .help("technology whose availability gets charted")
        .short("c")
        .long("chart")
        .takes_value(true)
        .default_value("OldNuke");
    let arg_htmlout = Arg::with_name("output_htmlfile")
        .help("name of the output html file")
        .short("o")
        .long("htmlfile")
        .takes_value(true)
        .default_value("file.html");
    let arg_svgout = Arg::with_name("output_svgfile")
        .help("also export a static svg to this file")
        .long("svgfile")
        .takes_value(true);
    let arg_noshow = Arg::with_name("no_show")
        .help("do not open the chart in the browser")
        .long("no-show")
        .takes_value(false);
    let arg_verbose = Arg::with_name("verbose")
        .help("print verbose information")
        .short("v")
        .long("verbose")
        .takes_value(false);
    let cli_args = App::new("energy_plot")
        .version(VERSION.unwrap_or("unknown"))
        .about("cli app to chart the availability factor time series")
        .arg(arg_dir)
        .arg(arg_zone)
        .arg(arg_year)
        .arg(arg_technologies)
        .arg(arg_chart)
        .arg(arg_htmlout)
        .arg(arg_svgout)
        .arg(arg_noshow)
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
    let chart = String::from(cli_args.value_of("chart_technology").unwrap_or_default());
    let htmlout = PathBuf::from(cli_args.value_of("output_htmlfile").unwrap_or_default());
    let svgout = cli_args.value_of("output_svgfile").map(PathBuf::from);
    let show = !cli_args.is_present("no_show");
    let verbose = cli_args.is_present("verbose");
    (
        DataSpec::new(input_dir, zone, year),
        technologies,
        chart,
        htmlout,
        svgout,
        show,
        verbose,
    )
}
