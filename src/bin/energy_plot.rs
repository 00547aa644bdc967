use energy_lfp::figure::{availability_figure, show_figure, write_figure_html};
use energy_lfp::plot::parse_cli;
use energy_lfp::{
    AreaConsumption, AvailabilityFactor, DataSpec, Error, TableFormat, TechnologyParameters,
};
use std::collections::HashSet;
use std::path::PathBuf;

fn main() {
    let (spec, technologies, chart, htmlout, svgout, show, verbose) = parse_cli();
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();
    if let Err(e) = run(spec, technologies, chart, htmlout, svgout, show) {
        eprintln!("energy_plot: {}", e);
        std::process::exit(1);
    }
}

fn run(
    spec: DataSpec,
    technologies: HashSet<String>,
    chart: String,
    htmlout: PathBuf,
    svgout: Option<PathBuf>,
    show: bool,
) -> Result<(), Error> {
    println!(
        "read tables from {} for zone {} year {}",
        spec.input_dir.display(),
        spec.zone,
        spec.year
    );
    let consumption =
        AreaConsumption::from_csv(&spec.consumption_path(), &TableFormat::comma_point())?;
    let availability =
        AvailabilityFactor::from_csv(&spec.availability_path(), &TableFormat::comma_point())?;
    let parameters =
        TechnologyParameters::from_csv(&spec.parameters_path(), &TableFormat::semicolon_comma())?;
    log::debug!("{} consumption rows loaded alongside", consumption.len());
    let availability = availability.filter_technologies(&technologies);
    let parameters = parameters.filter_technologies(&technologies);
    println!(
        "{} availability rows and {} technologies after selection",
        availability.len(),
        parameters.len()
    );
    let series = availability.technology_series(&chart);
    println!(
        "chart {} hours of {} availability to {}",
        series.len(),
        chart,
        htmlout.display()
    );
    let figure = availability_figure(
        &series,
        &format!("{} availability factor over the year", chart),
        "hour of the year",
    )?;
    write_figure_html(&figure, &htmlout)?;
    if let Some(svg) = svgout {
        println!("export static svg to {}", svg.display());
        series
            .plot_datetime(&svg, spec.year)
            .map_err(|e| Error::Render(format!("svg export failed: {}", e)))?;
    }
    if show {
        show_figure(&figure);
    }
    Ok(())
}
