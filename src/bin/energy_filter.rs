use energy_lfp::filter::parse_cli;
use energy_lfp::{
    AreaConsumption, AvailabilityFactor, DataSpec, Error, TableFormat, TechnologyParameters,
};
use std::collections::HashSet;
use std::path::PathBuf;

fn main() {
    let (spec, technologies, outdir, verbose) = parse_cli();
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();
    if let Err(e) = run(spec, technologies, outdir) {
        eprintln!("energy_filter: {}", e);
        std::process::exit(1);
    }
}

fn run(spec: DataSpec, technologies: HashSet<String>, outdir: PathBuf) -> Result<(), Error> {
    println!(
        "filter tables from {} for zone {} year {}",
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
    let filtered_availability = availability.filter_technologies(&technologies);
    let filtered_parameters = parameters.filter_technologies(&technologies);
    println!(
        "kept {} of {} availability rows and {} of {} technologies",
        filtered_availability.len(),
        availability.len(),
        filtered_parameters.len(),
        parameters.len()
    );
    let availability_out = outdir.join(format!(
        "availabilityFactor{}_{}_filtered.csv",
        spec.year, spec.zone
    ));
    let parameters_out = outdir.join("TECHNOLOGIES_filtered.csv");
    filtered_availability.to_csv(&availability_out, &TableFormat::comma_point())?;
    filtered_parameters.to_csv(&parameters_out, &TableFormat::semicolon_comma())?;
    println!(
        "wrote {} and {}",
        availability_out.display(),
        parameters_out.display()
    );
    Ok(())
}
