use clap::{crate_description, crate_name, crate_version, App, Arg};
use imgar::FormatKind;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = App::new(crate_name!())
        .about(crate_description!())
        .version(crate_version!())
        .arg(
            Arg::with_name("FILE")
                .help("Container file to extract")
                .required(true),
        )
        .arg(
            Arg::with_name("flat")
                .help("Write sub-files beside the container instead of into a directory")
                .short("f")
                .long("flat"),
        )
        .get_matches();

    let file = matches.value_of("FILE").unwrap();
    let kind = imgar::extract(file, !matches.is_present("flat"))?;

    match kind {
        FormatKind::Archive => println!("extracted archive \"{}\"", file),
        kind => println!("extracted img({}) \"{}\"", kind, file),
    }
    Ok(())
}
