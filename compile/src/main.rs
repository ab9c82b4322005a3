use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::time::Instant;

use fenci::DictionaryBuilder;

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(
    name = "compile",
    about = "Compiles text dictionaries into a segmentation model."
)]
struct Args {
    /// Text dictionaries in priority order; on duplicate words, the
    /// earliest file wins.
    #[clap(short = 'i', long, required = true)]
    dict_filenames: Vec<String>,

    #[clap(short = 'o', long)]
    output_filename: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    eprintln!("Compiling the dictionary...");
    let start = Instant::now();
    let mut builder = DictionaryBuilder::new();
    for filename in &args.dict_filenames {
        eprintln!("Reading {filename}...");
        builder.read_source(File::open(filename)?)?;
    }
    let dict = builder.build()?;
    eprintln!("{} seconds", start.elapsed().as_secs_f64());
    eprintln!(
        "{} words, total frequency {}",
        dict.num_words(),
        dict.total_frequency()
    );

    eprintln!("Writing the model...: {}", &args.output_filename);
    let mut writer = BufWriter::new(File::create(args.output_filename)?);
    let num_bytes = dict.write(&mut writer)?;
    eprintln!("{} MiB", num_bytes as f64 / (1024. * 1024.));

    Ok(())
}
