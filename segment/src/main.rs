use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader};

use fenci::{Dictionary, Segmenter};

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(name = "segment", about = "Segments lines read from stdin.")]
struct Args {
    #[clap(short = 'i', long)]
    model_filename: String,

    /// Search-engine mode: compounds are broken into sub-tokens.
    #[clap(short = 'S', long)]
    search: bool,

    /// Prints surfaces separated by spaces instead of one per line.
    #[clap(short = 'w', long)]
    wakachi: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    eprintln!("Loading the model...");
    let reader = BufReader::new(File::open(args.model_filename)?);
    let dict = Dictionary::read(reader)?;
    let segmenter = Segmenter::new(dict);
    let mut worker = segmenter.new_worker();
    eprintln!("Ready to segment :)");

    #[allow(clippy::significant_drop_in_scrutinee)]
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        worker.reset_sentence(&line);
        if args.search {
            worker.segment_for_search();
        } else {
            worker.segment();
        }
        if args.wakachi {
            for i in 0..worker.num_tokens() {
                print!(
                    "{}{}",
                    worker.token(i).surface(),
                    if i != worker.num_tokens() - 1 { ' ' } else { '\n' }
                );
            }
        } else {
            for i in 0..worker.num_tokens() {
                let t = worker.token(i);
                println!("{}\t{}", t.surface(), t.tag());
            }
            println!("EOS");
        }
    }

    Ok(())
}
