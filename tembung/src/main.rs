use clap::{Arg, Command};

use tembung::{StemmerKind, analyse};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("tembung")
        .version("0.1.0")
        .about("Offline tokenize, affix and stem breakdown of Indonesian text")
        .arg(
            Arg::new("text")
                .help("Text to analyse")
                .required(true)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("stemmer")
                .long("stemmer")
                .short('s')
                .help("Stemming strategy: affix or snowball")
                .default_value("affix"),
        )
        .arg(
            Arg::new("algorithm")
                .long("algorithm")
                .short('a')
                .help("Snowball algorithm when --stemmer snowball is used")
                .default_value("english"),
        )
        .get_matches();

    let text = matches
        .get_many::<String>("text")
        .map(|words| words.cloned().collect::<Vec<_>>().join(" "))
        .unwrap_or_default();
    let strategy = matches
        .get_one::<String>("stemmer")
        .map(String::as_str)
        .unwrap_or("affix");
    let algorithm = matches
        .get_one::<String>("algorithm")
        .map(String::as_str)
        .unwrap_or("english");

    if text.trim().is_empty() {
        return Err("Text must contain at least one word".into());
    }

    let stemmer = StemmerKind::from_names(strategy, algorithm)?.build();

    for morphology in analyse(&text, stemmer.as_ref()) {
        println!("{}", serde_json::to_string(&morphology)?);
    }

    Ok(())
}
