use std::path::Path;
use std::sync::Arc;

use clap::{Arg, Command};
use tembung::TranslationRequest;
use tembung_mt::{Backend, Config, MockMode, MockTranslator, Pipeline};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("tembung-mt")
        .version("0.1.0")
        .about("Translate Indonesian and Javanese text with a word-by-word breakdown")
        .arg(
            Arg::new("text")
                .help("Text to translate")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("from")
                .long("from")
                .short('f')
                .help("Source code: id or jw")
                .default_value("id"),
        )
        .arg(
            Arg::new("to")
                .long("to")
                .short('t')
                .help("Target code: ng, kl or ka from id; id from jw")
                .default_value("ng"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Path to a TOML config file"),
        )
        .arg(
            Arg::new("backend")
                .long("backend")
                .short('b')
                .help("Word translator: remote or dictionary"),
        )
        .arg(
            Arg::new("dictionary")
                .long("dictionary")
                .short('d')
                .help("Dictionary JSON file"),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .short('m')
                .help("Use the mock translator instead of the remote service")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Show the configured pipeline")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let text = matches.get_one::<String>("text").map(String::as_str);
    let from = matches.get_one::<String>("from").map(String::as_str);
    let to = matches.get_one::<String>("to").map(String::as_str);
    let use_mock = matches.get_flag("mock");
    let verbose = matches.get_flag("verbose");

    let request = match TranslationRequest::validate(text, from, to) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("❌ {}", e);
            return Err(e.into());
        }
    };

    let mut config = Config::load(matches.get_one::<String>("config").map(Path::new))?;
    if let Some(path) = matches.get_one::<String>("dictionary") {
        config.dictionary.path = Some(path.into());
    }
    if let Some(backend) = matches.get_one::<String>("backend") {
        config.translator.backend = backend.parse::<Backend>()?;
    }
    config.validate()?;

    let pipeline = if use_mock {
        let mock = Arc::new(MockTranslator::new(MockMode::Suffix));
        Pipeline::new(mock.clone(), mock, Arc::from(config.stemmer_kind()?.build()), None)
    } else {
        Pipeline::from_config(&config)?
    };

    if verbose {
        eprintln!("📝 Source: \"{}\"", request.text);
        eprintln!("🌍 {}", request.pair);
        eprintln!("{:?}", pipeline.analyzer());
        eprintln!();
    }

    let result = pipeline.translate(&request).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
