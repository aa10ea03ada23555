mod publisher;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use pos_gen_core::config::Config;
use pos_gen_core::corpus::Corpus;
use pos_gen_core::model::generator::Generator;
use pos_gen_core::text::RuleTagger;

use publisher::{DryRun, HttpPublisher, Publisher};

/// Generates one status from prior texts and posts it.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
	/// TOML configuration file
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Corpus file, overrides the configured one
	#[arg(long)]
	corpus: Option<PathBuf>,

	/// Print the status instead of posting it
	#[arg(long)]
	dry_run: bool,

	/// Seed of the random generator, for reproducible output
	#[arg(long)]
	seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let args = Args::parse();

	// Missing configuration file means defaults everywhere
	let mut config = match &args.config {
		Some(path) => Config::load(path)?,
		None => Config::default(),
	};
	if let Some(corpus) = args.corpus {
		config.corpus.path = corpus;
	}

	let corpus = if config.corpus.json {
		Corpus::from_json_file(&config.corpus.path)?
	} else {
		Corpus::from_text_file(&config.corpus.path)?
	};
	info!("loaded {} corpus lines from {}", corpus.len(), config.corpus.path.display());

	let mut tagger = RuleTagger::default();
	if let Some(lexicon) = &config.corpus.lexicon {
		tagger = tagger.with_lexicon_file(lexicon)?;
	}

	let generator = Generator::build(&corpus, tagger, &config.generation.build_options())?;
	let input = config.generation.generation_input()?;

	let status = match args.seed {
		Some(seed) => generator.make_short_sentence(&input, &mut StdRng::seed_from_u64(seed))?,
		None => generator.generate(&input)?,
	};

	let publisher: Box<dyn Publisher> = if args.dry_run {
		Box::new(DryRun)
	} else {
		let token = std::env::var(&config.publish.token_env)
			.map_err(|_| format!("environment variable {} is not set", config.publish.token_env))?;
		Box::new(HttpPublisher::new(
			&config.publish.endpoint,
			token,
			Duration::from_secs(config.publish.timeout_secs),
		)?)
	};

	publisher.publish(&status)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn arguments_parse() {
		let args = Args::try_parse_from(["pos-gen-bot", "--config", "bot.toml", "--dry-run", "--seed", "4"]).unwrap();
		assert_eq!(args.config, Some(PathBuf::from("bot.toml")));
		assert!(args.dry_run);
		assert_eq!(args.seed, Some(4));
		assert!(args.corpus.is_none());
	}

	#[test]
	fn defaults_post_for_real() {
		let args = Args::try_parse_from(["pos-gen-bot"]).unwrap();
		assert!(!args.dry_run);
		assert!(args.config.is_none());
	}
}
